//! 响度分析模块
//!
//! 降混、峰值检测、峰值归一化和RMS-dB换算。

pub mod analyzer;

pub use analyzer::{AnalysisResult, peak, peak_normalize, rms_db, stereo_to_mono_avg};
