//! WavMeter RMS Tool
//!
//! WAV (RIFF/WAVE) 容器的校验式解析与响度分析工具库。
//!
//! ## 核心特性
//! - 递归下降的块解析状态机：`RIFF头 → fmt块 → data块`，严格顺序、无回溯
//! - RIFF声明大小与byteRate/blockAlign的交叉字段校验
//! - 按位深（8/16/32位）分发的有符号PCM样本解码
//! - 交错样本流的声道分离
//! - 降混、峰值检测、峰值归一化和RMS-dB响度计算
//!
//! 解析与分析均为同步纯函数：整个文件读入内存后一次原子解析，
//! 要么产出完整的`WavDocument`，要么返回携带结构化细节的错误。

pub mod analysis;
pub mod error;
pub mod parser;
pub mod processing;
pub mod tools;

// 重新导出核心类型
pub use analysis::AnalysisResult;
pub use error::{ErrorCategory, WavError, WavResult};
pub use parser::{BitDepth, ByteCursor, DataChunk, FmtChunk, RiffHeader, WavDocument, parse_wav};
pub use processing::ChannelDeinterleaver;
pub use tools::FileReport;
