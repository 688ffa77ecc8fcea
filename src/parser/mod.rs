//! WAV解析模块
//!
//! 二进制游标、样本解码分发和RIFF/WAVE块解析状态机。

pub mod chunk;
pub mod cursor;
pub mod sample;

pub use chunk::{DataChunk, FmtChunk, RiffHeader, WavDocument, parse_wav};
pub use cursor::ByteCursor;
pub use sample::BitDepth;
