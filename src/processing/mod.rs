//! 样本后处理模块
//!
//! 交错样本流的声道分离。

pub mod deinterleave;

pub use deinterleave::ChannelDeinterleaver;
