//! 样本解码器
//!
//! 位深度到定宽有符号整数解码操作的纯分发。
//! 每次解码精确消费 bits/8 字节，不做任何舍入或钳制——
//! 解码宽度与声明位深一致，越界值在构造上不可能出现。

use crate::error::{WavError, WavResult};
use crate::parser::cursor::ByteCursor;

/// 受支持的PCM位深度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 有符号8位
    Bits8,
    /// 有符号16位小端
    Bits16,
    /// 有符号32位小端
    Bits32,
}

impl BitDepth {
    /// 从fmt块的bitsPerSample字段分发
    ///
    /// 仅接受8/16/32，其余位深（包括常见的24位）返回`UnsupportedBitDepth`。
    pub fn from_bits(bits: u16) -> WavResult<Self> {
        match bits {
            8 => Ok(BitDepth::Bits8),
            16 => Ok(BitDepth::Bits16),
            32 => Ok(BitDepth::Bits32),
            other => Err(WavError::UnsupportedBitDepth(other)),
        }
    }

    /// 位深的位数
    #[inline]
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Bits8 => 8,
            BitDepth::Bits16 => 16,
            BitDepth::Bits32 => 32,
        }
    }

    /// 单个样本占用的字节数
    #[inline]
    pub fn bytes_per_sample(self) -> u32 {
        u32::from(self.bits()) / 8
    }

    /// 峰值归一化的天花板：该位深可表示的最大幅度
    ///
    /// 8位 → 128，16位 → 32768，32位 → 2147483648
    #[inline]
    pub fn ceiling(self) -> f64 {
        match self {
            BitDepth::Bits8 => 128.0,
            BitDepth::Bits16 => 32768.0,
            BitDepth::Bits32 => 2_147_483_648.0,
        }
    }

    /// 从游标解码一个样本，加宽为i64
    ///
    /// 统一用i64承载，保证 |i32::MIN| 在取绝对值时不溢出。
    #[inline]
    pub fn decode(self, cursor: &mut ByteCursor<'_>) -> WavResult<i64> {
        match self {
            BitDepth::Bits8 => cursor.s8().map(i64::from),
            BitDepth::Bits16 => cursor.s16_le().map(i64::from),
            BitDepth::Bits32 => cursor.s32_le().map(i64::from),
        }
    }
}
