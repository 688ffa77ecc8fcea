//! 二进制游标
//!
//! 基于不可变字节缓冲区的顺序解码游标，提供定宽小端读取原语。
//! 所有读取操作要么成功并推进偏移，要么失败且不推进偏移——
//! 上层状态机因此不需要任何回溯逻辑。

use crate::error::{WavError, WavResult};

/// 位置跟踪的字节游标
///
/// 游标本身可变（偏移推进），底层缓冲区永远只读。
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// 在缓冲区起始处创建游标
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// 当前读取偏移
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 底层缓冲区总长度
    #[inline]
    pub fn total_len(&self) -> usize {
        self.buf.len()
    }

    /// 剩余可读字节数
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// 消费n个字节；剩余不足时失败且不推进偏移
    fn take(&mut self, needed: usize) -> WavResult<&'a [u8]> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(WavError::TruncatedInput {
                offset: self.offset,
                needed,
                remaining,
            });
        }
        let bytes = &self.buf[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(bytes)
    }

    /// 读取小端u16
    pub fn u16_le(&mut self) -> WavResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// 读取小端u32
    pub fn u32_le(&mut self) -> WavResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// 读取有符号8位样本
    pub fn s8(&mut self) -> WavResult<i8> {
        let b = self.take(1)?;
        Ok(b[0] as i8)
    }

    /// 读取小端有符号16位样本
    pub fn s16_le(&mut self) -> WavResult<i16> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    /// 读取小端有符号32位样本
    pub fn s32_le(&mut self) -> WavResult<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// 消费期望的ASCII字面量（如"RIFF"/"WAVE"/"fmt "/"data"）
    ///
    /// 不匹配时报告期望字节、实际字节和不匹配发生的偏移，且不推进偏移。
    pub fn literal(&mut self, expected: &[u8]) -> WavResult<()> {
        let remaining = self.remaining();
        if remaining < expected.len() {
            return Err(WavError::TruncatedInput {
                offset: self.offset,
                needed: expected.len(),
                remaining,
            });
        }
        let actual = &self.buf[self.offset..self.offset + expected.len()];
        if actual != expected {
            return Err(WavError::literal_mismatch(expected, actual, self.offset));
        }
        self.offset += expected.len();
        Ok(())
    }
}
