//! RIFF/WAVE块解析状态机
//!
//! 严格顺序的递归下降解析：`Start → RiffHeader → FmtChunk → DataChunk → Done`，
//! 无回溯、无可选块、无跳过未知块。每一步接收游标并返回解码值或类型化错误；
//! 任何一步失败都会中止整个解析，绝不暴露部分文档。
//!
//! fmt块的校验结果通过显式参数传递给data块解析函数，
//! 解析阶段之间不存在任何隐式共享状态。

use crate::error::{WavError, WavResult};
use crate::parser::cursor::ByteCursor;
use crate::parser::sample::BitDepth;
use crate::processing::ChannelDeinterleaver;

#[cfg(debug_assertions)]
macro_rules! debug_parse {
    ($($arg:tt)*) => {
        eprintln!("[PARSE_DEBUG] {}", format_args!($($arg)*));
    };
}

#[cfg(not(debug_assertions))]
macro_rules! debug_parse {
    ($($arg:tt)*) => {};
}

/// RIFF头部（"RIFF" + 声明大小 + "WAVE"）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiffHeader {
    /// RIFF声明的大小，不变式: declared_size == 文件长度 - 8
    pub declared_size: u32,
}

/// 已通过交叉字段校验的fmt块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    /// fmt子块声明大小（标准PCM为16）
    pub sub_chunk1_size: u32,
    /// 音频编码格式标签（PCM为1，原样保存、不校验）
    pub audio_format: u16,
    /// 声道数量（>= 1）
    pub num_channels: u16,
    /// 采样率 (Hz)
    pub sample_rate: u32,
    /// 每秒字节数，不变式: sample_rate * num_channels * bits / 8
    pub byte_rate: u32,
    /// 单帧字节数，不变式: num_channels * bits / 8
    pub block_align: u16,
    /// 位深度，仅支持 {8, 16, 32}
    pub bits_per_sample: u16,
}

impl FmtChunk {
    /// 已校验的位深度
    pub fn bit_depth(&self) -> WavResult<BitDepth> {
        BitDepth::from_bits(self.bits_per_sample)
    }
}

/// data块：声明大小 + 逐声道样本数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataChunk {
    /// data子块声明大小（字节）
    pub declared_size: u32,
    /// 逐声道的有序样本序列，所有声道长度一致
    pub channel_data: Vec<Vec<i64>>,
}

/// 一次原子解析产出的完整WAV文档，解析后只读
#[derive(Debug, Clone, PartialEq)]
pub struct WavDocument {
    /// RIFF头部
    pub header: RiffHeader,
    /// 已校验的fmt块
    pub fmt: FmtChunk,
    /// 解码后的data块
    pub data: DataChunk,
}

impl WavDocument {
    /// 单声道样本数量
    pub fn samples_per_channel(&self) -> usize {
        self.data.channel_data.first().map_or(0, Vec::len)
    }

    /// 音频时长（秒）
    pub fn duration_seconds(&self) -> f64 {
        if self.fmt.sample_rate == 0 {
            return 0.0;
        }
        self.samples_per_channel() as f64 / f64::from(self.fmt.sample_rate)
    }
}

/// 状态1: `Start → RiffHeader`
///
/// 消费"RIFF"、声明大小、"WAVE"；声明大小与缓冲区长度-8不符时
/// 返回`SizeMismatch`并携带两个值。
pub fn parse_riff_header(cursor: &mut ByteCursor<'_>) -> WavResult<RiffHeader> {
    cursor.literal(b"RIFF")?;
    let declared_size = cursor.u32_le()?;
    let actual_len = cursor.total_len();
    if declared_size as usize != actual_len.wrapping_sub(8) {
        return Err(WavError::SizeMismatch {
            declared: declared_size,
            actual_len,
        });
    }
    cursor.literal(b"WAVE")?;
    Ok(RiffHeader { declared_size })
}

/// 状态2: `RiffHeader → FmtChunk`
///
/// 读取七个格式字段并做交叉校验：
/// - 位深度必须在 {8, 16, 32} 内，在消费任何data块字节之前失败
/// - byteRate == sampleRate * numChannels * bits / 8
/// - blockAlign == numChannels * bits / 8
///
/// 校验失败返回`InconsistentFormat`，携带期望值与实际值。
pub fn parse_fmt_chunk(cursor: &mut ByteCursor<'_>) -> WavResult<FmtChunk> {
    cursor.literal(b"fmt ")?;
    let sub_chunk1_size = cursor.u32_le()?;
    let audio_format = cursor.u16_le()?;
    let num_channels = cursor.u16_le()?;
    let sample_rate = cursor.u32_le()?;
    let byte_rate = cursor.u32_le()?;
    let block_align = cursor.u16_le()?;
    let bits_per_sample = cursor.u16_le()?;

    if num_channels < 1 {
        return Err(WavError::InconsistentFormat {
            field: "numChannels",
            expected: 1,
            observed: 0,
        });
    }

    // 位深度在fmt阶段即校验，保证不支持的位深不会消费data块字节
    let depth = BitDepth::from_bits(bits_per_sample)?;

    // 交叉校验用u64计算，避免极端采样率下的乘法溢出
    let expected_byte_rate = u64::from(sample_rate)
        * u64::from(num_channels)
        * u64::from(depth.bytes_per_sample());
    if u64::from(byte_rate) != expected_byte_rate {
        return Err(WavError::InconsistentFormat {
            field: "byteRate",
            expected: expected_byte_rate,
            observed: u64::from(byte_rate),
        });
    }

    let expected_block_align = u64::from(num_channels) * u64::from(depth.bytes_per_sample());
    if u64::from(block_align) != expected_block_align {
        return Err(WavError::InconsistentFormat {
            field: "blockAlign",
            expected: expected_block_align,
            observed: u64::from(block_align),
        });
    }

    Ok(FmtChunk {
        sub_chunk1_size,
        audio_format,
        num_channels,
        sample_rate,
        byte_rate,
        block_align,
        bits_per_sample,
    })
}

/// 状态3: `FmtChunk → DataChunk`
///
/// 接收已校验的fmt块作为显式参数。按位深分发样本解码，
/// 以 声道0..N-1 循环的交错顺序解码全部样本并送入去交错器。
pub fn parse_data_chunk(cursor: &mut ByteCursor<'_>, fmt: &FmtChunk) -> WavResult<DataChunk> {
    cursor.literal(b"data")?;
    let declared_size = cursor.u32_le()?;

    let depth = fmt.bit_depth()?;
    let frame_bytes = u32::from(fmt.num_channels) * depth.bytes_per_sample();

    // data大小必须按整帧对齐
    if declared_size % frame_bytes != 0 {
        return Err(WavError::InconsistentFormat {
            field: "data块大小（按帧对齐）",
            expected: u64::from(declared_size - declared_size % frame_bytes),
            observed: u64::from(declared_size),
        });
    }

    let total_samples = (declared_size / depth.bytes_per_sample()) as usize;
    debug_parse!(
        "data块: {declared_size}字节, {}声道 x {}位, 共{total_samples}样本",
        fmt.num_channels,
        depth.bits()
    );

    let mut deinterleaver = ChannelDeinterleaver::new(usize::from(fmt.num_channels), total_samples);
    for _ in 0..total_samples {
        deinterleaver.push(depth.decode(cursor)?);
    }

    Ok(DataChunk {
        declared_size,
        channel_data: deinterleaver.into_channels(),
    })
}

/// 运行完整状态机: `Start → RiffHeader → FmtChunk → DataChunk → Done`
///
/// 一次原子解析：要么产出完整的`WavDocument`，要么返回第一个遇到的错误。
pub fn parse_wav(buf: &[u8]) -> WavResult<WavDocument> {
    let mut cursor = ByteCursor::new(buf);
    let header = parse_riff_header(&mut cursor)?;
    let fmt = parse_fmt_chunk(&mut cursor)?;
    let data = parse_data_chunk(&mut cursor, &fmt)?;
    Ok(WavDocument { header, fmt, data })
}
