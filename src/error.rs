//! 统一错误处理框架
//!
//! WAV解析与响度分析的结构化错误类型定义。
//! 每个解析错误都携带足够的结构化信息（期望值/实际值/字节偏移），
//! 保证调用方能够渲染精确的诊断信息。

use std::fmt;
use std::io;

/// 将字节序列转义为可读字符串（用于块标签诊断）
fn escape_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|b| std::ascii::escape_default(*b))
        .map(char::from)
        .collect()
}

/// WAV解析与分析相关的统一错误类型
#[derive(Debug)]
pub enum WavError {
    /// 游标越过缓冲区末尾读取
    TruncatedInput {
        /// 失败读取发生的字节偏移
        offset: usize,
        /// 本次读取需要的字节数
        needed: usize,
        /// 缓冲区剩余的字节数
        remaining: usize,
    },

    /// 期望的块标签字节未找到
    LiteralMismatch {
        /// 期望的ASCII标签（已转义）
        expected: String,
        /// 实际读到的字节（已转义）
        actual: String,
        /// 不匹配发生的字节偏移
        offset: usize,
    },

    /// RIFF声明大小与文件实际大小不符
    SizeMismatch {
        /// RIFF头部声明的大小
        declared: u32,
        /// 缓冲区实际长度
        actual_len: usize,
    },

    /// fmt块交叉字段校验失败（byteRate/blockAlign等）
    InconsistentFormat {
        /// 校验失败的字段名
        field: &'static str,
        /// 按公式计算的期望值
        expected: u64,
        /// 文件中声明的实际值
        observed: u64,
    },

    /// 不支持的位深度（仅支持8/16/32）
    UnsupportedBitDepth(u16),

    /// 分析输入为空序列
    EmptySequence,

    /// 峰值为0（静音输入），无法归一化
    ZeroPeak,

    /// 文件I/O错误（工具层）
    IoError(io::Error),
}

impl WavError {
    /// 构造块标签不匹配错误（统一处理字节转义）
    pub fn literal_mismatch(expected: &[u8], actual: &[u8], offset: usize) -> Self {
        WavError::LiteralMismatch {
            expected: escape_bytes(expected),
            actual: escape_bytes(actual),
            offset,
        }
    }
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavError::TruncatedInput {
                offset,
                needed,
                remaining,
            } => write!(
                f,
                "输入被截断: 偏移{offset}处需要{needed}字节，仅剩{remaining}字节"
            ),
            WavError::LiteralMismatch {
                expected,
                actual,
                offset,
            } => write!(
                f,
                "块标签不匹配: 偏移{offset}处期望\"{expected}\"，实际\"{actual}\""
            ),
            WavError::SizeMismatch {
                declared,
                actual_len,
            } => write!(
                f,
                "文件大小不符: RIFF声明{declared}字节，文件实际{actual_len}字节（期望{}字节）",
                *declared as u64 + 8
            ),
            WavError::InconsistentFormat {
                field,
                expected,
                observed,
            } => write!(f, "格式字段不一致: {field}期望{expected}，实际{observed}"),
            WavError::UnsupportedBitDepth(bits) => {
                write!(f, "不支持的位深度: {bits}位（仅支持8/16/32位PCM）")
            }
            WavError::EmptySequence => write!(f, "分析输入为空样本序列"),
            WavError::ZeroPeak => write!(f, "峰值为0（静音输入），无法进行峰值归一化"),
            WavError::IoError(err) => write!(f, "文件I/O错误: {err}"),
        }
    }
}

impl std::error::Error for WavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WavError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for WavError {
    fn from(err: io::Error) -> Self {
        WavError::IoError(err)
    }
}

/// WAV处理操作的标准Result类型
pub type WavResult<T> = Result<T, WavError>;

/// 错误分类（用于退出码和批处理统计）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 文件I/O错误
    Io,
    /// 解析错误（结构/格式问题）
    Parse,
    /// 分析错误（退化的数值输入）
    Analysis,
}

impl ErrorCategory {
    /// 从具体错误映射到分类
    pub fn from_wav_error(error: &WavError) -> Self {
        match error {
            WavError::IoError(_) => ErrorCategory::Io,
            WavError::EmptySequence | WavError::ZeroPeak => ErrorCategory::Analysis,
            _ => ErrorCategory::Parse,
        }
    }

    /// 分类的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            ErrorCategory::Io => "文件I/O",
            ErrorCategory::Parse => "解析失败",
            ErrorCategory::Analysis => "分析失败",
        }
    }
}
