//! 文件处理模块
//!
//! 负责单个WAV文件的完整流水线：读取 → 解析 → 分析 → 报告。

use super::cli::AppConfig;
use super::utils;
use crate::analysis::AnalysisResult;
use crate::error::WavResult;
use crate::parser::{WavDocument, parse_wav};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 单个文件的分析报告
///
/// CSV/JSON报告协作方消费的数据形状：核心是 (file_name, rms_db) 对，
/// 其余字段用于表格展示。
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// 文件名（不含路径）
    pub file_name: String,

    /// 文件完整路径
    pub path: PathBuf,

    /// RMS响度 (dB，相对满刻度)
    pub rms_db: f64,

    /// 降混后信号峰值
    pub peak: f64,

    /// 采样率 (Hz)
    pub sample_rate: u32,

    /// 声道数
    pub channels: u16,

    /// 位深度
    pub bits_per_sample: u16,

    /// 单声道样本数
    pub sample_count: usize,

    /// 音频时长（秒）
    pub duration_seconds: f64,
}

impl FileReport {
    /// 从解析文档和分析结果组装报告
    pub fn new(path: &Path, doc: &WavDocument, analysis: &AnalysisResult) -> Self {
        Self {
            file_name: utils::extract_filename_lossy(path),
            path: path.to_path_buf(),
            rms_db: analysis.rms_db,
            peak: analysis.peak,
            sample_rate: doc.fmt.sample_rate,
            channels: doc.fmt.num_channels,
            bits_per_sample: doc.fmt.bits_per_sample,
            sample_count: doc.samples_per_channel(),
            duration_seconds: doc.duration_seconds(),
        }
    }
}

/// 处理单个WAV文件
///
/// 整个文件一次性读入内存后解析（不支持流式解析超内存文件）。
pub fn process_wav_file(path: &Path) -> WavResult<FileReport> {
    let bytes = std::fs::read(path)?;
    let doc = parse_wav(&bytes)?;
    let analysis = AnalysisResult::from_document(&doc)?;
    Ok(FileReport::new(path, &doc, &analysis))
}

/// 处理单个WAV文件并按配置显示详细信息
pub fn process_single_wav_file(file_path: &Path, config: &AppConfig) -> WavResult<FileReport> {
    if config.verbose {
        println!("加载WAV文件 / Loading WAV file: {}", file_path.display());
    }

    let report = process_wav_file(file_path)?;

    if config.verbose {
        println!("音频格式信息 / Audio format information:");
        println!("   采样率 / Sample rate:   {} Hz", report.sample_rate);
        println!("   声道数 / Channels:      {}", report.channels);
        println!("   位深度 / Bit depth:     {} bits", report.bits_per_sample);
        println!("   样本数 / Sample count:  {}", report.sample_count);
        println!(
            "   时长 / Duration:        {:.2} seconds",
            report.duration_seconds
        );
    }

    Ok(report)
}
