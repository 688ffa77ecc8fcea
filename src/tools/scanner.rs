//! 文件扫描模块
//!
//! 负责递归扫描目录中的WAV文件，为批量处理提供确定性的文件列表。

use super::cli::AppConfig;
use super::utils;
use crate::error::{WavError, WavResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 支持的音频格式扩展名（本工具仅处理未压缩PCM WAV）
const SUPPORTED_EXTENSIONS: &[&str] = &["wav"];

/// 递归扫描目录中的WAV文件
///
/// 返回按路径排序的文件列表，保证批量输出顺序确定。
pub fn scan_wav_files(dir_path: &Path) -> WavResult<Vec<PathBuf>> {
    if !dir_path.exists() {
        return Err(WavError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("目录不存在: {}", dir_path.display()),
        )));
    }

    if !dir_path.is_dir() {
        return Err(WavError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("路径不是目录: {}", dir_path.display()),
        )));
    }

    let mut wav_files = Vec::new();
    for entry in WalkDir::new(dir_path).follow_links(false) {
        let entry = entry.map_err(|e| {
            WavError::IoError(std::io::Error::other(format!("目录遍历失败: {e}")))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Some(extension) = path.extension()
            && let Some(ext_str) = extension.to_str()
        {
            let ext_lower = ext_str.to_lowercase();
            if SUPPORTED_EXTENSIONS.contains(&ext_lower.as_str()) {
                wav_files.push(path.to_path_buf());
            }
        }
    }

    // 按路径排序，保证输出顺序确定
    wav_files.sort();

    Ok(wav_files)
}

/// 显示文件扫描结果
pub fn show_scan_results(config: &AppConfig, wav_files: &[PathBuf]) {
    if wav_files.is_empty() {
        println!(
            "⚠️  在目录 {} 中没有找到WAV文件",
            config.input_path.display()
        );
        println!("   支持的格式: 未压缩PCM WAV (8/16/32位)");
        return;
    }

    println!("📁 扫描目录: {}", config.input_path.display());
    println!("🎵 找到 {} 个WAV文件", wav_files.len());

    if config.verbose {
        for (i, file) in wav_files.iter().enumerate() {
            println!("   {}. {}", i + 1, utils::extract_filename_lossy(file));
        }
    }
    println!();
}

/// 生成批量CSV输出文件路径
pub fn generate_csv_output_path(config: &AppConfig) -> PathBuf {
    config.csv_path.clone().unwrap_or_else(|| {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        config
            .input_path
            .join(format!("WavMeter_RMS_Report_{timestamp}.csv"))
    })
}

/// 显示批量处理完成信息
pub fn show_batch_completion_info(
    csv_path: &Path,
    processed_count: usize,
    total_count: usize,
    failed_count: usize,
) {
    println!();
    println!("📊 批量处理完成!");
    println!("   成功处理: {processed_count} / {total_count} 个文件");
    if failed_count > 0 {
        println!("   失败文件: {failed_count} 个");
    }
    println!();
    println!("📄 CSV报告: {}", csv_path.display());
}
