//! 多文件并行处理模块
//!
//! 使用rayon实现文件级并行处理，保证输出顺序一致性。
//! 核心解析/分析本身是单线程的纯函数，每个文件独立重入，
//! 并行度完全由本模块控制。

use super::cli::AppConfig;
use super::processor::{FileReport, process_single_wav_file};
use crate::error::{WavError, WavResult};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 批量处理中单个文件的结果（保持输入顺序）
#[derive(Debug)]
pub struct BatchFileResult {
    /// 文件路径
    pub file_path: PathBuf,

    /// 处理结果
    pub result: WavResult<FileReport>,
}

/// 串行批量处理
pub fn process_batch_serial(wav_files: &[PathBuf], config: &AppConfig) -> Vec<BatchFileResult> {
    wav_files
        .iter()
        .map(|file_path| BatchFileResult {
            file_path: file_path.clone(),
            result: process_single_wav_file(file_path, config),
        })
        .collect()
}

/// 多文件并行处理
///
/// 核心特性：
/// - 使用rayon线程池精确控制并发度
/// - 线程安全的统计信息收集
/// - 索引排序保证输出顺序与输入一致
pub fn process_batch_parallel(
    wav_files: &[PathBuf],
    config: &AppConfig,
    parallel_degree: usize,
) -> WavResult<Vec<BatchFileResult>> {
    println!("⚡ 启用多文件并行处理：{parallel_degree} 并发度");

    let processed_count = AtomicUsize::new(0);
    let failed_count = AtomicUsize::new(0);

    // 自定义rayon线程池（精确控制并发度）
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel_degree)
        .thread_name(|i| format!("rms-worker-{i}"))
        .build()
        .map_err(|e| {
            WavError::IoError(std::io::Error::other(format!("线程池创建失败: {e}")))
        })?;

    // 并行处理并收集结果（保留索引用于排序）
    let mut results: Vec<(usize, BatchFileResult)> = pool.install(|| {
        wav_files
            .par_iter()
            .enumerate()
            .map(|(index, file_path)| {
                // 静默处理单个文件（避免输出混乱）
                let silent_config = AppConfig {
                    verbose: false,
                    ..config.clone()
                };

                // 简短进度提示
                if !config.verbose {
                    print!(".");
                    use std::io::Write;
                    std::io::stdout().flush().ok();
                }

                let result = process_single_wav_file(file_path, &silent_config);

                match &result {
                    Ok(_) => processed_count.fetch_add(1, Ordering::Relaxed),
                    Err(_) => failed_count.fetch_add(1, Ordering::Relaxed),
                };

                (
                    index,
                    BatchFileResult {
                        file_path: file_path.clone(),
                        result,
                    },
                )
            })
            .collect()
    });

    if !config.verbose {
        println!();
    }

    // 按原始索引排序，保证输出顺序与扫描顺序一致
    results.sort_by_key(|(index, _)| *index);

    println!(
        "⚡ 并行处理完成: 成功 {} / 失败 {}",
        processed_count.load(Ordering::Relaxed),
        failed_count.load(Ordering::Relaxed)
    );

    Ok(results.into_iter().map(|(_, result)| result).collect())
}
