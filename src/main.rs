//! WavMeter RMS Tool - 主程序入口
//!
//! 纯流程控制器，负责协调各个工具模块完成WAV响度分析任务。

use std::process;
use wavmeter_rms_tool::error::{ErrorCategory, WavError, WavResult};
use wavmeter_rms_tool::tools::{self, AppConfig};

/// 错误退出码定义
mod exit_codes {
    /// 文件I/O错误
    pub const IO_ERROR: i32 = 2;
    /// 解析失败
    pub const PARSE_ERROR: i32 = 3;
    /// 分析失败
    pub const ANALYSIS_ERROR: i32 = 4;
}

/// 获取错误建议文本
fn get_error_suggestion(error: &WavError) -> &'static str {
    match ErrorCategory::from_wav_error(error) {
        ErrorCategory::Io => {
            "检查文件路径是否正确，文件是否存在且可读 / Check if file path is correct, file exists and is readable"
        }
        ErrorCategory::Parse => {
            "确保输入文件为未压缩PCM WAV（8/16/32位），且文件未被截断 / Ensure input is uncompressed PCM WAV (8/16/32 bit) and not truncated"
        }
        ErrorCategory::Analysis => {
            "音频数据为空或全零（静音），无法计算响度 / Audio data is empty or all-zero (silent), loudness cannot be computed"
        }
    }
}

/// 按错误分类映射退出码
fn exit_code_for(error: &WavError) -> i32 {
    match ErrorCategory::from_wav_error(error) {
        ErrorCategory::Io => exit_codes::IO_ERROR,
        ErrorCategory::Parse => exit_codes::PARSE_ERROR,
        ErrorCategory::Analysis => exit_codes::ANALYSIS_ERROR,
    }
}

/// 单文件模式
fn run_single_file(config: &AppConfig) -> WavResult<()> {
    let report = tools::process_single_wav_file(&config.input_path, config)?;

    print!("{}", tools::create_report_header(&config.input_path));
    print!("{}", tools::format_file_report(&report));

    // 单文件模式同样支持CSV/JSON报告输出
    let results = vec![tools::BatchFileResult {
        file_path: config.input_path.clone(),
        result: Ok(report),
    }];
    if let Some(csv_path) = &config.csv_path {
        tools::write_output(csv_path, &tools::create_csv_report(&results))?;
        println!("\n📄 CSV报告: {}", csv_path.display());
    }
    if config.json {
        let json_path = config.input_path.with_extension("rms.json");
        tools::write_output(&json_path, &tools::create_json_report(&results))?;
        println!("📄 JSON报告: {}", json_path.display());
    }

    Ok(())
}

/// 批量目录模式
fn run_batch(config: &AppConfig) -> WavResult<()> {
    let wav_files = tools::scan_wav_files(&config.input_path)?;
    tools::show_scan_results(config, &wav_files);
    if wav_files.is_empty() {
        return Ok(());
    }

    let results = match config.parallel_files {
        Some(degree) if degree > 1 => {
            tools::process_batch_parallel(&wav_files, config, degree)?
        }
        _ => tools::process_batch_serial(&wav_files, config),
    };

    // 汇总表格
    println!("{}", tools::create_summary_table(&results));

    // 失败明细（不降级为警告值，单独列出）
    let failed: Vec<_> = results
        .iter()
        .filter_map(|entry| entry.result.as_ref().err().map(|e| (&entry.file_path, e)))
        .collect();
    for (path, error) in &failed {
        eprintln!("❌ {}: {error}", path.display());
    }

    let processed_count = results.len() - failed.len();

    // CSV报告
    let csv_path = tools::generate_csv_output_path(config);
    tools::write_output(&csv_path, &tools::create_csv_report(&results))?;

    // 可选JSON报告
    if config.json {
        let json_path = csv_path.with_extension("json");
        tools::write_output(&json_path, &tools::create_json_report(&results))?;
        println!("📄 JSON报告: {}", json_path.display());
    }

    tools::show_batch_completion_info(&csv_path, processed_count, results.len(), failed.len());

    Ok(())
}

fn main() {
    let config = tools::parse_args();
    tools::show_startup_info(&config);

    let result = if config.is_batch_mode() {
        run_batch(&config)
    } else {
        run_single_file(&config)
    };

    match result {
        Ok(()) => tools::show_completion_info(&config),
        Err(error) => {
            eprintln!("❌ 处理失败 / Processing failed: {error}");
            eprintln!("💡 {}", get_error_suggestion(&error));
            process::exit(exit_code_for(&error));
        }
    }
}
