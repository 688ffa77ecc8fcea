//! 输出格式化模块
//!
//! 负责RMS分析结果的格式化输出：单文件文本报告、批量汇总表格、
//! CSV报告（file_name,rms_db）和可选的JSON报告。

use super::parallel_processor::BatchFileResult;
use super::processor::FileReport;
use super::utils;
use crate::error::{ErrorCategory, WavResult};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};
use std::path::Path;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 创建报告头部信息
pub fn create_report_header(input_path: &Path) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "WavMeter RMS Tool v{VERSION} / WAV Loudness (RMS) Meter\n"
    ));
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    output.push_str(&format!("log date: {now}\n\n"));

    output.push_str(
        "--------------------------------------------------------------------------------\n",
    );
    let file_name = utils::extract_filename(input_path);
    output.push_str(&format!("Statistics for: {file_name}\n"));
    output.push_str(
        "--------------------------------------------------------------------------------\n\n",
    );

    output
}

/// 格式化单文件RMS结果
pub fn format_file_report(report: &FileReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("RMS loudness:    {:.2} dB\n", report.rms_db));
    output.push_str(&format!("Peak value:      {:.0}\n", report.peak));
    output.push_str(&format!(
        "Format:          {} Hz / {} ch / {} bit\n",
        report.sample_rate, report.channels, report.bits_per_sample
    ));
    output.push_str(&format!(
        "Duration:        {} ({} samples)\n",
        utils::format_duration(report.duration_seconds),
        report.sample_count
    ));

    output
}

/// 创建批量汇总表格
pub fn create_summary_table(results: &[BatchFileResult]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "File / 文件名",
        "RMS (dB)",
        "Rate / 采样率",
        "Ch / 声道",
        "Bits / 位深",
        "Length / 时长",
    ]);

    for entry in results {
        match &entry.result {
            Ok(report) => {
                table.add_row(vec![
                    Cell::new(&report.file_name),
                    Cell::new(format!("{:.2}", report.rms_db)).set_alignment(CellAlignment::Right),
                    Cell::new(report.sample_rate).set_alignment(CellAlignment::Right),
                    Cell::new(report.channels).set_alignment(CellAlignment::Right),
                    Cell::new(report.bits_per_sample).set_alignment(CellAlignment::Right),
                    Cell::new(utils::format_duration(report.duration_seconds))
                        .set_alignment(CellAlignment::Right),
                ]);
            }
            Err(error) => {
                let category = ErrorCategory::from_wav_error(error);
                table.add_row(vec![
                    Cell::new(utils::extract_filename_lossy(&entry.file_path)),
                    Cell::new(format!("({})", category.display_name())),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                ]);
            }
        }
    }

    table
}

/// 生成CSV报告内容
///
/// 形状固定为 file_name,rms_db —— 报告协作方约定的消费格式。
/// 失败的文件不写入CSV（错误单独汇报，不降级为警告值）。
pub fn create_csv_report(results: &[BatchFileResult]) -> String {
    let mut csv = String::from("file_name,rms_db\n");
    for entry in results {
        if let Ok(report) = &entry.result {
            // 文件名含逗号/引号时按RFC 4180转义
            let name = if report.file_name.contains([',', '"', '\n']) {
                format!("\"{}\"", report.file_name.replace('"', "\"\""))
            } else {
                report.file_name.clone()
            };
            csv.push_str(&format!("{},{:.6}\n", name, report.rms_db));
        }
    }
    csv
}

/// 生成JSON报告内容（机器可读）
pub fn create_json_report(results: &[BatchFileResult]) -> String {
    let reports: Vec<&FileReport> = results
        .iter()
        .filter_map(|entry| entry.result.as_ref().ok())
        .collect();
    serde_json::to_string_pretty(&reports).unwrap_or_default()
}

/// 写入输出文件
pub fn write_output(path: &Path, content: &str) -> WavResult<()> {
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_report(name: &str, rms_db: f64) -> FileReport {
        FileReport {
            file_name: name.to_string(),
            path: PathBuf::from(name),
            rms_db,
            peak: 127.0,
            sample_rate: 8000,
            channels: 1,
            bits_per_sample: 8,
            sample_count: 4,
            duration_seconds: 0.0005,
        }
    }

    #[test]
    fn test_csv_report_shape() {
        let results = vec![
            BatchFileResult {
                file_path: PathBuf::from("a.wav"),
                result: Ok(sample_report("a.wav", -6.0206)),
            },
            BatchFileResult {
                file_path: PathBuf::from("bad.wav"),
                result: Err(crate::error::WavError::EmptySequence),
            },
        ];

        let csv = create_csv_report(&results);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "file_name,rms_db");
        assert_eq!(lines[1], "a.wav,-6.020600");
        // 失败的文件不出现在CSV中
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_csv_escapes_special_filenames() {
        let results = vec![BatchFileResult {
            file_path: PathBuf::from("a,b.wav"),
            result: Ok(sample_report("a,b.wav", 0.0)),
        }];
        let csv = create_csv_report(&results);
        assert!(csv.contains("\"a,b.wav\",0.000000"));
    }

    #[test]
    fn test_json_report_roundtrip() {
        let results = vec![BatchFileResult {
            file_path: PathBuf::from("a.wav"),
            result: Ok(sample_report("a.wav", -3.0)),
        }];
        let json = create_json_report(&results);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["file_name"], "a.wav");
        assert_eq!(parsed[0]["rms_db"], -3.0);
    }
}
