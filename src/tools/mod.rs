//! 工具模块集合
//!
//! 包含CLI、文件扫描、文件处理、格式化等工具模块，支持main.rs的流程控制。

pub mod cli;
pub mod formatter;
pub mod parallel_processor;
pub mod processor;
pub mod scanner;
pub mod utils;

// 重新导出主要的公共接口
pub use cli::{AppConfig, parse_args, show_completion_info, show_startup_info};
pub use formatter::{
    create_csv_report, create_json_report, create_report_header, create_summary_table,
    format_file_report, write_output,
};
pub use parallel_processor::{BatchFileResult, process_batch_parallel, process_batch_serial};
pub use processor::{FileReport, process_single_wav_file, process_wav_file};
pub use scanner::{
    generate_csv_output_path, scan_wav_files, show_batch_completion_info, show_scan_results,
};
