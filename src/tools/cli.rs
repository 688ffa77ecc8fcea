//! 命令行接口模块
//!
//! 负责命令行参数解析、配置管理和程序信息展示。

use clap::{Arg, Command};
use std::path::PathBuf;

/// 应用程序版本信息
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// 应用程序配置（简化版 - 遵循零配置优雅性原则）
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 输入文件路径（单文件模式）或扫描目录（批量模式）
    pub input_path: PathBuf,

    /// 是否显示详细信息
    pub verbose: bool,

    /// CSV报告输出路径（可选，批量模式时自动生成）
    pub csv_path: Option<PathBuf>,

    /// 是否额外输出JSON格式报告
    pub json: bool,

    /// 多文件并行度（None表示串行处理）
    pub parallel_files: Option<usize>,
}

impl AppConfig {
    /// 智能判断是否为批量模式（基于路径类型）
    #[inline]
    pub fn is_batch_mode(&self) -> bool {
        self.input_path.is_dir()
    }
}

/// 解析命令行参数并创建配置
pub fn parse_args() -> AppConfig {
    let matches = Command::new("wav-rms-meter")
        .version(VERSION)
        .about(DESCRIPTION)
        .author("WavMeter Team")
        .arg(
            Arg::new("INPUT")
                .help("WAV文件或目录路径（仅支持未压缩PCM WAV）。如果不指定，将扫描可执行文件所在目录")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("显示详细处理信息")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("输出CSV报告到文件（file_name,rms_db）")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("同时输出JSON格式报告")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("parallel-files")
                .long("parallel-files")
                .help("多文件并行处理的并发度（默认串行）")
                .value_name("N")
                .value_parser(clap::value_parser!(usize)),
        )
        .get_matches();

    // 确定输入路径（智能路径处理）
    let input_path = match matches.get_one::<String>("INPUT") {
        Some(input) => PathBuf::from(input),
        None => {
            // 双击启动模式：使用可执行文件所在目录
            let exe_path = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
            super::utils::get_parent_dir(&exe_path).to_path_buf()
        }
    };

    AppConfig {
        input_path,
        verbose: matches.get_flag("verbose"),
        csv_path: matches.get_one::<String>("csv").map(PathBuf::from),
        json: matches.get_flag("json"),
        parallel_files: matches.get_one::<usize>("parallel-files").copied(),
    }
}

/// 显示程序启动信息
pub fn show_startup_info(config: &AppConfig) {
    println!("🚀 WavMeter RMS Tool v{VERSION} 启动");
    println!("📝 {DESCRIPTION}");
    if config.verbose {
        println!("🔍 模式: {}", if config.is_batch_mode() { "批量目录扫描" } else { "单文件分析" });
    }
    println!();
}

/// 显示程序完成信息
pub fn show_completion_info(config: &AppConfig) {
    if config.verbose {
        println!("✅ 所有任务处理完成！");
    }
}
