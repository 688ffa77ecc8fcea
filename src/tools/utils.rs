//! 工具函数模块
//!
//! 提供文件路径处理、时长格式化等通用工具函数。

/// 文件路径处理工具函数
pub mod path {
    use std::path::Path;

    /// 提取文件名（统一处理路径提取逻辑）
    #[inline]
    pub fn extract_filename(path: &Path) -> &str {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
    }

    /// 提取文件名（返回String，用于日志显示）
    #[inline]
    pub fn extract_filename_lossy(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// 获取父目录，如果不存在则返回当前目录
    #[inline]
    pub fn get_parent_dir(path: &Path) -> &Path {
        path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// 显示格式化工具函数
pub mod display {
    /// 秒数格式化为 mm:ss
    #[inline]
    pub fn format_duration(seconds: f64) -> String {
        let total = seconds.round() as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
}

// 重新导出为平级函数，保持调用点简洁
pub use display::format_duration;
pub use path::{extract_filename, extract_filename_lossy, get_parent_dir};
