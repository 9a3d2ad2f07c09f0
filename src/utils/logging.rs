/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；否则默认 info，详细模式下为 debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("📋 Controle de Presença - 程序启动");
    info!("📷 点名表图片: {}", config.image_path);
    info!("📝 标记文件: {}", config.marks_file);
    info!("{}", "=".repeat(60));
}

/// 记录标记文件的使用情况
///
/// # 参数
/// - `path`: 标记文件路径
/// - `marks_written`: 是否刚刚写出了标记文件
pub fn log_marks_source(path: &str, marks_written: bool) {
    if marks_written {
        info!("📝 已写出标记文件: {}", path);
        info!("💡 修改模板后重新运行即可得到最终报告\n");
    } else {
        info!("✓ 已应用标记文件: {}", path);
    }
}

/// 打印报告生成完成信息
pub fn print_report_saved(report_file: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📄 Relatório gerado");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("报告已保存至: {}", report_file);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本（换行替换为 ⏎）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let single_line = text.replace('\n', "⏎");
    if single_line.chars().count() > max_len {
        single_line.chars().take(max_len).collect::<String>() + "..."
    } else {
        single_line
    }
}
