/// 日志工具模块
///
/// 提供日志初始化和批次日志输出的辅助函数
use crate::config::Config;
use crate::orchestrator::BatchStats;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing，`RUST_LOG` 未设置时默认 info
///
/// 重复调用是安全的（测试里会多次调用）
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Top-up 批量查询服务");
    info!("📊 每批数量: {}", config.batch_size);
    info!("⏱️ 批次间隔: {} ms", config.batch_delay_ms);
    info!("🌐 上游地址: {}", config.upstream_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录号码加载信息
///
/// # 参数
/// - `total`: 号码总数
/// - `batch_size`: 每批数量
pub fn log_numbers_loaded(total: usize, batch_size: usize) {
    info!("✓ 收到 {} 个待查询的号码", total);
    info!("📋 将以每批 {} 个的方式处理", batch_size);
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始号码编号
/// - `end`: 结束号码编号
/// - `total`: 号码总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("📦 开始处理第 {}/{} 批, 号码: {}-{} / 共 {} 个", batch_num, total_batches, start, end, total);
}

/// 记录批次完成信息
pub fn log_batch_complete(batch_num: usize, available: usize, failed: usize, total: usize) {
    info!(
        "✓ 第 {} 批完成: 可充值 {}/{}, 失败 {}",
        batch_num, available, total, failed
    );
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &BatchStats) {
    info!("{}", "=".repeat(60));
    info!(
        "📊 全部处理完成 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 可充值: {}/{}", stats.available, stats.total);
    info!("➖ 不可充值: {}", stats.unavailable);
    info!("❌ 失败: {}", stats.failed);
    info!("📦 批次: {}, 等待: {} 次", stats.batches, stats.pauses);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("911234567890", 4), "9112...");
        assert_eq!(truncate_text("abc", 10), "abc");
    }
}
