/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use crate::config::Config;
use crate::models::ResultEnvelope;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则默认 `info`，详细模式下为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息（不输出凭证内容）
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 关注关系检查");
    info!("🌐 API 地址: {}", config.api_base_url);
    info!(
        "📊 每页 {} 条，最多 {} 页，详情并发 {}",
        config.per_page, config.max_pages, config.max_concurrent_enrichment
    );
    info!(
        "🔑 默认凭证: {}",
        if config.token.is_some() { "已配置" } else { "未配置" }
    );
    info!("{}", "=".repeat(60));
}

/// 打印检查结果统计
pub fn log_check_summary(username: &str, envelope: &ResultEnvelope) {
    info!("\n{}", "─".repeat(60));
    match &envelope.users {
        Some(users) => {
            let detailed = users.iter().filter(|u| u.has_details()).count();
            info!("✅ {} 检查完成: {} 个用户", username, users.len());
            info!("📋 详情完整: {}/{}", detailed, users.len());
            if envelope.has_partial_data_error {
                warn!("⚠️ 部分用户详情缺失");
            }
        }
        None => {
            warn!(
                "❌ {} 检查失败: {}",
                username,
                envelope.error_message.as_deref().unwrap_or("未知错误")
            );
            if envelope.is_rate_limit_error {
                warn!("💡 请通过 --token 或 GITHUB_TOKEN 提供凭证后重试");
            }
        }
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
