use chrono::{DateTime, Local, Utc};
use thiserror::Error;

/// 单次拉取的失败分类
///
/// `RateLimited` 之外的所有变体都属于硬错误：不重试，由调用方决定如何处理。
#[derive(Debug, Error)]
pub enum FetchError {
    /// 配额耗尽
    #[error("GitHub API 请求配额已耗尽{}", format_reset(.reset_at))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    /// 资源不存在 (404)
    #[error("资源不存在: {resource}")]
    NotFound { resource: String },

    /// 其他非成功状态码
    #[error("GitHub API 返回错误 ({status}): {message}")]
    Status { status: u16, message: String },

    /// 超过单次请求时限
    #[error("请求超时: {resource}")]
    Timeout { resource: String },

    /// 网络层失败
    #[error("网络请求失败 ({resource}): {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    /// JSON 解析失败
    #[error("响应解析失败 ({resource}): {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// 凭证无法作为请求头发送
    #[error("凭证格式无效")]
    InvalidCredential,
}

impl FetchError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }
}

/// 对外的错误分类
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// 用户输入不合法
    #[error("{0}")]
    InvalidInput(String),

    /// 目标用户不存在
    #[error("用户 {username} 不存在")]
    UserNotFound { username: String },

    /// 拉取关系列表时配额耗尽
    #[error("GitHub API 请求配额已耗尽，请提供 Token 后重试{}", format_reset(.reset_at))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    /// 远端返回的其他错误
    #[error("{0}")]
    Upstream(String),

    /// 未预期的内部错误
    #[error("发生未知错误: {0}")]
    Unexpected(String),
}

impl CheckError {
    /// 关系列表拉取失败时的转换，404 单独映射为用户不存在
    pub fn from_relationship_fetch(username: &str, err: FetchError) -> Self {
        match err {
            FetchError::RateLimited { reset_at } => CheckError::RateLimited { reset_at },
            FetchError::NotFound { .. } => CheckError::UserNotFound {
                username: username.to_string(),
            },
            other => CheckError::Upstream(other.to_string()),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CheckError::RateLimited { .. })
    }
}

fn format_reset(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!(
            " (配额将于 {} 重置)",
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => String::new(),
    }
}
