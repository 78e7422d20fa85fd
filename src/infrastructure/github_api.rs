//! GitHub API 传输层 - 基础设施层
//!
//! 持有唯一的 HTTP 客户端，只暴露"发一次 GET 并分类结果"的能力

use crate::config::Config;
use crate::error::FetchError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// GitHub API 客户端
///
/// 职责：
/// - 持有连接池和默认请求头
/// - 按请求附加凭证
/// - 把响应分类为 成功 / 限流 / 硬错误
/// - 不认识分页，不认识关注关系
#[derive(Clone)]
pub struct GithubApi {
    client: Client,
    base_url: String,
}

impl GithubApi {
    /// 创建客户端
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("User-Agent 格式无效")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("创建 HTTP 客户端失败")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 发送 GET 请求并反序列化 JSON
    ///
    /// # 参数
    /// - `path`: 资源路径，如 `/users/octocat`
    /// - `query`: 查询参数
    /// - `credential`: 可选凭证，作为 Bearer 头发送
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        credential: Option<&str>,
    ) -> Result<T, FetchError> {
        self.get_json_with_quota(path, query, credential)
            .await
            .map(|(value, _)| value)
    }

    /// 同 `get_json`，额外返回成功响应上携带的配额信息
    pub async fn get_json_with_quota<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        credential: Option<&str>,
    ) -> Result<(T, Quota), FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(query);

        if let Some(token) = credential {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| FetchError::InvalidCredential)?;
            request = request.header(AUTHORIZATION, value);
        }

        debug!("GET {} {:?}", path, query);

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(path, e))?;

        if !status.is_success() {
            return Err(classify_failure(status, &headers, &body, path));
        }

        let value = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            resource: path.to_string(),
            source,
        })?;
        Ok((value, Quota::from_headers(&headers)))
    }
}

/// 响应头中的限流配额
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quota {
    pub remaining: Option<u64>,
    pub reset_at: Option<DateTime<Utc>>,
}

impl Quota {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining: parse_remaining(headers),
            reset_at: parse_reset(headers),
        }
    }

    /// 剩余配额明确为 0
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

/// 非成功响应的分类
///
/// 403/429 且剩余配额为 0，或任何 429，视为限流。
pub fn classify_failure(
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
    resource: &str,
) -> FetchError {
    let quota_exhausted = parse_remaining(headers) == Some(0);

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && quota_exhausted);

    if rate_limited {
        return FetchError::RateLimited {
            reset_at: parse_reset(headers),
        };
    }

    if status == StatusCode::NOT_FOUND {
        return FetchError::NotFound {
            resource: resource.to_string(),
        };
    }

    FetchError::Status {
        status: status.as_u16(),
        message: extract_message(body),
    }
}

fn parse_remaining(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RATE_LIMIT_REMAINING)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn parse_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let secs: i64 = headers
        .get(RATE_LIMIT_RESET)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    DateTime::from_timestamp(secs, 0)
}

/// 优先取 JSON 中的 `message` 字段
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn transport_error(resource: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            resource: resource.to_string(),
        }
    } else {
        FetchError::Transport {
            resource: resource.to_string(),
            source: err,
        }
    }
}
