use crate::error::CheckError;
use crate::models::user::UserProfile;
use serde::Serialize;

/// 部分详情获取失败时的提示
pub const PARTIAL_DATA_MESSAGE: &str = "部分用户详情获取失败（可能触发了频率限制），列表仍然完整";

/// 返回给界面的结果
///
/// 成功时 `users` 有值（可能带 `has_partial_data_error`）；失败时只有 `error`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserProfile>>,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub is_rate_limit_error: bool,
    pub has_partial_data_error: bool,
}

impl ResultEnvelope {
    pub fn success(users: Vec<UserProfile>, has_partial_data_error: bool) -> Self {
        Self {
            users: Some(users),
            error_message: has_partial_data_error.then(|| PARTIAL_DATA_MESSAGE.to_string()),
            is_rate_limit_error: false,
            has_partial_data_error,
        }
    }

    pub fn failure(err: &CheckError) -> Self {
        Self {
            users: None,
            error_message: Some(err.to_string()),
            is_rate_limit_error: err.is_rate_limited(),
            has_partial_data_error: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.users.is_some()
    }
}
