//! GitHub API 响应结构
//!
//! 只保留用到的字段，其余字段在反序列化时忽略

use crate::models::user::{UserIdentity, UserProfile};
use serde::Deserialize;

/// `/users/{login}/following` 与 `/users/{login}/followers` 列表中的单项
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

impl From<ApiUser> for UserIdentity {
    fn from(user: ApiUser) -> Self {
        UserIdentity::new(user.login, user.avatar_url, user.html_url)
    }
}

/// `/users/{login}` 返回的用户详情
#[derive(Debug, Clone, Deserialize)]
pub struct ApiProfile {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub public_repos: Option<u64>,
    pub public_gists: Option<u64>,
}

impl From<ApiProfile> for UserProfile {
    fn from(profile: ApiProfile) -> Self {
        UserProfile {
            identity: UserIdentity::new(profile.login, profile.avatar_url, profile.html_url),
            follower_count: profile.followers,
            following_count: profile.following,
            public_repo_count: profile.public_repos,
            public_gist_count: profile.public_gists,
        }
    }
}
