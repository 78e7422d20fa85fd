use serde::Serialize;
use std::fmt;

/// 用户身份键（大小写折叠后的 login）
///
/// 所有身份比较都必须经过这个类型，不在调用处手动转小写。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(login: &str) -> Self {
        Self(login.to_lowercase())
    }
}

/// 用户基础身份信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub login: String,
    pub avatar_url: String,
    pub profile_url: String,
}

impl UserIdentity {
    pub fn new(
        login: impl Into<String>,
        avatar_url: impl Into<String>,
        profile_url: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            avatar_url: avatar_url.into(),
            profile_url: profile_url.into(),
        }
    }

    /// 身份键
    pub fn key(&self) -> IdentityKey {
        IdentityKey::new(&self.login)
    }
}

/// 关系列表，按 API 分页顺序排列
pub type RelationshipSet = Vec<UserIdentity>;

/// 带详情的用户信息
///
/// 计数字段为 `None` 表示未获取到，与 0 不同。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub identity: UserIdentity,
    #[serde(rename = "followers", skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    #[serde(rename = "following", skip_serializing_if = "Option::is_none")]
    pub following_count: Option<u64>,
    #[serde(rename = "publicRepos", skip_serializing_if = "Option::is_none")]
    pub public_repo_count: Option<u64>,
    #[serde(rename = "publicGists", skip_serializing_if = "Option::is_none")]
    pub public_gist_count: Option<u64>,
}

impl UserProfile {
    /// 是否包含任何详情字段
    pub fn has_details(&self) -> bool {
        self.follower_count.is_some()
            || self.following_count.is_some()
            || self.public_repo_count.is_some()
            || self.public_gist_count.is_some()
    }

    pub fn login(&self) -> &str {
        &self.identity.login
    }
}

impl From<UserIdentity> for UserProfile {
    fn from(identity: UserIdentity) -> Self {
        Self {
            identity,
            follower_count: None,
            following_count: None,
            public_repo_count: None,
            public_gist_count: None,
        }
    }
}

/// 查询方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 关注了我，但我没有回关
    FollowedButNotFollowingBack,
    /// 我关注了，但对方没有回关
    FollowingButNotFollowedBack,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::FollowedButNotFollowingBack => write!(f, "关注我但我未回关"),
            Direction::FollowingButNotFollowedBack => write!(f, "我关注但未回关我"),
        }
    }
}
