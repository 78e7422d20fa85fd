//! 分页拉取服务 - 业务能力层
//!
//! 只负责"把一个资源完整拉下来"，不关心对比和补全

use crate::config::Config;
use crate::error::FetchError;
use crate::infrastructure::GithubApi;
use crate::models::{ApiProfile, ApiUser, RelationshipSet, UserProfile};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, warn};

/// 关注关系类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// 该用户关注的人
    Following,
    /// 关注该用户的人
    Followers,
}

impl Relation {
    fn segment(self) -> &'static str {
        match self {
            Relation::Following => "following",
            Relation::Followers => "followers",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// 用户目录：编排层依赖的拉取能力
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// 拉取完整的关注 / 粉丝列表
    async fn fetch_relationships(
        &self,
        login: &str,
        relation: Relation,
        credential: Option<&str>,
    ) -> Result<RelationshipSet, FetchError>;

    /// 拉取单个用户的详情
    async fn fetch_profile(
        &self,
        login: &str,
        credential: Option<&str>,
    ) -> Result<UserProfile, FetchError>;
}

/// 分页拉取服务
///
/// 页与页之间严格串行：是否继续取决于上一页是否取满，
/// 且限流必须在发出下一页之前被发现（上一页响应头显示配额为 0 时直接返回限流）。
pub struct PagedFetcher {
    api: GithubApi,
    per_page: usize,
    max_pages: usize,
}

impl PagedFetcher {
    pub fn new(api: GithubApi, config: &Config) -> Self {
        Self {
            api,
            per_page: config.per_page,
            max_pages: config.max_pages,
        }
    }

    /// 拉取全部分页，遇到不满一页（含空页）即停止
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Option<&str>,
    ) -> Result<Vec<T>, FetchError> {
        let mut items = Vec::new();

        for page in 1..=self.max_pages {
            let query = [
                ("page", page.to_string()),
                ("per_page", self.per_page.to_string()),
            ];
            let (batch, quota): (Vec<T>, _) = self
                .api
                .get_json_with_quota(path, &query, credential)
                .await?;
            let count = batch.len();
            items.extend(batch);

            debug!("{} 第 {} 页: {} 条，累计 {} 条", path, page, count, items.len());

            if count < self.per_page {
                return Ok(items);
            }

            // 还需要下一页但配额已耗尽，下一次请求注定被限流
            if quota.is_exhausted() && page < self.max_pages {
                warn!("⚠️ {} 第 {} 页后配额已耗尽，停止分页", path, page);
                return Err(FetchError::RateLimited {
                    reset_at: quota.reset_at,
                });
            }
        }

        warn!(
            "⚠️ {} 已达到最大页数 {}，停止分页 (已获取 {} 条)",
            path,
            self.max_pages,
            items.len()
        );
        Ok(items)
    }

    /// 拉取单个资源
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Option<&str>,
    ) -> Result<T, FetchError> {
        self.api.get_json(path, &[], credential).await
    }
}

#[async_trait]
impl UserDirectory for PagedFetcher {
    async fn fetch_relationships(
        &self,
        login: &str,
        relation: Relation,
        credential: Option<&str>,
    ) -> Result<RelationshipSet, FetchError> {
        let path = format!("/users/{}/{}", login, relation.segment());
        let users: Vec<ApiUser> = self.fetch_all(&path, credential).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    async fn fetch_profile(
        &self,
        login: &str,
        credential: Option<&str>,
    ) -> Result<UserProfile, FetchError> {
        let path = format!("/users/{}", login);
        let profile: ApiProfile = self.fetch_one(&path, credential).await?;
        Ok(profile.into())
    }
}
