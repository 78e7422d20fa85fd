//! 详情补全服务 - 业务能力层
//!
//! 为对比结果中的每个用户拉取详情。单个用户失败不影响整批。

use crate::models::{UserIdentity, UserProfile};
use crate::services::paged_fetcher::UserDirectory;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// 补全结果
#[derive(Debug)]
pub struct Enrichment {
    /// 与输入顺序一致
    pub users: Vec<UserProfile>,
    /// 是否有用户详情获取失败
    pub partial_failure: bool,
    /// 失败数量
    pub failed: usize,
}

/// 详情补全服务
///
/// 职责：
/// - 用 Semaphore 限制同时进行的详情请求数
/// - 每个任务只写自己的结果槽位，最后按下标还原顺序
/// - 失败的用户保留基础身份信息，并标记部分失败
pub struct DetailEnricher {
    directory: Arc<dyn UserDirectory>,
    max_concurrent: usize,
}

impl DetailEnricher {
    pub fn new(directory: Arc<dyn UserDirectory>, max_concurrent: usize) -> Self {
        Self {
            directory,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// 补全所有用户的详情
    ///
    /// 所有用户都尝试过后才返回；future 被丢弃时，未完成的请求随 JoinSet 一起取消。
    pub async fn enrich(
        &self,
        identities: Vec<UserIdentity>,
        credential: Option<&str>,
    ) -> Enrichment {
        let total = identities.len();
        if total == 0 {
            return Enrichment {
                users: Vec::new(),
                partial_failure: false,
                failed: 0,
            };
        }

        debug!("开始补全 {} 个用户的详情，并发上限 {}", total, self.max_concurrent);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let credential: Option<Arc<str>> = credential.map(Arc::from);
        let mut tasks = JoinSet::new();

        for (index, identity) in identities.iter().enumerate() {
            // 先拿到许可再 spawn，同时存在的任务数不超过上限
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };

            let directory = Arc::clone(&self.directory);
            let credential = credential.clone();
            let login = identity.login.clone();

            tasks.spawn(async move {
                let _permit = permit;
                let outcome = directory.fetch_profile(&login, credential.as_deref()).await;
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<UserProfile>> = vec![None; total];

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(profile))) => {
                    slots[index] = Some(merge_details(&identities[index], profile));
                }
                Ok((index, Err(e))) if e.is_rate_limited() => {
                    warn!("⚠️ 获取 {} 的详情时被限流", identities[index].login);
                }
                Ok((index, Err(e))) => {
                    warn!("⚠️ 获取 {} 的详情失败: {}", identities[index].login, e);
                }
                Err(e) => {
                    error!("详情任务执行失败: {}", e);
                }
            }
        }

        let failed = slots.iter().filter(|slot| slot.is_none()).count();
        let users: Vec<UserProfile> = identities
            .into_iter()
            .zip(slots)
            .map(|(identity, slot)| slot.unwrap_or_else(|| UserProfile::from(identity)))
            .collect();

        if failed > 0 {
            warn!("⚠️ 详情补全完成: 成功 {}/{}，{} 个用户只有基础信息", total - failed, total, failed);
        } else {
            info!("✓ 详情补全完成: {} 个用户", total);
        }

        Enrichment {
            users,
            partial_failure: failed > 0,
            failed,
        }
    }
}

/// 身份字段以对比结果为准，只合并详情计数
fn merge_details(identity: &UserIdentity, profile: UserProfile) -> UserProfile {
    UserProfile {
        identity: identity.clone(),
        ..profile
    }
}
