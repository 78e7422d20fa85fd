//! 请求编排器 - 编排层
//!
//! ## 职责
//!
//! 对外唯一的入口，按顺序驱动一次检查：
//!
//! ```text
//! 开始 → 拉取关注关系 → 对比 → 补全详情 → 完成(成功 | 失败)
//! ```
//!
//! - 关系列表拉取失败一律是致命错误（缺任何一侧都无法得到正确结果）
//! - 详情补全失败一律是非致命错误（降级为基础信息）
//! - 所有意外错误只在这里被吞掉并转换为失败结果

use crate::error::CheckError;
use crate::models::{Direction, RelationshipSet, ResultEnvelope};
use crate::orchestrator::check_ctx::{CheckCtx, CheckStage};
use crate::services::{reconcile, DetailEnricher, Relation, UserDirectory};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const MAX_LOGIN_LEN: usize = 39;

/// 关注关系检查器
pub struct RelationshipChecker {
    directory: Arc<dyn UserDirectory>,
    enricher: DetailEnricher,
}

impl RelationshipChecker {
    pub fn new(directory: Arc<dyn UserDirectory>, max_concurrent_enrichment: usize) -> Self {
        let enricher = DetailEnricher::new(Arc::clone(&directory), max_concurrent_enrichment);
        Self {
            directory,
            enricher,
        }
    }

    /// 检查关注关系的不对称部分
    ///
    /// # 参数
    /// - `username`: 目标用户名
    /// - `credential`: 凭证，空字符串表示不使用
    /// - `direction`: 查询方向
    ///
    /// # 返回
    /// 总是返回结果信封，不返回错误
    pub async fn check_relationship_asymmetry(
        &self,
        username: &str,
        credential: &str,
        direction: Direction,
    ) -> ResultEnvelope {
        let ctx = CheckCtx::new(username, direction);
        let credential = Some(credential.trim()).filter(|c| !c.is_empty());

        let outcome = AssertUnwindSafe(self.run(&ctx, credential))
            .catch_unwind()
            .await;

        let envelope = match outcome {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(err)) => {
                warn!("{} ❌ 检查失败: {}", ctx, err);
                ResultEnvelope::failure(&err)
            }
            Err(panic) => {
                let err = CheckError::Unexpected(panic_message(panic.as_ref()));
                error!("{} ❌ 检查过程中发生异常: {}", ctx, err);
                ResultEnvelope::failure(&err)
            }
        };

        debug!("{} 阶段: {}", ctx, CheckStage::Done);
        envelope
    }

    async fn run(
        &self,
        ctx: &CheckCtx,
        credential: Option<&str>,
    ) -> Result<ResultEnvelope, CheckError> {
        debug!("{} 阶段: {}", ctx, CheckStage::Start);
        validate_username(&ctx.username)?;

        debug!("{} 阶段: {}", ctx, CheckStage::FetchingRelationships);
        let following = self
            .fetch_relationships(ctx, Relation::Following, credential)
            .await?;
        let followers = self
            .fetch_relationships(ctx, Relation::Followers, credential)
            .await?;
        info!(
            "{} ✓ 关注 {} 人，粉丝 {} 人",
            ctx,
            following.len(),
            followers.len()
        );

        debug!("{} 阶段: {}", ctx, CheckStage::Reconciling);
        let identities = reconcile(&following, &followers, ctx.direction.into());
        info!("{} ✓ 对比完成，找到 {} 个用户", ctx, identities.len());

        debug!("{} 阶段: {}", ctx, CheckStage::Enriching);
        let enrichment = self.enricher.enrich(identities, credential).await;

        Ok(ResultEnvelope::success(
            enrichment.users,
            enrichment.partial_failure,
        ))
    }

    async fn fetch_relationships(
        &self,
        ctx: &CheckCtx,
        relation: Relation,
        credential: Option<&str>,
    ) -> Result<RelationshipSet, CheckError> {
        self.directory
            .fetch_relationships(&ctx.username, relation, credential)
            .await
            .map_err(|e| {
                warn!("{} ⚠️ 拉取 {} 列表失败: {}", ctx, relation, e);
                CheckError::from_relationship_fetch(&ctx.username, e)
            })
    }
}

/// 校验用户名：非空，最多 39 位，只含 ASCII 字母数字和连字符
///
/// 连字符的位置不做限制，老账号可能以连字符结尾或含连续连字符，
/// 用户是否存在交给 API 的 404 判断。
fn validate_username(username: &str) -> Result<(), CheckError> {
    if username.is_empty() {
        return Err(CheckError::InvalidInput("请输入 GitHub 用户名".to_string()));
    }

    let allowed = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if username.len() > MAX_LOGIN_LEN || !allowed {
        return Err(CheckError::InvalidInput(format!(
            "无效的 GitHub 用户名: {}",
            username
        )));
    }

    Ok(())
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "未知异常".to_string()
    }
}
