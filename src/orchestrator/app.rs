//! 应用外壳 - 编排层
//!
//! 根据配置组装各层，执行一次检查并输出统计

use crate::config::Config;
use crate::infrastructure::GithubApi;
use crate::models::{Direction, ResultEnvelope};
use crate::orchestrator::request_orchestrator::RelationshipChecker;
use crate::services::PagedFetcher;
use crate::utils::logging::{log_check_summary, log_startup};
use anyhow::Result;
use std::sync::Arc;

/// 一次检查请求
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub username: String,
    /// 命令行提供的凭证，优先于配置中的默认凭证
    pub token: Option<String>,
    pub direction: Direction,
}

/// 应用主结构
pub struct App {
    config: Config,
    checker: RelationshipChecker,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let api = GithubApi::new(&config)?;
        let fetcher = PagedFetcher::new(api, &config);
        let checker = RelationshipChecker::new(Arc::new(fetcher), config.max_concurrent_enrichment);

        Ok(Self { config, checker })
    }

    /// 执行一次检查
    pub async fn run(&self, request: &CheckRequest) -> ResultEnvelope {
        let credential = request
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.config.token.as_deref())
            .unwrap_or_default();

        let envelope = self
            .checker
            .check_relationship_asymmetry(&request.username, credential, request.direction)
            .await;

        log_check_summary(request.username.trim(), &envelope);

        envelope
    }
}
