//! # Follow Check
//!
//! 检查 GitHub 用户关注关系中"不对称"的部分：我关注了但没回关我的人，
//! 或者关注了我但我没回关的人，并为结果补全用户详情。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP 客户端，只暴露"GET 并分类响应"的能力
//! - `GithubApi` - 成功 / 限流 / 硬错误 三类结果
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 每个服务只做一件事
//! - `PagedFetcher` - 串行分页拉取关注 / 粉丝列表和单个用户详情
//! - `reconcile` - 大小写不敏感的有向差集
//! - `DetailEnricher` - 有上限的并发详情补全，单个失败不影响整批
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/request_orchestrator` - 单次检查的状态机和错误映射
//! - `orchestrator/app` - 按配置组装各层
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{CheckError, FetchError};
pub use infrastructure::GithubApi;
pub use models::{Direction, ResultEnvelope, UserIdentity, UserProfile};
pub use orchestrator::{App, CheckRequest, RelationshipChecker};
pub use services::{PagedFetcher, Relation, UserDirectory};
