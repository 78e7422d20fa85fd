//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `request_orchestrator` - 请求编排器
//! - 单次检查的状态机：拉取关系 → 对比 → 补全详情
//! - 把内部失败分类映射为对外的错误信封
//! - 唯一允许吞掉意外错误的地方
//!
//! ### `app` - 应用外壳
//! - 根据配置组装传输层、拉取服务和编排器
//! - 合并命令行凭证与配置中的默认凭证
//! - 输出启动信息和结果统计
//!
//! ## 层次关系
//!
//! ```text
//! app (持有配置和检查器)
//!     ↓
//! request_orchestrator (处理单次检查)
//!     ↓
//! services (能力层：分页拉取 / 对比 / 详情补全)
//!     ↓
//! infrastructure (基础设施：GithubApi)
//! ```

pub mod app;
pub mod check_ctx;
pub mod request_orchestrator;

pub use app::{App, CheckRequest};
pub use check_ctx::{CheckCtx, CheckStage};
pub use request_orchestrator::RelationshipChecker;
