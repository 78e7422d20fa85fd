//! 单次检查的上下文
//!
//! 封装"正在检查哪个用户、哪个方向"这一信息，用于日志前缀

use crate::models::Direction;
use std::fmt::Display;

/// 检查阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStage {
    Start,
    FetchingRelationships,
    Reconciling,
    Enriching,
    Done,
}

impl Display for CheckStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CheckStage::Start => "开始",
            CheckStage::FetchingRelationships => "拉取关注关系",
            CheckStage::Reconciling => "对比",
            CheckStage::Enriching => "补全详情",
            CheckStage::Done => "完成",
        };
        f.write_str(name)
    }
}

/// 检查上下文
#[derive(Debug, Clone)]
pub struct CheckCtx {
    /// 去除首尾空白后的用户名
    pub username: String,
    pub direction: Direction,
}

impl CheckCtx {
    pub fn new(username: &str, direction: Direction) -> Self {
        Self {
            username: username.trim().to_string(),
            direction,
        }
    }
}

impl Display for CheckCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[检查 {} | {}]", self.username, self.direction)
    }
}
