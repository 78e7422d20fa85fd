//! 关系对比 - 业务能力层
//!
//! 纯函数：不做 I/O，结果只取决于输入

use crate::models::{Direction, IdentityKey, UserIdentity};
use std::collections::HashSet;

/// 差集方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetDifference {
    /// A 中有、B 中没有
    AMinusB,
    /// B 中有、A 中没有
    BMinusA,
}

impl SetDifference {
    pub fn opposite(self) -> Self {
        match self {
            SetDifference::AMinusB => SetDifference::BMinusA,
            SetDifference::BMinusA => SetDifference::AMinusB,
        }
    }
}

/// A 为关注列表，B 为粉丝列表
impl From<Direction> for SetDifference {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::FollowingButNotFollowedBack => SetDifference::AMinusB,
            Direction::FollowedButNotFollowingBack => SetDifference::BMinusA,
        }
    }
}

/// 计算有向差集
///
/// 先用被减一侧建立身份键集合，再按原顺序过滤另一侧。
pub fn reconcile(
    set_a: &[UserIdentity],
    set_b: &[UserIdentity],
    direction: SetDifference,
) -> Vec<UserIdentity> {
    let (source, subtracted) = match direction {
        SetDifference::AMinusB => (set_a, set_b),
        SetDifference::BMinusA => (set_b, set_a),
    };

    let excluded: HashSet<IdentityKey> = subtracted.iter().map(UserIdentity::key).collect();

    source
        .iter()
        .filter(|user| !excluded.contains(&user.key()))
        .cloned()
        .collect()
}
