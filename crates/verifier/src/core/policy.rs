use serde::{Deserialize, Serialize};

/// 年龄策略: `context - birth_year >= min_age`
///
/// 年龄按年份差计算，不考虑月日。差值在 `i64` 边界处饱和。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgePolicy {
    pub min_age: u32,
}

impl AgePolicy {
    pub fn new(min_age: u32) -> Self {
        AgePolicy { min_age }
    }

    pub fn is_satisfied(&self, birth_year: i64, context: i64) -> bool {
        context.saturating_sub(birth_year) >= i64::from(self.min_age)
    }
}
