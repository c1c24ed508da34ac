//! 线性探测 - 偏移 f(i) = 系数 * i + 常数

use crate::hash::calculate_slot;

/// 线性探测参数
///
/// 默认系数为1、常数为0，即依次探测 `hash, hash+1, hash+2, ...`。
/// 系数与容量互素时序列是全部槽位的一个排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinearProbe {
    pub coefficient: u64,
    pub constant: u64,
}

impl Default for LinearProbe {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl LinearProbe {
    /// 创建线性探测参数
    pub const fn new(coefficient: u64, constant: u64) -> Self {
        Self { coefficient, constant }
    }

    /// 第 `attempt` 次探测的偏移（已对 `size` 取模）
    pub fn offset(&self, attempt: usize, size: usize) -> u128 {
        let size = size as u128;
        let coefficient = self.coefficient as u128 % size;
        let attempt = attempt as u128 % size;
        (coefficient * attempt % size + self.constant as u128 % size) % size
    }

    /// 计算第 `attempt` 次探测的槽位索引
    pub fn probe_index(&self, hash: u64, attempt: usize, size: usize) -> usize {
        calculate_slot(hash, self.offset(attempt, size), size)
    }
}
