//! 二次探测 - 偏移 f(i) = 系数 * i² + 常数

use crate::hash::calculate_slot;

/// 二次探测参数
///
/// 序列 `(hash + i²) mod size` 不保证覆盖所有槽位；
/// 因为 `(i + size)² ≡ i² (mod size)`，前 `size` 次探测已覆盖全部可达槽位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuadraticProbe {
    pub coefficient: u64,
    pub constant: u64,
}

impl Default for QuadraticProbe {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl QuadraticProbe {
    /// 创建二次探测参数
    pub const fn new(coefficient: u64, constant: u64) -> Self {
        Self { coefficient, constant }
    }

    /// 第 `attempt` 次探测的偏移（已对 `size` 取模）
    pub fn offset(&self, attempt: usize, size: usize) -> u128 {
        let size = size as u128;
        let attempt = attempt as u128 % size;
        let square = attempt * attempt % size;
        let coefficient = self.coefficient as u128 % size;
        (coefficient * square % size + self.constant as u128 % size) % size
    }

    /// 计算第 `attempt` 次探测的槽位索引
    pub fn probe_index(&self, hash: u64, attempt: usize, size: usize) -> usize {
        calculate_slot(hash, self.offset(attempt, size), size)
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_quadratic_probe() {
        let probe = QuadraticProbe::default();
        assert_eq!(probe.probe_index(0, 0, 7), 0);
        assert_eq!(probe.probe_index(0, 1, 7), 1);
        assert_eq!(probe.probe_index(0, 2, 7), 4);
        assert_eq!(probe.probe_index(0, 3, 7), 2);
        assert_eq!(probe.probe_index(3, 4, 7), 5);
    }

    #[test]
    fn test_partial_coverage() {
        // 素数容量下二次探测只能到达约一半的槽位
        let probe = QuadraticProbe::default();
        let visited: HashSet<usize> = (0..7).map(|i| probe.probe_index(0, i, 7)).collect();
        assert_eq!(visited, HashSet::from([0, 1, 2, 4]));
    }

    #[test]
    fn test_periodic_in_size() {
        let probe = QuadraticProbe::new(3, 5);
        for i in 0..11 {
            assert_eq!(probe.probe_index(42, i, 11), probe.probe_index(42, i + 11, 11));
        }
    }

    #[test]
    fn test_large_attempt_no_overflow() {
        let probe = QuadraticProbe::default();
        let idx = probe.probe_index(7, usize::MAX, usize::MAX);
        assert!(idx < usize::MAX);
    }
}
