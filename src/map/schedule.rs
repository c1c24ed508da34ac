//! 容量表 - 扩容时依次使用的递增容量序列

use crate::error::ProbeError;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// 素数容量表的首个容量
pub const FIRST_PRIME_CAPACITY: u64 = 7;

/// 素数容量表的容量上限
pub const MAX_PRIME_CAPACITY: u64 = 1 << 31;

/// 全局素数容量表
///
/// 每一项是不小于 `2p + 1` 的下一个素数，首次使用时生成。
pub static PRIME_SCHEDULE: Lazy<CapacitySchedule> = Lazy::new(|| CapacitySchedule {
    capacities: generate_primes(FIRST_PRIME_CAPACITY, MAX_PRIME_CAPACITY).into(),
});

/// 容量表
///
/// 保证非空、每项大于0且严格递增。克隆只增加引用计数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacitySchedule {
    capacities: Arc<[usize]>,
}

impl Default for CapacitySchedule {
    fn default() -> Self {
        Self::primes()
    }
}

impl CapacitySchedule {
    /// 使用自定义容量序列创建
    pub fn new(capacities: Vec<usize>) -> Result<Self, ProbeError> {
        if capacities.is_empty() {
            return Err(ProbeError::InvalidConfig {
                reason: "容量表不能为空".into(),
            });
        }
        if let Some(&capacity) = capacities.iter().find(|&&c| c == 0) {
            return Err(ProbeError::InvalidCapacity { capacity });
        }
        if let Some(pair) = capacities.windows(2).find(|w| w[1] <= w[0]) {
            return Err(ProbeError::InvalidConfig {
                reason: format!("容量表必须严格递增: {} 之后是 {}", pair[0], pair[1]),
            });
        }
        Ok(Self {
            capacities: capacities.into(),
        })
    }

    /// 默认素数容量表
    pub fn primes() -> Self {
        PRIME_SCHEDULE.clone()
    }

    /// 获取指定位置的容量
    pub fn get(&self, index: usize) -> Option<usize> {
        self.capacities.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.capacities.len()
    }

    /// 容量表在构造时已保证非空
    pub fn is_empty(&self) -> bool {
        self.capacities.is_empty()
    }

    /// 第一个不小于 `capacity` 的容量所在位置
    pub fn index_for(&self, capacity: usize) -> Option<usize> {
        let index = self.capacities.partition_point(|&c| c < capacity);
        (index < self.capacities.len()).then_some(index)
    }

    /// 全部容量
    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

fn next_prime(mut n: u64) -> u64 {
    while !is_prime(n) {
        n += 1;
    }
    n
}

fn generate_primes(first: u64, limit: u64) -> Vec<usize> {
    let limit = limit.min(usize::MAX as u64);
    let mut primes = Vec::new();
    let mut prime = next_prime(first);
    while prime <= limit {
        primes.push(prime as usize);
        prime = next_prime(prime * 2 + 1);
    }
    primes
}
