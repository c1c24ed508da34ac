//! 哈希模块 - 统一管理哈希函数与探测序列

pub mod strategy;
pub mod linear_probe;
pub mod quadratic_probe;
pub mod hasher;

pub use strategy::{ProbeSequence, ProbeStrategy, ProbeStrategyType};
pub use linear_probe::LinearProbe;
pub use quadratic_probe::QuadraticProbe;
pub use hasher::{AlgorithmHasher, HashAlgorithm, KeyHasher};

use std::sync::Arc;

/// 默认哈希函数
pub fn default_key_hasher<K: std::hash::Hash + ?Sized>() -> Arc<dyn KeyHasher<K>> {
    Arc::new(AlgorithmHasher::new(HashAlgorithm::AHash))
}

/// 哈希工具函数：把哈希值与探测偏移合成槽位索引
///
/// `offset` 须已对 `size` 取模；计算在 u128 中进行，不会溢出。
pub fn calculate_slot(hash: u64, offset: u128, size: usize) -> usize {
    debug_assert!(size > 0, "容量必须大于0");
    let size = size as u128;
    ((hash as u128 % size + offset) % size) as usize
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_calculation() {
        assert_eq!(calculate_slot(123, 0, 100), 23);
        assert_eq!(calculate_slot(95, 10, 100), 5);
        assert_eq!(calculate_slot(u64::MAX, 6, 7), ((u64::MAX % 7 + 6) % 7) as usize);
    }

    #[test]
    fn test_default_key_hasher() {
        let hasher = default_key_hasher::<str>();
        assert_eq!(hasher.hash_key("key1"), hasher.hash_key("key1"));
        assert_ne!(hasher.hash_key("key1"), hasher.hash_key("key2"));
    }
}
