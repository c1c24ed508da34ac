//! 哈希函数 - 由调用方提供的键到整数的映射

use ahash::RandomState;
use std::{
    fmt,
    hash::{BuildHasher, Hash, Hasher},
};

/// 默认哈希种子
pub const DEFAULT_SEED: u64 = 42;

/// 哈希函数特征
///
/// 相等的键必须得到相同的哈希值。
pub trait KeyHasher<K: ?Sized>: Send + Sync {
    fn hash_key(&self, key: &K) -> u64;
}

impl<K, F> KeyHasher<K> for F
where
    K: ?Sized,
    F: Fn(&K) -> u64 + Send + Sync,
{
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

/// 哈希算法选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    AHash,
    XxHash,
    Default,
}

/// 基于标准 `Hash` 的哈希函数，固定种子构建
#[derive(Clone)]
pub struct AlgorithmHasher {
    algorithm: HashAlgorithm,
    seed: u64,
    state: RandomState,
}

impl AlgorithmHasher {
    /// 使用默认种子创建
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self::with_seed(algorithm, DEFAULT_SEED)
    }

    /// 使用指定种子创建
    pub fn with_seed(algorithm: HashAlgorithm, seed: u64) -> Self {
        Self {
            algorithm,
            seed,
            state: RandomState::with_seed(seed as usize),
        }
    }

    /// 获取算法
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl fmt::Debug for AlgorithmHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmHasher")
            .field("algorithm", &self.algorithm)
            .field("seed", &self.seed)
            .finish()
    }
}

impl<K: Hash + ?Sized> KeyHasher<K> for AlgorithmHasher {
    fn hash_key(&self, key: &K) -> u64 {
        match self.algorithm {
            HashAlgorithm::AHash => {
                let mut hasher = self.state.build_hasher();
                key.hash(&mut hasher);
                hasher.finish()
            }
            HashAlgorithm::XxHash => {
                let mut hasher = twox_hash::XxHash64::with_seed(self.seed);
                key.hash(&mut hasher);
                hasher.finish()
            }
            HashAlgorithm::Default => {
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                key.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    fn check_algorithm(algorithm: HashAlgorithm) {
        let hasher = AlgorithmHasher::new(algorithm);
        let h1 = KeyHasher::<str>::hash_key(&hasher, "consistent_key");
        let h2 = KeyHasher::<str>::hash_key(&hasher, "consistent_key");
        assert_eq!(h1, h2, "相同键应有相同的哈希值");

        let other = KeyHasher::<str>::hash_key(&hasher, "other_key");
        assert_ne!(h1, other, "不同键的哈希值不应相同");
    }

    #[test]
    fn test_ahash() {
        check_algorithm(HashAlgorithm::AHash);
    }

    #[test]
    fn test_xxhash() {
        check_algorithm(HashAlgorithm::XxHash);
    }

    #[test]
    fn test_default_hasher() {
        check_algorithm(HashAlgorithm::Default);
    }

    #[test]
    fn test_clone_hashes_identically() {
        let hasher = AlgorithmHasher::with_seed(HashAlgorithm::AHash, 7);
        let cloned = hasher.clone();
        assert_eq!(
            KeyHasher::<u64>::hash_key(&hasher, &99),
            KeyHasher::<u64>::hash_key(&cloned, &99)
        );
        assert_eq!(cloned.algorithm(), HashAlgorithm::AHash);
    }

    #[test]
    fn test_closure_hasher() {
        let modulo = |k: &u64| *k % 7;
        assert_eq!(KeyHasher::<u64>::hash_key(&modulo, &14), 0);
        assert_eq!(KeyHasher::<u64>::hash_key(&modulo, &15), 1);
    }
}
