//! 开放寻址哈希表库
//!
//! 所有条目直接存放在一个槽位数组中，冲突通过线性探测或二次探测解决。
//!
//! ## 主要特性
//! - 线性探测与二次探测，系数与常数可配置
//! - 删除留下墓碑，保持经过该槽位的探测链完整
//! - 插入前检查负载因子，超过阈值时按素数容量表扩容
//! - 可插拔哈希函数：闭包或内置 ahash / xxhash 算法
//! - 操作统计与 Prometheus 格式导出
//!
//! ## 快速开始
//!
//! ```rust
//! use probing_hashtable::*;
//!
//! // 以 `k % 7` 作为哈希函数的线性探测表
//! let mut table = ProbingTable::new(|k: &u64| *k % 7, ProbeStrategy::linear());
//!
//! assert!(table.insert(0, "zero").is_inserted());
//! assert!(table.insert(7, "seven").is_inserted());
//! assert_eq!(table.insert(7, "again"), InsertOutcome::Duplicate);
//!
//! assert_eq!(table.remove(&0), Some("zero"));
//! assert_eq!(table.get(&7), Some(&"seven"));
//!
//! for slot in table.dump() {
//!     println!("{}", slot);
//! }
//! println!("{:?}", table.stats());
//! ```

#![warn(clippy::all)]
#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}
// 核心模块导出
pub mod error;
pub mod types;
pub mod hash;
pub mod memory;
pub mod map;
pub mod stats;

use std::hash::Hash;

// 公共接口导出
pub use crate::{
    error::ProbeError,
    hash::{
        default_key_hasher, AlgorithmHasher, HashAlgorithm, KeyHasher, LinearProbe,
        ProbeSequence, ProbeStrategy, ProbeStrategyType, QuadraticProbe,
    },
    map::{
        CapacitySchedule, ProbingTable, ProbingTableConfig, ProbingTableStats, SlotSnapshot,
        DEFAULT_LOAD_FACTOR, PRIME_SCHEDULE,
    },
    memory::{Slot, SlotArray},
    stats::{
        DefaultStatsRecorder, DisabledStatsRecorder, OperationStatsSnapshot, StatsRecorder,
        StatsRecorderFactory,
    },
    types::{InsertOutcome, OperationType, SlotState},
};

// 简化默认类型别名
pub type DefaultTable<V> = ProbingTable<String, V>;

/// 创建使用 ahash 与指定探测策略的哈希表
pub fn hashed_table<K, V>(strategy: ProbeStrategy) -> ProbingTable<K, V>
where
    K: Hash + Eq,
{
    let mut table = ProbingTable::default();
    // 空表可以直接替换探测策略
    table.strategy = strategy;
    table
}

// 便捷功能函数

/// 批量插入，返回成功插入的条目数
///
/// 插入前按条目数预留空间，避免逐次扩容。
pub fn batch_insert<K: Eq, V>(
    table: &mut ProbingTable<K, V>,
    items: impl Iterator<Item = (K, V)>,
) -> usize {
    let (lower, _) = items.size_hint();
    if let Err(err) = table.reserve(lower) {
        log_warn!("Batch reserve for {} entries failed: {}", lower, err);
    }
    items.fold(0, |count, (key, value)| {
            count + usize::from(table.insert(key, value).is_inserted())
        })
}

/// 批量查询
pub fn batch_get<'a, K: Eq + 'a, V>(
    table: &'a ProbingTable<K, V>,
    keys: impl Iterator<Item = &'a K>,
) -> Vec<Option<&'a V>> {
    keys.map(|key| table.get(key)).collect()
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_insert_and_get() {
        let mut table = ProbingTable::new(|k: &u64| *k, ProbeStrategy::quadratic());
        let inserted = batch_insert(&mut table, (0..100u64).map(|k| (k, k * 2)));
        assert_eq!(inserted, 100);
        assert!(table.load_factor() as f64 <= DEFAULT_LOAD_FACTOR);

        // 重复键不计入
        let inserted = batch_insert(&mut table, (95..105u64).map(|k| (k, 0)));
        assert_eq!(inserted, 5);

        let keys = [1u64, 50, 1000];
        let values = batch_get(&table, keys.iter());
        assert_eq!(values, vec![Some(&2), Some(&100), None]);
    }

    #[test]
    fn test_hashed_table() {
        let mut table: DefaultTable<u32> = hashed_table(ProbeStrategy::quadratic());
        assert_eq!(table.strategy().strategy_type(), ProbeStrategyType::Quadratic);
        table.extend((0..50u32).map(|i| (format!("k{}", i), i)));
        assert_eq!(table.len(), 50);
        assert_eq!(table.get(&"k49".to_string()), Some(&49));
    }
}
