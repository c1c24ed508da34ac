//! 开放寻址哈希表核心实现

use crate::{
    error::ProbeError,
    hash::{default_key_hasher, KeyHasher, ProbeStrategy, ProbeStrategyType},
    map::schedule::CapacitySchedule,
    memory::{Slot, SlotArray},
    stats::{OperationStatsSnapshot, StatsRecorder, StatsRecorderFactory},
    types::{InsertOutcome, OperationType, SlotState},
};
use std::{fmt, hash::Hash, sync::Arc, time::Instant};

/// 默认重哈希负载因子
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

/// 哈希表配置
#[derive(Clone, Debug)]
pub struct ProbingTableConfig {
    /// 探测策略
    pub strategy: ProbeStrategy,
    /// 扩容时依次使用的容量
    pub schedule: CapacitySchedule,
    /// 初始容量在容量表中的位置
    pub initial_index: usize,
    /// 期望的最小初始容量，设置后覆盖 `initial_index`
    pub initial_capacity: Option<usize>,
    /// 插入后允许的最大负载因子
    pub max_load_factor: f64,
}

impl Default for ProbingTableConfig {
    fn default() -> Self {
        Self {
            strategy: ProbeStrategy::default(),
            schedule: CapacitySchedule::primes(),
            initial_index: 0,
            initial_capacity: None,
            max_load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl ProbingTableConfig {
    /// 校验配置
    pub fn validate(&self) -> Result<(), ProbeError> {
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(ProbeError::InvalidConfig {
                reason: format!("负载因子必须在 (0, 1) 之间: {}", self.max_load_factor),
            });
        }
        self.resolve_initial_index().map(|_| ())
    }

    /// 计算初始容量在容量表中的位置
    pub fn resolve_initial_index(&self) -> Result<usize, ProbeError> {
        match self.initial_capacity {
            Some(capacity) => {
                self.schedule
                    .index_for(capacity)
                    .ok_or_else(|| ProbeError::InvalidConfig {
                        reason: format!("容量表中没有不小于 {} 的容量", capacity),
                    })
            }
            None if self.initial_index < self.schedule.len() => Ok(self.initial_index),
            None => Err(ProbeError::InvalidConfig {
                reason: format!(
                    "初始索引 {} 超出容量表长度 {}",
                    self.initial_index,
                    self.schedule.len()
                ),
            }),
        }
    }
}

/// 哈希表统计信息
#[derive(Debug, Clone)]
pub struct ProbingTableStats {
    pub size: usize,
    pub capacity: usize,
    pub load_factor: f32,
    pub tombstones: usize,
    pub strategy: ProbeStrategyType,
    pub schedule_index: usize,
    pub operations: OperationStatsSnapshot,
}

/// 调试转储中的单个槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSnapshot<'a, K, V> {
    pub index: usize,
    pub state: SlotState,
    pub key: Option<&'a K>,
    pub value: Option<&'a V>,
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for SlotSnapshot<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.index)?;
        match (self.key, self.value) {
            (Some(key), Some(value)) => write!(f, "{} | {} | {}", key, value, self.state),
            _ => write!(f, "- | - | {}", self.state),
        }
    }
}

/// 单次放置的结果，放置失败时交还键值对
pub(crate) enum Placement<K, V> {
    Inserted(usize),
    Duplicate(K, V),
    Full(K, V),
}

/// 沿探测序列放置键值对
///
/// 记住遇到的第一个墓碑，但继续探测直到空槽位或序列耗尽，
/// 以便发现位于墓碑之后的相同键。返回放置结果与探测次数。
pub(crate) fn place<K: Eq, V>(
    slots: &mut SlotArray<K, V>,
    strategy: ProbeStrategy,
    hash: u64,
    key: K,
    value: V,
) -> (Placement<K, V>, usize) {
    let mut sequence = strategy.sequence(hash, slots.capacity());
    let mut first_tombstone = None;
    let mut vacant = None;

    for index in sequence.by_ref() {
        match slots.get(index) {
            Slot::Empty => {
                vacant = Some(index);
                break;
            }
            Slot::Tombstoned if first_tombstone.is_none() => {
                first_tombstone = Some(index);
            }
            Slot::Tombstoned => {}
            Slot::Occupied { key: existing, .. } if *existing == key => {
                return (Placement::Duplicate(key, value), sequence.attempts());
            }
            Slot::Occupied { .. } => {}
        }
    }

    let probes = sequence.attempts();
    match first_tombstone.or(vacant) {
        Some(index) => {
            slots.occupy(index, key, value);
            (Placement::Inserted(index), probes)
        }
        None => (Placement::Full(key, value), probes),
    }
}

/// 开放寻址哈希表
///
/// 所有条目直接存放在槽位数组中，冲突通过探测解决；删除留下墓碑，
/// 负载因子超过阈值时在插入前扩容到容量表中的下一个容量。
pub struct ProbingTable<K, V> {
    pub(crate) slots: SlotArray<K, V>,
    pub(crate) schedule: CapacitySchedule,
    pub(crate) schedule_index: usize,
    pub(crate) strategy: ProbeStrategy,
    pub(crate) max_load_factor: f64,
    pub(crate) hasher: Arc<dyn KeyHasher<K>>,
    pub(crate) stats_recorder: Arc<dyn StatsRecorder>,
}

impl<K: Eq, V> ProbingTable<K, V> {
    /// 使用默认素数容量表创建
    pub fn new<H>(hasher: H, strategy: ProbeStrategy) -> Self
    where
        H: KeyHasher<K> + 'static,
    {
        let schedule = CapacitySchedule::primes();
        Self::from_parts(schedule, 0, strategy, DEFAULT_LOAD_FACTOR, Arc::new(hasher))
    }

    /// 创建容量不小于 `capacity` 的哈希表
    ///
    /// 超出素数容量表时使用其最大容量。
    pub fn with_capacity<H>(hasher: H, strategy: ProbeStrategy, capacity: usize) -> Self
    where
        H: KeyHasher<K> + 'static,
    {
        let schedule = CapacitySchedule::primes();
        let index = schedule
            .index_for(capacity)
            .unwrap_or(schedule.len() - 1);
        Self::from_parts(schedule, index, strategy, DEFAULT_LOAD_FACTOR, Arc::new(hasher))
    }

    /// 使用完整配置创建
    pub fn with_config<H>(config: ProbingTableConfig, hasher: H) -> Result<Self, ProbeError>
    where
        H: KeyHasher<K> + 'static,
    {
        Self::with_shared_hasher(config, Arc::new(hasher))
    }

    /// 使用共享的哈希函数创建
    pub fn with_shared_hasher(
        config: ProbingTableConfig,
        hasher: Arc<dyn KeyHasher<K>>,
    ) -> Result<Self, ProbeError> {
        config.validate()?;
        let index = config.resolve_initial_index()?;
        Ok(Self::from_parts(
            config.schedule,
            index,
            config.strategy,
            config.max_load_factor,
            hasher,
        ))
    }

    /// 替换统计记录器
    pub fn with_recorder(mut self, recorder: Arc<dyn StatsRecorder>) -> Self {
        self.stats_recorder = recorder;
        self
    }

    fn from_parts(
        schedule: CapacitySchedule,
        schedule_index: usize,
        strategy: ProbeStrategy,
        max_load_factor: f64,
        hasher: Arc<dyn KeyHasher<K>>,
    ) -> Self {
        // 容量表保证每项大于0
        let capacity = schedule.capacities()[schedule_index];
        let slots = SlotArray::with_nonzero_capacity(capacity);
        log_debug!(
            "Creating {} probing table with capacity {}",
            strategy.strategy_type().as_str(),
            capacity
        );
        Self {
            slots,
            schedule,
            schedule_index,
            strategy,
            max_load_factor,
            hasher,
            stats_recorder: StatsRecorderFactory::create_default(),
        }
    }

    /// 插入键值对
    ///
    /// 插入前先检查是否需要扩容。键已存在时保持旧值不变并返回
    /// [`InsertOutcome::Duplicate`]；探测序列中没有可用槽位时返回
    /// [`InsertOutcome::Full`]，表不被修改。
    pub fn insert(&mut self, key: K, value: V) -> InsertOutcome {
        let start = Instant::now();
        self.resize_check();

        let hash = self.hasher.hash_key(&key);
        let (placement, probes) = place(&mut self.slots, self.strategy, hash, key, value);
        let outcome = match placement {
            Placement::Inserted(index) => {
                log_debug!("Inserted hash {} at slot {} after {} probes", hash, index, probes);
                InsertOutcome::Inserted
            }
            Placement::Duplicate(..) => InsertOutcome::Duplicate,
            Placement::Full(..) => {
                log_warn!(
                    "Probe sequence exhausted for hash {} (size={}, capacity={})",
                    hash,
                    self.len(),
                    self.capacity()
                );
                InsertOutcome::Full
            }
        };

        self.stats_recorder.record_probes(probes);
        self.stats_recorder
            .record_operation(OperationType::Insert, start.elapsed(), outcome.is_inserted());
        outcome
    }

    /// 插入键值对，重复键与表满以错误返回
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), ProbeError> {
        match self.insert(key, value) {
            InsertOutcome::Inserted => Ok(()),
            InsertOutcome::Duplicate => Err(ProbeError::KeyAlreadyExists),
            InsertOutcome::Full => Err(ProbeError::TableFull {
                capacity: self.capacity(),
                size: self.len(),
                load_factor: self.load_factor(),
            }),
        }
    }

    /// 查找键所在槽位，返回槽位索引与探测次数
    ///
    /// 遇到空槽位即可断定键不存在：插入总是放在序列中第一个非占用槽位，
    /// 而槽位只有重哈希时才会回到空状态。
    fn find_index(&self, key: &K) -> (Option<usize>, usize) {
        let hash = self.hasher.hash_key(key);
        let mut sequence = self.strategy.sequence(hash, self.slots.capacity());

        for index in sequence.by_ref() {
            let slot = self.slots.get(index);
            if slot.is_empty() {
                break;
            }
            if slot.key_matches(key) {
                return (Some(index), sequence.attempts());
            }
        }
        (None, sequence.attempts())
    }

    /// 删除键，返回被删除的值
    ///
    /// 槽位标记为墓碑而不是置空，经过该槽位的探测链保持完整。
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let start = Instant::now();
        let (index, probes) = self.find_index(key);
        let removed = index
            .and_then(|index| self.slots.tombstone(index))
            .map(|(_, value)| value);

        self.stats_recorder.record_probes(probes);
        self.stats_recorder
            .record_operation(OperationType::Remove, start.elapsed(), removed.is_some());
        removed
    }

    /// 获取值
    pub fn get(&self, key: &K) -> Option<&V> {
        let start = Instant::now();
        let (index, probes) = self.find_index(key);

        self.stats_recorder.record_probes(probes);
        self.stats_recorder
            .record_operation(OperationType::Get, start.elapsed(), index.is_some());
        index.and_then(|index| self.slots.get(index).value())
    }

    /// 获取值的可变引用
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let (index, _) = self.find_index(key);
        index.and_then(move |index| self.slots.get_mut(index).value_mut())
    }

    /// 检查键是否存在
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

impl<K, V> ProbingTable<K, V> {
    /// 当前条目数
    pub fn len(&self) -> usize {
        self.slots.occupied()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 当前槽位总数
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// 当前负载因子
    pub fn load_factor(&self) -> f32 {
        self.len() as f32 / self.capacity() as f32
    }

    /// 最大负载因子
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// 墓碑数量
    pub fn tombstone_count(&self) -> usize {
        self.slots.tombstones()
    }

    /// 探测策略
    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    /// 当前容量在容量表中的位置
    pub fn schedule_index(&self) -> usize {
        self.schedule_index
    }

    /// 清空所有条目，容量不变
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// 遍历所有键值对，顺序不作保证
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots.entries()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.values_mut()
    }

    /// 调试转储：按索引给出每个槽位的状态与内容
    pub fn dump(&self) -> impl Iterator<Item = SlotSnapshot<'_, K, V>> + '_ {
        self.slots.iter().map(|(index, slot)| SlotSnapshot {
            index,
            state: slot.state(),
            key: slot.key(),
            value: slot.value(),
        })
    }

    /// 获取统计信息
    pub fn stats(&self) -> ProbingTableStats {
        ProbingTableStats {
            size: self.len(),
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            tombstones: self.tombstone_count(),
            strategy: self.strategy.strategy_type(),
            schedule_index: self.schedule_index,
            operations: self.stats_recorder.operation_stats_snapshot(),
        }
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.stats_recorder.export_prometheus()
    }
}

/// 默认哈希表：ahash 哈希函数、线性探测、素数容量表
impl<K: Hash + Eq, V> Default for ProbingTable<K, V> {
    fn default() -> Self {
        Self::from_parts(
            CapacitySchedule::primes(),
            0,
            ProbeStrategy::default(),
            DEFAULT_LOAD_FACTOR,
            default_key_hasher(),
        )
    }
}

/// 复制已有哈希表；副本拥有独立的统计记录器
impl<K: Clone, V: Clone> Clone for ProbingTable<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            schedule: self.schedule.clone(),
            schedule_index: self.schedule_index,
            strategy: self.strategy,
            max_load_factor: self.max_load_factor,
            hasher: Arc::clone(&self.hasher),
            stats_recorder: StatsRecorderFactory::create_default(),
        }
    }
}

impl<K, V> fmt::Debug for ProbingTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbingTable")
            .field("size", &self.len())
            .field("capacity", &self.capacity())
            .field("load_factor", &self.load_factor())
            .field("tombstones", &self.tombstone_count())
            .field("strategy", &self.strategy.strategy_type())
            .finish()
    }
}

impl<K: Eq, V> Extend<(K, V)> for ProbingTable<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.insert(key, value);
        }
    }
}
