//! 扩容协调 - 负载因子检查与整表重哈希

use crate::{
    error::ProbeError,
    map::probing_map::{place, Placement, ProbingTable},
    memory::SlotArray,
    types::OperationType,
};
use std::time::Instant;

impl<K: Eq, V> ProbingTable<K, V> {
    /// 再插入 `additional` 个条目后负载因子是否会超过阈值
    fn exceeds_load_factor(&self, additional: usize) -> bool {
        (self.len() + additional) as f64 > self.max_load_factor * self.capacity() as f64
    }

    /// 下一次插入是否需要先扩容
    ///
    /// 在插入前检查 `count + 1`，保证插入成功后负载因子不超过阈值。
    pub fn needs_resize(&self) -> bool {
        self.exceeds_load_factor(1)
    }

    /// 插入前的扩容检查，扩容失败时继续使用当前数组
    pub(crate) fn resize_check(&mut self) {
        while self.needs_resize() {
            if let Err(err) = self.resize() {
                log_warn!("Resize skipped, keeping capacity {}: {}", self.capacity(), err);
                break;
            }
        }
    }

    /// 扩容到容量表中的下一个容量
    ///
    /// 新数组完整填充后才替换旧数组；任一条目无法放置时旧数组原样保留。
    /// 墓碑在重哈希中被丢弃，条目数保持不变。
    pub fn resize(&mut self) -> Result<(), ProbeError> {
        let next_index = self.schedule_index + 1;
        let capacity = self
            .schedule
            .get(next_index)
            .ok_or(ProbeError::ScheduleExhausted {
                index: self.schedule_index,
                len: self.schedule.len(),
            })?;

        let start = Instant::now();
        log_info!(
            "Resizing from {} to {} slots ({} entries, {} tombstones)",
            self.capacity(),
            capacity,
            self.len(),
            self.tombstone_count()
        );

        let result = self.rehash_into(capacity);
        if result.is_ok() {
            self.schedule_index = next_index;
            log_info!("Resize to {} slots completed in {:?}", capacity, start.elapsed());
        }
        self.stats_recorder
            .record_operation(OperationType::Resize, start.elapsed(), result.is_ok());
        result
    }

    /// 预留空间，保证再插入 `additional` 个条目不触发扩容
    pub fn reserve(&mut self, additional: usize) -> Result<(), ProbeError> {
        while self.exceeds_load_factor(additional) {
            self.resize()?;
        }
        Ok(())
    }

    /// 把全部有效条目搬入新容量的数组
    ///
    /// 逐个取出旧槽位并记录去向，失败时按记录把条目放回原位置。
    fn rehash_into(&mut self, capacity: usize) -> Result<(), ProbeError> {
        let mut fresh = SlotArray::new(capacity)?;
        let total = self.len();
        let mut moved: Vec<(usize, usize)> = Vec::with_capacity(total);

        for index in 0..self.slots.capacity() {
            let Some((key, value)) = self.slots.take(index) else {
                continue;
            };
            let hash = self.hasher.hash_key(&key);
            let (placement, probes) = place(&mut fresh, self.strategy, hash, key, value);
            self.stats_recorder.record_probes(probes);

            match placement {
                Placement::Inserted(new_index) => moved.push((index, new_index)),
                Placement::Duplicate(key, value) | Placement::Full(key, value) => {
                    log_error!(
                        "Rehash into {} slots failed after {}/{} entries",
                        capacity,
                        moved.len(),
                        total
                    );
                    self.slots.occupy(index, key, value);
                    let migrated = moved.len();
                    for (old_index, new_index) in moved {
                        if let Some((key, value)) = fresh.take(new_index) {
                            self.slots.occupy(old_index, key, value);
                        }
                    }
                    return Err(ProbeError::RehashFailed {
                        capacity,
                        migrated,
                        total,
                    });
                }
            }
        }

        debug_assert_eq!(fresh.occupied(), total);
        self.slots = fresh;
        Ok(())
    }
}
