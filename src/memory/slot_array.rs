//! 槽位数组 - 固定长度的槽位序列

use crate::{error::ProbeError, memory::Slot, types::SlotState};

/// 固定长度槽位数组
///
/// 创建后长度不变；扩容时由调用方构建新数组整体替换。
#[derive(Debug, Clone)]
pub struct SlotArray<K, V> {
    slots: Vec<Slot<K, V>>,
    occupied: usize,
    tombstones: usize,
}

impl<K, V> SlotArray<K, V> {
    /// 创建全空槽位数组，拒绝零容量
    pub fn new(capacity: usize) -> Result<Self, ProbeError> {
        if capacity == 0 {
            return Err(ProbeError::InvalidCapacity { capacity });
        }
        Ok(Self::with_nonzero_capacity(capacity))
    }

    /// 调用方已保证 `capacity > 0`（例如来自容量表）
    pub(crate) fn with_nonzero_capacity(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "容量必须大于0");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::new);
        Self {
            slots,
            occupied: 0,
            tombstones: 0,
        }
    }

    /// 槽位总数
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 占用槽位数
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// 墓碑槽位数
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn get(&self, index: usize) -> &Slot<K, V> {
        &self.slots[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Slot<K, V> {
        &mut self.slots[index]
    }

    pub fn state(&self, index: usize) -> SlotState {
        self.slots[index].state()
    }

    /// 在指定槽位写入键值对（空槽位或墓碑）
    pub fn occupy(&mut self, index: usize, key: K, value: V) {
        let slot = &mut self.slots[index];
        if slot.is_tombstoned() {
            self.tombstones -= 1;
        }
        slot.occupy(key, value);
        self.occupied += 1;
    }

    /// 把指定槽位标记为墓碑，返回被删除的键值对
    pub fn tombstone(&mut self, index: usize) -> Option<(K, V)> {
        let entry = self.slots[index].tombstone()?;
        self.occupied -= 1;
        self.tombstones += 1;
        Some(entry)
    }

    /// 取出指定槽位的键值对并把槽位重置为空
    ///
    /// 会破坏经过该槽位的探测链，只用于重哈希期间搬移数据。
    pub(crate) fn take(&mut self, index: usize) -> Option<(K, V)> {
        let slot = &mut self.slots[index];
        if !slot.is_occupied() {
            return None;
        }
        self.occupied -= 1;
        std::mem::take(slot).into_entry()
    }

    /// 清空所有槽位，容量不变
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = Slot::Empty);
        self.occupied = 0;
        self.tombstones = 0;
    }

    /// 按索引遍历所有槽位
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Slot<K, V>)> + '_ {
        self.slots.iter().enumerate()
    }

    /// 遍历所有有效键值对
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots.iter().filter_map(Slot::entry)
    }

    /// 遍历所有有效值的可变引用
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.iter_mut().filter_map(Slot::value_mut)
    }

    /// 消耗数组，取出全部有效键值对（丢弃墓碑）
    pub fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        self.slots.into_iter().filter_map(Slot::into_entry)
    }
}
