//! 槽位管理 - 单个槽位的三种状态与键值存储

use crate::types::SlotState;
use std::mem;

/// 槽位结构 - 管理单个键值对
///
/// 只有 `Occupied` 持有键值对；`Empty` 与 `Tombstoned` 不携带任何数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    Empty,
    Tombstoned,
    Occupied { key: K, value: V },
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<K, V> Slot<K, V> {
    /// 创建新槽位
    pub fn new() -> Self {
        Slot::Empty
    }

    /// 获取槽位状态
    pub fn state(&self) -> SlotState {
        match self {
            Slot::Empty => SlotState::Empty,
            Slot::Tombstoned => SlotState::Tombstoned,
            Slot::Occupied { .. } => SlotState::Occupied,
        }
    }

    /// 检查是否为空槽位
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// 检查是否被占用
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    /// 检查是否为墓碑
    pub fn is_tombstoned(&self) -> bool {
        matches!(self, Slot::Tombstoned)
    }

    /// 获取键
    pub fn key(&self) -> Option<&K> {
        match self {
            Slot::Occupied { key, .. } => Some(key),
            _ => None,
        }
    }

    /// 获取值
    pub fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// 获取值的可变引用
    pub fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// 获取键值对
    pub fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    /// 写入键值对
    ///
    /// 调用方保证槽位未被占用。
    pub fn occupy(&mut self, key: K, value: V) {
        debug_assert!(!self.is_occupied(), "不能覆盖已占用槽位");
        *self = Slot::Occupied { key, value };
    }

    /// 惰性删除：占用槽位变为墓碑并交出键值对
    ///
    /// 非占用槽位保持不变并返回 `None`。
    pub fn tombstone(&mut self) -> Option<(K, V)> {
        if !self.is_occupied() {
            return None;
        }
        match mem::replace(self, Slot::Tombstoned) {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }

    /// 消耗槽位，取出键值对
    pub fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

impl<K: Eq, V> Slot<K, V> {
    /// 检查槽位是否持有给定键
    ///
    /// 墓碑与空槽位永不匹配。
    pub fn key_matches(&self, key: &K) -> bool {
        self.key().map_or(false, |k| k == key)
    }
}
