//! 核心类型定义 - 共享类型和接口

use std::fmt;

/// 槽位状态
///
/// 删除采用惰性方式：被删除的槽位变为 `Tombstoned`，永远不会直接回到 `Empty`，
/// 只有重哈希才会丢弃墓碑。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// 从未被使用
    Empty,
    /// 持有有效键值对
    Occupied,
    /// 已删除（墓碑）
    Tombstoned,
}

impl SlotState {
    /// 检查是否为空槽位
    pub fn is_empty(&self) -> bool {
        matches!(self, SlotState::Empty)
    }

    /// 检查是否被占用
    pub fn is_occupied(&self) -> bool {
        matches!(self, SlotState::Occupied)
    }

    /// 检查是否为墓碑
    pub fn is_tombstoned(&self) -> bool {
        matches!(self, SlotState::Tombstoned)
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotState::Empty => "Empty",
            SlotState::Occupied => "Occupied",
            SlotState::Tombstoned => "Tombstoned",
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 插入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum InsertOutcome {
    /// 新键值对已写入
    Inserted,
    /// 键已存在，旧值保持不变
    Duplicate,
    /// 探测序列耗尽，没有可用槽位
    Full,
}

impl InsertOutcome {
    /// 是否写入了新条目
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 插入操作
    Insert,
    /// 获取操作
    Get,
    /// 删除操作
    Remove,
    /// 调整大小操作
    Resize,
}

impl OperationType {
    /// 判断是否为读操作
    pub fn is_read(&self) -> bool {
        matches!(self, OperationType::Get)
    }

    /// 判断是否为写操作
    pub fn is_write(&self) -> bool {
        !self.is_read()
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Get => "get",
            OperationType::Remove => "remove",
            OperationType::Resize => "resize",
        }
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_state_predicates() {
        assert!(SlotState::Empty.is_empty());
        assert!(!SlotState::Empty.is_occupied());
        assert!(SlotState::Occupied.is_occupied());
        assert!(SlotState::Tombstoned.is_tombstoned());
        // 墓碑与空槽位必须可区分
        assert_ne!(SlotState::Empty, SlotState::Tombstoned);
        assert!(!SlotState::Tombstoned.is_empty());
    }

    #[test]
    fn test_slot_state_display() {
        assert_eq!(SlotState::Tombstoned.to_string(), "Tombstoned");
        assert_eq!(format!("{}", SlotState::Empty), "Empty");
    }

    #[test]
    fn test_operation_type() {
        assert!(OperationType::Get.is_read());
        assert!(OperationType::Insert.is_write());
        assert!(OperationType::Resize.is_write());
        assert_eq!(OperationType::Remove.as_str(), "remove");
    }

    #[test]
    fn test_insert_outcome() {
        assert!(InsertOutcome::Inserted.is_inserted());
        assert!(!InsertOutcome::Duplicate.is_inserted());
        assert!(!InsertOutcome::Full.is_inserted());
    }
}
