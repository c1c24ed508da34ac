//! 统一错误处理 - 所有可能错误类型和恢复逻辑

/// 探测哈希表可能发生的错误
///
/// 重复键、删除不存在的键、查询不存在的键都属于预期情况，
/// 通过返回值表达，不会产生这里的错误。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProbeError {
    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },

    #[error("无效容量: {capacity} (容量必须大于0)")]
    InvalidCapacity {
        capacity: usize,
    },

    #[error("容量表已耗尽 (当前索引: {index}, 容量表长度: {len})")]
    ScheduleExhausted {
        index: usize,
        len: usize,
    },

    #[error("表已满，无法插入新条目 (容量: {capacity}, 当前大小: {size}, 负载因子: {load_factor:.2})")]
    TableFull {
        capacity: usize,
        size: usize,
        load_factor: f32,
    },

    #[error("键已存在")]
    KeyAlreadyExists,

    #[error("重哈希失败 (新容量: {capacity}, 已迁移: {migrated}/{total})")]
    RehashFailed {
        capacity: usize,
        migrated: usize,
        total: usize,
    },
}

impl ProbeError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig { .. } => Some("检查配置参数"),
            Self::InvalidCapacity { .. } => Some("使用大于0的容量"),
            Self::ScheduleExhausted { .. } => Some("提供更长的容量表"),
            Self::TableFull { .. } => Some("检查哈希函数分布或扩充容量表"),
            Self::KeyAlreadyExists => Some("先删除旧键再插入"),
            Self::RehashFailed { .. } => Some("哈希函数可能退化，尝试使用不同的哈希函数"),
        }
    }

    /// 判断错误是否可恢复
    ///
    /// 配置错误需要调用方修改参数，其余错误不影响表内已有数据。
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidConfig { .. } | Self::InvalidCapacity { .. }
        )
    }

    /// 是否表明容量表或哈希函数配置不当
    pub fn is_capacity_error(&self) -> bool {
        matches!(
            self,
            Self::ScheduleExhausted { .. } | Self::TableFull { .. } | Self::RehashFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProbeError::TableFull {
            capacity: 7,
            size: 3,
            load_factor: 3.0 / 7.0,
        };
        assert_eq!(
            err.to_string(),
            "表已满，无法插入新条目 (容量: 7, 当前大小: 3, 负载因子: 0.43)"
        );
        assert_eq!(
            ProbeError::InvalidCapacity { capacity: 0 }.to_string(),
            "无效容量: 0 (容量必须大于0)"
        );
    }

    #[test]
    fn test_error_classification() {
        let config = ProbeError::InvalidConfig { reason: "x".into() };
        assert!(!config.is_recoverable());
        assert!(!config.is_capacity_error());

        let exhausted = ProbeError::ScheduleExhausted { index: 3, len: 4 };
        assert!(exhausted.is_recoverable());
        assert!(exhausted.is_capacity_error());

        assert!(ProbeError::KeyAlreadyExists.recovery_suggestion().is_some());
    }
}
