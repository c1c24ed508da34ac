//! 统计模块 - 统一管理哈希表性能指标

pub mod recorder;
pub mod operation;

pub use recorder::{DefaultStatsRecorder, DisabledStatsRecorder, StatsRecorder, StatsRecorderFactory};
pub use operation::{AtomicOperationStats, OperationRecorder, OperationStatsSnapshot};
