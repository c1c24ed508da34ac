// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表操作次数、探测次数与耗时

use crate::types::OperationType;
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

/// 操作统计接口
pub trait OperationRecorder: Send + Sync {
    /// 记录操作
    fn record(&self, op_type: OperationType, duration: Duration, success: bool);
    /// 记录一次操作消耗的探测次数
    fn record_probes(&self, probes: usize);
    /// 获取操作统计快照
    fn snapshot(&self) -> OperationStatsSnapshot;

    /// 重置统计
    fn reset(&self);

    /// 导出Prometheus格式指标
    fn export_prometheus(&self) -> String;
}

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub get_count: u64,
    pub remove_count: u64,
    pub resize_count: u64,
    /// 未成功的操作数（重复键、未命中、表满）
    pub miss_count: u64,
    pub probe_count: u64,
    pub total_duration: u64, // 纳秒
}

impl OperationStatsSnapshot {
    /// 平均每次操作的探测次数
    pub fn average_probes(&self) -> f64 {
        let ops = self.insert_count + self.get_count + self.remove_count;
        if ops == 0 {
            return 0.0;
        }
        self.probe_count as f64 / ops as f64
    }
}

/// 原子操作统计
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    insert_count: AtomicU64,
    get_count: AtomicU64,
    remove_count: AtomicU64,
    resize_count: AtomicU64,
    miss_count: AtomicU64,
    probe_count: AtomicU64,
    total_duration: AtomicU64, // 纳秒
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Insert => &self.insert_count,
            OperationType::Get => &self.get_count,
            OperationType::Remove => &self.remove_count,
            OperationType::Resize => &self.resize_count,
        }
    }
}

impl OperationRecorder for AtomicOperationStats {
    fn record(&self, op_type: OperationType, duration: Duration, success: bool) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
        self.total_duration
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);

        if !success {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_probes(&self, probes: usize) {
        self.probe_count.fetch_add(probes as u64, Ordering::Relaxed);
    }

    fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            insert_count: self.insert_count.load(Ordering::Relaxed),
            get_count: self.get_count.load(Ordering::Relaxed),
            remove_count: self.remove_count.load(Ordering::Relaxed),
            resize_count: self.resize_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            probe_count: self.probe_count.load(Ordering::Relaxed),
            total_duration: self.total_duration.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.insert_count.store(0, Ordering::Relaxed);
        self.get_count.store(0, Ordering::Relaxed);
        self.remove_count.store(0, Ordering::Relaxed);
        self.resize_count.store(0, Ordering::Relaxed);
        self.miss_count.store(0, Ordering::Relaxed);
        self.probe_count.store(0, Ordering::Relaxed);
        self.total_duration.store(0, Ordering::Relaxed);
    }

    fn export_prometheus(&self) -> String {
        let mut output = String::new();

        let op_types = [
            OperationType::Insert,
            OperationType::Get,
            OperationType::Remove,
            OperationType::Resize,
        ];

        for op in op_types {
            let count = self.counter(op).load(Ordering::Relaxed);
            output.push_str(&format!(
                "# HELP probing_operation_{}_count Total {} operations\n",
                op.as_str(),
                op.as_str()
            ));
            output.push_str(&format!(
                "# TYPE probing_operation_{}_count counter\n",
                op.as_str()
            ));
            output.push_str(&format!(
                "probing_operation_{}_count {}\n",
                op.as_str(),
                count
            ));
        }

        output.push_str("# HELP probing_operation_probe_count Total probed slots\n");
        output.push_str("# TYPE probing_operation_probe_count counter\n");
        output.push_str(&format!(
            "probing_operation_probe_count {}\n",
            self.probe_count.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP probing_operation_miss_count Operations without effect\n");
        output.push_str("# TYPE probing_operation_miss_count counter\n");
        output.push_str(&format!(
            "probing_operation_miss_count {}\n",
            self.miss_count.load(Ordering::Relaxed)
        ));

        output.push_str("# HELP probing_operation_total_duration Total operation duration (ns)\n");
        output.push_str("# TYPE probing_operation_total_duration counter\n");
        output.push_str(&format!(
            "probing_operation_total_duration {}\n",
            self.total_duration.load(Ordering::Relaxed)
        ));

        output
    }
}

/// 禁用操作统计实现
#[derive(Debug, Default)]
pub struct DisabledOperationRecorder;

impl OperationRecorder for DisabledOperationRecorder {
    fn record(&self, _op_type: OperationType, _duration: Duration, _success: bool) {}
    fn record_probes(&self, _probes: usize) {}
    fn snapshot(&self) -> OperationStatsSnapshot { OperationStatsSnapshot::default() }
    fn reset(&self) {}
    fn export_prometheus(&self) -> String { String::new() }
}
