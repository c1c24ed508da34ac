//! 探测策略模块 - 定义从哈希值到候选槽位序列的映射

use crate::hash::{LinearProbe, QuadraticProbe};
use std::iter::FusedIterator;

/// 探测策略类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStrategyType {
    Linear,
    Quadratic,
}

impl ProbeStrategyType {
    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStrategyType::Linear => "linear",
            ProbeStrategyType::Quadratic => "quadratic",
        }
    }
}

/// 探测策略
///
/// 纯函数：相同的 `(hash, attempt, size)` 总是得到相同的索引。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStrategy {
    Linear(LinearProbe),
    Quadratic(QuadraticProbe),
}

impl Default for ProbeStrategy {
    fn default() -> Self {
        Self::linear()
    }
}

impl ProbeStrategy {
    /// 默认参数的线性探测
    pub fn linear() -> Self {
        ProbeStrategy::Linear(LinearProbe::default())
    }

    /// 默认参数的二次探测
    pub fn quadratic() -> Self {
        ProbeStrategy::Quadratic(QuadraticProbe::default())
    }

    /// 获取策略类型
    pub fn strategy_type(&self) -> ProbeStrategyType {
        match self {
            ProbeStrategy::Linear(_) => ProbeStrategyType::Linear,
            ProbeStrategy::Quadratic(_) => ProbeStrategyType::Quadratic,
        }
    }

    /// 计算第 `attempt` 次探测的槽位索引
    pub fn probe_index(&self, hash: u64, attempt: usize, size: usize) -> usize {
        match self {
            ProbeStrategy::Linear(probe) => probe.probe_index(hash, attempt, size),
            ProbeStrategy::Quadratic(probe) => probe.probe_index(hash, attempt, size),
        }
    }

    /// 最大探测次数
    ///
    /// 两种策略的偏移都以 `size` 为周期，超过 `size` 次的探测不会到达新槽位。
    pub fn max_attempts(&self, size: usize) -> usize {
        size
    }

    /// 生成探测序列
    pub fn sequence(&self, hash: u64, size: usize) -> ProbeSequence {
        ProbeSequence::new(*self, hash, size)
    }
}

/// 探测序列迭代器
///
/// 最多产生 `size` 个索引。线性探测在回到首个索引时提前结束，
/// 二次探测不依赖首个索引判断（其序列可能早于全部槽位就出现重复）。
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    strategy: ProbeStrategy,
    hash: u64,
    size: usize,
    attempt: usize,
    first: Option<usize>,
    finished: bool,
}

impl ProbeSequence {
    /// 创建探测序列
    pub fn new(strategy: ProbeStrategy, hash: u64, size: usize) -> Self {
        Self {
            strategy,
            hash,
            size,
            attempt: 0,
            first: None,
            finished: size == 0,
        }
    }

    /// 已产生的探测次数
    pub fn attempts(&self) -> usize {
        self.attempt
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.finished || self.attempt >= self.strategy.max_attempts(self.size) {
            self.finished = true;
            return None;
        }

        let index = self.strategy.probe_index(self.hash, self.attempt, self.size);
        match self.first {
            None => self.first = Some(index),
            Some(first) if first == index
                && self.strategy.strategy_type() == ProbeStrategyType::Linear =>
            {
                // 线性探测回到起点，全部可达槽位已访问
                self.finished = true;
                return None;
            }
            Some(_) => {}
        }

        self.attempt += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        (0, Some(self.strategy.max_attempts(self.size) - self.attempt))
    }
}

impl FusedIterator for ProbeSequence {}
