//! 哈希表核心模块 - 开放寻址哈希表、扩容协调与容量表

pub mod probing_map;
pub mod resize;
pub mod schedule;

pub use probing_map::{
    ProbingTable, ProbingTableConfig, ProbingTableStats, SlotSnapshot, DEFAULT_LOAD_FACTOR,
};
pub use schedule::{CapacitySchedule, FIRST_PRIME_CAPACITY, MAX_PRIME_CAPACITY, PRIME_SCHEDULE};
