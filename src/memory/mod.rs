//! 内存管理模块 - 槽位与槽位数组

pub mod slot;
pub mod slot_array;

pub use slot::Slot;
pub use slot_array::SlotArray;
