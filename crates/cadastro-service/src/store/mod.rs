//! 存储层
//!
//! 进程内的有序内存存储，重启即丢失。

mod memory_store;

pub use memory_store::{MemoryStore, Record};
