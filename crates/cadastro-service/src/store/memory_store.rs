//! 有序内存存储
//!
//! 使用 `RwLock<Vec<T>>` 保持插入顺序，所有“读-改-写”操作都在同一把写锁内完成。

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// 可存入 [`MemoryStore`] 的记录
pub trait Record: Clone {
    /// 记录的唯一标识
    fn id(&self) -> i64;
}

/// 通用内存存储
///
/// 列表按插入顺序返回。id 由单调递增计数器生成，删除后不会复用。
/// 克隆得到的实例与原实例共享同一份数据。
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<RwLock<Vec<T>>>,
    next_id: Arc<AtomicI64>,
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryStore<T> {
    /// 创建空存储，第一个 id 为 1
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// 使用初始数据创建存储
    ///
    /// 计数器从初始数据的最大 id 之后开始，保证新 id 不与种子数据冲突
    pub fn seeded(items: Vec<T>) -> Self {
        let first_id = items.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self {
            data: Arc::new(RwLock::new(items)),
            next_id: Arc::new(AtomicI64::new(first_id)),
        }
    }

    /// 分配下一个 id
    pub fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// 校验后追加
    ///
    /// `check` 在写锁内对当前全部记录执行，返回错误时不分配 id 也不写入；
    /// 通过后用新 id 调用 `build` 并追加到末尾。
    pub fn insert_with<E, C, B>(&self, check: C, build: B) -> Result<T, E>
    where
        C: FnOnce(&[T]) -> Result<(), E>,
        B: FnOnce(i64) -> T,
    {
        let mut data = self.data.write();
        check(data.as_slice())?;

        let item = build(self.next_id());
        data.push(item.clone());
        Ok(item)
    }

    /// 按 id 获取记录的克隆
    pub fn get(&self, id: i64) -> Option<T> {
        self.data.read().iter().find(|item| item.id() == id).cloned()
    }

    /// 按插入顺序列出全部记录
    pub fn list(&self) -> Vec<T> {
        self.data.read().clone()
    }

    /// 整体替换指定 id 的记录，位置不变
    ///
    /// 记录不存在时返回 `None`
    pub fn replace<B>(&self, id: i64, build: B) -> Option<T>
    where
        B: FnOnce(&T) -> T,
    {
        let mut data = self.data.write();
        let slot = data.iter_mut().find(|item| item.id() == id)?;
        *slot = build(slot);
        Some(slot.clone())
    }

    /// 删除指定 id 的记录
    ///
    /// 通过比较过滤前后的长度判断是否删除成功
    pub fn remove(&self, id: i64) -> bool {
        let mut data = self.data.write();
        let before = data.len();
        data.retain(|item| item.id() != id);
        data.len() != before
    }

    /// 获取数据总数
    pub fn count(&self) -> usize {
        self.data.read().len()
    }
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            next_id: Arc::clone(&self.next_id),
        }
    }
}
