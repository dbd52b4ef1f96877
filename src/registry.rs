//! 模块注册表
//!
//! 已安装模块记录的权威内存集合：名称唯一，迭代顺序等于插入顺序。
//! 纯数据结构，不含锁；并发纪律由生命周期管理器负责。

use crate::types::{ModuleName, ModuleRecord};
use std::collections::HashMap;

/// 模块注册表
///
/// `records` 与 `order` 始终保持一致：`order` 中的每个名称在 `records`
/// 中恰好存在一条记录，反之亦然。
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    /// 名称到记录的映射
    records: HashMap<ModuleName, ModuleRecord>,
    /// 插入顺序索引
    order: Vec<ModuleName>,
}

impl ModuleRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// 插入记录；重名时拒绝并保留已有记录
    pub fn insert(&mut self, record: ModuleRecord) -> bool {
        if self.records.contains_key(&record.name) {
            return false;
        }
        self.order.push(record.name.clone());
        self.records.insert(record.name.clone(), record);
        true
    }

    /// 移除记录；名称不存在时返回 None
    pub fn remove(&mut self, name: &str) -> Option<ModuleRecord> {
        let record = self.records.remove(name)?;
        self.order.retain(|n| n != name);
        Some(record)
    }

    /// 名称是否已注册
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// 查询记录
    pub fn get(&self, name: &str) -> Option<&ModuleRecord> {
        self.records.get(name)
    }

    /// 按插入顺序返回全部名称快照
    pub fn names(&self) -> Vec<ModuleName> {
        self.order.clone()
    }

    /// 按插入顺序迭代记录
    pub fn iter(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.order.iter().filter_map(|name| self.records.get(name))
    }

    /// 已注册模块数量
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
