//! 模块生命周期管理器
//!
//! 负责模块的注册、安装、枚举和移除。每个管理器实例独占一个注册表；
//! 多个线程可共享同一实例并发调用，读写纪律为"多读单写"：任意数量的
//! `list` 快照可以并行，写操作与一切读写互斥，且互斥区只覆盖短暂的
//! 注册表变更，网络抓取始终在互斥区之外完成。

use crate::config::ManagerConfig;
use crate::error::{ModulithError, Result};
use crate::fetcher::{HttpFetcher, ModuleFetcher};
use crate::registry::ModuleRegistry;
use crate::types::{ModuleEvent, ModuleName, ModuleRecord};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// 宿主引擎回调接口
///
/// 管理器对宿主的唯一职责是维护准确的注册表；把一条已安装记录变成
/// 真正加载的能力是宿主的事。回调在互斥区之外触发，缓慢的宿主不会
/// 阻塞其他读写。
pub trait ModuleHost: Send + Sync {
    /// 处理模块生命周期事件
    fn on_module_event(&self, event: ModuleEvent);
}

/// 模块生命周期管理器
pub struct ModuleManager {
    /// 本实例独占的注册表
    registry: RwLock<ModuleRegistry>,
    /// 制品抓取器
    fetcher: Arc<dyn ModuleFetcher>,
    /// 宿主回调
    host: RwLock<Option<Arc<dyn ModuleHost>>>,
    /// 管理器配置
    config: ManagerConfig,
}

impl ModuleManager {
    /// 使用默认 HTTP 抓取器创建管理器
    pub fn new(config: ManagerConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(&config));
        Self::with_fetcher(config, fetcher)
    }

    /// 使用自定义抓取器创建管理器
    pub fn with_fetcher(config: ManagerConfig, fetcher: Arc<dyn ModuleFetcher>) -> Self {
        Self {
            registry: RwLock::new(ModuleRegistry::new()),
            fetcher,
            host: RwLock::new(None),
            config,
        }
    }

    /// 挂接宿主回调
    pub fn set_host(&self, host: Arc<dyn ModuleHost>) {
        *self.host.write() = Some(host);
    }

    /// 低级注册：不经抓取直接登记名称
    ///
    /// 用于内嵌或已预置的模块；重名与空名规则与 `install` 一致。
    pub fn add(&self, name: &str) -> Result<()> {
        validate_name(name)?;

        let record = ModuleRecord::new(name, "", 0);
        self.insert_record(record.clone())?;

        info!("Module '{}' registered successfully", name);
        self.publish(ModuleEvent::Installed(record));
        Ok(())
    }

    /// 安装模块：抓取远程制品，成功后插入注册表
    ///
    /// 任一失败路径（空名、重名、抓取失败）都保持注册表原封不动，
    /// 不产生部分或墓碑记录；不做任何自动重试。
    pub fn install(&self, name: &str, source_url: &str) -> Result<()> {
        validate_name(name)?;

        // 抓取前的快速重名检查，省掉一次注定无用的传输；
        // 并发竞争最终由插入步骤的重名拒绝裁决
        if self.registry.read().contains(name) {
            warn!("Module '{}' is already installed, skipping fetch", name);
            return Err(ModulithError::DuplicateModule {
                name: name.to_string(),
            });
        }

        // 阻塞抓取在互斥区之外进行
        let artifact = self.fetcher.fetch(source_url)?;

        let record = ModuleRecord::new(name, source_url, artifact.bytes.len() as u64);
        self.insert_record(record.clone())?;

        info!(
            "Module '{}' installed successfully from {} ({} bytes)",
            name, source_url, record.size_bytes
        );
        self.publish(ModuleEvent::Installed(record));
        Ok(())
    }

    /// 移除模块
    ///
    /// 名称不存在时失败且注册表不变；移除一个模块对其余记录没有
    /// 任何连带影响。
    pub fn remove(&self, name: &str) -> Result<()> {
        let removed = {
            let mut registry = self.registry.write();
            registry.remove(name)
        };

        match removed {
            Some(record) => {
                info!("Module '{}' removed successfully", record.name);
                self.publish(ModuleEvent::Removed(record.name));
                Ok(())
            }
            None => Err(ModulithError::ModuleNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// 按插入顺序返回当前全部模块名称快照
    ///
    /// 空注册表返回合法的空序列，而非空指针语义。
    pub fn list(&self) -> Vec<ModuleName> {
        self.registry.read().names()
    }

    /// 查询单条模块记录
    pub fn get(&self, name: &str) -> Option<ModuleRecord> {
        self.registry.read().get(name).cloned()
    }

    /// 已安装模块数量
    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    /// 互斥区内的插入步骤：容量检查 + 重名裁决
    fn insert_record(&self, record: ModuleRecord) -> Result<()> {
        let mut registry = self.registry.write();
        if registry.len() >= self.config.max_modules {
            return Err(ModulithError::internal("Maximum number of modules reached"));
        }
        if !registry.insert(record.clone()) {
            warn!("Module '{}' is already installed", record.name);
            return Err(ModulithError::DuplicateModule { name: record.name });
        }
        Ok(())
    }

    /// 在互斥区外发布宿主事件
    fn publish(&self, event: ModuleEvent) {
        let host = self.host.read().clone();
        if let Some(host) = host {
            host.on_module_event(event);
        }
    }
}

/// 名称校验：必须非空
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ModulithError::invalid_argument("module name must not be empty"));
    }
    Ok(())
}
