//! Modulith - 内存数据存储的运行时模块管理器
//!
//! 让内存数据存储在不重新编译引擎的前提下，于运行时装载外部来源的
//! 功能模块（例如向量索引扩展）。
//!
//! # 组件分层
//!
//! - **注册表**: 已安装模块记录的权威内存集合，迭代顺序即插入顺序
//! - **生命周期管理器**: 通过不透明句柄独占一个注册表实例
//! - **安装器**: 阻塞抓取远程制品，成功后插入注册表
//! - **枚举器/移除器**: 边界安全的快照与原子删除
//! - **C 边界**: 稳定的 create/destroy/add/remove/list/free/install 契约
//!
//! # 特性
//!
//! - **失败隔离**: 任何失败路径都不会在注册表中留下部分记录
//! - **多读单写**: 并发 `list` 互不阻塞，写互斥区只覆盖短暂的变更步骤
//! - **抓取不持锁**: 缓慢的远端永远不会拖住无关读写
//! - **边界不展开**: 失败只通过布尔值或空指针报告

pub mod types;
pub mod error;
pub mod config;
pub mod registry;
pub mod fetcher;
pub mod manager;
pub mod ffi;

// 重新导出核心类型
pub use types::*;
pub use error::*;
pub use config::*;
pub use registry::ModuleRegistry;
pub use fetcher::{FetchedArtifact, HttpFetcher, ModuleFetcher};
pub use manager::{ModuleHost, ModuleManager};

/// 框架信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const FRAMEWORK_NAME: &str = "Modulith";
