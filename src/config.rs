//! Modulith 配置管理
//!
//! 管理器行为的可配置项：抓取超时、制品验证深度、容量上限

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 制品验证级别
///
/// 边界契约只要求传输成功；更深的内容验证由实现方配置决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationLevel {
    /// 仅要求传输成功
    TransferOnly,
    /// 额外拒绝空制品
    RequireNonEmpty,
}

/// 管理器配置
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// 抓取超时时间（实现本地配置，非边界契约）
    pub fetch_timeout: Duration,
    /// 制品验证级别
    pub validation: ValidationLevel,
    /// 最大模块数量
    pub max_modules: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            validation: ValidationLevel::TransferOnly,
            max_modules: 1000,
        }
    }
}
