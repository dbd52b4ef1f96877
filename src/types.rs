//! Modulith 核心类型定义
//!
//! 模块记录、标识符和生命周期事件的统一类型

use serde::{Deserialize, Serialize};

/// 纳秒级时间戳
pub type TimestampNs = i64;

/// 模块标识符（注册表内唯一）
pub type ModuleName = String;

/// 获取当前纳秒时间戳
pub fn now_ns() -> TimestampNs {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0)
}

/// 已安装模块记录
///
/// 记录一旦插入注册表即不可变；更新只能通过"移除后重装"完成，
/// 不存在部分更新的状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// 模块名称（唯一键）
    pub name: ModuleName,
    /// 模块来源地址
    pub source_url: String,
    /// 安装时间
    pub installed_at: TimestampNs,
    /// 抓取到的制品大小（字节，低级注册为0）
    pub size_bytes: u64,
}

impl ModuleRecord {
    /// 创建新的模块记录
    pub fn new(name: &str, source_url: &str, size_bytes: u64) -> Self {
        Self {
            name: name.to_string(),
            source_url: source_url.to_string(),
            installed_at: now_ns(),
            size_bytes,
        }
    }
}

/// 模块生命周期事件
///
/// 通过宿主回调发布；管理器对宿主引擎的唯一职责是维护准确的注册表，
/// 激活已安装模块由宿主完成。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleEvent {
    /// 模块已安装
    Installed(ModuleRecord),
    /// 模块已移除
    Removed(ModuleName),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = ModuleRecord::new("vector", "https://modules.example.com/vector", 2048);
        assert_eq!(record.name, "vector");
        assert_eq!(record.source_url, "https://modules.example.com/vector");
        assert_eq!(record.size_bytes, 2048);
        assert!(record.installed_at > 0);
    }

    #[test]
    fn test_record_serialization() {
        let record = ModuleRecord::new("search", "https://modules.example.com/search", 0);
        let json = serde_json::to_string(&record).unwrap();
        let decoded: ModuleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
    }
}
