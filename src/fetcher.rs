//! 模块制品抓取
//!
//! 从远程来源抓取模块制品的阻塞实现。抓取是 `install` 中唯一的阻塞网络
//! 操作，必须在进入注册表互斥区之前完成，避免缓慢的远端拖住无关读写。

use crate::config::{ManagerConfig, ValidationLevel};
use crate::error::{ModulithError, Result};
use std::io::Read;
use tracing::{debug, warn};

/// 抓取到的模块制品
///
/// 传输成功即视为通过边界契约的验证；更深的内容检查由
/// [`ValidationLevel`] 配置。
#[derive(Debug, Clone)]
pub struct FetchedArtifact {
    /// 来源地址
    pub source_url: String,
    /// 制品内容
    pub bytes: Vec<u8>,
}

/// 模块抓取器接口
///
/// 以 trait 作为安装器与传输层之间的接缝，便于宿主替换传输实现。
/// 不含任何重试/退避策略，由调用方自行决定。
#[cfg_attr(test, mockall::automock)]
pub trait ModuleFetcher: Send + Sync {
    /// 阻塞抓取一个模块制品
    fn fetch(&self, url: &str) -> Result<FetchedArtifact>;
}

/// 基于 HTTP 的阻塞抓取器
pub struct HttpFetcher {
    /// 复用连接的 HTTP agent
    agent: ureq::Agent,
    /// 制品验证级别
    validation: ValidationLevel,
}

impl HttpFetcher {
    /// 根据管理器配置创建抓取器
    pub fn new(config: &ManagerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.fetch_timeout)
            .build();
        Self {
            agent,
            validation: config.validation,
        }
    }

    /// 按配置的级别验证制品
    fn validate(&self, artifact: &FetchedArtifact) -> Result<()> {
        match self.validation {
            ValidationLevel::TransferOnly => Ok(()),
            ValidationLevel::RequireNonEmpty => {
                if artifact.bytes.is_empty() {
                    Err(ModulithError::validation(&format!(
                        "empty artifact from '{}'",
                        artifact.source_url
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl ModuleFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedArtifact> {
        debug!("Fetching module artifact from {}", url);

        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => {
                warn!("Fetch of {} failed with HTTP status {}", url, code);
                ModulithError::fetch(&format!("HTTP status {} from '{}'", code, url))
            }
            ureq::Error::Transport(transport) => {
                warn!("Fetch of {} failed: {}", url, transport);
                ModulithError::fetch(&format!("transport error for '{}': {}", url, transport))
            }
        })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| ModulithError::fetch(&format!("read error for '{}': {}", url, e)))?;

        let artifact = FetchedArtifact {
            source_url: url.to_string(),
            bytes,
        };
        self.validate(&artifact)?;

        debug!("Fetched {} bytes from {}", artifact.bytes.len(), url);
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_with(validation: ValidationLevel) -> HttpFetcher {
        let config = ManagerConfig {
            validation,
            ..ManagerConfig::default()
        };
        HttpFetcher::new(&config)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/modules/vector"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"artifact-bytes".to_vec()))
            .mount(&mock_server)
            .await;

        let url = format!("{}/modules/vector", mock_server.uri());
        let artifact = fetcher_with(ValidationLevel::TransferOnly)
            .fetch(&url)
            .unwrap();

        assert_eq!(artifact.bytes, b"artifact-bytes");
        assert_eq!(artifact.source_url, url);
    }

    #[tokio::test]
    async fn test_fetch_404_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/modules/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let url = format!("{}/modules/missing", mock_server.uri());
        let result = fetcher_with(ValidationLevel::TransferOnly).fetch(&url);

        assert!(matches!(result, Err(ModulithError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_fetch_500_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/modules/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let url = format!("{}/modules/broken", mock_server.uri());
        let result = fetcher_with(ValidationLevel::TransferOnly).fetch(&url);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("500"));
    }

    #[test]
    fn test_fetch_unreachable_host() {
        // 端口1上没有监听者，连接立即被拒绝
        let result = fetcher_with(ValidationLevel::TransferOnly).fetch("http://127.0.0.1:1/m");
        assert!(matches!(result, Err(ModulithError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_empty_artifact_rejected_when_configured() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/modules/empty"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(Vec::new()))
            .mount(&mock_server)
            .await;

        let url = format!("{}/modules/empty", mock_server.uri());

        // 默认级别只要求传输成功
        assert!(fetcher_with(ValidationLevel::TransferOnly).fetch(&url).is_ok());

        let result = fetcher_with(ValidationLevel::RequireNonEmpty).fetch(&url);
        assert!(matches!(result, Err(ModulithError::Validation { .. })));
    }
}
