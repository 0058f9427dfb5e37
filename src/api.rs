//! Remote source of the mapping tree.
//!
//! The store only knows the [`MappingSource`] trait; the app wires in
//! [`HttpMappingSource`], tests wire in stubs or a local axum server.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::state::data::MappingNode;

/// Path of the mapping listing on the index server
pub const MAPPINGS_PATH: &str = "/main/mappings";

#[async_trait]
pub trait MappingSource: Send + Sync {
    /// Fetch the current top-level mapping list (without the synthetic root).
    async fn fetch_mappings(&self) -> Result<Vec<MappingNode>, FetchError>;
}

/// `GET {base_url}/main/mappings` over reqwest.
#[derive(Debug, Clone)]
pub struct HttpMappingSource {
    client: reqwest::Client,
    url: String,
}

impl HttpMappingSource {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: mappings_url(base_url),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MappingSource for HttpMappingSource {
    async fn fetch_mappings(&self) -> Result<Vec<MappingNode>, FetchError> {
        debug!("GET {}", self.url);
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Mapping fetch answered {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        // Read the body first so a bad payload is reported as Decode,
        // not as a transport failure. A user with no mappings gets `null`.
        let body = resp.bytes().await?;
        serde_json::from_slice::<Option<Vec<MappingNode>>>(&body)
            .map(Option::unwrap_or_default)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Shared HTTP client for every outbound request.
pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

/// Join the configured base URL with [`MAPPINGS_PATH`].
pub fn mappings_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), MAPPINGS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_mappings_url() {
        assert_eq!(
            mappings_url("http://localhost:9876"),
            "http://localhost:9876/main/mappings"
        );
        assert_eq!(
            mappings_url("http://localhost:9876/"),
            "http://localhost:9876/main/mappings"
        );
    }

    #[tokio::test]
    async fn test_fetch_decodes_tree() {
        let app = Router::new().route(
            MAPPINGS_PATH,
            get(|| async {
                r#"[{"id":"1","text":"a","path":"/a","children":[
                    {"id":"9","text":"informe1.pdf","path":"/a/informe1.pdf","children":[]}
                ]}]"#
            }),
        );
        let base = serve(app).await;
        let source = HttpMappingSource::new(reqwest::Client::new(), &base);

        let nodes = source.fetch_mappings().await.unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "1");
        assert_eq!(nodes[0].children[0].path, "/a/informe1.pdf");
    }

    #[tokio::test]
    async fn test_fetch_accepts_index_server_shape() {
        let app = Router::new().route(
            MAPPINGS_PATH,
            get(|| async {
                r#"[{"id":"1","text":"docs","type":"folder","children":[
                    {"id":"2","text":"informe1.pdf","type":"file","children":null}
                ]}]"#
            }),
        );
        let base = serve(app).await;
        let source = HttpMappingSource::new(reqwest::Client::new(), &base);

        let nodes = source.fetch_mappings().await.unwrap();

        assert_eq!(nodes[0].text, "docs");
        assert!(nodes[0].path.is_empty());
        assert_eq!(nodes[0].children[0].text, "informe1.pdf");
        assert!(nodes[0].children[0].children.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_null_body_is_empty_list() {
        let app = Router::new().route(MAPPINGS_PATH, get(|| async { "null" }));
        let base = serve(app).await;
        let source = HttpMappingSource::new(reqwest::Client::new(), &base);

        assert_eq!(source.fetch_mappings().await, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_fetch_reports_status() {
        let app = Router::new().route(
            MAPPINGS_PATH,
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let base = serve(app).await;
        let source = HttpMappingSource::new(reqwest::Client::new(), &base);

        assert_eq!(
            source.fetch_mappings().await,
            Err(FetchError::Status(503))
        );
    }

    #[tokio::test]
    async fn test_fetch_reports_malformed_body() {
        let app = Router::new().route(MAPPINGS_PATH, get(|| async { r#"{"id":"1"}"# }));
        let base = serve(app).await;
        let source = HttpMappingSource::new(reqwest::Client::new(), &base);

        assert!(matches!(
            source.fetch_mappings().await,
            Err(FetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_reports_unreachable_server() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpMappingSource::new(reqwest::Client::new(), &format!("http://{}", addr));

        assert!(matches!(
            source.fetch_mappings().await,
            Err(FetchError::Request(_))
        ));
    }
}
