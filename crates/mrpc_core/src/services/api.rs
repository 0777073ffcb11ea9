//! Remote collaborators: the asset-listing API and the upload endpoint.

use crate::config::AppConfig;
use crate::error::MrpcError;
use crate::models::{IconRecord, UploadRequest, UploadResponse};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

/// User agent sent with every request.
const USER_AGENT: &str = concat!("mrpc/", env!("CARGO_PKG_VERSION"));

/// Access to the remote icon services.
///
/// Implemented over HTTP by [`HttpIconApi`]; tests substitute scripted fakes.
#[async_trait]
pub trait IconApi: Send + Sync {
    /// Fetch the icons currently registered for the application.
    async fn list_icons(&self) -> Result<Vec<IconRecord>, MrpcError>;

    /// Submit a new icon and return the raw response.
    ///
    /// Errors only on transport failure; any status code is returned as-is.
    async fn upload_icon(&self, request: &UploadRequest) -> Result<UploadResponse, MrpcError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}

/// [`IconApi`] over HTTP with reqwest.
pub struct HttpIconApi {
    client: reqwest::Client,
    listing_url: String,
    upload_url: String,
}

impl HttpIconApi {
    /// Create a client for the endpoints in `config`.
    pub fn new(config: &AppConfig) -> Result<Self, MrpcError> {
        Self::with_builder(config, reqwest::Client::builder())
    }

    /// Create a client from a preconfigured reqwest builder.
    fn with_builder(
        config: &AppConfig,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, MrpcError> {
        let client = builder
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MrpcError::http_with_source("Failed to build HTTP client", e))?;

        Ok(Self { client, listing_url: config.listing_url(), upload_url: config.upload_url.clone() })
    }

    /// Listing endpoint URL.
    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    /// Upload endpoint URL.
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

#[async_trait]
impl IconApi for HttpIconApi {
    async fn list_icons(&self) -> Result<Vec<IconRecord>, MrpcError> {
        tracing::debug!(url = %self.listing_url, "Requesting icon listing");

        let response = self.client.get(&self.listing_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Icon listing request rejected");
            return Err(MrpcError::status(status.as_u16(), "Icon listing request failed"));
        }

        let body = response.bytes().await?;
        let icons: Vec<IconRecord> = serde_json::from_slice(&body)?;

        tracing::debug!(count = icons.len(), "Icon listing received");
        Ok(icons)
    }

    async fn upload_icon(&self, request: &UploadRequest) -> Result<UploadResponse, MrpcError> {
        tracing::debug!(
            url = %self.upload_url,
            name = %request.name,
            image_len = request.image.len(),
            "Submitting icon"
        );

        let response = self
            .client
            .post(&self.upload_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, body_len = body.len(), "Upload response received");
        Ok(UploadResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Request as seen by the local server.
    struct Received {
        request_line: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    }

    impl Received {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        }
    }

    /// Accept one connection, answer it with `status` and `body`, and hand
    /// back what the client sent. Returns the server base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Received>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            let head_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
            let mut lines = head.split("\r\n").filter(|line| !line.is_empty());
            let request_line = lines.next().unwrap_or_default().to_string();
            let headers: Vec<(String, String)> = lines
                .filter_map(|line| line.split_once(':'))
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .collect();

            let content_length = headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < head_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before body");
                buf.extend_from_slice(&chunk[..n]);
            }
            let received_body = buf[head_end..head_end + content_length].to_vec();

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            Received { request_line, headers, body: received_body }
        });

        (base, server)
    }

    fn local_api(base: &str) -> HttpIconApi {
        let config = AppConfig::new("1234")
            .unwrap()
            .with_api_base(format!("{base}/api"))
            .with_upload_url(format!("{base}/upload"));
        HttpIconApi::with_builder(&config, reqwest::Client::builder().no_proxy()).unwrap()
    }

    #[test]
    fn test_http_api_urls() {
        let config = AppConfig::new("1234")
            .unwrap()
            .with_api_base("http://127.0.0.1:9/api/")
            .with_upload_url("http://127.0.0.1:9/upload");
        let api = HttpIconApi::new(&config).unwrap();

        assert_eq!(api.listing_url(), "http://127.0.0.1:9/api/oauth2/applications/1234/assets");
        assert_eq!(api.upload_url(), "http://127.0.0.1:9/upload");
        assert_eq!(api.name(), "http");
    }

    #[tokio::test]
    async fn test_listing_is_plain_get() {
        let (base, server) =
            serve_once("200 OK", r#"[{"id":"111","name":"first","type":1},{"id":"222","name":"second"}]"#)
                .await;
        let api = local_api(&base);

        let icons = api.list_icons().await.unwrap();
        let received = server.await.unwrap();

        assert_eq!(received.request_line, "GET /api/oauth2/applications/1234/assets HTTP/1.1");
        assert!(received.body.is_empty());
        assert_eq!(received.header("authorization"), None);
        assert_eq!(received.header("user-agent"), Some(USER_AGENT));

        let ids: Vec<&str> = icons.iter().map(|icon| icon.id.as_str()).collect();
        assert_eq!(ids, ["111", "222"]);
        assert_eq!(icons[0].kind.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_listing_error_status() {
        let (base, server) = serve_once("503 Service Unavailable", "{}").await;
        let api = local_api(&base);

        let err = api.list_icons().await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.category(), "Server");
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_listing_malformed_body() {
        let (base, server) = serve_once("200 OK", r#"{"not":"a list"}"#).await;
        let api = local_api(&base);

        let err = api.list_icons().await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.category(), "Response");
        assert_eq!(err.status_code(), None);
    }

    #[tokio::test]
    async fn test_upload_posts_json_body() {
        let (base, server) = serve_once("200 OK", r#"{"id":"abc123","name":"Logo","type":"1"}"#).await;
        let api = local_api(&base);
        let request = UploadRequest::new("data:image/png;base64,iVBORw==", "Logo");

        let response = api.upload_icon(&request).await.unwrap();
        let received = server.await.unwrap();

        assert_eq!(received.request_line, "POST /upload HTTP/1.1");
        assert_eq!(received.header("content-type"), Some("application/json"));
        assert_eq!(received.header("accept"), Some("application/json"));
        assert_eq!(
            received.headers.iter().filter(|(k, _)| k.eq_ignore_ascii_case("content-type")).count(),
            1
        );

        let sent: serde_json::Value = serde_json::from_slice(&received.body).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({"image": "data:image/png;base64,iVBORw==", "name": "Logo", "type": "1"})
        );

        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"id":"abc123","name":"Logo","type":"1"}"#.to_vec());
    }

    #[tokio::test]
    async fn test_upload_error_status_is_returned() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let api = local_api(&base);
        let request = UploadRequest::new("data:image/png;base64,AAAA", "icon");

        let response = api.upload_icon(&request).await.unwrap();
        server.await.unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.body, br#"{"error":"boom"}"#.to_vec());
    }

    #[tokio::test]
    async fn test_unreachable_listing_is_http_error() {
        // Port 9 (discard) is not expected to accept connections
        let config = AppConfig::new("1234").unwrap().with_api_base("http://127.0.0.1:9");
        let api = HttpIconApi::with_builder(&config, reqwest::Client::builder().no_proxy()).unwrap();

        let err = api.list_icons().await.unwrap_err();
        assert_eq!(err.category(), "Network");
    }
}
