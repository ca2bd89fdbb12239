//! Blog service client.
//!
//! A thin wrapper over the REST endpoints. There is no retry or backoff:
//! every call either returns the decoded body or an [`ApiError`].

mod error;

pub use error::{ApiError, Operation};

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::post::{Draft, Post, PostId};

/// Base URL used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// HTTP client for the blog service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for `base_url` (a trailing `/` is ignored).
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Config(err.to_string()))?;
        Ok(Self {
            base_url: normalize_base_url(base_url),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /blogs`
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let op = Operation::ListPosts;
        let response = self
            .http
            .get(self.endpoint("/blogs"))
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(op, &err))?;
        decode(op, response).await
    }

    /// `GET /blogs/{id}`
    pub async fn get_post(&self, id: PostId) -> Result<Post, ApiError> {
        let op = Operation::GetPost;
        let response = self
            .http
            .get(self.endpoint(&format!("/blogs/{id}")))
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(op, &err))?;
        decode(op, response).await
    }

    /// `POST /upload` with the file in multipart field `image`; returns the URL.
    pub async fn upload_image(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let op = Operation::UploadImage;
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|err| ApiError::from_reqwest(op, &err))?;
        let form = Form::new().part("image", part);
        let response = self
            .http
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(op, &err))?;
        let body: UploadResponse = decode(op, response).await?;
        Ok(body.url)
    }

    /// `POST /blogs/save-draft` (creates, or updates when the draft has an id).
    pub async fn save_draft(&self, draft: &Draft) -> Result<Post, ApiError> {
        self.post_draft(Operation::SaveDraft, "/blogs/save-draft", draft)
            .await
    }

    /// `POST /blogs/publish` (creates, or updates when the draft has an id).
    pub async fn publish(&self, draft: &Draft) -> Result<Post, ApiError> {
        self.post_draft(Operation::Publish, "/blogs/publish", draft)
            .await
    }

    /// `DELETE /blogs/{id}`. The confirmation body is not interpreted.
    pub async fn delete_post(&self, id: PostId) -> Result<(), ApiError> {
        let op = Operation::Delete;
        let response = self
            .http
            .delete(self.endpoint(&format!("/blogs/{id}")))
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(op, &err))?;
        ensure_success(op, response.status())?;
        Ok(())
    }

    async fn post_draft(&self, op: Operation, path: &str, draft: &Draft) -> Result<Post, ApiError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(draft)
            .send()
            .await
            .map_err(|err| ApiError::from_reqwest(op, &err))?;
        decode(op, response).await
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn ensure_success(operation: Operation, status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::RequestFailed {
            operation,
            status: status.as_u16(),
        })
    }
}

async fn decode<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T, ApiError> {
    ensure_success(operation, response.status())?;
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ApiError::from_reqwest(operation, &err))?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode {
        operation,
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const POST_JSON: &str = r#"{"id":7,"title":"Hello","content":"Body","tags":["rust"],"status":"draft","image_url":null,"created_at":"2024-03-04T10:15:30","updated_at":null}"#;

    /// One HTTP request as the server saw it.
    struct Captured {
        request_line: String,
        head: String,
        body: Vec<u8>,
    }

    impl Captured {
        fn json(&self) -> serde_json::Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    /// Serve a single canned response on a local port. Returns the base URL
    /// and a handle yielding the request that arrived.
    async fn serve_once(status: &'static str, body: &str) -> (String, JoinHandle<Captured>) {
        let body = body.to_string();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the request head");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            while buf.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the request body");
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            Captured {
                request_line: head.lines().next().unwrap_or_default().to_string(),
                head: head.to_ascii_lowercase(),
                body: buf[header_end..header_end + content_length].to_vec(),
            }
        });
        (base_url, handle)
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    fn draft(id: Option<i64>) -> Draft {
        Draft {
            id: id.map(PostId::new),
            title: "Hello".to_string(),
            body: "Body".to_string(),
            tags: vec!["rust".to_string()],
            ..Draft::default()
        }
    }

    #[tokio::test]
    async fn test_list_posts_gets_blogs() {
        let (base, server) = serve_once("200 OK", &format!("[{POST_JSON}]")).await;
        let posts = client(&base).list_posts().await.unwrap();
        let request = server.await.unwrap();
        assert_eq!(request.request_line, "GET /api/blogs HTTP/1.1");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, PostId::new(7));
        assert_eq!(posts[0].body, "Body");
    }

    #[tokio::test]
    async fn test_get_post_gets_by_id() {
        let (base, server) = serve_once("200 OK", POST_JSON).await;
        let post = client(&base).get_post(PostId::new(7)).await.unwrap();
        assert_eq!(server.await.unwrap().request_line, "GET /api/blogs/7 HTTP/1.1");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.tags, vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_save_draft_posts_json_without_id_for_new_post() {
        let (base, server) = serve_once("200 OK", POST_JSON).await;
        let saved = client(&base).save_draft(&draft(None)).await.unwrap();
        let request = server.await.unwrap();
        assert_eq!(request.request_line, "POST /api/blogs/save-draft HTTP/1.1");
        assert!(request.head.contains("content-type: application/json"));
        let json = request.json();
        assert!(json.get("id").is_none());
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["content"], "Body");
        assert_eq!(json["tags"], serde_json::json!(["rust"]));
        assert_eq!(json["status"], "draft");
        assert!(json.get("created_at").is_none());
        assert_eq!(saved.id, PostId::new(7));
    }

    #[tokio::test]
    async fn test_publish_posts_json_with_existing_id() {
        let (base, server) = serve_once("200 OK", POST_JSON).await;
        client(&base).publish(&draft(Some(4))).await.unwrap();
        let request = server.await.unwrap();
        assert_eq!(request.request_line, "POST /api/blogs/publish HTTP/1.1");
        assert_eq!(request.json()["id"], 4);
    }

    #[tokio::test]
    async fn test_upload_image_sends_multipart_image_field() {
        let (base, server) = serve_once("200 OK", r#"{"url":"http://cdn.test/cover.png"}"#).await;
        let url = client(&base)
            .upload_image("cover.png", "image/png", b"PNGDATA".to_vec())
            .await
            .unwrap();
        let request = server.await.unwrap();
        assert_eq!(request.request_line, "POST /api/upload HTTP/1.1");
        assert!(request.head.contains("content-type: multipart/form-data"));
        let body = String::from_utf8_lossy(&request.body).to_ascii_lowercase();
        assert!(body.contains(r#"name="image""#));
        assert!(body.contains(r#"filename="cover.png""#));
        assert!(body.contains("content-type: image/png"));
        assert!(body.contains("pngdata"));
        assert_eq!(url, "http://cdn.test/cover.png");
    }

    #[tokio::test]
    async fn test_delete_ignores_confirmation_body() {
        let (base, server) = serve_once("200 OK", r#"{"message":"Blog deleted"}"#).await;
        client(&base).delete_post(PostId::new(9)).await.unwrap();
        assert_eq!(server.await.unwrap().request_line, "DELETE /api/blogs/9 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_status_from_server_is_request_failed() {
        let (base, server) = serve_once("404 Not Found", r#"{"error":"Blog not found"}"#).await;
        let err = client(&base).get_post(PostId::new(3)).await.unwrap_err();
        server.await.unwrap();
        assert_eq!(
            err,
            ApiError::RequestFailed {
                operation: Operation::GetPost,
                status: 404
            }
        );

        let (base, server) = serve_once("500 Internal Server Error", "{}").await;
        let err = client(&base).save_draft(&draft(None)).await.unwrap_err();
        server.await.unwrap();
        assert_eq!(
            err,
            ApiError::RequestFailed {
                operation: Operation::SaveDraft,
                status: 500
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", "not json").await;
        let err = client(&base).list_posts().await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(
            err,
            ApiError::Decode {
                operation: Operation::ListPosts,
                ..
            }
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_ignored() {
        let client = ApiClient::new("http://example.test/api/ ", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://example.test/api");
        assert_eq!(
            client.endpoint("/blogs/save-draft"),
            "http://example.test/api/blogs/save-draft"
        );
    }

    #[test]
    fn test_non_success_status_is_generic_failure() {
        let err = ensure_success(Operation::Delete, StatusCode::NOT_FOUND).unwrap_err();
        assert_eq!(
            err,
            ApiError::RequestFailed {
                operation: Operation::Delete,
                status: 404
            }
        );
        assert!(ensure_success(Operation::Delete, StatusCode::OK).is_ok());
        assert!(ensure_success(Operation::Delete, StatusCode::NO_CONTENT).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is almost never listening.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.list_posts().await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::ListPosts));
        assert!(!matches!(err, ApiError::RequestFailed { .. }));
    }
}
