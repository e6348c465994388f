// HTTP server - Serves the resolved log file

use crate::config::ServerConfig;
use crate::error::{LogFileError, Result};
use crate::http::range::{parse_range, ByteRange};
use crate::logs::{LogFileResolver, LogFileResource};
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::io::SeekFrom;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::net::TcpListener;
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info};

/// Build the router exposing the log file at `endpoint_path`
pub fn router(resolver: Arc<LogFileResolver>, endpoint_path: &str) -> Router {
    Router::new()
        .route(endpoint_path, get(log_file_handler))
        .with_state(resolver)
}

async fn log_file_handler(
    State(resolver): State<Arc<LogFileResolver>>,
    headers: HeaderMap,
) -> Response {
    let resource = match resolver.resolve() {
        Some(resource) => resource,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    let range = headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok());

    match log_file_response(&resource, range).await {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to serve {}: {}", resource.path().display(), e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn log_file_response(resource: &LogFileResource, range: Option<&str>) -> Result<Response> {
    let content_type = resource.content_type().to_string();

    // Range and length are both taken from the handle that gets streamed
    let (mut file, len) = resource.open_with_len().await?;
    let range = range.and_then(|value| parse_range(value, len));

    let response = match range {
        None => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, content_type),
                (header::ACCEPT_RANGES, "bytes".to_string()),
                (header::CONTENT_LENGTH, len.to_string()),
            ],
            Body::from_stream(ReaderStream::new(file.take(len))),
        )
            .into_response(),
        Some(ByteRange::Satisfiable { start, end }) => {
            debug!("Serving bytes {}-{} of {}", start, end, resource.path().display());
            file.seek(SeekFrom::Start(start)).await?;
            let count = end - start + 1;
            (
                StatusCode::PARTIAL_CONTENT,
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                    (header::CONTENT_LENGTH, count.to_string()),
                    (header::CONTENT_RANGE, format!("bytes {}-{}/{}", start, end, len)),
                ],
                Body::from_stream(ReaderStream::new(file.take(count))),
            )
                .into_response()
        }
        Some(ByteRange::Unsatisfiable) => (
            StatusCode::RANGE_NOT_SATISFIABLE,
            [(header::CONTENT_RANGE, format!("bytes */{}", len))],
        )
            .into_response(),
    };

    Ok(response)
}

/// HTTP server exposing a single log file endpoint
pub struct LogFileServer {
    config: ServerConfig,
    resolver: Arc<LogFileResolver>,
}

impl LogFileServer {
    pub fn new(config: ServerConfig, resolver: Arc<LogFileResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn router(&self) -> Router {
        router(Arc::clone(&self.resolver), &self.config.endpoint_path)
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr: SocketAddr = self.config.bind_addr()?;
        TcpListener::bind(addr)
            .await
            .map_err(|e| LogFileError::ServerError(format!("Failed to bind {}: {}", addr, e)))
    }

    /// Bind and serve until `shutdown` completes
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` completes
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        info!(
            "Serving log file at http://{}{}",
            local_addr, self.config.endpoint_path
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| LogFileError::ServerError(format!("Server failed: {}", e)))?;

        info!("Log file server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapPropertySource, LOGGING_FILE_NAME};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_full_response_headers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        std::fs::write(&path, "--TEST--").unwrap();

        let properties = Arc::new(MapPropertySource::new("test"));
        properties.set_property(LOGGING_FILE_NAME, path.to_string_lossy());
        let resource = LogFileResolver::new(properties).resolve().unwrap();

        let response = log_file_response(&resource, None).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.headers().get(header::ACCEPT_RANGES).unwrap(), "bytes");
        assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "8");
    }

    #[tokio::test]
    async fn test_range_checked_against_truncated_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        std::fs::write(&path, "--TEST--").unwrap();

        let resource = LogFileResolver::with_external_file(
            Arc::new(MapPropertySource::new("test")),
            &path,
        )
        .resolve()
        .unwrap();

        // Rotated down to two bytes after resolution
        std::fs::write(&path, "ab").unwrap();

        let response = log_file_response(&resource, Some("bytes=4-7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(
            response.headers().get(header::CONTENT_RANGE).unwrap(),
            "bytes */2"
        );

        let response = log_file_response(&resource, Some("bytes=1-7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(
            response.headers().get(header::CONTENT_RANGE).unwrap(),
            "bytes 1-1/2"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"b");
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_address() {
        let properties = Arc::new(MapPropertySource::new("test"));
        let config = ServerConfig {
            bind: "nowhere".to_string(),
            ..ServerConfig::default()
        };
        let server = LogFileServer::new(config, Arc::new(LogFileResolver::new(properties)));

        assert!(matches!(
            server.bind().await,
            Err(LogFileError::ConfigValidationError(_))
        ));
    }
}
