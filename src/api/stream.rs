use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    body::{Body, Bytes},
    http::{header, StatusCode},
    response::Response,
};
use futures::Stream;
use tempfile::TempPath;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::errors::DashboardError;

/// Streams a file and deletes it once the body is dropped, whether the
/// response was fully sent or the client went away.
pub struct DeleteOnDrop {
    inner: ReaderStream<File>,
    _path: TempPath,
}

impl DeleteOnDrop {
    pub fn new(file: File, path: TempPath) -> Self {
        Self {
            inner: ReaderStream::new(file),
            _path: path,
        }
    }
}

impl Stream for DeleteOnDrop {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}

/// Attachment header value with quotes stripped from the name.
pub fn attachment(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", file_name.replace('"', "_"))
}

/// Open `path` and build a streaming 200 response.
pub async fn file_response(
    path: &Path,
    content_type: &str,
    download_name: Option<&str>,
) -> Result<Response, DashboardError> {
    let file = match File::open(path).await {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DashboardError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    let len = file.metadata().await.ok().map(|m| m.len());

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(len) = len {
        builder = builder.header(header::CONTENT_LENGTH, len);
    }
    if let Some(name) = download_name {
        builder = builder.header(header::CONTENT_DISPOSITION, attachment(name));
    }

    builder
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| DashboardError::Internal(format!("Failed to build response: {}", e)))
}
