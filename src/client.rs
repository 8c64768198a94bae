use crate::pager::{DomainError, PageRequest};
use crate::Args;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Failed to read data source: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse data source: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] DomainError),
}

/// Serves pages out of a JSON document, like an endpoint taking `page` and
/// `pageLength` parameters would.
#[derive(Clone)]
pub struct Client {
    args: Arc<Args>,
}

impl Client {
    pub fn new(args: Args) -> Self {
        Self {
            args: Arc::new(args),
        }
    }

    pub fn source(&self) -> &Path {
        &self.args.file
    }

    /// Fetch the page described by `request`.
    pub async fn fetch(&self, request: PageRequest) -> Result<Value, RunError> {
        log::debug!("GET {}?{request}", self.args.file.display());

        if let Some(latency) = self.args.latency {
            tokio::time::sleep(latency).await;
        }

        // read again on every request, the document may have changed
        let data = self.load_all().await?;
        Ok(page_of(data, &request))
    }

    /// The complete document.
    pub async fn load_all(&self) -> Result<Value, RunError> {
        let data = tokio::fs::read(&self.args.file).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

/// Cut the requested page out of `data`.
///
/// Arrays and objects are sliced, keeping their kind. Anything else is not a
/// collection and is returned as it is.
pub fn page_of(data: Value, request: &PageRequest) -> Value {
    let offset = request.offset();

    match data {
        Value::Array(items) => items
            .into_iter()
            .skip(offset)
            .take(request.page_length)
            .collect(),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .skip(offset)
                .take(request.page_length)
                .collect::<Map<_, _>>(),
        ),
        other => other,
    }
}
