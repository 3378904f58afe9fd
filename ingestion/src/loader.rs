use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use tubegraph_core::error::{ErrorCode, TubegraphError};
use tubegraph_core::model::VideoRecord;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a top-level JSON array of videos, got {0}")]
    NotAnArray(&'static str),
    #[error("video record at index {index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl TubegraphError for LoadError {
    fn error_code(&self) -> ErrorCode {
        match self {
            LoadError::NotFound(_) => ErrorCode::NotFound,
            LoadError::Io { .. } => ErrorCode::InvalidInput,
            LoadError::Json(_) => ErrorCode::InvalidInput,
            LoadError::NotAnArray(_) => ErrorCode::InvalidInput,
            LoadError::InvalidRecord { .. } => ErrorCode::InvalidInput,
        }
    }
}

/// Read the whole file and decode it as an array of video records.
pub fn load_videos(path: impl AsRef<Path>) -> Result<Vec<VideoRecord>, LoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "read input file");

    let videos = parse_videos(&raw)?;
    info!(path = %path.display(), videos = videos.len(), "loaded video records");
    Ok(videos)
}

pub fn parse_videos(raw: &str) -> Result<Vec<VideoRecord>, LoadError> {
    let items = match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => items,
        Value::Null => return Err(LoadError::NotAnArray("null")),
        Value::Bool(_) => return Err(LoadError::NotAnArray("boolean")),
        Value::Number(_) => return Err(LoadError::NotAnArray("number")),
        Value::String(_) => return Err(LoadError::NotAnArray("string")),
        Value::Object(_) => return Err(LoadError::NotAnArray("object")),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|source| LoadError::InvalidRecord { index, source })
        })
        .collect()
}
