//! External asynchronous collaborators
//!
//! Video-metadata fetch and asset search run outside the editor. Each call
//! is bounded by a timeout and can be cancelled by the caller; the result is
//! merged into a link afterwards by a pure function, so a slow collaborator
//! never holds up reordering or rendering.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

use crate::model::{Link, LinkKind, VideoMeta};

const FETCH_VIDEO: &str = "video metadata fetch";
const SEARCH_ASSET: &str = "asset search";

/// Recognized video URLs: watch, embed, shorts and youtu.be forms
static VIDEO_URL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})").ok()
});

#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("{operation} timed out after {after_ms} ms")]
    TimedOut { operation: &'static str, after_ms: u64 },

    #[error("{operation} was cancelled")]
    Cancelled { operation: &'static str },

    #[error("{operation} returned an unusable result: {reason}")]
    Rejected { operation: &'static str, reason: String },

    #[error("{operation} failed")]
    Failed {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// What a metadata fetch reports for a video
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
}

#[async_trait]
pub trait VideoMetadataSource: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, CollaboratorError>;
}

#[async_trait]
pub trait AssetSearch: Send + Sync {
    /// Resolve a query to an image URL
    async fn search(&self, query: &str) -> Result<String, CollaboratorError>;
}

/// Caller side of a cancellation pair
#[derive(Debug)]
pub struct CancelHandle {
    tx: oneshot::Sender<()>,
}

impl CancelHandle {
    pub fn cancel(self) {
        // Receiver gone means the call already finished
        let _ = self.tx.send(());
    }
}

/// Collaborator side of a cancellation pair. Dropping the handle without
/// cancelling lets the call run to completion.
#[derive(Debug, Default)]
pub struct Cancellation {
    rx: Option<oneshot::Receiver<()>>,
}

impl Cancellation {
    pub fn pair() -> (CancelHandle, Cancellation) {
        let (tx, rx) = oneshot::channel();
        (CancelHandle { tx }, Cancellation { rx: Some(rx) })
    }

    /// A call that cannot be cancelled
    pub fn never() -> Self {
        Self::default()
    }

    /// Resolves only on an explicit cancel
    async fn cancelled(self) {
        if let Some(rx) = self.rx {
            if rx.await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

/// 11-character YouTube id of a recognized video URL
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let captures = VIDEO_URL.as_ref()?.captures(url)?;
    captures.get(1).map(|m| m.as_str())
}

async fn bounded<T, F>(operation: &'static str, limit: Duration, cancel: Cancellation, call: F) -> Result<T, CollaboratorError>
where
    F: Future<Output = Result<T, CollaboratorError>>,
{
    let after_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
    let result = tokio::select! {
        outcome = tokio::time::timeout(limit, call) => match outcome {
            Ok(result) => result,
            Err(_) => Err(CollaboratorError::TimedOut { operation, after_ms }),
        },
        _ = cancel.cancelled() => Err(CollaboratorError::Cancelled { operation }),
    };

    match &result {
        Ok(_) => debug!(operation = operation, "Collaborator call completed"),
        Err(err @ CollaboratorError::Failed { .. }) => error!(operation = operation, error = ?err, "Collaborator call failed"),
        Err(err) => warn!(operation = operation, error = %err, "Collaborator call did not complete"),
    }
    result
}

/// Fetch metadata for a video URL. Unrecognized URLs are rejected without
/// calling the source.
pub async fn fetch_video_metadata(
    source: &dyn VideoMetadataSource,
    url: &str,
    limit: Duration,
    cancel: Cancellation,
) -> Result<VideoMetadata, CollaboratorError> {
    let Some(video_id) = youtube_video_id(url) else {
        debug!(url = %url, "Not a recognized video URL");
        return Err(CollaboratorError::Rejected {
            operation: FETCH_VIDEO,
            reason: format!("not a recognized video URL: {url}"),
        });
    };
    bounded(FETCH_VIDEO, limit, cancel, source.fetch(video_id)).await
}

/// Search for an image. Blank queries and blank results are rejected.
pub async fn search_asset(
    search: &dyn AssetSearch,
    query: &str,
    limit: Duration,
    cancel: Cancellation,
) -> Result<String, CollaboratorError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CollaboratorError::Rejected {
            operation: SEARCH_ASSET,
            reason: "empty query".to_string(),
        });
    }
    let url = bounded(SEARCH_ASSET, limit, cancel, search.search(query)).await?;
    let url = url.trim();
    if url.is_empty() {
        warn!(query = %query, "Asset search returned an empty URL");
        return Err(CollaboratorError::Rejected {
            operation: SEARCH_ASSET,
            reason: "empty URL".to_string(),
        });
    }
    Ok(url.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Merge fetched metadata into a link.
///
/// A title the user already entered is kept. A link that is not a video yet
/// becomes one. Fetched thumbnail and duration replace stored values; view
/// counts are left alone.
pub fn merge_video_metadata(link: &Link, fetched: VideoMetadata) -> Link {
    let mut merged = link.clone();
    if !matches!(merged.kind, LinkKind::Video(_)) {
        debug!(link_id = %merged.id, from = %merged.variant().as_str(), "Converting link to video on metadata merge");
        merged.kind = LinkKind::Video(VideoMeta::default());
    }

    if merged.title.trim().is_empty() {
        if let Some(title) = non_blank(fetched.title) {
            merged.title = title;
        }
    }
    if let LinkKind::Video(meta) = &mut merged.kind {
        if let Some(thumbnail) = non_blank(fetched.thumbnail) {
            meta.thumbnail = Some(thumbnail);
        }
        if let Some(duration) = non_blank(fetched.duration) {
            meta.duration = Some(duration);
        }
    }
    merged
}

/// Store an image URL on a link; `None` when the variant has no image slot
pub fn merge_image(link: &Link, url: &str) -> Option<Link> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let mut merged = link.clone();
    if merged.set_image(url) {
        Some(merged)
    } else {
        debug!(link_id = %link.id, variant = %link.variant().as_str(), "Link variant has no image slot");
        None
    }
}
