//! Saved page snapshots
//!
//! The editor hands a [`Snapshot`] to a [`SnapshotStore`] on save and gets
//! one back on startup. Links are stored in wire form, so loading goes
//! through the same normalization as any other input.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::model::{Link, Profile, ThemeConfig};
use crate::order;
use crate::template::TemplateId;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub profile: Profile,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub template: TemplateId,
}

impl Snapshot {
    /// Same snapshot with a dense link ranking
    pub fn normalized(mut self) -> Self {
        if !order::is_dense(&self.links) {
            self.links = order::normalize(&self.links);
        }
        self
    }
}

pub trait SnapshotStore {
    /// `None` when nothing has been saved yet
    fn load(&self) -> Result<Option<Snapshot>>;
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Snapshot store backed by one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot from {}", self.path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot from {}", self.path.display()))?;
        info!(path = %self.path.display(), links = snapshot.links.len(), "Loaded snapshot");
        Ok(Some(snapshot.normalized()))
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write snapshot to {}", self.path.display()))?;
        info!(path = %self.path.display(), links = snapshot.links.len(), "Saved snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinkKind, ThemeId, VideoMeta};

    fn temp_store(name: &str) -> JsonFileStore {
        let dir = std::env::temp_dir().join(format!("linkbio-snapshot-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        JsonFileStore::new(dir.join("page.json"))
    }

    #[test]
    fn test_missing_file_loads_none() {
        let store = temp_store("missing");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = temp_store("roundtrip");
        let links = order::append(
            &[],
            Link::new("v", "Clip", "https://youtu.be/dQw4w9WgXcQ").with_kind(LinkKind::Video(VideoMeta {
                duration: Some("3:32".to_string()),
                ..VideoMeta::default()
            })),
        );
        let snapshot = Snapshot {
            profile: Profile::new("demo", "Demo"),
            links,
            theme: ThemeConfig {
                theme_id: ThemeId::Dark,
                ..ThemeConfig::default()
            },
            template: TemplateId::Cards,
        };
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
        let _ = fs::remove_dir_all(store.path().parent().unwrap());
    }

    #[test]
    fn test_load_normalizes_ranking() {
        let store = temp_store("sparse");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{
                "profile": {"username": "demo", "display_name": "Demo"},
                "links": [
                    {"id": "b", "title": "B", "url": "https://example.com", "order_index": 7},
                    {"id": "a", "title": "A", "url": "https://example.com", "order_index": 3}
                ]
            }"#,
        )
        .unwrap();
        let snapshot = store.load().unwrap().unwrap();
        let ranked: Vec<_> = snapshot.links.iter().map(|l| (l.id.as_str(), l.order_index)).collect();
        assert_eq!(ranked, vec![("a", 1), ("b", 2)]);
        assert_eq!(snapshot.template, TemplateId::Standard);
        let _ = fs::remove_dir_all(store.path().parent().unwrap());
    }
}
