//! Link-in-bio page personalization and rendering
//!
//! A creator's page is an ordered collection of typed links rendered under a
//! selectable template and theme, with premium options gated by
//! subscription tier.
//!
//! - **model**: profile, links, themes and tiers
//! - **order** / **drag**: dense link ranking and the drag-reorder protocol
//! - **style**: theme presets and custom colors resolved to style tokens
//! - **gate**: table-driven, fail-closed feature availability
//! - **template** / **render**: template registry and the layout renderers
//! - **preview**: editor state, edits and the live preview
//! - **collaborators**: bounded async calls for video metadata and images
//! - **persistence**: snapshot stores
//! - **config** / **logging**: engine settings and tracing setup

#![forbid(unsafe_code)]

pub mod collaborators;
pub mod config;
pub mod constants;
pub mod drag;
pub mod gate;
pub mod logging;
pub mod model;
pub mod order;
pub mod persistence;
pub mod preview;
pub mod render;
pub mod style;
pub mod template;

pub use collaborators::{AssetSearch, CancelHandle, Cancellation, CollaboratorError, VideoMetadata, VideoMetadataSource};
pub use config::EngineSettings;
pub use drag::{DragState, DropOutcome};
pub use gate::{Access, FeatureGate, FeatureKey, Upsell};
pub use model::{Link, LinkKind, LinkSettings, Profile, SubscriptionTier, ThemeConfig, ThemeId, UtmParams};
pub use persistence::{JsonFileStore, Snapshot, SnapshotStore};
pub use preview::{Edit, EditOutcome, EditorState, Preview, PreviewSynchronizer};
pub use render::{LayoutRenderer, Node, RenderTree, Zone, ZoneKind};
pub use style::{CustomOverrides, StyleTokens};
pub use template::{select_layout, Catalog, TemplateId};
