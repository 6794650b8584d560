//! Application-wide constants
//!
//! This module contains the magic numbers and string literals used throughout
//! the engine, providing a single source of truth for constant values.

/// Settings file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "linkbio";

    /// Settings file name
    pub const FILENAME: &str = "settings.json";
}

/// Bounds applied by `EngineSettings::validate_and_clamp`
pub mod validation {
    /// Shortest collaborator timeout accepted (milliseconds)
    pub const MIN_COLLABORATOR_TIMEOUT_MS: u64 = 100;

    /// Longest collaborator timeout accepted (milliseconds)
    pub const MAX_COLLABORATOR_TIMEOUT_MS: u64 = 60_000;
}

/// Per-page limits lifted by features
pub mod limits {
    /// Video links allowed without `multiple_videos`
    pub const VIDEOS_WITHOUT_MULTIPLE: usize = 1;
}

/// Default values used when nothing else is configured
pub mod defaults {
    pub const LOG_LEVEL: &str = "info";
    pub const COLLABORATOR_TIMEOUT_MS: u64 = 5_000;
    pub const FOOTER_BRAND: &str = "OpenUp";

    pub const FONT_FAMILY: &str = "inter";
    pub const FONT_SIZE: u16 = 16;
    pub const LINE_HEIGHT: f32 = 1.5;
    pub const CARD_SPACING: u16 = 16;
    pub const BORDER_RADIUS: u16 = 12;
}

/// Fixed copy emitted by the layout renderers
pub mod copy {
    /// Shown in place of the link zones when no active link exists
    pub const EMPTY_STATE: &str = "No links yet";

    /// Footer attribution prefix, followed by the brand
    pub const FOOTER_PREFIX: &str = "Made with";

    /// Badge shown on a video card that has no view count yet
    pub const NEW_VIDEO_BADGE: &str = "New";

    pub const FOLLOW_ACTION: &str = "Follow";
    pub const SHARE_ACTION: &str = "Share";
    pub const LINKS_STAT_LABEL: &str = "Links";
    pub const CLICKS_STAT_LABEL: &str = "Clicks";

    /// Per-card metric labels
    pub const CLICKS_METRIC_LABEL: &str = "clicks";
    pub const VIEWS_METRIC_LABEL: &str = "views";

    /// Text color on gradient cards and heroes
    pub const ON_GRADIENT_TEXT: &str = "#ffffff";
}

/// Layout geometry shared by the renderers
pub mod layout {
    /// Tile heights cycled by the masonry layout
    pub const MASONRY_HEIGHTS: [u16; 6] = [32, 40, 36, 44, 38, 42];

    pub const MASONRY_COLUMNS: u8 = 3;
    pub const GRID_COLUMNS: u8 = 2;

    /// Gradients cycled by the creator-pro link cards
    pub const CREATOR_GRADIENTS: [&str; 5] = [
        "linear-gradient(to right, #a855f7, #ec4899)",
        "linear-gradient(to right, #3b82f6, #06b6d4)",
        "linear-gradient(to right, #22c55e, #14b8a6)",
        "linear-gradient(to right, #f97316, #ef4444)",
        "linear-gradient(to right, #6366f1, #a855f7)",
    ];

    /// Background of the donation card body
    pub const DONATION_GRADIENT: &str = "linear-gradient(135deg, #0ea5e9, #3b82f6)";

    /// Hero background of the influencer layout
    pub const INFLUENCER_HERO: &str = "linear-gradient(135deg, #f472b6, #a855f7, #4f46e5)";

    /// Maximum number of letters in avatar initials
    pub const MAX_INITIALS: usize = 2;
}
