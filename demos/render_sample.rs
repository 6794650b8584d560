//! Render a sample page and print the tree as JSON.
//!
//! `LOG_LEVEL=debug cargo run --example render_sample -- creator-pro`

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use linkbio::collaborators::{fetch_video_metadata, youtube_video_id};
use linkbio::model::{DonationMeta, FeaturedMeta, LinkKind, ProductMeta};
use linkbio::{
    logging, order, Cancellation, CollaboratorError, Edit, EditOutcome, EngineSettings, Link, PreviewSynchronizer,
    Profile, Snapshot, SubscriptionTier, TemplateId, ThemeId, VideoMetadata, VideoMetadataSource,
};

/// Canned metadata in place of a real fetch
struct SampleSource;

#[async_trait]
impl VideoMetadataSource for SampleSource {
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, CollaboratorError> {
        Ok(VideoMetadata {
            title: Some(format!("Video {video_id}")),
            thumbnail: Some(format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg")),
            duration: Some("12:04".to_string()),
        })
    }
}

fn sample_snapshot() -> Snapshot {
    let mut profile = Profile::new("mira", "Mira Holt");
    profile.bio = "Climber, filmmaker, occasional baker".to_string();
    profile.verified = true;

    let links = [
        Link::new("site", "Portfolio", "https://mira.example.com").with_clicks(120),
        Link::new("ig", "Instagram", "https://instagram.com/mira").with_clicks(340),
        Link::new("yt", "", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
        Link::new("fund", "Trail restoration fund", "https://give.example.org").with_kind(LinkKind::Donation(
            DonationMeta {
                goal: Some("40K".to_string()),
                raised: Some("12.5K".to_string()),
                organization: Some("Trail Trust".to_string()),
                image: None,
            },
        )),
        Link::new("drop", "Spring merch drop", "https://shop.example.com").with_kind(LinkKind::Featured(FeaturedMeta {
            counter: Some("2.1K".to_string()),
            counter_label: Some("sold".to_string()),
            ..FeaturedMeta::default()
        })),
        Link::new("preset", "Lightroom presets", "https://shop.example.com/presets").with_kind(LinkKind::Product(
            ProductMeta {
                price: Some("$19".to_string()),
                badge: Some("New".to_string()),
            },
        )),
    ];

    Snapshot {
        profile,
        links: links.into_iter().fold(Vec::new(), |acc, link| order::append(&acc, link)),
        ..Snapshot::default()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = EngineSettings::default();
    logging::init(settings.trace_level())?;

    let template = std::env::args().nth(1).unwrap_or_else(|| "beast-style".to_string());
    let mut sync = PreviewSynchronizer::new(sample_snapshot(), SubscriptionTier::Pro, &settings);

    if let Some(link) = sync.link("yt").cloned() {
        if let Some(id) = youtube_video_id(&link.url) {
            info!(link_id = %link.id, video_id = %id, "Fetching video metadata");
        }
        match fetch_video_metadata(&SampleSource, &link.url, settings.collaborator_timeout(), Cancellation::never()).await {
            Ok(metadata) => {
                sync.dispatch(Edit::MergeVideoMetadata { id: link.id, metadata });
            }
            Err(err) => warn!(error = %err, "Keeping link without video metadata"),
        }
    }

    sync.dispatch(Edit::SelectTheme(ThemeId::Neon));
    if let EditOutcome::Denied(upsell) = sync.dispatch(Edit::SelectTemplate(TemplateId::parse(&template))) {
        warn!(message = %upsell.message(), "Template not available");
    }

    println!("{}", serde_json::to_string_pretty(&sync.preview().tree)?);
    info!(unsaved = sync.has_unsaved_changes(), "Rendered sample page");
    Ok(())
}
