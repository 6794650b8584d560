//! End-to-end editor session against the public API

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use linkbio::collaborators::search_asset;
use linkbio::model::{DonationMeta, LinkKind};
use linkbio::{
    order, select_layout, AssetSearch, Cancellation, CollaboratorError, Edit, EditOutcome, FeatureGate, FeatureKey,
    JsonFileStore, Link, Node, PreviewSynchronizer, Profile, Snapshot, SnapshotStore, SubscriptionTier, TemplateId,
    ThemeId, ZoneKind,
};

fn store_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("linkbio-session-{}-{}", name, std::process::id()))
        .join("page.json")
}

fn starter_page() -> Snapshot {
    Snapshot {
        profile: Profile::new("kai", "Kai Moreno"),
        ..Snapshot::default()
    }
}

struct StaticSearch;

#[async_trait]
impl AssetSearch for StaticSearch {
    async fn search(&self, query: &str) -> Result<String, CollaboratorError> {
        Ok(format!("https://img.example.com/{}.png", query.replace(' ', "-")))
    }
}

#[test]
fn test_build_reorder_and_save_page() {
    let path = store_path("build");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
    let mut store = JsonFileStore::new(&path);

    let mut sync = PreviewSynchronizer::with_gate(starter_page(), SubscriptionTier::Starter, FeatureGate::default(), "OpenUp");
    assert!(sync.preview().tree.is_empty_state());

    for (id, title) in [("a", "Blog"), ("b", "Podcast"), ("c", "Newsletter")] {
        assert_eq!(
            sync.dispatch(Edit::AddLink(Link::new(id, title, "https://kai.example.com"))),
            EditOutcome::Applied
        );
    }
    assert!(sync.has_unsaved_changes());

    sync.drag_start("c");
    sync.drag_over("b");
    sync.drag_over("a");
    assert_eq!(sync.drop_on("a"), EditOutcome::Applied);
    sync.drag_end();

    let ranks: Vec<_> = sync.state().links.iter().map(|l| (l.id.as_str(), l.order_index)).collect();
    assert_eq!(ranks, vec![("c", 1), ("a", 2), ("b", 3)]);

    sync.dispatch(Edit::ToggleLink("a".into()));
    assert_eq!(sync.preview().tree.link_ids(), vec!["c", "b"]);

    sync.save(&mut store).unwrap();
    assert!(!sync.has_unsaved_changes());

    let reloaded = store.load().unwrap().unwrap();
    assert_eq!(reloaded, sync.snapshot());
    assert!(order::is_dense(&reloaded.links));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_gating_follows_tier() {
    let mut sync = PreviewSynchronizer::with_gate(starter_page(), SubscriptionTier::Starter, FeatureGate::default(), "OpenUp");
    sync.dispatch(Edit::AddLink(Link::new("a", "Blog", "https://kai.example.com")));

    let denied = sync.dispatch(Edit::SelectTemplate(TemplateId::CreatorPro));
    let EditOutcome::Denied(upsell) = denied else {
        panic!("expected denial, got {denied:?}");
    };
    assert_eq!(upsell.feature, FeatureKey::PremiumTemplate);
    assert_eq!(sync.preview().tree.template, TemplateId::Standard);

    sync.set_tier(SubscriptionTier::Premium);
    assert_eq!(sync.dispatch(Edit::SelectTemplate(TemplateId::CreatorPro)), EditOutcome::Applied);
    assert_eq!(sync.dispatch(Edit::SelectTheme(ThemeId::Cyber)), EditOutcome::Applied);
    assert_eq!(sync.preview().tree.template, TemplateId::CreatorPro);
    assert_eq!(sync.preview().theme, ThemeId::Cyber);

    sync.set_tier(SubscriptionTier::Starter);
    assert_eq!(sync.preview().tree.template, TemplateId::Standard);
    assert_eq!(sync.preview().theme, ThemeId::Minimal);
}

#[test]
fn test_unknown_template_renders_like_default() {
    let profile = Profile::new("kai", "Kai");
    let links = order::append(&[], Link::new("a", "Blog", "https://kai.example.com"));
    let tokens = linkbio::style::resolve_named("not-a-theme", None);
    assert_eq!(
        select_layout("zigzag").render(&profile, &links, &tokens),
        select_layout("standard").render(&profile, &links, &tokens)
    );
}

#[tokio::test]
async fn test_asset_search_result_lands_on_donation_card() {
    let mut sync = PreviewSynchronizer::with_gate(starter_page(), SubscriptionTier::Free, FeatureGate::default(), "OpenUp");
    sync.dispatch(Edit::AddLink(
        Link::new("fund", "Shelter drive", "https://give.example.org").with_kind(LinkKind::Donation(DonationMeta::default())),
    ));

    let url = search_asset(&StaticSearch, "dog shelter", Duration::from_secs(1), Cancellation::never())
        .await
        .unwrap();
    assert_eq!(
        sync.dispatch(Edit::MergeImage {
            id: "fund".into(),
            url: url.clone()
        }),
        EditOutcome::Applied
    );

    let links = &sync.preview().tree.zone(ZoneKind::Links).unwrap().nodes;
    match &links[0] {
        Node::Donation(card) => assert_eq!(card.image.as_deref(), Some(url.as_str())),
        other => panic!("expected donation card, got {other:?}"),
    }
}
