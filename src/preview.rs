//! Live preview of the page being edited
//!
//! [`EditorState`] is the single owner of everything the creator edits. Each
//! interaction is an [`Edit`] applied by a pure transition that returns a
//! new state. [`PreviewSynchronizer`] drives those transitions, re-renders
//! after every change and tracks whether there is anything left to save.

use anyhow::Result;
use tracing::{debug, info};

use crate::collaborators::{merge_image, merge_video_metadata, VideoMetadata};
use crate::config::EngineSettings;
use crate::drag::{DragState, DropOutcome};
use crate::gate::{Access, FeatureGate, Upsell};
use crate::model::{
    ColorField, Link, LinkId, Profile, ProfileStyle, Spacing, SubscriptionTier, ThemeConfig, ThemeFlags, ThemeId,
    Typography,
};
use crate::order;
use crate::persistence::{Snapshot, SnapshotStore};
use crate::render::RenderTree;
use crate::style::{self, CustomOverrides, StyleTokens};
use crate::template::{renderer_for, TemplateId};

/// One discrete editor interaction
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetUsername(String),
    SetDisplayName(String),
    SetBio(String),
    SetAvatar(Option<String>),
    SetVerified(bool),
    SetProfileStyle(ProfileStyle),

    AddLink(Link),
    RemoveLink(LinkId),
    /// Replace a link's content; its id and rank are kept
    UpdateLink(Link),
    ToggleLink(LinkId),
    Reorder { dragged: LinkId, target: LinkId },
    /// Keyboard reorder to a 1-based position
    MoveLink { id: LinkId, position: usize },
    MergeVideoMetadata { id: LinkId, metadata: VideoMetadata },
    MergeImage { id: LinkId, url: String },

    SelectTheme(ThemeId),
    SetColor { field: ColorField, value: String },
    SetTypography(Typography),
    SetSpacing(Spacing),
    SetFlags(ThemeFlags),

    SelectTemplate(TemplateId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// Nothing changed (no-op edit, unknown id, cancelled drop)
    Unchanged,
    /// Gated for the current tier; state untouched
    Denied(Upsell),
}

/// Everything the creator edits, plus the session tier and drag state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub profile: Profile,
    pub links: Vec<Link>,
    pub theme: ThemeConfig,
    /// Selected template; masked at render time once the tier stops allowing it
    pub template: TemplateId,
    pub tier: SubscriptionTier,
    pub drag: DragState,
}

/// Rendered page plus the appearance settings a host applies around it
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub tree: RenderTree,
    /// Links as honored at this tier, for the host's click handler
    pub links: Vec<Link>,
    /// Theme actually shown after masking
    pub theme: ThemeId,
    pub typography: Typography,
    pub spacing: Spacing,
    pub flags: ThemeFlags,
}

impl Preview {
    /// Link behind a rendered node, with gated options masked
    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.id == id)
    }
}

impl EditorState {
    pub fn from_snapshot(snapshot: Snapshot, tier: SubscriptionTier) -> Self {
        let snapshot = snapshot.normalized();
        Self {
            profile: snapshot.profile,
            links: snapshot.links,
            theme: snapshot.theme,
            template: snapshot.template,
            tier,
            drag: DragState::Idle,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            profile: self.profile.clone(),
            links: self.links.clone(),
            theme: self.theme.clone(),
            template: self.template,
        }
    }

    /// Apply one edit. `Ok(None)` when the edit changes nothing.
    pub fn apply(&self, edit: Edit, gate: &FeatureGate) -> Result<Option<EditorState>, Upsell> {
        let mut next = self.clone();
        match edit {
            Edit::SetUsername(username) => next.profile.username = username,
            Edit::SetDisplayName(name) => next.profile.display_name = name,
            Edit::SetBio(bio) => next.profile.bio = bio,
            Edit::SetAvatar(url) => next.profile.avatar_url = url.filter(|u| !u.trim().is_empty()),
            Edit::SetVerified(verified) => next.profile.verified = verified,
            Edit::SetProfileStyle(style) => next.profile.style = style,

            Edit::AddLink(link) => {
                if self.links.iter().any(|existing| existing.id == link.id) {
                    debug!(link_id = %link.id, "Link id already present, ignoring add");
                    return Ok(None);
                }
                let link = Link {
                    settings: link.settings.normalized(),
                    ..link
                };
                self.check_link(None, &link, gate)?;
                next.links = order::append(&self.links, link);
            }
            Edit::RemoveLink(id) => match order::remove(&self.links, &id) {
                Some(links) => next.links = links,
                None => return Ok(None),
            },
            Edit::UpdateLink(link) => {
                let Some(current) = self.links.iter().find(|existing| existing.id == link.id) else {
                    return Ok(None);
                };
                let link = Link {
                    settings: link.settings.normalized(),
                    ..link
                };
                self.check_link(Some(current), &link, gate)?;
                let id = link.id.clone();
                match order::update(&self.links, &id, |current| *current = link) {
                    Some(links) => next.links = links,
                    None => return Ok(None),
                }
            }
            Edit::ToggleLink(id) => match order::toggle_active(&self.links, &id) {
                Some(links) => next.links = links,
                None => return Ok(None),
            },
            Edit::Reorder { dragged, target } => match order::try_reorder(&self.links, &dragged, &target) {
                Some(links) => next.links = links,
                None => return Ok(None),
            },
            Edit::MoveLink { id, position } => match order::move_to(&self.links, &id, position) {
                Some(links) => next.links = links,
                None => return Ok(None),
            },
            Edit::MergeVideoMetadata { id, metadata } => {
                let Some(current) = self.links.iter().find(|existing| existing.id == id) else {
                    return Ok(None);
                };
                let merged = merge_video_metadata(current, metadata);
                if let Access::Denied(upsell) = gate.check_video_slot(&self.links, &merged, self.tier) {
                    return Err(upsell);
                }
                match order::update(&self.links, &id, |link| *link = merged) {
                    Some(links) => next.links = links,
                    None => return Ok(None),
                }
            }
            Edit::MergeImage { id, url } => {
                let Some(merged) = self.links.iter().find(|l| l.id == id).and_then(|l| merge_image(l, &url)) else {
                    return Ok(None);
                };
                match order::update(&self.links, &id, |link| *link = merged) {
                    Some(links) => next.links = links,
                    None => return Ok(None),
                }
            }

            Edit::SelectTheme(theme) => {
                if let Access::Denied(upsell) = gate.check_theme(theme, self.tier) {
                    return Err(upsell);
                }
                next.theme.theme_id = theme;
            }
            Edit::SetColor { field, value } => next.theme.color_scheme.set(field, value),
            Edit::SetTypography(typography) => next.theme.typography = typography,
            Edit::SetSpacing(spacing) => next.theme.spacing = spacing,
            Edit::SetFlags(flags) => next.theme.flags = flags,

            Edit::SelectTemplate(template) => {
                if let Access::Denied(upsell) = gate.check_template(template, self.tier) {
                    return Err(upsell);
                }
                next.template = template;
            }
        }

        Ok((next != *self).then_some(next))
    }

    /// Gated options being set on a link, then the video limit
    fn check_link(&self, current: Option<&Link>, link: &Link, gate: &FeatureGate) -> Result<(), Upsell> {
        let previous = current.map(|current| &current.settings);
        if let Access::Denied(upsell) = gate.check_link_settings(previous, &link.settings, self.tier) {
            return Err(upsell);
        }
        if let Access::Denied(upsell) = gate.check_video_slot(&self.links, link, self.tier) {
            return Err(upsell);
        }
        Ok(())
    }

    /// Links with any option the tier no longer allows cleared
    pub fn effective_links(&self, gate: &FeatureGate) -> Vec<Link> {
        self.links
            .iter()
            .map(|link| Link {
                settings: gate.effective_link_settings(&link.settings, self.tier),
                ..link.clone()
            })
            .collect()
    }

    /// Style tokens for the theme actually shown at this tier
    pub fn tokens(&self, gate: &FeatureGate) -> StyleTokens {
        let theme = gate.effective_theme(self.theme.theme_id, self.tier);
        let overrides = CustomOverrides::from(&self.theme.color_scheme).with_profile(&self.profile.style);
        style::resolve(theme, Some(&overrides))
    }

    /// Render the page. Gated selections are masked, never honored.
    pub fn render(&self, gate: &FeatureGate, footer_brand: &str) -> Preview {
        let theme = gate.effective_theme(self.theme.theme_id, self.tier);
        let template = gate.effective_template(self.template, self.tier);
        let tokens = self.tokens(gate);
        let links = self.effective_links(gate);
        let tree = renderer_for(template)
            .render(&self.profile, &links, &tokens)
            .with_brand(footer_brand);
        Preview {
            tree,
            links,
            theme,
            typography: self.theme.typography.clone(),
            spacing: self.theme.spacing,
            flags: self.theme.flags,
        }
    }
}

/// Keeps the preview in step with the editor state
#[derive(Debug)]
pub struct PreviewSynchronizer {
    state: EditorState,
    gate: FeatureGate,
    footer_brand: String,
    preview: Preview,
    unsaved: bool,
}

impl PreviewSynchronizer {
    pub fn new(snapshot: Snapshot, tier: SubscriptionTier, settings: &EngineSettings) -> Self {
        Self::with_gate(snapshot, tier, settings.feature_gate(), &settings.footer_brand)
    }

    pub fn with_gate(snapshot: Snapshot, tier: SubscriptionTier, gate: FeatureGate, footer_brand: &str) -> Self {
        let state = EditorState::from_snapshot(snapshot, tier);
        let preview = state.render(&gate, footer_brand);
        Self {
            state,
            gate,
            footer_brand: footer_brand.to_string(),
            preview,
            unsaved: false,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn gate(&self) -> &FeatureGate {
        &self.gate
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Stored link as the creator edits it
    pub fn link(&self, id: &str) -> Option<&Link> {
        self.state.links.iter().find(|link| link.id == id)
    }

    fn rerender(&mut self) {
        self.preview = self.state.render(&self.gate, &self.footer_brand);
    }

    fn commit(&mut self, next: EditorState) {
        self.state = next;
        self.unsaved = true;
        self.rerender();
    }

    pub fn dispatch(&mut self, edit: Edit) -> EditOutcome {
        match self.state.apply(edit, &self.gate) {
            Ok(Some(next)) => {
                self.commit(next);
                EditOutcome::Applied
            }
            Ok(None) => EditOutcome::Unchanged,
            Err(upsell) => {
                info!(feature = %upsell.feature, message = %upsell.message(), "Edit denied for tier");
                EditOutcome::Denied(upsell)
            }
        }
    }

    /// Restore the baseline appearance and template. Leaves nothing to save.
    pub fn reset_to_default(&mut self) {
        self.state.theme = ThemeConfig::default();
        self.state.template = TemplateId::default();
        self.unsaved = false;
        self.rerender();
        info!("Appearance reset to defaults");
    }

    /// Session tier change. Re-renders with masking; not an unsaved edit.
    pub fn set_tier(&mut self, tier: SubscriptionTier) {
        if self.state.tier == tier {
            return;
        }
        info!(from = %self.state.tier, to = %tier, "Subscription tier changed");
        self.state.tier = tier;
        self.rerender();
    }

    pub fn drag_start(&mut self, source: &str) {
        self.state.drag = self.state.drag.start(source);
    }

    pub fn drag_over(&mut self, target: &str) {
        self.state.drag = self.state.drag.over(target);
    }

    /// Commit the drag onto `target`
    pub fn drop_on(&mut self, target: &str) -> EditOutcome {
        let (drag, outcome) = self.state.drag.drop_on(&self.state.links, target);
        self.state.drag = drag;
        match outcome {
            DropOutcome::Dropped(links) => {
                let mut next = self.state.clone();
                next.links = links;
                self.commit(next);
                EditOutcome::Applied
            }
            DropOutcome::Cancelled => EditOutcome::Unchanged,
        }
    }

    pub fn drag_end(&mut self) {
        self.state.drag = self.state.drag.end();
    }

    /// Link currently marked as the drop target
    pub fn drop_indicator(&self) -> Option<&str> {
        self.state.drag.indicator()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Hand the current state to the store. The unsaved flag clears only on success.
    pub fn save(&mut self, store: &mut dyn SnapshotStore) -> Result<()> {
        store.save(&self.snapshot())?;
        self.unsaved = false;
        Ok(())
    }

    /// Replace the edited state with a stored snapshot
    pub fn load(&mut self, snapshot: Snapshot) {
        self.state = EditorState::from_snapshot(snapshot, self.state.tier);
        self.unsaved = false;
        self.rerender();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::FeatureKey;
    use crate::model::{LinkKind, LinkSettings, UtmParams, VideoMeta};
    use crate::render::ZoneKind;

    fn snapshot() -> Snapshot {
        let mut links = Vec::new();
        for id in ["a", "b", "c"] {
            links = order::append(&links, Link::new(id, id.to_uppercase(), "https://example.com"));
        }
        Snapshot {
            profile: Profile::new("demo", "Demo User"),
            links,
            ..Snapshot::default()
        }
    }

    fn sync(tier: SubscriptionTier) -> PreviewSynchronizer {
        PreviewSynchronizer::with_gate(snapshot(), tier, FeatureGate::default(), "OpenUp")
    }

    fn rendered_ids(sync: &PreviewSynchronizer) -> Vec<String> {
        sync.preview().tree.link_ids().into_iter().map(str::to_string).collect()
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn load(&self) -> Result<Option<Snapshot>> {
            Ok(None)
        }
        fn save(&mut self, _snapshot: &Snapshot) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    #[derive(Default)]
    struct MemoryStore(Option<Snapshot>);

    impl SnapshotStore for MemoryStore {
        fn load(&self) -> Result<Option<Snapshot>> {
            Ok(self.0.clone())
        }
        fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
            self.0 = Some(snapshot.clone());
            Ok(())
        }
    }

    #[test]
    fn test_fresh_synchronizer_is_clean() {
        let sync = sync(SubscriptionTier::Free);
        assert!(!sync.has_unsaved_changes());
        assert_eq!(rendered_ids(&sync), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_edit_rerenders_and_marks_unsaved() {
        let mut sync = sync(SubscriptionTier::Free);
        assert_eq!(sync.dispatch(Edit::ToggleLink("b".into())), EditOutcome::Applied);
        assert!(sync.has_unsaved_changes());
        assert_eq!(rendered_ids(&sync), vec!["a", "c"]);
    }

    #[test]
    fn test_noop_edits_leave_flag_clear() {
        let mut sync = sync(SubscriptionTier::Free);
        let outcome = sync.dispatch(Edit::Reorder {
            dragged: "a".into(),
            target: "a".into(),
        });
        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(sync.dispatch(Edit::RemoveLink("zz".into())), EditOutcome::Unchanged);
        assert_eq!(sync.dispatch(Edit::SetDisplayName("Demo User".into())), EditOutcome::Unchanged);
        assert!(!sync.has_unsaved_changes());
    }

    #[test]
    fn test_add_link_gets_next_rank() {
        let mut sync = sync(SubscriptionTier::Free);
        sync.dispatch(Edit::AddLink(Link::new("d", "D", "https://example.com")));
        let added = sync.link("d").unwrap();
        assert_eq!(added.order_index, 4);
        assert_eq!(
            sync.dispatch(Edit::AddLink(Link::new("d", "Dup", "https://example.com"))),
            EditOutcome::Unchanged
        );
    }

    #[test]
    fn test_remove_compacts_ranks() {
        let mut sync = sync(SubscriptionTier::Free);
        sync.dispatch(Edit::RemoveLink("a".into()));
        assert!(order::is_dense(&sync.state().links));
        assert_eq!(sync.link("c").unwrap().order_index, 2);
    }

    #[test]
    fn test_premium_theme_denied_on_free() {
        let mut sync = sync(SubscriptionTier::Free);
        match sync.dispatch(Edit::SelectTheme(ThemeId::Neon)) {
            EditOutcome::Denied(upsell) => {
                assert_eq!(upsell.feature, FeatureKey::PremiumTheme);
                assert_eq!(upsell.required_tier, Some(SubscriptionTier::Pro));
            }
            other => panic!("expected denial, got {other:?}"),
        }
        assert_eq!(sync.state().theme.theme_id, ThemeId::Minimal);
        assert!(!sync.has_unsaved_changes());

        assert_eq!(sync.dispatch(Edit::SelectTheme(ThemeId::Dark)), EditOutcome::Applied);
        assert_eq!(sync.preview().tree.tokens, StyleTokens::preset(ThemeId::Dark));
    }

    #[test]
    fn test_downgrade_masks_prior_selection() {
        let mut sync = sync(SubscriptionTier::Pro);
        sync.dispatch(Edit::SelectTheme(ThemeId::Neon));
        sync.dispatch(Edit::SelectTemplate(TemplateId::BeastStyle));
        sync.save(&mut MemoryStore::default()).unwrap();
        assert_eq!(sync.preview().theme, ThemeId::Neon);
        assert_eq!(sync.preview().tree.template, TemplateId::BeastStyle);

        sync.set_tier(SubscriptionTier::Free);
        assert!(!sync.has_unsaved_changes());
        assert_eq!(sync.preview().theme, ThemeId::Minimal);
        assert_eq!(sync.preview().tree.template, TemplateId::Standard);
        assert_eq!(sync.preview().tree.tokens, StyleTokens::preset(ThemeId::Minimal));
        // Stored selection survives for when the tier comes back
        assert_eq!(sync.state().template, TemplateId::BeastStyle);
    }

    #[test]
    fn test_custom_colors_only_for_minimal() {
        let mut sync = sync(SubscriptionTier::Free);
        sync.dispatch(Edit::SetColor {
            field: ColorField::Background,
            value: "#fafafa".into(),
        });
        assert_eq!(sync.preview().tree.tokens.background, "#fafafa");

        sync.dispatch(Edit::SelectTheme(ThemeId::Dark));
        assert_eq!(sync.preview().tree.tokens.background, "#0f0f23");
    }

    #[test]
    fn test_reset_restores_baseline_and_clears_flag() {
        let mut sync = sync(SubscriptionTier::Pro);
        sync.dispatch(Edit::SelectTheme(ThemeId::Retro));
        sync.dispatch(Edit::SelectTemplate(TemplateId::Masonry));
        sync.dispatch(Edit::SetFlags(ThemeFlags {
            animations: false,
            gradient: true,
        }));
        assert!(sync.has_unsaved_changes());

        sync.reset_to_default();
        assert!(!sync.has_unsaved_changes());
        assert_eq!(sync.state().theme, ThemeConfig::default());
        assert_eq!(sync.preview().tree.template, TemplateId::Standard);
        assert!(sync.preview().flags.animations);
    }

    #[test]
    fn test_drag_protocol() {
        let mut sync = sync(SubscriptionTier::Free);
        sync.drag_start("c");
        sync.drag_over("b");
        assert_eq!(sync.drop_indicator(), Some("b"));
        assert!(!sync.has_unsaved_changes());

        assert_eq!(sync.drop_on("a"), EditOutcome::Applied);
        sync.drag_end();
        assert_eq!(sync.drop_indicator(), None);
        assert_eq!(rendered_ids(&sync), vec!["c", "a", "b"]);
        assert!(sync.has_unsaved_changes());
    }

    #[test]
    fn test_drag_end_without_drop_clears_indicator() {
        let mut sync = sync(SubscriptionTier::Free);
        sync.drag_start("a");
        sync.drag_over("c");
        sync.drag_end();
        assert_eq!(sync.drop_indicator(), None);
        assert_eq!(sync.drop_on("c"), EditOutcome::Unchanged);
        assert_eq!(rendered_ids(&sync), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failed_save_keeps_flag() {
        let mut sync = sync(SubscriptionTier::Free);
        sync.dispatch(Edit::SetBio("Hello".into()));
        assert!(sync.save(&mut FailingStore).is_err());
        assert!(sync.has_unsaved_changes());

        let mut store = MemoryStore::default();
        sync.save(&mut store).unwrap();
        assert!(!sync.has_unsaved_changes());
        assert_eq!(store.0.unwrap().profile.bio, "Hello");
    }

    #[test]
    fn test_load_replaces_state() {
        let mut sync = sync(SubscriptionTier::Free);
        sync.dispatch(Edit::SetBio("draft".into()));
        let stored = Snapshot {
            profile: Profile::new("other", "Other"),
            ..Snapshot::default()
        };
        sync.load(stored);
        assert!(!sync.has_unsaved_changes());
        assert_eq!(sync.state().profile.username, "other");
        assert_eq!(sync.state().tier, SubscriptionTier::Free);
        assert!(sync.preview().tree.zone(ZoneKind::EmptyState).is_some());
    }

    #[test]
    fn test_video_merge_keeps_title() {
        let mut sync = sync(SubscriptionTier::Free);
        let outcome = sync.dispatch(Edit::MergeVideoMetadata {
            id: "a".into(),
            metadata: VideoMetadata {
                title: Some("Fetched".into()),
                thumbnail: Some("https://img.example.com/t.jpg".into()),
                duration: None,
            },
        });
        assert_eq!(outcome, EditOutcome::Applied);
        let link = sync.link("a").unwrap();
        assert_eq!(link.title, "A");
        assert_eq!(link.order_index, 1);
        assert!(matches!(&link.kind, LinkKind::Video(VideoMeta { thumbnail: Some(_), .. })));
    }

    #[test]
    fn test_image_merge_on_plain_link_is_noop() {
        let mut sync = sync(SubscriptionTier::Free);
        let outcome = sync.dispatch(Edit::MergeImage {
            id: "a".into(),
            url: "https://img.example.com/x.png".into(),
        });
        assert_eq!(outcome, EditOutcome::Unchanged);
    }

    #[test]
    fn test_update_link_keeps_rank() {
        let mut sync = sync(SubscriptionTier::Free);
        let edited = Link::new("b", "Renamed", "https://example.com/new").with_order_index(99);
        sync.dispatch(Edit::UpdateLink(edited));
        let link = sync.link("b").unwrap();
        assert_eq!(link.title, "Renamed");
        assert_eq!(link.order_index, 2);
    }

    fn video(id: &str) -> Link {
        Link::new(id, id, "https://youtu.be/dQw4w9WgXcQ").with_kind(LinkKind::Video(VideoMeta::default()))
    }

    fn expiring() -> LinkSettings {
        LinkSettings {
            expires_at: Some("2026-12-31T23:59:59Z".into()),
            utm: Some(UtmParams {
                source: Some("bio".into()),
                ..UtmParams::default()
            }),
            ..LinkSettings::default()
        }
    }

    #[test]
    fn test_gated_link_option_denied_on_add() {
        let mut sync = sync(SubscriptionTier::Starter);
        let link = Link::new("d", "D", "https://example.com").with_settings(expiring());
        match sync.dispatch(Edit::AddLink(link)) {
            EditOutcome::Denied(upsell) => assert_eq!(upsell.feature, FeatureKey::LinkExpiry),
            other => panic!("expected denial, got {other:?}"),
        }
        assert!(sync.link("d").is_none());
        assert!(!sync.has_unsaved_changes());

        let slugged = Link::new("d", "D", "https://example.com").with_settings(LinkSettings {
            custom_slug: Some("spring".into()),
            ..LinkSettings::default()
        });
        assert_eq!(sync.dispatch(Edit::AddLink(slugged)), EditOutcome::Applied);
    }

    #[test]
    fn test_gated_link_option_denied_on_update() {
        let mut sync = sync(SubscriptionTier::Free);
        let edited = Link::new("b", "B", "https://example.com").with_settings(LinkSettings {
            password: Some("hunter2".into()),
            ..LinkSettings::default()
        });
        match sync.dispatch(Edit::UpdateLink(edited)) {
            EditOutcome::Denied(upsell) => {
                assert_eq!(upsell.feature, FeatureKey::Password);
                assert_eq!(upsell.required_tier, Some(SubscriptionTier::Starter));
            }
            other => panic!("expected denial, got {other:?}"),
        }
        assert!(sync.link("b").unwrap().settings.is_empty());
    }

    #[test]
    fn test_downgrade_masks_link_options() {
        let mut sync = sync(SubscriptionTier::Pro);
        let edited = Link::new("a", "A", "https://example.com").with_settings(expiring());
        assert_eq!(sync.dispatch(Edit::UpdateLink(edited)), EditOutcome::Applied);
        let shown = sync.preview().link("a").unwrap();
        assert_eq!(shown.target_url(), "https://example.com?utm_source=bio");

        sync.set_tier(SubscriptionTier::Starter);
        let shown = sync.preview().link("a").unwrap();
        assert!(shown.settings.is_empty());
        assert_eq!(shown.target_url(), "https://example.com");
        // Stored options survive for when the tier comes back
        assert_eq!(sync.link("a").unwrap().settings, expiring());

        // Editing the title keeps the stored options without a denial
        let renamed = Link {
            title: "Renamed".into(),
            ..sync.link("a").unwrap().clone()
        };
        assert_eq!(sync.dispatch(Edit::UpdateLink(renamed)), EditOutcome::Applied);

        sync.set_tier(SubscriptionTier::Pro);
        assert_eq!(sync.preview().link("a").unwrap().settings, expiring());
    }

    #[test]
    fn test_free_tier_allows_one_video() {
        let mut sync = sync(SubscriptionTier::Free);
        assert_eq!(sync.dispatch(Edit::AddLink(video("v1"))), EditOutcome::Applied);

        let before = sync.state().clone();
        match sync.dispatch(Edit::AddLink(video("v2"))) {
            EditOutcome::Denied(upsell) => {
                assert_eq!(upsell.feature, FeatureKey::MultipleVideos);
                assert_eq!(upsell.required_tier, Some(SubscriptionTier::Pro));
            }
            other => panic!("expected denial, got {other:?}"),
        }
        assert_eq!(*sync.state(), before);

        // Turning another link into a video hits the same limit
        let outcome = sync.dispatch(Edit::MergeVideoMetadata {
            id: "a".into(),
            metadata: VideoMetadata::default(),
        });
        assert!(matches!(outcome, EditOutcome::Denied(_)));
        assert_eq!(sync.dispatch(Edit::UpdateLink(video("b"))), outcome);

        sync.set_tier(SubscriptionTier::Pro);
        assert_eq!(sync.dispatch(Edit::AddLink(video("v2"))), EditOutcome::Applied);
    }

    #[test]
    fn test_footer_uses_configured_brand() {
        let settings = EngineSettings {
            footer_brand: "Acme".into(),
            ..EngineSettings::default()
        };
        let sync = PreviewSynchronizer::new(snapshot(), SubscriptionTier::Free, &settings);
        let footer = sync.preview().tree.zone(ZoneKind::Footer).unwrap();
        assert!(matches!(&footer.nodes[0], crate::render::Node::Attribution { brand, .. } if brand == "Acme"));
    }
}
