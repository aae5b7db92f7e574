use std::collections::HashMap;
use std::sync::OnceLock;

use super::normalizer::normalize_name;
use crate::workflows::pipeline::domain::Stage;
use crate::workflows::pipeline::track::StageTrack;

static STAGE_ALIASES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Resolve a normalized tracker stage label against the track: exact
/// normalized name first, then the alias table of labels other trackers
/// commonly export.
pub(crate) fn stage_for_normalized<'a>(
    track: &'a StageTrack,
    normalized: &str,
) -> Option<&'a Stage> {
    if let Some(stage) = stage_by_normalized_name(track, normalized) {
        return Some(stage);
    }

    stage_aliases()
        .get(normalized)
        .and_then(|canonical| stage_by_normalized_name(track, canonical))
}

fn stage_by_normalized_name<'a>(track: &'a StageTrack, normalized: &str) -> Option<&'a Stage> {
    track
        .stages()
        .iter()
        .find(|stage| normalize_name(&stage.name) == normalized)
}

fn stage_aliases() -> &'static HashMap<&'static str, &'static str> {
    STAGE_ALIASES.get_or_init(|| {
        const ALIAS_TO_CANONICAL: &[(&str, &str)] = &[
            ("new", "applied"),
            ("application received", "applied"),
            ("application review", "applied"),
            ("phone screen", "screen"),
            ("hr screen", "screen"),
            ("recruiter screen", "screen"),
            ("tech interview", "interview"),
            ("technical interview", "interview"),
            ("onsite", "interview"),
            ("on-site", "interview"),
            ("offer extended", "offer"),
            ("offer sent", "offer"),
            ("hired", "hire"),
            ("joined", "hire"),
        ];

        ALIAS_TO_CANONICAL.iter().copied().collect()
    })
}
