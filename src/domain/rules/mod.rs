// Business rules - Parsing and partitioning used across pipeline stages

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::model::{SegmentName, UntouchedSet};

static SCENE_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pts_time:([0-9]+(?:\.[0-9]+)?)").expect("valid regex"));

static SEGMENT_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.mp4").expect("valid regex"));

static SEGMENT_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.mp4$").expect("valid regex"));

/// Extract every `pts_time:` value from the scene detector's diagnostics
pub fn parse_scene_timestamps(diagnostics: &str) -> Vec<f64> {
    SCENE_TIMESTAMP
        .captures_iter(diagnostics)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .collect()
}

/// Every substring of `text` that looks like a segment file name
pub fn extract_segment_names(text: &str) -> BTreeSet<String> {
    SEGMENT_MENTION
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whether a whole file name is a segment file name
pub fn is_segment_file_name(file_name: &str) -> bool {
    SEGMENT_FILE.is_match(file_name)
}

/// Keep the directory entries that are segments, in playback order
pub fn select_segments<I, S>(file_names: I) -> Vec<SegmentName>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segments: Vec<SegmentName> = file_names
        .into_iter()
        .filter_map(|name| SegmentName::parse(name.as_ref()))
        .collect();
    segments.sort();
    segments
}

/// Split segments into redaction targets and exempted segments
pub fn partition_targets(
    segments: &[SegmentName],
    untouched: &UntouchedSet,
) -> (Vec<SegmentName>, Vec<SegmentName>) {
    segments
        .iter()
        .cloned()
        .partition(|segment| !untouched.contains(segment.file_name()))
}

/// Untouched names that do not match any existing segment
pub fn unmatched_untouched<'a>(
    segments: &[SegmentName],
    untouched: &'a UntouchedSet,
) -> Vec<&'a str> {
    untouched
        .iter()
        .filter(|name| !segments.iter().any(|s| s.file_name() == *name))
        .collect()
}

/// Whether a plain file name is safe to use as a pipeline artifact name
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

#[cfg(test)]
mod tests;
