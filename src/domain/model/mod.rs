// Domain models - Core types and data structures

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::domain::errors::DomainError;
use crate::domain::rules;

/// Scene-change sensitivity passed to the detection filter
pub const SCENE_THRESHOLD: f64 = 0.3;

/// Container extension of every segment file
pub const SEGMENT_EXTENSION: &str = "mp4";

/// Narrowest zero-padded index used in segment names
pub const MIN_INDEX_WIDTH: usize = 3;

/// Prefix of the temporary file written by the redaction stage
pub const REDACT_PREFIX: &str = "h";

/// Prefix of the temporary file written by the normalization stage
pub const NORMALIZE_PREFIX: &str = "s";

/// Scene boundaries in seconds.
///
/// Always strictly increasing, starting at exactly `0.0` and ending at exactly
/// the source duration, so a sequence of `n` timecodes describes `n - 1`
/// contiguous segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Timecodes(Vec<f64>);

impl Timecodes {
    /// Bracket detected scene cuts with the start and end of the source.
    ///
    /// Detections outside the open interval `(0, duration)` and duplicates are
    /// discarded; the detector may report them in any order.
    pub fn from_detections(
        detected: impl IntoIterator<Item = f64>,
        duration: f64,
    ) -> Result<Self, DomainError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DomainError::InvalidDuration(duration));
        }

        let mut cuts: Vec<f64> = detected
            .into_iter()
            .filter(|t| t.is_finite() && *t > 0.0 && *t < duration)
            .collect();
        cuts.sort_by(|a, b| a.total_cmp(b));
        cuts.dedup();

        let mut points = Vec::with_capacity(cuts.len() + 2);
        points.push(0.0);
        points.extend(cuts);
        points.push(duration);

        Ok(Self(points))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of segments these boundaries describe
    pub fn segment_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Half-open ranges between consecutive boundaries
    pub fn ranges(&self) -> impl Iterator<Item = SegmentRange> + '_ {
        self.0.windows(2).map(|pair| SegmentRange {
            start: pair[0],
            end: pair[1],
        })
    }

    /// Pair every range with the segment file it will be cut into
    pub fn segments(&self) -> Vec<(SegmentName, SegmentRange)> {
        let width = SegmentName::width_for(self.segment_count());
        self.ranges()
            .enumerate()
            .map(|(i, range)| (SegmentName::new(i as u32 + 1, width), range))
            .collect()
    }
}

/// Half-open time range `[start, end)` of one segment, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRange {
    pub start: f64,
    pub end: f64,
}

impl SegmentRange {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for SegmentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s)", self.start, self.end)
    }
}

/// File name of one segment: a zero-padded 1-based index plus extension.
///
/// The fixed-width index is both the identity and the playback order of the
/// segment, so sorting names by index yields the order of the source video.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentName {
    index: u32,
    file_name: String,
}

impl SegmentName {
    /// Create the name of segment `index`, padded to `width` digits
    pub fn new(index: u32, width: usize) -> Self {
        Self {
            index,
            file_name: format!("{:0width$}.{}", index, SEGMENT_EXTENSION, width = width),
        }
    }

    /// Index width for a run producing `count` segments
    pub fn width_for(count: usize) -> usize {
        MIN_INDEX_WIDTH.max(count.to_string().len())
    }

    /// Recognize a directory entry as a segment file
    pub fn parse(file_name: &str) -> Option<Self> {
        if !rules::is_segment_file_name(file_name) {
            return None;
        }
        let digits = file_name.split('.').next()?;
        let index = digits.parse::<u32>().ok()?;
        Some(Self {
            index,
            file_name: file_name.to_string(),
        })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Name of the stage-local temporary file shadowing this segment
    pub fn temporary(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.file_name)
    }
}

impl Ord for SegmentName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then_with(|| self.file_name.cmp(&other.file_name))
    }
}

impl PartialOrd for SegmentName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)
    }
}

/// Segment file names the operator exempted from redaction.
///
/// Built once at the checkpoint and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UntouchedSet(BTreeSet<String>);

impl UntouchedSet {
    /// Extract every segment file name mentioned anywhere in `text`
    pub fn from_text(text: &str) -> Self {
        Self(rules::extract_segment_names(text))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.0.contains(file_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Input listing for the concat demuxer, always in playback order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<SegmentName>,
}

impl Manifest {
    pub fn new(mut segments: Vec<SegmentName>) -> Self {
        segments.sort();
        Self { entries: segments }
    }

    pub fn entries(&self) -> &[SegmentName] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `file '<name>'` lines
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|segment| format!("file '{}'\n", segment.file_name()))
            .collect()
    }
}

/// Stream kinds present in a probed file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub has_video: bool,
    pub has_audio: bool,
}

/// Uniform re-encode applied to every segment before concatenation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeSettings {
    /// Value passed to `-q`; 0 is the best quality the encoder offers
    pub quality: u8,
    /// Packets buffered per stream while muxing skewed inputs
    pub max_muxing_queue_size: u32,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            quality: 0,
            max_muxing_queue_size: 1024,
        }
    }
}

/// Operator decision at the checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approval {
    Approved(UntouchedSet),
    Quit,
}

/// Process exit code of a completed run
pub const EXIT_SUCCESS: u8 = 0;

/// Process exit code of a run that hit a fatal error
pub const EXIT_FAILURE: u8 = 1;

/// Process exit code of a run the operator quit at the checkpoint
pub const EXIT_OPERATOR_QUIT: u8 = 3;

/// How a pipeline run ended without error
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Completed {
        output: PathBuf,
        segments: usize,
        redacted: usize,
        synthesized: usize,
    },
    /// Operator quit at the checkpoint; segments were left as cut
    Aborted,
}

impl PipelineOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineOutcome::Completed { .. } => EXIT_SUCCESS,
            PipelineOutcome::Aborted => EXIT_OPERATOR_QUIT,
        }
    }
}

#[cfg(test)]
mod tests;
