//! FFmpeg execution adapter
//!
//! Every media-producing step of the pipeline is one `ffmpeg` process. The
//! argument lists are built by plain functions so they can be checked without
//! running the tool.

use std::ffi::OsString;
use std::path::Path;

use async_trait::async_trait;

use crate::adapters::process::{file_label, ToolInvocation};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Mask scaled to the segment's frame, then laid over it
const OVERLAY_FILTER: &str = "[1][0]scale2ref[i][v];[v][i]overlay";

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    ffmpeg: String,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter using the given binary
    pub fn new(ffmpeg: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
        }
    }

    async fn run(&self, action: String, args: Vec<OsString>) -> Result<(), DomainError> {
        ToolInvocation::new(&self.ffmpeg, action)
            .args(args)
            .run()
            .await
            .map(|_| ())
    }
}

/// Seconds as passed to `-ss` / `-to`
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.6}", seconds)
}

fn base_args() -> Vec<OsString> {
    vec!["-hide_banner".into(), "-nostdin".into()]
}

pub fn cut_args(source: &Path, range: SegmentRange, output: &Path) -> Vec<OsString> {
    let mut args = base_args();
    args.extend([
        "-y".into(),
        "-i".into(),
        source.as_os_str().to_os_string(),
        "-ss".into(),
        format_seconds(range.start).into(),
        "-to".into(),
        format_seconds(range.end).into(),
        "-c".into(),
        "copy".into(),
        output.as_os_str().to_os_string(),
    ]);
    args
}

pub fn overlay_args(input: &Path, mask: &Path, output: &Path) -> Vec<OsString> {
    let mut args = base_args();
    args.extend([
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_os_string(),
        "-i".into(),
        mask.as_os_str().to_os_string(),
        "-filter_complex".into(),
        OVERLAY_FILTER.into(),
        "-c:a".into(),
        "copy".into(),
        output.as_os_str().to_os_string(),
    ]);
    args
}

pub fn synthesize_args(input: &Path, mask: &Path, output: &Path) -> Vec<OsString> {
    let mut args = base_args();
    args.extend([
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_os_string(),
        "-loop".into(),
        "1".into(),
        "-i".into(),
        mask.as_os_str().to_os_string(),
        "-map".into(),
        "1:v".into(),
        "-map".into(),
        "0:a".into(),
        "-c:a".into(),
        "copy".into(),
        "-c:v".into(),
        "h264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-shortest".into(),
        output.as_os_str().to_os_string(),
    ]);
    args
}

pub fn normalize_args(input: &Path, output: &Path, settings: NormalizeSettings) -> Vec<OsString> {
    let mut args = base_args();
    args.extend([
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_os_string(),
        "-q".into(),
        settings.quality.to_string().into(),
        "-max_muxing_queue_size".into(),
        settings.max_muxing_queue_size.to_string().into(),
        output.as_os_str().to_os_string(),
    ]);
    args
}

pub fn concat_args(manifest: &Path, output: &Path) -> Vec<OsString> {
    let mut args = base_args();
    args.extend([
        "-n".into(),
        "-f".into(),
        "concat".into(),
        "-i".into(),
        manifest.as_os_str().to_os_string(),
        "-c".into(),
        "copy".into(),
        output.as_os_str().to_os_string(),
    ]);
    args
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn cut_segment(
        &self,
        source: &Path,
        range: SegmentRange,
        output: &Path,
    ) -> Result<(), DomainError> {
        self.run(
            format!("cutting {} {}", file_label(output), range),
            cut_args(source, range, output),
        )
        .await
    }

    async fn overlay_mask(
        &self,
        input: &Path,
        mask: &Path,
        output: &Path,
    ) -> Result<(), DomainError> {
        self.run(
            format!("masking {}", file_label(input)),
            overlay_args(input, mask, output),
        )
        .await
    }

    async fn synthesize_video(
        &self,
        input: &Path,
        mask: &Path,
        output: &Path,
    ) -> Result<(), DomainError> {
        self.run(
            format!("synthesizing video for {}", file_label(input)),
            synthesize_args(input, mask, output),
        )
        .await
    }

    async fn normalize(
        &self,
        input: &Path,
        output: &Path,
        settings: NormalizeSettings,
    ) -> Result<(), DomainError> {
        self.run(
            format!("normalizing {}", file_label(input)),
            normalize_args(input, output, settings),
        )
        .await
    }

    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<(), DomainError> {
        self.run(
            format!("concatenating into {}", file_label(output)),
            concat_args(manifest, output),
        )
        .await
    }
}
