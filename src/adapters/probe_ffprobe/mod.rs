//! FFprobe adapter for media file probing
//!
//! Duration and stream queries go through `ffprobe` with JSON output. Scene
//! detection has no ffprobe equivalent, so it runs `ffmpeg` with the
//! `select`/`showinfo` filters and reads the timestamps off its stderr.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::adapters::process::{file_label, ToolInvocation};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffmpeg: String,
    ffprobe: String,
}

#[derive(Debug, Deserialize)]
struct FormatReport {
    format: FormatSection,
}

#[derive(Debug, Deserialize)]
struct FormatSection {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamReport {
    #[serde(default)]
    streams: Vec<StreamEntry>,
}

#[derive(Debug, Deserialize)]
struct StreamEntry {
    codec_type: Option<String>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffmpeg: impl Into<String>, ffprobe: impl Into<String>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    fn output_error(&self, message: String) -> DomainError {
        DomainError::ToolOutput {
            tool: self.ffprobe.clone(),
            message,
        }
    }

    /// Parse `-show_entries format=duration -of json` output
    pub fn parse_duration(&self, json: &str) -> Result<f64, DomainError> {
        let report: FormatReport = serde_json::from_str(json)
            .map_err(|e| self.output_error(format!("unreadable format report: {}", e)))?;
        let raw = report
            .format
            .duration
            .ok_or_else(|| self.output_error("no duration in format report".to_string()))?;
        raw.trim()
            .parse::<f64>()
            .map_err(|e| self.output_error(format!("bad duration {:?}: {}", raw, e)))
    }

    /// Parse `-show_entries stream=codec_type -of json` output
    pub fn parse_streams(&self, json: &str) -> Result<StreamSummary, DomainError> {
        let report: StreamReport = serde_json::from_str(json)
            .map_err(|e| self.output_error(format!("unreadable stream report: {}", e)))?;

        let mut summary = StreamSummary::default();
        for stream in &report.streams {
            match stream.codec_type.as_deref() {
                Some("video") => summary.has_video = true,
                Some("audio") => summary.has_audio = true,
                _ => {}
            }
        }
        Ok(summary)
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn detect_scene_cuts(
        &self,
        source: &Path,
        threshold: f64,
    ) -> Result<Vec<f64>, DomainError> {
        let filter = format!("select='gt(scene,{})',showinfo", threshold);
        let output = ToolInvocation::new(&self.ffmpeg, "detecting scene changes")
            .args(["-hide_banner", "-nostdin", "-i"])
            .arg(source)
            .args(["-filter:v", filter.as_str(), "-f", "null", "-"])
            .run()
            .await?;

        Ok(rules::parse_scene_timestamps(&output.stderr))
    }

    async fn query_duration(&self, file: &Path) -> Result<f64, DomainError> {
        let output = ToolInvocation::new(
            &self.ffprobe,
            format!("querying duration of {}", file_label(file)),
        )
        .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
        .arg(file)
        .run()
        .await?;

        self.parse_duration(&output.stdout)
    }

    async fn probe_streams(&self, file: &Path) -> Result<StreamSummary, DomainError> {
        let output = ToolInvocation::new(
            &self.ffprobe,
            format!("probing streams of {}", file_label(file)),
        )
        .args(["-v", "error", "-show_entries", "stream=codec_type", "-of", "json"])
        .arg(file)
        .run()
        .await?;

        self.parse_streams(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> FFprobeAdapter {
        FFprobeAdapter::new("ffmpeg", "ffprobe")
    }

    #[test]
    fn test_parse_duration() {
        let json = r#"{ "format": { "duration": "10.000000" } }"#;
        assert_eq!(adapter().parse_duration(json).unwrap(), 10.0);
    }

    #[test]
    fn test_parse_duration_missing() {
        let json = r#"{ "format": {} }"#;
        assert!(matches!(
            adapter().parse_duration(json),
            Err(DomainError::ToolOutput { .. })
        ));
        assert!(adapter().parse_duration("not json").is_err());
        assert!(adapter()
            .parse_duration(r#"{ "format": { "duration": "N/A" } }"#)
            .is_err());
    }

    #[test]
    fn test_parse_streams_video_and_audio() {
        let json = r#"{
            "programs": [],
            "streams": [ { "codec_type": "video" }, { "codec_type": "audio" } ]
        }"#;
        let summary = adapter().parse_streams(json).unwrap();
        assert!(summary.has_video);
        assert!(summary.has_audio);
    }

    #[test]
    fn test_parse_streams_audio_only() {
        let json = r#"{ "streams": [ { "codec_type": "audio" }, { "codec_type": "data" } ] }"#;
        let summary = adapter().parse_streams(json).unwrap();
        assert!(!summary.has_video);
        assert!(summary.has_audio);
    }

    #[test]
    fn test_parse_streams_empty_report() {
        let summary = adapter().parse_streams("{}").unwrap();
        assert_eq!(summary, StreamSummary::default());
    }
}
