//! Shared fakes for pipeline tests
//!
//! `FakeMedia` stands in for ffmpeg and ffprobe. Every tool call writes a
//! small text file whose contents record how it was produced, so a test can
//! read the final output and see which operations each segment went through.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use cavid::adapters::{FixedApproval, LocalFsAdapter};
use cavid::app::pipeline::{PipelinePorts, RedactionPipeline};
use cavid::config_initialization::PipelineConfig;
use cavid::domain::errors::DomainError;
use cavid::domain::model::{
    Approval, NormalizeSettings, SegmentRange, StreamSummary, UntouchedSet,
};
use cavid::ports::{ApprovalPort, ExecutePort, FsPort, ProbePort};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DetectScenes,
    QueryDuration,
    ProbeStreams(String),
    Cut(String, SegmentRange),
    Overlay(String),
    Synthesize(String),
    Normalize(String),
    Concatenate(String),
}

pub struct FakeMedia {
    cuts: Vec<f64>,
    duration: f64,
    streams: HashMap<String, StreamSummary>,
    failing_overlay: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeMedia {
    pub fn new(cuts: Vec<f64>, duration: f64) -> Self {
        Self {
            cuts,
            duration,
            streams: HashMap::new(),
            failing_overlay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Report `file_name` as carrying audio only
    pub fn audio_only(mut self, file_name: &str) -> Self {
        self.streams.insert(
            file_name.to_string(),
            StreamSummary {
                has_video: false,
                has_audio: true,
            },
        );
        self
    }

    /// Report `file_name` as carrying no streams at all
    pub fn empty_streams(mut self, file_name: &str) -> Self {
        self.streams
            .insert(file_name.to_string(), StreamSummary::default());
        self
    }

    /// Make the overlay of `file_name` exit with an error
    pub fn failing_overlay(mut self, file_name: &str) -> Self {
        self.failing_overlay = Some(file_name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn derive(input: &Path, output: &Path, step: &str) -> Result<(), DomainError> {
    let contents = std::fs::read_to_string(input)?;
    std::fs::write(output, format!("{}|{}", contents, step))?;
    Ok(())
}

#[async_trait]
impl ProbePort for FakeMedia {
    async fn detect_scene_cuts(&self, _source: &Path, threshold: f64) -> Result<Vec<f64>, DomainError> {
        assert_eq!(threshold, 0.3);
        self.record(Call::DetectScenes);
        Ok(self.cuts.clone())
    }

    async fn query_duration(&self, _file: &Path) -> Result<f64, DomainError> {
        self.record(Call::QueryDuration);
        Ok(self.duration)
    }

    async fn probe_streams(&self, file: &Path) -> Result<StreamSummary, DomainError> {
        let name = name_of(file);
        self.record(Call::ProbeStreams(name.clone()));
        Ok(self.streams.get(&name).copied().unwrap_or(StreamSummary {
            has_video: true,
            has_audio: true,
        }))
    }
}

#[async_trait]
impl ExecutePort for FakeMedia {
    async fn cut_segment(
        &self,
        _source: &Path,
        range: SegmentRange,
        output: &Path,
    ) -> Result<(), DomainError> {
        self.record(Call::Cut(name_of(output), range));
        std::fs::write(output, format!("cut {:.3}-{:.3}", range.start, range.end))?;
        Ok(())
    }

    async fn overlay_mask(&self, input: &Path, mask: &Path, output: &Path) -> Result<(), DomainError> {
        let name = name_of(input);
        self.record(Call::Overlay(name.clone()));
        assert!(mask.exists(), "mask must exist while redacting");
        if self.failing_overlay.as_deref() == Some(name.as_str()) {
            return Err(DomainError::ToolFailed {
                tool: "ffmpeg".to_string(),
                action: format!("masking {}", name),
                status: "exit status: 1".to_string(),
                stderr: "Invalid data found when processing input".to_string(),
            });
        }
        derive(input, output, "masked")
    }

    async fn synthesize_video(&self, input: &Path, _mask: &Path, output: &Path) -> Result<(), DomainError> {
        self.record(Call::Synthesize(name_of(input)));
        derive(input, output, "synthesized")
    }

    async fn normalize(
        &self,
        input: &Path,
        output: &Path,
        settings: NormalizeSettings,
    ) -> Result<(), DomainError> {
        assert_eq!(settings, NormalizeSettings::default());
        self.record(Call::Normalize(name_of(input)));
        derive(input, output, "normalized")
    }

    async fn concatenate(&self, manifest: &Path, output: &Path) -> Result<(), DomainError> {
        self.record(Call::Concatenate(name_of(output)));
        assert!(!output.exists(), "concatenation must never overwrite");
        let dir = manifest.parent().unwrap();
        let listing = std::fs::read_to_string(manifest)?;
        let mut parts = Vec::new();
        for line in listing.lines() {
            let name = line
                .strip_prefix("file '")
                .and_then(|rest| rest.strip_suffix('\''))
                .unwrap();
            parts.push(std::fs::read_to_string(dir.join(name))?);
        }
        std::fs::write(output, parts.join("\n"))?;
        Ok(())
    }
}

/// A working directory holding a source video and the mask image
pub struct Job {
    pub dir: TempDir,
    pub source: PathBuf,
}

impl Job {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.mov");
        std::fs::write(&source, "source").unwrap();
        std::fs::write(dir.path().join("mask.png"), "mask").unwrap();
        Self { dir, source }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::defaults(self.dir.path().to_path_buf());
        config.workers = 2;
        config
    }

    pub fn pipeline(&self, media: &Arc<FakeMedia>, approval: Approval) -> RedactionPipeline {
        let approval: Arc<dyn ApprovalPort> = match approval {
            Approval::Approved(untouched) => Arc::new(FixedApproval::approve(untouched)),
            Approval::Quit => Arc::new(FixedApproval::quit()),
        };
        RedactionPipeline::new(
            PipelinePorts {
                probe: Arc::clone(media) as Arc<dyn ProbePort>,
                execute: Arc::clone(media) as Arc<dyn ExecutePort>,
                fs: Arc::new(LocalFsAdapter::new()) as Arc<dyn FsPort>,
                approval,
            },
            &self.config(),
        )
    }

    /// Sorted names of every file in the working directory
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn read(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.path().join(file_name)).unwrap()
    }
}

pub fn approve(names: &[&str]) -> Approval {
    Approval::Approved(UntouchedSet::from_names(names.iter().copied()))
}
