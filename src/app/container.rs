use std::sync::Arc;

use crate::adapters::{
    FFmpegAdapter, FFprobeAdapter, FixedApproval, LocalFsAdapter, StdinPromptAdapter,
    SystemClipboardAdapter,
};
use crate::app::checkpoint_gate::CheckpointGate;
use crate::app::pipeline::{PipelinePorts, RedactionPipeline};
use crate::config_initialization::PipelineConfig;
use crate::ports::{ApprovalPort, ClipboardPort, ExecutePort, FsPort, ProbePort, PromptPort};

pub trait AppContainer: Send + Sync {
    fn pipeline(&self) -> Arc<RedactionPipeline>;
}

/// Wires the pipeline to ffmpeg and the local disk. The checkpoint reads
/// stdin and the system clipboard unless the untouched set was given up front
pub struct DefaultAppContainer {
    pipeline: Arc<RedactionPipeline>,
}

impl DefaultAppContainer {
    pub fn new(config: &PipelineConfig) -> Self {
        let probe_port = Arc::new(FFprobeAdapter::new(
            config.ffmpeg.clone(),
            config.ffprobe.clone(),
        ));
        let execute_port = Arc::new(FFmpegAdapter::new(config.ffmpeg.clone()));
        let fs_port = Arc::new(LocalFsAdapter::new());

        let approval_port: Arc<dyn ApprovalPort> = match &config.untouched {
            Some(untouched) => Arc::new(FixedApproval::approve(untouched.clone())),
            None => Arc::new(CheckpointGate::new(
                Arc::new(StdinPromptAdapter::new()) as Arc<dyn PromptPort>,
                Arc::new(SystemClipboardAdapter::new()) as Arc<dyn ClipboardPort>,
            )),
        };

        let pipeline = Arc::new(RedactionPipeline::new(
            PipelinePorts {
                probe: probe_port as Arc<dyn ProbePort>,
                execute: execute_port as Arc<dyn ExecutePort>,
                fs: fs_port as Arc<dyn FsPort>,
                approval: approval_port,
            },
            config,
        ));

        Self { pipeline }
    }
}

impl AppContainer for DefaultAppContainer {
    fn pipeline(&self) -> Arc<RedactionPipeline> {
        Arc::clone(&self.pipeline)
    }
}
