// Adapters - External system implementations

pub mod clipboard_system;
pub mod exec_ffmpeg;
pub mod fixed_approval;
pub mod fs_local;
pub mod probe_ffprobe;
pub mod process;
pub mod prompt_stdin;
pub mod toml_config;

// Re-export adapters
pub use clipboard_system::SystemClipboardAdapter;
pub use exec_ffmpeg::FFmpegAdapter;
pub use fixed_approval::FixedApproval;
pub use fs_local::LocalFsAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use prompt_stdin::StdinPromptAdapter;
pub use toml_config::TomlConfigAdapter;
