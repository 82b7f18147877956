//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use crate::adapters::toml_config::{ConfigLayer, TomlConfigAdapter};
use crate::cli::Cli;
use crate::domain::errors::DomainError;
use crate::domain::model::{SegmentName, UntouchedSet};
use crate::domain::rules;
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Environment variables and the config keys they override
const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("CAVID_LOG_LEVEL", "log_level"),
    ("CAVID_LOG_FORMAT", "log_format"),
    ("CAVID_WORKERS", "workers"),
    ("CAVID_FFMPEG", "ffmpeg"),
    ("CAVID_FFPROBE", "ffprobe"),
    ("CAVID_MASK", "mask"),
    ("CAVID_OUTPUT", "output"),
    ("CAVID_MANIFEST", "manifest"),
];

/// Fully resolved settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory holding the mask, the segments and the final output
    pub work_dir: PathBuf,
    pub workers: usize,
    pub ffmpeg: String,
    pub ffprobe: String,
    /// File names inside `work_dir`
    pub mask: String,
    pub output: String,
    pub manifest: String,
    /// Answer for the checkpoint given up front; `None` asks the operator
    pub untouched: Option<UntouchedSet>,
    pub logging: LoggingConfig,
}

impl PipelineConfig {
    pub fn defaults(work_dir: PathBuf) -> Self {
        Self {
            work_dir,
            workers: num_cpus::get().max(1),
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            mask: "mask.png".to_string(),
            output: "final.mp4".to_string(),
            manifest: "concat_file.txt".to_string(),
            untouched: None,
            logging: LoggingConfig::default(),
        }
    }

    pub fn mask_path(&self) -> PathBuf {
        self.work_dir.join(&self.mask)
    }

    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(&self.output)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.work_dir.join(&self.manifest)
    }

    /// Apply every value set in `layer`
    pub fn apply(&mut self, layer: ConfigLayer) -> Result<(), DomainError> {
        if let Some(level) = layer.log_level {
            self.logging.level = LogLevel::parse(&level)?;
        }
        if let Some(format) = layer.log_format {
            self.logging.format = LogFormat::parse(&format)?;
        }
        if let Some(workers) = layer.workers {
            self.workers = workers;
        }
        if let Some(ffmpeg) = layer.ffmpeg {
            self.ffmpeg = ffmpeg;
        }
        if let Some(ffprobe) = layer.ffprobe {
            self.ffprobe = ffprobe;
        }
        if let Some(mask) = layer.mask {
            self.mask = mask;
        }
        if let Some(output) = layer.output {
            self.output = output;
        }
        if let Some(manifest) = layer.manifest {
            self.manifest = manifest;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.workers == 0 {
            return Err(DomainError::Config("workers must be at least 1".to_string()));
        }
        if self.ffmpeg.trim().is_empty() || self.ffprobe.trim().is_empty() {
            return Err(DomainError::Config(
                "ffmpeg and ffprobe paths cannot be empty".to_string(),
            ));
        }

        let artifacts = [
            ("mask", &self.mask),
            ("output", &self.output),
            ("manifest", &self.manifest),
        ];
        for (key, name) in artifacts {
            if !rules::is_plain_file_name(name) {
                return Err(DomainError::Config(format!(
                    "{} must be a plain file name inside the working directory, got {:?}",
                    key, name
                )));
            }
            if SegmentName::parse(name).is_some() {
                return Err(DomainError::Config(format!(
                    "{} {:?} would be mistaken for a segment file",
                    key, name
                )));
            }
        }
        if self.output == self.manifest || self.output == self.mask || self.mask == self.manifest {
            return Err(DomainError::Config(
                "mask, output and manifest must be distinct files".to_string(),
            ));
        }
        Ok(())
    }
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<PipelineConfig, DomainError> {
    let work_dir = resolve_work_dir(cli.options.work_dir.as_deref())?;
    let mut config = PipelineConfig::defaults(work_dir);

    let file_layer = load_config_file(cli.options.config.as_deref(), &config.work_dir)?;
    let env_layer = load_environment_variables(|key| std::env::var(key).ok())?;
    let cli_layer = cli_overrides(cli);

    config.apply(cli_layer.over(env_layer.over(file_layer)))?;
    if let Some(names) = &cli.options.untouched {
        config.untouched = Some(parse_untouched(names)?);
    }
    config.validate()?;
    Ok(config)
}

fn resolve_work_dir(requested: Option<&Path>) -> Result<PathBuf, DomainError> {
    let cwd = std::env::current_dir()?;
    let dir = match requested {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    };
    if !dir.is_dir() {
        return Err(DomainError::Config(format!(
            "working directory does not exist: {}",
            dir.display()
        )));
    }
    Ok(dir)
}

/// Segment names given on the command line; anything else is a typo
pub fn parse_untouched(names: &[String]) -> Result<UntouchedSet, DomainError> {
    let names: Vec<&str> = names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .collect();
    if let Some(bad) = names.iter().find(|name| !rules::is_segment_file_name(name)) {
        return Err(DomainError::Config(format!(
            "--untouched expects segment file names like 002.mp4, got {:?}",
            bad
        )));
    }
    Ok(UntouchedSet::from_names(names))
}

/// Load configuration from file
///
/// An explicit path must exist; the default `cavid.toml` is optional.
pub fn load_config_file(explicit: Option<&Path>, work_dir: &Path) -> Result<ConfigLayer, DomainError> {
    match explicit {
        Some(path) => TomlConfigAdapter::load(path),
        None => Ok(
            TomlConfigAdapter::load_optional(&work_dir.join(TomlConfigAdapter::DEFAULT_FILE_NAME))?
                .unwrap_or_default(),
        ),
    }
}

/// Load environment variables and map them onto configuration keys
pub fn load_environment_variables<F>(lookup: F) -> Result<ConfigLayer, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut layer = ConfigLayer::default();
    for (env_var, key) in ENV_MAPPINGS {
        let Some(value) = lookup(env_var) else {
            continue;
        };
        match *key {
            "log_level" => layer.log_level = Some(value),
            "log_format" => layer.log_format = Some(value),
            "workers" => {
                let workers = value.trim().parse::<usize>().map_err(|e| {
                    DomainError::Config(format!("{} must be a number: {}", env_var, e))
                })?;
                layer.workers = Some(workers);
            }
            "ffmpeg" => layer.ffmpeg = Some(value),
            "ffprobe" => layer.ffprobe = Some(value),
            "mask" => layer.mask = Some(value),
            "output" => layer.output = Some(value),
            "manifest" => layer.manifest = Some(value),
            _ => {}
        }
    }
    Ok(layer)
}

/// Apply CLI argument overrides to configuration
pub fn cli_overrides(cli: &Cli) -> ConfigLayer {
    ConfigLayer {
        log_level: cli.options.log_level.clone(),
        workers: cli.options.workers,
        ..ConfigLayer::default()
    }
}
