//! Logger setup.
//!
//! The `log` facade is used throughout the crate; this module wires it to
//! `env_logger` once per process.

use std::{fs::File, path::PathBuf, sync::Once};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directives such as `"info"` or `"moving_sphere_box=debug,wgpu=warn"`.
    /// Falls back to `RUST_LOG`, then to `info`.
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Write the log into this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            log_file: if cfg!(debug_assertions) {
                Some(PathBuf::from("LogReport.txt"))
            } else {
                None
            },
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. If the log file cannot be created the logger
/// stays on stderr and says so.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        let mut file_error = None;
        if let Some(path) = &config.log_file {
            match File::create(path) {
                Ok(file) => {
                    builder.write_style(env_logger::WriteStyle::Never);
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(e) => file_error = Some((path.clone(), e)),
            }
        }

        if let Err(e) = builder.try_init() {
            eprintln!("Warning: Could not initialize logger: {}", e);
            return;
        }

        if let Some((path, e)) = file_error {
            log::warn!("cannot open log file {}: {}", path.display(), e);
        }
        log::debug!("logging initialized");
    });
}
