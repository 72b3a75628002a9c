use anyhow::{Context, Result};

use enex2text_lib::ConverterConfig;

use crate::Cli;

/// Shared state for both conversion modes
pub struct App {
    pub config: ConverterConfig,
    pub dry_run: bool,
}

impl App {
    /// Build the configuration: defaults, then the config file, then flags
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => ConverterConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ConverterConfig::default(),
        };

        if let Some(dir) = &cli.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &cli.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &cli.archive_dir {
            config.archive_dir = dir.clone();
        }
        if let Some(strip) = &cli.strip {
            config.strip_mode = strip.clone().into();
        }

        log::debug!("Using {:?}", config);

        Ok(Self {
            config,
            dry_run: cli.dry_run,
        })
    }

    /// Create the output and archive directories, unless this is a dry run
    pub fn prepare(&self) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        self.config
            .ensure_dirs()
            .context("Failed to create output directories")
    }
}
