//! Resolved file locations and provider table for one invocation

use std::path::PathBuf;

use market_meta::ProviderMap;
use market_registry::FileSource;
use market_registry::source::{PROVIDERS_FILE, REGISTRY_FILE};

use crate::cli::Cli;
use crate::error::Result;

/// Everything a command needs from the global options.
#[derive(Debug, Clone)]
pub struct Context {
    pub registry_path: PathBuf,
    pub providers_path: PathBuf,
    pub providers: ProviderMap,
}

impl Context {
    /// Resolve paths against `--root` and load any `--provider-map`.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let registry_path = cli
            .registry
            .clone()
            .unwrap_or_else(|| cli.root.join(REGISTRY_FILE));
        let providers_path = cli
            .providers
            .clone()
            .unwrap_or_else(|| cli.root.join(PROVIDERS_FILE));

        let mut providers = ProviderMap::with_builtins();
        if let Some(path) = &cli.provider_map {
            let count = providers.load_overrides(path)?;
            tracing::info!("Using {} extra provider names from {}", count, path.display());
        }

        Ok(Self {
            registry_path,
            providers_path,
            providers,
        })
    }

    pub fn source(&self) -> FileSource {
        FileSource::new(self.registry_path.clone(), self.providers_path.clone())
    }
}
