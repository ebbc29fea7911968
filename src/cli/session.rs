//! Per-invocation engine setup
//!
//! Resolves the configuration, applies the global flag overrides and owns the
//! dataset cache every command reads from.

use std::sync::Arc;

use miette::Result;
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::core::analytics::ValueMode;
use crate::core::cache::DataCache;
use crate::core::config::Config;
use crate::core::generator::Generator;
use crate::entities::record::MarketRecord;

pub struct Session {
    pub config: Config,
    cache: DataCache<Generator>,
}

impl Session {
    /// Load config and prepare a cold cache
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let mut config =
            Config::resolve(global.config.as_deref()).map_err(|e| miette::miette!("{}", e))?;
        if let Some(seed) = global.seed {
            config.seed = seed;
        }
        if let Some(mode) = global.mode {
            config.value_mode = mode.to_value_mode();
        }
        debug!(
            seed = config.seed,
            reseed = %config.reseed,
            mode = %config.value_mode,
            "session opened"
        );

        let generator = Generator::new(config.seed, config.reseed);
        Ok(Self {
            config,
            cache: DataCache::new(generator),
        })
    }

    pub fn mode(&self) -> ValueMode {
        self.config.value_mode
    }

    /// The full dataset, generated on first use
    pub fn data(&self) -> Arc<[MarketRecord]> {
        self.cache.get_data()
    }

    pub fn cache(&self) -> &DataCache<Generator> {
        &self.cache
    }
}
