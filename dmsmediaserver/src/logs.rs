//! Initialisation du logging (`tracing`).
//!
//! Le niveau minimum vient de la configuration et reste modifiable à chaud
//! via le [`LogHandle`] retourné.

use std::sync::Arc;

use dmsconfig::Config;
use parking_lot::RwLock;
use tracing::Level;
use tracing_subscriber::{
    Registry, filter::LevelFilter, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Niveaux acceptés, du plus au moins sévère
pub const AVAILABLE_LEVELS: [&str; 5] = ["ERROR", "WARN", "INFO", "DEBUG", "TRACE"];

/// Contrôle du niveau de log après initialisation
#[derive(Clone)]
pub struct LogHandle {
    max_level: Arc<RwLock<Level>>,
    reload_handle: reload::Handle<LevelFilter, Registry>,
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle")
            .field("max_level", &*self.max_level.read())
            .finish()
    }
}

impl LogHandle {
    pub fn set_max_level(&self, level: Level) -> anyhow::Result<()> {
        self.reload_handle.reload(LevelFilter::from_level(level))?;
        *self.max_level.write() = level;
        tracing::info!("Log level changed to: {}", level_to_string(level));
        Ok(())
    }

    pub fn get_max_level(&self) -> Level {
        *self.max_level.read()
    }
}

/// Installe le subscriber global : filtre rechargeable puis, si activée, la console.
///
/// # Errors
///
/// Échoue si un subscriber global est déjà installé.
pub fn init_logging(config: &Config) -> anyhow::Result<LogHandle> {
    let level = config
        .get_log_min_level()
        .ok()
        .and_then(|l| string_to_level(&l))
        .unwrap_or(Level::INFO);

    let (filter, reload_handle) = reload::Layer::new(LevelFilter::from_level(level));
    let subscriber = Registry::default().with(filter);

    if config.get_log_enable_console().unwrap_or(true) {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(true),
            )
            .try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(LogHandle {
        max_level: Arc::new(RwLock::new(level)),
        reload_handle,
    })
}

pub fn string_to_level(s: &str) -> Option<Level> {
    match s.trim().to_uppercase().as_str() {
        "ERROR" => Some(Level::ERROR),
        "WARN" | "WARNING" => Some(Level::WARN),
        "INFO" => Some(Level::INFO),
        "DEBUG" => Some(Level::DEBUG),
        "TRACE" => Some(Level::TRACE),
        _ => None,
    }
}

pub fn level_to_string(level: Level) -> String {
    level.as_str().to_string()
}
