use std::path::PathBuf;

use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use armature_core::ArmatureConfig;
use armature_ui::{run_app, LaunchOptions};

const CONFIG_ENV: &str = "ARMATURE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "armature.toml";

fn load_config() -> ArmatureConfig {
    let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if explicit.is_none() && !path.exists() {
        info!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
        return ArmatureConfig::default();
    }
    match ArmatureConfig::load(&path) {
        Ok(config) => {
            info!("configuration loaded from {}", path.display());
            config
        }
        Err(e) => {
            warn!("ignoring configuration at {}: {e}", path.display());
            ArmatureConfig::default()
        }
    }
}

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(filter)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Armature starting");
    let options = LaunchOptions {
        config: load_config(),
        fragment: std::env::args().nth(1),
    };
    if let Err(e) = run_app(options) {
        eprintln!("Armature error: {e}");
    }
}
