use shell::{ShellApp, ShellConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::controller::LockscreenApp;
use super::options::{OptionsError, ShellOptions};
use super::profiles::ProfileCatalog;
use super::view::LogPresenter;

pub(crate) struct AppWiring {
    pub config: ShellConfig,
    pub app: Box<dyn ShellApp>,
}

/// Initializes tracing, loads options, and wires the lockscreen app to
/// the shell loop. Options problems abort startup; everything else is
/// recoverable at runtime.
pub(crate) fn build_app() -> Result<AppWiring, OptionsError> {
    init_tracing();
    info!("=== Lockscreen Demo Startup ===");

    let options = ShellOptions::load_from_env()?;
    let resolved = options.resolve()?;
    info!(
        digit_source = ?resolved.digit_source,
        regions = resolved.regions.len(),
        rumble_on_select = resolved.rumble_on_select,
        "options_resolved"
    );

    let app = LockscreenApp::new(resolved, ProfileCatalog::demo(), Box::new(LogPresenter));
    let config = ShellConfig {
        window_title: "Handheld Lockscreen Demo".to_string(),
        ..ShellConfig::default()
    };

    Ok(AppWiring {
        config,
        app: Box::new(app),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
