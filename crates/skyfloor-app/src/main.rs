mod config;
mod layout;
mod scene;

use std::process::ExitCode;

use skyfloor_engine::logging::{init_logging, LoggingConfig};
use skyfloor_engine::window::{RunError, Runtime};

use crate::config::DemoConfig;
use crate::scene::SkyfloorApp;

/// Exit status when the configuration cannot be read.
const EXIT_CONFIG: u8 = 1;
/// Exit status when the display session cannot be started.
const EXIT_SESSION: u8 = 2;

fn main() -> ExitCode {
    let config_path = DemoConfig::locate();
    let config = match DemoConfig::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            init_logging(LoggingConfig::default());
            log::error!("{err}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });
    log::debug!("config: {config:?}");

    let app = SkyfloorApp::new(&config);
    match Runtime::run(config.session_config(), app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Init(err)) => {
            log::error!("could not start display session: {err}");
            ExitCode::from(EXIT_SESSION)
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
