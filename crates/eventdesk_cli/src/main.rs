//! Command-line entry point for the eventdesk core wiring.
//!
//! # Responsibility
//! - Bootstrap the core from an optional TOML config path.
//! - Print registered features and signal receivers deterministically.

use eventdesk_core::signals::{
    EVENT_FEATURE_DEFINITIONS, EVENT_MANAGEMENT_SIDEMENU, EVENT_SIDEMENU, USERS_MERGED,
};
use eventdesk_core::{core_version, App, CoreConfig, IdentityTranslator};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("eventdesk: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    config.init_logging()?;
    // Fails early on schema problems before anything is printed.
    let _conn = config.open_database()?;

    let app = App::bootstrap()?;
    println!("eventdesk_core version={}", core_version());

    for name in app.features().names() {
        if let Some(feature) = app.features().get(name) {
            println!(
                "feature name={} label={:?} description={:?}",
                name,
                feature.friendly_name().resolve(&IdentityTranslator),
                feature.description().resolve(&IdentityTranslator)
            );
        }
    }

    for signal in [
        USERS_MERGED,
        EVENT_MANAGEMENT_SIDEMENU,
        EVENT_SIDEMENU,
        EVENT_FEATURE_DEFINITIONS,
    ] {
        println!(
            "signal name={} receivers={}",
            signal,
            app.signals().receivers(signal).join(",")
        );
    }
    Ok(())
}
