mod cli;
mod demo;

use huddle_common::{HuddleError, ParticipantId};
use huddle_config::HuddleConfig;
use huddle_session::{EncoderConfig, SessionConfig};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map the file schema onto the coordinator's runtime settings.
fn session_config(config: &HuddleConfig) -> SessionConfig {
    let encoder = &config.media.encoder;
    SessionConfig {
        app_id: config.media.app_id.clone(),
        token: config.media.token.clone(),
        encoder: EncoderConfig {
            width: encoder.width,
            height: encoder.height,
            frame_rate: encoder.frame_rate,
            bitrate_min_kbps: encoder.bitrate_min_kbps,
            bitrate_max_kbps: encoder.bitrate_max_kbps,
        },
        system_author: config.chat.system_author.clone(),
    }
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(e) => {
            eprintln!("ignoring log level {directive:?}: {e}");
            filter.add_directive(LevelFilter::INFO.into())
        }
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), HuddleError> {
    let args = cli::parse();

    // Config is read before logging exists so its level can apply.
    let (config, load_error) = match huddle_config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (HuddleConfig::default(), Some(e)),
    };

    let directive = match &args.log_level {
        Some(level) => format!("huddle={level}"),
        None => config.logging.level.directive().to_string(),
    };
    init_logging(&directive);

    tracing::info!("huddle v{} starting", env!("CARGO_PKG_VERSION"));
    match load_error {
        Some(e) => tracing::warn!("Config load failed, using defaults: {e}"),
        // Loading ran before the subscriber existed, so repeat its check.
        None => {
            if let Err(e) = huddle_config::validation::validate(&config) {
                tracing::warn!("{e}; keeping configured values");
            }
        }
    }
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    tracing::debug!(config = %huddle_config::config_to_json(&config), "effective config");

    let self_id = ParticipantId::generate();
    tracing::info!(participant_id = %self_id, room = %args.room, "starting session");

    demo::run(&args, session_config(&config), self_id)
        .await
        .map_err(|e| HuddleError::session(&args.room, e))?;

    tracing::info!("Shutdown complete");
    Ok(())
}
