pub mod announcements;
pub mod appointments;
pub mod chat;
pub mod hours;
pub mod intent;
pub mod language;
pub mod server;
pub mod settings;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::{Context, Result};
use chat::{ChatService, OpenAiCompletion};
use hours::SystemClock;
use server::AppState;
use settings::ResolvedSettings;

/// Loads settings, validates them, and serves HTTP until Ctrl-C.
pub fn run() -> Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("clinic-concierge starting up...");

    let config = match load_settings() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Configuration error: {err:#}");
            return Err(err);
        }
    };

    log::info!(
        "Office hours ({}): {}",
        config.timezone.name(),
        config.schedule.summary()
    );
    if config.site.completion.api_key.is_none() {
        log::warn!(
            "{} is not set; every chat reply will be the fallback text",
            settings::API_KEY_ENV
        );
    }

    let completion = OpenAiCompletion::new(
        &config.site.completion.base_url,
        config.site.completion.api_key.clone(),
        config.site.completion.timeout(),
    )
    .context("Failed to build completion client")?;

    let clock = Arc::new(SystemClock);
    let chat = ChatService::from_settings(&config, Arc::new(completion), clock.clone())
        .context("Failed to build chat service")?;

    let state = AppState {
        chat: Arc::new(chat),
        announcements: config.site.announcements.clone().map(Arc::new),
        clock,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(server::serve(state, &config.site.bind_address))
}

fn load_settings() -> Result<ResolvedSettings> {
    let path = settings::settings_path_from_env();
    let mut site = settings::load(&path)?;
    site.apply_env_overrides();
    site.resolve()
}
