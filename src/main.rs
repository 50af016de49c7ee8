mod config;
mod model;
mod normalizer;
mod notifier;
mod parser;
mod scraper;
mod storage;
mod utils;

use chrono::{DateTime, Utc};
use config::{load_config, resolve_webhook_key, AppConfig};
use normalizer::{dedup, find_new};
use notifier::{build_message, Notifier, ServerChanNotifier};
use parser::classify;
use scraper::{fetch_entries, CatalogFetcher, Fetcher};
use storage::JsonCache;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

#[derive(Debug, PartialEq, Eq)]
enum RunOutcome {
    /// The fetch produced no catalog entries.
    NoGames,
    NothingNew,
    Notified { new: usize },
    DeliveryFailed { new: usize },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".into());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let key = match resolve_webhook_key(&config, |name| std::env::var(name).ok()) {
        Ok(key) => key,
        Err(e) => {
            error!("Config error: {}", e);
            return;
        }
    };

    let fetcher = match CatalogFetcher::new(&config.endpoint, config.fetch_timeout()) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let notifier = ServerChanNotifier::new(&config.webhook_base_url, key, config.notify_timeout());
    let cache = JsonCache::new(&config.cache_path);

    loop {
        let outcome = process_catalog(&fetcher, &notifier, &cache, &config, Utc::now()).await;
        match outcome {
            RunOutcome::Notified { new } => info!("Notified about {} new free game(s).", new),
            RunOutcome::DeliveryFailed { new } => {
                warn!("{} new free game(s) will be retried next run.", new)
            }
            other => info!("Pass finished: {:?}", other),
        }

        let Some(interval) = config.check_interval_seconds else {
            break;
        };
        info!("Waiting {}s for next check...", interval);
        sleep(Duration::from_secs(interval)).await;
    }
}

/// One pass: fetch, classify, diff against the cache, notify, persist.
/// Upstream failures degrade to `NoGames` or `DeliveryFailed`; nothing here fails the process.
async fn process_catalog(
    fetcher: &dyn Fetcher,
    notifier: &dyn Notifier,
    cache: &JsonCache,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> RunOutcome {
    info!("Fetching catalog ({}/{})...", config.locale, config.country);
    let entries = fetch_entries(fetcher, &config.catalog_request(), &config.debug_dir).await;
    if entries.is_empty() {
        info!("No games fetched, nothing to do.");
        return RunOutcome::NoGames;
    }

    let classification = classify(&entries, now, &config.store_url_base);
    info!(
        "Free now: {} | Coming soon: {}",
        classification.current.len(),
        classification.upcoming.len()
    );

    if classification.is_empty() {
        return RunOutcome::NothingNew;
    }

    let cached = cache.load();
    let new_games = find_new(&classification.current, &cached);
    if new_games.is_empty() {
        info!("No new free games since last run.");
        return RunOutcome::NothingNew;
    }

    for game in &new_games {
        info!("New free game: {} (until {})", game.title, game.date);
    }

    let body = build_message(&new_games, &classification.upcoming);
    if let Err(e) = notifier.notify(&config.notification_title, &body).await {
        warn!("Notification failed, keeping previous cache: {}", e);
        return RunOutcome::DeliveryFailed { new: new_games.len() };
    }

    if let Err(e) = cache.save(&dedup(classification.current)) {
        warn!("Cache write failed ({}): {}", cache.path().display(), e);
    }

    RunOutcome::Notified { new: new_games.len() }
}
