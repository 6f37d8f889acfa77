use fixture_stats_rs::config_handler;
use fixture_stats_rs::fetch_service::{FetchService, NoTeamsFound};
use tracing::log;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        // Set the RUST_LOG, if it hasn't been explicitly defined
        std::env::set_var("RUST_LOG", "info")
    }

    // Configure a custom event formatter
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = match config_handler::get_config() {
        Ok(config) => FetchService::run(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => println!("OK: {}", summary.path.display()),
        Err(e) => {
            match e.downcast_ref::<NoTeamsFound>() {
                Some(no_teams) => log::error!("[MAIN] {no_teams}"),
                None => log::error!("[MAIN] {e:#}"),
            }
            std::process::exit(1);
        }
    }
}
