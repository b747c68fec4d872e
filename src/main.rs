use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::KeyResolver;
use crate::people::{PeopleView, QueryState};
use crate::swapi::SwapiClient;

mod app;
mod cli;
mod commands;
mod config;
mod people;
mod search;
mod swapi;
mod theme;
mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting holotable");

    let args = cli::Args::parse();

    let mut config = config::load()?;
    args.apply_to(&mut config);
    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));

    let theme = theme::theme_from_name(&config.theme.name);
    if theme.is_none() {
        warn!("Unknown theme {:?}, using the default", config.theme.name);
    }

    let client = SwapiClient::new(&config.api.base_url, config.api.timeout())?;
    let endpoint = client.base_url().to_string();
    info!("Using SWAPI at {}", endpoint);

    let people = PeopleView::new(
        Arc::new(client),
        QueryState::new(args.search.clone(), args.page_index()),
        Arc::clone(&resolver),
    );

    let mut app = App::new(people, endpoint, theme.unwrap_or_default(), resolver);
    if theme.is_none() {
        app.notify(format!("Unknown theme \"{}\"", config.theme.name));
    }
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("holotable").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "holotable.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
