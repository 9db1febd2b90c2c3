use clap::Parser;
use color_eyre::eyre::{Context, Result};
use dotenv::dotenv;
use oc_component_ui::{
    actions::Layers,
    app::{App, RootState},
    cli::{self, ClapSource, Commands},
    config::Config,
    libs::dataset::Dataset,
    tui, utils,
};
use tracing::info;

#[cfg(not(tarpaulin_include))]
async fn run() -> Result<()> {
    let args = cli::Cli::parse();

    let config =
        Config::new(Some(ClapSource::new(&args))).context("Error when loading config")?;
    utils::logging::init(&config.config.data_dir)?;

    let (first_layer, dataset) = match args.command.clone().unwrap_or(Commands::Showcase) {
        Commands::Showcase => (Layers::Showcase, Dataset::generated(120, 42)),
        Commands::Browse {
            file: Some(path), ..
        } => (Layers::Browser, Dataset::from_path(&path)?),
        Commands::Browse {
            file: None,
            rows,
            seed,
        } => (Layers::Browser, Dataset::generated(rows, seed)),
    };
    info!(
        "Starting on {} with {} rows, {:?}",
        first_layer,
        dataset.rows.len(),
        config.table
    );

    let state = RootState::new(config, dataset);
    let mut app = App::new(
        state,
        tui::Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .into(),
        first_layer,
    )?;

    app.run().await
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    utils::errors::init()?;

    run().await
}
