use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use config::Source;

use crate::config::get_data_dir;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Path to the data directory (log file)
    #[arg(short, long, value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Rows per page when a table opens
    #[arg(short, long, value_name = "N")]
    pub items_per_page: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Button, modal, input and a small table on one page (default)
    Showcase,
    /// A full screen table over a JSON dataset or generated rows
    Browse {
        /// JSON file with `columns` and `rows`
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Number of rows to generate when no file is given
        #[arg(long, value_name = "N", default_value_t = 120)]
        rows: usize,

        /// Seed for the generated rows
        #[arg(long, value_name = "N", default_value_t = 42)]
        seed: u64,
    },
}

const VERSION_MESSAGE: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> String {
    let author = clap::crate_authors!();
    let data_dir_path = get_data_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Authors: {author}

Data directory: {data_dir_path}"
    )
}

/// Command line values layered on top of every other config source.
#[derive(Debug, Clone, Default)]
pub struct ClapSource {
    pub data_dir: Option<String>,
    pub items_per_page: Option<usize>,
}

impl ClapSource {
    pub fn new(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            items_per_page: cli.items_per_page,
        }
    }
}

impl Source for ClapSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut map = config::Map::new();
        if let Some(data_dir) = &self.data_dir {
            map.insert(
                "data_dir".to_string(),
                config::Value::new(None, data_dir.clone()),
            );
        }
        if let Some(items_per_page) = self.items_per_page {
            map.insert(
                "table.default_items_per_page".to_string(),
                config::Value::new(None, items_per_page as i64),
            );
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_command_is_none() {
        let cli = Cli::parse_from(["oc_component_ui"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.items_per_page, None);
    }

    #[test]
    fn browse_arguments() {
        let cli = Cli::parse_from([
            "oc_component_ui",
            "-i",
            "10",
            "browse",
            "--file",
            "people.json",
        ]);
        assert_eq!(cli.items_per_page, Some(10));
        assert_eq!(
            cli.command,
            Some(Commands::Browse {
                file: Some(PathBuf::from("people.json")),
                rows: 120,
                seed: 42,
            })
        );
    }

    #[test]
    fn clap_source_only_sets_given_values() {
        let source = ClapSource::default();
        assert!(source.collect().unwrap().is_empty());

        let cli = Cli::parse_from(["oc_component_ui", "--items-per-page", "15"]);
        let map = ClapSource::new(&cli).collect().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("table.default_items_per_page"));
    }
}
