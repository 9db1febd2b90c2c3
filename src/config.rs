use std::{env, path::PathBuf};

use color_eyre::{
    Result,
    eyre::{Context, ensure},
};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::libs::table::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_ITEMS_PER_PAGE_OPTIONS};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
}

/// Page size settings applied to every table the shell opens.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub items_per_page_options: Vec<usize>,
    pub default_items_per_page: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            items_per_page_options: DEFAULT_ITEMS_PER_PAGE_OPTIONS.to_vec(),
            default_items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub table: TableConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

impl Config {
    /// Build the config from, lowest priority first: defaults, the optional
    /// `config.{toml,json,yaml}` in the config directory, `OC_COMPONENT_UI_*`
    /// environment variables, then the command line.
    pub fn new(cli_source: Option<crate::cli::ClapSource>) -> Result<Self> {
        let data_dir = get_data_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .add_source(
                config::File::from(get_config_dir().join("config")).required(false),
            )
            .add_source(
                config::Environment::with_prefix(PROJECT_NAME.as_str())
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("table.items_per_page_options"),
            );

        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;
        cfg.validate()?;

        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        let table = &self.table;
        ensure!(
            !table.items_per_page_options.is_empty(),
            "table.items_per_page_options must not be empty"
        );
        ensure!(
            table.items_per_page_options.iter().all(|&n| n > 0),
            "table.items_per_page_options must be positive, got {:?}",
            table.items_per_page_options
        );
        ensure!(
            table
                .items_per_page_options
                .contains(&table.default_items_per_page),
            "table.default_items_per_page {} is not one of {:?}",
            table.default_items_per_page,
            table.items_per_page_options
        );
        Ok(())
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = env::var(format!("{}_DATA", PROJECT_NAME.clone()))
        .ok()
        .map(PathBuf::from)
    {
        dir
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
        .ok()
        .map(PathBuf::from)
    {
        dir
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "oc", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use crate::cli::{ClapSource, Cli};

    use super::*;

    fn data_var() -> String {
        format!("{}_DATA", PROJECT_NAME.clone())
    }

    fn config_var() -> String {
        format!("{}_CONFIG", PROJECT_NAME.clone())
    }

    /// Point the config directory at an empty temp dir so a developer's own
    /// config file cannot leak into the test.
    fn with_clean_config<F: FnOnce()>(f: F) {
        let config_dir = tempdir().unwrap();
        temp_env::with_vars(
            [
                (config_var(), Some(config_dir.path().to_str().unwrap().to_string())),
                ("OC_COMPONENT_UI_TABLE__DEFAULT_ITEMS_PER_PAGE".to_string(), None),
                ("OC_COMPONENT_UI_TABLE__ITEMS_PER_PAGE_OPTIONS".to_string(), None),
            ],
            f,
        );
    }

    #[test]
    fn data_dir_from_env() {
        let temp_data = tempdir().unwrap();
        with_clean_config(|| {
            temp_env::with_var(data_var(), Some(temp_data.path()), || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.config.data_dir, temp_data.path());
            });
        });
    }

    #[test]
    fn data_dir_from_cli() {
        with_clean_config(|| {
            let args = Cli::parse_from(["test-config", "--data-dir", ".cli-data"]);
            let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");
            assert_eq!(config.config.data_dir, PathBuf::from(".cli-data"));
        });
    }

    #[test]
    fn table_defaults() {
        with_clean_config(|| {
            let config = Config::new(None).unwrap();
            assert_eq!(config.table, TableConfig::default());
            assert_eq!(config.table.items_per_page_options, vec![5, 10, 15]);
            assert_eq!(config.table.default_items_per_page, 5);
        });
    }

    #[test]
    fn items_per_page_from_cli() {
        with_clean_config(|| {
            let args = Cli::parse_from(["test-config", "--items-per-page", "10"]);
            let config = Config::new(Some(ClapSource::new(&args))).unwrap();
            assert_eq!(config.table.default_items_per_page, 10);
        });
    }

    #[test]
    fn items_per_page_not_in_options() {
        with_clean_config(|| {
            let args = Cli::parse_from(["test-config", "--items-per-page", "7"]);
            let err = Config::new(Some(ClapSource::new(&args))).unwrap_err();
            assert!(err.to_string().contains("is not one of"));
        });
    }

    #[test]
    fn table_from_env() {
        with_clean_config(|| {
            temp_env::with_vars(
                [
                    ("OC_COMPONENT_UI_TABLE__ITEMS_PER_PAGE_OPTIONS", Some("3,6")),
                    ("OC_COMPONENT_UI_TABLE__DEFAULT_ITEMS_PER_PAGE", Some("6")),
                ],
                || {
                    let config = Config::new(None).unwrap();
                    assert_eq!(config.table.items_per_page_options, vec![3, 6]);
                    assert_eq!(config.table.default_items_per_page, 6);
                },
            );
        });
    }

    #[test]
    fn table_from_config_file() {
        let config_dir = tempdir().unwrap();
        fs::write(
            config_dir.path().join("config.toml"),
            "[table]\nitems_per_page_options = [20, 50]\ndefault_items_per_page = 50\n",
        )
        .unwrap();
        temp_env::with_var(config_var(), Some(config_dir.path()), || {
            let config = Config::new(None).unwrap();
            assert_eq!(config.table.items_per_page_options, vec![20, 50]);
            assert_eq!(config.table.default_items_per_page, 50);
        });
    }
}
