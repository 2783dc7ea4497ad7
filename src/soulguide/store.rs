use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{info, warn};
use soulguide_model::ResponseTable;

use super::config::Config;

fn config_file_path() -> PathBuf {
    data_dir().join("config.yaml")
}

fn responses_file_path() -> PathBuf {
    data_dir().join("responses.yaml")
}

pub fn data_dir() -> PathBuf {
    let project_dirs = directories::ProjectDirs::from("com", "soulguide", "soulguide")
        .expect("Cannot retrieve project dirs");
    project_dirs.data_dir().to_owned()
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path())
}

pub fn load_responses() -> Result<ResponseTable> {
    load_responses_from(&responses_file_path())
}

fn load_config_from(path: &Path) -> Result<Config> {
    info!("Config file: {}", path.to_string_lossy());
    if !path.exists() {
        info!("Config file does not exist, creating.");
        store_yaml(path, &Config::default())?;
    }
    let config_file = File::open(path)?;
    serde_yaml::from_reader(config_file)
        .with_context(|| format!("Invalid config file {}", path.to_string_lossy()))
}

fn load_responses_from(path: &Path) -> Result<ResponseTable> {
    info!("Responses file: {}", path.to_string_lossy());
    if !path.exists() {
        info!("Responses file does not exist, creating from built-in table.");
        store_yaml(path, &responder::builtin_table())?;
    }
    let responses_file = File::open(path)?;
    let table: ResponseTable = serde_yaml::from_reader(responses_file)
        .with_context(|| format!("Invalid responses file {}", path.to_string_lossy()))?;

    if table.keywords.is_empty() {
        warn!("Loaded 0 keywords, every message gets a default reply");
    } else {
        info!(
            "Loaded {} keywords: {}",
            table.keywords.len(),
            table.keywords.keywords().join(", ")
        );
    }
    Ok(table)
}

fn store_yaml<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    ensure_dir_created(path)?;
    let out_file = File::create(path)
        .with_context(|| format!("Cannot create {}", path.to_string_lossy()))?;
    Ok(serde_yaml::to_writer(out_file, data)?)
}

fn ensure_dir_created(path: &Path) -> Result<()> {
    let dir = path.parent().context("Parent directory")?;
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create {}", &dir.to_string_lossy()))?;
    }
    Ok(())
}
