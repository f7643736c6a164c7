use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::info;

use super::config::Config;

fn config_file_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.yaml"))
}

pub fn data_dir() -> Result<PathBuf> {
    project_data_dir(ProjectDirs::from("com", "slackcommander", "slackcommander"))
}

fn project_data_dir(project_dirs: Option<ProjectDirs>) -> Result<PathBuf> {
    let project_dirs =
        project_dirs.context("Cannot retrieve project dirs, is the home directory set?")?;
    Ok(project_dirs.data_dir().to_owned())
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path()?)
}

/// Reads config from `path`, writing a default one first if the file is missing.
pub fn load_config_from(path: &Path) -> Result<Config> {
    info!("Config file: {}", path.to_string_lossy());
    if !path.exists() {
        info!("Config file does not exist, creating.");
        store_config_to(path, &Config::default())?;
    }
    let config_file =
        File::open(path).with_context(|| format!("Cannot open {}", path.to_string_lossy()))?;
    Ok(serde_yaml::from_reader(config_file)?)
}

pub fn store_config_to(path: &Path, config: &Config) -> Result<()> {
    ensure_dir_created(path)?;
    let config_file = File::create(path)?;
    Ok(serde_yaml::to_writer(config_file, config)?)
}

fn ensure_dir_created(path: &Path) -> Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create {}", &dir.to_string_lossy()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_missing_config_is_created() -> Result<()> {
        let tmp_dir = TempDir::new("testing")?;
        let path = tmp_dir.path().join("nested").join("config.yaml");

        let config = load_config_from(&path)?;

        assert_eq!(config, Config::default());
        assert!(path.is_file());
        Ok(())
    }

    #[test]
    fn test_stored_config_is_loaded() -> Result<()> {
        let tmp_dir = TempDir::new("testing")?;
        let path = tmp_dir.path().join("config.yaml");
        let config = Config {
            dry_run: true,
            webhook_path: "/slack".into(),
            ..Config::with_token("secret")
        };

        store_config_to(&path, &config)?;

        assert_eq!(load_config_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_missing_home_is_error() {
        let e = project_data_dir(None).unwrap_err();
        assert!(e.to_string().starts_with("Cannot retrieve project dirs"));
    }

    #[test]
    fn test_data_dir_is_project_specific() -> Result<()> {
        let dirs = ProjectDirs::from("com", "slackcommander", "slackcommander");
        if dirs.is_some() {
            assert!(project_data_dir(dirs)?.to_string_lossy().contains("slackcommander"));
        }
        Ok(())
    }

    #[test]
    fn test_invalid_config() -> Result<()> {
        let tmp_dir = TempDir::new("testing")?;
        let path = tmp_dir.path().join("config.yaml");
        std::fs::write(&path, "token: [not, a, string]")?;

        assert!(load_config_from(&path).is_err());
        Ok(())
    }
}
