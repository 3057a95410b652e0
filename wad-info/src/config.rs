//! User configuration options.

use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use dirs::config_dir;
use log::{info, warn};
use nanoserde::{DeRon, SerRon};

use crate::{BASE_DIR, CLIOptions};

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> io::Result<PathBuf> {
    let mut dir = config_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{LOG_TAG}: Couldn't find the user config dir"),
        )
    })?;
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir_all(&dir)?;
    }
    dir.push("user.ron");
    Ok(dir)
}

#[derive(Debug, Default, Clone, PartialEq, DeRon, SerRon)]
pub struct UserConfig {
    /// Last WAD opened
    pub wad: String,
    /// Last level loaded from it
    pub map: String,
}

impl UserConfig {
    /// Read the config file, creating it with defaults if it is empty or
    /// can't be parsed
    pub fn load() -> io::Result<Self> {
        let path = get_cfg_file()?;

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        let mut buf = String::new();
        if file.read_to_string(&mut buf)? == 0 {
            return UserConfig::create_default(&mut file);
        }
        match Self::from_ron(&buf) {
            Some(config) => {
                info!(target: LOG_TAG, "Loaded user config file");
                Ok(config)
            }
            None => {
                warn!(target: LOG_TAG, "Could not deserialise {:?} recreating config", path);
                let mut file = File::create(&path)?;
                UserConfig::create_default(&mut file)
            }
        }
    }

    fn from_ron(data: &str) -> Option<Self> {
        UserConfig::deserialize_ron(data).ok()
    }

    fn create_default(file: &mut File) -> io::Result<Self> {
        let config = UserConfig::default();
        file.write_all(config.serialize_ron().as_bytes())?;
        info!(target: LOG_TAG, "Created default user config file");
        Ok(config)
    }

    pub fn write(&self) -> io::Result<()> {
        let path = get_cfg_file()?;
        let mut file = File::create(&path)?;
        file.write_all(self.serialize_ron().as_bytes())?;
        info!(target: LOG_TAG, "Saved user config to {:?}", path);
        Ok(())
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!(target: LOG_TAG, "Checking CLI options");

        if !cli.wad.is_empty() && cli.wad != self.wad {
            cli.wad.clone_into(&mut self.wad);
            info!(target: LOG_TAG, "WAD changed to: {}", &cli.wad);
            // A level name from another WAD means nothing here
            if cli.map.is_none() {
                self.map.clear();
            }
        } else {
            self.wad.clone_into(&mut cli.wad);
        }

        match &cli.map {
            Some(map) => map.clone_into(&mut self.map),
            None if !self.map.is_empty() => cli.map = Some(self.map.clone()),
            None => {}
        }
    }
}
