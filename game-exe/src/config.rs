//! User configuration options.

use std::fs::{File, OpenOptions, create_dir};
use std::io::{Read, Write};
use std::path::PathBuf;

use dirs::config_dir;
use input::config::InputConfig;
use log::{error, info, warn};
use nanoserde::{DeRon, SerRon};

use crate::{BASE_DIR, CLIOptions};

const LOG_TAG: &str = "UserConfig";

fn get_cfg_file() -> PathBuf {
    let mut dir =
        config_dir().unwrap_or_else(|| panic!("{}: Couldn't open user config dir", LOG_TAG));
    dir.push(BASE_DIR);
    if !dir.exists() {
        create_dir(&dir)
            .unwrap_or_else(|e| panic!("{}: Couldn't create {:?}: {}", LOG_TAG, dir, e));
    }
    dir.push("user.ron");
    dir
}

#[derive(Debug, Clone, DeRon, SerRon)]
pub struct UserConfig {
    pub scene: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub input: InputConfig,
}

impl Default for UserConfig {
    fn default() -> Self {
        UserConfig {
            scene: String::new(),
            width: 1024,
            height: 768,
            fullscreen: false,
            input: InputConfig::default(),
        }
    }
}

impl UserConfig {
    /// `load` will attempt to read the config, and panic if the config
    /// dir itself is unusable
    pub fn load() -> Self {
        let path = get_cfg_file();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.clone())
            .unwrap_or_else(|e| panic!("Couldn't open {:?}, {}", path, e));
        let mut buf = String::new();
        if let Ok(read_len) = file.read_to_string(&mut buf) {
            if read_len == 0 {
                return UserConfig::create_default(&mut file);
            } else {
                if let Ok(data) = UserConfig::deserialize_ron(&buf) {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                warn!("Could not deserialise {:?}, recreating config", path);
            }
        }
        UserConfig::create_default(&mut file)
    }

    fn create_default(file: &mut File) -> Self {
        let config = UserConfig::default();
        info!("Created default user config file");
        let data = config.serialize_ron();
        file.write_all(data.as_bytes())
            .unwrap_or_else(|_| panic!("Could not write {:?}", get_cfg_file()));
        info!("Saved user config to {:?}", get_cfg_file());
        config
    }

    pub fn write(&self) {
        let mut file = File::create(get_cfg_file()).expect("Couldn't overwrite config");
        let data = self.serialize_ron();
        file.write_all(data.as_bytes())
            .unwrap_or_else(|err| error!("Could not write config: {}", err));
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if !cli.scene.is_empty() && cli.scene != self.scene {
            cli.scene.clone_into(&mut self.scene);
            info!("Scene changed to: {}", &cli.scene);
        } else {
            self.scene.clone_into(&mut cli.scene);
        }

        if cli.width != 0 && cli.width != self.width {
            self.width = cli.width;
        } else {
            cli.width = self.width;
        }

        if cli.height != 0 && cli.height != self.height {
            self.height = cli.height;
        } else {
            cli.height = self.height;
        }

        if let Some(f) = cli.fullscreen {
            if f != self.fullscreen {
                self.fullscreen = f;
            }
        } else {
            cli.fullscreen = Some(self.fullscreen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_ron() {
        let config = UserConfig {
            scene: "demos/demo.scene".into(),
            width: 800,
            height: 600,
            fullscreen: true,
            input: InputConfig::default(),
        };
        let ron = config.serialize_ron();
        let back = UserConfig::deserialize_ron(&ron).unwrap();
        assert_eq!(back.scene, config.scene);
        assert_eq!(back.width, 800);
        assert_eq!(back.height, 600);
        assert!(back.fullscreen);
    }

    #[test]
    fn cli_wins_and_persists() {
        let mut config = UserConfig::default();
        let mut cli = CLIOptions {
            verbose: None,
            scene: "maps/big.scene".into(),
            width: 640,
            height: 0,
            fullscreen: None,
        };
        config.sync_cli(&mut cli);

        assert_eq!(config.scene, "maps/big.scene");
        assert_eq!(config.width, 640);
        // unset CLI fields backfill from config
        assert_eq!(cli.height, 768);
        assert_eq!(cli.fullscreen, Some(false));
    }
}
