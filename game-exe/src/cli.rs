use argh::FromArgs;
use log::LevelFilter;

/// CLI options for the game-exe
#[derive(Debug, Clone, FromArgs)]
pub struct CLIOptions {
    /// verbose level: off, error, warn, info, debug
    #[argh(option)]
    pub verbose: Option<LevelFilter>,
    /// path to the scene file
    #[argh(option, default = "Default::default()")]
    pub scene: String,
    /// resolution width in pixels
    #[argh(option, default = "0")]
    pub width: u32,
    /// resolution height in pixels
    #[argh(option, default = "0")]
    pub height: u32,
    /// fullscreen?
    #[argh(option)]
    pub fullscreen: Option<bool>,
}
