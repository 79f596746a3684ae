//! This crate contains the structures and tools for processing scene
//! files: the textual description of a level (wall textures, floor and
//! ceiling colours, and the tile grid) plus the decoded face textures.
//!
//! The structure of a scene file is this:
//!
//! ```text,ignore
//!              ┌──────────────────────────────┐
//!              | NO textures/wall_north.png   |
//!              | SO textures/wall_south.png   |
//!    Header ───┤ WE textures/wall_west.png    |
//!              | EA textures/wall_east.png    |
//!              | F 120,90,60                  |
//!              | C 40,40,80                   |
//!              | ────────────────────────────-|
//!              | 111111                       |
//!              | 100101                       |
//!    Map ──────┤ 10N001                       |
//!              | 100001                       |
//!              | 111111                       |
//!              └──────────────────────────────┘
//! ```
//!
//! Header elements may appear in any order but all six must precede the
//! map block, which starts at the first line beginning with `1` or `0`.
//! Map rows are right-padded with spaces to the widest row. Exactly one
//! spawn character (`N`/`S`/`E`/`W`) must be present; its cell becomes
//! open and the facing is recorded.

use std::error::Error;
use std::fmt;
use std::io;

pub use glam::DVec2;

/// Grid cells, spawn data
pub mod map;

/// The scene structure and parser
pub mod parser;

/// Decoded wall textures
pub mod texture;

pub use map::{Cell, Facing, MapGrid, Spawn};
pub use parser::{Scene, TexturePaths};
pub use texture::{Texture, TextureSet};

/// Everything that can go wrong between opening a scene file and having
/// a validated [`Scene`] plus loaded [`TextureSet`]
#[derive(Debug)]
pub enum SceneError {
    Io(io::Error),
    Image(image::ImageError),
    /// A malformed line; carries the 1-based line number
    Parse { line: usize, msg: String },
    /// The file parsed but the content is not a usable scene
    Invalid(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "scene io: {e}"),
            SceneError::Image(e) => write!(f, "scene texture: {e}"),
            SceneError::Parse { line, msg } => write!(f, "scene line {line}: {msg}"),
            SceneError::Invalid(msg) => write!(f, "scene: {msg}"),
        }
    }
}

impl Error for SceneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SceneError {
    fn from(e: io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<image::ImageError> for SceneError {
    fn from(e: image::ImageError) -> Self {
        SceneError::Image(e)
    }
}
