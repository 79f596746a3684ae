use nanoserde::{DeRon, SerRon};
use sdl2::keyboard::Scancode;

/// Key bindings as stored in the user config. Raw scancode ints so the
/// file format does not depend on SDL types.
#[derive(Debug, Clone, DeRon, SerRon)]
pub struct InputConfig {
    pub(crate) key_forward: i32,
    pub(crate) key_back: i32,
    pub(crate) key_strafeleft: i32,
    pub(crate) key_straferight: i32,
    pub(crate) key_turnleft: i32,
    pub(crate) key_turnright: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            key_forward: Scancode::W as i32,
            key_back: Scancode::S as i32,
            key_strafeleft: Scancode::A as i32,
            key_straferight: Scancode::D as i32,
            key_turnleft: Scancode::Left as i32,
            key_turnright: Scancode::Right as i32,
        }
    }
}

/// The bindings converted to scancodes once at startup
pub struct InputConfigSdl {
    pub(crate) key_forward: Scancode,
    pub(crate) key_back: Scancode,
    pub(crate) key_strafeleft: Scancode,
    pub(crate) key_straferight: Scancode,
    pub(crate) key_turnleft: Scancode,
    pub(crate) key_turnright: Scancode,
}

impl From<&InputConfig> for InputConfigSdl {
    fn from(i: &InputConfig) -> Self {
        let defaults = InputConfig::default();
        // An unknown scancode int in a hand-edited config falls back to
        // the default binding for that slot
        let sc = |raw: i32, fallback: i32| {
            Scancode::from_i32(raw)
                .unwrap_or_else(|| Scancode::from_i32(fallback).unwrap())
        };
        Self {
            key_forward: sc(i.key_forward, defaults.key_forward),
            key_back: sc(i.key_back, defaults.key_back),
            key_strafeleft: sc(i.key_strafeleft, defaults.key_strafeleft),
            key_straferight: sc(i.key_straferight, defaults.key_straferight),
            key_turnleft: sc(i.key_turnleft, defaults.key_turnleft),
            key_turnright: sc(i.key_turnright, defaults.key_turnright),
        }
    }
}
