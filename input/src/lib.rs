//! All input handling. The output is generally a `MoveCmd` used to run
//! movement ticks in a generalised way.
//!
//! Also does config options for controls.

pub mod config;

use std::collections::hash_set::HashSet;

use config::InputConfigSdl;
use gameplay::MoveCmd;
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Scancode as Sc;

#[derive(Default, Clone)]
pub struct InputEvents {
    key_state: HashSet<Sc>,
}

impl InputEvents {
    pub fn is_kb_pressed(&self, s: Sc) -> bool {
        self.key_state.contains(&s)
    }

    fn set_kb(&mut self, b: Sc) {
        self.key_state.insert(b);
    }

    fn unset_kb(&mut self, b: Sc) {
        self.key_state.remove(&b);
    }

    /// Collapse the current key state in to one tick of movement
    /// intent. Opposing keys cancel out.
    pub fn build_move_cmd(&self, cfg: &InputConfigSdl) -> MoveCmd {
        let mut cmd = MoveCmd::default();

        if self.is_kb_pressed(cfg.key_forward) {
            cmd.forward += 1.0;
        }
        if self.is_kb_pressed(cfg.key_back) {
            cmd.forward -= 1.0;
        }
        if self.is_kb_pressed(cfg.key_straferight) {
            cmd.side += 1.0;
        }
        if self.is_kb_pressed(cfg.key_strafeleft) {
            cmd.side -= 1.0;
        }
        if self.is_kb_pressed(cfg.key_turnright) {
            cmd.turn += 1.0;
        }
        if self.is_kb_pressed(cfg.key_turnleft) {
            cmd.turn -= 1.0;
        }

        cmd
    }
}

/// Fetch all input
pub struct Input {
    pump: EventPump,
    pub events: InputEvents,
    pub config: InputConfigSdl,
    quit: bool,
}

impl Input {
    pub fn new(mut pump: EventPump, config: InputConfigSdl) -> Input {
        pump.pump_events();
        Input {
            pump,
            events: InputEvents::default(),
            config,
            quit: false,
        }
    }

    /// Drain the SDL event queue. For each game tick a fresh key state
    /// is accumulated, giving a constant stream of movement while a key
    /// is held; the state is released only once the key is up. Escape
    /// and the window close button both request quit.
    pub fn update(&mut self) {
        while let Some(event) = self.pump.poll_event() {
            match event {
                Event::KeyDown {
                    scancode: Some(sc), ..
                } => {
                    if sc == Sc::Escape {
                        self.quit = true;
                    } else {
                        self.events.set_kb(sc);
                    }
                }
                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    self.events.unset_kb(sc);
                }
                Event::Quit { .. } => self.quit = true,
                _ => {}
            }
        }
    }

    pub fn get_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputConfig;

    #[test]
    fn held_keys_build_cmd() {
        let cfg: InputConfigSdl = (&InputConfig::default()).into();
        let mut events = InputEvents::default();
        events.set_kb(Sc::W);
        events.set_kb(Sc::Right);

        let cmd = events.build_move_cmd(&cfg);
        assert_eq!(cmd.forward, 1.0);
        assert_eq!(cmd.side, 0.0);
        assert_eq!(cmd.turn, 1.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let cfg: InputConfigSdl = (&InputConfig::default()).into();
        let mut events = InputEvents::default();
        events.set_kb(Sc::A);
        events.set_kb(Sc::D);

        let cmd = events.build_move_cmd(&cfg);
        assert!(cmd.is_empty());
    }

    #[test]
    fn release_clears_state() {
        let cfg: InputConfigSdl = (&InputConfig::default()).into();
        let mut events = InputEvents::default();
        events.set_kb(Sc::S);
        events.unset_kb(Sc::S);
        assert!(events.build_move_cmd(&cfg).is_empty());
    }
}
