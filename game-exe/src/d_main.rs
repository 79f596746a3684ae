//! The main loop driver. Each iteration drains input, runs all due
//! movement tics, then renders and presents the result. Pose updates
//! happen only inside the tick runner, never while a render pass is in
//! flight.

use std::error::Error;
use std::rc::Rc;

use gameplay::Player;
use input::Input;
use log::{debug, info};
use render_soft::SoftwareRenderer;
use render_target::RenderTarget;
use render_trait::PlayViewRenderer;
use scene::{Scene, TextureSet};
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::CLIOptions;
use crate::timestep::TimeStep;

/// Returns when the player quits
pub fn game_loop(
    scene: Scene,
    mut input: Input,
    mut canvas: Canvas<Window>,
    options: &CLIOptions,
) -> Result<(), Box<dyn Error>> {
    let textures = Rc::new(TextureSet::load(&scene)?);
    let mut renderer = SoftwareRenderer::new(textures);
    let mut player = Player::from_spawn(&scene.spawn);

    let width = options.width as usize;
    let height = options.height as usize;
    let mut render_target = RenderTarget::new(width, height, &canvas)?;

    let mut timestep = TimeStep::new();
    info!("Entering game loop");

    loop {
        input.update();
        if input.get_quit() {
            info!("Quit requested");
            break;
        }

        let cmd = input.events.build_move_cmd(&input.config);
        timestep.run_this(|_| {
            if !cmd.is_empty() {
                player.update(&cmd, &scene.grid);
            }
        });

        renderer.render_player_view(&player, &scene, render_target.draw_buffer());
        render_target.blit(&mut canvas)?;

        if let Some(stats) = timestep.frame_rate() {
            debug!("{stats}");
        }
    }

    Ok(())
}
