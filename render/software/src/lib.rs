//! The software raycaster. One render pass walks every screen column:
//! cast a ray through the grid with a DDA, turn the hit in to a
//! perspective-correct textured wall run, and write it over the
//! ceiling/floor background fill. The pass is a pure function of
//! (grid, pose, textures) in to the frame buffer and is driven once
//! per displayed frame by the game loop.

mod column;
mod ray;

use std::rc::Rc;

use gameplay::Player;
use render_trait::{PixelBuffer, PlayViewRenderer};
use scene::{Scene, TextureSet};

pub struct SoftwareRenderer {
    /// Shared with whoever loaded them; read-only for the renderer's
    /// whole life
    textures: Rc<TextureSet>,
}

impl SoftwareRenderer {
    pub fn new(textures: Rc<TextureSet>) -> Self {
        Self { textures }
    }

    /// Ceiling colour over the top half, floor colour over the bottom.
    /// Odd heights give the extra row to the floor.
    fn draw_background(scene: &Scene, pixels: &mut impl PixelBuffer) {
        let size = *pixels.size();
        let half = size.height_usize() / 2;
        for y in 0..half {
            for x in 0..size.width_usize() {
                pixels.set_pixel(x, y, &scene.ceiling);
            }
        }
        for y in half..size.height_usize() {
            for x in 0..size.width_usize() {
                pixels.set_pixel(x, y, &scene.floor);
            }
        }
    }
}

impl PlayViewRenderer for SoftwareRenderer {
    fn render_player_view(
        &mut self,
        player: &Player,
        scene: &Scene,
        pixels: &mut impl PixelBuffer,
    ) {
        Self::draw_background(scene, pixels);

        let width = pixels.size().width_usize();
        for x in 0..width {
            // A column whose ray left the grid keeps its background
            if let Some(hit) = ray::cast_ray(player, &scene.grid, x, width) {
                column::draw_column(&hit, player, &self.textures, x, pixels);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use render_trait::{BufferSize, SOFT_PIXEL_CHANNELS};
    use scene::{Cell, MapGrid, Spawn, Texture};

    struct TestBuffer {
        size: BufferSize,
        data: Vec<u8>,
    }

    impl TestBuffer {
        fn new(width: usize, height: usize) -> Self {
            Self {
                size: BufferSize::new(width, height),
                data: vec![0; width * height * SOFT_PIXEL_CHANNELS],
            }
        }
    }

    impl PixelBuffer for TestBuffer {
        fn size(&self) -> &BufferSize {
            &self.size
        }

        fn set_pixel(&mut self, x: usize, y: usize, colour: &[u8; SOFT_PIXEL_CHANNELS]) {
            if x >= self.size.width_usize() || y >= self.size.height_usize() {
                return;
            }
            let pos = (y * self.size.width_usize() + x) * SOFT_PIXEL_CHANNELS;
            self.data[pos..pos + SOFT_PIXEL_CHANNELS].copy_from_slice(colour);
        }

        fn read_pixel(&self, x: usize, y: usize) -> [u8; SOFT_PIXEL_CHANNELS] {
            let pos = (y * self.size.width_usize() + x) * SOFT_PIXEL_CHANNELS;
            let mut c = [0u8; SOFT_PIXEL_CHANNELS];
            c.copy_from_slice(&self.data[pos..pos + SOFT_PIXEL_CHANNELS]);
            c
        }
    }

    fn banded_texture(width: usize, height: usize, base: u8) -> Texture {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[base, (x % 256) as u8, (y % 256) as u8, 255]);
            }
        }
        Texture::from_raw(width, height, data)
    }

    fn test_textures() -> Rc<TextureSet> {
        Rc::new(TextureSet {
            north: banded_texture(64, 64, 10),
            south: banded_texture(64, 64, 20),
            east: banded_texture(64, 64, 30),
            west: banded_texture(64, 64, 40),
        })
    }

    fn test_scene() -> Scene {
        let src = "\
NO n.png
SO s.png
WE w.png
EA e.png
F 60,60,60
C 200,200,220

1111111
1000001
100N001
1000001
1111111";
        Scene::parse(src).unwrap()
    }

    #[test]
    fn two_passes_are_byte_identical() {
        let scene = test_scene();
        let player = Player::from_spawn(&scene.spawn);
        let mut renderer = SoftwareRenderer::new(test_textures());

        let mut first = TestBuffer::new(160, 120);
        let mut second = TestBuffer::new(160, 120);
        renderer.render_player_view(&player, &scene, &mut first);
        renderer.render_player_view(&player, &scene, &mut second);

        assert_eq!(first.data, second.data);
    }

    #[test]
    fn background_splits_at_midpoint_rounding_down() {
        // An unclosed, all-open grid: every ray leaves the grid and
        // every column stays pure background.
        let scene = Scene {
            grid: MapGrid::new(3, 3, vec![Cell::Open; 9]),
            spawn: Spawn {
                pos: glam::DVec2::new(1.5, 1.5),
                facing: scene::Facing::North,
            },
            ..test_scene()
        };
        let player = Player::from_spawn(&scene.spawn);
        let mut renderer = SoftwareRenderer::new(test_textures());

        let mut buf = TestBuffer::new(8, 5);
        renderer.render_player_view(&player, &scene, &mut buf);

        for x in 0..8 {
            for y in 0..2 {
                assert_eq!(buf.read_pixel(x, y), scene.ceiling, "({x},{y})");
            }
            for y in 2..5 {
                assert_eq!(buf.read_pixel(x, y), scene.floor, "({x},{y})");
            }
        }
    }

    #[test]
    fn wall_run_leaves_background_outside_slice() {
        let scene = test_scene();
        let mut player = Player::from_spawn(&scene.spawn);
        player.pos = glam::DVec2::new(1.5, 2.5);

        let mut renderer = SoftwareRenderer::new(test_textures());
        let mut buf = TestBuffer::new(64, 64);
        renderer.render_player_view(&player, &scene, &mut buf);

        // Centre column: the north wall at perp 1.5 gives a 42-pixel
        // slice centred on row 32, leaving background at both edges
        let x = 32;
        assert_eq!(buf.read_pixel(x, 0), scene.ceiling);
        assert_eq!(buf.read_pixel(x, 63), scene.floor);
        // and the middle row was overwritten by texture, not background
        let mid = buf.read_pixel(x, 32);
        assert_ne!(mid, scene.ceiling);
        assert_ne!(mid, scene.floor);
    }
}
