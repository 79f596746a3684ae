use gameplay::Player;
use scene::Scene;

/// channels should match pixel format
pub const SOFT_PIXEL_CHANNELS: usize = 4;

/// Buffer dimensions precomputed in the variants the render paths
/// actually index with, so the hot loops never cast.
#[derive(Clone, Copy)]
pub struct BufferSize {
    width_usize: usize,
    height_usize: usize,
    width: i32,
    height: i32,
    width_f64: f64,
    height_f64: f64,
}

impl BufferSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width_usize: width,
            height_usize: height,
            width: width as i32,
            height: height as i32,
            width_f64: width as f64,
            height_f64: height as f64,
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn half_height(&self) -> i32 {
        self.height / 2
    }

    pub const fn width_usize(&self) -> usize {
        self.width_usize
    }

    pub const fn height_usize(&self) -> usize {
        self.height_usize
    }

    pub const fn width_f64(&self) -> f64 {
        self.width_f64
    }

    pub const fn height_f64(&self) -> f64 {
        self.height_f64
    }
}

pub trait PixelBuffer {
    fn size(&self) -> &BufferSize;
    /// Write one pixel. Out-of-range coordinates are silently ignored
    /// (the `safety_check` feature of the buffer implementation panics
    /// instead).
    fn set_pixel(&mut self, x: usize, y: usize, colour: &[u8; SOFT_PIXEL_CHANNELS]);
    /// Read the colour of a single pixel at X|Y
    fn read_pixel(&self, x: usize, y: usize) -> [u8; SOFT_PIXEL_CHANNELS];
}

pub trait PlayViewRenderer {
    /// Drawing the full player view for one frame: background fill
    /// plus one textured wall run per screen column. The pose and the
    /// scene are read-only for the duration of the call and the buffer
    /// is exclusively borrowed.
    fn render_player_view(
        &mut self,
        player: &Player,
        scene: &Scene,
        pixels: &mut impl PixelBuffer,
    );
}
