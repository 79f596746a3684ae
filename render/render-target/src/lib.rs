//! A generic draw buffer the renderer writes to, and the SDL2 side
//! that blits it to the window. The renderer never talks to a display
//! surface directly; it gets the buffer for one frame and hands it
//! back fully painted.

mod buffers;

use std::error::Error;

pub use buffers::DrawBuffer;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

/// A structure holding display data
struct SdlBuffer {
    // The creator must outlive the texture it created
    _tc: TextureCreator<WindowContext>,
    texture: sdl2::render::Texture,
}

impl SdlBuffer {
    fn new(canvas: &Canvas<Window>, r_width: u32, r_height: u32) -> Result<Self, Box<dyn Error>> {
        let texture_creator = canvas.texture_creator();
        let texture = texture_creator.create_texture_streaming(
            Some(sdl2::pixels::PixelFormatEnum::RGBA32),
            r_width,
            r_height,
        )?;
        Ok(Self {
            _tc: texture_creator,
            texture,
        })
    }
}

/// Owns the software frame buffer and the streaming texture it is
/// pushed through. One per window, created after the canvas.
pub struct RenderTarget {
    draw: DrawBuffer,
    sdl: SdlBuffer,
}

impl RenderTarget {
    pub fn new(
        width: usize,
        height: usize,
        canvas: &Canvas<Window>,
    ) -> Result<Self, Box<dyn Error>> {
        assert!(width > 0 && height > 0, "render target must have area");
        Ok(Self {
            draw: DrawBuffer::new(width, height),
            sdl: SdlBuffer::new(canvas, width as u32, height as u32)?,
        })
    }

    /// Get the buffer currently being drawn to
    #[inline]
    pub fn draw_buffer(&mut self) -> &mut DrawBuffer {
        &mut self.draw
    }

    /// Throw the draw buffer at the screen
    pub fn blit(&mut self, canvas: &mut Canvas<Window>) -> Result<(), Box<dyn Error>> {
        self.sdl
            .texture
            .update(None, self.draw.bytes(), self.draw.pitch())?;
        canvas.copy(&self.sdl.texture, None, None)?;
        canvas.present();
        Ok(())
    }
}
