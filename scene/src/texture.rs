use std::path::Path;

use log::info;

use crate::{Scene, SceneError};

/// A decoded wall texture. RGBA bytes, row-major. Heights do not have
/// to be powers of two; the renderer only gets a fast wrap when they
/// are.
#[derive(Debug, Clone)]
pub struct Texture {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Texture {
    pub fn load(path: &Path) -> Result<Texture, SceneError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Texture::from_raw(
            width as usize,
            height as usize,
            img.into_raw(),
        ))
    }

    /// Build a texture from raw RGBA bytes. Used by the loader and for
    /// procedurally generated textures in tests.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Texture {
        assert_eq!(data.len(), width * height * 4, "raw texture size mismatch");
        assert!(width > 0 && height > 0, "textures cannot be empty");
        Texture {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let pos = (y * self.width + x) * 4;
        let mut colour = [0u8; 4];
        colour.copy_from_slice(&self.data[pos..pos + 4]);
        colour
    }
}

/// The four face textures. One per compass face, none optional, so a
/// reachable face without a texture cannot be represented.
#[derive(Debug, Clone)]
pub struct TextureSet {
    pub north: Texture,
    pub south: Texture,
    pub east: Texture,
    pub west: Texture,
}

impl TextureSet {
    /// Load all four textures named by the scene header. Loaded once at
    /// startup and shared read-only from then on.
    pub fn load(scene: &Scene) -> Result<TextureSet, SceneError> {
        let paths = &scene.texture_paths;
        let set = TextureSet {
            north: Texture::load(&paths.north)?,
            south: Texture::load(&paths.south)?,
            east: Texture::load(&paths.east)?,
            west: Texture::load(&paths.west)?,
        };
        info!(
            "Loaded wall textures: N {}x{}, S {}x{}, E {}x{}, W {}x{}",
            set.north.width,
            set.north.height,
            set.south.width,
            set.south.height,
            set.east.width,
            set.east.height,
            set.west.width,
            set.west.height,
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_indexing() {
        // 2x2: red, green / blue, white
        let data = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        let tex = Texture::from_raw(2, 2, data);
        assert_eq!(tex.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(tex.pixel(1, 0), [0, 255, 0, 255]);
        assert_eq!(tex.pixel(0, 1), [0, 0, 255, 255]);
        assert_eq!(tex.pixel(1, 1), [255, 255, 255, 255]);
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn raw_size_must_match() {
        Texture::from_raw(2, 2, vec![0; 15]);
    }
}
