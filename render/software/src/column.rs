use gameplay::Player;
use render_trait::PixelBuffer;
use scene::{Texture, TextureSet};

use crate::ray::{HitSide, PERP_DIST_MIN, WallHit};

/// On-screen height of the wall slice for a column at this distance
#[inline]
pub(crate) fn slice_height(screen_height: f64, perp_dist: f64) -> i32 {
    (screen_height / perp_dist) as i32
}

/// The face actually visible is the one the ray travels *towards the
/// viewer from*: a ray heading east that crosses a vertical grid line
/// sees the west face of the cell it lands in.
fn select_texture<'t>(hit: &WallHit, textures: &'t TextureSet) -> &'t Texture {
    match hit.side {
        HitSide::EastWest => {
            if hit.ray_dir.x > 0.0 {
                &textures.west
            } else {
                &textures.east
            }
        }
        HitSide::NorthSouth => {
            if hit.ray_dir.y > 0.0 {
                &textures.north
            } else {
                &textures.south
            }
        }
    }
}

/// Fractional intersection offset along the hit face, 0..1
fn wall_x(hit: &WallHit, player: &Player) -> f64 {
    let along = match hit.side {
        HitSide::EastWest => player.pos.y + hit.perp_dist * hit.ray_dir.y,
        HitSide::NorthSouth => player.pos.x + hit.perp_dist * hit.ray_dir.x,
    };
    along - along.floor()
}

/// Texture-space column for the hit. Two of the four (face, sign)
/// combinations mirror the column so that texture orientation stays
/// consistent when the same face is viewed from either side; adjacent
/// cells of the same texture then tile without a mirrored join.
fn texture_column(hit: &WallHit, tex_width: usize, wall_x: f64) -> usize {
    let tex_x = ((wall_x * tex_width as f64) as usize).min(tex_width - 1);
    let flip = match hit.side {
        HitSide::EastWest => hit.ray_dir.x > 0.0,
        HitSide::NorthSouth => hit.ray_dir.y < 0.0,
    };
    if flip { tex_width - tex_x - 1 } else { tex_x }
}

/// Wrap a texture row index. Power-of-two heights take the mask path;
/// anything else pays for a true modulo.
#[inline]
fn wrap_row(pos: i32, tex_height: i32) -> i32 {
    if tex_height & (tex_height - 1) == 0 {
        pos & (tex_height - 1)
    } else {
        pos.rem_euclid(tex_height)
    }
}

/// Paint one textured wall run: clip the slice to the screen, then map
/// each on-screen row linearly back to a texture row.
pub(crate) fn draw_column(
    hit: &WallHit,
    player: &Player,
    textures: &TextureSet,
    x: usize,
    pixels: &mut impl PixelBuffer,
) {
    debug_assert!(hit.perp_dist >= PERP_DIST_MIN);
    let size = *pixels.size();
    let screen_h = size.height();

    let line_height = slice_height(size.height_f64(), hit.perp_dist);
    if line_height < 1 {
        return;
    }
    let draw_start = (screen_h / 2 - line_height / 2).max(0);
    let draw_end = (screen_h / 2 + line_height / 2).min(screen_h - 1);

    let tex = select_texture(hit, textures);
    let tex_x = texture_column(hit, tex.width(), wall_x(hit, player));
    let tex_h = tex.height() as i32;

    let step = tex.height() as f64 / line_height as f64;
    // Start part-way down the texture for the rows the clip removed
    let mut tex_pos = f64::from(draw_start - screen_h / 2 + line_height / 2) * step;
    for y in draw_start..=draw_end {
        let tex_y = wrap_row(tex_pos as i32, tex_h);
        tex_pos += step;
        let colour = tex.pixel(tex_x, tex_y as usize);
        pixels.set_pixel(x, y as usize, &colour);
    }
}
