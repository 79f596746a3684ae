use gameplay::Player;
use glam::DVec2;
use scene::{Cell, MapGrid};

/// Stands in for an infinite per-axis crossing distance when a ray
/// component is exactly zero. That axis then never wins the
/// smaller-side-distance comparison, which is both the div-by-zero
/// guard and the correct behaviour for axis-aligned rays.
const DELTA_DIST_MAX: f64 = 1e30;

/// Lower clamp for the perpendicular distance before it divides the
/// screen height
pub(crate) const PERP_DIST_MIN: f64 = 0.01;

/// Which grid line the ray crossed when it found the wall. Crossing a
/// vertical grid line means an east/west-facing wall was hit, a
/// horizontal line means north/south.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitSide {
    EastWest,
    NorthSouth,
}

/// The result of one ray: everything the sampler needs to paint the
/// column
#[derive(Debug, Clone, Copy)]
pub(crate) struct WallHit {
    pub side: HitSide,
    /// Distance from the camera plane to the hit, already clamped to
    /// [`PERP_DIST_MIN`]
    pub perp_dist: f64,
    pub ray_dir: DVec2,
}

/// All of the state for a single ray. One instance per screen column,
/// local to the cast and discarded with it.
struct RayState {
    ray_dir: DVec2,
    map_x: i32,
    map_y: i32,
    delta_dist: DVec2,
    side_dist: DVec2,
    step_x: i32,
    step_y: i32,
}

impl RayState {
    fn init(player: &Player, x: usize, screen_width: usize) -> Self {
        // camera_x sweeps [-1, 1) left to right across the screen
        let camera_x = 2.0 * x as f64 / screen_width as f64 - 1.0;
        let ray_dir = player.dir + player.plane * camera_x;

        let delta_dist = DVec2::new(
            if ray_dir.x == 0.0 {
                DELTA_DIST_MAX
            } else {
                (1.0 / ray_dir.x).abs()
            },
            if ray_dir.y == 0.0 {
                DELTA_DIST_MAX
            } else {
                (1.0 / ray_dir.y).abs()
            },
        );

        let map_x = player.pos.x.floor() as i32;
        let map_y = player.pos.y.floor() as i32;

        // Initial side distances: from the fractional position inside
        // the start cell out to the first grid line on each axis
        let (step_x, side_dist_x) = if ray_dir.x < 0.0 {
            (-1, (player.pos.x - map_x as f64) * delta_dist.x)
        } else {
            (1, (map_x as f64 + 1.0 - player.pos.x) * delta_dist.x)
        };
        let (step_y, side_dist_y) = if ray_dir.y < 0.0 {
            (-1, (player.pos.y - map_y as f64) * delta_dist.y)
        } else {
            (1, (map_y as f64 + 1.0 - player.pos.y) * delta_dist.y)
        };

        Self {
            ray_dir,
            map_x,
            map_y,
            delta_dist,
            side_dist: DVec2::new(side_dist_x, side_dist_y),
            step_x,
            step_y,
        }
    }

    /// Walk the grid one cell boundary at a time along the cheaper
    /// axis until a wall cell is entered, or the ray leaves the grid
    /// (`None` — the caller skips wall drawing for the column).
    fn dda(mut self, grid: &MapGrid) -> Option<WallHit> {
        loop {
            let side = if self.side_dist.x < self.side_dist.y {
                self.side_dist.x += self.delta_dist.x;
                self.map_x += self.step_x;
                HitSide::EastWest
            } else {
                self.side_dist.y += self.delta_dist.y;
                self.map_y += self.step_y;
                HitSide::NorthSouth
            };

            match grid.get(self.map_x, self.map_y) {
                None => return None,
                Some(Cell::Wall) => {
                    // Perpendicular, not Euclidean: the side distance
                    // *before* the stepped axis was last incremented.
                    // This is what keeps straight walls straight
                    // instead of fisheyed.
                    let perp_dist = match side {
                        HitSide::EastWest => self.side_dist.x - self.delta_dist.x,
                        HitSide::NorthSouth => self.side_dist.y - self.delta_dist.y,
                    };
                    return Some(WallHit {
                        side,
                        perp_dist: perp_dist.max(PERP_DIST_MIN),
                        ray_dir: self.ray_dir,
                    });
                }
                Some(Cell::Open) => {}
            }
        }
    }
}

pub(crate) fn cast_ray(
    player: &Player,
    grid: &MapGrid,
    x: usize,
    screen_width: usize,
) -> Option<WallHit> {
    RayState::init(player, x, screen_width).dda(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene::{Facing, Spawn};

    fn ring_grid(size: usize) -> MapGrid {
        let cells = (0..size * size)
            .map(|i| {
                let (col, row) = (i % size, i / size);
                if col == 0 || row == 0 || col == size - 1 || row == size - 1 {
                    Cell::Wall
                } else {
                    Cell::Open
                }
            })
            .collect();
        MapGrid::new(size, size, cells)
    }

    fn player_at(x: f64, y: f64, facing: Facing) -> Player {
        Player::from_spawn(&Spawn {
            pos: DVec2::new(x, y),
            facing,
        })
    }

    #[test]
    fn single_ray_hits_east_wall_at_half() {
        // 3x3 ring, viewer centred in the open cell facing east. The
        // wall plane is at x=2, so the perpendicular distance is 0.5
        // no matter how the single column tilts the ray.
        let grid = ring_grid(3);
        let player = player_at(1.5, 1.5, Facing::East);

        let hit = cast_ray(&player, &grid, 0, 1).expect("closed grid must hit");
        assert_eq!(hit.side, HitSide::EastWest);
        assert_eq!(hit.perp_dist, 0.5);
    }

    #[test]
    fn cardinal_headings_match_euclidean() {
        // Straight ahead through the centre column, perpendicular
        // distance equals the Euclidean distance for all four
        // 90-degree headings.
        let grid = ring_grid(5);
        for facing in [Facing::North, Facing::South, Facing::East, Facing::West] {
            let player = player_at(2.5, 2.5, facing);
            // width 2, column 1: camera_x is exactly 0
            let hit = cast_ray(&player, &grid, 1, 2).expect("closed grid must hit");
            assert_eq!(hit.perp_dist, 1.5, "heading {facing:?}");
        }
    }

    #[test]
    fn axis_aligned_ray_uses_sentinel() {
        let player = player_at(2.5, 2.5, Facing::North);
        let ray = RayState::init(&player, 1, 2);
        assert_eq!(ray.ray_dir, DVec2::new(0.0, -1.0));
        assert_eq!(ray.delta_dist.x, DELTA_DIST_MAX);

        // and the cast still terminates with finite, non-NaN numbers
        let hit = ray.dda(&ring_grid(5)).expect("closed grid must hit");
        assert_eq!(hit.side, HitSide::NorthSouth);
        assert!(hit.perp_dist.is_finite());
        assert_eq!(hit.perp_dist, 1.5);
    }

    #[test]
    fn closed_grid_never_leaves_bounds() {
        let grid = ring_grid(9);
        let mut player = player_at(4.5, 4.5, Facing::East);
        // A few arbitrary headings, every column must land on a wall
        for _ in 0..7 {
            player.rotate(0.9);
            for x in 0..320 {
                assert!(cast_ray(&player, &grid, x, 320).is_some());
            }
        }
    }

    #[test]
    fn leaving_an_open_grid_is_none() {
        let open = MapGrid::new(4, 4, vec![Cell::Open; 16]);
        let player = player_at(2.0, 2.0, Facing::West);
        assert!(cast_ray(&player, &open, 0, 3).is_none());
    }

    #[test]
    fn degenerate_distance_is_clamped() {
        let grid = ring_grid(3);
        let mut player = player_at(1.5, 1.5, Facing::East);
        player.pos.x = 2.0 - 1e-12;
        let hit = cast_ray(&player, &grid, 1, 2).expect("closed grid must hit");
        assert_eq!(hit.perp_dist, PERP_DIST_MIN);
    }
}
