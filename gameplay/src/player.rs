use glam::DVec2;
use scene::{Facing, MapGrid, Spawn};

use crate::MoveCmd;

/// Grid units per movement tick
pub const MOVE_SPEED: f64 = 0.1;
/// Radians per rotation tick
pub const ROT_SPEED: f64 = 0.05;

/// Half the FOV tangent: |plane| = tan(66°/2) ≈ 0.66 for a unit
/// direction vector
const PLANE_LENGTH: f64 = 0.66;

/// The viewer pose. `dir` stays unit length and `plane` stays
/// perpendicular to it at fixed magnitude; rotation transforms both
/// together and translation touches neither.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Position in grid units
    pub pos: DVec2,
    /// Unit view direction
    pub dir: DVec2,
    /// Camera plane, perpendicular to `dir`
    pub plane: DVec2,
}

impl Player {
    pub fn from_spawn(spawn: &Spawn) -> Self {
        let (dir, plane) = match spawn.facing {
            Facing::North => (DVec2::new(0.0, -1.0), DVec2::new(PLANE_LENGTH, 0.0)),
            Facing::South => (DVec2::new(0.0, 1.0), DVec2::new(-PLANE_LENGTH, 0.0)),
            Facing::East => (DVec2::new(1.0, 0.0), DVec2::new(0.0, PLANE_LENGTH)),
            Facing::West => (DVec2::new(-1.0, 0.0), DVec2::new(0.0, -PLANE_LENGTH)),
        };
        Player {
            pos: spawn.pos,
            dir,
            plane,
        }
    }

    /// Apply one tick of movement intent. Translation slides along
    /// walls by testing each axis separately; rotation keeps the
    /// dir/plane pair rigid.
    pub fn update(&mut self, cmd: &MoveCmd, grid: &MapGrid) {
        if cmd.forward != 0.0 {
            let target = self.pos + self.dir * MOVE_SPEED * cmd.forward;
            self.try_move(target, grid);
        }
        if cmd.side != 0.0 {
            let target = self.pos + self.plane * MOVE_SPEED * cmd.side;
            self.try_move(target, grid);
        }
        if cmd.turn != 0.0 {
            self.rotate(ROT_SPEED * cmd.turn);
        }
    }

    /// Per-axis collision: x first, then y against the possibly updated
    /// x, which is what lets the player slide along a wall instead of
    /// sticking to it.
    fn try_move(&mut self, target: DVec2, grid: &MapGrid) {
        if !blocked(grid, target.x, self.pos.y) {
            self.pos.x = target.x;
        }
        if !blocked(grid, self.pos.x, target.y) {
            self.pos.y = target.y;
        }
    }

    pub fn rotate(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        let old_dir_x = self.dir.x;
        self.dir.x = self.dir.x * cos - self.dir.y * sin;
        self.dir.y = old_dir_x * sin + self.dir.y * cos;
        let old_plane_x = self.plane.x;
        self.plane.x = self.plane.x * cos - self.plane.y * sin;
        self.plane.y = old_plane_x * sin + self.plane.y * cos;
    }
}

/// Movement treats anything outside the grid as solid. Only movement:
/// the renderer keeps out-of-bounds as its own distinct signal.
fn blocked(grid: &MapGrid, x: f64, y: f64) -> bool {
    grid.get(x.floor() as i32, y.floor() as i32)
        .is_none_or(|cell| cell.is_wall())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene::Cell;

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

    fn spawned(facing: Facing) -> Player {
        Player::from_spawn(&Spawn {
            pos: DVec2::new(2.5, 2.5),
            facing,
        })
    }

    #[test]
    fn spawn_vectors_per_facing() {
        let north = spawned(Facing::North);
        assert_eq!(north.dir, DVec2::new(0.0, -1.0));
        assert_eq!(north.plane, DVec2::new(0.66, 0.0));

        let west = spawned(Facing::West);
        assert_eq!(west.dir, DVec2::new(-1.0, 0.0));
        assert_eq!(west.plane, DVec2::new(0.0, -0.66));
    }

    #[test]
    fn rotation_keeps_pair_rigid() {
        let mut player = spawned(Facing::East);
        for _ in 0..100 {
            player.rotate(0.37);
        }
        assert!((player.dir.length() - 1.0).abs() < 1e-9);
        assert!((player.plane.length() - 0.66).abs() < 1e-9);
        assert!(player.dir.dot(player.plane).abs() < 1e-9);
    }

    #[test]
    fn walks_forward_until_wall() {
        let grid = ring_grid(5);
        let mut player = spawned(Facing::East);
        let cmd = MoveCmd {
            forward: 1.0,
            ..MoveCmd::default()
        };
        for _ in 0..100 {
            player.update(&cmd, &grid);
        }
        // Stopped inside the open area, right before the east wall ring
        assert!(player.pos.x < 4.0);
        assert!(player.pos.x > 3.5);
        assert_eq!(player.pos.y, 2.5);
    }

    #[test]
    fn slides_along_wall() {
        let grid = ring_grid(5);
        let mut player = spawned(Facing::East);
        player.pos = DVec2::new(3.5, 3.95);
        // Heading diagonally down-right: y is blocked by the south
        // ring, x keeps accumulating
        player.rotate(std::f64::consts::FRAC_PI_4);
        let cmd = MoveCmd {
            forward: 1.0,
            ..MoveCmd::default()
        };
        let before_x = player.pos.x;
        for _ in 0..5 {
            player.update(&cmd, &grid);
        }
        assert!(player.pos.x > before_x);
        assert!(player.pos.y < 4.0);
    }

    #[test]
    fn empty_cmd_is_a_noop() {
        let grid = ring_grid(5);
        let mut player = spawned(Facing::North);
        let before = player;
        player.update(&MoveCmd::default(), &grid);
        assert_eq!(player, before);
    }
}
