use std::fs;
use std::path::{Path, PathBuf};

use glam::DVec2;
use log::info;

use crate::map::{Cell, Facing, MapGrid, Spawn};
use crate::SceneError;

/// Paths to the four wall textures, keyed by the compass face they are
/// painted on
#[derive(Debug, Clone)]
pub struct TexturePaths {
    pub north: PathBuf,
    pub south: PathBuf,
    pub east: PathBuf,
    pub west: PathBuf,
}

/// A fully parsed and validated scene: grid, colours, spawn, and where
/// to find the textures. The renderer borrows this for the duration of
/// each frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub texture_paths: TexturePaths,
    /// RGBA, alpha always 255
    pub ceiling: [u8; 4],
    pub floor: [u8; 4],
    pub grid: MapGrid,
    pub spawn: Spawn,
}

impl Scene {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
        let src = fs::read_to_string(path.as_ref())?;
        let scene = Scene::parse(&src)?;
        info!(
            "Loaded scene {:?}: {}x{} cells",
            path.as_ref(),
            scene.grid.width(),
            scene.grid.height()
        );
        Ok(scene)
    }

    pub fn parse(src: &str) -> Result<Scene, SceneError> {
        let mut header = Header::default();
        let mut rows: Vec<String> = Vec::new();
        let mut in_map = false;

        for (idx, raw) in src.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if in_map {
                push_map_row(&mut rows, raw, line_no)?;
                continue;
            }
            if line.is_empty() {
                continue;
            }
            if line.starts_with('1') || line.starts_with('0') {
                if !header.complete() {
                    return Err(SceneError::Parse {
                        line: line_no,
                        msg: "map data before all header elements were defined".into(),
                    });
                }
                in_map = true;
                push_map_row(&mut rows, raw, line_no)?;
                continue;
            }
            header.parse_line(line, line_no)?;
        }

        if !header.complete() {
            return Err(SceneError::Invalid(
                "missing one or more header elements (textures/colours)".into(),
            ));
        }
        // Trailing blank lines are padding, not map rows
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(SceneError::Invalid("map data is missing".into()));
        }

        let (grid, spawn) = build_grid(&rows)?;
        let ceiling = header_colour(header.ceiling);
        let floor = header_colour(header.floor);
        Ok(Scene {
            texture_paths: header.into_paths(),
            ceiling,
            floor,
            grid,
            spawn,
        })
    }
}

fn header_colour(c: Option<[u8; 3]>) -> [u8; 4] {
    // `complete()` was checked before this is reached
    let [r, g, b] = c.unwrap();
    [r, g, b, 255]
}

fn push_map_row(rows: &mut Vec<String>, raw: &str, line_no: usize) -> Result<(), SceneError> {
    let row = raw.trim_end();
    for ch in row.chars() {
        if !matches!(ch, '0' | '1' | ' ' | 'N' | 'S' | 'E' | 'W') {
            return Err(SceneError::Parse {
                line: line_no,
                msg: format!("invalid map character {ch:?}"),
            });
        }
    }
    rows.push(row.to_string());
    Ok(())
}

#[derive(Debug, Default)]
struct Header {
    north: Option<PathBuf>,
    south: Option<PathBuf>,
    west: Option<PathBuf>,
    east: Option<PathBuf>,
    floor: Option<[u8; 3]>,
    ceiling: Option<[u8; 3]>,
}

impl Header {
    fn complete(&self) -> bool {
        self.north.is_some()
            && self.south.is_some()
            && self.west.is_some()
            && self.east.is_some()
            && self.floor.is_some()
            && self.ceiling.is_some()
    }

    fn into_paths(self) -> TexturePaths {
        TexturePaths {
            north: self.north.unwrap(),
            south: self.south.unwrap(),
            east: self.east.unwrap(),
            west: self.west.unwrap(),
        }
    }

    fn parse_line(&mut self, line: &str, line_no: usize) -> Result<(), SceneError> {
        if let Some(rest) = line.strip_prefix("NO ") {
            set_texture(&mut self.north, rest, "NO", line_no)
        } else if let Some(rest) = line.strip_prefix("SO ") {
            set_texture(&mut self.south, rest, "SO", line_no)
        } else if let Some(rest) = line.strip_prefix("WE ") {
            set_texture(&mut self.west, rest, "WE", line_no)
        } else if let Some(rest) = line.strip_prefix("EA ") {
            set_texture(&mut self.east, rest, "EA", line_no)
        } else if let Some(rest) = line.strip_prefix("F ") {
            set_colour(&mut self.floor, rest, "F", line_no)
        } else if let Some(rest) = line.strip_prefix("C ") {
            set_colour(&mut self.ceiling, rest, "C", line_no)
        } else {
            Err(SceneError::Parse {
                line: line_no,
                msg: format!("invalid header identifier in {line:?}"),
            })
        }
    }
}

fn set_texture(
    slot: &mut Option<PathBuf>,
    rest: &str,
    ident: &str,
    line_no: usize,
) -> Result<(), SceneError> {
    if slot.is_some() {
        return Err(SceneError::Parse {
            line: line_no,
            msg: format!("duplicate texture identifier {ident}"),
        });
    }
    let path = rest.trim();
    if path.is_empty() {
        return Err(SceneError::Parse {
            line: line_no,
            msg: format!("missing texture path after {ident}"),
        });
    }
    *slot = Some(PathBuf::from(path));
    Ok(())
}

fn set_colour(
    slot: &mut Option<[u8; 3]>,
    rest: &str,
    ident: &str,
    line_no: usize,
) -> Result<(), SceneError> {
    if slot.is_some() {
        return Err(SceneError::Parse {
            line: line_no,
            msg: format!("duplicate colour identifier {ident}"),
        });
    }
    let parts: Vec<&str> = rest.trim().split(',').collect();
    if parts.len() != 3 {
        return Err(SceneError::Parse {
            line: line_no,
            msg: format!("colour {ident} must be R,G,B"),
        });
    }
    let mut rgb = [0u8; 3];
    for (out, part) in rgb.iter_mut().zip(&parts) {
        let digits = part.strip_prefix('+').unwrap_or(part);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SceneError::Parse {
                line: line_no,
                msg: format!("non-numeric colour component {part:?} for {ident}"),
            });
        }
        *out = digits
            .parse::<u32>()
            .ok()
            .and_then(|v| u8::try_from(v).ok())
            .ok_or_else(|| SceneError::Parse {
                line: line_no,
                msg: format!("colour component {part:?} out of range [0-255] for {ident}"),
            })?;
    }
    *slot = Some(rgb);
    Ok(())
}

/// Pad rows to the widest, extract the single spawn, check closedness,
/// and produce the cell grid. Space cells (outside the playable area)
/// are stored solid.
fn build_grid(rows: &[String]) -> Result<(MapGrid, Spawn), SceneError> {
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let height = rows.len();

    let mut chars: Vec<Vec<char>> = rows
        .iter()
        .map(|r| {
            let mut row: Vec<char> = r.chars().collect();
            row.resize(width, ' ');
            row
        })
        .collect();

    let mut spawn = None;
    for (row, line) in chars.iter_mut().enumerate() {
        for (col, ch) in line.iter_mut().enumerate() {
            let facing = match *ch {
                'N' => Facing::North,
                'S' => Facing::South,
                'E' => Facing::East,
                'W' => Facing::West,
                _ => continue,
            };
            if spawn.is_some() {
                return Err(SceneError::Invalid(
                    "multiple player start positions found".into(),
                ));
            }
            spawn = Some(Spawn {
                pos: DVec2::new(col as f64 + 0.5, row as f64 + 0.5),
                facing,
            });
            *ch = '0';
        }
    }
    let spawn = spawn.ok_or_else(|| {
        SceneError::Invalid("no player start position found in map".into())
    })?;

    check_closed(&chars, width, height)?;

    let cells = chars
        .iter()
        .flatten()
        .map(|&ch| if ch == '0' { Cell::Open } else { Cell::Wall })
        .collect();
    Ok((MapGrid::new(width, height, cells), spawn))
}

/// Every open cell must be off the border and never beside a space
/// cell in the four cardinal directions. This is what guarantees the
/// raycaster that every ray terminates on a wall.
fn check_closed(chars: &[Vec<char>], width: usize, height: usize) -> Result<(), SceneError> {
    let not_closed = |row: usize, col: usize| {
        Err(SceneError::Invalid(format!(
            "map not closed around open cell ({col},{row})"
        )))
    };
    for (row, line) in chars.iter().enumerate() {
        for (col, &ch) in line.iter().enumerate() {
            if ch != '0' {
                continue;
            }
            if row == 0 || row == height - 1 || col == 0 || col == width - 1 {
                return not_closed(row, col);
            }
            if chars[row - 1][col] == ' '
                || chars[row + 1][col] == ' '
                || chars[row][col - 1] == ' '
                || chars[row][col + 1] == ' '
            {
                return not_closed(row, col);
            }
        }
    }
    Ok(())
}
