use std::{io::Write, time::Duration};

use anyhow::{Context, Result as AnyResult};
use arena_shooter_core::LevelGeometry;

use crate::{
    FrameInput, Minimap, MinimapView, Presentation, RenderingBackend, RenderingError, Scene,
};

const LAMP_GLYPH: char = 'L';
const PLAYER_GLYPH: char = '^';
const EMPTY_GLYPH: char = ' ';

/// Renders the level grid one row per line, with lamps overlaid on their cells.
#[must_use]
pub fn render_level_map(level: &LevelGeometry) -> String {
    let mut rows: Vec<Vec<char>> = level
        .grid
        .to_ascii()
        .lines()
        .map(|line| line.chars().collect())
        .collect();

    for lamp in &level.lamps {
        let Some(cell) = level.transform.world_to_cell(*lamp) else {
            continue;
        };
        let slot = rows
            .get_mut(cell.row() as usize)
            .and_then(|row| row.get_mut(cell.column() as usize));
        if let Some(slot) = slot {
            *slot = LAMP_GLYPH;
        }
    }

    let mut text = String::new();
    for row in rows {
        text.extend(row);
        text.push('\n');
    }
    text
}

/// Rasterises a radar view into a square block of `columns` characters per side.
///
/// Enemies are drawn over spawn points, which are drawn over walls; the player
/// marker always occupies the centre.
pub fn render_minimap(view: &MinimapView, columns: usize) -> Result<String, RenderingError> {
    if columns == 0 {
        return Err(RenderingError::EmptyRaster);
    }
    let mut raster = vec![vec![None; columns]; columns];
    let cell = view.half_extent * 2.0 / columns as f32;
    let index = |value: f32| {
        let slot = ((value + view.half_extent) / cell).floor();
        (slot >= 0.0 && slot < columns as f32).then_some(slot as usize)
    };

    for blip in &view.blips {
        let (Some(column), Some(row)) = (index(blip.position.x), index(blip.position.y)) else {
            continue;
        };
        let slot = &mut raster[row][column];
        if slot.map_or(true, |kind| kind <= blip.kind) {
            *slot = Some(blip.kind);
        }
    }

    let centre = columns / 2;
    let mut text = String::with_capacity(columns * (columns + 1));
    for (row, cells) in raster.into_iter().enumerate() {
        for (column, kind) in cells.into_iter().enumerate() {
            let glyph = if row == centre && column == centre {
                PLAYER_GLYPH
            } else {
                kind.map_or(EMPTY_GLYPH, |kind| kind.glyph())
            };
            text.push(glyph);
        }
        text.push('\n');
    }
    Ok(text)
}

/// Text backend that advances the scene at a fixed frame rate and prints
/// periodic status lines followed by a final radar.
#[derive(Debug)]
pub struct AsciiBackend<W> {
    out: W,
    frame: Duration,
    max_frames: u64,
    report_every: u64,
    minimap: Minimap,
    minimap_columns: usize,
}

impl<W: Write> AsciiBackend<W> {
    /// Creates a backend that writes to `out` for at most `max_frames` frames of `frame` each.
    #[must_use]
    pub fn new(out: W, frame: Duration, max_frames: u64) -> Self {
        Self {
            out,
            frame,
            max_frames,
            report_every: 60,
            minimap: Minimap::default(),
            minimap_columns: 21,
        }
    }

    /// Prints a status line every `frames` frames.
    #[must_use]
    pub fn with_report_interval(mut self, frames: u64) -> Self {
        self.report_every = frames.max(1);
        self
    }

    /// Uses the provided radar and raster width for the closing minimap.
    #[must_use]
    pub fn with_minimap(mut self, minimap: Minimap, columns: usize) -> Self {
        self.minimap = minimap;
        self.minimap_columns = columns;
        self
    }
}

impl<W: Write> RenderingBackend for AsciiBackend<W> {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            mut scene,
            ..
        } = presentation;
        writeln!(self.out, "== {window_title} ==").context("failed to write banner")?;

        for frame in 1..=self.max_frames {
            update_scene(self.frame, FrameInput::default(), &mut scene);
            let terminal = scene.hud.status.is_terminal();
            if terminal || frame % self.report_every == 0 {
                writeln!(self.out, "{}", scene.status_line())
                    .context("failed to write status line")?;
            }
            if terminal {
                break;
            }
        }

        let view = self.minimap.project(&scene);
        let raster = render_minimap(&view, self.minimap_columns)?;
        write!(self.out, "{raster}").context("failed to write minimap")?;
        writeln!(self.out, "final status: {:?}", scene.hud.status)
            .context("failed to write final status")?;
        self.out.flush().context("failed to flush output")
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use arena_shooter_core::{CellCoord, CellKind, GameStatus, GridTransform, LevelGrid};
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::{
        tests::{hud, player_at},
        Blip, BlipKind, Color,
    };

    #[test]
    fn level_map_marks_lamps() {
        let mut grid = LevelGrid::new(4);
        let _ = grid.set(CellCoord::new(0, 0), CellKind::Wall);
        let _ = grid.set(CellCoord::new(1, 1), CellKind::PlayerStart);
        let transform = GridTransform::new(4, 2.0);
        let level = LevelGeometry {
            lamps: vec![transform.cell_to_world(CellCoord::new(3, 2))],
            grid,
            transform,
            walls: Vec::new(),
            player_start: Vec3::ZERO,
            spawn_points: Vec::new(),
            ceiling_height: 4.0,
        };

        assert_eq!(render_level_map(&level), "#...\n.P..\n...L\n....\n");
    }

    #[test]
    fn minimap_raster_layers_marks() {
        let view = MinimapView {
            half_extent: 100.0,
            blips: vec![
                Blip {
                    kind: BlipKind::Enemy,
                    position: Vec2::new(-99.0, -99.0),
                },
                Blip {
                    kind: BlipKind::Wall,
                    position: Vec2::new(-95.0, -95.0),
                },
                Blip {
                    kind: BlipKind::SpawnPoint,
                    position: Vec2::new(99.0, 99.0),
                },
            ],
        };

        let raster = render_minimap(&view, 5).expect("five columns are valid");
        assert_eq!(raster, "E    \n     \n  ^  \n     \n    S\n");
        assert_eq!(render_minimap(&view, 0), Err(RenderingError::EmptyRaster));
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn backend_stops_on_terminal_status() {
        let buffer = SharedBuffer::default();
        let backend = AsciiBackend::new(buffer.clone(), Duration::from_millis(100), 50)
            .with_report_interval(2);
        let scene = Scene::new(
            None,
            player_at(0.0, 0.0, 0.0),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            hud(),
            Duration::ZERO,
        );
        let frames = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&frames);

        backend
            .run(
                Presentation::new("test", Color::new(0.0, 0.0, 0.0, 1.0), scene),
                move |dt, _, scene| {
                    *counter.borrow_mut() += 1;
                    scene.elapsed += dt;
                    if scene.elapsed >= Duration::from_millis(500) {
                        scene.hud.status = GameStatus::Victory;
                    }
                },
            )
            .expect("writing to memory succeeds");

        assert_eq!(*frames.borrow(), 5);
        let text = String::from_utf8(buffer.0.borrow().clone()).expect("utf-8 output");
        assert!(text.starts_with("== test ==\n"));
        assert_eq!(text.matches("health=100").count(), 3, "{text}");
        assert!(text.ends_with("final status: Victory\n"), "{text}");
    }
}
