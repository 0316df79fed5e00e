//! Terminal scene. All terminal output lives here.
//!
//! The game thinks in scene pixels (800×600 by default); this module scales
//! them onto whatever cell grid the terminal currently has.  No game logic
//! is performed here.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use spacewars::entities::{Bounds, Direction};
use spacewars::scene::{Align, Drawable, Scene, SceneContext};

/// Half-widths at or above this are ships; smaller bodies are shots.
const SHIP_SPRITE_MIN: i32 = 10;

pub struct TerminalScene<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    bounds: Bounds,
}

impl<W: Write> TerminalScene<W> {
    pub fn new(out: W, cols: u16, rows: u16, bounds: Bounds) -> Self {
        TerminalScene {
            out,
            cols,
            rows,
            bounds,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Scene x under a terminal column (centre of the cell).
    pub fn scene_x(&self, column: u16) -> i32 {
        if self.cols == 0 {
            return 0;
        }
        let x = (2 * column as i64 + 1) * self.bounds.width as i64 / (2 * self.cols as i64);
        x as i32
    }

    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let col = x as i64 * self.cols as i64 / self.bounds.width as i64;
        let row = y as i64 * self.rows as i64 / self.bounds.height as i64;
        if x < 0 || y < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn put(&mut self, col: i64, row: i64, glyph: &str, color: Color) -> io::Result<()> {
        if col < 0 || row < 0 || row >= self.rows as i64 {
            return Ok(());
        }
        let room = (self.cols as i64 - col).max(0) as usize;
        let clipped: String = glyph.chars().take(room).collect();
        if clipped.is_empty() {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }
}

impl<W: Write> Scene for TerminalScene<W> {
    fn update(&mut self, drawables: &[Drawable<'_>]) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        for drawable in drawables {
            drawable.draw_to(&mut *self)?;
        }
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

impl<W: Write> SceneContext for TerminalScene<W> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn dot(&mut self, x: i32, y: i32, radius: i32, color: Color) -> io::Result<()> {
        let Some((col, row)) = self.cell(x, y) else {
            return Ok(());
        };
        let glyph = match radius {
            i32::MIN..=1 => ".",
            2 => "+",
            _ => "*",
        };
        self.put(col as i64, row as i64, glyph, color)
    }

    fn triangle(
        &mut self,
        x: i32,
        y: i32,
        half_width: i32,
        color: Color,
        direction: Direction,
    ) -> io::Result<()> {
        let Some((col, row)) = self.cell(x, y) else {
            return Ok(());
        };
        let (col, row) = (col as i64, row as i64);
        if half_width < SHIP_SPRITE_MIN {
            let glyph = match direction {
                Direction::Up => "║",
                Direction::Down => "↓",
            };
            return self.put(col, row, glyph, color);
        }
        // Sprite (2 rows, 3 cols), apex on the ship's centre row:
        //   ▲        \|/
        //  /|\        ▼
        match direction {
            Direction::Up => {
                self.put(col, row, "▲", color)?;
                self.put(col - 1, row + 1, "/|\\", color)
            }
            Direction::Down => {
                self.put(col - 1, row - 1, "\\|/", color)?;
                self.put(col, row, "▼", color)
            }
        }
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Color, align: Align) -> io::Result<()> {
        let Some((col, row)) = self.cell(x, y) else {
            return Ok(());
        };
        let start = match align {
            Align::Left => col as i64,
            Align::Center => col as i64 - text.chars().count() as i64 / 2,
        };
        self.put(start.max(0), row as i64, text, color)
    }
}
