//! Rendering layer.  All terminal I/O lives here.
//!
//! The game lives on a fixed logical surface (1000×750 by default).  Each
//! frame is composed onto a `Canvas` of terminal cells, where every cell
//! covers a rectangle of logical pixels, then written out with crossterm.
//! No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::collision::Visual;
use crate::entities::{Craft, EnemyColor, GameState, Phase, Projectile};
use crate::sprite::Sprite;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_PLAYER: Color = Color::Yellow;
const C_HEALTH_OK: Color = Color::Green;
const C_HEALTH_GONE: Color = Color::Red;
const C_LOST: Color = Color::White;

fn enemy_color(color: EnemyColor) -> Color {
    match color {
        EnemyColor::Red => Color::Red,
        EnemyColor::Green => Color::Green,
        EnemyColor::Blue => Color::Blue,
    }
}

/// Logical y of the "You Lost" banner.
const LOST_BANNER_Y: f32 = 350.0;

const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            color: C_BACKGROUND,
        }
    }
}

/// A terminal-sized grid that the logical surface is scaled onto.
#[derive(Clone, Debug)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    /// Logical pixels covered by one cell.
    px_per_col: f32,
    px_per_row: f32,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, width: f32, height: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            px_per_col: width / cols as f32,
            px_per_row: height / rows as f32,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = cell;
    }

    /// Terminal row containing logical `y`.
    pub fn row_of(&self, y: f32) -> i32 {
        (y / self.px_per_row).floor() as i32
    }

    /// Terminal column containing logical `x`.
    pub fn col_of(&self, x: f32) -> i32 {
        (x / self.px_per_col).floor() as i32
    }

    /// Fill every cell by sampling a surface-sized sprite at the cell centre.
    pub fn fill_background(&mut self, background: &Sprite, color: Color) {
        for row in 0..self.rows {
            let py = ((row as f32 + 0.5) * self.px_per_row) as usize;
            for col in 0..self.cols {
                let px = ((col as f32 + 0.5) * self.px_per_col) as usize;
                let glyph = background.glyph_at(px, py).unwrap_or(' ');
                self.set(col as i32, row as i32, Cell { glyph, color });
            }
        }
    }

    /// Draw `sprite` with its top-left at logical (`x`, `y`).
    ///
    /// A cell takes the first opaque pixel inside its footprint, so thin
    /// sprites such as lasers never vanish between cell centres.
    pub fn blit(&mut self, sprite: &Sprite, x: f32, y: f32, color: Color) {
        let w = sprite.width() as f32;
        let h = sprite.height() as f32;

        let col0 = self.col_of(x).max(0);
        let col1 = ((x + w) / self.px_per_col).ceil().min(self.cols as f32) as i32;
        let row0 = self.row_of(y).max(0);
        let row1 = ((y + h) / self.px_per_row).ceil().min(self.rows as f32) as i32;

        for row in row0..row1 {
            let top = row as f32 * self.px_per_row - y;
            let sy0 = top.max(0.0) as usize;
            let sy1 = (top + self.px_per_row).max(0.0).ceil() as usize;
            for col in col0..col1 {
                let left = col as f32 * self.px_per_col - x;
                let sx0 = left.max(0.0) as usize;
                let sx1 = (left + self.px_per_col).max(0.0).ceil() as usize;
                if let Some(glyph) = sprite.first_glyph_in(sx0, sy0, sx1, sy1) {
                    self.set(col, row, Cell { glyph, color });
                }
            }
        }
    }

    /// Horizontal bar across logical `[x, x + width)` on terminal `row`,
    /// `ratio` of it filled.
    fn bar(&mut self, x: f32, width: f32, row: i32, ratio: f32) {
        let col0 = self.col_of(x);
        let col1 = ((x + width) / self.px_per_col).ceil() as i32;
        let span = (col1 - col0).max(1);
        let filled = (ratio * span as f32).round() as i32;
        for i in 0..span {
            let cell = if i < filled {
                Cell { glyph: BAR_FULL, color: C_HEALTH_OK }
            } else {
                Cell { glyph: BAR_EMPTY, color: C_HEALTH_GONE }
            };
            self.set(col0 + i, row, cell);
        }
    }
}

// ── Composition ───────────────────────────────────────────────────────────────

fn draw_craft(canvas: &mut Canvas, craft: &Craft, color: Color) {
    for laser in &craft.lasers {
        draw_projectile(canvas, laser, color);
    }
    canvas.blit(craft.sprite(), craft.x, craft.y, color);
}

fn draw_projectile(canvas: &mut Canvas, laser: &Projectile, color: Color) {
    canvas.blit(laser.sprite(), laser.x, laser.y, color);
}

/// Compose the playfield (everything except HUD text) for a terminal of
/// `cols` × `rows` cells.
pub fn compose(state: &GameState, cols: u16, rows: u16) -> Canvas {
    let mut canvas = Canvas::new(cols, rows, state.width(), state.height());
    canvas.fill_background(&state.assets.background, C_BACKGROUND);

    for enemy in &state.enemies {
        draw_craft(&mut canvas, &enemy.craft, enemy_color(enemy.color));
    }

    let player = &state.player;
    draw_craft(&mut canvas, &player.craft, C_PLAYER);

    // Health bar just under the ship, or just over it when at the bottom edge
    let below = canvas.row_of(player.craft.y + player.craft.height()) + 1;
    let row = if below < canvas.rows() as i32 {
        below
    } else {
        canvas.row_of(player.craft.y) - 1
    };
    canvas.bar(
        player.craft.x,
        player.craft.width(),
        row,
        player.health_ratio(),
    );

    canvas
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let canvas = compose(state, cols, rows);

    draw_canvas(out, &canvas)?;
    draw_hud(out, state, canvas.cols())?;

    if matches!(state.phase, Phase::Lost { .. }) {
        draw_lost(out, &canvas)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.rows().saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Write the canvas row by row, switching colour only between runs.
fn draw_canvas<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    for row in 0..canvas.rows() {
        out.queue(cursor::MoveTo(0, row))?;
        let mut run = String::with_capacity(canvas.cols() as usize);
        let mut run_color = None;

        for col in 0..canvas.cols() {
            let Some(cell) = canvas.cell(col, row) else {
                continue;
            };
            if run_color != Some(cell.color) {
                if let Some(color) = run_color {
                    out.queue(style::SetForegroundColor(color))?;
                    out.queue(Print(&run))?;
                    run.clear();
                }
                run_color = Some(cell.color);
            }
            run.push(cell.glyph);
        }

        if let Some(color) = run_color {
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(&run))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;

    // Lives, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!("Lives: {}", state.lives)))?;

    // Level, right
    let level = format!("Level: {}", state.level);
    let lx = cols.saturating_sub(level.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(Print(&level))?;

    Ok(())
}

// ── Lost overlay ──────────────────────────────────────────────────────────────

fn draw_lost<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let lines = [
        "╔════════════════╗",
        "║                ║",
        "║    You Lost    ║",
        "║                ║",
        "╚════════════════╝",
    ];

    let cx = canvas.cols() / 2;
    let start_row = canvas.row_of(LOST_BANNER_Y).max(0) as u16;

    out.queue(style::SetForegroundColor(C_LOST))?;
    for (i, line) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        if row >= canvas.rows() {
            break;
        }
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}
