/// ASCII canvas for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, Write};
use wf3d_core::RenderSurface;

const POINT_CHAR: char = 'o';
const LINE_CHAR: char = '.';

/// Contents of a single character cell, ordered by drawing priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Cell {
    Empty,
    Line,
    Point,
}

/// A character grid where each cell stands for a block of logical pixels.
///
/// Terminal cells are roughly twice as tall as they are wide, so the default
/// cell covers 5x10 pixels to keep projected geometry in proportion.
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    cell_width: u32,
    cell_height: u32,
    cells: Vec<Cell>,
}

impl AsciiCanvas {
    /// Fails with `InvalidInput` when either cell dimension is zero
    pub fn new(cols: usize, rows: usize, cell_width: u32, cell_height: u32) -> io::Result<Self> {
        if cell_width == 0 || cell_height == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cell size must be at least 1x1 pixels, got {cell_width}x{cell_height}"),
            ));
        }
        Ok(Self {
            cols,
            rows,
            cell_width,
            cell_height,
            cells: vec![Cell::Empty; cols * rows],
        })
    }

    /// Canvas with enough cells to cover a `width` x `height` pixel viewport
    pub fn with_viewport(width: u32, height: u32, cell_width: u32, cell_height: u32) -> io::Result<Self> {
        let mut canvas = Self::new(0, 0, cell_width, cell_height)?;
        canvas.resize(
            width.div_ceil(cell_width) as usize,
            height.div_ceil(cell_height) as usize,
        );
        Ok(canvas)
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::Empty; cols * rows];
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Character at a cell, or `None` outside the grid
    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(match self.cells[row * self.cols + col] {
            Cell::Empty => ' ',
            Cell::Line => LINE_CHAR,
            Cell::Point => POINT_CHAR,
        })
    }

    /// Pixel position to fractional cell position
    fn to_cells(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x / self.cell_width as f64, y / self.cell_height as f64)
    }

    fn mark(&mut self, col: f64, row: f64, cell: Cell) {
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.cols || row >= self.rows {
            return;
        }
        let idx = row * self.cols + col;
        self.cells[idx] = self.cells[idx].max(cell);
    }

    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (c, color) = match self.cells[row * self.cols + col] {
                    Cell::Empty => (' ', Color::Reset),
                    Cell::Line => (LINE_CHAR, Color::Grey),
                    Cell::Point => (POINT_CHAR, Color::Cyan),
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if row + 1 < self.rows {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Plain text rendering, one line per row with trailing spaces trimmed
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .filter_map(|col| self.char_at(col, row))
                .collect();
            text.push_str(line.trim_end());
            text.push('\n');
        }
        text
    }
}

impl RenderSurface for AsciiCanvas {
    fn viewport(&self) -> (u32, u32) {
        (
            self.cols as u32 * self.cell_width,
            self.rows as u32 * self.cell_height,
        )
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn draw_point(&mut self, x: f64, y: f64) {
        let (col, row) = self.to_cells((x, y));
        self.mark(col, row, Cell::Point);
    }

    /// DDA line in cell space, clipped to the grid first
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let from = self.to_cells(from);
        let to = self.to_cells(to);
        let Some(((c0, r0), (c1, r1))) = clip(from, to, self.cols as f64, self.rows as f64) else {
            return;
        };
        let (dc, dr) = (c1 - c0, r1 - r0);
        let steps = dc.abs().max(dr.abs()).ceil().max(1.0);
        for i in 0..=steps as usize {
            let t = i as f64 / steps;
            self.mark(c0 + dc * t, r0 + dr * t, Cell::Line);
        }
    }
}

/// Liang-Barsky clip of a segment to `[0, width] x [0, height]`
fn clip(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (x1 - x0, y1 - y0);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [(-dx, x0), (dx, width - x0), (-dy, y0), (dy, height - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    Some((
        (x0 + t0 * dx, y0 + t0 * dy),
        (x0 + t1 * dx, y0 + t1 * dy),
    ))
}
