/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The renderer reads a `Snapshot` and nothing else; it cannot change
/// the game.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::cell::CellKind;
use crate::domain::grid::Position;
use crate::sim::world::Snapshot;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit background for every "empty" terminal cell, so the gaps
    /// between rows match the cell color.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel used to invalidate the back buffer: differs from any real cell.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        };
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }
}

// ── Renderer ──

/// Each maze cell is two terminal columns wide, so cells look square.
const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
const BAR_W: usize = 20;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, snap: &Snapshot) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        self.compose(snap);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose(&mut self, snap: &Snapshot) {
        // ── HUD row ──
        let hud = format!(
            " MAZE RUNNER  Energy: {} | Attempt: {}  Steps: {}  Tick: {} ",
            snap.energy, snap.attempt, snap.trail.len().saturating_sub(1), snap.tick,
        );
        self.front.fill_row(HUD_ROW, HUD_BG);
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);

        // ── Map ──
        let grid = snap.grid;
        for gy in 0..grid.height() {
            for gx in 0..grid.width() {
                self.compose_cell(snap, Position::new(gx, gy));
            }
        }

        // ── Energy bar ──
        let bar_row = MAP_ROW + grid.height() + 1;
        self.compose_energy_bar(snap, bar_row);

        // ── Message bar ──
        let msg_row = bar_row + 2;
        if !snap.message.is_empty() {
            self.front.fill_row(msg_row, MSG_BG);
            self.front.put_str(0, msg_row, &format!(" {} ", snap.message), Color::Black, MSG_BG);
        }

        // ── Help bar ──
        let help_row = msg_row + 2;
        let help = " Esc/Q: Quit   Legend: green=start red=exit yellow=bonus purple=penalty";
        self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
    }

    fn compose_cell(&mut self, snap: &Snapshot, pos: Position) {
        let col = pos.x * CELL_W;
        let row = MAP_ROW + pos.y;
        let bg = cell_color(snap.grid.cell_kind(pos));

        let (ch, fg) = if pos == snap.position {
            ('●', Color::Rgb { r: 255, g: 165, b: 0 })
        } else if snap.visited.contains(&pos) {
            ('·', Color::Blue)
        } else if snap.planned.contains(&pos) {
            ('∙', Color::Cyan)
        } else {
            (' ', Color::White)
        };

        self.front.set(col, row, Cell::new(ch, fg, bg));
        self.front.set(col + 1, row, Cell::new(' ', fg, bg));
    }

    fn compose_energy_bar(&mut self, snap: &Snapshot, row: usize) {
        let filled = bar_fill(snap.energy, snap.initial_energy, BAR_W);
        self.front.put_str(0, row, " [", Color::White, Color::Reset);
        for i in 0..BAR_W {
            let cell = if i < filled {
                Cell::new(' ', Color::White, Color::Green)
            } else {
                Cell::new(' ', Color::White, Color::Rgb { r: 50, g: 50, b: 60 })
            };
            self.front.set(2 + i, row, cell);
        }
        self.front.put_str(2 + BAR_W, row, "]", Color::White, Color::Reset);
    }
}

fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Wall => Color::Grey,
        CellKind::Open => Color::Reset,
        CellKind::Start => Color::DarkGreen,
        CellKind::Exit => Color::DarkRed,
        CellKind::Bonus => Color::DarkYellow,
        CellKind::Penalty => Color::DarkMagenta,
    }
}

/// Filled width of the energy bar. Energy above the initial value (after
/// a bonus) shows a full bar.
fn bar_fill(energy: i32, initial: i32, width: usize) -> usize {
    if initial <= 0 || energy <= 0 {
        return 0;
    }
    let energy = energy.min(initial) as usize;
    energy * width / initial as usize
}
