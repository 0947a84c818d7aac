//! Full-screen crossterm front-end.

use std::error::Error;
use std::io::{self, Stdout, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{self, Color, Print, SetBackgroundColor},
    terminal::{self, ClearType},
};
use gridsearch_core::{Channel, Dims, DisplayTag, Grid, MapGen, Pos};
use gridsearch_paths::{AlgorithmKind, Metrics};
use gridsearch_playback::{PlaybackEvent, Session, SpeedPreset, Surface};
use log::{debug, warn};
use rand::rngs::StdRng;

const VISITED: [Color; 4] = [Color::DarkCyan, Color::DarkMagenta, Color::DarkBlue, Color::DarkYellow];
const PATH: [Color; 4] = [Color::Yellow, Color::Magenta, Color::Cyan, Color::White];

const HELP: &str = "enter run  1-4 algo  c compare  s speed  m maze  w walls  p clear path  x clear walls  q quit";

fn tag_color(tag: DisplayTag) -> Color {
    match tag {
        DisplayTag::Empty => Color::Reset,
        DisplayTag::Wall => Color::DarkGrey,
        DisplayTag::Start => Color::Green,
        DisplayTag::End => Color::Red,
        DisplayTag::Visited(c) => VISITED[c.0 as usize % VISITED.len()],
        DisplayTag::Path(c) => PATH[c.0 as usize % PATH.len()],
    }
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
struct Terminal;

impl Terminal {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            style::ResetColor,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// What the key loop should do after handling input.
enum Flow {
    Continue,
    Redraw,
    Quit,
}

pub struct App {
    session: Session,
    mapgen: MapGen<StdRng>,
    maze: bool,
    density: f64,
    compare: Vec<AlgorithmKind>,
    metrics: Vec<Metrics>,
    message: Option<String>,
    tx: Sender<PlaybackEvent>,
    rx: Receiver<PlaybackEvent>,
}

impl App {
    pub fn new(
        session: Session,
        mapgen: MapGen<StdRng>,
        maze: bool,
        density: f64,
        compare: Vec<AlgorithmKind>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            session,
            mapgen,
            maze,
            density,
            compare,
            metrics: Vec::new(),
            message: None,
            tx,
            rx,
        }
    }

    fn sink(&self) -> impl FnMut(PlaybackEvent) + Send + 'static {
        let tx = self.tx.clone();
        move |ev| {
            let _ = tx.send(ev);
        }
    }

    fn run_selected(&mut self) {
        let config = *self.session.config();
        let sink = self.sink();
        let outcome = self.session.run_with(config.algorithm, config.speed, sink);
        self.report(outcome.map(|m| vec![m]));
    }

    fn run_compare(&mut self) {
        let kinds = if self.compare.is_empty() {
            AlgorithmKind::ALL.to_vec()
        } else {
            self.compare.clone()
        };
        let speed = self.session.config().speed;
        let sink = self.sink();
        let outcome = self.session.compare(&kinds, speed, sink);
        self.report(outcome.map(|(metrics, _)| metrics));
    }

    fn report<E: Error>(&mut self, outcome: Result<Vec<Metrics>, E>) {
        match outcome {
            Ok(metrics) => {
                self.metrics = metrics;
                self.message = None;
            }
            Err(e) => {
                warn!("run failed: {e}");
                self.metrics.clear();
                self.message = Some(e.to_string());
            }
        }
    }

    fn regenerate(&mut self, maze: bool) {
        self.maze = maze;
        let (mapgen, density) = (&mut self.mapgen, self.density);
        self.session.edit(|grid| {
            grid.clear_display();
            grid.clear_walls();
            if maze {
                mapgen.maze(grid);
            } else {
                mapgen.scatter_walls(grid, density);
            }
        });
        self.metrics.clear();
    }

    fn next_speed(&mut self) {
        let current = self.session.config().speed;
        let i = SpeedPreset::ALL.iter().position(|&s| s == current).unwrap_or(0);
        self.session
            .set_speed(SpeedPreset::ALL[(i + 1) % SpeedPreset::ALL.len()]);
    }

    fn on_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Enter | KeyCode::Char(' ') => self.run_selected(),
            KeyCode::Char(c @ '1'..='4') => {
                let i = c as usize - '1' as usize;
                self.session.set_algorithm(AlgorithmKind::ALL[i]);
                self.run_selected();
            }
            KeyCode::Char('c') => self.run_compare(),
            KeyCode::Char('s') => self.next_speed(),
            KeyCode::Char('m') => self.regenerate(true),
            KeyCode::Char('w') => self.regenerate(false),
            KeyCode::Char('p') => self.session.edit(Grid::clear_display),
            KeyCode::Char('x') => self.session.edit(|g| {
                g.clear_display();
                g.clear_walls();
            }),
            _ => return Flow::Continue,
        }
        Flow::Redraw
    }

    /// Left button draws walls, right button erases them.
    fn on_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Flow {
        let wall = match kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => true,
            MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => {
                false
            }
            _ => return Flow::Continue,
        };
        let dims = self.session.grid().lock().dims();
        let Some(pos) = cell_at(dims, column, row) else {
            return Flow::Continue;
        };
        let result = self.session.edit(|g| {
            g.clear_display();
            g.set_wall(pos, wall)
        });
        if let Err(e) = result {
            debug!("wall edit ignored: {e}");
        }
        Flow::Redraw
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// Redraw everything: the grid, or after a comparison one board layer
    /// per algorithm side by side.
    fn draw_all(&self, out: &mut Stdout) -> io::Result<()> {
        queue!(out, SetBackgroundColor(Color::Reset), terminal::Clear(ClearType::All))?;
        let dims = match self.session.board() {
            Some(board) => {
                let board = board.lock();
                let dims = board.dims();
                for c in 0..board.channels() {
                    let channel = Channel(c as u8);
                    for p in dims.iter() {
                        if let Some(tag) = board.tag(channel, p) {
                            draw_cell(out, layer_x(channel, dims), p, tag)?;
                        }
                    }
                }
                dims
            }
            None => {
                let grid = self.session.grid();
                let grid = grid.lock();
                for p in grid.dims().iter() {
                    draw_cell(out, 0, p, grid[p].display)?;
                }
                grid.dims()
            }
        };
        self.draw_status(out, dims.rows as u16 + 1)?;
        out.flush()
    }

    fn draw_status(&self, out: &mut Stdout, row: u16) -> io::Result<()> {
        let config = self.session.config();
        queue!(
            out,
            SetBackgroundColor(Color::Reset),
            cursor::MoveTo(0, row),
            Print(format!(
                "{} | {} | {}",
                config.algorithm.title(),
                config.speed,
                if self.maze { "maze" } else { "scatter" }
            )),
        )?;
        let mut line = row + 1;
        if let Some(msg) = &self.message {
            queue!(out, cursor::MoveTo(0, line), Print(msg))?;
            line += 1;
        }
        let compared = self.session.board().is_some();
        for (c, m) in self.metrics.iter().enumerate() {
            queue!(out, cursor::MoveTo(0, line))?;
            if compared {
                queue!(
                    out,
                    SetBackgroundColor(tag_color(DisplayTag::Path(Channel(c as u8)))),
                    Print("  "),
                    SetBackgroundColor(Color::Reset),
                    Print(" ")
                )?;
            }
            queue!(out, Print(m))?;
            line += 1;
        }
        queue!(out, cursor::MoveTo(0, line + 1), Print(HELP))
    }

    /// Draw cells touched by playback, reading their tag from the current
    /// surface so late events from a replaced playback still draw the
    /// current state.
    fn draw_events(&self, out: &mut Stdout) -> io::Result<()> {
        let touched: Vec<(Channel, Pos)> = self.rx.try_iter().map(|ev| (ev.channel, ev.pos)).collect();
        if touched.is_empty() {
            return Ok(());
        }
        match self.session.board() {
            Some(board) => {
                let board = board.lock();
                for (channel, p) in touched {
                    if let Some(tag) = board.tag(channel, p) {
                        draw_cell(out, layer_x(channel, board.dims()), p, tag)?;
                    }
                }
            }
            None => {
                let grid = self.session.grid();
                let grid = grid.lock();
                for (_, p) in touched {
                    if let Some(node) = grid.node(p) {
                        draw_cell(out, 0, p, node.display)?;
                    }
                }
            }
        }
        out.flush()
    }
}

/// Left edge of a board layer; layers sit side by side with a gap.
fn layer_x(channel: Channel, dims: Dims) -> u16 {
    (channel.0 as usize * (dims.cols * 2 + 2)) as u16
}

/// Grid cell under a terminal position. Cells are two columns wide and only
/// the leftmost layer maps back to the grid.
fn cell_at(dims: Dims, column: u16, row: u16) -> Option<Pos> {
    let pos = Pos::new(row as usize, column as usize / 2);
    dims.contains(pos).then_some(pos)
}

fn draw_cell(out: &mut Stdout, x: u16, p: Pos, tag: DisplayTag) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(x + p.col as u16 * 2, p.row as u16),
        SetBackgroundColor(tag_color(tag)),
        Print("  ")
    )
}

/// Run the interactive loop until the user quits.
pub fn run(mut app: App) -> Result<(), Box<dyn Error>> {
    let _terminal = Terminal::enter()?;
    let mut out = io::stdout();
    app.run_selected();
    app.draw_all(&mut out)?;

    loop {
        if event::poll(Duration::from_millis(16))? {
            let flow = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key.code),
                Event::Mouse(me) => app.on_mouse(me.kind, me.column, me.row),
                Event::Resize(..) => Flow::Redraw,
                _ => Flow::Continue,
            };
            match flow {
                Flow::Quit => break,
                Flow::Redraw => app.draw_all(&mut out)?,
                Flow::Continue => {}
            }
        }
        app.draw_events(&mut out)?;
    }
    app.session.cancel();
    Ok(())
}
