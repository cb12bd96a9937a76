/// Terminal front end for the wireframe viewer
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, ModifierKeyCode,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, info};
use std::io::{self, stdout, Write};
use wf3d_core::{Command, Model, Response, Viewer, ViewerConfig};

pub mod config;
pub mod renderer;

pub use renderer::AsciiCanvas;

/// Rows kept free at the top of the screen for the status line
const STATUS_ROWS: u16 = 1;

/// Map a key press to a viewer command
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let command = match key.code {
        KeyCode::Esc => Command::Exit,
        KeyCode::Char('=') => Command::FocalIncrease,
        KeyCode::Char('-') => Command::FocalDecrease,
        KeyCode::Char('w') => Command::MoveForward,
        KeyCode::Char('s') => Command::MoveBack,
        KeyCode::Char('a') => Command::MoveLeft,
        KeyCode::Char('d') => Command::MoveRight,
        KeyCode::Char(' ') => Command::MoveUp,
        // Bare Shift is only reported with keyboard enhancement enabled
        KeyCode::Char('c')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => Command::MoveDown,
        KeyCode::Char('z') => Command::RollCounterClockwise,
        KeyCode::Char('x') => Command::RollClockwise,
        KeyCode::Char('r') => Command::PitchUp,
        KeyCode::Char('f') => Command::PitchDown,
        KeyCode::Char('e') => Command::YawLeft,
        KeyCode::Char('q') => Command::YawRight,
        _ => return None,
    };
    Some(command)
}

/// Keyboard protocol flags requested from terminals that support them, so
/// that modifier keys pressed on their own arrive as key events
pub fn keyboard_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
}

fn invalid_config(e: wf3d_core::ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

/// Main application struct for the interactive terminal viewer
pub struct TerminalApp {
    viewer: Viewer,
    canvas: AsciiCanvas,
    running: bool,
}

impl TerminalApp {
    pub fn new(models: Vec<Model>, config: &ViewerConfig, cell_width: u32, cell_height: u32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        Ok(Self {
            viewer: Viewer::new(models, config).map_err(invalid_config)?,
            canvas: AsciiCanvas::new(
                cols as usize,
                rows.saturating_sub(STATUS_ROWS) as usize,
                cell_width,
                cell_height,
            )?,
            running: true,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(stdout(), PushKeyboardEnhancementFlags(keyboard_flags()))?;
        } else {
            debug!("Keyboard enhancement unsupported; bare Shift will not be reported");
        }

        let result = self.main_loop();

        // Cleanup
        if enhanced {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.viewer.redraw(&mut self.canvas);
        self.present()?;

        // Block until the next event; each one is fully handled before the next read
        while self.running {
            match event::read()? {
                Event::Key(key) => self.handle_key(&key)?,
                Event::Resize(cols, rows) => {
                    debug!("Terminal resized to {cols}x{rows}");
                    self.canvas
                        .resize(cols as usize, rows.saturating_sub(STATUS_ROWS) as usize);
                    self.viewer.redraw(&mut self.canvas);
                    self.present()?;
                }
                _ => {}
            }
        }

        info!("Viewer closed");
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) -> io::Result<()> {
        let Some(command) = command_for(key) else {
            return Ok(());
        };
        match self.viewer.handle(command, &mut self.canvas) {
            Response::Redrawn => self.present()?,
            Response::Ignored => {}
            Response::Exit => self.running = false,
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::All),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WF3D | focal {:.0} | depth {:?} | {} models | WASD/Space/C=Move QE/RF/ZX=Rotate =/-=Focal Esc=Quit",
                self.viewer.camera().focal(),
                self.viewer.camera().depth_axis(),
                self.viewer.scene().models().len()
            )),
            ResetColor,
            cursor::MoveTo(0, STATUS_ROWS),
        )?;

        self.canvas.present(&mut stdout)?;

        stdout.flush()
    }
}

/// Render a single frame at the configured viewport size, for use without a terminal
pub fn render_snapshot(
    models: Vec<Model>,
    config: &ViewerConfig,
    cell_width: u32,
    cell_height: u32,
) -> io::Result<String> {
    let viewer = Viewer::new(models, config).map_err(invalid_config)?;
    let mut canvas = AsciiCanvas::with_viewport(
        config.viewport.width,
        config.viewport.height,
        cell_width,
        cell_height,
    )?;
    viewer.redraw(&mut canvas);
    Ok(canvas.to_text())
}
