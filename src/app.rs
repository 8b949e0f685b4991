use log::{debug, info};
use thiserror::Error;

use crate::color::Rgba;
use crate::config::AppConfig;
use crate::history::StrokeHistory;
use crate::stroke::Point;
use crate::surface::{DirtyRect, RasterSurface, SurfaceError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("no palette swatch at index {0}")]
    UnknownSwatch(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    PointerUp,
    KeyPress(u32),
}

/// What an input event did, so the host knows whether to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Stroked,
    Finished,
    Undone,
    Redone,
    Ignored,
}

pub struct MainWindow {
    surface: RasterSurface,
    history: StrokeHistory,
    palette: Vec<Rgba>,
    selected: Rgba,
    undo_key: u32,
    redo_key: u32,
}

impl MainWindow {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        let mut surface =
            RasterSurface::new(config.canvas_width, config.canvas_height, config.background)?;
        let selected = config.palette.first().copied().unwrap_or(Rgba::BLACK);
        surface.set_pen_color(selected);

        Ok(Self {
            surface,
            history: StrokeHistory::with_options(config.history),
            palette: config.palette.clone(),
            selected,
            undo_key: config.undo_key,
            redo_key: config.redo_key,
        })
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn palette(&self) -> &[Rgba] {
        &self.palette
    }

    pub fn selected_color(&self) -> Rgba {
        self.selected
    }

    pub fn take_damage(&mut self) -> Option<DirtyRect> {
        self.surface.take_damage()
    }

    /// Picks the color for the next stroke. A stroke already in progress keeps its color.
    pub fn select_swatch(&mut self, index: usize) -> Result<Rgba, AppError> {
        let color = *self
            .palette
            .get(index)
            .ok_or(AppError::UnknownSwatch(index))?;
        self.selected = color;
        self.surface.set_pen_color(color);
        debug!("selected swatch {index} ({color})");
        Ok(color)
    }

    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::PointerDown { x, y } => {
                if self.history.is_drawing() {
                    return Outcome::Ignored;
                }
                self.history
                    .on_pointer_down(&mut self.surface, Point::new(x, y), self.selected);
                Outcome::Stroked
            }
            InputEvent::PointerMove { x, y } => {
                if !self.history.is_drawing() {
                    return Outcome::Ignored;
                }
                self.history.on_pointer_move(&mut self.surface, Point::new(x, y));
                Outcome::Stroked
            }
            InputEvent::PointerUp => {
                if !self.history.is_drawing() {
                    return Outcome::Ignored;
                }
                self.history.on_pointer_up();
                Outcome::Finished
            }
            InputEvent::KeyPress(code) if code == self.undo_key => {
                match self.history.undo(&mut self.surface) {
                    Some(_) => Outcome::Undone,
                    None => Outcome::Ignored,
                }
            }
            InputEvent::KeyPress(code) if code == self.redo_key => {
                match self.history.redo(&mut self.surface) {
                    Some(_) => Outcome::Redone,
                    None => Outcome::Ignored,
                }
            }
            InputEvent::KeyPress(_) => Outcome::Ignored,
        }
    }
}

/// Owns the single window of the program for its whole lifetime.
pub struct Application {
    window: MainWindow,
}

impl Application {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let window = MainWindow::new(config)?;
        info!(
            "canvas {}x{}, {} swatches",
            window.surface.width(),
            window.surface.height(),
            window.palette.len()
        );
        Ok(Self { window })
    }

    pub fn window(&self) -> &MainWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut MainWindow {
        &mut self.window
    }

    pub fn dispatch(&mut self, event: InputEvent) -> Outcome {
        self.window.handle(event)
    }

    pub fn shutdown(self) {
        let history = self.window.history();
        info!(
            "shutting down with {} undoable and {} redoable strokes",
            history.undo_len(),
            history.redo_len()
        );
    }
}
