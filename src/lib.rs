//! Raster painting core: a fixed-size pixel surface and a stroke history that
//! undoes strokes by painting them over in the background color.

pub mod app;
pub mod color;
pub mod config;
pub mod history;
pub mod stroke;
pub mod surface;
#[cfg(target_os = "linux")]
pub mod stylus;

pub use app::{AppError, Application, InputEvent, MainWindow, Outcome};
pub use color::{ColorError, Rgba};
pub use config::{AppConfig, ConfigError};
pub use history::{HistoryOptions, StrokeHistory};
pub use stroke::{Point, Stroke};
pub use surface::{DirtyRect, RasterSurface, Snapshot, SurfaceError, BRUSH_WIDTH};
