use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::stroke::{Point, Stroke};
use crate::surface::RasterSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryOptions {
    /// Drop every undone stroke as soon as a new stroke is finished.
    pub clear_redo_on_stroke: bool,
    /// Maximum number of undoable strokes. Older ones are baked into the
    /// surface and can no longer be undone.
    pub limit: Option<usize>,
}

/// Undo/redo stacks of finished strokes plus the stroke being drawn.
///
/// Undo erases a stroke by replaying it in the surface background color, so
/// strokes that share pixels with it lose those pixels too.
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    undo_stack: Vec<Stroke>,
    redo_stack: Vec<Stroke>,
    current: Option<Stroke>,
    options: HistoryOptions,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: HistoryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> HistoryOptions {
        self.options
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_top(&self) -> Option<&Stroke> {
        self.undo_stack.last()
    }

    pub fn redo_top(&self) -> Option<&Stroke> {
        self.redo_stack.last()
    }

    pub fn undo_strokes(&self) -> &[Stroke] {
        &self.undo_stack
    }

    pub fn redo_strokes(&self) -> &[Stroke] {
        &self.redo_stack
    }

    /// Forgets all strokes. Pixels already on the surface stay.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current = None;
    }

    pub fn on_pointer_down(
        &mut self,
        surface: &mut RasterSurface,
        point: impl Into<Point>,
        color: Rgba,
    ) {
        if self.current.is_some() {
            warn!("pointer down while a stroke is open, ignoring");
            return;
        }

        let point = point.into();
        let mut stroke = Stroke::new(color);
        stroke.add_point(point);
        surface.set_pen_color(color);
        surface.stamp_point(point.x, point.y);
        self.current = Some(stroke);
    }

    /// Extends the open stroke. The stroke keeps the color it started with even
    /// if the pen color changed since pointer-down.
    pub fn on_pointer_move(&mut self, surface: &mut RasterSurface, point: impl Into<Point>) {
        let Some(stroke) = self.current.as_mut() else {
            return;
        };

        let point = point.into();
        surface.set_pen_color(stroke.color());
        match stroke.last_point() {
            Some(prev) => surface.stamp_line(prev.x, prev.y, point.x, point.y),
            None => surface.stamp_point(point.x, point.y),
        }
        stroke.add_point(point);
    }

    pub fn on_pointer_up(&mut self) {
        let Some(stroke) = self.current.take() else {
            return;
        };
        if stroke.is_empty() {
            return;
        }

        debug!("stroke finished with {} points", stroke.len());
        if self.options.clear_redo_on_stroke && !self.redo_stack.is_empty() {
            debug!("dropping {} undone strokes", self.redo_stack.len());
            self.redo_stack.clear();
        }
        self.push_undo(stroke);
    }

    /// Erases the most recent stroke and moves it to the redo stack.
    pub fn undo(&mut self, surface: &mut RasterSurface) -> Option<&Stroke> {
        if self.is_drawing() {
            warn!("undo requested mid-stroke, ignoring");
            return None;
        }
        let stroke = self.undo_stack.pop()?;

        surface.set_pen_color(surface.background());
        stroke.replay(surface);
        surface.set_pen_color(stroke.color());

        debug!("undo stroke of {} points", stroke.len());
        self.redo_stack.push(stroke);
        self.redo_stack.last()
    }

    /// Redraws the most recently undone stroke and moves it back to the undo stack.
    pub fn redo(&mut self, surface: &mut RasterSurface) -> Option<&Stroke> {
        if self.is_drawing() {
            warn!("redo requested mid-stroke, ignoring");
            return None;
        }
        let stroke = self.redo_stack.pop()?;

        surface.set_pen_color(stroke.color());
        stroke.replay(surface);

        debug!("redo stroke of {} points", stroke.len());
        self.push_undo(stroke);
        self.undo_stack.last()
    }

    fn push_undo(&mut self, stroke: Stroke) {
        self.undo_stack.push(stroke);
        if let Some(limit) = self.options.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
                debug!("history limit {limit} reached, dropped {excess} strokes");
            }
        }
    }
}
