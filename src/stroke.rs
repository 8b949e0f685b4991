use crate::color::Rgba;
use crate::surface::RasterSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One pointer-down to pointer-up gesture: its points in drawing order and
/// the color it was started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    color: Rgba,
    points: Vec<Point>,
}

impl Stroke {
    pub fn new(color: Rgba) -> Self {
        Self {
            color,
            points: Vec::new(),
        }
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub(crate) fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Redraws the stroke with whatever pen color the surface currently has.
    ///
    /// Each point is joined to the one stored right before it, so a path that
    /// revisits a coordinate is replayed exactly as it was drawn.
    pub fn replay(&self, surface: &mut RasterSurface) {
        for (i, point) in self.points.iter().enumerate() {
            if i == 0 {
                surface.stamp_point(point.x, point.y);
            } else {
                let prev = self.points[i - 1];
                surface.stamp_line(prev.x, prev.y, point.x, point.y);
            }
        }
    }
}
