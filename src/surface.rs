use log::debug;
use thiserror::Error;

use crate::color::Rgba;

/// Side length of the square brush, in pixels.
pub const BRUSH_WIDTH: i32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("invalid surface dimension {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl DirtyRect {
    pub fn union(self, other: DirtyRect) -> DirtyRect {
        let (ax0, ay0, ax1, ay1) = self.bounds();
        let (bx0, by0, bx1, by1) = other.bounds();
        DirtyRect::from_bounds(ax0.min(bx0), ay0.min(by0), ax1.max(bx1), ay1.max(by1))
    }

    pub fn clamp(self, width: u32, height: u32) -> Option<DirtyRect> {
        let (x0, y0, x1, y1) = self.bounds();
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(i64::from(width));
        let y1 = y1.min(i64::from(height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(DirtyRect::from_bounds(x0, y0, x1, y1))
    }

    fn bounds(&self) -> (i64, i64, i64, i64) {
        let x = i64::from(self.x);
        let y = i64::from(self.y);
        (x, y, x + i64::from(self.width), y + i64::from(self.height))
    }

    fn from_bounds(x0: i64, y0: i64, x1: i64, y1: i64) -> DirtyRect {
        let fit = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        DirtyRect {
            x: fit(x0),
            y: fit(y0),
            width: fit(x1 - x0),
            height: fit(y1 - y0),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x0, y0, x1, y1) = self.bounds();
        let (x, y) = (i64::from(x), i64::from(y));
        x >= x0 && y >= y0 && x < x1 && y < y1
    }
}

/// Read-only view of the pixel buffer, handed to the host for presenting.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

impl Snapshot<'_> {
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        let idx = pixel_index(self.width, self.height, x, y)?;
        let px = &self.pixels[idx..idx + 4];
        Some(Rgba::rgba(px[0], px[1], px[2], px[3]))
    }
}

/// RGBA pixel buffer with the two stamp primitives strokes are built from.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    background: Rgba,
    pen_color: Rgba,
    pixels: Vec<u8>,
    damage: Option<DirtyRect>,
}

impl RasterSurface {
    pub fn new(width: i32, height: i32, background: Rgba) -> Result<Self, SurfaceError> {
        if width <= 0 || height <= 0 {
            return Err(SurfaceError::InvalidDimension { width, height });
        }

        let (width, height) = (width as u32, height as u32);
        let pixels = background
            .to_bytes()
            .repeat(width as usize * height as usize);
        debug!("allocated {width}x{height} surface, background {background}");

        Ok(Self {
            width,
            height,
            background,
            pen_color: Rgba::BLACK,
            pixels,
            damage: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn pen_color(&self) -> Rgba {
        self.pen_color
    }

    pub fn set_pen_color(&mut self, color: Rgba) {
        self.pen_color = color;
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.snapshot().pixel(x, y)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }

    /// Region touched since the last call, if any.
    pub fn take_damage(&mut self) -> Option<DirtyRect> {
        self.damage.take()
    }

    pub fn stamp_point(&mut self, x: i32, y: i32) {
        self.stamp_at(i64::from(x), i64::from(y));
    }

    /// Draws a brush-wide line from `(x0, y0)` to `(x1, y1)`.
    ///
    /// The segment is first clipped to the canvas grown by the brush width, so
    /// the walk never leaves the area where a stamp can still touch a pixel.
    pub fn stamp_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let reach = i64::from(BRUSH_WIDTH);
        let bounds = (
            -reach,
            -reach,
            i64::from(self.width) + reach,
            i64::from(self.height) + reach,
        );
        let from = (i64::from(x0), i64::from(y0));
        let to = (i64::from(x1), i64::from(y1));
        let Some((from, to)) = clip_segment(from, to, bounds) else {
            return;
        };

        // bresenham
        let (x1, y1) = to;
        let dx = (x1 - from.0).abs();
        let dy = -(y1 - from.1).abs();
        let sx = if from.0 < x1 { 1 } else { -1 };
        let sy = if from.1 < y1 { 1 } else { -1 };

        let (mut x, mut y) = from;
        let mut err = dx + dy;
        loop {
            self.stamp_at(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn stamp_at(&mut self, x: i64, y: i64) {
        let half = i64::from(BRUSH_WIDTH / 2);
        let x0 = (x - half).max(0);
        let y0 = (y - half).max(0);
        let x1 = (x - half + i64::from(BRUSH_WIDTH)).min(i64::from(self.width));
        let y1 = (y - half + i64::from(BRUSH_WIDTH)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let clip = DirtyRect::from_bounds(x0, y0, x1, y1);

        let color = self.pen_color.to_bytes();
        for py in y0..y1 {
            let row = (py as usize * self.width as usize + x0 as usize) * 4;
            for px in self.pixels[row..row + (x1 - x0) as usize * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }

        self.damage = Some(match self.damage {
            Some(prev) => prev.union(clip),
            None => clip,
        });
    }
}

/// Liang-Barsky clip of a segment against `(min_x, min_y, max_x, max_y)`.
/// Endpoints already inside the box are returned unchanged.
fn clip_segment(
    from: (i64, i64),
    to: (i64, i64),
    (min_x, min_y, max_x, max_y): (i64, i64, i64, i64),
) -> Option<((i64, i64), (i64, i64))> {
    let dx = (to.0 - from.0) as f64;
    let dy = (to.1 - from.1) as f64;
    let edges = [
        (-dx, (from.0 - min_x) as f64),
        (dx, (max_x - from.0) as f64),
        (-dy, (from.1 - min_y) as f64),
        (dy, (max_y - from.1) as f64),
    ];

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        (
            (from.0 as f64 + t * dx).round() as i64,
            (from.1 as f64 + t * dy).round() as i64,
        )
    };
    let start = if t0 > 0.0 { at(t0) } else { from };
    let end = if t1 < 1.0 { at(t1) } else { to };
    Some((start, end))
}

fn pixel_index(width: u32, height: u32, x: i32, y: i32) -> Option<usize> {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return None;
    }
    Some((y as usize * width as usize + x as usize) * 4)
}
