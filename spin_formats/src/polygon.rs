use std::fmt::Write;

use serde::Serialize;

/// A point in the frame image's native pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

pub fn bounds(polygon: &[Point]) -> Option<Bounds> {
    let first = *polygon.first()?;
    let mut min = first;
    let mut max = first;
    for point in &polygon[1..] {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
    }
    Some(Bounds { min, max })
}

/// Even-odd containment test. Polygons with fewer than three vertices have no
/// interior.
pub fn contains(polygon: &[Point], point: Point) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    match bounds(polygon) {
        Some(bounds) if bounds.contains(point) => {}
        _ => return false,
    }

    let mut inside = false;
    let mut prev = polygon[polygon.len() - 1];
    for &current in polygon {
        let crosses = (current.y > point.y) != (prev.y > point.y);
        if crosses {
            let x_at =
                (prev.x - current.x) * (point.y - current.y) / (prev.y - current.y) + current.x;
            if point.x < x_at {
                inside = !inside;
            }
        }
        prev = current;
    }
    inside
}

/// Formats the polygon the way an SVG `<polygon points="...">` attribute
/// expects it: `x,y` pairs separated by spaces.
pub fn svg_points(polygon: &[Point]) -> String {
    let mut out = String::with_capacity(polygon.len() * 12);
    for (idx, point) in polygon.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", point.x, point.y);
    }
    out
}
