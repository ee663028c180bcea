//! Maps between the frame image's native pixel space and the on-screen render
//! box. The image is contain-fitted (uniform scale, centred, letterboxed on the
//! loose axis) and zoom is then applied uniformly about the box centre.

use glam::Vec2;
use spin_formats::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

impl NaturalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RenderBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn center(&self) -> Vec2 {
        self.origin() + self.size() * 0.5
    }
}

/// Uniform-scale affine transform from natural pixels to render coordinates:
/// `render = natural * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMapper {
    scale: f32,
    offset: Vec2,
    natural: NaturalSize,
}

impl ViewportMapper {
    /// Returns `None` while the mapping is undefined: no measured image, or a
    /// collapsed render box.
    pub fn new(natural: NaturalSize, render_box: RenderBox, zoom: f32) -> Option<Self> {
        if natural.is_empty() || render_box.is_empty() || !(zoom > 0.0) {
            return None;
        }
        let natural_size = natural.as_vec2();
        let box_size = render_box.size();
        let fit = (box_size / natural_size).min_element();
        let fitted_origin = render_box.origin() + (box_size - natural_size * fit) * 0.5;

        let center = render_box.center();
        let offset = center + (fitted_origin - center) * zoom;
        Some(Self {
            scale: fit * zoom,
            offset,
            natural,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn natural_size(&self) -> NaturalSize {
        self.natural
    }

    pub fn to_render(&self, point: Point) -> Point {
        let mapped = Vec2::new(point.x, point.y) * self.scale + self.offset;
        Point::new(mapped.x, mapped.y)
    }

    pub fn to_natural(&self, point: Point) -> Point {
        let mapped = (Vec2::new(point.x, point.y) - self.offset) / self.scale;
        Point::new(mapped.x, mapped.y)
    }

    /// Where the whole image lands in render coordinates.
    pub fn image_rect(&self) -> RenderBox {
        let size = self.natural.as_vec2() * self.scale;
        RenderBox::new(self.offset.x, self.offset.y, size.x, size.y)
    }

    pub fn map_polygon(&self, polygon: &[Point]) -> Vec<Point> {
        polygon.iter().map(|point| self.to_render(*point)).collect()
    }
}
