//! Frame dataset for the spin viewer: the precomputed rotation frames, their
//! hotspot polygons, and the JSON manifest they are shipped in.

pub mod dataset;
pub mod polygon;

pub use dataset::{DatasetError, Frame, FrameDataset, Hotspot, ImageRef};
pub use polygon::{Bounds, Point};
