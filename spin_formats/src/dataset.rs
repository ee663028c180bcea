//! The frame dataset: an immutable, ordered ring of panorama frames. Frame
//! `i + 1` is one step clockwise from frame `i`, wrapping at the end. Each
//! frame carries the hotspot polygons visible in it, in native pixel space.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::polygon::{self, Bounds, Point};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("reading frame manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing frame manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame manifest must be an array of frames or an object with a `frames` array")]
    UnexpectedShape,
    #[error("frame {frame} hotspot '{hotspot}' point {index} has {len} coordinates, expected 2")]
    MalformedPoint {
        frame: usize,
        hotspot: String,
        index: usize,
        len: usize,
    },
    #[error("frame {frame} lists hotspot '{name}' more than once")]
    DuplicateHotspot { frame: usize, name: String },
}

/// Relative locator of a frame image, resolved against the frames directory
/// by whoever loads the pixels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn resolve(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub name: String,
    pub polygon: Vec<Point>,
}

impl Hotspot {
    pub fn new(name: impl Into<String>, polygon: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            polygon,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        polygon::contains(&self.polygon, point)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        polygon::bounds(&self.polygon)
    }

    pub fn svg_points(&self) -> String {
        polygon::svg_points(&self.polygon)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub image: ImageRef,
    pub hotspots: Vec<Hotspot>,
}

impl Frame {
    pub fn hotspot(&self, name: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|hotspot| hotspot.name == name)
    }

    pub fn hotspot_names(&self) -> impl Iterator<Item = &str> {
        self.hotspots.iter().map(|hotspot| hotspot.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameDataset {
    frames: Vec<Frame>,
}

impl FrameDataset {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&text)?;
        log::debug!(
            "loaded {} frames ({} distinct hotspots) from {}",
            dataset.len(),
            dataset.all_hotspot_names().len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(text)?;
        let records = match value {
            Value::Array(_) => value,
            Value::Object(mut map) => match map.remove("frames") {
                Some(frames @ Value::Array(_)) => frames,
                _ => return Err(DatasetError::UnexpectedShape),
            },
            _ => return Err(DatasetError::UnexpectedShape),
        };
        let records: Vec<FrameRecord> = serde_json::from_value(records)?;

        let frames = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| record.into_frame(idx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_at(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Union of hotspot names across all frames, in first-seen order.
    pub fn all_hotspot_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for name in self.frames.iter().flat_map(Frame::hotspot_names) {
            if seen.insert(name) {
                names.push(name);
            }
        }
        names
    }

    pub fn image_path(&self, base_dir: &Path, index: usize) -> Option<PathBuf> {
        self.frame_at(index).map(|frame| frame.image.resolve(base_dir))
    }
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    #[serde(alias = "image")]
    image_name: String,
    #[serde(default, alias = "hotspots")]
    objects: Vec<HotspotRecord>,
}

#[derive(Debug, Deserialize)]
struct HotspotRecord {
    name: String,
    #[serde(default)]
    points: Vec<Vec<f32>>,
}

impl FrameRecord {
    fn into_frame(self, frame: usize) -> Result<Frame, DatasetError> {
        let mut names = HashSet::new();
        let mut hotspots = Vec::with_capacity(self.objects.len());
        for record in self.objects {
            if !names.insert(record.name.clone()) {
                return Err(DatasetError::DuplicateHotspot {
                    frame,
                    name: record.name,
                });
            }
            // Occluded units ship without geometry; they are simply not part
            // of this frame.
            if record.points.is_empty() {
                log::debug!("frame {frame}: hotspot '{}' has no points", record.name);
                continue;
            }
            let polygon = record
                .points
                .iter()
                .enumerate()
                .map(|(index, pair)| match pair.as_slice() {
                    [x, y] => Ok(Point::new(*x, *y)),
                    other => Err(DatasetError::MalformedPoint {
                        frame,
                        hotspot: record.name.clone(),
                        index,
                        len: other.len(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            hotspots.push(Hotspot::new(record.name, polygon));
        }
        Ok(Frame {
            image: ImageRef::new(self.image_name),
            hotspots,
        })
    }
}
