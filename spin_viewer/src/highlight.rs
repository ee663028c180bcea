//! Per-hotspot visual state for the active frame. Everything here is a pure
//! function of the frame, the hover/selection names, the playing flag and the
//! collaborator's filter, so it can be evaluated outside any render pass.

use std::collections::BTreeSet;

use serde::Serialize;
use spin_formats::{Frame, Hotspot, Point};

/// Name predicate supplied by the catalog/filter collaborator.
pub trait HotspotFilter {
    fn allows(&self, name: &str) -> bool;
}

impl<F> HotspotFilter for F
where
    F: Fn(&str) -> bool,
{
    fn allows(&self, name: &str) -> bool {
        self(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NameFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
    Prefix(String),
}

impl NameFilter {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }
}

impl HotspotFilter for NameFilter {
    fn allows(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.contains(name),
            Self::Prefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InteractionState {
    pub hovered: Option<String>,
    pub selected: Option<String>,
}

impl InteractionState {
    pub fn is_hovered(&self, name: &str) -> bool {
        self.hovered.as_deref() == Some(name)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.as_deref() == Some(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightState {
    /// Suppressed during flyover: drawn with no fill or stroke, still
    /// clickable.
    Hidden,
    Default,
    Hovered,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba(0, 0, 0, 0);

    /// CSS `rgba()` notation for SVG output.
    pub fn css(&self) -> String {
        let alpha = f32::from(self.3) / 255.0;
        format!("rgba({}, {}, {}, {:.2})", self.0, self.1, self.2, alpha)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f32,
    pub interactive: bool,
}

impl HighlightState {
    pub fn style(self) -> OverlayStyle {
        match self {
            Self::Hidden => OverlayStyle {
                fill: Rgba::TRANSPARENT,
                stroke: Rgba::TRANSPARENT,
                stroke_width: 0.0,
                interactive: true,
            },
            Self::Default => OverlayStyle {
                fill: Rgba::TRANSPARENT,
                stroke: Rgba::TRANSPARENT,
                stroke_width: 0.0,
                interactive: true,
            },
            Self::Hovered => OverlayStyle {
                fill: Rgba(255, 255, 255, 77),
                stroke: Rgba(255, 255, 255, 255),
                stroke_width: 2.0,
                interactive: true,
            },
            Self::Selected => OverlayStyle {
                fill: Rgba(0, 255, 0, 102),
                stroke: Rgba(0, 255, 0, 255),
                stroke_width: 3.0,
                interactive: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedHotspot<'a> {
    pub hotspot: &'a Hotspot,
    pub state: HighlightState,
}

impl ResolvedHotspot<'_> {
    pub fn name(&self) -> &str {
        &self.hotspot.name
    }

    pub fn style(&self) -> OverlayStyle {
        self.state.style()
    }
}

pub fn highlight_state(
    name: &str,
    interaction: &InteractionState,
    playing: bool,
) -> HighlightState {
    if interaction.is_selected(name) {
        HighlightState::Selected
    } else if playing {
        HighlightState::Hidden
    } else if interaction.is_hovered(name) {
        HighlightState::Hovered
    } else {
        HighlightState::Default
    }
}

/// Highlight set for one frame, in paint order. Hotspots rejected by the
/// filter are left out entirely; a missing frame resolves to nothing.
pub fn resolve_highlights<'a>(
    frame: Option<&'a Frame>,
    interaction: &InteractionState,
    playing: bool,
    filter: &dyn HotspotFilter,
) -> Vec<ResolvedHotspot<'a>> {
    let Some(frame) = frame else {
        return Vec::new();
    };
    frame
        .hotspots
        .iter()
        .filter(|hotspot| filter.allows(&hotspot.name))
        .map(|hotspot| ResolvedHotspot {
            hotspot,
            state: highlight_state(&hotspot.name, interaction, playing),
        })
        .collect()
}

/// Topmost filter-passing hotspot containing `point` (natural pixel space).
/// Later hotspots paint over earlier ones, so the search runs back to front.
pub fn hit_test<'a>(
    frame: Option<&'a Frame>,
    point: Point,
    filter: &dyn HotspotFilter,
) -> Option<&'a Hotspot> {
    frame?
        .hotspots
        .iter()
        .rev()
        .filter(|hotspot| filter.allows(&hotspot.name))
        .find(|hotspot| hotspot.contains(point))
}
