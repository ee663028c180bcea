//! Frame/hotspot viewport controller for the spin viewer. The controller
//! owns flyover playback, turns pointer/wheel/keyboard input into rotation
//! steps, maps between natural image pixels and the on-screen box, and
//! resolves which hotspots are highlighted in the active frame.

pub mod config;
pub mod controller;
pub mod highlight;
pub mod input;
pub mod mapper;
pub mod measure;
pub mod playback;
pub mod script;
pub mod session;
pub mod svg;
pub mod ticker;

pub use controller::{ControllerConfig, ControllerEvent, ViewerSnapshot, ViewportController};
pub use highlight::{HighlightState, HotspotFilter, NameFilter};
pub use input::{Command, InputEvent};
pub use mapper::{NaturalSize, RenderBox, ViewportMapper};
pub use playback::{Direction, PlaybackEngine};
