//! Turns raw device input into navigation commands. Keyboard and buttons map
//! one-to-one; pointer drags and horizontal wheel swipes are thresholded so
//! jitter and high-frequency trackpad deltas only produce whole steps.

use serde::Deserialize;
use spin_formats::Point;

use crate::playback::Direction;

pub const DEFAULT_DRAG_THRESHOLD: f32 = 30.0;
pub const DEFAULT_WHEEL_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Other,
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" | "left" => Self::ArrowLeft,
            "ArrowRight" | "Right" | "right" => Self::ArrowRight,
            " " | "Space" | "space" => Self::Space,
            "Escape" | "Esc" | "escape" => Self::Escape,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Previous,
    Next,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    Button(Button),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PointerLeave,
    DoubleClick(Point),
    Wheel { delta_x: f32, delta_y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Step(Direction),
    Toggle,
    Dismiss,
}

/// How a physical gesture maps onto rotation. `Grab` treats the subject as
/// the thing being dragged, so a rightward gesture rotates backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureDirection {
    #[default]
    Grab,
    Camera,
}

impl GestureDirection {
    fn apply(self, physical: Direction) -> Direction {
        match self {
            Self::Grab => physical.reversed(),
            Self::Camera => physical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    pub drag_threshold: f32,
    pub wheel_threshold: f32,
    pub gesture_direction: GestureDirection,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            gesture_direction: GestureDirection::Grab,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragAnchor {
    pub active: bool,
    pub origin_x: f32,
}

#[derive(Debug, Default)]
pub struct InputTranslator {
    config: InputConfig,
    drag: DragAnchor,
    wheel_accumulator: f32,
}

impl InputTranslator {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            drag: DragAnchor::default(),
            wheel_accumulator: 0.0,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn drag_anchor(&self) -> DragAnchor {
        self.drag
    }

    pub fn wheel_accumulator(&self) -> f32 {
        self.wheel_accumulator
    }

    pub fn translate(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Key(key) => match key {
                Key::ArrowLeft => Some(Command::Step(Direction::Backward)),
                Key::ArrowRight => Some(Command::Step(Direction::Forward)),
                Key::Space => Some(Command::Toggle),
                Key::Escape => Some(Command::Dismiss),
                Key::Other => None,
            },
            InputEvent::Button(button) => Some(match button {
                Button::Previous => Command::Step(Direction::Backward),
                Button::Next => Command::Step(Direction::Forward),
                Button::Toggle => Command::Toggle,
            }),
            InputEvent::PointerDown(point) => {
                self.begin_drag(point.x);
                None
            }
            InputEvent::PointerMove(point) => self.drag_to(point.x),
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                self.end_drag();
                None
            }
            InputEvent::DoubleClick(_) => None,
            InputEvent::Wheel { delta_x, delta_y } => self.wheel(delta_x, delta_y),
        }
    }

    pub fn begin_drag(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        self.drag = DragAnchor {
            active: true,
            origin_x: x,
        };
    }

    pub fn end_drag(&mut self) {
        self.drag.active = false;
    }

    fn drag_to(&mut self, x: f32) -> Option<Command> {
        if !self.drag.active || !x.is_finite() {
            return None;
        }
        let delta = x - self.drag.origin_x;
        if delta.abs() <= self.config.drag_threshold {
            return None;
        }
        // Re-anchor so a long drag yields one step per threshold crossing.
        self.drag.origin_x = x;
        let physical = Direction::from_delta(delta)?;
        Some(Command::Step(self.config.gesture_direction.apply(physical)))
    }

    fn wheel(&mut self, delta_x: f32, delta_y: f32) -> Option<Command> {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            return None;
        }
        // Vertical-dominant events belong to scrolling and zoom.
        if delta_x.abs() <= delta_y.abs() {
            return None;
        }
        self.wheel_accumulator += delta_x;
        if self.wheel_accumulator.abs() <= self.config.wheel_threshold {
            return None;
        }
        let physical = Direction::from_delta(self.wheel_accumulator)?;
        self.wheel_accumulator = 0.0;
        Some(Command::Step(self.config.gesture_direction.apply(physical)))
    }
}
