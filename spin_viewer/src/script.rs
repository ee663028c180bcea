//! Recorded input scripts and the one-line command syntax used by the
//! interactive session. Both funnel into `apply_event`, which drives the
//! controller exactly like live device input would.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use spin_formats::Point;
use thiserror::Error;

use crate::controller::{ViewerSnapshot, ViewportController};
use crate::input::{Button, InputEvent, Key};
use crate::mapper::RenderBox;

const NANOS_PER_MS: u64 = 1_000_000;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("reading input script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing input script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("script entry {index} at {at_ms} ms precedes the previous entry at {previous} ms")]
    OutOfOrder { index: usize, at_ms: u64, previous: u64 },
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("command '{command}' expects {expected}")]
    BadArguments {
        command: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Key {
        key: String,
    },
    Button {
        button: Button,
    },
    PointerDown {
        x: f32,
        y: f32,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,
    PointerLeave,
    DoubleClick {
        x: f32,
        y: f32,
    },
    Wheel {
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
    },
    Select {
        #[serde(default)]
        name: Option<String>,
    },
    Zoom {
        delta: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    GoTo {
        frame: usize,
    },
    Play,
    Stop,
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptEntry {
    #[serde(default)]
    pub at_ms: u64,
    pub event: ScriptEvent,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputScript {
    entries: Vec<ScriptEntry>,
}

impl InputScript {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ScriptError> {
        let entries: Vec<ScriptEntry> = serde_json::from_str(text)?;
        let mut previous = 0;
        for (index, entry) in entries.iter().enumerate() {
            if entry.at_ms < previous {
                return Err(ScriptError::OutOfOrder {
                    index,
                    at_ms: entry.at_ms,
                    previous,
                });
            }
            previous = entry.at_ms;
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScriptEvent {
    fn as_input(&self) -> Option<InputEvent> {
        Some(match self {
            Self::Key { key } => InputEvent::Key(Key::from_name(key)),
            Self::Button { button } => InputEvent::Button(*button),
            Self::PointerDown { x, y } => InputEvent::PointerDown(Point::new(*x, *y)),
            Self::PointerMove { x, y } => InputEvent::PointerMove(Point::new(*x, *y)),
            Self::PointerUp => InputEvent::PointerUp,
            Self::PointerLeave => InputEvent::PointerLeave,
            Self::DoubleClick { x, y } => InputEvent::DoubleClick(Point::new(*x, *y)),
            Self::Wheel { dx, dy } => InputEvent::Wheel {
                delta_x: *dx,
                delta_y: *dy,
            },
            _ => return None,
        })
    }
}

/// Applies one event at `host_time_ns`. Returns a snapshot for `Snapshot`.
pub fn apply_event(
    controller: &mut ViewportController,
    event: &ScriptEvent,
    host_time_ns: u64,
) -> Option<ViewerSnapshot> {
    if let Some(input) = event.as_input() {
        controller.handle_input(input, host_time_ns);
        return None;
    }
    match event {
        ScriptEvent::Select { name } => controller.select(name.as_deref()),
        ScriptEvent::Zoom { delta } => {
            controller.set_zoom(*delta);
        }
        ScriptEvent::Resize { width, height } => {
            controller.set_render_box(RenderBox::from_size(*width, *height));
        }
        ScriptEvent::GoTo { frame } => {
            controller.go_to_frame(*frame);
        }
        ScriptEvent::Play => {
            controller.start(host_time_ns);
        }
        ScriptEvent::Stop => {
            controller.stop();
        }
        ScriptEvent::Snapshot => return Some(controller.snapshot()),
        _ => {}
    }
    None
}

/// Replays a script against the controller. Host time jumps to each entry's
/// `at_ms`, letting due flyover ticks fire before the entry is applied.
pub fn replay<F>(
    script: &InputScript,
    controller: &mut ViewportController,
    mut on_snapshot: F,
) -> ViewerSnapshot
where
    F: FnMut(ViewerSnapshot),
{
    for entry in script.entries() {
        let now = entry.at_ms.saturating_mul(NANOS_PER_MS);
        controller.tick(now);
        if let Some(snapshot) = apply_event(controller, &entry.event, now) {
            on_snapshot(snapshot);
        }
    }
    controller.snapshot()
}

/// Parses one interactive command line. Blank lines yield no events.
pub fn parse_command(line: &str) -> Result<Vec<ScriptEvent>, ScriptError> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Vec::new());
    };
    let args: Vec<&str> = parts.collect();
    let key = |name: &str| ScriptEvent::Key {
        key: name.to_string(),
    };

    let events = match command {
        "left" | "prev" => vec![key("ArrowLeft")],
        "right" | "next" => vec![key("ArrowRight")],
        "toggle" | "space" => vec![key("Space")],
        "escape" | "esc" => vec![key("Escape")],
        "play" => vec![ScriptEvent::Play],
        "stop" => vec![ScriptEvent::Stop],
        "snapshot" => vec![ScriptEvent::Snapshot],
        "clear" => vec![ScriptEvent::Select { name: None }],
        "select" => match args.as_slice() {
            [name] => vec![ScriptEvent::Select {
                name: Some((*name).to_string()),
            }],
            _ => return Err(bad_args(command, "a hotspot name")),
        },
        "frame" => {
            let frame = parse_args::<usize, 1>(command, &args, "a frame index")?;
            vec![ScriptEvent::GoTo { frame: frame[0] }]
        }
        "zoom" => {
            let delta = parse_args::<f32, 1>(command, &args, "a zoom delta")?;
            vec![ScriptEvent::Zoom { delta: delta[0] }]
        }
        "wheel" => {
            let [dx, dy] = parse_args::<f32, 2>(command, &args, "DX DY")?;
            vec![ScriptEvent::Wheel { dx, dy }]
        }
        "move" => {
            let [x, y] = parse_args::<f32, 2>(command, &args, "X Y")?;
            vec![ScriptEvent::PointerMove { x, y }]
        }
        "click" => {
            let [x, y] = parse_args::<f32, 2>(command, &args, "X Y")?;
            vec![ScriptEvent::PointerDown { x, y }, ScriptEvent::PointerUp]
        }
        "resize" => {
            let [width, height] = parse_args::<f32, 2>(command, &args, "WIDTH HEIGHT")?;
            vec![ScriptEvent::Resize { width, height }]
        }
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(events)
}

fn bad_args(command: &str, expected: &'static str) -> ScriptError {
    ScriptError::BadArguments {
        command: command.to_string(),
        expected,
    }
}

fn parse_args<T, const N: usize>(
    command: &str,
    args: &[&str],
    expected: &'static str,
) -> Result<[T; N], ScriptError>
where
    T: std::str::FromStr + Copy + Default,
{
    if args.len() != N {
        return Err(bad_args(command, expected));
    }
    let mut out = [T::default(); N];
    for (slot, raw) in out.iter_mut().zip(args) {
        *slot = raw.parse().map_err(|_| bad_args(command, expected))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use spin_formats::FrameDataset;

    use crate::controller::ControllerConfig;
    use crate::highlight::HighlightState;
    use crate::mapper::NaturalSize;

    const DATASET: &str = r#"[
        { "image_name": "f0.png", "objects": [ { "name": "unit_a", "points": [[0,0],[100,0],[100,100],[0,100]] } ] },
        { "image_name": "f1.png", "objects": [ { "name": "unit_a", "points": [[0,0],[100,0],[100,100],[0,100]] } ] },
        { "image_name": "f2.png", "objects": [ { "name": "unit_a", "points": [[0,0],[100,0],[100,100],[0,100]] } ] },
        { "image_name": "f3.png", "objects": [] }
    ]"#;

    fn controller() -> ViewportController {
        let dataset = FrameDataset::from_json_str(DATASET).expect("dataset parses");
        let mut controller =
            ViewportController::new(Arc::new(dataset), ControllerConfig::default());
        controller.report_natural_size(NaturalSize::new(400, 400));
        controller.set_render_box(RenderBox::from_size(400.0, 400.0));
        controller
    }

    #[test]
    fn replay_runs_select_and_step_scenario() {
        let script = InputScript::from_json_str(
            r#"[
                { "at_ms": 0, "event": { "type": "pointer_down", "x": 50, "y": 50 } },
                { "at_ms": 5, "event": { "type": "pointer_up" } },
                { "at_ms": 10, "event": { "type": "key", "key": "ArrowRight" } },
                { "at_ms": 20, "event": { "type": "button", "button": "next" } },
                { "at_ms": 30, "event": { "type": "key", "key": "ArrowRight" } },
                { "at_ms": 40, "event": { "type": "snapshot" } }
            ]"#,
        )
        .expect("script parses");
        let mut controller = controller();
        let mut snapshots = Vec::new();
        let last = replay(&script, &mut controller, |snapshot| snapshots.push(snapshot));
        assert_eq!(snapshots.len(), 1);
        assert_eq!(last.frame, 3);
        assert_eq!(last.selected.as_deref(), Some("unit_a"));
        assert!(last.highlights.is_empty());
    }

    #[test]
    fn replay_ticks_flyover_between_entries() {
        let script = InputScript::from_json_str(
            r#"[
                { "at_ms": 0, "event": { "type": "play" } },
                { "at_ms": 3100, "event": { "type": "snapshot" } },
                { "at_ms": 3200, "event": { "type": "wheel", "dx": 80 } }
            ]"#,
        )
        .expect("script parses");
        let mut controller = controller();
        let mut snapshots = Vec::new();
        let last = replay(&script, &mut controller, |snapshot| snapshots.push(snapshot));
        assert_eq!(snapshots[0].frame, 2);
        assert!(snapshots[0].playing);
        assert_eq!(snapshots[0].highlights[0].state, HighlightState::Hidden);
        // Swipe stops the flyover and steps back one frame.
        assert!(!last.playing);
        assert_eq!(last.frame, 1);
    }

    #[test]
    fn rejects_out_of_order_entries() {
        let err = InputScript::from_json_str(
            r#"[
                { "at_ms": 10, "event": { "type": "play" } },
                { "at_ms": 5, "event": { "type": "stop" } }
            ]"#,
        )
        .expect_err("out of order");
        assert!(matches!(err, ScriptError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn parses_interactive_commands() {
        assert_eq!(
            parse_command("select unit_7").expect("select parses"),
            vec![ScriptEvent::Select {
                name: Some("unit_7".to_string())
            }]
        );
        assert_eq!(
            parse_command("click 10 20.5").expect("click parses"),
            vec![
                ScriptEvent::PointerDown { x: 10.0, y: 20.5 },
                ScriptEvent::PointerUp
            ]
        );
        assert_eq!(
            parse_command("wheel -60 0").expect("wheel parses"),
            vec![ScriptEvent::Wheel { dx: -60.0, dy: 0.0 }]
        );
        assert!(parse_command("   ").expect("blank parses").is_empty());
        assert!(matches!(
            parse_command("zoom lots"),
            Err(ScriptError::BadArguments { .. })
        ));
        assert!(matches!(
            parse_command("teleport"),
            Err(ScriptError::UnknownCommand(_))
        ));
    }
}
