//! The viewport controller: owns playback and interaction state for one
//! mounted viewer, routes translated input into playback commands, and
//! exposes the read-only views collaborators draw from (current frame,
//! hover/selection, playing flag, highlight set). Every observable change is
//! queued as a `ControllerEvent` for collaborators to drain.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use spin_formats::{Frame, FrameDataset, Hotspot, Point};

use crate::highlight::{
    self, HighlightState, HotspotFilter, InteractionState, NameFilter, ResolvedHotspot,
};
use crate::input::{Command, DragAnchor, InputConfig, InputEvent, InputTranslator};
use crate::mapper::{NaturalSize, RenderBox, ViewportMapper};
use crate::playback::{Direction, PlaybackConfig, PlaybackEngine};

pub const MIN_ZOOM: f32 = 1.0;
pub const DEFAULT_MAX_ZOOM: f32 = 4.0;
/// Tooltip offset from the cursor, in viewport pixels.
pub const TOOLTIP_OFFSET: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub playback: PlaybackConfig,
    pub input: InputConfig,
    pub max_zoom: f32,
    pub clear_selection_on_dismiss: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            input: InputConfig::default(),
            max_zoom: DEFAULT_MAX_ZOOM,
            clear_selection_on_dismiss: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ControllerEvent {
    FrameChanged { index: usize },
    PlaybackChanged { playing: bool },
    HoverChanged { name: Option<String> },
    SelectionChanged { name: Option<String> },
    DismissRequested,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub text: String,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightEntry {
    pub name: String,
    pub state: HighlightState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerSnapshot {
    pub frame: usize,
    pub frame_count: usize,
    pub playing: bool,
    pub zoom: f32,
    pub natural_size: Option<NaturalSize>,
    pub hovered: Option<String>,
    pub selected: Option<String>,
    pub highlights: Vec<HighlightEntry>,
}

pub struct ViewportController {
    dataset: Arc<FrameDataset>,
    /// Every hotspot name in any frame; selection is restricted to these.
    known_names: BTreeSet<String>,
    playback: PlaybackEngine,
    input: InputTranslator,
    interaction: InteractionState,
    zoom: f32,
    max_zoom: f32,
    natural_size: Option<NaturalSize>,
    render_box: Option<RenderBox>,
    cursor: Option<Point>,
    filter: Box<dyn HotspotFilter>,
    clear_selection_on_dismiss: bool,
    events: Vec<ControllerEvent>,
}

impl ViewportController {
    pub fn new(dataset: Arc<FrameDataset>, config: ControllerConfig) -> Self {
        let playback = PlaybackEngine::new(dataset.len(), config.playback);
        let known_names = dataset
            .all_hotspot_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            dataset,
            known_names,
            playback,
            input: InputTranslator::new(config.input),
            interaction: InteractionState::default(),
            zoom: MIN_ZOOM,
            max_zoom: config.max_zoom.max(MIN_ZOOM),
            natural_size: None,
            render_box: None,
            cursor: None,
            filter: Box::new(NameFilter::All),
            clear_selection_on_dismiss: config.clear_selection_on_dismiss,
            events: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<FrameDataset> {
        &self.dataset
    }

    pub fn current_frame_index(&self) -> usize {
        self.playback.current()
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        self.dataset.frame_at(self.playback.current())
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn playback(&self) -> &PlaybackEngine {
        &self.playback
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn hovered(&self) -> Option<&str> {
        self.interaction.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.interaction.selected.as_deref()
    }

    pub fn drag_anchor(&self) -> DragAnchor {
        self.input.drag_anchor()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn natural_size(&self) -> Option<NaturalSize> {
        self.natural_size
    }

    pub fn render_box(&self) -> Option<RenderBox> {
        self.render_box
    }

    pub fn start(&mut self, host_time_ns: u64) -> bool {
        let started = self.playback.start(host_time_ns);
        if started {
            log::info!("flyover started at frame {}", self.playback.current());
            self.events.push(ControllerEvent::PlaybackChanged { playing: true });
        }
        started
    }

    pub fn stop(&mut self) -> bool {
        let stopped = self.playback.stop();
        if stopped {
            log::info!("flyover stopped at frame {}", self.playback.current());
            self.events.push(ControllerEvent::PlaybackChanged { playing: false });
        }
        stopped
    }

    pub fn toggle(&mut self, host_time_ns: u64) -> bool {
        if self.is_playing() {
            self.stop()
        } else {
            self.start(host_time_ns)
        }
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        self.stop();
        let changed = self.playback.step(direction);
        self.after_frame_change(changed);
        changed
    }

    pub fn go_to_frame(&mut self, index: usize) -> bool {
        self.stop();
        let changed = self.playback.go_to(index);
        self.after_frame_change(changed);
        changed
    }

    /// Applies flyover ticks that have come due by `host_time_ns`.
    pub fn tick(&mut self, host_time_ns: u64) -> u64 {
        let before = self.playback.current();
        let ticks = self.playback.advance_to(host_time_ns);
        self.after_frame_change(self.playback.current() != before);
        ticks
    }

    /// Timer wake-up for the flyover armed as `generation`.
    pub fn wake(&mut self, generation: u64, host_time_ns: u64) -> u64 {
        let before = self.playback.current();
        let ticks = self.playback.wake(generation, host_time_ns);
        self.after_frame_change(self.playback.current() != before);
        ticks
    }

    /// Routes one raw input event. Pointer presses on a hotspot act as a
    /// click and never anchor a drag.
    pub fn handle_input(&mut self, event: InputEvent, host_time_ns: u64) -> Option<Command> {
        match event {
            InputEvent::PointerDown(point) => {
                self.cursor = Some(point);
                if self.click(point) {
                    return None;
                }
            }
            InputEvent::PointerMove(point) => {
                self.cursor = Some(point);
                self.refresh_hover();
            }
            InputEvent::PointerLeave => {
                self.cursor = None;
                self.set_hovered(None);
            }
            InputEvent::DoubleClick(point) => {
                if self.hotspot_name_at(point).is_some() {
                    self.select(None);
                }
                return None;
            }
            _ => {}
        }

        let command = self.input.translate(event)?;
        match command {
            Command::Step(direction) => {
                self.step(direction);
            }
            Command::Toggle => {
                self.toggle(host_time_ns);
            }
            Command::Dismiss => {
                self.events.push(ControllerEvent::DismissRequested);
                if self.clear_selection_on_dismiss {
                    self.set_selected(None);
                }
            }
        }
        Some(command)
    }

    /// Primary click at viewport coordinates. Toggles selection of the hotspot
    /// under the pointer; returns `false` when nothing was hit.
    pub fn click(&mut self, point: Point) -> bool {
        let Some(name) = self.hotspot_name_at(point) else {
            return false;
        };
        self.stop();
        if self.interaction.is_selected(&name) {
            self.set_selected(None);
        } else {
            self.set_selected(Some(name));
        }
        true
    }

    /// Programmatic selection from a collaborator (catalog entry, etc.).
    /// Names that appear in no frame leave the selection untouched.
    pub fn select(&mut self, name: Option<&str>) {
        self.stop();
        if let Some(name) = name
            && !self.known_names.contains(name)
        {
            log::warn!("ignoring selection of unknown hotspot '{name}'");
            return;
        }
        self.set_selected(name.map(str::to_string));
    }

    /// Adjusts zoom by `delta`, clamped to `[MIN_ZOOM, max_zoom]`.
    pub fn set_zoom(&mut self, delta: f32) -> f32 {
        let target = self.zoom + delta;
        if target.is_finite() {
            self.zoom = target.clamp(MIN_ZOOM, self.max_zoom);
        }
        self.zoom
    }

    pub fn set_render_box(&mut self, render_box: RenderBox) {
        self.render_box = Some(render_box);
        self.refresh_hover();
    }

    /// Records the frames' intrinsic size. Only the first non-empty report
    /// takes effect.
    pub fn report_natural_size(&mut self, size: NaturalSize) -> bool {
        if self.natural_size.is_some() || size.is_empty() {
            return false;
        }
        log::info!("natural frame size {}x{}", size.width, size.height);
        self.natural_size = Some(size);
        self.refresh_hover();
        true
    }

    pub fn set_filter(&mut self, filter: impl HotspotFilter + 'static) {
        self.filter = Box::new(filter);
        self.refresh_hover();
    }

    pub fn filter(&self) -> &dyn HotspotFilter {
        self.filter.as_ref()
    }

    pub fn mapper(&self) -> Option<ViewportMapper> {
        ViewportMapper::new(self.natural_size?, self.render_box?, self.zoom)
    }

    pub fn highlights(&self) -> Vec<ResolvedHotspot<'_>> {
        highlight::resolve_highlights(
            self.current_frame(),
            &self.interaction,
            self.is_playing(),
            self.filter.as_ref(),
        )
    }

    /// Hotspot under a viewport point in the active frame.
    pub fn hotspot_at(&self, point: Point) -> Option<&Hotspot> {
        let natural = self.mapper()?.to_natural(point);
        highlight::hit_test(self.current_frame(), natural, self.filter.as_ref())
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        if self.is_playing() {
            return None;
        }
        let text = self.interaction.hovered.clone()?;
        let cursor = self.cursor?;
        Some(Tooltip {
            text,
            position: Point::new(cursor.x + TOOLTIP_OFFSET, cursor.y + TOOLTIP_OFFSET),
        })
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            frame: self.current_frame_index(),
            frame_count: self.dataset.len(),
            playing: self.is_playing(),
            zoom: self.zoom,
            natural_size: self.natural_size,
            hovered: self.interaction.hovered.clone(),
            selected: self.interaction.selected.clone(),
            highlights: self
                .highlights()
                .into_iter()
                .map(|entry| HighlightEntry {
                    name: entry.name().to_string(),
                    state: entry.state,
                })
                .collect(),
        }
    }

    pub fn events(&self) -> &[ControllerEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Unmounts the controller, cancelling any live flyover timer.
    pub fn teardown(mut self) -> Vec<ControllerEvent> {
        self.stop();
        self.input.end_drag();
        log::debug!("viewport controller torn down at frame {}", self.current_frame_index());
        self.drain_events()
    }

    fn hotspot_name_at(&self, point: Point) -> Option<String> {
        self.hotspot_at(point).map(|hotspot| hotspot.name.clone())
    }

    fn after_frame_change(&mut self, changed: bool) {
        if !changed {
            return;
        }
        let index = self.playback.current();
        log::debug!("frame {index}");
        self.events.push(ControllerEvent::FrameChanged { index });
        self.refresh_hover();
    }

    fn refresh_hover(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let name = self.hotspot_name_at(cursor);
        self.set_hovered(name);
    }

    fn set_hovered(&mut self, name: Option<String>) {
        if self.interaction.hovered == name {
            return;
        }
        self.interaction.hovered = name.clone();
        self.events.push(ControllerEvent::HoverChanged { name });
    }

    fn set_selected(&mut self, name: Option<String>) {
        if self.interaction.selected == name {
            return;
        }
        match name.as_deref() {
            Some(name) => log::info!("selected {name}"),
            None => log::info!("selection cleared"),
        }
        self.interaction.selected = name.clone();
        self.events.push(ControllerEvent::SelectionChanged { name });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Button, Key};
    use spin_formats::ImageRef;

    const MS: u64 = 1_000_000;

    fn square(name: &str, x: f32, y: f32, side: f32) -> Hotspot {
        Hotspot::new(
            name,
            vec![
                Point::new(x, y),
                Point::new(x + side, y),
                Point::new(x + side, y + side),
                Point::new(x, y + side),
            ],
        )
    }

    /// Four frames; `unit_a` visible in frames 0-2 only, `unit_b` everywhere.
    fn dataset() -> Arc<FrameDataset> {
        let frames = (0..4)
            .map(|idx| {
                let mut hotspots = Vec::new();
                if idx < 3 {
                    hotspots.push(square("unit_a", 100.0, 100.0, 100.0));
                }
                hotspots.push(square("unit_b", 300.0, 100.0, 100.0));
                Frame {
                    image: ImageRef::new(format!("frame_{idx:03}.png")),
                    hotspots,
                }
            })
            .collect();
        Arc::new(FrameDataset::new(frames))
    }

    fn mounted() -> ViewportController {
        let mut controller = ViewportController::new(dataset(), ControllerConfig::default());
        controller.report_natural_size(NaturalSize::new(800, 400));
        controller.set_render_box(RenderBox::from_size(800.0, 400.0));
        controller
    }

    #[test]
    fn mounts_with_defaults() {
        let controller = ViewportController::new(dataset(), ControllerConfig::default());
        assert_eq!(controller.current_frame_index(), 0);
        assert!(!controller.is_playing());
        assert_eq!(controller.zoom(), MIN_ZOOM);
        assert_eq!(controller.hovered(), None);
        assert_eq!(controller.selected(), None);
        assert!(controller.natural_size().is_none());
        assert!(controller.mapper().is_none());
    }

    #[test]
    fn selection_survives_frames_without_the_hotspot() {
        let mut controller = mounted();
        controller.select(Some("unit_a"));
        for _ in 0..3 {
            controller.step(Direction::Forward);
        }
        assert_eq!(controller.current_frame_index(), 3);
        assert_eq!(controller.selected(), Some("unit_a"));
        assert!(controller.highlights().iter().all(|entry| entry.name() != "unit_a"));

        let only_a = NameFilter::only(["unit_a"]);
        controller.set_filter(only_a);
        assert!(controller.highlights().is_empty());

        controller.step(Direction::Forward);
        let resolved = controller.highlights();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].state, HighlightState::Selected);
    }

    #[test]
    fn double_start_then_stop_leaves_no_timer() {
        let mut controller = mounted();
        assert!(controller.start(0));
        assert!(!controller.start(MS));
        assert!(controller.stop());
        assert!(!controller.is_playing());
        let frame = controller.current_frame_index();
        assert_eq!(controller.tick(60_000 * MS), 0);
        assert_eq!(controller.current_frame_index(), frame);
    }

    #[test]
    fn manual_step_stops_playback() {
        let mut controller = mounted();
        controller.start(0);
        controller.drain_events();
        controller.handle_input(InputEvent::Key(Key::ArrowRight), 10 * MS);
        assert!(!controller.is_playing());
        assert_eq!(controller.current_frame_index(), 1);
        assert_eq!(
            controller.drain_events(),
            vec![
                ControllerEvent::PlaybackChanged { playing: false },
                ControllerEvent::FrameChanged { index: 1 },
            ]
        );
    }

    #[test]
    fn flyover_ticks_advance_and_wrap() {
        let mut controller = mounted();
        controller.handle_input(InputEvent::Button(Button::Toggle), 0);
        assert!(controller.is_playing());
        // 6000 ms / 4 frames.
        assert_eq!(controller.tick(1_500 * MS), 1);
        assert_eq!(controller.tick(6_000 * MS), 3);
        assert_eq!(controller.current_frame_index(), 0);
        controller.handle_input(InputEvent::Key(Key::Space), 6_100 * MS);
        assert!(!controller.is_playing());
    }

    #[test]
    fn wake_ignores_a_restarted_timer() {
        let mut controller = mounted();
        controller.start(0);
        let stale = controller.playback().timer().expect("timer armed").generation();
        controller.stop();
        controller.start(1_000 * MS);
        assert_eq!(controller.wake(stale, 2_000 * MS), 0);
        assert_eq!(controller.current_frame_index(), 0);

        let live = controller.playback().timer().expect("timer armed").generation();
        assert_eq!(controller.wake(live, 2_500 * MS), 1);
        assert_eq!(controller.current_frame_index(), 1);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut controller = mounted();
        assert_eq!(controller.set_zoom(-0.5), MIN_ZOOM);
        controller.set_zoom(100.0);
        assert_eq!(controller.zoom(), DEFAULT_MAX_ZOOM);
        assert_eq!(controller.set_zoom(0.5), DEFAULT_MAX_ZOOM);
        assert_eq!(controller.set_zoom(-1.5), 2.5);
        assert_eq!(controller.set_zoom(f32::NAN), 2.5);
    }

    #[test]
    fn clicking_toggles_selection_and_stops_playback() {
        let mut controller = mounted();
        controller.start(0);
        let inside_a = Point::new(150.0, 150.0);
        controller.handle_input(InputEvent::PointerDown(inside_a), MS);
        assert!(!controller.is_playing());
        assert_eq!(controller.selected(), Some("unit_a"));
        assert!(!controller.drag_anchor().active);

        controller.handle_input(InputEvent::PointerDown(Point::new(350.0, 150.0)), MS);
        assert_eq!(controller.selected(), Some("unit_b"));
        controller.handle_input(InputEvent::PointerDown(Point::new(350.0, 150.0)), MS);
        assert_eq!(controller.selected(), None);

        // Background press starts a drag instead.
        controller.handle_input(InputEvent::PointerDown(Point::new(600.0, 350.0)), MS);
        assert!(controller.drag_anchor().active);
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn click_during_flyover_selects_the_hidden_hotspot() {
        let mut controller = mounted();
        controller.start(0);
        let hidden = controller.highlights()[0];
        assert_eq!(hidden.state, HighlightState::Hidden);
        assert!(hidden.style().interactive);

        assert!(controller.click(Point::new(150.0, 150.0)));
        assert!(!controller.is_playing());
        assert_eq!(controller.selected(), Some("unit_a"));
    }

    #[test]
    fn unknown_names_do_not_change_selection() {
        let mut controller = mounted();
        controller.select(Some("unit_b"));
        controller.start(0);
        controller.drain_events();

        controller.select(Some("no_such_unit"));
        assert_eq!(controller.selected(), Some("unit_b"));
        assert!(!controller.is_playing());
        assert_eq!(
            controller.drain_events(),
            vec![ControllerEvent::PlaybackChanged { playing: false }]
        );

        controller.select(None);
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn filter_excludes_a_name_on_every_frame() {
        let mut controller = mounted();
        controller.set_filter(NameFilter::only(["unit_b"]));
        controller.select(Some("unit_a"));
        controller.handle_input(InputEvent::PointerMove(Point::new(150.0, 150.0)), 0);
        for _ in 0..controller.dataset().len() * 2 {
            let names: Vec<String> = controller
                .highlights()
                .iter()
                .map(|entry| entry.name().to_string())
                .collect();
            assert_eq!(names, vec!["unit_b".to_string()]);
            controller.step(Direction::Forward);
        }
        controller.start(0);
        assert!(controller.highlights().iter().all(|entry| entry.name() != "unit_a"));
    }

    #[test]
    fn filtered_hotspots_cannot_be_clicked() {
        let mut controller = mounted();
        controller.set_filter(|name: &str| name != "unit_a");
        assert!(!controller.click(Point::new(150.0, 150.0)));
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn hover_tracks_pointer_and_tooltip_offsets_cursor() {
        let mut controller = mounted();
        controller.handle_input(InputEvent::PointerMove(Point::new(120.0, 130.0)), 0);
        assert_eq!(controller.hovered(), Some("unit_a"));
        let tooltip = controller.tooltip().expect("tooltip while hovering");
        assert_eq!(tooltip.text, "unit_a");
        assert_eq!(tooltip.position, Point::new(135.0, 145.0));

        controller.start(0);
        assert!(controller.tooltip().is_none());
        assert_eq!(controller.highlights()[0].state, HighlightState::Hidden);
        controller.stop();

        controller.handle_input(InputEvent::PointerLeave, 0);
        assert_eq!(controller.hovered(), None);
        assert!(controller.tooltip().is_none());
    }

    #[test]
    fn drag_steps_backward_when_moving_right() {
        let mut controller = mounted();
        controller.handle_input(InputEvent::PointerDown(Point::new(600.0, 350.0)), 0);
        let command = controller.handle_input(InputEvent::PointerMove(Point::new(640.0, 350.0)), 0);
        assert_eq!(command, Some(Command::Step(Direction::Backward)));
        assert_eq!(controller.current_frame_index(), 3);
    }

    #[test]
    fn escape_dismisses_and_clears_selection() {
        let mut controller = mounted();
        controller.select(Some("unit_b"));
        controller.drain_events();
        controller.handle_input(InputEvent::Key(Key::Escape), 0);
        assert_eq!(controller.selected(), None);
        assert_eq!(
            controller.drain_events(),
            vec![
                ControllerEvent::DismissRequested,
                ControllerEvent::SelectionChanged { name: None },
            ]
        );
    }

    #[test]
    fn double_click_on_hotspot_clears_selection() {
        let mut controller = mounted();
        controller.select(Some("unit_a"));
        controller.handle_input(InputEvent::DoubleClick(Point::new(700.0, 10.0)), 0);
        assert_eq!(controller.selected(), Some("unit_a"));
        controller.handle_input(InputEvent::DoubleClick(Point::new(150.0, 150.0)), 0);
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn natural_size_is_set_once() {
        let mut controller = ViewportController::new(dataset(), ControllerConfig::default());
        assert!(!controller.report_natural_size(NaturalSize::new(0, 0)));
        assert!(controller.report_natural_size(NaturalSize::new(800, 400)));
        assert!(!controller.report_natural_size(NaturalSize::new(1024, 768)));
        assert_eq!(controller.natural_size(), Some(NaturalSize::new(800, 400)));
    }

    #[test]
    fn hit_testing_follows_letterbox_and_zoom() {
        let mut controller = mounted();
        // Same image in a box twice as tall: letterboxed by 200 px top and bottom.
        controller.set_render_box(RenderBox::from_size(800.0, 800.0));
        assert!(controller.hotspot_at(Point::new(150.0, 150.0)).is_none());
        assert_eq!(
            controller.hotspot_at(Point::new(150.0, 350.0)).map(|h| h.name.as_str()),
            Some("unit_a")
        );

        controller.set_zoom(1.0);
        // Zoom 2 about the box centre: (150, 350) maps to (-100, 300).
        assert_eq!(
            controller.hotspot_at(Point::new(-100.0, 300.0)).map(|h| h.name.as_str()),
            Some("unit_a")
        );
    }

    #[test]
    fn empty_dataset_is_inert() {
        let mut controller =
            ViewportController::new(Arc::new(FrameDataset::default()), ControllerConfig::default());
        assert!(!controller.start(0));
        assert!(!controller.step(Direction::Forward));
        assert!(controller.highlights().is_empty());
        assert_eq!(controller.current_frame_index(), 0);
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn teardown_cancels_live_timer() {
        let mut controller = mounted();
        controller.start(0);
        controller.drain_events();
        let events = controller.teardown();
        assert_eq!(events, vec![ControllerEvent::PlaybackChanged { playing: false }]);
    }
}
