//! Interactive viewer session. Commands arrive one per line from a reader
//! thread, flyover wake-ups come from a `Ticker` that only exists while the
//! controller is playing, and both feed a single channel drained on the
//! session thread. Ending the session drops the ticker and the input
//! subscription before the controller is torn down.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::controller::{ControllerEvent, ViewportController};
use crate::script::{self, ScriptEvent};
use crate::ticker::Ticker;

#[derive(Debug)]
pub enum SessionEvent {
    /// Flyover wake-up tagged with the timer generation that requested it.
    Wake(u64),
    Line(String),
    InputClosed,
}

/// Owns the receiving end of the session channel. Producers notice the
/// subscription is gone on their next send and exit.
pub struct InputSubscription {
    tx: Sender<SessionEvent>,
    rx: Receiver<SessionEvent>,
}

impl InputSubscription {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Spawns a thread forwarding each line of `reader`.
    pub fn attach_reader<R>(&self, reader: R) -> io::Result<()>
    where
        R: BufRead + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::Builder::new()
            .name("spin_input".to_string())
            .spawn(move || {
                for line in reader.lines() {
                    let event = match line {
                        Ok(line) => SessionEvent::Line(line),
                        Err(err) => {
                            log::warn!("input read failed: {err}");
                            break;
                        }
                    };
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                let _ = tx.send(SessionEvent::InputClosed);
            })?;
        Ok(())
    }

    pub fn sender(&self) -> Sender<SessionEvent> {
        self.tx.clone()
    }

    pub fn recv(&self) -> Option<SessionEvent> {
        self.rx.recv().ok()
    }
}

impl Default for InputSubscription {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ViewerSession<W: Write> {
    controller: ViewportController,
    subscription: InputSubscription,
    ticker: Option<(u64, Ticker)>,
    clock: Instant,
    out: W,
}

impl<W: Write> ViewerSession<W> {
    pub fn new(controller: ViewportController, subscription: InputSubscription, out: W) -> Self {
        Self {
            controller,
            subscription,
            ticker: None,
            clock: Instant::now(),
            out,
        }
    }

    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    fn now_ns(&self) -> u64 {
        u64::try_from(self.clock.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    /// Runs until `quit` or end of input, then tears everything down.
    pub fn run(mut self) -> Result<W> {
        while let Some(event) = self.subscription.recv() {
            let now = self.now_ns();
            match event {
                SessionEvent::Wake(generation) => {
                    self.controller.wake(generation, now);
                }
                SessionEvent::Line(line) => {
                    let trimmed = line.trim();
                    if trimmed == "quit" || trimmed == "exit" {
                        break;
                    }
                    match script::parse_command(trimmed) {
                        Ok(events) => self.apply(&events, now)?,
                        Err(err) => {
                            let line = serde_json::json!({ "error": err.to_string() });
                            writeln!(self.out, "{line}").context("writing session output")?;
                        }
                    }
                }
                SessionEvent::InputClosed => break,
            }
            self.sync_ticker()?;
            self.flush_events()?;
        }
        self.finish()
    }

    fn apply(&mut self, events: &[ScriptEvent], now: u64) -> Result<()> {
        self.controller.tick(now);
        for event in events {
            if let Some(snapshot) = script::apply_event(&mut self.controller, event, now) {
                let line = serde_json::to_string(&snapshot).context("serialising snapshot")?;
                writeln!(self.out, "{line}").context("writing session output")?;
            }
        }
        Ok(())
    }

    /// Keeps exactly one ticker alive while the controller plays, bound to
    /// the live timer's generation.
    fn sync_ticker(&mut self) -> Result<()> {
        let live = self
            .controller
            .playback()
            .timer()
            .map(|timer| (timer.generation(), timer.interval()));
        let current = self.ticker.as_ref().map(|(generation, _)| *generation);
        match live {
            Some((generation, _)) if current == Some(generation) => {}
            Some((generation, interval)) => {
                // Drop the old ticker before arming its replacement.
                self.ticker = None;
                let ticker = Ticker::spawn(interval, self.subscription.sender(), move || {
                    SessionEvent::Wake(generation)
                })
                .context("starting playback ticker")?;
                self.ticker = Some((generation, ticker));
            }
            None => {
                self.ticker = None;
            }
        }
        Ok(())
    }

    fn flush_events(&mut self) -> Result<()> {
        for event in self.controller.drain_events() {
            let flyover_frame = matches!(event, ControllerEvent::FrameChanged { .. });
            if flyover_frame && self.controller.is_playing() {
                // Flyover frames are too chatty for the transcript.
                continue;
            }
            let line = serde_json::to_string(&event).context("serialising controller event")?;
            writeln!(self.out, "{line}").context("writing session output")?;
        }
        self.out.flush().context("flushing session output")
    }

    fn finish(mut self) -> Result<W> {
        self.ticker = None;
        self.controller.stop();
        let snapshot = self.controller.snapshot();
        for event in self.controller.teardown() {
            let line = serde_json::to_string(&event).context("serialising controller event")?;
            writeln!(self.out, "{line}").context("writing session output")?;
        }
        let line = serde_json::to_string(&snapshot).context("serialising snapshot")?;
        writeln!(self.out, "{line}").context("writing session output")?;
        drop(self.subscription);
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use spin_formats::FrameDataset;

    use crate::controller::ControllerConfig;
    use crate::mapper::{NaturalSize, RenderBox};

    fn controller() -> ViewportController {
        let dataset = FrameDataset::from_json_str(
            r#"[
                { "image_name": "f0.png", "objects": [ { "name": "unit_a", "points": [[0,0],[50,0],[50,50],[0,50]] } ] },
                { "image_name": "f1.png", "objects": [] },
                { "image_name": "f2.png", "objects": [] }
            ]"#,
        )
        .expect("dataset parses");
        let mut controller =
            ViewportController::new(Arc::new(dataset), ControllerConfig::default());
        controller.report_natural_size(NaturalSize::new(100, 100));
        controller.set_render_box(RenderBox::from_size(100.0, 100.0));
        controller
    }

    fn run_session(input: &str) -> String {
        let subscription = InputSubscription::new();
        subscription
            .attach_reader(Cursor::new(input.to_string()))
            .expect("attach reader");
        let session = ViewerSession::new(controller(), subscription, Vec::new());
        let out = session.run().expect("session runs");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn commands_drive_the_controller() {
        let output = run_session("click 10 10\nright\nright\nsnapshot\nquit\nright\n");
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains(r#""event":"selection_changed""#));
        assert!(lines.iter().any(|line| line.contains(r#""event":"frame_changed","index":2"#)));
        let last: serde_json::Value =
            serde_json::from_str(lines.last().expect("final snapshot")).expect("snapshot json");
        assert_eq!(last["frame"], 2);
        assert_eq!(last["selected"], "unit_a");
    }

    #[test]
    fn reports_bad_commands_and_keeps_going() {
        let output = run_session("warp 9\nleft\n");
        let first: serde_json::Value =
            serde_json::from_str(output.lines().next().expect("first line")).expect("error json");
        assert_eq!(first["error"], "unknown command 'warp'");
        let last: serde_json::Value =
            serde_json::from_str(output.lines().last().expect("final snapshot")).expect("json");
        assert_eq!(last["frame"], 2);
    }

    #[test]
    fn play_then_end_of_input_stops_flyover() {
        let output = run_session("play\n");
        assert!(output.contains(r#""event":"playback_changed","playing":true"#));
        assert!(output.contains(r#""event":"playback_changed","playing":false"#));
        let last: serde_json::Value =
            serde_json::from_str(output.lines().last().expect("final snapshot")).expect("json");
        assert_eq!(last["playing"], false);
    }
}
