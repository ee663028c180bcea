//! Probes frame images for their intrinsic dimensions on worker threads.
//! Results arrive in whatever order the loads finish; the controller keeps
//! the first successful measurement and ignores the rest.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::controller::ViewportController;
use crate::mapper::NaturalSize;

const MAX_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum MeasureEvent {
    Measured { frame: usize, size: NaturalSize },
    Failed { frame: usize, reason: String },
}

pub fn measure_image(path: &Path) -> Result<NaturalSize> {
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("reading image header {}", path.display()))?;
    Ok(NaturalSize::new(width, height))
}

/// Starts measuring every `(frame index, image path)` pair. The receiver
/// closes once all workers finish.
pub fn spawn_measurements(images: Vec<(usize, PathBuf)>) -> Receiver<MeasureEvent> {
    let (tx, rx) = mpsc::channel();
    if images.is_empty() {
        return rx;
    }
    let workers = thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1)
        .clamp(1, MAX_WORKERS)
        .min(images.len());

    let mut batches: Vec<Vec<(usize, PathBuf)>> = vec![Vec::new(); workers];
    for (slot, image) in images.into_iter().enumerate() {
        batches[slot % workers].push(image);
    }

    for (worker, batch) in batches.into_iter().enumerate() {
        let worker_tx = tx.clone();
        let frames: Vec<usize> = batch.iter().map(|(frame, _)| *frame).collect();
        let spawned = thread::Builder::new()
            .name(format!("spin_measure_{worker}"))
            .spawn(move || measure_batch(batch, worker_tx));
        if let Err(err) = spawned {
            log::warn!("could not start image probe worker {worker}: {err}");
            for frame in frames {
                let _ = tx.send(MeasureEvent::Failed {
                    frame,
                    reason: format!("worker spawn failed: {err}"),
                });
            }
        }
    }
    rx
}

fn measure_batch(batch: Vec<(usize, PathBuf)>, tx: Sender<MeasureEvent>) {
    for (frame, path) in batch {
        let event = match measure_image(&path) {
            Ok(size) => MeasureEvent::Measured { frame, size },
            Err(err) => MeasureEvent::Failed {
                frame,
                reason: format!("{err:#}"),
            },
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}

/// Feeds already-delivered results into the controller without blocking.
pub fn apply_pending(rx: &Receiver<MeasureEvent>, controller: &mut ViewportController) -> bool {
    let mut applied = false;
    for event in rx.try_iter() {
        applied |= apply(event, controller);
    }
    applied
}

/// Blocks until the controller has a natural size, every probe has
/// reported, or `timeout` elapses.
pub fn wait_for_size(
    rx: &Receiver<MeasureEvent>,
    controller: &mut ViewportController,
    timeout: Duration,
) -> Option<NaturalSize> {
    let deadline = Instant::now() + timeout;
    while controller.natural_size().is_none() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(event) => {
                apply(event, controller);
            }
            Err(RecvTimeoutError::Timeout) => {
                log::warn!("no frame image measured within {timeout:?}");
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    controller.natural_size()
}

fn apply(event: MeasureEvent, controller: &mut ViewportController) -> bool {
    match event {
        MeasureEvent::Measured { frame, size } => {
            let accepted = controller.report_natural_size(size);
            if !accepted {
                log::debug!("frame {frame} measured {}x{} (ignored)", size.width, size.height);
            }
            accepted
        }
        MeasureEvent::Failed { frame, reason } => {
            log::warn!("frame {frame} image unavailable: {reason}");
            false
        }
    }
}
