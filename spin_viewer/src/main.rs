use std::{
    fs,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use spin_formats::FrameDataset;
use spin_viewer::{
    ControllerConfig, NameFilter, ViewportController,
    config::load_viewer_preset,
    measure,
    script::{self, InputScript},
    session::{InputSubscription, ViewerSession},
    svg,
};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset = FrameDataset::load(&args.dataset)
        .with_context(|| format!("loading frame manifest {}", args.dataset.display()))?;
    if dataset.is_empty() {
        log::warn!("{} has no frames; navigation is disabled", args.dataset.display());
    }
    let frames_dir = args
        .frames_dir
        .clone()
        .unwrap_or_else(|| manifest_dir(&args.dataset));

    let mut config = ControllerConfig::default();
    if let Some(path) = args.preset.as_deref() {
        load_viewer_preset(path)?.apply(&mut config);
    }

    let dataset = Arc::new(dataset);
    let mut controller = ViewportController::new(Arc::clone(&dataset), config);
    controller.set_render_box(args.viewport);
    if !args.only.is_empty() {
        controller.set_filter(NameFilter::only(args.only.iter().cloned()));
    } else if let Some(prefix) = args.prefix.clone() {
        controller.set_filter(NameFilter::Prefix(prefix));
    }

    let images: Vec<(usize, PathBuf)> = dataset
        .frames()
        .iter()
        .enumerate()
        .map(|(idx, frame)| (idx, frame.image.resolve(&frames_dir)))
        .collect();
    let measurements = measure::spawn_measurements(images);
    let timeout = Duration::from_millis(args.measure_timeout_ms);
    let measured = measure::wait_for_size(&measurements, &mut controller, timeout);
    if measured.is_none() && !dataset.is_empty() {
        log::warn!("overlay disabled until a frame image in {} loads", frames_dir.display());
    }
    controller.drain_events();

    if args.interactive {
        let subscription = InputSubscription::new();
        subscription
            .attach_reader(BufReader::new(io::stdin()))
            .context("attaching stdin reader")?;
        let session = ViewerSession::new(controller, subscription, io::stdout());
        session.run()?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let final_snapshot = match args.script.as_deref() {
        Some(path) => {
            let script = InputScript::load(path)
                .with_context(|| format!("loading input script {}", path.display()))?;
            log::info!("replaying {} script entries from {}", script.len(), path.display());
            let mut lines = Vec::new();
            let snapshot =
                script::replay(&script, &mut controller, |snapshot| lines.push(snapshot));
            for snapshot in lines {
                writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
            }
            snapshot
        }
        None => controller.snapshot(),
    };

    measure::apply_pending(&measurements, &mut controller);
    if args.events {
        for event in controller.drain_events() {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
    }
    writeln!(out, "{}", serde_json::to_string(&final_snapshot)?)?;

    if let Some(path) = args.dump_svg.as_deref() {
        match svg::overlay_svg(&controller) {
            Some(svg) => {
                fs::write(path, svg)
                    .with_context(|| format!("writing overlay SVG to {}", path.display()))?;
                log::info!(
                    "overlay for frame {} written to {}",
                    controller.current_frame_index(),
                    path.display()
                );
            }
            None => log::warn!("no natural frame size measured; skipping --dump-svg"),
        }
    }

    for event in controller.teardown() {
        log::debug!("teardown: {event:?}");
    }
    Ok(())
}

fn manifest_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
