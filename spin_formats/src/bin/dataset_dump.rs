use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use spin_formats::FrameDataset;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

#[derive(Parser, Debug)]
#[command(about = "Summarise a spin frame manifest and cross-check its images", version)]
struct Args {
    /// Frame manifest JSON (array of {image_name, objects})
    manifest: PathBuf,

    /// Directory holding the frame images; enables the missing/unreferenced report
    #[arg(long, value_name = "DIR")]
    frames_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset = FrameDataset::load(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;

    let names = dataset.all_hotspot_names();
    println!(
        "{} frames, {} distinct hotspots in {}",
        dataset.len(),
        names.len(),
        args.manifest.display()
    );
    println!("hotspots: {}", names.join(", "));
    for (idx, frame) in dataset.frames().iter().enumerate() {
        println!(
            "{idx:>4} {image:<40} {count:>4}",
            image = frame.image.as_str(),
            count = frame.hotspots.len()
        );
    }

    if let Some(frames_dir) = args.frames_dir.as_deref() {
        report_image_coverage(&dataset, frames_dir)?;
    }
    Ok(())
}

fn report_image_coverage(dataset: &FrameDataset, frames_dir: &Path) -> Result<()> {
    let referenced: BTreeSet<PathBuf> = dataset
        .frames()
        .iter()
        .map(|frame| frame.image.resolve(frames_dir))
        .collect();

    let mut on_disk = BTreeSet::new();
    for entry in WalkDir::new(frames_dir) {
        let entry =
            entry.with_context(|| format!("scanning frames directory {}", frames_dir.display()))?;
        if !entry.file_type().is_file() || !is_image(entry.path()) {
            continue;
        }
        on_disk.insert(entry.into_path());
    }

    let missing: Vec<_> = referenced.difference(&on_disk).collect();
    let unreferenced: Vec<_> = on_disk.difference(&referenced).collect();

    println!("missing images: {}", missing.len());
    for path in &missing {
        println!("  {}", path.display());
    }
    println!("unreferenced images: {}", unreferenced.len());
    for path in &unreferenced {
        println!("  {}", path.display());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
