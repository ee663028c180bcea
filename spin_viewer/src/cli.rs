use std::path::PathBuf;

use clap::Parser;
use spin_viewer::RenderBox;

#[derive(Parser, Debug)]
#[command(about = "Headless driver for the spin frame/hotspot viewer", version)]
pub struct Args {
    /// Frame manifest JSON (array of {image_name, objects})
    #[arg(long, default_value = "frames/final_data.json")]
    pub dataset: PathBuf,

    /// Directory holding the frame images (defaults to the manifest's directory)
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// Optional JSON preset overriding playback cycle, gesture thresholds and zoom limits
    #[arg(long)]
    pub preset: Option<PathBuf>,

    /// Recorded input script to replay (JSON array of {at_ms, event})
    #[arg(long, conflicts_with = "interactive")]
    pub script: Option<PathBuf>,

    /// Read one command per line from stdin and drive playback in real time
    #[arg(long)]
    pub interactive: bool,

    /// Size of the render box hotspot geometry is mapped into, as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x720", value_parser = parse_viewport)]
    pub viewport: RenderBox,

    /// Only show hotspots with these names (may repeat)
    #[arg(long = "only", value_name = "NAME", conflicts_with = "prefix")]
    pub only: Vec<String>,

    /// Only show hotspots whose names start with this prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Write the final overlay as SVG to this path
    #[arg(long)]
    pub dump_svg: Option<PathBuf>,

    /// Also print every controller event emitted during a script replay
    #[arg(long)]
    pub events: bool,

    /// How long to wait for the first frame image to report its size
    #[arg(long, default_value_t = 2000)]
    pub measure_timeout_ms: u64,
}

pub fn parse_viewport(value: &str) -> Result<RenderBox, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: f32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid viewport width '{width}'"))?;
    let height: f32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid viewport height '{height}'"))?;
    if !(width > 0.0 && height > 0.0) {
        return Err(format!("viewport must be non-empty, got {width}x{height}"));
    }
    Ok(RenderBox::from_size(width, height))
}
