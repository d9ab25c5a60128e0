use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use gcodeview::{init_logging, Ray, ToolpathDocument, ViewerConfig, BUILD_DATE, VERSION};
use glam::Vec3;
use tracing::info;

/// Inspect a G-code toolpath: bounds, camera placement, selection export
#[derive(Parser, Debug)]
#[command(
    name = "gcodeview",
    about,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")")
)]
struct Cli {
    /// G-code file to load
    file: PathBuf,

    /// Viewer configuration (.json or .toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Select a segment by index (repeatable)
    #[arg(short, long = "select", value_name = "INDEX")]
    select: Vec<usize>,

    /// Toggle the segment nearest to a ray: ox,oy,oz,dx,dy,dz
    #[arg(long, value_name = "RAY", value_delimiter = ',', allow_negative_numbers = true)]
    pick: Option<Vec<f32>>,

    /// Write the stream and selection CSV tables
    #[arg(short, long)]
    export: bool,

    /// Keep running and follow edits to the file
    #[arg(short, long)]
    watch: bool,
}

fn report(doc: &ToolpathDocument) {
    let stats = doc.stats();
    let camera = doc.camera();
    println!("segments:     {}", stats.samples);
    println!("min:          {:?}", stats.min.to_array());
    println!("max:          {:?}", stats.max.to_array());
    println!("mean:         {:?}", stats.mean.to_array());
    println!("trimmed mean: {:?}", stats.trimmed_mean.to_array());
    println!("camera eye:   {:?}", camera.eye.to_array());
    println!("camera target:{:?}", camera.target.to_array());
    let selected: Vec<usize> = doc.selection().iter().map(|(_, index)| index).collect();
    println!("selected:     {:?}", selected);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    info!("gcodeview {} built {}", VERSION, BUILD_DATE);

    let config = match &cli.config {
        Some(path) => ViewerConfig::load_from_file(path)?,
        None => ViewerConfig::default(),
    };

    let mut doc = ToolpathDocument::open(&cli.file, config)?;
    for &index in &cli.select {
        doc.selection_mut().add(index);
    }

    if let Some(values) = &cli.pick {
        if values.len() != 6 {
            anyhow::bail!("--pick expects 6 comma-separated numbers, got {}", values.len());
        }
        let ray = Ray::new(
            Vec3::new(values[0], values[1], values[2]),
            Vec3::new(values[3], values[4], values[5]),
        );
        match doc.toggle_at(&ray) {
            Some(pick) => info!("Toggled segment {} (distance {:.4})", pick.index, pick.distance),
            None => info!("No pickable segment"),
        }
    }

    report(&doc);
    if cli.export {
        doc.export()?;
    }

    if !cli.watch {
        return Ok(());
    }

    let interval = Duration::from_millis(doc.config().reload_poll_interval_ms);
    info!("Watching {} for changes", cli.file.display());
    loop {
        thread::sleep(interval);
        if doc.poll_reload()? {
            report(&doc);
            if cli.export {
                doc.export()?;
            }
            doc.clear_dirty();
        }
    }
}
