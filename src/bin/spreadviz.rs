use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spreadviz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the show at one instant as SVG or PNG (picked by the output extension).
    Frame(FrameArgs),
    /// Render whole cycles as a numbered PNG sequence.
    Render(RenderArgs),
    /// Print the timeline plan (selected runs and per-tick transitions) as JSON.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Node table CSV (`name,x,y`).
    #[arg(long)]
    nodes: PathBuf,

    /// Edge table CSV (`x1,y1,x2,y2,spanning,source,target`).
    #[arg(long)]
    edges: PathBuf,

    /// Epidemic dataset JSON.
    #[arg(long)]
    epidemics: PathBuf,

    /// Optional show config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Virtual time of the frame, in milliseconds after the show started.
    #[arg(long)]
    at_ms: u64,

    /// Output path (`.svg` or `.png`).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,

    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Number of full cycles to render.
    #[arg(long, default_value_t = 1)]
    cycles: u32,

    /// Directory receiving `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Rasterize frames on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Epidemic dataset JSON.
    #[arg(long)]
    epidemics: PathBuf,

    /// Optional show config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // stdout carries `plan` JSON.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<spreadviz::ShowConfig> {
    match path {
        Some(p) => spreadviz::ShowConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(spreadviz::ShowConfig::default()),
    }
}

fn start_show(data: &DataArgs) -> anyhow::Result<spreadviz::Show> {
    let config = load_config(data.config.as_deref())?;
    let session = spreadviz::Session::from_paths(&spreadviz::DataPaths {
        nodes: data.nodes.clone(),
        edges: data.edges.clone(),
        epidemics: data.epidemics.clone(),
    })?;
    let viewport = spreadviz::Viewport::new(data.width)?;
    let mut show = spreadviz::Show::new(Arc::new(session), Arc::new(config), viewport)?;
    show.start(spreadviz::Millis::ZERO)?;
    Ok(show)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut show = start_show(&args.data)?;
    show.advance_to(spreadviz::Millis(args.at_ms))?;
    let svg = spreadviz::to_svg(show.scene());

    ensure_parent(&args.out)?;
    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("svg") => std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?,
        Some("png") => {
            let frame = spreadviz::rasterize_svg(&svg, &spreadviz::RenderSettings::default())?;
            spreadviz::write_png(&args.out, &frame)?;
        }
        _ => anyhow::bail!(
            "unsupported output extension for '{}' (expected .svg or .png)",
            args.out.display()
        ),
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("--fps must be >= 1");
    }
    let mut show = start_show(&args.data)?;
    let cycle_ms = show.plan().cycle_ms;
    // A cycle spans its ticks, its reset and the startup delay before the next one.
    let total_ms = cycle_ms.saturating_mul(u64::from(args.cycles));
    let frames = total_ms.saturating_mul(u64::from(args.fps)) / 1000;

    let svgs = spreadviz::record_svg_frames(&mut show, args.fps, 0..frames)?;
    let threading = spreadviz::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let mut sink = spreadviz::PngSequenceSink::new(&args.out_dir);
    let stats = spreadviz::render_frames(
        &svgs,
        0,
        args.fps,
        &spreadviz::RenderSettings::default(),
        &threading,
        &mut sink,
    )?;

    eprintln!("wrote {} frames to {}", stats.frames, args.out_dir.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let f = File::open(&args.epidemics)
        .with_context(|| format!("open epidemics '{}'", args.epidemics.display()))?;
    let runs = spreadviz::read_epidemics(BufReader::new(f))?;
    let plan = spreadviz::TimelinePlan::from_runs(&runs, &config);
    println!(
        "{}",
        serde_json::to_string_pretty(&plan).context("serialize timeline plan")?
    );
    Ok(())
}
