use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rigsprite", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one recorded keypoint frame as a PNG.
    Frame(FrameArgs),
    /// Render a recorded keypoint sequence as numbered PNGs.
    Sequence(SequenceArgs),
    /// Fit raw part images onto uniform transparent canvases.
    Prep(PrepArgs),
    /// Print the default engine configuration (including the humanoid rig) as JSON.
    Rig,
}

#[derive(Parser, Debug)]
struct EngineArgs {
    /// Engine configuration JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with one `<part_id>.png` per part; overrides the config.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Mirror keypoints horizontally (selfie view).
    #[arg(long)]
    mirror: bool,

    /// Placement rule for rotated parts; overrides the config.
    #[arg(long, value_enum)]
    anchor_mode: Option<AnchorChoice>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Keypoint frame JSON: `{"keypoints": [...]}` or `{"keypoints": null}`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Keypoint sequence JSON: `{"frames": [...]}`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct PrepArgs {
    /// Directory of raw part images.
    #[arg(long = "in")]
    in_dir: PathBuf,

    /// Output directory for fitted PNGs.
    #[arg(long)]
    out: PathBuf,

    /// Target width in pixels.
    #[arg(long, default_value_t = 200)]
    width: u32,

    /// Target height in pixels.
    #[arg(long, default_value_t = 200)]
    height: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AnchorChoice {
    BoxCenter,
    Pivot,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Prep(args) => cmd_prep(args),
        Command::Rig => cmd_rig(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))?;
    Ok(value)
}

fn build_engine(args: &EngineArgs) -> anyhow::Result<rigsprite::Engine> {
    let mut config = match &args.config {
        Some(path) => rigsprite::EngineConfig::from_json_file(path)?,
        None => rigsprite::EngineConfig::default(),
    };
    if let Some(dir) = &args.assets {
        config.resource_dir = dir.clone();
    }
    if args.mirror {
        config.normalizer.mirror = true;
    }
    if let Some(choice) = args.anchor_mode {
        config.solve.anchor_mode = match choice {
            AnchorChoice::BoxCenter => rigsprite::AnchorMode::BoxCenter,
            AnchorChoice::Pivot => rigsprite::AnchorMode::Pivot,
        };
    }
    rigsprite::Engine::new(config).context("invalid rig configuration")
}

fn render_to_png(
    engine: &rigsprite::Engine,
    frame: &rigsprite::KeypointFrame,
    out: &Path,
) -> anyhow::Result<rigsprite::FrameStats> {
    let mut surface = rigsprite::FrameSurface::new(engine.config().canvas)?;
    surface.fill(engine.config().background);
    let stats = engine.render_frame(frame.as_slice(), &mut surface)?;

    surface
        .into_image()
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(stats)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.engine)?;
    let frame: rigsprite::KeypointFrame = read_json(&args.in_path, "keypoint frame")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let stats = render_to_png(&engine, &frame, &args.out)?;
    tracing::info!(
        parts_drawn = stats.parts_drawn,
        parts_skipped = stats.parts_skipped,
        "wrote {}",
        args.out.display()
    );
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let engine = build_engine(&args.engine)?;
    let seq: rigsprite::KeypointSequence = read_json(&args.in_path, "keypoint sequence")?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut empty = 0usize;
    for (i, frame) in seq.frames.iter().enumerate() {
        let out = args.out_dir.join(format!("frame_{i:05}.png"));
        let stats = render_to_png(&engine, frame, &out)?;
        if frame.keypoints.is_none() {
            empty += 1;
        }
        tracing::debug!(frame = i, parts_drawn = stats.parts_drawn, "rendered frame");
    }

    tracing::info!(
        frames = seq.frames.len(),
        without_figure = empty,
        "wrote {}",
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_prep(args: PrepArgs) -> anyhow::Result<()> {
    let report = rigsprite::prepare_directory(&args.in_dir, &args.out, args.width, args.height)?;
    for (path, err) in &report.failed {
        eprintln!("failed: {}: {err}", path.display());
    }
    tracing::info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "prepared part images into {}",
        args.out.display()
    );
    Ok(())
}

fn cmd_rig() -> anyhow::Result<()> {
    println!("{}", rigsprite::EngineConfig::default().to_json_pretty()?);
    Ok(())
}
