use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use paperfold::{
    Direction, FoldConfig, FoldRequest, FoldTransition, HeadlessScene, Outcome, Phase, Rect,
    Rgba8Premul, SceneGraph, ShadowPeaks, Size, ViewId,
};

#[derive(Parser, Debug)]
#[command(name = "paperfold", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the panel plan for a fold as JSON.
    Plan(PlanArgs),
    /// Run a transition in a headless scene and print one JSON line per frame.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Width of the revealed view.
    #[arg(long)]
    width: f64,

    /// Height of the revealed view.
    #[arg(long)]
    height: f64,

    /// Number of folds (each fold is two panels).
    #[arg(long, default_value_t = 2)]
    folds: u32,

    /// Edge the covering view slides from: right, left, top, bottom.
    #[arg(long, default_value = "right", value_parser = parse_direction)]
    direction: Direction,

    /// show or hide.
    #[arg(long, default_value = "show", value_parser = parse_phase)]
    phase: Phase,

    /// Optional fold config JSON (shadow peaks are read from it).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Width of the covering view.
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Height of the covering view.
    #[arg(long, default_value_t = 480.0)]
    height: f64,

    /// Extent of the revealed view along the fold axis (defaults to the full covering extent).
    #[arg(long)]
    reveal: Option<f64>,

    /// Number of folds (each fold is two panels).
    #[arg(long, default_value_t = 2)]
    folds: u32,

    /// Edge the covering view slides from: right, left, top, bottom.
    #[arg(long, default_value = "right", value_parser = parse_direction)]
    direction: Direction,

    /// Transition duration in seconds.
    #[arg(long, default_value_t = 0.3)]
    duration: f64,

    /// Frames sampled per transition.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// Also fold the revealed view back up after showing it.
    #[arg(long, default_value_t = false)]
    round_trip: bool,

    /// Optional fold config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::parse(s).map_err(|e| e.to_string())
}

fn parse_phase(s: &str) -> Result<Phase, String> {
    Phase::parse(s).map_err(|e| e.to_string())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<FoldConfig> {
    let Some(path) = path else {
        return Ok(FoldConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    FoldConfig::from_json_str(&text).with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let peaks: ShadowPeaks = load_config(args.config.as_ref())?.shadow_peaks;
    let plan = paperfold::plan_folds(
        Size::new(args.width, args.height),
        args.folds,
        args.direction,
        args.phase,
        peaks,
    )?;
    let json = serde_json::to_string_pretty(&plan).context("serialize fold plan")?;
    println!("{json}");
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let duration = Duration::try_from_secs_f64(args.duration)
        .with_context(|| format!("invalid --duration {}", args.duration))?;
    let request = FoldRequest::new(args.folds, duration, args.direction);

    let mut scene = HeadlessScene::new();
    let bounds = Rect::new(0.0, 0.0, args.width, args.height);
    let window = scene.add_view(None, bounds, Rgba8Premul::black())?;
    let covering = scene.add_view(Some(window), bounds, Rgba8Premul::grey(1.0, 1.0))?;

    let target_size = match args.direction.axis() {
        paperfold::FoldAxis::Horizontal => {
            Size::new(args.reveal.unwrap_or(args.width), args.height)
        }
        paperfold::FoldAxis::Vertical => Size::new(args.width, args.reveal.unwrap_or(args.height)),
    };
    let target = scene.add_view(
        None,
        Rect::from_origin_size((0.0, 0.0), target_size),
        Rgba8Premul::from_straight_rgba(40, 120, 220, 255),
    )?;

    let mut fold = FoldTransition::new(config)?;
    let step = duration / args.frames;
    if step.is_zero() {
        anyhow::bail!(
            "--duration {}s split into {} frames leaves a zero-length step",
            args.duration,
            args.frames
        );
    }
    run_phase(&mut fold, &mut scene, Phase::Show, covering, target, request, step)?;
    if args.round_trip {
        run_phase(&mut fold, &mut scene, Phase::Hide, covering, target, request, step)?;
    }
    Ok(())
}

fn run_phase(
    fold: &mut FoldTransition<HeadlessScene>,
    scene: &mut HeadlessScene,
    phase: Phase,
    covering: ViewId,
    target: ViewId,
    request: FoldRequest,
    step: Duration,
) -> anyhow::Result<()> {
    let outcome = match phase {
        Phase::Show => fold.show(scene, covering, target, request, None)?,
        Phase::Hide => fold.hide(scene, covering, target, request, None)?,
    };
    if outcome == Outcome::Ignored {
        anyhow::bail!("{phase:?} request was ignored in state {:?}", fold.state());
    }

    loop {
        if let Some(elapsed) = scene.elapsed() {
            let line = serde_json::json!({
                "phase": phase,
                "t": elapsed.as_secs_f64(),
                "covering": scene.presentation_frame(covering)?,
                "panels": scene.pose().unwrap_or_default(),
            });
            println!("{line}");
        }
        scene.advance(step);
        if fold.poll(scene)? {
            break;
        }
    }

    let settled = serde_json::json!({
        "phase": phase,
        "state": fold.state(),
        "covering": scene.frame(covering)?,
        "target": scene.frame(target)?,
    });
    println!("{settled}");
    Ok(())
}
