use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use qiji::{
    ApproxMeasure, ConstellationCardV2, ConstellationSession, ConstellationStyle, CpuBackend,
    CpuBackendOpts, DEFAULT_TEMPLATE_SEED, FileStore, FontMeasure, LogoCardV1, LogoSession,
    NewYearOpts, NewYearSession, Painter, Point, SceneStore, ShareId, SharedScene, SurfaceSize,
    TextMeasure,
};

#[derive(Parser, Debug)]
#[command(name = "qiji", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a logo or constellation card as a PNG.
    Frame(FrameArgs),
    /// Simulate the New Year scene for a while and render its last frame as a PNG.
    Newyear(NewyearArgs),
    /// Persist a scene payload and print its share id.
    Share(ShareArgs),
    /// Print a persisted scene payload.
    Load(LoadArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CardKind {
    Logo,
    Constellation,
}

#[derive(Parser, Debug)]
struct SurfaceArgs {
    /// Logical width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Logical height.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 2.0)]
    dpr: f64,

    /// TTF/OTF font for card text. Text is skipped without one.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene JSON; defaults to the built-in card of `--kind`.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Card rendered when no input is given.
    #[arg(long, value_enum, default_value_t = CardKind::Logo)]
    kind: CardKind,

    /// Scene clock in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Draw constellations as ink on a transparent page.
    #[arg(long, default_value_t = false)]
    ink: bool,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct NewyearArgs {
    /// Simulated frames at 60 fps.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Firework bursts launched at the start.
    #[arg(long, default_value_t = 3)]
    bursts: u32,

    /// Snowflakes; zero disables snow.
    #[arg(long, default_value_t = 0)]
    snow: usize,

    /// Ambient blossoms.
    #[arg(long, default_value_t = 36)]
    blossoms: usize,

    /// Seed of every random draw.
    #[arg(long)]
    seed: Option<u32>,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ShareArgs {
    /// Scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Store directory; defaults to `$QIJI_SHARE_DIR` or `./data`.
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LoadArgs {
    /// Share id.
    id: String,

    /// Store directory; defaults to `$QIJI_SHARE_DIR` or `./data`.
    #[arg(long)]
    dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Newyear(args) => cmd_newyear(args),
        Command::Share(args) => cmd_share(args),
        Command::Load(args) => cmd_load(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<SharedScene> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read scene '{}'", path.display()))?;
    SharedScene::from_json_str(&raw).with_context(|| format!("load scene '{}'", path.display()))
}

fn default_scene(kind: CardKind) -> SharedScene {
    match kind {
        CardKind::Logo => SharedScene::Logo(LogoCardV1::default()),
        CardKind::Constellation => {
            SharedScene::Constellation(ConstellationCardV2::from_template(DEFAULT_TEMPLATE_SEED))
        }
    }
}

struct Output {
    painter: Painter,
    backend: CpuBackend,
    measure: Box<dyn TextMeasure>,
}

fn prepare(surface: &SurfaceArgs) -> anyhow::Result<Output> {
    let size = SurfaceSize::from_logical(surface.width, surface.height, surface.dpr)?;
    let mut opts = CpuBackendOpts::default();
    let measure: Box<dyn TextMeasure> = match &surface.font {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
            let measure = FontMeasure::new(&bytes)?;
            opts = opts.with_font_bytes(bytes);
            Box::new(measure)
        }
        None => Box::new(ApproxMeasure),
    };
    Ok(Output {
        painter: Painter::new(size),
        backend: CpuBackend::new(opts)?,
        measure,
    })
}

fn finish(mut output: Output, out: &Path) -> anyhow::Result<()> {
    let frame = output.backend.render_painter(&output.painter)?;
    qiji::render::export::write_png(&frame, out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = match &args.in_path {
        Some(path) => read_scene(path)?,
        None => default_scene(args.kind),
    };
    let mut output = prepare(&args.surface)?;
    let logical = output.painter.logical_size();

    match scene {
        SharedScene::Logo(card) => {
            let session = LogoSession::new(card, logical)?;
            session.render(&mut output.painter, args.time_ms, output.measure.as_mut())?;
        }
        SharedScene::Constellation(card) => {
            let mut session = ConstellationSession::new(card, DEFAULT_TEMPLATE_SEED)?;
            if args.ink {
                session.set_style(ConstellationStyle::Ink);
            }
            session.render(&mut output.painter, args.time_ms, output.measure.as_mut())?;
        }
    }
    finish(output, &args.out)
}

fn cmd_newyear(args: NewyearArgs) -> anyhow::Result<()> {
    let mut output = prepare(&args.surface)?;
    let logical = output.painter.logical_size();
    let defaults = NewYearOpts::default();
    let mut session = NewYearSession::new(
        logical,
        NewYearOpts {
            blossom_count: args.blossoms,
            snow_count: args.snow,
            seed: args.seed.unwrap_or(defaults.seed),
            ..defaults
        },
    );

    for i in 0..args.bursts {
        let fx = (f64::from(i) + 1.0) / (f64::from(args.bursts) + 1.0);
        session.launch_burst(Point::new(logical.width * fx, logical.height * 0.35), 1.0);
    }
    for frame in 0..=args.frames {
        session.tick(f64::from(frame) * 1000.0 / 60.0);
    }

    session.render(&mut output.painter);
    finish(output, &args.out)
}

fn store_for(dir: Option<PathBuf>) -> FileStore {
    dir.map_or_else(FileStore::from_env, FileStore::new)
}

fn cmd_share(args: ShareArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let mut store = store_for(args.dir);
    let id = store
        .save(&scene)
        .with_context(|| format!("save to '{}'", store.dir().display()))?;
    println!("{id}");
    Ok(())
}

fn cmd_load(args: LoadArgs) -> anyhow::Result<()> {
    let id = ShareId::parse(&args.id)?;
    let store = store_for(args.dir);
    let scene = store
        .load(&id)
        .with_context(|| format!("load '{id}' from '{}'", store.dir().display()))?;
    println!("{}", scene.to_json_string()?);
    Ok(())
}
