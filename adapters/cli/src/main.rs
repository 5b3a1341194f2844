#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates arena levels and runs them headlessly.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, ensure, Context, Result};
use arena_shooter_core::{GameConfig, SeedLabel};
use arena_shooter_headless::{Autopilot, Session};
use arena_shooter_rendering::{
    render_level_map, AsciiBackend, Color, Minimap, Presentation, RenderingBackend,
};
use arena_shooter_system_level_generation::LevelGenerator;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the arena shooter.
#[derive(Debug, Parser)]
#[command(name = "arena-shooter", about = "Procedural first-person arena shooter")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// TOML file overriding the default tunables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Generates a level and prints it as an ASCII grid.
    Map(MapArgs),
    /// Runs a level headlessly with a scripted autopilot.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct MapArgs {
    /// Seed phrase; omitted or blank picks a random seed.
    #[arg(long)]
    seed: Option<String>,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Seed phrase; omitted or blank picks a random seed.
    #[arg(long)]
    seed: Option<String>,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16)]
    dt_ms: u64,
    /// Ticks between printed HUD lines.
    #[arg(long, default_value_t = 60)]
    report_every: u64,
    /// Ticks between autopilot shots.
    #[arg(long, default_value_t = 6)]
    fire_every: u64,
    /// Makes the autopilot spin clockwise.
    #[arg(long)]
    clockwise: bool,
    /// Radar units drawn per world unit in the closing minimap.
    #[arg(long, default_value_t = Minimap::DEFAULT_SCALE)]
    radar_scale: f32,
    /// Character width of the closing minimap.
    #[arg(long, default_value_t = 21)]
    radar_columns: usize,
}

/// Entry point for the arena shooter command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        CliCommand::Map(args) => print_map(&config, args.seed.as_deref()),
        CliCommand::Run(args) => run_headless(config, &args),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter `{level}`"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install log subscriber")
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            GameConfig::from_toml_str(&text)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn print_map(config: &GameConfig, seed: Option<&str>) -> Result<()> {
    let label = SeedLabel::resolve(seed, &mut rand::thread_rng());
    let level = LevelGenerator::new(config).generate(label.seed());

    let mut out = io::stdout().lock();
    writeln!(out, "{label} ({})", label.seed())?;
    writeln!(out, "rooms: {}", level.rooms.len())?;
    writeln!(out, "walls: {}", level.geometry.walls.len())?;
    writeln!(out, "spawn points: {}", level.spawn_cells.len())?;
    writeln!(out, "lamps: {}", level.lamp_cells.len())?;
    write!(out, "{}", render_level_map(&level.geometry))?;
    out.flush().context("failed to flush map output")
}

fn run_headless(config: GameConfig, args: &RunArgs) -> Result<()> {
    ensure!(args.dt_ms > 0, "--dt-ms must be positive");
    let radar = Minimap::new(Minimap::DEFAULT_SIZE, args.radar_scale)
        .context("invalid --radar-scale")?;
    let label = SeedLabel::resolve(args.seed.as_deref(), &mut rand::thread_rng());
    info!(seed = label.seed().get(), ticks = args.ticks, "starting headless run");

    let mut session = Session::generate(config, label.seed());
    session.start();
    let presentation = Presentation::new(
        format!("Arena Shooter | {label}"),
        Color::from_rgb_u8(16, 16, 24),
        session.scene(),
    );
    let backend = AsciiBackend::new(
        io::stdout(),
        Duration::from_millis(args.dt_ms),
        args.ticks,
    )
    .with_report_interval(args.report_every)
    .with_minimap(radar, args.radar_columns);

    let pilot = autopilot(args);
    let mut tick = 0;
    backend
        .run(presentation, move |dt, input, scene| {
            let mut inputs = pilot.inputs(tick);
            inputs.extend(input.events);
            tick += 1;
            if session.tick(dt, &inputs) {
                for cue in session.drain_cues() {
                    debug!(?cue, "sound cue");
                }
            }
            *scene = session.scene();
        })
        .context("headless run failed")
}

fn autopilot(args: &RunArgs) -> Autopilot {
    let pilot = Autopilot::new(args.fire_every);
    if args.clockwise {
        pilot.turning_right()
    } else {
        pilot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_shooter_core::{InputEvent, Key};
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "arena-shooter",
            "run",
            "--seed",
            "test",
            "--ticks",
            "120",
            "--dt-ms",
            "20",
        ])
        .expect("valid arguments");

        let CliCommand::Run(args) = cli.command else {
            panic!("expected the run subcommand");
        };
        assert_eq!(args.seed.as_deref(), Some("test"));
        assert_eq!(args.ticks, 120);
        assert_eq!(args.dt_ms, 20);
        assert_eq!(cli.log_level, "info");
        assert_eq!(args.fire_every, 6);
        assert!(!args.clockwise);
        assert_eq!(args.radar_columns, 21);
    }

    #[test]
    fn autopilot_follows_run_flags() {
        let cli = Cli::try_parse_from(["arena-shooter", "run", "--clockwise", "--fire-every", "4"])
            .expect("valid arguments");
        let CliCommand::Run(args) = cli.command else {
            panic!("expected the run subcommand");
        };

        let pilot = autopilot(&args);
        assert_eq!(
            pilot.inputs(0),
            vec![InputEvent::KeyDown(Key::TurnRight), InputEvent::Click]
        );
        assert!(pilot.inputs(2).is_empty());
        assert_eq!(pilot.inputs(4), vec![InputEvent::Click]);
    }

    #[test]
    fn non_positive_radar_scale_is_rejected() {
        let cli = Cli::try_parse_from(["arena-shooter", "run", "--radar-scale", "0", "--ticks", "1"])
            .expect("valid arguments");
        let CliCommand::Run(args) = cli.command else {
            panic!("expected the run subcommand");
        };
        let error = run_headless(GameConfig::default(), &args).expect_err("zero scale must fail");
        assert!(error.to_string().contains("--radar-scale"));
    }

    #[test]
    fn missing_config_path_is_reported() {
        let error = load_config(Some(Path::new("/nonexistent/arena.toml")))
            .expect_err("missing file must fail");
        assert!(error.to_string().contains("failed to read config file"));
    }
}
