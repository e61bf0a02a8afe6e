//! `ttgrind`: check tool jobs, write grind programs and replay them.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use ttgrind::config::JobConfig;
use ttgrind::dimension::{DimContext, MonospaceMetrics};
use ttgrind::program::Program;
use ttgrind::sim::{format_hms, grind_time, SimPrimitive, SimReconstruct};
use ttgrind::toolpath::ProgramGenerator;

#[derive(Parser)]
#[command(name = "ttgrind")]
#[command(about = "Tool grinding profiles and programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a job and print the tool profile and its dimensions
    Check {
        /// TOML job file
        job: PathBuf,
        /// Scene length of one screen pixel, used to lay out dimensions
        #[arg(long, default_value_t = 0.005)]
        pixel_size: f64,
    },
    /// Write the grind program for a job
    Program {
        /// TOML job file
        job: PathBuf,
        /// Output XML file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Leave the simulation offset on rough plunges
        #[arg(long)]
        sim: bool,
    },
    /// Replay a job or a program file and print the wheel motion
    Simulate {
        /// TOML job file, or an XML program
        input: PathBuf,
        /// Blank diameter (required for XML programs)
        #[arg(long)]
        blank_dia: Option<f64>,
    },
}

/// Default: WARN for everything, INFO for ttgrind.
/// Override with RUST_LOG env var (e.g. RUST_LOG=ttgrind=debug).
fn env_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive(LevelFilter::WARN.into())
        .add_directive("ttgrind=info".parse()?))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { job, pixel_size } => check(&job, pixel_size),
        Commands::Program { job, output, sim } => program(&job, output.as_deref(), sim),
        Commands::Simulate { input, blank_dia } => simulate(&input, blank_dia),
    }
}

fn load(path: &Path) -> Result<JobConfig> {
    JobConfig::load(path).with_context(|| format!("loading job {}", path.display()))
}

fn check(path: &Path, pixel_size: f64) -> Result<()> {
    let job = load(path)?;
    let mut tool = job.tool()?;
    let metrics = MonospaceMetrics::default();
    tool.update_dimensions(&DimContext::new(pixel_size, &metrics))?;

    println!("{} tool", tool.kind());
    for (field, value) in tool.fields() {
        println!("  {field:<16} {value:.4}");
    }
    println!("profile:");
    for (name, p) in tool.landmarks() {
        println!("  {name:<16} ({:.4}, {:.4})", p.x, p.y);
    }
    println!("dimensions:");
    for d in tool.dimensions() {
        println!("  {:<16} {}", d.field, d.dimension.layout().label.text());
    }
    Ok(())
}

fn program(path: &Path, output: Option<&Path>, sim: bool) -> Result<()> {
    let job = load(path)?;
    let tool = job.tool()?;
    let mut generator = ProgramGenerator::new(&tool, &job.grind);
    if sim {
        generator = generator.for_simulation();
    }
    let prog = generator.execute()?;
    match output {
        Some(out) => prog.write(out)?,
        None => print!("{}", prog.to_xml()?),
    }
    Ok(())
}

fn simulate(path: &Path, blank_dia: Option<f64>) -> Result<()> {
    let is_xml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"));

    let (prog, dia) = if is_xml {
        let Some(dia) = blank_dia else {
            bail!("--blank-dia is required to simulate a program file");
        };
        let prog = Program::read(path).with_context(|| format!("reading {}", path.display()))?;
        (prog, dia)
    } else {
        let job = load(path)?;
        let tool = job.tool()?;
        let prog = ProgramGenerator::new(&tool, &job.grind)
            .for_simulation()
            .execute()?;
        (prog, blank_dia.unwrap_or_else(|| tool.blank_dia()))
    };

    let primitives = SimReconstruct::new(&prog, dia).execute()?;
    for p in &primitives {
        match p {
            SimPrimitive::Home(to) => println!("home   ({:.5}, {:.5})", to.x, to.y),
            SimPrimitive::Rapid { to, note } => {
                println!("rapid  ({:.5}, {:.5})          {note}", to.x, to.y);
            }
            SimPrimitive::Feed { to, feed, note } => {
                println!("feed   ({:.5}, {:.5}) F{feed:<7.3} {note}", to.x, to.y);
            }
            SimPrimitive::Dwell(s) => println!("dwell  {s:.2}s"),
        }
    }
    println!("grind time: {}", format_hms(grind_time(&primitives)));
    Ok(())
}
