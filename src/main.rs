use anyhow::{Context, Result};
use chrono::Local;
use clap::{ArgAction, Parser};
use discrete_groebner::{solve_all, GroebnerConfig, OrderKind, Ring, SystemFile};
use std::{fs, path::PathBuf, time::Instant};
use tracing::{error, info, Level};
use tracing_subscriber::fmt::time::ChronoLocal;

/// Computes reduced Gröbner bases for the polynomial systems in a JSON file.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// JSON file holding one system or an array of systems.
    #[arg(short, long)]
    input: PathBuf,

    #[arg(short, long)]
    output: PathBuf,

    /// Override the ring of every system (`integers` or `mod2`).
    #[arg(long)]
    ring: Option<Ring>,

    /// Override the monomial order of every system (`lex` or `degrevlex`).
    #[arg(long)]
    order: Option<OrderKind>,

    #[arg(long)]
    max_passes: Option<usize>,

    #[arg(long)]
    max_generators: Option<usize>,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_owned()))
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let file: SystemFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let mut systems = file.into_systems();
    for system in &mut systems {
        if let Some(ring) = args.ring {
            system.ring = ring;
        }
        if let Some(order) = args.order {
            system.order = order;
        }
    }

    let config = GroebnerConfig {
        max_passes: args.max_passes,
        max_generators: args.max_generators,
    };

    info!("Computation start, {} systems", systems.len());
    let start_time = Instant::now();

    let solutions = solve_all(&systems, &config);

    let elapsed_secs = start_time.elapsed().as_secs_f64();
    info!("Computation end, total time {:.3} seconds", elapsed_secs);

    let mut sections = vec![format!(
        "# computed {} in {:.3} seconds\n",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        elapsed_secs
    )];
    let mut failures = 0;
    for (i, solution) in solutions.into_iter().enumerate() {
        let name = systems[i]
            .name
            .clone()
            .unwrap_or_else(|| format!("system {}", i));
        match solution.and_then(|s| s.render()) {
            Ok(basis) => sections.push(format!("# {}\n{}\n", name, basis)),
            Err(err) => {
                error!("{}: {}", name, err);
                sections.push(format!("# {}\nerror: {}\n", name, err));
                failures += 1;
            }
        }
    }

    fs::write(&args.output, sections.join("\n"))
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    if failures > 0 {
        anyhow::bail!("{} of {} systems failed", failures, systems.len());
    }
    Ok(())
}
