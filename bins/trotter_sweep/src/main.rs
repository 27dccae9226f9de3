use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{init_logging, init_threads, parse_list};
use quantum::{DickeModel, TimeGrid};
use simulator::{
    classical_simulator, noiseless_observables, output::write_rows, quantum_simulator,
    MitigationMode, QuantumRun, StatevectorBackend,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Trotter error vs. number of steps")]
struct Args {
    /// Number of spins
    #[arg(long, default_value_t = 2)]
    spins: usize,

    /// Two-level energy gap ω
    #[arg(long, default_value_t = 1.0)]
    frequency: f64,

    /// Spin-spin coupling g
    #[arg(long, default_value_t = 1.0)]
    coupling: f64,

    /// End of the time interval (starts at 0)
    #[arg(long, default_value_t = 1.0)]
    t_end: f64,

    /// Number of time points
    #[arg(long, default_value_t = 11)]
    points: usize,

    /// Comma-separated list of Trotter step counts
    #[arg(long, default_value = "1,2,3,5,10,20,50")]
    steps: String,

    /// Shots per circuit (0 = exact expected counts, no sampling)
    #[arg(long, default_value_t = 0)]
    shots: u64,

    /// RNG seed
    #[arg(long, default_value = "trotter-sweep")]
    seed: String,

    /// Number of Rayon worker threads (0 = Rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Output CSV path
    #[arg(long, default_value = "trotter_sweep.csv")]
    out: String,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    init_threads(args.threads)?;

    let steps = parse_list(&args.steps)?;
    if steps.is_empty() {
        bail!("--steps must contain at least one integer value");
    }

    let model = DickeModel::new(args.spins, args.frequency, args.coupling)?;
    let times = TimeGrid::linspace(0.0, args.t_end, args.points)?;
    let exact = classical_simulator(&times, &model)?;
    let backend = StatevectorBackend::new(args.seed.as_str());

    let mut rows = Vec::with_capacity(steps.len());
    for &n in &steps {
        let trotter = if args.shots == 0 {
            noiseless_observables(&times, &model, n)?
        } else {
            let run = QuantumRun {
                trotter_steps: n,
                shots: args.shots,
            };
            quantum_simulator(&times, &model, run, &backend, MitigationMode::None)?
        };
        let deviation = trotter.max_deviation(&exact)?;
        println!("steps={}  max|dO|={:.3e}", n, deviation);
        rows.push(vec![n as f64, deviation]);
    }

    write_rows(&args.out, &["steps", "max_deviation"], &rows)
        .with_context(|| format!("failed to write {}", args.out))?;
    info!(path = %args.out, "wrote CSV");
    Ok(())
}
