use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cli::{init_logging, init_threads, Mitigation, NoiseArgs};
use quantum::{DickeModel, TimeGrid};
use simulator::{
    classical_simulator, output::write_observables, quantum_simulator, Backend, NoisyBackend,
    QuantumRun, StatevectorBackend,
};
use tracing::info;

/// Dicke model: exact evolution vs. Trotterized circuits
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
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

    /// Start of the time interval
    #[arg(long, default_value_t = 0.0)]
    t_start: f64,

    /// End of the time interval
    #[arg(long, default_value_t = 10.0)]
    t_end: f64,

    /// Number of time points
    #[arg(long, default_value_t = 50)]
    points: usize,

    /// Interpret the interval in units of ω·t
    #[arg(long)]
    dimensionless: bool,

    /// Trotter steps per circuit
    #[arg(long, default_value_t = 10)]
    trotter_steps: usize,

    /// Shots per circuit
    #[arg(long, default_value_t = 8192)]
    shots: u64,

    /// Backend: ideal | noisy
    #[arg(long, value_enum, default_value_t = Mode::Ideal)]
    mode: Mode,

    /// Error mitigation applied to the counts
    #[arg(long, value_enum, default_value_t = Mitigation::None)]
    mitigation: Mitigation,

    #[command(flatten)]
    noise: NoiseArgs,

    /// RNG seed (full reproducibility)
    #[arg(long, default_value = "dicke")]
    seed: String,

    /// Number of Rayon worker threads (0 = Rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Output CSV path
    #[arg(long, default_value = "dicke.csv")]
    out: String,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Ideal,
    Noisy,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    init_threads(args.threads)?;

    let model = DickeModel::new(args.spins, args.frequency, args.coupling)?;
    let times = if args.dimensionless {
        TimeGrid::dimensionless(args.t_start, args.t_end, args.points, args.frequency)?
    } else {
        TimeGrid::linspace(args.t_start, args.t_end, args.points)?
    };
    let run = QuantumRun {
        trotter_steps: args.trotter_steps,
        shots: args.shots,
    };

    let backend: Box<dyn Backend> = match args.mode {
        Mode::Ideal => Box::new(StatevectorBackend::new(args.seed.as_str())),
        Mode::Noisy => Box::new(NoisyBackend::from_params(
            &args.noise.params(),
            args.spins,
            args.seed.as_str(),
        )?),
    };
    info!(backend = backend.name(), spins = args.spins, points = times.len(), "starting");

    let classical = classical_simulator(&times, &model)?;
    let quantum = quantum_simulator(
        &times,
        &model,
        run,
        backend.as_ref(),
        args.mitigation.into(),
    )?;

    for i in 0..times.len() {
        println!(
            "t={:.4}  P={:.5}/{:.5}  E0={:.5}/{:.5}  E1={:.5}/{:.5}",
            classical.times[i],
            classical.probabilities[i],
            quantum.probabilities[i],
            classical.internal_energy[i],
            quantum.internal_energy[i],
            classical.coupling_energy[i],
            quantum.coupling_energy[i],
        );
    }
    println!(
        "max deviation (classical vs {}) = {:.3e}",
        backend.name(),
        quantum.max_deviation(&classical)?
    );

    write_observables(&args.out, &[("classical", &classical), ("quantum", &quantum)])
        .with_context(|| format!("failed to write {}", args.out))?;
    info!(path = %args.out, "wrote CSV");
    Ok(())
}
