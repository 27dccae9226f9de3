use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{init_logging, init_threads, parse_list};
use quantum::{DickeModel, TimeGrid};
use simulator::{classical_simulator, noiseless_observables, output::write_rows, Observables};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Maximum charging power over a (coupling, spins) grid")]
struct Args {
    /// Comma-separated list of spin counts
    #[arg(long, default_value = "1,2,3,4,5")]
    spins: String,

    /// Smallest coupling g
    #[arg(long, default_value_t = 0.0)]
    g_min: f64,

    /// Largest coupling g
    #[arg(long, default_value_t = 2.0)]
    g_max: f64,

    /// Number of coupling values
    #[arg(long, default_value_t = 21)]
    g_points: usize,

    /// Two-level energy gap ω
    #[arg(long, default_value_t = 1.0)]
    frequency: f64,

    /// End of the time interval in units of ω·t (starts at 0)
    #[arg(long, default_value_t = 20.0)]
    t_end: f64,

    /// Number of time points
    #[arg(long, default_value_t = 200)]
    points: usize,

    /// Also evaluate the noiseless Trotter trajectory with this many steps (0 = off)
    #[arg(long, default_value_t = 0)]
    trotter_steps: usize,

    /// Number of Rayon worker threads (0 = Rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Output CSV path
    #[arg(long, default_value = "coupling_sweep.csv")]
    out: String,

    /// Debug-level logging unless RUST_LOG is set
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    init_threads(args.threads)?;

    let spins = parse_list(&args.spins)?;
    if spins.is_empty() {
        bail!("--spins must contain at least one integer value");
    }
    if args.g_points == 0 {
        bail!("--g-points must be at least 1");
    }
    let couplings = linspace(args.g_min, args.g_max, args.g_points);
    let times = TimeGrid::dimensionless(0.0, args.t_end, args.points, args.frequency)?;

    let mut header = vec![
        "spins",
        "coupling",
        "max_power_time",
        "max_power",
        "peak_time",
        "peak_internal_energy",
    ];
    if args.trotter_steps > 0 {
        header.extend(["trotter_max_power_time", "trotter_max_power"]);
    }

    let mut rows = Vec::with_capacity(spins.len() * couplings.len());
    for &n in &spins {
        for &g in &couplings {
            let model = DickeModel::new(n, args.frequency, g)?;
            let classical = classical_simulator(&times, &model)?;
            let (tp, p) = max_power(&classical, args.frequency)?;
            let (te, e) = classical
                .peak_internal_energy()
                .context("empty time grid")?;
            let mut row = vec![n as f64, g, tp, p, te, e];

            if args.trotter_steps > 0 {
                let trotter = noiseless_observables(&times, &model, args.trotter_steps)?;
                let (tq, pq) = max_power(&trotter, args.frequency)?;
                row.extend([tq, pq]);
            }
            debug!(spins = n, coupling = g, max_power = p, "grid point");
            rows.push(row);
        }
        println!("spins={}  done ({} couplings)", n, couplings.len());
    }

    write_rows(&args.out, &header, &rows)
        .with_context(|| format!("failed to write {}", args.out))?;
    info!(path = %args.out, rows = rows.len(), "wrote CSV");
    Ok(())
}

/// `(time, P/(N·ω²))`; needs a grid point with `t > 0`.
fn max_power(obs: &Observables, frequency: f64) -> Result<(f64, f64)> {
    obs.max_power(frequency)
        .context("time grid has no point after t = 0")
}

fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    if points == 1 {
        return vec![start];
    }
    let step = (end - start) / (points - 1) as f64;
    (0..points).map(|i| start + step * i as f64).collect()
}
