use anyhow::{Context, Result};
use clap::ValueEnum;
use quantum::noise::NoiseParams;
use simulator::MitigationMode;

/// Noise rates shared by the noisy drivers.
#[derive(clap::Args, Clone, Debug)]
pub struct NoiseArgs {
    /// Readout bit-flip probability
    #[arg(long, default_value_t = 0.02)]
    pub p_meas: f64,

    /// Single-qubit depolarizing probability
    #[arg(long, default_value_t = 0.001)]
    pub p_dep: f64,

    /// Two-qubit depolarizing probability
    #[arg(long, default_value_t = 0.01)]
    pub p_cnot: f64,

    /// Relaxation time T1 (s)
    #[arg(long, default_value_t = 100e-6)]
    pub t1: f64,

    /// Dephasing time T2 (s)
    #[arg(long, default_value_t = 80e-6)]
    pub t2: f64,

    /// Gate duration (s)
    #[arg(long, default_value_t = 50e-9)]
    pub gate_time: f64,
}

impl NoiseArgs {
    pub fn params(&self) -> NoiseParams {
        NoiseParams {
            p_meas: self.p_meas,
            p_dep: self.p_dep,
            p_cnot: self.p_cnot,
            t1: self.t1,
            t2: self.t2,
            gate_time: self.gate_time,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mitigation {
    None,
    Readout,
    Parity,
}

impl From<Mitigation> for MitigationMode {
    fn from(m: Mitigation) -> Self {
        match m {
            Mitigation::None => MitigationMode::None,
            Mitigation::Readout => MitigationMode::Readout,
            Mitigation::Parity => MitigationMode::Parity,
        }
    }
}

/// Sizes the global Rayon pool; `0` keeps Rayon's default.
pub fn init_threads(threads: usize) -> Result<()> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to build Rayon thread pool")?;
    }
    Ok(())
}

/// Comma-separated integers; blank items are skipped.
pub fn parse_list(input: &str) -> Result<Vec<usize>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<usize>()
                .with_context(|| format!("invalid integer '{}'", t))
        })
        .collect()
}
