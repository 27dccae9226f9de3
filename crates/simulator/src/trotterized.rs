//! Trotterized circuits executed on a [`Backend`] and reconstructed from
//! counts.

use crate::backend::{evolve, Backend};
use crate::error::{invalid, SimError, SimResult};
use crate::series::Observables;
use quantum::{
    circuit::trotter_circuit, counts::Counts, measurement::reconstruct, DickeModel,
    MitigationPolicy, ReadoutCalibration, Reconstruction, TimeGrid,
};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

/// Execution settings of one quantum run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantumRun {
    pub trotter_steps: usize,
    pub shots: u64,
}

impl QuantumRun {
    pub fn validate(&self) -> SimResult<()> {
        if self.trotter_steps == 0 {
            return Err(invalid("trotter steps must be at least 1"));
        }
        if self.shots == 0 {
            return Err(invalid("shots must be at least 1"));
        }
        Ok(())
    }
}

/// Mitigation strategy selected by the caller; resolved into a
/// [`MitigationPolicy`] against a concrete backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MitigationMode {
    #[default]
    None,
    Readout,
    Parity,
}

/// Assignment matrix measured on `backend` from the `2^spins` basis-state
/// preparation circuits.
pub fn fit_readout_calibration(
    backend: &dyn Backend,
    spins: usize,
    shots: u64,
) -> SimResult<ReadoutCalibration> {
    let circuits = ReadoutCalibration::circuits(spins);
    let results = backend.run(&circuits, shots)?;
    Ok(ReadoutCalibration::from_counts(spins, &results)?)
}

pub fn resolve_mitigation(
    mode: MitigationMode,
    backend: &dyn Backend,
    spins: usize,
    shots: u64,
) -> SimResult<MitigationPolicy> {
    Ok(match mode {
        MitigationMode::None => MitigationPolicy::None,
        MitigationMode::Readout => {
            MitigationPolicy::ReadoutCalibration(fit_readout_calibration(backend, spins, shots)?)
        }
        MitigationMode::Parity => MitigationPolicy::ParityFilter,
    })
}

/// For every time point: build the Trotter circuit, measure it in the Z
/// and X bases, and reconstruct the observables from the counts.
///
/// All Z-basis circuits go to the backend in one batch, then all X-basis
/// circuits.
#[instrument(
    skip_all,
    fields(backend = backend.name(), spins = model.spins, steps = run.trotter_steps, shots = run.shots)
)]
pub fn quantum_simulator(
    times: &TimeGrid,
    model: &DickeModel,
    run: QuantumRun,
    backend: &dyn Backend,
    mitigation: MitigationMode,
) -> SimResult<Observables> {
    model.validate()?;
    run.validate()?;

    let policy = resolve_mitigation(mitigation, backend, model.spins, run.shots)?;
    info!(mitigation = policy.label(), "quantum run");

    let mut z_circuits = Vec::with_capacity(times.len());
    let mut x_circuits = Vec::with_capacity(times.len());
    for (i, &t) in times.points().iter().enumerate() {
        let circuit = trotter_circuit(
            model.spins,
            t,
            run.trotter_steps,
            model.frequency,
            model.coupling,
        )?;
        x_circuits.push(circuit.x_basis().with_name(format!("x-t{}", i)));
        z_circuits.push(circuit.measure_all().with_name(format!("z-t{}", i)));
    }

    let z_counts = backend.run(&z_circuits, run.shots)?;
    let x_counts = backend.run(&x_circuits, run.shots)?;
    if z_counts.len() != times.len() || x_counts.len() != times.len() {
        return Err(SimError::Execution(format!(
            "{} returned {}/{} results for {} time points",
            backend.name(),
            z_counts.len(),
            x_counts.len(),
            times.len()
        )));
    }

    let mut out = Observables::with_capacity(times.len());
    for ((&t, z), x) in times.points().iter().zip(&z_counts).zip(&x_counts) {
        let r = reconstruct(
            z,
            x,
            model.spins,
            run.shots,
            model.coupling / model.frequency,
            &policy,
        )?;
        out.push(t, r);
    }
    debug!(points = out.len(), "quantum reconstruction done");
    Ok(out)
}

/// The Trotter trajectory without sampling noise: counts are the exact
/// expected weights of the circuit's final distribution.
#[instrument(skip_all, fields(spins = model.spins, steps = trotter_steps))]
pub fn noiseless_observables(
    times: &TimeGrid,
    model: &DickeModel,
    trotter_steps: usize,
) -> SimResult<Observables> {
    model.validate()?;
    QuantumRun {
        trotter_steps,
        shots: 1,
    }
    .validate()?;

    let rows: Vec<Reconstruction> = times
        .points()
        .par_iter()
        .map(|&t| -> SimResult<Reconstruction> {
            let circuit = trotter_circuit(
                model.spins,
                t,
                trotter_steps,
                model.frequency,
                model.coupling,
            )?;
            let z = Counts::try_from_probabilities(&evolve(&circuit).probabilities(), 1.0)?;
            let x = Counts::try_from_probabilities(&evolve(&circuit.x_basis()).probabilities(), 1.0)?;
            Ok(reconstruct(
                &z,
                &x,
                model.spins,
                1,
                model.coupling / model.frequency,
                &MitigationPolicy::None,
            )?)
        })
        .collect::<SimResult<_>>()?;

    let mut out = Observables::with_capacity(rows.len());
    for (&t, r) in times.points().iter().zip(rows) {
        out.push(t, r);
    }
    Ok(out)
}
