use crate::error::{invalid, SimResult};
use crate::series::Observables;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One `time` column followed by the three observables of every labelled
/// series. All series must share the same time points.
pub fn write_observables(path: impl AsRef<Path>, series: &[(&str, &Observables)]) -> SimResult<()> {
    let Some((_, first)) = series.first() else {
        return Err(invalid("nothing to write"));
    };
    if let Some((label, _)) = series.iter().find(|(_, s)| s.times != first.times) {
        return Err(invalid(format!("series '{}' has different time points", label)));
    }

    let mut header = vec![String::from("time")];
    for (label, _) in series {
        header.push(format!("{}_probability", label));
        header.push(format!("{}_internal_energy", label));
        header.push(format!("{}_coupling_energy", label));
    }

    let rows: Vec<Vec<f64>> = (0..first.len())
        .map(|i| {
            let mut row = vec![first.times[i]];
            for (_, s) in series {
                row.extend([s.probabilities[i], s.internal_energy[i], s.coupling_energy[i]]);
            }
            row
        })
        .collect();

    let header: Vec<&str> = header.iter().map(String::as_str).collect();
    write_rows(path, &header, &rows)
}

pub fn write_rows(path: impl AsRef<Path>, header: &[&str], rows: &[Vec<f64>]) -> SimResult<()> {
    let mut f = BufWriter::new(File::create(path)?);
    writeln!(f, "{}", header.join(","))?;
    for row in rows {
        let line: Vec<String> = row.iter().map(f64::to_string).collect();
        writeln!(f, "{}", line.join(","))?;
    }
    f.flush()?;
    Ok(())
}
