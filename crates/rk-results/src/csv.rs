//! Delimited text export.
//!
//! Layout: a header `t,y1,...,ym`, then one row per sample holding the time
//! followed by the `m` state components. Values use `f64`'s `Display`, which
//! is the shortest round-trip form with a `.` decimal point.

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;

use rk_core::Vector;
use rk_sim::{Integrator, Trajectory};
use tracing::info;

use crate::{ResultsError, ResultsResult, require_solved};

/// Render a trajectory as CSV text.
pub fn to_csv_string(trajectory: &Trajectory) -> ResultsResult<String> {
    if trajectory.is_empty() {
        return Err(ResultsError::EmptyTrajectory);
    }

    let mut out = String::from("t");
    for j in 1..=trajectory.dimension() {
        // Writing into a String cannot fail.
        let _ = write!(out, ",y{j}");
    }
    out.push('\n');

    for (t, y) in trajectory.iter() {
        let _ = write!(out, "{t}");
        for v in y.iter() {
            let _ = write!(out, ",{v}");
        }
        out.push('\n');
    }
    Ok(out)
}

/// Write a trajectory as CSV to `writer`.
pub fn write_csv<W: Write>(mut writer: W, trajectory: &Trajectory) -> ResultsResult<()> {
    let content = to_csv_string(trajectory)?;
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write the integrator's trajectory, refusing runs that did not complete.
pub fn export_csv<W: Write>(writer: W, integrator: &Integrator) -> ResultsResult<()> {
    let trajectory = require_solved(integrator)?;
    write_csv(writer, trajectory)
}

/// Export to a file. Nothing is created when the run is not solved.
pub fn export_csv_file(path: &Path, integrator: &Integrator) -> ResultsResult<()> {
    let trajectory = require_solved(integrator)?;
    let content = to_csv_string(trajectory)?;
    fs::write(path, content)?;
    info!(
        path = %path.display(),
        samples = trajectory.len(),
        "trajectory exported"
    );
    Ok(())
}

/// Parse text produced by [`to_csv_string`] back into a trajectory.
pub fn parse_csv(content: &str) -> ResultsResult<Trajectory> {
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines.next().ok_or(ResultsError::EmptyTrajectory)?;
    let columns: Vec<&str> = header.split(',').collect();
    if columns.first() != Some(&"t") || columns.len() < 2 {
        return Err(ResultsError::Parse {
            line: 1,
            message: format!("unexpected header '{header}'"),
        });
    }
    let dim = columns.len() - 1;

    let mut times = Vec::new();
    let mut states = Vec::new();
    for (idx, line) in lines {
        let parse_err = |message: String| ResultsError::Parse {
            line: idx + 1,
            message,
        };
        let values = line
            .split(',')
            .map(|field| {
                field
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| parse_err(format!("'{field}': {e}")))
            })
            .collect::<ResultsResult<Vec<f64>>>()?;
        if values.len() != dim + 1 {
            return Err(parse_err(format!(
                "expected {} fields, found {}",
                dim + 1,
                values.len()
            )));
        }
        times.push(values[0]);
        states.push(Vector::from_slice(&values[1..]));
    }

    if times.is_empty() {
        return Err(ResultsError::EmptyTrajectory);
    }
    Trajectory::from_parts(times, states).ok_or(ResultsError::EmptyTrajectory)
}
