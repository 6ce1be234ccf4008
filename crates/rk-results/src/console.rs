//! Human-readable table preview of a trajectory.

use std::fmt::Write as _;

use rk_sim::Trajectory;

/// Fixed-width table with two decimals per value, printing every
/// `every`-th sample (the last sample is always included).
pub fn render_table(trajectory: &Trajectory, every: usize) -> String {
    let every = every.max(1);
    let mut out = String::from("t    ");
    for j in 1..=trajectory.dimension() {
        let _ = write!(out, "y{j}   ");
    }

    let last = trajectory.len().saturating_sub(1);
    for (i, (t, y)) in trajectory.iter().enumerate() {
        if i % every != 0 && i != last {
            continue;
        }
        let _ = write!(out, "\n{t:.2}");
        for v in y.iter() {
            let _ = write!(out, " {v:.2}");
        }
    }
    out.push('\n');
    out
}

/// Closing line for an export attempt.
pub fn export_banner(success: bool) -> &'static str {
    if success {
        "DATA EXPORT TO CSV: SUCCESSFUL"
    } else {
        "DATA EXPORT TO CSV: UNSUCCESSFUL"
    }
}
