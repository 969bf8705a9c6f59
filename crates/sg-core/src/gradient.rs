//! Gradient table output.

use std::path::{Path, PathBuf};

use crate::dataset::Observable;
use crate::error::{Error, Result};
use crate::histogram::GradientHistogram;
use crate::split::SplitAxis;

/// Deterministic filename for one (axis, observable, mode) gradient table.
pub fn gradient_filename(axis: SplitAxis, observable: Observable, mode: usize) -> String {
    format!("SplitCounts_{}_{}_{}.csv", axis.tag(), observable.tag(), mode)
}

/// Full output path under `outpath`.
pub fn gradient_path(
    outpath: &Path,
    axis: SplitAxis,
    observable: Observable,
    mode: usize,
) -> PathBuf {
    outpath.join(gradient_filename(axis, observable, mode))
}

/// Refuse to clobber an existing gradient table.
pub fn check_no_collision(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::AlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

/// Write one gradient table: one row per bin, six space-delimited `%.18e`
/// columns (center, half-width, count, error, count, error).
///
/// The count/error pair is written twice to match the historical table layout
/// consumed downstream. Fails with [`Error::AlreadyExists`] instead of
/// overwriting.
pub fn write_gradient(path: &Path, hist: &GradientHistogram) -> Result<()> {
    check_no_collision(path)?;
    let mut out = String::new();
    for j in 0..hist.counts.len() {
        out.push_str(&format!(
            "{:.18e} {:.18e} {:.18e} {:.18e} {:.18e} {:.18e}\n",
            hist.centers[j],
            hist.half_widths[j],
            hist.counts[j],
            hist.errors[j],
            hist.counts[j],
            hist.errors[j],
        ));
    }
    std::fs::write(path, out)?;
    Ok(())
}
