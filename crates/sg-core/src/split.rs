//! Split configuration, validation, and the event partitioner.

use std::path::PathBuf;

use crate::dataset::{EventSet, Observable};
use crate::error::{Error, Result};

/// Nuisance axis to split along.
///
/// Exactly one axis is selected per run; the "both" and "neither" states are
/// rejected during [`SplitRequest::validate`] and unrepresentable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Fourier phase coefficients.
    Phases,
    /// Fourier amplitude coefficients.
    Amplitudes,
}

impl SplitAxis {
    /// Tag used in output filenames.
    pub fn tag(self) -> &'static str {
        match self {
            SplitAxis::Phases => "Phs",
            SplitAxis::Amplitudes => "Amp",
        }
    }
}

/// Raw split request as it arrives from the command line.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Multisim Monte Carlo sets to process.
    pub infiles: Vec<PathBuf>,
    /// Output directory for gradient tables.
    pub outpath: PathBuf,
    /// Mode indices to calculate (empty = all available).
    pub modes: Vec<usize>,
    /// Point in nuisance space to split at.
    pub split_point: f64,
    /// Split along the phase axis.
    pub split_phases: bool,
    /// Split along the amplitude axis.
    pub split_amplitudes: bool,
    /// Maximum number of events per partition (negative = unbounded).
    pub max_events: i64,
}

impl SplitRequest {
    /// Check the request is well-formed and fix the axis selection.
    ///
    /// An empty mode list is allowed: it warns and later resolves to all
    /// modes available in the loaded dataset.
    pub fn validate(self) -> Result<SplitConfig> {
        if self.infiles.is_empty() {
            return Err(Error::Config("at least one input file is required".into()));
        }
        let axis = match (self.split_phases, self.split_amplitudes) {
            (true, false) => SplitAxis::Phases,
            (false, true) => SplitAxis::Amplitudes,
            (true, true) => {
                return Err(Error::Config(
                    "cannot split phases and amplitudes simultaneously".into(),
                ))
            }
            (false, false) => {
                return Err(Error::Config(
                    "an axis to split must be selected (--phases or --amplitudes)".into(),
                ))
            }
        };
        if self.modes.is_empty() {
            tracing::warn!("no modes to split specified, splitting all available modes");
        }
        let cap = if self.max_events < 0 { None } else { Some(self.max_events as usize) };
        Ok(SplitConfig {
            infiles: self.infiles,
            outpath: self.outpath,
            modes: self.modes,
            axis,
            split_point: self.split_point,
            cap,
        })
    }
}

/// Validated split configuration. Read-only during processing.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Multisim Monte Carlo sets to process.
    pub infiles: Vec<PathBuf>,
    /// Output directory for gradient tables.
    pub outpath: PathBuf,
    /// Requested mode indices (empty = all available).
    pub modes: Vec<usize>,
    /// Selected split axis.
    pub axis: SplitAxis,
    /// Point in nuisance space to split at.
    pub split_point: f64,
    /// Maximum number of events per partition (`None` = unbounded).
    pub cap: Option<usize>,
}

impl SplitConfig {
    /// Resolve the requested mode list against a loaded dataset.
    pub fn resolve_modes(&self, events: &EventSet) -> Vec<usize> {
        if self.modes.is_empty() {
            (0..events.n_modes()).collect()
        } else {
            self.modes.clone()
        }
    }
}

/// Select the positively-perturbed subset for one mode.
///
/// Returns parallel `(values, weights)` vectors for events whose `axis`
/// coefficient for `mode` is strictly greater than `split_point`, in source
/// order, truncated to the first `cap` matches. Truncation is a prefix take,
/// not a random sample. No matches yields empty vectors.
pub fn partition(
    events: &EventSet,
    observable: Observable,
    axis: SplitAxis,
    mode: usize,
    split_point: f64,
    cap: Option<usize>,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let coefficients = events.mode_values(axis, mode)?;
    let observed = events.observable(observable);
    let all_weights = events.weights();

    let limit = cap.unwrap_or(usize::MAX);
    let mut values = Vec::new();
    let mut weights = Vec::new();
    for (i, &coeff) in coefficients.iter().enumerate() {
        if weights.len() >= limit {
            break;
        }
        if coeff > split_point {
            values.push(observed[i]);
            weights.push(all_weights[i]);
        }
    }
    Ok((values, weights))
}
