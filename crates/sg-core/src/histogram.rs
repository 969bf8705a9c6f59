//! Fixed binning and weighted split-count histograms.

use crate::dataset::Observable;
use crate::error::{Error, Result};

/// Fixed bin edges shared across all modes and partitions.
///
/// Bins are defined up front, never derived from the data, so gradient tables
/// for different modes are directly comparable bin by bin.
#[derive(Debug, Clone)]
pub struct Binning {
    edges: Vec<f64>,
}

impl Binning {
    /// Validated binning from explicit edges (finite, strictly increasing,
    /// at least two).
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::DataShape(format!(
                "need at least 2 bin edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::DataShape("bin edges must be finite".into()));
        }
        for pair in edges.windows(2) {
            if pair[1] <= pair[0] {
                return Err(Error::DataShape(format!(
                    "bin edges must be strictly increasing ({} then {})",
                    pair[0], pair[1]
                )));
            }
        }
        Ok(Self { edges })
    }

    /// Standard binning for an observable.
    pub fn for_observable(observable: Observable) -> Self {
        match observable {
            Observable::Energy => Self::energy(),
            Observable::Zenith => Self::zenith(),
        }
    }

    /// Standard energy binning: 20 log10-spaced bins from 1e2 to 1e7.
    pub fn energy() -> Self {
        let edges = (0..=20).map(|i| 10f64.powf(2.0 + 0.25 * i as f64)).collect();
        Self { edges }
    }

    /// Standard zenith binning: 20 linear bins from 0 to pi.
    pub fn zenith() -> Self {
        let step = std::f64::consts::PI / 20.0;
        let edges = (0..=20).map(|i| i as f64 * step).collect();
        Self { edges }
    }

    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Bin edges (length `n_bins + 1`).
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bin centers (edge midpoints).
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|pair| (pair[0] + pair[1]) / 2.0).collect()
    }

    /// Half of each bin's edge span.
    pub fn half_widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|pair| (pair[1] - pair[0]) / 2.0).collect()
    }
}

/// Weighted counts and statistical uncertainties in fixed bins.
#[derive(Debug, Clone)]
pub struct GradientHistogram {
    /// Bin centers.
    pub centers: Vec<f64>,
    /// Bin half-widths.
    pub half_widths: Vec<f64>,
    /// Summed weight per bin (unnormalized).
    pub counts: Vec<f64>,
    /// Weighted statistical uncertainty per bin: sqrt(sum of squared weights).
    pub errors: Vec<f64>,
}

/// Accumulate weighted counts and uncertainties for one partitioned subset.
///
/// Bin membership is strict on both edges (`edge_j < v < edge_{j+1}`): a value
/// exactly on an edge lands in no bin. This reproduces the reference
/// extraction's membership test verbatim; it is a documented oddity of the
/// table format, not a convention to clean up. Counts and errors share the
/// test so the two arrays stay bin-aligned. An empty bin has error exactly 0.
pub fn split_counts(
    binning: &Binning,
    values: &[f64],
    weights: &[f64],
) -> Result<GradientHistogram> {
    if values.len() != weights.len() {
        return Err(Error::DataShape(format!(
            "values/weights length mismatch: {} vs {}",
            values.len(),
            weights.len()
        )));
    }

    let edges = binning.edges();
    let n_bins = binning.n_bins();
    let mut counts = vec![0.0; n_bins];
    let mut sumw2 = vec![0.0; n_bins];
    // Nested scan, O(events x bins). Fine at this data scale.
    for (&value, &weight) in values.iter().zip(weights) {
        for j in 0..n_bins {
            if value > edges[j] && value < edges[j + 1] {
                counts[j] += weight;
                sumw2[j] += weight * weight;
            }
        }
    }
    let errors = sumw2.into_iter().map(f64::sqrt).collect();

    Ok(GradientHistogram {
        centers: binning.centers(),
        half_widths: binning.half_widths(),
        counts,
        errors,
    })
}
