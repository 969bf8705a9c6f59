//! # sg-core
//!
//! Core library for SnowGrad: extraction of nuisance-parameter sensitivity
//! gradients from multisim Monte Carlo simulation sets.
//!
//! Events carry per-mode SnowStorm coefficients (Fourier phases and
//! amplitudes). For a chosen axis and split point the library partitions the
//! event set into the positively-perturbed subset, histograms an observable
//! in fixed bins, and attaches weighted statistical uncertainties
//! (sqrt of the per-bin sum of squared weights).
//!
//! ## Example
//!
//! ```no_run
//! use sg_core::{partition, split_counts, Binning, EventSet, Observable, SplitAxis};
//!
//! let events = EventSet::load(&["mc.json"]).unwrap();
//! let (values, weights) =
//!     partition(&events, Observable::Energy, SplitAxis::Phases, 0, 0.0, None).unwrap();
//! let hist = split_counts(&Binning::energy(), &values, &weights).unwrap();
//! println!("bin 0: {} +- {}", hist.counts[0], hist.errors[0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod error;
pub mod gradient;
pub mod histogram;
pub mod split;

pub use dataset::{EventSet, Observable};
pub use error::{Error, Result};
pub use gradient::{check_no_collision, gradient_filename, gradient_path, write_gradient};
pub use histogram::{split_counts, Binning, GradientHistogram};
pub use split::{partition, SplitAxis, SplitConfig, SplitRequest};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
