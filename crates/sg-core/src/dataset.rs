//! Multisim Monte Carlo set loading.
//!
//! Input sets are columnar JSON files with named per-event arrays: `energy`,
//! `zenith`, `weight`, and the per-event SnowStorm coefficient rows
//! `snowstorm_phases` / `snowstorm_amplitudes` (one entry per mode). Multiple
//! files are concatenated in argument order into one [`EventSet`].

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::split::SplitAxis;

/// Observable to histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observable {
    /// Reconstructed event energy.
    Energy,
    /// Reconstructed zenith angle (radians).
    Zenith,
}

impl Observable {
    /// Both observables, in output order.
    pub const ALL: [Observable; 2] = [Observable::Energy, Observable::Zenith];

    /// Tag used in output filenames.
    pub fn tag(self) -> &'static str {
        match self {
            Observable::Energy => "Energy",
            Observable::Zenith => "Zenith",
        }
    }
}

/// On-disk schema of one multisim Monte Carlo set.
#[derive(Debug, Clone, Deserialize)]
struct McSetFile {
    energy: Vec<f64>,
    zenith: Vec<f64>,
    weight: Vec<f64>,
    snowstorm_phases: Vec<Vec<f64>>,
    snowstorm_amplitudes: Vec<Vec<f64>>,
}

/// In-memory multisim event set, concatenated over all input files.
///
/// SnowStorm coefficients are stored transposed (one column per mode) so a
/// per-mode partition is a linear scan over a contiguous slice. Read-only
/// after loading.
#[derive(Debug, Clone)]
pub struct EventSet {
    energy: Vec<f64>,
    zenith: Vec<f64>,
    weight: Vec<f64>,
    /// `phases[mode][event]`
    phases: Vec<Vec<f64>>,
    /// `amplitudes[mode][event]`
    amplitudes: Vec<Vec<f64>>,
}

impl EventSet {
    /// Load and concatenate one or more Monte Carlo sets.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut merged: Option<EventSet> = None;
        for path in paths {
            let json = std::fs::read_to_string(path.as_ref())?;
            let file: McSetFile = serde_json::from_str(&json)?;
            let set = EventSet::from_parts(
                file.energy,
                file.zenith,
                file.weight,
                file.snowstorm_phases,
                file.snowstorm_amplitudes,
            )?;
            match merged.as_mut() {
                None => merged = Some(set),
                Some(m) => m.append(set)?,
            }
        }
        merged.ok_or_else(|| Error::Config("at least one input file is required".into()))
    }

    /// Build an event set from per-event columns and coefficient rows
    /// (`rows[event][mode]`), validating shapes.
    pub fn from_parts(
        energy: Vec<f64>,
        zenith: Vec<f64>,
        weight: Vec<f64>,
        phase_rows: Vec<Vec<f64>>,
        amplitude_rows: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let n = energy.len();
        for (name, len) in [
            ("zenith", zenith.len()),
            ("weight", weight.len()),
            ("snowstorm_phases", phase_rows.len()),
            ("snowstorm_amplitudes", amplitude_rows.len()),
        ] {
            if len != n {
                return Err(Error::DataShape(format!(
                    "column '{name}' has {len} entries, expected {n} (from 'energy')"
                )));
            }
        }

        let n_modes = phase_rows.first().map(Vec::len).unwrap_or(0);
        let phases = transpose_rows("snowstorm_phases", phase_rows, n_modes)?;
        let amplitudes = transpose_rows("snowstorm_amplitudes", amplitude_rows, n_modes)?;

        Ok(Self { energy, zenith, weight, phases, amplitudes })
    }

    /// Append another set (same mode count) to this one.
    fn append(&mut self, other: EventSet) -> Result<()> {
        if other.n_modes() != self.n_modes() {
            return Err(Error::DataShape(format!(
                "mode count mismatch across input files: {} vs {}",
                self.n_modes(),
                other.n_modes()
            )));
        }
        self.energy.extend(other.energy);
        self.zenith.extend(other.zenith);
        self.weight.extend(other.weight);
        for (col, extra) in self.phases.iter_mut().zip(other.phases) {
            col.extend(extra);
        }
        for (col, extra) in self.amplitudes.iter_mut().zip(other.amplitudes) {
            col.extend(extra);
        }
        Ok(())
    }

    /// Number of events.
    pub fn n_events(&self) -> usize {
        self.energy.len()
    }

    /// Number of SnowStorm modes carried per event.
    pub fn n_modes(&self) -> usize {
        self.phases.len()
    }

    /// Per-event statistical weights.
    pub fn weights(&self) -> &[f64] {
        &self.weight
    }

    /// Per-event values of an observable.
    pub fn observable(&self, observable: Observable) -> &[f64] {
        match observable {
            Observable::Energy => &self.energy,
            Observable::Zenith => &self.zenith,
        }
    }

    /// Per-event coefficients of one mode along an axis.
    pub fn mode_values(&self, axis: SplitAxis, mode: usize) -> Result<&[f64]> {
        let columns = match axis {
            SplitAxis::Phases => &self.phases,
            SplitAxis::Amplitudes => &self.amplitudes,
        };
        columns.get(mode).map(Vec::as_slice).ok_or_else(|| {
            Error::DataShape(format!(
                "mode {mode} out of range (dataset has {} modes)",
                columns.len()
            ))
        })
    }
}

/// Turn `rows[event][mode]` into `columns[mode][event]`, rejecting ragged rows.
fn transpose_rows(name: &str, rows: Vec<Vec<f64>>, n_modes: usize) -> Result<Vec<Vec<f64>>> {
    let n_events = rows.len();
    let mut columns = vec![Vec::with_capacity(n_events); n_modes];
    for (event, row) in rows.into_iter().enumerate() {
        if row.len() != n_modes {
            return Err(Error::DataShape(format!(
                "'{name}' row {event} has {} entries, expected {n_modes}",
                row.len()
            )));
        }
        for (mode, value) in row.into_iter().enumerate() {
            columns[mode].push(value);
        }
    }
    Ok(columns)
}
