//! Square nation-by-nation stance matrix

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, StanceError};
use crate::core::types::Nation;

/// `stance[n][k]`: how nation `n` regards nation `k`
///
/// Always square over the roster it was built from, self entries included.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StanceMatrix(BTreeMap<Nation, BTreeMap<Nation, f64>>);

impl StanceMatrix {
    /// Every ordered pair, self included, set to `value`
    pub fn uniform(nations: &[Nation], value: f64) -> Self {
        Self::from_fn(nations, |_, _| value)
    }

    pub fn from_fn(nations: &[Nation], mut f: impl FnMut(&Nation, &Nation) -> f64) -> Self {
        let rows = nations
            .iter()
            .map(|n| {
                let row = nations.iter().map(|k| (k.clone(), f(n, k))).collect();
                (n.clone(), row)
            })
            .collect();
        Self(rows)
    }

    /// A new matrix with every entry replaced by `f(n, k, old)`
    pub fn map(&self, mut f: impl FnMut(&Nation, &Nation, f64) -> f64) -> Self {
        let rows = self
            .0
            .iter()
            .map(|(n, row)| {
                let row = row.iter().map(|(k, &value)| (k.clone(), f(n, k, value))).collect();
                (n.clone(), row)
            })
            .collect();
        Self(rows)
    }

    pub fn for_each_mut(&mut self, mut f: impl FnMut(&Nation, &Nation, &mut f64)) {
        for (n, row) in self.0.iter_mut() {
            for (k, value) in row.iter_mut() {
                f(n, k, value);
            }
        }
    }

    pub fn get(&self, n: &str, k: &str) -> Option<f64> {
        self.0.get(n).and_then(|row| row.get(k)).copied()
    }

    /// Overwrite one entry; both nations must be in the roster
    pub fn set(&mut self, n: &str, k: &str, value: f64) -> Result<()> {
        let row = self
            .0
            .get_mut(n)
            .ok_or_else(|| StanceError::UnknownNation(n.to_string()))?;
        let entry = row
            .get_mut(k)
            .ok_or_else(|| StanceError::UnknownNation(k.to_string()))?;
        *entry = value;
        Ok(())
    }

    pub fn row(&self, n: &str) -> Option<&BTreeMap<Nation, f64>> {
        self.0.get(n)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&Nation, &BTreeMap<Nation, f64>)> {
        self.0.iter()
    }

    pub fn nations(&self) -> impl Iterator<Item = &Nation> {
        self.0.keys()
    }
}
