// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Feature vector: the 16×16 boolean grid fed to the network

use core::fmt;

use crate::error::{Result, VisionError};
use crate::{FEATURE_COUNT, GRID_SIZE};

/// Row-major 16×16 grid; index `row * 16 + col`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureVector {
    cells: [bool; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new() -> Self {
        Self {
            cells: [false; FEATURE_COUNT],
        }
    }

    /// Build from exactly [`FEATURE_COUNT`] cells
    pub fn from_cells(cells: &[bool]) -> Result<Self> {
        let cells: [bool; FEATURE_COUNT] =
            cells.try_into().map_err(|_| VisionError::LengthMismatch {
                expected: FEATURE_COUNT,
                actual: cells.len(),
            })?;
        Ok(Self { cells })
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * GRID_SIZE + col]
    }

    /// OR a cell in; a set cell never clears
    #[inline]
    pub fn set(&mut self, row: usize, col: usize) {
        self.cells[row * GRID_SIZE + col] = true;
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().copied()
    }

    /// Cells as network inputs (1.0 / 0.0)
    pub fn to_inputs(&self) -> Vec<f64> {
        self.iter().map(|cell| if cell { 1.0 } else { 0.0 }).collect()
    }

    pub fn count_set(&self) -> usize {
        self.iter().filter(|&cell| cell).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count_set() == 0
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug dump: one grid row per line, `X` for set cells and `_` otherwise
impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..GRID_SIZE {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", if self.get(row, col) { 'X' } else { '_' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureVector")
            .field("set", &self.count_set())
            .finish()
    }
}
