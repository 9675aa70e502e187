// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # digitpad vision
//!
//! Everything between raw touch coordinates and the network input:
//! - **Bitmap**: boolean surface of touched screen coordinates
//! - **Bounds**: tightest rectangle enclosing the touched pixels
//! - **Downsample**: projection of the bounding box onto a 16×16 grid
//! - **Features**: the resulting 256-entry boolean feature vector
//!
//! ```
//! use digitpad_vision::{downsample, find_bounds, Bitmap};
//!
//! let mut bitmap = Bitmap::new(240, 320);
//! bitmap.mark(10, 10);
//!
//! let bounds = find_bounds(&bitmap)?;
//! let features = downsample(&bitmap, &bounds)?;
//! assert!(features.get(0, 0));
//! assert_eq!(features.count_set(), 1);
//! # Ok::<(), digitpad_vision::VisionError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bitmap;
pub mod bounds;
pub mod downsample;
pub mod error;
pub mod features;

pub use bitmap::Bitmap;
pub use bounds::{find_bounds, scan_bounds, BoundingBox};
pub use downsample::downsample;
pub use error::{Result, VisionError};
pub use features::FeatureVector;

/// Reference panel width in pixels
pub const DEFAULT_SCREEN_WIDTH: usize = 240;

/// Reference panel height in pixels
pub const DEFAULT_SCREEN_HEIGHT: usize = 320;

/// Cells per side of the feature grid
pub const GRID_SIZE: usize = 16;

/// Length of a feature vector (`GRID_SIZE²`)
pub const FEATURE_COUNT: usize = GRID_SIZE * GRID_SIZE;
