//! # digitpad - handwritten digit classification on a touchscreen
//!
//! A finger or stylus draws on a touch panel; every sampled coordinate is
//! recorded in a bitmap. When the trigger line is pressed, the drawing is
//! cropped to its bounding box, reduced to a 16x16 feature grid and fed
//! through a two-layer feed-forward network whose highest-scoring output unit
//! is the recognized digit.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! digitpad = "0.1"  # Default: full features
//! ```
//!
//! ## Feature Flags
//!
//! - **`full`** (default): runtime, config and observability
//! - **`runtime`**: capture session, trigger debouncer, tick scheduler, rendering
//! - **`config`**: TOML configuration with environment and CLI overrides
//! - **`observability`**: logging initialization for binaries
//! - **`mock-hal`**: scripted touch, trigger, display and clock implementations
//!
//! The vision and inference layers are always available.
//!
//! ## Usage Examples
//!
//! ### Classify a bitmap directly
//!
//! ```rust
//! use digitpad::prelude::*;
//!
//! let mut bitmap = Bitmap::new(240, 320);
//! for y in 40..200 {
//!     bitmap.mark(120, y);
//! }
//!
//! let bounds = find_bounds(&bitmap)?;
//! let features = downsample(&bitmap, &bounds)?;
//! let network = Network::new(WeightTables::zeros(NetworkShape::default()), Activation::Identity);
//! let digit = network.classify(&features)?;
//! assert!(digit < 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Run the capture loop
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "runtime", feature = "config"))]
//! # fn run<C, T, G, D>(clock: C, mut touch: T, mut trigger: G, mut display: D) -> Result<(), Box<dyn std::error::Error>>
//! # where C: digitpad::hal::TimeProvider, T: digitpad::hal::TouchProvider,
//! #       G: digitpad::hal::TriggerLine, D: digitpad::hal::PixelSink {
//! use digitpad::config::load_config_or_default;
//! use digitpad::runtime::Session;
//!
//! let config = load_config_or_default(None)?;
//! let mut session = Session::from_config(&config)?;
//! loop {
//!     if let Some(Ok(output)) = session.step(&clock, &mut touch, &mut trigger, &mut display) {
//!         println!("digit: {}", output.digit);
//!     }
//! }
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Runtime: digitpad-runtime                              │
//! │  (session, debouncer, scheduler, pipeline, rendering)   │
//! └─────────────────────────────────────────────────────────┘
//!               ↓                            ↓
//! ┌──────────────────────────────┐ ┌────────────────────────┐
//! │  Core: vision, inference     │ │  Platform: digitpad-hal│
//! │  (bitmap, 16x16, network)    │ │  (touch, trigger, ...) │
//! └──────────────────────────────┘ └────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export core
pub use digitpad_inference as inference;
pub use digitpad_vision as vision;

// Re-export platform and runtime
#[cfg(feature = "runtime")]
pub use digitpad_hal as hal;

#[cfg(feature = "runtime")]
pub use digitpad_runtime as runtime;

// Re-export infrastructure
#[cfg(feature = "config")]
pub use digitpad_config as config;

#[cfg(feature = "observability")]
pub use digitpad_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::inference::{Activation, Classification, Layer, Network, NetworkShape, WeightTables};
    pub use crate::vision::{downsample, find_bounds, Bitmap, BoundingBox, FeatureVector};

    #[cfg(feature = "runtime")]
    pub use crate::hal::{Color, PixelSink, TimeProvider, TouchProvider, TriggerLine};

    #[cfg(feature = "runtime")]
    pub use crate::runtime::{classify_drawing, PipelineError, PipelineOutput, Session};

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, load_config_or_default, DigitpadConfig};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let bitmap = Bitmap::new(4, 4);
        assert!(bitmap.is_empty());
        assert_eq!(NetworkShape::default().inputs, crate::vision::FEATURE_COUNT);
    }
}
