// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # digitpad runtime
//!
//! Single-threaded capture loop around the classifier:
//! - **Scheduler**: turns a microsecond clock into touch and trigger ticks
//! - **Events**: pending-work flags raised by ticks and drained once per loop
//! - **Capture**: moves touch samples into the bitmap
//! - **Debounce**: turns the trigger line into a one-tick "fire" pulse
//! - **Pipeline**: bounding box → downsampling → inference
//! - **Session**: owns all of the above for one device
//!
//! Within one loop iteration the touch sample is always applied to the
//! bitmap before the trigger is serviced, so a classification sees every
//! sample captured up to and including its own tick.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bootstrap;
pub mod capture;
pub mod debounce;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod render;
pub mod scheduler;
pub mod session;

pub use bootstrap::build_network;
pub use capture::{capture_sample, CaptureOutcome};
pub use debounce::{DebounceState, TriggerDebouncer};
pub use error::{PipelineError, Result};
pub use events::{DrainedEvents, PendingEvents};
pub use pipeline::{classify_drawing, PipelineOutput};
pub use render::{draw_boundaries, draw_digit};
pub use scheduler::TickScheduler;
pub use session::Session;
