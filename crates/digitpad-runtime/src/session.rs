// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Capture session
//!
//! One [`Session`] per device. Each loop iteration:
//!
//! 1. poll the scheduler with the current time (raises pending flags)
//! 2. drain the flags
//! 3. touch tick: read one sample into the bitmap (and echo it on screen)
//! 4. trigger tick: sample the trigger line; on a confirmed press run the
//!    pipeline, then reset the bitmap if configured to
//!
//! Pipeline errors are logged and returned to the caller; they never leave
//! the session in a state that stops the next iteration.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bootstrap::build_network;
use crate::capture::{capture_sample, CaptureOutcome};
use crate::debounce::{DebounceState, TriggerDebouncer};
use crate::error::Result;
use crate::events::PendingEvents;
use crate::pipeline::{classify_drawing, PipelineOutput};
use crate::render::{draw_boundaries, draw_digit};
use crate::scheduler::TickScheduler;
use digitpad_config::{CaptureConfig, DigitpadConfig};
use digitpad_hal::{
    Color, MirroredDisplay, MirroredTouch, PixelSink, ScreenSize, TimeProvider, TouchProvider,
    TriggerLine,
};
use digitpad_inference::Network;
use digitpad_vision::Bitmap;

pub struct Session {
    bitmap: Bitmap,
    network: Network,
    debouncer: TriggerDebouncer,
    scheduler: TickScheduler,
    events: Arc<PendingEvents>,
    capture: CaptureConfig,
    size: ScreenSize,
}

impl Session {
    pub fn new(config: &DigitpadConfig, network: Network) -> Self {
        let size = ScreenSize::new(config.screen.width, config.screen.height);
        info!(
            width = size.width,
            height = size.height,
            mirrored = config.capture.mirror_touch,
            "Capture session started"
        );
        Self {
            bitmap: Bitmap::new(size.width, size.height),
            network,
            debouncer: TriggerDebouncer::new(),
            scheduler: TickScheduler::from_config(&config.scheduler),
            events: Arc::new(PendingEvents::new()),
            capture: config.capture.clone(),
            size,
        }
    }

    /// Build the network from `config` and start a session around it
    pub fn from_config(config: &DigitpadConfig) -> Result<Self> {
        let network = build_network(config)?;
        Ok(Self::new(config, network))
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.size
    }

    pub fn debounce_state(&self) -> DebounceState {
        self.debouncer.state()
    }

    /// Pending-work flags, for timers that raise ticks themselves
    pub fn events(&self) -> Arc<PendingEvents> {
        Arc::clone(&self.events)
    }

    pub fn scheduler_mut(&mut self) -> &mut TickScheduler {
        &mut self.scheduler
    }

    /// Forget the current drawing
    pub fn reset(&mut self) {
        self.bitmap.reset();
        debug!("Bitmap cleared");
    }

    /// One loop iteration at the clock's current time
    pub fn step<C, T, G, D>(
        &mut self,
        clock: &C,
        touch: &mut T,
        trigger: &mut G,
        display: &mut D,
    ) -> Option<Result<PipelineOutput>>
    where
        C: TimeProvider,
        T: TouchProvider,
        G: TriggerLine,
        D: PixelSink,
    {
        self.run_iteration(clock.get_time_us(), touch, trigger, display)
    }

    /// One loop iteration at `now_us`
    ///
    /// Returns `Some` when the trigger fired this iteration, carrying the
    /// classification or the reason it was skipped.
    pub fn run_iteration<T, G, D>(
        &mut self,
        now_us: u64,
        touch: &mut T,
        trigger: &mut G,
        display: &mut D,
    ) -> Option<Result<PipelineOutput>>
    where
        T: TouchProvider,
        G: TriggerLine,
        D: PixelSink,
    {
        self.scheduler.poll(now_us, &self.events);
        self.service_pending(touch, trigger, display)
    }

    /// Drain and service pending flags without consulting the scheduler
    pub fn service_pending<T, G, D>(
        &mut self,
        touch: &mut T,
        trigger: &mut G,
        display: &mut D,
    ) -> Option<Result<PipelineOutput>>
    where
        T: TouchProvider,
        G: TriggerLine,
        D: PixelSink,
    {
        let pending = self.events.take();

        if pending.touch_sample {
            let outcome = if self.capture.mirror_touch {
                capture_sample(&mut MirroredTouch::new(&mut *touch, self.size), &mut self.bitmap)
            } else {
                capture_sample(touch, &mut self.bitmap)
            };
            if let CaptureOutcome::Marked { x, y } = outcome {
                if self.capture.render_digit {
                    self.draw_pixel(display, x, y, Color::Green);
                }
            }
        }

        if pending.trigger_check && self.debouncer.sample(trigger.read_trigger_line()) {
            return Some(self.classify_now(display));
        }
        None
    }

    /// Run the pipeline on the current drawing
    ///
    /// On success the drawing is repainted when `render_digit` is set, the
    /// bounding box is drawn when `render_boundaries` is set and the bitmap is
    /// reset when `clear_after_classify` is set. A failed
    /// attempt leaves the bitmap as it was.
    pub fn classify_now<D: PixelSink>(&mut self, display: &mut D) -> Result<PipelineOutput> {
        let output = match classify_drawing(&self.bitmap, &self.network) {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "Classification skipped");
                return Err(e);
            }
        };

        if self.capture.dump_features {
            debug!("Feature grid for digit {}:\n{}", output.digit, output.features);
        }
        if self.capture.mirror_touch {
            let mut mirrored = MirroredDisplay::new(&mut *display, self.size);
            self.render_result(&output, &mut mirrored);
        } else {
            self.render_result(&output, display);
        }
        if self.capture.clear_after_classify {
            self.reset();
        }

        Ok(output)
    }

    fn render_result<D: PixelSink>(&self, output: &PipelineOutput, display: &mut D) {
        if self.capture.render_digit {
            draw_digit(&self.bitmap, display);
        }
        if self.capture.render_boundaries {
            draw_boundaries(&self.bitmap, &output.bounds, display);
        }
    }

    fn draw_pixel<D: PixelSink>(&self, display: &mut D, x: usize, y: usize, color: Color) {
        if self.capture.mirror_touch {
            MirroredDisplay::new(display, self.size).draw_pixel(x, y, color);
        } else {
            display.draw_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digitpad_hal::mock::{RecordingDisplay, ScriptedTouch, ScriptedTrigger};
    use digitpad_inference::{Activation, Layer, NetworkShape, WeightTables};

    fn unmirrored_config() -> DigitpadConfig {
        let mut config = DigitpadConfig::default();
        config.capture.mirror_touch = false;
        config
    }

    fn bias_network(digit: usize) -> Network {
        let mut weights = WeightTables::zeros(NetworkShape::default());
        weights.set_bias(Layer::Output, digit, 1.0).unwrap();
        Network::new(weights, Activation::Identity)
    }

    #[test]
    fn test_touch_tick_captures_and_echoes() {
        let mut session = Session::new(&unmirrored_config(), bias_network(3));
        let mut touch = ScriptedTouch::from_points([(30, 40)]);
        let mut trigger = ScriptedTrigger::new();
        let mut display = RecordingDisplay::new();

        assert!(session.run_iteration(4_999, &mut touch, &mut trigger, &mut display).is_none());
        assert!(session.bitmap().is_empty());

        assert!(session.run_iteration(5_000, &mut touch, &mut trigger, &mut display).is_none());
        assert!(session.bitmap().is_set(30, 40));
        assert_eq!(display.pixels(), &[(30, 40, Color::Green)]);
    }

    #[test]
    fn test_mirrored_panel() {
        let mut session = Session::new(&DigitpadConfig::default(), bias_network(3));
        let mut touch = ScriptedTouch::from_points([(40, 20)]);
        let mut trigger = ScriptedTrigger::new();
        let mut display = RecordingDisplay::new();

        session.events().raise_touch_sample();
        session.service_pending(&mut touch, &mut trigger, &mut display);

        assert!(session.bitmap().is_set(200, 300));
        assert_eq!(display.pixels(), &[(40, 20, Color::Green)]);
    }

    #[test]
    fn test_confirmed_press_classifies_and_clears() {
        let mut session = Session::new(&unmirrored_config(), bias_network(3));
        let mut touch = ScriptedTouch::from_points([(10, 10)]);
        let mut trigger = ScriptedTrigger::from_levels([false, false]);
        let mut display = RecordingDisplay::new();

        // 10 ms: touch sample + first low; 20 ms: second low fires
        assert!(session.run_iteration(10_000, &mut touch, &mut trigger, &mut display).is_none());
        let output = session
            .run_iteration(20_000, &mut touch, &mut trigger, &mut display)
            .expect("trigger should fire")
            .unwrap();

        assert_eq!(output.digit, 3);
        assert!(output.features.get(0, 0));
        assert_eq!(output.features.count_set(), 1);
        assert!(session.bitmap().is_empty());
        assert_eq!(session.debounce_state(), DebounceState::SecondLow);
    }

    #[test]
    fn test_empty_drawing_is_reported_and_loop_continues() {
        let mut session = Session::new(&unmirrored_config(), bias_network(3));
        let mut touch = ScriptedTouch::new();
        let mut trigger = ScriptedTrigger::from_levels([false, false]);
        let mut display = RecordingDisplay::new();

        session.run_iteration(10_000, &mut touch, &mut trigger, &mut display);
        let result = session.run_iteration(20_000, &mut touch, &mut trigger, &mut display);
        assert!(matches!(result, Some(Err(e)) if e.is_empty_drawing()));

        touch.push(50, 60);
        session.run_iteration(25_000, &mut touch, &mut trigger, &mut display);
        assert!(session.bitmap().is_set(50, 60));
    }

    #[test]
    fn test_bitmap_kept_when_clearing_disabled() {
        let mut config = unmirrored_config();
        config.capture.clear_after_classify = false;
        config.capture.render_boundaries = true;
        let mut session = Session::new(&config, bias_network(5));
        let mut display = RecordingDisplay::new();

        session.events().raise_touch_sample();
        session.service_pending(
            &mut ScriptedTouch::from_points([(7, 9)]),
            &mut ScriptedTrigger::new(),
            &mut display,
        );

        assert_eq!(session.classify_now(&mut display).unwrap().digit, 5);
        assert!(session.bitmap().is_set(7, 9));
        assert!(display.drew(0, 9, Color::Red));
        assert!(display.drew(7, 0, Color::Red));
    }

    #[test]
    fn test_classification_repaints_digit_at_panel_position() {
        let mut session = Session::new(&DigitpadConfig::default(), bias_network(4));
        let mut display = RecordingDisplay::new();

        session.events().raise_touch_sample();
        session.service_pending(
            &mut ScriptedTouch::from_points([(40, 20)]),
            &mut ScriptedTrigger::new(),
            &mut display,
        );
        assert_eq!(session.classify_now(&mut display).unwrap().digit, 4);

        assert_eq!(
            display.pixels(),
            &[(40, 20, Color::Green), (40, 20, Color::Green)]
        );
        assert!(session.bitmap().is_empty());
    }

    #[test]
    fn test_from_config() {
        let session = Session::from_config(&DigitpadConfig::default()).unwrap();
        assert_eq!(session.screen_size(), ScreenSize::new(240, 320));
        assert_eq!(session.bitmap().width(), 240);
    }
}
