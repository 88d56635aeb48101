use thiserror::Error;

use crate::input::queue::ControlEvent;

/// Slider presets offered by the control panel.
pub const TIME_SCALE_PRESETS: [f64; 4] = [1.0, 10.0, 100.0, 1000.0];

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ControlError {
    #[error("time scale must be positive and finite (got {0})")]
    InvalidTimeScale(f64),
}

/// Global time scale and pause flag. The only state mutated from outside
/// the frame loop; each frame reads it once through `snapshot`.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    time_scale: f64,
    paused: bool,
    min_scale: f64,
    max_scale: f64,
}

/// One frame's view of the clock. Every body in the frame sees the same copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSnapshot {
    pub time_scale: f64,
    pub paused: bool,
}

impl SimulationClock {
    pub fn new(time_scale: f64) -> Self {
        Self::with_bounds(time_scale, 1.0, 1000.0)
    }

    /// Bounds that are not positive and ordered fall back to [1, 1000].
    pub fn with_bounds(time_scale: f64, min_scale: f64, max_scale: f64) -> Self {
        let ordered = min_scale.is_finite()
            && max_scale.is_finite()
            && 0.0 < min_scale
            && min_scale <= max_scale;
        let (min_scale, max_scale) = if ordered {
            (min_scale, max_scale)
        } else {
            log::warn!(
                "clock: bad bounds [{}, {}], using [1, 1000]",
                min_scale,
                max_scale
            );
            (1.0, 1000.0)
        };
        let mut clock = Self {
            time_scale: min_scale.max(10.0_f64.min(max_scale)),
            paused: false,
            min_scale,
            max_scale,
        };
        if let Err(e) = clock.set_time_scale(time_scale) {
            log::warn!("clock: {}, keeping {}", e, clock.time_scale);
        }
        clock
    }

    /// Set the time scale, clamped into the bounds. Non-positive or
    /// non-finite values are refused and the previous value is kept.
    pub fn set_time_scale(&mut self, value: f64) -> Result<f64, ControlError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ControlError::InvalidTimeScale(value));
        }
        self.time_scale = value.clamp(self.min_scale, self.max_scale);
        Ok(self.time_scale)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            time_scale: self.time_scale,
            paused: self.paused,
        }
    }

    /// Consume a clock event. Returns false for events the clock doesn't own.
    pub fn apply(&mut self, event: &ControlEvent) -> bool {
        match event {
            ControlEvent::SetTimeScale(value) => {
                if let Err(e) = self.set_time_scale(*value) {
                    log::warn!("clock: {}, keeping {}", e, self.time_scale);
                }
                true
            }
            ControlEvent::SetPaused(paused) => {
                self.set_paused(*paused);
                true
            }
            ControlEvent::TogglePause => {
                self.toggle_pause();
                true
            }
            _ => false,
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Map a log-scale slider position in [0, 3] to a time scale in [1, 1000].
pub fn slider_to_time_scale(slider: f64) -> f64 {
    let x = if slider.is_finite() { slider.clamp(0.0, 3.0) } else { 0.0 };
    10.0_f64.powf(x)
}

/// Inverse of `slider_to_time_scale`.
pub fn time_scale_to_slider(time_scale: f64) -> f64 {
    if !time_scale.is_finite() || time_scale <= 0.0 {
        return 0.0;
    }
    time_scale.log10().clamp(0.0, 3.0)
}
