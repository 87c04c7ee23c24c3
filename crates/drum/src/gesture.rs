use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Accumulated drag distance that turns into one step.
    pub pan_threshold: f64,
    pub pan_speed_ms: f64,
    pub inertia_decay: f64,
    /// Momentum stops once the velocity falls to this magnitude.
    pub inertia_cutoff: f64,
    /// Step duration at unit velocity; faster flings step quicker.
    pub inertia_base_ms: f64,
    pub inertia_velocity_cap: f64,
    pub wheel_max_speed_ms: f64,
    pub wheel_scale: f64,
    pub click_speed_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pan_threshold: 10.0,
            pan_speed_ms: 100.0,
            inertia_decay: 0.875,
            inertia_cutoff: 0.5,
            inertia_base_ms: 125.0,
            inertia_velocity_cap: 10.0,
            wheel_max_speed_ms: 100.0,
            wheel_scale: 10000.0,
            click_speed_ms: 150.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationRequest {
    pub delta: i64,
    pub speed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InertiaStep {
    Rotate(RotationRequest),
    Settled,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Inertia {
    velocity: f64,
    cancelled: bool,
}

fn sign(x: f64) -> i64 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

pub(crate) fn millis(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or_default()
}

/// Turns continuous pointer input into discrete rotation requests.
#[derive(Debug, Clone, Default)]
pub struct GestureTranslator {
    config: GestureConfig,
    pan_sum: f64,
    last_dy: f64,
    inertia: Option<Inertia>,
}

impl GestureTranslator {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Dragging the drum down brings the previous item to the center.
    pub fn pan_move(&mut self, dy: f64) -> Option<RotationRequest> {
        self.last_dy = dy;
        self.pan_sum += dy;

        if self.pan_sum.abs() < self.config.pan_threshold {
            return None;
        }
        self.pan_sum = 0.0;
        Some(RotationRequest {
            delta: -sign(dy),
            speed: millis(self.config.pan_speed_ms),
        })
    }

    pub fn pan_end(&mut self) {
        let mut velocity = self.last_dy;
        if velocity.is_infinite() {
            velocity = self.config.inertia_velocity_cap * velocity.signum();
        }

        log::debug!("inertia started at velocity {}", velocity);
        self.pan_sum = 0.0;
        self.last_dy = 0.0;
        self.inertia = Some(Inertia {
            velocity,
            cancelled: false,
        });
    }

    pub fn reset_pan(&mut self) {
        self.pan_sum = 0.0;
        self.last_dy = 0.0;
    }

    pub fn wheel(&self, delta_y: f64) -> RotationRequest {
        RotationRequest {
            delta: sign(delta_y),
            speed: millis(
                self.config
                    .wheel_max_speed_ms
                    .min(self.config.wheel_scale / delta_y.abs()),
            ),
        }
    }

    pub fn click(&self, depth: i64) -> RotationRequest {
        RotationRequest {
            delta: depth,
            speed: millis(self.config.click_speed_ms),
        }
    }

    pub fn is_inertia_active(&self) -> bool {
        self.inertia.is_some()
    }

    /// Marks the running inertia as cancelled. Returns false when there was none.
    pub fn cancel_inertia(&mut self) -> bool {
        match self.inertia.as_mut() {
            Some(inertia) => {
                inertia.cancelled = true;
                true
            }
            None => false,
        }
    }

    /// Produces the next momentum step. `None` when no inertia is running.
    pub fn inertia_step(&mut self) -> Option<InertiaStep> {
        let inertia = self.inertia.as_mut()?;

        if inertia.cancelled {
            self.inertia = None;
            return Some(InertiaStep::Stopped);
        }

        if inertia.velocity.abs() > self.config.inertia_cutoff {
            inertia.velocity *= self.config.inertia_decay;
            let velocity = inertia.velocity;
            return Some(InertiaStep::Rotate(RotationRequest {
                delta: -sign(velocity),
                speed: millis(self.config.inertia_base_ms / velocity.abs()),
            }));
        }

        self.inertia = None;
        Some(InertiaStep::Settled)
    }
}
