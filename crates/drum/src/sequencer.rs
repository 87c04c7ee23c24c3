use crate::delta::shortest_delta;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_SPEED: Duration = Duration::from_millis(150);
pub const DEFAULT_FINALIZE: Duration = Duration::from_millis(16);

/// One rotation, from its start until the ring comes to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPlan {
    pub signed_delta: i64,
    /// Index change actually applied; `sign(delta)` for a single-item ring.
    pub modded: i64,
    pub duration: Duration,
}

impl RotationPlan {
    pub fn new(value: usize, length: usize, infinite: bool, delta: i64, speed: Duration) -> Self {
        let signed_delta = shortest_delta(value, length, delta, infinite);
        let modded = if length == 1 {
            delta.signum()
        } else {
            signed_delta % length as i64
        };

        Self {
            signed_delta,
            modded,
            duration: speed.saturating_mul(signed_delta.unsigned_abs().min(u32::MAX as u64) as u32),
        }
    }

    /// Index after the rotation completes.
    pub fn target(&self, value: usize, length: usize) -> usize {
        let length = length as i64;
        ((value as i64 + self.modded + length) % length) as usize
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("a rotation is already in progress")]
    Busy,
    #[error("there are no items to rotate")]
    Empty,
}

/// Hook run once when the current rotation settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    ContinueInertia,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    Settling {
        plan: RotationPlan,
        started: Instant,
        until: Instant,
        from: f64,
        to: f64,
    },
    Finalizing {
        until: Instant,
    },
}

/// What the caller has to apply after a phase deadline passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Settled {
        plan: RotationPlan,
        end: Option<AnimationEnd>,
    },
    Finalized,
}

/// Single-flight state machine: `Idle -> Settling -> Finalizing -> Idle`.
#[derive(Debug, Clone)]
pub struct Sequencer {
    phase: Phase,
    on_end: Option<AnimationEnd>,
    finalize: Duration,
}

impl Sequencer {
    pub fn new(finalize: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            on_end: None,
            finalize,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Enters `Settling`. `from` and `to` are the ring centers before and
    /// after the rotation.
    pub fn start(&mut self, plan: RotationPlan, now: Instant, from: f64, to: f64) {
        log::debug!(
            "rotation started: delta={} modded={} duration={:?}",
            plan.signed_delta,
            plan.modded,
            plan.duration
        );
        self.phase = Phase::Settling {
            plan,
            started: now,
            until: now + plan.duration,
            from,
            to,
        };
    }

    pub fn set_finalize(&mut self, finalize: Duration) {
        self.finalize = finalize;
    }

    pub fn set_on_end(&mut self, hook: AnimationEnd) {
        self.on_end = Some(hook);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Idle => None,
            Phase::Settling { until, .. } | Phase::Finalizing { until } => Some(until),
        }
    }

    /// Advances at most one phase whose deadline is due at `now`.
    pub fn advance(&mut self, now: Instant) -> Option<Transition> {
        match self.phase {
            Phase::Settling { plan, until, .. } if until <= now => {
                self.phase = Phase::Finalizing {
                    until: until + self.finalize,
                };
                Some(Transition::Settled {
                    plan,
                    end: self.on_end.take(),
                })
            }
            Phase::Finalizing { until } if until <= now => {
                self.phase = Phase::Idle;
                log::debug!("rotation finalized");
                Some(Transition::Finalized)
            }
            _ => None,
        }
    }

    /// Completes the current phase immediately, used by forced requests.
    pub fn interrupt(&mut self) -> Option<Transition> {
        match self.phase {
            Phase::Settling { plan, until, .. } => {
                self.phase = Phase::Finalizing { until };
                Some(Transition::Settled {
                    plan,
                    end: self.on_end.take(),
                })
            }
            Phase::Finalizing { .. } => {
                self.phase = Phase::Idle;
                Some(Transition::Finalized)
            }
            Phase::Idle => None,
        }
    }

    /// Position of the ring center at `now`, if a rotation is moving it.
    pub fn center_at(&self, now: Instant) -> Option<f64> {
        match self.phase {
            Phase::Settling {
                started,
                until,
                from,
                to,
                ..
            } => {
                let total = until.saturating_duration_since(started).as_secs_f64();
                if total == 0.0 {
                    return Some(to);
                }
                let t = (now.saturating_duration_since(started).as_secs_f64() / total).min(1.0);
                Some(from + (to - from) * t)
            }
            _ => None,
        }
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(DEFAULT_FINALIZE)
    }
}
