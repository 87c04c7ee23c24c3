use crate::attribute::{Attribute, AttributeName};
use crate::clock::{Clock, SystemClock};
use crate::geometry::{DEFAULT_CURVATURE, Geometry, Origin, SlotStyle};
use crate::gesture::{GestureConfig, GestureTranslator, InertiaStep, millis};
use crate::label::Label;
use crate::ring::Ring;
use crate::sequencer::{AnimationEnd, Rejected, RotationPlan, Sequencer, Transition};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerState {
    pub value: usize,
    pub length: usize,
    pub infinite: bool,
    pub curvature: f64,
    pub disabled: bool,
    pub is_animating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub value: i64,
    pub infinite: bool,
    pub curvature: f64,
    pub disabled: bool,
    /// Duration of one step of a programmatic rotation.
    pub speed_ms: f64,
    pub finalize_ms: f64,
    pub gesture: GestureConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            value: 0,
            infinite: false,
            curvature: DEFAULT_CURVATURE,
            disabled: false,
            speed_ms: 150.0,
            finalize_ms: 16.0,
            gesture: GestureConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotateOptions {
    pub speed: Option<Duration>,
    pub force: bool,
}

impl RotateOptions {
    pub fn with_speed(speed: Duration) -> Self {
        Self {
            speed: Some(speed),
            force: false,
        }
    }

    pub fn forced(self) -> Self {
        Self {
            force: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    /// A rotation that moved the selection reached its target.
    SelectionChanged { index: usize, item: Option<Label> },
    /// The ring is at rest again and accepts new rotations.
    RotationSettled { value: usize },
    /// Momentum ran out on its own.
    InertiaSettled,
    /// Momentum was stopped on request.
    InertiaStopped,
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InertiaStop {
    Stopped,
    /// Resolved later by [`PickerEvent::InertiaStopped`].
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotView {
    pub physical: usize,
    pub item: Option<usize>,
    pub depth: i64,
    /// Distance from the visual center in item heights, fractional mid-rotation.
    pub position: f64,
    pub style: SlotStyle,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub slots: Vec<SlotView>,
    pub margin_em: f64,
    pub disabled: bool,
    pub in_motion: bool,
}

// Host changes that arrived while a rotation was in flight.
#[derive(Debug, Default)]
struct Deferred {
    items: Option<Vec<Label>>,
    infinite: Option<bool>,
    value: Option<i64>,
}

impl Deferred {
    fn is_empty(&self) -> bool {
        self.items.is_none() && self.infinite.is_none() && self.value.is_none()
    }
}

/// The selection engine: owns the state and ring and runs rotations.
///
/// Nothing here sleeps. Call [`Picker::poll`] whenever the clock may have
/// passed [`Picker::next_deadline`]; it applies due phase changes and returns
/// the events they produced.
pub struct Picker<C: Clock = SystemClock> {
    clock: C,
    state: PickerState,
    items: Vec<Label>,
    ring: Ring,
    geometry: Geometry,
    sequencer: Sequencer,
    gestures: GestureTranslator,
    speed: Duration,
    inertia_due: bool,
    stop_pending: bool,
    deferred: Deferred,
    events: Vec<PickerEvent>,
}

impl Picker<SystemClock> {
    pub fn new(items: Vec<Label>, config: &PickerConfig) -> Self {
        Self::with_clock(items, config, SystemClock)
    }
}

impl<C: Clock> Picker<C> {
    pub fn with_clock(items: Vec<Label>, config: &PickerConfig, clock: C) -> Self {
        let length = items.len();
        let mut picker = Self {
            clock,
            state: PickerState {
                value: 0,
                length,
                infinite: config.infinite,
                curvature: config.curvature,
                disabled: config.disabled,
                is_animating: false,
            },
            items,
            ring: Ring::build(length, config.infinite, 0),
            geometry: Geometry::new(config.curvature),
            sequencer: Sequencer::new(millis(config.finalize_ms)),
            gestures: GestureTranslator::new(config.gesture),
            speed: millis(config.speed_ms),
            inertia_due: false,
            stop_pending: false,
            deferred: Deferred::default(),
            events: Vec::new(),
        };
        picker.apply_value(config.value);
        picker
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn value(&self) -> usize {
        self.state.value
    }

    pub fn len(&self) -> usize {
        self.state.length
    }

    pub fn is_empty(&self) -> bool {
        self.state.length == 0
    }

    pub fn infinite(&self) -> bool {
        self.state.infinite
    }

    pub fn curvature(&self) -> f64 {
        self.state.curvature
    }

    pub fn disabled(&self) -> bool {
        self.state.disabled
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn is_inertia_active(&self) -> bool {
        self.gestures.is_inertia_active()
    }

    pub fn items(&self) -> &[Label] {
        &self.items
    }

    pub fn selected(&self) -> Option<&Label> {
        self.items.get(self.state.value)
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.sequencer.next_deadline()
    }

    /// Applies new tuning without touching the current selection.
    pub fn configure(&mut self, config: &PickerConfig) {
        self.speed = millis(config.speed_ms);
        self.sequencer.set_finalize(millis(config.finalize_ms));
        self.gestures.set_config(config.gesture);
    }

    pub fn set_value(&mut self, value: i64) {
        if self.state.is_animating {
            log::debug!("value {} deferred until the rotation settles", value);
            self.deferred.value = Some(value);
            return;
        }
        self.apply_value(value);
    }

    pub fn set_items(&mut self, items: Vec<Label>) {
        if self.state.is_animating {
            self.deferred.items = Some(items);
            return;
        }
        self.replace_items(items);
        self.apply_value(self.state.value as i64);
    }

    pub fn set_infinite(&mut self, infinite: bool) {
        if self.state.is_animating {
            self.deferred.infinite = Some(infinite);
            return;
        }
        self.state.infinite = infinite;
        self.apply_value(self.state.value as i64);
    }

    pub fn set_curvature(&mut self, curvature: f64) {
        self.state.curvature = curvature;
        self.geometry = Geometry::new(curvature);
        log::debug!(
            "curvature {} shows {} rows each side",
            curvature,
            self.geometry.horizon - 1
        );
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.state.disabled = disabled;
        self.gestures.reset_pan();
        if disabled {
            let _ = self.stop_inertia();
        }
    }

    pub fn on_items_changed(&mut self, items: Vec<Label>) {
        self.set_items(items);
    }

    /// Inbound attribute notification from the host surface. Unknown
    /// attributes are ignored.
    pub fn on_attribute_changed(&mut self, name: &str, raw: Option<&str>) {
        match name.parse::<AttributeName>() {
            Ok(name) => self.apply_attribute(Attribute::parse(name, raw)),
            Err(_) => log::debug!("ignoring unknown attribute '{}'", name),
        }
    }

    pub fn apply_attribute(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Value(value) => self.set_value(value),
            Attribute::Curvature(curvature) => self.set_curvature(curvature),
            Attribute::Disabled(disabled) => self.set_disabled(disabled),
            Attribute::Infinite(infinite) => self.set_infinite(infinite),
        }
    }

    /// Starts a rotation by `delta` items. Dropped, not queued, while another
    /// rotation is in flight unless `force` is set.
    pub fn rotate_by(
        &mut self,
        delta: i64,
        options: RotateOptions,
    ) -> Result<RotationPlan, Rejected> {
        let speed = options.speed.unwrap_or(self.speed);
        self.request_rotation(delta, speed, options.force)
    }

    /// Stops momentum before its next step.
    pub fn stop_inertia(&mut self) -> InertiaStop {
        if !self.gestures.cancel_inertia() {
            return InertiaStop::Stopped;
        }
        if self.state.is_animating {
            self.stop_pending = true;
            return InertiaStop::Pending;
        }
        self.advance_inertia();
        InertiaStop::Stopped
    }

    pub fn pan_move(&mut self, dy: f64) -> Option<RotationPlan> {
        if self.state.disabled {
            return None;
        }
        let request = self.gestures.pan_move(dy)?;
        self.request_rotation(request.delta, request.speed, false).ok()
    }

    pub fn pan_end(&mut self) {
        if self.state.disabled {
            return;
        }
        self.gestures.pan_end();
        if self.state.is_animating {
            self.sequencer.set_on_end(AnimationEnd::ContinueInertia);
        } else {
            self.advance_inertia();
        }
    }

    pub fn wheel(&mut self, delta_y: f64) -> Option<RotationPlan> {
        if self.state.disabled {
            return None;
        }
        self.gestures.cancel_inertia();
        let request = self.gestures.wheel(delta_y);
        self.request_rotation(request.delta, request.speed, false).ok()
    }

    /// Rotates the clicked slot to the center. Sentinels are not selectable.
    pub fn click_slot(&mut self, physical: usize) -> Option<RotationPlan> {
        if self.state.disabled {
            return None;
        }
        let slot = *self.ring.get(physical)?;
        if slot.is_sentinel() {
            return None;
        }
        self.gestures.cancel_inertia();
        let request = self.gestures.click(slot.depth);
        self.request_rotation(request.delta, request.speed, false).ok()
    }

    /// Applies every phase change that is due and returns the pending events.
    pub fn poll(&mut self) -> Vec<PickerEvent> {
        let now = self.clock.now();
        loop {
            if let Some(transition) = self.sequencer.advance(now) {
                self.apply_transition(transition);
                continue;
            }
            if !self.state.is_animating && std::mem::take(&mut self.inertia_due) {
                self.advance_inertia();
                continue;
            }
            break;
        }
        std::mem::take(&mut self.events)
    }

    pub fn frame(&self) -> Frame {
        let now = self.clock.now();
        let center = self
            .sequencer
            .center_at(now)
            .unwrap_or_else(|| self.ring.center(self.state.value, 0) as f64);
        let reach = (self.geometry.horizon + 1) as f64;

        let slots = self
            .ring
            .iter()
            .enumerate()
            .map(|(physical, slot)| (physical, slot, physical as f64 - center))
            .filter(|(_, _, position)| position.abs() <= reach)
            .map(|(physical, slot, position)| SlotView {
                physical,
                item: slot.item,
                depth: slot.depth,
                position,
                style: self.geometry.style_at(position),
                origin: Origin::for_depth(slot.depth),
            })
            .collect();

        Frame {
            slots,
            margin_em: self.geometry.margin_em,
            disabled: self.state.disabled,
            in_motion: self.ring.is_in_motion(),
        }
    }

    fn request_rotation(
        &mut self,
        delta: i64,
        speed: Duration,
        force: bool,
    ) -> Result<RotationPlan, Rejected> {
        if self.state.is_animating && !force {
            log::debug!("rotation by {} dropped: already animating", delta);
            return Err(Rejected::Busy);
        }
        while let Some(transition) = self.sequencer.interrupt() {
            self.apply_transition(transition);
        }
        // finishing the previous rotation may have applied an empty item list
        if self.state.length == 0 {
            return Err(Rejected::Empty);
        }

        let now = self.clock.now();
        let from = self.ring.center(self.state.value, 0) as f64;
        let plan = RotationPlan::new(
            self.state.value,
            self.state.length,
            self.state.infinite,
            delta,
            speed,
        );

        self.state.value = plan.target(self.state.value, self.state.length);
        self.state.is_animating = true;
        self.ring.begin_motion(self.state.value, plan.modded);
        let to = self.ring.center(self.state.value, plan.modded) as f64;
        self.sequencer.start(plan, now, from, to);

        Ok(plan)
    }

    fn apply_transition(&mut self, transition: Transition) {
        match transition {
            Transition::Settled { plan, end } => {
                if self.state.infinite {
                    self.ring.rotate(plan.modded, self.state.value);
                }
                if plan.modded != 0 {
                    let index = self.state.value;
                    self.events.push(PickerEvent::SelectionChanged {
                        index,
                        item: self.items.get(index).cloned(),
                    });
                }
                if let Some(AnimationEnd::ContinueInertia) = end {
                    self.inertia_due = true;
                }
            }
            Transition::Finalized => {
                self.state.is_animating = false;
                self.ring.settle(self.state.value);
                self.events.push(PickerEvent::RotationSettled {
                    value: self.state.value,
                });
                self.apply_deferred();
            }
        }
    }

    fn advance_inertia(&mut self) {
        while let Some(step) = self.gestures.inertia_step() {
            match step {
                InertiaStep::Rotate(request) => {
                    match self.request_rotation(request.delta, request.speed, false) {
                        Ok(_) => {}
                        // nothing to rotate; keep decaying until the momentum is spent
                        Err(Rejected::Empty) => continue,
                        Err(Rejected::Busy) => {}
                    }
                    self.sequencer.set_on_end(AnimationEnd::ContinueInertia);
                    return;
                }
                InertiaStep::Settled => {
                    log::debug!("inertia settled");
                    self.events.push(PickerEvent::InertiaSettled);
                    self.resolve_stop();
                    return;
                }
                InertiaStep::Stopped => {
                    log::debug!("inertia stopped");
                    self.resolve_stop();
                    return;
                }
            }
        }
    }

    fn resolve_stop(&mut self) {
        if std::mem::take(&mut self.stop_pending) {
            self.events.push(PickerEvent::InertiaStopped);
        }
    }

    fn apply_deferred(&mut self) {
        if self.deferred.is_empty() {
            return;
        }
        let deferred = std::mem::take(&mut self.deferred);
        if let Some(items) = deferred.items {
            self.replace_items(items);
        }
        if let Some(infinite) = deferred.infinite {
            self.state.infinite = infinite;
        }
        self.apply_value(deferred.value.unwrap_or(self.state.value as i64));
    }

    fn replace_items(&mut self, items: Vec<Label>) {
        self.state.length = items.len();
        self.items = items;
    }

    fn normalize(&self, value: i64) -> usize {
        let length = self.state.length as i64;
        if length == 0 {
            0
        } else if self.state.infinite {
            value.rem_euclid(length) as usize
        } else {
            value.clamp(0, length - 1) as usize
        }
    }

    fn apply_value(&mut self, value: i64) {
        self.state.value = self.normalize(value);
        self.ring = Ring::build(self.state.length, self.state.infinite, self.state.value);
        log::debug!(
            "ring rebuilt: {} items, {} slots, value {}",
            self.state.length,
            self.ring.len(),
            self.state.value
        );
    }
}
