//! Selection and rotation engine for a cylinder picker: a vertical list drawn
//! as if wrapped around a drum, rotated by clicks, drags, and the wheel.

pub mod attribute;
pub mod clock;
pub mod command;
pub mod delta;
pub mod geometry;
pub mod gesture;
pub mod label;
pub mod picker;
pub mod ring;
pub mod sequencer;

pub use attribute::{Attribute, AttributeName};
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::Command;
pub use geometry::{Geometry, SlotStyle};
pub use gesture::GestureConfig;
pub use label::Label;
pub use picker::{
    Frame, InertiaStop, Picker, PickerConfig, PickerEvent, PickerState, RotateOptions, SlotView,
};
pub use sequencer::{Rejected, RotationPlan};
