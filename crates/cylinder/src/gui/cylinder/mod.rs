pub mod model;
pub mod view;

pub use model::{Point, State};
pub use view::draw;

pub const FONT_SIZE: f64 = 16.0;
pub const ITEM_HEIGHT_EM: f64 = 1.725; // line height plus vertical padding
pub const ITEM_PADDING_EM: f64 = 0.625;
pub const WHEEL_STEP: f64 = 100.0; // GTK reports one wheel notch as 1.0
pub const DRAG_SLOP: f64 = 4.0; // drags shorter than this still count as clicks
pub const DISABLED_ALPHA: f64 = 0.5;
