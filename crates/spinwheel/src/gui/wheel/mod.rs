pub mod model;
pub mod view;

pub use model::{Point, WheelGeometry, WheelState};
pub use view::draw;

pub const WHEEL_MARGIN: f64 = 36.0; // room for the pointer above the rim
pub const MIN_RADIUS: f64 = 40.0;
pub const RIM_WIDTH: f64 = 8.0;
pub const HUB_RADIUS_FACTOR: f64 = 0.14;
pub const LABEL_START_FACTOR: f64 = 0.3; // labels begin this far out from the hub
pub const LABEL_FONT_FACTOR: f64 = 0.055;
pub const POINTER_SIZE: f64 = 56.0;
pub const PLACEHOLDER_TEXT: &str = "Add options to build the wheel!";
