use crate::gui::wheel::{MIN_RADIUS, POINTER_SIZE, WHEEL_MARGIN};
use gdk_pixbuf::Pixbuf;
use std::path::Path;
use wheelkit::colors::SliceColors;
use wheelkit::layout::{self, Slice};
use wheelkit::spin::landing_angle;
use wheelkit::{OptionError, OptionList};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the wheel sits inside the drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center: Point,
    pub radius: f64,
}

impl WheelGeometry {
    /// Largest wheel that fits `width` x `height` with room for the pointer.
    pub fn fit(width: f64, height: f64) -> Self {
        let radius = (width.min(height) / 2.0 - WHEEL_MARGIN).max(MIN_RADIUS);
        Self {
            center: Point::new(width / 2.0, height / 2.0 + WHEEL_MARGIN / 4.0),
            radius,
        }
    }

    /// Screen position of the top of the rim, where the pointer tip rests.
    pub fn pointer_tip(&self) -> Point {
        Point::new(self.center.x, self.center.y - self.radius)
    }
}

pub struct WheelState {
    pub items: OptionList,
    pub slices: Vec<Slice>,
    /// Current displayed rotation in degrees, clockwise.
    pub rotation: f64,
    pub colors: SliceColors,
    pub pointer: Option<Pixbuf>,
}

impl WheelState {
    pub fn new(items: OptionList, colors: SliceColors, pointer: Option<Pixbuf>) -> Self {
        let slices = layout::layout(items.as_slice());
        Self {
            items,
            slices,
            rotation: 0.0,
            colors,
            pointer,
        }
    }

    pub fn load_pointer(path: &Path) -> Option<Pixbuf> {
        let size = POINTER_SIZE as i32;
        Pixbuf::from_file_at_scale(path, size, size, true)
            .map_err(|e| log::warn!("Failed to load pointer image {}: {}", path.display(), e))
            .ok()
    }

    pub fn add(&mut self, raw: &str) -> Result<String, OptionError> {
        let added = self.items.add(raw)?.to_string();
        self.relayout();
        Ok(added)
    }

    pub fn remove(&mut self, index: usize) -> Result<String, OptionError> {
        let removed = self.items.remove(index)?;
        self.relayout();
        Ok(removed)
    }

    fn relayout(&mut self) {
        self.slices = layout::layout(self.items.as_slice());
    }

    /// Index of the option currently under the pointer.
    pub fn slice_under_pointer(&self) -> Option<usize> {
        layout::slice_at(landing_angle(self.rotation), self.slices.len())
    }

    pub fn option_under_pointer(&self) -> Option<&str> {
        self.slice_under_pointer().and_then(|i| self.items.get(i))
    }
}
