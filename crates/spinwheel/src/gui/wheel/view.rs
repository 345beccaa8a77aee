use super::model::{WheelGeometry, WheelState};
use super::{
    HUB_RADIUS_FACTOR, LABEL_FONT_FACTOR, LABEL_START_FACTOR, PLACEHOLDER_TEXT, POINTER_SIZE,
    RIM_WIDTH,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;
use wheelkit::colors::HexColor;
use wheelkit::layout::Slice;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn set_slice_color(cr: &Context, color: HexColor) {
    let (r, g, b) = color.to_f64().into_components();
    cr.set_source_rgb(r, g, b);
}

struct SliceRenderer<'a> {
    slice: &'a Slice,
    color: HexColor,
    radius: f64,
}

impl<'a> SliceRenderer<'a> {
    /// Draws in the wheel's own frame: origin at the center, already rotated.
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_sector(cr)?;
        self.draw_label(cr, colors)
    }

    fn draw_sector(&self, cr: &Context) -> Result<(), cairo::Error> {
        cr.move_to(0.0, 0.0);
        cr.arc(
            0.0,
            0.0,
            self.radius,
            self.slice.start_angle.to_radians(),
            self.slice.end_angle.to_radians(),
        );
        cr.close_path();
        set_slice_color(cr, self.color);
        cr.fill()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.rotate(self.slice.label_angle.to_radians());
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size((self.radius * LABEL_FONT_FACTOR).max(9.0));

        if let Ok(ext) = cr.text_extents(&self.slice.label) {
            let x = self.radius * LABEL_START_FACTOR;
            let y = ext.height() / 2.0;

            // light halo keeps dark text readable on dark slices
            cr.move_to(x, y);
            cr.text_path(&self.slice.label);
            set_color(cr, colors.label_halo);
            cr.set_line_width(3.0);
            cr.stroke()?;

            cr.move_to(x, y);
            set_color(cr, colors.label);
            cr.show_text(&self.slice.label)?;
        }
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    state: &WheelState,
    geometry: &WheelGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if state.slices.is_empty() {
        draw_placeholder(cr, geometry, colors)?;
    } else {
        draw_wheel(cr, state, geometry, colors)?;
    }
    draw_hub(cr, geometry, colors)?;
    draw_pointer(cr, state.pointer.as_ref(), geometry, colors)
}

fn draw_wheel(
    cr: &Context,
    state: &WheelState,
    geometry: &WheelGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.translate(geometry.center.x, geometry.center.y);
    cr.rotate(state.rotation.to_radians());

    for slice in &state.slices {
        SliceRenderer {
            slice,
            color: state.colors.color_for(slice.index),
            radius: geometry.radius,
        }
        .draw(cr, colors)?;
    }
    cr.restore()?;

    draw_rim(cr, geometry, colors)
}

fn draw_rim(cr: &Context, geometry: &WheelGeometry, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.rim);
    cr.set_line_width(RIM_WIDTH);
    cr.arc(
        geometry.center.x,
        geometry.center.y,
        geometry.radius,
        0.0,
        2.0 * PI,
    );
    cr.stroke()
}

fn draw_placeholder(
    cr: &Context,
    geometry: &WheelGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.placeholder);
    cr.arc(
        geometry.center.x,
        geometry.center.y,
        geometry.radius,
        0.0,
        2.0 * PI,
    );
    cr.fill()?;
    draw_rim(cr, geometry, colors)?;

    set_color(cr, colors.text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(16.0);
    if let Ok(ext) = cr.text_extents(PLACEHOLDER_TEXT) {
        cr.move_to(
            geometry.center.x - ext.width() / 2.0,
            geometry.center.y + geometry.radius / 2.0,
        );
        cr.show_text(PLACEHOLDER_TEXT)?;
    }
    Ok(())
}

fn draw_hub(cr: &Context, geometry: &WheelGeometry, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let radius = geometry.radius * HUB_RADIUS_FACTOR;
    cr.arc(geometry.center.x, geometry.center.y, radius, 0.0, 2.0 * PI);
    set_color(cr, colors.hub);
    cr.fill_preserve()?;
    set_color(cr, colors.rim);
    cr.set_line_width(4.0);
    cr.stroke()
}

fn draw_pointer(
    cr: &Context,
    image: Option<&Pixbuf>,
    geometry: &WheelGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let tip = geometry.pointer_tip();

    if let Some(pixbuf) = image {
        let (w, h) = (pixbuf.width() as f64, pixbuf.height() as f64);
        cr.save()?;
        // image bottom overlaps the rim slightly
        cr.translate(tip.x - w / 2.0, tip.y - h * 0.6);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        return cr.restore();
    }

    let half = POINTER_SIZE / 4.0;
    cr.move_to(tip.x, tip.y + half);
    cr.line_to(tip.x - half, tip.y - half * 1.4);
    cr.line_to(tip.x + half, tip.y - half * 1.4);
    cr.close_path();
    set_color(cr, colors.pointer);
    cr.fill()
}
