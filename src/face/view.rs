use super::model::Face;
use super::{REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::gui::theme::FaceColors;
use cairo::Context;
use dial::geometry::{LabelPlacement, Point, Size};
use dial::store::Store;
use palette::Srgb;
use std::f64::consts::PI;

const LABEL_FONT_SIZE: f64 = 26.0;
const OVERLAY_FONT_SIZE: f64 = 14.0;
const OUTLINE_WIDTH: f64 = 1.0;

fn set_source(cr: &Context, color: Srgb<f64>) {
    let (r, g, b) = color.into_components();
    cr.set_source_rgb(r, g, b);
}

/// Draws the face into a `width` x `height` surface, scaled to fit and
/// centred.
pub fn draw<S: Store>(
    cr: &Context,
    face: &Face<S>,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let colors = FaceColors::from_prefs(face.prefs());

    set_source(cr, colors.background);
    cr.paint()?;

    let scale = (width / REFERENCE_WIDTH).min(height / REFERENCE_HEIGHT);
    cr.save()?;
    cr.translate(
        (width - REFERENCE_WIDTH * scale) / 2.0,
        (height - REFERENCE_HEIGHT * scale) / 2.0,
    );
    cr.scale(scale, scale);
    cr.rectangle(0.0, 0.0, REFERENCE_WIDTH, REFERENCE_HEIGHT);
    cr.clip();

    let geometry = face.geometry();
    let display = &face.prefs().display;

    set_source(cr, colors.dot);
    for tick in &geometry.ticks {
        cr.new_sub_path();
        cr.arc(
            tick.center.x as f64,
            tick.center.y as f64,
            tick.dot_radius as f64,
            0.0,
            2.0 * PI,
        );
    }
    cr.fill()?;

    draw_indicator(cr, &geometry.indicator.points(display.screen_center), &colors)?;

    set_source(cr, colors.hour);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(LABEL_FONT_SIZE);
    for label in [&geometry.hour_label, &geometry.next_hour_label] {
        draw_label(cr, label, display.label_box)?;
    }

    if let Some(text) = face.overlay_text() {
        cr.set_font_size(OVERLAY_FONT_SIZE);
        draw_centered(cr, &text.date, REFERENCE_WIDTH / 2.0, OVERLAY_FONT_SIZE + 4.0)?;
        draw_centered(cr, &text.time, REFERENCE_WIDTH / 2.0, REFERENCE_HEIGHT - 6.0)?;
    }

    cr.restore()
}

fn draw_indicator(cr: &Context, points: &[Point; 4], colors: &FaceColors) -> Result<(), cairo::Error> {
    let [first, rest @ ..] = points;
    cr.move_to(first.x as f64, first.y as f64);
    for p in rest {
        cr.line_to(p.x as f64, p.y as f64);
    }
    cr.close_path();

    set_source(cr, colors.hand);
    match colors.hand_outline {
        Some(outline) => {
            cr.fill_preserve()?;
            set_source(cr, outline);
            cr.set_line_width(OUTLINE_WIDTH);
            cr.stroke()
        }
        None => cr.fill(),
    }
}

fn draw_label(cr: &Context, label: &LabelPlacement, size: Size) -> Result<(), cairo::Error> {
    let cx = label.top_left.x as f64 + size.width as f64 / 2.0;
    let cy = label.top_left.y as f64 + size.height as f64 / 2.0;
    let ext = cr.text_extents(label.text.as_str())?;
    cr.move_to(cx - ext.width() / 2.0 - ext.x_bearing(), cy + ext.height() / 2.0);
    cr.show_text(label.text.as_str())
}

/// Text horizontally centred on `x` with its baseline at `baseline`.
fn draw_centered(cr: &Context, text: &str, x: f64, baseline: f64) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(x - ext.width() / 2.0 - ext.x_bearing(), baseline);
    cr.show_text(text)
}
