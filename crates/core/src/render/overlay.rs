use crate::{
    render::{Canvas, RenderConfig},
    util::unit::{Color3, Point2},
};

/// Draw a horizontal progress bar centred on a point, one tile wide.
/// `fraction` is how full the bar is, and is clamped to `[0, 1]`.
pub fn draw_bar(
    canvas: &mut dyn Canvas,
    config: &RenderConfig,
    center: Point2,
    zoom: f64,
    fraction: f64,
    fill: Color3,
) {
    let width = zoom;
    let height = zoom * 0.1;
    let origin = Point2::new(center.x - width / 2.0, center.y - height / 2.0);

    canvas.fill_rect(origin, width, height, config.bar_background);
    canvas.fill_rect(origin, width * fraction.clamp(0.0, 1.0), height, fill);
    canvas.stroke_rect(origin, width, height, config.bar_border);
}
