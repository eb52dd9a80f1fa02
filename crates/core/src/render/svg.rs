use crate::{
    config::Viewport,
    render::Canvas,
    util::unit::{Color3, Point2},
};
use svg::{
    node::{
        element::{Line, Polygon, Rectangle},
        Comment,
    },
    Document, Node,
};

/// A canvas that builds up an SVG document, one element per draw call. The
/// view box matches the viewport, so the SVG looks the same as a frame drawn
/// to the screen would.
#[derive(Debug)]
pub struct SvgCanvas {
    document: Document,
}

impl SvgCanvas {
    pub fn new(viewport: Viewport) -> Self {
        let document = Document::new()
            .set("viewBox", (0, 0, viewport.width, viewport.height))
            .set("width", viewport.width)
            .set("height", viewport.height);
        Self { document }
    }

    /// Add a comment to the document, e.g. the config the frame was drawn
    /// with
    pub fn comment(&mut self, text: impl Into<String>) {
        self.document.append(Comment::new(text));
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl Canvas for SvgCanvas {
    fn fill_polygon(&mut self, points: &[Point2], color: Color3) {
        if points.len() < 3 {
            return;
        }
        self.document.append(
            Polygon::new()
                .set(
                    "points",
                    points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(),
                )
                .set("fill", color.to_html()),
        );
    }

    fn draw_line(&mut self, start: Point2, end: Point2, color: Color3) {
        self.document.append(
            Line::new()
                .set("x1", start.x)
                .set("y1", start.y)
                .set("x2", end.x)
                .set("y2", end.y)
                .set("stroke", color.to_html()),
        );
    }

    fn fill_rect(
        &mut self,
        origin: Point2,
        width: f64,
        height: f64,
        color: Color3,
    ) {
        self.document.append(
            Rectangle::new()
                .set("x", origin.x)
                .set("y", origin.y)
                .set("width", width)
                .set("height", height)
                .set("fill", color.to_html()),
        );
    }

    fn stroke_rect(
        &mut self,
        origin: Point2,
        width: f64,
        height: f64,
        color: Color3,
    ) {
        self.document.append(
            Rectangle::new()
                .set("x", origin.x)
                .set("y", origin.y)
                .set("width", width)
                .set("height", height)
                .set("fill", "none")
                .set("stroke", color.to_html()),
        );
    }
}
