use egui::{
    epaint::CubicBezierShape, Align2, Color32, FontFamily, FontId, Painter, Shape, StrokeKind,
};

use super::{LinkShape, NodeShape, Scene};

/// Paints a [`Scene`] with an egui painter.
pub struct Drawer<'a> {
    painter: &'a Painter,
}

impl<'a> Drawer<'a> {
    pub fn new(painter: &'a Painter) -> Self {
        Drawer { painter }
    }

    pub fn draw(&self, scene: &Scene) {
        scene.links.iter().for_each(|l| self.draw_link(l));
        scene.nodes.iter().for_each(|n| self.draw_node(n));
    }

    fn draw_link(&self, link: &LinkShape) {
        self.painter.add(Shape::CubicBezier(CubicBezierShape::from_points_stroke(
            link.points,
            false,
            Color32::TRANSPARENT,
            link.stroke,
        )));
    }

    fn draw_node(&self, node: &NodeShape) {
        self.painter.rect(
            node.rect,
            node.rounding,
            node.fill,
            node.stroke,
            StrokeKind::Middle,
        );
        self.painter.text(
            node.rect.center(),
            Align2::CENTER_CENTER,
            &node.label,
            FontId::new(node.font_size, FontFamily::Proportional),
            node.label_color,
        );
    }
}
