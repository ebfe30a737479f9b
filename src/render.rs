//! Heart renderer
//! Clears the surface and paints every heart glyph in field order

use crate::hearts::HeartField;
use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, Vec2};

/// One glyph to paint, in surface-local coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphDraw {
    pub center: Pos2,
    pub size: f32,
    pub rotation: f32,
    pub color: Color32,
    pub glyph: &'static str,
    pub opacity: f32,
}

/// Drawing surface the renderer paints onto
pub trait HeartCanvas {
    fn clear(&mut self, size: Vec2);
    fn draw_glyph(&mut self, glyph: &GlyphDraw);
}

pub fn render(canvas: &mut impl HeartCanvas, field: Option<&HeartField>, size: Vec2) {
    canvas.clear(size);

    let Some(field) = field else {
        return;
    };

    for heart in field.hearts() {
        canvas.draw_glyph(&GlyphDraw {
            center: heart.position,
            size: heart.size,
            rotation: heart.rotation,
            color: heart.color.color32(),
            glyph: heart.glyph.as_str(),
            opacity: heart.opacity,
        });
    }
}

/// egui painter adapter; surface coordinates start at `origin`
pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    origin: Pos2,
    background: Color32,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2, background: Color32) -> Self {
        Self {
            painter,
            origin,
            background,
        }
    }
}

impl HeartCanvas for PainterCanvas<'_> {
    fn clear(&mut self, size: Vec2) {
        let rect = Rect::from_min_size(self.origin, size);
        self.painter.rect_filled(rect, 0.0, self.background);
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw) {
        let color = glyph.color.gamma_multiply(glyph.opacity.clamp(0.0, 1.0));
        let galley = self.painter.layout_no_wrap(
            glyph.glyph.to_string(),
            FontId::proportional(glyph.size),
            color,
        );

        // Text shapes rotate around their top-left corner; shift so the
        // rotation happens around the glyph's center instead.
        let half = galley.size() / 2.0;
        let center = self.origin + glyph.center.to_vec2();
        let pos = center - Rot2::from_angle(glyph.rotation) * half;

        self.painter
            .add(TextShape::new(pos, galley, color).with_angle(glyph.rotation));
    }
}
