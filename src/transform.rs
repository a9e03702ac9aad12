use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Pan and zoom applied to the whole layout at draw time.
///
/// A transform is a value: controllers replace it on every change so that
/// animations can interpolate between two of them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub translate: Vec2,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.,
        }
    }
}

impl ViewTransform {
    pub fn new(translate: Vec2, scale: f32) -> Self {
        Self { translate, scale }
    }

    pub fn canvas_to_screen_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.scale + self.translate).to_pos2()
    }

    pub fn canvas_to_screen_size(&self, size: f32) -> f32 {
        size * self.scale
    }

    pub fn screen_to_canvas_pos(&self, pos: Pos2) -> Pos2 {
        ((pos.to_vec2() - self.translate) / self.scale).to_pos2()
    }

    /// Same transform moved by `delta` screen units.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.translate + delta, self.scale)
    }

    /// Transform with `scale` that keeps `anchor` (screen coordinates) in place.
    pub fn scaled_at(&self, scale: f32, anchor: Pos2) -> Self {
        let canvas_anchor = self.screen_to_canvas_pos(anchor);
        let translate = anchor.to_vec2() - canvas_anchor.to_vec2() * scale;
        Self::new(translate, scale)
    }

    /// Component-wise interpolation, `t` in `[0, 1]`.
    pub fn lerp(&self, to: &ViewTransform, t: f32) -> Self {
        Self::new(
            self.translate + (to.translate - self.translate) * t,
            self.scale + (to.scale - self.scale) * t,
        )
    }
}
