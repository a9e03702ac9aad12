use std::time::Duration;

use egui::Color32;

/// Smallest scale a view can ever have. Keeps screen to canvas mapping finite.
pub const MIN_SCALE_FLOOR: f32 = 1e-3;

/// Represents graph interaction settings.
#[derive(Debug, Clone)]
pub struct SettingsInteraction {
    /// Emphasize the node under the pointer.
    pub hover_enabled: bool,

    /// Clicking a node makes it the selected node.
    pub node_selection_enabled: bool,
}

impl Default for SettingsInteraction {
    fn default() -> Self {
        Self {
            hover_enabled: true,
            node_selection_enabled: true,
        }
    }
}

impl SettingsInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hover_enabled(mut self, enabled: bool) -> Self {
        self.hover_enabled = enabled;
        self
    }

    pub fn with_node_selection_enabled(mut self, enabled: bool) -> Self {
        self.node_selection_enabled = enabled;
        self
    }
}

/// Represents zoom and pan settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsNavigation {
    /// Drag to pan, scroll or pinch to zoom.
    pub zoom_and_pan_enabled: bool,

    /// Lower bound of the scale.
    pub min_scale: f32,

    /// Upper bound of the scale.
    pub max_scale: f32,

    /// Scale multiplier applied by the zoom in button.
    pub zoom_in_factor: f32,

    /// Scale multiplier applied by the zoom out button.
    pub zoom_out_factor: f32,

    /// Duration of zoom in and zoom out animations.
    pub zoom_duration: Duration,

    /// Duration of the reset animation.
    pub reset_duration: Duration,

    /// Scale change per scroll unit for wheel zooming.
    pub wheel_zoom_speed: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self {
            zoom_and_pan_enabled: true,
            min_scale: 0.1,
            max_scale: 3.,
            zoom_in_factor: 1.5,
            zoom_out_factor: 0.667,
            zoom_duration: Duration::from_millis(300),
            reset_duration: Duration::from_millis(500),
            wheel_zoom_speed: 0.002,
        }
    }
}

impl SettingsNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zoom_and_pan_enabled(mut self, enabled: bool) -> Self {
        self.zoom_and_pan_enabled = enabled;
        self
    }

    /// Sets the scale bounds. The bounds are ordered and the lower one is
    /// kept above [`MIN_SCALE_FLOOR`].
    pub fn with_scale_range(mut self, min: f32, max: f32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.min_scale = lo.max(MIN_SCALE_FLOOR);
        self.max_scale = hi.max(self.min_scale);
        self
    }

    pub fn with_zoom_factors(mut self, zoom_in: f32, zoom_out: f32) -> Self {
        self.zoom_in_factor = zoom_in;
        self.zoom_out_factor = zoom_out;
        self
    }

    pub fn with_durations(mut self, zoom: Duration, reset: Duration) -> Self {
        self.zoom_duration = zoom;
        self.reset_duration = reset;
        self
    }

    pub fn with_wheel_zoom_speed(mut self, speed: f32) -> Self {
        self.wheel_zoom_speed = speed;
        self
    }

    /// Clamps `scale` into the configured range. Never returns a scale below
    /// [`MIN_SCALE_FLOOR`], even when the public bounds were set out of order.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        let min = self.min_scale.max(MIN_SCALE_FLOOR);
        let max = self.max_scale.max(min);
        scale.max(min).min(max)
    }
}

/// Represents node and link appearance.
#[derive(Debug, Clone)]
pub struct SettingsStyle {
    /// Labels longer than this many characters are cut and end with `...`.
    pub label_max_chars: usize,

    /// Node boxes are never narrower than this.
    pub min_node_width: f32,

    /// Width one label character adds to a node box.
    pub char_width: f32,

    /// Horizontal padding added to the label width.
    pub label_padding: f32,

    pub node_height: f32,
    pub node_rounding: f32,
    pub font_size: f32,
    pub label_color: Color32,

    pub node_stroke_color: Color32,
    pub node_stroke_width: f32,
    pub node_stroke_width_hovered: f32,
    pub node_opacity: f32,
    pub node_opacity_hovered: f32,

    /// Outline of the selected node.
    pub selected_stroke_color: Color32,

    /// Outline of nodes matching the current search.
    pub highlight_stroke_color: Color32,

    pub link_color: Color32,
    pub link_width: f32,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            label_max_chars: 15,
            min_node_width: 100.,
            char_width: 8.,
            label_padding: 20.,
            node_height: 40.,
            node_rounding: 8.,
            font_size: 12.,
            label_color: Color32::WHITE,
            node_stroke_color: Color32::WHITE,
            node_stroke_width: 2.,
            node_stroke_width_hovered: 3.,
            node_opacity: 0.9,
            node_opacity_hovered: 1.,
            selected_stroke_color: Color32::from_rgb(0x1e, 0x29, 0x3b),
            highlight_stroke_color: Color32::from_rgb(0x25, 0x63, 0xeb),
            link_color: Color32::from_rgb(0xcb, 0xd5, 0xe0),
            link_width: 2.,
        }
    }
}

impl SettingsStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_max_chars(mut self, max: usize) -> Self {
        self.label_max_chars = max;
        self
    }

    pub fn with_min_node_width(mut self, width: f32) -> Self {
        self.min_node_width = width;
        self
    }

    pub fn with_link_color(mut self, color: Color32) -> Self {
        self.link_color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_range_is_ordered() {
        let s = SettingsNavigation::default().with_scale_range(4., 0.5);
        assert_eq!((s.min_scale, s.max_scale), (0.5, 4.));
        assert_eq!(s.clamp_scale(10.), 4.);
    }

    #[test]
    fn test_scale_range_has_positive_floor() {
        let s = SettingsNavigation::default().with_scale_range(0., 2.);
        assert_eq!(s.min_scale, MIN_SCALE_FLOOR);
        assert_eq!(s.clamp_scale(0.), MIN_SCALE_FLOOR);
    }

    #[test]
    fn test_clamp_tolerates_inverted_public_bounds() {
        let s = SettingsNavigation {
            min_scale: 2.,
            max_scale: 1.,
            ..SettingsNavigation::default()
        };
        assert_eq!(s.clamp_scale(0.5), 2.);
        assert_eq!(s.clamp_scale(5.), 2.);
    }
}
