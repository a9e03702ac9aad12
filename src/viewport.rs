use std::time::Duration;

use egui::{Pos2, Vec2};
use instant::Instant;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::{SettingsNavigation, ViewTransform};

/// Continuous pointer input applied synchronously to the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gesture {
    /// Drag by `delta` screen units.
    Pan { delta: Vec2 },
    /// Multiply the scale by `factor` keeping `anchor` (screen coordinates) fixed.
    Zoom { factor: f32, anchor: Pos2 },
}

impl Gesture {
    pub fn is_noop(&self) -> bool {
        match self {
            Gesture::Pan { delta } => *delta == Vec2::ZERO,
            Gesture::Zoom { factor, .. } => *factor == 1.,
        }
    }
}

/// Cubic in-out easing of `t` in `[0, 1]`.
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0., 1.);
    if t < 0.5 {
        4. * t * t * t
    } else {
        1. - (-2. * t + 2.).powi(3) / 2.
    }
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: ViewTransform,
    to: ViewTransform,
    start: Instant,
    duration: Duration,
}

impl Animation {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.;
        }
        if now <= self.start {
            return 0.;
        }
        ((now - self.start).as_secs_f32() / self.duration.as_secs_f32()).min(1.)
    }

    fn at(&self, now: Instant) -> ViewTransform {
        let t = self.progress(now);
        if t >= 1. {
            return self.to;
        }
        self.from.lerp(&self.to, ease_cubic_in_out(t))
    }

    fn finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.
    }
}

/// Owns the view transform and the single in-flight animation.
///
/// Every operation starts from the transform visible at `now`, so a new zoom,
/// reset or gesture issued mid-animation abandons the running interpolation
/// instead of stacking on top of it. Scale is clamped on every path, translate
/// is never bounded.
#[derive(Debug, Clone)]
pub struct ViewportController {
    settings: SettingsNavigation,
    initial: ViewTransform,
    transform: ViewTransform,
    animation: Option<Animation>,
    viewport: Vec2,
}

impl ViewportController {
    pub fn new(initial: ViewTransform, settings: &SettingsNavigation) -> Self {
        let initial = ViewTransform::new(initial.translate, settings.clamp_scale(initial.scale));
        Self {
            settings: settings.clone(),
            initial,
            transform: initial,
            animation: None,
            viewport: Vec2::ZERO,
        }
    }

    pub fn settings(&self) -> &SettingsNavigation {
        &self.settings
    }

    /// Replaces navigation settings. A running animation stops where it is
    /// at `now` and the visible transform is re-clamped.
    pub fn set_settings(&mut self, settings: &SettingsNavigation, now: Instant) {
        self.transform = self.current(now);
        self.animation = None;
        self.settings = settings.clone();
        self.initial.scale = self.settings.clamp_scale(self.initial.scale);
        self.transform.scale = self.settings.clamp_scale(self.transform.scale);
    }

    pub fn initial(&self) -> ViewTransform {
        self.initial
    }

    pub fn scale_extent(&self) -> (f32, f32) {
        (self.settings.min_scale, self.settings.max_scale)
    }

    /// Size of the drawing surface, used as the zoom center for button zooms.
    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport = size;
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Transform visible at `now`.
    pub fn current(&self, now: Instant) -> ViewTransform {
        self.animation.map_or(self.transform, |a| a.at(now))
    }

    /// Transform the view settles on once the running animation completes.
    pub fn target(&self) -> ViewTransform {
        self.animation.map_or(self.transform, |a| a.to)
    }

    /// Advances the running animation and drops it once it is complete.
    pub fn tick(&mut self, now: Instant) -> ViewTransform {
        if let Some(a) = self.animation {
            self.transform = a.at(now);
            if a.finished(now) {
                self.animation = None;
            }
        }
        self.transform
    }

    pub fn zoom_in(&mut self, now: Instant) -> ViewTransform {
        self.zoom_by(self.settings.zoom_in_factor, now)
    }

    pub fn zoom_out(&mut self, now: Instant) -> ViewTransform {
        self.zoom_by(self.settings.zoom_out_factor, now)
    }

    /// Animates the scale by `factor` around the viewport center. Returns the target.
    ///
    /// The animation starts from the visible transform, but the factor applies
    /// to the pending target so that quick successive zooms compound.
    pub fn zoom_by(&mut self, factor: f32, now: Instant) -> ViewTransform {
        let base = self.current(now);
        let pending = self.target();
        let scale = self.settings.clamp_scale(pending.scale * factor);
        let center = (self.viewport / 2.).to_pos2();
        let target = pending.scaled_at(scale, center);

        self.animate(base, target, self.settings.zoom_duration, now);
        target
    }

    /// Animates back to the initial transform. Returns the target.
    pub fn reset_view(&mut self, now: Instant) -> ViewTransform {
        let base = self.current(now);
        let target = self.initial;

        self.animate(base, target, self.settings.reset_duration, now);
        target
    }

    /// Applies a gesture immediately, cancelling any animation.
    ///
    /// Returns `false` when the gesture changes nothing.
    pub fn on_gesture(&mut self, gesture: Gesture, now: Instant) -> bool {
        if gesture.is_noop() {
            return false;
        }

        let base = self.current(now);
        self.animation = None;
        self.transform = match gesture {
            Gesture::Pan { delta } => base.translated(delta),
            Gesture::Zoom { factor, anchor } => {
                base.scaled_at(self.settings.clamp_scale(base.scale * factor), anchor)
            }
        };

        trace!("gesture {gesture:?} -> {:?}", self.transform);

        self.transform != base
    }

    /// Jumps to `transform` without animating.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.animation = None;
        self.transform = ViewTransform::new(
            transform.translate,
            self.settings.clamp_scale(transform.scale),
        );
    }

    fn animate(
        &mut self,
        from: ViewTransform,
        to: ViewTransform,
        duration: Duration,
        now: Instant,
    ) {
        trace!("animating view {from:?} -> {to:?} over {duration:?}");

        self.transform = from;
        self.animation = Some(Animation {
            from,
            to,
            start: now,
            duration,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewportController {
        let mut c = ViewportController::new(
            ViewTransform::new(Vec2::new(50., 50.), 1.),
            &SettingsNavigation::default(),
        );
        c.set_viewport_size(Vec2::new(1200., 800.));
        c
    }

    fn after(now: Instant, ms: u64) -> Instant {
        now + Duration::from_millis(ms)
    }

    #[test]
    fn test_easing_ends_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.), 0.);
        assert_eq!(ease_cubic_in_out(1.), 1.);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert!(ease_cubic_in_out(0.25) < 0.25);
    }

    #[test]
    fn test_zoom_in_animates_to_target() {
        let mut c = controller();
        let t0 = Instant::now();
        let target = c.zoom_in(t0);

        assert_eq!(target.scale, 1.5);
        assert!(c.is_animating());
        assert_eq!(c.current(t0).scale, 1.);

        let mid = c.tick(after(t0, 150));
        assert!(mid.scale > 1. && mid.scale < 1.5);

        let end = c.tick(after(t0, 300));
        assert_eq!(end, target);
        assert!(!c.is_animating());
    }

    #[test]
    fn test_zoom_keeps_viewport_center_fixed() {
        let mut c = controller();
        let t0 = Instant::now();
        let before = c.current(t0);
        let center = Pos2::new(600., 400.);
        let canvas_center = before.screen_to_canvas_pos(center);

        let target = c.zoom_in(t0);
        let moved = target.canvas_to_screen_pos(canvas_center);
        assert!((moved - center).length() < 1e-3);
    }

    #[test]
    fn test_new_zoom_starts_from_mid_animation_transform() {
        let mut c = controller();
        let t0 = Instant::now();
        c.zoom_in(t0);
        let mid_time = after(t0, 150);
        let mid = c.current(mid_time);

        c.zoom_out(mid_time);
        assert_eq!(c.current(mid_time), mid);
        assert!((c.target().scale - 1.5 * 0.667).abs() < 1e-5);
    }

    #[test]
    fn test_zooms_at_the_same_instant_compound() {
        let mut c = controller();
        let t0 = Instant::now();
        c.zoom_in(t0);
        c.zoom_out(t0);

        let end = c.tick(after(t0, 1000));
        assert!((end.scale - 1.5 * 0.667).abs() < 1e-5);
    }

    #[test]
    fn test_compounded_zoom_keeps_viewport_center_fixed() {
        let mut c = controller();
        let t0 = Instant::now();
        let center = Pos2::new(600., 400.);
        let canvas_center = c.current(t0).screen_to_canvas_pos(center);

        c.zoom_in(t0);
        let target = c.zoom_in(after(t0, 16));
        let moved = target.canvas_to_screen_pos(canvas_center);
        assert!((moved - center).length() < 1e-3);
    }

    #[test]
    fn test_set_settings_keeps_visible_transform() {
        let mut c = controller();
        let t0 = Instant::now();
        c.zoom_in(t0);
        let now = after(t0, 150);
        let visible = c.current(now);

        c.set_settings(&SettingsNavigation::default(), now);
        assert!(!c.is_animating());
        assert_eq!(c.current(now), visible);
    }

    #[test]
    fn test_set_settings_clamps_visible_scale() {
        let mut c = controller();
        let t0 = Instant::now();
        c.set_transform(ViewTransform::new(Vec2::ZERO, 2.5));

        c.set_settings(&SettingsNavigation::default().with_scale_range(0.5, 2.), t0);
        assert_eq!(c.current(t0).scale, 2.);
    }

    #[test]
    fn test_reset_returns_to_initial() {
        let mut c = controller();
        let t0 = Instant::now();
        c.on_gesture(
            Gesture::Pan {
                delta: Vec2::new(-300., 120.),
            },
            t0,
        );
        c.on_gesture(
            Gesture::Zoom {
                factor: 2.,
                anchor: Pos2::new(10., 10.),
            },
            t0,
        );

        let target = c.reset_view(t0);
        assert_eq!(target, c.initial());
        assert!(c.tick(after(t0, 250)).scale > 1.);
        assert_eq!(c.tick(after(t0, 500)), c.initial());
    }

    #[test]
    fn test_gesture_cancels_animation() {
        let mut c = controller();
        let t0 = Instant::now();
        c.zoom_in(t0);
        let now = after(t0, 100);
        let visible = c.current(now);

        assert!(c.on_gesture(
            Gesture::Pan {
                delta: Vec2::new(5., 0.),
            },
            now,
        ));
        assert!(!c.is_animating());
        assert_eq!(c.current(now), visible.translated(Vec2::new(5., 0.)));
    }

    #[test]
    fn test_zero_gesture_is_noop() {
        let mut c = controller();
        let t0 = Instant::now();
        c.zoom_in(t0);

        assert!(!c.on_gesture(Gesture::Pan { delta: Vec2::ZERO }, t0));
        assert!(!c.on_gesture(
            Gesture::Zoom {
                factor: 1.,
                anchor: Pos2::ZERO,
            },
            t0,
        ));
        assert!(c.is_animating());
    }

    #[test]
    fn test_gesture_zoom_is_clamped() {
        let mut c = controller();
        let t0 = Instant::now();
        c.on_gesture(
            Gesture::Zoom {
                factor: 100.,
                anchor: Pos2::new(100., 100.),
            },
            t0,
        );
        assert_eq!(c.current(t0).scale, 3.);

        c.on_gesture(
            Gesture::Zoom {
                factor: 1e-6,
                anchor: Pos2::new(100., 100.),
            },
            t0,
        );
        assert_eq!(c.current(t0).scale, 0.1);
    }

    #[test]
    fn test_pan_is_unbounded() {
        let mut c = controller();
        let t0 = Instant::now();
        c.on_gesture(
            Gesture::Pan {
                delta: Vec2::new(-1e6, 1e6),
            },
            t0,
        );
        assert_eq!(c.current(t0).translate, Vec2::new(50. - 1e6, 50. + 1e6));
    }

    #[test]
    fn test_set_transform_clamps_scale() {
        let mut c = controller();
        c.set_transform(ViewTransform::new(Vec2::ZERO, 10.));
        assert_eq!(c.target().scale, 3.);
    }
}
