use egui::{PointerButton, Pos2, Response, Sense, Ui, Vec2, Widget};
use instant::Instant;
use log::trace;
use petgraph::stable_graph::NodeIndex;

use crate::{
    draw::{Drawer, Scene, SceneContext},
    events::{
        Event, EventSink, PayloadNodeHoverEnter, PayloadNodeHoverLeave, PayloadNodeSelect,
        PayloadPan, PayloadZoom,
    },
    settings::{SettingsInteraction, SettingsNavigation, SettingsStyle},
    state::InteractionSink,
    viewport::Gesture,
    TreeViewState, ViewTransform,
};

/// Widget for visualizing and exploring an attack tree.
///
/// It implements [`egui::Widget`] and can be used like any other widget.
///
/// The widget borrows a [`TreeViewState`] which owns the dataset, its
/// layout, the view transform and the selection. Every frame the widget reports
/// hover, click, drag and scroll input to the state through [`InteractionSink`],
/// advances a running zoom animation, derives a [`Scene`] and paints it.
///
/// Selection changes are sent as [`Event::NodeSelect`] to the sink provided via
/// `with_event_sink`, together with hover and navigation events. Zoom and pan
/// never change the layout, they only replace the view transform.
pub struct TreeView<'a> {
    state: &'a mut TreeViewState,

    settings_interaction: SettingsInteraction,
    settings_navigation: Option<SettingsNavigation>,
    settings_style: SettingsStyle,

    events_sink: Option<&'a dyn EventSink>,
}

impl Widget for &mut TreeView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let now = Instant::now();
        let (resp, p) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());

        self.sync_navigation(now);
        self.state
            .viewport_mut()
            .set_viewport_size(resp.rect.size());
        self.state.viewport_mut().tick(now);

        let scene = self.scene(&resp, now);
        self.handle_hover(ui, &resp, &scene);
        self.handle_click(&resp, &scene);
        self.handle_navigation(ui, &resp, now);
        self.publish_selection_change();

        // interactions above may have changed hover, selection or transform
        let scene = self.scene(&resp, now);
        Drawer::new(&p).draw(&scene);

        if self.state.viewport().is_animating() {
            ui.ctx().request_repaint();
        }

        resp
    }
}

impl<'a> TreeView<'a> {
    /// Creates a new `TreeView` widget with default interaction, navigation and style settings.
    pub fn new(state: &'a mut TreeViewState) -> Self {
        Self {
            state,

            settings_interaction: SettingsInteraction::default(),
            settings_navigation: None,
            settings_style: SettingsStyle::default(),

            events_sink: None,
        }
    }

    /// Supply a sink that will receive selection, hover and navigation events.
    pub fn with_event_sink(mut self, sink: &'a dyn EventSink) -> Self {
        self.events_sink = Some(sink);
        self
    }

    /// Makes widget interactive according to the provided settings.
    pub fn with_interactions(mut self, settings_interaction: &SettingsInteraction) -> Self {
        self.settings_interaction = settings_interaction.clone();
        self
    }

    /// Modifies default behaviour of navigation settings.
    pub fn with_navigations(mut self, settings_navigation: &SettingsNavigation) -> Self {
        self.settings_navigation = Some(settings_navigation.clone());
        self
    }

    /// Modifies default style settings.
    pub fn with_styles(mut self, settings_style: &SettingsStyle) -> Self {
        self.settings_style = settings_style.clone();
        self
    }

    fn sync_navigation(&mut self, now: Instant) {
        let Some(nav) = &self.settings_navigation else {
            return;
        };
        if self.state.viewport().settings() != nav {
            self.state.set_navigation(nav, now);
        }
    }

    /// Scene in screen coordinates: the view transform is widget-local, so
    /// it is shifted by the widget's top left corner before drawing.
    fn scene(&self, resp: &Response, now: Instant) -> Scene {
        let transform = self
            .state
            .transform(now)
            .translated(resp.rect.left_top().to_vec2());

        Scene::build(&SceneContext {
            tree: self.state.tree(),
            layout: self.state.layout(),
            transform,
            selected: self.state.selected(),
            hovered: self.state.hovered(),
            highlighted: self.state.highlighted(),
            style: &self.settings_style,
        })
    }

    fn handle_hover(&mut self, ui: &Ui, resp: &Response, scene: &Scene) {
        if !self.settings_interaction.hover_enabled {
            return;
        }

        let hovered_now = resp.hover_pos().and_then(|pos| scene.node_at(pos));
        if hovered_now.is_some() {
            ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
        }

        let prev = self.state.hovered();
        if !self.state.on_hover_change(hovered_now) {
            return;
        }

        if let Some(prev_idx) = prev {
            self.publish_event(Event::NodeHoverLeave(PayloadNodeHoverLeave {
                id: prev_idx.index(),
            }));
        }
        if let Some(cur_idx) = hovered_now {
            self.publish_event(Event::NodeHoverEnter(PayloadNodeHoverEnter {
                id: cur_idx.index(),
            }));
        }
    }

    fn handle_click(&mut self, resp: &Response, scene: &Scene) {
        if !resp.clicked() || !self.settings_interaction.node_selection_enabled {
            return;
        }

        // clicks on empty canvas keep the current selection
        let Some(idx) = resp.interact_pointer_pos().and_then(|pos| scene.node_at(pos)) else {
            return;
        };

        self.state.on_activate(idx);
    }

    fn handle_navigation(&mut self, ui: &Ui, resp: &Response, now: Instant) {
        if !self.state.viewport().settings().zoom_and_pan_enabled {
            return;
        }

        self.handle_zoom(ui, resp, now);
        self.handle_pan(resp, now);
    }

    fn handle_zoom(&mut self, ui: &Ui, resp: &Response, now: Instant) {
        if !resp.hovered() {
            return;
        }

        let speed = self.state.viewport().settings().wheel_zoom_speed;
        let (pinch, scroll, pointer) = ui.input(|i| {
            (
                i.zoom_delta(),
                i.smooth_scroll_delta.y,
                i.pointer.hover_pos(),
            )
        });

        let factor = if pinch == 1. {
            2f32.powf(scroll * speed)
        } else {
            pinch
        };

        let anchor = pointer.map_or_else(
            || (resp.rect.size() / 2.).to_pos2(),
            |p| local_pos(resp, p),
        );
        self.apply_gesture(Gesture::Zoom { factor, anchor }, now);
    }

    fn handle_pan(&mut self, resp: &Response, now: Instant) {
        if !(resp.dragged_by(PointerButton::Primary) || resp.dragged_by(PointerButton::Middle)) {
            return;
        }

        let delta = resp.drag_delta();
        if delta == Vec2::ZERO {
            return;
        }

        self.apply_gesture(Gesture::Pan { delta }, now);
    }

    fn apply_gesture(&mut self, gesture: Gesture, now: Instant) {
        let before = self.state.transform(now);
        if !self.state.on_gesture(gesture, now) {
            return;
        }
        let after = self.state.transform(now);
        trace!("view changed by {gesture:?}");

        self.publish_view_change(&before, &after);
    }

    fn publish_view_change(&self, before: &ViewTransform, after: &ViewTransform) {
        let diff = after.translate - before.translate;
        if diff != Vec2::ZERO {
            self.publish_event(Event::Pan(PayloadPan {
                diff: diff.into(),
                new_translate: after.translate.into(),
            }));
        }

        let scale_diff = after.scale - before.scale;
        if scale_diff != 0. {
            self.publish_event(Event::Zoom(PayloadZoom {
                diff: scale_diff,
                new_scale: after.scale,
            }));
        }
    }

    /// Reports selection changes made by clicks as well as resets made by
    /// the application between frames.
    fn publish_selection_change(&mut self) {
        if !self.state.take_selection_change() {
            return;
        }

        let selected = self.state.selected();
        self.publish_event(Event::NodeSelect(PayloadNodeSelect {
            id: selected.map(NodeIndex::index),
            node: self.state.selected_node(),
        }));
    }

    fn publish_event(&self, event: Event) {
        if let Some(sink) = self.events_sink {
            sink.send(event);
        }
    }
}

/// Convert a screen-space position to widget-local position
fn local_pos(resp: &Response, p: Pos2) -> Pos2 {
    (p - resp.rect.left_top()).to_pos2()
}
