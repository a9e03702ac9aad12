use attack_tree_view::{
    events::Event, AttackNode, AttackTree, NodeKind, TreeView, TreeViewState,
};
use crossbeam::channel::{unbounded, Receiver, Sender};
use eframe::{App, CreationContext, Frame};
use egui::{
    CentralPanel, Color32, Context, RichText, ScrollArea, Sense, SidePanel, TextEdit,
    TopBottomPanel, Ui, Vec2,
};
use instant::Instant;
use log::info;

const HINT: &str = "Click on nodes to explore the attack tree. Drag to pan, scroll to zoom.";
const SIDE_PANEL_WIDTH: f32 = 300.;
const LEGEND_SWATCH: f32 = 12.;

pub struct AttackTreeApp {
    state: TreeViewState,

    event_publisher: Sender<Event>,
    event_consumer: Receiver<Event>,

    selected: Option<AttackNode>,
    search: String,
    scale: f32,
}

impl AttackTreeApp {
    pub fn new(_: &CreationContext<'_>, tree: AttackTree) -> Self {
        let (event_publisher, event_consumer) = unbounded();
        let state = TreeViewState::new(tree);
        let scale = state.viewport().initial().scale;

        Self {
            state,
            event_publisher,
            event_consumer,
            selected: None,
            search: String::new(),
            scale,
        }
    }

    fn consume_events(&mut self) {
        while let Ok(e) = self.event_consumer.try_recv() {
            match e {
                Event::NodeSelect(p) => {
                    if let Some(node) = &p.node {
                        info!("selected {:?} ({})", node.name, node.kind);
                    }
                    self.selected = p.node;
                }
                Event::Zoom(z) => self.scale = z.new_scale,
                Event::NodeHoverEnter(_) | Event::NodeHoverLeave(_) | Event::Pan(_) => {}
            }
        }
    }

    fn draw_toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Software Supply Chain Attack Tree");
            ui.separator();

            let now = Instant::now();
            if ui.button("Zoom In").clicked() {
                self.scale = self.state.zoom_in(now).scale;
            }
            if ui.button("Zoom Out").clicked() {
                self.scale = self.state.zoom_out(now).scale;
            }
            if ui.button("Reset View").clicked() {
                self.scale = self.state.reset_view(now).scale;
            }
            ui.label(format!("{:.0}%", self.scale * 100.));
            ui.separator();

            let resp = ui.add(
                TextEdit::singleline(&mut self.search)
                    .hint_text("Search nodes...")
                    .desired_width(180.),
            );
            if resp.changed() {
                self.state.set_search(&self.search);
            }
            if !self.search.trim().is_empty() {
                ui.label(format!("{} matches", self.state.highlighted().len()));
            }
        });

        ui.horizontal(|ui| {
            for kind in NodeKind::ALL {
                draw_swatch(ui, kind.color());
                ui.label(kind.label());
                ui.add_space(8.);
            }
        });
    }

    fn draw_details(&self, ui: &mut Ui) {
        let Some(node) = &self.selected else {
            ui.label(RichText::new(HINT).italics());
            return;
        };

        ui.heading(&node.name);
        ui.label(kind_badge(node.kind));
        ui.add_space(8.);
        ui.label(node.kind.description());

        if node.children.is_empty() {
            return;
        }

        ui.add_space(12.);
        ui.label(RichText::new(format!("Sub-elements ({})", node.children.len())).strong());
        ScrollArea::vertical().show(ui, |ui| {
            for child in &node.children {
                ui.horizontal(|ui| {
                    draw_swatch(ui, child.kind.color());
                    ui.label(&child.name);
                });
            }
        });
    }
}

impl App for AttackTreeApp {
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        TopBottomPanel::top("toolbar").show(ctx, |ui| self.draw_toolbar(ui));

        SidePanel::right("details")
            .default_width(SIDE_PANEL_WIDTH)
            .min_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| self.draw_details(ui));

        CentralPanel::default().show(ctx, |ui| {
            ui.add(&mut TreeView::new(&mut self.state).with_event_sink(&self.event_publisher));
        });

        self.consume_events();
    }
}

fn kind_badge(kind: NodeKind) -> RichText {
    RichText::new(format!(" {} ", kind.label()))
        .color(Color32::WHITE)
        .background_color(kind.color())
        .strong()
}

fn draw_swatch(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(LEGEND_SWATCH), Sense::hover());
    ui.painter().rect_filled(rect, 2., color);
}
