use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::{AttackTree, NodeKind, SettingsStyle, TreeLayout, ViewTransform};

const ELLIPSIS: &str = "...";

/// Everything needed to derive a scene. Nothing in it is mutated by drawing.
pub struct SceneContext<'a> {
    pub tree: &'a AttackTree,
    pub layout: &'a TreeLayout,
    pub transform: ViewTransform,
    pub selected: Option<NodeIndex>,
    pub hovered: Option<NodeIndex>,
    pub highlighted: &'a [NodeIndex],
    pub style: &'a SettingsStyle,
}

/// A node box in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeShape {
    pub id: NodeIndex,
    pub kind: NodeKind,
    pub rect: Rect,
    pub rounding: f32,
    pub fill: Color32,
    pub stroke: Stroke,
    pub label: String,
    pub font_size: f32,
    pub label_color: Color32,

    pub hovered: bool,
    pub selected: bool,
    pub highlighted: bool,
}

/// A parent to child connector in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkShape {
    pub id: EdgeIndex,
    pub points: [Pos2; 4],
    pub stroke: Stroke,
}

/// Draw commands derived from layout, transform and interaction state.
///
/// The scene is rebuilt from scratch every frame; links come first, then
/// nodes, with the hovered and selected nodes last so they end up on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub links: Vec<LinkShape>,
    pub nodes: Vec<NodeShape>,
}

impl Scene {
    pub fn build(ctx: &SceneContext) -> Self {
        let links = ctx
            .layout
            .links_iter()
            .filter_map(|(id, link)| {
                let points = ctx.layout.connector(link)?;
                Some(LinkShape {
                    id,
                    points: points.map(|p| ctx.transform.canvas_to_screen_pos(p)),
                    stroke: Stroke::new(
                        ctx.transform.canvas_to_screen_size(ctx.style.link_width),
                        ctx.style.link_color,
                    ),
                })
            })
            .collect();

        let mut nodes = Vec::with_capacity(ctx.layout.node_count());
        let mut postponed = Vec::new();
        for idx in ctx.tree.preorder() {
            let Some(shape) = node_shape(ctx, idx) else {
                continue;
            };
            if shape.hovered || shape.selected {
                postponed.push(shape);
            } else {
                nodes.push(shape);
            }
        }
        nodes.extend(postponed);

        Self { links, nodes }
    }

    /// Topmost node whose box contains `pos` (screen coordinates).
    pub fn node_at(&self, pos: Pos2) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.rect.contains(pos))
            .map(|n| n.id)
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&NodeShape> {
        self.nodes.iter().find(|n| n.id == idx)
    }
}

fn node_shape(ctx: &SceneContext, idx: NodeIndex) -> Option<NodeShape> {
    let entry = ctx.tree.entry(idx)?;
    let laid_out = ctx.layout.node(idx)?;
    let style = ctx.style;
    let t = ctx.transform;

    let hovered = ctx.hovered == Some(idx);
    let selected = ctx.selected == Some(idx);
    let highlighted = ctx.highlighted.contains(&idx);

    let label = truncate_label(&entry.name, style.label_max_chars);
    let size = Vec2::new(node_width(&label, style), style.node_height);
    let rect = Rect::from_center_size(
        t.canvas_to_screen_pos(laid_out.location()),
        size * t.scale,
    );

    let (opacity, stroke_width) = if hovered {
        (style.node_opacity_hovered, style.node_stroke_width_hovered)
    } else {
        (style.node_opacity, style.node_stroke_width)
    };
    let stroke_color = if selected {
        style.selected_stroke_color
    } else if highlighted {
        style.highlight_stroke_color
    } else {
        style.node_stroke_color
    };

    Some(NodeShape {
        id: idx,
        kind: entry.kind,
        rect,
        rounding: t.canvas_to_screen_size(style.node_rounding),
        fill: entry.kind.color().gamma_multiply(opacity),
        stroke: Stroke::new(t.canvas_to_screen_size(stroke_width), stroke_color),
        label,
        font_size: t.canvas_to_screen_size(style.font_size),
        label_color: style.label_color,
        hovered,
        selected,
        highlighted,
    })
}

/// Cuts `name` after `max_chars` characters and marks the cut with `...`.
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut res = name.chars().take(max_chars).collect::<String>();
    res.push_str(ELLIPSIS);
    res
}

/// Width of the box for `label` in canvas units, never below the style minimum.
pub fn node_width(label: &str, style: &SettingsStyle) -> f32 {
    let text = label.chars().count() as f32 * style.char_width + style.label_padding;
    text.max(style.min_node_width)
}
