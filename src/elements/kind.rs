use std::fmt;

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Taxonomy level of an attack tree entry, ordered coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Goal,
    Attack,
    Technique,
    Method,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Goal,
        NodeKind::Attack,
        NodeKind::Technique,
        NodeKind::Method,
    ];

    /// Fill color used for nodes of this kind.
    pub fn color(self) -> Color32 {
        match self {
            NodeKind::Goal => Color32::from_rgb(0xdc, 0x26, 0x26),
            NodeKind::Attack => Color32::from_rgb(0xea, 0x58, 0x0c),
            NodeKind::Technique => Color32::from_rgb(0xd9, 0x77, 0x06),
            NodeKind::Method => Color32::from_rgb(0x65, 0xa3, 0x0d),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Goal => "Goal",
            NodeKind::Attack => "Attack",
            NodeKind::Technique => "Technique",
            NodeKind::Method => "Method",
        }
    }

    /// Short explanation of what entries of this kind represent.
    pub fn description(self) -> &'static str {
        match self {
            NodeKind::Goal => "The ultimate objective of compromising the software supply chain to achieve unauthorized access or control.",
            NodeKind::Attack => "A broad category of attack methods targeting specific components of the supply chain.",
            NodeKind::Technique => "Specific technical approaches used to execute attacks against supply chain components.",
            NodeKind::Method => "Concrete implementation methods for executing the attack technique.",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
