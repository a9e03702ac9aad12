use serde::{Deserialize, Serialize};

use crate::AttackNode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeSelect {
    /// Tree index of the selected node, `None` when the selection was cleared.
    pub id: Option<usize>,
    /// Selected subtree, `None` when the selection was cleared.
    pub node: Option<AttackNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeHoverEnter {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeHoverLeave {
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadPan {
    pub diff: [f32; 2],
    pub new_translate: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadZoom {
    pub diff: f32,
    pub new_scale: f32,
}

/// Notifications the widget sends to the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    NodeSelect(PayloadNodeSelect),
    NodeHoverEnter(PayloadNodeHoverEnter),
    NodeHoverLeave(PayloadNodeHoverLeave),
    Pan(PayloadPan),
    Zoom(PayloadZoom),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::NodeKind;

    #[test]
    fn test_contract_pan() {
        let event = Event::Pan(PayloadPan {
            diff: [1.0, 2.0],
            new_translate: [51.0, 52.0],
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"Pan":{"diff":[1.0,2.0],"new_translate":[51.0,52.0]}}"#
        );

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_contract_zoom() {
        let event = Event::Zoom(PayloadZoom {
            diff: 0.5,
            new_scale: 1.5,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Zoom":{"diff":0.5,"new_scale":1.5}}"#);
    }

    #[test]
    fn test_contract_node_select() {
        let event = Event::NodeSelect(PayloadNodeSelect {
            id: Some(3),
            node: Some(AttackNode::new("Typosquatting", NodeKind::Method)),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"NodeSelect":{"id":3,"node":{"name":"Typosquatting","type":"method"}}}"#
        );

        let cleared = Event::NodeSelect(PayloadNodeSelect {
            id: None,
            node: None,
        });
        let json = serde_json::to_string(&cleared).unwrap();
        assert_eq!(json, r#"{"NodeSelect":{"id":null,"node":null}}"#);
    }
}
