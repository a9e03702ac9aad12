use crate::{AttackNode, NodeKind};

fn methods<const N: usize>(names: [&str; N]) -> Vec<AttackNode> {
    names
        .into_iter()
        .map(|name| AttackNode::new(name, NodeKind::Method))
        .collect()
}

fn technique<const N: usize>(name: &str, method_names: [&str; N]) -> AttackNode {
    AttackNode::new(name, NodeKind::Technique).with_children(methods(method_names))
}

/// Built-in software supply chain attack tree.
pub fn supply_chain() -> AttackNode {
    AttackNode::new("Compromise Software Supply Chain", NodeKind::Goal).with_children([
        AttackNode::new("Compromise Source Code", NodeKind::Attack).with_children([
            technique(
                "Direct Repository Access",
                [
                    "Stolen Developer Credentials",
                    "Compromised Developer Account",
                    "Insider Threat",
                ],
            ),
            technique(
                "Code Injection",
                ["Pull Request Injection", "Commit Signing Bypass"],
            ),
        ]),
        AttackNode::new("Compromise Build Process", NodeKind::Attack).with_children([
            technique(
                "CI/CD Pipeline Compromise",
                ["Build Server Access", "Pipeline Configuration Tampering"],
            ),
            technique(
                "Dependency Confusion",
                ["Package Name Squatting", "Typosquatting"],
            ),
        ]),
        AttackNode::new("Compromise Distribution", NodeKind::Attack).with_children([
            technique(
                "Package Repository Compromise",
                ["Registry Account Takeover", "Package Replacement"],
            ),
            technique(
                "Update Mechanism Abuse",
                [
                    "Update Server Compromise",
                    "Certificate Authority Compromise",
                ],
            ),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count_nodes;

    #[test]
    fn test_supply_chain_shape() {
        let root = supply_chain();
        assert_eq!(root.kind, NodeKind::Goal);
        assert_eq!(root.children.len(), 3);
        assert_eq!(count_nodes(&root), 23);
    }
}
