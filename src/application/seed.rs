//! Initial graph for a new session.

use crate::domain::compliance::autofix::synthesize;
use crate::domain::compliance::{requirements_for, DomainType};
use crate::domain::workflow::{FlowNode, NodeData, NodeType, Position, WorkflowGraph};

const INPUT_POSITION: Position = Position { x: 100.0, y: 100.0 };
const FIRST_REQUIRED_X: f64 = 300.0;
const REQUIRED_ROW_Y: f64 = 200.0;
const REQUIRED_SPACING_X: f64 = 200.0;

/// First `max_chars` characters of `text`, with `...` appended if cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// One input node carrying the seed text, followed by the domain's mandated
/// nodes chained in catalog order. The generic domain gets the input node
/// only.
pub fn seed_graph(seed_input: &str, domain: DomainType, excerpt_chars: usize) -> WorkflowGraph {
    let mut graph = WorkflowGraph::default();

    let input_id = graph.generate_node_id("input");
    let data = NodeData::new("User Input").with_description(excerpt(seed_input, excerpt_chars));
    graph.push_node(FlowNode::new(input_id.clone(), NodeType::Input, data, INPUT_POSITION));

    if domain == DomainType::Generic {
        return graph;
    }

    let mut previous = input_id;
    for (i, required) in requirements_for(domain).required_nodes.iter().enumerate() {
        let id = graph.generate_node_id(&format!("compliance_{}_{}", domain, i));
        let position = Position::new(FIRST_REQUIRED_X + i as f64 * REQUIRED_SPACING_X, REQUIRED_ROW_Y);
        graph.push_node(synthesize(required, id.clone(), position));
        graph.connect(&previous, &id);
        previous = id;
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::validate;

    #[test]
    fn excerpt_keeps_short_text() {
        assert_eq!(excerpt("short", 100), "short");
    }

    #[test]
    fn excerpt_cuts_on_char_boundary() {
        assert_eq!(excerpt("héllo wörld", 4), "héll...");
        assert_eq!(excerpt(&"a".repeat(101), 100), format!("{}...", "a".repeat(100)));
    }

    #[test]
    fn healthcare_seed_chains_six_required_nodes() {
        let graph = seed_graph("store patient record", DomainType::Healthcare, 100);

        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.nodes[0].node_type, NodeType::Input);
        for pair in graph.nodes.windows(2) {
            assert!(graph.has_edge_between(&pair[0].id, &pair[1].id));
        }
        assert_eq!(graph.nodes[1].position, Position::new(300.0, 200.0));
        assert_eq!(graph.nodes[2].position, Position::new(500.0, 200.0));
        assert!(validate(&graph.nodes, DomainType::Healthcare).is_compliant);
    }

    #[test]
    fn generic_seed_is_input_only() {
        let graph = seed_graph("paint the fence", DomainType::Generic, 100);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes[0].data.description.as_deref(), Some("paint the fence"));
        assert!(graph.nodes[0].id.as_str().starts_with("input_"));
    }
}
