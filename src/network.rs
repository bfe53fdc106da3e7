//! DAG topology: topological sort and validation (C11)
//!
//! The network is the directed graph implied by a [`Project`]'s nodes and
//! links. [`topological_sort`] orders nodes so every link's upstream node
//! precedes its downstream node, using Kahn's algorithm rather than a
//! recursive depth-first search: a project's roots are its subcatchments,
//! often many of them, which Kahn's in-degree/queue approach handles as
//! naturally as a single-outfall tree, and a cycle falls out for free as an
//! emitted-count mismatch instead of needing a separate visited-set pass.

use crate::error::{SimError, SimResult};
use crate::project::Project;
use std::collections::{HashMap, VecDeque};

/// Topologically sort a project's node ids via Kahn's algorithm.
///
/// Returns node ids in an order such that for every link `u -> v`, `u`
/// appears before `v`. Fails with [`SimError::InvalidProject`] if the graph
/// contains a cycle.
pub fn topological_sort(project: &Project) -> SimResult<Vec<String>> {
    let mut in_degree: HashMap<&str, usize> = project.nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
    let mut adjacency: HashMap<&str, Vec<&str>> = project.nodes.iter().map(|n| (n.id.as_str(), Vec::new())).collect();

    for link in &project.links {
        if let Some(neighbors) = adjacency.get_mut(link.from.as_str()) {
            neighbors.push(link.to.as_str());
        }
        if let Some(count) = in_degree.get_mut(link.to.as_str()) {
            *count += 1;
        }
    }

    // Deterministic ordering: seed the queue in the project's declared node order.
    let order_index: HashMap<&str, usize> = project
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    let mut roots: Vec<&str> = in_degree
        .iter()
        .filter(|(_, &count)| count == 0)
        .map(|(&id, _)| id)
        .collect();
    roots.sort_by_key(|id| order_index[id]);
    let mut queue: VecDeque<&str> = roots.into();

    let mut sorted = Vec::with_capacity(project.nodes.len());
    while let Some(id) = queue.pop_front() {
        sorted.push(id.to_string());
        if let Some(neighbors) = adjacency.get(id) {
            let mut ready = Vec::new();
            for &neighbor in neighbors {
                if let Some(count) = in_degree.get_mut(neighbor) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(neighbor);
                    }
                }
            }
            ready.sort_by_key(|id| order_index[id]);
            for r in ready {
                queue.push_back(r);
            }
        }
    }

    if sorted.len() != project.nodes.len() {
        return Err(SimError::invalid_project("cycle detected in node graph"));
    }

    Ok(sorted)
}

/// Advisory validation: returns human-readable findings without failing.
///
/// Checks: duplicate node ids, link endpoints that don't resolve to a node,
/// cycles, subcatchments missing required data, and an empty event list.
pub fn validate(project: &Project) -> Vec<String> {
    let mut findings = Vec::new();

    let mut seen_ids = std::collections::HashSet::new();
    for node in &project.nodes {
        if !seen_ids.insert(node.id.as_str()) {
            findings.push(format!("duplicate node id: {}", node.id));
        }
    }

    for link in &project.links {
        if project.find_node(&link.from).is_none() {
            findings.push(format!("link '{}' references unknown from-node '{}'", link.id, link.from));
        }
        if project.find_node(&link.to).is_none() {
            findings.push(format!("link '{}' references unknown to-node '{}'", link.id, link.to));
        }
    }

    if topological_sort(project).is_err() {
        findings.push("network contains a cycle".to_string());
    }

    for node in &project.nodes {
        findings.extend(node.validate());
    }

    if project.events.is_empty() {
        findings.push("project has no rainfall events".to_string());
    }
    for event in &project.events {
        if let Err(e) = event.validate() {
            findings.push(format!("event '{}': {}", event.id, e));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeKind, Position};
    use crate::rainfall::{RainfallEvent, StormType};
    use crate::link::Link;

    fn junction(id: &str) -> Node {
        Node {
            id: id.to_string(),
            name: id.to_string(),
            position: Position::default(),
            kind: NodeKind::Junction,
        }
    }

    fn event() -> RainfallEvent {
        RainfallEvent {
            id: "e1".into(),
            label: "2-yr".into(),
            storm_type: StormType::II,
            total_depth: 3.2,
        }
    }

    #[test]
    fn test_topological_sort_respects_links() {
        let project = Project {
            id: "p".into(),
            name: "p".into(),
            description: "".into(),
            nodes: vec![junction("a"), junction("b"), junction("c")],
            links: vec![
                Link { id: "l1".into(), from: "a".into(), to: "b".into() },
                Link { id: "l2".into(), from: "b".into(), to: "c".into() },
            ],
            events: vec![event()],
        };

        let order = topological_sort(&project).unwrap();
        let pos = |id: &str| order.iter().position(|x| x == id).unwrap();
        assert!(pos("a") < pos("b"));
        assert!(pos("b") < pos("c"));
    }

    /// Scenario 6 — cycle detection: A -> B -> A
    #[test]
    fn test_scenario_6_cycle_detected() {
        let project = Project {
            id: "p".into(),
            name: "p".into(),
            description: "".into(),
            nodes: vec![junction("a"), junction("b")],
            links: vec![
                Link { id: "l1".into(), from: "a".into(), to: "b".into() },
                Link { id: "l2".into(), from: "b".into(), to: "a".into() },
            ],
            events: vec![event()],
        };

        assert!(topological_sort(&project).is_err());
        let findings = validate(&project);
        assert!(findings.iter().any(|f| f.contains("cycle")));
    }

    #[test]
    fn test_validate_flags_duplicate_ids() {
        let project = Project {
            id: "p".into(),
            name: "p".into(),
            description: "".into(),
            nodes: vec![junction("a"), junction("a")],
            links: vec![],
            events: vec![event()],
        };
        let findings = validate(&project);
        assert!(findings.iter().any(|f| f.contains("duplicate")));
    }

    #[test]
    fn test_validate_flags_unresolved_link() {
        let project = Project {
            id: "p".into(),
            name: "p".into(),
            description: "".into(),
            nodes: vec![junction("a")],
            links: vec![Link { id: "l1".into(), from: "a".into(), to: "missing".into() }],
            events: vec![event()],
        };
        let findings = validate(&project);
        assert!(findings.iter().any(|f| f.contains("unknown to-node")));
    }

    #[test]
    fn test_validate_flags_empty_events() {
        let project = Project {
            id: "p".into(),
            name: "p".into(),
            description: "".into(),
            nodes: vec![junction("a")],
            links: vec![],
            events: vec![],
        };
        let findings = validate(&project);
        assert!(findings.iter().any(|f| f.contains("no rainfall events")));
    }

    #[test]
    fn test_validate_flags_nonpositive_event_depth() {
        let project = Project {
            id: "p".into(),
            name: "p".into(),
            description: "".into(),
            nodes: vec![junction("a")],
            links: vec![],
            events: vec![RainfallEvent {
                id: "e1".into(),
                label: "bad".into(),
                storm_type: StormType::II,
                total_depth: 0.0,
            }],
        };
        let findings = validate(&project);
        assert!(findings.iter().any(|f| f.contains("event 'e1'")));
    }

    #[test]
    fn test_validate_clean_project() {
        let project = Project {
            id: "p".into(),
            name: "p".into(),
            description: "".into(),
            nodes: vec![junction("a"), junction("b")],
            links: vec![Link { id: "l1".into(), from: "a".into(), to: "b".into() }],
            events: vec![event()],
        };
        assert!(validate(&project).is_empty());
    }
}
