//! DAG construction, validation, and topological sort, end to end.

use stormlab_core::link::Link;
use stormlab_core::network;
use stormlab_core::node::{Node, NodeKind, Position};
use stormlab_core::project::Project;
use stormlab_core::rainfall::{RainfallEvent, StormType};
use stormlab_core::subcatchment::{HydrologicSoilGroup, SubArea, Subcatchment};

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
fn test_multi_root_topology_sorts_correctly() {
    // Two independent subcatchments feeding one junction -- a shape Kahn's
    // algorithm handles naturally that a single-outfall-rooted DFS would not.
    let project = Project {
        id: "p".into(),
        name: "p".into(),
        description: "".into(),
        nodes: vec![junction("sub-a"), junction("sub-b"), junction("outlet")],
        links: vec![
            Link { id: "l1".into(), from: "sub-a".into(), to: "outlet".into() },
            Link { id: "l2".into(), from: "sub-b".into(), to: "outlet".into() },
        ],
        events: vec![event()],
    };

    let order = network::topological_sort(&project).unwrap();
    let pos = |id: &str| order.iter().position(|x| x == id).unwrap();
    assert!(pos("sub-a") < pos("outlet"));
    assert!(pos("sub-b") < pos("outlet"));
    assert_eq!(order.len(), 3);
}

#[test]
fn test_self_loop_is_a_cycle() {
    let project = Project {
        id: "p".into(),
        name: "p".into(),
        description: "".into(),
        nodes: vec![junction("a")],
        links: vec![Link { id: "l1".into(), from: "a".into(), to: "a".into() }],
        events: vec![event()],
    };
    assert!(network::topological_sort(&project).is_err());
}

#[test]
fn test_disconnected_components_sort_independently() {
    let project = Project {
        id: "p".into(),
        name: "p".into(),
        description: "".into(),
        nodes: vec![junction("a"), junction("b"), junction("c"), junction("d")],
        links: vec![
            Link { id: "l1".into(), from: "a".into(), to: "b".into() },
            Link { id: "l2".into(), from: "c".into(), to: "d".into() },
        ],
        events: vec![event()],
    };
    let order = network::topological_sort(&project).unwrap();
    assert_eq!(order.len(), 4);
    let pos = |id: &str| order.iter().position(|x| x == id).unwrap();
    assert!(pos("a") < pos("b"));
    assert!(pos("c") < pos("d"));
}

#[test]
fn test_validate_reports_subcatchment_missing_tc_path() {
    let mut nodes = vec![junction("outlet")];
    nodes.push(Node {
        id: "sub".into(),
        name: "Sub".into(),
        position: Position::default(),
        kind: NodeKind::Subcatchment(Subcatchment {
            sub_areas: vec![SubArea {
                description: "a".into(),
                soil_group: HydrologicSoilGroup::B,
                curve_number: 70.0,
                area: 10.0,
            }],
            flow_segments: vec![],
            tc_override: None,
            cn_override: None,
        }),
    });
    let project = Project {
        id: "p".into(),
        name: "p".into(),
        description: "".into(),
        nodes,
        links: vec![Link { id: "l1".into(), from: "sub".into(), to: "outlet".into() }],
        events: vec![event()],
    };

    let findings = network::validate(&project);
    assert!(findings.iter().any(|f| f.contains("Tc override")));
}

#[test]
fn test_validate_accumulates_all_findings_not_fail_fast() {
    let project = Project {
        id: "p".into(),
        name: "p".into(),
        description: "".into(),
        nodes: vec![junction("a"), junction("a")],
        links: vec![Link { id: "l1".into(), from: "a".into(), to: "missing".into() }],
        events: vec![],
    };

    let findings = network::validate(&project);
    assert!(findings.iter().any(|f| f.contains("duplicate")));
    assert!(findings.iter().any(|f| f.contains("unknown to-node")));
    assert!(findings.iter().any(|f| f.contains("no rainfall events")));
    assert!(findings.len() >= 3);
}
