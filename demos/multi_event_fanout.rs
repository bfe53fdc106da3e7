//! Example: Running several design storms over one project concurrently
//!
//! `router::run_simulation` is a pure function of its `(Project, event_id)`
//! arguments -- it performs no I/O and mutates no shared state -- so
//! independent events can be routed on separate threads with no locking.
//! This example fans a project's events out across `std::thread::scope`,
//! one thread per event, and collects the peak outflow at the outfall.

use stormlab_core::node::{Node, NodeKind, Position};
use stormlab_core::project::Project;
use stormlab_core::rainfall::{RainfallEvent, StormType};
use stormlab_core::router;
use stormlab_core::subcatchment::{HydrologicSoilGroup, SubArea, Subcatchment};
use stormlab_core::tc::{FlowSegment, SurfaceType};
use stormlab_core::link::Link;

fn demo_project() -> Project {
    Project {
        id: "fanout-demo".to_string(),
        name: "Multi-Storm Fanout Demo".to_string(),
        description: "One subcatchment, several return periods.".to_string(),
        nodes: vec![
            Node {
                id: "sub-1".to_string(),
                name: "Basin".to_string(),
                position: Position::default(),
                kind: NodeKind::Subcatchment(Subcatchment {
                    sub_areas: vec![SubArea {
                        description: "Mixed residential".to_string(),
                        soil_group: HydrologicSoilGroup::B,
                        curve_number: 72.0,
                        area: 40.0,
                    }],
                    flow_segments: vec![FlowSegment::Sheet {
                        length: 100.0,
                        roughness: 0.24,
                        slope: 0.01,
                        p2: 3.0,
                    }],
                    tc_override: None,
                    cn_override: None,
                }),
            },
            Node {
                id: "outfall".to_string(),
                name: "Outfall".to_string(),
                position: Position::default(),
                kind: NodeKind::Junction,
            },
        ],
        links: vec![Link {
            id: "l1".to_string(),
            from: "sub-1".to_string(),
            to: "outfall".to_string(),
        }],
        events: vec![
            RainfallEvent { id: "2yr".to_string(), label: "2-Year, 24-Hour".to_string(), storm_type: StormType::II, total_depth: 3.2 },
            RainfallEvent { id: "10yr".to_string(), label: "10-Year, 24-Hour".to_string(), storm_type: StormType::II, total_depth: 5.0 },
            RainfallEvent { id: "100yr".to_string(), label: "100-Year, 24-Hour".to_string(), storm_type: StormType::II, total_depth: 7.8 },
        ],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let project = demo_project();

    let results: Vec<(String, Result<f64, String>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = project
            .events
            .iter()
            .map(|event| {
                let project = &project;
                let event_id = event.id.clone();
                scope.spawn(move || {
                    let peak = router::run_simulation(project, &event_id)
                        .map(|r| r.nodes["outfall"].peak_outflow)
                        .map_err(|e| e.to_string());
                    (event_id, peak)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    println!("--- Peak outfall flow by event ---");
    for (event_id, peak) in results {
        match peak {
            Ok(q) => println!("{:>6}: {:.2} cfs", event_id, q),
            Err(e) => println!("{:>6}: error - {}", event_id, e),
        }
    }

    Ok(())
}
