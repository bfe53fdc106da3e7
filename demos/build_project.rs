//! Example: Building a drainage project programmatically
//!
//! This example demonstrates how to assemble a `Project` using the Rust
//! type definitions, serialize it to JSON, and run a single-event
//! simulation over the resulting network.

use stormlab_core::node::{Node, NodeKind, Position};
use stormlab_core::outlet::OutletDevice;
use stormlab_core::pond::Pond;
use stormlab_core::project::Project;
use stormlab_core::rainfall::{RainfallEvent, StormType};
use stormlab_core::stage_storage::StageStorageCurve;
use stormlab_core::subcatchment::{HydrologicSoilGroup, SubArea, Subcatchment};
use stormlab_core::tc::{FlowSegment, SurfaceType};
use stormlab_core::{link::Link, router};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Describe a subcatchment draining to a detention pond, which in
    //    turn discharges to a junction acting as the project outfall.
    let subcatchment = Node {
        id: "sub-1".to_string(),
        name: "North Basin".to_string(),
        position: Position { x: 0.0, y: 0.0 },
        kind: NodeKind::Subcatchment(Subcatchment {
            sub_areas: vec![
                SubArea {
                    description: "Lawn".to_string(),
                    soil_group: HydrologicSoilGroup::C,
                    curve_number: 74.0,
                    area: 18.0,
                },
                SubArea {
                    description: "Rooftop".to_string(),
                    soil_group: HydrologicSoilGroup::C,
                    curve_number: 98.0,
                    area: 2.0,
                },
            ],
            flow_segments: vec![FlowSegment::ShallowConcentrated {
                length: 300.0,
                slope: 0.015,
                surface: SurfaceType::Unpaved,
            }],
            tc_override: None,
            cn_override: None,
        }),
    };

    let pond = Node {
        id: "pond-1".to_string(),
        name: "Detention Pond".to_string(),
        position: Position { x: 100.0, y: 0.0 },
        kind: NodeKind::Pond(Pond {
            stage_storage: StageStorageCurve::new([
                (100.0, 0.0),
                (103.0, 15_000.0),
                (106.0, 55_000.0),
                (109.0, 140_000.0),
            ])?,
            outlets: vec![OutletDevice::Orifice {
                coefficient: 0.6,
                diameter: 1.5,
                center_elevation: 100.5,
            }],
            initial_wse: 100.0,
        }),
    };

    let outlet = Node {
        id: "outlet".to_string(),
        name: "Outlet".to_string(),
        position: Position { x: 200.0, y: 0.0 },
        kind: NodeKind::Junction,
    };

    let project = Project {
        id: "demo-1".to_string(),
        name: "North Basin Detention Demo".to_string(),
        description: "A small subcatchment-pond-outlet project.".to_string(),
        nodes: vec![subcatchment, pond, outlet],
        links: vec![
            Link { id: "l1".to_string(), from: "sub-1".to_string(), to: "pond-1".to_string() },
            Link { id: "l2".to_string(), from: "pond-1".to_string(), to: "outlet".to_string() },
        ],
        events: vec![
            RainfallEvent {
                id: "2yr".to_string(),
                label: "2-Year, 24-Hour".to_string(),
                storm_type: StormType::II,
                total_depth: 3.2,
            },
            RainfallEvent {
                id: "100yr".to_string(),
                label: "100-Year, 24-Hour".to_string(),
                storm_type: StormType::II,
                total_depth: 8.0,
            },
        ],
    };

    println!("Project: {}", project.name);
    let json = serde_json::to_string_pretty(&project)?;
    println!("Serialized to {} bytes of JSON", json.len());

    // 2. Round-trip it, confirming the JSON interchange format is lossless.
    let reloaded: Project = serde_json::from_str(&json)?;
    assert_eq!(reloaded, project);
    println!("✓ Round-tripped through JSON unchanged");

    // 3. Run the simulation for each event in turn.
    for event in &project.events {
        let result = router::run_simulation(&project, &event.id)?;
        println!("\n--- {} ---", event.label);
        let mut ids: Vec<&String> = result.nodes.keys().collect();
        ids.sort();
        for id in ids {
            let r = &result.nodes[id];
            print!(
                "{:>10}: peak = {:>7.2} cfs @ t = {:>5.2} hr, volume = {:>6.2} ac-ft",
                id, r.peak_outflow, r.peak_outflow_time, r.volume
            );
            if let Some(stage) = r.peak_stage {
                print!(", stage = {:.2} ft", stage);
            }
            println!();
        }
    }

    Ok(())
}
