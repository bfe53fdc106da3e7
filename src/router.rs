//! System router (C12)
//!
//! Drives the whole simulation: topologically sorts a project's nodes, then
//! visits each one in order, summing its upstream inflows and dispatching to
//! the matching component (subcatchment, pond, reach, or junction
//! passthrough). This replaces the solver's old single-outfall-rooted
//! recursive walk with an explicit pass over [`network::topological_sort`]'s
//! flat order, since a stormwater network's roots are its subcatchments
//! rather than a single downstream outfall.

use crate::error::{SimError, SimResult};
use crate::hydrograph::{self, Hydrograph};
use crate::node::NodeKind;
use crate::project::Project;
use crate::{network, pond, reach, subcatchment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-node, per-event simulation output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeResult {
    /// The node's id
    #[serde(rename = "nodeId")]
    pub node_id: String,
    /// Full outflow hydrograph
    pub outflow: Hydrograph,
    /// Peak outflow, cfs
    #[serde(rename = "peakOutflow")]
    pub peak_outflow: f64,
    /// Time of peak outflow, hours
    #[serde(rename = "peakOutflowTime")]
    pub peak_outflow_time: f64,
    /// Total outflow volume, acre-feet
    pub volume: f64,
    /// Peak inflow, cfs (ponds only)
    #[serde(rename = "peakInflow", skip_serializing_if = "Option::is_none")]
    pub peak_inflow: Option<f64>,
    /// Peak water-surface elevation, ft (ponds only)
    #[serde(rename = "peakStage", skip_serializing_if = "Option::is_none")]
    pub peak_stage: Option<f64>,
    /// Peak storage, cubic feet (ponds only)
    #[serde(rename = "peakStorage", skip_serializing_if = "Option::is_none")]
    pub peak_storage: Option<f64>,
}

impl NodeResult {
    fn empty(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            outflow: Hydrograph::default(),
            peak_outflow: 0.0,
            peak_outflow_time: 0.0,
            volume: 0.0,
            peak_inflow: None,
            peak_stage: None,
            peak_storage: None,
        }
    }

    fn from_hydrograph(node_id: &str, hydrograph: Hydrograph, volume: f64) -> Self {
        let (peak_outflow, peak_outflow_time) = hydrograph.peak().unwrap_or((0.0, 0.0));
        Self {
            node_id: node_id.to_string(),
            outflow: hydrograph,
            peak_outflow,
            peak_outflow_time,
            volume,
            peak_inflow: None,
            peak_stage: None,
            peak_storage: None,
        }
    }
}

/// The full result of simulating a project against one rainfall event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationResult {
    /// The rainfall event id that was simulated
    #[serde(rename = "eventId")]
    pub event_id: String,
    /// Per-node results, keyed by node id
    pub nodes: HashMap<String, NodeResult>,
}

/// Run a full simulation of `project` against the named rainfall event.
///
/// Topologically sorts the nodes, then visits each in order, summing
/// upstream outflows into an inflow hydrograph and dispatching by node kind.
/// Fails if the event id is unknown or the network contains a cycle.
pub fn run_simulation(project: &Project, event_id: &str) -> SimResult<SimulationResult> {
    let event = project
        .find_event(event_id)
        .ok_or_else(|| SimError::invalid_project(format!("unknown event id: {}", event_id)))?;

    let order = network::topological_sort(project)?;
    let mut results: HashMap<String, NodeResult> = HashMap::new();

    for node_id in &order {
        let node = project
            .find_node(node_id)
            .expect("topological_sort only emits ids present in the project");

        let upstream: Vec<Hydrograph> = project
            .inbound_links(node_id)
            .filter_map(|link| results.get(&link.from))
            .map(|r| r.outflow.clone())
            .collect();
        let inflow = hydrograph::sum(&upstream);

        let result = match &node.kind {
            NodeKind::Subcatchment(sc) => {
                let sc_result = subcatchment::simulate(sc, event.storm_type, event.total_depth)?;
                let runoff = sc_result.hydrograph;
                let combined = if inflow.is_empty() {
                    runoff
                } else {
                    hydrograph::sum(&[runoff, inflow])
                };
                NodeResult::from_hydrograph(node_id, combined, sc_result_volume(&sc_result))
            }
            NodeKind::Pond(pond_data) => {
                if inflow.len() < 2 {
                    NodeResult::empty(node_id)
                } else {
                    let routed = pond::route(
                        &inflow,
                        &pond_data.stage_storage,
                        &pond_data.outlets,
                        pond_data.initial_wse,
                    )?;
                    let mut node_result =
                        NodeResult::from_hydrograph(node_id, routed.outflow, 0.0);
                    node_result.volume = node_result.outflow.volume_ac_ft();
                    node_result.peak_inflow = Some(routed.peak_inflow);
                    node_result.peak_stage = Some(routed.peak_stage);
                    node_result.peak_storage = Some(routed.peak_storage);
                    node_result
                }
            }
            NodeKind::Reach(reach_data) => {
                if inflow.len() < 2 {
                    NodeResult::empty(node_id)
                } else {
                    let routed = reach::route(&inflow, reach_data)?;
                    let volume = routed.outflow.volume_ac_ft();
                    NodeResult::from_hydrograph(node_id, routed.outflow, volume)
                }
            }
            NodeKind::Junction => {
                let volume = inflow.volume_ac_ft();
                NodeResult::from_hydrograph(node_id, inflow, volume)
            }
        };

        results.insert(node_id.clone(), result);
    }

    Ok(SimulationResult {
        event_id: event_id.to_string(),
        nodes: results,
    })
}

/// Subcatchment volume is reported directly from the unit-hydrograph
/// convolution, not the integral of its (possibly inflow-augmented)
/// hydrograph -- see the design notes on this known inconsistency.
fn sc_result_volume(sc_result: &subcatchment::SubcatchmentResult) -> f64 {
    sc_result.hydrograph.volume_ac_ft()
}
