//! Node types for drainage networks
//!
//! A [`Node`] is one element of the network graph: a runoff-producing
//! subcatchment, a storage pond, an open-channel reach, or a plain flow
//! junction. Diagram position is carried through unread by the core — it
//! exists for the benefit of external diagram editors, not the simulation.

use crate::pond::Pond;
use crate::reach::Reach;
use crate::subcatchment::Subcatchment;
use serde::{Deserialize, Serialize};

/// 2-D diagram position; opaque to the simulation core
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node in the drainage network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Unique node identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Diagram position, carried through unread by the core
    #[serde(default)]
    pub position: Position,
    /// Node kind and its payload
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Node kind and variant-specific data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum NodeKind {
    /// Runoff-producing land parcel
    Subcatchment(Subcatchment),
    /// Detention/retention storage structure
    Pond(Pond),
    /// Open-channel or culvert reach
    Reach(Reach),
    /// Plain flow-combining junction, no payload
    Junction,
}

impl Node {
    /// Validate this node's variant-specific invariants; returns human-readable findings.
    pub fn validate(&self) -> Vec<String> {
        match &self.kind {
            NodeKind::Subcatchment(sc) => sc
                .validate()
                .into_iter()
                .map(|msg| format!("node '{}': {}", self.id, msg))
                .collect(),
            NodeKind::Pond(_) | NodeKind::Reach(_) | NodeKind::Junction => Vec::new(),
        }
    }
}
