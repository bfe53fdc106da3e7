//! Project model: the serialized root of a drainage network
//!
//! A [`Project`] is the native JSON interchange format described by this
//! crate's external interface — a flat record of nodes, links, and rainfall
//! events, with no nested "network" wrapper and no unit-system block (the
//! crate is US-customary only, see [`crate::rainfall`]/[`crate::runoff`]
//! for the fixed units each quantity is expressed in).

use crate::rainfall::RainfallEvent;
use crate::link::Link;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// A drainage network project: nodes, links, and design storms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Unique project identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Network nodes
    pub nodes: Vec<Node>,
    /// Network links
    pub links: Vec<Link>,
    /// Rainfall events available to simulate against; must be non-empty
    pub events: Vec<RainfallEvent>,
}

impl Project {
    /// Look up a node by id
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a rainfall event by id
    pub fn find_event(&self, id: &str) -> Option<&RainfallEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Links whose `to` endpoint is the given node id, i.e. its inbound links
    pub fn inbound_links<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Link> {
        self.links.iter().filter(move |l| l.to == node_id)
    }
}
