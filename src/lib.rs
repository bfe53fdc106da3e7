//! # Stormlab — stormwater drainage network simulation engine
//!
//! Simulates runoff and attenuation for a drainage network subjected to a
//! design rainstorm: TR-55/SCS hydrology (rainfall distribution, curve-number
//! runoff, time of concentration, unit-hydrograph convolution), hydraulics
//! (stage-storage, composite outlet discharge, Modified Puls pond routing,
//! Manning's reach routing), and a DAG-level system router that threads flow
//! through a network of subcatchments, ponds, reaches, and junctions.
//!
//! ## Modules
//!
//! - [`error`] - the crate's error type
//! - [`rainfall`] - 24-hour SCS design storm distributions
//! - [`runoff`] - SCS curve-number runoff
//! - [`tc`] - time of concentration
//! - [`unit_hydrograph`] - SCS dimensionless unit hydrograph and convolution
//! - [`subcatchment`] - composed runoff for a land parcel
//! - [`stage_storage`] - pond elevation-volume curves
//! - [`outlet`] - pond outlet devices (orifice, weir, V-notch)
//! - [`pond`] - Modified Puls storage-indication routing
//! - [`reach`] - Manning's-equation kinematic reach routing
//! - [`hydrograph`] - hydrograph resampling and summation
//! - [`node`] / [`link`] / [`project`] - the network data model
//! - [`network`] - topological sort and validation
//! - [`router`] - the system router that drives a full simulation
//!
//! ## Example
//!
//! ```no_run
//! use stormlab_core::project::Project;
//! use stormlab_core::router;
//! use std::fs;
//!
//! let json = fs::read_to_string("project.json").unwrap();
//! let project: Project = serde_json::from_str(&json).unwrap();
//! let event_id = &project.events[0].id;
//! let result = router::run_simulation(&project, event_id).unwrap();
//! for (node_id, node_result) in &result.nodes {
//!     println!("{}: peak {:.1} cfs", node_id, node_result.peak_outflow);
//! }
//! ```

pub mod error;
pub mod hydrograph;
pub mod link;
pub mod network;
pub mod node;
pub mod outlet;
pub mod pond;
pub mod project;
pub mod rainfall;
pub mod reach;
pub mod router;
pub mod runoff;
pub mod stage_storage;
pub mod subcatchment;
pub mod tc;
pub mod unit_hydrograph;
