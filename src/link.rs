//! Links between nodes in the drainage network
//!
//! A [`Link`] expresses only the upstream-downstream relationship between two
//! nodes; any hydraulic properties (length, slope, geometry) live on the
//! downstream node itself when it's a [`crate::reach::Reach`].

use serde::{Deserialize, Serialize};

/// A directed connection from one node to another
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// Unique link identifier
    pub id: String,
    /// Upstream node id
    pub from: String,
    /// Downstream node id
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_serde_roundtrip() {
        let link = Link {
            id: "l-1".into(),
            from: "a".into(),
            to: "b".into(),
        };
        let json = serde_json::to_string(&link).unwrap();
        let back: Link = serde_json::from_str(&json).unwrap();
        assert_eq!(link, back);
    }
}
