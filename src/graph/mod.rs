use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::pack::{LifecycleStatus, Pack};

pub mod builder;
pub mod conflict;
pub mod export;
pub mod query;

/// Marker keeping pack node ids distinct from every other address space.
/// Dependency targets may also arrive in this prefixed form.
pub const NODE_ID_PREFIX: &str = "pack-";

pub fn node_id_for(slug: &str) -> String {
    format!("{NODE_ID_PREFIX}{slug}")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSummary {
    pub id: String,
    pub name: String,
    pub status: LifecycleStatus,
}

/// One node per pack. `position` is meaningless until a layout has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    pub name: String,
    pub slug: String,
    pub version: String,
    pub status: LifecycleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub agents: Vec<AgentSummary>,
    #[serde(default)]
    pub dependency_count: usize,
    #[serde(default)]
    pub has_conflict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_reason: Option<String>,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub dimmed: bool,
}

/// `Conflict` supersedes the original kind once a defect is attributed to
/// the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Dependency,
    Optional,
    Conflict,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    #[serde(default)]
    pub has_conflict: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_reason: Option<String>,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default)]
    pub dimmed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    VersionMismatch,
    CircularDependency,
    MissingDependency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Warning,
    Error,
    Critical,
}

/// A detected structural defect. Pure derivation of the pack list,
/// recomputed fully on every build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub id: String,
    pub kind: ConflictKind,
    pub severity: ConflictSeverity,
    pub source_pack: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pack: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub pack_count: usize,
    pub agent_count: usize,
    pub dependency_count: usize,
    pub conflict_count: usize,
    pub max_depth: usize,
}

/// Full build result. Every edge endpoint names a node in the same result.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub conflicts: Vec<Conflict>,
    pub stats: GraphStats,
}

/// Reconciles the two identifier schemes used by dependency targets (raw
/// pack id, "pack-"-prefixed slug) plus bare slugs into one lookup, built
/// once per build instead of ad hoc comparisons at each site.
pub struct PackIndex<'a> {
    by_ref: HashMap<String, &'a Pack>,
}

impl<'a> PackIndex<'a> {
    pub fn new(packs: &'a [Pack]) -> Self {
        let mut by_ref: HashMap<String, &'a Pack> = HashMap::new();
        for pack in packs {
            by_ref.insert(pack.id.clone(), pack);
        }
        // Slug forms never shadow a pack id.
        for pack in packs {
            by_ref.entry(node_id_for(&pack.slug)).or_insert(pack);
            by_ref.entry(pack.slug.clone()).or_insert(pack);
        }
        Self { by_ref }
    }

    pub fn resolve(&self, reference: &str) -> Option<&'a Pack> {
        self.by_ref.get(reference).copied()
    }

    pub fn node_id(&self, reference: &str) -> Option<String> {
        self.resolve(reference).map(|pack| node_id_for(&pack.slug))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::pack::{LifecycleStatus, Pack};
    use crate::graph::{node_id_for, PackIndex};

    fn mk_pack(id: &str, slug: &str) -> Pack {
        Pack {
            id: id.to_string(),
            name: slug.to_string(),
            slug: slug.to_string(),
            version: "1.0.0".to_string(),
            status: LifecycleStatus::Active,
            description: None,
            agents: Vec::new(),
            dependencies: Vec::new(),
            optional_dependencies: Vec::new(),
        }
    }

    #[test]
    fn index_resolves_all_three_reference_forms() {
        let packs = vec![mk_pack("p1", "engineering"), mk_pack("p2", "devops")];
        let index = PackIndex::new(&packs);

        assert_eq!(index.resolve("p1").map(|p| p.slug.as_str()), Some("engineering"));
        assert_eq!(
            index.resolve("pack-engineering").map(|p| p.id.as_str()),
            Some("p1")
        );
        assert_eq!(index.resolve("devops").map(|p| p.id.as_str()), Some("p2"));
        assert!(index.resolve("missing").is_none());
    }

    #[test]
    fn node_ids_carry_the_pack_prefix() {
        assert_eq!(node_id_for("devops"), "pack-devops");
    }
}
