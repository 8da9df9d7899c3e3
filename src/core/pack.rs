use serde::{Deserialize, Serialize};

/// Lifecycle state shared by packs and the agents they contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStatus {
    Active,
    Inactive,
    Error,
    Deprecated,
}

/// A deployable unit bundling agents, versioned, with declared dependencies
/// on other packs. Supplied wholesale by the caller; the engine never
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    pub id: String,
    pub name: String,
    /// Unique within one catalogue; the canonical graph-node key.
    pub slug: String,
    pub version: String,
    pub status: LifecycleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub dependencies: Vec<PackDependency>,
    #[serde(default)]
    pub optional_dependencies: Vec<PackDependency>,
}

impl Pack {
    pub fn required_deps(&self) -> impl Iterator<Item = &PackDependency> {
        self.dependencies.iter().filter(|dep| dep.required)
    }

    pub fn optional_deps(&self) -> impl Iterator<Item = &PackDependency> {
        self.dependencies
            .iter()
            .filter(|dep| !dep.required)
            .chain(self.optional_dependencies.iter())
    }

    pub fn all_deps(&self) -> impl Iterator<Item = &PackDependency> {
        self.dependencies
            .iter()
            .chain(self.optional_dependencies.iter())
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len() + self.optional_dependencies.len()
    }
}

/// A named unit of behavior owned by exactly one pack. Agents contribute
/// only to node metadata and never carry dependency edges of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub status: LifecycleStatus,
    #[serde(default)]
    pub pack_slug: String,
}

/// A directed reference from one pack to another. The target may be a raw
/// pack id or a "pack-"-prefixed slug; both forms are reconciled against the
/// live catalogue at build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackDependency {
    pub pack_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use crate::core::pack::{LifecycleStatus, Pack, PackDependency};

    fn dep(target: &str, required: bool) -> PackDependency {
        PackDependency {
            pack_id: target.to_string(),
            version: None,
            required,
        }
    }

    #[test]
    fn dependency_iterators_split_required_and_optional() {
        let pack = Pack {
            id: "p1".to_string(),
            name: "Core".to_string(),
            slug: "core".to_string(),
            version: "1.0.0".to_string(),
            status: LifecycleStatus::Active,
            description: None,
            agents: Vec::new(),
            dependencies: vec![dep("a", true), dep("b", false)],
            optional_dependencies: vec![dep("c", false)],
        };

        let required: Vec<_> = pack.required_deps().map(|d| d.pack_id.as_str()).collect();
        let optional: Vec<_> = pack.optional_deps().map(|d| d.pack_id.as_str()).collect();
        assert_eq!(required, vec!["a"]);
        assert_eq!(optional, vec!["b", "c"]);
        assert_eq!(pack.dependency_count(), 3);
    }

    #[test]
    fn dependency_required_defaults_to_true_when_absent() {
        let parsed: PackDependency =
            serde_json::from_str(r#"{"pack_id": "core"}"#).expect("parse dependency");
        assert!(parsed.required);
        assert!(parsed.version.is_none());
    }
}
