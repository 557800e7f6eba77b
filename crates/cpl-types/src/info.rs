//! Descriptive records returned by the engine.

use serde::{Deserialize, Serialize};

use crate::object::ObjectId;

/// Full descriptive record of a provenance object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// The object's identifier.
    pub id: ObjectId,
    /// Current version. Starts at 0 and only grows.
    pub version: u32,
    /// Creation time, seconds since the UNIX epoch.
    pub creation_time: u64,
    /// Namespace/agent that created the object.
    pub originator: String,
    /// Name within the originator's namespace.
    pub name: String,
    /// Application-defined object category.
    pub object_type: String,
    /// Containing object, or [`ObjectId::NULL`] if none.
    pub container: ObjectId,
}

impl ObjectInfo {
    /// The container, or `None` if the object has none.
    ///
    /// Assumes the engine uses [`ObjectId::NULL`] for "no container"; use
    /// [`ObjectInfo::container_given`] against the engine's own sentinel.
    pub fn container(&self) -> Option<ObjectId> {
        self.container_given(ObjectId::NULL)
    }

    /// The container, treating `null` as "no container".
    pub fn container_given(&self, null: ObjectId) -> Option<ObjectId> {
        (self.container != null).then_some(self.container)
    }
}

/// Kind of dependency between two objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// The dependent object was produced from the other's data.
    Data,
    /// The dependent object was started or controlled by the other.
    Control,
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data => write!(f, "data"),
            Self::Control => write!(f, "control"),
        }
    }
}

/// Which side of a dependency edge an ancestry query reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Objects the queried object depends on.
    Ancestors,
    /// Objects that depend on the queried object.
    Descendants,
}

/// One dependency edge as seen from the queried object.
///
/// Versions are those of each end when the edge was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AncestryEntry {
    /// Version of the queried object on this edge.
    pub query_version: u32,
    /// The object on the other end of the edge.
    pub other: ObjectId,
    /// Version of the other object on this edge.
    pub other_version: u32,
    /// The kind of dependency.
    pub kind: DependencyKind,
}
