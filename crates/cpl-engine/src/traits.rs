use cpl_types::{AncestryEntry, DependencyKind, Direction, ObjectId, ObjectInfo};

use crate::error::EngineResult;

/// The provenance engine: owner of all durable object state.
///
/// All implementations must satisfy these invariants:
/// - Identifiers are minted by the engine, are globally unique, and are never
///   reused. [`null_id`](ProvenanceEngine::null_id) is never assigned.
/// - A single `create_object` or `lookup_object` call is atomic. No ordering
///   is promised between concurrent calls.
/// - `NotFound` is reported through [`ReturnCode::NotFound`]; every other
///   failure uses its own code.
///
/// [`ReturnCode::NotFound`]: cpl_types::ReturnCode::NotFound
pub trait ProvenanceEngine: Send + Sync {
    /// Mint a new object with the given attributes and container edge.
    ///
    /// `container` is [`null_id`](ProvenanceEngine::null_id) when the object
    /// has no container. Returns the freshly assigned identifier.
    fn create_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
        container: ObjectId,
    ) -> EngineResult<ObjectId>;

    /// Resolve a natural key to the object currently associated with it.
    ///
    /// Fails with `NotFound` if no object matches.
    fn lookup_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> EngineResult<ObjectId>;

    /// Resolve a natural key to every object ever associated with it.
    ///
    /// Returns an empty vec (not an error) if nothing matches.
    fn lookup_all_objects(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> EngineResult<Vec<ObjectId>>;

    /// Fetch the full descriptive record of an object.
    fn object_info(&self, id: ObjectId) -> EngineResult<ObjectInfo>;

    /// Records of every object known to the engine, in creation order.
    fn all_objects(&self) -> EngineResult<Vec<ObjectInfo>>;

    /// Bump an object's version and return the new one.
    ///
    /// Versions start at 0 on creation and never go back.
    fn new_version(&self, id: ObjectId) -> EngineResult<u32>;

    /// Record that `dependent` depends on `dependency`, stamped with the
    /// current version of each.
    ///
    /// Recording an edge that already exists at the same versions is a no-op.
    fn add_dependency(
        &self,
        dependent: ObjectId,
        dependency: ObjectId,
        kind: DependencyKind,
    ) -> EngineResult<()>;

    /// One-hop ancestry of an object in the given direction.
    fn ancestry(&self, id: ObjectId, direction: Direction) -> EngineResult<Vec<AncestryEntry>>;

    /// The identifier that denotes "no object".
    fn null_id(&self) -> ObjectId {
        ObjectId::NULL
    }
}
