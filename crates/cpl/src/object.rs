//! Process-local handles to provenance objects.
//!
//! A [`CplObject`] pairs an [`ObjectId`] with a cache of the object's
//! descriptive attributes. The engine owns the object; the handle only
//! remembers what it has been told or has fetched.
//!
//! # Caching
//!
//! - Handles from [`Cpl::create_object`] know their key and container. The
//!   container is the caller's own handle, with whatever it had cached.
//! - Handles from a natural-key lookup know the key they were found with,
//!   but not their container.
//! - Handles from [`Cpl::object`] know nothing but their id.
//!
//! Missing attributes are fetched from the engine on first access. Each
//! cache slot is written at most once: the first successful fetch wins and
//! later fetches leave it untouched.
//!
//! [`Cpl::create_object`]: crate::Cpl::create_object
//! [`Cpl::object`]: crate::Cpl::object

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use cpl_engine::ProvenanceEngine;
use cpl_types::{AncestryEntry, DependencyKind, Direction, ObjectId, ObjectInfo};

use crate::attribute::{Attribute, ObjectKey};
use crate::error::{relay, CplResult};

/// Handle to one provenance object.
///
/// Equality and hashing use the id only, so two handles to the same object
/// are equal whatever each has cached.
#[derive(Clone)]
pub struct CplObject {
    id: ObjectId,
    engine: Arc<dyn ProvenanceEngine>,
    key: OnceLock<ObjectKey>,
    /// `Some(None)` means known to have no container.
    container: OnceLock<Option<Box<CplObject>>>,
}

impl CplObject {
    /// A handle that knows only its id.
    pub(crate) fn bare(engine: Arc<dyn ProvenanceEngine>, id: ObjectId) -> Self {
        Self {
            id,
            engine,
            key: OnceLock::new(),
            container: OnceLock::new(),
        }
    }

    /// A handle that knows its natural key.
    pub(crate) fn with_key(
        engine: Arc<dyn ProvenanceEngine>,
        id: ObjectId,
        key: ObjectKey,
    ) -> Self {
        let object = Self::bare(engine, id);
        let _ = object.key.set(key);
        object
    }

    /// A handle that knows its natural key and its container.
    pub(crate) fn with_key_and_container(
        engine: Arc<dyn ProvenanceEngine>,
        id: ObjectId,
        key: ObjectKey,
        container: Option<CplObject>,
    ) -> Self {
        let object = Self::with_key(engine, id, key);
        let _ = object.container.set(container.map(Box::new));
        object
    }

    /// The object's identifier.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    // ---- Cache inspection (never calls the engine) ----

    /// The cached natural key, if known.
    pub fn cached_key(&self) -> Option<&ObjectKey> {
        self.key.get()
    }

    /// What this handle knows about its container.
    pub fn container_state(&self) -> Attribute<ObjectId> {
        match self.container.get() {
            None => Attribute::Unknown,
            Some(container) => Attribute::known(container.as_ref().map(|c| c.id)),
        }
    }

    /// Whether the container (or its absence) is known.
    pub fn knows_container(&self) -> bool {
        self.container.get().is_some()
    }

    // ---- Attribute access (fetches on a cache miss) ----

    /// The natural key, fetched from the engine if not cached.
    pub fn key(&self) -> CplResult<&ObjectKey> {
        if let Some(key) = self.key.get() {
            return Ok(key);
        }
        let info = self.fetch()?;
        Ok(self.key.get_or_init(|| ObjectKey::from(&info)))
    }

    /// The originator, fetched from the engine if not cached.
    pub fn originator(&self) -> CplResult<&str> {
        Ok(&self.key()?.originator)
    }

    /// The name, fetched from the engine if not cached.
    pub fn name(&self) -> CplResult<&str> {
        Ok(&self.key()?.name)
    }

    /// The type, fetched from the engine if not cached.
    pub fn object_type(&self) -> CplResult<&str> {
        Ok(&self.key()?.object_type)
    }

    /// The containing object, fetched from the engine if not known.
    ///
    /// A fetched container handle knows only its id.
    pub fn container(&self) -> CplResult<Option<CplObject>> {
        let container = match self.container.get() {
            Some(container) => container,
            None => {
                let info = self.fetch()?;
                self.fill_container(&info)
            }
        };
        Ok(container.as_deref().cloned())
    }

    /// The full record from the engine. Always a round trip.
    pub fn info(&self) -> CplResult<ObjectInfo> {
        self.fetch()
    }

    /// The current version. Always a round trip, since versions move.
    pub fn version(&self) -> CplResult<u32> {
        Ok(self.fetch()?.version)
    }

    /// Start a new version of this object and return its number.
    pub fn new_version(&self) -> CplResult<u32> {
        relay("new_version", self.engine.new_version(self.id))
    }

    // ---- Dependencies ----

    /// Record that this object depends on `other`.
    pub fn depends_on(&self, other: &CplObject, kind: DependencyKind) -> CplResult<()> {
        relay(
            "add_dependency",
            self.engine.add_dependency(self.id, other.id, kind),
        )
    }

    /// One-hop ancestry of this object in the given direction.
    pub fn ancestry(&self, direction: Direction) -> CplResult<Vec<AncestryEntry>> {
        relay("ancestry", self.engine.ancestry(self.id, direction))
    }

    /// Fetch the record and fill any empty cache slots from it.
    fn fetch(&self) -> CplResult<ObjectInfo> {
        let info = relay("object_info", self.engine.object_info(self.id))?;
        let _ = self.key.set(ObjectKey::from(&info));
        self.fill_container(&info);
        Ok(info)
    }

    /// Fill the container slot from a fetched record unless already set.
    ///
    /// "No container" is whatever the engine's null id is.
    fn fill_container(&self, info: &ObjectInfo) -> &Option<Box<CplObject>> {
        self.container.get_or_init(|| {
            info.container_given(self.engine.null_id())
                .map(|id| Box::new(Self::bare(Arc::clone(&self.engine), id)))
        })
    }
}

impl PartialEq for CplObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CplObject {}

impl Hash for CplObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for CplObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for CplObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CplObject")
            .field("id", &self.id)
            .field("key", &self.key.get())
            .field("container", &self.container_state())
            .finish()
    }
}
