use std::fmt;
use std::sync::Arc;

use tracing::debug;

use cpl_engine::{InMemoryEngine, ProvenanceEngine};
use cpl_types::{ObjectId, ObjectInfo};

use crate::attribute::ObjectKey;
use crate::config::CplConfig;
use crate::error::{relay, CplError, CplResult};
use crate::object::CplObject;

/// Provenance client: creates objects and resolves natural keys.
///
/// The client is a thin, fail-fast relay over a [`ProvenanceEngine`]. It
/// never generates identifiers, never retries, and adds no locking of its
/// own; each call is as atomic as the engine makes it. Cloning is cheap and
/// shares the engine.
#[derive(Clone)]
pub struct Cpl {
    engine: Arc<dyn ProvenanceEngine>,
    config: CplConfig,
}

impl Cpl {
    /// Attach to an engine with the default configuration.
    pub fn attach(engine: Arc<dyn ProvenanceEngine>) -> Self {
        Self::with_config(engine, CplConfig::default())
    }

    /// Attach to an engine with the given configuration.
    pub fn with_config(engine: Arc<dyn ProvenanceEngine>, config: CplConfig) -> Self {
        Self { engine, config }
    }

    /// A client over a fresh [`InMemoryEngine`].
    pub fn in_memory() -> Self {
        Self::attach(Arc::new(InMemoryEngine::new()))
    }

    /// The underlying engine.
    pub fn engine(&self) -> &Arc<dyn ProvenanceEngine> {
        &self.engine
    }

    /// The client configuration.
    pub fn config(&self) -> &CplConfig {
        &self.config
    }

    // ---- Create / lookup ----

    /// Create a new object.
    ///
    /// The engine assigns the identifier. The returned handle caches the
    /// supplied key and container without asking the engine again. The
    /// container is kept as given, so its own cache comes along.
    pub fn create_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
        container: Option<&CplObject>,
    ) -> CplResult<CplObject> {
        let container_id = container.map_or_else(|| self.engine.null_id(), CplObject::id);
        let id = relay(
            "create_object",
            self.engine
                .create_object(originator, name, object_type, container_id),
        )?;

        debug!(%id, originator, name, object_type, "object created");
        Ok(CplObject::with_key_and_container(
            Arc::clone(&self.engine),
            id,
            ObjectKey::new(originator, name, object_type),
            container.cloned(),
        ))
    }

    /// Look up an object by natural key, returning `None` if there is none.
    ///
    /// Only a not-found outcome becomes `None`; every other engine failure
    /// is an error.
    pub fn try_lookup_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> CplResult<Option<CplObject>> {
        let id = match self.engine.lookup_object(originator, name, object_type) {
            Ok(id) => id,
            Err(err) if err.is_not_found() => {
                debug!(originator, name, object_type, "lookup miss");
                return Ok(None);
            }
            Err(err) => return relay("lookup_object", Err(err)),
        };

        debug!(%id, originator, name, object_type, "lookup hit");
        Ok(Some(self.lookup_handle(id, originator, name, object_type)))
    }

    /// Look up an object by natural key, failing with
    /// [`CplError::NotFound`] if there is none.
    pub fn lookup_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> CplResult<CplObject> {
        self.try_lookup_object(originator, name, object_type)?
            .ok_or_else(|| CplError::NotFound {
                message: Some(format!("no object {originator}/{name}/{object_type}")),
            })
    }

    /// Every object the engine has associated with a natural key, oldest
    /// first. Empty if there are none.
    pub fn lookup_all_objects(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> CplResult<Vec<CplObject>> {
        let ids = relay(
            "lookup_all_objects",
            self.engine.lookup_all_objects(originator, name, object_type),
        )?;
        Ok(ids
            .into_iter()
            .map(|id| self.lookup_handle(id, originator, name, object_type))
            .collect())
    }

    /// A handle for a known identifier. Nothing is cached and the engine is
    /// not consulted until an attribute is read.
    pub fn object(&self, id: ObjectId) -> CplObject {
        CplObject::bare(Arc::clone(&self.engine), id)
    }

    /// Records of every object known to the engine.
    pub fn all_objects(&self) -> CplResult<Vec<ObjectInfo>> {
        relay("all_objects", self.engine.all_objects())
    }

    fn lookup_handle(
        &self,
        id: ObjectId,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> CplObject {
        if self.config.cache_lookup_key {
            CplObject::with_key(
                Arc::clone(&self.engine),
                id,
                ObjectKey::new(originator, name, object_type),
            )
        } else {
            self.object(id)
        }
    }
}

impl fmt::Debug for Cpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpl").field("config", &self.config).finish()
    }
}
