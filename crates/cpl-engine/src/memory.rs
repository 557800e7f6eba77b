use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use cpl_types::{AncestryEntry, DependencyKind, Direction, ObjectId, ObjectInfo, ReturnCode};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::traits::ProvenanceEngine;

/// Natural key: (originator, name, type).
type KeyTuple = (String, String, String);

/// In-memory, HashMap-based provenance engine.
///
/// Intended for tests and embedding. All state is held behind a `RwLock`, so
/// each call is atomic with respect to every other call on the same engine.
/// Identifiers are `node_id:n` where `n` counts up from 1.
pub struct InMemoryEngine {
    config: EngineConfig,
    inner: RwLock<EngineState>,
}

#[derive(Default)]
struct EngineState {
    next_lo: u64,
    objects: HashMap<ObjectId, ObjectInfo>,
    /// Creation order.
    order: Vec<ObjectId>,
    /// Every object created under a key, oldest first.
    by_key: HashMap<KeyTuple, Vec<ObjectId>>,
    /// dependent -> its dependencies.
    ancestors: HashMap<ObjectId, Vec<AncestryEntry>>,
    /// dependency -> its dependents.
    descendants: HashMap<ObjectId, Vec<AncestryEntry>>,
}

impl InMemoryEngine {
    /// Create an empty engine with the default configuration.
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create an empty engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(EngineState {
                next_lo: 1,
                ..EngineState::default()
            }),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of objects currently recorded.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").objects.len()
    }

    /// Returns `true` if no objects have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, EngineState>> {
        self.inner.read().map_err(|e| {
            EngineError::with_message(ReturnCode::Internal, format!("lock poisoned: {e}"))
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, EngineState>> {
        self.inner.write().map_err(|e| {
            EngineError::with_message(ReturnCode::Internal, format!("lock poisoned: {e}"))
        })
    }

    fn check_string(&self, field: &str, value: &str) -> EngineResult<()> {
        if value.is_empty() {
            return Err(EngineError::invalid_argument(format!(
                "{field} must not be empty"
            )));
        }
        if value.len() > self.config.max_string_len {
            return Err(EngineError::invalid_argument(format!(
                "{field} exceeds {} bytes",
                self.config.max_string_len
            )));
        }
        Ok(())
    }

    fn check_key(&self, originator: &str, name: &str, object_type: &str) -> EngineResult<()> {
        self.check_string("originator", originator)?;
        self.check_string("name", name)?;
        self.check_string("type", object_type)
    }
}

impl Default for InMemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn key(originator: &str, name: &str, object_type: &str) -> KeyTuple {
    (originator.to_string(), name.to_string(), object_type.to_string())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn require_known(state: &EngineState, id: ObjectId) -> EngineResult<()> {
    if id.is_null() {
        return Err(EngineError::invalid_argument("the null object ID is not an object"));
    }
    if !state.objects.contains_key(&id) {
        return Err(EngineError::not_found(format!("no object {id}")));
    }
    Ok(())
}

fn version_of(state: &EngineState, id: ObjectId) -> u32 {
    state.objects.get(&id).map_or(0, |info| info.version)
}

impl ProvenanceEngine for InMemoryEngine {
    fn create_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
        container: ObjectId,
    ) -> EngineResult<ObjectId> {
        self.check_key(originator, name, object_type)?;

        let mut state = self.write()?;
        if !container.is_null() && !state.objects.contains_key(&container) {
            return Err(EngineError::invalid_argument(format!(
                "container {container} does not exist"
            )));
        }

        let lo = state.next_lo;
        state.next_lo = lo.checked_add(1).ok_or_else(|| {
            EngineError::with_message(
                ReturnCode::InsufficientResources,
                "identifier space exhausted",
            )
        })?;
        let id = ObjectId::new(self.config.node_id, lo);

        state.objects.insert(
            id,
            ObjectInfo {
                id,
                version: 0,
                creation_time: now_secs(),
                originator: originator.to_string(),
                name: name.to_string(),
                object_type: object_type.to_string(),
                container,
            },
        );
        state.order.push(id);
        state
            .by_key
            .entry(key(originator, name, object_type))
            .or_default()
            .push(id);

        debug!(%id, originator, name, object_type, %container, "created object");
        Ok(id)
    }

    fn lookup_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> EngineResult<ObjectId> {
        self.check_key(originator, name, object_type)?;

        let state = self.read()?;
        state
            .by_key
            .get(&key(originator, name, object_type))
            .and_then(|ids| ids.last().copied())
            .ok_or_else(|| {
                EngineError::not_found(format!("no object {originator}/{name}/{object_type}"))
            })
    }

    fn lookup_all_objects(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> EngineResult<Vec<ObjectId>> {
        self.check_key(originator, name, object_type)?;

        let state = self.read()?;
        Ok(state
            .by_key
            .get(&key(originator, name, object_type))
            .cloned()
            .unwrap_or_default())
    }

    fn object_info(&self, id: ObjectId) -> EngineResult<ObjectInfo> {
        let state = self.read()?;
        require_known(&state, id)?;
        state
            .objects
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::not_found(format!("no object {id}")))
    }

    fn all_objects(&self) -> EngineResult<Vec<ObjectInfo>> {
        let state = self.read()?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.objects.get(id).cloned())
            .collect())
    }

    fn new_version(&self, id: ObjectId) -> EngineResult<u32> {
        let mut state = self.write()?;
        require_known(&state, id)?;
        let info = state
            .objects
            .get_mut(&id)
            .ok_or_else(|| EngineError::not_found(format!("no object {id}")))?;
        info.version = info.version.checked_add(1).ok_or_else(|| {
            EngineError::with_message(
                ReturnCode::InsufficientResources,
                format!("version space of {id} exhausted"),
            )
        })?;

        debug!(%id, version = info.version, "new version");
        Ok(info.version)
    }

    fn add_dependency(
        &self,
        dependent: ObjectId,
        dependency: ObjectId,
        kind: DependencyKind,
    ) -> EngineResult<()> {
        if dependent == dependency {
            return Err(EngineError::invalid_argument(format!(
                "object {dependent} cannot depend on itself"
            )));
        }

        let mut state = self.write()?;
        require_known(&state, dependent)?;
        require_known(&state, dependency)?;
        let dependent_version = version_of(&state, dependent);
        let dependency_version = version_of(&state, dependency);

        let upward = AncestryEntry {
            query_version: dependent_version,
            other: dependency,
            other_version: dependency_version,
            kind,
        };
        let edges = state.ancestors.entry(dependent).or_default();
        if edges.contains(&upward) {
            debug!(%dependent, %dependency, %kind, "duplicate dependency ignored");
            return Ok(());
        }
        edges.push(upward);
        state
            .descendants
            .entry(dependency)
            .or_default()
            .push(AncestryEntry {
                query_version: dependency_version,
                other: dependent,
                other_version: dependent_version,
                kind,
            });

        debug!(
            %dependent,
            dependent_version,
            %dependency,
            dependency_version,
            %kind,
            "recorded dependency"
        );
        Ok(())
    }

    fn ancestry(&self, id: ObjectId, direction: Direction) -> EngineResult<Vec<AncestryEntry>> {
        let state = self.read()?;
        require_known(&state, id)?;
        let edges = match direction {
            Direction::Ancestors => state.ancestors.get(&id),
            Direction::Descendants => state.descendants.get(&id),
        };
        Ok(edges.cloned().unwrap_or_default())
    }
}

impl std::fmt::Debug for InMemoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEngine")
            .field("node_id", &self.config.node_id)
            .field("object_count", &self.len())
            .finish()
    }
}
