use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use cpl::{
    AncestryEntry, Attribute, Cpl, CplObject, DependencyKind, Direction, EngineConfig,
    EngineResult, InMemoryEngine, ObjectId, ObjectInfo, ProvenanceEngine,
};

/// Wraps the in-memory engine and counts attribute fetches.
struct CountingEngine {
    inner: InMemoryEngine,
    info_calls: AtomicUsize,
}

impl CountingEngine {
    fn new() -> Self {
        Self {
            inner: InMemoryEngine::new(),
            info_calls: AtomicUsize::new(0),
        }
    }

    fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }
}

impl ProvenanceEngine for CountingEngine {
    fn create_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
        container: ObjectId,
    ) -> EngineResult<ObjectId> {
        self.inner.create_object(originator, name, object_type, container)
    }

    fn lookup_object(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> EngineResult<ObjectId> {
        self.inner.lookup_object(originator, name, object_type)
    }

    fn lookup_all_objects(
        &self,
        originator: &str,
        name: &str,
        object_type: &str,
    ) -> EngineResult<Vec<ObjectId>> {
        self.inner.lookup_all_objects(originator, name, object_type)
    }

    fn object_info(&self, id: ObjectId) -> EngineResult<ObjectInfo> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.object_info(id)
    }

    fn all_objects(&self) -> EngineResult<Vec<ObjectInfo>> {
        self.inner.all_objects()
    }

    fn new_version(&self, id: ObjectId) -> EngineResult<u32> {
        self.inner.new_version(id)
    }

    fn add_dependency(
        &self,
        dependent: ObjectId,
        dependency: ObjectId,
        kind: DependencyKind,
    ) -> EngineResult<()> {
        self.inner.add_dependency(dependent, dependency, kind)
    }

    fn ancestry(&self, id: ObjectId, direction: Direction) -> EngineResult<Vec<AncestryEntry>> {
        self.inner.ancestry(id, direction)
    }
}

fn counting_client() -> (Arc<CountingEngine>, Cpl) {
    let engine = Arc::new(CountingEngine::new());
    let cpl = Cpl::attach(engine.clone());
    (engine, cpl)
}

fn hash_of(object: &CplObject) -> u64 {
    let mut hasher = DefaultHasher::new();
    object.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn create_then_lookup_scenario() {
    let cpl = Cpl::in_memory();
    let created = cpl.create_object("app1", "input.csv", "file", None).unwrap();
    assert_eq!(created.id(), ObjectId::new(0x1, 0x1));

    let found = cpl
        .try_lookup_object("app1", "input.csv", "file")
        .unwrap()
        .expect("object should exist");
    assert_eq!(found.id(), created.id());

    assert!(cpl
        .try_lookup_object("app1", "missing.csv", "file")
        .unwrap()
        .is_none());
    assert!(cpl
        .lookup_object("app1", "missing.csv", "file")
        .unwrap_err()
        .is_not_found());
}

#[test]
fn create_then_lookup_agrees_for_many_keys() {
    let cpl = Cpl::in_memory();
    let root = cpl.create_object("app1", "root", "dir", None).unwrap();
    for i in 0..20 {
        let container = if i % 2 == 0 { Some(&root) } else { None };
        let name = format!("file-{i}");
        let created = cpl.create_object("app1", &name, "file", container).unwrap();
        let found = cpl.lookup_object("app1", &name, "file").unwrap();
        assert_eq!(found.id(), created.id());
    }
}

#[test]
fn created_handle_knows_container_without_engine_call() {
    let (engine, cpl) = counting_client();
    let parent = cpl.create_object("app1", "run", "process", None).unwrap();
    let child = cpl.create_object("app1", "step", "process", Some(&parent)).unwrap();

    assert!(child.knows_container());
    let container = child.container().unwrap().expect("container should be set");
    assert_eq!(container.id(), parent.id());
    assert_eq!(child.originator().unwrap(), "app1");
    assert_eq!(child.name().unwrap(), "step");
    assert_eq!(child.object_type().unwrap(), "process");
    assert_eq!(engine.info_calls(), 0);
}

#[test]
fn created_handle_keeps_the_callers_container_handle() {
    let (engine, cpl) = counting_client();
    let parent = cpl.create_object("app1", "run", "process", None).unwrap();
    let child = cpl.create_object("app1", "step", "process", Some(&parent)).unwrap();

    let container = child.container().unwrap().expect("container should be set");
    assert_eq!(container.name().unwrap(), "run");
    assert!(container.knows_container());
    assert_eq!(container.container_state(), Attribute::Absent);
    assert_eq!(engine.info_calls(), 0);
}

#[test]
fn bare_handle_does_not_know_container_until_fetched() {
    let (engine, cpl) = counting_client();
    let parent = cpl.create_object("app1", "run", "process", None).unwrap();
    let child = cpl.create_object("app1", "step", "process", Some(&parent)).unwrap();

    let bare = cpl.object(child.id());
    assert!(!bare.knows_container());
    assert_eq!(bare.container_state(), Attribute::Unknown);
    assert_eq!(engine.info_calls(), 0);

    assert_eq!(bare.container().unwrap(), Some(parent));
    assert!(bare.knows_container());
    assert_eq!(engine.info_calls(), 1);

    // Later reads come from the cache.
    assert_eq!(bare.name().unwrap(), "step");
    bare.container().unwrap();
    assert_eq!(engine.info_calls(), 1);
}

#[test]
fn lookup_handle_fetches_only_the_container() {
    let (engine, cpl) = counting_client();
    cpl.create_object("app1", "input.csv", "file", None).unwrap();

    let found = cpl.lookup_object("app1", "input.csv", "file").unwrap();
    assert_eq!(found.originator().unwrap(), "app1");
    assert_eq!(engine.info_calls(), 0);

    assert!(!found.knows_container());
    assert!(found.container().unwrap().is_none());
    assert_eq!(found.container_state(), Attribute::Absent);
    assert_eq!(engine.info_calls(), 1);
}

#[test]
fn independently_obtained_handles_are_equal() {
    let cpl = Cpl::in_memory();
    let created = cpl.create_object("app1", "input.csv", "file", None).unwrap();
    let bare = cpl.object(created.id());

    assert!(created.cached_key().is_some());
    assert!(bare.cached_key().is_none());
    assert_eq!(created, bare);
    assert_eq!(hash_of(&created), hash_of(&bare));
    assert_eq!(created.to_string(), "1:1");
}

#[test]
fn concurrent_creates_get_distinct_ids() {
    let engine = Arc::new(
        InMemoryEngine::with_config(EngineConfig {
            node_id: 3,
            ..EngineConfig::default()
        })
        .unwrap(),
    );
    let cpl = Cpl::attach(engine);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cpl = cpl.clone();
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        cpl.create_object("worker", &format!("{t}-{i}"), "task", None)
                            .unwrap()
                            .id()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<ObjectId> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
    assert!(ids.iter().all(|id| id.hi() == 3 && !id.is_null()));
}

#[test]
fn lineage_round_trip() {
    let cpl = Cpl::in_memory();
    let run = cpl.create_object("app1", "run-1", "process", None).unwrap();
    let input = cpl.create_object("app1", "input.csv", "file", None).unwrap();
    let output = cpl.create_object("app1", "output.csv", "file", Some(&run)).unwrap();

    assert_eq!(input.new_version().unwrap(), 1);
    output.depends_on(&input, DependencyKind::Data).unwrap();
    output.depends_on(&run, DependencyKind::Control).unwrap();

    let ancestors = output.ancestry(Direction::Ancestors).unwrap();
    assert_eq!(ancestors.len(), 2);
    assert!(ancestors.contains(&AncestryEntry {
        query_version: 0,
        other: input.id(),
        other_version: 1,
        kind: DependencyKind::Data,
    }));
    assert!(ancestors.contains(&AncestryEntry {
        query_version: 0,
        other: run.id(),
        other_version: 0,
        kind: DependencyKind::Control,
    }));

    let descendants = input.ancestry(Direction::Descendants).unwrap();
    assert_eq!(descendants.len(), 1);
    assert_eq!(cpl.object(descendants[0].other), output);
    assert_eq!(descendants[0].query_version, 1);
    assert_eq!(descendants[0].other_version, 0);
    assert_eq!(input.version().unwrap(), 1);
}
