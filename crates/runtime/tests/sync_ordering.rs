//! Ordering properties of the sync engine: no save before the initial load
//! resolves, and last-mutation-wins under coalescing.

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use sheet_core::Attribute;

use runtime::{CharacterSnapshot, RemoteError, RemoteStore, SheetRuntime};

/// Remote store whose load and save block until the test releases a
/// permit, so request completion order is under test control.
struct GatedRemote {
    load_gate: Semaphore,
    save_gate: Semaphore,
    seed: Option<CharacterSnapshot>,
    slot: RwLock<Option<CharacterSnapshot>>,
    save_count: AtomicUsize,
}

impl GatedRemote {
    fn new(open_loads: usize, open_saves: usize) -> Self {
        Self {
            load_gate: Semaphore::new(open_loads),
            save_gate: Semaphore::new(open_saves),
            seed: None,
            slot: RwLock::new(None),
            save_count: AtomicUsize::new(0),
        }
    }

    fn release_load(&self) {
        self.load_gate.add_permits(1);
    }

    fn release_saves(&self, count: usize) {
        self.save_gate.add_permits(count);
    }

    fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    fn stored(&self) -> Option<CharacterSnapshot> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }
}

#[async_trait]
impl RemoteStore for GatedRemote {
    async fn load(&self) -> Result<Option<CharacterSnapshot>, RemoteError> {
        let permit = self
            .load_gate
            .acquire()
            .await
            .map_err(|_| RemoteError::Transport("gate closed".to_string()))?;
        permit.forget();
        Ok(self.seed.clone())
    }

    async fn save(&self, snapshot: &CharacterSnapshot) -> Result<(), RemoteError> {
        let permit = self
            .save_gate
            .acquire()
            .await
            .map_err(|_| RemoteError::Transport("gate closed".to_string()))?;
        permit.forget();
        let mut slot = self
            .slot
            .write()
            .map_err(|_| RemoteError::Transport("lock poisoned".to_string()))?;
        *slot = Some(snapshot.clone());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Remote store that always fails, for availability checks.
struct BrokenRemote;

#[async_trait]
impl RemoteStore for BrokenRemote {
    async fn load(&self) -> Result<Option<CharacterSnapshot>, RemoteError> {
        Err(RemoteError::Status(503))
    }

    async fn save(&self, _snapshot: &CharacterSnapshot) -> Result<(), RemoteError> {
        Err(RemoteError::Status(503))
    }
}

#[tokio::test]
async fn no_save_is_dispatched_before_the_load_resolves() {
    // Load blocked; saves wide open. Any premature save would land.
    let remote = Arc::new(GatedRemote::new(0, 1000));
    let rt = SheetRuntime::builder()
        .shared_remote_store(remote.clone() as Arc<dyn RemoteStore>)
        .build()
        .unwrap();
    let handle = rt.handle();

    // Script a burst of mutations while the load is still in flight.
    handle.increment_attribute(Attribute::Strength).await.unwrap();
    handle.increment_attribute(Attribute::Strength).await.unwrap();
    handle.select_class("Barbarian").await.unwrap();
    handle.increment_skill("Athletics").await.unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(
        remote.save_count(),
        0,
        "a save was dispatched before the load resolved"
    );

    // Once the load resolves the coalesced state flows out.
    remote.release_load();
    let expected = handle.character().await.unwrap();
    drop(handle);
    rt.shutdown().await.unwrap();

    assert!(remote.save_count() >= 1);
    let stored = remote.stored().expect("final save landed");
    assert_eq!(stored.attributes.as_ref().unwrap()[&Attribute::Strength], 12);
    assert_eq!(
        stored.selected_class,
        Some(expected.selected_class.clone())
    );
    assert_eq!(stored.skill_points.as_ref().unwrap()["Athletics"], 1);
}

#[tokio::test]
async fn rapid_mutations_coalesce_to_the_last_state() {
    // Load open; saves blocked so mutations pile up behind one in-flight
    // save and the pending slot.
    let remote = Arc::new(GatedRemote::new(1, 0));
    let rt = SheetRuntime::builder()
        .shared_remote_store(remote.clone() as Arc<dyn RemoteStore>)
        .build()
        .unwrap();
    let handle = rt.handle();

    for _ in 0..5 {
        handle.increment_attribute(Attribute::Wisdom).await.unwrap();
    }
    let final_state = handle.character().await.unwrap();
    assert_eq!(final_state.attributes.wisdom, 15);

    // Let the worker drain its event backlog, then open the save gate.
    tokio::time::sleep(Duration::from_millis(200)).await;
    remote.release_saves(1000);

    drop(handle);
    rt.shutdown().await.unwrap();

    // The first save (oldest snapshot) plus at most one coalesced save for
    // everything that arrived while it was blocked.
    assert!(remote.save_count() >= 1);
    assert!(
        remote.save_count() <= 2,
        "intermediate snapshots were not coalesced: {} saves",
        remote.save_count()
    );
    let stored = remote.stored().expect("final save landed");
    assert_eq!(
        stored.attributes.as_ref().unwrap()[&Attribute::Wisdom],
        15,
        "an earlier snapshot overwrote the last mutation's state"
    );
}

#[tokio::test]
async fn failed_remote_never_blocks_the_session() {
    let rt = SheetRuntime::builder()
        .remote_store(BrokenRemote)
        .build()
        .unwrap();
    let handle = rt.handle();

    // Load failed; the engine still reaches Ready and mutations apply to
    // local defaults.
    let outcome = handle.increment_attribute(Attribute::Dexterity).await.unwrap();
    assert!(outcome.applied());

    // Save failures are logged and dropped; the local state is untouched.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let character = handle.character().await.unwrap();
    assert_eq!(character.attributes.dexterity, 11);

    drop(handle);
    rt.shutdown().await.unwrap();
}

#[tokio::test]
async fn builder_requires_a_remote_store() {
    let err = SheetRuntime::builder().build().err().expect("must fail");
    assert!(matches!(err, runtime::SyncError::MissingRemoteStore));
}
