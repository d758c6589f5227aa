use super::record::{RatingSnapshot, RatingStatus, Terminal};
use crate::Result;
use crate::facts::ArtifactId;
use chrono::{DateTime, Utc};
use ohno::bail;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Receives the terminal state of a rating cycle. `None` while the cycle is pending.
pub type CycleWatch = watch::Receiver<Option<Terminal>>;

/// What a caller asking for a rating is allowed to do.
#[derive(Debug)]
pub enum Admission {
    /// The caller started a new cycle and must run it.
    Owner { cycle: u64, watch: CycleWatch },

    /// A cycle is already running; the caller should wait on it.
    Waiter(CycleWatch),

    /// The record is terminal and the caller did not ask for a new cycle.
    Finished(Terminal),
}

#[derive(Debug)]
struct Slot {
    cycle: u64,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    state: watch::Sender<Option<Terminal>>,
}

impl Slot {
    fn pending(cycle: u64) -> Self {
        Self {
            cycle,
            started_at: Utc::now(),
            finished_at: None,
            state: watch::Sender::new(None),
        }
    }

    fn restart(&mut self) {
        self.cycle += 1;
        self.started_at = Utc::now();
        self.finished_at = None;
        let _ = self.state.send_replace(None);
    }

    fn terminal(&self) -> Option<Terminal> {
        self.state.borrow().clone()
    }

    fn snapshot(&self, id: &ArtifactId) -> RatingSnapshot {
        let terminal = self.terminal();
        let (status, result, failure) = match terminal {
            None => (RatingStatus::Pending, None, None),
            Some(Terminal::Completed(result)) => (RatingStatus::Completed, Some(result), None),
            Some(Terminal::Disqualified(result)) => (RatingStatus::Disqualified, Some(result), None),
            Some(Terminal::Failed(reason)) => (RatingStatus::Failed, None, Some(reason)),
        };

        RatingSnapshot {
            id: id.clone(),
            status,
            result,
            failure,
            started_at: self.started_at,
            finished_at: self.finished_at,
            cycle: self.cycle,
        }
    }
}

/// Rating records for every artifact the engine has been asked about.
///
/// The store is the engine's only mutable shared state. A single mutex guards the map; each record carries a
/// watch channel that callers wait on while the record is pending, so the lock is never held across an await.
/// Records stay until they are forgotten.
#[derive(Debug, Default)]
pub struct RatingStore {
    slots: Mutex<HashMap<ArtifactId, Slot>>,
}

impl RatingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ArtifactId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decide how a caller proceeds for `id`, creating a pending record if there is none.
    ///
    /// With `restart` set, a terminal record is reset to pending under a new cycle; otherwise its terminal state
    /// is returned. A pending record is always joined.
    pub fn admit(&self, id: &ArtifactId, restart: bool) -> Admission {
        let mut slots = self.lock();

        let Some(slot) = slots.get_mut(id) else {
            let slot = Slot::pending(1);
            let watch = slot.state.subscribe();
            let _ = slots.insert(id.clone(), slot);
            return Admission::Owner { cycle: 1, watch };
        };

        match slot.terminal() {
            None => Admission::Waiter(slot.state.subscribe()),
            Some(terminal) if !restart => Admission::Finished(terminal),
            Some(_) => {
                slot.restart();
                Admission::Owner {
                    cycle: slot.cycle,
                    watch: slot.state.subscribe(),
                }
            }
        }
    }

    /// Record the end of cycle `cycle` for `id`.
    ///
    /// Returns `false`, leaving the record untouched, if the record is gone, belongs to another cycle, or is
    /// already terminal.
    pub fn finish(&self, id: &ArtifactId, cycle: u64, terminal: Terminal) -> bool {
        let mut slots = self.lock();
        let Some(slot) = slots.get_mut(id) else {
            return false;
        };

        if slot.cycle != cycle || slot.terminal().is_some() {
            return false;
        }

        slot.finished_at = Some(Utc::now());
        let _ = slot.state.send_replace(Some(terminal));
        true
    }

    #[must_use]
    pub fn snapshot(&self, id: &ArtifactId) -> Option<RatingSnapshot> {
        self.lock().get(id).map(|slot| slot.snapshot(id))
    }

    /// Snapshots of every record, sorted by artifact id.
    #[must_use]
    pub fn snapshots(&self) -> Vec<RatingSnapshot> {
        let mut snapshots: Vec<_> = self.lock().iter().map(|(id, slot)| slot.snapshot(id)).collect();
        snapshots.sort_by(|a, b| a.id.cmp(&b.id));
        snapshots
    }

    /// Remove the terminal record for `id`.
    ///
    /// Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is still pending.
    pub fn forget(&self, id: &ArtifactId) -> Result<bool> {
        let mut slots = self.lock();
        match slots.get(id) {
            None => Ok(false),
            Some(slot) if slot.terminal().is_none() => bail!("the rating of '{id}' is still in progress"),
            Some(_) => Ok(slots.remove(id).is_some()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{ArtifactKind, ArtifactRef};
    use std::sync::Arc;

    fn id(name: &str) -> ArtifactId {
        ArtifactRef::new(ArtifactKind::Model, name, None).id()
    }

    fn failed(reason: &str) -> Terminal {
        Terminal::Failed(Arc::from(reason))
    }

    #[test]
    fn first_caller_owns_the_cycle_and_others_wait() {
        let store = RatingStore::new();
        let id = id("org/a");

        assert!(matches!(store.admit(&id, false), Admission::Owner { cycle: 1, .. }));
        assert!(matches!(store.admit(&id, false), Admission::Waiter(_)));
        assert!(matches!(store.admit(&id, true), Admission::Waiter(_)), "re-rating joins a pending cycle");
        assert_eq!(store.snapshot(&id).unwrap().status, RatingStatus::Pending);
    }

    #[test]
    fn finishing_releases_waiters() {
        let store = RatingStore::new();
        let id = id("org/a");

        let Admission::Owner { cycle, watch } = store.admit(&id, false) else {
            panic!("first caller must own the cycle");
        };

        assert!(store.finish(&id, cycle, failed("boom")));
        assert_eq!(*watch.borrow(), Some(failed("boom")));

        let snapshot = store.snapshot(&id).unwrap();
        assert_eq!(snapshot.status, RatingStatus::Failed);
        assert!(snapshot.finished_at.is_some());
        assert!(matches!(store.admit(&id, false), Admission::Finished(Terminal::Failed(_))));
    }

    #[test]
    fn status_leaves_pending_exactly_once() {
        let store = RatingStore::new();
        let id = id("org/a");
        let _ = store.admit(&id, false);

        assert!(store.finish(&id, 1, failed("first")));
        assert!(!store.finish(&id, 1, failed("second")));
        assert_eq!(store.snapshot(&id).unwrap().failure.as_deref(), Some("first"));
    }

    #[test]
    fn restart_starts_a_new_cycle() {
        let store = RatingStore::new();
        let id = id("org/a");
        let _ = store.admit(&id, false);
        let _ = store.finish(&id, 1, failed("first"));

        assert!(matches!(store.admit(&id, true), Admission::Owner { cycle: 2, .. }));
        assert!(!store.finish(&id, 1, failed("stale")), "stale cycles cannot finish the new one");

        let snapshot = store.snapshot(&id).unwrap();
        assert_eq!(snapshot.status, RatingStatus::Pending);
        assert_eq!(snapshot.cycle, 2);
    }

    #[test]
    fn forget_only_removes_terminal_records() {
        let store = RatingStore::new();
        let id = id("org/a");

        assert!(!store.forget(&id).unwrap());

        let _ = store.admit(&id, false);
        let _ = store.forget(&id).unwrap_err();

        let _ = store.finish(&id, 1, failed("done"));
        assert!(store.forget(&id).unwrap());
        assert!(store.is_empty());
    }
}
