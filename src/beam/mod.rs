// Beamforming control state: cached array snapshot plus the single-flight
// guard that keeps slider spam from issuing overlapping backend updates.

use crate::models::PhasedArraySnapshot;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub struct BeamState {
    updating: AtomicBool,
    snapshot: Mutex<Option<PhasedArraySnapshot>>,
}

impl BeamState {
    /// Claims the update slot. Returns `None` if another control update is
    /// already in flight; the caller should skip its work (mirrors the
    /// frontend behavior of ignoring slider input during an update).
    pub fn try_begin_update(self: &Arc<Self>) -> Option<UpdateGuard> {
        if self
            .updating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Some(UpdateGuard(self.clone()))
        } else {
            None
        }
    }

    pub fn cache_snapshot(&self, snapshot: PhasedArraySnapshot) {
        *self.snapshot.lock() = Some(snapshot);
    }

    pub fn snapshot(&self) -> Option<PhasedArraySnapshot> {
        self.snapshot.lock().clone()
    }
}

/// Releases the update slot when dropped, early returns included
pub struct UpdateGuard(Arc<BeamState>);

impl Drop for UpdateGuard {
    fn drop(&mut self) {
        self.0.updating.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_slot_is_single_flight() {
        let state = Arc::new(BeamState::default());

        let guard = state.try_begin_update().unwrap();
        assert!(state.try_begin_update().is_none());

        drop(guard);
        assert!(state.try_begin_update().is_some());
    }

    #[test]
    fn test_snapshot_cache_round_trips() {
        use crate::models::Geometry;

        let state = BeamState::default();
        assert!(state.snapshot().is_none());

        state.cache_snapshot(PhasedArraySnapshot {
            current_frequency: 1.0,
            phase_shift: 0.0,
            distance: 0.5,
            radius: 1.0,
            geometry: Geometry::Linear,
            transmitter_count: 3,
        });
        assert_eq!(state.snapshot().unwrap().transmitter_count, 3);
    }
}
