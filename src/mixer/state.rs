// Shared mixer state: the job sequencer and the single-flight mix flag
use crate::mixer::regions::RegionBoard;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// State shared between mix commands and poller threads.
///
/// Job identifiers only ever grow. Exactly one job is current at a time;
/// superseded pollers notice the newer identifier and terminate without
/// touching the output surface. Cancellation is advisory: an in-flight
/// status fetch is allowed to complete and its effects are discarded by the
/// identifier comparison.
pub struct MixerState {
    job_counter: AtomicU64,
    is_mixing: AtomicBool,
    job_started_at: Mutex<Option<DateTime<Utc>>>,
    pub regions: Mutex<RegionBoard>,
}

impl Default for MixerState {
    fn default() -> Self {
        Self {
            job_counter: AtomicU64::new(0),
            is_mixing: AtomicBool::new(false),
            job_started_at: Mutex::new(None),
            regions: Mutex::new(RegionBoard::default()),
        }
    }
}

impl MixerState {
    /// Issues a fresh job identifier, strictly greater than all previous
    /// ones. The previously current job is superseded the moment this
    /// returns; its poller will observe the new identifier and stop.
    pub fn begin_job(&self) -> u64 {
        let id = self.job_counter.fetch_add(1, Ordering::SeqCst) + 1;
        *self.job_started_at.lock() = Some(Utc::now());
        self.is_mixing.store(false, Ordering::SeqCst);
        id
    }

    pub fn current_job(&self) -> u64 {
        self.job_counter.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, job_id: u64) -> bool {
        self.current_job() == job_id
    }

    pub fn set_mixing(&self, mixing: bool) {
        self.is_mixing.store(mixing, Ordering::SeqCst);
    }

    pub fn is_mixing(&self) -> bool {
        self.is_mixing.load(Ordering::SeqCst)
    }

    /// Clears the single-flight flag, but only for the job that still owns it
    pub fn finish(&self, job_id: u64) {
        if self.is_current(job_id) {
            self.is_mixing.store(false, Ordering::SeqCst);
        }
    }

    /// Milliseconds since the current job was issued
    pub fn elapsed_ms(&self) -> Option<i64> {
        self.job_started_at
            .lock()
            .as_ref()
            .map(|started| (Utc::now() - *started).num_milliseconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_ids_are_strictly_increasing() {
        let state = MixerState::default();
        let mut last = 0;
        for _ in 0..100 {
            let id = state.begin_job();
            assert!(id > last);
            last = id;
        }
        assert_eq!(state.current_job(), last);
    }

    #[test]
    fn test_newer_job_supersedes_older_one() {
        let state = MixerState::default();
        let first = state.begin_job();
        assert!(state.is_current(first));

        let second = state.begin_job();
        assert!(!state.is_current(first));
        assert!(state.is_current(second));
    }

    #[test]
    fn test_finish_only_clears_the_current_job() {
        let state = MixerState::default();
        let first = state.begin_job();
        let second = state.begin_job();

        state.set_mixing(true);
        state.finish(first);
        assert!(state.is_mixing(), "stale job must not clear the flag");

        state.finish(second);
        assert!(!state.is_mixing());
    }

    #[test]
    fn test_begin_job_resets_the_mixing_flag() {
        let state = MixerState::default();
        state.set_mixing(true);
        state.begin_job();
        assert!(!state.is_mixing());
    }
}
