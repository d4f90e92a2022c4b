// Background status poller for mix jobs.
//
// One poller thread per issued job. The thread polls the backend at a fixed
// interval until the job stops running or a newer job supersedes it. A
// superseded poller exits without emitting anything; whatever replaced it
// owns the output surface and the progress bar.

use crate::backend::{BackendClient, BackendError};
use crate::mixer::state::MixerState;
use crate::models::MixStatus;
use log::{debug, info, warn};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const POLL_INTERVAL: Duration = Duration::from_millis(150);
pub const PROGRESS_RESET_DELAY: Duration = Duration::from_millis(300);

/// Where the poller reads job status from. The backend client is the real
/// source; tests script their own.
pub trait StatusSource: Send + Sync {
    fn mix_status(&self) -> Result<MixStatus, BackendError>;
}

impl StatusSource for BackendClient {
    fn mix_status(&self) -> Result<MixStatus, BackendError> {
        BackendClient::mix_status(self)
    }
}

/// User-visible effects of a poll tick, forwarded to the webview as events
#[derive(Debug, Clone, PartialEq)]
pub enum MixerEvent {
    Progress {
        job_id: u64,
        progress: u8,
    },
    Completed {
        job_id: u64,
        target_output: u8,
        image: String,
    },
    CompletedEmpty {
        job_id: u64,
    },
    Failed {
        job_id: u64,
        message: String,
    },
}

/// What one poll tick decided
#[derive(Debug, PartialEq)]
enum PollStep {
    Superseded,
    Running(u8),
    Done(Option<String>),
    Errored(String),
}

/// The identifier comparison runs after the fetch as well: a fetch that was
/// already in flight when a newer job arrived completes normally and its
/// outcome is discarded here.
fn classify(job_id: u64, current_job: u64, status: Result<MixStatus, BackendError>) -> PollStep {
    if job_id != current_job {
        return PollStep::Superseded;
    }
    match status {
        Ok(status) if status.running => PollStep::Running(status.progress),
        Ok(status) => PollStep::Done(status.result.filter(|image| !image.is_empty())),
        Err(err) => PollStep::Errored(err.to_string()),
    }
}

pub fn spawn<S>(
    state: Arc<MixerState>,
    source: Arc<S>,
    job_id: u64,
    target_output: u8,
    on_event: impl Fn(MixerEvent) + Send + 'static,
) -> thread::JoinHandle<()>
where
    S: StatusSource + 'static,
{
    thread::spawn(move || run(&state, source.as_ref(), job_id, target_output, &on_event))
}

fn run<S: StatusSource + ?Sized>(
    state: &MixerState,
    source: &S,
    job_id: u64,
    target_output: u8,
    on_event: &dyn Fn(MixerEvent),
) {
    debug!("Job #{} - polling mix status", job_id);

    loop {
        if !state.is_current(job_id) {
            debug!(
                "Job #{} - stopping poll (replaced by job #{})",
                job_id,
                state.current_job()
            );
            return;
        }

        // Fetch first, then sample the current id: a job issued while the
        // fetch was in flight must be visible to the comparison.
        let status = source.mix_status();
        match classify(job_id, state.current_job(), status) {
            PollStep::Superseded => {
                debug!(
                    "Job #{} - discarding stale status (replaced by job #{})",
                    job_id,
                    state.current_job()
                );
                return;
            }
            PollStep::Running(progress) => {
                on_event(MixerEvent::Progress { job_id, progress });
            }
            PollStep::Done(result) => {
                match result {
                    Some(image) => {
                        info!(
                            "Job #{} - completed in {} ms",
                            job_id,
                            state.elapsed_ms().unwrap_or_default()
                        );
                        on_event(MixerEvent::Completed {
                            job_id,
                            target_output,
                            image,
                        });
                    }
                    None => {
                        warn!("Job #{} - mix finished but no result returned", job_id);
                        on_event(MixerEvent::CompletedEmpty { job_id });
                    }
                }
                state.finish(job_id);

                // The progress bar snaps back to zero shortly after
                // completion, unless a newer job owns it by then.
                thread::sleep(PROGRESS_RESET_DELAY);
                if state.is_current(job_id) {
                    on_event(MixerEvent::Progress {
                        job_id,
                        progress: 0,
                    });
                }
                return;
            }
            PollStep::Errored(message) => {
                warn!("Job #{} - status poll failed: {}", job_id, message);
                state.finish(job_id);
                on_event(MixerEvent::Failed { job_id, message });
                return;
            }
        }

        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    fn running(progress: u8) -> Result<MixStatus, BackendError> {
        Ok(MixStatus {
            running: true,
            progress,
            result: None,
        })
    }

    fn done(result: Option<&str>) -> Result<MixStatus, BackendError> {
        Ok(MixStatus {
            running: false,
            progress: 100,
            result: result.map(String::from),
        })
    }

    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<MixStatus, BackendError>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<MixStatus, BackendError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    impl StatusSource for ScriptedSource {
        fn mix_status(&self) -> Result<MixStatus, BackendError> {
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| done(None))
        }
    }

    /// Issues a newer job while the "in-flight" fetch completes
    struct SupersededMidFetch {
        state: Arc<MixerState>,
    }

    impl StatusSource for SupersededMidFetch {
        fn mix_status(&self) -> Result<MixStatus, BackendError> {
            self.state.begin_job();
            done(Some("late-result"))
        }
    }

    fn collect_events() -> (Arc<Mutex<Vec<MixerEvent>>>, impl Fn(MixerEvent)) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        (events, move |event| sink.lock().push(event))
    }

    #[test]
    fn test_classify_prefers_supersession_over_any_status() {
        assert_eq!(classify(1, 2, done(Some("img"))), PollStep::Superseded);
        assert_eq!(
            classify(1, 2, Err(BackendError::Transport("down".into()))),
            PollStep::Superseded
        );
    }

    #[test]
    fn test_classify_maps_statuses() {
        assert_eq!(classify(3, 3, running(42)), PollStep::Running(42));
        assert_eq!(
            classify(3, 3, done(Some("img"))),
            PollStep::Done(Some("img".into()))
        );
        assert_eq!(classify(3, 3, done(None)), PollStep::Done(None));
        assert_eq!(classify(3, 3, done(Some(""))), PollStep::Done(None));
        assert!(matches!(
            classify(3, 3, Err(BackendError::Transport("down".into()))),
            PollStep::Errored(_)
        ));
    }

    #[test]
    fn test_completed_job_applies_result_then_resets_progress() {
        let state = Arc::new(MixerState::default());
        let job_id = state.begin_job();
        state.set_mixing(true);

        let source = ScriptedSource::new(vec![running(50), done(Some("img"))]);
        let (events, on_event) = collect_events();

        run(state.as_ref(), &source, job_id, 2, &on_event);

        assert_eq!(
            *events.lock(),
            vec![
                MixerEvent::Progress {
                    job_id,
                    progress: 50
                },
                MixerEvent::Completed {
                    job_id,
                    target_output: 2,
                    image: "img".into()
                },
                MixerEvent::Progress {
                    job_id,
                    progress: 0
                },
            ]
        );
        assert!(!state.is_mixing());
    }

    #[test]
    fn test_superseded_poller_never_touches_the_surface() {
        let state = Arc::new(MixerState::default());
        let old_job = state.begin_job();
        state.begin_job();

        let source = ScriptedSource::new(vec![done(Some("stale-result"))]);
        let (events, on_event) = collect_events();

        run(state.as_ref(), &source, old_job, 1, &on_event);

        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_status_arriving_after_supersession_is_discarded() {
        let state = Arc::new(MixerState::default());
        let job_id = state.begin_job();

        let source = SupersededMidFetch {
            state: state.clone(),
        };
        let (events, on_event) = collect_events();

        run(state.as_ref(), &source, job_id, 1, &on_event);

        assert!(
            events.lock().is_empty(),
            "late completion of a superseded job must not update the output"
        );
    }

    #[test]
    fn test_finished_without_result_warns_and_still_resets_progress() {
        let state = Arc::new(MixerState::default());
        let job_id = state.begin_job();
        state.set_mixing(true);

        let source = ScriptedSource::new(vec![done(None)]);
        let (events, on_event) = collect_events();

        run(state.as_ref(), &source, job_id, 1, &on_event);

        assert_eq!(
            *events.lock(),
            vec![
                MixerEvent::CompletedEmpty { job_id },
                MixerEvent::Progress {
                    job_id,
                    progress: 0
                },
            ]
        );
        assert!(!state.is_mixing());
    }

    #[test]
    fn test_transport_failure_terminates_and_clears_the_flag() {
        let state = Arc::new(MixerState::default());
        let job_id = state.begin_job();
        state.set_mixing(true);

        let source =
            ScriptedSource::new(vec![Err(BackendError::Transport("connection refused".into()))]);
        let (events, on_event) = collect_events();

        run(state.as_ref(), &source, job_id, 1, &on_event);

        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], MixerEvent::Failed { .. }));
        assert!(!state.is_mixing());
    }

    #[test]
    fn test_only_the_last_of_many_jobs_applies() {
        let state = Arc::new(MixerState::default());

        let mut stale = Vec::new();
        for _ in 0..5 {
            stale.push(state.begin_job());
        }
        let latest = state.begin_job();

        let (events, on_event) = collect_events();

        for job_id in stale {
            let source = ScriptedSource::new(vec![done(Some("stale"))]);
            run(state.as_ref(), &source, job_id, 1, &on_event);
        }
        assert!(events.lock().is_empty());

        let source = ScriptedSource::new(vec![done(Some("fresh"))]);
        run(state.as_ref(), &source, latest, 1, &on_event);

        let events = events.lock();
        assert!(matches!(
            events[0],
            MixerEvent::Completed { job_id, ref image, .. } if job_id == latest && image == "fresh"
        ));
    }
}
