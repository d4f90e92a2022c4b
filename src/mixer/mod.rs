// Mix-job sequencing and status polling
pub mod poller;
pub mod regions;
pub mod state;

pub use poller::MixerEvent;
pub use state::MixerState;
