//! Periodic synchronization of device state from the backend.
//!
//! - [`Poller`] / [`PollHandle`] - generic cancellable polling engine
//! - [`DirectorySync`] - the device collection, polled on an interval
//! - [`DetailSync`] - one device's twin, keyed by identifier
//!
//! Each sync owns its snapshot exclusively; consumers read the latest
//! value through the handle and never see a fetch error as a `Result`.

pub mod detail;
pub mod directory;
pub mod poller;

pub use detail::{DetailState, DetailStatus, DetailSync};
pub use directory::{DirectoryState, DirectorySync, DIRECTORY_FETCH_FAILED};
pub use poller::{PollHandle, PollOptions, PollSource, Poller};
