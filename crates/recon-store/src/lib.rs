#![deny(unsafe_code)]

//! The mapping store: exclusive owner of the record set, bounded change
//! history, derived views, and debounced JSON snapshot persistence.

mod autosave;
mod changelog;
mod persist;
mod store;
pub mod views;

pub use autosave::{DirtyTracker, PersistConfig};
pub use changelog::{CHANGE_LOG_CAPACITY, ChangeLog};
pub use persist::{CHANGES_FILE, RECORDS_FILE, SnapshotStore, flush};
pub use store::{MappingStore, MergeOutcome};
