pub mod collector;
pub mod error;
pub mod load;
pub mod network;
pub mod platform;
pub mod process;
pub mod snapshot;

pub use collector::Collector;
pub use error::CollectError;
pub use process::{ProcessFacts, ProcessState};
pub use snapshot::{HostFacts, Snapshot};
