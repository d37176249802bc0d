use serde::Serialize;

use super::process::ProcessFacts;

/// Facts about the host and the collector itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HostFacts {
    pub pid: u32,
    /// Parent of the collector, not of the target process.
    pub ppid: u32,
    pub path: String,
    pub ip: String,
    pub now: String,
    pub load: String,
}

/// One complete point-in-time record; serializes as a single flat object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub host: HostFacts,
    #[serde(flatten)]
    pub process: ProcessFacts,
}

impl Snapshot {
    pub fn merge(host: HostFacts, process: ProcessFacts) -> Self {
        Snapshot { host, process }
    }

    pub fn pid(&self) -> u32 {
        self.host.pid
    }
}
