use std::fmt;

use serde::Serialize;
use sysinfo::ProcessStatus;

/// Process states a snapshot can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessState {
    Running,
    Sleeping,
    DiskSleep,
    Stopped,
    TracingStop,
    Zombie,
    Dead,
    WakeKill,
    Waking,
    Idle,
    Locked,
    Waiting,
}

impl ProcessState {
    pub const ALL: [ProcessState; 12] = [
        ProcessState::Running,
        ProcessState::Sleeping,
        ProcessState::DiskSleep,
        ProcessState::Stopped,
        ProcessState::TracingStop,
        ProcessState::Zombie,
        ProcessState::Dead,
        ProcessState::WakeKill,
        ProcessState::Waking,
        ProcessState::Idle,
        ProcessState::Locked,
        ProcessState::Waiting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessState::Running => "running",
            ProcessState::Sleeping => "sleeping",
            ProcessState::DiskSleep => "disk-sleep",
            ProcessState::Stopped => "stopped",
            ProcessState::TracingStop => "tracing-stop",
            ProcessState::Zombie => "zombie",
            ProcessState::Dead => "dead",
            ProcessState::WakeKill => "wake-kill",
            ProcessState::Waking => "waking",
            ProcessState::Idle => "idle",
            ProcessState::Locked => "locked",
            ProcessState::Waiting => "waiting",
        }
    }

    /// Whether a process in this state still counts as alive.
    pub fn is_alive(self) -> bool {
        !matches!(self, ProcessState::Zombie | ProcessState::Dead)
    }
}

impl From<ProcessStatus> for ProcessState {
    fn from(status: ProcessStatus) -> Self {
        match status {
            ProcessStatus::Run => ProcessState::Running,
            ProcessStatus::Sleep => ProcessState::Sleeping,
            ProcessStatus::UninterruptibleDiskSleep => ProcessState::DiskSleep,
            ProcessStatus::Stop => ProcessState::Stopped,
            ProcessStatus::Tracing => ProcessState::TracingStop,
            ProcessStatus::Zombie => ProcessState::Zombie,
            ProcessStatus::Dead => ProcessState::Dead,
            ProcessStatus::Wakekill => ProcessState::WakeKill,
            ProcessStatus::Waking => ProcessState::Waking,
            ProcessStatus::Idle | ProcessStatus::Parked => ProcessState::Idle,
            ProcessStatus::LockBlocked => ProcessState::Locked,
            // Unknown(_) and platform-specific states
            _ => ProcessState::Waiting,
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts read from the OS process table for the target process.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessFacts {
    pub cpu_used: f32,
    pub cmdline: String,
    pub rss: String,
    pub vms: String,
    pub create_time: String,
    pub username: String,
    pub status: ProcessState,
}
