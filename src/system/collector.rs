use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::thread;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind, Users};

use super::error::CollectError;
use super::load;
use super::network;
use super::platform;
use super::process::{ProcessFacts, ProcessState};
use super::snapshot::{HostFacts, Snapshot};
use crate::config::CollectorConfig;
use crate::format::{format_mebibytes, format_unix_secs, now_timestamp};

/// Builds snapshots for one process at a time.
///
/// The `System` handle is kept between calls so that `cpu_used` measures the
/// interval since the previous collection; the first reading for a process is
/// always `0.0`.
pub struct Collector {
    sys: System,
    users: Users,
    config: CollectorConfig,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(CollectorConfig::default())
    }
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        Collector {
            sys,
            users: Users::new_with_refreshed_list(),
            config,
        }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// True when `pid` exists and is neither a zombie nor dead. Every
    /// inspection failure reads as not alive.
    pub fn is_alive(&mut self, pid: u32) -> bool {
        let sys_pid = Pid::from_u32(pid);
        self.refresh_pid(sys_pid, ProcessRefreshKind::nothing());
        self.sys
            .process(sys_pid)
            .is_some_and(|p| ProcessState::from(p.status()).is_alive())
    }

    pub fn local_address(&self) -> io::Result<IpAddr> {
        network::local_address(&self.config.route_probe)
    }

    pub fn system_load(&self) -> String {
        load::system_load()
    }

    pub fn process_facts(&mut self, pid: u32) -> Result<ProcessFacts, CollectError> {
        let _span = tracing::debug_span!("collector.process_facts", pid).entered();

        let sys_pid = Pid::from_u32(pid);
        self.sys.refresh_cpu_all();
        self.refresh_pid(
            sys_pid,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_cmd(UpdateKind::Always)
                .with_user(UpdateKind::Always),
        );

        let process = self
            .sys
            .process(sys_pid)
            .ok_or(CollectError::ProcessNotFound { pid })?;

        let cpu_used = process.cpu_usage();
        let cmdline = process
            .cmd()
            .iter()
            .map(|s| s.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let rss = format_mebibytes(process.memory());
        let vms = format_mebibytes(process.virtual_memory());
        let create_time = format_unix_secs(process.start_time()).ok_or_else(|| {
            CollectError::Unknown(format!("process {pid} reported an invalid start time"))
        })?;
        let uid = process
            .user_id()
            .cloned()
            .ok_or(CollectError::PermissionDenied { pid })?;
        let username = match self.users.get_user_by_id(&uid) {
            Some(user) => user.name().to_string(),
            None => format!("{uid:?}"),
        };

        let status = self.poll_status(sys_pid)?;

        Ok(ProcessFacts {
            cpu_used,
            cmdline,
            rss,
            vms,
            create_time,
            username,
            status,
        })
    }

    /// Re-reads the status until it is `running` or the attempt budget runs
    /// out, keeping the last value seen. Blocks for at most
    /// `attempts * interval`.
    fn poll_status(&mut self, sys_pid: Pid) -> Result<ProcessState, CollectError> {
        let pid = sys_pid.as_u32();
        let attempts = self.config.status_poll_attempts.max(1);
        let interval = self.config.status_poll_interval();

        let mut status = self.read_status(sys_pid)?;
        for attempt in 1..attempts {
            if status == ProcessState::Running {
                break;
            }
            thread::sleep(interval);
            self.refresh_pid(sys_pid, ProcessRefreshKind::nothing());
            status = self.read_status(sys_pid)?;
            tracing::trace!(pid, attempt, %status, "status poll");
        }

        if status != ProcessState::Running && self.config.require_running {
            return Err(CollectError::Timeout { pid, attempts });
        }
        Ok(status)
    }

    fn read_status(&self, sys_pid: Pid) -> Result<ProcessState, CollectError> {
        self.sys
            .process(sys_pid)
            .map(|p| ProcessState::from(p.status()))
            .ok_or(CollectError::ProcessNotFound {
                pid: sys_pid.as_u32(),
            })
    }

    /// Facts about the collector's own process and host. `pid` and `ppid`
    /// describe the collector, not any target.
    pub fn host_facts(&mut self) -> Result<HostFacts, CollectError> {
        let pid = std::process::id();
        let ppid = self.own_parent_pid(pid);
        let path = std::env::current_dir()?.display().to_string();
        let ip = match self.local_address() {
            Ok(ip) => ip,
            Err(err) => {
                tracing::warn!(
                    probe = %self.config.route_probe,
                    error = %err,
                    "no outbound route, reporting loopback address"
                );
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            }
        };

        Ok(HostFacts {
            pid,
            ppid,
            path,
            ip: ip.to_string(),
            now: now_timestamp(),
            load: self.system_load(),
        })
    }

    fn own_parent_pid(&mut self, pid: u32) -> u32 {
        if let Some(ppid) = platform::parent_pid() {
            return ppid;
        }
        let sys_pid = Pid::from_u32(pid);
        self.refresh_pid(sys_pid, ProcessRefreshKind::nothing());
        self.sys
            .process(sys_pid)
            .and_then(|p| p.parent())
            .map(|p| p.as_u32())
            .unwrap_or(0)
    }

    /// Host facts merged with the facts of `pid`. Nothing is returned unless
    /// every process fact could be read.
    pub fn collect(&mut self, pid: u32) -> Result<Snapshot, CollectError> {
        let _span = tracing::debug_span!("collector.collect", pid).entered();

        let mut host = self.host_facts()?;
        host.pid = pid;
        let process = self.process_facts(pid)?;
        Ok(Snapshot::merge(host, process))
    }

    fn refresh_pid(&mut self, pid: Pid, kind: ProcessRefreshKind) {
        self.sys
            .refresh_processes_specifics(ProcessesToUpdate::Some(&[pid]), true, kind);
    }
}
