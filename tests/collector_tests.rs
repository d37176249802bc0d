use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use procwatch::config::CollectorConfig;
use procwatch::system::{CollectError, Collector, ProcessState, Snapshot};

fn spawn_sleeper(seconds: u32) -> Child {
    #[cfg(windows)]
    let mut cmd = {
        let mut c = Command::new("powershell");
        c.args([
            "-NoProfile",
            "-NonInteractive",
            "-Command",
            &format!("Start-Sleep -Seconds {seconds}"),
        ]);
        c
    };

    #[cfg(not(windows))]
    let mut cmd = {
        let mut c = Command::new("sleep");
        c.arg(seconds.to_string());
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn child process")
}

fn quick_collector() -> Collector {
    Collector::new(CollectorConfig {
        status_poll_attempts: 5,
        ..CollectorConfig::default()
    })
}

/// Collects until the child has exec'd into the sleep command.
fn collect_after_exec(collector: &mut Collector, pid: u32, timeout: Duration) -> Snapshot {
    let deadline = Instant::now() + timeout;
    loop {
        match collector.collect(pid) {
            Ok(snapshot) if snapshot.process.cmdline.to_lowercase().contains("sleep") => {
                return snapshot;
            }
            Ok(_) | Err(CollectError::ProcessNotFound { .. }) if Instant::now() < deadline => {
                thread::sleep(Duration::from_millis(20));
            }
            other => panic!("no snapshot of sleeping child before timeout: {other:?}"),
        }
    }
}

fn assert_two_decimal_mebibytes(value: &str) {
    let (whole, frac) = value.split_once('.').expect("missing decimal point");
    assert_eq!(frac.len(), 2, "{value}");
    assert!(whole.chars().all(|c| c.is_ascii_digit()), "{value}");
}

#[test]
fn collect_spawned_sleeper() {
    let mut child = spawn_sleeper(5);
    let pid = child.id();
    let mut collector = quick_collector();

    let snapshot = collect_after_exec(&mut collector, pid, Duration::from_secs(3));
    let _ = child.kill();
    let _ = child.wait();

    assert_eq!(snapshot.pid(), pid);
    assert_ne!(snapshot.pid(), std::process::id());
    assert!(matches!(
        snapshot.process.status,
        ProcessState::Running | ProcessState::Sleeping
    ));
    assert_two_decimal_mebibytes(&snapshot.process.rss);
    assert_two_decimal_mebibytes(&snapshot.process.vms);
    assert!(!snapshot.process.username.is_empty());
    assert_eq!(snapshot.process.create_time.len(), "YYYY-MM-DD HH:MM:SS".len());
}

#[test]
fn collect_nonexistent_pid_is_absent() {
    let mut collector = quick_collector();
    let result = collector.collect(u32::MAX);
    assert!(matches!(result, Err(CollectError::ProcessNotFound { .. })));
}

#[test]
fn repeated_collects_are_consistent() {
    let mut child = spawn_sleeper(10);
    let pid = child.id();
    let mut collector = quick_collector();

    let first = collect_after_exec(&mut collector, pid, Duration::from_secs(3));
    let second = collector.collect(pid);
    let _ = child.kill();
    let _ = child.wait();
    let second = second.expect("second collect failed");

    // Fixed-width layout, so lexical order is chronological.
    assert!(second.host.now >= first.host.now);
    assert_eq!(first.host.pid, second.host.pid);
    assert_eq!(first.host.ppid, second.host.ppid);
    assert_eq!(first.host.path, second.host.path);
    assert_eq!(first.process.username, second.process.username);
    assert_eq!(first.process.cmdline, second.process.cmdline);
}

#[test]
fn reaped_child_is_not_alive() {
    let mut child = spawn_sleeper(30);
    let pid = child.id();
    let mut collector = quick_collector();

    assert!(collector.is_alive(std::process::id()));
    assert!(collector.is_alive(pid));

    child.kill().expect("failed to kill child");
    child.wait().expect("failed to reap child");

    assert!(!collector.is_alive(pid));
}

#[cfg(unix)]
#[test]
fn require_running_times_out_on_sleeping_process() {
    let mut child = spawn_sleeper(5);
    let pid = child.id();
    let mut collector = Collector::new(CollectorConfig {
        status_poll_attempts: 3,
        require_running: true,
        ..CollectorConfig::default()
    });

    // Give the child time to exec and block in nanosleep.
    thread::sleep(Duration::from_millis(200));
    let result = collector.process_facts(pid);
    let _ = child.kill();
    let _ = child.wait();

    assert_eq!(result, Err(CollectError::Timeout { pid, attempts: 3 }));
}
