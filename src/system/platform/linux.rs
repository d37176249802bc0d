use std::process::{Command, Stdio};

use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn load_report() -> Option<String> {
        if let Some(out) = run_uptime() {
            return Some(out);
        }
        // Minimal images ship without procps; /proc/loadavg is always there.
        // Layout: "0.04 0.27 0.46 1/123 4567"
        let contents = std::fs::read_to_string("/proc/loadavg").ok()?;
        let fields: Vec<&str> = contents.split_whitespace().take(3).collect();
        if fields.len() != 3 {
            return None;
        }
        Some(format!("load average: {}", fields.join(", ")))
    }

    fn parent_pid() -> Option<u32> {
        Some(std::os::unix::process::parent_id())
    }
}

fn run_uptime() -> Option<String> {
    let output = Command::new("uptime")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}
