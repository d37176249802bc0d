use sysinfo::System;

use super::platform;

/// Host load average as reported by the system's load command, falling back
/// to the kernel figures when no command output is usable.
pub fn system_load() -> String {
    platform::load_report()
        .as_deref()
        .and_then(parse_load_report)
        .unwrap_or_else(kernel_load_average)
}

/// Text after the last colon of an `uptime`-style line, trimmed. The three
/// numbers are passed through untouched.
pub fn parse_load_report(raw: &str) -> Option<String> {
    let (_, tail) = raw.rsplit_once(':')?;
    let tail = tail.trim();
    if tail.is_empty() {
        return None;
    }
    Some(tail.to_string())
}

fn kernel_load_average() -> String {
    let avg = System::load_average();
    format!("{:.2}, {:.2}, {:.2}", avg.one, avg.five, avg.fifteen)
}
