use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn load_report() -> Option<String> {
        // No load-average command on Windows
        None
    }

    fn parent_pid() -> Option<u32> {
        // Resolved through sysinfo by the collector
        None
    }
}
