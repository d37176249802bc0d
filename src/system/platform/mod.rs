pub trait PlatformExtensions {
    /// Raw output of the host's load-reporting command.
    fn load_report() -> Option<String>;
    fn parent_pid() -> Option<u32>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn load_report() -> Option<String> {
    platform_impl::Platform::load_report()
}

pub fn parent_pid() -> Option<u32> {
    platform_impl::Platform::parent_pid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_do_not_panic() {
        let _ = load_report();
        let _ = parent_pid();
    }

    #[cfg(unix)]
    #[test]
    fn parent_pid_is_known_on_unix() {
        assert!(parent_pid().is_some());
    }
}
