//! Facts about the host.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub os: String,
    pub family: String,
    /// Kernel release, e.g. `6.8.0-45-generic`. Linux only.
    pub os_release: Option<String>,
    /// Kernel build string. Linux only.
    pub os_version: Option<String>,
    /// Machine type, e.g. `x86_64`.
    pub arch: String,
    pub hostname: Option<String>,
    pub cpu_count: usize,
    pub toolkit_version: String,
}

/// Describe the operating system, architecture and host.
#[must_use]
pub fn system_info() -> SystemInfo {
    SystemInfo {
        os: std::env::consts::OS.to_string(),
        family: std::env::consts::FAMILY.to_string(),
        os_release: kernel_field("osrelease"),
        os_version: kernel_field("version"),
        arch: std::env::consts::ARCH.to_string(),
        hostname: hostname::get()
            .ok()
            .map(|name| name.to_string_lossy().into_owned()),
        cpu_count: std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get),
        toolkit_version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

#[cfg(target_os = "linux")]
fn kernel_field(name: &str) -> Option<String> {
    let raw = std::fs::read_to_string(format!("/proc/sys/kernel/{name}")).ok()?;
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(not(target_os = "linux"))]
fn kernel_field(_name: &str) -> Option<String> {
    None
}
