//! Screen wake lock.
//!
//! Linux and macOS hold the lock through a helper process that inhibits idle
//! sleep for as long as it lives (`systemd-inhibit`, `caffeinate`). Windows
//! sets the thread execution state directly.

use drilltimer_core::WakeLock;

#[cfg(not(windows))]
use std::process::{Child, Command, Stdio};

#[cfg(target_os = "linux")]
const INHIBITOR: &str = "systemd-inhibit";
#[cfg(target_os = "macos")]
const INHIBITOR: &str = "caffeinate";

#[derive(Debug, Default)]
pub struct InhibitorWakeLock {
    #[cfg(not(windows))]
    child: Option<Child>,
    #[cfg(windows)]
    held: bool,
}

impl InhibitorWakeLock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(windows))]
impl InhibitorWakeLock {
    #[cfg(any(target_os = "linux", target_os = "macos"))]
    fn command() -> Option<Command> {
        let mut cmd = Command::new(INHIBITOR);
        // The inhibited command exits with us even if the inhibitor is killed first.
        #[cfg(target_os = "linux")]
        cmd.args([
            "--what=idle:sleep",
            "--who=drilltimer",
            "--why=Timer running",
            "--mode=block",
            "tail",
            format!("--pid={}", std::process::id()).as_str(),
            "-f",
            "/dev/null",
        ]);
        #[cfg(target_os = "macos")]
        cmd.args(["-d", "-i", "-w", std::process::id().to_string().as_str()]);
        Some(cmd)
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    fn command() -> Option<Command> {
        None
    }
}

#[cfg(not(windows))]
impl WakeLock for InhibitorWakeLock {
    fn is_supported(&self) -> bool {
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            on_path(INHIBITOR)
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            false
        }
    }

    fn is_held(&self) -> bool {
        self.child.is_some()
    }

    fn acquire(&mut self) {
        let Some(mut cmd) = Self::command() else {
            return;
        };
        match cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                tracing::debug!(pid = child.id(), "wake lock acquired");
                self.child = Some(child);
            }
            Err(e) => tracing::warn!(error = %e, "wake lock error"),
        }
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().and_then(|_| child.wait().map(|_| ())) {
                tracing::warn!(error = %e, "wake lock release error");
            } else {
                tracing::debug!("wake lock released");
            }
        }
    }
}

#[cfg(windows)]
impl WakeLock for InhibitorWakeLock {
    fn is_supported(&self) -> bool {
        true
    }

    fn is_held(&self) -> bool {
        self.held
    }

    fn acquire(&mut self) {
        use windows::Win32::System::Power::{
            SetThreadExecutionState, ES_CONTINUOUS, ES_DISPLAY_REQUIRED, ES_SYSTEM_REQUIRED,
        };
        let previous = unsafe {
            SetThreadExecutionState(ES_CONTINUOUS | ES_DISPLAY_REQUIRED | ES_SYSTEM_REQUIRED)
        };
        if previous.0 == 0 {
            tracing::warn!("wake lock error: SetThreadExecutionState failed");
        } else {
            self.held = true;
        }
    }

    fn release(&mut self) {
        use windows::Win32::System::Power::{SetThreadExecutionState, ES_CONTINUOUS};
        unsafe {
            SetThreadExecutionState(ES_CONTINUOUS);
        }
        self.held = false;
    }
}

impl Drop for InhibitorWakeLock {
    fn drop(&mut self) {
        if self.is_held() {
            self.release();
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
fn on_path(bin: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(bin).is_file()))
        .unwrap_or(false)
}
