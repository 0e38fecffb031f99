//! Handing generated files to the host's default viewer.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Opens a file outside this process.
pub trait FileOpener: Send + Sync {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Opens files by spawning the platform's "open with default app" command.
pub struct CommandOpener {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandOpener {
    /// Picks the open command for the platform this binary was built for.
    pub fn for_host() -> Self {
        if cfg!(target_os = "macos") {
            Self { program: "open", args: &[] }
        } else if cfg!(target_os = "windows") {
            Self { program: "cmd", args: &["/C", "start", ""] }
        } else {
            Self { program: "xdg-open", args: &[] }
        }
    }

    /// Uses an explicit program, e.g. a specific viewer.
    pub fn with_program(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    pub fn program(&self) -> &str {
        self.program
    }
}

impl FileOpener for CommandOpener {
    fn open(&self, path: &Path) -> Result<()> {
        debug!("Opening {} with {}", path.display(), self.program);
        // The launchers hand off to the viewer and exit, so waiting is short
        // and leaves no zombie child behind.
        let status = Command::new(self.program)
            .args(self.args)
            .arg(path)
            .status()
            .with_context(|| format!("failed to open {} with {}", path.display(), self.program))?;

        if !status.success() {
            anyhow::bail!(
                "failed to open {}: {} exited with {}",
                path.display(),
                self.program,
                status
            );
        }
        Ok(())
    }
}

/// Opener that does nothing, for headless runs.
pub struct NoopOpener;

impl FileOpener for NoopOpener {
    fn open(&self, path: &Path) -> Result<()> {
        debug!("Not opening {}", path.display());
        Ok(())
    }
}

/// Selects the opener once at startup.
pub fn opener_for(open_files: bool) -> Box<dyn FileOpener> {
    if open_files {
        Box::new(CommandOpener::for_host())
    } else {
        Box::new(NoopOpener)
    }
}

/// Opens `path`, logging instead of failing.
pub fn open_best_effort(opener: &dyn FileOpener, path: &Path) {
    if let Err(e) = opener.open(path) {
        warn!("Could not open {}: {:#}", path.display(), e);
    }
}
