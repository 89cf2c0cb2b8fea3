//! Handing the terminal over to an external editor.
//!
//! The picker owns the terminal in raw mode on the alternate screen. Before
//! the editor runs, the terminal is released; afterwards it is re-acquired,
//! whether the editor succeeded, failed, or the hand-off unwound.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },
}

/// The external editor command: `<program> [args...] <file>`.
#[derive(Debug, Clone)]
pub struct Editor {
    pub program: String,
    pub args: Vec<String>,
}

impl Editor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Whether the program can be found, either as a path or on `PATH`.
    pub fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }

    /// Open `root/candidate` and block until the editor exits.
    pub fn open(&self, root: &Path, candidate: &str) -> Result<(), LaunchError> {
        let path = root.join(candidate);
        tracing::info!(program = %self.program, file = %path.display(), "launching editor");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .status()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(LaunchError::Exit {
                program: self.program.clone(),
                status,
            });
        }
        tracing::debug!(program = %self.program, "editor exited cleanly");
        Ok(())
    }
}

/// Locate `program` the way a shell would: paths containing a separator are
/// checked directly, bare names are searched for in `PATH`. Only executable
/// files count.
pub fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(program))
        .find(|full| is_executable(full))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// A rendering surface that can be given up and taken back.
pub trait Surface {
    fn release(&mut self) -> io::Result<()>;
    fn acquire(&mut self) -> io::Result<()>;
}

/// The real terminal: raw mode plus alternate screen, as set up by
/// `ratatui::init`.
pub struct CrosstermSurface;

impl Surface for CrosstermSurface {
    fn release(&mut self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        )
    }

    fn acquire(&mut self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)
    }
}

/// Re-acquires the surface when dropped unless [`Released::finish`] already
/// did, so a panic inside the hand-off still restores the terminal.
struct Released<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    done: bool,
}

impl<S: Surface + ?Sized> Released<'_, S> {
    fn finish(mut self) -> io::Result<()> {
        self.done = true;
        self.surface.acquire()
    }
}

impl<S: Surface + ?Sized> Drop for Released<'_, S> {
    fn drop(&mut self) {
        if !self.done {
            let _ = self.surface.acquire();
        }
    }
}

/// Run `f` with the surface released, then take it back.
///
/// The outer `Result` is about the surface itself; whatever `f` returns is
/// passed through untouched.
pub fn with_released<S, T, F>(surface: &mut S, f: F) -> io::Result<T>
where
    S: Surface + ?Sized,
    F: FnOnce() -> T,
{
    surface.release()?;
    let guard = Released {
        surface,
        done: false,
    };
    let out = f();
    guard.finish()?;
    Ok(out)
}
