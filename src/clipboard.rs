//! Clipboard access.
//!
//! Two implementations behind one trait: an external helper program when the
//! host has one (`pbcopy`, `wl-copy`, `xclip`), and the OSC 52 terminal escape
//! otherwise. [`detect`] picks one from the environment.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Error types that can occur while copying.
#[derive(Debug)]
pub enum ClipboardError {
    /// Writing to the helper or terminal failed.
    Io(io::Error),
    /// Helper program exited unsuccessfully.
    Command(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Io(e) => write!(f, "I/O error: {}", e),
            ClipboardError::Command(msg) => write!(f, "clipboard helper failed: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

impl From<io::Error> for ClipboardError {
    fn from(e: io::Error) -> Self {
        ClipboardError::Io(e)
    }
}

/// Something that can put text on the system clipboard.
pub trait Clipboard {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies by piping text into an external helper program.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: PathBuf,
    args: Vec<&'static str>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<PathBuf>, args: Vec<&'static str>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Finds a helper suitable for the current session, if one is installed.
    pub fn detect() -> Option<Self> {
        let path = env::var_os("PATH")?;
        let candidates: Vec<(&str, Vec<&'static str>)> = if cfg!(target_os = "macos") {
            vec![("pbcopy", vec![])]
        } else if env::var_os("WAYLAND_DISPLAY").is_some() {
            vec![("wl-copy", vec![])]
        } else if env::var_os("DISPLAY").is_some() {
            vec![
                ("xclip", vec!["-selection", "clipboard"]),
                ("xsel", vec!["--clipboard", "--input"]),
            ]
        } else {
            vec![]
        };

        candidates.into_iter().find_map(|(name, args)| {
            find_in_path(name, env::split_paths(&path)).map(|p| Self::new(p, args))
        })
    }
}

fn find_in_path(name: &str, dirs: impl Iterator<Item = PathBuf>) -> Option<PathBuf> {
    dirs.map(|dir| dir.join(name)).find(|p| is_file(p))
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

impl Clipboard for CommandClipboard {
    fn name(&self) -> &'static str {
        "command"
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(text.as_bytes())
        {
            drop(stdin);
            // Reap the helper before reporting the write error.
            let _ = child.kill();
            let _ = child.wait();
            return Err(e.into());
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Command(format!(
                "{} exited with {}",
                self.program.display(),
                status
            )))
        }
    }
}

/// Copies through the terminal with an OSC 52 escape sequence.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Builds the OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Picks the clipboard implementation for this host.
pub fn detect() -> Box<dyn Clipboard> {
    match CommandClipboard::detect() {
        Some(c) => {
            tracing::debug!(program = %c.program.display(), "using clipboard helper");
            Box::new(c)
        }
        None => {
            tracing::debug!("no clipboard helper found, using OSC 52");
            Box::new(Osc52Clipboard::new(io::stdout()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_osc52_writes_to_sink() {
        let mut clip = Osc52Clipboard::new(Vec::new());
        clip.copy("hello").unwrap();
        let written = String::from_utf8(clip.into_inner()).unwrap();
        assert_eq!(written, "\x1b]52;c;aGVsbG8=\x07");
    }

    #[test]
    fn test_find_in_path() {
        let dir = tempfile::tempdir().unwrap();
        let helper = dir.path().join("fakecopy");
        std::fs::write(&helper, "").unwrap();

        let found = find_in_path("fakecopy", vec![dir.path().to_path_buf()].into_iter());
        assert_eq!(found, Some(helper));
        assert!(find_in_path("missing", vec![dir.path().to_path_buf()].into_iter()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_receives_text() {
        let mut clip = CommandClipboard::new("cat", vec![]);
        assert!(clip.copy("hello").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_helper_that_stops_reading_is_reaped() {
        // `true` exits without reading; a payload larger than the pipe buffer
        // makes the write fail with a broken pipe.
        let mut clip = CommandClipboard::new("true", vec![]);
        let payload = "x".repeat(4 * 1024 * 1024);
        match clip.copy(&payload) {
            Err(ClipboardError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected broken pipe, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_helper_fails() {
        let mut clip = CommandClipboard::new("/nonexistent/clipboard-helper", vec![]);
        assert!(matches!(clip.copy("x"), Err(ClipboardError::Io(_))));
    }
}
