use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;
use which::which;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no clipboard helper found in PATH (tried {tried})")]
    NoClipboard { tried: String },

    #[error("no URL opener found in PATH (tried {tried})")]
    NoOpener { tried: String },

    #[error("failed to run `{program}`: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("`{program}` exited with status {status}")]
    Failed { program: String, status: String },
}

/// An external helper binary plus its fixed arguments.
#[derive(Debug, Clone)]
struct Helper {
    program: PathBuf,
    args: &'static [&'static str],
}

const CLIPBOARD_HELPERS: &[(&str, &[&str])] = &[
    ("clip", &[]),
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

const OPENERS: &[(&str, &[&str])] = &[
    ("xdg-open", &[]),
    ("open", &[]),
    // `start` is a cmd builtin; the empty string is the window title
    ("cmd", &["/C", "start", ""]),
];

fn resolve_helper(candidates: &[(&str, &'static [&'static str])]) -> Option<Helper> {
    candidates.iter().find_map(|(name, args)| {
        let found = which(name).or_else(|_| {
            if cfg!(windows) {
                which(format!("{name}.exe"))
            } else {
                Err(which::Error::CannotFindBinaryPath)
            }
        });
        found.ok().map(|program| Helper {
            program,
            args: *args,
        })
    })
}

fn tried(candidates: &[(&str, &[&str])]) -> String {
    candidates
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pipe `text` into the first clipboard helper found on PATH.
pub fn copy_to_clipboard(text: &str) -> Result<(), PlatformError> {
    let helper = resolve_helper(CLIPBOARD_HELPERS).ok_or_else(|| PlatformError::NoClipboard {
        tried: tried(CLIPBOARD_HELPERS),
    })?;
    let program = helper.program.display().to_string();
    tracing::debug!(%program, bytes = text.len(), "copying to clipboard");

    let mut child = Command::new(&helper.program)
        .args(helper.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| PlatformError::Spawn {
            program: program.clone(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|source| PlatformError::Spawn {
                program: program.clone(),
                source,
            })?;
    }

    let status = child.wait().map_err(|source| PlatformError::Spawn {
        program: program.clone(),
        source,
    })?;
    if !status.success() {
        return Err(PlatformError::Failed {
            program,
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Open `url` with the platform opener. Does not wait for the browser.
pub fn open_url(url: &str) -> Result<(), PlatformError> {
    let helper = resolve_helper(OPENERS).ok_or_else(|| PlatformError::NoOpener {
        tried: tried(OPENERS),
    })?;
    let program = helper.program.display().to_string();
    tracing::info!(%program, %url, "opening external link");

    Command::new(&helper.program)
        .args(helper.args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| PlatformError::Spawn { program, source })?;
    Ok(())
}

/// Copy and log instead of failing; clipboard access is best effort.
pub fn try_copy(text: &str) -> bool {
    match copy_to_clipboard(text) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%err, "clipboard unavailable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tried_lists_every_candidate() {
        assert_eq!(tried(CLIPBOARD_HELPERS), "clip, pbcopy, wl-copy, xclip, xsel");
        assert_eq!(tried(OPENERS), "xdg-open, open, cmd");
    }

    #[test]
    fn test_missing_helpers_resolve_to_none() {
        let bogus: &[(&str, &'static [&'static str])] = &[("ffcmd-definitely-not-a-binary", &[])];
        assert!(resolve_helper(bogus).is_none());
    }
}
