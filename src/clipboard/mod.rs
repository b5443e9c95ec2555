use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

const WL_COPY_COMMAND: &str = "wl-copy";
const MIME_TEXT_PLAIN_UTF8: &str = "text/plain;charset=utf-8";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to run wl-copy command: {command}")]
    CommandIo {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("wl-copy exited with non-zero status: {status}")]
    CommandFailed { status: String },
    #[error("nothing to copy")]
    EmptyText,
}

pub type ClipboardResult<T> = std::result::Result<T, ClipboardError>;

pub trait ClipboardBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()>;
}

#[derive(Debug, Default)]
pub struct WlCopyBackend;

impl ClipboardBackend for WlCopyBackend {
    fn copy_text(&self, text: &str) -> ClipboardResult<()> {
        if text.is_empty() {
            return Err(ClipboardError::EmptyText);
        }

        let command_io = |source: io::Error| ClipboardError::CommandIo {
            command: WL_COPY_COMMAND.to_string(),
            source,
        };
        let mut child = Command::new(WL_COPY_COMMAND)
            .arg("--type")
            .arg(MIME_TEXT_PLAIN_UTF8)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(command_io)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(command_io)?;
        }
        let status = child.wait().map_err(command_io)?;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed {
                status: status.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingBackend {
        copied: RefCell<Vec<String>>,
    }

    impl ClipboardBackend for RecordingBackend {
        fn copy_text(&self, text: &str) -> ClipboardResult<()> {
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn copy_text_success_with_backend() {
        let backend = RecordingBackend::default();
        backend
            .copy_text("https://crop.example/?x1=1")
            .expect("copy should work");
        assert_eq!(
            backend.copied.borrow().as_slice(),
            ["https://crop.example/?x1=1".to_string()]
        );
    }

    #[test]
    fn wl_copy_refuses_empty_text() {
        let err = WlCopyBackend.copy_text("").expect_err("empty text is refused");
        assert!(matches!(err, ClipboardError::EmptyText));
    }

    #[test]
    fn command_error_contains_command_name() {
        let err = ClipboardError::CommandFailed {
            status: "exit status 1".to_string(),
        };
        assert!(format!("{err}").contains("wl-copy"));
    }
}
