//! Bounded invocation of external command-line tools

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::errors::ExtractionError;

/// Name used in messages for a configured program path
pub fn tool_name(program: &Path) -> String {
    program
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| program.to_string_lossy().to_string())
}

/// Run `program` with `args` and return its stdout
///
/// The child is killed if it outlives `limit`. A missing binary, a non-zero
/// exit and a timeout each map to their own [`ExtractionError`] variant.
pub async fn run_tool<I, S>(program: &Path, args: I, limit: Duration) -> Result<Vec<u8>, ExtractionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = tool_name(program);
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(tool = %tool, "spawning {:?}", command.as_std());

    let child = command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractionError::ToolMissing { tool: tool.clone() }
        } else {
            ExtractionError::ToolFailed {
                tool: tool.clone(),
                status: None,
                stderr: e.to_string(),
            }
        }
    })?;

    // Dropping the wait future on timeout drops the child, which kills it.
    let output = match timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(ExtractionError::ToolFailed {
                tool,
                status: None,
                stderr: e.to_string(),
            })
        }
        Err(_) => {
            warn!(tool = %tool, "timed out after {:?}", limit);
            return Err(ExtractionError::Timeout { tool, after: limit });
        }
    };

    if !output.status.success() {
        return Err(ExtractionError::ToolFailed {
            tool,
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_strips_directories_and_extension() {
        assert_eq!(tool_name(Path::new("/usr/local/bin/ffprobe")), "ffprobe");
        assert_eq!(tool_name(Path::new("C:/ffmpeg/bin/ffprobe.exe")), "ffprobe");
        assert_eq!(tool_name(Path::new("ffmpeg")), "ffmpeg");
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_missing() {
        let err = run_tool(
            Path::new("diffmovie-no-such-tool"),
            ["-version"],
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            ExtractionError::ToolMissing {
                tool: "diffmovie-no-such-tool".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_tool_failed_with_stderr() {
        let err = run_tool(
            Path::new("sh"),
            ["-c", "echo boom >&2; exit 3"],
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        match &err {
            ExtractionError::ToolFailed { tool, status, stderr } => {
                assert_eq!(tool, "sh");
                assert_eq!(*status, Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("expected ToolFailed, got {:?}", other),
        }
        assert_eq!(err.to_string(), "sh failed (exit status 3): boom");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_tool_times_out() {
        let limit = Duration::from_millis(300);
        let started = std::time::Instant::now();
        let err = run_tool(Path::new("sleep"), ["5"], limit).await.unwrap_err();

        assert_eq!(
            err,
            ExtractionError::Timeout {
                tool: "sleep".to_string(),
                after: limit
            }
        );
        assert_eq!(err.to_string(), "sleep timed out after 300ms");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_run_returns_stdout() {
        let out = run_tool(Path::new("sh"), ["-c", "printf ok"], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out, b"ok");
    }
}
