use async_trait::async_trait;
use clipdrop_core::{ExtractError, Extractor, Metadata};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, trace};

pub const DEFAULT_PROGRAM: &str = "yt-dlp";

/// Prefer H.264 video with m4a audio, fall back to any single mp4.
const FORMAT: &str = "bv[ext=mp4][vcodec^=avc]+ba[ext=m4a]/b[ext=mp4]";

const HTTP_HEADERS: [&str; 4] = [
    "User-Agent:Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Accept:*/*",
    "Accept-Language:en-US,en;q=0.9",
    "Referer:https://www.tiktok.com/",
];

/// An [`Extractor`] backed by the `yt-dlp` executable.
///
/// The media is downloaded to the requested path while the info JSON is
/// printed to stdout, so one process run yields both the file and its
/// metadata. The child is not killed if the caller stops waiting.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    program: PathBuf,
}

impl YtDlpExtractor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn args(&self, url: &str, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--format".into(),
            FORMAT.into(),
            "--output".into(),
            output.as_os_str().to_owned(),
            "--quiet".into(),
            "--no-warnings".into(),
            "--no-playlist".into(),
            "--concurrent-fragments".into(),
            "4".into(),
            "--buffer-size".into(),
            "8M".into(),
            "--write-thumbnail".into(),
            "--extractor-args".into(),
            "tiktok:player_client=android".into(),
            "--socket-timeout".into(),
            "10".into(),
            "--retries".into(),
            "2".into(),
            "--dump-single-json".into(),
            "--no-simulate".into(),
        ];
        for header in HTTP_HEADERS {
            args.push("--add-header".into());
            args.push(header.into());
        }
        // Everything after `--` is a URL, even if it starts with a dash.
        args.push("--".into());
        args.push(url.into());
        args
    }
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    async fn extract(&self, url: &str, output: &Path) -> Result<Metadata, ExtractError> {
        trace!(program = %self.program.display(), url, "Spawning extractor");

        let result = Command::new(&self.program)
            .args(self.args(url, output))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(ExtractError::Launch)?;

        if !result.status.success() {
            return Err(ExtractError::Failed(failure_message(
                &result.stderr,
                result.status,
            )));
        }

        let metadata = serde_json::from_slice(&result.stdout)?;
        debug!(url, output = %output.display(), "Extractor finished");
        Ok(metadata)
    }
}

/// Picks the most useful line of an extractor's stderr.
///
/// yt-dlp reports the fatal problem on its last `ERROR:` line; without one,
/// the last non-empty line is used, then the exit status.
fn failure_message(stderr: &[u8], status: ExitStatus) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let lines = stderr.lines().map(str::trim).filter(|l| !l.is_empty());

    lines
        .clone()
        .filter(|l| l.starts_with("ERROR:"))
        .last()
        .or_else(|| lines.last())
        .map(str::to_string)
        .unwrap_or_else(|| format!("extractor exited with {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit_status(code: i32) -> ExitStatus {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            ExitStatus::from_raw(code << 8)
        }
        #[cfg(windows)]
        {
            use std::os::windows::process::ExitStatusExt;
            ExitStatus::from_raw(code as u32)
        }
    }

    #[test]
    fn args_end_with_url_after_separator() {
        let extractor = YtDlpExtractor::default();
        let args = extractor.args("-https://www.tiktok.com/x", Path::new("/tmp/out.mp4"));

        let n = args.len();
        assert_eq!(args[n - 2], OsString::from("--"));
        assert_eq!(args[n - 1], OsString::from("-https://www.tiktok.com/x"));
    }

    #[test]
    fn args_carry_output_and_format() {
        let extractor = YtDlpExtractor::default();
        let args = extractor.args("https://www.tiktok.com/x", Path::new("/tmp/out.mp4"));

        let pos = args.iter().position(|a| a == "--output").unwrap();
        assert_eq!(args[pos + 1], OsString::from("/tmp/out.mp4"));
        let pos = args.iter().position(|a| a == "--format").unwrap();
        assert_eq!(args[pos + 1], OsString::from(FORMAT));
        assert!(args.iter().any(|a| a == "--dump-single-json"));
        assert!(args.iter().any(|a| a == "Referer:https://www.tiktok.com/"));
    }

    #[test]
    fn failure_message_prefers_error_line() {
        let stderr = b"WARNING: something\nERROR: [TikTok] 123: Unsupported URL\nhint: update\n";
        assert_eq!(
            failure_message(stderr, exit_status(1)),
            "ERROR: [TikTok] 123: Unsupported URL"
        );
    }

    #[test]
    fn failure_message_falls_back_to_last_line_then_status() {
        assert_eq!(
            failure_message(b"first\nlast\n\n", exit_status(1)),
            "last"
        );
        assert!(failure_message(b"", exit_status(2)).starts_with("extractor exited with"));
    }

    #[tokio::test]
    async fn missing_program_is_a_launch_error() {
        let extractor = YtDlpExtractor::new("/nonexistent/clipdrop-test-yt-dlp");
        let err = extractor
            .extract("https://www.tiktok.com/x", Path::new("/tmp/never.mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExtractError::Launch(_)));
    }
}
