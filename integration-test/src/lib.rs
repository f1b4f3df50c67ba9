//! Test driver for wgetopt integration tests.
//!
//! Runs the `tgetopt` binary with a given argument vector and environment,
//! capturing stdout (the token transcript) and stderr (diagnostics).

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Workspace root, one level above this crate.
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the debug `tgetopt` binary.
pub fn tgetopt_binary() -> PathBuf {
    let target = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| workspace_root().join("target"));
    target.join("debug").join("tgetopt")
}

/// A finished `tgetopt` run.
pub struct TestRun {
    output: Output,
}

impl TestRun {
    /// Run `binary` with `args`, adding `env` to a cleared POSIXLY_CORRECT
    /// environment.
    pub fn spawn(binary: &Path, args: &[&str], env: &[(&str, &str)]) -> std::io::Result<TestRun> {
        let mut cmd = Command::new(binary);
        cmd.args(args);
        cmd.env_remove("POSIXLY_CORRECT");
        cmd.env_remove("POSIX_ME_HARDER");
        cmd.env_remove("RUST_LOG");
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.stdin(Stdio::null());

        let output = cmd.output()?;
        Ok(TestRun { output })
    }

    /// Assert the exit code and hand back the captured streams.
    pub fn wait_exit(self, expected_code: i32) -> RunOutput {
        let code = self.output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&self.output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&self.output.stderr).to_string();

        assert_eq!(
            code, expected_code,
            "expected exit code {expected_code}, got {code}\nstdout:\n{stdout}\nstderr:\n{stderr}"
        );

        RunOutput { stdout, stderr }
    }
}

/// Output captured from a completed run.
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn stdout_lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }

    /// The `argv:` line, split back into words.
    pub fn permuted_argv(&self) -> Vec<&str> {
        self.field("argv:")
    }

    /// The `operands:` line, split back into words.
    pub fn operands(&self) -> Vec<&str> {
        self.field("operands:")
    }

    fn field(&self, prefix: &str) -> Vec<&str> {
        self.stdout
            .lines()
            .find_map(|line| line.strip_prefix(prefix))
            .map(|rest| rest.split_whitespace().collect())
            .unwrap_or_default()
    }
}
