//! Local system facts shown next to the logo
//!
//! Facts come from environment variables and a few short-lived subprocesses.
//! Every fact is optional; anything missing or empty is simply not shown.

use std::future::Future;
use std::path::Path;

use tokio::process::Command;
use tracing::debug;

/// One displayable system fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    User,
    Os,
    Arch,
    Uptime,
    Shell,
    Terminal,
    Editor,
    Browser,
    Desktop,
}

impl Field {
    /// Facts listed under the username, in display order
    pub const DETAILS: [Field; 8] = [
        Field::Os,
        Field::Arch,
        Field::Uptime,
        Field::Shell,
        Field::Terminal,
        Field::Editor,
        Field::Browser,
        Field::Desktop,
    ];
}

/// Collected system facts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfo {
    pub username: Option<String>,
    pub os: Option<String>,
    pub arch: Option<String>,
    pub uptime: Option<String>,
    pub shell: Option<String>,
    pub terminal: Option<String>,
    pub editor: Option<String>,
    pub browser: Option<String>,
    pub desktop: Option<String>,
}

impl SystemInfo {
    /// Collects facts from the real process environment and system commands
    pub async fn gather() -> Self {
        Self::gather_with(|key| std::env::var(key).ok(), run_command).await
    }

    /// Collects facts through the given environment lookup and command runner
    ///
    /// The four commands run concurrently.
    pub async fn gather_with<E, R, F>(env: E, run: R) -> Self
    where
        E: Fn(&str) -> Option<String>,
        R: Fn(&'static str, &'static [&'static str]) -> F,
        F: Future<Output = Option<String>>,
    {
        let (whoami, os, arch, uptime) = futures::join!(
            run("whoami", &[]),
            run("uname", &["-s"]),
            run("uname", &["-m"]),
            run("uptime", &["-p"])
        );

        let var = |key: &str| env(key).and_then(non_empty);

        Self {
            username: whoami.and_then(non_empty).or_else(|| var("USER")),
            os: os.and_then(non_empty),
            arch: arch.and_then(non_empty),
            uptime: uptime.and_then(non_empty).and_then(strip_up_prefix),
            shell: var("SHELL").and_then(basename),
            terminal: var("TERM_PROGRAM").or_else(|| var("TERM")),
            editor: var("VISUAL").or_else(|| var("EDITOR")),
            browser: var("BROWSER"),
            desktop: var("XDG_CURRENT_DESKTOP").or_else(|| var("DESKTOP_SESSION")),
        }
    }

    /// Returns the value collected for `field`
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::User => &self.username,
            Field::Os => &self.os,
            Field::Arch => &self.arch,
            Field::Uptime => &self.uptime,
            Field::Shell => &self.shell,
            Field::Terminal => &self.terminal,
            Field::Editor => &self.editor,
            Field::Browser => &self.browser,
            Field::Desktop => &self.desktop,
        };
        value.as_deref()
    }
}

/// Runs a command, returning its stdout when it exits successfully
async fn run_command(program: &'static str, args: &'static [&'static str]) -> Option<String> {
    match Command::new(program).args(args).output().await {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            debug!(program, status = %output.status, "command exited unsuccessfully");
            None
        }
        Err(e) => {
            debug!(program, error = %e, "failed to run command");
            None
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `uptime -p` prints "up 3 hours, 2 minutes"
fn strip_up_prefix(value: String) -> Option<String> {
    match value.strip_prefix("up ") {
        Some(rest) => non_empty(rest.to_string()),
        None => Some(value),
    }
}

fn basename(path: String) -> Option<String> {
    Path::new(&path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .and_then(non_empty)
}
