use crate::core::{Executable, ToolInvocation};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Runs synthesized invocations.
///
/// Debug mode prints each command and runs nothing. Silent mode runs with
/// the child's stdout/stderr discarded and prints nothing.
pub struct Launcher {
    pub silent: bool,
    pub debug: bool,
}

impl Launcher {
    pub fn new(silent: bool, debug: bool) -> Self {
        Self { silent, debug }
    }

    /// Locate `executable` on `PATH`.
    pub fn ensure_installed(executable: Executable) -> Result<PathBuf> {
        which::which(executable.program()).with_context(|| {
            format!(
                "svtget is depending on {}, please install it and svtget will start working",
                executable.program()
            )
        })
    }

    pub fn command(&self, program: PathBuf, invocation: &ToolInvocation) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(&invocation.args);
        if self.silent {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        cmd
    }

    pub async fn run(&self, invocation: &ToolInvocation) -> Result<()> {
        if self.debug {
            println!("{}", invocation);
            return Ok(());
        }
        if !self.silent {
            println!("{}", invocation);
        }

        let program = Self::ensure_installed(invocation.executable)?;
        debug!("Running {}", program.display());

        let status = self
            .command(program, invocation)
            .status()
            .await
            .with_context(|| format!("Failed to start {}", invocation.executable.program()))?;

        if !status.success() {
            anyhow::bail!("{} exited with {}", invocation.executable.program(), status);
        }
        info!("{} finished", invocation.executable.program());
        Ok(())
    }

    pub async fn run_all(&self, invocations: &[ToolInvocation]) -> Result<()> {
        for invocation in invocations {
            self.run(invocation).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::core::{synthesize, CommandRequest};

    fn invocation() -> ToolInvocation {
        synthesize(
            Mode::Play,
            &CommandRequest {
                url: "http://x/y.m3u8",
                player_url: "http://x/player.swf",
                output: None,
                extra_args: &[],
            },
        )
    }

    #[tokio::test]
    async fn test_debug_mode_never_executes() {
        // ffplay is unlikely to be installed on a test host; debug must not look for it
        let launcher = Launcher::new(true, true);
        launcher.run(&invocation()).await.unwrap();
    }

    #[test]
    fn test_command_carries_arguments() {
        let launcher = Launcher::new(false, false);
        let cmd = launcher.command(PathBuf::from("ffplay"), &invocation());
        let args: Vec<String> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args, ["http://x/y.m3u8"]);
    }
}
