use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

use super::{ContainerRuntime, RuntimeError};
use crate::domain::{ContainerName, ContainerState, EngineContainer};

const DOCKER: &str = "docker";

/// Drives the engine through the `docker` CLI.
///
/// Remote engines are reached by setting `DOCKER_HOST`, which the CLI
/// understands for `tcp://`, `unix://` and `ssh://` hosts alike.
pub struct DockerCli {
    docker_host: Option<String>,
    stop_timeout: Duration,
}

/// One line of `docker ps --format '{{json .}}'`.
#[derive(Debug, Deserialize)]
struct PsLine {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Image")]
    image: String,
    #[serde(rename = "Names")]
    names: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Status", default)]
    status: String,
}

impl DockerCli {
    pub fn new(docker_host: Option<String>, stop_timeout: Duration) -> Self {
        Self {
            docker_host,
            stop_timeout,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(DOCKER);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(host) = &self.docker_host {
            cmd.env("DOCKER_HOST", host);
        }
        cmd
    }

    /// Run `docker <args>` and return its stdout.
    async fn run(&self, args: &[&str], dir: Option<&Path>) -> Result<String, RuntimeError> {
        let command_line = format!("{} {}", DOCKER, args.join(" "));
        debug!(command = %command_line, "Running");

        let mut cmd = self.command(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|source| RuntimeError::SpawnError {
            command: command_line.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(RuntimeError::CommandFailed {
                command: command_line,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Whole seconds for `docker stop --time`, rounded up so a sub-second
/// timeout still gives the container a grace period.
fn stop_timeout_secs(timeout: Duration) -> u64 {
    timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0)
}

fn parse_ps(output: &str) -> Result<Vec<EngineContainer>, RuntimeError> {
    let bad = |reason: String| RuntimeError::BadOutput {
        command: "docker ps".into(),
        reason,
    };

    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let ps: PsLine = serde_json::from_str(line).map_err(|e| bad(e.to_string()))?;
            // Linked containers list several names; the first is the
            // container's own.
            let first = ps.names.split(',').next().unwrap_or_default();
            let name = ContainerName::from_engine(first).map_err(|e| bad(e.to_string()))?;
            Ok(EngineContainer {
                id: ps.id,
                name,
                image: ps.image,
                state: ContainerState::parse(&ps.state),
                status: ps.status,
            })
        })
        .collect()
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn list(&self) -> Result<Vec<EngineContainer>, RuntimeError> {
        let out = self
            .run(&["ps", "--all", "--no-trunc", "--format", "{{json .}}"], None)
            .await?;
        parse_ps(&out)
    }

    async fn start(&self, id: &str) -> Result<(), RuntimeError> {
        self.run(&["start", id], None).await?;
        Ok(())
    }

    async fn stop(&self, id: &str) -> Result<(), RuntimeError> {
        let timeout = stop_timeout_secs(self.stop_timeout).to_string();
        self.run(&["stop", "--time", timeout.as_str(), id], None).await?;
        Ok(())
    }

    async fn state(&self, name: &ContainerName) -> Result<ContainerState, RuntimeError> {
        let out = self
            .run(
                &["inspect", "--format", "{{.State.Status}}", name.as_str()],
                None,
            )
            .await?;
        Ok(ContainerState::parse(&out))
    }

    async fn compose_up(&self, project_dir: &Path, env_file: &Path) -> Result<(), RuntimeError> {
        if !env_file.exists() {
            return Err(RuntimeError::EnvFileMissing(env_file.to_path_buf()));
        }
        let env_file = env_file.to_string_lossy().into_owned();

        info!(dir = %project_dir.display(), "Pulling compose images");
        self.run(
            &["compose", "--env-file", env_file.as_str(), "pull"],
            Some(project_dir),
        )
        .await?;

        info!(dir = %project_dir.display(), "Bringing compose project up");
        self.run(
            &[
                "compose",
                "--env-file",
                env_file.as_str(),
                "up",
                "--detach",
                "--remove-orphans",
            ],
            Some(project_dir),
        )
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ps_lines() {
        let out = concat!(
            r#"{"ID":"abc123","Image":"nginx:1.27","Names":"nginx-1","State":"running","Status":"Up 3 hours"}"#,
            "\n",
            r#"{"ID":"def456","Image":"redis","Names":"cache,web/cache","State":"exited","Status":"Exited (0) 2 days ago"}"#,
            "\n\n",
        );

        let containers = parse_ps(out).unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].name.as_str(), "nginx-1");
        assert_eq!(containers[0].state, ContainerState::Running);
        assert_eq!(containers[1].name.as_str(), "cache");
        assert_eq!(containers[1].state, ContainerState::Exited);
    }

    #[test]
    fn test_parse_ps_rejects_garbage() {
        assert!(matches!(
            parse_ps("not json"),
            Err(RuntimeError::BadOutput { .. })
        ));
    }

    #[test]
    fn test_stop_timeout_rounds_up_to_whole_seconds() {
        assert_eq!(stop_timeout_secs(Duration::from_millis(500)), 1);
        assert_eq!(stop_timeout_secs(Duration::from_millis(1500)), 2);
        assert_eq!(stop_timeout_secs(Duration::from_secs(20)), 20);
        assert_eq!(stop_timeout_secs(Duration::ZERO), 0);
    }

    #[tokio::test]
    async fn test_compose_up_requires_env_file() {
        let docker = DockerCli::new(None, Duration::from_secs(1));
        let dir = tempfile::TempDir::new().unwrap();
        let err = docker
            .compose_up(dir.path(), &dir.path().join("missing.env"))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::EnvFileMissing(_)));
    }
}
