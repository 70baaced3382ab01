use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};

use anyhow::Context;
use quarto::Request;
use serde::Deserialize;
use tracing::trace;

/// How to start a bot, as stored in a player config JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PlayerConfig {
    /// The name shown in the results.
    pub nick: String,
    /// The program to run, followed by its arguments.
    pub cmd: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open player config '{}'", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        if config.cmd.is_empty() {
            anyhow::bail!("Player config '{}' has an empty cmd", path.display());
        }
        Ok(config)
    }
}

/// A bot that the judge talks to, one JSON line per request and response.
pub struct Player {
    pub name: String,
    stdin: Box<dyn Write>,
    stdout: Box<dyn BufRead>,
    child: Option<Child>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    /// Spawn the bot process. Its stderr is passed through.
    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let (program, args) = config
            .cmd
            .split_first()
            .context("Player config has an empty cmd")?;
        let mut child_proc = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start player {}", config.nick))?;

        let stdin = child_proc.stdin.take().context("Could not access stdin")?;
        let stdout = child_proc.stdout.take().context("Could not access stdout")?;
        let mut player = Self::from_streams(&config.nick, BufReader::new(stdout), stdin);
        player.child = Some(child_proc);
        Ok(player)
    }

    /// A player that reads its responses from `responses` and gets its requests written to `requests`.
    pub fn from_streams(
        name: &str,
        responses: impl BufRead + 'static,
        requests: impl Write + 'static,
    ) -> Self {
        Self {
            name: String::from(name),
            stdin: Box::new(requests),
            stdout: Box::new(responses),
            child: None,
            buf: String::new(),
        }
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            anyhow::bail!("Player {} closed its output", self.name);
        }
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response).with_context(|| {
            format!(
                "Could not understand response of player {}: {}",
                self.name, serialized_response
            )
        })?;
        trace!(name: "Received response", player = &self.name, response = %serialized_response);
        self.buf.clear();
        Ok(response)
    }

    /// Tell the bot to shut down, and wait for it if it is a process.
    pub fn say_bye(mut self) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(&Request::Bye)?;
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            trace!(player = &self.name, %status, "Player exited");
        }
        Ok(())
    }
}
