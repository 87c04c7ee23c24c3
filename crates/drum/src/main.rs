use clap::{Parser, Subcommand};
use drum::command::{Command, SOCKET_PATH};
use drum::AttributeName;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "cylinderctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Select the next item
    Next,
    /// Select the previous item
    Prev,
    /// Rotate by a number of items (negative goes up)
    Rotate {
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Stop any running momentum
    Stop,
    /// Set a picker attribute (value, curvature, disabled, infinite)
    Set {
        attribute: AttributeName,
        #[arg(default_value = "")]
        value: String,
    },
    /// Remove a picker attribute, restoring its default
    Unset { attribute: AttributeName },
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Next => Command::Next,
            Commands::Prev => Command::Prev,
            Commands::Rotate { delta } => Command::Rotate(delta),
            Commands::Stop => Command::Stop,
            Commands::Set { attribute, value } => Command::Set(attribute, value),
            Commands::Unset { attribute } => Command::Unset(attribute),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    send_command(&Command::from(cli.command))
}

fn send_command(cmd: &Command) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to cylinder daemon at {}: {}. Is cylinder running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("sending '{}'", cmd);
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
