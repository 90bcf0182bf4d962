use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;
use wheelkit::command::{self, Command, SOCKET_PATH};
use wheelkit::{SegmentNumber, Variant};

#[derive(Parser, Debug)]
#[command(name = "wheelkit", version, about = "Control a running roulette wheel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Spin the wheel onto a segment.
    Start {
        /// The segment number to land on (e.g. 30)
        segment: u32,

        /// Spin duration in milliseconds (defaults to the wheel's configured duration)
        #[arg(short = 'd', long)]
        duration: Option<u64>,
    },
    /// Stop the wheel immediately.
    Stop,
    /// Replace the mounted wheel with the normal one.
    Normal,
    /// Replace the mounted wheel with the one that updates its label while spinning.
    Extended,
    /// Toggle live label updates on the extended wheel.
    Live {
        #[arg(action = clap::ArgAction::Set, value_parser = command::parse_toggle, default_value = "on")]
        enabled: bool,
    },
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Start { segment, duration } => Command::Start {
                segment: SegmentNumber::new(segment),
                duration_ms: duration,
            },
            Commands::Stop => Command::Stop,
            Commands::Normal => Command::Mount(Variant::Normal),
            Commands::Extended => Command::Mount(Variant::Extended),
            Commands::Live { enabled } => Command::LiveLabels(enabled),
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
            "Failed to connect to the roulette daemon at {}: {}. Is roulette running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("sending '{}'", cmd);
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
