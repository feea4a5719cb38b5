use std::path::PathBuf;

use clap::Parser;

/// Huddle: join a room and walk through a simulated session.
#[derive(Parser, Debug)]
#[command(name = "huddle", version, about)]
pub struct Args {
    /// Room to join.
    #[arg(short, long, default_value = "lobby")]
    pub room: String,

    /// Display name shown to other participants.
    #[arg(short, long, default_value = "guest")]
    pub name: String,

    /// Simulated peer joining the room (repeatable).
    #[arg(short, long = "peer")]
    pub peers: Vec<String>,

    /// Stay audience-only instead of starting camera and microphone.
    #[arg(long)]
    pub no_stream: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
