//! Simulated room over the loopback collaborators.

use std::sync::Arc;

use huddle_common::ParticipantId;
use huddle_session::{
    LoopbackMedia, LoopbackSignaling, MediaKind, OutboundMessage, Origin, SessionConfig,
    SessionCoordinator, SessionError, SizeClass,
};
use tracing::info;

use crate::cli::Args;

pub async fn run(args: &Args, config: SessionConfig, self_id: ParticipantId) -> Result<(), SessionError> {
    let signaling = Arc::new(LoopbackSignaling::new());
    let media = Arc::new(LoopbackMedia::new());
    let mut coordinator = SessionCoordinator::new(signaling.clone(), media.clone(), config, self_id);

    coordinator.join(&args.room, &args.name).await?;
    if !args.no_stream {
        coordinator.join_stream().await?;
    }

    let peers: Vec<(ParticipantId, &str)> = args
        .peers
        .iter()
        .map(|name| (ParticipantId::generate(), name.as_str()))
        .collect();

    for (id, name) in &peers {
        signaling.peer_joined(id.clone(), *name);
        media.peer_published(id.clone(), MediaKind::Audio);
        media.peer_published(id.clone(), MediaKind::Video);
        signaling.peer_message(
            OutboundMessage::Chat {
                text: format!("hi, I'm {name}"),
                display_name: name.to_string(),
            }
            .encode(),
        );
    }
    let handled = coordinator.process_ready().await;
    info!(handled, "peer activity processed");

    coordinator
        .send_chat_message(&format!("hello from {}", args.name))
        .await?;
    if let Some((id, _)) = peers.first() {
        coordinator.focus_tile(Some(id))?;
    }
    print_room(&coordinator);

    if !args.no_stream {
        coordinator.toggle_screen_share().await?;
        println!("-- sharing screen");
        print_tiles(&coordinator);
        coordinator.toggle_screen_share().await?;
        println!("-- back to camera");
        print_tiles(&coordinator);
    }

    for (id, _) in &peers {
        signaling.peer_left(id.clone());
    }
    coordinator.process_ready().await;
    print_room(&coordinator);

    coordinator.dispose().await
}

fn print_room(coordinator: &SessionCoordinator) {
    let state = coordinator.state();
    println!(
        "== room {} ({})",
        state.room_id.as_deref().unwrap_or("-"),
        state.phase
    );

    if let Some(roster) = coordinator.roster() {
        let names: Vec<&str> = roster
            .current()
            .iter()
            .map(|p| p.display_name.as_str())
            .collect();
        println!("members: {}", names.join(", "));
    }

    print_tiles(coordinator);

    if let Some(log) = coordinator.chat_log() {
        for entry in log.entries() {
            let marker = match entry.origin {
                Origin::System => "*",
                Origin::User => ">",
            };
            println!("{marker} {}: {}", entry.author, entry.text);
        }
    }
}

fn print_tiles(coordinator: &SessionCoordinator) {
    let Some(tiles) = coordinator.tiles() else {
        return;
    };
    let media = coordinator.local_media();
    println!(
        "stream: joined={} sharing={} camera_muted={} mic_muted={}",
        media.joined_stream, media.sharing_screen, media.camera_muted, media.mic_muted
    );
    for tile in tiles.tiles() {
        let size = match tile.size_class {
            SizeClass::Grid => "grid",
            SizeClass::Shrunk => "shrunk",
        };
        let focus = if tile.is_focused { " [focused]" } else { "" };
        println!("tile {} {size}{focus}", tile.surface_id());
    }
}
