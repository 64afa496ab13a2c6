//! Host without a display: every frame and alert goes to the log.

use crate::events::AppEvent;
use crate::face::{Face, Reaction};
use async_channel::{Receiver, Sender};
use dial::store::Store;

pub fn run<S: Store>(
    face: Face<S>,
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
) -> std::io::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    rt.block_on(event_loop(face, tx, rx));
    Ok(())
}

async fn event_loop<S: Store>(mut face: Face<S>, tx: Sender<AppEvent>, rx: Receiver<AppEvent>) {
    log_frame(&face);

    while let Ok(event) = rx.recv().await {
        let reaction = face.handle(event);
        react(&face, reaction, &tx);
    }
}

fn react<S: Store>(face: &Face<S>, reaction: Reaction, tx: &Sender<AppEvent>) {
    if let Some(vibe) = reaction.vibe {
        log::info!("Vibrate {:?} {:?}", vibe, vibe.pattern());
    }

    if let Some((after, ticket)) = reaction.hide_after {
        let tx = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(AppEvent::RevealExpired(ticket)).await;
        });
    }

    if reaction.should_redraw {
        log_frame(face);
    }
}

fn log_frame<S: Store>(face: &Face<S>) {
    let geometry = face.geometry();
    log::info!(
        "{} | hand {}° | labels {:?} {:?}{}{}",
        face.clock(),
        geometry.indicator.rotation_degrees,
        geometry.hour_label.text.as_str(),
        geometry.next_hour_label.text.as_str(),
        face.overlay_text()
            .map(|t| format!(" | {} {}", t.date, t.time))
            .unwrap_or_default(),
        if face.bluetooth_connected() { "" } else { " | phone disconnected" },
    );

    match serde_json::to_string(geometry) {
        Ok(json) => log::debug!("{}", json),
        Err(e) => log::error!("Failed to encode frame: {}", e),
    }
}
