//! Runs remote generation requested by the UI and posts results back as events.
//!
//! The UI thread never awaits; it sends a [`UiCommand`] and keeps drawing.
//! Every command runs in its own task, so inspiration and poem requests are
//! independent and may finish in any order.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::muse::{MuseTask, PoetryModel};
use crate::ui::app::{UiCommand, UiCommandSender};
use crate::ui::events::AppEvent;

/// Outstanding commands the UI may queue before `try_send` reports full.
const COMMAND_BUFFER: usize = 16;

/// Spawn the command loop on `handle` and return the sender the App uses.
pub fn spawn_command_worker(
    handle: &Handle,
    model: Arc<dyn PoetryModel>,
    events: Sender<AppEvent>,
) -> UiCommandSender {
    let (tx, mut rx) = mpsc::channel::<UiCommand>(COMMAND_BUFFER);

    handle.spawn(async move {
        while let Some(command) = rx.recv().await {
            let model = Arc::clone(&model);
            let events = events.clone();
            tokio::spawn(async move {
                let event = run_command(model.as_ref(), command).await;
                // The UI may already be gone on shutdown.
                let _ = events.send(event);
            });
        }
        tracing::debug!("Command worker stopped");
    });

    tx
}

/// Execute one command and turn its result into the matching event.
pub async fn run_command(model: &dyn PoetryModel, command: UiCommand) -> AppEvent {
    match command {
        UiCommand::DescribeImage { epoch, image } => {
            let outcome = model.describe_image(&image).await.map_err(|err| {
                tracing::warn!(epoch, error = %err, "Inspiration request failed");
                err.user_message(MuseTask::Inspiration)
            });
            AppEvent::InspirationReady { epoch, outcome }
        }
        UiCommand::ComposePoem {
            epoch,
            image,
            style,
        } => {
            let outcome = model.compose_poem(&image, style).await.map_err(|err| {
                tracing::warn!(epoch, style = %style, error = %err, "Poem request failed");
                err.user_message(MuseTask::Poem)
            });
            AppEvent::PoemReady { epoch, outcome }
        }
    }
}
