use std::sync::mpsc;

use semscale_core::suggestion::SuggestionProvider;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{analysis, io};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    provider: Box<dyn SuggestionProvider>,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    let spawned = std::thread::Builder::new()
        .name("semscale-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, provider);
        });
    if let Err(e) = spawned {
        tracing::error!("Failed to spawn worker thread: {e}");
    }

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    mut provider: Box<dyn SuggestionProvider>,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { path } => {
                io::handle_load_image(&path, &tx, &ctx);
            }
            WorkerCommand::Analyze { ticket, bytes } => {
                analysis::handle_analyze(provider.as_ref(), ticket, &bytes, &tx, &ctx);
            }
            WorkerCommand::SaveExport { path, image } => {
                io::handle_save_export(&path, &image, &tx, &ctx);
            }
            WorkerCommand::SetProvider { provider: next } => {
                send_log(&tx, &ctx, format!("Suggestion provider: {}", next.name()));
                provider = next;
            }
        }
    }
}
