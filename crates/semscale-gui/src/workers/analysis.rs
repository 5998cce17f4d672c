use std::sync::mpsc;
use std::time::Instant;

use semscale_core::session::AnalysisTicket;
use semscale_core::suggestion::SuggestionProvider;

use crate::messages::WorkerResult;

use super::send;

pub(super) fn handle_analyze(
    provider: &dyn SuggestionProvider,
    ticket: AnalysisTicket,
    bytes: &[u8],
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let outcome = provider.suggest(bytes);
    send(
        tx,
        ctx,
        WorkerResult::AnalysisComplete {
            ticket,
            outcome,
            elapsed: start.elapsed(),
        },
    );
}
