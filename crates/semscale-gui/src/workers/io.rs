use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use image::RgbaImage;
use semscale_core::io::{decode_image, save_png};

use crate::messages::WorkerResult;

use super::{send, send_error, send_log};

pub(super) fn handle_load_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let start = Instant::now();
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to read {}: {e}", path.display()));
            return;
        }
    };

    match decode_image(&bytes) {
        Ok(image) => {
            send_log(
                tx,
                ctx,
                format!(
                    "Decoded {}x{} in {}ms",
                    image.width(),
                    image.height(),
                    start.elapsed().as_millis()
                ),
            );
            send(
                tx,
                ctx,
                WorkerResult::ImageLoaded {
                    path: path.to_path_buf(),
                    image,
                    bytes,
                },
            );
        }
        Err(e) => send_error(tx, ctx, format!("Failed to open image: {e}")),
    }
}

pub(super) fn handle_save_export(
    path: &Path,
    image: &RgbaImage,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match save_png(image, path) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::ExportSaved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to save {}: {e}", path.display())),
    }
}
