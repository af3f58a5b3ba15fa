use tauri::{command, AppHandle, Emitter, Manager, State};

use crate::errors::AppError;
use crate::media::{MediaTools, TranscodeOptions};
use crate::transcode_queue::{TranscodeJob, TranscodeQueue};

/// Drain the queue one job at a time. Runs until no pending jobs remain;
/// exactly one drainer exists at any moment.
fn spawn_worker(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let queue = app.state::<TranscodeQueue>();
        let tools = app.state::<MediaTools>();

        loop {
            while let Some((id, input, output, options)) = queue.next_pending() {
                let result = tools
                    .transcode(&input, &output, &options)
                    .await
                    .map(|_| ())
                    .map_err(|e| e.to_string());
                queue.complete(&id, result);
                let _ = app.emit("transcode-queue-changed", queue.snapshot());
            }

            queue.end_processing();
            // A submission that raced the drain's exit re-claims the slot.
            if !(queue.has_pending() && queue.try_begin_processing()) {
                break;
            }
        }
    });
}

#[command]
pub async fn queue_transcode(
    app: AppHandle,
    queue: State<'_, TranscodeQueue>,
    input_path: String,
    output_path: String,
    options: Option<TranscodeOptions>,
) -> Result<TranscodeJob, AppError> {
    let job = queue.enqueue(input_path, output_path, options.unwrap_or_default());
    let _ = app.emit("transcode-queue-changed", queue.snapshot());

    if queue.try_begin_processing() {
        spawn_worker(app.clone());
    }

    Ok(job)
}

#[command]
pub async fn get_transcode_queue(
    queue: State<'_, TranscodeQueue>,
) -> Result<Vec<TranscodeJob>, AppError> {
    Ok(queue.snapshot())
}
