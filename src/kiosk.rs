use crate::engine::{CheckEngine, Submission};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{instrument, warn};

/// Runs a kiosk session: one JSON submission per input line, one JSON outcome
/// per output line. Malformed lines are skipped with a warning so a single
/// garbled scan does not end the session.
#[instrument(skip_all)]
pub async fn run<R, W>(engine: &CheckEngine, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Submission>(&line) {
            Ok(submission) => {
                let outcome = engine.process(submission).await;
                let mut payload = serde_json::to_vec(&outcome)?;
                payload.push(b'\n');
                writer.write_all(&payload).await?;
                writer.flush().await?;
            }
            Err(e) => warn!("⚠️ Ignoring malformed submission: {}", e),
        }
    }

    Ok(())
}
