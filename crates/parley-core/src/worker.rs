use crate::client::Generator;
use crate::error::ClientError;
use crate::session::{Outcome, RequestId, SendTicket};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Result of one dispatched request, posted back to the UI loop.
#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub outcome: Outcome,
}

/// Runs the request for `ticket` on the runtime and posts exactly one
/// [`Completion`] to `tx`, including when the request task panics.
pub fn dispatch(
    generator: Arc<dyn Generator>,
    ticket: SendTicket,
    tx: UnboundedSender<Completion>,
) -> JoinHandle<()> {
    let SendTicket { id, prompt } = ticket;
    let request = tokio::spawn(async move { generator.generate(&prompt).await });

    tokio::spawn(async move {
        let outcome = match request.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                tracing::error!(request = %id, error = %join_err, "request task failed");
                Err(ClientError::Aborted(join_err.to_string()))
            }
        };
        if tx.send(Completion { id, outcome }).is_err() {
            tracing::debug!(request = %id, "completion receiver closed");
        }
    })
}
