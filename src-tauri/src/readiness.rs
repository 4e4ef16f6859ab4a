use std::time::Duration;
use tokio::sync::oneshot;

/// Resolves once the matching [`ReadyNotifier`] fires.
#[derive(Debug)]
pub struct ReadySignal {
    receiver: Option<oneshot::Receiver<()>>,
}

/// Fires a [`ReadySignal`]. Consumed on use, so it fires at most once.
#[derive(Debug)]
pub struct ReadyNotifier {
    sender: oneshot::Sender<()>,
}

pub fn ready_channel() -> (ReadyNotifier, ReadySignal) {
    let (sender, receiver) = oneshot::channel();
    (
        ReadyNotifier { sender },
        ReadySignal {
            receiver: Some(receiver),
        },
    )
}

impl ReadySignal {
    pub fn already_ready() -> Self {
        Self { receiver: None }
    }
}

impl ReadyNotifier {
    pub fn notify(self) {
        // The waiter may have timed out and gone away; nothing to do then.
        let _ = self.sender.send(());
    }
}

/// Waits for `signal`. `timeout: None` waits forever.
pub async fn wait_until_ready(
    signal: ReadySignal,
    what: &str,
    timeout: Option<Duration>,
) -> Result<(), String> {
    let Some(receiver) = signal.receiver else {
        return Ok(());
    };

    let received = match timeout {
        Some(limit) => tokio::time::timeout(limit, receiver)
            .await
            .map_err(|_| {
                format!(
                    "Timed out after {}ms waiting for {what} to become ready.",
                    limit.as_millis()
                )
            })?,
        None => receiver.await,
    };
    received.map_err(|_| format!("{what} went away before signalling readiness."))
}
