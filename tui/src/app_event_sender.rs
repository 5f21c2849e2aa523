use tokio::sync::mpsc::UnboundedSender;

use crate::app_event::AppEvent;

#[derive(Clone, Debug)]
pub struct AppEventSender {
    app_event_tx: UnboundedSender<AppEvent>,
}

impl AppEventSender {
    pub fn new(app_event_tx: UnboundedSender<AppEvent>) -> Self {
        Self { app_event_tx }
    }

    /// Send an event to the app event channel. If it fails, we swallow the
    /// error and log it.
    pub fn send(&self, event: AppEvent) {
        if let Err(e) = self.app_event_tx.send(event) {
            tracing::debug!("app event dropped, receiver gone: {:?}", e.0);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.app_event_tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn send_after_receiver_dropped_is_silent() {
        let (tx, rx) = unbounded_channel();
        let sender = AppEventSender::new(tx);
        drop(rx);

        assert!(sender.is_closed());
        sender.send(AppEvent::ExitRequest);
    }

    #[test]
    fn events_arrive_in_order() {
        let (tx, mut rx) = unbounded_channel();
        let sender = AppEventSender::new(tx);

        sender.send(AppEvent::ListingsFetched {
            attempt: 1,
            outcome: Ok(serde_json::json!([])),
        });
        sender.send(AppEvent::ExitRequest);

        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::ListingsFetched { attempt: 1, .. })
        ));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::ExitRequest)));
    }
}
