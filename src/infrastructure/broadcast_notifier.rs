// Notifier backed by a tokio broadcast channel
use crate::application::notifier::{Notification, NotificationVariant, Notifier};
use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Default => {
                tracing::info!("{}: {}", notification.title, notification.description)
            }
            NotificationVariant::Destructive => {
                tracing::warn!("{}: {}", notification.title, notification.description)
            }
        }

        // No subscribers is fine; the message is only logged.
        let _ = self.sender.send(notification);
    }
}
