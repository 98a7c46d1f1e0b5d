// ----- standard library imports
use std::time::Duration;
// ----- extra library imports
use tokio::sync::mpsc;
// ----- local imports
use crate::service::Notifier;

// ----- end imports

pub const FAILURE_DURATION: Duration = Duration::from_secs(2);
pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A short-lived message for the user, shown for `duration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub duration: Duration,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            description: description.into(),
            duration: FAILURE_DURATION,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
            duration: SUCCESS_DURATION,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
            duration: FAILURE_DURATION,
        }
    }
}

///--------------------------- tracing sink
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            kind,
            title,
            description,
            ..
        } = notification;
        match kind {
            NotificationKind::Error => tracing::error!("{title}: {description}"),
            NotificationKind::Info | NotificationKind::Success => {
                tracing::info!(%kind, "{title}: {description}")
            }
        }
    }
}

///--------------------------- channel sink
/// Forwards notifications to whatever renders them, e.g. a UI event loop.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            tracing::debug!("notification dropped, receiver gone: {}", e.0.title);
        }
    }
}
