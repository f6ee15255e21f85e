// ── Toast notifications ──
//
// Fire-and-forget messages for mutation outcomes. The CLI prints them,
// the TUI renders them as toasts; core only needs `Notifier::notify`.

use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }
}

/// Toast collaborator. Return values are never consumed.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Routes toasts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => warn!(message = %toast.message, "notification"),
            ToastLevel::Info | ToastLevel::Success => {
                info!(message = %toast.message, "notification");
            }
        }
    }
}

/// Forwards toasts over an unbounded channel (TUI, tests).
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Toast>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Toast>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, toast: Toast) {
        // Receiver gone means nobody is displaying toasts any more.
        let _ = self.tx.send(toast);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Toast::success("saved"));
        notifier.notify(Toast::error("failed"));
        assert_eq!(rx.try_recv().unwrap(), Toast::success("saved"));
        assert_eq!(rx.try_recv().unwrap().level, ToastLevel::Error);
    }

    #[test]
    fn closed_channel_is_harmless() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify(Toast::info("nobody listening"));
    }
}
