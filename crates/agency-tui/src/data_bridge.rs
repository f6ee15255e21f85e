//! Data bridge: runs [`Site`] calls on background tasks and reports the
//! results to the app loop as [`Action`]s.
//!
//! Screens record the start of a fetch or mutation on their `ListView`
//! synchronously and hand the network call to one of these functions; the
//! completion comes back through the action channel, where the view
//! applies it (or drops it as stale).

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use agency_core::{Command, FetchTicket, ItemId, Site, Toast};

use crate::action::{Action, MutationKind};
use crate::screen::ScreenId;
use crate::screens::Listing;

/// Fetch the whole collection for `T` under `ticket`.
pub fn spawn_fetch<T: Listing>(site: Site, ticket: FetchTicket, tx: mpsc::UnboundedSender<Action>) {
    tokio::spawn(async move {
        let result = site.fetch::<T>().await;
        debug!(collection = T::COLLECTION, ok = result.is_ok(), "fetch finished");
        let _ = tx.send(Action::Fetched {
            ticket,
            data: T::loaded(result),
        });
    });
}

/// Execute a single-item mutation. `Site::execute` toasts the outcome; the
/// result is returned for reconciliation.
pub fn spawn_mutation(
    site: Site,
    screen: ScreenId,
    id: ItemId,
    kind: MutationKind,
    command: Command,
    tx: mpsc::UnboundedSender<Action>,
) {
    tokio::spawn(async move {
        let result = site.execute(command).await;
        let _ = tx.send(Action::Mutated {
            screen,
            id,
            kind,
            result,
        });
    });
}

/// Forward toasts from the site's notifier until cancelled.
pub async fn forward_toasts(
    mut toasts: mpsc::UnboundedReceiver<Toast>,
    tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            toast = toasts.recv() => {
                let Some(toast) = toast else { break };
                if tx.send(Action::Notify(toast)).is_err() {
                    break;
                }
            }
        }
    }
    debug!("toast bridge shut down");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn toasts_become_notify_actions() {
        let (toast_tx, toast_rx) = mpsc::unbounded_channel();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        toast_tx.send(Toast::success("Blog post deleted")).unwrap();
        drop(toast_tx);
        forward_toasts(toast_rx, action_tx, cancel).await;

        match action_rx.recv().await.unwrap() {
            Action::Notify(toast) => assert_eq!(toast.message, "Blog post deleted"),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancellation_stops_forwarding() {
        let (_toast_tx, toast_rx) = mpsc::unbounded_channel::<Toast>();
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();
        forward_toasts(toast_rx, action_tx, cancel).await;
    }
}
