//! Notification Poller
//!
//! Keeps a [`NotificationCenter`] fresh against the API. The count is
//! re-fetched on a fixed interval by a background task that lives exactly
//! as long as the poller; anything that completes after [`stop`] is
//! discarded.
//!
//! [`stop`]: NotificationPoller::stop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

use crate::api::dto::Role;
use crate::api::ApiClient;

use super::center::NotificationCenter;

/// Default delay between unread-count polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Polls and mutates one role's notifications
pub struct NotificationPoller {
    client: ApiClient,
    state: Arc<RwLock<NotificationCenter>>,
    active: Arc<AtomicBool>,
    interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl NotificationPoller {
    /// Create a poller; nothing is fetched until [`mount`](Self::mount)
    pub fn new(client: ApiClient, role: Role, interval: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            client,
            state: Arc::new(RwLock::new(NotificationCenter::new(role))),
            active: Arc::new(AtomicBool::new(false)),
            interval,
            shutdown_tx,
            task: None,
        }
    }

    /// Shared handle to the notification state
    pub fn state(&self) -> Arc<RwLock<NotificationCenter>> {
        Arc::clone(&self.state)
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> NotificationCenter {
        self.state.read().await.clone()
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    async fn role(&self) -> Role {
        self.state.read().await.role()
    }

    /// Fetch unread list and count together, then start the count timer
    pub async fn mount(&mut self) {
        if self.is_running() {
            return;
        }
        self.active.store(true, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(false);

        let role = self.role().await;
        tracing::debug!(%role, "Mounting notification poller");

        let (unread, count) = tokio::join!(
            self.client.unread_notifications(role),
            self.client.unread_count(role)
        );

        if self.is_running() {
            let mut state = self.state.write().await;
            match unread {
                Ok(list) => state.apply_unread(list),
                Err(e) => tracing::warn!(%role, error = %e, "Failed to fetch unread notifications"),
            }
            match count {
                Ok(count) => state.apply_count(count),
                Err(e) => tracing::warn!(%role, error = %e, "Failed to fetch unread count"),
            }
        }

        self.task = Some(self.spawn_ticker(role));
    }

    fn spawn_ticker(&self, role: Role) -> JoinHandle<()> {
        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let active = Arc::clone(&self.active);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let interval = self.interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            // Skip the first immediate tick; mount just fetched
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                }

                match client.unread_count(role).await {
                    Ok(count) if active.load(Ordering::SeqCst) => {
                        state.write().await.apply_count(count);
                    }
                    Ok(_) => break,
                    Err(e) => tracing::warn!(%role, error = %e, "Unread count poll failed"),
                }
            }

            tracing::debug!(%role, "Notification poller stopped");
        })
    }

    /// Re-fetch the unread list (dropdown opened)
    pub async fn refresh_unread(&self) {
        let role = self.role().await;
        match self.client.unread_notifications(role).await {
            Ok(list) if self.is_running() => self.state.write().await.apply_unread(list),
            Ok(_) => {}
            Err(e) => tracing::warn!(%role, error = %e, "Failed to refresh notifications"),
        }
    }

    /// Toggle the dropdown; opening it re-fetches the list
    pub async fn toggle_dropdown(&self) {
        let opened = self.state.write().await.toggle();
        if opened {
            self.refresh_unread().await;
        }
    }

    /// Remove locally first, then tell the server. A refusal lets the
    /// next list fetch show the item again.
    pub async fn mark_read(&self, id: i64) {
        self.state.write().await.mark_read(id);
        if let Err(e) = self.client.mark_notification_read(id).await {
            tracing::warn!(id, error = %e, "Failed to mark notification read");
            self.state.write().await.restore_dismissed(id);
        }
    }

    /// Clear locally first, then tell the server
    pub async fn mark_all_read(&self) {
        let (role, ids) = {
            let mut state = self.state.write().await;
            let ids = state.mark_all_read();
            (state.role(), ids)
        };
        if let Err(e) = self.client.mark_all_notifications_read(role).await {
            tracing::warn!(%role, error = %e, "Failed to mark all notifications read");
            let mut state = self.state.write().await;
            for id in ids {
                state.restore_dismissed(id);
            }
        }
    }

    /// Cancel the timer task and wait for it to finish
    pub async fn stop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
