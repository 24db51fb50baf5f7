//! Notification State
//!
//! Unread notifications for one role plus the unread badge count.

use std::collections::HashSet;

use crate::api::dto::{Notification, Role};

/// Client-side cache of a role's unread notifications
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationCenter {
    role: Role,
    unread: Vec<Notification>,
    unread_count: u64,
    open: bool,
    /// Ids marked read locally that the server may still report as unread
    dismissed: HashSet<i64>,
}

impl NotificationCenter {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            unread: Vec::new(),
            unread_count: 0,
            open: false,
            dismissed: HashSet::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn unread(&self) -> &[Notification] {
        &self.unread
    }

    pub fn unread_count(&self) -> u64 {
        self.unread_count
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Replace the unread list with a fresh fetch.
    ///
    /// Items already marked read locally are left out until the server
    /// stops listing them. The count becomes the size of the kept list.
    pub fn apply_unread(&mut self, fetched: Vec<Notification>) {
        let listed: HashSet<i64> = fetched.iter().map(|n| n.id).collect();
        self.dismissed.retain(|id| listed.contains(id));

        self.unread = fetched
            .into_iter()
            .filter(|n| !n.read && !self.dismissed.contains(&n.id))
            .collect();
        self.unread_count = self.unread.len() as u64;
    }

    /// Take the server-reported count from a poll tick
    pub fn apply_count(&mut self, count: u64) {
        self.unread_count = count;
    }

    /// Drop one notification locally. Returns whether it was listed.
    ///
    /// The count drops by one even when the id was not listed.
    pub fn mark_read(&mut self, id: i64) -> bool {
        let before = self.unread.len();
        self.unread.retain(|n| n.id != id);
        self.dismissed.insert(id);
        self.unread_count = self.unread_count.saturating_sub(1);
        self.unread.len() != before
    }

    /// Drop everything locally. Returns the ids that were listed.
    pub fn mark_all_read(&mut self) -> Vec<i64> {
        let ids: Vec<i64> = self.unread.drain(..).map(|n| n.id).collect();
        self.dismissed.extend(ids.iter().copied());
        self.unread_count = 0;
        ids
    }

    /// Stop suppressing an id after the server refused to mark it read,
    /// so the next list fetch shows it again
    pub fn restore_dismissed(&mut self, id: i64) {
        self.dismissed.remove(&id);
    }

    /// Flip the dropdown. Returns true when it just opened.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Badge text; large counts collapse to "99+"
    pub fn badge(&self) -> Option<String> {
        match self.unread_count {
            0 => None,
            n if n > 99 => Some("99+".to_string()),
            n => Some(n.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::NotificationType;
    use chrono::NaiveDate;

    fn notification(id: i64) -> Notification {
        Notification {
            id,
            title: format!("Notice {}", id),
            message: "Body".to_string(),
            kind: NotificationType::Info,
            created_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            read: false,
            target_role: Some(Role::Employee),
        }
    }

    #[test]
    fn test_apply_unread_sets_count() {
        let mut center = NotificationCenter::new(Role::Employee);
        center.apply_unread(vec![notification(1), notification(2)]);
        assert_eq!(center.unread_count(), 2);
        assert_eq!(center.unread().len(), 2);
    }

    #[test]
    fn test_mark_read_never_below_zero() {
        let mut center = NotificationCenter::new(Role::Employee);
        assert!(!center.mark_read(42));
        assert_eq!(center.unread_count(), 0);

        center.apply_unread(vec![notification(1)]);
        center.mark_read(1);
        center.mark_read(1);
        center.mark_read(99);
        assert_eq!(center.unread_count(), 0);
    }

    #[test]
    fn test_mark_read_against_polled_count() {
        let mut center = NotificationCenter::new(Role::Admin);
        center.apply_unread(vec![notification(1)]);
        center.apply_count(5);

        assert!(center.mark_read(1));
        assert_eq!(center.unread_count(), 4);
        assert!(center.unread().is_empty());
    }

    #[test]
    fn test_stale_fetch_does_not_resurrect() {
        let mut center = NotificationCenter::new(Role::Employee);
        center.apply_unread(vec![notification(1), notification(2)]);
        center.mark_read(1);

        // A fetch that left the server before the mark-read landed
        center.apply_unread(vec![notification(1), notification(2)]);
        assert_eq!(center.unread().len(), 1);
        assert_eq!(center.unread_count(), 1);

        // Once the server agrees, the suppression is forgotten
        center.apply_unread(vec![notification(2)]);
        center.apply_unread(vec![notification(1), notification(2)]);
        assert_eq!(center.unread_count(), 2);
    }

    #[test]
    fn test_restored_id_returns_on_next_fetch() {
        let mut center = NotificationCenter::new(Role::Employee);
        center.apply_unread(vec![notification(1), notification(2)]);
        center.mark_read(1);
        center.restore_dismissed(1);

        center.apply_unread(vec![notification(1), notification(2)]);
        assert_eq!(center.unread().len(), 2);
        assert_eq!(center.unread_count(), 2);

        for id in center.mark_all_read() {
            center.restore_dismissed(id);
        }
        center.apply_unread(vec![notification(1), notification(2)]);
        assert_eq!(center.unread_count(), 2);
    }

    #[test]
    fn test_fetch_skips_read_items() {
        let mut center = NotificationCenter::new(Role::Customer);
        let mut read = notification(3);
        read.read = true;
        center.apply_unread(vec![read, notification(4)]);
        assert_eq!(center.unread_count(), 1);
    }

    #[test]
    fn test_mark_all_read() {
        let mut center = NotificationCenter::new(Role::Admin);
        center.apply_unread(vec![notification(1), notification(2)]);
        assert_eq!(center.mark_all_read(), vec![1, 2]);
        assert!(center.unread().is_empty());
        assert_eq!(center.unread_count(), 0);
        assert_eq!(center.badge(), None);
    }

    #[test]
    fn test_toggle_and_badge() {
        let mut center = NotificationCenter::new(Role::Admin);
        assert!(center.toggle());
        assert!(!center.toggle());
        center.toggle();
        center.close();
        assert!(!center.is_open());

        center.apply_count(150);
        assert_eq!(center.badge().as_deref(), Some("99+"));
    }
}
