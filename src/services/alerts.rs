// ============================================================================
// ALERT CHANNEL - Transient success/error/info toasts
// ============================================================================
// FIFO queue: at most `max_visible` alerts on screen, the rest wait in
// `pending`. Dismissing a visible alert promotes the oldest pending one.
// On wasm every alert that becomes visible dismisses itself after
// `display_ms`.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::config::AlertConfig;
use crate::error::GENERIC_ERROR_MESSAGE;
use crate::models::{AlertKind, AlertMessage};
use crate::state::reactivity::{SubscriptionId, Subscribers};

#[derive(Default)]
struct AlertQueue {
    visible: Vec<AlertMessage>,
    pending: VecDeque<AlertMessage>,
}

#[derive(Clone)]
pub struct AlertChannel {
    queue: Rc<RefCell<AlertQueue>>,
    next_id: Rc<Cell<u64>>,
    config: AlertConfig,
    subscribers: Subscribers,
}

impl AlertChannel {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            queue: Rc::new(RefCell::new(AlertQueue::default())),
            next_id: Rc::new(Cell::new(1)),
            config: AlertConfig {
                max_visible: config.max_visible.max(1),
                ..config
            },
            subscribers: Subscribers::new(),
        }
    }

    pub fn success(&self, text: impl Into<String>) -> u64 {
        self.push(AlertKind::Success, text)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.push(AlertKind::Error, text)
    }

    pub fn info(&self, text: impl Into<String>) -> u64 {
        self.push(AlertKind::Info, text)
    }

    /// Queues an alert and returns its id. Blank text becomes the generic fallback.
    pub fn push(&self, kind: AlertKind, text: impl Into<String>) -> u64 {
        let mut text = text.into();
        if text.trim().is_empty() {
            text = GENERIC_ERROR_MESSAGE.to_string();
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        match kind {
            AlertKind::Error => log::warn!("🔔 [ALERT] error: {}", text),
            _ => log::info!("🔔 [ALERT] {:?}: {}", kind, text),
        }

        let alert = AlertMessage { id, kind, text };
        let shown = {
            let mut queue = self.queue.borrow_mut();
            if queue.visible.len() < self.config.max_visible {
                queue.visible.push(alert);
                true
            } else {
                queue.pending.push_back(alert);
                false
            }
        };

        if shown {
            self.schedule_dismiss(id);
        }
        self.subscribers.notify();
        id
    }

    /// Removes an alert wherever it is. Unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        let promoted = {
            let mut queue = self.queue.borrow_mut();
            let before = queue.visible.len() + queue.pending.len();
            queue.visible.retain(|a| a.id != id);
            queue.pending.retain(|a| a.id != id);
            if queue.visible.len() + queue.pending.len() == before {
                return;
            }

            let mut promoted = Vec::new();
            while queue.visible.len() < self.config.max_visible {
                match queue.pending.pop_front() {
                    Some(next) => {
                        promoted.push(next.id);
                        queue.visible.push(next);
                    }
                    None => break,
                }
            }
            promoted
        };

        for next_id in promoted {
            self.schedule_dismiss(next_id);
        }
        self.subscribers.notify();
    }

    pub fn clear(&self) {
        {
            let mut queue = self.queue.borrow_mut();
            queue.visible.clear();
            queue.pending.clear();
        }
        self.subscribers.notify();
    }

    /// Alerts currently on screen, oldest first
    pub fn visible(&self) -> Vec<AlertMessage> {
        self.queue.borrow().visible.clone()
    }

    pub fn pending(&self) -> Vec<AlertMessage> {
        self.queue.borrow().pending.iter().cloned().collect()
    }

    /// Visible then pending, in push order
    pub fn messages(&self) -> Vec<AlertMessage> {
        let queue = self.queue.borrow();
        queue
            .visible
            .iter()
            .chain(queue.pending.iter())
            .cloned()
            .collect()
    }

    pub fn display_ms(&self) -> u32 {
        self.config.display_ms
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        let channel = self.clone();
        gloo_timers::callback::Timeout::new(self.config.display_ms, move || {
            channel.dismiss(id);
        })
        .forget();
    }

    // Host builds have no timer; callers dismiss explicitly.
    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}
}

impl Default for AlertChannel {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(max_visible: usize) -> AlertChannel {
        AlertChannel::new(AlertConfig {
            display_ms: 2500,
            max_visible,
        })
    }

    #[test]
    fn overflow_waits_instead_of_overwriting() {
        let alerts = channel(1);
        let first = alerts.success("Saved");
        alerts.error("Oops");

        assert_eq!(alerts.visible().len(), 1);
        assert_eq!(alerts.visible()[0].text, "Saved");
        assert_eq!(alerts.pending().len(), 1);

        alerts.dismiss(first);
        assert_eq!(alerts.visible()[0].text, "Oops");
        assert_eq!(alerts.visible()[0].kind, AlertKind::Error);
        assert!(alerts.pending().is_empty());
    }

    #[test]
    fn blank_text_uses_fallback_message() {
        let alerts = channel(3);
        alerts.error("   ");
        assert_eq!(alerts.messages()[0].text, GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn dismissing_a_pending_alert_keeps_visible_ones() {
        let alerts = channel(1);
        alerts.info("one");
        let waiting = alerts.info("two");
        alerts.dismiss(waiting);
        assert_eq!(alerts.messages().len(), 1);
        assert_eq!(alerts.visible()[0].text, "one");
    }

    #[test]
    fn subscribers_hear_pushes_and_dismissals() {
        let alerts = channel(2);
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            alerts.subscribe(move || hits.set(hits.get() + 1));
        }
        let id = alerts.success("hi");
        alerts.dismiss(id);
        alerts.dismiss(id);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let alerts = channel(3);
        let a = alerts.info("a");
        let b = alerts.info("b");
        assert!(b > a);
    }
}
