//! Debounce-plus-interval auto-save scheduling.
//!
//! [`AutoSave`] is a clock-driven state machine. The owner feeds it
//! monotonic millisecond timestamps (the event loop's clock), tells it when
//! the snapshot changes, and polls it for due triggers. A due trigger turns
//! into a [`SaveTicket`] only when the current snapshot differs from the
//! last one that saved successfully. The owner performs the save and hands
//! the ticket back with the outcome.
//!
//! Two triggers exist: a debounce timer restarted by every change, and a
//! fixed interval counted from scheduler start that edits never reset.
//! Whether they may overlap is decided by [`OverlapPolicy`].

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Periodic save interval used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
/// Quiet period after the last change before a debounced save.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(5);

/// What to do when a trigger fires while a save is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Skip the trigger; at most one save is in flight.
    #[default]
    SingleFlight,
    /// Start another save anyway. Completions may arrive out of order, and a
    /// stale success can overwrite the last-saved snapshot.
    Unguarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSaveConfig {
    pub interval: Duration,
    pub debounce: Duration,
    pub policy: OverlapPolicy,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            debounce: DEFAULT_DEBOUNCE,
            policy: OverlapPolicy::default(),
        }
    }
}

/// Why a save attempt was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Debounce,
    Interval,
    Manual,
}

/// A save the scheduler has approved; carries a deep copy of the snapshot
/// to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket<T> {
    id: u64,
    trigger: Trigger,
    snapshot: T,
}

impl<T> SaveTicket<T> {
    pub const fn id(&self) -> u64 {
        self.id
    }

    pub const fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub const fn snapshot(&self) -> &T {
        &self.snapshot
    }
}

/// Result of running one attempt through [`AutoSave::save_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Nothing changed since the last save, or another save was in flight.
    Skipped,
    Saved,
    Failed,
}

/// Auto-save state for one editing session.
#[derive(Debug, Clone)]
pub struct AutoSave<T> {
    config: AutoSaveConfig,
    last_saved: T,
    debounce_since_ms: Option<u64>,
    next_interval_ms: Option<u64>,
    in_flight: usize,
    next_ticket: u64,
}

impl<T: Clone + PartialEq> AutoSave<T> {
    /// Start a scheduler at `now_ms`. `initial` counts as already saved.
    pub fn new(initial: T, config: AutoSaveConfig, now_ms: u64) -> Self {
        Self {
            config,
            last_saved: initial,
            debounce_since_ms: None,
            next_interval_ms: Some(now_ms.saturating_add(duration_ms(config.interval))),
            in_flight: 0,
            next_ticket: 1,
        }
    }

    pub const fn config(&self) -> AutoSaveConfig {
        self.config
    }

    /// The snapshot that was sent by the most recent successful save.
    pub const fn last_saved(&self) -> &T {
        &self.last_saved
    }

    /// Whether `current` differs from what was last saved.
    pub fn has_unsaved(&self, current: &T) -> bool {
        *current != self.last_saved
    }

    pub const fn is_in_flight(&self) -> bool {
        self.in_flight > 0
    }

    /// True once [`shutdown`](Self::shutdown) has run.
    pub const fn is_stopped(&self) -> bool {
        self.next_interval_ms.is_none()
    }

    /// (Re)start the debounce timer after an edit.
    pub fn note_change(&mut self, now_ms: u64) {
        if self.is_stopped() {
            return;
        }
        self.debounce_since_ms = Some(now_ms);
    }

    /// Earliest time a trigger can fire, for sizing poll timeouts.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        let debounce = self
            .debounce_since_ms
            .map(|since| since.saturating_add(duration_ms(self.config.debounce)));
        match (debounce, self.next_interval_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Return one trigger that is due at `now_ms`, if any.
    ///
    /// Call repeatedly until `None`: a debounce and an interval that fall due
    /// together are reported one after the other.
    pub fn poll(&mut self, now_ms: u64) -> Option<Trigger> {
        if let Some(since) = self.debounce_since_ms
            && now_ms.saturating_sub(since) >= duration_ms(self.config.debounce)
        {
            self.debounce_since_ms = None;
            return Some(Trigger::Debounce);
        }
        let next = self.next_interval_ms?;
        if now_ms < next {
            return None;
        }
        // Missed ticks collapse into one; the schedule stays anchored to start.
        let step = duration_ms(self.config.interval).max(1);
        let behind = (now_ms - next) / step + 1;
        self.next_interval_ms = Some(next.saturating_add(behind.saturating_mul(step)));
        Some(Trigger::Interval)
    }

    /// Decide whether `current` needs saving; returns the ticket to save.
    pub fn attempt(&mut self, current: &T, trigger: Trigger) -> Option<SaveTicket<T>> {
        if *current == self.last_saved {
            tracing::trace!(?trigger, "auto-save skipped: unchanged");
            return None;
        }
        if self.config.policy == OverlapPolicy::SingleFlight && self.in_flight > 0 {
            tracing::debug!(?trigger, "auto-save skipped: save already in flight");
            return None;
        }
        self.in_flight += 1;
        let id = self.next_ticket;
        self.next_ticket += 1;
        tracing::debug!(ticket = id, ?trigger, "auto-save started");
        Some(SaveTicket {
            id,
            trigger,
            snapshot: current.clone(),
        })
    }

    /// Manual save entry point; same rules as a timer trigger.
    pub fn force_save(&mut self, current: &T) -> Option<SaveTicket<T>> {
        self.attempt(current, Trigger::Manual)
    }

    /// Report the outcome of a ticket. Failures are logged, never returned.
    pub fn finish<E: Display>(&mut self, ticket: SaveTicket<T>, result: Result<(), E>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(()) => {
                tracing::info!(ticket = ticket.id, trigger = ?ticket.trigger, "auto-saved");
                self.last_saved = ticket.snapshot;
            }
            Err(err) => {
                tracing::warn!(
                    ticket = ticket.id,
                    trigger = ?ticket.trigger,
                    error = %err,
                    "auto-save failed"
                );
            }
        }
    }

    /// Treat `snapshot` as saved without an attempt, e.g. after the owner
    /// saved it through another path.
    pub fn mark_saved(&mut self, snapshot: T) {
        self.last_saved = snapshot;
    }

    /// Run one attempt end-to-end with `save`.
    pub async fn save_with<F, Fut, R, E>(
        &mut self,
        current: &T,
        trigger: Trigger,
        save: F,
    ) -> AttemptOutcome
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        let Some(ticket) = self.attempt(current, trigger) else {
            return AttemptOutcome::Skipped;
        };
        match save(ticket.snapshot.clone()).await {
            Ok(_) => {
                self.finish::<E>(ticket, Ok(()));
                AttemptOutcome::Saved
            }
            Err(err) => {
                self.finish(ticket, Err(err));
                AttemptOutcome::Failed
            }
        }
    }

    /// Cancel both timers. No save is forced.
    pub fn shutdown(&mut self) {
        self.debounce_since_ms = None;
        self.next_interval_ms = None;
        tracing::debug!("auto-save stopped");
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(policy: OverlapPolicy) -> AutoSaveConfig {
        AutoSaveConfig {
            interval: Duration::from_millis(30_000),
            debounce: Duration::from_millis(5_000),
            policy,
        }
    }

    fn drain(scheduler: &mut AutoSave<String>, now_ms: u64) -> Vec<Trigger> {
        std::iter::from_fn(|| scheduler.poll(now_ms)).collect()
    }

    #[test]
    fn test_debounce_fires_after_quiet_period() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 0);
        saver.note_change(1_000);
        assert!(drain(&mut saver, 5_999).is_empty());
        assert_eq!(drain(&mut saver, 6_000), vec![Trigger::Debounce]);
        assert!(drain(&mut saver, 6_001).is_empty(), "debounce fires once");
    }

    #[test]
    fn test_new_change_restarts_debounce() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 0);
        saver.note_change(1_000);
        saver.note_change(4_000);
        assert!(drain(&mut saver, 6_000).is_empty());
        assert_eq!(drain(&mut saver, 9_000), vec![Trigger::Debounce]);
    }

    #[test]
    fn test_interval_is_anchored_to_start_not_edits() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 100);
        assert!(drain(&mut saver, 30_099).is_empty());
        assert_eq!(drain(&mut saver, 30_100), vec![Trigger::Interval]);
        saver.note_change(31_000);
        assert_eq!(drain(&mut saver, 36_000), vec![Trigger::Debounce]);
        assert_eq!(drain(&mut saver, 60_100), vec![Trigger::Interval]);
    }

    #[test]
    fn test_missed_interval_ticks_collapse() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 0);
        assert_eq!(drain(&mut saver, 95_000), vec![Trigger::Interval]);
        assert_eq!(saver.next_deadline_ms(), Some(120_000));
    }

    #[test]
    fn test_debounce_and_interval_due_together_both_report() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 0);
        saver.note_change(25_000);
        assert_eq!(
            drain(&mut saver, 30_000),
            vec![Trigger::Debounce, Trigger::Interval]
        );
    }

    #[test]
    fn test_equal_snapshot_is_noop() {
        let mut saver = AutoSave::new("hello".to_string(), AutoSaveConfig::default(), 0);
        let same = String::from("hel") + "lo";
        assert!(saver.attempt(&same, Trigger::Debounce).is_none());
        assert!(!saver.is_in_flight());
    }

    #[test]
    fn test_success_records_sent_snapshot() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 0);
        let ticket = saver.attempt(&"draft v1".to_string(), Trigger::Interval).unwrap();
        assert_eq!(ticket.snapshot(), "draft v1");
        saver.finish::<&str>(ticket, Ok(()));
        assert_eq!(saver.last_saved(), "draft v1");
        assert!(saver.attempt(&"draft v1".to_string(), Trigger::Interval).is_none());
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut saver = AutoSave::new("v0".to_string(), AutoSaveConfig::default(), 0);
        let ticket = saver.force_save(&"v1".to_string()).unwrap();
        assert_eq!(ticket.trigger(), Trigger::Manual);
        saver.finish(ticket, Err("request failed"));
        assert_eq!(saver.last_saved(), "v0");
        assert!(!saver.is_in_flight());
        assert!(saver.force_save(&"v1".to_string()).is_some(), "next trigger retries");
    }

    #[test]
    fn test_single_flight_skips_overlapping_trigger() {
        let mut saver = AutoSave::new(String::new(), config(OverlapPolicy::SingleFlight), 0);
        let first = saver.attempt(&"a".to_string(), Trigger::Debounce).unwrap();
        assert!(saver.attempt(&"a".to_string(), Trigger::Interval).is_none());
        saver.finish::<&str>(first, Ok(()));
        assert!(saver.attempt(&"ab".to_string(), Trigger::Interval).is_some());
    }

    #[test]
    fn test_unguarded_allows_overlap_and_stale_overwrite() {
        let mut saver = AutoSave::new(String::new(), config(OverlapPolicy::Unguarded), 0);
        let older = saver.attempt(&"a".to_string(), Trigger::Debounce).unwrap();
        let newer = saver.attempt(&"ab".to_string(), Trigger::Interval).unwrap();
        assert_ne!(older.id(), newer.id());
        saver.finish::<&str>(newer, Ok(()));
        saver.finish::<&str>(older, Ok(()));
        assert_eq!(saver.last_saved(), "a", "late completion wins");
    }

    #[test]
    fn test_mark_saved_suppresses_next_attempt() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 0);
        saver.mark_saved("published".to_string());
        assert!(saver.attempt(&"published".to_string(), Trigger::Interval).is_none());
        assert!(!saver.has_unsaved(&"published".to_string()));
    }

    #[test]
    fn test_shutdown_cancels_timers() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 0);
        saver.note_change(1_000);
        saver.shutdown();
        assert!(saver.is_stopped());
        assert!(drain(&mut saver, 1_000_000).is_empty());
        saver.note_change(2_000);
        assert_eq!(saver.next_deadline_ms(), None);
    }

    #[tokio::test]
    async fn test_save_with_reports_outcomes() {
        let mut saver = AutoSave::new(String::new(), AutoSaveConfig::default(), 0);
        let outcome = saver
            .save_with(&"x".to_string(), Trigger::Manual, |snapshot| async move {
                Ok::<_, String>(snapshot.len())
            })
            .await;
        assert_eq!(outcome, AttemptOutcome::Saved);
        assert_eq!(saver.last_saved(), "x");

        let outcome = saver
            .save_with(&"x".to_string(), Trigger::Manual, |_| async {
                Ok::<(), String>(())
            })
            .await;
        assert_eq!(outcome, AttemptOutcome::Skipped);

        let outcome = saver
            .save_with(&"y".to_string(), Trigger::Manual, |_| async {
                Err::<(), _>("offline".to_string())
            })
            .await;
        assert_eq!(outcome, AttemptOutcome::Failed);
        assert_eq!(saver.last_saved(), "x");
    }
}
