//! Periodic feed polling.
//!
//! A [`Poller`] owns a feed and an interval. [`Poller::spawn`] starts a
//! background loop that fetches immediately and then once per interval,
//! publishing each result through a watch channel. Fetches run
//! concurrently, so a slow response can land after a newer one and
//! overwrite it. Dropping or stopping the [`PollerHandle`] aborts the loop
//! together with any fetch still in flight.

use crate::{api::DynPortalApi, errors::ClientError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::domain::responses::{
    ActivityLogResponse, CourseAssignmentResponse, NotificationResponse,
};
use std::{fmt::Debug, sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    task::{JoinHandle, JoinSet},
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, warn};

#[async_trait]
pub trait Feed: Send + Sync + 'static {
    type Item: Clone + Debug + Send + Sync + 'static;

    fn name(&self) -> &'static str;
    async fn fetch(&self) -> Result<Vec<Self::Item>, ClientError>;
    fn is_unread(&self, item: &Self::Item) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    pub items: Vec<T>,
    pub unread: usize,
}

impl<T> Batch<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            unread: 0,
        }
    }
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self::empty()
    }
}

pub struct NotificationFeed {
    api: DynPortalApi,
}

impl NotificationFeed {
    pub fn new(api: DynPortalApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Feed for NotificationFeed {
    type Item = NotificationResponse;

    fn name(&self) -> &'static str {
        "notifications"
    }

    async fn fetch(&self) -> Result<Vec<Self::Item>, ClientError> {
        self.api.notifications().await
    }

    fn is_unread(&self, item: &Self::Item) -> bool {
        !item.is_read
    }
}

pub struct ActivityFeed {
    api: DynPortalApi,
}

impl ActivityFeed {
    pub fn new(api: DynPortalApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Feed for ActivityFeed {
    type Item = ActivityLogResponse;

    fn name(&self) -> &'static str {
        "activity-logs"
    }

    async fn fetch(&self) -> Result<Vec<Self::Item>, ClientError> {
        self.api.activity_logs().await
    }

    fn is_unread(&self, item: &Self::Item) -> bool {
        !item.read
    }
}

/// Assignments carry no read flag; anything assigned after `seen_until`
/// counts as unread, and everything does when no marker is set.
pub struct AssignmentFeed {
    api: DynPortalApi,
    seen_until: Option<DateTime<Utc>>,
}

impl AssignmentFeed {
    pub fn new(api: DynPortalApi) -> Self {
        Self {
            api,
            seen_until: None,
        }
    }

    pub fn seen_until(mut self, marker: DateTime<Utc>) -> Self {
        self.seen_until = Some(marker);
        self
    }
}

#[async_trait]
impl Feed for AssignmentFeed {
    type Item = CourseAssignmentResponse;

    fn name(&self) -> &'static str {
        "course-assignments"
    }

    async fn fetch(&self) -> Result<Vec<Self::Item>, ClientError> {
        self.api.course_assignments().await
    }

    fn is_unread(&self, item: &Self::Item) -> bool {
        self.seen_until
            .is_none_or(|marker| item.assigned_at > marker)
    }
}

/// One fetch, with failures degraded to an empty batch.
async fn fetch_batch<F: Feed>(feed: &F) -> Batch<F::Item> {
    match feed.fetch().await {
        Ok(items) => {
            let unread = items.iter().filter(|item| feed.is_unread(item)).count();
            debug!("Polled {}: {} items, {unread} unread", feed.name(), items.len());
            Batch { items, unread }
        }
        Err(e) => {
            warn!("Polling {} failed: {e}", feed.name());
            Batch::empty()
        }
    }
}

pub struct Poller<F: Feed> {
    feed: Arc<F>,
    period: Duration,
}

impl<F: Feed> Poller<F> {
    pub fn new(feed: F, period: Duration) -> Self {
        Self {
            feed: Arc::new(feed),
            period,
        }
    }

    /// Starts a polling loop. Each call starts an independent loop, so a
    /// stopped poller is restarted by spawning again.
    pub fn spawn(&self) -> PollerHandle<F::Item> {
        let (tx, rx) = watch::channel(Batch::empty());
        let task = tokio::spawn(run(self.feed.clone(), self.period, tx));
        PollerHandle { rx, task }
    }
}

async fn run<F: Feed>(feed: Arc<F>, period: Duration, tx: watch::Sender<Batch<F::Item>>) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut in_flight: JoinSet<Batch<F::Item>> = JoinSet::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let feed = feed.clone();
                in_flight.spawn(async move { fetch_batch(feed.as_ref()).await });
            }
            Some(done) = in_flight.join_next() => match done {
                Ok(batch) => {
                    tx.send_replace(batch);
                }
                Err(e) => warn!("Fetch task for {} died: {e}", feed.name()),
            },
        }
    }
}

/// Owns a running poll loop. The loop ends when the handle is stopped or
/// dropped.
pub struct PollerHandle<T> {
    rx: watch::Receiver<Batch<T>>,
    task: JoinHandle<()>,
}

impl<T: Clone> PollerHandle<T> {
    pub fn latest(&self) -> Batch<T> {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Batch<T>> {
        self.rx.clone()
    }

    /// Waits for the next published batch. `None` after the loop ended.
    pub async fn changed(&mut self) -> Option<Batch<T>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub async fn stop(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl<T> Drop for PollerHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assignment(id: i32, minute: u32) -> CourseAssignmentResponse {
        CourseAssignmentResponse {
            id,
            course_id: id * 10,
            course_name: format!("Course {id}"),
            assigned_at: Utc.with_ymd_and_hms(2025, 5, 2, 9, minute, 0).unwrap(),
        }
    }

    struct NoApi;

    #[async_trait]
    impl crate::api::PortalApi for NoApi {
        async fn login(
            &self,
            _: &str,
            _: &str,
        ) -> Result<shared::domain::responses::UserResponse, ClientError> {
            Err(ClientError::Network("offline".into()))
        }
        async fn me(&self) -> Result<Option<shared::domain::responses::UserResponse>, ClientError> {
            Ok(None)
        }
        async fn logout(&self) -> Result<(), ClientError> {
            Ok(())
        }
        async fn notifications(&self) -> Result<Vec<NotificationResponse>, ClientError> {
            Ok(Vec::new())
        }
        async fn activity_logs(&self) -> Result<Vec<ActivityLogResponse>, ClientError> {
            Ok(Vec::new())
        }
        async fn course_assignments(&self) -> Result<Vec<CourseAssignmentResponse>, ClientError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn assignments_without_marker_are_all_unread() {
        let feed = AssignmentFeed::new(Arc::new(NoApi));
        assert!(feed.is_unread(&assignment(1, 0)));
    }

    #[test]
    fn assignments_after_marker_are_unread() {
        let marker = Utc.with_ymd_and_hms(2025, 5, 2, 9, 30, 0).unwrap();
        let feed = AssignmentFeed::new(Arc::new(NoApi)).seen_until(marker);

        assert!(!feed.is_unread(&assignment(1, 10)));
        assert!(!feed.is_unread(&assignment(2, 30)));
        assert!(feed.is_unread(&assignment(3, 45)));
    }
}
