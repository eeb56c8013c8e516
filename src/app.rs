// Application state container: one exclusively-owned handle composing the
// catalog, filter criteria, favorites, booking ledger, and session state.
// The rendering layer reads snapshots through the accessors and dispatches
// user intents through the handler methods; nothing else mutates state.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::booking::{Booking, BookingLedger};
use crate::catalog::{Catalog, Category, PropertyId, PropertyRecord};
use crate::error::AppError;
use crate::favorites::{FavoriteEvent, FavoritesSet};
use crate::query::{query, FilterCriteria, SortKey};
use crate::session::{Notification, SessionState, View};

#[derive(Debug, Clone)]
pub struct AppConfig {
    // How long a notification stays visible before the auto-clear fires
    pub notification_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notification_timeout: Duration::from_secs(4),
        }
    }
}

// Intent counters, snapshotted by stats()
#[derive(Debug, Default, Clone)]
pub struct AppStats {
    pub intents_processed: usize,
    pub queries_run: usize,
    pub bookings_confirmed: usize,
    pub favorites_toggled: usize,
    pub notifications_posted: usize,
    pub notifications_expired: usize,
    pub notifications_dismissed: usize,
}

struct Inner {
    catalog: Catalog,
    criteria: FilterCriteria,
    sort: SortKey,
    favorites: FavoritesSet,
    ledger: BookingLedger,
    session: SessionState,
    // Monotonic tag for notifications; lets a late auto-clear recognize
    // that its message has already been replaced
    next_generation: u64,
    stats: AppStats,
}

// Cheap to clone: clones share the same state. The clear task holds one.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<Inner>>,
    config: AppConfig,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, AppConfig::default())
    }

    pub fn with_config(catalog: Catalog, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                catalog,
                criteria: FilterCriteria::default(),
                sort: SortKey::default(),
                favorites: FavoritesSet::new(),
                ledger: BookingLedger::new(),
                session: SessionState::new(),
                next_generation: 0,
                stats: AppStats::default(),
            })),
            config,
        }
    }

    // ---- Read accessors ----

    pub fn properties(&self) -> Vec<PropertyRecord> {
        self.inner.lock().catalog.properties().to_vec()
    }

    pub fn property(&self, id: PropertyId) -> Result<PropertyRecord, AppError> {
        self.inner.lock().catalog.lookup(id).cloned()
    }

    // The current filtered and sorted result list, recomputed from the
    // active criteria and sort key
    pub fn results(&self) -> Vec<PropertyRecord> {
        let mut inner = self.inner.lock();
        inner.stats.queries_run += 1;
        query(&inner.catalog, &inner.criteria, inner.sort)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.inner.lock().criteria.clone()
    }

    pub fn sort(&self) -> SortKey {
        self.inner.lock().sort
    }

    pub fn favorites(&self) -> FavoritesSet {
        self.inner.lock().favorites.clone()
    }

    pub fn is_favorite(&self, id: PropertyId) -> bool {
        self.inner.lock().favorites.contains(id)
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.inner.lock().ledger.bookings().to_vec()
    }

    pub fn session(&self) -> SessionState {
        self.inner.lock().session.clone()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.inner.lock().session.notification.clone()
    }

    pub fn stats(&self) -> AppStats {
        self.inner.lock().stats.clone()
    }

    // ---- Filter and sort intents ----

    pub fn toggle_category(&self, category: Category) {
        let mut inner = self.inner.lock();
        inner.stats.intents_processed += 1;
        if !inner.criteria.categories.remove(&category) {
            inner.criteria.categories.insert(category);
        }
        debug!(?category, "category filter toggled");
    }

    pub fn toggle_amenity(&self, amenity: &str) {
        let mut inner = self.inner.lock();
        inner.stats.intents_processed += 1;
        if !inner.criteria.amenities.remove(amenity) {
            inner.criteria.amenities.insert(amenity.to_string());
        }
        debug!(amenity, "amenity filter toggled");
    }

    pub fn set_sort(&self, sort: SortKey) {
        let mut inner = self.inner.lock();
        inner.stats.intents_processed += 1;
        inner.sort = sort;
        debug!(?sort, "sort key changed");
    }

    // Restores both criteria sets to empty; the no-matches affordance
    // dispatches this
    pub fn reset_filters(&self) {
        let mut inner = self.inner.lock();
        inner.stats.intents_processed += 1;
        inner.criteria = FilterCriteria::default();
        debug!("filters reset");
    }

    // ---- Favorites ----

    pub fn toggle_favorite(&self, id: PropertyId) -> FavoriteEvent {
        let event = {
            let mut inner = self.inner.lock();
            inner.stats.intents_processed += 1;
            inner.stats.favorites_toggled += 1;
            inner.favorites.toggle(id)
        };
        let message = match event {
            FavoriteEvent::Added => "Saved to favorites",
            FavoriteEvent::Removed => "Removed from favorites",
        };
        self.notify(message);
        event
    }

    // ---- Booking: two-phase confirm ----

    // Phase 1: record the intent to book. Validates the id against the
    // catalog, sets it as the focused property, and raises the pending
    // flag. No ledger mutation. Re-requesting while pending is harmless.
    pub fn request_booking(&self, id: PropertyId) -> Result<(), AppError> {
        let mut inner = self.inner.lock();
        inner.stats.intents_processed += 1;
        if let Err(err) = inner.catalog.lookup(id) {
            warn!(property = id, "booking requested for unknown property");
            return Err(err);
        }
        inner.session.focused = Some(id);
        inner.session.pending_booking = true;
        debug!(property = id, "booking requested");
        Ok(())
    }

    // Phase 2: commit. Fails with InvalidState when no request is pending
    // and NotFound when the focus no longer resolves; both paths leave all
    // state untouched. On success the ledger append and flag clear happen
    // under one lock, so the operation never partially applies.
    pub fn confirm_booking(&self) -> Result<Booking, AppError> {
        let booking = {
            let mut inner = self.inner.lock();
            inner.stats.intents_processed += 1;
            if !inner.session.pending_booking {
                return Err(AppError::InvalidState(
                    "no booking request is pending".to_string(),
                ));
            }
            let record = match inner.session.focused {
                Some(id) => inner.catalog.lookup(id)?.clone(),
                None => return Err(AppError::NotFound("no focused property".to_string())),
            };
            let booking = inner.ledger.confirm(&record, Utc::now());
            inner.session.pending_booking = false;
            inner.stats.bookings_confirmed += 1;
            booking
        };
        info!(
            booking = %booking.id,
            total = booking.total_price,
            "booking confirmed"
        );
        self.notify(format!("Booking confirmed: {}", booking.property_name));
        Ok(booking)
    }

    // Declining the confirmation dialog: drops the intent, never errors
    pub fn cancel_booking_request(&self) {
        let mut inner = self.inner.lock();
        inner.stats.intents_processed += 1;
        inner.session.pending_booking = false;
        debug!("booking request cancelled");
    }

    // ---- Navigation ----

    pub fn navigate(&self, view: View, focus: Option<PropertyId>) {
        let mut inner = self.inner.lock();
        inner.stats.intents_processed += 1;
        inner.session.navigate(view, focus);
        debug!(?view, ?focus, "navigated");
    }

    // ---- Notifications ----

    // Replaces any active message and schedules its auto-clear. Repeated
    // calls are safe: a stale timer finds its generation gone and does
    // nothing, so an old clear can never erase a newer message.
    pub fn notify(&self, message: impl Into<String>) {
        let generation = {
            let mut inner = self.inner.lock();
            inner.next_generation += 1;
            let generation = inner.next_generation;
            inner.session.post_notification(message, generation);
            inner.stats.notifications_posted += 1;
            generation
        };
        self.schedule_clear(generation);
    }

    pub fn dismiss_notification(&self) {
        let mut inner = self.inner.lock();
        inner.stats.intents_processed += 1;
        if inner.session.clear_notification() {
            inner.stats.notifications_dismissed += 1;
        }
    }

    fn schedule_clear(&self, generation: u64) {
        // Outside a runtime the message simply stays until replaced or
        // dismissed
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let state = self.clone();
        let timeout = self.config.notification_timeout;
        handle.spawn(async move {
            tokio::time::sleep(timeout).await;
            let mut inner = state.inner.lock();
            if inner.session.clear_notification_if(generation) {
                inner.stats.notifications_expired += 1;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::SERVICE_FEE;
    use crate::catalog::fixtures::sample_catalog;
    use tokio::task::yield_now;

    fn app() -> AppState {
        AppState::new(sample_catalog())
    }

    #[tokio::test]
    async fn test_request_then_confirm() {
        let app = app();

        app.request_booking(4).unwrap();
        assert!(app.session().pending_booking);
        assert_eq!(app.session().focused, Some(4));
        assert!(app.bookings().is_empty());

        let booking = app.confirm_booking().unwrap();
        assert_eq!(booking.total_price, 3500 + SERVICE_FEE);
        assert_eq!(booking.total_price, 3950);
        assert_eq!(booking.property_name, "Harbor View Hotel");

        assert!(!app.session().pending_booking);
        assert_eq!(app.bookings().len(), 1);

        let note = app.notification().unwrap();
        assert!(note.message.contains("Harbor View Hotel"));
    }

    #[test]
    fn test_request_unknown_property_changes_nothing() {
        let app = app();

        let err = app.request_booking(999).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert!(app.bookings().is_empty());
        assert!(!app.session().pending_booking);
        assert_eq!(app.session().focused, None);
    }

    #[test]
    fn test_confirm_without_pending_is_invalid_state() {
        let app = app();
        let err = app.confirm_booking().unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        assert!(app.bookings().is_empty());
    }

    #[test]
    fn test_confirm_with_stale_focus_is_all_or_nothing() {
        let app = app();
        app.request_booking(4).unwrap();

        // The caller wanders off to an id the catalog never issued
        app.navigate(View::PropertyDetail, Some(999));

        let err = app.confirm_booking().unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(app.bookings().is_empty());
        assert!(app.session().pending_booking);
    }

    #[test]
    fn test_cancel_discards_intent_without_error() {
        let app = app();
        app.request_booking(2).unwrap();
        app.cancel_booking_request();
        assert!(!app.session().pending_booking);
        assert!(app.bookings().is_empty());

        // Cancelling with nothing pending is also fine
        app.cancel_booking_request();
        assert!(!app.session().pending_booking);
    }

    #[tokio::test]
    async fn test_repeated_request_is_a_ledger_noop() {
        let app = app();
        app.request_booking(4).unwrap();
        app.request_booking(4).unwrap();
        assert!(app.bookings().is_empty());

        app.confirm_booking().unwrap();
        assert_eq!(app.bookings().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_favorite_notifies_both_ways() {
        let app = app();

        assert_eq!(app.toggle_favorite(3), FavoriteEvent::Added);
        assert!(app.is_favorite(3));
        assert_eq!(app.notification().unwrap().message, "Saved to favorites");

        assert_eq!(app.toggle_favorite(3), FavoriteEvent::Removed);
        assert!(!app.is_favorite(3));
        assert_eq!(
            app.notification().unwrap().message,
            "Removed from favorites"
        );
    }

    #[test]
    fn test_filter_sort_and_reset_flow() {
        let app = app();
        assert_eq!(app.results().len(), 6);

        app.toggle_category(Category::Resort);
        let ids: Vec<PropertyId> = app.results().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 5]);

        // Cedar Springs (6000) is cheaper than Palm Cove (7500)
        app.set_sort(SortKey::PriceAscending);
        let ids: Vec<PropertyId> = app.results().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 3]);

        app.toggle_amenity("Free WiFi");
        let ids: Vec<PropertyId> = app.results().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);

        app.reset_filters();
        assert!(app.criteria().is_empty());
        assert_eq!(app.results().len(), 6);
    }

    #[test]
    fn test_empty_result_set_is_not_an_error() {
        let app = app();
        app.toggle_category(Category::Villa);
        assert!(app.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_auto_clears_after_timeout() {
        let app = app();

        app.notify("hello");
        yield_now().await;
        assert_eq!(app.notification().unwrap().message, "hello");

        tokio::time::advance(Duration::from_secs(5)).await;
        yield_now().await;

        assert!(app.notification().is_none());
        assert_eq!(app.stats().notifications_expired, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_cannot_clear_newer_message() {
        let app = app();

        app.notify("A");
        yield_now().await;
        tokio::time::advance(Duration::from_secs(2)).await;
        yield_now().await;

        app.notify("B");
        yield_now().await;

        // A's timer fires at t=4s; B was posted at t=2s and must survive
        tokio::time::advance(Duration::from_millis(2100)).await;
        yield_now().await;
        assert_eq!(app.notification().unwrap().message, "B");

        // B's own timer fires at t=6s
        tokio::time::advance(Duration::from_secs(2)).await;
        yield_now().await;
        assert!(app.notification().is_none());

        // Only B's clear took effect
        assert_eq!(app.stats().notifications_expired, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_beats_the_timer() {
        let app = app();
        app.notify("transient");
        yield_now().await;

        app.dismiss_notification();
        assert!(app.notification().is_none());

        tokio::time::advance(Duration::from_secs(5)).await;
        yield_now().await;

        assert!(app.notification().is_none());
        let stats = app.stats();
        assert_eq!(stats.notifications_dismissed, 1);
        assert_eq!(stats.notifications_expired, 0);
    }

    #[tokio::test]
    async fn test_stats_track_intents() {
        let app = app();

        app.toggle_category(Category::Hotel);
        app.set_sort(SortKey::PriceAscending);
        app.toggle_favorite(4);
        app.request_booking(4).unwrap();
        app.confirm_booking().unwrap();
        app.navigate(View::Profile, None);
        let _ = app.results();

        let stats = app.stats();
        assert_eq!(stats.intents_processed, 6);
        assert_eq!(stats.queries_run, 1);
        assert_eq!(stats.bookings_confirmed, 1);
        assert_eq!(stats.favorites_toggled, 1);
        // One notification from the favorite, one from the confirmation
        assert_eq!(stats.notifications_posted, 2);
    }
}
