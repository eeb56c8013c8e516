// Core library for the property-booking catalog

// One module per component, leaves first
pub mod app;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod query;
pub mod session;

// Re-export key types for convenience
pub use app::{AppConfig, AppState, AppStats};
pub use booking::{Booking, BookingLedger, BookingStatus, SERVICE_FEE};
pub use catalog::{
    Catalog, Category, HostInfo, PropertyId, PropertyRecord, SAMPLE_CATALOG_PATH,
};
pub use error::AppError;
pub use favorites::{FavoriteEvent, FavoritesSet};
pub use query::{query, FilterCriteria, SortKey};
pub use session::{Notification, SessionState, View};
