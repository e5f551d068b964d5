use crate::core::{BookingWorkflow, RegistrationWorkflow};
use crate::models::MatchSuggestion;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Per-visitor browsing state
///
/// Holds the latest AI recommendation plus the generation counter that
/// guards against a stale in-flight response overwriting the result of
/// a newer query.
#[derive(Debug, Default)]
pub struct BrowseSession {
    pub recommendation: Option<MatchSuggestion>,
    pub match_generation: u64,
}

impl BrowseSession {
    /// Claim a new generation before starting an external match call
    pub fn next_generation(&mut self) -> u64 {
        self.match_generation += 1;
        self.match_generation
    }

    /// True when the given generation is still the latest
    pub fn is_current(&self, generation: u64) -> bool {
        self.match_generation == generation
    }
}

/// In-memory store of live workflow sessions
///
/// Every booking or registration attempt owns its own entry; nothing is
/// shared for writing across sessions. Entries expire on a TTL so
/// abandoned flows do not accumulate.
pub struct SessionStore {
    browse: moka::future::Cache<Uuid, Arc<Mutex<BrowseSession>>>,
    bookings: moka::future::Cache<Uuid, Arc<Mutex<BookingWorkflow>>>,
    registrations: moka::future::Cache<Uuid, Arc<Mutex<RegistrationWorkflow>>>,
}

impl SessionStore {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        Self {
            browse: moka::future::CacheBuilder::new(capacity)
                .time_to_idle(Duration::from_secs(ttl_secs))
                .build(),
            bookings: moka::future::CacheBuilder::new(capacity)
                .time_to_idle(Duration::from_secs(ttl_secs))
                .build(),
            registrations: moka::future::CacheBuilder::new(capacity)
                .time_to_idle(Duration::from_secs(ttl_secs))
                .build(),
        }
    }

    pub async fn create_browse(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.browse
            .insert(id, Arc::new(Mutex::new(BrowseSession::default())))
            .await;
        id
    }

    pub async fn browse(&self, id: Uuid) -> Option<Arc<Mutex<BrowseSession>>> {
        self.browse.get(&id).await
    }

    pub async fn create_booking(&self, workflow: BookingWorkflow) -> Uuid {
        let id = Uuid::new_v4();
        self.bookings
            .insert(id, Arc::new(Mutex::new(workflow)))
            .await;
        id
    }

    pub async fn booking(&self, id: Uuid) -> Option<Arc<Mutex<BookingWorkflow>>> {
        self.bookings.get(&id).await
    }

    /// Drop a booking session (cancel or completion)
    pub async fn remove_booking(&self, id: Uuid) {
        self.bookings.invalidate(&id).await;
    }

    pub async fn create_registration(&self, workflow: RegistrationWorkflow) -> Uuid {
        let id = Uuid::new_v4();
        self.registrations
            .insert(id, Arc::new(Mutex::new(workflow)))
            .await;
        id
    }

    pub async fn registration(&self, id: Uuid) -> Option<Arc<Mutex<RegistrationWorkflow>>> {
        self.registrations.get(&id).await
    }
}
