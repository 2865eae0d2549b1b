use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use menu_client::{AuthService, Backend, MemoryBackend, MenuStore};
use tokio_util::sync::CancellationToken;

use crate::core::{BackendMode, Config, Result};
use crate::views::{Dashboard, PublicMenu, RouteSlot};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// One mounted dashboard and the navigator its views report to
#[derive(Clone)]
pub struct MountedDashboard {
    pub dashboard: Arc<Dashboard>,
    pub route: Arc<RouteSlot>,
}

/// Mounted dashboards keyed by access token
///
/// An entry lives from the first gated request of a session until logout,
/// a sign-out notification, a rejected session, an idle sweep, or shutdown.
/// Removing an entry unmounts the dashboard, which tears down its gate
/// subscription.
#[derive(Default)]
pub struct DashboardRegistry {
    mounted: DashMap<String, RegistryEntry>,
}

struct RegistryEntry {
    mounted: MountedDashboard,
    last_seen: Instant,
}

impl DashboardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a dashboard and mark it as used
    pub fn get(&self, token: &str) -> Option<MountedDashboard> {
        self.mounted.get_mut(token).map(|mut entry| {
            entry.last_seen = Instant::now();
            entry.mounted.clone()
        })
    }

    pub fn insert(&self, token: impl Into<String>, mounted: MountedDashboard) {
        let entry = RegistryEntry {
            mounted,
            last_seen: Instant::now(),
        };
        if let Some(previous) = self.mounted.insert(token.into(), entry) {
            previous.mounted.dashboard.unmount();
        }
    }

    pub fn remove(&self, token: &str) -> Option<MountedDashboard> {
        let removed = self.mounted.remove(token).map(|(_, entry)| entry.mounted);
        if let Some(mounted) = &removed {
            mounted.dashboard.unmount();
        }
        removed
    }

    /// Unmount dashboards that lost their session or sat unused for `max_idle`
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self, max_idle: Duration) -> usize {
        let stale: Vec<String> = self
            .mounted
            .iter()
            .filter(|entry| {
                !entry.mounted.dashboard.is_admitted() || entry.last_seen.elapsed() >= max_idle
            })
            .map(|entry| entry.key().clone())
            .collect();

        stale.iter().filter(|token| self.remove(token).is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    /// Unmount everything (shutdown)
    pub fn clear(&self) {
        for entry in self.mounted.iter() {
            entry.mounted.dashboard.unmount();
        }
        self.mounted.clear();
    }
}

/// Periodically sweep idle dashboards until `shutdown` fires
pub async fn sweep_idle_dashboards(
    registry: Arc<DashboardRegistry>,
    max_idle: Duration,
    shutdown: CancellationToken,
) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL.min(max_idle).max(Duration::from_secs(1)));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = interval.tick() => {
                let removed = registry.sweep(max_idle);
                if removed > 0 {
                    tracing::info!(removed, remaining = registry.len(), "Swept idle dashboards");
                }
            }
        }
    }
}

/// Server state - shared handles to every service
///
/// Cloning is cheap: everything but the config sits behind an `Arc`.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Configuration (immutable) |
/// | auth | Auth half of the backend |
/// | store | Table half of the backend |
/// | dashboards | Mounted dashboards per session token |
/// | public_menu | Guest menu renderer |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub auth: Arc<dyn AuthService>,
    pub store: Arc<dyn MenuStore>,
    pub dashboards: Arc<DashboardRegistry>,
    pub public_menu: Arc<PublicMenu>,
}

impl ServerState {
    pub fn new(config: Config, auth: Arc<dyn AuthService>, store: Arc<dyn MenuStore>) -> Self {
        let public_menu = Arc::new(PublicMenu::new(store.clone(), config.currency_suffix.clone()));
        Self {
            config,
            auth,
            store,
            dashboards: Arc::new(DashboardRegistry::new()),
            public_menu,
        }
    }

    /// State over a single backend implementing both halves
    pub fn with_backend<B: Backend + 'static>(config: Config, backend: Arc<B>) -> Self {
        Self::new(config, backend.clone(), backend)
    }

    /// Build the backend selected by the configuration
    pub fn initialize(config: &Config) -> Result<Self> {
        match config.backend_mode {
            BackendMode::Remote => {
                let client = config.client_config()?;
                let backend = Arc::new(client.build_remote()?);
                tracing::info!(url = %backend.http().base_url(), "Using hosted backend");
                Ok(Self::with_backend(config.clone(), backend))
            }
            BackendMode::Memory => {
                let backend = MemoryBackend::new();
                match (&config.memory_admin_email, &config.memory_admin_password) {
                    (Some(email), Some(password)) => {
                        backend.add_user(email, password);
                        tracing::info!(%email, "Seeded in-memory admin account");
                    }
                    _ => tracing::warn!("In-memory backend has no admin account; set MEMORY_ADMIN_EMAIL and MEMORY_ADMIN_PASSWORD"),
                }
                tracing::warn!("Using in-memory backend, data is lost on exit");
                Ok(Self::with_backend(config.clone(), Arc::new(backend)))
            }
        }
    }
}
