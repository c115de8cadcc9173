//! Station link supervision
//!
//! Keeps the Wi-Fi station link established: a periodic tick decides when to
//! (re)connect on a fixed retry schedule, and link events from the driver
//! feed back into the shared retry state. The supervisor owns no
//! connectivity state of its own; it queries the interface live and keeps
//! only timing and teardown bookkeeping in [`SupervisorState`].
//!
//! Both the supervisor and the event handler are plain values created by the
//! composition root; there is no global registry. On the target both live in
//! statics so the event subscription and the tick task can share them:
//!
//! ```ignore
//! use pico_link::core::traits::sync::EmbassyState;
//! use pico_link::platform::rp2350::Cyw43Netif;
//! use pico_link::settings::NetworkSettings;
//! use pico_link::supervisor::{
//!     ConnectionSupervisor, LinkEventHandler, SupervisorState,
//! };
//! use static_cell::StaticCell;
//!
//! static NETIF: Cyw43Netif = Cyw43Netif::new();
//! static SHARED: StaticCell<EmbassyState<SupervisorState>> = StaticCell::new();
//! static HANDLER: StaticCell<LinkEventHandler<Cyw43Netif, EmbassyState<SupervisorState>>> =
//!     StaticCell::new();
//! static SUPERVISOR: StaticCell<ConnectionSupervisor<Cyw43Netif, EmbassyState<SupervisorState>>> =
//!     StaticCell::new();
//!
//! let shared = SHARED.init(EmbassyState::new(SupervisorState::new(
//!     NetworkSettings::build_defaults(),
//! )));
//! let handler = HANDLER.init(LinkEventHandler::new(&NETIF, shared));
//! NETIF.subscribe(handler);
//!
//! let supervisor = SUPERVISOR.init(ConnectionSupervisor::new(&NETIF, shared));
//! supervisor.start();
//! spawner.spawn(supervision_tick_task(supervisor)).unwrap();
//! ```

pub mod events;
pub mod state;

#[cfg(feature = "pico2_w")]
pub mod tasks;

pub use events::LinkEventHandler;
pub use state::{SupervisorState, RECONNECT_DELAY_MS};

use crate::core::traits::sync::SharedState;
use crate::platform::traits::NetworkInterface;
use crate::settings::NetworkSettings;

/// Connection supervisor
///
/// Owns retry timing and the decision of whether/when to (re)connect the
/// station interface. Driven by [`tick`](ConnectionSupervisor::tick) from a
/// scheduler running finer than [`RECONNECT_DELAY_MS`]; reacts to settings
/// changes via [`apply_settings`](ConnectionSupervisor::apply_settings).
///
/// Interface calls are issued outside the shared-state lock, so the link
/// event path may take the same lock freely.
pub struct ConnectionSupervisor<'a, N, S> {
    netif: &'a N,
    shared: &'a S,
}

impl<'a, N, S> ConnectionSupervisor<'a, N, S>
where
    N: NetworkInterface,
    S: SharedState<SupervisorState>,
{
    /// Create a supervisor over the given interface and shared state.
    pub fn new(netif: &'a N, shared: &'a S) -> Self {
        Self { netif, shared }
    }

    /// Begin supervision.
    ///
    /// Forces the radio into a known-idle state so driver-internal reconnect
    /// policy cannot compete with supervision, then schedules an immediate
    /// first attempt against the stored settings. Call once at boot, before
    /// the tick task runs.
    pub fn start(&self) {
        if let Err(e) = self.netif.quiesce() {
            crate::log_warn!("radio quiesce failed: {}", e);
        }
        self.reconfigure();
    }

    /// Replace the settings snapshot and reconnect under it.
    ///
    /// Tears down any current association (dropping staged credentials) and
    /// clears the retry window, so the next tick reconnects as soon as
    /// teardown completes.
    pub fn apply_settings(&self, settings: NetworkSettings) {
        self.shared.with_mut(|state| state.settings = settings);
        self.reconfigure();
    }

    fn reconfigure(&self) {
        self.shared.with_mut(|state| state.force_retry());
        if self.netif.disconnect(true) {
            self.shared.with_mut(|state| state.stopping = true);
        }
    }

    /// Periodic supervision step.
    ///
    /// `now_ms` is a monotonic millisecond reading. When no attempt window
    /// is open, or the open window is [`RECONNECT_DELAY_MS`] old, a new
    /// window opens at `now_ms` and a connect attempt runs.
    pub fn tick(&self, now_ms: u64) {
        let due = self.shared.with_mut(|state| {
            let due = state.retry_due(now_ms);
            if due {
                state.mark_attempt(now_ms);
            }
            due
        });

        if due {
            self.manage_station();
        }
    }

    /// One connect attempt, if the station needs one.
    ///
    /// No-op while the settings are unconfigured (empty SSID), while the
    /// interface reports an established association, or while an earlier
    /// attempt is still in flight. Each interface call is fire-and-forget;
    /// failures are logged and recovered by the next retry window.
    fn manage_station(&self) {
        let settings = self.shared.with(|state| state.settings.clone());
        if !settings.is_configured() {
            // Administratively disabled; stay silent.
            return;
        }

        let station = self.netif.station_state();
        if station.is_connected() {
            return;
        }
        if station.is_active() {
            // An attempt is in flight; its outcome arrives as a link event.
            return;
        }

        crate::log_info!("starting connect to {}", settings.ssid.as_str());
        if let Err(e) = self.netif.configure_station(settings.addressing()) {
            crate::log_warn!("station addressing failed: {}", e);
        }
        if let Err(e) = self.netif.set_hostname(settings.hostname.as_str()) {
            crate::log_warn!("hostname update failed: {}", e);
        }
        if let Err(e) = self
            .netif
            .connect(settings.ssid.as_str(), settings.password.as_str())
        {
            crate::log_warn!("connect request failed: {}", e);
        }
    }

    /// Whether the station link is currently established.
    ///
    /// Queried live from the interface on every call.
    pub fn is_link_up(&self) -> bool {
        self.netif.station_state().is_connected()
    }
}
