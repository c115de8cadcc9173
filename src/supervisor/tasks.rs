//! Supervision tasks
//!
//! Embassy tasks driving the supervisor on the target. Task functions
//! cannot be generic, so these are bound to the CYW43439 interface and the
//! Embassy shared-state backend.

use embassy_time::{Duration, Instant, Ticker};

use crate::core::traits::sync::EmbassyState;
use crate::platform::rp2350::Cyw43Netif;
use crate::supervisor::{ConnectionSupervisor, SupervisorState};

/// Tick cadence. Must stay well inside the retry window so attempt timing
/// keeps one-second resolution.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Periodic supervision tick
///
/// Spawn after [`ConnectionSupervisor::start`] has run. Feeds the
/// supervisor a monotonic millisecond clock at 1 Hz.
#[embassy_executor::task]
pub async fn supervision_tick_task(
    supervisor: &'static ConnectionSupervisor<'static, Cyw43Netif, EmbassyState<SupervisorState>>,
) -> ! {
    let mut ticker = Ticker::every(TICK_INTERVAL);
    loop {
        ticker.next().await;
        supervisor.tick(Instant::now().as_millis());
    }
}
