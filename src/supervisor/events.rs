//! Link event handling
//!
//! Reacts to asynchronous driver notifications, updating the shared retry
//! state the tick path reads. Registered with the network interface as the
//! [`LinkEventSink`], so it runs on the driver's execution context; all
//! state access goes through the same `SharedState` instance the supervisor
//! uses.

use crate::core::traits::sync::SharedState;
use crate::platform::traits::{Addressing, LinkEvent, LinkEventSink, NetworkInterface};
use crate::supervisor::SupervisorState;

/// Link event handler
///
/// - `StationDisconnected` releases driver resources with another teardown;
///   the retry timer is left alone, so the tick path reconnects when the
///   window elapses (or immediately, if the window is already clear).
/// - `StationStopped` confirms a supervisor-issued teardown: the stopping
///   flag clears and the retry window resets so the next tick reconnects
///   immediately. An unsolicited stop is ignored.
/// - `EthernetStarted` applies static addressing to the Ethernet interface
///   when configured; it never touches station state or the timer.
pub struct LinkEventHandler<'a, N, S> {
    netif: &'a N,
    shared: &'a S,
}

impl<'a, N, S> LinkEventHandler<'a, N, S>
where
    N: NetworkInterface,
    S: SharedState<SupervisorState>,
{
    /// Create a handler over the given interface and shared state.
    ///
    /// Must share both with the supervisor driving the same radio.
    pub fn new(netif: &'a N, shared: &'a S) -> Self {
        Self { netif, shared }
    }

    /// Dispatch one link event.
    pub fn handle_event(&self, event: LinkEvent) {
        match event {
            LinkEvent::StationDisconnected => {
                crate::log_debug!("station disconnected, releasing driver state");
                // Repeated teardown is part of the interface contract.
                let _ = self.netif.disconnect(true);
            }
            LinkEvent::StationStopped => {
                let confirmed = self.shared.with_mut(|state| {
                    if state.stopping {
                        state.stopping = false;
                        state.force_retry();
                        true
                    } else {
                        false
                    }
                });
                if confirmed {
                    crate::log_info!("station teardown confirmed, reconnecting on next tick");
                } else {
                    crate::log_debug!("unsolicited station stop ignored");
                }
            }
            LinkEvent::EthernetStarted => {
                let static_addressing = self.shared.with(|state| {
                    state
                        .settings
                        .static_ip_config
                        .then(|| state.settings.static_addressing())
                });
                if let Some(addressing) = static_addressing {
                    if let Err(e) = self
                        .netif
                        .configure_ethernet(Addressing::Static(addressing))
                    {
                        crate::log_warn!("ethernet addressing failed: {}", e);
                    }
                }
            }
            LinkEvent::Other => {}
        }
    }
}

impl<'a, N, S> LinkEventSink for LinkEventHandler<'a, N, S>
where
    N: NetworkInterface,
    S: SharedState<SupervisorState>,
{
    fn on_link_event(&self, event: LinkEvent) {
        self.handle_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::sync::MockState;
    use crate::platform::mock::{MockNetif, NetifCall};
    use crate::settings::NetworkSettings;
    use core::net::Ipv4Addr;
    use heapless::String;

    fn dhcp_settings() -> NetworkSettings {
        NetworkSettings {
            ssid: String::try_from("Home").unwrap(),
            password: String::try_from("pw").unwrap(),
            ..NetworkSettings::default()
        }
    }

    fn static_settings() -> NetworkSettings {
        NetworkSettings {
            static_ip_config: true,
            local_ip: Ipv4Addr::new(192, 168, 1, 50),
            gateway_ip: Ipv4Addr::new(192, 168, 1, 1),
            subnet_mask: Ipv4Addr::new(255, 255, 255, 0),
            dns_ip1: Ipv4Addr::new(192, 168, 1, 1),
            ..dhcp_settings()
        }
    }

    fn state_with(settings: NetworkSettings) -> MockState<SupervisorState> {
        MockState::new(SupervisorState::new(settings))
    }

    #[test]
    fn disconnect_event_reissues_teardown_without_touching_timer() {
        let netif = MockNetif::new();
        let shared = state_with(dhcp_settings());
        shared.with_mut(|s| s.mark_attempt(9_000));
        let handler = LinkEventHandler::new(&netif, &shared);

        handler.handle_event(LinkEvent::StationDisconnected);

        assert_eq!(
            netif.take_calls(),
            vec![NetifCall::Disconnect { drop_config: true }]
        );
        assert_eq!(shared.with(|s| s.last_attempt_ms()), Some(9_000));
        assert!(!shared.with(|s| s.is_stopping()));
    }

    #[test]
    fn station_stopped_confirms_supervised_teardown() {
        let netif = MockNetif::new();
        let shared = state_with(dhcp_settings());
        shared.with_mut(|s| {
            s.mark_attempt(9_000);
            s.stopping = true;
        });
        let handler = LinkEventHandler::new(&netif, &shared);

        handler.handle_event(LinkEvent::StationStopped);

        assert!(!shared.with(|s| s.is_stopping()));
        assert_eq!(shared.with(|s| s.last_attempt_ms()), None);
        assert!(netif.calls().is_empty());
    }

    #[test]
    fn unsolicited_station_stop_is_ignored() {
        let netif = MockNetif::new();
        let shared = state_with(dhcp_settings());
        shared.with_mut(|s| s.mark_attempt(9_000));
        let handler = LinkEventHandler::new(&netif, &shared);

        handler.handle_event(LinkEvent::StationStopped);

        assert!(!shared.with(|s| s.is_stopping()));
        assert_eq!(shared.with(|s| s.last_attempt_ms()), Some(9_000));
        assert!(netif.calls().is_empty());
    }

    #[test]
    fn stopping_clears_exactly_once() {
        let netif = MockNetif::new();
        let shared = state_with(dhcp_settings());
        shared.with_mut(|s| s.stopping = true);
        let handler = LinkEventHandler::new(&netif, &shared);

        handler.handle_event(LinkEvent::StationStopped);
        assert_eq!(shared.with(|s| s.last_attempt_ms()), None);

        // A second stop after the flag cleared must change nothing.
        shared.with_mut(|s| s.mark_attempt(42_000));
        handler.handle_event(LinkEvent::StationStopped);
        assert_eq!(shared.with(|s| s.last_attempt_ms()), Some(42_000));
        assert!(!shared.with(|s| s.is_stopping()));
    }

    #[test]
    fn ethernet_started_applies_static_addressing_only() {
        let netif = MockNetif::new();
        let shared = state_with(static_settings());
        shared.with_mut(|s| s.mark_attempt(5_000));
        let handler = LinkEventHandler::new(&netif, &shared);

        handler.handle_event(LinkEvent::EthernetStarted);

        let expected = static_settings().static_addressing();
        assert_eq!(
            netif.take_calls(),
            vec![NetifCall::ConfigureEthernet(Addressing::Static(expected))]
        );
        // Station timing is untouched.
        assert_eq!(shared.with(|s| s.last_attempt_ms()), Some(5_000));
        assert!(!shared.with(|s| s.is_stopping()));
    }

    #[test]
    fn ethernet_started_with_dhcp_is_ignored() {
        let netif = MockNetif::new();
        let shared = state_with(dhcp_settings());
        let handler = LinkEventHandler::new(&netif, &shared);

        handler.handle_event(LinkEvent::EthernetStarted);

        assert!(netif.calls().is_empty());
    }

    #[test]
    fn other_events_are_ignored() {
        let netif = MockNetif::new();
        let shared = state_with(dhcp_settings());
        shared.with_mut(|s| {
            s.mark_attempt(7_000);
            s.stopping = true;
        });
        let handler = LinkEventHandler::new(&netif, &shared);

        handler.handle_event(LinkEvent::Other);

        assert!(netif.calls().is_empty());
        assert_eq!(shared.with(|s| s.last_attempt_ms()), Some(7_000));
        assert!(shared.with(|s| s.is_stopping()));
    }
}
