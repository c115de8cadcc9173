//! Mock network interface implementation for testing

use std::cell::{Cell, RefCell};
use std::string::{String, ToString};
use std::vec::Vec;

use crate::platform::{
    error::NetifError,
    traits::{Addressing, LinkEvent, LinkEventSink, NetworkInterface, StationState, Subscription},
    Result,
};

/// A recorded adapter call, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetifCall {
    /// `quiesce()`
    Quiesce,
    /// `configure_station(addressing)`
    ConfigureStation(Addressing),
    /// `configure_ethernet(addressing)`
    ConfigureEthernet(Addressing),
    /// `set_hostname(hostname)`
    SetHostname(String),
    /// `connect(ssid, password)`
    Connect { ssid: String, password: String },
    /// `disconnect(drop_config)`
    Disconnect { drop_config: bool },
}

/// Mock network interface
///
/// Records every call in issue order and answers queries from scripted
/// state, so tests can assert exact call sequences. Calls never change the
/// reported station state on their own; tests script each transition
/// explicitly, mirroring a driver whose effects are only observable later.
///
/// # Example
///
/// ```ignore
/// use pico_link::platform::mock::{MockNetif, NetifCall};
/// use pico_link::platform::traits::{Addressing, NetworkInterface};
///
/// let netif = MockNetif::new();
/// netif.configure_station(Addressing::Dhcp).unwrap();
/// assert_eq!(
///     netif.take_calls(),
///     vec![NetifCall::ConfigureStation(Addressing::Dhcp)]
/// );
/// ```
pub struct MockNetif {
    calls: RefCell<Vec<NetifCall>>,
    station_state: Cell<StationState>,
    accept_disconnect: Cell<bool>,
    fail_commands: Cell<Option<NetifError>>,
    sink: RefCell<Option<&'static dyn LinkEventSink>>,
    subscriptions: Cell<u8>,
}

impl MockNetif {
    /// Create a new mock interface: idle station, disconnects accepted,
    /// commands succeeding.
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            station_state: Cell::new(StationState::Idle),
            accept_disconnect: Cell::new(true),
            fail_commands: Cell::new(None),
            sink: RefCell::new(None),
            subscriptions: Cell::new(0),
        }
    }

    /// Script the station state reported to the supervisor.
    pub fn set_station_state(&self, state: StationState) {
        self.station_state.set(state);
    }

    /// Script whether `disconnect` reports the request as accepted.
    pub fn set_disconnect_accepted(&self, accepted: bool) {
        self.accept_disconnect.set(accepted);
    }

    /// Make every fallible command return the given error.
    ///
    /// Calls are still recorded; pass `None` to restore success.
    pub fn set_command_failure(&self, error: Option<NetifError>) {
        self.fail_commands.set(error);
    }

    /// Calls recorded so far, oldest first.
    pub fn calls(&self) -> Vec<NetifCall> {
        self.calls.borrow().clone()
    }

    /// Drain and return the recorded calls.
    pub fn take_calls(&self) -> Vec<NetifCall> {
        self.calls.borrow_mut().drain(..).collect()
    }

    /// True when a sink registration is held.
    pub fn has_subscriber(&self) -> bool {
        self.sink.borrow().is_some()
    }

    /// Deliver a link event to the registered sink, as the driver would.
    ///
    /// Silently dropped when no sink is registered.
    pub fn emit(&self, event: LinkEvent) {
        // Copy the registration out so the sink may call back into this mock.
        let sink = *self.sink.borrow();
        if let Some(sink) = sink {
            sink.on_link_event(event);
        }
    }

    fn record(&self, call: NetifCall) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match self.fail_commands.get() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for MockNetif {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkInterface for MockNetif {
    fn station_state(&self) -> StationState {
        self.station_state.get()
    }

    fn configure_station(&self, addressing: Addressing) -> Result<()> {
        self.record(NetifCall::ConfigureStation(addressing))
    }

    fn configure_ethernet(&self, addressing: Addressing) -> Result<()> {
        self.record(NetifCall::ConfigureEthernet(addressing))
    }

    fn set_hostname(&self, hostname: &str) -> Result<()> {
        self.record(NetifCall::SetHostname(hostname.to_string()))
    }

    fn connect(&self, ssid: &str, password: &str) -> Result<()> {
        self.record(NetifCall::Connect {
            ssid: ssid.to_string(),
            password: password.to_string(),
        })
    }

    fn disconnect(&self, drop_config: bool) -> bool {
        self.calls
            .borrow_mut()
            .push(NetifCall::Disconnect { drop_config });
        self.accept_disconnect.get()
    }

    fn quiesce(&self) -> Result<()> {
        self.record(NetifCall::Quiesce)
    }

    fn subscribe(&self, sink: &'static dyn LinkEventSink) -> Subscription {
        *self.sink.borrow_mut() = Some(sink);
        let id = self.subscriptions.get();
        self.subscriptions.set(id + 1);
        Subscription::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingSink {
        received: RefCell<Vec<LinkEvent>>,
    }

    impl LinkEventSink for CountingSink {
        fn on_link_event(&self, event: LinkEvent) {
            self.received.borrow_mut().push(event);
        }
    }

    fn leak_sink() -> &'static CountingSink {
        Box::leak(Box::new(CountingSink {
            received: RefCell::new(Vec::new()),
        }))
    }

    #[test]
    fn records_calls_in_order() {
        let netif = MockNetif::new();
        netif.configure_station(Addressing::Dhcp).unwrap();
        netif.set_hostname("unit").unwrap();
        netif.connect("net", "secret").unwrap();

        assert_eq!(
            netif.take_calls(),
            vec![
                NetifCall::ConfigureStation(Addressing::Dhcp),
                NetifCall::SetHostname("unit".to_string()),
                NetifCall::Connect {
                    ssid: "net".to_string(),
                    password: "secret".to_string(),
                },
            ]
        );
        assert!(netif.calls().is_empty());
    }

    #[test]
    fn scripted_disconnect_acceptance() {
        let netif = MockNetif::new();
        assert!(netif.disconnect(true));

        netif.set_disconnect_accepted(false);
        assert!(!netif.disconnect(true));

        // Both attempts were still recorded.
        assert_eq!(netif.calls().len(), 2);
    }

    #[test]
    fn scripted_failure_still_records() {
        let netif = MockNetif::new();
        netif.set_command_failure(Some(NetifError::Unavailable));

        assert_eq!(netif.connect("net", "pw"), Err(NetifError::Unavailable));
        assert_eq!(netif.calls().len(), 1);

        netif.set_command_failure(None);
        assert!(netif.set_hostname("back").is_ok());
    }

    #[test]
    fn emit_reaches_registered_sink() {
        let netif = MockNetif::new();
        assert!(!netif.has_subscriber());

        // No registration: events are dropped, not an error.
        netif.emit(LinkEvent::Other);

        let sink = leak_sink();
        let subscription = netif.subscribe(sink);
        assert_eq!(subscription.id(), 0);
        assert!(netif.has_subscriber());

        netif.emit(LinkEvent::StationDisconnected);
        netif.emit(LinkEvent::StationStopped);
        assert_eq!(
            *sink.received.borrow(),
            vec![LinkEvent::StationDisconnected, LinkEvent::StationStopped]
        );
    }

    #[test]
    fn later_subscription_replaces_earlier() {
        let netif = MockNetif::new();
        let first = leak_sink();
        let second = leak_sink();

        assert_eq!(netif.subscribe(first).id(), 0);
        assert_eq!(netif.subscribe(second).id(), 1);

        netif.emit(LinkEvent::EthernetStarted);
        assert!(first.received.borrow().is_empty());
        assert_eq!(*second.received.borrow(), vec![LinkEvent::EthernetStarted]);
    }
}
