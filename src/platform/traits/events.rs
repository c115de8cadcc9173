//! Link event types and subscription interface
//!
//! The network driver reports connectivity transitions asynchronously. This
//! module defines the event vocabulary the supervision core consumes and the
//! sink trait through which a driver delivers it.

/// Asynchronous notification from the network driver
///
/// Variants map driver-specific notifications onto the transitions the
/// supervision core cares about; anything else arrives as [`LinkEvent::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Station lost its association with the access point
    StationDisconnected,
    /// Station mode wound down after a disconnect request
    StationStopped,
    /// The Ethernet interface came up and is ready for addressing
    EthernetStarted,
    /// Driver notification with no supervision consequence
    Other,
}

/// Receiver for link events.
///
/// The driver invokes [`on_link_event`](LinkEventSink::on_link_event) from
/// its own execution context, which is distinct from the context running the
/// supervision tick. A sink that touches supervisor state must therefore go
/// through the same `SharedState` instance the tick path uses.
///
/// Delivery is synchronous from the driver's point of view; implementations
/// must not block.
pub trait LinkEventSink {
    /// Handle a single link event.
    fn on_link_event(&self, event: LinkEvent);
}

/// Handle identifying a sink registration.
///
/// Returned by `NetworkInterface::subscribe`. The handle does not cancel
/// delivery when dropped; it exists so callers can tell registrations apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    id: u8,
}

impl Subscription {
    pub(crate) fn new(id: u8) -> Self {
        Self { id }
    }

    /// Registration sequence number, starting at 0.
    pub fn id(&self) -> u8 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_ids_are_distinguishable() {
        let first = Subscription::new(0);
        let second = Subscription::new(1);
        assert_ne!(first, second);
        assert_eq!(second.id(), 1);
    }

    #[test]
    fn link_event_equality() {
        assert_eq!(LinkEvent::StationStopped, LinkEvent::StationStopped);
        assert_ne!(LinkEvent::StationStopped, LinkEvent::StationDisconnected);
    }
}
