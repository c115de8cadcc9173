//! CYW43439 network interface
//!
//! [`Cyw43Netif`] implements [`NetworkInterface`] for the Pico 2 W. Trait
//! methods are synchronous and non-blocking: each request is queued on a
//! bounded channel and executed in order by [`netif_driver_task`], which owns
//! the `cyw43` control handle for the lifetime of the program. The task
//! mirrors the station state into an atomic so `station_state()` answers
//! without touching the driver, and it delivers link events to the
//! subscribed sink from its own execution context.
//!
//! Addressing and hostname commands are staged in the task and committed to
//! the network stack immediately before each join, so a join always runs
//! with the most recently requested configuration.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use cyw43::{Control, JoinOptions};
use embassy_net::{ConfigV4, DhcpConfig, Ipv4Cidr, Stack, StaticConfigV4};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_time::{with_timeout, Duration};
use heapless::String;

use crate::platform::error::{NetifError, Result};
use crate::platform::traits::{
    Addressing, LinkEvent, LinkEventSink, NetworkInterface, StationState, Subscription,
};

/// Commands waiting for the driver task.
const COMMAND_QUEUE_DEPTH: usize = 4;

/// Upper bound on a single join attempt. The CYW43439 can stall inside a
/// join when the access point disappears mid-handshake.
const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Interval at which the driver task checks link state between commands.
const LINK_POLL_INTERVAL: Duration = Duration::from_millis(500);

const STATE_IDLE: u8 = 0;
const STATE_STARTED: u8 = 1;
const STATE_CONNECTED: u8 = 2;

fn encode_state(state: StationState) -> u8 {
    match state {
        StationState::Idle => STATE_IDLE,
        StationState::Started => STATE_STARTED,
        StationState::Connected => STATE_CONNECTED,
    }
}

fn decode_state(raw: u8) -> StationState {
    match raw {
        STATE_CONNECTED => StationState::Connected,
        STATE_STARTED => StationState::Started,
        _ => StationState::Idle,
    }
}

/// Requests crossing from trait methods to the driver task.
#[derive(Clone)]
enum Command {
    ConfigureStation(Addressing),
    ConfigureEthernet(Addressing),
    SetHostname(String<32>),
    Connect {
        ssid: String<32>,
        password: String<63>,
    },
    Disconnect {
        drop_config: bool,
    },
    Quiesce,
}

/// Single sink slot shared between registration and the driver task.
struct SinkSlot(Mutex<CriticalSectionRawMutex, RefCell<Option<&'static dyn LinkEventSink>>>);

// SAFETY: the slot itself is guarded by a critical section, and registered
// sinks are only invoked from the driver task, which runs on the same
// executor as the supervision code that registers them.
unsafe impl Sync for SinkSlot {}

/// Network interface handle backed by the CYW43439 radio.
///
/// Create one in a static and hand it to [`netif_driver_task`]; the handle
/// is inert until that task runs.
///
/// ```ignore
/// static NETIF: Cyw43Netif = Cyw43Netif::new();
///
/// let (control, stack) = network::bring_up(/* ... */).await;
/// spawner.spawn(netif_driver_task(&NETIF, control, stack, None)).unwrap();
/// ```
pub struct Cyw43Netif {
    commands: Channel<CriticalSectionRawMutex, Command, COMMAND_QUEUE_DEPTH>,
    station_state: AtomicU8,
    ethernet_present: AtomicBool,
    sink: SinkSlot,
    next_subscription: AtomicU8,
}

impl Cyw43Netif {
    pub const fn new() -> Self {
        Self {
            commands: Channel::new(),
            station_state: AtomicU8::new(STATE_IDLE),
            ethernet_present: AtomicBool::new(false),
            sink: SinkSlot(Mutex::new(RefCell::new(None))),
            next_subscription: AtomicU8::new(0),
        }
    }

    fn submit(&self, command: Command) -> Result<()> {
        self.commands
            .try_send(command)
            .map_err(|_| NetifError::Busy)
    }

    fn set_state(&self, state: StationState) {
        self.station_state
            .store(encode_state(state), Ordering::Release);
    }

    fn emit(&self, event: LinkEvent) {
        let sink = self.sink.0.lock(|cell| *cell.borrow());
        if let Some(sink) = sink {
            sink.on_link_event(event);
        }
    }
}

impl Default for Cyw43Netif {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkInterface for Cyw43Netif {
    fn station_state(&self) -> StationState {
        decode_state(self.station_state.load(Ordering::Acquire))
    }

    fn configure_station(&self, addressing: Addressing) -> Result<()> {
        self.submit(Command::ConfigureStation(addressing))
    }

    fn configure_ethernet(&self, addressing: Addressing) -> Result<()> {
        if !self.ethernet_present.load(Ordering::Acquire) {
            return Err(NetifError::Unavailable);
        }
        self.submit(Command::ConfigureEthernet(addressing))
    }

    fn set_hostname(&self, hostname: &str) -> Result<()> {
        let hostname = String::try_from(hostname).map_err(|_| NetifError::InvalidConfig)?;
        self.submit(Command::SetHostname(hostname))
    }

    fn connect(&self, ssid: &str, password: &str) -> Result<()> {
        let ssid = String::try_from(ssid).map_err(|_| NetifError::InvalidConfig)?;
        let password = String::try_from(password).map_err(|_| NetifError::InvalidConfig)?;
        self.submit(Command::Connect { ssid, password })
    }

    fn disconnect(&self, drop_config: bool) -> bool {
        if !self.station_state().is_active() {
            return false;
        }
        self.submit(Command::Disconnect { drop_config }).is_ok()
    }

    fn quiesce(&self) -> Result<()> {
        self.submit(Command::Quiesce)
    }

    fn subscribe(&self, sink: &'static dyn LinkEventSink) -> Subscription {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        self.sink.0.lock(|cell| *cell.borrow_mut() = Some(sink));
        Subscription::new(id)
    }
}

/// Addressing and hostname staged ahead of the next join.
struct StagedConfig {
    addressing: Addressing,
    hostname: String<32>,
}

impl StagedConfig {
    const fn reset() -> Self {
        Self {
            addressing: Addressing::Dhcp,
            hostname: String::new(),
        }
    }
}

fn ipv4_config(addressing: Addressing, hostname: &String<32>) -> ConfigV4 {
    match addressing {
        Addressing::Dhcp => {
            let mut dhcp = DhcpConfig::default();
            if !hostname.is_empty() {
                dhcp.hostname = Some(hostname.clone());
            }
            ConfigV4::Dhcp(dhcp)
        }
        Addressing::Static(fixed) => ConfigV4::Static(StaticConfigV4 {
            address: Ipv4Cidr::new(fixed.local, fixed.prefix_len()),
            gateway: (!fixed.gateway.is_unspecified()).then_some(fixed.gateway),
            dns_servers: fixed.dns_servers().collect(),
        }),
    }
}

async fn join_station(
    netif: &'static Cyw43Netif,
    control: &mut Control<'static>,
    stack: Stack<'static>,
    staged: &StagedConfig,
    ssid: &str,
    password: &str,
) {
    stack.set_config_v4(ipv4_config(staged.addressing, &staged.hostname));
    netif.set_state(StationState::Started);

    crate::log_info!("joining {}", ssid);
    let options = if password.is_empty() {
        JoinOptions::new_open()
    } else {
        JoinOptions::new(password.as_bytes())
    };
    let joined = with_timeout(JOIN_TIMEOUT, control.join(ssid, options)).await;

    match joined {
        Ok(Ok(())) => {
            // The net driver reports link-up shortly after association.
            if with_timeout(Duration::from_secs(2), stack.wait_link_up())
                .await
                .is_err()
            {
                crate::log_warn!("link not up after join");
            }
            netif.set_state(StationState::Connected);
            crate::log_info!("joined {}", ssid);
            return;
        }
        Ok(Err(e)) => crate::log_warn!("join {} rejected, status {}", ssid, e.status),
        Err(_) => crate::log_warn!("join {} timed out", ssid),
    }

    // A failed join can leave the firmware mid-association; leave() resets
    // it before the next attempt. The station stays started so a teardown
    // request is still accepted.
    control.leave().await;
    netif.emit(LinkEvent::StationDisconnected);
}

/// Executes queued interface commands against the CYW43439.
///
/// Owns the control handle for the lifetime of the program. Between
/// commands the task polls the stacks and synthesizes the link events the
/// hardware does not deliver as callbacks: association loss while connected
/// and link-up of the wired interface.
///
/// `ethernet` is the optional secondary wired stack; pass `None` on a bare
/// Pico 2 W.
#[embassy_executor::task]
pub async fn netif_driver_task(
    netif: &'static Cyw43Netif,
    mut control: Control<'static>,
    stack: Stack<'static>,
    ethernet: Option<Stack<'static>>,
) -> ! {
    netif
        .ethernet_present
        .store(ethernet.is_some(), Ordering::Release);

    let mut staged = StagedConfig::reset();
    let mut ethernet_up = false;
    let mut address_logged = false;

    loop {
        let command = match with_timeout(LINK_POLL_INTERVAL, netif.commands.receive()).await {
            Ok(command) => command,
            Err(_) => {
                if netif.station_state().is_connected() {
                    if !stack.is_link_up() {
                        crate::log_warn!("station link lost");
                        netif.set_state(StationState::Started);
                        address_logged = false;
                        netif.emit(LinkEvent::StationDisconnected);
                    } else if !address_logged {
                        if let Some(config) = stack.config_v4() {
                            let ip = config.address.address().octets();
                            crate::log_info!(
                                "station address {}.{}.{}.{}",
                                ip[0],
                                ip[1],
                                ip[2],
                                ip[3]
                            );
                            address_logged = true;
                        }
                    }
                }
                if let Some(eth) = ethernet {
                    if eth.is_link_up() != ethernet_up {
                        ethernet_up = !ethernet_up;
                        if ethernet_up {
                            crate::log_info!("ethernet link up");
                            netif.emit(LinkEvent::EthernetStarted);
                        }
                    }
                }
                continue;
            }
        };

        match command {
            Command::ConfigureStation(addressing) => {
                staged.addressing = addressing;
            }
            Command::SetHostname(hostname) => {
                staged.hostname = hostname;
            }
            Command::ConfigureEthernet(addressing) => {
                if let Some(eth) = ethernet {
                    crate::log_info!("applying ethernet addressing");
                    eth.set_config_v4(ipv4_config(addressing, &staged.hostname));
                }
            }
            Command::Connect { ssid, password } => {
                join_station(netif, &mut control, stack, &staged, &ssid, &password).await;
                address_logged = false;
            }
            Command::Disconnect { drop_config } => {
                control.leave().await;
                if drop_config {
                    staged = StagedConfig::reset();
                }
                netif.set_state(StationState::Idle);
                address_logged = false;
                crate::log_info!("station stopped");
                netif.emit(LinkEvent::StationStopped);
            }
            Command::Quiesce => {
                control.leave().await;
                netif.set_state(StationState::Idle);
                crate::log_debug!("radio quiesced");
            }
        }
    }
}
