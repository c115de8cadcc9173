//! Synchronized state abstraction for the supervision core.
//!
//! Supervisor state is mutated from two execution contexts: the periodic
//! tick task and the driver's link-event dispatch. The `SharedState` trait
//! abstracts over the synchronization mechanism guarding it (Embassy
//! critical-section Mutex on the target, RefCell for single-threaded host
//! tests) so the supervision logic itself stays platform-free.

/// Closure-scoped access to state shared between execution contexts.
///
/// Both the tick path and the event path must go through the same
/// `SharedState` instance; an implementation guarantees the closures run
/// exclusively, so neither context can observe a torn update.
///
/// Closures must stay short and must not call back into the network
/// interface; adapter calls are issued after the closure returns.
///
/// # Example
///
/// ```
/// use pico_link::core::traits::sync::{MockState, SharedState};
///
/// struct Retry {
///     attempts: u32,
/// }
///
/// fn record_attempt<S: SharedState<Retry>>(state: &S) -> u32 {
///     state.with_mut(|r| {
///         r.attempts += 1;
///         r.attempts
///     })
/// }
///
/// let state = MockState::new(Retry { attempts: 0 });
/// assert_eq!(record_attempt(&state), 1);
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    ///
    /// The provided closure receives an immutable reference to the inner state.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    ///
    /// The provided closure receives a mutable reference to the inner state.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

// ============================================================================
// Embassy Implementation
// ============================================================================

#[cfg(feature = "embassy")]
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Embassy-based synchronized state using a critical-section Mutex.
///
/// The critical section gives atomic access even when the link-event dispatch
/// runs from a different task or interrupt context than the tick loop, which
/// is exactly the sharing pattern supervisor state sees on the target.
#[cfg(feature = "embassy")]
pub struct EmbassyState<T> {
    inner: Mutex<CriticalSectionRawMutex, core::cell::RefCell<T>>,
}

#[cfg(feature = "embassy")]
impl<T> EmbassyState<T> {
    /// Creates a new `EmbassyState` wrapping the given value.
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(core::cell::RefCell::new(value)),
        }
    }
}

#[cfg(feature = "embassy")]
impl<T> SharedState<T> for EmbassyState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock synchronized state using RefCell for single-threaded testing.
///
/// # Panics
///
/// Panics if borrowing rules are violated (e.g., calling `with_mut` while
/// `with` is active). This indicates a bug in the test code.
pub struct MockState<T> {
    inner: core::cell::RefCell<T>,
}

impl<T> MockState<T> {
    /// Creates a new `MockState` wrapping the given value.
    pub fn new(value: T) -> Self {
        Self {
            inner: core::cell::RefCell::new(value),
        }
    }
}

impl<T> SharedState<T> for MockState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.borrow())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
