//! Hand-off from the sensor interrupt to the sensing task.

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::signal::Signal;

/// State of an [`InterruptBridge`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeState {
    /// Not armed yet, edges are ignored
    Disarmed,
    /// Waiting for the next edge
    Armed,
    /// Posting a wake notification
    Notifying,
}

impl BridgeState {
    const fn from_u8(v: u8) -> Self {
        match v {
            1 => BridgeState::Armed,
            2 => BridgeState::Notifying,
            _ => BridgeState::Disarmed,
        }
    }
}

/// Single-slot, overwrite-on-send wake channel from interrupt context to one
/// waiting task.
///
/// [`on_edge`](Self::on_edge) never blocks and never touches the bus. Any
/// number of edges between two [`wait`](Self::wait)s collapse into one
/// pending wake.
pub struct InterruptBridge<M: RawMutex = CriticalSectionRawMutex> {
    wake: Signal<M, ()>,
    state: AtomicU8,
}

impl<M: RawMutex> InterruptBridge<M> {
    pub const fn new() -> Self {
        Self {
            wake: Signal::new(),
            state: AtomicU8::new(BridgeState::Disarmed as u8),
        }
    }

    /// Start forwarding edges. Called by the sensing task once the sensor
    /// interrupt is configured.
    pub fn arm(&self) {
        self.state.store(BridgeState::Armed as u8, Ordering::Release);
    }

    pub fn state(&self) -> BridgeState {
        BridgeState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Interrupt handler entry. Posts a wake notification and returns
    /// whether it did; edges arriving while disarmed are dropped.
    pub fn on_edge(&self) -> bool {
        if self.state() == BridgeState::Disarmed {
            return false;
        }

        self.state
            .store(BridgeState::Notifying as u8, Ordering::Release);
        self.wake.signal(());
        self.state.store(BridgeState::Armed as u8, Ordering::Release);

        true
    }

    /// Whether a wake notification is pending.
    pub fn is_pending(&self) -> bool {
        self.wake.signaled()
    }

    /// Suspend until the next wake notification and consume it.
    pub async fn wait(&self) {
        self.wake.wait().await
    }
}

impl<M: RawMutex> Default for InterruptBridge<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::FutureExt;

    #[test]
    fn edges_before_arming_are_dropped() {
        let bridge: InterruptBridge = InterruptBridge::new();

        assert_eq!(bridge.state(), BridgeState::Disarmed);
        assert!(!bridge.on_edge());
        assert!(!bridge.is_pending());

        bridge.arm();
        assert!(bridge.on_edge());
        assert!(bridge.is_pending());
        assert_eq!(bridge.state(), BridgeState::Armed);
    }

    #[test]
    fn many_edges_coalesce_into_one_wake() {
        let bridge: InterruptBridge = InterruptBridge::new();
        bridge.arm();

        for _ in 0..5 {
            assert!(bridge.on_edge());
        }

        block_on(bridge.wait());
        assert!(!bridge.is_pending());

        // nothing left to consume
        assert!(bridge.wait().now_or_never().is_none());
    }

    #[test]
    fn wait_without_edge_stays_suspended() {
        let bridge: InterruptBridge = InterruptBridge::new();
        bridge.arm();

        assert!(bridge.wait().now_or_never().is_none());

        bridge.on_edge();
        assert!(bridge.wait().now_or_never().is_some());
    }
}
