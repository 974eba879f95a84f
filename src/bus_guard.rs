//! Mutual exclusion for the shared two-wire bus.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};

/// Exclusive access to the bus, released when dropped.
pub type BusLock<'a, M, BUS> = MutexGuard<'a, M, BUS>;

/// Serializes every transaction on a shared bus.
///
/// At most one [`BusLock`] exists at a time. Locks are released on drop, so an
/// early `?` return cannot leave the bus held. Locking again while holding a
/// lock from the same task deadlocks.
///
/// Never lock from interrupt context.
pub struct BusGuard<M: RawMutex, BUS> {
    bus: Mutex<M, BUS>,
    owned: AtomicBool,
}

impl<M: RawMutex, BUS> BusGuard<M, BUS> {
    /// Wrap `bus`. The guard starts out free.
    pub const fn new(bus: BUS) -> Self {
        Self {
            bus: Mutex::new(bus),
            owned: AtomicBool::new(false),
        }
    }

    /// Wait until the bus is free and take it.
    pub async fn acquire(&self) -> BusLock<'_, M, BUS> {
        self.bus.lock().await
    }

    /// Take the bus if nobody holds it right now.
    pub fn try_acquire(&self) -> Option<BusLock<'_, M, BUS>> {
        self.bus.try_lock().ok()
    }

    /// Register the single sensing task that owns the sensor state behind
    /// this bus. Returns `false` if one is registered already.
    pub fn claim(&self) -> bool {
        !self.owned.swap(true, Ordering::AcqRel)
    }

    /// Give up ownership taken with [`claim`](Self::claim).
    pub fn unclaim(&self) {
        self.owned.store(false, Ordering::Release);
    }

    pub fn is_claimed(&self) -> bool {
        self.owned.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use futures::executor::block_on;

    /// Yields to the executor once.
    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    #[test]
    fn released_guard_is_immediately_acquirable() {
        let guard: BusGuard<CriticalSectionRawMutex, u32> = BusGuard::new(0);

        {
            let mut bus = guard.try_acquire().expect("free guard");
            *bus += 1;
            assert!(guard.try_acquire().is_none());
        }

        let bus = guard.try_acquire().expect("released guard");
        assert_eq!(*bus, 1);
    }

    #[test]
    fn early_return_releases_the_bus() {
        let guard: BusGuard<CriticalSectionRawMutex, ()> = BusGuard::new(());

        fn transfer() -> Result<(), ()> {
            Err(())
        }

        async fn failing(guard: &BusGuard<CriticalSectionRawMutex, ()>) -> Result<(), ()> {
            let _bus = guard.acquire().await;
            transfer()?;
            Ok(())
        }

        assert!(block_on(failing(&guard)).is_err());
        assert!(guard.try_acquire().is_some());
    }

    #[derive(Default)]
    struct Occupancy {
        holders: Cell<u32>,
        max_holders: Cell<u32>,
        transactions: Cell<u32>,
    }

    async fn worker(guard: &BusGuard<CriticalSectionRawMutex, ()>, occ: &Occupancy) {
        for _ in 0..10 {
            let _bus = guard.acquire().await;
            occ.holders.set(occ.holders.get() + 1);
            occ.max_holders
                .set(occ.max_holders.get().max(occ.holders.get()));

            // a transaction spanning several polls
            YieldNow(false).await;
            YieldNow(false).await;

            occ.transactions.set(occ.transactions.get() + 1);
            occ.holders.set(occ.holders.get() - 1);
        }
    }

    #[test]
    fn concurrent_holders_never_overlap() {
        let guard: BusGuard<CriticalSectionRawMutex, ()> = BusGuard::new(());
        let occ = Occupancy::default();

        block_on(async {
            futures::join!(worker(&guard, &occ), worker(&guard, &occ), worker(&guard, &occ));
        });

        assert_eq!(occ.max_holders.get(), 1);
        assert_eq!(occ.transactions.get(), 30);
    }

    #[test]
    fn only_one_claim() {
        let guard: BusGuard<CriticalSectionRawMutex, ()> = BusGuard::new(());

        assert!(!guard.is_claimed());
        assert!(guard.claim());
        assert!(!guard.claim());
        assert!(guard.is_claimed());

        guard.unclaim();
        assert!(guard.claim());
    }
}
