//! The long-lived orientation sensing loop.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::bridge::InterruptBridge;
use crate::bus_guard::BusGuard;
use crate::config::InterruptConfig;
use crate::driver::SensorDriver;
use crate::error::Error;
use crate::orientation::{classify, AccelerationSample, OrientationState};
use crate::report::OrientationSink;

/// Where the sensing task is in its life cycle.
///
/// `Starting → Initializing → ArmingInterrupt → (Reading → Classifying →
/// Reporting → Suspended)* → Faulted`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskState {
    Starting,
    Initializing,
    ArmingInterrupt,
    Reading,
    Classifying,
    Reporting,
    Suspended,
    /// Terminal. No further sensing work is done.
    Faulted,
}

/// Owns everything the orientation loop needs: the sensor handle, and
/// references to the bus guard and the interrupt bridge it shares with the
/// board.
pub struct SensingTask<'a, M, BUS, W, D>
where
    M: RawMutex,
    W: RawMutex,
    D: SensorDriver<BUS>,
{
    guard: &'a BusGuard<M, BUS>,
    bridge: &'a InterruptBridge<W>,
    driver: D,
    handle: Option<D::Handle>,
    config: InterruptConfig,
    state: TaskState,
    claimed: bool,
}

impl<'a, M, BUS, W, D> SensingTask<'a, M, BUS, W, D>
where
    M: RawMutex,
    W: RawMutex,
    D: SensorDriver<BUS>,
{
    pub fn new(
        guard: &'a BusGuard<M, BUS>,
        bridge: &'a InterruptBridge<W>,
        driver: D,
        config: InterruptConfig,
    ) -> Self {
        Self {
            guard,
            bridge,
            driver,
            handle: None,
            config,
            state: TaskState::Starting,
            claimed: false,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The initialized sensor, once [`initialize`](Self::initialize) succeeded.
    pub fn handle(&self) -> Option<&D::Handle> {
        self.handle.as_ref()
    }

    fn enter(&mut self, state: TaskState) {
        trace!("sensing task: {} -> {}", self.state, state);
        self.state = state;
    }

    /// Fails with [`Error::Faulted`] once the task has faulted. A faulted
    /// task never touches the bus again; restarting means building a new
    /// [`SensingTask`].
    fn ensure_live(&self) -> Result<(), Error<D::Error>> {
        if self.state == TaskState::Faulted {
            return Err(Error::Faulted);
        }
        Ok(())
    }

    /// Every failed step is fatal.
    fn settle<T>(&mut self, result: Result<T, Error<D::Error>>) -> Result<T, Error<D::Error>> {
        if result.is_err() {
            self.enter(TaskState::Faulted);
        }
        result
    }

    /// Take ownership of the bus guard for this task.
    pub fn start(&mut self) -> Result<(), Error<D::Error>> {
        self.ensure_live()?;
        self.enter(TaskState::Starting);

        let result = if self.claimed || self.guard.claim() {
            self.claimed = true;
            Ok(())
        } else {
            Err(Error::GuardUnavailable)
        };
        self.settle(result)
    }

    /// Bring up the sensor with the bus held.
    pub async fn initialize(&mut self) -> Result<(), Error<D::Error>> {
        self.ensure_live()?;
        self.enter(TaskState::Initializing);

        let result = self.bring_up().await;
        self.settle(result)
    }

    async fn bring_up(&mut self) -> Result<(), Error<D::Error>> {
        let mut bus = self.guard.acquire().await;
        let handle = self
            .driver
            .initialize(&mut *bus)
            .await
            .map_err(Error::Init)?;
        drop(bus);

        self.handle = Some(handle);
        info!("Motion sensor successfully initialized.");

        Ok(())
    }

    /// Configure the orientation interrupt with the bus held, then arm the
    /// bridge so edges start waking this task.
    pub async fn arm_interrupt(&mut self) -> Result<(), Error<D::Error>> {
        self.ensure_live()?;
        self.enter(TaskState::ArmingInterrupt);

        let result = self.configure_interrupt().await;
        self.settle(result)
    }

    async fn configure_interrupt(&mut self) -> Result<(), Error<D::Error>> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(Error::NotInitialized);
        };

        let mut bus = self.guard.acquire().await;
        self.driver
            .configure_orientation_interrupt(&mut *bus, handle, &self.config)
            .await
            .map_err(Error::InterruptConfig)?;
        drop(bus);

        self.bridge.arm();
        info!("Motion sensor interrupts successfully configured and enabled.");

        Ok(())
    }

    /// Read one sample with the bus held and classify it.
    pub async fn sense(&mut self) -> Result<OrientationState, Error<D::Error>> {
        self.ensure_live()?;
        self.enter(TaskState::Reading);

        let result = self.read_sample().await;
        let sample = self.settle(result)?;

        self.enter(TaskState::Classifying);
        let orientation = classify(sample);
        debug!("sample {} -> {}", sample, orientation);

        Ok(orientation)
    }

    async fn read_sample(&mut self) -> Result<AccelerationSample, Error<D::Error>> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(Error::NotInitialized);
        };

        let mut bus = self.guard.acquire().await;
        self.driver
            .read_acceleration(&mut *bus, handle)
            .await
            .map_err(Error::Read)
    }

    /// Run the task until it faults. Returns the fault; every orientation
    /// before that went to `sink`.
    ///
    /// On a task that already faulted this returns [`Error::Faulted`] at once,
    /// without touching the bus or the sink.
    pub async fn run<S: OrientationSink>(&mut self, mut sink: S) -> Error<D::Error> {
        if let Err(err) = self.ensure_live() {
            return err;
        }

        let err = match self.drive(&mut sink).await {
            Ok(never) => match never {},
            Err(err) => err,
        };

        error!(
            "Error : {} !! [Error code: {=u32:#x}]",
            err.message(),
            err.code()
        );
        sink.fault(err.code(), err.message());

        err
    }

    async fn drive<S: OrientationSink>(
        &mut self,
        sink: &mut S,
    ) -> Result<Infallible, Error<D::Error>> {
        self.start()?;
        self.initialize().await?;
        self.arm_interrupt().await?;

        loop {
            let orientation = self.sense().await?;

            self.enter(TaskState::Reporting);
            sink.report(orientation);

            self.enter(TaskState::Suspended);
            self.bridge.wait().await;
        }
    }
}

impl<'a, M, BUS, W, D> Drop for SensingTask<'a, M, BUS, W, D>
where
    M: RawMutex,
    W: RawMutex,
    D: SensorDriver<BUS>,
{
    fn drop(&mut self) {
        if self.claimed {
            self.guard.unclaim();
        }
    }
}
