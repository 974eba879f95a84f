use crate::config::InterruptConfig;
use crate::orientation::AccelerationSample;

/// Typed sensor operations on top of raw bus transfers.
///
/// Every method runs while the caller holds the [`BusGuard`](crate::BusGuard)
/// and receives the locked bus. Errors are reported as-is; there is no retry
/// at this layer.
#[allow(async_fn_in_trait)]
pub trait SensorDriver<BUS> {
    /// Configuration state of the initialized sensor: bus address, interrupt
    /// channel, thresholds.
    type Handle;

    type Error: core::fmt::Debug;

    /// Bring up the sensor. Fails if it does not answer.
    async fn initialize(&mut self, bus: &mut BUS) -> Result<Self::Handle, Self::Error>;

    /// Enable the orientation-change interrupt on `config.channel`.
    async fn configure_orientation_interrupt(
        &mut self,
        bus: &mut BUS,
        handle: &mut Self::Handle,
        config: &InterruptConfig,
    ) -> Result<(), Self::Error>;

    /// Read one fresh sample.
    async fn read_acceleration(
        &mut self,
        bus: &mut BUS,
        handle: &mut Self::Handle,
    ) -> Result<AccelerationSample, Self::Error>;
}
