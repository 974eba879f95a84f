//! [`SensorDriver`] for the LIS3DH, using its 6D movement recognition as the
//! orientation interrupt.

use embedded_hal_async::i2c::I2c;
use ::lis3dh::asynci2c::Lis3dh;
use ::lis3dh::{
    Configuration, Interrupt, Interrupt1, Interrupt2, InterruptSource, Polarity, SlaveAddr,
};

use crate::config::{Channel, Edge, InterruptConfig};
use crate::driver::SensorDriver;
use crate::orientation::AccelerationSample;

/// `INTx_THS` steps per hysteresis unit: 62.5 mg over 16 mg/LSB at ±2 g.
const THS_PER_HYSTERESIS: u8 = 4;

/// `INTx_THS` is seven bits wide.
const MAX_THRESHOLD: u8 = 0x7F;

/// Initialized LIS3DH plus the interrupt settings applied to it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lis3dhHandle {
    pub device: Lis3dh,
    pub channel: Option<Channel>,
    pub threshold: u8,
}

/// Adapter creating [`Lis3dhHandle`]s.
#[derive(Debug, Copy, Clone)]
pub struct Lis3dhSensor {
    address: SlaveAddr,
    config: Configuration,
}

impl Lis3dhSensor {
    pub fn new(address: SlaveAddr, config: Configuration) -> Self {
        Self { address, config }
    }

    /// INTx_THS value for a hysteresis setting. Scales linearly up to the
    /// register maximum.
    pub fn threshold_for(hysteresis: u8) -> u8 {
        hysteresis
            .saturating_mul(THS_PER_HYSTERESIS)
            .min(MAX_THRESHOLD)
    }

    /// `duration` goes to `INTx_DURATION`: the number of 1/ODR steps an
    /// orientation change must persist before the interrupt fires.
    async fn configure_generator<I2C: I2c, I: Interrupt + Copy>(
        device: &mut Lis3dh,
        i2c: &mut I2C,
        int: I,
        threshold: u8,
        duration: u8,
    ) -> Result<(), ::lis3dh::Error<I2C::Error>> {
        device.configure_irq_threshold(i2c, int, threshold).await?;
        device.configure_irq_duration(i2c, int, duration).await?;
        device
            .configure_irq_src(i2c, int, InterruptSource::movement_6d(), false, false)
            .await?;
        device.route_irq_to_pin(i2c, int).await
    }
}

impl Default for Lis3dhSensor {
    fn default() -> Self {
        Self::new(
            SlaveAddr::Default,
            Configuration {
                block_data_update: true,
                ..Configuration::default()
            },
        )
    }
}

impl<I2C: I2c> SensorDriver<I2C> for Lis3dhSensor {
    type Handle = Lis3dhHandle;
    type Error = ::lis3dh::Error<I2C::Error>;

    async fn initialize(&mut self, bus: &mut I2C) -> Result<Lis3dhHandle, Self::Error> {
        let device = Lis3dh::new(bus, self.address, self.config).await?;

        Ok(Lis3dhHandle {
            device,
            channel: None,
            threshold: 0,
        })
    }

    async fn configure_orientation_interrupt(
        &mut self,
        bus: &mut I2C,
        handle: &mut Lis3dhHandle,
        config: &InterruptConfig,
    ) -> Result<(), Self::Error> {
        let threshold = Self::threshold_for(config.hysteresis);
        let device = &mut handle.device;

        match config.channel {
            Channel::Int1 => {
                Self::configure_generator(device, bus, Interrupt1, threshold, config.latch_duration)
                    .await?
            }
            Channel::Int2 => {
                Self::configure_generator(device, bus, Interrupt2, threshold, config.latch_duration)
                    .await?
            }
        }

        let polarity = match config.edge {
            Edge::Rising => Polarity::ActiveHigh,
            Edge::Falling => Polarity::ActiveLow,
        };
        device.set_irq_polarity(bus, polarity).await?;

        handle.channel = Some(config.channel);
        handle.threshold = threshold;

        Ok(())
    }

    async fn read_acceleration(
        &mut self,
        bus: &mut I2C,
        handle: &mut Lis3dhHandle,
    ) -> Result<AccelerationSample, Self::Error> {
        handle
            .device
            .accel_raw(bus)
            .await
            .map(AccelerationSample::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ORIENTATION_INTERRUPT;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use futures::executor::block_on;

    const ADDR: u8 = 0x18;

    fn init_transactions() -> Vec<Transaction> {
        vec![
            Transaction::write_read(ADDR, vec![0x0F], vec![0x33]),
            // block data update
            Transaction::write(ADDR, vec![0x23, 0x80]),
            Transaction::write_read(ADDR, vec![0x20], vec![0x07]),
            Transaction::write(ADDR, vec![0x20, 0x07]),
            Transaction::write_read(ADDR, vec![0x23], vec![0x80]),
            Transaction::write(ADDR, vec![0x23, 0x88]),
            Transaction::write_read(ADDR, vec![0x20], vec![0x07]),
            Transaction::write(ADDR, vec![0x20, 0x77]),
            Transaction::write_read(ADDR, vec![0x20], vec![0x77]),
            Transaction::write(ADDR, vec![0x20, 0x77]),
            Transaction::write_read(ADDR, vec![0x1F], vec![0x00]),
            Transaction::write(ADDR, vec![0x1F, 0x80]),
        ]
    }

    #[test]
    fn threshold_scaling() {
        assert_eq!(Lis3dhSensor::threshold_for(0), 0);
        assert_eq!(Lis3dhSensor::threshold_for(8), 32);
        assert_eq!(Lis3dhSensor::threshold_for(31), 124);
        assert_eq!(Lis3dhSensor::threshold_for(32), MAX_THRESHOLD);
        assert_eq!(Lis3dhSensor::threshold_for(200), MAX_THRESHOLD);
    }

    #[test]
    fn each_hysteresis_step_changes_the_threshold() {
        for hysteresis in 1..32u8 {
            assert!(
                Lis3dhSensor::threshold_for(hysteresis)
                    > Lis3dhSensor::threshold_for(hysteresis - 1)
            );
        }
        assert_eq!(Lis3dhSensor::threshold_for(ORIENTATION_INTERRUPT.hysteresis), 8);
    }

    #[test]
    fn orientation_interrupt_on_int1() {
        let mut expectations = init_transactions();
        expectations.extend([
            Transaction::write(ADDR, vec![0x32, 0x08]),
            // persistence, not output latch time
            Transaction::write(ADDR, vec![0x33, 0x05]),
            // 6D movement, all axes
            Transaction::write(ADDR, vec![0x30, 0x7F]),
            Transaction::write_read(ADDR, vec![0x22], vec![0x00]),
            Transaction::write(ADDR, vec![0x22, 0x40]),
            // active high
            Transaction::write_read(ADDR, vec![0x25], vec![0x00]),
            Transaction::write(ADDR, vec![0x25, 0x00]),
            Transaction::write_read(
                ADDR,
                vec![0xA8],
                vec![0x00, 0x01, 0x00, 0xC0, 0x20, 0x00],
            ),
        ]);
        let mut i2c = I2cMock::new(&expectations);
        let mut sensor = Lis3dhSensor::default();

        let sample = block_on(async {
            let mut handle = sensor.initialize(&mut i2c).await?;
            sensor
                .configure_orientation_interrupt(&mut i2c, &mut handle, &ORIENTATION_INTERRUPT)
                .await?;

            assert_eq!(handle.channel, Some(Channel::Int1));
            assert_eq!(handle.threshold, 0x08);

            sensor.read_acceleration(&mut i2c, &mut handle).await
        })
        .unwrap();

        assert_eq!(sample, AccelerationSample::new(0x100, -0x4000, 0x20));
        i2c.done();
    }

    #[test]
    fn absent_sensor_fails_initialization() {
        let mut i2c = I2cMock::new(&[
            Transaction::write_read(ADDR, vec![0x0F], vec![0x00]).with_error(ErrorKind::Other),
        ]);
        let mut sensor = Lis3dhSensor::default();

        let res = block_on(sensor.initialize(&mut i2c));
        assert_eq!(res.unwrap_err(), ::lis3dh::Error::Bus(ErrorKind::Other));

        i2c.done();
    }
}
