use crate::register::*;
use crate::{Configuration, Error};
use accelerometer::vector::I16x3;
use core::convert::TryFrom;
use embedded_hal_async::i2c::I2c;

/// LIS3DH on an I²C bus.
///
/// Holds the device address only; the bus is lent to every call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lis3dh {
    /// Current I²C slave address
    address: u8,
}

impl Lis3dh {
    /// Probe the device at `address` and apply `conf`.
    ///
    /// Fails with [`Error::WrongAddress`] when `WHO_AM_I` does not identify a
    /// LIS3DH, which is what an absent or unpowered sensor looks like.
    pub async fn new<I2C: I2c>(
        i2c: &mut I2C,
        address: SlaveAddr,
        conf: Configuration,
    ) -> Result<Self, Error<I2C::Error>> {
        let mut lis3dh = Lis3dh {
            address: address.addr(),
        };

        lis3dh.init(i2c, conf).await?;

        Ok(lis3dh)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    async fn init<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        conf: Configuration,
    ) -> Result<(), Error<I2C::Error>> {
        let id = self.get_device_id(i2c).await?;

        if id != DEVICE_ID {
            return Err(Error::WrongAddress);
        }

        if conf.block_data_update || conf.temp_en {
            // Block data update
            self.write_register(i2c, Register::CTRL4, BDU).await?;
        }

        self.set_mode(i2c, conf.mode).await?;

        self.set_datarate(i2c, conf.datarate).await?;

        self.enable_axis(
            i2c,
            (conf.enable_x_axis, conf.enable_y_axis, conf.enable_z_axis),
        )
        .await?;

        if conf.temp_en {
            self.enable_temp(i2c, true).await?;
        }

        // Enable ADCs.
        self.register_set_bits(i2c, Register::TEMP_CFG, ADC_EN).await
    }

    /// `WHO_AM_I` register.
    async fn get_device_id<I2C: I2c>(&mut self, i2c: &mut I2C) -> Result<u8, Error<I2C::Error>> {
        self.read_register(i2c, Register::WHOAMI).await
    }

    pub async fn read_register<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        register: Register,
    ) -> Result<u8, Error<I2C::Error>> {
        let mut data = [0];

        i2c.write_read(self.address, &[register.addr()], &mut data)
            .await
            .map_err(Error::Bus)
            .and(Ok(data[0]))
    }

    /// Write a byte to the given register.
    async fn write_register<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        register: Register,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        if register.read_only() {
            return Err(Error::WriteToReadOnly);
        }

        i2c.write(self.address, &[register.addr(), value])
            .await
            .map_err(Error::Bus)
    }

    /// Full-scale selection.
    pub async fn set_range<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        range: Range,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_register(i2c, Register::CTRL4, |mut ctrl4| {
            ctrl4 &= !FS_MASK;
            ctrl4 |= range.bits() << 4;

            ctrl4
        })
        .await
    }

    /// Read from the registers for each of the 3 axes.
    pub async fn read_accel_bytes<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
    ) -> Result<[u8; 6], Error<I2C::Error>> {
        let mut data = [0u8; 6];

        // MSB of the sub-address enables auto-increment
        i2c.write_read(self.address, &[Register::OUT_X_L.addr() | 0x80], &mut data)
            .await
            .map_err(Error::Bus)
            .and(Ok(data))
    }

    /// Raw left-justified samples of all three axes.
    pub async fn accel_raw<I2C: I2c>(&mut self, i2c: &mut I2C) -> Result<I16x3, Error<I2C::Error>> {
        let b = self.read_accel_bytes(i2c).await?;

        let x = i16::from_le_bytes([b[0], b[1]]);
        let y = i16::from_le_bytes([b[2], b[3]]);
        let z = i16::from_le_bytes([b[4], b[5]]);

        Ok(I16x3 { x, y, z })
    }

    async fn modify_register<I2C: I2c, F>(
        &mut self,
        i2c: &mut I2C,
        register: Register,
        f: F,
    ) -> Result<(), Error<I2C::Error>>
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read_register(i2c, register).await?;

        self.write_register(i2c, register, f(value)).await
    }

    /// Clear the given bits in the given register.
    async fn register_clear_bits<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        reg: Register,
        bits: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_register(i2c, reg, |v| v & !bits).await
    }

    /// Set the given bits in the given register.
    async fn register_set_bits<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        reg: Register,
        bits: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_register(i2c, reg, |v| v | bits).await
    }

    /// Set or clear the given given bits in the given register, depending on
    /// the value of `set`.
    async fn register_xset_bits<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        reg: Register,
        bits: u8,
        set: bool,
    ) -> Result<(), Error<I2C::Error>> {
        if set {
            self.register_set_bits(i2c, reg, bits).await
        } else {
            self.register_clear_bits(i2c, reg, bits).await
        }
    }

    async fn set_mode<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        mode: Mode,
    ) -> Result<(), Error<I2C::Error>> {
        match mode {
            Mode::LowPower => {
                self.register_set_bits(i2c, Register::CTRL1, LP_EN).await?;
                self.register_clear_bits(i2c, Register::CTRL4, HR).await?;
            }
            Mode::Normal => {
                self.register_clear_bits(i2c, Register::CTRL1, LP_EN).await?;
                self.register_clear_bits(i2c, Register::CTRL4, HR).await?;
            }
            Mode::HighResolution => {
                self.register_clear_bits(i2c, Register::CTRL1, LP_EN).await?;
                self.register_set_bits(i2c, Register::CTRL4, HR).await?;
            }
        }

        Ok(())
    }

    /// Data rate selection.
    pub async fn set_datarate<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        datarate: DataRate,
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_register(i2c, Register::CTRL1, |mut ctrl1| {
            ctrl1 &= !ODR_MASK;
            ctrl1 |= datarate.bits() << 4;

            ctrl1
        })
        .await
    }

    /// Currently configured data rate. `None` for reserved ODR codes.
    pub async fn get_datarate<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
    ) -> Result<Option<DataRate>, Error<I2C::Error>> {
        let ctrl1 = self.read_register(i2c, Register::CTRL1).await?;

        Ok(DataRate::try_from((ctrl1 & ODR_MASK) >> 4).ok())
    }

    async fn enable_axis<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        (x, y, z): (bool, bool, bool),
    ) -> Result<(), Error<I2C::Error>> {
        self.modify_register(i2c, Register::CTRL1, |mut ctrl1| {
            ctrl1 &= !(X_EN | Y_EN | Z_EN); // disable all axes

            ctrl1 |= if x { X_EN } else { 0 };
            ctrl1 |= if y { Y_EN } else { 0 };
            ctrl1 |= if z { Z_EN } else { 0 };

            ctrl1
        })
        .await
    }

    async fn enable_temp<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        enable: bool,
    ) -> Result<(), Error<I2C::Error>> {
        self.register_xset_bits(i2c, Register::TEMP_CFG, ADC_EN | TEMP_EN, enable)
            .await?;

        // temperature readings need block data update
        if enable {
            self.register_xset_bits(i2c, Register::CTRL4, BDU, true).await?;
        }

        Ok(())
    }

    /// Configure an IRQ source
    pub async fn configure_irq_src<I2C: I2c, I: Interrupt>(
        &mut self,
        i2c: &mut I2C,
        _int: I,
        irq_src: InterruptSource,
        latch_en: bool,
        d4d_en: bool,
    ) -> Result<(), Error<I2C::Error>> {
        if latch_en || d4d_en {
            self.register_set_bits(
                i2c,
                Register::CTRL5,
                (latch_en as u8) << I::lir_int_bit() | (d4d_en as u8) << I::d4d_int_bit(),
            )
            .await?;
        }
        self.write_register(i2c, I::cfg_reg(), irq_src.bits()).await
    }

    /// Configure a duration threshold for an interrupt, in 1/ODR steps
    pub async fn configure_irq_duration<I2C: I2c, I: Interrupt>(
        &mut self,
        i2c: &mut I2C,
        _int: I,
        duration: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_register(i2c, I::duration_reg(), duration & 0x7F)
            .await
    }

    /// Configure a magnitude threshold for an interrupt
    pub async fn configure_irq_threshold<I2C: I2c, I: Interrupt>(
        &mut self,
        i2c: &mut I2C,
        _int: I,
        threshold: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_register(i2c, I::ths_reg(), threshold & 0x7F).await
    }

    /// Route an interrupt generator onto its pin, leaving other routes as
    /// they are.
    pub async fn route_irq_to_pin<I2C: I2c, I: Interrupt>(
        &mut self,
        i2c: &mut I2C,
        _int: I,
    ) -> Result<(), Error<I2C::Error>> {
        let (reg, bit) = I::pin_route();
        self.register_set_bits(i2c, reg, bit).await
    }

    /// Active level of both interrupt pins.
    pub async fn set_irq_polarity<I2C: I2c>(
        &mut self,
        i2c: &mut I2C,
        polarity: Polarity,
    ) -> Result<(), Error<I2C::Error>> {
        self.register_xset_bits(
            i2c,
            Register::CTRL6,
            INT_POLARITY,
            polarity == Polarity::ActiveLow,
        )
        .await
    }

    /// Read `INTx_SRC`, which also acknowledges a latched interrupt.
    pub async fn irq_src<I2C: I2c, I: Interrupt>(
        &mut self,
        i2c: &mut I2C,
        _int: I,
    ) -> Result<InterruptStatus, Error<I2C::Error>> {
        let bits = self.read_register(i2c, I::src_reg()).await?;

        Ok(InterruptStatus::from_bits(bits))
    }
}
