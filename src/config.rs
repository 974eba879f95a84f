/// Sensor interrupt output used for orientation events.
///
/// Only the two pins the sensor has exist, so a wrong channel mapping does
/// not compile.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Int1,
    Int2,
}

/// Edge of the interrupt line that signals an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Orientation interrupt settings handed to the driver once, while arming.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    pub channel: Channel,

    /// Orientation hysteresis in units of 62.5 mg
    pub hysteresis: u8,

    pub edge: Edge,

    /// How long an orientation change must persist before the interrupt
    /// fires, in sensor time units. On the LIS3DH this is `INTx_DURATION`
    /// in 1/ODR steps; it does not stretch the output pulse.
    pub latch_duration: u8,
}

/// The fixed orientation interrupt configuration. Not adjustable at runtime.
///
/// On the LIS3DH, hysteresis 2 is a 128 mg threshold and the latch duration
/// is 5 samples (12.5 ms at 400 Hz) of debounce.
pub const ORIENTATION_INTERRUPT: InterruptConfig = InterruptConfig {
    channel: Channel::Int1,
    hysteresis: 2,
    edge: Edge::Rising,
    latch_duration: 5,
};

impl Default for InterruptConfig {
    fn default() -> Self {
        ORIENTATION_INTERRUPT
    }
}
