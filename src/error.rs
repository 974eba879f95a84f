/// Faults of the sensing task. All of them are fatal: the task stops at
/// [`TaskState::Faulted`](crate::TaskState::Faulted) and reports no further
/// orientations.
///
/// `E` is the error type of the [`SensorDriver`](crate::SensorDriver).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus guard is already owned by another sensing task
    GuardUnavailable,

    /// Sensor initialization failed
    Init(E),

    /// Orientation interrupt could not be configured
    InterruptConfig(E),

    /// Acceleration sample could not be read
    Read(E),

    /// A sensor operation was requested before initialization succeeded
    NotInitialized,

    /// The task already faulted and does no further sensing
    Faulted,
}

impl<E> Error<E> {
    /// Distinguishing code logged with the fault.
    pub fn code(&self) -> u32 {
        match self {
            Error::GuardUnavailable => 0x01,
            Error::Init(_) => 0x02,
            Error::InterruptConfig(_) => 0x03,
            Error::Read(_) => 0x04,
            Error::NotInitialized => 0x05,
            Error::Faulted => 0x06,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Error::GuardUnavailable => "Motion Sensor - Failed to obtain bus guard",
            Error::Init(_) => "Motion Sensor initialization failed, check hardware connection",
            Error::InterruptConfig(_) => "Motion Sensor interrupt configuration failed",
            Error::Read(_) => "Could not read motion sensor data",
            Error::NotInitialized => "Motion Sensor used before initialization",
            Error::Faulted => "Motion Sensor task stopped after a fault",
        }
    }

    /// The driver error behind this fault, if any.
    pub fn driver_error(&self) -> Option<&E> {
        match self {
            Error::GuardUnavailable | Error::NotInitialized | Error::Faulted => None,
            Error::Init(e) | Error::InterruptConfig(e) | Error::Read(e) => Some(e),
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} [Error code: {:#x}]", self.message(), self.code())?;
        if let Some(e) = self.driver_error() {
            write!(f, " ({:?})", e)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors: [Error<()>; 6] = [
            Error::GuardUnavailable,
            Error::Init(()),
            Error::InterruptConfig(()),
            Error::Read(()),
            Error::NotInitialized,
            Error::Faulted,
        ];

        for (i, a) in errors.iter().enumerate() {
            for b in &errors[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }

    #[test]
    fn display_carries_code_and_cause() {
        let err: Error<&str> = Error::Read("nack");
        assert_eq!(
            std::format!("{}", err),
            "Could not read motion sensor data [Error code: 0x4] (\"nack\")"
        );

        let err: Error<&str> = Error::GuardUnavailable;
        assert!(std::format!("{}", err).ends_with("[Error code: 0x1]"));
    }
}
