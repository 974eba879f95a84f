//! Board orientation sensing.
//!
//! A [`SensingTask`] initializes an accelerometer through a
//! [`SensorDriver`], arms its orientation interrupt and then sleeps on an
//! [`InterruptBridge`] until the sensor reports a change. Every wake-up reads
//! one sample, [`classify`]s it and hands the result to an
//! [`OrientationSink`]. Each bus transaction runs under the [`BusGuard`].
//!
//! Logging goes through `defmt` when the `defmt` feature is enabled.
#![cfg_attr(not(test), no_std)]

// must come first, the other modules use its macros
#[macro_use]
mod fmt;

pub mod bridge;
pub mod bus_guard;
pub mod config;
pub mod driver;
pub mod error;
pub mod lis3dh_sensor;
pub mod orientation;
pub mod report;
pub mod task;

pub use bridge::{BridgeState, InterruptBridge};
pub use bus_guard::{BusGuard, BusLock};
pub use config::{Channel, Edge, InterruptConfig, ORIENTATION_INTERRUPT};
pub use driver::SensorDriver;
pub use error::Error;
pub use lis3dh_sensor::{Lis3dhHandle, Lis3dhSensor};
pub use orientation::{classify, AccelerationSample, OrientationState};
pub use report::{ConsoleSink, LogSink, OrientationSink};
pub use task::{SensingTask, TaskState};
