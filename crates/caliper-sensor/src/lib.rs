//! # Caliper Sensor
//!
//! Delivers rendered Caliper documents to collectors.
//!
//! A [`Sensor`] serializes events or entity descriptions up front, wraps them
//! in one [`Envelope`] and hands that envelope to every registered
//! [`Client`]. Delivery outcomes are reported per client and tallied in
//! [`Statistics`]; nothing is retried.
//!
//! ```no_run
//! use caliper_sensor::{Sensor, SensorConfig};
//!
//! # async fn demo() -> caliper_sensor::Result<()> {
//! let config = SensorConfig::load("sensor.toml")?;
//! let sensor = Sensor::from_config(&config)?;
//! let report = sensor.send_documents(Vec::new()).await?;
//! assert!(report.all_succeeded());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod envelope;
pub mod error;
pub mod options;
pub mod sensor;

pub use client::{Client, Delivery, HttpClient, MemoryClient};
pub use envelope::Envelope;
pub use error::{Result, SensorError};
pub use options::{DEFAULT_HOST, DEFAULT_SENSOR_ID, HttpOptions, SensorConfig, SensorSection};
pub use sensor::{DEFAULT_CLIENT, SendReport, Sensor, Statistics};
