//! The transmission envelope wrapping a batch of documents.

use caliper_kernel::format_date_time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub sensor: String,
    pub send_time: String,
    pub data_version: String,
    pub data: Vec<Value>,
}

impl Envelope {
    pub fn new(sensor: impl Into<String>, data_version: impl Into<String>, data: Vec<Value>) -> Self {
        Self::at(Utc::now(), sensor, data_version, data)
    }

    pub fn at(
        send_time: DateTime<Utc>,
        sensor: impl Into<String>,
        data_version: impl Into<String>,
        data: Vec<Value>,
    ) -> Self {
        Self {
            sensor: sensor.into(),
            send_time: format_date_time(&send_time),
            data_version: data_version.into(),
            data,
        }
    }
}
