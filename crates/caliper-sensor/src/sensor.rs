//! The sensor: wraps documents in envelopes and fans them out to clients.

use crate::client::{Client, Delivery, HttpClient};
use crate::envelope::Envelope;
use crate::error::{Result, SensorError};
use crate::options::SensorConfig;
use caliper_kernel::{DEFAULT_CONTEXT, Entity, Event};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Name under which [`Sensor::from_config`] registers its HTTP client.
pub const DEFAULT_CLIENT: &str = "default";

/// Delivery counters for one client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub sent: u64,
    pub successful: u64,
    pub failed: u64,
}

/// What happened to one envelope.
#[derive(Debug)]
pub struct SendReport {
    pub envelope: Envelope,
    pub outcomes: BTreeMap<String, Result<Delivery>>,
}

impl SendReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.values().all(|outcome| outcome.is_ok())
    }

    /// Client names paired with their failure.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &SensorError)> {
        self.outcomes
            .iter()
            .filter_map(|(name, outcome)| outcome.as_ref().err().map(|e| (name.as_str(), e)))
    }
}

pub struct Sensor {
    id: String,
    data_version: String,
    clients: BTreeMap<String, Arc<dyn Client>>,
    stats: Mutex<BTreeMap<String, Statistics>>,
}

impl Sensor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data_version: DEFAULT_CONTEXT.to_string(),
            clients: BTreeMap::new(),
            stats: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn with_data_version(mut self, data_version: impl Into<String>) -> Self {
        self.data_version = data_version.into();
        self
    }

    /// A sensor with one [`HttpClient`] registered as [`DEFAULT_CLIENT`].
    pub fn from_config(config: &SensorConfig) -> Result<Self> {
        let client = HttpClient::new(config.http.clone())?;
        let mut sensor =
            Self::new(&config.sensor.id).with_data_version(&config.http.data_version);
        sensor.register_client(DEFAULT_CLIENT, Arc::new(client));
        Ok(sensor)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data_version(&self) -> &str {
        &self.data_version
    }

    /// Register `client` under `name`, replacing any client of that name.
    /// Statistics for the name start from zero.
    pub fn register_client(&mut self, name: impl Into<String>, client: Arc<dyn Client>) {
        let name = name.into();
        self.stats_mut().insert(name.clone(), Statistics::default());
        self.clients.insert(name, client);
    }

    pub fn unregister_client(&mut self, name: &str) -> Option<Arc<dyn Client>> {
        self.stats_mut().remove(name);
        self.clients.remove(name)
    }

    pub fn client_names(&self) -> impl Iterator<Item = &str> {
        self.clients.keys().map(String::as_str)
    }

    pub fn envelope(&self, data: Vec<Value>) -> Envelope {
        Envelope::new(&self.id, &self.data_version, data)
    }

    /// Serialize and deliver a batch of events.
    pub async fn send(&self, events: &[Event]) -> Result<SendReport> {
        let data = events
            .iter()
            .map(Event::to_document)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.send_documents(data).await
    }

    /// Serialize and deliver a batch of entity descriptions.
    pub async fn describe(&self, entities: &[Entity]) -> Result<SendReport> {
        let data = entities
            .iter()
            .map(Entity::to_document)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.send_documents(data).await
    }

    /// Deliver already rendered documents. Each registered client receives
    /// the same envelope once, in name order.
    pub async fn send_documents(&self, data: Vec<Value>) -> Result<SendReport> {
        if self.clients.is_empty() {
            return Err(SensorError::NoClients(self.id.clone()));
        }
        let envelope = self.envelope(data);
        tracing::debug!(
            sensor = %self.id,
            documents = envelope.data.len(),
            clients = self.clients.len(),
            "sending envelope"
        );

        let mut outcomes = BTreeMap::new();
        for (name, client) in &self.clients {
            let outcome = client.send(&envelope).await;
            if let Err(e) = &outcome {
                tracing::warn!(sensor = %self.id, client = %name, error = %e, "delivery failed");
            }
            self.record(name, outcome.is_ok());
            outcomes.insert(name.clone(), outcome);
        }
        Ok(SendReport { envelope, outcomes })
    }

    /// Counters per registered client.
    pub fn statistics(&self) -> BTreeMap<String, Statistics> {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, name: &str, succeeded: bool) {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = stats.entry(name.to_string()).or_default();
        entry.sent += 1;
        if succeeded {
            entry.successful += 1;
        } else {
            entry.failed += 1;
        }
    }

    fn stats_mut(&mut self) -> &mut BTreeMap<String, Statistics> {
        self.stats.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sensor")
            .field("id", &self.id)
            .field("data_version", &self.data_version)
            .field("clients", &self.clients.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryClient;
    use caliper_kernel::Kind;

    fn person(id: &str) -> Entity {
        Entity::builder(Kind::Person)
            .id(id)
            .build()
            .expect("person builds")
    }

    fn session_event() -> Event {
        Event::builder(Kind::SessionEvent)
            .id("urn:uuid:fcd495d0-3740-4298-9bec-1154571dc211")
            .actor(person("person:1"))
            .action("LoggedIn")
            .object(
                Entity::builder(Kind::SoftwareApplication)
                    .id("app:1")
                    .build()
                    .expect("app builds"),
            )
            .event_time("2016-11-15T10:15:00.000Z")
            .build()
            .expect("session event builds")
    }

    #[tokio::test]
    async fn events_reach_every_client_inside_one_envelope() {
        let first = Arc::new(MemoryClient::new());
        let second = Arc::new(MemoryClient::new());
        let mut sensor = Sensor::new("sensor:1");
        sensor.register_client("first", first.clone());
        sensor.register_client("second", second.clone());

        let report = sensor.send(&[session_event()]).await.expect("sends");
        assert!(report.all_succeeded());
        assert_eq!(first.envelopes(), second.envelopes());

        let envelopes = first.envelopes();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].sensor, "sensor:1");
        assert_eq!(envelopes[0].data_version, DEFAULT_CONTEXT);
        assert_eq!(envelopes[0].data[0]["actor"]["id"], "person:1");
    }

    #[tokio::test]
    async fn failures_are_counted_per_client() {
        let mut sensor = Sensor::new("sensor:1");
        sensor.register_client("ok", Arc::new(MemoryClient::new()));
        sensor.register_client("down", Arc::new(MemoryClient::new().with_failure(500)));

        let report = sensor.describe(&[person("person:1")]).await.expect("sends");
        assert!(!report.all_succeeded());
        let failed: Vec<&str> = report.failures().map(|(name, _)| name).collect();
        assert_eq!(failed, ["down"]);

        sensor.describe(&[person("person:2")]).await.expect("sends");
        let stats = sensor.statistics();
        assert_eq!(
            stats["ok"],
            Statistics {
                sent: 2,
                successful: 2,
                failed: 0
            }
        );
        assert_eq!(
            stats["down"],
            Statistics {
                sent: 2,
                successful: 0,
                failed: 2
            }
        );
    }

    #[tokio::test]
    async fn a_sensor_without_clients_refuses_to_send() {
        let mut sensor = Sensor::new("sensor:1");
        sensor.register_client("memory", Arc::new(MemoryClient::new()));
        assert!(sensor.unregister_client("memory").is_some());
        assert_eq!(sensor.client_names().count(), 0);
        assert!(sensor.statistics().is_empty());

        let err = sensor
            .send_documents(Vec::new())
            .await
            .expect_err("no clients");
        assert!(matches!(err, SensorError::NoClients(id) if id == "sensor:1"));
    }

    #[test]
    fn configured_sensors_carry_an_http_client() {
        let config = SensorConfig::from_toml_str(
            "[sensor]\nid = \"sensor:9\"\n[http]\ndata_version = \"ctx:custom\"",
        )
        .expect("valid options");
        let sensor = Sensor::from_config(&config).expect("sensor builds");
        assert_eq!(sensor.id(), "sensor:9");
        assert_eq!(sensor.data_version(), "ctx:custom");
        assert_eq!(sensor.client_names().collect::<Vec<_>>(), [DEFAULT_CLIENT]);
    }
}
