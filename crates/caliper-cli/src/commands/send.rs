use crate::support::{emit_json_or_exit, read_to_string_or_exit};
use caliper_kernel::Node;
use caliper_sensor::{MemoryClient, SendReport, Sensor, SensorConfig};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;

pub const DRY_RUN_CLIENT: &str = "dry-run";

pub struct Args {
    pub options: Option<String>,
    pub input: String,
    pub host: Option<String>,
    pub api_key: Option<String>,
    pub dry_run: bool,
    pub json: bool,
}

pub fn run(args: Args) {
    let mut config = match &args.options {
        Some(path) => SensorConfig::load(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        }),
        None => SensorConfig::default(),
    };
    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(api_key) = args.api_key {
        config.http.api_key = Some(api_key);
    }
    if let Err(e) = config.http.validate() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let documents = read_documents_or_exit(Path::new(&args.input));
    tracing::info!(documents = documents.len(), input = %args.input, "loaded batch");

    let sensor = if args.dry_run {
        let mut sensor =
            Sensor::new(&config.sensor.id).with_data_version(&config.http.data_version);
        sensor.register_client(DRY_RUN_CLIENT, Arc::new(MemoryClient::new()));
        sensor
    } else {
        Sensor::from_config(&config).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        })
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        });
    let report = runtime
        .block_on(sensor.send_documents(documents))
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        });

    if args.json {
        emit_json_or_exit(&report_payload(&sensor, &report, args.dry_run), true);
    } else {
        println!(
            "caliper send\n  Sensor: {}\n  Documents: {}",
            sensor.id(),
            report.envelope.data.len()
        );
        for (name, outcome) in &report.outcomes {
            match outcome {
                Ok(delivery) => println!("  {name}: delivered ({})", delivery.status),
                Err(e) => println!("  {name}: failed ({e})"),
            }
        }
        if args.dry_run {
            match serde_json::to_value(&report.envelope) {
                Ok(envelope) => emit_json_or_exit(&envelope, true),
                Err(e) => {
                    eprintln!("error: failed to render envelope: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    if !report.all_succeeded() {
        std::process::exit(1);
    }
}

/// Read one document per non-blank line and render each canonically.
fn read_documents_or_exit(path: &Path) -> Vec<Value> {
    let content = read_to_string_or_exit(path);
    let mut documents = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let rendered = serde_json::from_str::<Value>(line)
            .map_err(|e| e.to_string())
            .and_then(|raw| Node::from_document(&raw).map_err(|e| e.to_string()))
            .and_then(|node| node.to_document().map_err(|e| e.to_string()));
        match rendered {
            Ok(document) => documents.push(document),
            Err(e) => {
                eprintln!("error: {}:{}: {e}", path.display(), index + 1);
                std::process::exit(1);
            }
        }
    }
    documents
}

fn report_payload(sensor: &Sensor, report: &SendReport, dry_run: bool) -> Value {
    let outcomes: serde_json::Map<String, Value> = report
        .outcomes
        .iter()
        .map(|(name, outcome)| {
            let value = match outcome {
                Ok(delivery) => json!({"ok": true, "status": delivery.status}),
                Err(e) => json!({"ok": false, "error": e.to_string()}),
            };
            (name.clone(), value)
        })
        .collect();
    let mut payload = json!({
        "action": "send",
        "sensor": sensor.id(),
        "dryRun": dry_run,
        "documents": report.envelope.data.len(),
        "outcomes": outcomes,
        "statistics": sensor.statistics(),
    });
    if dry_run {
        payload["envelope"] = serde_json::to_value(&report.envelope).unwrap_or(Value::Null);
    }
    payload
}
