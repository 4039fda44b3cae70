use caliper_kernel::Kind;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn parse_kind_or_exit(kind: &str) -> Kind {
    kind.parse().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn read_to_string_or_exit(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {}: {e}", path.display());
        std::process::exit(1);
    })
}

pub fn read_json_or_exit(path: &Path) -> Value {
    let content = read_to_string_or_exit(path);
    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("error: failed to parse {}: {e}", path.display());
        std::process::exit(1);
    })
}

pub fn emit_json_or_exit(payload: &Value, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(payload)
    } else {
        serde_json::to_string(payload)
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: failed to render JSON output: {e}");
            std::process::exit(1);
        }
    }
}
