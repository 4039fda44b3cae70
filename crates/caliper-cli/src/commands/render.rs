use crate::support::{emit_json_or_exit, parse_kind_or_exit, read_json_or_exit};
use caliper_kernel::Node;
use std::path::PathBuf;

pub fn run(
    kind: Option<String>,
    config: Option<String>,
    document: Option<String>,
    json_output: bool,
) {
    let node = match (kind, config, document) {
        (Some(kind), Some(config), None) => {
            let kind = parse_kind_or_exit(&kind);
            let path = PathBuf::from(config);
            Node::from_config(kind, &read_json_or_exit(&path))
        }
        (None, None, Some(document)) => {
            let path = PathBuf::from(document);
            Node::from_document(&read_json_or_exit(&path))
        }
        _ => {
            eprintln!("error: pass either --kind with --config, or --document");
            std::process::exit(1);
        }
    }
    .unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let rendered = node.to_document().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    tracing::debug!(kind = %node.kind(), "rendered document");

    if json_output {
        emit_json_or_exit(&rendered, false);
    } else {
        let schema = caliper_kernel::schema(node.kind());
        println!(
            "caliper render\n  Kind: {} ({}, {})",
            node.kind(),
            schema.class.as_str(),
            schema.profile.as_str()
        );
        emit_json_or_exit(&rendered, true);
    }
}
