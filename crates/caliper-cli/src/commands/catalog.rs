use crate::support::emit_json_or_exit;
use caliper_kernel::{Capability, Kind, catalog_json, registry, schema};

pub fn run(json_output: bool) {
    if json_output {
        emit_json_or_exit(&catalog_json(), true);
        return;
    }

    println!("caliper catalog\n  Kinds: {}", Kind::ALL.len());
    for kind in Kind::ALL {
        let resolved = schema(*kind);
        let required: Vec<&str> = resolved.required().map(|decl| decl.name).collect();
        let capabilities: Vec<&str> = registry()
            .capabilities(*kind)
            .into_iter()
            .map(Capability::as_str)
            .collect();
        println!(
            "  {:<28} {:<9} {:<20} properties: {:<3} required: [{}] capabilities: [{}]",
            kind.as_str(),
            resolved.class.as_str(),
            resolved.profile.as_str(),
            resolved.properties.len(),
            required.join(", "),
            capabilities.join(", ")
        );
    }
}
