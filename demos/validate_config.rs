//! Build a configuration schema, then validate and merge documents against
//! it.
//!
//! Run with: `cargo run --example validate_config`

use serde_json::json;
use value_schema_core::Shape;

fn main() {
    let schema = Shape::object(None)
        .property(
            "host",
            Shape::string(Some("E_HOST"))
                .min(1.0, None)
                .with_default(json!("localhost")),
        )
        .property(
            "port",
            Shape::integer(None)
                .range(1.0, 65535.0, Some("E_PORT"))
                .with_default(json!(8080)),
        )
        .property(
            "log_level",
            Shape::string(None)
                .values(
                    vec![json!("debug"), json!("info"), json!("warn"), json!("error")],
                    None,
                )
                .with_default(json!("info")),
        )
        .property(
            "replicas",
            Shape::array(Shape::string(None).min(1.0, None), None).optional(),
        );

    // A partial document picks up defaults for everything it omits.
    let config = schema
        .create_from_defaults(&json!({"port": 9090}))
        .expect("defaults plus a valid override must validate");
    println!("merged configuration:\n{}\n", serde_json::to_string_pretty(&config).unwrap());

    // An update merges over the existing value and is re-validated.
    let mut config = config;
    schema
        .merge_into(&mut config, &json!({"replicas": ["api-1", "api-2"]}))
        .expect("replica list is valid");
    println!("after update:\n{}\n", serde_json::to_string_pretty(&config).unwrap());

    // Failures name the exact nested field and carry the declared code.
    let bad = json!({"host": "db1", "port": 80, "replicas": ["api-1", ""]});
    match schema.validate(&bad) {
        Ok(()) => println!("unexpectedly valid"),
        Err(err) => println!(
            "rejected: {} (path: {}, code: {:?})",
            err.message(),
            err.path(),
            err.code()
        ),
    }
}
