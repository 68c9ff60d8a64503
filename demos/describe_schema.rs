//! Walk a schema into descriptor records and render them in several styles.
//!
//! Run with: `cargo run --example describe_schema`

use serde_json::json;
use value_schema_core::{DescribeOptions, Shape};
use value_schema_describe::{Describer, FieldSelection};

fn main() {
    let schema = Shape::object(None)
        .property("name", Shape::string(Some("E_NAME")).length(1.0, 64.0, None))
        .property(
            "port",
            Shape::integer(None).range(1.0, 65535.0, Some("E_PORT")),
        )
        .property(
            "mode",
            Shape::string(None).values(vec![json!("plain"), json!("tls")], None),
        )
        .property(
            "annotations",
            Shape::object(None)
                .dictionary(Shape::string(None).regexp("^[a-z_]+$", None), Shape::any())
                .optional(),
        );

    let describer = Describer::default();

    for style in ["table", "markdown"] {
        let rendered = describer
            .describe(
                &schema,
                style,
                &FieldSelection::all(),
                &DescribeOptions::default(),
            )
            .expect("built-in style");
        println!("--- {style} ---\n{rendered}");
    }

    // Only coded constraints, without the message column.
    let fields = FieldSelection {
        path: true,
        condition: true,
        message: false,
        code: true,
    };
    let options = DescribeOptions {
        filter: Some(Box::new(|r| r.code.is_some())),
        transform: None,
    };
    let coded = describer
        .describe(&schema, "text", &fields, &options)
        .expect("built-in style");
    println!("--- coded constraints ---\n{coded}");
}
