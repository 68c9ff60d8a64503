//! Built-in renderers for descriptor records.

use serde_json::{Map, Value};
use value_schema_core::Descriptor;

use crate::{DescribeError, FieldSelection, Renderer};

/// Cell shown for an empty path (the schema root).
const ROOT_CELL: &str = "(root)";

/// Cell shown for an absent code in row-oriented styles.
const EMPTY_CELL: &str = "-";

fn path_cell(record: &Descriptor) -> String {
    if record.path.is_empty() {
        ROOT_CELL.to_string()
    } else {
        record.path.to_string()
    }
}

/// Selected cells of one record, in rendering order.
fn cells(record: &Descriptor, fields: &FieldSelection) -> Vec<String> {
    let mut cells = Vec::new();
    if fields.path {
        cells.push(path_cell(record));
    }
    if fields.condition {
        cells.push(record.condition.clone());
    }
    if fields.message {
        cells.push(record.message.clone());
    }
    if fields.code {
        cells.push(record.code.clone().unwrap_or_else(|| EMPTY_CELL.to_string()));
    }
    cells
}

/// Selected fields of one record as a JSON object; absent codes are omitted.
fn record_value(record: &Descriptor, fields: &FieldSelection) -> Value {
    let mut map = Map::new();
    if fields.path {
        map.insert("path".to_string(), Value::String(path_cell(record)));
    }
    if fields.condition {
        map.insert(
            "condition".to_string(),
            Value::String(record.condition.clone()),
        );
    }
    if fields.message {
        map.insert("message".to_string(), Value::String(record.message.clone()));
    }
    if fields.code {
        if let Some(code) = &record.code {
            map.insert("code".to_string(), Value::String(code.clone()));
        }
    }
    Value::Object(map)
}

/// Delimiter-separated rows, one record per line.
pub struct TextRenderer {
    delimiter: String,
}

impl TextRenderer {
    /// Creates a renderer with a custom cell delimiter.
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(" | ")
    }
}

impl Renderer for TextRenderer {
    fn render(
        &self,
        records: &[Descriptor],
        fields: &FieldSelection,
    ) -> Result<String, DescribeError> {
        let mut out = String::new();
        for record in records {
            out.push_str(&cells(record, fields).join(&self.delimiter));
            out.push('\n');
        }
        Ok(out)
    }
}

/// Width-aligned plain-text columns.
pub struct TableRenderer;

impl Renderer for TableRenderer {
    fn render(
        &self,
        records: &[Descriptor],
        fields: &FieldSelection,
    ) -> Result<String, DescribeError> {
        let rows: Vec<Vec<String>> = records.iter().map(|r| cells(r, fields)).collect();
        let columns = fields.names().len();
        let mut widths = vec![0usize; columns];
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        let mut out = String::new();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i + 1 == row.len() {
                    out.push_str(cell);
                } else {
                    out.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
                }
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// Markdown pipe table with a header row.
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(
        &self,
        records: &[Descriptor],
        fields: &FieldSelection,
    ) -> Result<String, DescribeError> {
        let names = fields.names();
        let mut out = String::new();

        out.push('|');
        for name in &names {
            let mut header = name.to_string();
            if let Some(first) = header.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            out.push_str(&format!(" {header} |"));
        }
        out.push('\n');
        out.push('|');
        for _ in &names {
            out.push_str("---|");
        }
        out.push('\n');

        for record in records {
            out.push('|');
            for cell in cells(record, fields) {
                out.push_str(&format!(" {cell} |"));
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// Pretty-printed JSON array of the selected record fields.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(
        &self,
        records: &[Descriptor],
        fields: &FieldSelection,
    ) -> Result<String, DescribeError> {
        let values: Vec<Value> = records.iter().map(|r| record_value(r, fields)).collect();
        serde_json::to_string_pretty(&values)
            .map_err(|e| DescribeError::RenderFailed(format!("JSON serialization failed: {e}")))
    }
}

/// YAML sequence of the selected record fields.
pub struct YamlRenderer;

impl Renderer for YamlRenderer {
    fn render(
        &self,
        records: &[Descriptor],
        fields: &FieldSelection,
    ) -> Result<String, DescribeError> {
        let values: Vec<Value> = records.iter().map(|r| record_value(r, fields)).collect();
        serde_yaml::to_string(&values)
            .map_err(|e| DescribeError::RenderFailed(format!("YAML serialization failed: {e}")))
    }
}
