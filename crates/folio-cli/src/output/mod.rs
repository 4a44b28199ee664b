use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
///
/// Table output flattens the top-level object into `key | value` rows; nested
/// arrays of objects are rendered as their own tables underneath.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_tables(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_tables(value: &Value) -> anyhow::Result<String> {
    let options = table_options();
    match value {
        Value::Object(map) => {
            let mut scalars = Vec::new();
            let mut sections = Vec::new();
            for (key, value) in map {
                match value {
                    Value::Array(items) if items.is_empty() => {}
                    Value::Array(items) if items.iter().any(Value::is_object) => {
                        sections.push(format!("{key}:\n{}", render_rows(items)));
                    }
                    Value::Object(_) => sections.push(format!("{key}:\n{}", render_tables(value)?)),
                    other => scalars.push(vec![key.clone(), value_to_cell(other)]),
                }
            }

            let mut out = Vec::new();
            if !scalars.is_empty() {
                out.push(table::render_table(&["key", "value"], &scalars, options));
            }
            out.extend(sections);
            Ok(out.join("\n\n"))
        }
        Value::Array(items) => Ok(render_rows(items)),
        scalar => Ok(value_to_cell(scalar)),
    }
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![value_to_cell(item)]).collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, table_options());
    }

    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    table::render_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(value_to_cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
