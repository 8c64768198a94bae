use ratatui::{layout::*, style::*, widgets::*};
use serde_json::{json, Value};

/// Turn a response into table rows: array elements, object entries as
/// key/value pairs, or a scalar on its own.
pub fn rows_of(data: Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items,
        Value::Object(entries) => entries
            .into_iter()
            .map(|(key, value)| json!({ "key": key, "value": value }))
            .collect(),
        Value::Null => Vec::new(),
        scalar => vec![scalar],
    }
}

/// Column names, taken from the first row when it is an object.
pub fn columns(first: Option<&Value>) -> Vec<String> {
    match first {
        Some(Value::Object(entries)) if !entries.is_empty() => entries.keys().cloned().collect(),
        _ => vec![String::from("value")],
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn make_row<'a>(row: &Value, columns: &[String]) -> Row<'a> {
    let cells: Vec<String> = match row {
        Value::Object(entries) => columns.iter().map(|c| cell(entries.get(c))).collect(),
        other => vec![cell(Some(other))],
    };
    Row::new(cells)
}

pub fn render_table<'a>(rows: &[&Value], title: String) -> Table<'a> {
    let selected_style = Style::default().add_modifier(Modifier::REVERSED);
    let columns = columns(rows.first().copied());

    let header_cells = columns
        .iter()
        .map(|h| Cell::from(h.clone()).style(Style::default().add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let widths = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
    let rows: Vec<Row> = rows.iter().map(|row| make_row(row, &columns)).collect();

    Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(selected_style)
        .highlight_symbol(">> ")
}
