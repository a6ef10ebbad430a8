//! Plain-text rendering.

use vet_console_core::models::{FieldKind, ResourceSchema};
use vet_console_core::notify::{Notification, NotificationLevel};
use vet_console_core::Row;

/// Left-aligned table with a header rule. Widths count characters.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.iter().copied(), &widths));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        out.push(line(row.iter().map(|c| c.as_str()), &widths));
    }
    out.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Rows of a screen, one column per stored field.
pub fn rows_table(schema: &ResourceSchema, rows: &[Row]) -> String {
    let fields = schema.stored_fields();
    let mut headers = vec!["documentId"];
    headers.extend(fields.iter().copied());

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.document_id.clone().unwrap_or_default()];
            cells.extend(fields.iter().map(|f| row.get(f).unwrap_or("").to_string()));
            cells
        })
        .collect();
    table(&headers, &cells)
}

pub fn describe_schema(schema: &ResourceSchema) -> String {
    let fields: Vec<Vec<String>> = schema
        .fields
        .iter()
        .map(|f| {
            vec![
                f.name.to_string(),
                f.label.to_string(),
                kind_name(&f.kind),
                if f.required { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    let filters: Vec<Vec<String>> = schema
        .filters
        .iter()
        .map(|f| vec![f.key.to_string(), f.field.to_string(), format!("{:?}", f.mode)])
        .collect();
    let columns: Vec<Vec<String>> = schema
        .sort_columns
        .iter()
        .map(|c| vec![c.key.to_string(), c.fields.join(" + ")])
        .collect();

    format!(
        "Form fields\n{}\n\nFilters\n{}\n\nSort columns\n{}",
        table(&["field", "label", "kind", "required"], &fields),
        table(&["key", "field", "match"], &filters),
        table(&["column", "fields"], &columns),
    )
}

fn kind_name(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Text => "text".into(),
        FieldKind::LongText => "long text".into(),
        FieldKind::Email => "email".into(),
        FieldKind::Number => "number".into(),
        FieldKind::Choice(options) => format!("one of {}", options.join("/")),
        FieldKind::Date => "date".into(),
        FieldKind::DateTime {
            minute_step: Some(step),
            ..
        } => format!("date time ({} min slots)", step),
        FieldKind::DateTime { .. } => "date time".into(),
    }
}

pub fn notification(n: &Notification) -> String {
    match n.level {
        NotificationLevel::Success => format!("ok: {}", n.message),
        NotificationLevel::Error => format!("error: {}", n.message),
    }
}
