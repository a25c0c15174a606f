use crate::domain::values::export_row::{ExportRow, EXPORT_HEADER};

/// Quote a field when it holds a delimiter, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn line(fields: &[&str]) -> String {
    fields.iter().map(|f| escape(f)).collect::<Vec<_>>().join(",")
}

/// Header plus one line per row, `\n`-terminated.
pub fn encode(rows: &[ExportRow]) -> String {
    let mut out = line(&EXPORT_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&line(&row.fields()));
        out.push('\n');
    }
    out
}
