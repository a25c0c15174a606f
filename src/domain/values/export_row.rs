use serde::Serialize;

pub const EXPORT_HEADER: [&str; 4] = ["ID", "Category", "Status", "Date"];

/// One flat export row: (identifier, category, status, formatted date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow(pub String, pub String, pub String, pub String);

impl ExportRow {
    pub fn fields(&self) -> [&str; 4] {
        [&self.0, &self.1, &self.2, &self.3]
    }
}
