//! Table formatting for operation results using tabled
//!
//! - Builder pattern for dynamic schema support
//! - Column set is the union of all document fields, `_id` first
//! - Prices rendered with two decimals, nested values as relaxed JSON
//! - Configurable styles and width limits

use mongodb::bson::{Bson, Document};
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Color, Modify, Style, object::Columns, object::Rows, width::Width},
};

use crate::config::TableStyleName;
use crate::executor::{PlanSummary, ResultData};

/// Maximum width for a single column (characters)
const DEFAULT_MAX_COLUMN_WIDTH: usize = 40;

/// Header of the table rendered for an empty result
const EMPTY_RESULT: &str = "(empty result set)";

/// Table formatter for operation results
pub struct TableFormatter {
    /// Maximum column width
    max_column_width: usize,

    /// Table style
    style: TableStyleName,

    /// Enable colored header row
    use_colors: bool,
}

impl TableFormatter {
    /// Create a new table formatter with default settings
    pub fn new() -> Self {
        Self {
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            style: TableStyleName::Modern,
            use_colors: false,
        }
    }

    /// Enable or disable the colored header row
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the table style
    pub fn with_style(mut self, style: TableStyleName) -> Self {
        self.style = style;
        self
    }

    /// Set maximum column width
    pub fn with_max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    /// Format result data as a table
    ///
    /// # Arguments
    /// * `data` - Result data to format
    ///
    /// # Returns
    /// * `String` - Rendered table
    pub fn format(&self, data: &ResultData) -> String {
        match data {
            ResultData::Documents(docs) => self.format_documents(docs),
            ResultData::Update { matched, modified } => self.build_table(
                vec!["matchedCount".to_string(), "modifiedCount".to_string()],
                vec![vec![matched.to_string(), modified.to_string()]],
            ),
            ResultData::Delete { deleted } => self.build_table(
                vec!["deletedCount".to_string()],
                vec![vec![deleted.to_string()]],
            ),
            ResultData::IndexCreated { name } => {
                self.build_table(vec!["indexName".to_string()], vec![vec![name.clone()]])
            }
            ResultData::Plan(summary) => self.format_plan(summary),
        }
    }

    /// Format documents as a table; no documents gives an empty table
    fn format_documents(&self, docs: &[Document]) -> String {
        if docs.is_empty() {
            return self.build_table(vec![EMPTY_RESULT.to_string()], Vec::new());
        }

        let fields = self.extract_field_names(docs);

        // Documents without fields still get one row each
        if fields.is_empty() {
            let rows = docs
                .iter()
                .map(|doc| vec![cell_text(&Bson::Document(doc.clone()))])
                .collect();
            return self.build_table(vec!["document".to_string()], rows);
        }

        let rows = docs
            .iter()
            .map(|doc| {
                fields
                    .iter()
                    .map(|field| self.format_field_value(doc, field))
                    .collect()
            })
            .collect();

        self.build_table(fields, rows)
    }

    /// Format an explain plan summary as a single row
    fn format_plan(&self, summary: &PlanSummary) -> String {
        let missing = || String::from("none");
        self.build_table(
            vec![
                "stage".to_string(),
                "inputStage".to_string(),
                "indexName".to_string(),
            ],
            vec![vec![
                summary.stage.clone(),
                summary.input_stage.clone().unwrap_or_else(missing),
                summary.index_name.clone().unwrap_or_else(missing),
            ]],
        )
    }

    /// Build and style a table from a header and rows
    fn build_table(&self, header: Vec<String>, rows: Vec<Vec<String>>) -> String {
        let columns = header.len();
        let mut builder = Builder::default();

        builder.push_record(header);
        for row in rows {
            builder.push_record(row);
        }

        let mut table = builder.build();

        self.apply_style(&mut table);

        // Wrap long values instead of truncating them
        for i in 0..columns {
            table.with(Modify::new(Columns::new(i..=i)).with(Width::wrap(self.max_column_width)));
        }

        table.with(Modify::new(Rows::first()).with(Alignment::center()));

        if self.use_colors {
            table.modify(Rows::first(), Color::FG_CYAN | Color::BOLD);
        }

        table.to_string()
    }

    /// Extract all unique field names from documents, with _id first
    fn extract_field_names(&self, docs: &[Document]) -> Vec<String> {
        let mut fields = std::collections::BTreeSet::new();

        for doc in docs {
            for key in doc.keys() {
                fields.insert(key.clone());
            }
        }

        let mut field_vec: Vec<String> = fields.into_iter().collect();

        if let Some(pos) = field_vec.iter().position(|f| f == "_id") {
            field_vec.remove(pos);
            field_vec.insert(0, "_id".to_string());
        }

        field_vec
    }

    /// Format a field value from a document; missing fields are blank
    fn format_field_value(&self, doc: &Document, field: &str) -> String {
        doc.get(field).map(cell_text).unwrap_or_default()
    }

    /// Apply table style
    fn apply_style(&self, table: &mut Table) {
        match self.style {
            TableStyleName::Modern => table.with(Style::modern()),
            TableStyleName::Ascii => table.with(Style::ascii()),
            TableStyleName::Rounded => table.with(Style::rounded()),
            TableStyleName::Markdown => table.with(Style::markdown()),
            TableStyleName::Psql => table.with(Style::psql()),
        };
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one BSON value as cell text
///
/// Integral doubles drop the fraction, other doubles keep full precision.
/// Nested documents and the remaining types render as relaxed extended JSON.
fn cell_text(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(f) if f.fract() == 0.0 && f.abs() < 1e10 => format!("{f:.0}"),
        Bson::Double(f) => f.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null => String::from("null"),
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .unwrap_or_else(|_| dt.timestamp_millis().to_string()),
        Bson::Binary(bin) => format!("0x{}", hex::encode(&bin.bytes)),
        Bson::Array(items) => {
            let items: Vec<String> = items.iter().map(cell_text).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    fn book(title: &str, price: f64) -> Document {
        doc! {
            "title": title,
            "author": "George Orwell",
            "genre": "Fiction",
            "published_year": 1949,
            "price": price,
            "in_stock": true,
        }
    }

    #[test]
    fn test_empty_documents_render_empty_table() {
        let formatter = TableFormatter::new().with_style(TableStyleName::Ascii);
        let result = formatter.format(&ResultData::Documents(vec![]));
        assert!(result.contains(EMPTY_RESULT));
        assert!(result.contains('+'));
        assert_eq!(result.lines().count(), 3);
    }

    #[test]
    fn test_books_table() {
        let formatter = TableFormatter::new();
        let docs = vec![book("1984", 13.99), book("Animal Farm", 8.0)];
        let result = formatter.format(&ResultData::Documents(docs));
        for column in ["title", "author", "genre", "published_year", "price", "in_stock"] {
            assert!(result.contains(column), "missing column {column}");
        }
        assert!(result.contains("13.99"));
        assert!(result.contains("Animal Farm"));
        assert!(result.contains("true"));
    }

    #[test]
    fn test_projection_rows_have_only_projected_columns() {
        let formatter = TableFormatter::new();
        let docs = vec![doc! { "title": "1984", "author": "George Orwell", "price": 13.99 }];
        let fields = formatter.extract_field_names(&docs);
        assert_eq!(fields, vec!["author", "price", "title"]);
    }

    #[test]
    fn test_extract_field_names_with_id() {
        let formatter = TableFormatter::new();
        let docs = vec![
            doc! { "_id": "Fiction", "avgPrice": 12.5 },
            doc! { "_id": "Dystopian", "avgPrice": 10.0, "extra": 1 },
        ];
        let fields = formatter.extract_field_names(&docs);
        assert_eq!(fields[0], "_id");
        assert!(fields.contains(&"extra".to_string()));
    }

    #[test]
    fn test_update_and_delete_tables() {
        let formatter = TableFormatter::new();
        let update = formatter.format(&ResultData::Update {
            matched: 1,
            modified: 0,
        });
        assert!(update.contains("matchedCount"));
        assert!(update.contains("modifiedCount"));

        let delete = formatter.format(&ResultData::Delete { deleted: 0 });
        assert!(delete.contains("deletedCount"));
        assert!(delete.contains('0'));
    }

    #[test]
    fn test_plan_table() {
        let formatter = TableFormatter::new();
        let summary = PlanSummary {
            stage: "COLLSCAN".to_string(),
            input_stage: None,
            index_name: None,
            stages: vec!["COLLSCAN".to_string()],
        };
        let result = formatter.format(&ResultData::Plan(summary));
        assert!(result.contains("COLLSCAN"));
        assert!(result.contains("none"));
    }

    #[test]
    fn test_cell_text() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(cell_text(&Bson::ObjectId(oid)), "507f1f77bcf86cd799439011");
        assert_eq!(cell_text(&Bson::Double(20.0)), "20");
        assert_eq!(cell_text(&Bson::Double(13.99)), "13.99");
        assert_eq!(cell_text(&Bson::Double(12.345678)), "12.345678");
        assert_eq!(cell_text(&Bson::Double(0.004)), "0.004");
        assert_eq!(cell_text(&Bson::Double(13.999)), "13.999");
        assert_eq!(cell_text(&Bson::Int32(1949)), "1949");
        assert_eq!(cell_text(&Bson::Null), "null");
        assert_eq!(
            cell_text(&Bson::Array(vec![Bson::Int32(1), Bson::Int32(2)])),
            "[1, 2]"
        );
        assert_eq!(cell_text(&Bson::Document(doc! { "a": 1 })), r#"{"a":1}"#);
    }

    #[test]
    fn test_fieldless_documents_are_not_empty_result() {
        let formatter = TableFormatter::new().with_style(TableStyleName::Ascii);
        let result = formatter.format(&ResultData::Documents(vec![doc! {}, doc! {}]));
        assert!(!result.contains(EMPTY_RESULT));
        assert_eq!(result.matches("{}").count(), 2);
    }

    #[test]
    fn test_missing_field_is_blank() {
        let formatter = TableFormatter::new();
        assert_eq!(formatter.format_field_value(&doc! { "a": 1 }, "b"), "");
    }

    #[test]
    fn test_long_values_wrap() {
        let formatter = TableFormatter::new().with_max_column_width(10);
        let docs = vec![doc! { "title": "A Very Long Title For A Narrow Column" }];
        let result = formatter.format(&ResultData::Documents(docs));
        assert!(result.lines().count() > 4);
    }

    #[test]
    fn test_with_max_column_width() {
        let formatter = TableFormatter::new().with_max_column_width(20);
        assert_eq!(formatter.max_column_width, 20);
    }
}
