use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One visible row of the agreements sheet, cells kept as raw text.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line in the source sheet (the header is line 1).
    pub line: usize,
    pub headers: Arc<[String]>,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: usize, headers: Arc<[String]>, cells: Vec<String>) -> Self {
        RawRow { line, headers, cells }
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// `None` when the column is not in the schema, `Some(None)` when the cell
    /// is blank, `Some(Some(text))` otherwise.
    pub fn cell(&self, name: &str) -> Option<Option<&str>> {
        self.column_index(name).map(|idx| self.cell_at(idx))
    }

    pub fn cell_at(&self, idx: usize) -> Option<&str> {
        self.cells
            .get(idx)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Arc<[String]>,
    pub rows: Vec<RawRow>,
}

impl Dataset {
    pub fn new(headers: Vec<String>) -> Self {
        Dataset {
            headers: headers.into(),
            rows: Vec::new(),
        }
    }

    /// Builds a row sharing this dataset's header.
    pub fn row(&self, line: usize, cells: Vec<String>) -> RawRow {
        RawRow::new(line, self.headers.clone(), cells)
    }

    pub fn push(&mut self, row: RawRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A number as the templates print it: `10` rather than `10.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Decimal(f64),
}

/// One row of the services table in the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub number: usize,
    pub discipline: String,
    pub group_number: String,
    pub services: String,
    pub hours: Number,
    pub hour_price: Number,
    pub total_for_service: Number,
}

/// Full template context for one contractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorRecord {
    pub long_executor_name: String,
    pub short_executor_name: String,
    pub power_of_attorney: String,
    pub text_before_table: String,
    pub start_date: String,
    pub ending_date: String,
    pub agreement_ending_date: String,
    pub executor_address: String,
    pub total_hours: Number,
    pub total: Number,
    pub total_words: String,
    pub this_year: i32,
    pub next_year: i32,
    pub program_codes: String,
    pub money_this_year: i64,
    pub money_this_year_words: String,
    // Absent means "not applicable" to the templates, never zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money_next_year: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money_next_year_words: Option<String>,
    pub tbl_contents: Vec<LineItem>,
    pub learning_form: String,
    pub all_disciplines: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(headers: &[&str], cells: &[&str]) -> RawRow {
        let headers: Arc<[String]> = headers.iter().map(|h| h.to_string()).collect();
        RawRow::new(2, headers, cells.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_cell_distinguishes_absent_column_from_blank_cell() {
        let r = row(&["a", "b"], &["  x ", "   "]);
        assert_eq!(r.cell("a"), Some(Some("x")));
        assert_eq!(r.cell("b"), Some(None));
        assert_eq!(r.cell("c"), None);
    }

    #[test]
    fn test_is_blank_ignores_whitespace() {
        assert!(row(&["a", "b"], &[" ", ""]).is_blank());
        assert!(!row(&["a", "b"], &[" ", "x"]).is_blank());
    }

    #[test]
    fn test_short_record_reads_as_blank() {
        let r = row(&["a", "b"], &["x"]);
        assert_eq!(r.cell("b"), Some(None));
    }

    #[test]
    fn test_number_serializes_without_trailing_zero_for_integers() {
        assert_eq!(serde_json::to_string(&Number::Integer(10)).unwrap(), "10");
        assert_eq!(serde_json::to_string(&Number::Decimal(10.3)).unwrap(), "10.3");
        assert_eq!(serde_json::to_string(&Number::Decimal(10.0)).unwrap(), "10.0");
    }

    #[test]
    fn test_money_next_year_is_omitted_when_absent() {
        let record = ContractorRecord {
            long_executor_name: "Иванов Иван Иванович".into(),
            short_executor_name: "Иванов И.И.".into(),
            power_of_attorney: String::new(),
            text_before_table: String::new(),
            start_date: "«1» февраля 2021".into(),
            ending_date: "«30» июня 2021".into(),
            agreement_ending_date: "«31» июля 2021".into(),
            executor_address: String::new(),
            total_hours: Number::Integer(10),
            total: Number::Integer(5000),
            total_words: "пять тысяч".into(),
            this_year: 2021,
            next_year: 2022,
            program_codes: String::new(),
            money_this_year: 0,
            money_this_year_words: "ноль".into(),
            money_next_year: None,
            money_next_year_words: None,
            tbl_contents: Vec::new(),
            learning_form: String::new(),
            all_disciplines: String::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("money_next_year").is_none());
        assert!(json.get("money_next_year_words").is_none());
        assert_eq!(json["money_this_year"], 0);
    }
}
