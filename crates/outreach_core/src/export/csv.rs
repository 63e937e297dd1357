//! Minimal CSV encoding helpers.
//!
//! # Responsibility
//! - Quote and join values into RFC 4180 compatible lines.
//!
//! # Invariants
//! - A field is quoted iff it contains a comma, quote, CR or LF.
//! - Embedded quotes are doubled inside quoted fields.

/// Encodes a single CSV field, quoting only when required.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Joins fields into one CSV line, without the trailing newline.
pub fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Joins a header and rows into a full document with `\n` line endings.
pub fn csv_document(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&csv_line(
        &header.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
    ));
    out.push('\n');
    for row in rows {
        out.push_str(&csv_line(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{csv_document, csv_field, csv_line};

    #[test]
    fn plain_fields_stay_unquoted() {
        assert_eq!(csv_field("Riverside Academy"), "Riverside Academy");
        assert_eq!(csv_field(""), "");
    }

    #[test]
    fn special_characters_force_quoting() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn line_and_document_composition() {
        let line = csv_line(&["a".to_string(), "b,c".to_string()]);
        assert_eq!(line, "a,\"b,c\"");

        let doc = csv_document(&["x", "y"], &[vec!["1".to_string(), "2".to_string()]]);
        assert_eq!(doc, "x,y\n1,2\n");
    }
}
