//! CSV codec: uploaded conversation rows in, trigger cards out.

use csv::{ReaderBuilder, Trim, WriterBuilder};

use super::model::{InputRow, TriggerCard};
use crate::error::ClassifyError;

/// Column holding the customer's text.
pub const CONTENT_COLUMN: &str = "content";

/// Header row of the card export.
pub const CARD_HEADERS: [&str; 6] = [
    "Name",
    "Language",
    "Description",
    "Rep Response",
    "Trigger Phrase",
    "Customer Quote",
];

/// Parse a comma-separated table with a header row.
///
/// Rows shorter than the header are padded with absent cells; rows longer
/// than the header are rejected. A table without a `content` column parses
/// fine and simply has no content.
pub fn parse_rows(body: &str) -> Result<Vec<InputRow>, ClassifyError> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(ClassifyError::Parse("No columns to parse from input".into()));
    }
    let content_idx = headers.iter().position(|h| h == CONTENT_COLUMN);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(ClassifyError::Parse(format!(
                "Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            )));
        }
        if record.iter().all(str::is_empty) {
            continue;
        }

        let content = content_idx
            .and_then(|idx| record.get(idx))
            .filter(|cell| !cell.is_empty())
            .map(str::to_string);
        rows.push(InputRow { content });
    }

    Ok(rows)
}

/// Render cards as a CSV document with a header row.
pub fn write_cards(cards: &[TriggerCard]) -> Result<String, ClassifyError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    let write_err = |e: csv::Error| ClassifyError::Internal(e.to_string());
    writer.write_record(CARD_HEADERS).map_err(write_err)?;
    for card in cards {
        writer
            .write_record([
                &card.name,
                &card.language,
                &card.description,
                &card.rep_response,
                &card.trigger_phrase,
                &card.customer_quote,
            ])
            .map_err(write_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ClassifyError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ClassifyError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triggers::model::Language;

    #[test]
    fn reads_content_column() {
        let rows = parse_rows("speaker,content\nAlice,What's the price?\nBob,Sounds good\n").unwrap();
        assert_eq!(
            rows,
            vec![
                InputRow::new("What's the price?"),
                InputRow::new("Sounds good"),
            ]
        );
    }

    #[test]
    fn quoted_cells_keep_commas_and_newlines() {
        let rows = parse_rows("content\n\"Well, the price\nis high\"\n").unwrap();
        assert_eq!(rows, vec![InputRow::new("Well, the price\nis high")]);
    }

    #[test]
    fn header_whitespace_and_bom_are_ignored() {
        let rows = parse_rows("\u{feff}id , content \n1,hello\n").unwrap();
        assert_eq!(rows, vec![InputRow::new("hello")]);
    }

    #[test]
    fn missing_content_column_gives_empty_rows() {
        let rows = parse_rows("speaker,text\nAlice,price\n").unwrap();
        assert_eq!(rows, vec![InputRow::empty()]);
    }

    #[test]
    fn short_rows_and_empty_cells_are_absent_content() {
        let rows = parse_rows("id,content\n1\n2,\n").unwrap();
        assert_eq!(rows, vec![InputRow::empty(), InputRow::empty()]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_rows("content\nfirst\n\nsecond\n").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn empty_body_is_a_parse_error() {
        let err = parse_rows("").unwrap_err();
        assert!(matches!(err, ClassifyError::Parse(_)));
        assert!(err.to_string().contains("No columns"));
    }

    #[test]
    fn overlong_row_is_a_parse_error() {
        let err = parse_rows("id,content\n1,hello,extra\n").unwrap_err();
        match err {
            ClassifyError::Parse(msg) => assert!(msg.contains("Expected 2 fields"), "{msg}"),
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn overlong_row_of_empty_cells_is_a_parse_error() {
        let err = parse_rows("id,content\n1,hello\n,,,,\n").unwrap_err();
        match err {
            ClassifyError::Parse(msg) => {
                assert!(msg.contains("Expected 2 fields in line 3, saw 5"), "{msg}")
            }
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_via_csv_error_maps_to_parse() {
        let err: ClassifyError = csv::Reader::from_reader(&b"content\n\xff\xfe\n"[..])
            .records()
            .find_map(Result::err)
            .map(Into::into)
            .unwrap();
        assert!(matches!(err, ClassifyError::Parse(_)));
    }

    #[test]
    fn export_has_header_and_quotes_fields() {
        let card = TriggerCard::new(
            "Cost/Price",
            "price",
            "Budget, please?",
            Language::English,
            "The price, honestly",
        );
        let out = write_cards(&[card]).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Language,Description,Rep Response,Trigger Phrase,Customer Quote")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Cost/Price Trigger,English,"));
        assert!(row.contains("\"Budget, please?\""));
        assert!(row.ends_with("\"The price, honestly\""));
    }

    #[test]
    fn export_of_no_cards_is_header_only() {
        let out = write_cards(&[]).unwrap();
        assert_eq!(out.trim_end(), CARD_HEADERS.join(","));
    }
}
