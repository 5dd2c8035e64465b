use logos::Logos;

use crate::table::Field;

/// Tokens of a whitespace-delimited line, such as the GISS `graph.txt` files.
#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Ignore this regex pattern between tokens
pub(crate) enum SpacedToken {
    #[regex(r"-?([0-9]+(\.[0-9]*)?|\.[0-9]+)", priority = 3)]
    Number,
    #[token("***", priority = 3)]
    #[token("---", priority = 3)]
    MissingData,
    #[regex(r"[^ \t\r\n]+")]
    Word,
}

/// Tokens of a comma-delimited line.
#[derive(Logos, Debug, PartialEq)]
pub(crate) enum CsvToken {
    #[token(",")]
    Comma,
    #[regex(r"[ \t]*-?([0-9]+(\.[0-9]*)?|\.[0-9]+)[ \t\r]*", priority = 3)]
    Number,
    #[regex(r"[ \t]*(\*\*\*|---)[ \t\r]*", priority = 3)]
    MissingData,
    #[regex(r#""([^"]|"")*""#)]
    Quoted,
    /// A quote that never closes; kept as text so later cells survive.
    #[token("\"")]
    StrayQuote,
    #[regex(r#"[^,"\n]+"#)]
    Bare,
}

/// Splits a whitespace-delimited line into its raw cell slices.
pub(crate) fn spaced_cells(line: &str) -> Vec<&str> {
    SpacedToken::lexer(line)
        .spanned()
        .map(|(_, span)| &line[span])
        .collect()
}

/// Splits a whitespace-delimited line into typed fields.
pub(crate) fn spaced_fields(line: &str) -> Vec<Field> {
    let mut lexer = SpacedToken::lexer(line);
    let mut fields = Vec::new();
    while let Some(token) = lexer.next() {
        let field = match token {
            Ok(SpacedToken::Number) => number(lexer.slice()),
            Ok(SpacedToken::MissingData) => Field::Missing,
            Ok(SpacedToken::Word) | Err(()) => Field::Text(lexer.slice().to_string()),
        };
        fields.push(field);
    }
    fields
}

/// Splits a comma-delimited line into typed fields. Empty cells become
/// [`Field::Missing`], quoted cells are unquoted and may hold commas.
pub(crate) fn csv_fields(line: &str) -> Vec<Field> {
    let mut lexer = CsvToken::lexer(line);
    let mut fields = Vec::new();
    let mut cell = Cell::default();
    while let Some(token) = lexer.next() {
        match token {
            Ok(CsvToken::Comma) => fields.push(std::mem::take(&mut cell).finish()),
            Ok(CsvToken::Number) => cell.push(number(lexer.slice().trim()), lexer.slice()),
            Ok(CsvToken::MissingData) => cell.push(Field::Missing, lexer.slice()),
            Ok(CsvToken::Quoted) => {
                let slice = lexer.slice();
                let unquoted = slice[1..slice.len() - 1].replace("\"\"", "\"");
                cell.push(Field::Text(unquoted.clone()), &unquoted);
            }
            Ok(CsvToken::StrayQuote) => cell.push(Field::Text(String::from("\"")), "\""),
            Ok(CsvToken::Bare) | Err(()) => {
                let text = lexer.slice().trim();
                let field = if text.is_empty() {
                    Field::Missing
                } else {
                    Field::Text(text.to_string())
                };
                cell.push(field, lexer.slice());
            }
        }
    }
    fields.push(cell.finish());
    fields
}

/// Header cells of a comma-delimited line, unquoted and trimmed.
pub(crate) fn csv_cells(line: &str) -> Vec<String> {
    csv_fields(line)
        .into_iter()
        .map(|field| match field {
            Field::Text(text) => text,
            Field::Number(n) => n.to_string(),
            Field::Missing => String::new(),
        })
        .collect()
}

fn number(slice: &str) -> Field {
    match slice.parse() {
        Ok(n) => Field::Number(n),
        Err(_) => Field::Text(slice.to_string()),
    }
}

/// Accumulates the tokens of one comma-separated cell. A cell made of a
/// single token keeps its classification, anything longer becomes text.
#[derive(Default)]
struct Cell {
    first: Option<Field>,
    raw: String,
    tokens: usize,
}

impl Cell {
    fn push(&mut self, field: Field, raw: &str) {
        if self.tokens == 0 {
            self.first = Some(field);
        }
        self.raw.push_str(raw);
        self.tokens += 1;
    }

    fn finish(self) -> Field {
        match (self.tokens, self.first) {
            (0, _) | (_, None) => Field::Missing,
            (1, Some(field)) => field,
            _ => {
                let text = self.raw.trim();
                if text.is_empty() {
                    Field::Missing
                } else {
                    Field::Text(text.to_string())
                }
            }
        }
    }
}
