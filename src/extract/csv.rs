//! Minimal CSV record reader
//!
//! Comma separated, `"` quoting with `""` escapes, quoted fields may span
//! lines. Line endings `\n` and `\r\n`.

use std::io::{self, BufRead};

/// Reads CSV records one at a time
pub struct CsvReader<R> {
    inner: R,
    line: usize,
}

/// A failure while splitting records
#[derive(Debug)]
pub enum CsvError {
    Io(io::Error),
    /// Input ended inside a quoted field that began on `line`
    UnterminatedQuote { line: usize },
}

impl<R: BufRead> CsvReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, line: 0 }
    }

    /// Physical line number of the last line consumed
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the next record, or `None` at end of input.
    ///
    /// Blank lines are skipped.
    pub fn next_record(&mut self) -> Result<Option<Vec<String>>, CsvError> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            if !buf.is_empty() {
                break;
            }
        }

        let start_line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        loop {
            let mut chars = buf.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '"' if in_quotes => {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            field.push('"');
                        } else {
                            in_quotes = false;
                        }
                    }
                    '"' if field.is_empty() => in_quotes = true,
                    ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
                    c => field.push(c),
                }
            }

            if !in_quotes {
                break;
            }

            field.push('\n');
            buf.clear();
            if self.read_line(&mut buf)? == 0 {
                return Err(CsvError::UnterminatedQuote { line: start_line });
            }
        }

        fields.push(field);
        Ok(Some(fields))
    }

    /// Reads one physical line without its terminator
    fn read_line(&mut self, buf: &mut String) -> Result<usize, CsvError> {
        let n = self.inner.read_line(buf).map_err(CsvError::Io)?;
        if n > 0 {
            self.line += 1;
            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }
        }
        Ok(n)
    }
}
