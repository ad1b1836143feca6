//! Reader for the WKT subset accepted as input.
//!
//! # Supported format
//! ```text
//! POLYGON((x y, x y, ...), (x y, ...), ...)
//! GEOMETRYCOLLECTION(POLYGON(...), MULTILINESTRING((x y, ...), ...))
//! ```
//! Keywords are case-insensitive and whitespace (including newlines) is
//! free. The `MULTILINESTRING` member is optional. Anything but whitespace
//! after the geometry is an error.
//!
//! # Errors
//! Failures are reported as [`MeshError::Parse`] carrying the 1-based line
//! and column of the offending character, what was expected there, and the
//! text of that line.

use crate::geometry::Point;
use crate::io::GeometryInput;
use crate::mesh_error::MeshError;

/// Parses `text` into rings and line-strings.
pub fn parse_wkt(text: &str) -> Result<GeometryInput, MeshError> {
    let mut reader = WktReader::new(text);
    let input = reader.input()?;
    reader.skip_whitespace();
    if !reader.at_end() {
        return Err(reader.error("end of input"));
    }
    Ok(input)
}

struct WktReader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> WktReader<'a> {
    fn new(text: &'a str) -> Self {
        WktReader { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.rest().chars().next()
    }

    /// Builds a parse error located at the current position.
    fn error(&self, expected: &str) -> MeshError {
        let consumed = &self.text[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
        let column = self.text[line_start..self.pos].chars().count() + 1;
        let source_line = self.text[line_start..]
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        MeshError::Parse {
            line,
            column,
            expected: expected.to_string(),
            source_line,
        }
    }

    fn expect_char(&mut self, c: char) -> Result<(), MeshError> {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            Ok(())
        } else {
            Err(self.error(&format!("'{c}'")))
        }
    }

    /// Consumes `keyword` (case-insensitive) if it is next, as a whole word.
    fn keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let rest = self.rest();
        let Some(head) = rest.get(..keyword.len()) else {
            return false;
        };
        let boundary = rest[keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '_');
        if head.eq_ignore_ascii_case(keyword) && boundary {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<f64, MeshError> {
        self.skip_whitespace();
        let bytes = self.rest().as_bytes();
        let mut end = 0;
        let digits = |from: usize| {
            bytes[from..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
        };
        if matches!(bytes.first(), Some(b'+' | b'-')) {
            end += 1;
        }
        let int_digits = digits(end);
        end += int_digits;
        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = digits(end + 1);
            end += 1 + frac_digits;
        }
        if int_digits + frac_digits == 0 {
            return Err(self.error("number"));
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits = digits(exp_end);
            if exp_digits > 0 {
                end = exp_end + exp_digits;
            }
        }
        let value = self.rest()[..end]
            .parse::<f64>()
            .map_err(|_| self.error("number"))?;
        self.pos += end;
        Ok(value)
    }

    fn point(&mut self) -> Result<Point, MeshError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }

    /// `( item , item , ... )`
    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, MeshError>,
    ) -> Result<Vec<T>, MeshError> {
        self.expect_char('(')?;
        let mut items = vec![item(self)?];
        loop {
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    items.push(item(self)?);
                }
                Some(')') => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(self.error("',' or ')'")),
            }
        }
    }

    fn point_list(&mut self) -> Result<Vec<Point>, MeshError> {
        self.list(Self::point)
    }

    /// `POLYGON` keyword already consumed.
    fn polygon_body(&mut self) -> Result<Vec<Vec<Point>>, MeshError> {
        self.list(Self::point_list)
    }

    fn polygon(&mut self) -> Result<Vec<Vec<Point>>, MeshError> {
        if !self.keyword("POLYGON") {
            return Err(self.error("POLYGON"));
        }
        self.polygon_body()
    }

    fn multilinestring(&mut self) -> Result<Vec<Vec<Point>>, MeshError> {
        if !self.keyword("MULTILINESTRING") {
            return Err(self.error("MULTILINESTRING"));
        }
        self.list(Self::point_list)
    }

    fn input(&mut self) -> Result<GeometryInput, MeshError> {
        if self.keyword("GEOMETRYCOLLECTION") {
            self.expect_char('(')?;
            let polygon = self.polygon()?;
            let linestrings = if self.peek() == Some(',') {
                self.pos += 1;
                self.multilinestring()?
            } else {
                Vec::new()
            };
            self.expect_char(')')?;
            Ok(GeometryInput {
                polygon,
                linestrings,
            })
        } else if self.keyword("POLYGON") {
            Ok(GeometryInput {
                polygon: self.polygon_body()?,
                linestrings: Vec::new(),
            })
        } else {
            Err(self.error("GEOMETRYCOLLECTION or POLYGON"))
        }
    }
}
