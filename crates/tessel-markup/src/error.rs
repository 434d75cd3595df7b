use std::fmt;

/// A parse error from a `.tgrid` layout file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// 1-based source line number where the error occurred.
    pub line: usize,
    /// 1-based source column number where the error occurred.
    pub col: usize,
}

impl ParseError {
    pub(crate) fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: msg.into(), line, col }
    }

    /// Render the error with the offending source line and a caret under
    /// the column, for terminal output.
    ///
    /// Falls back to the plain message when `src` does not contain `line`.
    pub fn render(&self, src: &str) -> String {
        let Some(text) = src.lines().nth(self.line.saturating_sub(1)) else {
            return self.to_string();
        };
        let gutter = self.line.to_string();
        let pad = " ".repeat(gutter.len());
        let caret = " ".repeat(self.col.saturating_sub(1));
        format!(
            "{self}\n{pad} |\n{gutter} | {text}\n{pad} | {caret}^",
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tgrid parse error at {}:{}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_points_at_column() {
        let err = ParseError::new("boom", 2, 5);
        let out = err.render("Grid {\n    ?? }\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "tgrid parse error at 2:5: boom");
        assert_eq!(lines[2], "2 |     ?? }");
        assert_eq!(lines[3], "  |     ^");
    }

    #[test]
    fn render_out_of_range_line_is_plain() {
        let err = ParseError::new("eof", 9, 1);
        assert_eq!(err.render("Grid { }"), err.to_string());
    }
}
