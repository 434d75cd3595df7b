//! Lexer, parser, and AST for **tessel grid layout files** (`.tgrid`).
//!
//! This crate is dependency-free. It only knows the generic shape of a
//! document (nodes with an optional label, `key: value` properties, and
//! children); what `Grid`, `Row`, `Cell`, and `Divider` mean is decided by
//! `tessel-grid`.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `Document`, `Node`, `Prop`, `Value` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token`, `Spanned` |
//! | [`parser`] | `parse_str` entry point |
//!
//! # Quick start
//!
//! ```rust
//! use tessel_markup::parse_str;
//!
//! let src = r#"
//!     Grid {
//!         Row "top" { Cell "a" { weight: 1 }  Cell "b" }
//!     }
//! "#;
//!
//! let doc = parse_str(src).unwrap();
//! assert_eq!(doc.root.kind, "Grid");
//! assert_eq!(doc.root.children[0].label.as_deref(), Some("top"));
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Document, Node, Prop, Value};
pub use error::ParseError;
pub use parser::parse_str;

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) -> Document { parse_str(src).unwrap() }
    fn err(src: &str) -> ParseError { parse_str(src).unwrap_err() }

    #[test] fn empty_grid() { ok("Grid { }"); }
    #[test] fn bare_node_without_block() { ok("Grid"); }

    #[test]
    fn props_and_children_mix_freely() {
        let doc = ok(r#"Grid {
            min_ratio: 0.05
            Row "top" { Cell "a" }
            policy: proportional
            Row "bottom"
        }"#);
        let root = &doc.root;
        assert_eq!(root.prop_f32("min_ratio"), Some(0.05));
        assert_eq!(root.prop_name("policy"), Some("proportional"));
        assert_eq!(root.children_of("Row").count(), 2);
        assert_eq!(root.children[0].children[0].label.as_deref(), Some("a"));
    }

    #[test]
    fn node_lines_are_recorded() {
        let doc = ok("Grid {\n  Row \"r\"\n}");
        assert_eq!(doc.root.line, 1);
        assert_eq!(doc.root.children[0].line, 2);
    }

    #[test]
    fn last_duplicate_prop_wins() {
        let doc = ok("Cell { weight: 1  weight: 2 }");
        assert_eq!(doc.root.prop_f32("weight"), Some(2.0));
    }

    #[test]
    fn bool_and_string_values() {
        let doc = ok(r#"Divider "d" { invert: true  row: "top" }"#);
        assert_eq!(doc.root.prop_bool("invert"), Some(true));
        assert_eq!(doc.root.prop_name("row"), Some("top"));
        assert_eq!(doc.root.prop_bool("row"), None);
    }

    #[test]
    fn unclosed_block_points_at_brace() {
        let e = err("Grid {\n  Row \"a\" {\n");
        assert_eq!((e.line, e.col), (2, 11));
    }

    #[test]
    fn trailing_content_is_rejected() {
        let e = err("Grid { } Grid { }");
        assert_eq!(e.col, 10);
    }

    #[test] fn err_missing_value() { err("Grid { min_ratio: }"); }
    #[test] fn err_value_in_block() { err("Grid { 0.5 }"); }
    #[test] fn err_root_not_a_name() { err("\"Grid\" { }"); }
}
