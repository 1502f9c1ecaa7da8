#![allow(clippy::module_inception)]

use std::{io::Write, rc::Rc};

use crate::{
    compiler::compiler::{compile, CompileOptions},
    errors::errors::{Error, ErrorCategory, ErrorTip},
    parser::parser::parse,
    preprocess::preprocess,
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod preprocess;

extern crate regex;

#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Translates Go source into TypeScript text.
pub fn transpile(source: &str, options: &CompileOptions) -> Result<String, Error> {
    let mut out = Vec::new();
    transpile_to(source, options, &mut out)?;

    String::from_utf8(out).map_err(|error| {
        Error::new(
            errors::errors::ErrorImpl::Io {
                message: error.to_string(),
            },
            Position::null(),
        )
    })
}

/// Translates Go source, streaming the TypeScript into `sink`.
pub fn transpile_to<W: Write>(
    source: &str,
    options: &CompileOptions,
    sink: W,
) -> Result<(), Error> {
    let program = parse(preprocess(source), None)?;
    compile(&program, sink, options)
}

/// Line number (1 based), text of the line and column of a byte offset.
///
/// Offsets past the end point at the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    let last_start = source.trim_end_matches('\n').rfind('\n').map_or(0, |i| i + 1);
    let last_line = &source[last_start..];
    (
        source[..last_start].matches('\n').count() + 1,
        last_line.to_string(),
        pos - last_start.min(pos),
    )
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\nbar\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 30);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        let (line_number, line, _) = super::get_line_at_position("x := 1\ny := @", 99);
        assert_eq!(line_number, 2);
        assert_eq!(line, "y := @");
    }

    #[test]
    fn test_format_error_points_at_source() {
        let source = "x := 1\nvar y float = 2\n";
        let error = super::transpile(source, &Default::default()).expect_err("should fail");

        let rendered = super::format_error(&error, source, "main.go");
        assert!(rendered.starts_with("Error: UnknownType"));
        assert!(rendered.contains("-> main.go\n"));
        assert!(rendered.contains("2 | var y float = 2\n"));
        assert!(rendered.ends_with("^\n"));
    }

    #[test]
    fn test_format_io_error_skips_source() {
        let error = super::errors::errors::Error::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "permission denied",
        ));

        assert_eq!(
            super::format_error(&error, "x := 1\n", "main.go"),
            "Error: i/o error: permission denied\n"
        );
    }

    #[test]
    fn test_transpile() {
        let output = super::transpile(
            "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hi\")\n}\n",
            &Default::default(),
        )
        .expect("should transpile");

        assert_eq!(output, "function main(): void {\n\tconsole.log(\"hi\");\n}\n");
    }
}

/// Renders an error for the terminal:
///
/// ```text
/// Error: UnknownType (Type `float` is not supported)
/// -> main.go
///    |
/// 20 | var a float = 1
///    | ------^
/// ```
///
/// I/O errors have nothing to point at in the source and render as one line.
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    if error.category() == ErrorCategory::Resource {
        return format!("Error: {}\n", error);
    }

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut output = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    output.push_str(&format!("   {}\n", error));
    output.push_str(&format!("-> {}\n", file));
    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", format_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
