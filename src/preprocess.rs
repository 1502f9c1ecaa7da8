//! Line based cleanup run before tokenizing.
//!
//! Drops `package` clauses, imports (single line and parenthesised blocks)
//! and `//` comments. Everything else is kept as written, so positions in
//! error messages still point at the right line.

/// Returns `source` without the lines the grammar has no use for.
///
/// Removed lines are replaced by empty ones to keep line numbers stable.
pub fn preprocess(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut in_import_block = false;

    for line in source.lines() {
        let trimmed = line.trim();

        let keep = if in_import_block {
            if trimmed.starts_with(')') {
                in_import_block = false;
            }
            None
        } else if keyword_rest(trimmed, "package").is_some() {
            None
        } else if let Some(rest) = keyword_rest(trimmed, "import") {
            if rest.starts_with('(') && !rest.contains(')') {
                in_import_block = true;
            }
            None
        } else {
            Some(strip_comment(line))
        };

        if let Some(kept) = keep {
            output.push_str(kept.trim_end());
        }
        output.push('\n');
    }

    output
}

/// What follows `keyword` when the line starts with it as a whole word.
fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    match rest.chars().next() {
        None => Some(rest),
        Some(ch) if ch.is_whitespace() || ch == '(' || ch == '"' => Some(rest.trim_start()),
        Some(_) => None,
    }
}

/// `line` up to the first `//` that is not inside a string literal.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut previous = '\0';

    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '/' if !in_string && previous == '/' => return &line[..index - 1],
            _ => {}
        }
        previous = ch;
    }

    line
}

#[cfg(test)]
mod tests {
    use super::preprocess;

    #[test]
    fn test_removes_package_and_imports() {
        let source = "package main\n\nimport \"fmt\"\n\nx := 1\n";
        assert_eq!(preprocess(source), "\n\n\n\nx := 1\n");
    }

    #[test]
    fn test_removes_import_block() {
        let source = "import (\n\t\"fmt\"\n\t\"strings\"\n)\nx := 1\n";
        assert_eq!(preprocess(source), "\n\n\n\nx := 1\n");
    }

    #[test]
    fn test_single_line_import_group() {
        assert_eq!(preprocess("import (\"fmt\")\nx := 1"), "\nx := 1\n");
    }

    #[test]
    fn test_strips_comments() {
        let source = "// leading\nx := 1 // trailing\ns := \"http://example.com\"\n";
        assert_eq!(
            preprocess(source),
            "\nx := 1\ns := \"http://example.com\"\n"
        );
    }

    #[test]
    fn test_keeps_identifiers_starting_with_keywords() {
        let source = "packages := 1\nimported := 2\n";
        assert_eq!(preprocess(source), "packages := 1\nimported := 2\n");
    }
}
