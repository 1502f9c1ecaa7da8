use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP, TYPE_LOOKUP};

/// A handler consumes the text matched by its pattern and optionally yields a token.
pub type RegexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    // Order matters: longer operators must come before their one character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new("^[a-zA-Z_][a-zA-Z0-9_]*(\\.[a-zA-Z_][a-zA-Z0-9_]*)*", symbol_handler),
        RegexPattern::new("^[0-9]+", integer_handler),
        RegexPattern::new("^\\s+", skip_handler),
        RegexPattern::new("^\"[^\"]*\"", string_handler),
        RegexPattern::new("^//[^\\n]*", skip_handler),
        RegexPattern::new("^\\.\\.\\.", MK_DEFAULT_HANDLER!(TokenKind::Ellipsis, "...")),
        RegexPattern::new("^\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        RegexPattern::new("^\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        RegexPattern::new("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        RegexPattern::new("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        RegexPattern::new("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        RegexPattern::new("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        RegexPattern::new("^:=", MK_DEFAULT_HANDLER!(TokenKind::Declare, ":=")),
        RegexPattern::new("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        RegexPattern::new("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        RegexPattern::new("^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        RegexPattern::new("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        RegexPattern::new("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        RegexPattern::new("^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        RegexPattern::new("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        RegexPattern::new("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        RegexPattern::new("^\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        RegexPattern::new("^&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        RegexPattern::new("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        RegexPattern::new("^:", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        RegexPattern::new("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        RegexPattern::new("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        RegexPattern::new("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        RegexPattern::new("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        RegexPattern::new("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        RegexPattern::new("^%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

/// Pull-based tokenizer. Each call to [`Lexer::next_token`] scans exactly one
/// token; once the input is exhausted it keeps returning `EOF`.
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
            finished: false,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Span starting at the current position and covering `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| String::from(m.as_str()))
            .unwrap_or_default()
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return MK_TOKEN!(TokenKind::EOF, String::new(), self.span_of(0));
            }

            let pattern = PATTERNS
                .iter()
                .find(|pattern| pattern.regex.is_match(self.remainder()));

            match pattern {
                Some(pattern) => {
                    if let Some(token) = (pattern.handler)(self, &pattern.regex) {
                        return token;
                    }
                }
                None => {
                    let ch = self.remainder().chars().next().unwrap_or('\0');
                    let token = MK_TOKEN!(
                        TokenKind::Illegal,
                        ch.to_string(),
                        self.span_of(ch.len_utf8())
                    );
                    self.advance_n(ch.len_utf8());
                    return token;
                }
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including a single `EOF`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            self.finished = true;
        }

        Some(token)
    }
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = lexer.matched(regex);
    let token = MK_TOKEN!(TokenKind::Integer, matched.clone(), lexer.span_of(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
    None
}

// No escape processing: the literal is exactly the text between the quotes.
fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = lexer.matched(regex);
    let literal = String::from(&matched[1..matched.len() - 1]);
    let token = MK_TOKEN!(TokenKind::String, literal, lexer.span_of(matched.len()));
    lexer.advance_n(matched.len());
    Some(token)
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let value = lexer.matched(regex);

    let kind = if let Some(kind) = TYPE_LOOKUP.get(value.as_str()) {
        *kind
    } else if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        *kind
    } else {
        TokenKind::Identifier
    };

    let token = MK_TOKEN!(kind, value.clone(), lexer.span_of(value.len()));
    lexer.advance_n(value.len());
    Some(token)
}

/// Tokenizes a whole input, returning every token up to and including `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    Lexer::new(source, file).collect()
}
