//! Test-only reader: compact source text to a flat value sequence.
//!
//! Covers what the tests need: blocks, parens, strings (`^"` `^^` `^/`
//! escapes), integers, decimals, `#{hex}` binaries, words, `x:`, `:x`, `'x`,
//! dotted paths with word, index and `(expr)` segments, set-paths (`a.b:`),
//! get-paths (`:a.b`) and `;` comments. Malformed input panics.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test fixture panics on malformed input"
)]

use std::num::NonZeroUsize;

use rook_ir::Name;
use rook_value::{Decimal, Path, Segment, Series, Value};

use crate::{Evaluator, EvalResult};

/// Read `src` into a value sequence.
pub fn load(src: &str) -> Vec<Value> {
    let mut reader = Reader {
        chars: src.chars().collect(),
        pos: 0,
    };
    let items = reader.sequence(None);
    assert!(reader.pos >= reader.chars.len(), "unbalanced input: {src}");
    items
}

/// Read and evaluate `src` with a fresh prelude evaluator.
pub fn run(src: &str) -> EvalResult {
    Evaluator::new().unwrap().evaluate(&load(src))
}

/// Read and evaluate `src` in an existing evaluator.
pub fn run_in(ev: &mut Evaluator, src: &str) -> EvalResult {
    ev.evaluate(&load(src))
}

struct Reader {
    chars: Vec<char>,
    pos: usize,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '[' | ']' | '(' | ')' | '"' | ';')
}

enum Piece {
    Text(String),
    Eval(Vec<Value>),
}

impl Reader {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_blank(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
            } else if c == ';' {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn sequence(&mut self, close: Option<char>) -> Vec<Value> {
        let mut items = Vec::new();
        loop {
            self.skip_blank();
            match self.peek() {
                None => {
                    assert!(close.is_none(), "missing {close:?}");
                    return items;
                }
                Some(c) if Some(c) == close => {
                    self.pos += 1;
                    return items;
                }
                Some(_) => items.push(self.value()),
            }
        }
    }

    fn value(&mut self) -> Value {
        match self.peek().unwrap() {
            '[' => {
                self.pos += 1;
                Value::block(self.sequence(Some(']')))
            }
            '(' => {
                self.pos += 1;
                Value::paren(self.sequence(Some(')')))
            }
            '"' => self.string(),
            '#' if self.peek_at(1) == Some('{') => self.binary(),
            _ => self.atom(),
        }
    }

    fn string(&mut self) -> Value {
        self.pos += 1;
        let mut text = String::new();
        loop {
            match self.bump().expect("unterminated string") {
                '"' => return Value::string(&text),
                '^' => match self.bump().expect("dangling escape") {
                    '/' => text.push('\n'),
                    other => text.push(other),
                },
                c => text.push(c),
            }
        }
    }

    fn binary(&mut self) -> Value {
        self.pos += 2;
        let mut hex = String::new();
        loop {
            match self.bump().expect("unterminated binary") {
                '}' => break,
                c if c.is_whitespace() => {}
                c => hex.push(c),
            }
        }
        let bytes = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
            .collect();
        Value::binary(bytes)
    }

    /// Text up to a delimiter, `.` or `:`. A leading number keeps its
    /// decimal point.
    fn text(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if is_delimiter(c) || c == ':' {
                break;
            }
            if c == '.' {
                let numeric = !text.is_empty()
                    && text.trim_start_matches('-').chars().all(|d| d.is_ascii_digit())
                    && text.chars().any(|d| d.is_ascii_digit())
                    && self.peek_at(1).is_some_and(|d| d.is_ascii_digit())
                    && !text.contains('.');
                if !numeric {
                    break;
                }
            }
            text.push(c);
            self.pos += 1;
        }
        text
    }

    fn atom(&mut self) -> Value {
        let get = self.peek() == Some(':');
        if get {
            self.pos += 1;
        }
        let lit = !get && self.peek() == Some('\'');
        if lit {
            self.pos += 1;
        }

        let mut pieces = vec![Piece::Text(self.text())];
        while self.peek() == Some('.') {
            self.pos += 1;
            if self.peek() == Some('(') {
                self.pos += 1;
                pieces.push(Piece::Eval(self.sequence(Some(')'))));
            } else {
                pieces.push(Piece::Text(self.text()));
            }
        }
        let set = self.peek() == Some(':');
        if set {
            self.pos += 1;
        }

        if pieces.len() == 1 {
            let Some(Piece::Text(text)) = pieces.pop() else {
                unreachable!()
            };
            let name = || Name::intern(&text);
            return match (get, lit, set) {
                (true, _, _) => Value::get_word(name()),
                (_, true, _) => Value::lit_word(name()),
                (_, _, true) => Value::set_word(name()),
                _ => scalar(&text),
            };
        }

        let segments = pieces
            .into_iter()
            .map(|piece| match piece {
                Piece::Eval(items) => Segment::Eval(Series::new(items)),
                Piece::Text(text) => match text.parse::<usize>() {
                    Ok(n) => Segment::Index(NonZeroUsize::new(n).expect("index 0 in path")),
                    Err(_) => Segment::Word(Name::intern(&text)),
                },
            })
            .collect();
        let path = Path::new(segments).unwrap();
        match (get, set) {
            (true, _) => Value::get_path(path),
            (_, true) => Value::set_path(path),
            _ => Value::path(path),
        }
    }
}

fn scalar(text: &str) -> Value {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let numeric = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.');
    if numeric && digits.starts_with(|c: char| c.is_ascii_digit()) {
        if text.contains('.') {
            return Value::Decimal(Decimal::parse(text).unwrap());
        }
        return Value::Integer(text.parse().unwrap());
    }
    Value::word(Name::intern(text))
}
