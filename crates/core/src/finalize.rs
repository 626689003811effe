//! Source finalizer: validates and normalizes the emitted buffer.
//!
//! The generator has no Go toolchain at hand, so this is a lightweight
//! syntactic gate: the buffer must carry a package clause, every delimiter
//! must balance outside literals and comments, and every literal must
//! terminate. This is the single point where a malformed template or a
//! malformed generated identifier is caught. Normalization strips trailing
//! spaces, collapses blank-line runs, and ends the unit with one newline.

use thiserror::Error;

/// The emitted buffer is not a valid source unit.
#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("missing package clause")]
    MissingPackageClause,

    #[error("unbalanced {delimiter:?} opened at line {line}")]
    UnbalancedOpen { delimiter: char, line: usize },

    #[error("unexpected {delimiter:?} at line {line}")]
    UnexpectedClose { delimiter: char, line: usize },

    #[error("unterminated literal starting at line {line}")]
    UnterminatedLiteral { line: usize },

    #[error("unterminated comment starting at line {line}")]
    UnterminatedComment { line: usize },
}

/// Validate the concatenated emitted text and normalize it into a single
/// compilable unit.
pub fn finalize(source: &str) -> Result<String, FinalizeError> {
    check_package_clause(source)?;
    check_balance(source)?;
    Ok(normalize(source))
}

fn check_package_clause(source: &str) -> Result<(), FinalizeError> {
    let first_code_line = source
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("//"));

    match first_code_line {
        Some(line) if line.starts_with("package ") => Ok(()),
        _ => Err(FinalizeError::MissingPackageClause),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment { start: usize },
    Str { start: usize, escaped: bool },
    Rune { start: usize, escaped: bool },
    RawStr { start: usize },
}

/// Scan the buffer with a small literal/comment-aware state machine and
/// check that `() [] {}` balance in code position.
fn check_balance(source: &str) -> Result<(), FinalizeError> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut state = State::Code;
    let mut line = 1;

    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\n' {
            line += 1;
        }

        match state {
            State::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment { start: line };
                }
                '"' => state = State::Str { start: line, escaped: false },
                '\'' => state = State::Rune { start: line, escaped: false },
                '`' => state = State::RawStr { start: line },
                '(' | '[' | '{' => stack.push((ch, line)),
                ')' | ']' | '}' => {
                    let expected = match ch {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        _ => return Err(FinalizeError::UnexpectedClose { delimiter: ch, line }),
                    }
                }
                _ => {}
            },
            State::LineComment => {
                if ch == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment { .. } => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Str { start, escaped } => {
                if ch == '\n' {
                    return Err(FinalizeError::UnterminatedLiteral { line: start });
                }
                state = match (escaped, ch) {
                    (false, '\\') => State::Str { start, escaped: true },
                    (false, '"') => State::Code,
                    _ => State::Str { start, escaped: false },
                };
            }
            State::Rune { start, escaped } => {
                if ch == '\n' {
                    return Err(FinalizeError::UnterminatedLiteral { line: start });
                }
                state = match (escaped, ch) {
                    (false, '\\') => State::Rune { start, escaped: true },
                    (false, '\'') => State::Code,
                    _ => State::Rune { start, escaped: false },
                };
            }
            State::RawStr { start: _ } => {
                if ch == '`' {
                    state = State::Code;
                }
            }
        }
    }

    match state {
        State::Code | State::LineComment => {}
        State::BlockComment { start } => {
            return Err(FinalizeError::UnterminatedComment { line: start });
        }
        State::Str { start, .. } | State::Rune { start, .. } | State::RawStr { start } => {
            return Err(FinalizeError::UnterminatedLiteral { line: start });
        }
    }

    if let Some(&(delimiter, line)) = stack.first() {
        return Err(FinalizeError::UnbalancedOpen { delimiter, line });
    }

    Ok(())
}

fn normalize(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut blank_run = 0;

    for line in source.lines() {
        let line = line.trim_end();

        if line.is_empty() {
            blank_run += 1;
            continue;
        }

        // Leading blanks are dropped entirely; interior runs collapse to one.
        if blank_run > 0 && !result.is_empty() {
            result.push('\n');
        }
        blank_run = 0;

        result.push_str(line);
        result.push('\n');
    }

    result
}
