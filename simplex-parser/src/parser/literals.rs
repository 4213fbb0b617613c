//! Literal token text -> AST literal conversion.

use crate::error::{ParseError, ParseResult};
use crate::span::Span;

pub fn parse_int(text: &str, span: Span) -> ParseResult<i64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    cleaned
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber {
            literal: text.to_string(),
            span,
        })
}

pub fn parse_float(text: &str, span: Span) -> ParseResult<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    cleaned
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            literal: text.to_string(),
            span,
        })
}

/// Unescape a double-quoted string literal's source text (quotes included),
/// supporting `\n \t \r \\ \" \0` and `\uXXXX`.
pub fn parse_string(text: &str, span: Span) -> ParseResult<String> {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = (0..4).filter_map(|_| chars.next()).collect();
                if hex.len() != 4 {
                    return Err(ParseError::InvalidEscape {
                        sequence: format!("\\u{hex}"),
                        span,
                    });
                }
                let code = u32::from_str_radix(&hex, 16).map_err(|_| ParseError::InvalidEscape {
                    sequence: format!("\\u{hex}"),
                    span,
                })?;
                let ch = char::from_u32(code).ok_or_else(|| ParseError::InvalidEscape {
                    sequence: format!("\\u{hex}"),
                    span,
                })?;
                out.push(ch);
            }
            Some(other) => {
                return Err(ParseError::InvalidEscape {
                    sequence: format!("\\{other}"),
                    span,
                })
            }
            None => {
                return Err(ParseError::InvalidEscape {
                    sequence: "\\".to_string(),
                    span,
                })
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_standard_sequences() {
        let span = Span::empty();
        assert_eq!(parse_string(r#""a\nb""#, span).unwrap(), "a\nb");
        assert_eq!(parse_string(r#""A""#, span).unwrap(), "A");
    }

    #[test]
    fn strips_underscores_from_numbers() {
        let span = Span::empty();
        assert_eq!(parse_int("1_000", span).unwrap(), 1000);
    }
}
