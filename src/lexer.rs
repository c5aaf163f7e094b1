//! The presentation-format tokenizer (RFC 1035 §5.1): turns a byte buffer
//! into a stream of [`Token`]s, handling the zonefile quoting/escaping
//! rules. There is no prior art for this in the DNS wire-format crates
//! this library otherwise follows — it is written from the grammar in
//! spec.md §4.4, in the same error-reporting style as the rest of the
//! crate (positions attached so the scanner can build precise messages).
use crate::charstring::unescape_presentation;
use crate::error::{DnsResult, Error};

/// One lexical token, tagged with the 1-based line and column at which it
/// starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A collapsed run of spaces/tabs. Significant only at the start of a
    /// line, where it marks "owner elided, continue from started-owner".
    Blank,
    /// A quoted or unquoted character-string, already unescaped.
    String(Vec<u8>),
    /// A `;` comment, trimmed of the leading `;` and surrounding whitespace.
    Comment(String),
    OpenParen,
    CloseParen,
    Newline,
    Eof,
}

fn is_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'(' | b')' | b';')
}

/// Tokenizes an ASCII-compatible presentation-format buffer.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Lexer { input, pos: 0, line: 1, column: 1 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    fn error(&self, msg: impl Into<String>) -> Error {
        Error::parse(format!("{} at line {}, column {}", msg.into(), self.line, self.column))
    }

    /// Produces the next token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> DnsResult<Token> {
        let (line, column) = (self.line, self.column);

        let Some(b) = self.peek() else {
            return Ok(Token { kind: TokenKind::Eof, line, column });
        };

        match b {
            b'\n' => {
                self.bump();
                Ok(Token { kind: TokenKind::Newline, line, column })
            }
            b'\r' => {
                self.bump();
                self.next_token()
            }
            b'(' => {
                self.bump();
                Ok(Token { kind: TokenKind::OpenParen, line, column })
            }
            b')' => {
                self.bump();
                Ok(Token { kind: TokenKind::CloseParen, line, column })
            }
            b' ' | b'\t' => {
                while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
                    self.bump();
                }
                Ok(Token { kind: TokenKind::Blank, line, column })
            }
            b';' => {
                self.bump();
                let mut text = Vec::new();
                while let Some(c) = self.peek() {
                    if c == b'\n' {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
                let trimmed = String::from_utf8_lossy(&text).trim().to_string();
                Ok(Token { kind: TokenKind::Comment(trimmed), line, column })
            }
            b'"' => {
                self.bump();
                let bytes = self.scan_quoted()?;
                Ok(Token { kind: TokenKind::String(bytes), line, column })
            }
            _ => {
                let bytes = self.scan_unquoted()?;
                Ok(Token { kind: TokenKind::String(bytes), line, column })
            }
        }
    }

    fn scan_quoted(&mut self) -> DnsResult<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated quoted string")),
                Some(b'"') => {
                    self.bump();
                    match self.peek() {
                        None => return Ok(out),
                        Some(next) if is_separator(next) => return Ok(out),
                        _ => return Err(self.error("unescaped '\"' mid-string")),
                    }
                }
                Some(b'\\') if self.input.get(self.pos + 1) == Some(&b'#') => {
                    out.push(b'\\');
                    out.push(b'#');
                    self.bump();
                    self.bump();
                }
                Some(b'\\') => {
                    let (byte, consumed) = unescape_presentation(&self.input[self.pos..])?;
                    out.push(byte);
                    for _ in 0..consumed {
                        self.bump();
                    }
                }
                Some(b) => {
                    if !(b == b' ' || b == b'\t' || (0x21..=0x7e).contains(&b)) {
                        return Err(self.error("non-printable byte inside quoted string"));
                    }
                    out.push(b);
                    self.bump();
                }
            }
        }
    }

    fn scan_unquoted(&mut self) -> DnsResult<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(b) = self.peek() {
            if is_separator(b) {
                break;
            }
            // `\#` is the RFC 3597 generic-RDATA marker, not an escape of
            // `#` — the scanner matches on the literal two-byte sequence.
            if b == b'\\' && self.input.get(self.pos + 1) == Some(&b'#') {
                out.push(b'\\');
                out.push(b'#');
                self.bump();
                self.bump();
            } else if b == b'\\' {
                let (byte, consumed) = unescape_presentation(&self.input[self.pos..])?;
                out.push(byte);
                for _ in 0..consumed {
                    self.bump();
                }
            } else if (0x21..=0x7e).contains(&b) {
                out.push(b);
                self.bump();
            } else {
                return Err(self.error("non-printable byte inside unquoted string"));
            }
        }
        Ok(out)
    }

    /// Collects every token up to (and including) the terminal [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> DnsResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input.as_bytes())
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn splits_unquoted_strings_on_whitespace() {
        let k = kinds("a b\tc\n");
        assert_eq!(
            k,
            vec![
                TokenKind::String(b"a".to_vec()),
                TokenKind::Blank,
                TokenKind::String(b"b".to_vec()),
                TokenKind::Blank,
                TokenKind::String(b"c".to_vec()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn quoted_string_may_contain_separators() {
        let k = kinds("\"hello world; (not a comment)\"\n");
        assert_eq!(
            k,
            vec![
                TokenKind::String(b"hello world; (not a comment)".to_vec()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let k = kinds("a ; a trailing comment\nb\n");
        assert_eq!(
            k,
            vec![
                TokenKind::String(b"a".to_vec()),
                TokenKind::Blank,
                TokenKind::Comment("a trailing comment".to_string()),
                TokenKind::Newline,
                TokenKind::String(b"b".to_vec()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn parens_are_tokenized_individually() {
        let k = kinds("( a\nb )\n");
        assert_eq!(
            k,
            vec![
                TokenKind::OpenParen,
                TokenKind::Blank,
                TokenKind::String(b"a".to_vec()),
                TokenKind::Newline,
                TokenKind::String(b"b".to_vec()),
                TokenKind::Blank,
                TokenKind::CloseParen,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn decodes_ddd_and_x_escapes() {
        let k = kinds("a\\.b\\065c\n");
        assert_eq!(k, vec![TokenKind::String(b"a.bAc".to_vec()), TokenKind::Newline, TokenKind::Eof]);
    }

    #[test]
    fn generic_rdata_marker_survives_as_a_literal_token() {
        let k = kinds("\\# 4 5db8d822\n");
        assert_eq!(
            k,
            vec![
                TokenKind::String(b"\\#".to_vec()),
                TokenKind::Blank,
                TokenKind::String(b"4".to_vec()),
                TokenKind::Blank,
                TokenKind::String(b"5db8d822".to_vec()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn raw_newline_inside_quoted_string_is_an_error() {
        let mut lexer = Lexer::new(b"\"abc\ndef\"");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn unescaped_quote_mid_string_is_an_error() {
        let mut lexer = Lexer::new(b"\"abc\"def\"\n");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn closing_quote_followed_by_separator_is_accepted() {
        let k = kinds("\"abc\" def\n");
        assert_eq!(
            k,
            vec![
                TokenKind::String(b"abc".to_vec()),
                TokenKind::Blank,
                TokenKind::String(b"def".to_vec()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn dangling_backslash_is_an_error() {
        let mut lexer = Lexer::new(b"abc\\");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn empty_input_yields_only_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }
}
