//! The presentation-format scanner (RFC 1035 §5.1, spec.md §4.4): turns a
//! stream of [`Token`]s into a header (owner, TTL, class, type) plus the
//! ordered list of RDATA character-strings, honouring zonefile elision of
//! the owner/TTL/class fields and RFC 3597 generic-RDATA dispatch.
use crate::charstring::CharacterString;
use crate::class::Class;
use crate::error::{DnsResult, Error};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::name::Fqdn;
use crate::rdata::RecordData;
use crate::record::ResourceRecord;
use crate::rrtype::RRType;

/// The state a scanner carries from one record to the next, so that a
/// zonefile entry whose owner/TTL/class are elided can be filled in from
/// the previous one (RFC 1035 §5.1's "if omitted, ... the last explicitly
/// stated values are resumed").
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    pub owner: Option<Fqdn>,
    pub ttl: Option<u32>,
    pub class: Option<Class>,
}

/// One fully scanned record: the resolved header fields plus its RDATA
/// tokens, not yet dispatched through [`RecordData::parse`].
#[derive(Debug, Clone)]
pub struct ScannedRecord {
    pub owner: Fqdn,
    pub ttl: u32,
    pub class: Class,
    pub rrtype: RRType,
    pub rdata_tokens: Vec<CharacterString>,
}

impl ScannedRecord {
    /// Dispatches the gathered RDATA tokens into a typed record, trying
    /// the RFC 3597 generic syntax first (spec.md §4.4).
    pub fn into_resource_record(self) -> DnsResult<ResourceRecord> {
        let rdata = RecordData::parse(self.rrtype, &self.rdata_tokens)?;
        Ok(ResourceRecord::new(self.owner, self.class, self.ttl, rdata))
    }
}

/// Consumes a [`Lexer`]'s tokens one record at a time.
pub struct Scanner<'a> {
    tokens: std::iter::Peekable<std::vec::IntoIter<Token>>,
    _input: std::marker::PhantomData<&'a ()>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> DnsResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Scanner { tokens: tokens.into_iter().peekable(), _input: std::marker::PhantomData })
    }

    fn peek_kind(&mut self) -> &TokenKind {
        &self.tokens.peek().expect("tokenize() always ends in Eof").kind
    }

    fn advance(&mut self) -> Token {
        self.tokens.next().expect("tokenize() always ends in Eof")
    }

    /// Skips blank tokens, comments, and blank lines between records.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_kind() {
                TokenKind::Comment(_) | TokenKind::Newline => {
                    self.advance();
                }
                _ => return,
            }
        }
    }

    /// Whether the scanner is at end of input (after skipping trivia).
    pub fn at_eof(&mut self) -> bool {
        self.skip_trivia();
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Scans exactly one record line (which may itself span several
    /// physical lines inside balanced parentheses), updating `state` as
    /// owner/TTL/class are resolved or reused.
    pub fn scan_record(&mut self, state: &mut ScanState) -> DnsResult<ScannedRecord> {
        self.skip_trivia();

        let leading_blank = matches!(self.peek_kind(), TokenKind::Blank);
        if leading_blank {
            self.advance();
        }

        let owner = if leading_blank {
            state.owner.clone().ok_or_else(|| Error::parse("no owner to continue from"))?
        } else {
            let tok = self.next_string_token()?;
            Fqdn::parse(&String::from_utf8_lossy(&tok))?
        };
        state.owner = Some(owner.clone());

        self.skip_blanks();

        // The header accepts both (ttl, class, type) and (class, ttl, type)
        // orderings; any run of optional fields may be fully elided.
        let mut ttl = None;
        let mut class = None;
        let mut rrtype = None;

        for _ in 0..3 {
            let candidate = self.peek_string_token()?;
            let Some(text) = candidate else { break };
            let text_str = String::from_utf8_lossy(&text).to_string();

            if rrtype.is_none() {
                if let Ok(parsed_ttl) = text_str.parse::<u32>() {
                    if ttl.is_none() {
                        ttl = Some(parsed_ttl);
                        self.advance();
                        self.skip_blanks();
                        continue;
                    }
                }
                if class.is_none() {
                    if let Ok(parsed_class) = text_str.parse::<Class>() {
                        class = Some(parsed_class);
                        self.advance();
                        self.skip_blanks();
                        continue;
                    }
                }
                if let Ok(parsed_type) = text_str.parse::<RRType>() {
                    rrtype = Some(parsed_type);
                    self.advance();
                    self.skip_blanks();
                    break;
                }
                return Err(Error::parse(format!("unrecognized record header field '{text_str}'")));
            }
        }

        let rrtype = rrtype.ok_or_else(|| Error::parse("missing record type"))?;
        let ttl = ttl.or(state.ttl).ok_or_else(|| Error::parse("missing TTL with no prior value to reuse"))?;
        let class = class.or(state.class).unwrap_or_default();
        state.ttl = Some(ttl);
        state.class = Some(class);

        let rdata_tokens = self.scan_rdata()?;

        Ok(ScannedRecord { owner, ttl, class, rrtype, rdata_tokens })
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek_kind(), TokenKind::Blank) {
            self.advance();
        }
    }

    fn peek_string_token(&mut self) -> DnsResult<Option<Vec<u8>>> {
        match self.peek_kind() {
            TokenKind::String(s) => Ok(Some(s.clone())),
            _ => Ok(None),
        }
    }

    fn next_string_token(&mut self) -> DnsResult<Vec<u8>> {
        match self.advance().kind {
            TokenKind::String(s) => Ok(s),
            other => Err(Error::parse(format!("expected a string token, found {other:?}"))),
        }
    }

    /// Gathers RDATA character-strings until a newline at parenthesis
    /// depth zero, tracking balanced `(`/`)` for multi-line records.
    fn scan_rdata(&mut self) -> DnsResult<Vec<CharacterString>> {
        let mut tokens = Vec::new();
        let mut depth: i32 = 0;

        loop {
            match self.peek_kind().clone() {
                TokenKind::Eof => {
                    if depth != 0 {
                        return Err(Error::parse("unclosed parenthesis in RDATA"));
                    }
                    return Ok(tokens);
                }
                TokenKind::Newline => {
                    self.advance();
                    if depth == 0 {
                        return Ok(tokens);
                    }
                }
                TokenKind::OpenParen => {
                    self.advance();
                    depth += 1;
                }
                TokenKind::CloseParen => {
                    self.advance();
                    depth -= 1;
                    if depth < 0 {
                        return Err(Error::parse("unmatched ')' in RDATA"));
                    }
                }
                TokenKind::Blank | TokenKind::Comment(_) => {
                    self.advance();
                }
                TokenKind::String(s) => {
                    self.advance();
                    tokens.push(CharacterString::from_bytes(s)?);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_a_full_header_ttl_class_order() {
        let mut scanner = Scanner::new(b"example.com. 300 IN A 93.184.216.34\n").unwrap();
        let mut state = ScanState::default();
        let rec = scanner.scan_record(&mut state).unwrap();
        assert_eq!(rec.owner.to_string(), "example.com.");
        assert_eq!(rec.ttl, 300);
        assert_eq!(rec.class, Class::IN);
        assert_eq!(rec.rrtype, RRType::A);
        assert_eq!(rec.rdata_tokens.len(), 1);
    }

    #[test]
    fn scans_class_before_ttl_order() {
        let mut scanner = Scanner::new(b"example.com. IN 300 A 93.184.216.34\n").unwrap();
        let mut state = ScanState::default();
        let rec = scanner.scan_record(&mut state).unwrap();
        assert_eq!(rec.ttl, 300);
        assert_eq!(rec.class, Class::IN);
    }

    #[test]
    fn blank_owner_reuses_started_owner() {
        let mut scanner = Scanner::new(b"example.com. 300 IN A 1.2.3.4\n  300 IN MX 10 mail.example.com.\n").unwrap();
        let mut state = ScanState::default();
        let first = scanner.scan_record(&mut state).unwrap();
        let second = scanner.scan_record(&mut state).unwrap();
        assert_eq!(first.owner, second.owner);
        assert_eq!(second.rrtype, RRType::MX);
    }

    #[test]
    fn missing_ttl_reuses_prior_value() {
        let mut scanner = Scanner::new(b"a.example.com. 300 IN A 1.2.3.4\nb.example.com. IN A 5.6.7.8\n").unwrap();
        let mut state = ScanState::default();
        let first = scanner.scan_record(&mut state).unwrap();
        let second = scanner.scan_record(&mut state).unwrap();
        assert_eq!(first.ttl, 300);
        assert_eq!(second.ttl, 300);
    }

    #[test]
    fn multi_line_parenthesised_rdata_is_gathered() {
        let mut scanner =
            Scanner::new(b"example.com. 300 IN SOA ns.example.com. hostmaster.example.com. (\n  2024010100\n  3600\n  900\n  1209600\n  300 )\n").unwrap();
        let mut state = ScanState::default();
        let rec = scanner.scan_record(&mut state).unwrap();
        assert_eq!(rec.rrtype, RRType::SOA);
        assert_eq!(rec.rdata_tokens.len(), 7);
    }

    #[test]
    fn unclosed_parenthesis_is_an_error() {
        let mut scanner = Scanner::new(b"example.com. 300 IN TXT ( \"a\"\n").unwrap();
        let mut state = ScanState::default();
        assert!(scanner.scan_record(&mut state).is_err());
    }

    #[test]
    fn unknown_type_name_is_rejected() {
        let mut scanner = Scanner::new(b"example.com. 300 IN NOTATYPE foo\n").unwrap();
        let mut state = ScanState::default();
        assert!(scanner.scan_record(&mut state).is_err());
    }

    #[test]
    fn generic_rdata_syntax_dispatches_through_resource_record() {
        let mut scanner = Scanner::new(b"example.com. 300 IN A \\# 4 5db8d822\n").unwrap();
        let mut state = ScanState::default();
        let rec = scanner.scan_record(&mut state).unwrap();
        let rr = rec.into_resource_record().unwrap();
        match rr.rdata {
            crate::rdata::RecordData::A(addr) => {
                assert_eq!(addr.0, std::net::Ipv4Addr::new(93, 184, 216, 34))
            }
            other => panic!("expected A, got {other:?}"),
        }
    }
}
