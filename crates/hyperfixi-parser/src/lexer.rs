//! Tokenizer (spec §4.1).
//!
//! Pure function `source -> [token]`. Never fails: unrecognized characters
//! advance one position without emitting a token: it is up to the parser to
//! treat an unexpected token as a parse error.

use hyperfixi_base::{Span, Token, TokenKind, RESERVED_WORDS};

/// Two-character operators, checked before falling back to single-character
/// operators.
const TWO_CHAR_OPERATORS: &[(&str, &str)] = &[
    ("==", "=="),
    ("!=", "!="),
    ("<=", "<="),
    (">=", ">="),
    ("&&", "&&"),
    ("||", "||"),
];

const SINGLE_CHAR_OPERATORS: &[char] = &['+', '-', '*', '/', '%', '<', '>', '!'];

/// Event-modifier keywords that a bare `.` must precede to be emitted as a
/// `Symbol('.')` rather than folded into a class selector.
const MODIFIER_WORDS: &[&str] = &["once", "prevent", "stop", "debounce", "throttle"];

pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            position: 0,
        }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            if self.position >= self.bytes.len() {
                break;
            }
            match self.next_token() {
                Some(tok) => tokens.push(tok),
                None => self.position += 1,
            }
        }
        tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.position, self.position),
        ));
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source[self.position..].chars().nth(offset)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('-') if self.peek_at(1) == Some('-') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        let start = self.position;
        let c = self.peek()?;

        if c == '<' && self.looks_like_element_literal() {
            return Some(self.lex_element_literal(start));
        }
        if c == '\'' && self.peek_at(1) == Some('s') && !self.next_is_letter_after(2) {
            self.advance();
            self.advance();
            return Some(Token::new(
                TokenKind::Operator("'s".into()),
                "'s",
                Span::new(start, self.position),
            ));
        }
        if c == '"' || c == '\'' {
            return Some(self.lex_string(start, c));
        }
        if c.is_ascii_digit() || (c == '-' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit())) {
            return Some(self.lex_number(start));
        }
        if c == ':' {
            return Some(self.lex_sigil(start, TokenKind::LocalVar as fn(String) -> TokenKind));
        }
        if c == '$' {
            return Some(self.lex_sigil(start, TokenKind::GlobalVar as fn(String) -> TokenKind));
        }
        if c == '.' && self.modifier_follows() {
            self.advance();
            return Some(Token::new(TokenKind::Symbol('.'), ".", Span::new(start, self.position)));
        }
        if c == '#' || c == '.' {
            return Some(self.lex_simple_selector(start, c));
        }
        if c == '[' {
            return Some(self.lex_bracket(start));
        }
        if c == '*' && self.peek_at(1).is_some_and(|d| d.is_alphabetic()) {
            return Some(self.lex_style_property(start));
        }
        for (op, _) in TWO_CHAR_OPERATORS {
            if self.source[self.position..].starts_with(op) {
                self.position += op.len();
                return Some(Token::new(
                    TokenKind::Operator((*op).into()),
                    *op,
                    Span::new(start, self.position),
                ));
            }
        }
        if SINGLE_CHAR_OPERATORS.contains(&c) {
            self.advance();
            return Some(Token::new(
                TokenKind::Operator(c.to_string()),
                c.to_string(),
                Span::new(start, self.position),
            ));
        }
        if c.is_alphabetic() || c == '_' {
            return Some(self.lex_identifier(start));
        }
        if "(){}],".contains(c) {
            self.advance();
            return Some(Token::new(TokenKind::Symbol(c), c.to_string(), Span::new(start, self.position)));
        }

        None
    }

    fn next_is_letter_after(&self, offset: usize) -> bool {
        self.peek_at(offset).is_some_and(|c| c.is_alphabetic())
    }

    fn modifier_follows(&self) -> bool {
        let rest = &self.source[self.position + 1..];
        MODIFIER_WORDS.iter().any(|w| rest.starts_with(w))
    }

    fn looks_like_element_literal(&self) -> bool {
        let rest = &self.source[self.position..];
        rest.starts_with('<')
            && rest[1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphabetic())
            && (rest.contains("/>") || rest.contains('>'))
    }

    fn lex_element_literal(&mut self, start: usize) -> Token {
        self.advance(); // '<'
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                Some('>') => depth -= 1,
                Some(_) => {}
                None => break,
            }
        }
        let text = self.source[start..self.position].to_string();
        Token::new(TokenKind::Selector(text.clone()), text, Span::new(start, self.position))
    }

    fn lex_string(&mut self, start: usize, quote: char) -> Token {
        self.advance(); // opening quote
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.advance();
                self.advance();
                continue;
            }
            if c == quote {
                self.advance();
                break;
            }
            self.advance();
        }
        let text = self.source[start..self.position].to_string();
        Token::new(TokenKind::String(text.clone()), text, Span::new(start, self.position))
    }

    fn lex_number(&mut self, start: usize) -> Token {
        if self.peek() == Some('-') {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        // Trailing unit suffix: ms, s, px.
        for unit in ["ms", "px", "s"] {
            if self.source[self.position..].starts_with(unit) {
                let after = self.peek_at(unit.chars().count());
                if !after.is_some_and(|c| c.is_alphanumeric()) {
                    self.position += unit.len();
                    break;
                }
            }
        }
        let text = self.source[start..self.position].to_string();
        Token::new(TokenKind::Number(text.clone()), text, Span::new(start, self.position))
    }

    fn lex_sigil(&mut self, start: usize, make: fn(String) -> TokenKind) -> Token {
        self.advance(); // ':' or '$'
        let name_start = self.position;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            self.advance();
        }
        let name = self.source[name_start..self.position].to_string();
        let text = self.source[start..self.position].to_string();
        Token::new(make(name), text, Span::new(start, self.position))
    }

    fn lex_simple_selector(&mut self, start: usize, _sigil: char) -> Token {
        self.advance();
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            self.advance();
        }
        let text = self.source[start..self.position].to_string();
        Token::new(TokenKind::Selector(text.clone()), text, Span::new(start, self.position))
    }

    fn lex_bracket(&mut self, start: usize) -> Token {
        // Lookahead past whitespace: quote/digit/'['/':'/'$'/'-'/eof => array
        // literal opener; otherwise an attribute-selector, consumed to the
        // balanced ']'.
        let mut probe = self.position + 1;
        while self
            .source
            .get(probe..)
            .and_then(|s| s.chars().next())
            .is_some_and(|c| c.is_whitespace())
        {
            probe += 1;
        }
        let next = self.source.get(probe..).and_then(|s| s.chars().next());
        let is_array_opener = match next {
            None => true,
            Some(c) => c == '"' || c == '\'' || c == '[' || c == ':' || c == '$' || c == '-' || c.is_ascii_digit(),
        };

        if is_array_opener {
            self.advance();
            return Token::new(TokenKind::Symbol('['), "[", Span::new(start, self.position));
        }

        let mut depth = 1usize;
        self.advance();
        while depth > 0 {
            match self.advance() {
                Some('[') => depth += 1,
                Some(']') => depth -= 1,
                Some(_) => {}
                None => break,
            }
        }
        let text = self.source[start..self.position].to_string();
        Token::new(TokenKind::Selector(text.clone()), text, Span::new(start, self.position))
    }

    fn lex_style_property(&mut self, start: usize) -> Token {
        self.advance(); // '*'
        let name_start = self.position;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            self.advance();
        }
        let name = self.source[name_start..self.position].to_string();
        let text = self.source[start..self.position].to_string();
        Token::new(TokenKind::StyleProperty(name), text, Span::new(start, self.position))
    }

    fn lex_identifier(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            self.advance();
        }
        let text = self.source[start..self.position].to_string();
        let kind = if RESERVED_WORDS.contains(&text.as_str()) {
            TokenKind::Keyword(text.clone())
        } else {
            TokenKind::Identifier(text.clone())
        };
        Token::new(kind, text, Span::new(start, self.position))
    }
}

/// Lexes `source` into a token stream, always terminated with `Eof`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_event_handler() {
        let tokens = tokenize("on click toggle .open");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(kinds[0], TokenKind::Keyword("on".into()));
        assert_eq!(kinds[1], TokenKind::Identifier("click".into()));
        assert_eq!(kinds[2], TokenKind::Keyword("toggle".into()));
        assert_eq!(kinds[3], TokenKind::Selector(".open".into()));
        assert_eq!(*kinds.last().unwrap(), TokenKind::Eof);
    }

    #[test]
    fn recognizes_sigil_variables() {
        let tokens = tokenize(":count $total");
        assert_eq!(tokens[0].kind, TokenKind::LocalVar("count".into()));
        assert_eq!(tokens[1].kind, TokenKind::GlobalVar("total".into()));
    }

    #[test]
    fn number_absorbs_unit_suffix() {
        let tokens = tokenize("wait 2s");
        assert_eq!(tokens[1].kind, TokenKind::Number("2s".into()));
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let tokens = tokenize("-- comment\non click");
        assert_eq!(tokens[0].kind, TokenKind::Keyword("on".into()));
    }

    #[test]
    fn dot_before_modifier_is_bare_symbol() {
        let tokens = tokenize("on click.once");
        // "click" identifier, then Symbol('.'), then keyword-ish "once".
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Symbol('.')));
    }

    #[test]
    fn possessive_s_not_followed_by_letter() {
        let tokens = tokenize("me's value");
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Operator("'s".into())));
    }

    #[test]
    fn bracket_with_leading_digit_is_array_opener() {
        let tokens = tokenize("[1, 2]");
        assert_eq!(tokens[0].kind, TokenKind::Symbol('['));
        assert_eq!(tokens[2].kind, TokenKind::Symbol(','));
        assert_eq!(tokens[3].kind, TokenKind::Number("2".into()));
        assert_eq!(tokens[4].kind, TokenKind::Symbol(']'));
    }

    #[test]
    fn bracket_attribute_selector_consumes_to_balanced_close() {
        let tokens = tokenize("[data-open]");
        assert_eq!(tokens[0].kind, TokenKind::Selector("[data-open]".into()));
    }

    #[test]
    fn unknown_character_is_silently_skipped() {
        let tokens = tokenize("\u{7}on init");
        assert_eq!(tokens[0].kind, TokenKind::Keyword("on".into()));
    }

    #[test]
    fn two_char_operators_recognized() {
        let tokens = tokenize("if x == y");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Operator("==".into())));
    }
}
