use log::trace;

use crate::MK_TOKEN;

use super::tokens::{Token, TokenKind};

/// Cursor over a borrowed source buffer.
///
/// `pos` is the byte the last token started at, `read_pos` is the next byte
/// to be read and `ch` is the byte at `pos`. Only `read_pos` ever moves
/// forward between calls.
#[derive(Clone)]
pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    read_pos: usize,
    ch: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Lexer<'a> {
        Lexer {
            source,
            pos: 0,
            read_pos: 0,
            ch: 0,
        }
    }

    pub fn at_eof(&self) -> bool {
        self.read_pos >= self.source.len()
    }

    /// Byte after the current one, or 0 past the end.
    pub fn peek(&self) -> u8 {
        self.source.get(self.read_pos).copied().unwrap_or(0)
    }

    fn advance_n(&mut self, n: usize) {
        self.read_pos += n;
    }

    fn slice(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.source[start..end]).into_owned()
    }

    fn skip_spaces(&mut self) {
        while !self.at_eof() && self.source[self.read_pos] == b' ' {
            self.advance_n(1);
        }
    }

    /// Returns the next token. Once the buffer is exhausted every call
    /// returns an EOF token.
    pub fn next_token(&mut self) -> Token {
        let token = loop {
            self.skip_spaces();

            if self.at_eof() {
                break MK_TOKEN!(TokenKind::EOF, "");
            }

            self.pos = self.read_pos;
            self.ch = self.source[self.pos];
            self.advance_n(1);

            // Newlines never produce a token of their own
            if self.ch == b'\n' {
                continue;
            }

            break self.read_token();
        };

        trace!("lexed {:?} {:?}", token.kind, token.value);
        token
    }

    fn read_token(&mut self) -> Token {
        match self.ch {
            b';' => MK_TOKEN!(TokenKind::Semicolon, ";"),
            b',' => MK_TOKEN!(TokenKind::Comma, ","),
            b'(' => MK_TOKEN!(TokenKind::OpenParen, "("),
            b')' => MK_TOKEN!(TokenKind::CloseParen, ")"),
            b'{' => MK_TOKEN!(TokenKind::OpenCurly, "{"),
            b'}' => MK_TOKEN!(TokenKind::CloseCurly, "}"),
            b'+' => MK_TOKEN!(TokenKind::Plus, "+"),
            b'-' => MK_TOKEN!(TokenKind::Dash, "-"),
            b'*' => MK_TOKEN!(TokenKind::Star, "*"),
            b'/' => MK_TOKEN!(TokenKind::Slash, "/"),
            b'%' => MK_TOKEN!(TokenKind::Percent, "%"),
            b'<' => MK_TOKEN!(TokenKind::Less, "<"),
            b'>' => MK_TOKEN!(TokenKind::Greater, ">"),
            b'=' => {
                if self.peek() == b'=' {
                    self.advance_n(1);
                    MK_TOKEN!(TokenKind::Equals, "==")
                } else {
                    MK_TOKEN!(TokenKind::Assignment, "=")
                }
            }
            b'!' => {
                if self.peek() == b'=' {
                    self.advance_n(1);
                    MK_TOKEN!(TokenKind::NotEquals, "!=")
                } else {
                    MK_TOKEN!(TokenKind::Not, "!")
                }
            }
            b'"' => self.read_string(),
            ch if ch.is_ascii_alphabetic() => {
                let value = self.read_while(|c| c.is_ascii_alphabetic());
                MK_TOKEN!(TokenKind::lookup_identifier(&value), value)
            }
            ch if ch.is_ascii_digit() => {
                let value = self.read_while(|c| c.is_ascii_digit());
                MK_TOKEN!(TokenKind::Int, value)
            }
            _ => MK_TOKEN!(TokenKind::Illegal, self.slice(self.pos, self.read_pos)),
        }
    }

    /// Extends the current token over every following byte matching `accept`.
    fn read_while(&mut self, accept: fn(u8) -> bool) -> String {
        while !self.at_eof() && accept(self.source[self.read_pos]) {
            self.advance_n(1);
        }

        self.slice(self.pos, self.read_pos)
    }

    fn read_string(&mut self) -> Token {
        let start = self.read_pos;

        while !self.at_eof() && self.source[self.read_pos] != b'"' {
            self.advance_n(1);
        }

        if self.at_eof() {
            // Unterminated: hand back everything from the opening quote
            return MK_TOKEN!(TokenKind::Illegal, self.slice(self.pos, self.read_pos));
        }

        let value = self.slice(start, self.read_pos);
        self.advance_n(1);

        MK_TOKEN!(TokenKind::String, value)
    }
}

/// Eagerly lexes `source` up to and including the first EOF token.
///
/// Only meant for diagnostic dumps; the parser pulls tokens one at a time
/// through [`Lexer::next_token`].
pub fn tokenize(source: &[u8]) -> Vec<Token> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.is_kind(TokenKind::EOF);
        tokens.push(token);

        if done {
            break;
        }
    }

    tokens
}
