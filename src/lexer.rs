use crate::api::*;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, IntoStaticStr)]
#[serde(tag = "kind", content = "symbol")]
pub enum TokenKind {
    Ident(Symbol),

    PreprocessingNum,
    StringLit,
    CharLit,

    Struct,
    Char,
    Int,

    Hashtag,
    Dot,
    DotDotDot,
    Arrow,
    Bang,
    Question,
    Tilde,
    Star,
    Slash,
    Plus,
    Dash,
    Percent,
    PlusPlus,
    DashDash,

    Eq,
    EqEq,
    Neq,
    Leq,
    Lt,
    LtLt, // <<
    Geq,
    Gt,
    GtGt,     // >>
    Amp,      // &
    AmpAmp,   // &&
    Line,     // |
    LineLine, // ||
    Caret,    // ^
    AmpEq,
    LineEq, // |=
    CaretEq,
    PlusEq,
    DashEq,
    SlashEq,
    StarEq,
    PercentEq,
    LtLtEq,
    GtGtEq,

    LBrace, // {
    RBrace,
    LParen,
    RParen,
    LBracket, // [
    RBracket,

    Semicolon,
    Colon,
    Comma,

    Invalid,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range,
}

impl Token {
    pub fn ident_symbol(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Ident(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.into()
    }
}

lazy_static! {
    pub static ref RESERVED_KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut set = HashMap::new();
        set.insert("char", TokenKind::Char);
        set.insert("int", TokenKind::Int);
        set.insert("struct", TokenKind::Struct);

        set
    };
}

/// Token source over a single buffer. The only state is the cursor, so two
/// lexers at the same cursor produce the same tokens.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    source: &'a str,
    cursor: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        return Self { source, cursor: 0 };
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn next(&mut self, symbols: &mut SymbolTable) -> Token {
        let (tok, cursor) = lex_token(self.source, self.cursor, symbols);
        self.cursor = cursor;
        return tok;
    }
}

/// Lexes every token in `source`, including the final `End` token.
pub fn lex(source: &str, symbols: &mut SymbolTable) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next(symbols);
        tokens.push(tok);
        if tok.kind == TokenKind::End {
            return tokens;
        }
    }
}

/// Ranges are `u32`, so only this many bytes of a source are ever lexed.
const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Cuts `source` to at most `max_len` bytes, backing up to the nearest
/// character boundary.
pub(crate) fn truncate_source(source: &str, max_len: usize) -> &str {
    if source.len() <= max_len {
        return source;
    }

    let mut end = max_len;
    while !source.is_char_boundary(end) {
        end -= 1;
    }

    return &source[..end];
}

/// Produces the token starting at or after `cursor`, and the cursor just past
/// it. At the end of input this keeps returning `End` without moving.
///
/// A cursor in the middle of a UTF-8 character produces an `Invalid` token
/// running to the next character. Sources longer than `u32::MAX` bytes are
/// lexed as if they ended there.
pub fn lex_token(source: &str, cursor: u32, symbols: &mut SymbolTable) -> (Token, u32) {
    let source = truncate_source(source, MAX_SOURCE_LEN);
    let data = source.as_bytes();
    let eof = data.len() as u32;

    let start = match skip_trivia(data, cursor as usize) {
        Ok(start) => start,
        Err(comment_start) => {
            let range = r(comment_start as u32, eof);
            let kind = TokenKind::Invalid;
            return (Token { kind, range }, eof);
        }
    };

    if start >= data.len() {
        return (
            Token {
                kind: TokenKind::End,
                range: r(eof, eof),
            },
            eof,
        );
    }

    if !source.is_char_boundary(start) {
        let mut end = start + 1;
        while !source.is_char_boundary(end) {
            end += 1;
        }

        let range = r(start as u32, end as u32);
        let kind = TokenKind::Invalid;
        return (Token { kind, range }, end as u32);
    }

    let res = lex_tok_from_str(&source[start..], symbols);
    let end = (start + res.consumed) as u32;
    let tok = Token {
        kind: res.kind,
        range: r(start as u32, end),
    };

    return (tok, end);
}

/// Skips whitespace and comments. On an unterminated block comment, returns
/// the index where the comment began as the error.
fn skip_trivia(data: &[u8], mut index: usize) -> Result<usize, usize> {
    loop {
        match (data.get(index), data.get(index + 1)) {
            (Some(b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c), _) => index += 1,

            (Some(b'/'), Some(b'/')) => {
                index += 2;
                while let Some(&b) = data.get(index) {
                    if b == b'\n' || b == b'\r' {
                        break;
                    }

                    index += 1;
                }
            }

            (Some(b'/'), Some(b'*')) => {
                let comment_start = index;
                index += 2;
                loop {
                    match (data.get(index), data.get(index + 1)) {
                        (Some(b'*'), Some(b'/')) => {
                            index += 2;
                            break;
                        }
                        (Some(_), _) => index += 1,
                        (None, _) => return Err(comment_start),
                    }
                }
            }

            _ => return Ok(index),
        }
    }
}

struct LexedTok {
    consumed: usize,
    kind: TokenKind,
}

/// Lex a token from the text given. Assumes that we're not at EOF, and
/// there's no whitespace before the token.
fn lex_tok_from_str(text: &str, symbols: &mut SymbolTable) -> LexedTok {
    let data = text.as_bytes();
    let mut index: usize = 0;

    let first = data[index];
    index += 1;

    'simple_syntax: {
        let kind = match first {
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'~' => TokenKind::Tilde,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            b'?' => TokenKind::Question,
            b'#' => TokenKind::Hashtag,

            _ => break 'simple_syntax,
        };

        return LexedTok {
            consumed: index,
            kind,
        };
    }

    'operator: {
        let (increment, kind) = match (first, data.get(index).copied()) {
            (b'+', Some(b'+')) => (1, TokenKind::PlusPlus),
            (b'+', Some(b'=')) => (1, TokenKind::PlusEq),
            (b'+', _) => (0, TokenKind::Plus),

            (b'-', Some(b'-')) => (1, TokenKind::DashDash),
            (b'-', Some(b'>')) => (1, TokenKind::Arrow),
            (b'-', Some(b'=')) => (1, TokenKind::DashEq),
            (b'-', _) => (0, TokenKind::Dash),

            // Comments were already skipped, so a slash here is division
            (b'/', Some(b'=')) => (1, TokenKind::SlashEq),
            (b'/', _) => (0, TokenKind::Slash),

            (b'*', Some(b'=')) => (1, TokenKind::StarEq),
            (b'*', _) => (0, TokenKind::Star),

            (b'%', Some(b'=')) => (1, TokenKind::PercentEq),
            (b'%', _) => (0, TokenKind::Percent),

            (b'>', Some(b'=')) => (1, TokenKind::Geq),
            (b'>', Some(b'>')) => match data.get(index + 1) {
                Some(b'=') => (2, TokenKind::GtGtEq),
                _ => (1, TokenKind::GtGt),
            },
            (b'>', _) => (0, TokenKind::Gt),

            (b'<', Some(b'=')) => (1, TokenKind::Leq),
            (b'<', Some(b'<')) => match data.get(index + 1) {
                Some(b'=') => (2, TokenKind::LtLtEq),
                _ => (1, TokenKind::LtLt),
            },
            (b'<', _) => (0, TokenKind::Lt),

            (b'!', Some(b'=')) => (1, TokenKind::Neq),
            (b'!', _) => (0, TokenKind::Bang),

            (b'=', Some(b'=')) => (1, TokenKind::EqEq),
            (b'=', _) => (0, TokenKind::Eq),

            (b'|', Some(b'=')) => (1, TokenKind::LineEq),
            (b'|', Some(b'|')) => (1, TokenKind::LineLine),
            (b'|', _) => (0, TokenKind::Line),

            (b'&', Some(b'=')) => (1, TokenKind::AmpEq),
            (b'&', Some(b'&')) => (1, TokenKind::AmpAmp),
            (b'&', _) => (0, TokenKind::Amp),

            (b'^', Some(b'=')) => (1, TokenKind::CaretEq),
            (b'^', _) => (0, TokenKind::Caret),

            _ => break 'operator,
        };

        index += increment;

        return LexedTok {
            consumed: index,
            kind,
        };
    }

    match first {
        b'A'..=b'Z' | b'a'..=b'z' | b'_' => {
            while index < data.len() && is_ident_char(data[index]) {
                index += 1;
            }

            let word = &text[..index];
            let kind = match RESERVED_KEYWORDS.get(word) {
                Some(&kind) => kind,
                None => TokenKind::Ident(symbols.add_str(word)),
            };

            return LexedTok {
                consumed: index,
                kind,
            };
        }

        b'0'..=b'9' => return lex_num(index, data),

        b'.' => {
            if let Some(b'0'..=b'9') = data.get(index) {
                return lex_num(index + 1, data);
            }

            if let (Some(b'.'), Some(b'.')) = (data.get(index), data.get(index + 1)) {
                return LexedTok {
                    consumed: index + 2,
                    kind: TokenKind::DotDotDot,
                };
            }

            return LexedTok {
                consumed: index,
                kind: TokenKind::Dot,
            };
        }

        b'\"' => return lex_character(TokenKind::StringLit, b'\"', index, data),
        b'\'' => return lex_character(TokenKind::CharLit, b'\'', index, data),

        _ => {
            let width = text.chars().next().map(char::len_utf8).unwrap_or(1);
            return LexedTok {
                consumed: width,
                kind: TokenKind::Invalid,
            };
        }
    }
}

pub fn is_ident_char(cur: u8) -> bool {
    cur.is_ascii_alphanumeric() || cur == b'_'
}

// NOTE: We assume at this point that we are in fact lexing a number.
fn lex_num(mut index: usize, data: &[u8]) -> LexedTok {
    /*
    https://gcc.gnu.org/onlinedocs/cpp/Tokenization.html

    Preprocessing numbers begin with an optional period, a required decimal
    digit, and then continue with any sequence of letters, digits, underscores,
    periods, and exponents. Exponents are the two-character sequences ‘e+’,
    ‘e-’, ‘E+’, ‘E-’, ‘p+’, ‘p-’, ‘P+’, and ‘P-’.
    */

    while index < data.len() {
        let lower = data[index].to_ascii_lowercase();

        match lower {
            b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' => {}
            _ => break,
        }

        index += 1;

        if lower == b'e' || lower == b'p' {
            if let Some(b'-' | b'+') = data.get(index) {
                index += 1;
            }
        }
    }

    return LexedTok {
        consumed: index,
        kind: TokenKind::PreprocessingNum,
    };
}

/// Lexes a string or character literal. A literal that runs into a newline
/// or the end of input becomes a single `Invalid` token up to that point.
fn lex_character(kind: TokenKind, surround: u8, mut index: usize, data: &[u8]) -> LexedTok {
    while index < data.len() {
        match data[index] {
            b if b == surround => {
                return LexedTok {
                    consumed: index + 1,
                    kind,
                }
            }
            b'\n' | b'\r' => break,
            b'\\' => index += 2,
            _ => index += 1,
        }
    }

    return LexedTok {
        consumed: core::cmp::min(index, data.len()),
        kind: TokenKind::Invalid,
    };
}
