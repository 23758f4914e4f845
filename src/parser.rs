/*!
Recursive-descent parser for global declarations.

There are three routines, each one a grammar production:

```text
global_decl := simple_decl ';'
             | simple_decl '(' [simple_decl (',' simple_decl)*] ')' (';' | body)
simple_decl := type_prefix '*'* [ident]
type_prefix := 'struct' [ident] '{' (simple_decl ';')* '}' | ident | 'char' | 'int'
```

Function bodies aren't parsed here; they're kept as the raw run of tokens
between the braces for a later pass. Errors are returned as values and never
recovered from inside a construct. After an error the parser can still be
asked for the next declaration.
*/

use crate::api::*;

pub struct Parser<'a> {
    buckets: &'a BucketList,
    lexer: Lexer<'a>,
    symbols: SymbolTable,

    /// Tokens that were peeked but not yet consumed, most recent last
    tokens: Vec<Token>,

    /// End of the last token that was popped
    last_end: u32,
}

impl<'a> Parser<'a> {
    pub fn new(buckets: &'a BucketList, source: &'a str) -> Self {
        return Self {
            buckets,
            lexer: Lexer::new(source),
            symbols: SymbolTable::new(),
            tokens: Vec::new(),
            last_end: 0,
        };
    }

    pub fn pop(&mut self) -> Token {
        let tok = match self.tokens.pop() {
            Some(tok) => tok,
            None => self.lexer.next(&mut self.symbols),
        };

        self.last_end = tok.range.end;
        return tok;
    }

    pub fn peek(&mut self) -> Token {
        if let Some(&tok) = self.tokens.last() {
            return tok;
        }

        let tok = self.lexer.next(&mut self.symbols);
        self.tokens.push(tok);
        return tok;
    }

    pub fn is_done(&mut self) -> bool {
        self.peek().kind == TokenKind::End
    }

    /// Position of the underlying lexer, which is past any buffered tokens.
    pub fn lexer_cursor(&self) -> u32 {
        self.lexer.cursor()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    pub fn parse_global_decl(&mut self) -> Result<Stmt<'a>, ParseError> {
        let mut stmt = self.parse_simple_decl()?;

        let tok = self.pop();
        match (tok.kind, stmt.kind) {
            (TokenKind::Semicolon, _) => {
                stmt.range.end = tok.range.end;
                debug!("global declaration at {}", stmt.range);
                return Ok(stmt);
            }

            (TokenKind::LParen, StmtKind::Decl(decl)) => {
                return self.parse_func_block(stmt.range.start, decl);
            }

            _ => throw!(
                Stmt,
                "unexpected token when parsing end of statement",
                tok.range,
                "this token is invalid in this context"
            ),
        }
    }

    /// Parses the rest of a function after its opening parenthesis.
    fn parse_func_block(&mut self, start: u32, decl: Decl<'a>) -> Result<Stmt<'a>, ParseError> {
        let mut params = Vec::new();

        if self.peek().kind != TokenKind::RParen {
            loop {
                params.push(self.parse_param(&decl)?);

                if self.peek().kind != TokenKind::Comma {
                    break;
                }

                self.pop();
            }

            let tok = self.peek();
            if tok.kind != TokenKind::RParen {
                throw!(
                    Stmt,
                    "unexpected token when parsing end of parameter",
                    tok.range,
                    "this token is invalid in this context"
                );
            }
        }

        self.pop();

        let mut func = FuncBlock {
            return_type: decl.ty,
            ident: decl.ident,
            params: self.buckets.add_array(params),
            body: &[],
            is_defn: false,
        };

        let tok = self.pop();
        match tok.kind {
            TokenKind::Semicolon => {
                debug!("function prototype at {}", r(start, tok.range.end));
                return Ok(Stmt {
                    kind: StmtKind::Func(func),
                    range: r(start, tok.range.end),
                });
            }

            TokenKind::LBrace => {}

            _ => throw!(
                Stmt,
                "unexpected token when parsing beginning of function body",
                tok.range,
                "this token is invalid in this context"
            ),
        }

        func.body = self.parse_func_body(tok)?;
        func.is_defn = true;

        let range = r(start, self.last_end);
        debug!("function definition at {} with {} body tokens", range, func.body.len());
        return Ok(Stmt {
            kind: StmtKind::Func(func),
            range,
        });
    }

    fn parse_param(&mut self, func: &Decl<'a>) -> Result<Param<'a>, ParseError> {
        let param = self.parse_typed_name();
        let (ty, ident, range) = match param {
            Ok(param) => param,
            Err(err) => {
                let label = "in the parameter list of this function";
                return Err(err.with_label(func.range, label));
            }
        };

        return Ok(Param { ty, ident, range });
    }

    /// Collects the tokens of a function body, starting from the opening
    /// brace that was already popped.
    fn parse_func_body(&mut self, open: Token) -> Result<&'a [Token], ParseError> {
        let mut body = vec![open];
        let mut depth: u32 = 1;

        while depth > 0 {
            let tok = self.pop();
            match tok.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,

                TokenKind::Invalid => throw!(
                    Stmt,
                    "unterminated function body",
                    tok.range,
                    "this token is not valid",
                    open.range,
                    "function body begins here"
                ),

                TokenKind::End => throw!(
                    Stmt,
                    "unterminated function body",
                    tok.range,
                    "expected '}' before the end of the file",
                    open.range,
                    "function body begins here"
                ),

                _ => {}
            }

            body.push(tok);
        }

        return Ok(self.buckets.add_array(body));
    }

    pub fn parse_simple_decl(&mut self) -> Result<Stmt<'a>, ParseError> {
        let (ty, ident, range) = self.parse_typed_name()?;

        let kind = match ident {
            Some(ident) => StmtKind::Decl(Decl { ty, ident, range }),
            None => StmtKind::TypeDecl(ty),
        };

        return Ok(Stmt { kind, range });
    }

    /// A type, its pointer stars, and the name after them if there is one.
    fn parse_typed_name(&mut self) -> Result<(Type<'a>, Option<Symbol>, Range), ParseError> {
        let start = self.peek().range.start;
        let mut ty = self.parse_type_prefix()?;

        while self.peek().kind == TokenKind::Star {
            let star = self.pop();
            ty.pointer_count += 1;
            ty.range.end = star.range.end;
        }

        let tok = self.peek();
        let ident = match tok.kind {
            TokenKind::Ident(ident) => ident,
            _ => return Ok((ty, None, r(start, self.last_end))),
        };

        self.pop();

        let eq = self.peek();
        if eq.kind == TokenKind::Eq {
            self.pop();
            throw!(
                NotImplemented,
                "assignment declarations aren't implemented yet",
                eq.range,
                "initializer starts here"
            );
        }

        return Ok((ty, Some(ident), r(start, tok.range.end)));
    }

    pub fn parse_type_prefix(&mut self) -> Result<Type<'a>, ParseError> {
        let tok = self.pop();

        let kind = match tok.kind {
            TokenKind::Struct => return self.parse_struct(tok),
            TokenKind::Ident(symbol) => TypeKind::Ident(symbol),
            TokenKind::Char => TypeKind::Char,
            TokenKind::Int => TypeKind::Int,

            _ => throw!(
                Type,
                "found unexpected token when parsing type",
                tok.range,
                "this token is not allowed to begin a type in the global context"
            ),
        };

        return Ok(Type::new(kind, tok.range));
    }

    /// Parses a struct type after the `struct` keyword was popped.
    fn parse_struct(&mut self, struct_tok: Token) -> Result<Type<'a>, ParseError> {
        let ident = match self.peek().kind {
            TokenKind::Ident(symbol) => {
                self.pop();
                Some(symbol)
            }
            _ => None,
        };

        let tok = self.pop();
        if tok.kind != TokenKind::LBrace {
            throw!(
                Type,
                "expected '{' character",
                tok.range,
                "this token is invalid for the current context"
            );
        }

        let mut fields = Vec::new();
        while self.peek().kind != TokenKind::RBrace {
            let field = match self.parse_simple_decl() {
                Ok(field) => field,
                Err(err) => return Err(err.with_label(struct_tok.range, "in this struct")),
            };

            let decl = match field.kind {
                StmtKind::Decl(decl) => decl,
                _ => {
                    let tok = self.peek();
                    throw!(
                        Type,
                        "expected identifier for struct field",
                        tok.range,
                        "this token is invalid for the current context"
                    );
                }
            };

            let tok = self.pop();
            if tok.kind != TokenKind::Semicolon {
                throw!(
                    Type,
                    "expected ';' character",
                    tok.range,
                    "this token is invalid for the current context"
                );
            }

            fields.push(decl);
        }

        let close = self.pop();
        let kind = TypeKind::Struct {
            ident,
            fields: self.buckets.add_array(fields),
        };

        return Ok(Type::new(kind, r_from(struct_tok.range, close.range)));
    }
}
