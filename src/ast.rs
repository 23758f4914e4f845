/*!
This module describes the AST created by the parser.

Child sequences (struct fields, parameters, function bodies) are slices
into the parser's `BucketList`, so every node is `Copy` and the whole tree
goes away when the bucket list is dropped.
*/

use crate::api::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum TypeKind<'a> {
    Ident(Symbol),
    Char,
    Int,

    /// `struct [ident] { fields... }`
    Struct {
        ident: Option<Symbol>,
        fields: &'a [Decl<'a>],
    },
}

/// A base type plus the pointer stars that followed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Type<'a> {
    pub kind: TypeKind<'a>,
    pub range: Range,
    pub pointer_count: u32,
}

/// A named, typed binding. Used for struct fields and variable declarations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decl<'a> {
    pub ty: Type<'a>,
    pub ident: Symbol,
    pub range: Range,
}

/// A function parameter. Prototypes can leave the name off, as in
/// `int f(int, char);` or `int main(void)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Param<'a> {
    pub ty: Type<'a>,
    pub ident: Option<Symbol>,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuncBlock<'a> {
    pub return_type: Type<'a>,
    pub ident: Symbol,
    pub params: &'a [Param<'a>],

    /// Raw tokens from the opening brace through the matching closing brace.
    /// Empty for prototypes.
    pub body: &'a [Token],
    pub is_defn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum StmtKind<'a> {
    /// A type with no name after it, e.g. `struct a { int b; };`
    TypeDecl(Type<'a>),
    Decl(Decl<'a>),
    Func(FuncBlock<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stmt<'a> {
    pub kind: StmtKind<'a>,
    pub range: Range,
}

impl<'a> Type<'a> {
    pub fn new(kind: TypeKind<'a>, range: Range) -> Self {
        Self {
            kind,
            range,
            pointer_count: 0,
        }
    }
}

impl<'a> Stmt<'a> {
    pub fn decl(&self) -> Option<&Decl<'a>> {
        match &self.kind {
            StmtKind::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn func(&self) -> Option<&FuncBlock<'a>> {
        match &self.kind {
            StmtKind::Func(func) => Some(func),
            _ => None,
        }
    }
}
