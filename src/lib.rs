#[macro_use]
pub mod util;

#[macro_use]
pub mod error;

pub mod ast;
pub mod buckets;
pub mod filedb;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod symbol_table;
pub mod wasm;

#[cfg(test)]
mod tests;

pub mod api {
    pub use super::ast::{Decl, FuncBlock, Param, Stmt, StmtKind, Type, TypeKind};
    pub use super::buckets::BucketList;
    pub use super::error::{ErrorKind, ErrorLabel, ParseError};
    pub use super::filedb::{File, FileDb, Location};
    pub use super::format::display_tree;
    pub use super::lexer::{lex, lex_token, Lexer, Token, TokenKind};
    pub use super::parser::Parser;
    pub use super::symbol_table::{Symbol, SymbolTable};
    pub use super::util::{r, r_from, register_output, set_verbose, Range, StringWriter};
    pub use super::{emit_err, parse, Program};

    pub(crate) use hashbrown::HashMap;
    pub(crate) use lazy_static::lazy_static;
    pub(crate) use serde::Serialize;
    pub(crate) use strum::IntoStaticStr;

    #[cfg(test)]
    pub use ntest::*;
}

use api::*;
use codespan_reporting::files::Error as FilesError;
use codespan_reporting::term::termcolor::WriteColor;

/// Every global declaration in one source buffer, plus the names its
/// symbols refer to.
#[derive(Debug)]
pub struct Program<'a> {
    pub stmts: Vec<Stmt<'a>>,
    pub symbols: SymbolTable,
}

/// Parses declarations until the end of `source`, stopping at the first
/// error.
pub fn parse<'a>(buckets: &'a BucketList, source: &'a str) -> Result<Program<'a>, ParseError> {
    let mut parser = Parser::new(buckets, source);
    let mut stmts = Vec::new();

    while !parser.is_done() {
        stmts.push(parser.parse_global_decl()?);
    }

    debug!("parsed {} declarations", stmts.len());

    return Ok(Program {
        stmts,
        symbols: parser.into_symbols(),
    });
}

pub fn emit_err(
    err: &ParseError,
    files: &FileDb,
    file: u32,
    writer: &mut impl WriteColor,
) -> Result<(), FilesError> {
    let config = codespan_reporting::term::Config::default();
    return codespan_reporting::term::emit(writer, &config, files, &err.diagnostic(file));
}
