use crate::api::*;
use std::fmt::Write;

/// Prints the declarations in a text format, so that they're a lil easier to
/// read. Output right now looks like this:
///
/// ```text
/// Decl p 0..7
/// └ Type Int ** 0..6
/// Func main 9..54 (definition, 5 body tokens)
/// └ Type Int 9..12
/// └ Param argc 18..26
/// | └ Type Int 18..21
/// └ Param argv 28..39
/// | └ Type Char ** 28..35
/// ```
pub fn display_tree(stmts: &[Stmt], symbols: &SymbolTable) -> String {
    let mut out = String::new();
    for stmt in stmts {
        write_stmt(&mut out, stmt, symbols);
    }

    return out;
}

fn name(symbols: &SymbolTable, symbol: Symbol) -> &str {
    symbols.to_str(symbol).unwrap_or("<unknown>")
}

fn indent(out: &mut String, depth: u32) {
    if depth > 0 {
        for _ in 0..(depth - 1) {
            *out += "| ";
        }

        *out += "└ ";
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, symbols: &SymbolTable) {
    match stmt.kind {
        StmtKind::TypeDecl(ty) => {
            let _ = writeln!(out, "TypeDecl {}", stmt.range);
            write_type(out, &ty, symbols, 1);
        }

        StmtKind::Decl(decl) => write_decl(out, "Decl", &decl, symbols, 0),

        StmtKind::Func(func) => {
            let _ = write!(out, "Func {} {}", name(symbols, func.ident), stmt.range);
            if func.is_defn {
                let _ = writeln!(out, " (definition, {} body tokens)", func.body.len());
            } else {
                out.push('\n');
            }

            write_type(out, &func.return_type, symbols, 1);
            for param in func.params {
                indent(out, 1);
                match param.ident {
                    Some(ident) => {
                        let _ = write!(out, "Param {}", name(symbols, ident));
                    }
                    None => *out += "Param",
                }

                let _ = writeln!(out, " {}", param.range);
                write_type(out, &param.ty, symbols, 2);
            }
        }
    }
}

fn write_decl(out: &mut String, label: &str, decl: &Decl, symbols: &SymbolTable, depth: u32) {
    indent(out, depth);
    let _ = writeln!(out, "{} {} {}", label, name(symbols, decl.ident), decl.range);
    write_type(out, &decl.ty, symbols, depth + 1);
}

fn write_type(out: &mut String, ty: &Type, symbols: &SymbolTable, depth: u32) {
    indent(out, depth);
    *out += "Type ";

    let mut fields: &[Decl] = &[];
    match ty.kind {
        TypeKind::Ident(symbol) => *out += name(symbols, symbol),
        TypeKind::Char => *out += "Char",
        TypeKind::Int => *out += "Int",
        TypeKind::Struct { ident, fields: f } => {
            *out += "Struct";
            if let Some(ident) = ident {
                out.push(' ');
                *out += name(symbols, ident);
            }

            fields = f;
        }
    }

    if ty.pointer_count > 0 {
        out.push(' ');
        for _ in 0..ty.pointer_count {
            out.push('*');
        }
    }

    let _ = writeln!(out, " {}", ty.range);

    for field in fields {
        write_decl(out, "Field", field, symbols, depth + 1);
    }
}
