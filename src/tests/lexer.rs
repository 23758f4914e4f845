use crate::api::*;

fn run_test(source: &str, expected: &[&str]) -> Vec<Token> {
    let mut symbols = SymbolTable::new();
    let tokens = lex(source, &mut symbols);

    let mut index = 0;
    for tok in tokens.iter() {
        if index >= expected.len() {
            panic!("got extra token {:?} at index {}", tok, index);
        }

        if tok.name() != expected[index] {
            panic!(
                "At index {}, expected {} but got {:?}",
                index, expected[index], tok.kind
            );
        }

        index += 1;
    }

    if index != expected.len() {
        panic!("didn't consume all tokens (only consumed {})", index);
    }

    return tokens;
}

#[test]
#[timeout(300)]
fn test_lexer_simple() {
    const SOURCE_TEXT: &'static str = r#"
int main(int argc, char* argv[]) {
    return *"printf"[1 + 1];
}
"#;

    const TOKENS: &'static [&'static str] = &[
        "Int",
        "Ident",
        "LParen",
        "Int",
        "Ident",
        "Comma",
        "Char",
        "Star",
        "Ident",
        "LBracket",
        "RBracket",
        "RParen",
        "LBrace",
        "Ident",
        "Star",
        "StringLit",
        "LBracket",
        "PreprocessingNum",
        "Plus",
        "PreprocessingNum",
        "RBracket",
        "Semicolon",
        "RBrace",
        "End",
    ];

    let tokens = run_test(SOURCE_TEXT, TOKENS);
    for tok in &tokens {
        assert!(tok.range.start <= tok.range.end);
        assert!(tok.range.end as usize <= SOURCE_TEXT.len());
    }
}

#[test]
#[timeout(300)]
fn test_lexer_operators() {
    const SOURCE_TEXT: &'static str = "a->b ... x <<= 2 >>= != && || ++ -- . .5 1.5e+3";

    run_test(
        SOURCE_TEXT,
        &[
            "Ident",
            "Arrow",
            "Ident",
            "DotDotDot",
            "Ident",
            "LtLtEq",
            "PreprocessingNum",
            "GtGtEq",
            "Neq",
            "AmpAmp",
            "LineLine",
            "PlusPlus",
            "DashDash",
            "Dot",
            "PreprocessingNum",
            "PreprocessingNum",
            "End",
        ],
    );
}

#[test]
#[timeout(300)]
fn test_lexer_keywords_and_symbols() {
    let mut symbols = SymbolTable::new();
    let tokens = lex("struct structs int x intx x", &mut symbols);

    assert_eq!(tokens[0].kind, TokenKind::Struct);
    assert_eq!(tokens[2].kind, TokenKind::Int);

    let structs = tokens[1].ident_symbol();
    let x = tokens[3].ident_symbol();
    assert_eq!(structs, symbols.lookup("structs"));
    assert_eq!(x, symbols.lookup("x"));
    assert_eq!(tokens[5].ident_symbol(), x);
    assert_ne!(tokens[4].ident_symbol(), x);
    assert_eq!(symbols.len(), 3);
}

#[test]
#[timeout(300)]
fn test_lexer_comments() {
    const SOURCE_TEXT: &'static str = "int /* c */ x; // tail\n/* open";

    let tokens = run_test(
        SOURCE_TEXT,
        &["Int", "Ident", "Semicolon", "Invalid", "End"],
    );

    assert_eq!(tokens[1].range, r(12, 13));
    assert_eq!(tokens[3].range, r(23, 30));
    assert_eq!(tokens[4].range, r(30, 30));
}

#[test]
#[timeout(300)]
fn test_lexer_invalid() {
    let tokens = run_test("@ é", &["Invalid", "Invalid", "End"]);
    assert_eq!(tokens[0].range, r(0, 1));
    assert_eq!(tokens[1].range, r(2, 4));

    let tokens = run_test("\"abc\nint", &["Invalid", "Int", "End"]);
    assert_eq!(tokens[0].range, r(0, 4));

    run_test("'a' \"b\\\"c\"", &["CharLit", "StringLit", "End"]);
}

#[test]
#[timeout(300)]
fn test_lexer_end_repeats() {
    let mut symbols = SymbolTable::new();
    let mut lexer = Lexer::new("x  ");

    assert_eq!(lexer.next(&mut symbols).range, r(0, 1));
    for _ in 0..3 {
        let tok = lexer.next(&mut symbols);
        assert_eq!(tok.kind, TokenKind::End);
        assert_eq!(tok.range, r(3, 3));
    }

    assert_eq!(lexer.cursor(), 3);
}

#[test]
#[timeout(300)]
fn test_lex_token_is_pure() {
    const SOURCE_TEXT: &'static str = "char  *name;";
    let mut symbols = SymbolTable::new();

    let (first, cursor) = lex_token(SOURCE_TEXT, 4, &mut symbols);
    let (second, cursor2) = lex_token(SOURCE_TEXT, 4, &mut symbols);
    assert_eq!(first, second);
    assert_eq!(cursor, cursor2);
    assert_eq!(first.kind, TokenKind::Star);
    assert_eq!(first.range, r(6, 7));

    let (name, _) = lex_token(SOURCE_TEXT, cursor, &mut symbols);
    let (name2, _) = lex_token(SOURCE_TEXT, cursor, &mut symbols);
    assert_eq!(name.ident_symbol(), name2.ident_symbol());
    assert_eq!(symbols.len(), 1);
}

#[test]
#[timeout(300)]
fn test_lex_token_mid_character() {
    const SOURCE_TEXT: &'static str = "é x";
    let mut symbols = SymbolTable::new();

    let (tok, cursor) = lex_token(SOURCE_TEXT, 1, &mut symbols);
    assert_eq!(tok.kind, TokenKind::Invalid);
    assert_eq!(tok.range, r(1, 2));
    assert_eq!(cursor, 2);

    let (tok, _) = lex_token(SOURCE_TEXT, cursor, &mut symbols);
    assert_eq!(tok.range, r(3, 4));
    assert!(tok.ident_symbol().is_some());

    let (tok, cursor) = lex_token(SOURCE_TEXT, 100, &mut symbols);
    assert_eq!(tok.kind, TokenKind::End);
    assert_eq!(tok.range, r(4, 4));
    assert_eq!(cursor, 4);
}

#[test]
#[timeout(300)]
fn test_truncate_source() {
    use crate::lexer::truncate_source;

    assert_eq!(truncate_source("int x;", 100), "int x;");
    assert_eq!(truncate_source("int x;", 3), "int");

    // 'é' is two bytes, so cutting through it backs up to before it
    assert_eq!(truncate_source("aé", 2), "a");
    assert_eq!(truncate_source("aé", 3), "aé");
}
