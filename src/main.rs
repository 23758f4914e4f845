extern crate clap;
extern crate codespan_reporting;
extern crate tci_front;

use clap::Parser;
use codespan_reporting::term::termcolor::*;
use std::io::Write;
use std::path::PathBuf;
use tci_front::api::*;

#[derive(Parser)]
#[clap(author = "Albert Liu", about = "Parses the global declarations of C files.")]
struct Cli {
    #[clap(required = true, help = "paths to the files to parse")]
    files: Vec<PathBuf>,

    #[clap(long, help = "print a nested version of the AST")]
    print_ast: bool,

    #[clap(long, help = "print every token before parsing")]
    tokens: bool,

    #[clap(long, help = "print results and errors as JSON")]
    json: bool,

    #[clap(long, help = "disable colors in error output")]
    no_color: bool,

    #[clap(short, long, help = "log what the parser is doing to stderr")]
    verbose: bool,
}

fn main() {
    let args = Cli::parse();
    set_verbose(args.verbose);

    let color = match args.no_color {
        true => ColorChoice::Never,
        false => ColorChoice::Auto,
    };
    let writer = StandardStream::stderr(color);

    let mut files = FileDb::new();
    let mut failed = false;

    for path in &args.files {
        let file = match files.add_from_fs(path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("failed to read {}: {}", path.display(), err);
                failed = true;
                continue;
            }
        };

        if !run_file(&args, &files, file, &writer) {
            failed = true;
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Returns whether the file parsed successfully.
fn run_file(args: &Cli, files: &FileDb, file: u32, writer: &StandardStream) -> bool {
    let source = match files.get(file) {
        Some(f) => f.source.as_str(),
        None => return false,
    };

    if args.tokens {
        let mut symbols = SymbolTable::new();
        let tokens = lex(source, &mut symbols);
        if args.json {
            print_json(&tokens);
        } else {
            for tok in &tokens {
                let text = &source[tok.range.start as usize..tok.range.end as usize];
                println!("{:<16} {:<10} {:?}", tok.name(), tok.range.to_string(), text);
            }
        }
    }

    let buckets = BucketList::new();
    let program = match parse(&buckets, source) {
        Ok(program) => program,
        Err(err) => {
            if args.json {
                print_json(&err);
            } else if let Err(e) = emit_err(&err, files, file, &mut writer.lock()) {
                eprintln!("failed to render error: {}", e);
            }

            return false;
        }
    };

    if args.json {
        print_json(&program.stmts);
    } else if args.print_ast {
        print!("{}", display_tree(&program.stmts, &program.symbols));
    }

    let _ = std::io::stdout().flush();
    return true;
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("failed to serialize output: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let args = Cli::parse_from(["tci-front", "--print-ast", "--no-color", "a.c", "b.c"]);
        assert!(args.print_ast);
        assert!(args.no_color);
        assert!(!args.json);
        assert_eq!(args.files.len(), 2);

        assert!(Cli::try_parse_from(["tci-front"]).is_err());
    }
}
