use crate::api::*;
use wasm_bindgen::prelude::*;

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum OutMessage<'a> {
    Parsed {
        stmts: &'a [Stmt<'a>],
        symbols: &'a [String],
    },
    CompileError {
        rendered: String,
        error: &'a ParseError,
    },
    InvalidInput(String),
}

const FILE_NAME: &str = "main.c";

fn message_json(message: &OutMessage) -> String {
    match serde_json::to_string(message) {
        Ok(json) => json,
        Err(err) => format!(r#"{{"type":"InvalidInput","payload":{:?}}}"#, err.to_string()),
    }
}

/// Parses `source` and returns the result as a JSON message for the web
/// frontend.
#[wasm_bindgen]
pub fn parse_to_json(source: &str) -> String {
    let buckets = BucketList::new();

    let program = match parse(&buckets, source) {
        Ok(program) => program,
        Err(error) => {
            let mut files = FileDb::new();
            let file = files.add(FILE_NAME, source);

            let mut writer = StringWriter::new();
            if let Err(err) = emit_err(&error, &files, file, &mut writer) {
                return message_json(&OutMessage::InvalidInput(err.to_string()));
            }

            let rendered = writer.into_string();
            return message_json(&OutMessage::CompileError {
                rendered,
                error: &error,
            });
        }
    };

    return message_json(&OutMessage::Parsed {
        stmts: &program.stmts,
        symbols: program.symbols.names(),
    });
}
