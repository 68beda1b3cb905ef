//! # Helpers for the language server
//!
//! Pieces shared between the library and the server executable: JSON-RPC
//! error codes, diagnostic construction, and the stderr logger.

use std::io::Write;
use lsp_types as lsp;

// JSON-RPC error codes; are they defined somewhere else?
// -32768 through -32000 are reserved
pub mod rpc_error {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
}

pub fn basic_diag(range: lsp::Range,mess: &str,severity: lsp::DiagnosticSeverity) -> lsp::Diagnostic {
    lsp::Diagnostic {
        range,
        severity: Some(severity),
        code: None,
        code_description: None,
        source: None,
        message: mess.to_string(),
        related_information: None,
        tags: None,
        data: None
    }
}

/// Set up logging to standard error, one line per event.
/// Every line carries the server prefix so a client multiplexing several
/// servers can attribute the stream.  There is no log file.
pub fn setup_stderr_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf,record| {
            writeln!(buf,"[hlasm-lsp] {}",record.args())
        })
        .target(env_logger::Target::Stderr)
        .init();
}
