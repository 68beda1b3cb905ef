//! This is the HLASM language server.
//! Cargo will compile this to a standalone executable.
//!
//! The hlasm_lsp library crate provides the analysis.
//! The server activity is all in this file and its submodules.

use lsp_types as lsp;
use lsp_server;
use serde_json;
use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use hlasm_lsp::lang::hlasm::catalogue::Catalogue;
use hlasm_lsp::lang::hlasm::completions::CompletionProvider;
use hlasm_lsp::lang::hlasm::diagnostics::Analyzer;
use hlasm_lsp::lang::hlasm::hovers::HoverProvider;
use hlasm_lsp::lang::hlasm::navigation::NavigationProvider;
use hlasm_lsp::lang::hlasm::AnalysisState;

mod notification;
mod request;

struct Tools {
    /// URI string to current document text
    documents: HashMap<String,String>,
    /// URI string to latest analysis state, always replaced together
    /// with `documents`
    doc_states: HashMap<String,Arc<AnalysisState>>,
    analyzer: Analyzer,
    hover_provider: HoverProvider,
    completion_provider: CompletionProvider,
    navigation_provider: NavigationProvider,
    shutdown_received: bool
}

impl Tools {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            doc_states: HashMap::new(),
            analyzer: Analyzer::new(),
            hover_provider: HoverProvider::new(),
            completion_provider: CompletionProvider::new(),
            navigation_provider: NavigationProvider::new(),
            shutdown_received: false
        }
    }
    fn share_catalogue(&mut self,catalogue: Arc<Catalogue>) {
        self.hover_provider.use_shared_catalogue(Arc::clone(&catalogue));
        self.completion_provider.use_shared_catalogue(Arc::clone(&catalogue));
        self.navigation_provider.use_shared_catalogue(catalogue);
    }
}

/// Diagnostics are never requested by the client.
/// This server pushes them up after the analysis pass, which in turn is
/// triggered by document changes.
pub fn push_diagnostics(connection: &lsp_server::Connection,uri: lsp::Url,diagnostics: Vec<lsp::Diagnostic>) {
    let note = lsp_server::Notification::new(
        "textDocument/publishDiagnostics".to_string(),
        lsp::PublishDiagnosticsParams {
            uri,
            diagnostics,
            version: None
        }
    );
    match connection.sender.send(lsp_server::Message::Notification(note)) {
        Err(_) => log::error!("could not push diagnostics"),
        Ok(()) => {}
    }
}

fn main() -> Result<(),Box<dyn Error + Sync + Send>> {

    let mut data_dir: Option<PathBuf> = None;
    let mut macro_dirs: Vec<PathBuf> = Vec::new();

    // process arguments, anything unrecognized is ignored
    let mut args = std::env::args().into_iter();
    args.next();
    while let Some(val) = args.next() {
        if &val == "--data-dir" {
            if let Some(val) = args.next() {
                data_dir = Some(PathBuf::from(val));
            }
        } else if &val == "--macro-dir" {
            if let Some(val) = args.next() {
                macro_dirs.push(PathBuf::from(val));
            }
        }
    }
    hlasm_lsp::lang::server::setup_stderr_logger();

    let mut tools = Tools::new();
    tools.navigation_provider.set_macro_dirs(macro_dirs);

    let (connection,io_threads) = lsp_server::Connection::stdio();

    log::info!("start initializing connection");
    let (id,params) = connection.initialize_start()?;
    let params: lsp::InitializeParams = serde_json::from_value(params)?;

    // the catalogue lives beside the workspace unless overridden
    #[allow(deprecated)]
    let root_path = params.root_uri.as_ref().and_then(|uri| uri.to_file_path().ok());
    let resolved = match data_dir {
        Some(dir) => dir,
        None => match root_path {
            Some(root) => root.join("data"),
            None => PathBuf::from("data")
        }
    };
    let catalogue = Arc::new(Catalogue::load(&resolved.join("macros.json")));
    tools.share_catalogue(catalogue);

    let result = lsp::InitializeResult {
        capabilities: lsp::ServerCapabilities {
            text_document_sync: Some(lsp::TextDocumentSyncCapability::Options(
                lsp::TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(lsp::TextDocumentSyncKind::FULL),
                    will_save: None,
                    will_save_wait_until: None,
                    save: None
                }
            )),
            hover_provider: Some(lsp::HoverProviderCapability::Simple(true)),
            completion_provider: Some(lsp::CompletionOptions {
                resolve_provider: Some(false),
                trigger_characters: Some(vec![" ".to_string()]),
                ..lsp::CompletionOptions::default()
            }),
            definition_provider: Some(lsp::OneOf::Left(true)),
            references_provider: Some(lsp::OneOf::Left(true)),
            ..lsp::ServerCapabilities::default()
        },
        server_info: Some(lsp::ServerInfo {
            name: "hlasm-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string())
        })
    };
    connection.initialize_finish(id,serde_json::to_value(result)?)?;
    log::info!("connection initialized");

    // Main loop.  Messages are handled one at a time in arrival order;
    // diagnostics for an open or change are published before the next
    // message is read.
    let mut exit_received = false;
    while let Ok(msg) = connection.receiver.recv() {
        match msg {
            lsp_server::Message::Notification(note) => {
                if notification::handle_notification(&connection,note,&mut tools) {
                    exit_received = true;
                    break;
                }
            },
            lsp_server::Message::Request(req) => {
                request::handle_request(&connection,req,&mut tools);
            },
            lsp_server::Message::Response(resp) => {
                log::warn!("unhandled response: {}",resp.id);
            }
        }
    }

    drop(connection);
    io_threads.join()?;
    if exit_received && !tools.shutdown_received {
        log::error!("exit received without shutdown");
        std::process::exit(1);
    }
    log::info!("clean exit");
    Ok(())
}
