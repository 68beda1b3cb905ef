//! Handle incoming notifications: document lifecycle and exit

use lsp_types as lsp;
use lsp::notification::Notification;
use lsp_server::Connection;
use std::sync::Arc;
use hlasm_lsp::lang::normalize_client_uri;

/// Replace the document and its analysis state together, then publish the
/// fresh diagnostics.  This runs synchronously, so the publication goes
/// out before the next message is read.
fn update_document(connection: &Connection,tools: &mut super::Tools,uri: lsp::Url,text: String) {
    let state = tools.analyzer.analyze(&text);
    let diagnostics = state.diags.clone();
    tools.documents.insert(uri.to_string(),text);
    tools.doc_states.insert(uri.to_string(),Arc::new(state));
    super::push_diagnostics(connection,uri,diagnostics);
}

/// returns true if the exit notification was received
pub fn handle_notification(connection: &Connection,note: lsp_server::Notification,tools: &mut super::Tools) -> bool {

    match note.method.as_str() {

        lsp::notification::Exit::METHOD => {
            log::info!("exit notification");
            return true;
        },

        lsp::notification::Initialized::METHOD => {
            log::debug!("client initialized");
        },

        lsp::notification::DidOpenTextDocument::METHOD => {
            match serde_json::from_value::<lsp::DidOpenTextDocumentParams>(note.params) {
                Ok(params) => {
                    let uri = normalize_client_uri(params.text_document.uri);
                    log::info!("open {}",uri.as_str());
                    update_document(connection,tools,uri,params.text_document.text);
                },
                Err(e) => log::error!("could not decode didOpen: {}",e)
            }
        },

        lsp::notification::DidChangeTextDocument::METHOD => {
            match serde_json::from_value::<lsp::DidChangeTextDocumentParams>(note.params) {
                Ok(params) => {
                    let uri = normalize_client_uri(params.text_document.uri);
                    // full sync: the first content change carries the
                    // complete new text, extra entries are ignored
                    if let Some(change) = params.content_changes.into_iter().next() {
                        update_document(connection,tools,uri,change.text);
                    }
                },
                Err(e) => log::error!("could not decode didChange: {}",e)
            }
        },

        lsp::notification::DidCloseTextDocument::METHOD => {
            match serde_json::from_value::<lsp::DidCloseTextDocumentParams>(note.params) {
                Ok(params) => {
                    let uri = normalize_client_uri(params.text_document.uri);
                    log::info!("close {}",uri.as_str());
                    tools.documents.remove(&uri.to_string());
                    tools.doc_states.remove(&uri.to_string());
                    super::push_diagnostics(connection,uri,Vec::new());
                },
                Err(e) => log::error!("could not decode didClose: {}",e)
            }
        },

        _ => {
            log::debug!("unhandled notification: {}",note.method);
        }
    }
    false
}
