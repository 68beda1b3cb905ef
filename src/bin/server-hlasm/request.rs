//! Provide our response to incoming requests

use lsp_types as lsp;
use lsp::request::Request;
use lsp_server::{Connection,RequestId,Response};
use serde_json;
use hlasm_lsp::lang::normalize_client_uri;
use hlasm_lsp::lang::server::rpc_error::{INVALID_REQUEST,METHOD_NOT_FOUND};

fn def_response(req_id: RequestId,meth: &str) -> Response {
    Response::new_err(req_id,METHOD_NOT_FOUND,format!("method {} is not supported",meth))
}

/// Encode a query result, with empty results becoming the null result.
fn locations_response(req_id: RequestId,locs: Vec<lsp::Location>) -> Response {
    if locs.is_empty() {
        return Response::new_ok(req_id,serde_json::Value::Null);
    }
    match serde_json::to_value(locs) {
        Ok(result) => Response::new_ok(req_id,result),
        Err(_) => Response::new_err(req_id,INVALID_REQUEST,"locations failed while encoding".to_string())
    }
}

pub fn handle_request(connection: &Connection,req: lsp_server::Request,tools: &mut super::Tools) {
    let mut resp = def_response(req.id.clone(),&req.method);

    match req.method.as_str() {

        lsp::request::Shutdown::METHOD => {
            log::info!("shutdown request");
            tools.shutdown_received = true;
            resp = Response::new_ok(req.id.clone(),serde_json::Value::Null);
        },

        lsp::request::HoverRequest::METHOD => {
            match serde_json::from_value::<lsp::HoverParams>(req.params) {
                Ok(params) => {
                    let uri = normalize_client_uri(params.text_document_position_params.text_document.uri);
                    let pos = params.text_document_position_params.position;
                    let state = tools.doc_states.get(&uri.to_string());
                    let maybe = match tools.documents.get(&uri.to_string()) {
                        Some(text) => tools.hover_provider.get(text,state.map(|s| s.as_ref()),&pos),
                        None => None
                    };
                    resp = match maybe {
                        Some(hover) => match serde_json::to_value(hover) {
                            Ok(result) => Response::new_ok(req.id.clone(),result),
                            Err(_) => Response::new_err(req.id.clone(),INVALID_REQUEST,"hover failed while encoding".to_string())
                        },
                        None => Response::new_ok(req.id.clone(),serde_json::Value::Null)
                    };
                },
                Err(e) => resp = Response::new_err(req.id.clone(),INVALID_REQUEST,e.to_string())
            }
        },

        lsp::request::Completion::METHOD => {
            match serde_json::from_value::<lsp::CompletionParams>(req.params) {
                Ok(params) => {
                    let uri = normalize_client_uri(params.text_document_position.text_document.uri);
                    let pos = params.text_document_position.position;
                    let state = tools.doc_states.get(&uri.to_string());
                    resp = match tools.documents.get(&uri.to_string()) {
                        Some(text) => {
                            let items = tools.completion_provider.get(text,state.map(|s| s.as_ref()),&pos);
                            match serde_json::to_value(lsp::CompletionResponse::Array(items)) {
                                Ok(result) => Response::new_ok(req.id.clone(),result),
                                Err(_) => Response::new_err(req.id.clone(),INVALID_REQUEST,"completion failed while encoding".to_string())
                            }
                        },
                        None => Response::new_ok(req.id.clone(),serde_json::Value::Null)
                    };
                },
                Err(e) => resp = Response::new_err(req.id.clone(),INVALID_REQUEST,e.to_string())
            }
        },

        lsp::request::GotoDefinition::METHOD => {
            match serde_json::from_value::<lsp::GotoDefinitionParams>(req.params) {
                Ok(params) => {
                    let uri = normalize_client_uri(params.text_document_position_params.text_document.uri);
                    let pos = params.text_document_position_params.position;
                    let locs = match (tools.documents.get(&uri.to_string()),tools.doc_states.get(&uri.to_string())) {
                        (Some(text),Some(state)) => tools.navigation_provider.definition(&uri,text,state,&pos),
                        _ => Vec::new()
                    };
                    resp = locations_response(req.id.clone(),locs);
                },
                Err(e) => resp = Response::new_err(req.id.clone(),INVALID_REQUEST,e.to_string())
            }
        },

        lsp::request::References::METHOD => {
            match serde_json::from_value::<lsp::ReferenceParams>(req.params) {
                Ok(params) => {
                    let uri = normalize_client_uri(params.text_document_position.text_document.uri);
                    let pos = params.text_document_position.position;
                    let include_declaration = params.context.include_declaration;
                    let locs = match (tools.documents.get(&uri.to_string()),tools.doc_states.get(&uri.to_string())) {
                        (Some(text),Some(state)) => tools.navigation_provider.references(&uri,text,state,&pos,include_declaration),
                        _ => Vec::new()
                    };
                    resp = locations_response(req.id.clone(),locs);
                },
                Err(e) => resp = Response::new_err(req.id.clone(),INVALID_REQUEST,e.to_string())
            }
        },

        _ => {
            log::warn!("unhandled request: {}",req.method);
        }
    }

    if let Err(_) = connection.sender.send(lsp_server::Message::Response(resp)) {
        log::error!("could not send response to {}",req.method);
    }
}
