//! Completion provider.
//!
//! Candidates are the fixed instruction set, the catalogue macros, the
//! bare registers, and whatever the current document declares.  The word
//! under the cursor (possibly empty) filters the list by case-insensitive
//! prefix; there is no ranking and no deduplication.

use lsp_types as lsp;
use std::sync::Arc;
use super::catalogue::Catalogue;
use super::navigation::word_at_position;
use super::{handbook,AnalysisState};

pub struct CompletionProvider {
    catalogue: Arc<Catalogue>
}

impl CompletionProvider {
    pub fn new() -> Self {
        Self {
            catalogue: Arc::new(Catalogue::new())
        }
    }

    pub fn use_shared_catalogue(&mut self,catalogue: Arc<Catalogue>) {
        self.catalogue = catalogue;
    }

    fn add_instructions(&self,ans: &mut Vec<lsp::CompletionItem>) {
        for op in handbook::instruction_set() {
            ans.push(lsp::CompletionItem {
                label: op.to_string(),
                kind: Some(lsp::CompletionItemKind::KEYWORD),
                detail: Some("HLASM instruction".to_string()),
                ..Default::default()
            });
        }
    }

    fn add_macros(&self,ans: &mut Vec<lsp::CompletionItem>) {
        for mac in self.catalogue.macros() {
            ans.push(lsp::CompletionItem {
                label: mac.name.clone(),
                kind: Some(lsp::CompletionItemKind::FUNCTION),
                detail: match mac.description.len() {
                    0 => Some("Macro".to_string()),
                    _ => Some(mac.description.clone())
                },
                documentation: match mac.description.len() {
                    0 => None,
                    _ => Some(lsp::Documentation::String(mac.description.clone()))
                },
                ..Default::default()
            });
        }
    }

    fn add_bare_registers(&self,ans: &mut Vec<lsp::CompletionItem>) {
        for num in 0..16 {
            ans.push(lsp::CompletionItem {
                label: format!("R{}",num),
                kind: Some(lsp::CompletionItemKind::VARIABLE),
                detail: Some(format!("Register {}",num)),
                ..Default::default()
            });
        }
    }

    fn add_document_symbols(&self,ans: &mut Vec<lsp::CompletionItem>,state: &AnalysisState) {
        for reg in state.regs.values() {
            ans.push(lsp::CompletionItem {
                label: reg.name.clone(),
                kind: Some(lsp::CompletionItemKind::VARIABLE),
                detail: Some(format!("R{} ({})",reg.number,reg.rtype)),
                ..Default::default()
            });
        }
        for (label,line) in &state.labels {
            ans.push(lsp::CompletionItem {
                label: label.clone(),
                kind: Some(lsp::CompletionItemKind::VALUE),
                detail: Some(format!("Label (line {})",line+1)),
                ..Default::default()
            });
        }
    }

    /// All candidates matching the word under the cursor as a prefix.
    /// An empty prefix admits everything.
    pub fn get(&self,text: &str,state: Option<&AnalysisState>,pos: &lsp::Position) -> Vec<lsp::CompletionItem> {
        let prefix = match word_at_position(text,pos.line,pos.character) {
            Some((word,_)) => word.to_uppercase(),
            None => String::new()
        };
        let mut ans = Vec::new();
        self.add_instructions(&mut ans);
        self.add_macros(&mut ans);
        self.add_bare_registers(&mut ans);
        if let Some(state) = state {
            self.add_document_symbols(&mut ans,state);
        }
        if prefix.len() > 0 {
            ans.retain(|item| item.label.to_uppercase().starts_with(&prefix));
        }
        ans
    }
}
