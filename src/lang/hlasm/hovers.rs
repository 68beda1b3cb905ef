//! Hover panels, rendered as Markdown.
//!
//! Resolution order: a symbol declared by `EQUREG` in the current document,
//! then a bare `Rn` register, then a catalogue macro, then a control-block
//! field.  Anything else hovers to nothing.

use lsp_types as lsp;
use std::sync::Arc;
use super::catalogue::{Catalogue,FieldDef,MacroDef};
use super::navigation::word_at_position;
use super::{handbook,register_number,AnalysisState,RegisterDef};

pub struct HoverProvider {
    catalogue: Arc<Catalogue>
}

fn equreg_panel(reg: &RegisterDef) -> String {
    let mut ans = format!("## {} (EQUREG)\n\n",reg.name);
    ans += &format!("Register R{}, type: {}",reg.number,reg.rtype);
    ans
}

fn register_panel(num: u8) -> String {
    let mut ans = format!("## Register R{}\n\n",num);
    ans += &format!("```\nR{} — {}\n```",num,handbook::register_role(num));
    ans
}

fn macro_panel(mac: &MacroDef) -> String {
    let mut ans = format!("## {}\n",mac.name);
    if mac.description.len() > 0 {
        ans += "\n";
        ans += &mac.description;
        ans += "\n";
    }
    if mac.parameters.len() > 0 {
        ans += "\n**Parameters:**\n";
        for param in &mac.parameters {
            ans += &format!("- {}\n",param);
        }
    }
    if mac.category.len() > 0 {
        ans += &format!("\n*Category: {}*\n",mac.category);
    }
    if mac.source.len() > 0 {
        ans += &format!("\n*Source: {}*\n",mac.source);
    }
    ans
}

fn field_panel(fld: &FieldDef) -> String {
    let mut ans = format!("## {} ({} field)\n",fld.name,fld.control_block);
    if fld.description.len() > 0 {
        ans += "\n";
        ans += &fld.description;
        ans += "\n";
    }
    let mut table = String::new();
    let mut row = |key: &str, val: &str| {
        if val.len() > 0 {
            table += &format!("{}|{}\n",key,val);
        }
    };
    row("Control Block",&fld.control_block);
    row("Field Type",&fld.field_type);
    row("Storage Type",&fld.storage_type);
    if fld.length != 0 {
        row("Length",&fld.length.to_string());
    }
    row("Parent",&fld.parent);
    if table.len() > 0 {
        ans += "\nProperty|Value\n---|---\n";
        ans += &table;
    }
    ans
}

impl HoverProvider {
    pub fn new() -> Self {
        Self {
            catalogue: Arc::new(Catalogue::new())
        }
    }

    pub fn use_shared_catalogue(&mut self,catalogue: Arc<Catalogue>) {
        self.catalogue = catalogue;
    }

    /// Hover for the word at `pos`, if it resolves to anything.
    /// The range of the hovered word is returned with the content so the
    /// client can highlight it.
    pub fn get(&self,text: &str,state: Option<&AnalysisState>,pos: &lsp::Position) -> Option<lsp::Hover> {
        let (word,rng) = word_at_position(text,pos.line,pos.character)?;
        let upper = word.to_uppercase();
        let value = if let Some(reg) = state.and_then(|s| s.regs.get(&upper)) {
            equreg_panel(reg)
        } else if let Some(num) = register_number(&word) {
            register_panel(num)
        } else if let Some(mac) = self.catalogue.find_macro(&upper) {
            macro_panel(mac)
        } else if let Some(fld) = self.catalogue.find_field(&upper) {
            field_panel(fld)
        } else {
            return None;
        };
        Some(lsp::Hover {
            contents: lsp::HoverContents::Markup(lsp::MarkupContent {
                kind: lsp::MarkupKind::Markdown,
                value
            }),
            range: Some(rng)
        })
    }
}
