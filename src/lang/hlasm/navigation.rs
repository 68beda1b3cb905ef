//! Word extraction and navigation queries.
//!
//! Definitions resolve in the order labels, then `EQUREG` registers, then
//! catalogue macros located by file name in the configured macro
//! directories.  References are collected in document order from statement
//! labels and symbol operands, descending into address operands.

use lsp_types as lsp;
use std::path::PathBuf;
use std::sync::Arc;
use super::catalogue::Catalogue;
use super::diagnostics::column_range;
use super::{AnalysisState,Operand,Statement};

/// at most this many macro directories are searched
const MAX_MACRO_DIRS: usize = 64;

/// identifier characters of the assembler's symbol alphabet
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c=='@' || c=='#' || c=='$' || c=='_'
}

/// Find the word under the given position, with its range.
/// Offsets beyond the line, or sitting on a non-identifier character,
/// yield nothing.  A trailing CR on the line is ignored.
pub fn word_at_position(text: &str,line: u32,character: u32) -> Option<(String,lsp::Range)> {
    let raw = text.split('\n').nth(line as usize)?;
    let raw = raw.strip_suffix('\r').unwrap_or(raw);
    let chars: Vec<char> = raw.chars().collect();
    let col = character as usize;
    if col >= chars.len() || !is_word_char(chars[col]) {
        return None;
    }
    let mut start = col;
    while start > 0 && is_word_char(chars[start-1]) {
        start -= 1;
    }
    let mut end = col+1;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    let word: String = chars[start..end].iter().collect();
    let rng = lsp::Range::new(
        lsp::Position::new(line,start as u32),
        lsp::Position::new(line,end as u32)
    );
    Some((word,rng))
}

fn label_range(line: usize,name: &str) -> lsp::Range {
    lsp::Range::new(
        lsp::Position::new(line as u32,0),
        lsp::Position::new(line as u32,name.len() as u32)
    )
}

pub struct NavigationProvider {
    catalogue: Arc<Catalogue>,
    macro_dirs: Vec<PathBuf>
}

impl NavigationProvider {
    pub fn new() -> Self {
        Self {
            catalogue: Arc::new(Catalogue::new()),
            macro_dirs: Vec::new()
        }
    }

    pub fn use_shared_catalogue(&mut self,catalogue: Arc<Catalogue>) {
        self.catalogue = catalogue;
    }

    /// Directories searched for `<NAME>.mac`, in command line order, so
    /// the first `--macro-dir` argument wins.
    pub fn set_macro_dirs(&mut self,dirs: Vec<PathBuf>) {
        self.macro_dirs = dirs;
    }

    /// Resolve the definition of the word at `pos`.  Labels win over
    /// registers; an `EQUREG` symbol lands on its own declaration since the
    /// declaring statement carries the name as its label.
    pub fn definition(&self,uri: &lsp::Url,text: &str,state: &AnalysisState,pos: &lsp::Position) -> Vec<lsp::Location> {
        let (word,_) = match word_at_position(text,pos.line,pos.character) {
            Some(x) => x,
            None => return Vec::new()
        };
        let upper = word.to_uppercase();
        if let Some(line) = state.labels.get(&upper) {
            return vec![lsp::Location::new(uri.clone(),label_range(*line,&upper))];
        }
        if let Some(reg) = state.regs.get(&upper) {
            for stmt in &state.stmts {
                if let Some(label) = &stmt.label {
                    if label.to_uppercase() == reg.name {
                        return vec![lsp::Location::new(uri.clone(),label_range(stmt.line,label))];
                    }
                }
            }
        }
        if self.catalogue.find_macro(&upper).is_some() {
            for dir in self.macro_dirs.iter().take(MAX_MACRO_DIRS) {
                let path = dir.join(format!("{}.mac",upper));
                if path.is_file() {
                    if let Ok(target) = crate::lang::uri_from_file_path(&path) {
                        let zero = lsp::Position::new(0,0);
                        return vec![lsp::Location::new(target,lsp::Range::new(zero,zero))];
                    }
                }
            }
        }
        Vec::new()
    }

    /// Collect references to the word at `pos`, in document order.
    /// The declaring statement's label is one reference, gated by
    /// `include_declaration`; every matching symbol operand is another.
    pub fn references(&self,uri: &lsp::Url,text: &str,state: &AnalysisState,pos: &lsp::Position,include_declaration: bool) -> Vec<lsp::Location> {
        let (word,_) = match word_at_position(text,pos.line,pos.character) {
            Some(x) => x,
            None => return Vec::new()
        };
        let upper = word.to_uppercase();
        let mut ans = Vec::new();
        for stmt in &state.stmts {
            if let Some(label) = &stmt.label {
                if label.to_uppercase() == upper && include_declaration {
                    ans.push(lsp::Location::new(uri.clone(),label_range(stmt.line,label)));
                }
            }
            for operand in &stmt.operands {
                push_operand_refs(uri,stmt,operand,&upper,&mut ans);
            }
        }
        ans
    }
}

/// Emit a reference for every part of the operand whose name matches the
/// target, descending into address operands.
fn push_operand_refs(uri: &lsp::Url,stmt: &Statement,operand: &Operand,target: &str,ans: &mut Vec<lsp::Location>) {
    let hit = || {
        let (col_beg,col_end) = column_range(&stmt.raw,target);
        let rng = lsp::Range::new(
            lsp::Position::new(stmt.line as u32,col_beg),
            lsp::Position::new(stmt.line as u32,col_end)
        );
        lsp::Location::new(uri.clone(),rng)
    };
    match operand {
        Operand::Sym(s) => {
            if s == target {
                ans.push(hit());
            }
        },
        Operand::Addr { disp, base, index } => {
            if let Operand::Sym(d) = disp.as_ref() {
                if d == target {
                    ans.push(hit());
                }
            }
            if base == target {
                ans.push(hit());
            }
            if let Some(x) = index {
                if x == target {
                    ans.push(hit());
                }
            }
        },
        _ => {}
    }
}
