//! HLASM diagnostics module.
//!
//! Provides the symbol scanners and the register-type checks, and assembles
//! the per-document analysis state.  Used by the language server on every
//! document open and change.
//!
//! Each register operand is checked against the opcode class of its
//! statement: a non-float register in a float operation, or a float
//! register in an address operation, earns a warning.  A float register
//! with an odd number earns a separate warning, since the classic float
//! registers pair up on even numbers.

use lsp_types as lsp;
use lsp::DiagnosticSeverity;
use std::collections::HashMap;
use super::handbook::OpcodeHandbook;
use super::parser::LineParser;
use super::{register_number,AnalysisState,Operand,RegisterDef,RegisterType,Statement};
use crate::lang::server::basic_diag;

/// fallback column when an operand cannot be found in its raw line
const FALLBACK_COLUMN: usize = 9;

/// Locate `name` in the first 71 columns of the raw line, case
/// insensitively, first occurrence wins.  The match can collide with
/// identical text in the label field; that is tolerated.  Columns are byte
/// offsets into the raw line.
pub fn column_range(raw: &str,name: &str) -> (u32,u32) {
    let end = raw.char_indices().nth(71).map(|(i,_)| i).unwrap_or(raw.len());
    if let Ok(re) = regex::RegexBuilder::new(&regex::escape(name)).case_insensitive(true).build() {
        if let Some(mtch) = re.find(&raw[..end]) {
            return (mtch.start() as u32,mtch.end() as u32);
        }
    }
    (FALLBACK_COLUMN as u32,(FALLBACK_COLUMN + name.len()) as u32)
}

pub struct Analyzer {
    parser: LineParser,
    book: OpcodeHandbook
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            parser: LineParser::new(),
            book: OpcodeHandbook::new()
        }
    }

    /// Parse and scan the document text, producing a complete analysis
    /// state.  Pure except for logging; any prior state for the document
    /// should be replaced as a whole.
    pub fn analyze(&self,text: &str) -> AnalysisState {
        let stmts = self.parser.parse_document(text);
        let regs = self.scan_registers(&stmts);
        let labels = self.scan_labels(&stmts);
        let diags = self.type_check(&regs,&stmts);
        log::info!("analyzed {} statements: {} registers, {} labels, {} diagnostics",
            stmts.len(),regs.len(),labels.len(),diags.len());
        AnalysisState { stmts, regs, labels, diags }
    }

    /// Gather register declarations from `EQUREG` statements.
    /// The first operand must resolve to a register number, the second is
    /// the type tag; a missing or unrecognized tag means `General`.
    /// A later declaration for the same label overwrites the earlier one.
    pub fn scan_registers(&self,stmts: &[Statement]) -> HashMap<String,RegisterDef> {
        let mut regs = HashMap::new();
        for stmt in stmts {
            if stmt.op != "EQUREG" {
                continue;
            }
            let label = match &stmt.label {
                Some(l) if l.len() > 0 => l,
                _ => continue
            };
            let number = match stmt.operands.get(0) {
                Some(Operand::Reg(n)) => *n,
                Some(Operand::Sym(s)) => match register_number(s) {
                    Some(n) => n,
                    None => continue
                },
                _ => continue
            };
            let rtype = match stmt.operands.get(1) {
                Some(Operand::Sym(t)) => RegisterType::from_tag(t),
                Some(Operand::Raw(t)) => RegisterType::from_tag(t),
                _ => None
            }.unwrap_or(RegisterType::General);
            let name = label.to_uppercase();
            regs.insert(name.clone(),RegisterDef { name, number, rtype });
        }
        regs
    }

    /// Map each label to the line of its statement, last wins.
    /// The label of a comment statement is not a label.
    pub fn scan_labels(&self,stmts: &[Statement]) -> HashMap<String,usize> {
        let mut labels = HashMap::new();
        for stmt in stmts {
            if stmt.op == "*" {
                continue;
            }
            if let Some(label) = &stmt.label {
                labels.insert(label.to_uppercase(),stmt.line);
            }
        }
        labels
    }

    /// Register-type checks over the statement array, in statement order.
    pub fn type_check(&self,regs: &HashMap<String,RegisterDef>,stmts: &[Statement]) -> Vec<lsp::Diagnostic> {
        let mut diags = Vec::new();
        for stmt in stmts {
            if stmt.op == "*" || stmt.op.is_empty() {
                continue;
            }
            let float_op = self.book.is_float_op(&stmt.op);
            let address_op = self.book.is_address_op(&stmt.op);
            if !float_op && !address_op {
                continue;
            }
            for operand in &stmt.operands {
                let name = match operand {
                    Operand::Sym(s) => s,
                    _ => continue
                };
                let reg = match regs.get(name) {
                    Some(r) => r,
                    None => continue
                };
                let (col_beg,col_end) = column_range(&stmt.raw,name);
                let rng = lsp::Range::new(
                    lsp::Position::new(stmt.line as u32,col_beg),
                    lsp::Position::new(stmt.line as u32,col_end)
                );
                if float_op && reg.rtype != RegisterType::Float {
                    let mess = format!("{} is a {} register but {} requires a float register",
                        reg.name,reg.rtype.adjective(),stmt.op);
                    diags.push(basic_diag(rng,&mess,DiagnosticSeverity::WARNING));
                } else if address_op && reg.rtype == RegisterType::Float {
                    let mess = format!("{} is a float register but {} expects general/address",reg.name,stmt.op);
                    diags.push(basic_diag(rng,&mess,DiagnosticSeverity::WARNING));
                }
                if float_op && reg.rtype == RegisterType::Float && reg.number % 2 == 1 {
                    let mess = format!("float register {} (R{}) has odd number; even registers expected",
                        reg.name,reg.number);
                    diags.push(basic_diag(rng,&mess,DiagnosticSeverity::WARNING));
                }
            }
        }
        diags
    }
}
