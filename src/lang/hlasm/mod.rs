//! # HLASM analysis
//!
//! This module is used by the language server to analyze IBM High Level
//! Assembler source.  Parsing respects the fixed-column conventions of the
//! language: a label begins in column 1, the opcode follows the first run
//! of blanks, the operand field ends at the first blank that is outside
//! quotes and parentheses, and text from column 72 on is commentary.
//!
//! `EQUREG` declarations give registers symbolic names and a type tag
//! (G, A, F, or C) and drive the register-type diagnostics.  Knowledge of
//! macros and control-block fields comes from a JSON catalogue loaded once
//! at initialization.
//!
//! The whole document is reparsed on every change.  Documents are small
//! enough that this is cheaper than it sounds, and it keeps the statement
//! model trivially consistent with the text.

use lsp_types as lsp;
use std::collections::HashMap;
use std::fmt;

pub mod tokenizer;
pub mod parser;
pub mod handbook;
pub mod catalogue;
pub mod diagnostics;
pub mod hovers;
pub mod completions;
pub mod navigation;

#[cfg(test)]
mod tests;

/// Register types assignable by `EQUREG`.
#[derive(Clone,Copy,PartialEq,Eq,Debug)]
pub enum RegisterType {
    General,
    Address,
    Float,
    Control
}

impl RegisterType {
    /// Interpret the type operand of an `EQUREG` statement.
    /// Any spelling other than the four tag letters means the type is absent.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_uppercase().as_str() {
            "G" => Some(Self::General),
            "A" => Some(Self::Address),
            "F" => Some(Self::Float),
            "C" => Some(Self::Control),
            _ => None
        }
    }
    /// lower case form used in diagnostic messages
    pub fn adjective(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Address => "address",
            Self::Float => "float",
            Self::Control => "control"
        }
    }
}

impl fmt::Display for RegisterType {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => write!(f,"General"),
            Self::Address => write!(f,"Address"),
            Self::Float => write!(f,"Float"),
            Self::Control => write!(f,"Control")
        }
    }
}

/// A register declared by `EQUREG`.
#[derive(Clone,PartialEq,Eq,Debug)]
pub struct RegisterDef {
    /// symbolic name, upper cased
    pub name: String,
    pub number: u8,
    pub rtype: RegisterType
}

/// One operand from the operand field, after structural classification.
#[derive(Clone,PartialEq,Debug)]
pub enum Operand {
    /// bare register reference `R0` through `R15`
    Reg(u8),
    /// identifier not of the `Rn` form, upper cased
    Sym(String),
    /// numeric literal: decimal, `X'..'` hex, or `B'..'` binary
    Imm(i64),
    /// quoted text without the quotes
    Str(String),
    /// address form `d(b)` or `d(x,b)`; `disp` is `Sym` or `Imm`,
    /// `base` and `index` are symbol names
    Addr { disp: Box<Operand>, base: String, index: Option<String> },
    /// fallback for any shape the structural parser does not recognize
    Raw(String)
}

/// One statement from one physical line.
#[derive(Clone,PartialEq,Debug)]
pub struct Statement {
    /// 0-based line index within the document
    pub line: usize,
    pub label: Option<String>,
    /// upper cased opcode, `*` for a comment line, empty if the line had none
    pub op: String,
    pub operands: Vec<Operand>,
    pub comment: Option<String>,
    /// the source line as received: CR stripped, but not truncated to 71
    pub raw: String
}

/// Everything one analysis pass derives from one version of a document.
/// Produced atomically and replaced as a whole on each change, so the
/// diagnostics always correspond to the statements and register table
/// they were computed from.
#[derive(Clone)]
pub struct AnalysisState {
    pub stmts: Vec<Statement>,
    /// upper cased symbolic name to register, later `EQUREG` wins
    pub regs: HashMap<String,RegisterDef>,
    /// upper cased label to the line of its defining statement, last wins
    pub labels: HashMap<String,usize>,
    pub diags: Vec<lsp::Diagnostic>
}

impl AnalysisState {
    pub fn new() -> Self {
        Self {
            stmts: Vec::new(),
            regs: HashMap::new(),
            labels: HashMap::new(),
            diags: Vec::new()
        }
    }
}

/// Match the `R0` through `R15` register form, case insensitive in the
/// prefix, strictly numeric in the suffix.
pub fn register_number(txt: &str) -> Option<u8> {
    let digits = match txt.strip_prefix('R').or_else(|| txt.strip_prefix('r')) {
        Some(d) => d,
        None => return None
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match digits.parse::<u8>() {
        Ok(n) if n <= 15 => Some(n),
        _ => None
    }
}
