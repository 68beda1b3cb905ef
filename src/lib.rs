//! # `hlasm-lsp` main library
//!
//! This library analyzes IBM High Level Assembler (HLASM) source and serves
//! the results to a language client.
//!
//! ## Architecture
//!
//! The analysis pipeline is in `lang::hlasm`:
//! * `tokenizer` and `parser` turn the fixed-column source into a statement
//!   model, one `Statement` per physical line
//! * `diagnostics` scans `EQUREG` declarations and labels into symbol
//!   tables and classifies register-type mismatches against the instruction
//!   opcode classes
//! * `catalogue` is a macro and control-block-field knowledge base loaded
//!   from a JSON file at initialization
//! * `hovers`, `completions`, and `navigation` answer the introspective
//!   queries using the statement model and the knowledge base
//!
//! The language server compiles to a separate executable, and as such, per
//! rust convention, is in src/bin.  Communication with the language client
//! is handled there, not here.

pub mod lang;

type DYNERR = Box<dyn std::error::Error>;
