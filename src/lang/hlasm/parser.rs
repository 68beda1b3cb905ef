//! Fixed-column line parser and operand classifier.
//!
//! One physical line maps to at most one `Statement`.  The fields follow
//! the assembler's column rules: a label starts in column 1 or not at all,
//! the opcode is the next space-delimited run, and the operand field ends
//! at the first space that is outside a quoted string and outside
//! parentheses.  Anything from column 72 on never reaches the parser.
//!
//! Only the space character delimits fields at the line level; tabs are
//! blanks to the operand lexer, not to the line parser.

use super::tokenizer::{tokenize,Token};
use super::{register_number,Operand,Statement};

/// first commentary column, text at or beyond this index is cut
const COMMENT_COLUMN: usize = 71;

fn is_space(c: char) -> bool {
    c==' '
}

pub struct LineParser {
}

impl LineParser {
    pub fn new() -> Self {
        Self {}
    }

    /// Map document text to the ordered statement array.
    /// Line indices are 0-based and strictly increasing; empty lines are
    /// dropped.  A trailing CR on any line is stripped before parsing.
    pub fn parse_document(&self,text: &str) -> Vec<Statement> {
        let mut stmts = Vec::new();
        for (line,raw) in text.split('\n').enumerate() {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            if let Some(stmt) = self.parse_line(raw,line) {
                stmts.push(stmt);
            }
        }
        stmts
    }

    /// Parse one physical line, CR already stripped.
    /// Empty lines produce nothing; a line starting with `*` produces a
    /// comment statement carrying the whole line.
    pub fn parse_line(&self,raw: &str,line: usize) -> Option<Statement> {
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with('*') {
            return Some(Statement {
                line,
                label: None,
                op: "*".to_string(),
                operands: Vec::new(),
                comment: Some(raw.to_string()),
                raw: raw.to_string()
            });
        }
        let chars: Vec<char> = raw.chars().take(COMMENT_COLUMN).collect();
        let mut i = 0;
        let mut label = None;
        if !chars.is_empty() && !is_space(chars[0]) {
            let mut j = 0;
            while j < chars.len() && !is_space(chars[j]) {
                j += 1;
            }
            label = Some(chars[0..j].iter().collect::<String>());
            i = j;
        }
        while i < chars.len() && is_space(chars[i]) {
            i += 1;
        }
        if i >= chars.len() {
            return Some(Statement {
                line,
                label,
                op: String::new(),
                operands: Vec::new(),
                comment: None,
                raw: raw.to_string()
            });
        }
        let mut j = i;
        while j < chars.len() && !is_space(chars[j]) {
            j += 1;
        }
        let op = chars[i..j].iter().collect::<String>().to_uppercase();
        i = j;
        while i < chars.len() && is_space(chars[i]) {
            i += 1;
        }
        let mut operands = Vec::new();
        if i < chars.len() {
            let mut depth = 0;
            let mut in_quote = false;
            let mut j = i;
            while j < chars.len() {
                let c = chars[j];
                if in_quote {
                    if c=='\'' {
                        in_quote = false;
                    }
                } else if c=='\'' {
                    in_quote = true;
                } else if c=='(' {
                    depth += 1;
                } else if c==')' && depth > 0 {
                    depth -= 1;
                } else if is_space(c) && depth==0 {
                    break;
                }
                j += 1;
            }
            let field: String = chars[i..j].iter().collect();
            operands = self.parse_operand_field(&field);
            i = j;
        }
        while i < chars.len() && is_space(chars[i]) {
            i += 1;
        }
        let comment = match i < chars.len() {
            true => Some(chars[i..].iter().collect::<String>()),
            false => None
        };
        Some(Statement {
            line,
            label,
            op,
            operands,
            comment,
            raw: raw.to_string()
        })
    }

    /// Split the operand field at commas that are outside quotes and
    /// parentheses, then classify each piece.
    pub fn parse_operand_field(&self,field: &str) -> Vec<Operand> {
        let chars: Vec<char> = field.chars().collect();
        let mut pieces = Vec::new();
        let mut depth = 0;
        let mut in_quote = false;
        let mut start = 0;
        for i in 0..chars.len() {
            let c = chars[i];
            if in_quote {
                if c=='\'' {
                    in_quote = false;
                }
            } else if c=='\'' {
                in_quote = true;
            } else if c=='(' {
                depth += 1;
            } else if c==')' && depth > 0 {
                depth -= 1;
            } else if c==',' && depth==0 {
                pieces.push(chars[start..i].iter().collect::<String>());
                start = i+1;
            }
        }
        pieces.push(chars[start..].iter().collect::<String>());
        pieces.iter().map(|p| self.parse_operand(p)).collect()
    }

    /// Classify one comma-separated piece by the shape of its token list.
    /// The register test looks at the original-case text, so `r3` and `R3`
    /// are registers while `REG3` is a symbol.
    pub fn parse_operand(&self,piece: &str) -> Operand {
        let piece = piece.trim();
        let toks = tokenize(piece);
        match toks.as_slice() {
            [Token::Ident(s),Token::Eof] => match register_number(piece) {
                Some(n) => Operand::Reg(n),
                None => Operand::Sym(s.clone())
            },
            [Token::Num(n),Token::Eof] => Operand::Imm(*n),
            [Token::Str(s),Token::Eof] => Operand::Str(s.clone()),
            [Token::Ident(d),Token::LParen,Token::Ident(b),Token::RParen,Token::Eof] => Operand::Addr {
                disp: Box::new(Operand::Sym(d.clone())),
                base: b.clone(),
                index: None
            },
            [Token::Num(d),Token::LParen,Token::Ident(b),Token::RParen,Token::Eof] => Operand::Addr {
                disp: Box::new(Operand::Imm(*d)),
                base: b.clone(),
                index: None
            },
            [Token::Ident(d),Token::LParen,Token::Ident(x),Token::Comma,Token::Ident(b),Token::RParen,Token::Eof] => Operand::Addr {
                disp: Box::new(Operand::Sym(d.clone())),
                base: b.clone(),
                index: Some(x.clone())
            },
            [Token::Num(d),Token::LParen,Token::Ident(x),Token::Comma,Token::Ident(b),Token::RParen,Token::Eof] => Operand::Addr {
                disp: Box::new(Operand::Imm(*d)),
                base: b.clone(),
                index: Some(x.clone())
            },
            [Token::Num(d),Token::LParen,Token::Comma,Token::Ident(b),Token::RParen,Token::Eof] => Operand::Addr {
                disp: Box::new(Operand::Imm(*d)),
                base: b.clone(),
                index: None
            },
            _ => Operand::Raw(piece.to_string())
        }
    }
}
