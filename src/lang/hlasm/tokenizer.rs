//! Operand field lexer.
//!
//! Produces a finite token stream from one operand substring.  The lexer is
//! deliberately forgiving: unknown bytes are skipped, and a hard iteration
//! cap guarantees termination on any input.

/// Tokens of the operand grammar.
#[derive(Clone,PartialEq,Debug)]
pub enum Token {
    /// identifier, upper cased
    Ident(String),
    /// numeric literal of any radix, already evaluated
    Num(i64),
    /// quoted text without the quotes, `C'..'` or bare
    Str(String),
    Comma,
    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Eq,
    Eof
}

/// token cap, a malformed operand cannot hang the lexer
const MAX_TOKENS: usize = 200;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c=='@' || c=='#' || c=='$' || c=='_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c=='@' || c=='#' || c=='$' || c=='_'
}

/// Scan a prefixed literal such as `C'AB'` or `X'1F'` starting at the
/// prefix letter.  Returns the token and the index just past the closing
/// quote, or `None` if the shape or the payload does not match, in which
/// case the prefix letter lexes as an ordinary identifier start.
fn prefixed_literal(chars: &[char], start: usize) -> Option<(Token,usize)> {
    if start+1 >= chars.len() || chars[start+1] != '\'' {
        return None;
    }
    let mut end = start+2;
    while end < chars.len() && chars[end] != '\'' {
        end += 1;
    }
    if end >= chars.len() {
        return None;
    }
    let inner: String = chars[start+2..end].iter().collect();
    let tok = match chars[start].to_ascii_uppercase() {
        'C' => Some(Token::Str(inner)),
        'X' => i64::from_str_radix(&inner,16).ok().map(Token::Num),
        'B' => i64::from_str_radix(&inner,2).ok().map(Token::Num),
        _ => None
    }?;
    Some((tok,end+1))
}

/// Tokenize one operand substring.  `Eof` is always the last element of the
/// returned list.
pub fn tokenize(src: &str) -> Vec<Token> {
    let chars: Vec<char> = src.chars().collect();
    let mut toks = Vec::new();
    let mut i = 0;
    while toks.len() < MAX_TOKENS {
        while i < chars.len() && (chars[i]==' ' || chars[i]=='\t') {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }
        let c = chars[i];
        if matches!(c,'C'|'c'|'X'|'x'|'B'|'b') {
            if let Some((tok,next)) = prefixed_literal(&chars,i) {
                toks.push(tok);
                i = next;
                continue;
            }
        }
        if is_ident_start(c) {
            let mut j = i+1;
            while j < chars.len() && is_ident_continue(chars[j]) {
                j += 1;
            }
            let name: String = chars[i..j].iter().collect();
            toks.push(Token::Ident(name.to_uppercase()));
            i = j;
            continue;
        }
        if c.is_ascii_digit() {
            let mut j = i+1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let digits: String = chars[i..j].iter().collect();
            if let Ok(num) = digits.parse::<i64>() {
                toks.push(Token::Num(num));
            }
            i = j;
            continue;
        }
        if c == '\'' {
            let mut j = i+1;
            while j < chars.len() && chars[j] != '\'' {
                j += 1;
            }
            let inner: String = chars[i+1..j].iter().collect();
            toks.push(Token::Str(inner));
            i = match j < chars.len() { true => j+1, false => j };
            continue;
        }
        let punct = match c {
            ',' => Some(Token::Comma),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '=' => Some(Token::Eq),
            _ => None
        };
        i += 1;
        if let Some(tok) = punct {
            toks.push(tok);
        }
    }
    toks.push(Token::Eof);
    toks
}
