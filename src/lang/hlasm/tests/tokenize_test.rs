use crate::lang::hlasm::tokenizer::{tokenize,Token};

fn expect_tokens(src: &str,expected: &[Token]) {
    assert_eq!(tokenize(src).as_slice(),expected);
}

mod literals {
    use super::super::super::tokenizer::Token;

    #[test]
    fn char_literal() {
        super::expect_tokens("C'AB'",&[Token::Str("AB".to_string()),Token::Eof]);
    }
    #[test]
    fn hex_literal() {
        super::expect_tokens("X'1F'",&[Token::Num(31),Token::Eof]);
    }
    #[test]
    fn binary_literal() {
        super::expect_tokens("B'1010'",&[Token::Num(10),Token::Eof]);
    }
    #[test]
    fn lower_case_prefix() {
        super::expect_tokens("x'ff'",&[Token::Num(255),Token::Eof]);
    }
    #[test]
    fn bare_quoted() {
        super::expect_tokens("'HELLO'",&[Token::Str("HELLO".to_string()),Token::Eof]);
    }
    #[test]
    fn bad_hex_payload_falls_back() {
        super::expect_tokens("X'G1'",&[
            Token::Ident("X".to_string()),
            Token::Str("G1".to_string()),
            Token::Eof
        ]);
    }
    #[test]
    fn decimal() {
        super::expect_tokens("4096",&[Token::Num(4096),Token::Eof]);
    }
}

mod identifiers {
    use super::super::super::tokenizer::Token;

    #[test]
    fn upper_cased() {
        super::expect_tokens("work",&[Token::Ident("WORK".to_string()),Token::Eof]);
    }
    #[test]
    fn national_characters() {
        super::expect_tokens("@_#$X1",&[Token::Ident("@_#$X1".to_string()),Token::Eof]);
    }
    #[test]
    fn digits_do_not_start() {
        super::expect_tokens("9X",&[
            Token::Num(9),
            Token::Ident("X".to_string()),
            Token::Eof
        ]);
    }
}

mod punctuation {
    use super::super::super::tokenizer::Token;

    #[test]
    fn address_shape() {
        super::expect_tokens("0(R1,R2)",&[
            Token::Num(0),
            Token::LParen,
            Token::Ident("R1".to_string()),
            Token::Comma,
            Token::Ident("R2".to_string()),
            Token::RParen,
            Token::Eof
        ]);
    }
    #[test]
    fn literal_reference() {
        super::expect_tokens("=E'1.0'",&[
            Token::Eq,
            Token::Ident("E".to_string()),
            Token::Str("1.0".to_string()),
            Token::Eof
        ]);
    }
    #[test]
    fn arithmetic() {
        super::expect_tokens("A+B-4*2",&[
            Token::Ident("A".to_string()),
            Token::Plus,
            Token::Ident("B".to_string()),
            Token::Minus,
            Token::Num(4),
            Token::Star,
            Token::Num(2),
            Token::Eof
        ]);
    }
}

mod safety {
    use super::super::super::tokenizer::{tokenize,Token};

    #[test]
    fn unknown_bytes_skipped() {
        super::expect_tokens("A & B",&[
            Token::Ident("A".to_string()),
            Token::Ident("B".to_string()),
            Token::Eof
        ]);
    }
    #[test]
    fn blanks_skipped() {
        super::expect_tokens("  \t R1 , 2 ",&[
            Token::Ident("R1".to_string()),
            Token::Comma,
            Token::Num(2),
            Token::Eof
        ]);
    }
    #[test]
    fn token_cap_holds() {
        let toks = tokenize(&",".repeat(400));
        assert_eq!(toks.len(),201);
        assert_eq!(toks.last(),Some(&Token::Eof));
    }
}
