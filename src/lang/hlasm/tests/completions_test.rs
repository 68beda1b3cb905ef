use lsp_types as lsp;
use std::sync::Arc;
use crate::lang::hlasm::catalogue::Catalogue;
use crate::lang::hlasm::completions::CompletionProvider;
use crate::lang::hlasm::diagnostics::Analyzer;

const CATALOGUE: &str = r#"{
    "macros": [
        { "name": "EQUREG", "description": "Declare a named register" },
        { "name": "IF" }
    ]
}"#;

fn provider() -> CompletionProvider {
    let mut provider = CompletionProvider::new();
    provider.use_shared_catalogue(Arc::new(Catalogue::from_json(CATALOGUE).expect("bad catalogue")));
    provider
}

fn labels(items: &[lsp::CompletionItem]) -> Vec<String> {
    items.iter().map(|item| item.label.clone()).collect()
}

mod candidates {

    #[test]
    fn empty_prefix_admits_everything() {
        let items = super::provider().get("",None,&lsp_types::Position::new(0,0));
        let labels = super::labels(&items);
        for num in 0..16 {
            assert!(labels.contains(&format!("R{}",num)));
        }
        assert!(labels.contains(&"LA".to_string()));
        assert!(labels.contains(&"LE".to_string()));
        assert!(labels.contains(&"EQU".to_string()));
        assert!(labels.contains(&"EQUREG".to_string()));
    }
    #[test]
    fn instructions_detail() {
        let items = super::provider().get("",None,&lsp_types::Position::new(0,0));
        let la = items.iter().find(|item| item.label=="LA").expect("LA missing");
        assert_eq!(la.kind,Some(lsp_types::CompletionItemKind::KEYWORD));
        assert_eq!(la.detail,Some("HLASM instruction".to_string()));
    }
    #[test]
    fn macro_detail_defaults() {
        let items = super::provider().get("",None,&lsp_types::Position::new(0,0));
        let equreg = items.iter().find(|item| item.label=="EQUREG").expect("EQUREG missing");
        assert_eq!(equreg.kind,Some(lsp_types::CompletionItemKind::FUNCTION));
        assert_eq!(equreg.detail,Some("Declare a named register".to_string()));
        let plain = items.iter().find(|item| item.label=="IF").expect("IF missing");
        assert_eq!(plain.detail,Some("Macro".to_string()));
    }
    #[test]
    fn bare_register_detail() {
        let items = super::provider().get("",None,&lsp_types::Position::new(0,0));
        let r12 = items.iter().find(|item| item.label=="R12").expect("R12 missing");
        assert_eq!(r12.kind,Some(lsp_types::CompletionItemKind::VARIABLE));
        assert_eq!(r12.detail,Some("Register 12".to_string()));
    }
    #[test]
    fn document_symbols_included() {
        let src = "WORK     EQUREG R3,G\nLOOP     BCT   R2,LOOP";
        let state = super::Analyzer::new().analyze(src);
        let items = super::provider().get(src,Some(&state),&lsp_types::Position::new(1,30));
        let reg = items.iter().find(|item| item.detail==Some("R3 (General)".to_string()));
        assert!(reg.is_some());
        assert_eq!(reg.unwrap().label,"WORK");
        let lab = items.iter().find(|item| item.detail==Some("Label (line 2)".to_string()));
        assert!(lab.is_some());
        assert_eq!(lab.unwrap().label,"LOOP");
    }
}

mod filtering {

    #[test]
    fn prefix_is_case_insensitive() {
        let src = "         equ";
        let items = super::provider().get(src,None,&lsp_types::Position::new(0,10));
        let labels = super::labels(&items);
        assert!(labels.contains(&"EQU".to_string()));
        assert!(labels.contains(&"EQUREG".to_string()));
        assert!(!labels.contains(&"LA".to_string()));
        assert!(!labels.contains(&"LR".to_string()));
    }
    #[test]
    fn group_order_is_stable() {
        let items = super::provider().get("",None,&lsp_types::Position::new(0,0));
        let labels = super::labels(&items);
        let first_instruction = labels.iter().position(|l| l=="L").expect("L missing");
        let r0 = labels.iter().position(|l| l=="R0").expect("R0 missing");
        assert!(first_instruction < r0);
    }
    #[test]
    fn cursor_past_line_end_means_empty_prefix() {
        let src = "         LR    R1,R2";
        let items = super::provider().get(src,None,&lsp_types::Position::new(0,40));
        assert!(items.len() > 100);
    }
}
