use crate::lang::hlasm::catalogue::Catalogue;

const SAMPLE: &str = r#"{
    "macros": [
        {
            "name": "GetMain",
            "description": "Allocate virtual storage",
            "category": "storage",
            "parameters": ["RU", "LV", "LOC"],
            "source": "SYS1.MACLIB"
        },
        { "name": "WTO" }
    ],
    "controlBlocks": {
        "TCB": {
            "fields": [
                {
                    "name": "TCBTID",
                    "fieldType": "identifier",
                    "storageType": "CL4",
                    "length": 4,
                    "parent": "TCB",
                    "description": "Task identifier"
                }
            ]
        },
        "ASCB": {
            "fields": [
                { "name": "ASCBASID", "length": 2 }
            ]
        }
    }
}"#;

mod loading {
    use super::*;

    #[test]
    fn sample_loads() {
        let cat = Catalogue::from_json(super::SAMPLE).expect("parse failed");
        assert_eq!(cat.macro_count(),2);
        assert_eq!(cat.field_count(),2);
    }
    #[test]
    fn missing_file_yields_empty() {
        let cat = Catalogue::load(std::path::Path::new("/no/such/dir/macros.json"));
        assert_eq!(cat.macro_count(),0);
        assert_eq!(cat.field_count(),0);
    }
    #[test]
    fn malformed_json_is_an_error() {
        assert!(Catalogue::from_json("this is not json").is_err());
    }
    #[test]
    fn unknown_keys_ignored() {
        let cat = Catalogue::from_json(r#"{"macros":[{"name":"A","extra":1}],"other":true}"#).expect("parse failed");
        assert_eq!(cat.macro_count(),1);
    }
}

mod lookups {
    use super::*;

    #[test]
    fn names_are_upper_cased() {
        let cat = Catalogue::from_json(SAMPLE).expect("parse failed");
        let mac = cat.find_macro("getmain").expect("macro missing");
        assert_eq!(mac.name,"GETMAIN");
        assert_eq!(mac.parameters,vec!["RU","LV","LOC"]);
    }
    #[test]
    fn missing_keys_read_as_empty() {
        let cat = Catalogue::from_json(SAMPLE).expect("parse failed");
        let mac = cat.find_macro("WTO").expect("macro missing");
        assert_eq!(mac.description,"");
        assert_eq!(mac.parameters.len(),0);
        let fld = cat.find_field("ASCBASID").expect("field missing");
        assert_eq!(fld.field_type,"");
        assert_eq!(fld.length,2);
    }
    #[test]
    fn field_carries_control_block() {
        let cat = Catalogue::from_json(SAMPLE).expect("parse failed");
        let fld = cat.find_field("tcbtid").expect("field missing");
        assert_eq!(fld.control_block,"TCB");
        assert_eq!(fld.description,"Task identifier");
    }
    #[test]
    fn duplicate_field_names_last_wins() {
        // ZCB comes first in the document but later alphabetically, so
        // this fails if the loader reorders the control blocks
        let json = r#"{"controlBlocks":{
            "ZCB": {"fields":[{"name":"COMMON","length":1}]},
            "ACB": {"fields":[{"name":"COMMON","length":99}]}
        }}"#;
        let cat = Catalogue::from_json(json).expect("parse failed");
        assert_eq!(cat.field_count(),1);
        let fld = cat.find_field("COMMON").unwrap();
        assert_eq!(fld.length,99);
        assert_eq!(fld.control_block,"ACB");
    }
}
