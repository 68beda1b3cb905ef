//! Macro and control-block-field knowledge base.
//!
//! Loaded once at initialization from `<data-dir>/macros.json` and immutable
//! afterwards.  The loader is tolerant: a missing or malformed catalogue
//! yields an empty knowledge base, and missing keys within an entry read as
//! empty, so hover and completion degrade gracefully rather than failing
//! the whole session.

use std::collections::HashMap;
use std::path::Path;
use crate::lang::{update_json_i64,update_json_string,update_json_vec_str};
use crate::DYNERR;

#[derive(Clone,PartialEq,Debug)]
pub struct MacroDef {
    /// upper cased
    pub name: String,
    pub description: String,
    pub category: String,
    pub parameters: Vec<String>,
    pub source: String
}

#[derive(Clone,PartialEq,Debug)]
pub struct FieldDef {
    /// upper cased
    pub name: String,
    pub control_block: String,
    pub field_type: String,
    pub storage_type: String,
    /// 0 when the catalogue does not give one
    pub length: i64,
    pub parent: String,
    pub description: String
}

/// Two independent mappings.  Field names from different control blocks
/// share one namespace; when the catalogue repeats a name the last one
/// in the document wins and no report is made.  Relies on `serde_json`
/// preserving object order, so the control blocks load in document order.
pub struct Catalogue {
    macros: HashMap<String,MacroDef>,
    fields: HashMap<String,FieldDef>
}

impl MacroDef {
    fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: String::new(),
            parameters: Vec::new(),
            source: String::new()
        }
    }
}

impl FieldDef {
    fn new() -> Self {
        Self {
            name: String::new(),
            control_block: String::new(),
            field_type: String::new(),
            storage_type: String::new(),
            length: 0,
            parent: String::new(),
            description: String::new()
        }
    }
}

impl Catalogue {
    pub fn new() -> Self {
        Self {
            macros: HashMap::new(),
            fields: HashMap::new()
        }
    }

    /// Load the catalogue file, tolerating any failure by returning an
    /// empty catalogue.
    pub fn load(path: &Path) -> Self {
        let json_str = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("could not read catalogue {}: {}",path.display(),e);
                return Self::new();
            }
        };
        match Self::from_json(&json_str) {
            Ok(ans) => {
                log::info!("catalogue loaded: {} macros, {} fields",ans.macros.len(),ans.fields.len());
                ans
            },
            Err(e) => {
                log::warn!("could not parse catalogue: {}",e);
                Self::new()
            }
        }
    }

    /// Build the catalogue from JSON text.  Unknown keys are ignored;
    /// missing keys read as empty string, or 0 for `length`.
    pub fn from_json(json_str: &str) -> Result<Self,DYNERR> {
        let mut ans = Self::new();
        let root = serde_json::from_str::<serde_json::Value>(json_str)?;
        if let Some(list) = root.get("macros").and_then(|v| v.as_array()) {
            for item in list {
                let mut mac = MacroDef::new();
                update_json_string(item,"name",&mut mac.name);
                update_json_string(item,"description",&mut mac.description);
                update_json_string(item,"category",&mut mac.category);
                update_json_vec_str(item,"parameters",&mut mac.parameters);
                update_json_string(item,"source",&mut mac.source);
                if mac.name.len() > 0 {
                    mac.name = mac.name.to_uppercase();
                    ans.macros.insert(mac.name.clone(),mac);
                }
            }
        }
        if let Some(blocks) = root.get("controlBlocks").and_then(|v| v.as_object()) {
            for (cb,info) in blocks {
                if let Some(list) = info.get("fields").and_then(|v| v.as_array()) {
                    for item in list {
                        let mut fld = FieldDef::new();
                        fld.control_block = cb.to_string();
                        update_json_string(item,"name",&mut fld.name);
                        update_json_string(item,"fieldType",&mut fld.field_type);
                        update_json_string(item,"storageType",&mut fld.storage_type);
                        update_json_i64(item,"length",&mut fld.length);
                        update_json_string(item,"parent",&mut fld.parent);
                        update_json_string(item,"description",&mut fld.description);
                        if fld.name.len() > 0 {
                            fld.name = fld.name.to_uppercase();
                            ans.fields.insert(fld.name.clone(),fld);
                        }
                    }
                }
            }
        }
        Ok(ans)
    }

    pub fn find_macro(&self,name: &str) -> Option<&MacroDef> {
        self.macros.get(&name.to_uppercase())
    }

    pub fn find_field(&self,name: &str) -> Option<&FieldDef> {
        self.fields.get(&name.to_uppercase())
    }

    pub fn macros(&self) -> impl Iterator<Item = &MacroDef> {
        self.macros.values()
    }

    pub fn macro_count(&self) -> usize {
        self.macros.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
