use serde::{Deserialize, Serialize};

/// Key form shared by every rule table: trimmed and lowercased.
pub(crate) fn canonical_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Canonical parameter name with the lowercase substrings that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSynonyms {
    pub name: String,
    pub synonyms: Vec<String>,
}

/// Ordered parameter dictionary. Entry order is match precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterDictionary {
    entries: Vec<ParameterSynonyms>,
}

impl ParameterDictionary {
    pub fn new(entries: Vec<ParameterSynonyms>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| ParameterSynonyms {
                name: canonical_name(&e.name),
                synonyms: e.synonyms.iter().map(|s| s.to_lowercase()).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Default dictionary. `a1c` precedes `hemoglobin` so "hba1c" is not
    /// claimed by the `hb` synonym.
    pub fn builtin() -> Self {
        let entry = |name: &str, synonyms: &[&str]| ParameterSynonyms {
            name: name.to_string(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        };
        Self::new(vec![
            entry("a1c", &["hba1c", "a1c"]),
            entry("hemoglobin", &["hemoglobin", "haemoglobin", "hb"]),
            entry("wbc", &["wbc", "white blood cell", "white blood cells"]),
            entry("rbc", &["rbc", "red blood cell", "red blood cells"]),
            entry("platelets", &["platelet", "platelets"]),
            entry("cholesterol", &["cholesterol", "ldl", "hdl", "triglyceride"]),
            entry("glucose", &["glucose", "blood sugar", "sugar"]),
            entry("creatinine", &["creatinine"]),
            entry("bun", &["bun", "urea"]),
        ])
    }

    /// First canonical name whose synonym is a substring of `line`.
    /// `line` is expected to be lowercase already.
    pub fn match_line(&self, line: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.synonyms.iter().any(|s| !s.is_empty() && line.contains(s.as_str())))
            .map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[ParameterSynonyms] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ParameterDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
