//! Question sets and their gold labels.
//!
//! A suite is handed to the evaluator explicitly so tests and callers can
//! inject their own fixtures. Suites load from TOML or JSON:
//!
//! ```toml
//! name = "highlevel"
//!
//! [[questions]]
//! conversation_id = "c-001"
//! question = "What is HighLevel?"
//! gold = { has_support = "D1" }
//!
//! [[questions]]
//! conversation_id = "c-003"
//! question = "Does HighLevel provide analytics?"
//! gold = "no_support"
//! ```

use crate::error::{EvalError, Result};
use crate::structures::{GoldSupport, Question};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct EvalSuite {
    pub name: String,
    pub questions: Vec<Question>,
    /// Question index -> gold label
    pub gold: BTreeMap<usize, GoldSupport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteEntry {
    pub conversation_id: String,
    pub question: String,
    pub gold: GoldSupport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SuiteFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    questions: Vec<SuiteEntry>,
}

impl EvalSuite {
    pub fn new(
        name: impl Into<String>,
        questions: Vec<Question>,
        gold: BTreeMap<usize, GoldSupport>,
    ) -> Self {
        Self {
            name: name.into(),
            questions,
            gold,
        }
    }

    /// The three-question HighLevel set the harness ships with.
    pub fn builtin() -> Self {
        let questions = vec![
            Question::new("c-001", "What is HighLevel?"),
            Question::new("c-002", "Who can use HighLevel?"),
            Question::new("c-003", "Does HighLevel provide analytics?"),
        ];

        let gold = BTreeMap::from([
            (0, GoldSupport::doc("D1")),
            (1, GoldSupport::doc("D3")),
            (2, GoldSupport::NoSupport),
        ]);

        Self::new("highlevel", questions, gold)
    }

    pub fn from_entries(name: impl Into<String>, entries: Vec<SuiteEntry>) -> Self {
        let mut questions = Vec::with_capacity(entries.len());
        let mut gold = BTreeMap::new();

        for (idx, entry) in entries.into_iter().enumerate() {
            questions.push(Question::new(entry.conversation_id, entry.question));
            gold.insert(idx, entry.gold);
        }

        Self::new(name, questions, gold)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn gold_for(&self, idx: usize) -> Result<&GoldSupport> {
        self.gold.get(&idx).ok_or(EvalError::MissingGold(idx))
    }

    /// Checks the gold mapping has exactly one entry per question index.
    pub fn validate(&self) -> Result<()> {
        for idx in 0..self.questions.len() {
            self.gold_for(idx)?;
        }

        if let Some(extra) = self.gold.keys().find(|k| **k >= self.questions.len()) {
            return Err(EvalError::Config(format!(
                "gold label for index {} but suite has only {} questions",
                extra,
                self.questions.len()
            )));
        }

        Ok(())
    }

    pub fn from_toml_str(name: &str, raw: &str) -> Result<Self> {
        let file: SuiteFile = toml::from_str(raw).map_err(|e| EvalError::Config(e.to_string()))?;
        Ok(Self::from_file(name, file))
    }

    pub fn from_json_str(name: &str, raw: &str) -> Result<Self> {
        let file: SuiteFile =
            serde_json::from_str(raw).map_err(|e| EvalError::Config(e.to_string()))?;
        Ok(Self::from_file(name, file))
    }

    /// Loads a suite, picking the format from the extension (`.json`, else TOML).
    /// The file stem names the suite unless the file sets `name`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "suite".to_string());

        let suite = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&stem, &raw)?,
            _ => Self::from_toml_str(&stem, &raw)?,
        };

        suite.validate()?;
        Ok(suite)
    }

    fn from_file(default_name: &str, file: SuiteFile) -> Self {
        let name = file.name.unwrap_or_else(|| default_name.to_string());
        Self::from_entries(name, file.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_suite() {
        let suite = EvalSuite::builtin();
        assert_eq!(suite.len(), 3);
        assert!(suite.validate().is_ok());
        assert_eq!(suite.gold_for(0).unwrap(), &GoldSupport::doc("D1"));
        assert_eq!(suite.gold_for(1).unwrap(), &GoldSupport::doc("D3"));
        assert_eq!(suite.gold_for(2).unwrap(), &GoldSupport::NoSupport);
    }

    #[test]
    fn test_missing_gold() {
        let mut suite = EvalSuite::builtin();
        suite.gold.remove(&1);

        assert!(matches!(suite.gold_for(1), Err(EvalError::MissingGold(1))));
        assert!(matches!(suite.validate(), Err(EvalError::MissingGold(1))));
    }

    #[test]
    fn test_extra_gold_entry() {
        let mut suite = EvalSuite::builtin();
        suite.gold.insert(7, GoldSupport::NoSupport);
        assert!(matches!(suite.validate(), Err(EvalError::Config(_))));
    }

    #[test]
    fn test_toml_suite() {
        let raw = r#"
            name = "pricing"

            [[questions]]
            conversation_id = "p-1"
            question = "How much does HighLevel cost?"
            gold = { has_support = "D7" }

            [[questions]]
            conversation_id = "p-2"
            question = "Is there a lifetime deal?"
            gold = "no_support"
        "#;

        let suite = EvalSuite::from_toml_str("ignored", raw).unwrap();
        assert_eq!(suite.name, "pricing");
        assert_eq!(suite.questions[0], Question::new("p-1", "How much does HighLevel cost?"));
        assert_eq!(suite.gold_for(0).unwrap(), &GoldSupport::doc("D7"));
        assert_eq!(suite.gold_for(1).unwrap(), &GoldSupport::NoSupport);
    }

    #[test]
    fn test_json_suite() {
        let raw = r#"{
            "questions": [
                {"conversation_id": "j-1", "question": "q?", "gold": {"has_support": "D2"}},
                {"conversation_id": "j-2", "question": "r?", "gold": "no_support"}
            ]
        }"#;

        let suite = EvalSuite::from_json_str("fallback", raw).unwrap();
        assert_eq!(suite.name, "fallback");
        assert_eq!(suite.len(), 2);
        assert_eq!(suite.gold_for(1).unwrap(), &GoldSupport::NoSupport);
    }

    #[test]
    fn test_entry_without_gold_is_rejected() {
        let raw = r#"
            [[questions]]
            conversation_id = "x"
            question = "no label here"
        "#;
        assert!(matches!(
            EvalSuite::from_toml_str("bad", raw),
            Err(EvalError::Config(_))
        ));
    }
}
