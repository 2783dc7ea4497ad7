use std::collections::HashSet;
use std::fmt::Display;
use std::ops::Index;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Keyword must not be empty")]
    EmptyKeyword,
    #[error("Reply list must contain at least one reply")]
    NoReplies,
    #[error("Duplicate keyword: {0}")]
    DuplicateKeyword(String),
}

/// Lowercase text matched against lowercased messages. Must contain more
/// than whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Keyword(String);

impl Keyword {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Keyword {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(TableError::EmptyKeyword);
        }
        let lowercase = value.to_lowercase();
        if lowercase != value {
            debug!("Keyword \"{value}\" normalized to \"{lowercase}\"");
        }
        Ok(Keyword(lowercase))
    }
}

impl TryFrom<&str> for Keyword {
    type Error = TableError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Keyword::try_from(String::from(value))
    }
}

impl From<Keyword> for String {
    fn from(value: Keyword) -> Self {
        value.0
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Ordered, non-empty list of candidate replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Replies(Vec<String>);

impl Replies {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, reply: &str) -> bool {
        self.iter().any(|r| r == reply)
    }
}

impl TryFrom<Vec<String>> for Replies {
    type Error = TableError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err(TableError::NoReplies)
        } else {
            Ok(Replies(value))
        }
    }
}

impl TryFrom<Vec<&str>> for Replies {
    type Error = TableError;

    fn try_from(value: Vec<&str>) -> Result<Self, Self::Error> {
        Replies::try_from(value.into_iter().map(String::from).collect::<Vec<_>>())
    }
}

impl From<Replies> for Vec<String> {
    fn from(value: Replies) -> Self {
        value.0
    }
}

impl Index<usize> for Replies {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordEntry {
    pub keyword: Keyword,
    pub replies: Replies,
}

impl KeywordEntry {
    pub fn new(keyword: &str, replies: Vec<&str>) -> Result<Self, TableError> {
        Ok(KeywordEntry {
            keyword: Keyword::try_from(keyword)?,
            replies: Replies::try_from(replies)?,
        })
    }
}

/// Keyword entries in precedence order. The first entry whose keyword occurs
/// in a message is the one used, so order is part of the table's meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<KeywordEntry>", into = "Vec<KeywordEntry>")]
pub struct KeywordTable(Vec<KeywordEntry>);

impl KeywordTable {
    pub fn iter(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.0.iter().map(|e| &e.keyword)
    }

    pub fn get(&self, keyword: &str) -> Option<&KeywordEntry> {
        self.0.iter().find(|e| e.keyword.as_str() == keyword)
    }
}

impl TryFrom<Vec<KeywordEntry>> for KeywordTable {
    type Error = TableError;

    fn try_from(value: Vec<KeywordEntry>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for entry in &value {
            if !seen.insert(entry.keyword.as_str()) {
                return Err(TableError::DuplicateKeyword(entry.keyword.to_string()));
            }
        }
        Ok(KeywordTable(value))
    }
}

impl From<KeywordTable> for Vec<KeywordEntry> {
    fn from(value: KeywordTable) -> Self {
        value.0
    }
}

/// Everything a responder needs: keyword entries plus the fallback replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTable {
    #[serde(default)]
    pub keywords: KeywordTable,
    pub default_replies: Replies,
}

impl ResponseTable {
    pub fn new(keywords: KeywordTable, default_replies: Replies) -> Self {
        Self {
            keywords,
            default_replies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn keyword_is_lowercased() -> Result<()> {
        assert_eq!(Keyword::try_from("Soul Activation")?.as_str(), "soul activation");
        Ok(())
    }

    #[test]
    fn empty_keyword_rejected() {
        assert_eq!(Keyword::try_from(""), Err(TableError::EmptyKeyword));
    }

    #[test]
    fn whitespace_keyword_rejected() -> Result<()> {
        assert_eq!(Keyword::try_from(" "), Err(TableError::EmptyKeyword));
        assert_eq!(Keyword::try_from("\t\n"), Err(TableError::EmptyKeyword));
        assert_eq!(Keyword::try_from("inner peace")?.as_str(), "inner peace");

        let yaml = "keywords:\n  - keyword: \" \"\n    replies: [\"space\"]\ndefaultReplies: [\"d\"]\n";
        let err = serde_yaml::from_str::<ResponseTable>(yaml).unwrap_err();
        assert!(err.to_string().contains("Keyword must not be empty"), "{err}");
        Ok(())
    }

    #[test]
    fn empty_replies_rejected() {
        assert_eq!(
            Replies::try_from(Vec::<String>::new()),
            Err(TableError::NoReplies)
        );
        assert_eq!(
            KeywordEntry::new("stress", vec![]),
            Err(TableError::NoReplies)
        );
    }

    #[test]
    fn duplicate_keyword_rejected_after_normalization() -> Result<()> {
        let entries = vec![
            KeywordEntry::new("chakra", vec!["a"])?,
            KeywordEntry::new("CHAKRA", vec!["b"])?,
        ];
        assert_eq!(
            KeywordTable::try_from(entries).unwrap_err().to_string(),
            "Duplicate keyword: chakra"
        );
        Ok(())
    }

    #[test]
    fn deserialize_keeps_entry_order() -> Result<()> {
        let yaml = r#"
keywords:
  - keyword: zen
    replies: ["z"]
  - keyword: Aura
    replies: ["a1", "a2"]
  - keyword: mantra
    replies: ["m"]
defaultReplies: ["d"]
"#;
        let table: ResponseTable = serde_yaml::from_str(yaml)?;
        assert_eq!(
            table.keywords.keywords().map(Keyword::as_str).collect::<Vec<_>>(),
            vec!["zen", "aura", "mantra"]
        );
        assert_eq!(table.keywords.get("aura").map(|e| e.replies.len()), Some(2));
        assert_eq!(serde_yaml::from_str::<ResponseTable>(&serde_yaml::to_string(&table)?)?, table);
        Ok(())
    }

    #[test]
    fn deserialize_rejects_empty_reply_list() {
        let yaml = r#"
keywords:
  - keyword: zen
    replies: []
defaultReplies: ["d"]
"#;
        let err = serde_yaml::from_str::<ResponseTable>(yaml).unwrap_err();
        assert!(err.to_string().contains("at least one reply"), "{err}");
    }

    #[test]
    fn deserialize_rejects_missing_default_replies() {
        let yaml = "keywords: []\ndefaultReplies: []\n";
        assert!(serde_yaml::from_str::<ResponseTable>(yaml).is_err());
    }
}
