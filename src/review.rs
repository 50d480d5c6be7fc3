use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Identifier of a single review on the remote database. Always numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReviewId(String);

impl ReviewId {
    pub fn parse(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidReviewId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReviewId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ReviewId> for String {
    fn from(value: ReviewId) -> Self {
        value.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Numeric order: shorter digit strings are smaller.
impl Ord for ReviewId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ReviewId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Either a single line or the paragraphs of a narrative field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Paragraphs(Vec<String>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Paragraphs(paragraphs) => f.write_str(&paragraphs.join("\n")),
        }
    }
}

/// Labelled fields of one review page. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Review(BTreeMap<String, FieldValue>);

impl Review {
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.0.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains_key(label)
    }

    pub(crate) fn insert(&mut self, label: &str, value: FieldValue) {
        self.0.insert(label.to_string(), value);
    }

    pub(crate) fn get_mut(&mut self, label: &str) -> Option<&mut FieldValue> {
        self.0.get_mut(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn isbn(&self) -> Option<&str> {
        match self.0.get("ISBN") {
            Some(FieldValue::Text(isbn)) if !isbn.is_empty() => Some(isbn),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_id_rejects_non_numeric() {
        assert!(ReviewId::parse("12345").is_ok());
        assert!(matches!(
            ReviewId::parse("12a45"),
            Err(Error::InvalidReviewId(id)) if id == "12a45"
        ));
        assert!(ReviewId::parse("").is_err());
    }

    #[test]
    fn review_id_orders_numerically() {
        let mut ids = ["100", "9", "25"]
            .into_iter()
            .map(ReviewId::parse)
            .collect::<crate::Result<Vec<_>>>()
            .unwrap();
        ids.sort();
        let ids: Vec<_> = ids.iter().map(ReviewId::as_str).collect();
        assert_eq!(ids, ["9", "25", "100"]);
    }

    #[test]
    fn malformed_id_fails_to_decode() {
        let res = serde_json::from_str::<Vec<ReviewId>>(r#"["1", "x"]"#);
        assert!(res.is_err());
    }

    #[test]
    fn field_values_serialize_untagged() {
        let mut review = Review::default();
        review.insert("Titel", FieldValue::Text("Drachenreiter".into()));
        review.insert(
            "Inhalt",
            FieldValue::Paragraphs(vec!["Eins".into(), "Zwei".into()]),
        );
        let json = serde_json::to_string(&review).unwrap();
        assert_eq!(json, r#"{"Inhalt":["Eins","Zwei"],"Titel":"Drachenreiter"}"#);
        assert_eq!(serde_json::from_str::<Review>(&json).unwrap(), review);
    }
}
