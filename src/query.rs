use url::form_urlencoded;

use crate::vocab::{AGES, APPLICATIONS, GENRES, MEDIA_TYPES, RATINGS, TAGS};
use crate::QueryParams;

/// Value the search form sends for a ticked checkbox.
const CHECKED: &str = "JA";
/// Neutral value of an unset select field.
const UNSET: &str = "0";

/// A structured search against the remote database.
///
/// Enumerated fields that aren't on their allow-list are ignored and the
/// parameter keeps its neutral value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search_term: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub illustrator: String,
    pub tag: String,
    pub rating: String,
    pub application: String,
    pub media_type: String,
    pub age: String,
    pub genre: String,
    /// Include archived reviews.
    pub archive: bool,
    /// Only reviews of Wolgast laureates.
    pub wolgast: bool,
}

impl Query {
    pub fn to_params(&self) -> QueryParams {
        let mut params: QueryParams = [
            ("do", "suchen"),
            ("suchtext", self.search_term.as_str()),
            ("titel", self.title.as_str()),
            ("autor1", self.first_name.as_str()),
            ("autor2", self.last_name.as_str()),
            ("illustrator", self.illustrator.as_str()),
        ]
        .into_iter()
        .collect();

        for (key, value, allowed) in [
            ("schlagwort", &self.tag, TAGS),
            ("bewertung", &self.rating, RATINGS),
            ("einsatz", &self.application, APPLICATIONS),
            ("medienart", &self.media_type, MEDIA_TYPES),
            ("alter", &self.age, AGES),
            ("gattung", &self.genre, GENRES),
        ] {
            params.insert(key, select(value, allowed));
        }

        params.insert("archiv", checkbox(self.archive));
        params.insert("wolgast", checkbox(self.wolgast));
        params
    }
}

/// Select values are sent form-encoded, as the search form itself does.
fn select(value: &str, allowed: &[&str]) -> String {
    if allowed.contains(&value) {
        form_urlencoded::byte_serialize(value.as_bytes()).collect()
    } else {
        UNSET.to_string()
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        CHECKED
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_text_query_uses_neutral_defaults() {
        let query = Query {
            search_term: "Drachen".into(),
            ..Default::default()
        };
        let params = query.to_params();

        assert_eq!(params.get("do"), Some("suchen"));
        assert_eq!(params.get("suchtext"), Some("Drachen"));
        for key in ["titel", "autor1", "autor2", "illustrator", "archiv", "wolgast"] {
            assert_eq!(params.get(key), Some(""), "{key}");
        }
        for key in ["schlagwort", "bewertung", "einsatz", "medienart", "alter", "gattung"] {
            assert_eq!(params.get(key), Some("0"), "{key}");
        }
        assert_eq!(params.iter().count(), 14);
    }

    #[test]
    fn archive_flag_uses_sentinel() {
        let archived = Query {
            archive: true,
            ..Default::default()
        };
        assert_eq!(archived.to_params().get("archiv"), Some("JA"));
        assert_eq!(Query::default().to_params().get("archiv"), Some(""));
    }

    #[test]
    fn wolgast_flag_uses_sentinel() {
        let laureates = Query {
            wolgast: true,
            ..Default::default()
        };
        assert_eq!(laureates.to_params().get("wolgast"), Some("JA"));
        assert_eq!(laureates.to_params().get("archiv"), Some(""));
    }

    #[test]
    fn known_select_values_are_encoded() {
        let query = Query {
            rating: "sehr empfehlenswert".into(),
            tag: "Liebe/Erste Liebe".into(),
            age: "ab 18".into(),
            ..Default::default()
        };
        let params = query.to_params();

        assert_eq!(params.get("bewertung"), Some("sehr+empfehlenswert"));
        assert_eq!(params.get("schlagwort"), Some("Liebe%2FErste+Liebe"));
        assert_eq!(params.get("alter"), Some("ab+18"));
    }

    #[test]
    fn unknown_select_values_are_ignored() {
        let query = Query {
            genre: "Space Opera".into(),
            media_type: "Schallplatte".into(),
            ..Default::default()
        };
        let params = query.to_params();

        assert_eq!(params.get("gattung"), Some("0"));
        assert_eq!(params.get("medienart"), Some("0"));
    }
}
