//! Pure extraction of results listings: match count and review IDs.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::{Error, Result, ReviewId, BASE_URL};

/// Total number of matches announced on the first results page, if any.
pub fn count_results(html: &str, pattern: &Regex) -> Option<usize> {
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn results_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|_| Error::InvalidPattern(pattern.into()))
}

/// Collects the review IDs linked from the main content cell of a results page.
///
/// Each review is linked twice (thumbnail and title), so IDs are deduplicated.
/// `redirects` replaces known-bad IDs before they are validated.
pub fn extract_results(html: &str, redirects: &HashMap<String, String>) -> Result<Vec<ReviewId>> {
    let doc = Html::parse_document(html);
    let body_selector = create_selector("td.td_body")?;
    let link_selector = create_selector("a[href]")?;

    let body = doc
        .select(&body_selector)
        .next()
        .ok_or_else(|| Error::ParseMissingSelector("td.td_body".into()))?;

    let mut reviews = HashSet::new();
    for link in body.select(&link_selector) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some(review) = link_id(href) else {
            continue;
        };
        let review = redirects.get(&review).cloned().unwrap_or(review);
        reviews.insert(ReviewId::parse(review)?);
    }

    Ok(reviews.into_iter().collect())
}

/// Value of the `id` query parameter of a (possibly relative) link.
fn link_id(href: &str) -> Option<String> {
    let base = Url::parse(BASE_URL).ok()?;
    let url = base.join(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
}

#[inline]
pub(crate) fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::RESULTS_PATTERN;

    /// A results page announcing `total` matches and linking `ids` twice each.
    pub(crate) fn results_page(total: usize, ids: &[&str]) -> String {
        let links: String = ids
            .iter()
            .map(|id| {
                format!(
                    r#"<a href="index.php?s=datenbank&amp;id={id}"><img src="cover.jpg"></a>
                       <a href="index.php?s=datenbank&amp;id={id}">Titel {id}</a><br>"#
                )
            })
            .collect();
        format!(
            r#"<html><body><table><tr>
                <td class="td_menu"><a href="index.php?id=999">Menü</a></td>
                <td class="td_body">
                  <p>Es wurden {total} Rezensionen gefunden.</p>
                  {links}
                  <a href="index.php?s=datenbank&amp;start=50">weiter</a>
                </td>
              </tr></table></body></html>"#
        )
    }

    #[test]
    fn counts_results() {
        let pattern = results_pattern(RESULTS_PATTERN).unwrap();
        assert_eq!(count_results(&results_page(123, &[]), &pattern), Some(123));
        assert_eq!(
            count_results("<p>Keine Rezensionen gefunden.</p>", &pattern),
            None
        );
    }

    #[test]
    fn duplicate_links_yield_one_id() {
        let html = results_page(2, &["4711", "42"]);
        let mut reviews = extract_results(&html, &HashMap::new()).unwrap();
        reviews.sort();

        let reviews: Vec<_> = reviews.iter().map(ReviewId::as_str).collect();
        assert_eq!(reviews, ["42", "4711"]);
    }

    #[test]
    fn ignores_links_outside_content_cell() {
        let html = results_page(1, &["5"]);
        let reviews = extract_results(&html, &HashMap::new()).unwrap();
        assert!(!reviews.iter().any(|r| r.as_str() == "999"));
    }

    #[test]
    fn invalid_id_aborts_extraction() {
        let html = results_page(1, &["12x"]);
        let res = extract_results(&html, &HashMap::new());
        assert!(matches!(res, Err(Error::InvalidReviewId(id)) if id == "12x"));
    }

    #[test]
    fn redirects_replace_bad_ids() {
        let html = results_page(1, &["12x"]);
        let redirects = HashMap::from([("12x".to_string(), "12".to_string())]);

        let reviews = extract_results(&html, &redirects).unwrap();
        assert_eq!(reviews, vec![ReviewId::parse("12").unwrap()]);
    }

    #[test]
    fn missing_content_cell_is_an_error() {
        let res = extract_results("<html><body></body></html>", &HashMap::new());
        assert!(matches!(res, Err(Error::ParseMissingSelector(_))));
    }
}
