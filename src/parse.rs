use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::results::create_selector;
use crate::{FieldValue, Review};

/// A labelled cell of the review table.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub label: &'static str,
    /// Narrative fields keep their paragraphs instead of being joined.
    pub multiline: bool,
}

const fn field(label: &'static str) -> Field {
    Field {
        label,
        multiline: false,
    }
}

const fn narrative(label: &'static str) -> Field {
    Field {
        label,
        multiline: true,
    }
}

pub const FIELDS: [Field; 20] = [
    field("Autor"),
    field("Titel"),
    field("ISBN"),
    field("Übersetzer"),
    field("Originalsprache"),
    field("Illustrator"),
    field("Seitenanzahl"),
    field("Verlag"),
    field("Gattung"),
    field("Reihe"),
    field("Jahr"),
    field("Preis"),
    narrative("Inhalt"),
    field("Lesealter"),
    field("Einsatzmöglichkeiten"),
    field("WolgastPreis"),
    field("Bewertung"),
    field("Schlagwörter"),
    narrative("Anmerkungen"),
    narrative("Beurteilungstext"),
];

/// Has no label of its own, sits three cells after the price label.
pub const BINDING: &str = "Einband";
const PRICE_LABEL: &str = "Preis:";
const BINDING_OFFSET: usize = 3;
const MAX_FIELDS: usize = FIELDS.len() + 1;

/// Parses a cached review page into its fields.
///
/// Pages without the `disclaimer` marker aren't reviews and yield an empty record.
pub fn extract_review(html: &str, disclaimer: &str) -> Review {
    let mut review = Review::default();
    if !html.contains(disclaimer) {
        return review;
    }

    let html = break_tags().replace_all(html, "\n");
    let doc = Html::parse_document(&html);

    for cell in review_cells(&doc) {
        if review.len() == MAX_FIELDS {
            break;
        }

        let text = cell_text(cell);
        if !text.contains(':') {
            continue;
        }

        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if let Some(field) = FIELDS
            .iter()
            .find(|f| !review.contains(f.label) && compact.strip_suffix(':') == Some(f.label))
        {
            if let Some(value) = sibling_cell(cell, 1) {
                review.insert(field.label, field_value(field, &cell_text(value)));
            }
        }

        if text.trim() == PRICE_LABEL && !review.contains(BINDING) {
            if let Some(binding) = sibling_cell(cell, BINDING_OFFSET) {
                review.insert(
                    BINDING,
                    FieldValue::Text(normalize(&cell_text(binding))),
                );
            }
        }
    }

    post_process(&mut review);
    review
}

/// Data cells of the table that follows the search form in the main content cell.
fn review_cells(doc: &Html) -> Vec<ElementRef<'_>> {
    let (Ok(body_sel), Ok(form_sel), Ok(cell_sel)) = (
        create_selector("td.td_body"),
        create_selector("form"),
        create_selector("td"),
    ) else {
        return Vec::new();
    };

    let table = doc
        .select(&body_sel)
        .next()
        .and_then(|body| body.select(&form_sel).next())
        .and_then(|form| {
            form.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "table")
        });

    match table {
        Some(table) => table.select(&cell_sel).collect(),
        None => Vec::new(),
    }
}

/// The `n`-th following sibling cell in the same row.
fn sibling_cell(cell: ElementRef<'_>, n: usize) -> Option<ElementRef<'_>> {
    cell.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .nth(n - 1)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect()
}

fn field_value(field: &Field, text: &str) -> FieldValue {
    let lines = text
        .split('\n')
        .map(normalize)
        .filter(|line| !line.is_empty());

    if field.multiline {
        FieldValue::Paragraphs(lines.collect())
    } else {
        FieldValue::Text(lines.collect::<Vec<_>>().join(" "))
    }
}

/// Trims a line and replaces control characters that older pages used as
/// quotation marks, ellipsis and dash.
///
/// U+0094 closes a quote like U+0093, so it becomes a plain `"` without a
/// trailing period.
fn normalize(line: &str) -> String {
    line.trim()
        .chars()
        .fold(String::with_capacity(line.len()), |mut out, c| {
            match c {
                '\u{0084}' | '\u{0093}' | '\u{0094}' => out.push('"'),
                '\u{0085}' => out.push_str("..."),
                '\u{0096}' => out.push('-'),
                c => out.push(c),
            }
            out
        })
}

fn post_process(review: &mut Review) {
    if let Some(FieldValue::Text(author)) = review.get_mut("Autor") {
        if let Some(stripped) = author.strip_suffix(',') {
            *author = stripped.trim_end().to_string();
        }
    }
    if let Some(FieldValue::Text(isbn)) = review.get_mut("ISBN") {
        isbn.retain(|c| !c.is_whitespace());
    }
}

fn break_tags() -> &'static Regex {
    static BREAK: OnceLock<Regex> = OnceLock::new();
    BREAK.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("valid break tag pattern"))
}
