// Book recommendations, extracted from the recommended content of the
// result records.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::peit::*;

// **📚 <label>:** **『Title』 (Author):** <a href="link">
static BOOK_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\*\*📚[^*]*\*\*\s*\*\*『?([^』]+?)』?\s*\(([^)]+)\):\*\*\s*<a\s+href="([^"]+)"[^>]*>"#)
        .expect("Invalid book entry regex")
});

// Everything after this marker lists videos and lectures.
const VIDEO_SECTION_MARKER: &str = "**🎬";

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub link: String,
    #[serde(rename = "relatedTypes")]
    pub related_types: Vec<String>,
}

pub fn parse_recommended_content(content: &str) -> Vec<Book> {
    let book_section = content
        .split(VIDEO_SECTION_MARKER)
        .next()
        .unwrap_or_default();
    BOOK_ENTRY
        .captures_iter(book_section)
        .filter_map(|cap| {
            let title = cap.get(1)?.as_str().trim();
            let author = cap.get(2)?.as_str().trim();
            let link = cap.get(3)?.as_str().trim();
            if title.is_empty() || author.is_empty() || link.is_empty() {
                return None;
            }
            Some(Book {
                title: title.to_string(),
                author: author.to_string(),
                link: link.to_string(),
                related_types: Vec::new(),
            })
        })
        .collect()
}

/// All the books of the dictionary. A book recommended by several types
/// appears once, with all of them as related types.
pub fn build_catalog(results: &ResultsDictionary) -> Vec<Book> {
    let mut res: Vec<Book> = Vec::new();
    let mut by_key: HashMap<(String, String), usize> = HashMap::new();
    for (code, record) in results.iter() {
        let content = match record.recommended_content() {
            Some(c) => c,
            None => continue,
        };
        for mut book in parse_recommended_content(content) {
            let key = (book.title.clone(), book.author.clone());
            match by_key.get(&key) {
                Some(idx) => {
                    let existing = &mut res[*idx];
                    if !existing.related_types.iter().any(|t| t == code.as_str()) {
                        existing.related_types.push(code.as_str().to_string());
                    }
                }
                None => {
                    debug!("catalog: {:?} by {:?} from {}", book.title, book.author, code);
                    book.related_types = vec![code.as_str().to_string()];
                    by_key.insert(key, res.len());
                    res.push(book);
                }
            }
        }
    }
    res
}

pub fn books_for_type<'a>(catalog: &'a [Book], code: &TypeCode) -> Vec<&'a Book> {
    catalog
        .iter()
        .filter(|b| b.related_types.iter().any(|t| t == code.as_str()))
        .collect()
}
