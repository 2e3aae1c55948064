//! Content-block extraction from detail pages
//!
//! A detail page's main container is located by trying candidate selectors
//! in priority order, falling back to the whole document. Only the
//! container's direct children are considered, filtered to paragraph,
//! heading, and image elements, and a lexical trash filter weeds out the
//! site's recurring boilerplate. The source HTML has no structural marker
//! separating content from boilerplate, so the filter is word-based.

use scraper::{ElementRef, Html, Selector};

/// Element names considered content at the top level of a container
const CONTENT_ELEMENTS: [&str; 4] = ["p", "h2", "h3", "img"];

/// Declarative boilerplate filter: a fragment is rejected when its text is
/// empty or every token of any one rule group appears in the lowercased
/// text.
#[derive(Debug, Clone)]
pub struct TrashFilter {
    rules: Vec<Vec<String>>,
}

impl TrashFilter {
    pub fn new(rules: &[Vec<String>]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|group| group.iter().map(|token| token.to_lowercase()).collect())
                .collect(),
        }
    }

    pub fn is_trash(&self, text: &str) -> bool {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return true;
        }
        self.rules.iter().any(|group| {
            !group.is_empty() && group.iter().all(|token| text.contains(token.as_str()))
        })
    }
}

/// Visible text of an element with whitespace collapsed to single spaces
pub fn collapse_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the main content container by trying each candidate selector in
/// priority order, falling back to the whole document
pub fn select_container<'a>(document: &'a Html, selectors: &[String]) -> ElementRef<'a> {
    for raw in selectors {
        if let Ok(selector) = Selector::parse(raw) {
            if let Some(element) = document.select(&selector).next() {
                return element;
            }
        }
    }
    document.root_element()
}

/// Collects the raw markup of the first `max` non-trash content children.
///
/// Walks direct children only; nested content inside wrapper divs is out of
/// reach on purpose. Images carry no visible text, so the empty-text rule
/// discards them.
pub fn collect_fragments(container: ElementRef, filter: &TrashFilter, max: usize) -> Vec<String> {
    let mut fragments = Vec::new();

    for child in container.children() {
        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };

        let name = element.value().name();
        if !CONTENT_ELEMENTS.contains(&name) {
            continue;
        }

        let text = if name == "img" {
            String::new()
        } else {
            collapse_text(&element)
        };

        if filter.is_trash(&text) {
            continue;
        }

        fragments.push(element.html());
        if fragments.len() >= max {
            break;
        }
    }

    fragments
}

/// Text of the first node matching any candidate date selector
pub fn find_date_text(document: &Html, selectors: &[String]) -> Option<String> {
    for raw in selectors {
        if let Ok(selector) = Selector::parse(raw) {
            if let Some(element) = document.select(&selector).next() {
                return Some(collapse_text(&element));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_filter() -> TrashFilter {
        TrashFilter::new(&[
            vec!["задать".to_string(), "вопрос".to_string()],
            vec!["заполнив поля".to_string()],
        ])
    }

    fn body_selectors() -> Vec<String> {
        vec!["div.article__body".to_string(), "article".to_string()]
    }

    #[test]
    fn test_trash_empty_text() {
        assert!(default_filter().is_trash(""));
        assert!(default_filter().is_trash("   "));
    }

    #[test]
    fn test_trash_requires_all_tokens_of_a_group() {
        let filter = default_filter();
        assert!(filter.is_trash("Вы можете задать свой вопрос здесь"));
        // One token alone is not enough
        assert!(!filter.is_trash("Хороший вопрос обсуждался на лекции"));
    }

    #[test]
    fn test_trash_single_phrase_group() {
        let filter = default_filter();
        assert!(filter.is_trash("Отправьте заявку, заполнив поля ниже"));
    }

    #[test]
    fn test_trash_is_case_insensitive() {
        let filter = default_filter();
        assert!(filter.is_trash("ЗАДАТЬ ВОПРОС"));
    }

    #[test]
    fn test_real_content_passes() {
        let filter = default_filter();
        assert!(!filter.is_trash("В университете открылась новая выставка"));
    }

    #[test]
    fn test_select_container_priority_order() {
        let html = Html::parse_document(
            r#"<html><body>
               <article><p>generic</p></article>
               <div class="article__body"><p>specific</p></div>
               </body></html>"#,
        );
        let container = select_container(&html, &body_selectors());
        assert!(container.html().contains("specific"));
    }

    #[test]
    fn test_select_container_falls_back_to_document() {
        let html = Html::parse_document("<html><body><p>loose</p></body></html>");
        let container = select_container(&html, &body_selectors());
        assert_eq!(container.value().name(), "html");
    }

    #[test]
    fn test_collect_direct_children_only() {
        let html = Html::parse_document(
            r#"<div id="c">
               <p>first</p>
               <div><p>nested is skipped</p></div>
               <h2>second</h2>
               </div>"#,
        );
        let selector = Selector::parse("#c").unwrap();
        let container = html.select(&selector).next().unwrap();

        let fragments = collect_fragments(container, &default_filter(), 3);
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains("first"));
        assert!(fragments[1].contains("second"));
    }

    #[test]
    fn test_fragment_cap_stops_early() {
        let html = Html::parse_document(
            r#"<div id="c">
               <p>one</p><p>two</p><p>three</p><p>four</p><p>five</p>
               </div>"#,
        );
        let selector = Selector::parse("#c").unwrap();
        let container = html.select(&selector).next().unwrap();

        let fragments = collect_fragments(container, &default_filter(), 3);
        assert_eq!(fragments.len(), 3);
        assert!(fragments[2].contains("three"));
    }

    #[test]
    fn test_trash_does_not_count_against_cap() {
        let html = Html::parse_document(
            r#"<div id="c">
               <p>Задать вопрос можно тут</p>
               <p>one</p><p>two</p><p>three</p>
               </div>"#,
        );
        let selector = Selector::parse("#c").unwrap();
        let container = html.select(&selector).next().unwrap();

        let fragments = collect_fragments(container, &default_filter(), 3);
        assert_eq!(fragments.len(), 3);
        assert!(fragments[0].contains("one"));
    }

    #[test]
    fn test_images_have_no_text_and_are_dropped() {
        let html = Html::parse_document(
            r#"<div id="c"><img src="/a.jpg"><p>text</p></div>"#,
        );
        let selector = Selector::parse("#c").unwrap();
        let container = html.select(&selector).next().unwrap();

        let fragments = collect_fragments(container, &default_filter(), 3);
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains("text"));
    }

    #[test]
    fn test_non_content_elements_skipped() {
        let html = Html::parse_document(
            r#"<div id="c"><ul><li>list</li></ul><h1>big</h1><p>keep</p></div>"#,
        );
        let selector = Selector::parse("#c").unwrap();
        let container = html.select(&selector).next().unwrap();

        let fragments = collect_fragments(container, &default_filter(), 3);
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains("keep"));
    }

    #[test]
    fn test_find_date_text() {
        let html = Html::parse_document(
            r#"<html><body><span class="article__date"> 15  марта 2024 </span></body></html>"#,
        );
        let selectors = vec![".article__date".to_string()];
        assert_eq!(
            find_date_text(&html, &selectors),
            Some("15 марта 2024".to_string())
        );
    }

    #[test]
    fn test_find_date_text_absent() {
        let html = Html::parse_document("<html><body><p>no date</p></body></html>");
        let selectors = vec![".article__date".to_string()];
        assert_eq!(find_date_text(&html, &selectors), None);
    }
}
