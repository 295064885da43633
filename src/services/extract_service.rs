use scraper::{Html, Selector};

/// Extract readable text from raw HTML: the text of every `h1`, then every
/// `p`, in document order within each group. Fragments are whitespace
/// normalized and joined with single spaces. An unparseable or element-free
/// document yields `""`.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let headings = Selector::parse("h1").unwrap();
    let paragraphs = Selector::parse("p").unwrap();

    let mut fragments: Vec<String> = Vec::new();
    for element in document
        .select(&headings)
        .chain(document.select(&paragraphs))
    {
        let text = element.text().collect::<Vec<_>>().join(" ");
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !normalized.is_empty() {
            fragments.push(normalized);
        }
    }

    fragments.join(" ")
}
