use crate::InputKind;

const UNTITLED: &str = "Untitled";
const SLUG_LIMIT: usize = 10;

/// Derives the display title for a completed run.
///
/// URL input: scheme and leading `www.` are stripped, one trailing slash is
/// dropped, and the title is the domain plus at most [`SLUG_LIMIT`] characters
/// of the last path segment. Text input: `"Untitled N"` where N is one more
/// than the number of existing titles containing "Untitled". Deterministic
/// given the same input and history snapshot.
pub fn derive_title<'a, I>(kind: InputKind, content: &str, existing_titles: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    match kind {
        InputKind::Url => url_title(content),
        InputKind::Text => {
            let count = existing_titles
                .into_iter()
                .filter(|title| title.contains(UNTITLED))
                .count();
            format!("{UNTITLED} {}", count + 1)
        }
    }
}

fn url_title(raw: &str) -> String {
    let clean = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    let clean = clean.strip_prefix("www.").unwrap_or(clean);
    let clean = clean.strip_suffix('/').unwrap_or(clean);

    let mut segments = clean.split('/');
    let domain = segments.next().unwrap_or("");
    // Only a path that actually has segments contributes a slug.
    let slug: String = segments
        .next_back()
        .unwrap_or("")
        .chars()
        .take(SLUG_LIMIT)
        .collect();

    if slug.is_empty() {
        domain.to_string()
    } else {
        format!("{domain}/{slug}")
    }
}
