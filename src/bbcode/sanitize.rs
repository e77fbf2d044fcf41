use ammonia::Builder;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Click handler attached to spoiler toggles. It is the only inline
/// event handler the sanitizer lets through, and only on `<button>`.
pub const SPOILER_TOGGLE: &str = "var c=this.nextElementSibling;c.style.display=c.style.display==='none'?'block':'none';";

const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "button", "code", "del", "div", "em", "hr", "i", "iframe",
    "img", "li", "mark", "ol", "p", "pre", "s", "small", "span", "strong", "sub", "sup", "table",
    "tbody", "td", "th", "thead", "tr", "u", "ul",
];

const GENERIC_ATTRIBUTES: &[&str] = &["class", "style"];

const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["href", "target", "title"]),
    ("img", &["src", "alt", "loading", "width", "height"]),
    (
        "iframe",
        &[
            "src",
            "width",
            "height",
            "frameborder",
            "allow",
            "allowfullscreen",
            "loading",
        ],
    ),
    ("ol", &["type"]),
    ("button", &["type", "onclick"]),
    ("td", &["colspan", "rowspan"]),
    ("th", &["colspan", "rowspan"]),
];

const EMBED_PREFIXES: &[&str] = &[
    "https://www.youtube.com/embed/",
    "https://www.youtube-nocookie.com/embed/",
];

fn filter_attribute<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    match (element, attribute) {
        ("button", "onclick") => (value == SPOILER_TOGGLE).then_some(Cow::Borrowed(value)),
        ("iframe", "src") => EMBED_PREFIXES
            .iter()
            .any(|prefix| value.starts_with(prefix))
            .then_some(Cow::Borrowed(value)),
        ("a", "target") => (value == "_blank").then_some(Cow::Borrowed(value)),
        _ => Some(Cow::Borrowed(value)),
    }
}

fn sanitizer() -> &'static Builder<'static> {
    static SANITIZER: OnceLock<Builder<'static>> = OnceLock::new();
    SANITIZER.get_or_init(|| {
        let tag_attributes: HashMap<&str, HashSet<&str>> = TAG_ATTRIBUTES
            .iter()
            .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
            .collect();

        let mut builder = Builder::default();
        builder
            .tags(ALLOWED_TAGS.iter().copied().collect())
            .generic_attributes(GENERIC_ATTRIBUTES.iter().copied().collect())
            .tag_attributes(tag_attributes)
            .url_schemes(["http", "https", "mailto"].into_iter().collect())
            .clean_content_tags(["script", "style"].into_iter().collect())
            .attribute_filter(filter_attribute);
        builder
    })
}

/// Strip every tag and attribute outside the allow-list.
///
/// `<script>` and `<style>` are removed together with their content.
pub fn clean(html: &str) -> String {
    sanitizer().clean(html).to_string()
}
