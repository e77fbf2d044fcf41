use log::trace;
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::OnceLock;

use super::sanitize::SPOILER_TOGGLE;

/// A single substitution pass over the whole message.
pub type Stage = fn(&str) -> String;

/// Conversion stages in application order.
pub const STAGES: &[(&str, Stage)] = &[
    ("mentions", mentions),
    ("quotes", quotes),
    ("inline", inline_styles),
    ("alignment", alignment),
    ("extended", extended_styles),
    ("media", links_and_media),
    ("spoilers", spoilers),
    ("code", code_blocks),
    ("attachments", attachments),
    ("lists", lists),
    ("tables", tables),
    ("rules", horizontal_rules),
    ("newlines", line_breaks),
];

/// Run every stage over `text`. The result is not sanitized.
pub fn convert(text: &str) -> String {
    let mut out = text.replace("\r\n", "\n");
    for (name, stage) in STAGES {
        out = stage(&out);
        trace!("bbcode stage {name}: {} bytes", out.len());
    }
    out
}

macro_rules! regex {
    ($re:literal) => {{
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new($re).expect("valid bbcode pattern"))
    }};
}

macro_rules! tag {
    ($name:literal) => {{
        static PATTERN: OnceLock<TagPattern> = OnceLock::new();
        PATTERN.get_or_init(|| TagPattern::new($name))
    }};
}

/// Opening and closing patterns of a paired tag.
///
/// The opener accepts `[name]`, `[name=option]` and `[name attrs...]`.
pub struct TagPattern {
    open: Regex,
    close: Regex,
}

impl TagPattern {
    fn new(name: &str) -> Self {
        let name = regex::escape(name);
        Self {
            open: Regex::new(&format!(r"(?i)\[{name}(?:=([^\]]*)|\s+([^\]]*))?\]"))
                .expect("valid tag pattern"),
            close: Regex::new(&format!(r"(?i)\[/{name}\]")).expect("valid tag pattern"),
        }
    }
}

/// One matched `[tag ...]body[/tag]` occurrence.
pub struct TagMatch<'a> {
    pub option: Option<&'a str>,
    pub attrs: Option<&'a str>,
    pub body: &'a str,
}

impl TagMatch<'_> {
    /// The `=option` value, or the attribute string, without surrounding quotes.
    fn argument(&self) -> Option<&str> {
        self.option
            .or(self.attrs)
            .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|s| !s.is_empty())
    }
}

/// Opening or closing tag found in the source text.
enum Token {
    Open {
        span: Range<usize>,
        option: Option<Range<usize>>,
        attrs: Option<Range<usize>>,
    },
    Close(Range<usize>),
}

impl Token {
    fn span(&self) -> &Range<usize> {
        match self {
            Token::Open { span, .. } | Token::Close(span) => span,
        }
    }
}

/// An opening tag whose body is still being collected.
struct OpenTag {
    span: Range<usize>,
    option: Option<Range<usize>>,
    attrs: Option<Range<usize>>,
    body: String,
}

fn sink<'a>(stack: &'a mut [OpenTag], out: &'a mut String) -> &'a mut String {
    match stack.last_mut() {
        Some(open) => &mut open.body,
        None => out,
    }
}

/// Replace every well-formed occurrence of a paired tag, innermost first.
///
/// Openers and closers are located in one pass and paired with a stack,
/// so each closer takes the nearest unclosed opener before it. When
/// `render` returns `None`, the pair is kept as written (with its body
/// already converted). Closers without an opener and openers that are
/// never closed stay literal.
pub fn replace_tag<F>(text: &str, tag: &TagPattern, render: F) -> String
where
    F: Fn(&TagMatch<'_>) -> Option<String>,
{
    let mut tokens: Vec<Token> = tag
        .open
        .captures_iter(text)
        .filter_map(|caps| {
            Some(Token::Open {
                span: caps.get(0)?.range(),
                option: caps.get(1).map(|m| m.range()),
                attrs: caps.get(2).map(|m| m.range()),
            })
        })
        .chain(tag.close.find_iter(text).map(|m| Token::Close(m.range())))
        .collect();
    if tokens.is_empty() {
        return text.to_string();
    }
    tokens.sort_by_key(|token| token.span().start);

    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<OpenTag> = Vec::new();
    let mut copied = 0;

    for token in tokens {
        let span = token.span().clone();
        // An attribute opener can swallow a closer; keep the first
        if span.start < copied {
            continue;
        }
        sink(&mut stack, &mut out).push_str(&text[copied..span.start]);
        copied = span.end;

        match token {
            Token::Open { span, option, attrs } => stack.push(OpenTag {
                span,
                option,
                attrs,
                body: String::new(),
            }),
            Token::Close(close) => match stack.pop() {
                Some(open) => {
                    let matched = TagMatch {
                        option: open.option.clone().map(|r| &text[r]),
                        attrs: open.attrs.clone().map(|r| &text[r]),
                        body: &open.body,
                    };
                    let html = render(&matched).unwrap_or_else(|| {
                        format!("{}{}{}", &text[open.span.clone()], open.body, &text[close.clone()])
                    });
                    sink(&mut stack, &mut out).push_str(&html);
                }
                None => out.push_str(&text[close]),
            },
        }
    }

    sink(&mut stack, &mut out).push_str(&text[copied..]);
    while let Some(open) = stack.pop() {
        let literal = format!("{}{}", &text[open.span], open.body);
        sink(&mut stack, &mut out).push_str(&literal);
    }
    out
}

fn simple(text: &str, tag: &TagPattern, open: &str, close: &str) -> String {
    replace_tag(text, tag, |m| Some(format!("{open}{}{close}", m.body)))
}

/// Escape text for use inside HTML text or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Accept http(s) and mailto links; `www.` hosts get an https scheme.
pub fn safe_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    let url = if url.len() > 4 && url.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) {
        format!("https://{url}")
    } else {
        url.to_string()
    };
    regex!(r#"(?i)^(?:https?://|mailto:)[^\s"'<>`]+$"#)
        .is_match(&url)
        .then_some(url)
}

/// Extract a YouTube video id from a bare id or a watch/share/embed URL.
pub fn youtube_id(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if regex!(r"^[A-Za-z0-9_-]{1,64}$").is_match(raw) {
        return Some(raw);
    }
    regex!(
        r"(?i)(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#\s]*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{1,64})"
    )
    .captures(raw)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str())
}

fn mentions(text: &str) -> String {
    replace_tag(text, tag!("user"), |m| {
        let name = m.body.trim();
        (!name.is_empty()).then(|| format!("<span class=\"bb-mention\">@{name}</span>"))
    })
}

fn quotes(text: &str) -> String {
    replace_tag(text, tag!("quote"), |m| {
        let body = m.body.trim_matches('\n');
        // `[quote="name, post: 12, member: 3"]` cites only the name
        let author = m
            .argument()
            .and_then(|arg| arg.split(',').next())
            .map(str::trim)
            .filter(|name| !name.is_empty());

        Some(match author {
            Some(author) => format!(
                "<blockquote class=\"bb-quote\"><div class=\"bb-quote-author\">{} said:</div><div class=\"bb-quote-body\">{body}</div></blockquote>",
                escape(author)
            ),
            None => format!("<blockquote class=\"bb-quote\">{body}</blockquote>"),
        })
    })
}

const SIZES_PX: [u32; 7] = [10, 12, 15, 18, 22, 26, 32];

fn font_size(option: &str) -> Option<u32> {
    let option = option.trim();
    if let Ok(n) = option.parse::<usize>() {
        return SIZES_PX.get(n.checked_sub(1)?).copied();
    }
    let px = option.strip_suffix("px")?.parse::<u32>().ok()?;
    (8..=72).contains(&px).then_some(px)
}

fn inline_styles(text: &str) -> String {
    let out = simple(text, tag!("b"), "<strong>", "</strong>");
    let out = simple(&out, tag!("i"), "<em>", "</em>");
    let out = simple(&out, tag!("u"), "<u>", "</u>");
    let out = simple(&out, tag!("s"), "<s>", "</s>");
    let out = replace_tag(&out, tag!("color"), |m| {
        let color = m.argument().filter(|c| {
            regex!(r"(?i)^(?:#[0-9a-f]{3,8}|[a-z]{3,20}|rgba?\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*(?:,\s*[0-9.]+\s*)?\))$")
                .is_match(c)
        });
        Some(match color {
            Some(color) => format!("<span style=\"color: {color}\">{}</span>", m.body),
            None => m.body.to_string(),
        })
    });
    replace_tag(&out, tag!("size"), |m| {
        Some(match m.argument().and_then(font_size) {
            Some(px) => format!("<span style=\"font-size: {px}px\">{}</span>", m.body),
            None => m.body.to_string(),
        })
    })
}

fn alignment(text: &str) -> String {
    let mut out = text.to_string();
    for (tag, align) in [
        (tag!("center"), "center"),
        (tag!("right"), "right"),
        (tag!("left"), "left"),
        (tag!("justify"), "justify"),
    ] {
        out = simple(
            &out,
            tag,
            &format!("<div style=\"text-align: {align}\">"),
            "</div>",
        );
    }
    replace_tag(&out, tag!("indent"), |m| {
        let level = m
            .argument()
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, 10);
        Some(format!(
            "<div style=\"margin-left: {}px\">{}</div>",
            level * 20,
            m.body
        ))
    })
}

fn extended_styles(text: &str) -> String {
    let out = replace_tag(text, tag!("font"), |m| {
        let family = m
            .argument()
            .filter(|f| regex!(r"^[A-Za-z0-9 ,-]{1,64}$").is_match(f));
        Some(match family {
            Some(family) => format!("<span style=\"font-family: {family}\">{}</span>", m.body),
            None => m.body.to_string(),
        })
    });
    let out = simple(&out, tag!("highlight"), "<mark>", "</mark>");
    let out = simple(&out, tag!("hl"), "<mark>", "</mark>");
    let out = simple(&out, tag!("sub"), "<sub>", "</sub>");
    simple(&out, tag!("sup"), "<sup>", "</sup>")
}

fn youtube_embed(id: &str) -> String {
    format!(
        "<div class=\"bb-video\"><iframe src=\"https://www.youtube.com/embed/{id}\" width=\"560\" height=\"315\" frameborder=\"0\" allow=\"accelerometer; encrypted-media; picture-in-picture\" allowfullscreen loading=\"lazy\"></iframe></div>"
    )
}

fn links_and_media(text: &str) -> String {
    let out = replace_tag(text, tag!("url"), |m| {
        let unfurl = m
            .attrs
            .is_some_and(|attrs| attrs.to_ascii_lowercase().contains("unfurl"));
        if unfurl {
            return Some(match safe_url(m.body) {
                Some(url) => format!(
                    "<a class=\"bb-unfurl\" href=\"{0}\" target=\"_blank\">{0}</a>",
                    escape(&url)
                ),
                None => escape(m.body),
            });
        }

        match m.option {
            Some(href) => Some(match safe_url(href) {
                Some(url) => format!(
                    "<a href=\"{}\" target=\"_blank\">{}</a>",
                    escape(&url),
                    m.body
                ),
                None => m.body.to_string(),
            }),
            None => Some(match safe_url(m.body) {
                Some(url) => format!(
                    "<a href=\"{0}\" target=\"_blank\">{0}</a>",
                    escape(&url)
                ),
                None => escape(m.body),
            }),
        }
    });

    let out = replace_tag(&out, tag!("img"), |m| {
        let alt = m
            .attrs
            .and_then(|attrs| regex!(r#"(?i)alt\s*=\s*"([^"]*)""#).captures(attrs))
            .and_then(|caps| caps.get(1))
            .map(|alt| alt.as_str())
            .or(m.option)
            .unwrap_or("");
        Some(match safe_url(m.body) {
            Some(src) => format!(
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                escape(&src),
                escape(alt)
            ),
            None => escape(alt),
        })
    });

    let out = replace_tag(&out, tag!("youtube"), |m| youtube_id(m.body).map(youtube_embed));

    replace_tag(&out, tag!("media"), |m| {
        let site = m.argument()?;
        if !site.eq_ignore_ascii_case("youtube") {
            return None;
        }
        youtube_id(m.body).map(youtube_embed)
    })
}

fn spoilers(text: &str) -> String {
    replace_tag(text, tag!("spoiler"), |m| {
        let label = match m.argument() {
            Some(title) => format!("Spoiler: {}", escape(title)),
            None => "Spoiler".to_string(),
        };
        Some(format!(
            "<div class=\"bb-spoiler\"><button type=\"button\" class=\"bb-spoiler-toggle\" onclick=\"{SPOILER_TOGGLE}\">{label}</button><div class=\"bb-spoiler-content\" style=\"display: none\">{}</div></div>",
            m.body.trim_matches('\n')
        ))
    })
}

fn code_blocks(text: &str) -> String {
    let out = replace_tag(text, tag!("code"), |m| {
        let class = match m.argument() {
            Some(lang) if regex!(r"^[A-Za-z0-9_+#-]{1,32}$").is_match(lang) => {
                format!("bb-code language-{}", lang.to_ascii_lowercase())
            }
            _ => "bb-code".to_string(),
        };
        Some(format!(
            "<pre class=\"{class}\"><code>{}</code></pre>",
            m.body.trim_matches('\n')
        ))
    });
    simple(&out, tag!("icode"), "<code>", "</code>")
}

fn attachments(text: &str) -> String {
    replace_tag(text, tag!("attach"), |m| {
        let body = m.body.trim();
        if !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()) {
            return Some(format!(
                "<span class=\"bb-attachment\">Attachment #{body}</span>"
            ));
        }
        safe_url(body).map(|src| {
            format!(
                "<img class=\"bb-attachment\" src=\"{}\" alt=\"\" loading=\"lazy\">",
                escape(&src)
            )
        })
    })
}

fn lists(text: &str) -> String {
    replace_tag(text, tag!("list"), |m| {
        let (open, close) = match m.option.map(str::trim) {
            None | Some("") => ("<ul>".to_string(), "</ul>"),
            Some("1") => ("<ol>".to_string(), "</ol>"),
            Some(kind @ ("a" | "A" | "i" | "I")) => (format!("<ol type=\"{kind}\">"), "</ol>"),
            Some(_) => ("<ul>".to_string(), "</ul>"),
        };

        let marker = regex!(r"\[\*\]");
        if !marker.is_match(m.body) {
            return Some(format!(
                "<div class=\"bb-list\">{}</div>",
                m.body.trim_matches('\n')
            ));
        }

        let body = regex!(r"\[/\*\]").replace_all(m.body, "");
        let mut parts = marker.split(&body);
        let lead = parts.next().unwrap_or("").trim();

        let mut html = open;
        if !lead.is_empty() {
            html.push_str(&format!("<li>{lead}</li>"));
        }
        for item in parts {
            html.push_str(&format!("<li>{}</li>", item.trim()));
        }
        html.push_str(close);
        Some(html)
    })
}

fn tables(text: &str) -> String {
    replace_tag(text, tag!("table"), |m| {
        let body = regex!(r"(?i)\s*(\[/?(?:tr|th|td)\])\s*").replace_all(m.body, "$1");
        let body = regex!(r"(?i)\[(/?)(tr|th|td)\]").replace_all(&body, |caps: &Captures| {
            format!("<{}{}>", &caps[1], caps[2].to_ascii_lowercase())
        });
        Some(format!(
            "<table class=\"bb-table\"><tbody>{}</tbody></table>",
            body.trim()
        ))
    })
}

fn horizontal_rules(text: &str) -> String {
    regex!(r"(?i)\[hr\s*/?\]").replace_all(text, "<hr>").into_owned()
}

fn line_breaks(text: &str) -> String {
    let out = regex!(r"(</(?:blockquote|div|pre|ul|ol|table)>|<hr>)\n").replace_all(text, "$1");
    out.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, Instant};

    #[test]
    fn test_stage_order_is_fixed() {
        let names: Vec<&str> = STAGES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "mentions",
                "quotes",
                "inline",
                "alignment",
                "extended",
                "media",
                "spoilers",
                "code",
                "attachments",
                "lists",
                "tables",
                "rules",
                "newlines",
            ]
        );
    }

    #[test]
    fn test_nested_quotes_resolve_innermost_first() {
        let html = convert("[quote=alice][quote=bob]inner[/quote]outer[/quote]");
        assert_eq!(
            html,
            "<blockquote class=\"bb-quote\"><div class=\"bb-quote-author\">alice said:</div><div class=\"bb-quote-body\">\
<blockquote class=\"bb-quote\"><div class=\"bb-quote-author\">bob said:</div><div class=\"bb-quote-body\">inner</div></blockquote>\
outer</div></blockquote>"
        );
    }

    #[test]
    fn test_quote_author_drops_post_metadata() {
        let html = convert("[quote=\"carol, post: 12, member: 3\"]hey[/quote]");
        assert!(html.contains("carol said:"), "{html}");
        assert!(!html.contains("post: 12"), "{html}");
    }

    #[test]
    fn test_unterminated_tag_stays_literal() {
        assert_eq!(convert("[quote]never closed"), "[quote]never closed");
        assert_eq!(convert("stray [/b] close"), "stray [/b] close");
        assert_eq!(convert("[b]open [i]both[/b]"), "<strong>open [i]both</strong>");
    }

    #[test]
    fn test_large_posts_convert_quickly() {
        let flat = "[b]x[/b]".repeat(20_000);
        let nested = format!("{}y{}", "[i]".repeat(2_000), "[/i]".repeat(2_000));

        let started = Instant::now();
        let flat_html = convert(&flat);
        let nested_html = convert(&nested);
        let elapsed = started.elapsed();

        assert_eq!(flat_html.matches("<strong>x</strong>").count(), 20_000);
        assert_eq!(nested_html.matches("<em>").count(), 2_000);
        assert!(nested_html.contains("<em>y</em>"));
        assert!(elapsed < Duration::from_secs(2), "took {:?}", elapsed);
    }

    #[test]
    fn test_failed_render_keeps_pair_and_converts_body() {
        assert_eq!(
            convert("[media=vimeo][b]1[/b][/media] [/media]"),
            "[media=vimeo]<strong>1</strong>[/media] [/media]"
        );
    }

    #[test]
    fn test_nested_same_tags() {
        assert_eq!(
            convert("[b]a[b]c[/b]d[/b]"),
            "<strong>a<strong>c</strong>d</strong>"
        );
    }

    #[test]
    fn test_color_and_size() {
        assert_eq!(
            convert("[color=#ff0000]red[/color]"),
            "<span style=\"color: #ff0000\">red</span>"
        );
        assert_eq!(
            convert("[color=red;background:url(x)]x[/color]"),
            "x"
        );
        assert_eq!(
            convert("[size=4]big[/size]"),
            "<span style=\"font-size: 18px\">big</span>"
        );
        assert_eq!(convert("[size=99]x[/size]"), "x");
    }

    #[test]
    fn test_alignment_and_indent() {
        assert_eq!(
            convert("[center]mid[/center]"),
            "<div style=\"text-align: center\">mid</div>"
        );
        assert_eq!(
            convert("[indent=2]x[/indent]"),
            "<div style=\"margin-left: 40px\">x</div>"
        );
    }

    #[test]
    fn test_links() {
        assert_eq!(
            convert("[url]https://a.io/x?y=1&z=2[/url]"),
            "<a href=\"https://a.io/x?y=1&amp;z=2\" target=\"_blank\">https://a.io/x?y=1&amp;z=2</a>"
        );
        assert_eq!(
            convert("[url=www.a.io]site[/url]"),
            "<a href=\"https://www.a.io\" target=\"_blank\">site</a>"
        );
        assert_eq!(convert("[url=javascript:alert(1)]x[/url]"), "x");
        assert_eq!(
            convert("[url unfurl=\"true\"]https://a.io[/url]"),
            "<a class=\"bb-unfurl\" href=\"https://a.io\" target=\"_blank\">https://a.io</a>"
        );
    }

    #[test]
    fn test_images() {
        assert_eq!(
            convert("[img]https://i.io/a.png[/img]"),
            "<img src=\"https://i.io/a.png\" alt=\"\" loading=\"lazy\">"
        );
        assert_eq!(
            convert("[img alt=\"a cat\"]https://i.io/c.png[/img]"),
            "<img src=\"https://i.io/c.png\" alt=\"a cat\" loading=\"lazy\">"
        );
    }

    #[test]
    fn test_youtube_ids() {
        assert_eq!(youtube_id("abc123"), Some("abc123"));
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=3"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
        assert_eq!(youtube_id("   "), None);
        assert_eq!(youtube_id("https://vimeo.com/1"), None);
        assert_eq!(convert("[media=vimeo]1[/media]"), "[media=vimeo]1[/media]");
    }

    #[test]
    fn test_spoilers() {
        let html = convert("[spoiler]boo[/spoiler]");
        assert!(html.contains(">Spoiler</button>"), "{html}");
        assert!(html.contains("style=\"display: none\">boo</div>"), "{html}");
    }

    #[test]
    fn test_code_blocks() {
        assert_eq!(
            convert("[code=Rust]\nfn main() {}\n[/code]"),
            "<pre class=\"bb-code language-rust\"><code>fn main() {}</code></pre>"
        );
        assert_eq!(
            convert("[code=\"x y\"]z[/code]"),
            "<pre class=\"bb-code\"><code>z</code></pre>"
        );
    }

    #[test]
    fn test_attachments() {
        assert_eq!(
            convert("[attach]42[/attach]"),
            "<span class=\"bb-attachment\">Attachment #42</span>"
        );
        assert_eq!(convert("[attach]nope[/attach]"), "[attach]nope[/attach]");
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            convert("[list]\n[*]one\n[*]two\n[/list]"),
            "<ul><li>one</li><li>two</li></ul>"
        );
        assert_eq!(
            convert("[list=1][*]a[/list]"),
            "<ol><li>a</li></ol>"
        );
        assert_eq!(
            convert("[list=a][*]x[*]y[/list]"),
            "<ol type=\"a\"><li>x</li><li>y</li></ol>"
        );
        assert_eq!(
            convert("[list]no markers[/list]"),
            "<div class=\"bb-list\">no markers</div>"
        );
        assert_eq!(
            convert("[list][*]a[list][*]b[/list][/list]"),
            "<ul><li>a<ul><li>b</li></ul></li></ul>"
        );
    }

    #[test]
    fn test_tables() {
        assert_eq!(
            convert("[table]\n[tr]\n[th]H[/th]\n[/tr]\n[tr][td]v[/td][/tr]\n[/table]"),
            "<table class=\"bb-table\"><tbody><tr><th>H</th></tr><tr><td>v</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_rules_and_newlines() {
        assert_eq!(convert("a\n[hr]\nb"), "a<br><hr>b");
        assert_eq!(convert("a\r\nb"), "a<br>b");
    }

    #[test]
    fn test_mentions() {
        assert_eq!(
            convert("[user=7]dana[/user]"),
            "<span class=\"bb-mention\">@dana</span>"
        );
    }
}
