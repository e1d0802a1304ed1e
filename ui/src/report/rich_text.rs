//! Evidence snippets as plain segments plus emphasis spans.
//!
//! Snippet markup comes from the scoring service. Only the emphasis subset
//! survives (`b`, `strong`, `em`, `i`, `mark`, and `span` with a class or
//! style); every other tag is dropped and its text kept. The result is
//! rendered as text nodes, so no server markup is ever interpreted by the
//! page itself.

use api::{Snippet, SnippetSegment};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RichText {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub emphasis: bool,
}

impl RichText {
    pub fn from_snippet(snippet: &Snippet) -> Self {
        match snippet {
            Snippet::Markup(markup) => Self::from_markup(markup),
            Snippet::Segments(segments) => {
                let mut out = Self::default();
                for SnippetSegment { text, emphasis } in segments {
                    out.push(text, *emphasis);
                }
                out
            }
        }
    }

    pub fn from_markup(markup: &str) -> Self {
        let mut out = Self::default();
        let mut depth = 0usize;
        // One entry per open <span>: did it open an emphasis?
        let mut spans: Vec<bool> = Vec::new();
        // `text_start..` is pending text; `scan` is where the next `<` search begins.
        let mut text_start = 0;
        let mut scan = 0;

        while let Some(offset) = markup[scan..].find('<') {
            let open = scan + offset;
            let after = &markup[open..];

            if let Some(comment) = after.strip_prefix("<!--") {
                out.push(&decode_entities(&markup[text_start..open]), depth > 0);
                scan = comment
                    .find("-->")
                    .map_or(markup.len(), |end| open + 4 + end + 3);
                text_start = scan;
                continue;
            }

            // A tag opens only with `<name` or `</name`; any other `<` is text.
            if !opens_tag(&after[1..]) {
                scan = open + 1;
                continue;
            }

            // Unterminated tag: the rest stays literal text.
            let Some(close) = after.find('>') else {
                break;
            };

            out.push(&decode_entities(&markup[text_start..open]), depth > 0);
            let tag = Tag::parse(&after[1..close]);
            match tag.name.as_str() {
                "b" | "strong" | "em" | "i" | "mark" if !tag.self_closing => {
                    if tag.closing {
                        depth = depth.saturating_sub(1);
                    } else {
                        depth += 1;
                    }
                }
                "span" if !tag.self_closing => {
                    if tag.closing {
                        if spans.pop().unwrap_or(false) {
                            depth = depth.saturating_sub(1);
                        }
                    } else {
                        spans.push(tag.has_attributes);
                        if tag.has_attributes {
                            depth += 1;
                        }
                    }
                }
                "br" if !tag.closing => out.push("\n", depth > 0),
                _ => {}
            }
            scan = open + close + 1;
            text_start = scan;
        }
        out.push(&decode_entities(&markup[text_start..]), depth > 0);
        out
    }

    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn push(&mut self, text: &str, emphasis: bool) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.emphasis == emphasis => last.text.push_str(text),
            _ => self.segments.push(Segment {
                text: text.to_string(),
                emphasis,
            }),
        }
    }
}

fn opens_tag(after_lt: &str) -> bool {
    let name = after_lt.strip_prefix('/').unwrap_or(after_lt);
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

struct Tag {
    name: String,
    closing: bool,
    self_closing: bool,
    has_attributes: bool,
}

impl Tag {
    fn parse(inner: &str) -> Self {
        let inner = inner.trim_end();
        let (closing, inner) = match inner.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, inner),
        };
        let (self_closing, inner) = match inner.strip_suffix('/') {
            Some(rest) => (true, rest.trim_end()),
            None => (false, inner),
        };
        let name_len = inner
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(inner.len());
        let attrs = inner[name_len..].to_ascii_lowercase();

        Self {
            name: inner[..name_len].to_ascii_lowercase(),
            closing,
            self_closing,
            has_attributes: attrs.contains("class") || attrs.contains("style"),
        }
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| entity(&after[1..semi]).map(|ch| (ch, semi)));
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, emphasis: bool) -> Segment {
        Segment {
            text: text.into(),
            emphasis,
        }
    }

    #[test]
    fn bold_becomes_emphasis() {
        let rich = RichText::from_markup("<b>x</b>");
        assert_eq!(rich.segments, vec![seg("x", true)]);
        assert_eq!(rich.plain_text(), "x");
    }

    #[test]
    fn styled_span_marks_emphasis_plain_span_does_not() {
        let rich = RichText::from_markup(
            "固定給<span style='color:red'>なし</span>、<span>歩合</span>",
        );
        assert_eq!(
            rich.segments,
            vec![seg("固定給", false), seg("なし", true), seg("、歩合", false)]
        );
    }

    #[test]
    fn unknown_tags_are_dropped_text_kept() {
        let rich = RichText::from_markup("<script>alert(1)</script><a href='x'>link</a>");
        assert_eq!(rich.segments, vec![seg("alert(1)link", false)]);
    }

    #[test]
    fn entities_and_comments() {
        let rich = RichText::from_markup("a &lt;b&gt; &amp;<!-- hidden --> &#12354;&#x41; &bogus");
        assert_eq!(rich.plain_text(), "a <b> & あA &bogus");
    }

    #[test]
    fn unterminated_tag_is_literal() {
        let rich = RichText::from_markup("score < 5");
        assert_eq!(rich.plain_text(), "score < 5");
    }

    #[test]
    fn angle_brackets_outside_tags_are_text() {
        assert_eq!(
            RichText::from_markup("<急募>月給30万円").plain_text(),
            "<急募>月給30万円"
        );
        assert_eq!(
            RichText::from_markup("残業 < 20時間 かつ 休日 > 120日").plain_text(),
            "残業 < 20時間 かつ 休日 > 120日"
        );

        let rich = RichText::from_markup("a < b and c > d");
        assert_eq!(rich.segments, vec![seg("a < b and c > d", false)]);
    }

    #[test]
    fn literal_bracket_next_to_real_emphasis() {
        let rich = RichText::from_markup("年間休日 < 100日 <b>要確認</b>");
        assert_eq!(
            rich.segments,
            vec![seg("年間休日 < 100日 ", false), seg("要確認", true)]
        );
    }

    #[test]
    fn nested_and_unbalanced_emphasis() {
        let rich = RichText::from_markup("<mark><b>a</b>b</mark></b>c<br/>d");
        assert_eq!(rich.segments, vec![seg("ab", true), seg("c\nd", false)]);
    }

    #[test]
    fn structured_segments_pass_through_merged() {
        let snippet = Snippet::Segments(vec![
            SnippetSegment { text: "a".into(), emphasis: false },
            SnippetSegment { text: "b".into(), emphasis: false },
            SnippetSegment { text: "".into(), emphasis: true },
            SnippetSegment { text: "c".into(), emphasis: true },
        ]);
        let rich = RichText::from_snippet(&snippet);
        assert_eq!(rich.segments, vec![seg("ab", false), seg("c", true)]);
    }
}
