//! HTML materialization of a parsed document.
//!
//! Output is deterministic: attributes are written in a fixed order and no
//! generated ids or timestamps are emitted.

use crate::document::EditorState;
use crate::node::{Node, NodeType, TextFormat};
use crate::theme::Theme;

/// Escape text and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const SUPPORTED_URL_PROTOCOLS: &[&str] = &["http", "https", "mailto", "sms", "tel"];

/// Replace a link URL whose scheme is not allowed with `about:blank`.
/// URLs without a scheme (relative paths, fragments) are kept.
pub fn sanitize_url(url: &str) -> &str {
    // Browsers drop whitespace and control characters inside the scheme.
    let compact: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .take_while(|c| !matches!(c, '/' | '?' | '#'))
        .collect();
    let Some((scheme, _)) = compact.split_once(':') else {
        return url;
    };
    let is_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !is_scheme || SUPPORTED_URL_PROTOCOLS.contains(&scheme.to_ascii_lowercase().as_str()) {
        url
    } else {
        "about:blank"
    }
}

/// Materialize the children of the root. The root itself has no element.
pub fn generate_html(state: &EditorState, theme: &Theme) -> String {
    let mut writer = HtmlWriter {
        out: String::new(),
        theme,
    };
    for child in state.root().children() {
        writer.node(child);
    }
    writer.out
}

struct HtmlWriter<'a> {
    out: String,
    theme: &'a Theme,
}

type Attrs = Vec<(&'static str, String)>;

impl<'a> HtmlWriter<'a> {
    fn open(&mut self, tag: &str, attrs: &Attrs) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&html_escape(value));
            self.out.push('"');
        }
        self.out.push('>');
    }

    fn close(&mut self, tag: &str) {
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn element(&mut self, tag: &str, attrs: Attrs, node: &Node) {
        self.open(tag, &attrs);
        for child in node.children() {
            self.node(child);
        }
        self.close(tag);
    }

    fn class(attrs: &mut Attrs, class: &str) {
        if !class.is_empty() {
            attrs.push(("class", class.to_string()));
        }
    }

    /// `class`, `dir` and alignment/indent style shared by block elements.
    fn block_attrs(node: &Node, class: &str) -> Attrs {
        let mut attrs = Attrs::new();
        Self::class(&mut attrs, class);
        if let Some(dir) = node.str_field("direction") {
            attrs.push(("dir", dir.to_string()));
        }
        let mut style = String::new();
        if let Some(align) = node.str_field("format").filter(|f| !f.is_empty()) {
            style.push_str(&format!("text-align: {};", align));
        }
        if let Some(indent) = node.u32_field("indent").filter(|i| *i > 0) {
            if !style.is_empty() {
                style.push(' ');
            }
            style.push_str(&format!("padding-inline-start: calc({} * 40px);", indent));
        }
        if !style.is_empty() {
            attrs.push(("style", style));
        }
        attrs
    }

    fn node(&mut self, node: &Node) {
        let theme = self.theme;
        match node.node_type() {
            NodeType::Root => {
                for child in node.children() {
                    self.node(child);
                }
            }
            NodeType::Paragraph => {
                let attrs = Self::block_attrs(node, &theme.paragraph);
                if node.children().is_empty() {
                    self.open("p", &attrs);
                    self.out.push_str("<br>");
                    self.close("p");
                } else {
                    self.element("p", attrs, node);
                }
            }
            NodeType::Heading => {
                let tag = node.str_field("tag").unwrap_or("h1");
                let attrs = Self::block_attrs(node, theme.heading_class(tag));
                self.element(tag, attrs, node);
            }
            NodeType::Quote => {
                let attrs = Self::block_attrs(node, &theme.quote);
                self.element("blockquote", attrs, node);
            }
            NodeType::List => {
                let list_type = node.str_field("listType").unwrap_or("bullet");
                let (tag, class) = match list_type {
                    "number" => ("ol", &theme.list_ol),
                    "check" => ("ul", &theme.list_check),
                    _ => ("ul", &theme.list_ul),
                };
                let mut attrs = Self::block_attrs(node, class);
                if tag == "ol" {
                    if let Some(start) = node.u32_field("start").filter(|s| *s != 1) {
                        attrs.push(("start", start.to_string()));
                    }
                }
                self.element(tag, attrs, node);
            }
            NodeType::ListItem => {
                let mut attrs = Attrs::new();
                let class = match node.bool_field("checked") {
                    Some(true) => format!("{} {}", theme.list_item, theme.list_item_checked),
                    Some(false) => format!("{} {}", theme.list_item, theme.list_item_unchecked),
                    None => theme.list_item.clone(),
                };
                Self::class(&mut attrs, class.trim());
                if let Some(value) = node.u32_field("value") {
                    attrs.push(("value", value.to_string()));
                }
                if let Some(checked) = node.bool_field("checked") {
                    attrs.push(("role", "checkbox".to_string()));
                    attrs.push(("aria-checked", checked.to_string()));
                }
                self.element("li", attrs, node);
            }
            NodeType::Code => {
                let mut attrs = Self::block_attrs(node, &theme.code);
                attrs.push(("spellcheck", "false".to_string()));
                if let Some(lang) = node.str_field("language").filter(|l| !l.is_empty()) {
                    attrs.push(("data-language", lang.to_string()));
                }
                self.element("pre", attrs, node);
            }
            NodeType::CodeHighlight => {
                let mut attrs = Attrs::new();
                if let Some(kind) = node.str_field("highlightType") {
                    let class = format!("{}{}", theme.code_highlight_prefix, kind);
                    Self::class(&mut attrs, &class);
                }
                self.open("span", &attrs);
                self.out.push_str(&html_escape(node.text_value()));
                self.close("span");
            }
            NodeType::Text => self.text(node),
            NodeType::Tab => {
                self.open("span", &vec![("style", "white-space: pre-wrap;".to_string())]);
                self.out.push_str(&html_escape(node.text_value()));
                self.close("span");
            }
            NodeType::LineBreak => self.out.push_str("<br>"),
            NodeType::Link | NodeType::AutoLink => {
                let mut attrs = Attrs::new();
                let url = sanitize_url(node.str_field("url").unwrap_or(""));
                attrs.push(("href", url.to_string()));
                for field in ["target", "rel", "title"] {
                    if let Some(value) = node.str_field(field) {
                        attrs.push((field, value.to_string()));
                    }
                }
                Self::class(&mut attrs, &theme.link);
                self.element("a", attrs, node);
            }
            NodeType::Image => {
                let mut attrs = Attrs::new();
                attrs.push(("src", node.str_field("src").unwrap_or("").to_string()));
                attrs.push(("alt", node.str_field("altText").unwrap_or("").to_string()));
                if let Some(width) = node.u32_field("width").filter(|w| *w > 0) {
                    attrs.push(("width", width.to_string()));
                }
                if let Some(height) = node.u32_field("height").filter(|h| *h > 0) {
                    attrs.push(("height", height.to_string()));
                }
                Self::class(&mut attrs, &theme.image);
                self.open("img", &attrs);
            }
            NodeType::HorizontalRule => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.hr);
                self.open("hr", &attrs);
            }
            NodeType::Table => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.table);
                self.element("table", attrs, node);
            }
            NodeType::TableRow => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.table_row);
                self.element("tr", attrs, node);
            }
            NodeType::TableCell => {
                let header = node.u32_field("headerState").unwrap_or(0) != 0;
                let (tag, class) = if header {
                    ("th", format!("{} {}", theme.table_cell, theme.table_cell_header))
                } else {
                    ("td", theme.table_cell.clone())
                };
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, class.trim());
                if let Some(span) = node.u32_field("colSpan").filter(|s| *s > 1) {
                    attrs.push(("colspan", span.to_string()));
                }
                if let Some(span) = node.u32_field("rowSpan").filter(|s| *s > 1) {
                    attrs.push(("rowspan", span.to_string()));
                }
                let mut style = String::new();
                if let Some(width) = node.u32_field("width").filter(|w| *w > 0) {
                    style.push_str(&format!("width: {}px;", width));
                }
                if let Some(color) = node.str_field("backgroundColor") {
                    if !style.is_empty() {
                        style.push(' ');
                    }
                    style.push_str(&format!("background-color: {};", color));
                }
                if !style.is_empty() {
                    attrs.push(("style", style));
                }
                self.element(tag, attrs, node);
            }
            NodeType::Hashtag => self.classed_text(node, &theme.hashtag),
            NodeType::Keyword => self.classed_text(node, &theme.keyword),
            NodeType::Mention => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.mention);
                attrs.push(("data-lexical-mention", "true".to_string()));
                self.open("span", &attrs);
                self.out.push_str(&html_escape(node.text_value()));
                self.close("span");
            }
            NodeType::Emoji => {
                let class = node.str_field("className").unwrap_or("emoji");
                self.open("span", &vec![("class", class.to_string())]);
                self.open("span", &vec![("class", "emoji-inner".to_string())]);
                self.out.push_str(&html_escape(node.text_value()));
                self.close("span");
                self.close("span");
            }
            // Suggestions only exist while typing.
            NodeType::Autocomplete => {}
            NodeType::Equation => {
                let inline = node.bool_field("inline").unwrap_or(false);
                let tag = if inline { "span" } else { "div" };
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.equation);
                attrs.push((
                    "data-lexical-equation",
                    node.str_field("equation").unwrap_or("").to_string(),
                ));
                attrs.push(("data-lexical-inline", inline.to_string()));
                self.open(tag, &attrs);
                self.close(tag);
            }
            NodeType::YouTube => {
                let video_id = node.str_field("videoID").unwrap_or("");
                let attrs: Attrs = vec![
                    ("data-lexical-youtube", video_id.to_string()),
                    ("width", "560".to_string()),
                    ("height", "315".to_string()),
                    (
                        "src",
                        format!("https://www.youtube-nocookie.com/embed/{}", video_id),
                    ),
                    ("frameborder", "0".to_string()),
                    ("allowfullscreen", "true".to_string()),
                    ("title", "YouTube video".to_string()),
                ];
                self.open("iframe", &attrs);
                self.close("iframe");
            }
            NodeType::Record => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.embed_block);
                attrs.push((
                    "data-lexical-record",
                    node.str_field("recordId").unwrap_or("").to_string(),
                ));
                self.open("div", &attrs);
                self.close("div");
            }
            NodeType::CollapsibleContainer => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.collapsible_container);
                if node.bool_field("open").unwrap_or(true) {
                    attrs.push(("open", "true".to_string()));
                }
                self.element("details", attrs, node);
            }
            NodeType::CollapsibleTitle => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.collapsible_title);
                self.element("summary", attrs, node);
            }
            NodeType::CollapsibleContent => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.collapsible_content);
                self.element("div", attrs, node);
            }
            NodeType::Sticky => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.sticky);
                if let Some(color) = node.str_field("color") {
                    attrs.push(("data-color", color.to_string()));
                }
                self.open("div", &attrs);
                self.close("div");
            }
            NodeType::Mark => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.mark);
                self.element("mark", attrs, node);
            }
            NodeType::Overflow => {
                let mut attrs = Attrs::new();
                Self::class(&mut attrs, &theme.overflow);
                self.element("span", attrs, node);
            }
        }
    }

    fn classed_text(&mut self, node: &Node, class: &str) {
        let mut attrs = Attrs::new();
        Self::class(&mut attrs, class);
        self.open("span", &attrs);
        self.out.push_str(&html_escape(node.text_value()));
        self.close("span");
    }

    /// Text leaf: inner element chosen by format, then wrapped in
    /// `b`, `i`, `s`, `u` from the inside out.
    fn text(&mut self, node: &Node) {
        let theme = self.theme;
        let format = node.text_format();

        let inner = if format.has(TextFormat::CODE) {
            "code"
        } else if format.has(TextFormat::HIGHLIGHT) {
            "mark"
        } else if format.has(TextFormat::SUBSCRIPT) {
            "sub"
        } else if format.has(TextFormat::SUPERSCRIPT) {
            "sup"
        } else {
            "span"
        };

        let flag_classes = [
            (TextFormat::BOLD, &theme.text_bold),
            (TextFormat::ITALIC, &theme.text_italic),
            (TextFormat::STRIKETHROUGH, &theme.text_strikethrough),
            (TextFormat::UNDERLINE, &theme.text_underline),
            (TextFormat::CODE, &theme.text_code),
            (TextFormat::SUBSCRIPT, &theme.text_subscript),
            (TextFormat::SUPERSCRIPT, &theme.text_superscript),
            (TextFormat::HIGHLIGHT, &theme.text_highlight),
        ];
        let classes: Vec<&str> = flag_classes
            .iter()
            .filter(|(flag, class)| format.has(*flag) && !class.is_empty())
            .map(|(_, class)| class.as_str())
            .collect();

        let mut attrs = Attrs::new();
        if !classes.is_empty() {
            attrs.push(("class", classes.join(" ")));
        }
        let mut style = "white-space: pre-wrap;".to_string();
        if let Some(extra) = node.str_field("style").filter(|s| !s.is_empty()) {
            style.push(' ');
            style.push_str(extra);
        }
        attrs.push(("style", style));

        let wrappers: Vec<&str> = [
            (TextFormat::BOLD, "b"),
            (TextFormat::ITALIC, "i"),
            (TextFormat::STRIKETHROUGH, "s"),
            (TextFormat::UNDERLINE, "u"),
        ]
        .iter()
        .filter(|(flag, _)| format.has(*flag))
        .map(|(_, tag)| *tag)
        .collect();

        for tag in wrappers.iter().rev() {
            self.open(tag, &Attrs::new());
        }
        self.open(inner, &attrs);
        self.out.push_str(&html_escape(node.text_value()));
        self.close(inner);
        for tag in wrappers.iter() {
            self.close(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NodeRegistry;
    use serde_json::{json, Value};

    fn render(body: Value) -> String {
        let state = EditorState::parse(&body, &NodeRegistry::all()).unwrap();
        generate_html(&state, &Theme::plain())
    }

    fn doc(children: Value) -> Value {
        json!({"root": {"type": "root", "children": children}})
    }

    fn text(t: &str, format: u32) -> Value {
        json!({"type": "text", "text": t, "format": format, "style": ""})
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_paragraph_with_text() {
        let html = render(doc(json!([
            {"type": "paragraph", "children": [text("Hello", 0)]}
        ])));
        assert_eq!(
            html,
            r#"<p><span style="white-space: pre-wrap;">Hello</span></p>"#
        );
    }

    #[test]
    fn test_empty_paragraph_renders_line_break() {
        let html = render(doc(json!([{"type": "paragraph", "children": []}])));
        assert_eq!(html, "<p><br></p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render(doc(json!([
            {"type": "paragraph", "children": [text("<script>alert(1)</script>", 0)]}
        ])));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_bold_italic_wrapping_order() {
        let html = render(doc(json!([
            {"type": "paragraph", "children": [text("x", TextFormat::BOLD | TextFormat::ITALIC)]}
        ])));
        assert_eq!(
            html,
            r#"<p><i><b><span style="white-space: pre-wrap;">x</span></b></i></p>"#
        );
    }

    #[test]
    fn test_code_format_uses_code_element() {
        let html = render(doc(json!([
            {"type": "paragraph", "children": [text("let x", TextFormat::CODE)]}
        ])));
        assert!(html.contains("<code style=\"white-space: pre-wrap;\">let x</code>"));
    }

    #[test]
    fn test_heading_and_alignment() {
        let html = render(doc(json!([
            {"type": "heading", "tag": "h2", "format": "center", "direction": "ltr",
             "children": [text("Title", 0)]}
        ])));
        assert!(html.starts_with(r#"<h2 dir="ltr" style="text-align: center;">"#));
        assert!(html.ends_with("</h2>"));
    }

    #[test]
    fn test_numbered_list_with_start() {
        let html = render(doc(json!([
            {"type": "list", "listType": "number", "start": 3, "tag": "ol", "children": [
                {"type": "listitem", "value": 3, "children": [text("three", 0)]}
            ]}
        ])));
        assert!(html.starts_with(r#"<ol start="3"><li value="3">"#));
    }

    #[test]
    fn test_check_list_item() {
        let html = render(doc(json!([
            {"type": "list", "listType": "check", "children": [
                {"type": "listitem", "value": 1, "checked": true, "children": []}
            ]}
        ])));
        assert!(html.contains(r#"role="checkbox" aria-checked="true""#));
    }

    #[test]
    fn test_link_attributes_escaped() {
        let html = render(doc(json!([
            {"type": "paragraph", "children": [
                {"type": "link", "url": "https://x.test/?a=1&b=\"2\"", "children": [text("x", 0)]}
            ]}
        ])));
        assert!(html.contains(r#"<a href="https://x.test/?a=1&amp;b=&quot;2&quot;">"#));
    }

    #[test]
    fn test_sanitize_url() {
        assert_eq!(sanitize_url("https://x.test/a"), "https://x.test/a");
        assert_eq!(sanitize_url("HTTP://x.test"), "HTTP://x.test");
        assert_eq!(sanitize_url("mailto:a@x.test"), "mailto:a@x.test");
        assert_eq!(sanitize_url("tel:+123"), "tel:+123");
        assert_eq!(sanitize_url("/n/abc"), "/n/abc");
        assert_eq!(sanitize_url("#top"), "#top");
        assert_eq!(sanitize_url("/search?q=a:b"), "/search?q=a:b");
        assert_eq!(sanitize_url("javascript:alert(1)"), "about:blank");
        assert_eq!(sanitize_url("JavaScript:alert(1)"), "about:blank");
        assert_eq!(sanitize_url(" java\tscript:alert(1)"), "about:blank");
        assert_eq!(sanitize_url("data:text/html,<b>"), "about:blank");
    }

    #[test]
    fn test_link_with_script_url_is_blanked() {
        let html = render(doc(json!([
            {"type": "paragraph", "children": [
                {"type": "link", "url": "javascript:alert(1)", "children": [text("x", 0)]},
                {"type": "autolink", "url": "vbscript:msgbox", "children": [text("y", 0)]}
            ]}
        ])));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("vbscript:"));
        assert_eq!(html.matches(r#"<a href="about:blank""#).count(), 2);
    }

    #[test]
    fn test_image_without_width_omits_attribute() {
        let html = render(doc(json!([
            {"type": "image", "src": "/a.png", "altText": "a", "width": 0, "height": 0}
        ])));
        assert_eq!(html, r#"<img src="/a.png" alt="a">"#);
    }

    #[test]
    fn test_table_header_cell() {
        let html = render(doc(json!([
            {"type": "table", "children": [
                {"type": "tablerow", "children": [
                    {"type": "tablecell", "headerState": 1, "colSpan": 2, "children": []},
                    {"type": "tablecell", "headerState": 0, "children": []}
                ]}
            ]}
        ])));
        assert_eq!(
            html,
            r#"<table><tr><th colspan="2"></th><td></td></tr></table>"#
        );
    }

    #[test]
    fn test_record_embed() {
        let html = render(doc(json!([
            {"type": "record", "recordId": "abc", "format": "", "version": 1}
        ])));
        assert_eq!(html, r#"<div data-lexical-record="abc"></div>"#);
    }

    #[test]
    fn test_collapsible_closed() {
        let html = render(doc(json!([
            {"type": "collapsible-container", "open": false, "children": [
                {"type": "collapsible-title", "children": [text("t", 0)]},
                {"type": "collapsible-content", "children": []}
            ]}
        ])));
        assert!(html.starts_with("<details><summary>"));
    }

    #[test]
    fn test_autocomplete_renders_nothing() {
        let html = render(doc(json!([
            {"type": "paragraph", "children": [
                text("a", 0),
                {"type": "autocomplete", "text": "bc", "uuid": "x"}
            ]}
        ])));
        assert!(!html.contains("bc"));
    }

    #[test]
    fn test_default_theme_classes() {
        let body = doc(json!([{"type": "paragraph", "children": []}]));
        let state = EditorState::parse(&body, &NodeRegistry::all()).unwrap();
        let html = generate_html(&state, &Theme::default());
        assert_eq!(html, r#"<p class="ThinkTheme__paragraph"><br></p>"#);
    }
}
