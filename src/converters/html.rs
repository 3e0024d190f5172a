//! HTML renderer for compiled semantic trees.
//!
//! Each compiled page becomes a `<div data-page-number="N">` holding the
//! page's containers as semantic HTML elements. Figures carry their image as
//! an `<img>`, embedded as a data URI or referenced by resource id.

use crate::config::ViewerConfig;
use crate::images::ImageEncoding;
use crate::semantic::{CompiledPage, ContainerKind, SemanticDocument, SemanticNode};
use std::fmt::Write;

/// Converter from semantic trees to HTML.
///
/// # Examples
///
/// ```
/// use pdf_tagview::converters::HtmlRenderer;
/// use pdf_tagview::semantic::{ContainerKind, SemanticNode};
///
/// let mut root = SemanticNode::root();
/// root.push_child(SemanticNode::new(ContainerKind::Heading(2)).with_text("Results & Notes"));
///
/// let html = HtmlRenderer::new().render_node(&root);
/// assert_eq!(html, "<h2>Results &amp; Notes</h2>");
/// ```
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    embed_images: bool,
    image_format: ImageEncoding,
    jpeg_quality: u8,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Create a renderer with default options.
    pub fn new() -> Self {
        Self::from_config(&ViewerConfig::default())
    }

    /// Create a renderer using the image options of a viewer configuration.
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            embed_images: config.embed_images,
            image_format: config.image_format,
            jpeg_quality: config.jpeg_quality,
        }
    }

    /// Render a whole document, including metadata, as an HTML page.
    pub fn render_document(&self, document: &SemanticDocument) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");

        for (name, content) in document.metadata.entries() {
            let _ = writeln!(
                html,
                "<meta name=\"{}\" content=\"{}\">",
                name,
                escape_html(content)
            );
        }
        if let Some(title) = document.metadata.title.as_deref().filter(|t| !t.is_empty()) {
            let _ = writeln!(html, "<title>{}</title>", escape_html(title));
        }

        html.push_str("</head>\n<body>\n");
        for page in &document.pages {
            html.push_str(&self.render_page(page));
            html.push('\n');
        }
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Render one compiled page wrapped in its page container.
    pub fn render_page(&self, page: &CompiledPage) -> String {
        format!(
            "<div data-page-number=\"{}\">{}</div>",
            page.page_number,
            self.render_node(&page.root)
        )
    }

    /// Render a node and its subtree.
    pub fn render_node(&self, node: &SemanticNode) -> String {
        let mut html = String::new();
        self.write_node(node, &mut html);
        html
    }

    fn write_node(&self, node: &SemanticNode, html: &mut String) {
        let element = element_name(&node.kind);

        if let Some(name) = &element {
            html.push('<');
            html.push_str(name);
            if node.kind == ContainerKind::Note {
                html.push_str(" role=\"note\"");
            }
            html.push('>');
        }

        if node.kind == ContainerKind::Figure {
            self.write_image(node, html);
        }
        html.push_str(&escape_html(&node.text));
        for child in &node.children {
            self.write_node(child, html);
        }

        if let Some(name) = &element {
            let _ = write!(html, "</{}>", name);
        }
    }

    fn write_image(&self, figure: &SemanticNode, html: &mut String) {
        let alt = figure.alt_text.as_deref().unwrap_or("");
        let src = match &figure.image {
            Some(image) if self.embed_images => {
                match image.to_data_uri(self.image_format, self.jpeg_quality) {
                    Ok(uri) => Some(uri),
                    Err(e) => {
                        log::warn!("Failed to encode image {}: {}", image.id, e);
                        None
                    },
                }
            },
            Some(image) => Some(image.id.clone()),
            None => None,
        };

        html.push_str("<img");
        if let Some(src) = src {
            let _ = write!(html, " src=\"{}\"", escape_html(&src));
        }
        let _ = write!(html, " alt=\"{}\">", escape_html(alt));
    }
}

/// HTML element for a container kind, `None` for kinds without markup.
pub fn element_name(kind: &ContainerKind) -> Option<String> {
    let name = match kind {
        ContainerKind::None => return None,
        ContainerKind::Division => "div",
        ContainerKind::Section => "section",
        ContainerKind::Article => "article",
        ContainerKind::Paragraph => "p",
        ContainerKind::Heading(level) => return Some(format!("h{}", (*level).clamp(1, 6))),
        ContainerKind::List => "ul",
        ContainerKind::OrderedList => "ol",
        ContainerKind::ListItem => "li",
        ContainerKind::Table => "table",
        ContainerKind::TableHead => "thead",
        ContainerKind::TableBody => "tbody",
        ContainerKind::TableFoot => "tfoot",
        ContainerKind::TableRow => "tr",
        ContainerKind::TableHeaderCell => "th",
        ContainerKind::TableDataCell => "td",
        ContainerKind::Link => "a",
        ContainerKind::Note => "aside",
        ContainerKind::Form => "form",
        ContainerKind::Figure => "figure",
        ContainerKind::Caption => "figcaption",
        ContainerKind::FormulaBlock => "pre",
        ContainerKind::BlockQuote => "blockquote",
        ContainerKind::Quote => "q",
        ContainerKind::Code => "code",
        ContainerKind::Span => "span",
        ContainerKind::Custom(name) => return Some(sanitize_tag_name(name)),
    };
    Some(name.to_string())
}

/// Reduce a role name to a valid custom element name.
fn sanitize_tag_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    match cleaned.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => cleaned,
        _ => format!("x-{}", cleaned),
    }
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageResource;
    use crate::metadata::DocumentMetadata;

    fn no_embed() -> HtmlRenderer {
        HtmlRenderer::from_config(&ViewerConfig::new().with_embed_images(false))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a & 'b'>"), "&lt;a &amp; &#x27;b&#x27;&gt;");
    }

    #[test]
    fn test_element_names() {
        assert_eq!(element_name(&ContainerKind::None), None);
        assert_eq!(element_name(&ContainerKind::Heading(3)).as_deref(), Some("h3"));
        assert_eq!(element_name(&ContainerKind::Heading(9)).as_deref(), Some("h6"));
        assert_eq!(element_name(&ContainerKind::OrderedList).as_deref(), Some("ol"));
        assert_eq!(element_name(&ContainerKind::FormulaBlock).as_deref(), Some("pre"));
        assert_eq!(
            element_name(&ContainerKind::Custom("customthing".into())).as_deref(),
            Some("customthing")
        );
    }

    #[test]
    fn test_sanitize_tag_name() {
        assert_eq!(sanitize_tag_name("my role"), "my-role");
        assert_eq!(sanitize_tag_name("9lives"), "x-9lives");
        assert_eq!(sanitize_tag_name(""), "x-");
    }

    #[test]
    fn test_nested_rendering() {
        let mut root = SemanticNode::root();
        let list = root.push_child(SemanticNode::new(ContainerKind::OrderedList));
        list.push_child(SemanticNode::new(ContainerKind::ListItem).with_text("One"));
        list.push_child(SemanticNode::new(ContainerKind::ListItem).with_text("Two"));
        root.push_child(SemanticNode::new(ContainerKind::Note).with_text("fn"));

        assert_eq!(
            no_embed().render_node(&root),
            "<ol><li>One</li><li>Two</li></ol><aside role=\"note\">fn</aside>"
        );
    }

    #[test]
    fn test_figure_with_resource_id() {
        let mut figure = SemanticNode::new(ContainerKind::Figure);
        figure.image = Some(ImageResource::new("img_p0_1", 1, 1, vec![1, 2, 3, 255]));
        figure.alt_text = Some("A \"chart\"".into());
        figure.push_child(SemanticNode::new(ContainerKind::Caption).with_text("A \"chart\""));

        assert_eq!(
            no_embed().render_node(&figure),
            "<figure><img src=\"img_p0_1\" alt=\"A &quot;chart&quot;\">\
             <figcaption>A &quot;chart&quot;</figcaption></figure>"
        );
    }

    #[test]
    fn test_figure_embedded() {
        let mut figure = SemanticNode::new(ContainerKind::Figure);
        figure.image = Some(ImageResource::new("img_p0_1", 1, 1, vec![1, 2, 3, 255]));
        let html = HtmlRenderer::new().render_node(&figure);
        assert!(html.starts_with("<figure><img src=\"data:image/jpeg;base64,"));
        assert!(html.ends_with(" alt=\"\"></figure>"));
    }

    #[test]
    fn test_figure_without_image() {
        let figure = SemanticNode::new(ContainerKind::Figure);
        assert_eq!(HtmlRenderer::new().render_node(&figure), "<figure><img alt=\"\"></figure>");
    }

    #[test]
    fn test_document_head() {
        let document = SemanticDocument {
            metadata: DocumentMetadata {
                author: Some("Ada <ada@example.com>".into()),
                title: Some("Report".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let html = HtmlRenderer::new().render_document(&document);
        assert!(html.contains("<meta name=\"dc:creator\" content=\"Ada &lt;ada@example.com&gt;\">"));
        assert!(html.contains("<meta name=\"dc:title\" content=\"Report\">"));
        assert!(html.contains("<title>Report</title>"));
        assert!(!html.contains("dc:subject"));
    }
}
