use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

use crate::document::{Block, HeadingLevel, OutputDocument};
use crate::selector::ExportItem;
use crate::urls::slug_from_link;

pub const DEFAULT_DOCUMENT_TITLE: &str = "WordPress Export – Selected Site Content";
pub const META_DESCRIPTION_LABEL: &str = "Page Meta Description:";

/// The HTML tags that produce blocks. Everything else is descended into silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTag {
    H1,
    H2,
    H3,
    P,
    Ul,
    Ol,
    Blockquote,
}

impl ContentTag {
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name.to_ascii_lowercase().as_str() {
            "h1" => ContentTag::H1,
            "h2" => ContentTag::H2,
            "h3" => ContentTag::H3,
            "p" => ContentTag::P,
            "ul" => ContentTag::Ul,
            "ol" => ContentTag::Ol,
            "blockquote" => ContentTag::Blockquote,
            _ => return None,
        };
        Some(tag)
    }

    fn emit(self, element: ElementRef, out: &mut Vec<Block>) {
        match self {
            ContentTag::H1 => out.push(Block::heading(HeadingLevel::H1, element_text(element))),
            ContentTag::H2 => out.push(Block::heading(HeadingLevel::H2, element_text(element))),
            ContentTag::H3 => out.push(Block::heading(HeadingLevel::H3, element_text(element))),
            ContentTag::P => {
                let text = element_text(element);
                if !text.is_empty() {
                    out.push(Block::Paragraph(text));
                }
            }
            // Ordered and unordered lists both become bullets.
            ContentTag::Ul | ContentTag::Ol => {
                out.extend(
                    element
                        .descendants()
                        .skip(1)
                        .filter_map(ElementRef::wrap)
                        .filter(|child| child.value().name().eq_ignore_ascii_case("li"))
                        .map(|li| Block::ListItem(element_text(li))),
                );
            }
            ContentTag::Blockquote => {
                let text = element_text(element);
                if !text.is_empty() {
                    out.push(Block::Quote(text));
                }
            }
        }
    }
}

/// Build the whole output document: title heading, then one page per item.
pub fn render_document<'a>(
    title: &str,
    items: impl IntoIterator<Item = &'a ExportItem>,
) -> OutputDocument {
    let mut doc = OutputDocument::new();
    doc.push(Block::heading(HeadingLevel::Title, title));
    for item in items {
        render_item(&mut doc, item);
    }
    doc
}

/// Append the header group and content blocks of a single item.
pub fn render_item(doc: &mut OutputDocument, item: &ExportItem) {
    let slug = item.normalized_link().map(slug_from_link).unwrap_or("");

    doc.push(Block::PageBreak);
    doc.push(Block::heading(
        HeadingLevel::H1,
        format!("Page: {}", item.title),
    ));
    doc.push(Block::paragraph(format!("Slug: /{slug}")));
    doc.push(Block::paragraph(format!("Page Meta Title: {}", item.title)));
    // Exports carry no meta description; the label and an empty line are placeholders.
    doc.push(Block::paragraph(META_DESCRIPTION_LABEL));
    doc.push(Block::paragraph(""));

    let blocks = content_blocks(&item.content);
    engine_logging::engine_debug!(
        "Rendered '{}' (/{}) into {} content blocks",
        item.title,
        slug,
        blocks.len()
    );
    doc.extend(blocks);
}

/// Map an item's HTML body to blocks in document order.
pub fn content_blocks(html: &str) -> Vec<Block> {
    let mut out = Vec::new();
    if html.trim().is_empty() {
        return out;
    }
    let fragment = Html::parse_fragment(html);
    for node in fragment.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if let Some(tag) = ContentTag::from_name(element.value().name()) {
            tag.emit(element, &mut out);
        }
    }
    out
}

fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&flatten_text(*element))
}

fn flatten_text(node: NodeRef<'_, Node>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        if let Node::Text(chunk) = descendant.value() {
            text.push_str(chunk);
        }
    }
    text
}

/// Runs of whitespace become one space; leading and trailing whitespace is dropped.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
