//! Export parsing and URL-based item selection.
//!
//! Only `root/channel/item` elements are read. Inside an item the first `link`,
//! `title` and `content:encoded` children are kept; everything else is skipped.
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::decode::{decode_export, DecodeError};
use crate::urls::{normalize_url, UrlFilter};

/// `content:` module namespace holding the raw post body.
pub const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";
/// Dublin Core namespace (declared by exports, never dereferenced).
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
/// WordPress export namespace (declared by exports, never dereferenced).
pub const WP_NS: &str = "http://wordpress.org/export/1.2/";

pub const UNTITLED: &str = "Untitled";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("malformed export xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("undeclared namespace prefix `{0}`")]
    UnboundPrefix(String),
    #[error("no root element found")]
    NoRoot,
    #[error("unclosed element `{0}` at end of file")]
    Unclosed(String),
    #[error("content after the root element")]
    TrailingContent,
    #[error("text outside the root element")]
    TextOutsideRoot,
}

/// One post or page from the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportItem {
    pub link: Option<String>,
    pub title: String,
    pub content: String,
}

impl ExportItem {
    /// The link in matching form, or `None` when the item has no usable link.
    pub fn normalized_link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .map(normalize_url)
            .filter(|link| !link.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportDocument {
    items: Vec<ExportItem>,
}

impl ExportDocument {
    pub fn items(&self) -> &[ExportItem] {
        &self.items
    }

    /// Items whose link is in `filter`, in export order.
    pub fn select<'a>(
        &'a self,
        filter: &'a UrlFilter,
    ) -> impl Iterator<Item = &'a ExportItem> + 'a {
        self.items.iter().filter(move |item| {
            item.normalized_link()
                .is_some_and(|link| filter.matches(link))
        })
    }
}

/// Decode raw export bytes and parse them.
pub fn parse_export_bytes(bytes: &[u8]) -> Result<ExportDocument, ParseError> {
    let decoded = decode_export(bytes)?;
    engine_logging::engine_debug!("Export decoded as {}", decoded.encoding_label);
    parse_export(&decoded.xml)
}

pub fn parse_export(xml: &str) -> Result<ExportDocument, ParseError> {
    let mut reader = NsReader::from_str(xml);
    let mut parser = ExportParser::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (ns, Event::Start(e)) => parser.open(&ns, &e, false)?,
            (ns, Event::Empty(e)) => parser.open(&ns, &e, true)?,
            (_, Event::End(_)) => parser.close(),
            (_, Event::Text(e)) => parser.text(&e.unescape()?)?,
            (_, Event::CData(e)) => parser.text(&String::from_utf8_lossy(&e))?,
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    Link,
    Title,
    Content,
}

#[derive(Debug)]
enum FrameKind {
    Root,
    Channel,
    Item,
    Field(ItemField),
    Other,
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    name: String,
}

#[derive(Debug, Default)]
struct ItemBuilder {
    link: Option<String>,
    title: Option<String>,
    content: Option<String>,
}

impl ItemBuilder {
    fn is_set(&self, field: ItemField) -> bool {
        match field {
            ItemField::Link => self.link.is_some(),
            ItemField::Title => self.title.is_some(),
            ItemField::Content => self.content.is_some(),
        }
    }

    fn slot(&mut self, field: ItemField) -> &mut Option<String> {
        match field {
            ItemField::Link => &mut self.link,
            ItemField::Title => &mut self.title,
            ItemField::Content => &mut self.content,
        }
    }

    fn build(self) -> ExportItem {
        ExportItem {
            link: self.link,
            title: self
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            content: self.content.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
struct ExportParser {
    stack: Vec<Frame>,
    item: Option<ItemBuilder>,
    items: Vec<ExportItem>,
    saw_root: bool,
}

impl ExportParser {
    fn open(
        &mut self,
        ns: &ResolveResult,
        start: &BytesStart,
        self_closing: bool,
    ) -> Result<(), ParseError> {
        if let ResolveResult::Unknown(prefix) = ns {
            return Err(ParseError::UnboundPrefix(
                String::from_utf8_lossy(prefix).into_owned(),
            ));
        }
        if self.stack.is_empty() {
            if self.saw_root {
                return Err(ParseError::TrailingContent);
            }
            self.saw_root = true;
        }
        for attr in start.attributes() {
            attr.map_err(quick_xml::Error::from)?.unescape_value()?;
        }

        let local = start.local_name();
        let kind = self.child_kind(ns, local.as_ref());
        match kind {
            FrameKind::Item => self.item = Some(ItemBuilder::default()),
            FrameKind::Field(field) => {
                if let Some(item) = self.item.as_mut() {
                    *item.slot(field) = Some(String::new());
                }
            }
            _ => {}
        }

        self.stack.push(Frame {
            kind,
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        });
        if self_closing {
            self.close();
        }
        Ok(())
    }

    fn child_kind(&self, ns: &ResolveResult, local: &[u8]) -> FrameKind {
        let unbound = matches!(ns, ResolveResult::Unbound);
        match self.stack.last().map(|frame| &frame.kind) {
            None => FrameKind::Root,
            Some(FrameKind::Root) if unbound && local == b"channel" => FrameKind::Channel,
            Some(FrameKind::Channel) if unbound && local == b"item" => FrameKind::Item,
            Some(FrameKind::Item) => {
                let field = match (ns, local) {
                    (ResolveResult::Unbound, b"link") => Some(ItemField::Link),
                    (ResolveResult::Unbound, b"title") => Some(ItemField::Title),
                    (ResolveResult::Bound(Namespace(uri)), b"encoded")
                        if *uri == CONTENT_NS.as_bytes() =>
                    {
                        Some(ItemField::Content)
                    }
                    _ => None,
                };
                // Repeated fields keep the first occurrence.
                match (field, self.item.as_ref()) {
                    (Some(field), Some(item)) if !item.is_set(field) => {
                        FrameKind::Field(field)
                    }
                    _ => FrameKind::Other,
                }
            }
            Some(_) => FrameKind::Other,
        }
    }

    fn close(&mut self) {
        if let Some(frame) = self.stack.pop() {
            if let FrameKind::Item = frame.kind {
                if let Some(item) = self.item.take() {
                    self.items.push(item.build());
                }
            }
        }
    }

    /// Text and CDATA: appended to the open field, an error outside the root.
    fn text(&mut self, text: &str) -> Result<(), ParseError> {
        let field = match self.stack.last() {
            None if text.trim().is_empty() => return Ok(()),
            None => return Err(ParseError::TextOutsideRoot),
            Some(Frame {
                kind: FrameKind::Field(field),
                ..
            }) => *field,
            Some(_) => return Ok(()),
        };
        if let Some(slot) = self.item.as_mut().and_then(|item| item.slot(field).as_mut()) {
            slot.push_str(text);
        }
        Ok(())
    }

    fn finish(self) -> Result<ExportDocument, ParseError> {
        if let Some(frame) = self.stack.last() {
            return Err(ParseError::Unclosed(frame.name.clone()));
        }
        if !self.saw_root {
            return Err(ParseError::NoRoot);
        }
        Ok(ExportDocument { items: self.items })
    }
}
