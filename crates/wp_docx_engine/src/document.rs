/// Heading depth; `Title` is the document-level heading above all pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    Title,
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::Title => 0,
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    Paragraph(String),
    ListItem(String),
    Quote(String),
    PageBreak,
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph(text)
            | Block::ListItem(text)
            | Block::Quote(text) => Some(text.as_str()),
            Block::PageBreak => None,
        }
    }
}

/// Append-only sequence of blocks that becomes the output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    blocks: Vec<Block>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.extend(blocks);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of rendered pages, i.e. page breaks each followed by a level-1 heading.
    pub fn page_count(&self) -> usize {
        self.blocks
            .windows(2)
            .filter(|pair| {
                matches!(
                    pair,
                    [
                        Block::PageBreak,
                        Block::Heading {
                            level: HeadingLevel::H1,
                            ..
                        }
                    ]
                )
            })
            .count()
    }
}
