//! Schema sources: owned text with a display name per source.

/// Handle to a source in a [`SourceMap`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SourceId(pub(crate) u32);

impl SourceId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Where a source came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SourceKind {
    /// Text given directly (tests, embedding callers).
    Inline,
    Stdin,
    File(String),
}

impl SourceKind {
    /// Name shown in diagnostics.
    pub fn display_name(&self) -> &str {
        match self {
            SourceKind::Inline => "<schema>",
            SourceKind::Stdin => "<stdin>",
            SourceKind::File(path) => path,
        }
    }
}

/// A borrowed view of one source.
#[derive(Clone, Debug)]
pub struct Source<'s> {
    pub id: SourceId,
    pub kind: &'s SourceKind,
    pub content: &'s str,
}

#[derive(Clone, Debug)]
struct SourceEntry {
    kind: SourceKind,
    content: String,
}

/// All sources of one schema, in load order.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single inline source.
    pub fn inline(content: &str) -> Self {
        let mut map = Self::new();
        map.add_inline(content);
        map
    }

    pub fn add_inline(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::Inline, content)
    }

    pub fn add_stdin(&mut self, content: &str) -> SourceId {
        self.push_entry(SourceKind::Stdin, content)
    }

    pub fn add_file(&mut self, path: &str, content: &str) -> SourceId {
        self.push_entry(SourceKind::File(path.to_owned()), content)
    }

    pub fn try_get(&self, id: SourceId) -> Option<Source<'_>> {
        self.entries.get(id.0 as usize).map(|entry| Source {
            id,
            kind: &entry.kind,
            content: &entry.content,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Source<'_>> {
        self.entries.iter().enumerate().map(|(idx, entry)| Source {
            id: SourceId(idx as u32),
            kind: &entry.kind,
            content: &entry.content,
        })
    }

    fn push_entry(&mut self, kind: SourceKind, content: &str) -> SourceId {
        let id = SourceId(self.entries.len() as u32);
        self.entries.push(SourceEntry {
            kind,
            content: content.to_owned(),
        });
        id
    }
}
