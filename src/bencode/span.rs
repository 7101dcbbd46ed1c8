use super::value::Value;
use std::ops::Range;

/// A half-open range of byte offsets into the buffer a value was decoded from.
///
/// The span covers everything the decoder consumed for the value, from its
/// first grammar byte up to and including its terminator, so slicing the
/// original buffer with it reproduces the value's source encoding exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpan {
    pub start: usize,
    pub end: usize,
}

impl ByteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(end > start, "a bencode value is never empty");
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns the bytes this span refers to, or `None` if `data` is too
    /// short to contain it.
    pub fn slice<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(self.range())
    }
}

/// Span of one value plus the spans of its children.
///
/// Children follow the value's own layout: list items in order, dictionary
/// values in entry order. Scalars have no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpanNode {
    pub(crate) span: ByteSpan,
    pub(crate) children: Vec<SpanNode>,
}

/// A decoded value that remembers where each part of it came from.
///
/// Borrows the input buffer, so raw slices handed out by [`Spanned::raw`]
/// point straight into it.
///
/// ```
/// use torinfo::bencode::decode_spanned;
///
/// let data = b"d4:infod4:name1:ae3:zzzi1ee";
/// let decoded = decode_spanned(data).unwrap();
/// let info = decoded.get(b"info").unwrap();
/// assert_eq!(info.raw(), b"d4:name1:ae");
/// assert_eq!(info.span().start, 7);
/// ```
#[derive(Debug, Clone)]
pub struct Decoded<'a> {
    input: &'a [u8],
    value: Value,
    spans: SpanNode,
}

impl<'a> Decoded<'a> {
    pub(crate) fn new(input: &'a [u8], value: Value, spans: SpanNode) -> Self {
        Self {
            input,
            value,
            spans,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// The complete buffer this value was decoded from, trailing bytes included.
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Number of input bytes the top-level value occupies.
    pub fn consumed(&self) -> usize {
        self.spans.span.end
    }

    pub fn span(&self) -> ByteSpan {
        self.spans.span
    }

    pub fn root(&self) -> Spanned<'_, 'a> {
        Spanned {
            input: self.input,
            value: &self.value,
            node: &self.spans,
        }
    }

    /// Shorthand for `self.root().get(key)`.
    pub fn get(&self, key: &[u8]) -> Option<Spanned<'_, 'a>> {
        self.root().get(key)
    }
}

/// A borrowed view of one value inside a [`Decoded`] tree.
#[derive(Debug, Clone, Copy)]
pub struct Spanned<'d, 'a> {
    input: &'a [u8],
    value: &'d Value,
    node: &'d SpanNode,
}

impl<'d, 'a> Spanned<'d, 'a> {
    pub fn value(&self) -> &'d Value {
        self.value
    }

    pub fn span(&self) -> ByteSpan {
        self.node.span
    }

    /// The exact source bytes of this value.
    pub fn raw(&self) -> &'a [u8] {
        &self.input[self.node.span.range()]
    }

    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<Spanned<'d, 'a>> {
        let (idx, _, value) = self.value.as_dict()?.get_full(key)?;
        let node = self.node.children.get(idx)?;
        Some(Spanned {
            input: self.input,
            value,
            node,
        })
    }

    /// Returns the `idx`-th item if this value is a list.
    pub fn index(&self, idx: usize) -> Option<Spanned<'d, 'a>> {
        let value = self.value.as_list()?.get(idx)?;
        let node = self.node.children.get(idx)?;
        Some(Spanned {
            input: self.input,
            value,
            node,
        })
    }
}
