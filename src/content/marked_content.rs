//! Reassembly of text fragments into per-identifier content records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One atomic piece of positioned text from the document parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFragment {
    /// Text carried by this fragment (may be empty for pure span markers)
    pub text: String,
    /// Marked-content identifier opened by this fragment
    pub marked_content_id: Option<String>,
    /// Marked-content tag of the span this fragment opens
    pub tag: Option<String>,
    /// This fragment closes the open span
    pub end_of_marked_content: bool,
}

impl TextFragment {
    /// Plain text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Fragment that opens the span `id`.
    pub fn begin(id: impl Into<String>, tag: Option<&str>) -> Self {
        Self {
            marked_content_id: Some(id.into()),
            tag: tag.map(str::to_string),
            ..Default::default()
        }
    }

    /// Fragment that opens the span `id` and carries text.
    pub fn tagged(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marked_content_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Fragment that closes the open span.
    pub fn end() -> Self {
        Self {
            end_of_marked_content: true,
            ..Default::default()
        }
    }
}

/// Assembled text for one marked-content identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Accumulated text
    pub text: String,
    /// Tag of the span the record was created under
    pub tag: Option<String>,
}

/// Marked-content identifier to assembled record, in first-seen order.
pub type ContentMap = IndexMap<String, ContentRecord>;

/// Incremental marked-content assembler.
///
/// Holds a cursor on the currently open span. Each fragment is applied in
/// three steps:
/// 1. an end marker clears the cursor;
/// 2. the fragment's text is appended under the cursor, if one is open;
/// 3. a fragment carrying an identifier moves the cursor to it, effective
///    from the next fragment.
///
/// When no span was open in step 2, a fragment that opens a span keeps its
/// own (non-empty) text under the identifier it opens. Any other text with no
/// open span is dropped.
#[derive(Debug, Default)]
pub struct MarkedContentAssembler {
    cursor: Option<String>,
    active_tag: Option<String>,
    records: ContentMap,
    dropped: usize,
}

impl MarkedContentAssembler {
    /// Create an assembler with no open span.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one fragment.
    pub fn push(&mut self, fragment: &TextFragment) {
        if fragment.end_of_marked_content {
            self.cursor = None;
            self.active_tag = None;
        }

        if let Some(open) = self.cursor.clone() {
            let tag = self.active_tag.clone();
            self.append(open, tag, &fragment.text);
        } else if !fragment.text.is_empty() {
            match &fragment.marked_content_id {
                Some(opening) => {
                    self.append(opening.clone(), fragment.tag.clone(), &fragment.text);
                },
                None => self.dropped += 1,
            }
        }

        if let Some(id) = &fragment.marked_content_id {
            self.cursor = Some(id.clone());
            self.active_tag = fragment.tag.clone();
        }
    }

    /// Consume the assembler and return the records.
    pub fn finish(self) -> ContentMap {
        if self.dropped > 0 {
            log::debug!("Dropped {} text fragments outside marked content", self.dropped);
        }
        self.records
    }

    fn append(&mut self, id: String, tag: Option<String>, text: &str) {
        self.records
            .entry(id)
            .or_insert_with(|| ContentRecord {
                text: String::new(),
                tag,
            })
            .text
            .push_str(text);
    }
}

/// Assemble a page's fragment stream into content records.
pub fn assemble_marked_content(fragments: &[TextFragment]) -> ContentMap {
    let mut assembler = MarkedContentAssembler::new();
    for fragment in fragments {
        assembler.push(fragment);
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text_of<'a>(map: &'a ContentMap, id: &str) -> Option<&'a str> {
        map.get(id).map(|r| r.text.as_str())
    }

    #[test]
    fn test_fragments_carrying_ids() {
        let fragments = vec![
            TextFragment::tagged("A", "He"),
            TextFragment::tagged("A", "llo"),
            TextFragment::end(),
            TextFragment::tagged("B", "World"),
        ];
        let map = assemble_marked_content(&fragments);
        assert_eq!(map.len(), 2);
        assert_eq!(text_of(&map, "A"), Some("Hello"));
        assert_eq!(text_of(&map, "B"), Some("World"));
    }

    #[test]
    fn test_marker_then_text_stream() {
        // Parser-style stream: markers carry no text
        let fragments = vec![
            TextFragment::begin("p1R_mc0", Some("P")),
            TextFragment::text("First "),
            TextFragment::text("line"),
            TextFragment::end(),
            TextFragment::begin("p1R_mc1", Some("Span")),
            TextFragment::text("Second"),
            TextFragment::end(),
        ];
        let map = assemble_marked_content(&fragments);
        assert_eq!(text_of(&map, "p1R_mc0"), Some("First line"));
        assert_eq!(map["p1R_mc0"].tag.as_deref(), Some("P"));
        assert_eq!(text_of(&map, "p1R_mc1"), Some("Second"));
        assert_eq!(map["p1R_mc1"].tag.as_deref(), Some("Span"));
    }

    #[test]
    fn test_text_outside_span_dropped() {
        let mut assembler = MarkedContentAssembler::new();
        assembler.push(&TextFragment::text("orphan"));
        assembler.push(&TextFragment::begin("a", None));
        assembler.push(&TextFragment::text("kept"));
        assembler.push(&TextFragment::end());
        assembler.push(&TextFragment::text("orphan again"));

        let map = assembler.finish();
        assert_eq!(map.len(), 1);
        assert_eq!(text_of(&map, "a"), Some("kept"));
    }

    #[test]
    fn test_opener_text_goes_to_previous_span() {
        // A fragment that opens "b" while "a" is open appends under "a" first
        let fragments = vec![
            TextFragment::begin("a", None),
            TextFragment::text("one"),
            TextFragment::tagged("b", " two"),
            TextFragment::text("three"),
        ];
        let map = assemble_marked_content(&fragments);
        assert_eq!(text_of(&map, "a"), Some("one two"));
        assert_eq!(text_of(&map, "b"), Some("three"));
    }

    #[test]
    fn test_end_and_open_in_same_fragment() {
        let fragments = vec![
            TextFragment::begin("a", None),
            TextFragment::text("x"),
            TextFragment {
                marked_content_id: Some("b".into()),
                end_of_marked_content: true,
                ..Default::default()
            },
            TextFragment::text("y"),
        ];
        let map = assemble_marked_content(&fragments);
        assert_eq!(text_of(&map, "a"), Some("x"));
        assert_eq!(text_of(&map, "b"), Some("y"));
    }

    #[test]
    fn test_empty_marker_creates_no_record() {
        let map = assemble_marked_content(&[TextFragment::begin("a", None), TextFragment::end()]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_reopened_span_keeps_appending() {
        let fragments = vec![
            TextFragment::begin("a", None),
            TextFragment::text("foo"),
            TextFragment::end(),
            TextFragment::begin("a", None),
            TextFragment::text("bar"),
            TextFragment::end(),
        ];
        let map = assemble_marked_content(&fragments);
        assert_eq!(text_of(&map, "a"), Some("foobar"));
    }

    #[test]
    fn test_fragment_json() {
        let json = r#"[{"marked_content_id":"m0","tag":"P"},{"text":"hi"},{"end_of_marked_content":true}]"#;
        let fragments: Vec<TextFragment> = serde_json::from_str(json).unwrap();
        let map = assemble_marked_content(&fragments);
        assert_eq!(text_of(&map, "m0"), Some("hi"));
    }

    proptest! {
        #[test]
        fn prop_span_text_is_concatenated(
            spans in prop::collection::vec(prop::collection::vec("[a-z]{1,5}", 1..5), 1..6),
        ) {
            let mut fragments = Vec::new();
            for (i, parts) in spans.iter().enumerate() {
                fragments.push(TextFragment::begin(format!("mc{}", i), None));
                fragments.extend(parts.iter().map(TextFragment::text));
                fragments.push(TextFragment::end());
            }

            let map = assemble_marked_content(&fragments);
            prop_assert_eq!(map.len(), spans.len());
            for (i, parts) in spans.iter().enumerate() {
                let id = format!("mc{}", i);
                let expected = parts.concat();
                prop_assert_eq!(text_of(&map, &id), Some(expected.as_str()));
            }
        }
    }
}
