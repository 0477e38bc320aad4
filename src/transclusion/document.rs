//! Parsed HTML documents
//!
//! Thin wrapper over a kuchiki DOM so the rest of the crate only sees
//! parse/serialize and the root node.

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use super::errors::{Result, TransclusionError};
use super::walker::child_nodes;

/// A parsed HTML document
pub struct Document {
    root: NodeRef,
}

impl Document {
    /// Parse markup text.
    ///
    /// HTML5 parsing recovers from any malformed markup, so the only input
    /// rejected here is binary content (NUL characters).
    pub fn parse(html: &str) -> Result<Self> {
        if let Some(offset) = html.find('\0') {
            return Err(TransclusionError::Parse(format!(
                "input contains binary data (NUL at byte {offset})"
            )));
        }

        Ok(Self {
            root: kuchiki::parse_html().one(html),
        })
    }

    /// Parse raw bytes, rejecting input that is not valid UTF-8
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let html = std::str::from_utf8(bytes)
            .map_err(|e| TransclusionError::Parse(format!("input is not valid UTF-8: {e}")))?;
        Self::parse(html)
    }

    #[must_use]
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Serialize the (possibly mutated) tree back to HTML text
    pub fn serialize(&self) -> Result<String> {
        self.restore_template_contents();

        let mut html_output = Vec::new();
        self.root
            .serialize(&mut html_output)
            .map_err(TransclusionError::Serialize)?;

        String::from_utf8(html_output).map_err(|e| {
            TransclusionError::Serialize(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// Move `<template>` contents back under their element.
    ///
    /// The parser keeps them in a separate fragment that the serializer never
    /// visits. Running this more than once is a no-op.
    fn restore_template_contents(&self) {
        let mut templates = Vec::new();
        let mut stack = vec![self.root.clone()];

        while let Some(node) = stack.pop() {
            stack.extend(child_nodes(&node));
            if node
                .as_element()
                .is_some_and(|element| element.template_contents.is_some())
            {
                templates.push(node);
            }
        }

        for template in templates {
            let Some(contents) = template
                .as_element()
                .and_then(|element| element.template_contents.as_ref())
            else {
                continue;
            };
            let moved: Vec<NodeRef> = contents.children().collect();
            for child in moved {
                template.append(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_serialize_preserves_images() {
        let document = Document::parse(r#"<p>Hi <img src="/files/a.png" alt="a"></p>"#).unwrap();
        let html = document.serialize().unwrap();

        assert!(html.contains(r#"src="/files/a.png""#));
        assert!(html.contains(r#"alt="a""#));
        assert!(html.contains("<p>Hi "));
    }

    #[test]
    fn test_malformed_markup_is_recovered() {
        let document = Document::parse("<div><p>unclosed <b>tags").unwrap();
        let html = document.serialize().unwrap();
        assert!(html.contains("unclosed"));
    }

    #[test]
    fn test_binary_input_is_rejected() {
        let err = Document::parse("<p>\0\u{1}\u{2}garbage").err().unwrap();
        assert!(matches!(err, TransclusionError::Parse(_)));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = Document::parse_bytes(&[0x3c, 0x70, 0x3e, 0xff, 0xfe, 0x00]).err().unwrap();
        assert!(matches!(err, TransclusionError::Parse(_)));
    }

    #[test]
    fn test_template_contents_are_serialized() {
        let html = r#"<p>x</p><template><p>row</p><img src="/other/cat.png"><template><b>inner</b></template></template>"#;
        let document = Document::parse(html).unwrap();

        let first = document.serialize().unwrap();
        assert!(first.contains(
            r#"<template><p>row</p><img src="/other/cat.png"><template><b>inner</b></template></template>"#
        ));
        assert_eq!(document.serialize().unwrap(), first);
        assert_eq!(Document::parse(&first).unwrap().serialize().unwrap(), first);
    }

    #[test]
    fn test_serialization_is_stable() {
        let first = Document::parse(r#"<p><img src="x.png"></p>"#)
            .unwrap()
            .serialize()
            .unwrap();
        let second = Document::parse(&first).unwrap().serialize().unwrap();
        assert_eq!(first, second);
    }
}
