//! Flat XML codec for the gateway wire format.
//!
//! Notifications and acknowledgements are a single root element whose
//! children are leaf elements carrying text or CDATA:
//!
//! ```text
//! <xml><return_code><![CDATA[SUCCESS]]></return_code><appid>wx123</appid></xml>
//! ```

use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::domain::notification::{EnvelopeError, Fields, XmlError};
use crate::ports::XmlParser;

/// Root element name used by the gateway.
pub const ROOT_ELEMENT: &str = "xml";

/// `XmlParser` backed by quick-xml.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickXmlParser;

impl XmlParser for QuickXmlParser {
    fn parse(&self, text: &str) -> Result<Fields, XmlError> {
        parse_flat(text)
    }
}

/// Parses a flat document into its child fields.
///
/// Leaf text is trimmed; CDATA is kept verbatim. A repeated child keeps the
/// last value. Nested children and trailing root elements are rejected.
pub fn parse_flat(text: &str) -> Result<Fields, XmlError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut fields = Fields::new();
    let mut depth = 0usize;
    let mut root_closed = false;
    let mut current: Option<String> = None;
    let mut value = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if root_closed {
                    return Err(XmlError::Malformed("multiple root elements".to_string()));
                }
                depth += 1;
                match depth {
                    1 => {}
                    2 => {
                        current = Some(element_name(&e)?);
                        value.clear();
                    }
                    _ => return Err(XmlError::Nested(element_name(&e)?)),
                }
            }
            Ok(Event::Empty(e)) => {
                if root_closed {
                    return Err(XmlError::Malformed("multiple root elements".to_string()));
                }
                match depth {
                    0 => root_closed = true,
                    1 => {
                        fields.insert(element_name(&e)?, String::new());
                    }
                    _ => return Err(XmlError::Nested(element_name(&e)?)),
                }
            }
            Ok(Event::Text(e)) => {
                if depth == 2 {
                    let text = e
                        .unescape()
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    value.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if depth == 2 {
                    let raw = e.into_inner();
                    let text = std::str::from_utf8(&raw)
                        .map_err(|err| XmlError::Malformed(err.to_string()))?;
                    value.push_str(text);
                }
            }
            Ok(Event::End(_)) => {
                match depth {
                    0 => return Err(XmlError::Malformed("unbalanced end tag".to_string())),
                    1 => root_closed = true,
                    2 => {
                        if let Some(name) = current.take() {
                            fields.insert(name, std::mem::take(&mut value));
                        }
                    }
                    _ => {}
                }
                depth -= 1;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(XmlError::Malformed(err.to_string())),
        }
    }

    if depth != 0 {
        return Err(XmlError::Malformed("unexpected end of document".to_string()));
    }
    if !root_closed {
        return Err(XmlError::MissingRoot);
    }
    Ok(fields)
}

/// Serializes fields, in order, under a single root element.
///
/// Values needing escaping are wrapped in CDATA unless they contain `]]>`,
/// in which case they are entity-escaped.
pub fn write_flat(root: &str, fields: &[(String, String)]) -> Result<String, EnvelopeError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    write(&mut writer, Event::Start(BytesStart::new(root)))?;
    for (name, value) in fields {
        if !is_element_name(name) {
            return Err(EnvelopeError::InvalidFieldName(name.clone()));
        }
        write(&mut writer, Event::Start(BytesStart::new(name.as_str())))?;
        if needs_escaping(value) && !value.contains("]]>") {
            write(&mut writer, Event::CData(BytesCData::new(value.as_str())))?;
        } else {
            write(&mut writer, Event::Text(BytesText::new(value.as_str())))?;
        }
        write(&mut writer, Event::End(BytesEnd::new(name.as_str())))?;
    }
    write(&mut writer, Event::End(BytesEnd::new(root)))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|err| EnvelopeError::Serialize(err.to_string()))
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), EnvelopeError> {
    writer
        .write_event(event)
        .map_err(|err| EnvelopeError::Serialize(err.to_string()))
}

fn element_name(e: &BytesStart<'_>) -> Result<String, XmlError> {
    std::str::from_utf8(e.name().as_ref())
        .map(str::to_string)
        .map_err(|err| XmlError::Malformed(err.to_string()))
}

fn needs_escaping(value: &str) -> bool {
    value.contains(['<', '>', '&', '\'', '"'])
}

fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ══════════════════════════════════════════════════════════════
    // Parsing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn parses_text_and_cdata_children() {
        let fields = parse_flat(
            "<xml><return_code><![CDATA[SUCCESS]]></return_code><total_fee>1</total_fee></xml>",
        )
        .unwrap();

        assert_eq!(fields.get("return_code").unwrap(), "SUCCESS");
        assert_eq!(fields.get("total_fee").unwrap(), "1");
    }

    #[test]
    fn accepts_declaration_and_whitespace() {
        let fields = parse_flat(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<xml>\n  <appid> wx1 </appid>\n</xml>\n",
        )
        .unwrap();

        assert_eq!(fields.get("appid").unwrap(), "wx1");
    }

    #[test]
    fn unescapes_entities() {
        let fields = parse_flat("<xml><attach>a &amp; b</attach></xml>").unwrap();
        assert_eq!(fields.get("attach").unwrap(), "a & b");
    }

    #[test]
    fn empty_child_is_empty_string() {
        let fields = parse_flat("<xml><attach/><coupon></coupon></xml>").unwrap();
        assert_eq!(fields.get("attach").unwrap(), "");
        assert_eq!(fields.get("coupon").unwrap(), "");
    }

    #[test]
    fn repeated_child_keeps_last_value() {
        let fields = parse_flat("<xml><a>1</a><a>2</a></xml>").unwrap();
        assert_eq!(fields.get("a").unwrap(), "2");
    }

    #[test]
    fn rejects_nested_elements() {
        let result = parse_flat("<xml><a><b>1</b></a></xml>");
        assert!(matches!(result, Err(XmlError::Nested(name)) if name == "b"));
    }

    #[test]
    fn rejects_truncated_document() {
        assert!(matches!(
            parse_flat("<xml><a>1</a>"),
            Err(XmlError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_mismatched_end_tag() {
        assert!(parse_flat("<xml><a>1</b></xml>").is_err());
    }

    #[test]
    fn rejects_plain_text() {
        assert_eq!(parse_flat("not xml at all"), Err(XmlError::MissingRoot));
    }

    #[test]
    fn rejects_second_root() {
        assert!(matches!(
            parse_flat("<xml></xml><xml></xml>"),
            Err(XmlError::Malformed(_))
        ));
    }

    // ══════════════════════════════════════════════════════════════
    // Writing Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn writes_fail_envelope_exactly() {
        let xml = write_flat(
            ROOT_ELEMENT,
            &pairs(&[("return_code", "FAIL"), ("return_msg", "NotImplemented")]),
        )
        .unwrap();

        assert_eq!(
            xml,
            "<xml><return_code>FAIL</return_code><return_msg>NotImplemented</return_msg></xml>"
        );
    }

    #[test]
    fn wraps_special_characters_in_cdata() {
        let xml = write_flat(ROOT_ELEMENT, &pairs(&[("attach", "a<b")])).unwrap();
        assert_eq!(xml, "<xml><attach><![CDATA[a<b]]></attach></xml>");
    }

    #[test]
    fn escapes_when_cdata_terminator_present() {
        let xml = write_flat(ROOT_ELEMENT, &pairs(&[("attach", "]]>")])).unwrap();
        assert_eq!(parse_flat(&xml).unwrap().get("attach").unwrap(), "]]>");
        assert!(!xml.contains("CDATA"));
    }

    #[test]
    fn rejects_invalid_element_names() {
        let result = write_flat(ROOT_ELEMENT, &pairs(&[("bad name", "x")]));
        assert_eq!(
            result,
            Err(EnvelopeError::InvalidFieldName("bad name".to_string()))
        );

        assert!(write_flat(ROOT_ELEMENT, &pairs(&[("1abc", "x")])).is_err());
        assert!(write_flat(ROOT_ELEMENT, &pairs(&[("", "x")])).is_err());
    }

    #[test]
    fn empty_field_list_writes_bare_root() {
        assert_eq!(write_flat(ROOT_ELEMENT, &[]).unwrap(), "<xml></xml>");
    }
}
