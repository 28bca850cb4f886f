//! Event cursor over quick-xml that yields only structural events.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use crate::coerce;
use crate::error::{ParseError, ValidateError};
use crate::expr::{substitute, ParserOptions};
use crate::tags::TagSet;

/// An owned start tag with its unprefixed attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    name: String,
    attributes: Vec<(String, String)>,
}

impl StartTag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the attribute declared by `tag`.
    pub fn value<T: TagSet>(&self, tag: &T) -> Option<&str> {
        self.attribute(tag.local_name())
    }

    pub fn string<T: TagSet>(&self, tag: &T) -> Option<String> {
        self.value(tag).map(str::to_string)
    }

    pub fn boolean<T: TagSet>(&self, tag: &T, default: bool) -> Result<bool, ParseError> {
        match self.value(tag) {
            Some(raw) => coerce::parse_bool_attr(tag.local_name(), raw),
            None => Ok(default),
        }
    }

    pub fn optional_boolean<T: TagSet>(&self, tag: &T) -> Result<Option<bool>, ParseError> {
        match self.value(tag) {
            Some(raw) => coerce::parse_bool_attr(tag.local_name(), raw).map(Some),
            None => Ok(None),
        }
    }

    pub fn integer<T: TagSet>(&self, tag: &T) -> Result<Option<i32>, ParseError> {
        self.value(tag)
            .map(|raw| coerce::parse_i32(tag.local_name(), raw))
            .transpose()
    }

    /// Value of a mandatory attribute.
    pub fn required<T: TagSet>(&self, tag: &T) -> Result<String, ParseError> {
        coerce::non_blank(self.value(tag).unwrap_or_default())
            .ok_or_else(|| ValidateError::missing_attribute(tag.local_name(), &self.name).into())
    }

    /// Reject attributes outside the vocabulary `T`.
    pub fn check_attributes<T: TagSet>(&self) -> Result<(), ParseError> {
        match self
            .attributes
            .iter()
            .find(|(key, _)| T::resolve(key).is_unknown())
        {
            Some((key, _)) => Err(ParseError::UnexpectedAttribute {
                attribute: key.clone(),
                element: self.name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Reject any attribute at all.
    pub fn check_no_attributes(&self) -> Result<(), ParseError> {
        match self.attributes.first() {
            Some((key, _)) => Err(ParseError::UnexpectedAttribute {
                attribute: key.clone(),
                element: self.name.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Structural events seen by element builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    Start(StartTag),
    End(String),
    Eof,
}

/// Pull cursor used by every element builder.
///
/// Comments, processing instructions, the declaration and the doctype are
/// skipped. Empty elements are reported as a start followed by an end.
pub struct EventReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    options: ParserOptions,
}

impl<'a> EventReader<&'a [u8]> {
    pub fn from_str(xml: &'a str, options: ParserOptions) -> Self {
        Self::with_reader(Reader::from_str(xml), options)
    }
}

impl<R: BufRead> EventReader<R> {
    pub fn from_reader(source: R, options: ParserOptions) -> Self {
        Self::with_reader(Reader::from_reader(source), options)
    }

    fn with_reader(mut reader: Reader<R>, options: ParserOptions) -> Self {
        reader.trim_text(true);
        reader.expand_empty_elements(true);
        Self {
            reader,
            buf: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Advance to the next start tag, end tag or end of input.
    pub fn next_tag(&mut self) -> Result<XmlEvent, ParseError> {
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?;
            match event {
                Event::Start(e) => {
                    let tag = owned_start(&e, self.options)?;
                    return Ok(XmlEvent::Start(tag));
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    return Ok(XmlEvent::End(name));
                }
                Event::Eof => return Ok(XmlEvent::Eof),
                Event::Text(e) => {
                    let text = e.unescape()?;
                    if !text.trim().is_empty() {
                        return Err(ParseError::Malformed(format!(
                            "unexpected text {:?} between elements",
                            text.trim()
                        )));
                    }
                }
                Event::CData(_) => {
                    return Err(ParseError::Malformed(
                        "unexpected CDATA between elements".into(),
                    ))
                }
                Event::Empty(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_) => {}
            }
        }
    }

    /// Advance to the root element, skipping any preamble.
    pub fn root(&mut self) -> Result<StartTag, ParseError> {
        match self.next_tag()? {
            XmlEvent::Start(tag) => Ok(tag),
            XmlEvent::End(name) => Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => Err(ParseError::UnexpectedEndOfDocument),
        }
    }

    /// Require that nothing but trailing comments follows the root element.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        match self.next_tag()? {
            XmlEvent::Eof => Ok(()),
            XmlEvent::Start(tag) => Err(ParseError::UnexpectedElement(tag.name)),
            XmlEvent::End(name) => Err(ParseError::UnexpectedEndTag(name)),
        }
    }

    /// Read the text content of the element `name` up to its end tag.
    pub fn read_text(&mut self, name: &str) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf)?;
            match event {
                Event::Text(e) => text.push_str(&e.unescape()?),
                Event::CData(e) => {
                    let raw = e.into_inner();
                    let chunk = std::str::from_utf8(&raw)
                        .map_err(|err| ParseError::Malformed(format!("invalid UTF-8: {err}")))?;
                    text.push_str(chunk);
                }
                Event::End(_) => break,
                Event::Start(e) => {
                    return Err(ParseError::UnexpectedElement(
                        String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                    ))
                }
                Event::Eof => return Err(ParseError::UnexpectedEndOfDocument),
                Event::Empty(_)
                | Event::Comment(_)
                | Event::Decl(_)
                | Event::PI(_)
                | Event::DocType(_) => {}
            }
        }
        let text = text.trim();
        let value = if self.options.resolve_expressions {
            substitute(text).trim().to_string()
        } else {
            text.to_string()
        };
        trace!(element = name, value = %value, "element text");
        Ok(value)
    }

    pub fn read_string(&mut self, name: &str) -> Result<Option<String>, ParseError> {
        self.read_text(name).map(Some)
    }

    pub fn read_bool(&mut self, name: &str) -> Result<bool, ParseError> {
        let text = self.read_text(name)?;
        coerce::parse_bool(name, &text)
    }

    pub fn read_i32(&mut self, name: &str) -> Result<i32, ParseError> {
        let text = self.read_text(name)?;
        coerce::parse_i32(name, &text)
    }

    pub fn read_i64(&mut self, name: &str) -> Result<i64, ParseError> {
        let text = self.read_text(name)?;
        coerce::parse_i64(name, &text)
    }

    /// Consume an element whose body must be empty, such as `<no-tx-separate-pools/>`.
    pub fn read_empty(&mut self, name: &str) -> Result<(), ParseError> {
        match self.next_tag()? {
            XmlEvent::End(end) if end == name => Ok(()),
            XmlEvent::End(end) => Err(ParseError::UnexpectedEndTag(end)),
            XmlEvent::Start(tag) => Err(ParseError::UnexpectedElement(tag.name)),
            XmlEvent::Eof => Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn owned_start(event: &BytesStart<'_>, options: ParserOptions) -> Result<StartTag, ParseError> {
    let name = String::from_utf8_lossy(event.local_name().as_ref()).into_owned();
    let mut attributes: Vec<(String, String)> = Vec::new();
    let mut iter = event.attributes();
    iter.with_checks(false);
    for attr in iter {
        let attr = attr.map_err(|err| ParseError::Malformed(err.to_string()))?;
        let key = attr.key.as_ref();
        // namespace declarations and prefixed attributes such as xsi:schemaLocation
        if key == b"xmlns" || key.contains(&b':') {
            continue;
        }
        let key = String::from_utf8_lossy(key).into_owned();
        let raw = attr.unescape_value()?;
        let value = if options.resolve_expressions {
            substitute(&raw)
        } else {
            raw.into_owned()
        };
        match attributes.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => attributes.push((key, value)),
        }
    }
    Ok(StartTag { name, attributes })
}
