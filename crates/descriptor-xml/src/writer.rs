//! Canonical XML rendering.

use std::fmt::Display;

use quick_xml::escape::escape;

const INDENT: &str = "  ";

/// Attribute list written in insertion order; absent values are skipped.
#[derive(Debug, Default, Clone)]
pub struct Attrs {
    items: Vec<(&'static str, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Display>(mut self, name: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.items.push((name, value.to_string()));
        }
        self
    }

    pub fn text(self, name: &'static str, value: &str) -> Self {
        self.with(name, Some(value))
    }

    /// Emit `value` only when it differs from the schema default.
    pub fn flag(self, name: &'static str, value: bool, default: bool) -> Self {
        self.with(name, (value != default).then_some(value))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Indented writer producing deterministic element output.
#[derive(Debug, Default)]
pub struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, name: &str, attrs: &Attrs) {
        self.open(name, attrs, false);
        self.depth += 1;
    }

    pub fn end(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    pub fn empty(&mut self, name: &str, attrs: &Attrs) {
        self.open(name, attrs, true);
    }

    /// Write `name` with the children produced by `body`, collapsing to
    /// `<name/>` when `body` writes nothing.
    pub fn element<F>(&mut self, name: &str, attrs: &Attrs, body: F)
    where
        F: FnOnce(&mut XmlWriter),
    {
        let mut inner = XmlWriter {
            out: String::new(),
            depth: self.depth + 1,
        };
        body(&mut inner);
        if inner.out.is_empty() {
            self.empty(name, attrs);
            return;
        }
        self.open(name, attrs, false);
        self.out.push_str(&inner.out);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    /// `<name attrs>text</name>` on one line.
    pub fn text_element(&mut self, name: &str, attrs: &Attrs, text: &str) {
        self.indent();
        self.push_open_tag(name, attrs);
        self.out.push('>');
        self.out.push_str(&escape(text));
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    pub fn text(&mut self, name: &str, text: &str) {
        self.text_element(name, &Attrs::new(), text);
    }

    pub fn opt_text(&mut self, name: &str, text: Option<&str>) {
        if let Some(text) = text {
            self.text(name, text);
        }
    }

    pub fn value<T: Display>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.text(name, &value.to_string());
        }
    }

    /// Emit a boolean element only when it differs from the schema default.
    pub fn flag(&mut self, name: &str, value: bool, default: bool) {
        if value != default {
            self.text(name, if value { "true" } else { "false" });
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn open(&mut self, name: &str, attrs: &Attrs, empty: bool) {
        self.indent();
        self.push_open_tag(name, attrs);
        self.out.push_str(if empty { "/>\n" } else { ">\n" });
    }

    fn push_open_tag(&mut self, name: &str, attrs: &Attrs) {
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in &attrs.items {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape(value.as_str()));
            self.out.push('"');
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }
}

/// Types that render themselves as a complete element.
pub trait ToXml {
    fn write_xml(&self, writer: &mut XmlWriter);

    fn to_canonical_xml(&self) -> String {
        let mut writer = XmlWriter::new();
        self.write_xml(&mut writer);
        writer.finish()
    }
}
