//! Small XML queries over description, world, mesh and manifest documents
//!
//! Documents are streamed with `quick-xml`; nothing builds a tree. Every query
//! reads the whole document, so a truncated file is reported as unparsable
//! even when the queried part came before the cut.

use std::path::Path;

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};

use crate::error::{Result, SimBundleError};

/// COLLADA 1.4 namespace used by `.dae` meshes
pub const COLLADA_NS: &[u8] = b"http://www.collada.org/2005/11/COLLADASchema";

fn parse_error(path: &Path, reason: impl ToString) -> SimBundleError {
    SimBundleError::XmlParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Read a document as UTF-8 text
pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| parse_error(path, e))
}

/// Open element count, checked once the reader reaches the end of input
#[derive(Debug, Default)]
struct Nesting {
    depth: usize,
    root_seen: bool,
}

impl Nesting {
    fn open(&mut self) {
        self.depth += 1;
        self.root_seen = true;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Track an element-level event
    fn track(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(_) => self.open(),
            Event::Empty(_) => self.root_seen = true,
            Event::End(_) => self.close(),
            _ => {}
        }
    }

    fn finish(&self, path: &Path) -> Result<()> {
        if !self.root_seen {
            return Err(parse_error(path, "no root element"));
        }
        if self.depth > 0 {
            return Err(parse_error(
                path,
                format!("unexpected end of document, {} element(s) left open", self.depth),
            ));
        }
        Ok(())
    }
}

/// Text of an entity or character reference (`&amp;`, `&#x41;`)
fn reference_text(reference: &BytesRef<'_>, path: &Path) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| parse_error(path, e))?
    {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(|e| parse_error(path, e))?;
    resolve_xml_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| parse_error(path, format!("unknown entity '&{name};'")))
}

/// Character data carried by `event`, if any
fn event_text(event: &Event<'_>, path: &Path) -> Result<Option<String>> {
    match event {
        Event::Text(t) => Ok(Some(
            t.decode().map_err(|e| parse_error(path, e))?.into_owned(),
        )),
        Event::CData(c) => Ok(Some(
            c.decode().map_err(|e| parse_error(path, e))?.into_owned(),
        )),
        Event::GeneralRef(r) => reference_text(r, path).map(Some),
        _ => Ok(None),
    }
}

fn attribute_value(
    element: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    name: &str,
    path: &Path,
) -> Result<Option<String>> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|e| parse_error(path, e))?;
    match attr {
        Some(attr) => {
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(|e| parse_error(path, e))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

/// Values of every `attribute` in the document, in document order
pub fn attribute_values(text: &str, attribute: &str, path: &Path) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(text);
    let mut nesting = Nesting::default();
    let mut values = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| parse_error(path, e))?;
        nesting.track(&event);
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                if let Some(value) = attribute_value(e, &reader, attribute, path)? {
                    values.push(value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    nesting.finish(path)?;
    Ok(values)
}

/// True if the document has an element `name` without any text content
/// before its first child or end tag (`<materials/>`, `<materials></materials>`)
pub fn has_textless_element(text: &str, name: &[u8], path: &Path) -> Result<bool> {
    let mut reader = Reader::from_str(text);
    let mut nesting = Nesting::default();
    let mut pending = false;
    let mut found = false;

    loop {
        let event = reader.read_event().map_err(|e| parse_error(path, e))?;
        nesting.track(&event);
        if pending {
            match event_text(&event, path)? {
                Some(t) if !t.is_empty() => pending = false,
                _ => {
                    found = true;
                    pending = false;
                }
            }
        }
        match &event {
            Event::Empty(e) if e.local_name().as_ref() == name => found = true,
            Event::Start(e) if e.local_name().as_ref() == name => pending = true,
            Event::Eof => break,
            _ => {}
        }
    }

    nesting.finish(path)?;
    Ok(found)
}

/// Trimmed text of every `local_name` element bound to `namespace`
pub fn namespaced_texts(
    text: &str,
    namespace: &[u8],
    local_name: &[u8],
    path: &Path,
) -> Result<Vec<String>> {
    let mut reader = NsReader::from_str(text);
    let mut nesting = Nesting::default();
    let mut texts = Vec::new();
    let mut current: Option<String> = None;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| parse_error(path, e))?;
        let in_namespace = matches!(ns, ResolveResult::Bound(Namespace(n)) if n == namespace);
        nesting.track(&event);

        match &event {
            Event::Start(e) if in_namespace && e.local_name().as_ref() == local_name => {
                current = Some(String::new());
            }
            Event::Empty(e) if in_namespace && e.local_name().as_ref() == local_name => {
                texts.push(String::new());
            }
            Event::End(e) if e.local_name().as_ref() == local_name => {
                if let Some(buf) = current.take() {
                    texts.push(buf.trim().to_string());
                }
            }
            Event::Eof => break,
            _ => {
                if let (Some(buf), Some(t)) = (current.as_mut(), event_text(&event, path)?) {
                    buf.push_str(&t);
                }
            }
        }
    }

    nesting.finish(path)?;
    Ok(texts)
}

/// Text of the first `<child>` directly under the root element
pub fn root_child_text(text: &str, child: &[u8], path: &Path) -> Result<Option<String>> {
    let mut reader = Reader::from_str(text);
    let mut nesting = Nesting::default();
    let mut capture: Option<String> = None;
    let mut found: Option<String> = None;

    loop {
        let event = reader.read_event().map_err(|e| parse_error(path, e))?;
        nesting.track(&event);
        match &event {
            Event::Start(e) => {
                if found.is_none() && nesting.depth == 2 && e.local_name().as_ref() == child {
                    capture = Some(String::new());
                }
            }
            Event::End(_) => {
                if let Some(buf) = capture.take() {
                    found = Some(buf.trim().to_string());
                }
            }
            Event::Eof => break,
            _ => {
                if let (Some(buf), Some(t)) = (capture.as_mut(), event_text(&event, path)?) {
                    buf.push_str(&t);
                }
            }
        }
    }

    nesting.finish(path)?;
    Ok(found.filter(|value| !value.is_empty()))
}
