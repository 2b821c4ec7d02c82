use crate::domain::model::{FileType, ImportRow};
use crate::domain::ports::RowSource;
use crate::utils::error::{ImportError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;

const DOCUMENT_ELEMENT: &str = "root";
const ROW_ELEMENT: &str = "row";

/// Reads `<root><row>...</row></root>` documents; each child element of a
/// `row` is one named field.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlReader;

#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn named(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Self::default()
        }
    }
}

impl XmlReader {
    pub fn parse(&self, content: &str) -> Result<Vec<ImportRow>> {
        let Some(document) = parse_document(content)? else {
            tracing::warn!("XML document has no document element, nothing to import");
            return Ok(Vec::new());
        };

        if document.name != DOCUMENT_ELEMENT {
            tracing::warn!(
                "XML document element is <{}>, expected <{}>; nothing to import",
                document.name,
                DOCUMENT_ELEMENT
            );
            return Ok(Vec::new());
        }

        let rows: Vec<ImportRow> = document
            .children
            .iter()
            .filter(|child| child.name == ROW_ELEMENT)
            .enumerate()
            .map(|(index, row)| {
                let fields: HashMap<String, String> = row
                    .children
                    .iter()
                    .map(|field| (field.name.clone(), field.text.clone()))
                    .collect();
                ImportRow::from_named(index + 1, &fields)
            })
            .collect();

        if rows.is_empty() {
            tracing::warn!("XML document has no <{}.{}> records", DOCUMENT_ELEMENT, ROW_ELEMENT);
        }

        Ok(rows)
    }
}

fn xml_error<E>(e: E) -> ImportError
where
    E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    ImportError::format_read(FileType::Xml, e)
}

/// Build the element tree of `content`. Returns `None` for a document without
/// any element.
fn parse_document(content: &str) -> Result<Option<Element>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut document: Option<Element> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => stack.push(Element::named(start.name().as_ref())),
            Event::Empty(empty) => {
                let element = Element::named(empty.name().as_ref());
                attach(&mut stack, &mut document, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(xml_error)?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut document, element)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(format!("unexpected end of document inside <{}>", open.name)));
    }

    Ok(document)
}

fn attach(stack: &mut [Element], document: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if document.is_none() => *document = Some(element),
        None => {
            return Err(xml_error(format!(
                "more than one document element (found <{}>)",
                element.name
            )))
        }
    }
    Ok(())
}

impl RowSource for XmlReader {
    fn file_type(&self) -> FileType {
        FileType::Xml
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<ImportRow>> {
        let content = super::read_text(FileType::Xml, path)?;
        self.parse(&content)
    }
}
