use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use serde::Serialize;
use url::Url;

use crate::error::{AppError, Result};

pub const SITE_MAP_PATH: &str = "sitemap.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapFormat {
    Xml,
    PlainText,
}

impl SitemapFormat {
    pub fn detect(text: &str) -> Self {
        if text.contains("<urlset") || text.contains("<sitemapindex") || text.contains("<loc>") {
            SitemapFormat::Xml
        } else {
            SitemapFormat::PlainText
        }
    }
}

/// One `<url>` record of a urlset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    UrlSet(Vec<SitemapEntry>),
    /// Child sitemap locations of a `<sitemapindex>`.
    Index(Vec<String>),
}

impl SitemapDocument {
    pub fn len(&self) -> usize {
        match self {
            SitemapDocument::UrlSet(entries) => entries.len(),
            SitemapDocument::Index(children) => children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    Lastmod,
    Changefreq,
    Priority,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"loc" => Some(Field::Loc),
            b"lastmod" => Some(Field::Lastmod),
            b"changefreq" => Some(Field::Changefreq),
            b"priority" => Some(Field::Priority),
            _ => None,
        }
    }
}

/// Parses a sitemap body. XML sitemaps yield either a urlset or an index;
/// anything else is read as whitespace-separated absolute URLs.
pub fn parse_sitemap(text: &str) -> Result<SitemapDocument> {
    match SitemapFormat::detect(text) {
        SitemapFormat::Xml => parse_xml(text),
        SitemapFormat::PlainText => Ok(SitemapDocument::UrlSet(
            parse_plain_text(text)
                .into_iter()
                .map(SitemapEntry::new)
                .collect(),
        )),
    }
}

fn parse_plain_text(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|token| Url::parse(token).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(|url| url.to_string())
        .collect()
}

fn parse_xml(text: &str) -> Result<SitemapDocument> {
    let mut reader = quick_xml::Reader::from_str(text);

    let mut is_index = false;
    let mut entries: Vec<SitemapEntry> = Vec::new();
    let mut current: Option<SitemapEntry> = None;
    let mut field: Option<Field> = None;
    let mut value = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sitemapindex" => is_index = true,
                b"url" | b"sitemap" => current = Some(SitemapEntry::default()),
                name => {
                    if let Some(f) = Field::from_tag(name) {
                        field = Some(f);
                        value.clear();
                    }
                }
            },
            Ok(Event::Text(e)) if field.is_some() => match e.decode() {
                Ok(text) => value.push_str(&text),
                Err(err) => {
                    tracing::warn!(
                        "Undecodable sitemap text at {}: {}",
                        reader.buffer_position(),
                        err
                    );
                }
            },
            Ok(Event::CData(e)) if field.is_some() => {
                value.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::GeneralRef(e)) if field.is_some() => {
                let resolved = match e.resolve_char_ref() {
                    Ok(Some(ch)) => Some(ch.to_string()),
                    _ => e
                        .decode()
                        .ok()
                        .and_then(|name| resolve_predefined_entity(&name).map(str::to_string)),
                };
                if let Some(text) = resolved {
                    value.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"url" | b"sitemap" => {
                    if let Some(entry) = current.take() {
                        if !entry.loc.is_empty() {
                            entries.push(entry);
                        }
                    }
                }
                name => {
                    if let Some(f) = Field::from_tag(name) {
                        let text = value.trim().to_string();
                        value.clear();
                        field = None;
                        assign_field(&mut current, &mut entries, f, text);
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(AppError::sitemap(format!(
                    "malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    err
                )));
            }
            _ => {}
        }
    }

    if is_index {
        Ok(SitemapDocument::Index(
            entries.into_iter().map(|entry| entry.loc).collect(),
        ))
    } else {
        Ok(SitemapDocument::UrlSet(entries))
    }
}

/// `<loc>` outside any `<url>` wrapper still counts as an entry.
fn assign_field(
    current: &mut Option<SitemapEntry>,
    entries: &mut Vec<SitemapEntry>,
    field: Field,
    text: String,
) {
    if text.is_empty() {
        return;
    }
    let Some(entry) = current.as_mut() else {
        if field == Field::Loc {
            entries.push(SitemapEntry::new(text));
        }
        return;
    };
    match field {
        Field::Loc => entry.loc = text,
        Field::Lastmod => entry.lastmod = Some(text),
        Field::Changefreq => entry.changefreq = Some(text),
        Field::Priority => entry.priority = Some(text),
    }
}
