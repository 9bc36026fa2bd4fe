//! Page metadata: document title, description/keyword tags, Open Graph and
//! Twitter cards, and the canonical link.

use wasm_bindgen::JsValue;
use web_sys::Document;

/// Where a metadata value ends up in the document head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetaTarget {
    Title,
    /// `<meta name="..." content="...">`
    Name(&'static str),
    /// `<meta property="..." content="...">`
    Property(&'static str),
    /// `<link rel="..." href="...">`
    Link(&'static str),
}

impl MetaTarget {
    fn selector(&self) -> Option<String> {
        match self {
            MetaTarget::Title => None,
            MetaTarget::Name(name) => Some(format!("meta[name=\"{}\"]", name)),
            MetaTarget::Property(property) => Some(format!("meta[property=\"{}\"]", property)),
            MetaTarget::Link(rel) => Some(format!("link[rel=\"{}\"]", rel)),
        }
    }
}

/// Receives metadata values. Setting the same target twice leaves the last value.
pub trait MetadataSink {
    type Error;

    fn set(&mut self, target: MetaTarget, value: &str) -> Result<(), Self::Error>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeoOptions {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub image: String,
    pub url: String,
    pub kind: String,
    pub site_name: String,
    pub noindex: bool,
}

impl Default for SeoOptions {
    fn default() -> Self {
        SeoOptions {
            title: "WHIPLE.tech - Innovative Technology Solutions".to_owned(),
            description: "WHIPLE.tech provides cutting-edge technology solutions and innovative \
                digital experiences. Discover our expertise in web development, software \
                engineering, and digital transformation."
                .to_owned(),
            keywords: "whiple, technology, web development, software engineering, digital \
                solutions, innovation, tech consulting"
                .to_owned(),
            image: "https://whiple.tech/logo.svg".to_owned(),
            url: "https://whiple.tech".to_owned(),
            kind: "website".to_owned(),
            site_name: "WHIPLE.tech".to_owned(),
            noindex: false,
        }
    }
}

impl SeoOptions {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_owned();
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = image.to_owned();
        self
    }

    pub fn with_noindex(mut self, noindex: bool) -> Self {
        self.noindex = noindex;
        self
    }

    fn robots(&self) -> &'static str {
        if self.noindex {
            "noindex, nofollow"
        } else {
            "index, follow"
        }
    }

    /// Every tag the page carries, in document order.
    pub fn entries(&self) -> Vec<(MetaTarget, &str)> {
        vec![
            (MetaTarget::Title, self.title.as_str()),
            (MetaTarget::Name("description"), self.description.as_str()),
            (MetaTarget::Name("keywords"), self.keywords.as_str()),
            (MetaTarget::Name("robots"), self.robots()),
            (MetaTarget::Property("og:type"), self.kind.as_str()),
            (MetaTarget::Property("og:title"), self.title.as_str()),
            (MetaTarget::Property("og:description"), self.description.as_str()),
            (MetaTarget::Property("og:image"), self.image.as_str()),
            (MetaTarget::Property("og:url"), self.url.as_str()),
            (MetaTarget::Property("og:site_name"), self.site_name.as_str()),
            (MetaTarget::Name("twitter:card"), "summary_large_image"),
            (MetaTarget::Name("twitter:title"), self.title.as_str()),
            (MetaTarget::Name("twitter:description"), self.description.as_str()),
            (MetaTarget::Name("twitter:image"), self.image.as_str()),
            (MetaTarget::Link("canonical"), self.url.as_str()),
        ]
    }

    pub fn apply<M: MetadataSink>(&self, sink: &mut M) -> Result<(), M::Error> {
        for (target, value) in self.entries() {
            sink.set(target, value)?;
        }
        Ok(())
    }
}

/// Writes metadata into a live document, creating missing tags in `<head>`.
pub struct DocumentSink {
    document: Document,
}

impl DocumentSink {
    pub fn new(document: Document) -> Self {
        DocumentSink { document }
    }

    fn create_tag(&self, target: MetaTarget) -> Result<web_sys::Element, JsValue> {
        let element = match target {
            MetaTarget::Title => return Err(JsValue::from_str("title is not a head tag")),
            MetaTarget::Name(name) => {
                let element = self.document.create_element("meta")?;
                element.set_attribute("name", name)?;
                element
            }
            MetaTarget::Property(property) => {
                let element = self.document.create_element("meta")?;
                element.set_attribute("property", property)?;
                element
            }
            MetaTarget::Link(rel) => {
                let element = self.document.create_element("link")?;
                element.set_attribute("rel", rel)?;
                element
            }
        };
        let head = self
            .document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
        head.append_child(&element)?;
        Ok(element)
    }
}

impl MetadataSink for DocumentSink {
    type Error = JsValue;

    fn set(&mut self, target: MetaTarget, value: &str) -> Result<(), JsValue> {
        let selector = match target.selector() {
            Some(selector) => selector,
            None => {
                self.document.set_title(value);
                return Ok(());
            }
        };
        let element = match self.document.query_selector(&selector)? {
            Some(element) => element,
            None => self.create_tag(target)?,
        };
        let attribute = match target {
            MetaTarget::Link(_) => "href",
            _ => "content",
        };
        element.set_attribute(attribute, value)
    }
}
