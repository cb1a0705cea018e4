use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::error::Result;

/// Body of an outgoing call, paired with the content type it implies.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload {
    Empty,
    Json(Value),
    Binary(Vec<u8>),
}

impl Payload {
    pub(crate) fn content_type(&self) -> &'static str {
        match self {
            Payload::Binary(_) => "application/octet-stream",
            _ => "application/json",
        }
    }
}

/// An image handed to a detection or enrollment call. Binary inputs are
/// uploaded as octet-stream; URL inputs become a `{"url": ...}` JSON body.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Bytes(Vec<u8>),
    File(PathBuf),
    Url(String),
}

impl ImageSource {
    /// Drain a readable stream into an in-memory image.
    pub fn from_reader(mut reader: impl Read) -> std::io::Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(ImageSource::Bytes(data))
    }

    /// Classify a free-form string: an existing local file wins, then a JSON
    /// string carrying a `url` key (unwrapped and re-dispatched), otherwise
    /// the string is taken to be a remote URL.
    pub fn parse(input: &str) -> Self {
        if Path::new(input).is_file() {
            return ImageSource::File(PathBuf::from(input));
        }
        if let Some(url) = json_wrapped_url(input) {
            return ImageSource::parse(&url);
        }
        ImageSource::Url(input.to_string())
    }

    pub(crate) fn into_payload(self) -> Result<Payload> {
        match self {
            ImageSource::Bytes(data) => Ok(Payload::Binary(data)),
            ImageSource::File(path) => Ok(Payload::Binary(std::fs::read(path)?)),
            ImageSource::Url(url) => Ok(Payload::Json(json!({ "url": url }))),
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(data: Vec<u8>) -> Self {
        ImageSource::Bytes(data)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::File(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::File(path)
    }
}

fn json_wrapped_url(input: &str) -> Option<String> {
    let value: Value = serde_json::from_str(input).ok()?;
    Some(value.get("url")?.as_str()?.to_string())
}
