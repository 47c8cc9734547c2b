//! Transport-agnostic HTTP request model.

use std::collections::HashMap;

use serde::Serialize;
use storefront_core::catalog::ImageFile;
use storefront_core::CatalogError;

pub use http::Method;

/// One part of a multipart/form-data body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Form field name.
    pub name: String,
    /// File name, for file parts.
    pub file_name: Option<String>,
    /// MIME type of the part.
    pub content_type: String,
    /// Raw part contents.
    pub data: Vec<u8>,
}

/// A multipart/form-data body, parts kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value serialized as a JSON blob.
    pub fn json_part<T: Serialize>(
        mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self, CatalogError> {
        let data = serde_json::to_vec(value).map_err(|e| CatalogError::Encode(e.to_string()))?;
        self.parts.push(Part {
            name: name.into(),
            file_name: None,
            content_type: "application/json".to_string(),
            data,
        });
        Ok(self)
    }

    /// Append a file.
    pub fn file_part(mut self, name: impl Into<String>, file: &ImageFile) -> Self {
        self.parts.push(Part {
            name: name.into(),
            file_name: Some(file.file_name.clone()),
            content_type: file.content_type.clone(),
            data: file.bytes.clone(),
        });
        self
    }

    /// Append the same field once per file.
    pub fn file_parts<'a>(
        self,
        name: &str,
        files: impl IntoIterator<Item = &'a ImageFile>,
    ) -> Self {
        files
            .into_iter()
            .fold(self, |form, file| form.file_part(name, file))
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// All parts with the given field name, in order.
    pub fn parts_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Part> + 'a {
        self.parts.iter().filter(move |p| p.name == name)
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }
}

/// Request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    Multipart(MultipartForm),
}

/// A fully built request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Create a new request.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set a multipart body.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// The multipart form, if the body is one.
    pub fn form(&self) -> Option<&MultipartForm> {
        match &self.body {
            RequestBody::Multipart(form) => Some(form),
            RequestBody::Empty => None,
        }
    }

    /// The raw query string, if any.
    pub fn query_string(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, q)| q)
    }
}
