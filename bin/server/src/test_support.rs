//! Shared fixtures for handler tests

use crate::state::{AppState, DraftLimits};
use actix_web::http::header;
use actix_web::test::TestRequest;
use registration::{DirectoryChain, StaticEmailDirectory};
use std::sync::Arc;
use submission::MemorySink;

const BOUNDARY: &str = "registration-test-boundary";

enum Part {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Hand-built multipart/form-data body
#[derive(Default)]
pub struct MultipartBody {
    parts: Vec<(String, Part)>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a text part, replacing any earlier part with the same name
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.retain(|(n, _)| n != name);
        self.parts.push((name.to_string(), Part::Text(value.to_string())));
        self
    }

    /// Add another text part under a repeated name
    pub fn also(mut self, name: &str, value: &str) -> Self {
        self.parts.push((name.to_string(), Part::Text(value.to_string())));
        self
    }

    /// Set a file part, replacing any earlier part with the same name
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.parts.retain(|(n, _)| n != name);
        self.parts.push((
            name.to_string(),
            Part::File {
                file_name: file_name.to_string(),
                content_type: content_type.to_string(),
                bytes: bytes.to_vec(),
            },
        ));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.parts.retain(|(n, _)| n != name);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, part) in self.parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    pub fn post(self, uri: &str) -> TestRequest {
        self.attach(TestRequest::post().uri(uri))
    }

    pub fn put(self, uri: &str) -> TestRequest {
        self.attach(TestRequest::put().uri(uri))
    }

    fn attach(self, req: TestRequest) -> TestRequest {
        req.insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(self.build())
    }
}

/// A complete, valid registration
pub fn valid_form() -> MultipartBody {
    MultipartBody::new()
        .text("name", "Asha Rao")
        .text("email", "asha@corp.in")
        .text("mobile", "9123456780")
        .text("designation", "HR")
        .text("gender", "Female")
        .also("course", "MCA")
        .also("course", "BSC")
        .file("image", "photo.png", "image/png", b"\x89PNG")
}

/// State backed by an in-memory sink, with the default rejection set
pub fn memory_app_state() -> (AppState, Arc<MemorySink>) {
    let memory = Arc::new(MemorySink::new());
    let directory = DirectoryChain::new()
        .with(Arc::new(StaticEmailDirectory::default()))
        .with(memory.clone());
    (
        AppState::with_limits(directory, memory.clone(), DraftLimits::default()),
        memory,
    )
}
