use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of the catalog document. Metric pairs are optional because
/// legacy records predate some of them; the read path fills display defaults
/// via [`Movie::normalized`] and the rating path infers prior vote counts.
///
/// The `extra` map round-trips any legacy field this struct does not model,
/// so rewriting the document never drops data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gore: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gore_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scares: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scares_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jumpscares: Option<f64>,
    // Legacy documents spell the jumpscares counter this way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jumps_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspense_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Movie {
    /// Display defaults for records missing the newer metric fields, applied
    /// on every read and never persisted:
    ///
    /// | field      | default               |
    /// |------------|-----------------------|
    /// | jumpscares | 0                     |
    /// | suspense   | `scares` if set, else 3 |
    pub fn normalized(&self) -> Movie {
        let mut movie = self.clone();
        movie.jumpscares = Some(self.jumpscares.unwrap_or(0.0));
        movie.suspense = Some(self.suspense.or(self.scares).unwrap_or(3.0));
        movie
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Comment {
    pub user: String,
    pub text: String,
    pub date: Timestamp,
}

impl Comment {
    /// Caps are applied by truncation, not rejection.
    pub fn new(user: &str, text: &str) -> Self {
        Self {
            user: truncate(user, 100),
            text: truncate(text, 1000),
            date: Timestamp::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub message: String,
    pub date: Timestamp,
}

impl Contact {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: truncate(name, 100),
            email: truncate(email, 150),
            message: truncate(message, 2000),
            date: Timestamp::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub user: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub gore: Option<f64>,
    pub scares: Option<f64>,
    pub jumpscares: Option<f64>,
    pub suspense: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub success: bool,
    pub comment: Comment,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub success: bool,
    pub movie: Movie,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub contact: Contact,
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
