use thiserror::Error;

// ---------------------------------------------------------------------------
// Answering capability
// ---------------------------------------------------------------------------

/// Why the answering service produced no answer.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}: {1}")]
    Http(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("response contained no answer")]
    EmptyResponse,
    #[error("client unavailable: {0}")]
    Client(String),
}

/// Turns a context string into a natural-language answer.
pub trait Answerer {
    /// Name used in the transcript and in error answers, e.g. "Grok".
    fn service_name(&self) -> &str;

    fn answer(&self, context: &str) -> Result<String, AnswerError>;
}

/// Stand-in used when the HTTP client could not be built; every question is
/// answered with the setup failure.
#[derive(Debug, Clone)]
pub struct UnavailableAnswerer {
    service_name: String,
    reason: String,
}

impl UnavailableAnswerer {
    pub fn new(service_name: impl Into<String>, reason: impl Into<String>) -> Self {
        UnavailableAnswerer {
            service_name: service_name.into(),
            reason: reason.into(),
        }
    }
}

impl Answerer for UnavailableAnswerer {
    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn answer(&self, _context: &str) -> Result<String, AnswerError> {
        Err(AnswerError::Client(self.reason.clone()))
    }
}
