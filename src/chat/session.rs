use uuid::Uuid;

use super::answer::Answerer;
use super::context::build_context;
use crate::data::model::ExposureDataset;

// ---------------------------------------------------------------------------
// ChatTurn – one question with its answer
// ---------------------------------------------------------------------------

/// A resolved question. The answer is either the service's reply or the
/// error text that replaced it. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    id: Uuid,
    query: String,
    answer: String,
}

impl ChatTurn {
    fn new(query: String, answer: String) -> Self {
        ChatTurn {
            id: Uuid::new_v4(),
            query,
            answer,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

// ---------------------------------------------------------------------------
// ConversationSession – append-only history
// ---------------------------------------------------------------------------

/// In-memory question/answer history, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    history: Vec<ChatTurn>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask `answerer` about `dataset` and record the outcome.
    ///
    /// A blank query is ignored: no turn, no call. Otherwise exactly one turn
    /// is appended, whether the service answered or failed.
    pub fn submit(
        &mut self,
        query: &str,
        dataset: &ExposureDataset,
        answerer: &dyn Answerer,
    ) -> Option<&ChatTurn> {
        if query.trim().is_empty() {
            return None;
        }

        let context = build_context(dataset, query);
        let answer = match answerer.answer(&context) {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("{} failed to answer: {e}", answerer.service_name());
                format!("Error contacting {}: {e}", answerer.service_name())
            }
        };

        self.history.push(ChatTurn::new(query.to_string(), answer));
        self.history.last()
    }

    /// Turns in submission order.
    #[cfg(test)]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Turns newest first, the order the transcript is drawn in.
    pub fn recent_first(&self) -> impl Iterator<Item = &ChatTurn> {
        self.history.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
