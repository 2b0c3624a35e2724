/// Conversation layer: the answering capability, prompt building and the
/// append-only question/answer history.
///
/// ```text
///   query ──► session ──► context (preamble + 5 rows + query)
///                │                    │
///                │                    ▼
///                │              Answerer::answer
///                │            ┌───────┴────────┐
///                │          Ok(text)        Err(e)
///                ▼            │                │
///        history.push(ChatTurn{query, text | "Error contacting …: e"})
/// ```

pub mod answer;
pub mod client;
pub mod context;
pub mod session;
