//! Grounding block and chat messages handed to the external completion layer.

use serde::Serialize;

use forfettari_core::RetrievedChunk;

pub const SYSTEM_PROMPT: &str = "Sei un esperto di diritto tributario italiano.";

const NO_CONTEXT: &str = "Nessun passaggio pertinente è stato trovato nei documenti indicizzati.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// One cited block per passage, in rank order.
pub fn format_context(chunks: &[RetrievedChunk]) -> String {
    if chunks.is_empty() {
        return NO_CONTEXT.to_string();
    }
    chunks
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "[{}] Fonte: {} | chunk {} | score {:.3}\n{}",
                i + 1,
                c.source,
                c.chunk_id,
                c.score,
                c.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_prompt(question: &str, chunks: &[RetrievedChunk]) -> Prompt {
    let user = format!(
        "Rispondi alla domanda usando esclusivamente il contesto seguente e cita le fonti \
         tra parentesi quadre. Se il contesto non basta, dillo.\n\n\
         Contesto:\n{}\n\nDomanda: {}",
        format_context(chunks),
        question.trim()
    );
    Prompt { system: SYSTEM_PROMPT.to_string(), user }
}
