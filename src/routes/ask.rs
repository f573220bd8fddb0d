//! Question answering endpoint

use axum::{extract::State, response::Html, routing::post, Form, Router};
use tracing::info;

use crate::answer::answer_question;
use crate::chunk;
use crate::extract::{self, DocumentKind};
use crate::models::{AppState, AskForm};
use crate::render::{index_page, AnswerBlock};
use crate::types::AppResult;

pub fn router(state: AppState) -> Router {
    Router::new().route("/ask", post(ask)).with_state(state)
}

/// POST /ask - extract, chunk, and query the document, then render the page
/// again with the answer filled in.
async fn ask(
    State(state): State<AppState>,
    Form(form): Form<AskForm>,
) -> AppResult<Html<String>> {
    info!(document = %form.document_name, question_len = form.question.len(), "question received");

    let path = state.store.resolve(&form.document_name).await?;
    let kind = DocumentKind::from_path(&path);
    let text = extract::extract_text(&path).await?;

    // Slide decks get the double pass: split on slide boundaries first, then
    // chunk each slide. Everything else is a single fixed-stride pass.
    let answer = if kind.has_slide_boundaries() {
        answer_question(state.llm.as_ref(), chunk::slide_chunks(&text), &form.question).await?
    } else {
        answer_question(state.llm.as_ref(), chunk::chunks(&text), &form.question).await?
    };

    let documents = state.store.list().await?;
    let block = AnswerBlock {
        document: form.document_name,
        question: form.question,
        answer,
    };
    Ok(Html(index_page(&documents, Some(&block))))
}
