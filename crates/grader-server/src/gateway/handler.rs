use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{debug, instrument};

use grader::evaluator::AnswerEvaluator;
use grader::questions::Question;

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{EvaluateRequest, EvaluateResponse, QuestionsResponse};
use crate::gateway::state::HandlerState;

#[instrument(skip(state))]
pub async fn list_questions_handler(State(state): State<HandlerState>) -> Json<QuestionsResponse> {
    let questions = state.questions.load();
    debug!(count = questions.len(), "Listing questions");

    Json(QuestionsResponse { questions })
}

#[instrument(skip(state))]
pub async fn question_by_id_handler(
    State(state): State<HandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<Question>, GatewayError> {
    state
        .questions
        .lookup(id)
        .map(Json)
        .ok_or(GatewayError::QuestionNotFound { id })
}

#[instrument(
    skip(state, request),
    fields(question_id = request.question_id, threshold = tracing::field::Empty)
)]
pub async fn evaluate_handler(
    State(state): State<HandlerState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, GatewayError> {
    let threshold = request.pass_threshold.unwrap_or(state.default_threshold);
    tracing::Span::current().record("threshold", threshold);

    if !(0.0..=1.0).contains(&threshold) {
        return Err(GatewayError::InvalidRequest(format!(
            "pass_threshold {} is outside [0, 1]",
            threshold
        )));
    }

    let embedder = state
        .embedder
        .get()
        .await
        .map_err(|e| GatewayError::ModelUnavailable(e.to_string()))?;
    let evaluator = AnswerEvaluator::new(embedder);

    let response = match request.question_id {
        Some(id) => {
            let resolved =
                evaluator.evaluate_by_id(&state.questions, id, &request.student_answer, threshold)?;
            EvaluateResponse::resolved(resolved)
        }
        None => {
            let evaluation =
                evaluator.evaluate(&request.model_answer, &request.student_answer, threshold)?;
            EvaluateResponse::direct(evaluation)
        }
    };

    debug!(
        score = response.evaluation.similarity_score,
        status = %response.evaluation.status,
        "Evaluation complete"
    );

    Ok(Json(response))
}
