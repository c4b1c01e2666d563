// src/api/http/interview.rs

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::types::{
    InterviewerView, LifecycleResponse, SessionResponse, StartRequest, StartResponse,
    SubmitMessageRequest, SubmitMessageResponse,
};
use crate::interview::session::Difficulty;
use crate::interview::turn::{StartParams, SubmitParams};
use crate::state::AppState;

pub async fn start_interview(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<StartRequest>,
) -> ApiResult<Json<StartResponse>> {
    let outcome = app_state
        .service
        .start(StartParams {
            user_id: req.user_id,
            job_type: req.job_type,
            industry: req.industry,
            difficulty: Difficulty::parse(&req.difficulty),
            resume_doc_id: req.resume_doc_id,
            portfolio_doc_id: req.portfolio_doc_id,
            max_turns: req.max_turns,
        })
        .await?;

    let interviewer = InterviewerView::for_session(&outcome.session, outcome.session.current_interviewer);
    Ok(Json(StartResponse {
        success: true,
        session: outcome.session,
        first_message: outcome.first_message,
        interviewer,
    }))
}

pub async fn submit_message(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<SubmitMessageRequest>,
) -> ApiResult<Json<SubmitMessageResponse>> {
    let session_id = req.session_id.clone();
    let outcome = app_state
        .service
        .submit_turn(SubmitParams {
            session_id: req.session_id,
            content: req.content,
            audio_url: req.audio_url,
            timeout_save_only: req.timeout_save_only,
        })
        .await?;

    let interviewer = match outcome.next_persona {
        Some(persona) => {
            // Reload is cheap and the session row moved under us during the turn.
            let (session, _) = app_state.service.get_session(&session_id).await?;
            Some(InterviewerView::for_session(&session, persona))
        }
        None => None,
    };

    info!(
        "Turn complete for session {}: status={} turn_count={}",
        session_id,
        outcome.session_status.as_str(),
        outcome.turn_count
    );

    Ok(Json(SubmitMessageResponse {
        success: true,
        user_message: outcome.user_message,
        interviewer_response: outcome.interviewer_message,
        interviewer,
        session_status: outcome.session_status,
        turn_count: outcome.turn_count,
        should_end: outcome.should_end,
    }))
}

pub async fn get_session(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionResponse>> {
    let (session, messages) = app_state.service.get_session(&session_id).await?;
    Ok(Json(SessionResponse { success: true, session, messages }))
}

pub async fn pause_session(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<LifecycleResponse>> {
    let session = app_state.service.pause(&session_id).await?;
    Ok(Json(LifecycleResponse { success: true, session }))
}

pub async fn resume_session(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<LifecycleResponse>> {
    let session = app_state.service.resume(&session_id).await?;
    Ok(Json(LifecycleResponse { success: true, session }))
}

pub async fn end_session(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<LifecycleResponse>> {
    let session = app_state.service.end(&session_id).await?;
    Ok(Json(LifecycleResponse { success: true, session }))
}
