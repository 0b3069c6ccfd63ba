use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_staff, AuthMiddleware, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::{CreateAssignmentRequest, SubmitAnswerRequest, UpdateAssignmentRequest},
        response::{
            AssignmentDto, AssignmentListResponse, AssignmentResponse, MessageResponse,
            SubmissionResponse,
        },
    },
};

#[post("/api/assignments", wrap = "AuthMiddleware")]
pub async fn create_assignment(
    state: web::Data<AppState>,
    request: web::Json<CreateAssignmentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_staff(&auth.0)?;

    let assignment = state.assignment_service.create(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(AssignmentResponse {
        message: "Assignment created successfully".to_string(),
        assignment: assignment.into(),
    }))
}

#[get("/api/assignments")]
pub async fn list_assignments(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let assignments = state.assignment_service.list_all().await?;
    Ok(HttpResponse::Ok().json(AssignmentListResponse {
        assignments: assignments.into_iter().map(AssignmentDto::from).collect(),
    }))
}

// Registered ahead of `/api/assignments/{id}`.
#[get("/api/assignments/published")]
pub async fn list_published_assignments(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let assignments = state.assignment_service.list_published().await?;
    Ok(HttpResponse::Ok().json(AssignmentListResponse {
        assignments: assignments.into_iter().map(AssignmentDto::from).collect(),
    }))
}

#[get("/api/assignments/{id}")]
pub async fn get_assignment(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let assignment = state.assignment_service.get(&id).await?;
    Ok(HttpResponse::Ok().json(AssignmentDto::from(assignment)))
}

#[put("/api/assignments/{id}", wrap = "AuthMiddleware")]
pub async fn update_assignment(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateAssignmentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_staff(&auth.0)?;

    let assignment = state
        .assignment_service
        .update(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(AssignmentResponse {
        message: "Assignment updated successfully".to_string(),
        assignment: assignment.into(),
    }))
}

#[delete("/api/assignments/{id}", wrap = "AuthMiddleware")]
pub async fn delete_assignment(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_staff(&auth.0)?;

    state.assignment_service.delete(&id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Assignment deleted successfully".to_string(),
    }))
}

#[post("/api/assignments/{id}/submit", wrap = "AuthMiddleware")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let submission = state
        .submission_service
        .submit(&id, &auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(SubmissionResponse {
        message: "Submitted successfully".to_string(),
        submission: submission.into(),
    }))
}

#[put(
    "/api/assignments/{assignment_id}/review/{submission_id}",
    wrap = "AuthMiddleware"
)]
pub async fn mark_submission_reviewed(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_staff(&auth.0)?;

    let (assignment_id, submission_id) = path.into_inner();
    let submission = state
        .submission_service
        .mark_reviewed(&assignment_id, &submission_id)
        .await?;
    Ok(HttpResponse::Ok().json(SubmissionResponse {
        message: "Submission marked as reviewed successfully".to_string(),
        submission: submission.into(),
    }))
}
