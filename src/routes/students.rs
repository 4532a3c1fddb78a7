use crate::{data::Student, error::RosterResult, state::RosterState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

pub async fn add_student(
    State(state): State<RosterState>,
    Json(student): Json<Student>,
) -> RosterResult<(StatusCode, Json<Student>)> {
    let created = state.add_student(student).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_student_by_id(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
) -> RosterResult<Json<Student>> {
    state.get_student_by_id(id).await.map(Json)
}

pub async fn update_student(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
    Json(student): Json<Student>,
) -> RosterResult<Json<Student>> {
    state.update_student(id, student).await.map(Json)
}

pub async fn get_all_students(State(state): State<RosterState>) -> RosterResult<Json<Vec<Student>>> {
    state.get_all_students().await.map(Json)
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Path(id): Path<i64>,
) -> RosterResult<StatusCode> {
    state.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
