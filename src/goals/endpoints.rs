use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::DBConnection;
use crate::internal_error::InternalResult;

use super::data::*;
use super::graph::topological_order;
use super::helpers::*;

#[get("/get_goals?<user_id>")]
pub fn get_goals(
    user_id: String,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Goal>>> {
    let db_connection = db_connection.lock()?;

    let goals = get_goals_from_db(&user_id, &db_connection)?;

    Ok(Json(goals))
}

#[post("/add_goal", format = "json", data = "<add_goal_request>")]
pub fn add_goal(
    add_goal_request: Json<AddGoalRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<AddGoalResult>> {
    let db_connection = db_connection.lock()?;
    add_goal_to_db(add_goal_request.into_inner(), &db_connection).map(|r| Json(r))
}

#[post(
    "/set_goal_reminders",
    format = "json",
    data = "<set_goal_reminders_request>"
)]
pub fn set_goal_reminders(
    set_goal_reminders_request: Json<SetGoalRemindersRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    let request = set_goal_reminders_request.into_inner();
    set_goal_reminders_in_db(&request.goal_id, request.reminder_options, &db_connection)?;

    Ok(())
}

#[post("/delete_goal", format = "json", data = "<delete_goal_request>")]
pub fn delete_goal(
    delete_goal_request: Json<DeleteGoalRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    delete_goal_from_db(&delete_goal_request.goal_id, &db_connection)?;

    Ok(())
}

#[get("/get_dashboard_stats?<user_id>")]
pub fn get_dashboard_stats(
    user_id: String,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<DashboardStats>> {
    let db_connection = db_connection.lock()?;

    let stats = get_dashboard_stats_from_db(&user_id, &db_connection)?;

    Ok(Json(stats))
}

#[get("/get_sub_goals?<main_goal_id>")]
pub fn get_sub_goals(
    main_goal_id: String,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<SubGoal>>> {
    let db_connection = db_connection.lock()?;

    let sub_goals = get_sub_goals_from_db(&main_goal_id, &db_connection)?;

    Ok(Json(sub_goals))
}

#[post("/add_sub_goal", format = "json", data = "<add_sub_goal_request>")]
pub fn add_sub_goal(
    add_sub_goal_request: Json<AddSubGoalRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<AddSubGoalResult>> {
    let db_connection = db_connection.lock()?;
    add_sub_goal_to_db(add_sub_goal_request.into_inner(), &db_connection).map(|r| Json(r))
}

#[post(
    "/set_sub_goal_status",
    format = "json",
    data = "<set_sub_goal_status_request>"
)]
pub fn set_sub_goal_status(
    set_sub_goal_status_request: Json<SetSubGoalStatusRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    let request = set_sub_goal_status_request.into_inner();
    update_sub_goal_status(&request.sub_goal_id, request.status, &db_connection)?;

    Ok(())
}

#[get("/get_sub_goal_order?<main_goal_id>")]
pub fn get_sub_goal_order(
    main_goal_id: String,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<SubGoalOrderResponse>> {
    let db_connection = db_connection.lock()?;

    let sub_goals = get_sub_goals_from_db(&main_goal_id, &db_connection)?;
    let user_id = get_goal_owner(&main_goal_id, &db_connection)?;
    let dependencies = get_dependencies_from_db(&user_id, &db_connection)?;

    let total = sub_goals.len();
    let order = topological_order(&sub_goals, &dependencies);

    // An order shorter than total means a dependency cycle blocked a full
    // ordering; clients compare the two rather than receiving an error.
    Ok(Json(SubGoalOrderResponse { order, total }))
}
