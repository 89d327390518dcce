use chrono::offset::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::internal_error::{InternalError, InternalResult};

use super::data::*;
use super::progress::{aggregate_progress, GoalProgress};

fn goal_from_row(row: &Row) -> rusqlite::Result<Goal> {
    let status: String = row.get(5)?;
    let reminder_json: Option<String> = row.get(8)?;

    let reminder_options = match reminder_json {
        Some(json) => match serde_json::from_str(&json) {
            Ok(options) => Some(options),
            Err(e) => {
                tracing::warn!("discarding unreadable reminder options: {}", e);
                None
            }
        },
        None => None,
    };

    Ok(Goal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        deadline: row.get(4)?,
        status: GoalStatus::parse(&status),
        progress_percentage: row.get(6)?,
        is_main_goal: row.get(7)?,
        reminder_options,
        created_at: row.get(9)?,
    })
}

fn sub_goal_from_row(row: &Row) -> rusqlite::Result<SubGoal> {
    let status: String = row.get(5)?;

    Ok(SubGoal {
        id: row.get(0)?,
        main_goal_id: row.get(1)?,
        user_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        status: GoalStatus::parse(&status),
        order_index: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub fn get_goals_from_db(user_id: &str, db_connection: &Connection) -> InternalResult<Vec<Goal>> {
    let mut goals_statement = db_connection.prepare(
        "SELECT id, user_id, title, description, deadline, status, progress_percentage, is_main_goal, reminder_options, created_at FROM goals WHERE user_id = (?1) ORDER BY created_at DESC",
    )?;

    let goal_rows = goals_statement.query_map(params![user_id], goal_from_row)?;

    let mut goals = vec![];
    for row_result in goal_rows {
        goals.push(row_result?);
    }

    Ok(goals)
}

pub fn add_goal_to_db(
    request: AddGoalRequest,
    db_connection: &Connection,
) -> InternalResult<AddGoalResult> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(InternalError::from("Goal title cannot be empty"));
    }

    let reminder_json = match &request.reminder_options {
        Some(options) if !options.is_empty() => Some(serde_json::to_string(options)?),
        _ => None,
    };

    let goal_id = Uuid::new_v4().to_string();
    db_connection.execute(
        "INSERT INTO goals VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            goal_id,
            request.user_id,
            title,
            request.description,
            request.deadline,
            GoalStatus::Todo.as_str(),
            0.0,
            true,
            reminder_json,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(AddGoalResult { goal_id })
}

pub fn set_goal_reminders_in_db(
    goal_id: &str,
    reminder_options: Option<Vec<String>>,
    db_connection: &Connection,
) -> InternalResult<()> {
    let reminder_json = match &reminder_options {
        Some(options) if !options.is_empty() => Some(serde_json::to_string(options)?),
        _ => None,
    };

    let updated = db_connection.execute(
        "UPDATE goals SET reminder_options = (?1) WHERE id = (?2)",
        params![reminder_json, goal_id],
    )?;

    if updated == 0 {
        return Err(InternalError::from("No such goal"));
    }

    Ok(())
}

pub fn delete_goal_from_db(goal_id: &str, db_connection: &Connection) -> InternalResult<()> {
    db_connection.execute(
        "DELETE FROM sub_goal_dependencies WHERE sub_goal_id IN (SELECT id FROM sub_goals WHERE main_goal_id = (?1)) OR depends_on_sub_goal_id IN (SELECT id FROM sub_goals WHERE main_goal_id = (?1))",
        params![goal_id],
    )?;
    db_connection.execute(
        "DELETE FROM sub_goals WHERE main_goal_id = (?1)",
        params![goal_id],
    )?;
    db_connection.execute("DELETE FROM goals WHERE id = (?1)", params![goal_id])?;

    Ok(())
}

pub fn get_dashboard_stats_from_db(
    user_id: &str,
    db_connection: &Connection,
) -> InternalResult<DashboardStats> {
    let mut status_statement =
        db_connection.prepare("SELECT status FROM goals WHERE user_id = (?1)")?;

    let status_rows =
        status_statement.query_map(params![user_id], |row| row.get::<usize, String>(0))?;

    let mut stats = DashboardStats {
        total_goals: 0,
        completed_goals: 0,
        in_progress_goals: 0,
        todo_goals: 0,
    };

    for row_result in status_rows {
        stats.total_goals += 1;

        match GoalStatus::parse(&row_result?) {
            GoalStatus::Completed => stats.completed_goals += 1,
            GoalStatus::InProgress => stats.in_progress_goals += 1,
            GoalStatus::Todo => stats.todo_goals += 1,
        }
    }

    Ok(stats)
}

pub fn get_goal_owner(goal_id: &str, db_connection: &Connection) -> InternalResult<UserId> {
    let user_id = db_connection.query_row(
        "SELECT user_id FROM goals WHERE id = (?1)",
        params![goal_id],
        |row| row.get(0),
    )?;

    Ok(user_id)
}

pub fn get_sub_goals_from_db(
    main_goal_id: &str,
    db_connection: &Connection,
) -> InternalResult<Vec<SubGoal>> {
    let mut sub_goals_statement = db_connection.prepare(
        "SELECT id, main_goal_id, user_id, title, description, status, order_index, created_at FROM sub_goals WHERE main_goal_id = (?1) ORDER BY order_index",
    )?;

    let sub_goal_rows = sub_goals_statement.query_map(params![main_goal_id], sub_goal_from_row)?;

    let mut sub_goals = vec![];
    for row_result in sub_goal_rows {
        sub_goals.push(row_result?);
    }

    Ok(sub_goals)
}

pub fn get_dependencies_from_db(
    user_id: &str,
    db_connection: &Connection,
) -> InternalResult<Vec<SubGoalDependency>> {
    let mut dependencies_statement = db_connection.prepare(
        "SELECT id, sub_goal_id, depends_on_sub_goal_id, user_id FROM sub_goal_dependencies WHERE user_id = (?1)",
    )?;

    let dependency_rows = dependencies_statement.query_map(params![user_id], |row| {
        Ok(SubGoalDependency {
            id: row.get(0)?,
            sub_goal_id: row.get(1)?,
            depends_on_sub_goal_id: row.get(2)?,
            user_id: row.get(3)?,
        })
    })?;

    let mut dependencies = vec![];
    for row_result in dependency_rows {
        dependencies.push(row_result?);
    }

    Ok(dependencies)
}

pub fn add_sub_goal_to_db(
    request: AddSubGoalRequest,
    db_connection: &Connection,
) -> InternalResult<AddSubGoalResult> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(InternalError::from("Sub-goal title cannot be empty"));
    }

    let order_index: i64 = db_connection.query_row(
        "SELECT COUNT(*) FROM sub_goals WHERE main_goal_id = (?1)",
        params![request.main_goal_id],
        |row| row.get(0),
    )?;

    let sub_goal_id = Uuid::new_v4().to_string();
    db_connection.execute(
        "INSERT INTO sub_goals VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            sub_goal_id,
            request.main_goal_id,
            request.user_id,
            title,
            request.description,
            GoalStatus::Todo.as_str(),
            order_index,
            Utc::now().to_rfc3339(),
        ],
    )?;

    for depends_on_sub_goal_id in &request.depends_on {
        db_connection.execute(
            "INSERT INTO sub_goal_dependencies VALUES (?1, ?2, ?3, ?4)",
            params![
                Uuid::new_v4().to_string(),
                sub_goal_id,
                depends_on_sub_goal_id,
                request.user_id,
            ],
        )?;
    }

    refresh_goal_progress(&request.main_goal_id, db_connection)?;

    Ok(AddSubGoalResult { sub_goal_id })
}

pub fn update_sub_goal_status(
    sub_goal_id: &str,
    status: GoalStatus,
    db_connection: &Connection,
) -> InternalResult<()> {
    let updated = db_connection.execute(
        "UPDATE sub_goals SET status = (?1) WHERE id = (?2)",
        params![status.as_str(), sub_goal_id],
    )?;

    if updated == 0 {
        return Err(InternalError::from("No such sub-goal"));
    }

    let main_goal_id: GoalId = db_connection.query_row(
        "SELECT main_goal_id FROM sub_goals WHERE id = (?1)",
        params![sub_goal_id],
        |row| row.get(0),
    )?;

    refresh_goal_progress(&main_goal_id, db_connection)?;

    Ok(())
}

// The parent's percentage and status are always fully recomputed from its
// sub-goals, so running this twice for the same state is harmless.
pub fn refresh_goal_progress(
    goal_id: &str,
    db_connection: &Connection,
) -> InternalResult<GoalProgress> {
    let sub_goals = get_sub_goals_from_db(goal_id, db_connection)?;
    let progress = aggregate_progress(&sub_goals);

    db_connection.execute(
        "UPDATE goals SET progress_percentage = (?1), status = (?2) WHERE id = (?3)",
        params![progress.percentage, progress.status.as_str(), goal_id],
    )?;

    Ok(progress)
}
