use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type GoalId = String;
pub type SubGoalId = String;
pub type DependencyId = String;
pub type UserId = String;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Todo,
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Todo => "todo",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
        }
    }

    // Unrecognized status text falls back to todo rather than failing the row.
    pub fn parse(text: &str) -> GoalStatus {
        match text {
            "completed" => GoalStatus::Completed,
            "in_progress" => GoalStatus::InProgress,
            _ => GoalStatus::Todo,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Goal {
    pub id: GoalId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
    pub progress_percentage: f64,
    pub is_main_goal: bool,
    pub reminder_options: Option<Vec<String>>,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SubGoal {
    pub id: SubGoalId,
    pub main_goal_id: GoalId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub status: GoalStatus,
    pub order_index: i64,
    pub created_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SubGoalDependency {
    pub id: DependencyId,
    pub sub_goal_id: SubGoalId,
    pub depends_on_sub_goal_id: SubGoalId,
    pub user_id: UserId,
}

#[derive(Deserialize, Debug)]
pub struct AddGoalRequest {
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub reminder_options: Option<Vec<String>>,
}

#[derive(Serialize, Debug)]
pub struct AddGoalResult {
    pub goal_id: GoalId,
}

#[derive(Deserialize, Debug)]
pub struct SetGoalRemindersRequest {
    pub goal_id: GoalId,
    pub reminder_options: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
pub struct DeleteGoalRequest {
    pub goal_id: GoalId,
}

#[derive(Serialize, Debug)]
pub struct DashboardStats {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub in_progress_goals: usize,
    pub todo_goals: usize,
}

#[derive(Deserialize, Debug)]
pub struct AddSubGoalRequest {
    pub main_goal_id: GoalId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub depends_on: Vec<SubGoalId>,
}

#[derive(Serialize, Debug)]
pub struct AddSubGoalResult {
    pub sub_goal_id: SubGoalId,
}

#[derive(Deserialize, Debug)]
pub struct SetSubGoalStatusRequest {
    pub sub_goal_id: SubGoalId,
    pub status: GoalStatus,
}

#[derive(Serialize, Debug)]
pub struct SubGoalOrderResponse {
    pub order: Vec<SubGoal>,
    pub total: usize,
}
