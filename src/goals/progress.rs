use serde::Serialize;

use super::data::{GoalStatus, SubGoal};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub completed_count: usize,
    pub total_count: usize,
    pub percentage: f64,
    pub status: GoalStatus,
}

pub fn aggregate_progress(sub_goals: &[SubGoal]) -> GoalProgress {
    let total_count = sub_goals.len();
    let completed_count = sub_goals
        .iter()
        .filter(|sub_goal| sub_goal.status == GoalStatus::Completed)
        .count();

    let percentage = if total_count > 0 {
        completed_count as f64 / total_count as f64 * 100.0
    } else {
        0.0
    };

    let status = if total_count > 0 && completed_count == total_count {
        GoalStatus::Completed
    } else if completed_count > 0 {
        GoalStatus::InProgress
    } else {
        GoalStatus::Todo
    };

    GoalProgress {
        completed_count,
        total_count,
        percentage,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_goal_with_status(id: &str, status: GoalStatus) -> SubGoal {
        SubGoal {
            id: id.to_string(),
            main_goal_id: "goal".to_string(),
            user_id: "user".to_string(),
            title: id.to_uppercase(),
            description: None,
            status,
            order_index: 0,
            created_at: String::new(),
        }
    }

    #[test]
    fn half_completed_is_in_progress_at_fifty_percent() {
        let sub_goals = vec![
            sub_goal_with_status("a", GoalStatus::Completed),
            sub_goal_with_status("b", GoalStatus::Completed),
            sub_goal_with_status("c", GoalStatus::InProgress),
            sub_goal_with_status("d", GoalStatus::Todo),
        ];

        let progress = aggregate_progress(&sub_goals);

        assert_eq!(progress.completed_count, 2);
        assert_eq!(progress.total_count, 4);
        assert_eq!(progress.percentage, 50.0);
        assert_eq!(progress.status, GoalStatus::InProgress);
    }

    #[test]
    fn no_sub_goals_is_zero_percent_todo() {
        let progress = aggregate_progress(&[]);

        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.status, GoalStatus::Todo);
    }

    #[test]
    fn all_completed_is_one_hundred_percent_completed() {
        let sub_goals = vec![
            sub_goal_with_status("a", GoalStatus::Completed),
            sub_goal_with_status("b", GoalStatus::Completed),
        ];

        let progress = aggregate_progress(&sub_goals);

        assert_eq!(progress.percentage, 100.0);
        assert_eq!(progress.status, GoalStatus::Completed);
    }

    #[test]
    fn none_completed_is_todo_even_with_work_in_flight() {
        let sub_goals = vec![
            sub_goal_with_status("a", GoalStatus::InProgress),
            sub_goal_with_status("b", GoalStatus::Todo),
        ];

        let progress = aggregate_progress(&sub_goals);

        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.status, GoalStatus::Todo);
    }

    #[test]
    fn recompute_on_unchanged_input_is_identical() {
        let sub_goals = vec![
            sub_goal_with_status("a", GoalStatus::Completed),
            sub_goal_with_status("b", GoalStatus::Todo),
            sub_goal_with_status("c", GoalStatus::Todo),
        ];

        assert_eq!(aggregate_progress(&sub_goals), aggregate_progress(&sub_goals));
    }
}
