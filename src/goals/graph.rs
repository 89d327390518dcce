use std::collections::{HashMap, VecDeque};

use super::data::{SubGoal, SubGoalDependency, SubGoalId};

pub struct DependencyGraph {
    pub adjacency: HashMap<SubGoalId, Vec<SubGoalId>>,
    pub in_degree: HashMap<SubGoalId, usize>,
}

pub fn build_dependency_graph(
    sub_goals: &[SubGoal],
    dependencies: &[SubGoalDependency],
) -> DependencyGraph {
    let mut adjacency: HashMap<SubGoalId, Vec<SubGoalId>> = HashMap::new();
    let mut in_degree: HashMap<SubGoalId, usize> = HashMap::new();

    for sub_goal in sub_goals {
        adjacency.insert(sub_goal.id.clone(), vec![]);
        in_degree.insert(sub_goal.id.clone(), 0);
    }

    for dependency in dependencies {
        // Edges whose endpoints are not both in the sub-goal set are stale
        // (e.g. left over from a concurrent delete) and are skipped.
        if !adjacency.contains_key(&dependency.depends_on_sub_goal_id) {
            continue;
        }

        if let Some(degree) = in_degree.get_mut(&dependency.sub_goal_id) {
            *degree += 1;

            if let Some(dependents) = adjacency.get_mut(&dependency.depends_on_sub_goal_id) {
                dependents.push(dependency.sub_goal_id.clone());
            }
        }
    }

    DependencyGraph {
        adjacency,
        in_degree,
    }
}

pub fn topological_order(
    sub_goals: &[SubGoal],
    dependencies: &[SubGoalDependency],
) -> Vec<SubGoal> {
    let DependencyGraph {
        adjacency,
        mut in_degree,
    } = build_dependency_graph(sub_goals, dependencies);

    let records: HashMap<SubGoalId, &SubGoal> = sub_goals
        .iter()
        .map(|sub_goal| (sub_goal.id.clone(), sub_goal))
        .collect();

    // Seed the ready queue in input order, not map order, so ties between
    // independent sub-goals break the same way on every call.
    let mut queue: VecDeque<SubGoalId> = sub_goals
        .iter()
        .filter(|sub_goal| in_degree.get(&sub_goal.id) == Some(&0))
        .map(|sub_goal| sub_goal.id.clone())
        .collect();

    let mut order = Vec::with_capacity(sub_goals.len());

    while let Some(current_id) = queue.pop_front() {
        if let Some(record) = records.get(&current_id) {
            order.push((*record).clone());
        }

        if let Some(dependents) = adjacency.get(&current_id) {
            for dependent_id in dependents {
                if let Some(degree) = in_degree.get_mut(dependent_id) {
                    *degree -= 1;

                    if *degree == 0 {
                        queue.push_back(dependent_id.clone());
                    }
                }
            }
        }
    }

    // Sub-goals caught in a dependency cycle never reach in-degree zero, so
    // a cyclic graph yields fewer entries than sub_goals.len(). Callers
    // detect that by comparing lengths.
    order
}
