//! Task board derivations: which tasks a user sees, how they are grouped
//! into per-person tabs, and how far along each tab is.

use crate::config::Session;
use crate::models::Task;
use crate::utils::format::to_title_case;

pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl TaskGroup {
    pub fn done(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn completion_percent(&self) -> u8 {
        completion_percent(&self.tasks)
    }
}

/// Admins see every task; everyone else only what is assigned to them.
pub fn visible_tasks<'a>(tasks: &'a [Task], session: &Session) -> Vec<&'a Task> {
    if session.role.is_admin() {
        return tasks.iter().collect();
    }
    tasks
        .iter()
        .filter(|t| match (&t.assigned_user, &session.username) {
            (Some(user), Some(me)) => user.username == *me,
            _ => false,
        })
        .collect()
}

fn group_key(task: &Task) -> String {
    match &task.assigned_user {
        Some(user) => to_title_case(&user.username),
        None => UNASSIGNED.to_string(),
    }
}

/// Incomplete first, then by title.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}

/// Group tasks by assignee, keeping groups in first-seen order.
pub fn group_by_assignee(tasks: &[&Task]) -> Vec<TaskGroup> {
    let mut groups: Vec<TaskGroup> = Vec::new();
    for task in tasks {
        let key = group_key(task);
        match groups.iter_mut().find(|g| g.name == key) {
            Some(group) => group.tasks.push((*task).clone()),
            None => groups.push(TaskGroup {
                name: key,
                tasks: vec![(*task).clone()],
            }),
        }
    }
    for group in &mut groups {
        sort_tasks(&mut group.tasks);
    }
    groups
}

/// Tab order. Admins get their own tab first, then everyone else
/// alphabetically, then the unassigned pile; other roles keep first-seen order.
pub fn ordered_tabs(mut groups: Vec<TaskGroup>, session: &Session) -> Vec<TaskGroup> {
    if !session.role.is_admin() {
        return groups;
    }
    let me = session.username.as_deref().map(to_title_case);
    groups.sort_by(|a, b| {
        let rank = |g: &TaskGroup| {
            if Some(&g.name) == me.as_ref() {
                0
            } else if g.name == UNASSIGNED {
                2
            } else {
                1
            }
        };
        rank(a)
            .cmp(&rank(b))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    groups
}

/// The whole pipeline: filter by session, group, order.
pub fn build_board(tasks: &[Task], session: &Session) -> Vec<TaskGroup> {
    let visible = visible_tasks(tasks, session);
    ordered_tabs(group_by_assignee(&visible), session)
}

pub fn completion_percent(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks.iter().filter(|t| t.completed).count();
    ((done as f64 / tasks.len() as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignedUser, Role};

    fn task(id: i64, title: &str, completed: bool, user: Option<&str>) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed,
            link_url: None,
            notes: None,
            assigned_user: user.map(|u| AssignedUser {
                id: id * 10,
                username: u.to_string(),
            }),
        }
    }

    fn session(user: &str, role: Role) -> Session {
        Session {
            username: Some(user.to_string()),
            role,
            token: None,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Water plants", true, Some("ravi")),
            task(2, "bins out", false, None),
            task(3, "Homework", false, Some("asha")),
            task(4, "Dishes", false, Some("ravi")),
            task(5, "Read", true, Some("zoe")),
        ]
    }

    #[test]
    fn non_admin_sees_only_own_tasks() {
        let tasks = sample();
        let visible = visible_tasks(&tasks, &session("ravi", Role::User));
        assert_eq!(visible.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn anonymous_non_admin_sees_nothing() {
        let tasks = sample();
        assert!(visible_tasks(&tasks, &Session::default()).is_empty());
    }

    #[test]
    fn groups_sort_incomplete_first() {
        let tasks = sample();
        let visible: Vec<&Task> = tasks.iter().collect();
        let groups = group_by_assignee(&visible);
        let ravi = groups.iter().find(|g| g.name == "Ravi").unwrap();
        assert_eq!(ravi.tasks[0].title, "Dishes");
        assert_eq!(ravi.tasks[1].title, "Water plants");
        assert_eq!(ravi.done(), 1);
    }

    #[test]
    fn admin_tab_order() {
        let board = build_board(&sample(), &session("ravi", Role::Admin));
        let names: Vec<&str> = board.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Ravi", "Asha", "Zoe", "Unassigned"]);
    }

    #[test]
    fn user_board_has_single_tab() {
        let board = build_board(&sample(), &session("asha", Role::User));
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].name, "Asha");
    }

    #[test]
    fn completion_percent_rounds() {
        let tasks = vec![
            task(1, "a", true, None),
            task(2, "b", false, None),
            task(3, "c", false, None),
        ];
        assert_eq!(completion_percent(&tasks), 33);
        assert_eq!(completion_percent(&tasks[..1]), 100);
        assert_eq!(completion_percent(&[]), 0);
    }
}
