use dioxus::prelude::*;

use crate::app::components::{
    Button, BoardColumn, EmptyState, PageHeader, ScopeNotice, TaskCard, TaskDialog, TaskForm,
};
use crate::domain::models::{Task, TaskPatch, TaskStatus, User};
use crate::domain::services::Team;
use crate::shared::errors::ApiError;
use crate::shared::hooks::{report_api_error, use_api, use_project_scope, use_toasts};
use crate::shared::state::{
    columns, confirmed_create, optimistic_delete, optimistic_update, reclassify, DragPayload,
    DropOutcome, ScopeState,
};

#[derive(Clone, PartialEq)]
enum DialogMode {
    Create,
    Edit(Task),
}

/// Task kanban for one project.
#[component]
pub fn DashboardPage(project_id: String) -> Element {
    let navigator = use_navigator();
    let toaster = use_toasts();
    let mut tasks = use_signal(Vec::<Task>::new);
    let team = use_signal(Team::default);
    let dragging = use_signal(DragPayload::empty);
    let mut dialog = use_signal(|| None::<DialogMode>);
    let mut saving = use_signal(|| false);

    let scope = use_project_scope(
        project_id.clone(),
        |api, project| async move { api.load_task_board(&project.id).await },
        move |(loaded_tasks, loaded_team): (Result<Vec<Task>, ApiError>, Result<Team, ApiError>)| {
            let (mut tasks, mut team) = (tasks, team);
            match loaded_tasks {
                Ok(list) => tasks.set(list),
                Err(err) => {
                    tasks.set(Vec::new());
                    report_api_error(&toaster, &navigator, "Could not load tasks", &err);
                }
            }
            match loaded_team {
                Ok(loaded) => team.set(loaded),
                Err(err) => {
                    team.set(Team::default());
                    tracing::warn!(error = %err, "Teammates unavailable for assignees");
                }
            }
        },
    );

    let api = use_api();

    let on_drop = {
        let api = api.clone();
        move |(payload, status): (DragPayload, TaskStatus)| {
            let api = api.clone();
            spawn(async move {
                let outcome = reclassify(&mut tasks, &payload, status, |id, status| {
                    let api = api.clone();
                    async move { api.update_task(&id, &TaskPatch::status(status)).await }
                })
                .await;
                if let DropOutcome::Reverted(err) = outcome {
                    report_api_error(&toaster, &navigator, "Could not move task", &err);
                }
            });
        }
    };

    let on_submit = {
        let api = api.clone();
        let project_id = project_id.clone();
        move |form: TaskForm| {
            let api = api.clone();
            let project_id = project_id.clone();
            let mode = dialog.peek().clone();
            saving.set(true);
            spawn(async move {
                let result = match mode {
                    Some(DialogMode::Edit(task)) => {
                        let patch = form.to_patch(&TaskForm::from_task(&task));
                        let remote = api.update_task(&task.id, &patch);
                        optimistic_update(&mut tasks, &task.id, &patch, remote)
                            .await
                            .map(|_| "Task updated")
                    }
                    _ => {
                        let new = form.to_new(&project_id);
                        confirmed_create(&mut tasks, api.create_task(&new))
                            .await
                            .map(|_| "Task created")
                    }
                };
                saving.set(false);
                match result {
                    Ok(title) => {
                        toaster.success(title, form.title.trim());
                        dialog.set(None);
                    }
                    Err(err) => report_api_error(&toaster, &navigator, "Could not save task", &err),
                }
            });
        }
    };

    let on_delete = {
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            spawn(async move {
                match optimistic_delete(&mut tasks, &id, api.delete_task(&id)).await {
                    Ok(_) => toaster.success("Task deleted", ""),
                    Err(err) => report_api_error(&toaster, &navigator, "Could not delete task", &err),
                }
            });
        }
    };

    let state = scope();
    let ScopeState::Ready(project) = state.clone() else {
        return rsx! {
            ScopeNotice { state, noun: "tasks" }
        };
    };

    let assignees: Vec<User> = team.read().roster().into_iter().cloned().collect();
    let board = columns(&tasks.read(), &TaskStatus::ALL, |t| t.status);

    rsx! {
        div { class: "c-page",
            PageHeader { title: project.title.clone(), subtitle: "Tasks".to_string(),
                Button { onclick: move |_| dialog.set(Some(DialogMode::Create)), "New task" }
            }

            div { class: "c-board",
                for (status, members) in board {
                    {
                        let on_drop = on_drop.clone();
                        let on_delete = on_delete.clone();
                        rsx! {
                            BoardColumn {
                                key: "{status.as_str()}",
                                title: status.title(),
                                count: members.len(),
                                dragging,
                                on_drop: move |payload| on_drop((payload, status)),
                                if members.is_empty() {
                                    EmptyState { message: "No tasks" }
                                }
                                for task in members {
                                    TaskCard {
                                        key: "{task.id}",
                                        assignee: task.assignee_id.as_deref().and_then(|id| team.read().find(id).cloned()),
                                        task: task.clone(),
                                        dragging,
                                        on_edit: move |t| dialog.set(Some(DialogMode::Edit(t))),
                                        on_delete: on_delete.clone(),
                                    }
                                }
                            }
                        }
                    }
                }
            }

            {match dialog() {
                Some(DialogMode::Create) => rsx! {
                    TaskDialog {
                        title: "New task",
                        initial: TaskForm::default(),
                        assignees: assignees.clone(),
                        busy: saving(),
                        on_submit: on_submit.clone(),
                        on_cancel: move |_| dialog.set(None),
                    }
                },
                Some(DialogMode::Edit(task)) => rsx! {
                    TaskDialog {
                        key: "{task.id}",
                        title: "Edit task",
                        initial: TaskForm::from_task(&task),
                        assignees: assignees.clone(),
                        busy: saving(),
                        on_submit: on_submit.clone(),
                        on_cancel: move |_| dialog.set(None),
                    }
                },
                None => rsx! {},
            }}
        }
    }
}
