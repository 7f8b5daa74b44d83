use dioxus::prelude::*;

use crate::app::components::{
    Button, BoardColumn, EmptyState, ErrorMessage, LoadingText, PageHeader, ProjectCard, ProjectDialog,
    ProjectForm,
};
use crate::app::routes::Route;
use crate::domain::models::{Project, ProjectPatch, ProjectStatus, TaskStatus};
use crate::shared::hooks::{report_api_error, use_api, use_app, use_toasts};
use crate::shared::state::{
    columns, confirmed_create, optimistic_delete, optimistic_update, reclassify, DragPayload,
    DropOutcome,
};

#[derive(Clone, PartialEq)]
enum DialogMode {
    Create,
    Edit(Project),
}

/// Project board: one column per status, drag a card to change it.
#[component]
pub fn ProjectsPage() -> Element {
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toasts();
    let mut projects = use_app().projects;
    let mut loading = use_signal(|| true);
    let mut load_error = use_signal(|| None::<String>);
    let dragging = use_signal(DragPayload::empty);
    let mut dialog = use_signal(|| None::<DialogMode>);
    let mut saving = use_signal(|| false);

    {
        let api = api.clone();
        use_effect(move || {
            let api = api.clone();
            spawn(async move {
                match api.list_projects().await {
                    Ok(list) => projects.set(list),
                    Err(e) if e.is_session_expired() => {
                        navigator.replace(Route::Login {});
                    }
                    Err(e) => load_error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        });
    }

    let on_drop = {
        let api = api.clone();
        move |(payload, column): (DragPayload, TaskStatus)| {
            let api = api.clone();
            let status = ProjectStatus::from_column(column);
            spawn(async move {
                let outcome = reclassify(&mut projects, &payload, status, |id, status| {
                    let api = api.clone();
                    async move { api.update_project(&id, &ProjectPatch::status(status)).await }
                })
                .await;
                if let DropOutcome::Reverted(err) = outcome {
                    report_api_error(&toaster, &navigator, "Could not move project", &err);
                }
            });
        }
    };

    let on_submit = {
        let api = api.clone();
        move |form: ProjectForm| {
            let api = api.clone();
            let mode = dialog.peek().clone();
            saving.set(true);
            spawn(async move {
                let result = match mode {
                    Some(DialogMode::Edit(project)) => {
                        let patch = form.to_patch(&ProjectForm::from_project(&project));
                        let remote = api.update_project(&project.id, &patch);
                        optimistic_update(&mut projects, &project.id, &patch, remote)
                            .await
                            .map(|_| "Project updated")
                    }
                    _ => {
                        let new = form.to_new();
                        confirmed_create(&mut projects, api.create_project(&new))
                            .await
                            .map(|_| "Project created")
                    }
                };
                saving.set(false);
                match result {
                    Ok(title) => {
                        toaster.success(title, form.title.trim());
                        dialog.set(None);
                    }
                    Err(err) => report_api_error(&toaster, &navigator, "Could not save project", &err),
                }
            });
        }
    };

    let on_delete = {
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            spawn(async move {
                match optimistic_delete(&mut projects, &id, api.delete_project(&id)).await {
                    Ok(_) => toaster.success("Project deleted", ""),
                    Err(err) => report_api_error(&toaster, &navigator, "Could not delete project", &err),
                }
            });
        }
    };

    let board = columns(&projects.read(), &TaskStatus::ALL, |p| p.status.column());

    rsx! {
        div { class: "c-page",
            PageHeader { title: "Projects", subtitle: "Drag a project to change its status".to_string(),
                Button { onclick: move |_| dialog.set(Some(DialogMode::Create)), "New project" }
            }

            if loading() {
                LoadingText { message: "Loading projects..." }
            } else if let Some(message) = load_error() {
                ErrorMessage { message }
            } else {
                div { class: "c-board",
                    for (column, members) in board {
                        {
                            let status = ProjectStatus::from_column(column);
                            let on_drop = on_drop.clone();
                            let on_delete = on_delete.clone();
                            rsx! {
                                BoardColumn {
                                    key: "{column.as_str()}",
                                    title: status.column_title(),
                                    count: members.len(),
                                    dragging,
                                    on_drop: move |payload| on_drop((payload, column)),
                                    if members.is_empty() {
                                        EmptyState { message: "Nothing here" }
                                    }
                                    for project in members {
                                        ProjectCard {
                                            key: "{project.id}",
                                            project: project.clone(),
                                            dragging,
                                            on_edit: move |p| dialog.set(Some(DialogMode::Edit(p))),
                                            on_delete: on_delete.clone(),
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            {match dialog() {
                Some(DialogMode::Create) => rsx! {
                    ProjectDialog {
                        title: "New project",
                        initial: ProjectForm::default(),
                        busy: saving(),
                        on_submit: on_submit.clone(),
                        on_cancel: move |_| dialog.set(None),
                    }
                },
                Some(DialogMode::Edit(project)) => rsx! {
                    ProjectDialog {
                        key: "{project.id}",
                        title: "Edit project",
                        initial: ProjectForm::from_project(&project),
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
