use dioxus::prelude::*;

use crate::app::components::{
    Button, EmptyState, MilestoneCard, MilestoneDialog, MilestoneForm, PageHeader, ScopeNotice,
};
use crate::domain::models::Milestone;
use crate::shared::errors::ApiError;
use crate::shared::hooks::{report_api_error, use_api, use_project_scope, use_toasts};
use crate::shared::state::{confirmed_create, optimistic_delete, optimistic_update, ScopeState};

#[derive(Clone, PartialEq)]
enum DialogMode {
    Create,
    Edit(Milestone),
}

#[component]
pub fn MilestonesPage(project_id: String) -> Element {
    let api = use_api();
    let navigator = use_navigator();
    let toaster = use_toasts();
    let mut milestones = use_signal(Vec::<Milestone>::new);
    let mut dialog = use_signal(|| None::<DialogMode>);
    let mut saving = use_signal(|| false);

    let scope = use_project_scope(
        project_id.clone(),
        |api, project| async move { api.list_milestones(&project.id).await },
        move |loaded: Result<Vec<Milestone>, ApiError>| {
            let mut milestones = milestones;
            match loaded {
                Ok(list) => milestones.set(list),
                Err(err) => {
                    milestones.set(Vec::new());
                    report_api_error(&toaster, &navigator, "Could not load milestones", &err);
                }
            }
        },
    );

    let on_submit = {
        let api = api.clone();
        let project_id = project_id.clone();
        move |form: MilestoneForm| {
            let api = api.clone();
            let project_id = project_id.clone();
            let mode = dialog.peek().clone();
            saving.set(true);
            spawn(async move {
                let result = match mode {
                    Some(DialogMode::Edit(milestone)) => {
                        let patch = form.to_patch(&project_id, &MilestoneForm::from_milestone(&milestone));
                        let remote = api.update_milestone(&milestone.id, &patch);
                        optimistic_update(&mut milestones, &milestone.id, &patch, remote)
                            .await
                            .map(|_| "Milestone updated")
                    }
                    _ => {
                        let new = form.to_new(&project_id);
                        confirmed_create(&mut milestones, api.create_milestone(&new))
                            .await
                            .map(|_| "Milestone created")
                    }
                };
                saving.set(false);
                match result {
                    Ok(title) => {
                        toaster.success(title, form.title.trim());
                        dialog.set(None);
                    }
                    Err(err) => {
                        report_api_error(&toaster, &navigator, "Could not save milestone", &err)
                    }
                }
            });
        }
    };

    let on_delete = move |id: String| {
        let api = api.clone();
        spawn(async move {
            match optimistic_delete(&mut milestones, &id, api.delete_milestone(&id)).await {
                Ok(_) => toaster.success("Milestone deleted", ""),
                Err(err) => report_api_error(&toaster, &navigator, "Could not delete milestone", &err),
            }
        });
    };

    let state = scope();
    let ScopeState::Ready(project) = state.clone() else {
        return rsx! {
            ScopeNotice { state, noun: "milestones" }
        };
    };

    rsx! {
        div { class: "c-page",
            PageHeader { title: project.title.clone(), subtitle: "Milestones".to_string(),
                Button { onclick: move |_| dialog.set(Some(DialogMode::Create)), "New milestone" }
            }

            if milestones.read().is_empty() {
                EmptyState { message: "No milestones yet" }
            }
            div { class: "c-milestones",
                for milestone in milestones.read().iter().cloned() {
                    MilestoneCard {
                        key: "{milestone.id}",
                        milestone,
                        on_edit: move |m| dialog.set(Some(DialogMode::Edit(m))),
                        on_delete: on_delete.clone(),
                    }
                }
            }

            {match dialog() {
                Some(DialogMode::Create) => rsx! {
                    MilestoneDialog {
                        title: "New milestone",
                        initial: MilestoneForm::default(),
                        busy: saving(),
                        on_submit: on_submit.clone(),
                        on_cancel: move |_| dialog.set(None),
                    }
                },
                Some(DialogMode::Edit(milestone)) => rsx! {
                    MilestoneDialog {
                        key: "{milestone.id}",
                        title: "Edit milestone",
                        initial: MilestoneForm::from_milestone(&milestone),
                        show_progress: true,
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
