//! Create/edit dialogs. A dialog only collects input; the page decides
//! when it closes, which is after the server confirmed the change.

use dioxus::prelude::*;

use crate::domain::models::milestone::clamp_progress;
use crate::domain::models::{
    Milestone, MilestonePatch, NewMilestone, NewProject, NewTask, Project, ProjectPatch, Task,
    TaskPatch, TaskPriority, User,
};

use super::button::{Button, ButtonVariant};

/// The edited value, or `None` when it matches what the dialog opened with.
fn changed<T: PartialEq>(now: T, before: T) -> Option<T> {
    (now != before).then_some(now)
}

fn trimmed_change(now: &str, before: &str) -> Option<String> {
    changed(now.trim(), before.trim()).map(str::to_string)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required");
        }
        Ok(())
    }

    pub fn to_new(&self) -> NewProject {
        NewProject::new(self.title.trim()).with_description(self.description.trim())
    }

    /// Only the fields that differ from `initial`.
    pub fn to_patch(&self, initial: &ProjectForm) -> ProjectPatch {
        ProjectPatch {
            title: trimmed_change(&self.title, &initial.title),
            description: trimmed_change(&self.description, &initial.description),
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    /// Empty for unassigned
    pub assignee_id: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            assignee_id: task.assignee_id.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required");
        }
        Ok(())
    }

    fn assignee(&self) -> Option<String> {
        Some(self.assignee_id.trim().to_string()).filter(|id| !id.is_empty())
    }

    pub fn to_new(&self, project_id: &str) -> NewTask {
        let description = self.description.trim();
        NewTask {
            description: Some(description.to_string()).filter(|d| !d.is_empty()),
            priority: self.priority,
            assignee_id: self.assignee(),
            ..NewTask::new(project_id, self.title.trim())
        }
    }

    /// Only the fields that differ from `initial`; status moves by drag only.
    pub fn to_patch(&self, initial: &TaskForm) -> TaskPatch {
        TaskPatch {
            title: trimmed_change(&self.title, &initial.title),
            description: trimmed_change(&self.description, &initial.description),
            priority: changed(self.priority, initial.priority),
            assignee_id: changed(self.assignee(), initial.assignee()),
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilestoneForm {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` from the date input
    pub due_date: String,
    pub progress: u8,
}

impl MilestoneForm {
    pub fn from_milestone(milestone: &Milestone) -> Self {
        Self {
            title: milestone.title.clone(),
            description: milestone.description.clone(),
            due_date: milestone.due_date.clone(),
            progress: milestone.progress,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required");
        }
        if chrono::NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d").is_err() {
            return Err("Pick a due date");
        }
        Ok(())
    }

    pub fn to_new(&self, project_id: &str) -> NewMilestone {
        NewMilestone {
            description: self.description.trim().to_string(),
            ..NewMilestone::new(project_id, self.title.trim(), self.due_date.trim())
        }
    }

    /// Changed fields plus the owning project, which the backend always expects.
    pub fn to_patch(&self, project_id: &str, initial: &MilestoneForm) -> MilestonePatch {
        let mut patch = MilestonePatch {
            title: trimmed_change(&self.title, &initial.title),
            description: trimmed_change(&self.description, &initial.description),
            due_date: trimmed_change(&self.due_date, &initial.due_date),
            ..MilestonePatch::for_project(project_id)
        };
        if self.progress != initial.progress {
            patch = patch.with_progress(f64::from(self.progress));
        }
        patch
    }
}

#[component]
fn DialogFrame(title: String, on_cancel: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "c-dialog__backdrop",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "c-dialog",
                role: "dialog",
                onclick: move |evt| evt.stop_propagation(),
                h2 { class: "c-dialog__title", "{title}" }
                {children}
            }
        }
    }
}

#[component]
fn DialogFooter(busy: bool, submit_label: String, on_cancel: EventHandler<()>) -> Element {
    rsx! {
        div { class: "c-dialog__footer",
            Button {
                variant: ButtonVariant::Secondary,
                onclick: move |_| on_cancel.call(()),
                "Cancel"
            }
            button {
                class: "c-button c-button--primary",
                r#type: "submit",
                disabled: busy,
                if busy { "Saving..." } else { "{submit_label}" }
            }
        }
    }
}

#[component]
pub fn ProjectDialog(
    title: String,
    initial: ProjectForm,
    busy: bool,
    on_submit: EventHandler<ProjectForm>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| initial.clone());
    let mut error = use_signal(|| None::<&'static str>);

    rsx! {
        DialogFrame { title, on_cancel,
            form {
                onsubmit: move |evt| {
                    evt.prevent_default();
                    let current = form.read().clone();
                    match current.validate() {
                        Ok(()) => {
                            error.set(None);
                            on_submit.call(current);
                        }
                        Err(message) => error.set(Some(message)),
                    }
                },
                label { class: "c-field",
                    "Title"
                    input {
                        value: "{form.read().title}",
                        oninput: move |evt| form.write().title = evt.value(),
                    }
                }
                label { class: "c-field",
                    "Description"
                    textarea {
                        value: "{form.read().description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }
                }
                if let Some(message) = error() {
                    p { class: "c-field__error", "{message}" }
                }
                DialogFooter { busy, submit_label: "Save", on_cancel }
            }
        }
    }
}

#[component]
pub fn TaskDialog(
    title: String,
    initial: TaskForm,
    assignees: Vec<User>,
    busy: bool,
    on_submit: EventHandler<TaskForm>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| initial.clone());
    let mut error = use_signal(|| None::<&'static str>);
    let priority = form.read().priority;
    let assignee_id = form.read().assignee_id.clone();

    rsx! {
        DialogFrame { title, on_cancel,
            form {
                onsubmit: move |evt| {
                    evt.prevent_default();
                    let current = form.read().clone();
                    match current.validate() {
                        Ok(()) => {
                            error.set(None);
                            on_submit.call(current);
                        }
                        Err(message) => error.set(Some(message)),
                    }
                },
                label { class: "c-field",
                    "Title"
                    input {
                        value: "{form.read().title}",
                        oninput: move |evt| form.write().title = evt.value(),
                    }
                }
                label { class: "c-field",
                    "Description"
                    textarea {
                        value: "{form.read().description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }
                }
                label { class: "c-field",
                    "Priority"
                    select {
                        onchange: move |evt| {
                            if let Ok(priority) = evt.value().parse::<TaskPriority>() {
                                form.write().priority = priority;
                            }
                        },
                        for option_priority in TaskPriority::ALL {
                            option {
                                value: option_priority.as_str(),
                                selected: option_priority == priority,
                                "{option_priority.as_str()}"
                            }
                        }
                    }
                }
                label { class: "c-field",
                    "Assignee"
                    select {
                        onchange: move |evt| form.write().assignee_id = evt.value(),
                        option { value: "", selected: assignee_id.is_empty(), "Unassigned" }
                        for user in assignees {
                            option {
                                key: "{user.id}",
                                value: "{user.id}",
                                selected: user.id == assignee_id,
                                "{user.name}"
                            }
                        }
                    }
                }
                if let Some(message) = error() {
                    p { class: "c-field__error", "{message}" }
                }
                DialogFooter { busy, submit_label: "Save", on_cancel }
            }
        }
    }
}

#[component]
pub fn MilestoneDialog(
    title: String,
    initial: MilestoneForm,
    #[props(default = false)]
    show_progress: bool,
    busy: bool,
    on_submit: EventHandler<MilestoneForm>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| initial.clone());
    let mut error = use_signal(|| None::<&'static str>);

    rsx! {
        DialogFrame { title, on_cancel,
            form {
                onsubmit: move |evt| {
                    evt.prevent_default();
                    let current = form.read().clone();
                    match current.validate() {
                        Ok(()) => {
                            error.set(None);
                            on_submit.call(current);
                        }
                        Err(message) => error.set(Some(message)),
                    }
                },
                label { class: "c-field",
                    "Title"
                    input {
                        value: "{form.read().title}",
                        oninput: move |evt| form.write().title = evt.value(),
                    }
                }
                label { class: "c-field",
                    "Description"
                    textarea {
                        value: "{form.read().description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }
                }
                label { class: "c-field",
                    "Due date"
                    input {
                        r#type: "date",
                        value: "{form.read().due_date}",
                        oninput: move |evt| form.write().due_date = evt.value(),
                    }
                }
                if show_progress {
                    label { class: "c-field",
                        "Progress ({form.read().progress}%)"
                        input {
                            r#type: "range",
                            min: "0",
                            max: "100",
                            value: "{form.read().progress}",
                            oninput: move |evt| {
                                if let Ok(value) = evt.value().parse::<f64>() {
                                    form.write().progress = clamp_progress(value);
                                }
                            },
                        }
                    }
                }
                if let Some(message) = error() {
                    p { class: "c-field__error", "{message}" }
                }
                DialogFooter { busy, submit_label: "Save", on_cancel }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ProjectStatus, TaskStatus};

    #[test]
    fn test_project_form_requires_title() {
        assert_eq!(ProjectForm::default().validate(), Err("Title is required"));

        let form = ProjectForm {
            title: "  Launch ".into(),
            description: "   ".into(),
        };
        let new = form.to_new();
        assert_eq!(new.title, "Launch");
        assert_eq!(new.description, None);
        assert_eq!(new.status, ProjectStatus::Running);
    }

    #[test]
    fn test_task_form_builds_new_task() {
        let form = TaskForm {
            title: "Write docs".into(),
            description: String::new(),
            priority: TaskPriority::High,
            assignee_id: "u2".into(),
        };

        let new = form.to_new("p1");

        assert_eq!(new.project_id, "p1");
        assert_eq!(new.status, TaskStatus::Todo);
        assert_eq!(new.priority, TaskPriority::High);
        assert_eq!(new.assignee_id.as_deref(), Some("u2"));
        assert_eq!(new.description, None);
    }

    fn docs_task() -> TaskForm {
        TaskForm {
            title: "Docs".into(),
            description: "Write the guide".into(),
            priority: TaskPriority::Medium,
            assignee_id: "u2".into(),
        }
    }

    #[test]
    fn test_task_patch_sends_only_changes() {
        let initial = docs_task();
        let edited = TaskForm {
            priority: TaskPriority::High,
            title: " Docs ".into(),
            ..initial.clone()
        };

        let patch = edited.to_patch(&initial);

        assert_eq!(patch.priority, Some(TaskPriority::High));
        assert_eq!(patch.title, None);
        assert_eq!(patch.description, None);
        assert_eq!(patch.assignee_id, None);
        assert_eq!(patch.status, None);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "priority": "high" }));
    }

    #[test]
    fn test_task_patch_unassigns() {
        let initial = docs_task();
        let edited = TaskForm {
            assignee_id: String::new(),
            ..initial.clone()
        };

        let patch = edited.to_patch(&initial);

        assert_eq!(patch.assignee_id, Some(None));
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "assigneeId": null }));

        let mut task = crate::domain::models::Task {
            id: "t1".into(),
            title: "Docs".into(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignee_id: Some("u2".into()),
            project_id: "p1".into(),
        };
        crate::domain::models::Patch::apply_to(&patch, &mut task);
        assert_eq!(task.assignee_id, None);
    }

    #[test]
    fn test_project_patch_unchanged_is_empty() {
        let initial = ProjectForm {
            title: "Launch".into(),
            description: "Site".into(),
        };
        assert_eq!(initial.to_patch(&initial), ProjectPatch::default());
    }

    #[test]
    fn test_milestone_form_validation() {
        let mut form = MilestoneForm {
            title: "Beta".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err("Pick a due date"));

        form.due_date = "2024-06-01".into();
        assert_eq!(form.validate(), Ok(()));

        let new = form.to_new("p1");
        assert_eq!(new.status, "pending");
        assert_eq!(new.due_date, "2024-06-01");
    }

    #[test]
    fn test_milestone_patch_carries_project() {
        let form = MilestoneForm {
            title: "Beta".into(),
            description: String::new(),
            due_date: "2024-06-01".into(),
            progress: 40,
        };

        let initial = MilestoneForm {
            progress: 10,
            ..form.clone()
        };

        let patch = form.to_patch("p1", &initial);

        assert_eq!(patch.project_id.as_deref(), Some("p1"));
        assert_eq!(patch.progress, Some(40));
        assert_eq!(patch.title, None);
        assert_eq!(patch.due_date, None);
    }
}
