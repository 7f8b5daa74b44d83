use dioxus::prelude::*;

use crate::app::components::{AppSidebar, ToastViewport};
use crate::app::pages::{
    ActivityPage, ChatPage, DashboardPage, LoginPage, MilestonesPage, ProfilePage, ProjectsPage,
    SignupPage, TeammatesPage,
};
use crate::shared::hooks::{use_api, use_app_provider};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // Public pages
    #[layout(AuthLayout)]
    #[route("/login")]
    Login {},
    #[route("/signup?:invite")]
    Signup { invite: String },
    #[end_layout]

    // Signed-in pages share the sidebar shell
    #[layout(AppShell)]
    #[redirect("/", || Route::Projects {})]
    #[route("/projects")]
    Projects {},
    #[route("/dashboard?:project_id")]
    Dashboard { project_id: String },
    #[route("/milestones?:project_id")]
    Milestones { project_id: String },
    #[route("/teammates?:project_id")]
    Teammates { project_id: String },
    #[route("/activity?:project_id")]
    Activity { project_id: String },
    #[route("/chat")]
    Chat {},
    #[route("/profile")]
    Profile {},
}

#[component]
pub fn App() -> Element {
    use_app_provider();

    use_effect(|| {
        tracing::info!("MileStack app initialized");
    });

    rsx! {
        Router::<Route> {}
    }
}

const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

#[component]
fn AuthLayout() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: BUNDLE_CSS }
        div { class: "c-auth",
            Outlet::<Route> {}
        }
        ToastViewport {}
    }
}

/// Sidebar, toasts and the auth guard around every signed-in page
#[component]
fn AppShell() -> Element {
    let api = use_api();
    let navigator = use_navigator();
    let signed_in = api.session().is_authenticated();

    use_effect(move || {
        if !signed_in {
            tracing::info!("No session token, redirecting to login");
            navigator.replace(Route::Login {});
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: BUNDLE_CSS }
        div { class: "c-layout",
            AppSidebar {}
            main { class: "c-layout__main",
                if signed_in {
                    Outlet::<Route> {}
                }
            }
        }
        ToastViewport {}
    }
}

// Route components; each forwards to its page

#[component]
fn Login() -> Element {
    rsx! { LoginPage {} }
}

#[component]
fn Signup(invite: String) -> Element {
    rsx! { SignupPage { invite } }
}

#[component]
fn Projects() -> Element {
    rsx! { ProjectsPage {} }
}

#[component]
fn Dashboard(project_id: String) -> Element {
    rsx! { DashboardPage { project_id } }
}

#[component]
fn Milestones(project_id: String) -> Element {
    rsx! { MilestonesPage { project_id } }
}

#[component]
fn Teammates(project_id: String) -> Element {
    rsx! { TeammatesPage { project_id } }
}

#[component]
fn Activity(project_id: String) -> Element {
    rsx! { ActivityPage { project_id } }
}

#[component]
fn Chat() -> Element {
    rsx! { ChatPage {} }
}

#[component]
fn Profile() -> Element {
    rsx! { ProfilePage {} }
}
