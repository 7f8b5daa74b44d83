//! REST client for the MileStack backend.
//!
//! Authenticated calls carry the stored bearer token. List calls without a
//! token return nothing and never touch the network; a 401 on a list call
//! clears the stored session.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::domain::models::{
    Activity, AuthResponse, Credentials, Invite, InviteRequest, Milestone, MilestonePatch,
    NewMilestone, NewProject, NewTask, Project, ProjectPatch, SignupRequest, Task, TaskPatch,
};
use crate::domain::services::{Team, TeammatesResponse};
use crate::infrastructure::storage::SessionStore;
use crate::shared::errors::{ApiError, Result, GENERIC_API_ERROR};
use crate::shared::logging;

use super::transport::{HttpRequest, HttpTransport, Method};

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && Rc::ptr_eq(&self.transport, &other.transport)
    }
}

/// Message carried by a failed response: `error`, else `message`, else the generic text.
pub fn error_message(body: &Value) -> String {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|message| !message.trim().is_empty())
        .unwrap_or(GENERIC_API_ERROR)
        .to_string()
}

fn scoped(path: &str, project_id: &str) -> String {
    format!("{}?projectId={}", path, urlencoding::encode(project_id))
}

fn item(path: &str, id: &str) -> String {
    format!("{}/{}", path, urlencoding::encode(id))
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn HttpTransport>, session: SessionStore) -> Self {
        Self {
            config,
            transport,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        let request = HttpRequest::new(method, self.config.url(path));
        match self.session.token() {
            Some(token) => request.bearer(&token),
            None => request,
        }
    }

    async fn execute(&self, request: HttpRequest) -> Result<Value> {
        let method = request.method;
        let url = request.url.clone();
        logging::log_request(method.as_str(), &url);

        let response = self.transport.send(request).await?;
        // Bodies that are not JSON read as an empty object
        let body: Value = serde_json::from_str(&response.body).unwrap_or_else(|_| Value::Object(Default::default()));

        if response.is_success() {
            return Ok(body);
        }

        let message = error_message(&body);
        logging::log_response_error(method.as_str(), &url, response.status, &message);
        if response.status == 401 {
            Err(ApiError::Unauthorized(message))
        } else {
            Err(ApiError::Rejected {
                status: response.status,
                message,
            })
        }
    }

    /// GET that requires a session; no token means no call.
    async fn fetch_authenticated(&self, path: &str) -> Result<Option<Value>> {
        if self.session.token().is_none() {
            return Ok(None);
        }

        match self.execute(self.request(Method::Get, path)).await {
            Ok(body) => Ok(Some(body)),
            Err(err) => {
                if err.is_session_expired() {
                    self.session.clear();
                }
                Err(err)
            }
        }
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        match self.fetch_authenticated(path).await? {
            Some(body @ Value::Array(_)) => Ok(serde_json::from_value(body)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path).json(serde_json::to_string(body)?);
        let response = self.execute(request).await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.execute(self.request(Method::Delete, path)).await?;
        Ok(())
    }

    // ---- projects ----

    /// Projects the signed-in user belongs to
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.list("/api/projects").await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project> {
        self.send_json(Method::Post, "/api/projects", project).await
    }

    pub async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<Project> {
        self.send_json(Method::Put, &item("/api/projects", id), patch).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.delete(&item("/api/projects", id)).await
    }

    // ---- tasks ----

    pub async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        self.list(&scoped("/api/tasks", project_id)).await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task> {
        self.send_json(Method::Post, "/api/tasks", task).await
    }

    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        self.send_json(Method::Put, &item("/api/tasks", id), patch).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.delete(&item("/api/tasks", id)).await
    }

    // ---- milestones ----

    pub async fn list_milestones(&self, project_id: &str) -> Result<Vec<Milestone>> {
        self.list(&scoped("/api/milestones", project_id)).await
    }

    pub async fn create_milestone(&self, milestone: &NewMilestone) -> Result<Milestone> {
        self.send_json(Method::Post, "/api/milestones", milestone).await
    }

    pub async fn update_milestone(&self, id: &str, patch: &MilestonePatch) -> Result<Milestone> {
        self.send_json(Method::Put, &item("/api/milestones", id), patch).await
    }

    pub async fn delete_milestone(&self, id: &str) -> Result<()> {
        self.delete(&item("/api/milestones", id)).await
    }

    // ---- teammates & invites ----

    /// Accepts both the flat and the `{leader, members}` response.
    pub async fn list_teammates(&self, project_id: &str) -> Result<Team> {
        match self.fetch_authenticated(&scoped("/api/teammates", project_id)).await? {
            Some(body) => {
                let response: TeammatesResponse = serde_json::from_value(body)?;
                Ok(response.into())
            }
            None => Ok(Team::default()),
        }
    }

    pub async fn remove_teammate(&self, user_id: &str, project_id: &str) -> Result<()> {
        self.delete(&scoped(&item("/api/teammates", user_id), project_id)).await
    }

    pub async fn invite_teammate(&self, invite: &InviteRequest) -> Result<Invite> {
        self.send_json(Method::Post, "/api/invites", invite).await
    }

    pub async fn list_invites(&self, project_id: &str) -> Result<Vec<Invite>> {
        self.list(&scoped("/api/invites", project_id)).await
    }

    /// Public lookup used by the signup page, sent without credentials
    pub async fn get_invite(&self, id: &str) -> Result<Invite> {
        let request = HttpRequest::new(Method::Get, self.config.url(&item("/api/invites", id)));
        let body = self.execute(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    // ---- activity ----

    pub async fn list_activities(&self, project_id: &str) -> Result<Vec<Activity>> {
        self.list(&scoped("/api/activities", project_id)).await
    }

    // ---- page loads ----
    // Both fetches run concurrently and settle independently: one failing
    // never discards the other's result.

    pub async fn load_task_board(&self, project_id: &str) -> (Result<Vec<Task>>, Result<Team>) {
        futures::join!(self.list_tasks(project_id), self.list_teammates(project_id))
    }

    pub async fn load_team_page(&self, project_id: &str) -> (Result<Team>, Result<Vec<Invite>>) {
        futures::join!(self.list_teammates(project_id), self.list_invites(project_id))
    }

    pub async fn load_activity_feed(&self, project_id: &str) -> (Result<Vec<Activity>>, Result<Team>) {
        futures::join!(self.list_activities(project_id), self.list_teammates(project_id))
    }

    // ---- auth ----

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let request = HttpRequest::new(Method::Post, self.config.url("/api/auth/login"))
            .json(serde_json::to_string(credentials)?);
        let auth: AuthResponse = serde_json::from_value(self.execute(request).await?)?;
        if auth.has_token() {
            self.session.save(&auth);
        }
        Ok(auth)
    }

    /// Signs in immediately when the backend answers with a token.
    pub async fn signup(&self, signup: &SignupRequest) -> Result<AuthResponse> {
        let request = HttpRequest::new(Method::Post, self.config.url("/api/auth/signup"))
            .json(serde_json::to_string(signup)?);
        let auth: AuthResponse = serde_json::from_value(self.execute(request).await?)?;
        if auth.has_token() {
            self.session.save(&auth);
        }
        Ok(auth)
    }

    pub fn logout(&self) {
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::models::TaskStatus;
    use crate::infrastructure::api::transport::HttpResponse;
    use crate::infrastructure::storage::{KeyValueStore, MemoryStore, TOKEN_KEY, USER_KEY};

    #[derive(Default)]
    struct FakeTransport {
        responses: RefCell<VecDeque<HttpResponse>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl FakeTransport {
        fn respond(&self, status: u16, body: &str) {
            self.responses.borrow_mut().push_back(HttpResponse {
                status,
                body: body.to_string(),
            });
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for FakeTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("no response queued".into()))
        }
    }

    fn client(token: Option<&str>) -> (ApiClient, Rc<FakeTransport>, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::new());
        if let Some(token) = token {
            store.set(TOKEN_KEY, token).unwrap();
            store.set(USER_KEY, r#"{"id":"u1","name":"Ada","email":"ada@example.com"}"#).unwrap();
        }
        let transport = Rc::new(FakeTransport::default());
        let client = ApiClient::new(
            ClientConfig::with_api_base("http://api.test/"),
            transport.clone(),
            SessionStore::new(store.clone()),
        );
        (client, transport, store)
    }

    const TASK_JSON: &str = r#"{"id":"t1","title":"Write docs","status":"in-progress","priority":"high","projectId":"p 1"}"#;

    #[tokio::test]
    async fn test_list_without_token_skips_network() {
        let (client, transport, _) = client(None);

        assert!(client.list_projects().await.unwrap().is_empty());
        assert!(client.list_tasks("p1").await.unwrap().is_empty());
        assert_eq!(client.list_teammates("p1").await.unwrap(), Team::default());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_sends_bearer_and_encodes_query() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(200, &format!("[{}]", TASK_JSON));

        let tasks = client.list_tasks("p 1&x").await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "http://api.test/api/tasks?projectId=p%201%26x");
        assert_eq!(sent.header_value("Authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_task_board_keeps_tasks_when_teammates_fail() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(200, &format!("[{}]", TASK_JSON));
        transport.respond(500, r#"{"error":"teammates down"}"#);

        let (tasks, team) = client.load_task_board("p1").await;

        assert_eq!(tasks.unwrap().len(), 1);
        assert_eq!(team.unwrap_err().to_string(), "teammates down");
        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://api.test/api/tasks?projectId=p1",
                "http://api.test/api/teammates?projectId=p1",
            ]
        );
    }

    #[tokio::test]
    async fn test_activity_feed_keeps_team_when_activities_fail() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(503, r#"{"message":"feed unavailable"}"#);
        transport.respond(200, r#"[{"id":"u1","name":"Ada","email":"ada@example.com"}]"#);

        let (activities, team) = client.load_activity_feed("p1").await;

        assert_eq!(activities.unwrap_err().status(), Some(503));
        assert_eq!(team.unwrap().display_name("u1"), "Ada");
    }

    #[tokio::test]
    async fn test_non_array_list_is_empty() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(200, r#"{"items": []}"#);

        assert!(client.list_milestones("p1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_list_clears_session() {
        let (client, transport, store) = client(Some("expired"));
        transport.respond(401, r#"{"error":"token expired"}"#);

        let err = client.list_projects().await.unwrap_err();

        assert_eq!(err, ApiError::Unauthorized("token expired".into()));
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_error_message_fallbacks() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(400, r#"{"error":"title required","message":"ignored"}"#);
        transport.respond(403, r#"{"message":"not a member"}"#);
        transport.respond(500, "<html>oops</html>");

        let first = client.create_task(&NewTask::new("p1", "")).await.unwrap_err();
        let second = client.delete_task("t1").await.unwrap_err();
        let third = client.delete_project("p1").await.unwrap_err();

        assert_eq!(first.to_string(), "title required");
        assert_eq!(second.status(), Some(403));
        assert_eq!(second.to_string(), "not a member");
        assert_eq!(third.to_string(), GENERIC_API_ERROR);
    }

    #[tokio::test]
    async fn test_update_sends_partial_patch() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(200, TASK_JSON);

        let task = client.update_task("t1", &TaskPatch::status(TaskStatus::InProgress)).await.unwrap();

        assert_eq!(task.id, "t1");
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "http://api.test/api/tasks/t1");
        assert_eq!(sent.body.as_deref(), Some(r#"{"status":"in-progress"}"#));
        assert_eq!(sent.header_value("Content-Type"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_mutation_401_keeps_session() {
        let (client, transport, store) = client(Some("tok"));
        transport.respond(401, r#"{"error":"nope"}"#);

        let err = client.delete_milestone("m1").await.unwrap_err();

        assert!(err.is_session_expired());
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_remove_teammate_path() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(200, r#"{"ok":true}"#);

        client.remove_teammate("u2", "p1").await.unwrap();

        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/api/teammates/u2?projectId=p1"
        );
    }

    #[tokio::test]
    async fn test_teammates_flat_shape() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(
            200,
            r#"[{"id":"u1","name":"Ada","email":"ada@example.com","role":"leader"},
                {"id":"u2","name":"Bob","email":"bob@example.com","role":"member"}]"#,
        );

        let team = client.list_teammates("p1").await.unwrap();

        assert_eq!(team.leader.map(|u| u.id), Some("u1".to_string()));
        assert_eq!(team.members.len(), 1);
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let (client, transport, store) = client(None);
        transport.respond(
            200,
            r#"{"token":"fresh","user":{"id":"u1","name":"Ada","email":"ada@example.com"}}"#,
        );

        let auth = client
            .login(&Credentials {
                email: "ada@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(auth.token, "fresh");
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
        assert_eq!(client.session().user().map(|u| u.name), Some("Ada".to_string()));
        assert_eq!(transport.requests()[0].header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_get_invite_is_unauthenticated() {
        let (client, transport, _) = client(Some("tok"));
        transport.respond(200, r#"{"id":"i1","projectId":"p1","email":"new@example.com"}"#);

        let invite = client.get_invite("i1").await.unwrap();

        assert_eq!(invite.email, "new@example.com");
        assert_eq!(transport.requests()[0].header_value("Authorization"), None);
    }

    #[test]
    fn test_error_message_skips_blank_fields() {
        let body = serde_json::json!({"error": "", "message": "fallback"});
        assert_eq!(error_message(&body), "fallback");
        assert_eq!(error_message(&Value::Null), GENERIC_API_ERROR);
    }
}
