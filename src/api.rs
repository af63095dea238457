//! High-level programmatic API for the rendering backend.
//!
//! [`RenderdeskClient`] wires the credential store, request gateway, session
//! guard and action runner together, and runs every operation through the
//! runner with its own [`Trigger`], mirroring the CLI handler pattern.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::SecretString;

use crate::action::{ActionOutcome, ActionRunner, Trigger};
use crate::config::{self, Config};
use crate::credentials::CredentialStore;
use crate::error::Result;
use crate::gateway::{ReqwestTransport, RequestGateway, Transport};
use crate::guard::{Access, SessionGuard};
use crate::navigate::{NavigationSlot, Navigator, Page};
use crate::notify::{Notifier, SilentNotifier};
use crate::ops::{self, Decline, Deletion, Prompt, Services};
use crate::types::{ApiKey, Health, IssuedKey, NewTemplate, Template, TemplateChanges, User};

/// User-initiated actions, one trigger each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Register,
    ListTemplates,
    ShowTemplate,
    CreateTemplate,
    UpdateTemplate,
    DeleteTemplate,
    ListApiKeys,
    CreateApiKey,
    DeleteApiKey,
    Render,
    WhoAmI,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::Login,
        Action::Register,
        Action::ListTemplates,
        Action::ShowTemplate,
        Action::CreateTemplate,
        Action::UpdateTemplate,
        Action::DeleteTemplate,
        Action::ListApiKeys,
        Action::CreateApiKey,
        Action::DeleteApiKey,
        Action::Render,
        Action::WhoAmI,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Login => "login",
            Action::Register => "register",
            Action::ListTemplates => "templates.list",
            Action::ShowTemplate => "templates.show",
            Action::CreateTemplate => "templates.create",
            Action::UpdateTemplate => "templates.update",
            Action::DeleteTemplate => "templates.delete",
            Action::ListApiKeys => "keys.list",
            Action::CreateApiKey => "keys.create",
            Action::DeleteApiKey => "keys.delete",
            Action::Render => "render",
            Action::WhoAmI => "whoami",
        }
    }
}

/// Builder for [`RenderdeskClient`]. Every collaborator is replaceable.
pub struct ClientBuilder {
    base_url: String,
    credentials: Option<CredentialStore>,
    transport: Option<Arc<dyn Transport>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    prompt: Option<Arc<dyn Prompt>>,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            transport: None,
            notifier: None,
            navigator: None,
            prompt: None,
        }
    }

    /// Start from a loaded config (base URL).
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub fn credentials(mut self, credentials: CredentialStore) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn prompt(mut self, prompt: Arc<dyn Prompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Defaults: session file in the renderdesk directory, `reqwest`
    /// transport, silent notifier, a [`NavigationSlot`], and a prompt that
    /// declines.
    pub fn build(self) -> RenderdeskClient {
        let credentials = self
            .credentials
            .unwrap_or_else(|| CredentialStore::file(config::session_path()));
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(ReqwestTransport::new()) as Arc<dyn Transport>);
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(SilentNotifier) as Arc<dyn Notifier>);
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(NavigationSlot::new()) as Arc<dyn Navigator>);
        let prompt = self
            .prompt
            .unwrap_or_else(|| Arc::new(Decline) as Arc<dyn Prompt>);

        let gateway = RequestGateway::new(
            transport,
            credentials.clone(),
            navigator.clone(),
            self.base_url,
        );

        RenderdeskClient {
            guard: SessionGuard::new(credentials, navigator.clone()),
            runner: ActionRunner::new(notifier.clone()),
            services: Services {
                gateway,
                notifier,
                navigator,
                prompt,
            },
            triggers: Action::ALL.iter().map(|a| Trigger::new(a.name())).collect(),
        }
    }
}

pub struct RenderdeskClient {
    services: Services,
    runner: ActionRunner,
    guard: SessionGuard,
    triggers: Vec<Trigger>,
}

impl RenderdeskClient {
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.services.credentials()
    }

    pub fn trigger(&self, action: Action) -> &Trigger {
        // `triggers` is built from `Action::ALL`, in declaration order.
        &self.triggers[action as usize]
    }

    /// Page-load check for `page`.
    pub fn enter(&self, page: Page) -> Result<Access> {
        self.guard.check(page)
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> ActionOutcome<()> {
        self.runner
            .run(self.trigger(Action::Login), || {
                ops::auth::login(&self.services, email, password)
            })
            .await
    }

    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        confirmation: &SecretString,
    ) -> ActionOutcome<()> {
        self.runner
            .run(self.trigger(Action::Register), || {
                ops::auth::register(&self.services, email, password, confirmation)
            })
            .await
    }

    pub fn logout(&self) -> Result<()> {
        ops::auth::logout(&self.services)
    }

    pub async fn list_templates(&self) -> ActionOutcome<Vec<Template>> {
        self.runner
            .run(self.trigger(Action::ListTemplates), || {
                ops::templates::list(&self.services)
            })
            .await
    }

    pub async fn show_template(&self, id: &str) -> ActionOutcome<Option<Template>> {
        self.runner
            .run(self.trigger(Action::ShowTemplate), || {
                ops::templates::show(&self.services, id)
            })
            .await
    }

    pub async fn create_template(&self, template: &NewTemplate) -> ActionOutcome<Option<Template>> {
        self.runner
            .run(self.trigger(Action::CreateTemplate), || {
                ops::templates::create(&self.services, template)
            })
            .await
    }

    pub async fn update_template(
        &self,
        id: &str,
        changes: &TemplateChanges,
    ) -> ActionOutcome<Option<Template>> {
        self.runner
            .run(self.trigger(Action::UpdateTemplate), || {
                ops::templates::update(&self.services, id, changes)
            })
            .await
    }

    pub async fn delete_template(&self, id: &str) -> ActionOutcome<Deletion> {
        self.runner
            .run(self.trigger(Action::DeleteTemplate), || {
                ops::templates::delete(&self.services, id)
            })
            .await
    }

    pub async fn list_api_keys(&self) -> ActionOutcome<Vec<ApiKey>> {
        self.runner
            .run(self.trigger(Action::ListApiKeys), || {
                ops::apikeys::list(&self.services)
            })
            .await
    }

    /// Issue an API key. The returned key is shown nowhere else afterwards.
    pub async fn create_api_key(&self, name: &str) -> ActionOutcome<Option<IssuedKey>> {
        self.runner
            .run(self.trigger(Action::CreateApiKey), || {
                ops::apikeys::create(&self.services, name)
            })
            .await
    }

    pub async fn delete_api_key(&self, id: i64) -> ActionOutcome<Deletion> {
        self.runner
            .run(self.trigger(Action::DeleteApiKey), || {
                ops::apikeys::delete(&self.services, id)
            })
            .await
    }

    pub async fn render(
        &self,
        template_id: &str,
        payload: &str,
        destination: &Path,
    ) -> ActionOutcome<Option<PathBuf>> {
        self.runner
            .run(self.trigger(Action::Render), || {
                ops::render::render(&self.services, template_id, payload, destination)
            })
            .await
    }

    pub async fn whoami(&self) -> ActionOutcome<Option<User>> {
        self.runner
            .run(self.trigger(Action::WhoAmI), || {
                ops::account::whoami(&self.services)
            })
            .await
    }

    /// Backend liveness check. Not a user action: it takes no trigger and
    /// reports nothing through the notifier.
    pub async fn health(&self) -> Result<Health> {
        ops::account::health(&self.services).await
    }
}
