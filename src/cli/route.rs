//! CLI route: single route table and run context. Dispatches to library services
//! and presentation.

use crate::admin::coerce_string;
use crate::auth::{AuthSession, CredentialStore, FileCredentialStore, MemoryCredentialStore};
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_admin_config, format_list_result, format_login_result, format_whoami,
};
use crate::config::{ConfigLoader, ListkitConfig};
use crate::error::ListkitError;
use crate::guard::{guard, GuardDecision, RouteTable};
use crate::http::ApiClient;
use crate::list::{IncrementalListController, ListOptions, LoadOutcome, SortOrder};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runtime context for CLI execution: loaded config and the auth session.
pub struct RunContext {
    config: ListkitConfig,
    session: AuthSession,
}

impl RunContext {
    /// Load config (explicit file or layered sources) and open the session.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ListkitError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        }
        .validated()?;

        let store: Arc<dyn CredentialStore> = match config
            .auth
            .credentials_file
            .clone()
            .or_else(FileCredentialStore::default_path)
        {
            Some(path) => Arc::new(FileCredentialStore::new(path)),
            None => {
                warn!("No data directory available; credentials will not persist");
                Arc::new(MemoryCredentialStore::new())
            }
        };
        let session = AuthSession::open(store)?;

        Ok(Self { config, session })
    }

    /// Build a context from parts; used by tests.
    pub fn from_parts(config: ListkitConfig, session: AuthSession) -> Self {
        Self { config, session }
    }

    pub fn config(&self) -> &ListkitConfig {
        &self.config
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    fn client(&self) -> Result<ApiClient, ListkitError> {
        let client = ApiClient::from_config(&self.config.api)?;
        Ok(match self.session.access_token() {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    /// Run one command and return its printable output.
    pub async fn execute(&self, command: &Commands) -> Result<String, ListkitError> {
        match command {
            Commands::List {
                resource,
                search,
                sort_by,
                order,
                pages,
                limit,
                format,
            } => {
                self.list(
                    resource,
                    search.as_deref(),
                    sort_by.clone(),
                    *order,
                    *pages,
                    *limit,
                    format,
                )
                .await
            }
            Commands::Login { subject, roles } => {
                let roles = (!roles.is_empty()).then_some(roles.as_slice());
                let response = self.client()?.dev_login(subject.as_deref(), roles).await?;
                let credential = self.session.login(response)?;
                Ok(format_login_result(&credential))
            }
            Commands::Logout => {
                self.session.logout()?;
                Ok("Logged out.".to_string())
            }
            Commands::Whoami => Ok(format_whoami(
                self.session.is_authenticated(),
                self.session.credential().as_ref(),
            )),
            Commands::AdminConfig => self.admin_config().await,
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn list(
        &self,
        resource: &str,
        search: Option<&str>,
        sort_by: Option<String>,
        order: Option<SortOrder>,
        pages: usize,
        limit: Option<u32>,
        format: &str,
    ) -> Result<String, ListkitError> {
        let mut options = ListOptions::from(&self.config.list);
        if let Some(sort_by) = sort_by {
            options.sort_by = sort_by;
        }
        if let Some(order) = order {
            options.order = order;
        }
        if let Some(limit) = limit {
            options.limit = limit;
        }
        if let Some(search) = search {
            options.search = search.to_string();
        }

        let fetcher = self.client()?.resource::<Value>(resource);
        let controller = IncrementalListController::configure(
            fetcher,
            |item: &Value| item.get("id").map(coerce_string).unwrap_or_default(),
            options,
        );

        controller.load_first_page().await?;
        for _ in 1..pages.max(1) {
            match controller.load_more().await? {
                LoadOutcome::Loaded(count) => debug!(count, "Loaded additional page"),
                LoadOutcome::Skipped | LoadOutcome::Discarded => break,
            }
        }

        let items = controller.items();
        info!(resource, count = items.len(), pages = controller.page_count(), "Listed items");
        format_list_result(&items, controller.has_more(), format)
    }

    async fn admin_config(&self) -> Result<String, ListkitError> {
        let table = RouteTable::standard();
        let decision = guard(
            table.resolve("/admin"),
            self.session.is_authenticated(),
            &self.session.role_evaluator(None),
        );
        match decision {
            GuardDecision::Proceed => {}
            GuardDecision::Login { .. } => return Err(ListkitError::NotAuthenticated),
            GuardDecision::Redirect { .. } => {
                return Err(ListkitError::Auth("the admin role is required".to_string()))
            }
        }

        let config = self.client()?.load_config().await?;
        Ok(format_admin_config(&config))
    }
}
