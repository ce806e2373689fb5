//! Users page: table with role names, search by name, create/edit with field errors, delete

use super::{EditorView, PageController};
use crate::api_client::DashboardApi;
use crate::detail::{DetailView, describe_user};
use crate::list::{ListView, Searchable};
use crate::notify::{Notice, Notifier};
use crate::session::{DetailDialog, EditSession, SessionMode};
use delicrem_core::{Error, Result, Role, User, UserDraft, role_name};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};
use validator::Validate;

/// Table row: a user with its role name resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRow {
    /// The account
    pub user: User,
    /// Role name, `Desconocido` when unknown
    pub role: String,
}

impl Searchable for UserRow {
    fn search_key(&self) -> &str {
        &self.user.name
    }
}

/// Snapshot of the users page
#[derive(Debug, Clone, PartialEq)]
pub struct UsersView {
    /// Search box contents
    pub query: String,
    /// Rows on the current page
    pub rows: Vec<UserRow>,
    /// 1-based current page
    pub current_page: usize,
    /// Page numbers to offer
    pub pages: Vec<usize>,
    /// Roles offered by the form
    pub roles: Vec<Role>,
    /// Form dialog, when open
    pub editor: Option<EditorView<UserDraft>>,
    /// Per-field messages from the last rejected submit
    pub form_errors: BTreeMap<String, String>,
    /// Detail dialog, when open
    pub details: Option<DetailView>,
}

impl Default for UsersView {
    fn default() -> Self {
        Self {
            query: String::new(),
            rows: Vec::new(),
            current_page: 1,
            pages: Vec::new(),
            roles: Vec::new(),
            editor: None,
            form_errors: BTreeMap::new(),
            details: None,
        }
    }
}

/// State and actions of the users page
#[derive(Debug)]
pub struct UsersController<A, N> {
    api: A,
    notifier: N,
    users: Vec<User>,
    roles: Vec<Role>,
    list: ListView<UserRow>,
    editor: EditSession<UserDraft>,
    form_errors: BTreeMap<String, String>,
    details: DetailDialog<UserRow>,
}

impl<A: DashboardApi, N: Notifier> UsersController<A, N> {
    /// Empty page showing `page_size` users per page
    pub fn new(api: A, notifier: N, page_size: usize) -> Self {
        Self {
            api,
            notifier,
            users: Vec::new(),
            roles: Vec::new(),
            list: ListView::new(page_size),
            editor: EditSession::new(),
            form_errors: BTreeMap::new(),
            details: DetailDialog::default(),
        }
    }

    /// Fetch users and roles
    pub async fn load(&mut self) {
        self.reload_roles().await;
        self.reload().await;
    }

    /// Refetch every user; on failure the previous list stays
    pub async fn reload(&mut self) {
        match self.api.list_users().await {
            Ok(users) => {
                debug!(count = users.len(), "users loaded");
                self.users = users;
                self.rebuild_rows();
            }
            Err(e) => error!("Error fetching usuarios: {e}"),
        }
    }

    /// Refetch the role catalogue; on failure the previous roles stay
    pub async fn reload_roles(&mut self) {
        match self.api.list_roles().await {
            Ok(roles) => {
                debug!(count = roles.len(), "roles loaded");
                self.roles = roles;
                self.rebuild_rows();
            }
            Err(e) => error!("Error fetching roles: {e}"),
        }
    }

    fn rebuild_rows(&mut self) {
        let rows = self
            .users
            .iter()
            .map(|user| UserRow {
                user: user.clone(),
                role: role_name(&self.roles, user.role_id).to_string(),
            })
            .collect();
        self.list.replace_items(rows);
    }

    /// Loaded list with search and page state
    pub const fn list(&self) -> &ListView<UserRow> {
        &self.list
    }

    /// Role catalogue
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Form dialog state
    pub const fn editor(&self) -> &EditSession<UserDraft> {
        &self.editor
    }

    /// Messages per field from the last rejected submit
    pub const fn form_errors(&self) -> &BTreeMap<String, String> {
        &self.form_errors
    }

    /// Filter by user name
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.list.set_query(query);
    }

    /// Select a page
    pub fn go_to_page(&mut self, page: usize) {
        self.list.go_to_page(page);
    }

    /// Open the form with a blank user
    pub fn open_create(&mut self) {
        self.form_errors.clear();
        self.editor.open_create();
    }

    /// Open the form seeded with `user`, password left blank
    pub fn open_edit(&mut self, user: &User) {
        self.form_errors.clear();
        self.editor.open_edit(UserDraft::from(user));
    }

    /// Close the form, discarding the draft and field errors
    pub fn close_editor(&mut self) {
        self.form_errors.clear();
        self.editor.close();
    }

    /// Draft for direct field edits
    pub const fn draft_mut(&mut self) -> &mut UserDraft {
        self.editor.draft_mut()
    }

    /// Show the detail dialog for `row`
    pub fn view_details(&mut self, row: &UserRow) {
        self.details.open(row.clone());
    }

    /// Hide the detail dialog
    pub fn close_details(&mut self) {
        self.details.close();
    }

    /// Validate and submit the form
    ///
    /// Field errors are kept for the form to display and no request is sent.
    ///
    /// # Errors
    ///
    /// Returns the first validation error or the request error after
    /// notifying the user.
    pub async fn save(&mut self) -> Result<()> {
        if !self.editor.is_open() {
            debug!("user save ignored, dialog already closed");
            return Ok(());
        }
        let payload = self.editor.draft().to_payload();
        if let Err(errors) = payload.validate() {
            self.form_errors = errors
                .field_errors()
                .into_iter()
                .filter_map(|(field, errs)| {
                    let message = errs.first()?.message.as_ref()?.to_string();
                    Some((field.to_string(), message))
                })
                .collect();
            warn!(fields = ?self.form_errors.keys().collect::<Vec<_>>(), "user form rejected");
            self.notifier.notify(Notice::error(
                "Error",
                "Por favor, completa todos los campos correctamente.",
            ));
            let (field, message) = self
                .form_errors
                .iter()
                .next()
                .map(|(field, message)| (field.clone(), message.clone()))
                .unwrap_or_default();
            return Err(Error::validation(field, message));
        }
        self.form_errors.clear();

        let result = match (self.editor.mode(), self.editor.draft().id) {
            (SessionMode::Edit, Some(id)) => self.api.update_user(id, &payload).await.map(|()| {
                Notice::success(
                    "¡Actualizado!",
                    "El usuario ha sido actualizado correctamente.",
                )
            }),
            (SessionMode::Edit, None) => Err(Error::NotFound {
                resource: "usuario sin identificador".to_string(),
            }),
            (SessionMode::Create, _) => self.api.register_user(&payload).await.map(|()| {
                Notice::success("¡Creado!", "El usuario ha sido creado correctamente.")
            }),
        };

        match result {
            Ok(notice) => {
                self.reload().await;
                self.notifier.notify(notice);
                self.editor.close();
                Ok(())
            }
            Err(e) => {
                error!("Error saving usuario: {e}");
                self.notifier.notify(Notice::error(
                    "Error",
                    "Error al guardar usuario. Por favor, inténtalo de nuevo.",
                ));
                Err(e)
            }
        }
    }

    /// Delete `user` after confirmation; `Ok(false)` when the user declines
    ///
    /// # Errors
    ///
    /// Returns the request error after notifying the user.
    pub async fn delete(&mut self, user: &User) -> Result<bool> {
        let Some(id) = user.id else {
            return Err(Error::NotFound {
                resource: "usuario sin identificador".to_string(),
            });
        };
        let question = format!(
            "¿Estás seguro de que deseas eliminar al usuario {}?",
            user.name
        );
        if !self.notifier.confirm("¿Estás seguro?", &question) {
            return Ok(false);
        }

        match self.api.delete_user(id).await {
            Ok(()) => {
                self.reload().await;
                self.notifier.notify(Notice::success(
                    "¡Eliminado!",
                    "El usuario ha sido eliminado.",
                ));
                Ok(true)
            }
            Err(e) => {
                error!("Error deleting usuario: {e}");
                self.notifier.notify(Notice::error(
                    "Error",
                    "Error al eliminar usuario. Por favor, inténtalo de nuevo.",
                ));
                Err(e)
            }
        }
    }
}

impl<A, N> PageController for UsersController<A, N> {
    type View = UsersView;

    fn view(&self) -> Self::View {
        UsersView {
            query: self.list.query().to_string(),
            rows: self.list.visible().to_vec(),
            current_page: self.list.current_page(),
            pages: self.list.page_numbers(),
            roles: self.roles.clone(),
            editor: self.editor.is_open().then(|| EditorView {
                mode: self.editor.mode(),
                draft: self.editor.draft().clone(),
            }),
            form_errors: self.form_errors.clone(),
            details: self
                .details
                .selected()
                .map(|row| describe_user(&row.user, &row.role)),
        }
    }
}
