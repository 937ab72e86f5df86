pub(crate) mod auth;
pub(crate) mod editor;

pub(crate) use auth::{login_error_message, register_error_message};
pub(crate) use editor::EditorState;

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::{FileUpload, JournalEntry, Media, MediaKind, NewJournal, PersonalInfo};
use editor::{remove_from_list, replace_in_list};
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum ProfileTab {
    #[default]
    HistoryFootprints,
    Journals,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Info,
    Error,
}

/// One-line feedback shown by the layout until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Global journal store.
///
/// Every action makes one backend call and copies the response into a
/// signal. Concurrent calls are not coordinated: whichever response lands
/// last wins.
#[derive(Clone, Copy)]
pub(crate) struct JournalStore {
    pub api_client: RwSignal<ApiClient>,

    /// Loaded from backend.
    pub journals: RwSignal<Vec<JournalEntry>>,

    /// Entry being edited and its last loaded/saved snapshot.
    pub editor: RwSignal<EditorState>,

    /// Image-text layout in the editor.
    pub graphic_mode: RwSignal<bool>,

    pub personal_info: RwSignal<PersonalInfo>,
    pub logged_in: RwSignal<bool>,

    /// Global UI state.
    pub edit_modal_open: RwSignal<bool>,
    pub auth_modal_open: RwSignal<bool>,
    pub current_tab: RwSignal<ProfileTab>,
    pub notice: RwSignal<Option<Notice>>,
}

impl JournalStore {
    pub fn new() -> Self {
        Self::with_client(ApiClient::load_from_storage())
    }

    pub fn with_client(client: ApiClient) -> Self {
        let logged_in = client.is_authenticated();

        Self {
            api_client: RwSignal::new(client),
            journals: RwSignal::new(vec![]),
            editor: RwSignal::new(EditorState::default()),
            graphic_mode: RwSignal::new(false),
            personal_info: RwSignal::new(PersonalInfo::default()),
            logged_in: RwSignal::new(logged_in),
            edit_modal_open: RwSignal::new(false),
            auth_modal_open: RwSignal::new(false),
            current_tab: RwSignal::new(ProfileTab::default()),
            notice: RwSignal::new(None),
        }
    }

    fn client(&self) -> ApiClient {
        self.api_client.get_untracked()
    }

    pub(crate) fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        self.notice.set(Some(Notice {
            kind,
            message: message.into(),
        }));
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.editor.with(|e| e.has_unsaved_changes())
    }

    pub fn is_current_journal_empty(&self) -> bool {
        self.editor.with(|e| e.is_empty())
    }

    pub async fn fetch_journals(self) {
        match self.client().list_journals().await {
            Ok(list) => {
                log::debug!("loaded {} journals", list.len());
                self.journals.set(list);
            }
            Err(e) => log::error!("failed to load journals: {e}"),
        }
    }

    pub async fn create_journal(self) {
        let created = match self.client().create_journal(&NewJournal::default()).await {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("failed to create journal: {e}");
                return;
            }
        };

        let id = created.id;
        self.journals.update(|list| list.push(created));
        match id {
            Some(id) => self.select_journal(id).await,
            None => log::warn!("created journal came back without an id"),
        }
    }

    pub async fn save_current_journal(self) {
        let current = self.editor.with_untracked(|e| e.current.clone());
        log::debug!("saving journal {:?}", current.id);

        let Some(id) = current.id else {
            self.create_journal().await;
            return;
        };

        match self.client().update_journal(id, &current).await {
            Ok(saved) => {
                self.journals.update(|list| replace_in_list(list, &saved));
                self.editor.update(|e| e.load(saved));
                self.fetch_journals().await;
            }
            Err(e) => log::error!("failed to save journal {id}: {e}"),
        }
    }

    pub async fn select_journal(self, id: i64) {
        match self.client().get_journal(id).await {
            Ok(entry) => self.editor.update(|e| e.load(entry)),
            Err(e) => log::error!("failed to load journal {id}: {e}"),
        }
    }

    pub fn reset_current_journal(&self) {
        self.editor.update(|e| e.reset());
    }

    pub fn set_graphic_mode(&self, value: bool) {
        self.graphic_mode.set(value);
    }

    /// Attach a file to the open entry. Errors go back to the caller.
    pub async fn upload_media(self, upload: FileUpload, kind: MediaKind) -> ApiResult<Media> {
        let result = match self.editor.with_untracked(|e| e.current_id()) {
            Some(id) => self.client().upload_media(id, upload, kind).await,
            None => Err(ApiError::request("Save the journal before attaching media.")),
        };

        match result {
            Ok(media) => {
                self.editor.update(|e| e.attach_media(media.clone()));
                Ok(media)
            }
            Err(e) => {
                log::error!("failed to upload media: {e}");
                Err(e)
            }
        }
    }

    pub async fn delete_journals(self, ids: Vec<i64>) {
        if let Err(e) = self.client().delete_journals(&ids).await {
            log::error!("failed to delete journals {ids:?}: {e}");
            return;
        }

        self.journals.update(|list| remove_from_list(list, &ids));
        let open_deleted = self
            .editor
            .with_untracked(|e| e.current_id().is_some_and(|id| ids.contains(&id)));
        if open_deleted {
            self.editor.set(EditorState::default());
        }
    }

    /// Pick up a persisted session, if any.
    pub fn initialize(&self) {
        if !self.client().is_authenticated() {
            return;
        }
        self.logged_in.set(true);
        let store = *self;
        leptos::task::spawn_local(async move {
            store.fetch_personal_info().await;
        });
    }

    fn start_session(&self, token: String) {
        let mut client = self.client();
        client.set_token(token);
        client.save_to_storage();
        self.api_client.set(client);
        self.logged_in.set(true);
    }

    pub async fn login(self, username: String, password: String) -> Result<(), String> {
        log::debug!("login request for {username}");
        match self.client().login(&username, &password).await {
            Ok(res) => {
                self.start_session(res.token);
                self.fetch_personal_info().await;
                Ok(())
            }
            Err(e) => {
                log::error!("login failed: {e}");
                Err(login_error_message(&e).to_string())
            }
        }
    }

    pub async fn register(
        self,
        username: String,
        nickname: String,
        password: String,
    ) -> Result<(), String> {
        log::debug!("register request for {username} ({nickname})");
        match self.client().register(&username, &nickname, &password).await {
            Ok(res) => {
                self.start_session(res.token);
                self.fetch_personal_info().await;
                Ok(())
            }
            Err(e) => {
                log::error!("register failed: {e}");
                Err(register_error_message(&e).to_string())
            }
        }
    }

    pub fn logout(&self) {
        self.api_client.update(|c| c.logout());
        self.logged_in.set(false);
        self.personal_info.set(PersonalInfo::default());
        self.notify(NoticeKind::Info, "Logged out.");
    }

    pub async fn fetch_personal_info(self) {
        match self.client().get_personal_info().await {
            Ok(info) => self.personal_info.set(info),
            Err(e) => {
                log::error!("failed to load personal info: {e}");
                if e.is_auth_failure() {
                    self.logout();
                }
            }
        }
    }

    pub async fn save_personal_info(self) {
        let info = self.personal_info.get_untracked();
        match self.client().update_personal_info(&info).await {
            Ok(saved) => {
                self.personal_info.set(saved);
                self.notify(NoticeKind::Info, "Personal info saved.");
            }
            Err(e) => {
                log::error!("failed to save personal info: {e}");
                self.notify(
                    NoticeKind::Error,
                    "Failed to save personal info. Please try again.",
                );
            }
        }
    }

    pub async fn upload_avatar(self, upload: FileUpload) {
        match self.client().upload_avatar(upload).await {
            Ok(url) => {
                self.personal_info.update(|p| p.avatar_url = url);
                self.notify(NoticeKind::Info, "Avatar uploaded.");
            }
            Err(e) => {
                log::error!("failed to upload avatar: {e}");
                self.notify(NoticeKind::Error, "Failed to upload avatar. Please try again.");
            }
        }
    }

    pub fn open_auth_modal(&self) {
        self.auth_modal_open.set(true);
    }

    pub fn close_auth_modal(&self) {
        self.auth_modal_open.set(false);
    }

    pub fn set_edit_modal_open(&self, open: bool) {
        self.edit_modal_open.set(open);
    }

    pub fn set_current_tab(&self, tab: ProfileTab) {
        self.current_tab.set(tab);
    }

    /// Fetch what the selected profile tab lists. Only the journals tab
    /// needs backend data.
    pub async fn load_current_tab(self) {
        if self.current_tab.get_untracked() == ProfileTab::Journals
            && self.logged_in.get_untracked()
        {
            self.fetch_journals().await;
        }
    }
}

impl Default for JournalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub JournalStore);
