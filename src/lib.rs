mod api;
mod app;
mod components;
mod models;
mod pages;
mod state;
mod storage;
mod util;

pub use app::App;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    mount_to_body(App);
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        ApiClient, ApiError, ApiErrorKind, LoginRequest, RegisterRequest, TokenResponse,
    };
    use crate::models::{
        JournalEntry, Media, MediaKind, NewJournal, PersonalInfo, NEW_JOURNAL_TITLE,
        UNTITLED_TITLE,
    };
    use crate::state::auth::{
        ACCOUNT_MISSING, LOGIN_FAILED, NICKNAME_TAKEN, REGISTER_BAD_REQUEST, REGISTER_FAILED,
        USERNAME_TAKEN,
    };
    use crate::state::editor::{remove_from_list, replace_in_list};
    use crate::state::{
        login_error_message, register_error_message, EditorState, JournalStore, Notice,
        NoticeKind, ProfileTab,
    };
    use std::time::Duration;

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("http://localhost:8080/api".to_string());
        assert_eq!(client.base_url, "http://localhost:8080/api");
        assert!(client.token.is_none());
        assert_eq!(client.timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_api_client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/".to_string());
        assert_eq!(client.url("/travel-journals"), "http://localhost:8080/api/travel-journals");
    }

    #[test]
    fn test_journal_path() {
        assert_eq!(ApiClient::journal_path(42), "/travel-journals/42");
    }

    #[test]
    fn test_api_client_get_auth_header_without_token() {
        let client = ApiClient::new("http://localhost:8080/api".to_string());
        assert!(client.get_auth_header().is_none());
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_api_client_get_auth_header_with_token() {
        let mut client = ApiClient::new("http://localhost:8080/api".to_string());
        client.set_token("my-jwt-token".to_string());
        let header = client.get_auth_header().expect("Should have auth header");
        assert_eq!(header, "Bearer my-jwt-token");
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_login_request_serialization() {
        let v = serde_json::to_value(LoginRequest {
            username: "ann".to_string(),
            password: "pw".to_string(),
        })
        .expect("should serialize");
        assert_eq!(v, serde_json::json!({"username": "ann", "password": "pw"}));
    }

    #[test]
    fn test_register_request_serialization() {
        let v = serde_json::to_value(RegisterRequest {
            username: "ann".to_string(),
            nickname: "Annie".to_string(),
            password: "pw".to_string(),
        })
        .expect("should serialize");
        assert_eq!(v["nickname"], "Annie");
    }

    #[test]
    fn test_token_response_contract_deserialize() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"token": "jwt-token"}"#).expect("token response should parse");
        assert_eq!(parsed.token, "jwt-token");
    }

    #[test]
    fn test_parse_avatar_url_plain_and_quoted() {
        assert_eq!(ApiClient::parse_avatar_url("/avatars/1.png\n"), "/avatars/1.png");
        assert_eq!(ApiClient::parse_avatar_url("\"/avatars/1.png\""), "/avatars/1.png");
    }

    #[test]
    fn test_http_error_keeps_status_and_body() {
        let e = ApiError::http(400, "Username already exists".to_string(), "Register failed");
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.status, Some(400));
        assert_eq!(e.body, "Username already exists");
        assert_eq!(e.to_string(), "Register failed (400): Username already exists");
    }

    #[test]
    fn test_auth_failure_detection() {
        assert!(ApiError::unauthorized(String::new()).is_auth_failure());
        assert!(ApiError::http(403, String::new(), "x").is_auth_failure());
        assert!(!ApiError::http(500, String::new(), "x").is_auth_failure());
        assert!(!ApiError::request("no id").is_auth_failure());
    }

    #[test]
    fn test_journal_entry_deserialize_camel_case() {
        let json = r#"{
            "id": 7,
            "title": "Kyoto",
            "content": "Temples all day.",
            "mediaList": [{"id": 1, "url": "/media/1.jpg", "type": "image", "journalId": 7}],
            "updatedAt": "2024-05-01T10:00:00"
        }"#;
        let entry: JournalEntry = serde_json::from_str(json).expect("entry should parse");
        assert_eq!(entry.id, Some(7));
        assert_eq!(entry.media_list.len(), 1);
        assert_eq!(entry.media_list[0].kind, "image");
        assert_eq!(entry.updated_at.as_deref(), Some("2024-05-01T10:00:00"));
    }

    #[test]
    fn test_media_keeps_unknown_fields() {
        let json = r#"{"id": 1, "url": "/m.png", "type": "image", "journalId": 7}"#;
        let media: Media = serde_json::from_str(json).expect("media should parse");
        let v = serde_json::to_value(&media).expect("should serialize");
        assert_eq!(v["journalId"], 7);
        assert_eq!(v["type"], "image");
    }

    #[test]
    fn test_journal_entry_null_fields() {
        let json = r#"{"id": 3, "title": null, "content": null, "mediaList": null, "updatedAt": null}"#;
        let entry: JournalEntry = serde_json::from_str(json).expect("nulls should parse");
        assert_eq!(entry.title, "");
        assert!(entry.media_list.is_empty());
    }

    #[test]
    fn test_new_journal_body() {
        let v = serde_json::to_value(NewJournal::default()).expect("should serialize");
        assert_eq!(
            v,
            serde_json::json!({"title": NEW_JOURNAL_TITLE, "content": "", "mediaList": []})
        );
    }

    #[test]
    fn test_personal_info_tolerates_nulls() {
        let json = r#"{
            "id": 1,
            "avatarUrl": null,
            "nickname": "wanderer",
            "signature": null,
            "birthday": "1995-02-03",
            "gender": null,
            "postCount": 4,
            "likeCount": null,
            "commentCount": 2,
            "travelCheckInCount": 9
        }"#;
        let info: PersonalInfo = serde_json::from_str(json).expect("personal info should parse");
        assert_eq!(info.nickname, "wanderer");
        assert_eq!(info.avatar_url, "");
        assert_eq!(info.like_count, 0);
        assert_eq!(info.travel_check_in_count, 9);
    }

    #[test]
    fn test_personal_info_serializes_camel_case() {
        let info = PersonalInfo {
            avatar_url: "/a.png".to_string(),
            travel_check_in_count: 2,
            ..Default::default()
        };
        let v = serde_json::to_value(info).expect("should serialize");
        assert_eq!(v["avatarUrl"], "/a.png");
        assert_eq!(v["travelCheckInCount"], 2);
    }

    #[test]
    fn test_media_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Image);
    }

    #[test]
    fn test_login_400_means_missing_account() {
        let e = ApiError::http(400, String::new(), "Login failed");
        assert_eq!(login_error_message(&e), ACCOUNT_MISSING);
    }

    #[test]
    fn test_login_other_failures() {
        let e = ApiError::http(500, "boom".to_string(), "Login failed");
        assert_eq!(login_error_message(&e), LOGIN_FAILED);
        assert_eq!(login_error_message(&ApiError::request("x")), LOGIN_FAILED);
    }

    #[test]
    fn test_register_duplicate_username_and_nickname() {
        let e = ApiError::http(409, "Username already exists".to_string(), "Register failed");
        assert_eq!(register_error_message(&e), USERNAME_TAKEN);

        let e = ApiError::http(400, "\"Nickname already exists\"".to_string(), "Register failed");
        assert_eq!(register_error_message(&e), NICKNAME_TAKEN);
    }

    #[test]
    fn test_register_bad_request_and_fallback() {
        let e = ApiError::http(400, "password too short".to_string(), "Register failed");
        assert_eq!(register_error_message(&e), REGISTER_BAD_REQUEST);

        let e = ApiError::http(502, String::new(), "Register failed");
        assert_eq!(register_error_message(&e), REGISTER_FAILED);
    }

    fn entry(id: i64, title: &str) -> JournalEntry {
        JournalEntry {
            id: Some(id),
            title: title.to_string(),
            content: "day one".to_string(),
            media_list: vec![],
            updated_at: Some("2024-05-01T10:00:00".to_string()),
        }
    }

    fn media(url: &str) -> Media {
        Media {
            url: url.to_string(),
            kind: "image".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_editor_has_no_unsaved_changes() {
        let editor = EditorState::default();
        assert_eq!(editor.current.title, UNTITLED_TITLE);
        assert!(editor.original.is_none());
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_load_snapshots_entry() {
        let mut editor = EditorState::default();
        editor.load(entry(1, "Lisbon"));
        assert_eq!(editor.current_id(), Some(1));
        assert!(!editor.has_unsaved_changes());

        editor.current.title = "Porto".to_string();
        assert!(editor.has_unsaved_changes());
    }

    #[test]
    fn test_media_change_counts_as_unsaved() {
        let mut editor = EditorState::default();
        editor.load(entry(1, "Lisbon"));
        editor.current.media_list.push(media("/a.jpg"));
        assert!(editor.has_unsaved_changes());
    }

    #[test]
    fn test_updated_at_is_not_compared() {
        let mut editor = EditorState::default();
        editor.load(entry(1, "Lisbon"));
        editor.current.updated_at = None;
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_reset_restores_snapshot() {
        let mut editor = EditorState::default();
        editor.load(entry(1, "Lisbon"));
        editor.current.content = "edited".to_string();
        editor.reset();
        assert_eq!(editor.current, entry(1, "Lisbon"));
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_reset_without_snapshot_starts_new_entry() {
        let mut editor = EditorState::default();
        editor.current.content = "scratch".to_string();
        editor.reset();
        assert_eq!(editor.current.title, NEW_JOURNAL_TITLE);
        assert_eq!(editor.current.content, "");
        assert!(editor.current.id.is_none());
        assert_eq!(editor.original.as_ref(), Some(&editor.current));
    }

    #[test]
    fn test_is_empty_ignores_whitespace() {
        let mut editor = EditorState::default();
        editor.current.title = "  ".to_string();
        editor.current.content = "\n".to_string();
        assert!(editor.is_empty());

        editor.current.media_list.push(media("/a.jpg"));
        assert!(!editor.is_empty());
    }

    #[test]
    fn test_attach_media_snapshots_pending_edits() {
        let mut editor = EditorState::default();
        editor.load(entry(1, "Lisbon"));
        editor.current.title = "Porto".to_string();
        editor.attach_media(media("/a.jpg"));
        assert_eq!(editor.current.media_list.len(), 1);
        assert!(!editor.has_unsaved_changes());

        editor.reset();
        assert_eq!(editor.current.title, "Porto");
        assert_eq!(editor.current.media_list, vec![media("/a.jpg")]);
    }

    #[test]
    fn test_replace_in_list() {
        let mut list = vec![entry(1, "a"), entry(2, "b")];
        replace_in_list(&mut list, &entry(2, "B"));
        assert_eq!(list[1].title, "B");

        replace_in_list(&mut list, &entry(3, "c"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_from_list() {
        let mut list = vec![entry(1, "a"), entry(2, "b"), entry(3, "c")];
        remove_from_list(&mut list, &[1, 3]);
        assert_eq!(list, vec![entry(2, "b")]);
    }

    fn store() -> JournalStore {
        JournalStore::with_client(ApiClient::new("http://localhost:8080/api".to_string()))
    }

    #[test]
    fn test_store_starts_logged_out_without_token() {
        let store = store();
        assert!(!store.logged_in.get_untracked());
        assert_eq!(store.current_tab.get_untracked(), ProfileTab::HistoryFootprints);
        assert!(store.notice.get_untracked().is_none());
    }

    #[test]
    fn test_store_starts_logged_in_with_token() {
        let mut client = ApiClient::new("http://localhost:8080/api".to_string());
        client.set_token("t".to_string());
        let store = JournalStore::with_client(client);
        assert!(store.logged_in.get_untracked());
    }

    #[test]
    fn test_reset_without_snapshot_gives_new_journal() {
        let store = store();
        store.editor.update(|e| e.current.content = "draft".to_string());
        store.reset_current_journal();
        store.editor.with_untracked(|e| {
            assert_eq!(e.current.title, NEW_JOURNAL_TITLE);
            assert_eq!(e.current.content, "");
        });
        assert!(!store.editor.with_untracked(|e| e.has_unsaved_changes()));
    }

    #[test]
    fn test_ui_flags() {
        let store = store();
        store.set_graphic_mode(true);
        assert!(store.graphic_mode.get_untracked());

        store.open_auth_modal();
        assert!(store.auth_modal_open.get_untracked());
        store.close_auth_modal();
        assert!(!store.auth_modal_open.get_untracked());

        store.set_edit_modal_open(true);
        assert!(store.edit_modal_open.get_untracked());

        store.set_current_tab(ProfileTab::Journals);
        assert_eq!(store.current_tab.get_untracked(), ProfileTab::Journals);
    }

    #[test]
    fn test_notice_dismiss() {
        let store = store();
        store.notify(NoticeKind::Error, "boom");
        assert_eq!(
            store.notice.get_untracked(),
            Some(Notice {
                kind: NoticeKind::Error,
                message: "boom".to_string(),
            })
        );
        store.dismiss_notice();
        assert!(store.notice.get_untracked().is_none());
    }
}
