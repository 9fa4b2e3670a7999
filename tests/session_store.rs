use melodiary_tui::api::{SessionState, clear_session, load_session, save_session, session_path};
use std::fs;

#[test]
fn session_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path();

    let s = SessionState {
        token: Some("jwt-abc".to_owned()),
        user_id: Some("user-1".to_owned()),
    };
    save_session(data_dir, &s).expect("save_session");

    let loaded = load_session(data_dir);
    assert!(loaded.is_authenticated());
    assert_eq!(loaded.token.as_deref(), Some("jwt-abc"));
    assert_eq!(loaded.user_id.as_deref(), Some("user-1"));

    // No temp file is left behind by the write.
    let tmp = session_path(data_dir).with_extension("json.tmp");
    assert!(!tmp.exists());
}

#[test]
fn missing_session_starts_signed_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = load_session(dir.path());
    assert!(!loaded.is_authenticated());
    assert!(loaded.user_id.is_none());
}

#[test]
fn corrupt_session_file_falls_back_to_signed_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path();
    fs::create_dir_all(data_dir).expect("create_dir_all");
    fs::write(session_path(data_dir), b"{not-json").expect("write");

    let loaded = load_session(data_dir);
    assert!(!loaded.is_authenticated());
}

#[test]
fn clear_session_removes_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path();

    let s = SessionState {
        token: Some("jwt-abc".to_owned()),
        user_id: None,
    };
    save_session(data_dir, &s).expect("save_session");
    assert!(session_path(data_dir).exists());

    clear_session(data_dir).expect("clear_session");
    assert!(!session_path(data_dir).exists());

    // Clearing twice is not an error.
    clear_session(data_dir).expect("clear_session again");
}
