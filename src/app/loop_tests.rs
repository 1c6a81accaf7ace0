use super::*;
use crate::app::action::Action;
use crate::app::command::Command;
use crate::app::state::{AppMode, AppState};
use crate::domain::models::{
    CommitId, FileChange, FileStatus, OperationEntry, RepoSnapshot, Revision, WorkspaceEntry,
};
use crate::domain::vcs::MockVcsFacade;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_handle_command_error_propagation() {
    let mut mock = MockVcsFacade::new();
    let commit_id = CommitId("test-commit".to_string());
    let commit_id_clone = commit_id.clone();

    // Simulate a failure in get_commit_diff
    mock.expect_get_commit_diff()
        .with(mockall::predicate::eq(commit_id_clone))
        .returning(|_| Err(anyhow::anyhow!("VCS Error")));

    let adapter = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(1);

    handle_command(Command::LoadDiff(commit_id), adapter, tx).unwrap();

    // We expect a DiffLoaded action with an error message in it
    let action = rx.recv().await.unwrap();
    if let Action::DiffLoaded(_, diff) = action {
        assert!(diff.contains("Error: VCS Error"));
    } else {
        panic!("Expected Action::DiffLoaded, got {action:?}");
    }
}

#[tokio::test]
async fn test_handle_command_success() {
    let mut mock = MockVcsFacade::new();
    let commit_id = CommitId("test-commit".to_string());
    let commit_id_clone = commit_id.clone();

    // Simulate a success
    mock.expect_get_commit_diff()
        .with(mockall::predicate::eq(commit_id_clone))
        .returning(|_| Ok("Diff Content".to_string()));

    let adapter = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(1);

    handle_command(Command::LoadDiff(commit_id), adapter, tx).unwrap();

    let action = rx.recv().await.unwrap();
    if let Action::DiffLoaded(_, diff) = action {
        assert_eq!(diff, "Diff Content");
    } else {
        panic!("Expected Action::DiffLoaded, got {action:?}");
    }
}

#[tokio::test]
async fn test_full_command_error_to_state() {
    let mut mock = MockVcsFacade::new();
    mock.expect_snapshot()
        .returning(|| Err(anyhow::anyhow!("Snapshot failed")));

    let adapter = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(2);
    let mut state = AppState::default();
    state.mode = AppMode::NoRepo;

    handle_command(Command::Snapshot, adapter, tx).unwrap();

    let started = rx.recv().await.unwrap();
    crate::app::reducer::update(&mut state, started);
    assert!(state
        .active_tasks
        .iter()
        .any(|t| t.contains("Snapshotting")));

    let completed = rx.recv().await.unwrap();
    let next = crate::app::reducer::update(&mut state, completed);

    // A failed operation on the welcome screen does not try to load a repo
    assert_eq!(next, None);
    assert_eq!(state.mode, AppMode::NoRepo);
    assert!(state.active_tasks.is_empty());
    assert!(state
        .last_error
        .unwrap()
        .message
        .contains("Error: Snapshot failed"));
}

#[tokio::test]
async fn test_edit_failure_reports_stale_revision() {
    let mut mock = MockVcsFacade::new();
    mock.expect_edit().returning(|id| {
        Err(anyhow::anyhow!(
            "Commit {id} is no longer valid; it was rewritten or abandoned"
        ))
    });

    let (tx, mut rx) = mpsc::channel(2);
    handle_command(
        Command::Edit(CommitId("deadbeef".to_string())),
        Arc::new(mock),
        tx,
    )
    .unwrap();

    let mut state = AppState::default();
    crate::app::reducer::update(&mut state, rx.recv().await.unwrap());
    let next = crate::app::reducer::update(&mut state, rx.recv().await.unwrap());
    assert_eq!(next, Some(Command::LoadRepo(100, None)));
    let error = state.last_error.unwrap();
    assert!(error.message.contains("no longer valid"));
    assert!(!error.suggestions.is_empty());
}

#[tokio::test]
async fn test_load_repo_passes_limit_and_revset() {
    let mut mock = MockVcsFacade::new();
    mock.expect_load_snapshot()
        .with(
            mockall::predicate::eq(25),
            mockall::predicate::eq(Some("mine()".to_string())),
        )
        .returning(|_, _| Ok(snapshot()));

    let (tx, mut rx) = mpsc::channel(1);
    handle_command(
        Command::LoadRepo(25, Some("mine()".to_string())),
        Arc::new(mock),
        tx,
    )
    .unwrap();

    match rx.recv().await.unwrap() {
        Action::RepoLoaded(repo) => assert_eq!(repo.revisions.len(), 3),
        other => panic!("Expected Action::RepoLoaded, got {other:?}"),
    }
}

fn snapshot() -> RepoSnapshot {
    let rev = |id: &str, parents: &[&str], bookmarks: &[&str]| Revision {
        commit_id: CommitId(id.to_string()),
        change_id: format!("{id}kkkkkkkkkk"),
        parents: parents.iter().map(|p| CommitId((*p).to_string())).collect(),
        bookmarks: bookmarks.iter().map(ToString::to_string).collect(),
        description: format!("{id} description"),
        author: "author".to_string(),
        timestamp: "2024-01-01 12:00".to_string(),
        ..Default::default()
    };
    let mut wc = rev("wc", &["base"], &[]);
    wc.is_working_copy = true;
    wc.workspaces = vec!["default".to_string()];
    wc.changed_files = vec![FileChange {
        path: "file.txt".to_string(),
        status: FileStatus::Modified,
    }];
    let mut root = rev("root", &[], &[]);
    root.is_root = true;
    root.is_immutable = true;
    RepoSnapshot {
        repo_name: "test-repo".to_string(),
        operation_id: "0123456789abcdef".to_string(),
        workspace_id: "default".to_string(),
        working_copy_id: CommitId("wc".to_string()),
        revisions: vec![wc, rev("base", &["root"], &["main", "feature"]), root],
    }
}

#[tokio::test]
async fn test_keystroke_fuzzing() {
    let mut mock = MockVcsFacade::new();
    mock.expect_workspace_root()
        .returning(|| std::path::PathBuf::from("/tmp"));
    mock.expect_load_snapshot()
        .returning(|_, _| Ok(snapshot()));
    mock.expect_get_commit_diff()
        .returning(|_| Ok("Commit ID: wc\nFile: file.txt\n@@ -1 +1 @@\n-a\n+b\n".to_string()));
    mock.expect_snapshot()
        .returning(|| Ok("snapshot".to_string()));
    mock.expect_edit().returning(|_| Ok(()));
    mock.expect_rebase().returning(|_, _| Ok(()));
    mock.expect_describe().returning(|_, _| Ok(()));
    mock.expect_abandon().returning(|_| Ok(()));
    mock.expect_squash().returning(|_| Ok(()));
    mock.expect_new_child().returning(|_| Ok(()));
    mock.expect_restore_file().returning(|_| Ok(()));
    mock.expect_set_bookmark().returning(|_, _| Ok(()));
    mock.expect_delete_bookmark().returning(|_| Ok(()));
    mock.expect_undo().returning(|| Ok(()));
    mock.expect_init_repo().returning(|| Ok(()));
    mock.expect_operation_log().returning(|_| {
        Ok(vec![OperationEntry {
            id: "0123456789ab".to_string(),
            description: "snapshot working copy".to_string(),
            timestamp: "2024-05-01 10:00".to_string(),
            is_current: true,
        }])
    });
    mock.expect_workspaces().returning(|| {
        Ok(vec![
            WorkspaceEntry {
                name: "default".to_string(),
                is_current: true,
                ..Default::default()
            },
            WorkspaceEntry {
                name: "review".to_string(),
                ..Default::default()
            },
        ])
    });
    mock.expect_add_workspace()
        .returning(|name| Ok(std::path::PathBuf::from(format!("/tmp/repo-{name}"))));
    mock.expect_forget_workspace().returning(|_| Ok(()));

    let adapter = Arc::new(mock);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut app_state = AppState::default();
    app_state.mode = AppMode::Loading;

    let (event_tx, event_rx) = mpsc::channel(100);

    let fuzzer_handle = tokio::spawn(async move {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..10000 {
            let event = match rng.gen_range(0..100) {
                0..=5 => {
                    let w = rng.gen_range(10..200);
                    let h = rng.gen_range(10..100);
                    Event::Resize(w, h)
                }
                6..=15 => generate_random_mouse(&mut rng, ratatui::layout::Size::new(80, 24)),
                _ => generate_random_key(&mut rng),
            };
            if event_tx.send(Ok(event)).await.is_err() {
                break;
            }
            if rng.gen_bool(0.1) {
                tokio::task::yield_now().await;
            }
        }
    });

    // Random input may quit at any point; the loop must end cleanly either way
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_loop_with_events(&mut terminal, app_state, adapter, event_rx),
    )
    .await;

    match result {
        Ok(res) => res.unwrap(),
        Err(_) => panic!("Fuzzer timed out - possible deadlock or too slow"),
    }

    fuzzer_handle.await.unwrap();
}

#[tokio::test]
async fn test_loop_renders_snapshot_and_quits() {
    let mut mock = MockVcsFacade::new();
    mock.expect_workspace_root()
        .returning(|| std::path::PathBuf::from("/tmp"));
    mock.expect_load_snapshot()
        .times(1)
        .returning(|_, _| Ok(snapshot()));
    mock.expect_get_commit_diff()
        .returning(|_| Ok(String::new()));

    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    let mut app_state = AppState::default();
    app_state.mode = AppMode::Loading;
    let (event_tx, event_rx) = mpsc::channel(10);

    let feeder = tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;
        let _ = event_tx
            .send(Ok(Event::Key(KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::NONE,
            ))))
            .await;
    });

    run_loop_with_events(&mut terminal, app_state, Arc::new(mock), event_rx)
        .await
        .unwrap();
    feeder.await.unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("test-repo"));
    assert!(screen.contains("main"));
    assert!(screen.contains("default@"));
}

fn generate_random_key<R: Rng>(rng: &mut R) -> Event {
    let code = match rng.gen_range(0..20) {
        0 => KeyCode::Esc,
        1 => KeyCode::Enter,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Up,
        5 => KeyCode::Down,
        6 => KeyCode::Home,
        7 => KeyCode::End,
        8 => KeyCode::PageUp,
        9 => KeyCode::PageDown,
        10 => KeyCode::Tab,
        11 => KeyCode::BackTab,
        12 => KeyCode::Delete,
        13 => KeyCode::Backspace,
        _ => {
            let c = rng.gen_range(b' '..=b'~') as char;
            KeyCode::Char(c)
        }
    };

    let mut modifiers = KeyModifiers::empty();
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::CONTROL);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::ALT);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Event::Key(KeyEvent::new(code, modifiers))
}

fn generate_random_mouse<R: Rng>(rng: &mut R, size: ratatui::layout::Size) -> Event {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    let kind = match rng.gen_range(0..5) {
        0 => MouseEventKind::Down(MouseButton::Left),
        1 => MouseEventKind::Down(MouseButton::Right),
        2 => MouseEventKind::ScrollUp,
        3 => MouseEventKind::ScrollDown,
        _ => MouseEventKind::Moved,
    };

    let column = rng.gen_range(0..size.width);
    let row = rng.gen_range(0..size.height);

    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: crossterm::event::KeyModifiers::empty(),
    })
}
