//! `braid -i`: pick a revision in a small inline prompt, then edit or rebase
//! it without entering the full screen UI.

use crate::domain::models::{CommitId, Revision};
use crate::domain::vcs::VcsFacade;
use crate::theme::Theme;
use anyhow::{Context, Result};
use std::io::Write;

pub mod picker;

pub use picker::{PickerOutcome, PickerState, TerminalPrompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Edit,
    Rebase,
}

impl QuickAction {
    pub const ALL: [QuickAction; 2] = [QuickAction::Edit, QuickAction::Rebase];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuickAction::Edit => "Edit",
            QuickAction::Rebase => "Rebase",
        }
    }
}

/// One selectable revision. `value` is the change id the user sees; the
/// engine is driven with `commit_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionOption {
    pub label: String,
    pub value: String,
    pub commit_id: CommitId,
}

#[must_use]
pub fn format_option_label(rev: &Revision) -> String {
    let mut label = rev.change_id_short().to_string();
    if rev.is_working_copy {
        label.push_str(" @");
    }
    if !rev.bookmarks.is_empty() {
        label.push_str(&format!(" [{}]", rev.bookmarks.join(", ")));
    }
    match rev.summary() {
        "" => label.push_str(" (no description)"),
        summary => {
            label.push(' ');
            label.push_str(summary);
        }
    }
    label
}

#[must_use]
pub fn build_options(revisions: &[Revision]) -> Vec<RevisionOption> {
    revisions
        .iter()
        .map(|rev| RevisionOption {
            label: format_option_label(rev),
            value: rev.change_id_short().to_string(),
            commit_id: rev.commit_id.clone(),
        })
        .collect()
}

/// Source of user choices. `Ok(None)` means the prompt was dismissed.
pub trait Prompter {
    fn select_action(&mut self) -> Result<Option<QuickAction>>;

    /// Returns the index of the chosen option.
    fn select_revision(
        &mut self,
        title: &str,
        description: Option<&str>,
        options: &[RevisionOption],
    ) -> Result<Option<usize>>;
}

/// Runs one quick action against `adapter`, writing outcomes to `out`.
pub async fn run_with<P: Prompter, W: Write>(
    prompter: &mut P,
    adapter: &dyn VcsFacade,
    limit: usize,
    revset: Option<String>,
    out: &mut W,
) -> Result<()> {
    let Some(action) = prompter.select_action()? else {
        return Ok(());
    };

    let snapshot = adapter
        .load_snapshot(limit, revset)
        .await
        .context("failed to get log")?;
    let options = build_options(&snapshot.revisions);
    ::log::debug!("interactive {:?} over {} revisions", action, options.len());

    match action {
        QuickAction::Edit => run_edit(prompter, adapter, &options, out).await,
        QuickAction::Rebase => run_rebase(prompter, adapter, &options, out).await,
    }
}

async fn run_edit<P: Prompter, W: Write>(
    prompter: &mut P,
    adapter: &dyn VcsFacade,
    options: &[RevisionOption],
    out: &mut W,
) -> Result<()> {
    if options.is_empty() {
        writeln!(out, "No revisions available")?;
        return Ok(());
    }

    let Some(choice) = prompter.select_revision("Select revision to edit", None, options)? else {
        return Ok(());
    };
    let target = pick(options, choice)?;

    adapter
        .edit(&target.commit_id)
        .await
        .context("edit failed")?;
    writeln!(out, "Now editing {}", target.value)?;
    Ok(())
}

async fn run_rebase<P: Prompter, W: Write>(
    prompter: &mut P,
    adapter: &dyn VcsFacade,
    options: &[RevisionOption],
    out: &mut W,
) -> Result<()> {
    if options.len() < 2 {
        writeln!(out, "Need at least 2 revisions to rebase")?;
        return Ok(());
    }

    let Some(choice) =
        prompter.select_revision("Select revision to rebase (source)", None, options)?
    else {
        return Ok(());
    };
    let source = pick(options, choice)?;

    let description = format!("Rebasing {} onto...", source.value);
    let Some(choice) = prompter.select_revision(
        "Select destination (new parent)",
        Some(&description),
        options,
    )?
    else {
        return Ok(());
    };
    let destination = pick(options, choice)?;

    if source.value == destination.value {
        writeln!(out, "Source and destination cannot be the same")?;
        return Ok(());
    }

    adapter
        .rebase(&source.commit_id, &destination.commit_id)
        .await
        .context("rebase failed")?;
    writeln!(out, "Rebased {} onto {}", source.value, destination.value)?;
    Ok(())
}

fn pick(options: &[RevisionOption], index: usize) -> Result<&RevisionOption> {
    options
        .get(index)
        .with_context(|| format!("no option at index {index}"))
}

/// Runs the flow on the real terminal.
pub async fn run(
    adapter: &dyn VcsFacade,
    limit: usize,
    revset: Option<String>,
    theme: Theme,
) -> Result<()> {
    let mut prompter = TerminalPrompter::new(theme);
    let mut stdout = std::io::stdout();
    run_with(&mut prompter, adapter, limit, revset, &mut stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RepoSnapshot;
    use crate::domain::vcs::MockVcsFacade;
    use mockall::predicate::eq;
    use std::collections::VecDeque;

    fn rev(change_id: &str, commit_id: &str, description: &str) -> Revision {
        Revision {
            change_id: change_id.to_string(),
            commit_id: CommitId(commit_id.to_string()),
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_option_label() {
        let cases = [
            ("plain", rev("abcd1234", "c1", ""), "abcd1234 (no description)"),
            (
                "working copy",
                Revision {
                    is_working_copy: true,
                    ..rev("wxyz9876", "c2", "")
                },
                "wxyz9876 @ (no description)",
            ),
            (
                "bookmarks",
                Revision {
                    bookmarks: vec!["main".to_string(), "release".to_string()],
                    ..rev("qrst5678", "c3", "Fix bug")
                },
                "qrst5678 [main, release] Fix bug",
            ),
            (
                "everything",
                Revision {
                    is_working_copy: true,
                    bookmarks: vec!["feature".to_string()],
                    ..rev("mnop1111", "c4", "WIP: new thing\n\nbody")
                },
                "mnop1111 @ [feature] WIP: new thing",
            ),
        ];

        for (name, revision, want) in cases {
            assert_eq!(format_option_label(&revision), want, "{name}");
        }
    }

    #[test]
    fn test_options_carry_change_id_and_commit() {
        let options = build_options(&[rev("abcd1234", "deadbeef", "x")]);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "abcd1234");
        assert_eq!(options[0].commit_id, CommitId("deadbeef".to_string()));
        assert!(build_options(&[]).is_empty());
    }

    #[derive(Default)]
    struct Scripted {
        action: Option<QuickAction>,
        picks: VecDeque<Option<usize>>,
        titles: Vec<String>,
    }

    impl Prompter for Scripted {
        fn select_action(&mut self) -> Result<Option<QuickAction>> {
            Ok(self.action)
        }

        fn select_revision(
            &mut self,
            title: &str,
            _description: Option<&str>,
            _options: &[RevisionOption],
        ) -> Result<Option<usize>> {
            self.titles.push(title.to_string());
            Ok(self.picks.pop_front().flatten())
        }
    }

    fn scripted(action: QuickAction, picks: &[Option<usize>]) -> Scripted {
        Scripted {
            action: Some(action),
            picks: picks.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn mock_with(revisions: Vec<Revision>) -> MockVcsFacade {
        let mut mock = MockVcsFacade::new();
        mock.expect_load_snapshot().returning(move |_, _| {
            Ok(RepoSnapshot {
                revisions: revisions.clone(),
                ..Default::default()
            })
        });
        mock
    }

    fn two_revisions() -> Vec<Revision> {
        vec![rev("aaaa", "c-a", "top"), rev("bbbb", "c-b", "bottom")]
    }

    async fn run_script(prompter: &mut Scripted, mock: &MockVcsFacade) -> Result<String> {
        let mut out = Vec::new();
        run_with(prompter, mock, 50, None, &mut out).await?;
        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn test_edit_uses_commit_and_prints_change() -> Result<()> {
        let mut mock = mock_with(two_revisions());
        mock.expect_edit()
            .with(eq(CommitId("c-b".to_string())))
            .times(1)
            .returning(|_| Ok(()));

        let out = run_script(&mut scripted(QuickAction::Edit, &[Some(1)]), &mock).await?;
        assert_eq!(out, "Now editing bbbb\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_rebase_source_onto_destination() -> Result<()> {
        let mut mock = mock_with(two_revisions());
        mock.expect_rebase()
            .with(eq(CommitId("c-a".to_string())), eq(CommitId("c-b".to_string())))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut prompter = scripted(QuickAction::Rebase, &[Some(0), Some(1)]);
        let out = run_script(&mut prompter, &mock).await?;
        assert_eq!(out, "Rebased aaaa onto bbbb\n");
        assert_eq!(
            prompter.titles,
            [
                "Select revision to rebase (source)",
                "Select destination (new parent)"
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_rebase_onto_itself_is_refused() -> Result<()> {
        let mut mock = mock_with(two_revisions());
        mock.expect_rebase().never();

        let out = run_script(&mut scripted(QuickAction::Rebase, &[Some(1), Some(1)]), &mock).await?;
        assert_eq!(out, "Source and destination cannot be the same\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_rebase_needs_two_revisions() -> Result<()> {
        let mock = mock_with(vec![rev("aaaa", "c-a", "")]);
        let mut prompter = scripted(QuickAction::Rebase, &[]);
        let out = run_script(&mut prompter, &mock).await?;
        assert_eq!(out, "Need at least 2 revisions to rebase\n");
        assert!(prompter.titles.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_cancel_is_silent() -> Result<()> {
        let mut mock = mock_with(two_revisions());
        mock.expect_edit().never();
        mock.expect_rebase().never();

        let out = run_script(&mut scripted(QuickAction::Edit, &[None]), &mock).await?;
        assert!(out.is_empty());

        let out = run_script(&mut scripted(QuickAction::Rebase, &[Some(0), None]), &mock).await?;
        assert!(out.is_empty());

        let mut no_action = Scripted::default();
        let out = run_script(&mut no_action, &MockVcsFacade::new()).await?;
        assert!(out.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_engine_failures_carry_context() {
        let mut mock = mock_with(two_revisions());
        mock.expect_edit()
            .returning(|_| Err(anyhow::anyhow!("Commit c-a is immutable")));
        mock.expect_rebase()
            .returning(|_, _| Err(anyhow::anyhow!("conflict")));

        let err = run_script(&mut scripted(QuickAction::Edit, &[Some(0)]), &mock)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "edit failed");
        assert!(format!("{err:#}").contains("immutable"));

        let err = run_script(&mut scripted(QuickAction::Rebase, &[Some(0), Some(1)]), &mock)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").starts_with("rebase failed: conflict"));
    }
}
