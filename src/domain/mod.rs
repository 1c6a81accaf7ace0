pub mod graph_layout;
pub mod models;
pub mod navigation;
pub mod prefix;
pub mod vcs;

#[cfg(test)]
mod tests {
    use super::graph_layout::{GraphRenderer, GraphSymbol};
    use super::models::{CommitId, Revision};
    use super::navigation::find_nearest_bookmark;
    use super::prefix::UniquePrefixIndex;

    #[test]
    fn test_log_view_pipeline_on_small_history() {
        let root = Revision {
            commit_id: CommitId("r000".to_string()),
            change_id: "zzzzzzzz".to_string(),
            is_root: true,
            ..Default::default()
        };
        let a = Revision {
            commit_id: CommitId("a111".to_string()),
            change_id: "aaaa1111".to_string(),
            parents: vec![root.commit_id.clone()],
            ..Default::default()
        };
        let b = Revision {
            commit_id: CommitId("b222".to_string()),
            change_id: "aaaa2222".to_string(),
            parents: vec![a.commit_id.clone()],
            bookmarks: vec!["main".to_string()],
            is_working_copy: true,
            ..Default::default()
        };
        let snapshot = vec![b, a, root];

        let prefixes = UniquePrefixIndex::build(["aaaa1111", "aaaa2222"]);
        assert_eq!(prefixes.get("aaaa1111"), Some(5));
        assert_eq!(prefixes.get("aaaa2222"), Some(5));

        let mut renderer = GraphRenderer::new();
        let placed: Vec<_> = snapshot
            .iter()
            .map(|rev| renderer.place_revision(rev))
            .collect();
        assert!(placed.iter().all(|p| p.column == 0));
        assert_eq!(placed[0].symbol, GraphSymbol::WorkingCopy);
        assert_eq!(placed[1].symbol, GraphSymbol::Revision);
        assert_eq!(placed[2].symbol, GraphSymbol::Root);

        assert_eq!(find_nearest_bookmark(&snapshot), Some("main"));
    }
}
