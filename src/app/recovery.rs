#[must_use]
pub fn get_suggestions(msg: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("immutable") {
        suggestions
            .push("Press 'n' to create a child of the immutable revision instead".to_string());
    }

    if msg_lower.contains("conflict") {
        suggestions.push("Resolve the conflict with: jj resolve".to_string());
    }

    if msg_lower.contains("no such bookmark") || msg_lower.contains("no matching bookmarks") {
        suggestions.push("Press 'B' to list the bookmarks in this view".to_string());
    }

    if msg_lower.contains("no longer valid") || msg_lower.contains("stale") {
        suggestions.push("The view is out of date; it reloads after this message".to_string());
    }

    if msg_lower.contains("no repository")
        || msg_lower.contains("not a git repository")
        || msg_lower.contains("there is no jj repo")
    {
        suggestions.push("Run braid inside a jj workspace or try: jj git init".to_string());
    }

    if msg_lower.contains("failed to execute 'jj'") {
        suggestions.push("Install jj and make sure it is on PATH".to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions() {
        let s = get_suggestions("Error: jj edit failed: Commit 1234 is immutable");
        assert!(s.iter().any(|x| x.contains("child of the immutable")));

        let s = get_suggestions("The revision has conflicts");
        assert!(s.contains(&"Resolve the conflict with: jj resolve".to_string()));

        let s = get_suggestions("Error: jj bookmark delete failed: No such bookmark: feat");
        assert_eq!(s.len(), 1);

        let s = get_suggestions("Commit abc is no longer valid; it was rewritten or abandoned");
        assert!(s.iter().any(|x| x.contains("out of date")));

        let s = get_suggestions("No repository found");
        assert!(s.iter().any(|x| x.contains("jj git init")));

        assert!(get_suggestions("something else").is_empty());
    }
}
