//! Companion solution file scaffold.

use crate::model::intent::AddQuestionRequest;
use serde::{Deserialize, Serialize};

const PROBLEM_PLACEHOLDER: &str = "[Paste the problem statement here]";
const LINK_PLACEHOLDER: &str = "[LeetCode/Codeforces/etc. link]";
const APPROACH_PLACEHOLDER: &str = "[Describe your approach/algorithm]";
const COMPLEXITY_PLACEHOLDER: &str = "O([complexity])";
const NOTES_PLACEHOLDER: &str = "[Any additional notes, learnings, or observations]";

/// Rendered companion file, keyed by its store path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionFile {
    pub path: String,
    pub content: String,
}

/// Renders the solution scaffold, filling bracketed placeholders where the
/// request leaves a field empty.
pub fn render_solution_file(request: &AddQuestionRequest) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", request.trimmed_title()));

    push_section(&mut out, "Problem Statement", PROBLEM_PLACEHOLDER);
    push_section(
        &mut out,
        "Link",
        non_blank(request.link.as_deref()).unwrap_or(LINK_PLACEHOLDER),
    );
    push_section(&mut out, "Difficulty", request.difficulty_or_default().as_str());
    push_section(
        &mut out,
        "Approach",
        non_blank(request.approach.as_deref()).unwrap_or(APPROACH_PLACEHOLDER),
    );

    out.push_str("## Solution\n\n");
    out.push_str("### Language: [Python/Java/C++/etc.]\n\n");
    out.push_str("```[language]\n[Your solution code here]\n```\n\n");

    push_section(
        &mut out,
        "Time Complexity",
        non_blank(request.time_complexity.as_deref()).unwrap_or(COMPLEXITY_PLACEHOLDER),
    );
    push_section(
        &mut out,
        "Space Complexity",
        non_blank(request.space_complexity.as_deref()).unwrap_or(COMPLEXITY_PLACEHOLDER),
    );

    push_bullets(&mut out, "Key Points", &request.key_point_lines());
    push_bullets(&mut out, "Edge Cases Considered", &request.edge_case_lines());

    out.push_str("## Notes\n");
    out.push_str(NOTES_PLACEHOLDER);
    out.push('\n');
    out
}

fn push_section(out: &mut String, heading: &str, body: &str) {
    out.push_str(&format!("## {heading}\n{body}\n\n"));
}

fn push_bullets(out: &mut String, heading: &str, items: &[&str]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("## {heading}\n"));
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
    out.push('\n');
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::render_solution_file;
    use crate::model::intent::AddQuestionRequest;
    use crate::model::question::Difficulty;

    #[test]
    fn empty_fields_render_placeholders() {
        let content = render_solution_file(&AddQuestionRequest::new(1, "Two Sum"));
        assert!(content.starts_with("# Two Sum\n\n## Problem Statement\n"));
        assert!(content.contains("## Link\n[LeetCode/Codeforces/etc. link]\n"));
        assert!(content.contains("## Difficulty\nEasy\n"));
        assert!(content.contains("## Time Complexity\nO([complexity])\n"));
        assert!(!content.contains("## Key Points"));
        assert!(!content.contains("## Edge Cases Considered"));
        assert!(content.ends_with("## Notes\n[Any additional notes, learnings, or observations]\n"));
    }

    #[test]
    fn supplied_fields_replace_placeholders() {
        let mut request = AddQuestionRequest::new(1, "Two Sum");
        request.difficulty = Some(Difficulty::Medium);
        request.link = Some("https://leetcode.com/problems/two-sum/".to_string());
        request.approach = Some("complement lookup".to_string());
        request.time_complexity = Some("O(n)".to_string());
        request.space_complexity = Some("  ".to_string());
        request.key_points = Some("map value to index\nreturn early".to_string());
        request.edge_cases = Some("duplicates".to_string());

        let content = render_solution_file(&request);
        assert!(content.contains("## Link\nhttps://leetcode.com/problems/two-sum/\n"));
        assert!(content.contains("## Difficulty\nMedium\n"));
        assert!(content.contains("## Approach\ncomplement lookup\n"));
        assert!(content.contains("## Time Complexity\nO(n)\n"));
        assert!(content.contains("## Space Complexity\nO([complexity])\n"));
        assert!(content.contains("## Key Points\n- map value to index\n- return early\n\n"));
        assert!(content.contains("## Edge Cases Considered\n- duplicates\n\n"));
    }
}
