//! `add_note`: append one note bullet to an existing question.

use crate::markup::{
    self, indentation, is_label_line, label_value, lines_from, Line, SUB_BULLET_RE,
};
use crate::model::intent::AddNoteRequest;
use crate::model::question::ListKey;
use crate::model::topic::topic_by_index;
use crate::mutator::section::{insert_after_line, Section};
use crate::mutator::{MutationError, MutationResult, TopicLookup};
use log::info;

/// Adds a note to the question at `question_index` within the topic at
/// `topic_index` and returns the full updated text.
///
/// # Errors
/// - `InvalidIntent` for a blank note.
/// - `TopicNotFound` when the index is outside the catalog or the heading is absent.
/// - `QuestionNotFound` when the question index is out of range.
pub fn add_note(text: &str, request: &AddNoteRequest) -> MutationResult<String> {
    request.validate()?;
    let lookup = TopicLookup::Index(request.topic_index);
    let entry = topic_by_index(request.topic_index).ok_or(MutationError::TopicNotFound(lookup))?;
    let section = Section::locate(text, entry)?.ok_or(MutationError::TopicNotFound(lookup))?;

    let not_found = || MutationError::QuestionNotFound {
        topic_id: entry.id,
        question_index: request.question_index,
    };
    let bullets = section.question_bullets();
    let target = bullets.get(request.question_index).ok_or_else(not_found)?;

    // The block is keyed by its exact title, searched from the selected bullet
    // so an earlier duplicate title cannot capture the note.
    let anchor = markup::question_line_anchor(target.title)?;
    let found = anchor
        .find_at(text, target.line.start)
        .filter(|m| m.start() < section.end)
        .ok_or_else(not_found)?;
    let block_start = found.start();
    let block_end = bullets
        .iter()
        .map(|bullet| bullet.line.start)
        .find(|start| *start > block_start)
        .unwrap_or(section.end);

    let block: Vec<Line<'_>> = lines_from(&text[block_start..block_end], block_start).collect();
    let Some(question_line) = block.first() else {
        return Err(not_found());
    };
    let base_indent = indentation(question_line.content);
    let note = request.normalized_note();

    let updated = match find_notes_list(&block) {
        Some(notes) => {
            let item = format!("{}- {note}\n", notes.item_indent);
            insert_after_line(text, &notes.last_line, &item)
        }
        None => {
            let last = block
                .iter()
                .rev()
                .find(|line| !line.is_blank())
                .unwrap_or(question_line);
            let addition = format!(
                "{base_indent}  - {}\n{base_indent}    - {note}\n",
                ListKey::Notes.label()
            );
            insert_after_line(text, last, &addition)
        }
    };

    info!(
        "event=add_note module=mutator status=ok topic_id={} question_index={}",
        entry.id, request.question_index
    );
    Ok(updated)
}

/// Existing notes sub-list inside a question block.
struct NotesList<'a> {
    /// Line a new note goes after: the last note bullet, or the label.
    last_line: Line<'a>,
    item_indent: String,
}

fn find_notes_list<'a>(block: &[Line<'a>]) -> Option<NotesList<'a>> {
    let label_position = block
        .iter()
        .skip(1)
        .position(|line| label_value(line.content, ListKey::Notes.label()).is_some())?
        + 1;
    let label = block[label_position];
    let label_depth = indentation(label.content).len();

    let items: Vec<Line<'a>> = block[label_position + 1..]
        .iter()
        .take_while(|line| {
            SUB_BULLET_RE.is_match(line.content)
                && indentation(line.content).len() > label_depth
                && !is_label_line(line.content)
        })
        .copied()
        .collect();

    let item_indent = match items.first() {
        Some(first) => indentation(first.content).to_string(),
        None => format!("{}  ", indentation(label.content)),
    };
    Some(NotesList {
        last_line: items.last().copied().unwrap_or(label),
        item_indent,
    })
}

#[cfg(test)]
mod tests {
    use super::add_note;
    use crate::model::intent::AddNoteRequest;
    use crate::mutator::MutationError;

    const TEXT: &str = "### 1. Arrays & Strings\n- [ ] Question 1: Two Sum\n  - **Difficulty:** Easy\n  - **Notes:**\n    - first note\n  - **Key Points:**\n    - map\n- [ ] Question 2: Two Sum\n  - **Difficulty:** Easy\n\n---\n";

    #[test]
    fn appends_after_existing_notes() {
        let updated = add_note(TEXT, &AddNoteRequest::new(0, 0, "second note")).unwrap();
        assert!(updated.contains("    - first note\n    - second note\n  - **Key Points:**\n"));
    }

    #[test]
    fn duplicate_titles_resolve_by_position() {
        let updated = add_note(TEXT, &AddNoteRequest::new(0, 1, "only here")).unwrap();
        assert!(updated.ends_with(
            "- [ ] Question 2: Two Sum\n  - **Difficulty:** Easy\n  - **Notes:**\n    - only here\n\n---\n"
        ));
        assert!(updated.contains("    - first note\n  - **Key Points:**"));
    }

    #[test]
    fn notes_label_mentioned_in_an_item_is_not_the_notes_list() {
        let text = "### 1. Arrays & Strings\n- [ ] Question 1: Two Sum\n  - **Key Points:**\n    - see **Notes:** section\n    - single pass\n";
        let updated = add_note(text, &AddNoteRequest::new(0, 0, "sorted input")).unwrap();
        assert_eq!(
            updated,
            format!("{text}  - **Notes:**\n    - sorted input\n")
        );
    }

    #[test]
    fn empty_notes_label_gets_first_item() {
        let text = "### 2. Linked Lists\n- [x] Question 1: Reverse\n  - **Notes:**\n";
        let updated = add_note(text, &AddNoteRequest::new(1, 0, "iterative")).unwrap();
        assert_eq!(
            updated,
            "### 2. Linked Lists\n- [x] Question 1: Reverse\n  - **Notes:**\n    - iterative\n"
        );
    }

    #[test]
    fn out_of_range_indices_fail() {
        let err = add_note(TEXT, &AddNoteRequest::new(0, 2, "x")).unwrap_err();
        assert!(matches!(
            err,
            MutationError::QuestionNotFound {
                topic_id: 1,
                question_index: 2
            }
        ));
        let err = add_note(TEXT, &AddNoteRequest::new(14, 0, "x")).unwrap_err();
        assert!(matches!(err, MutationError::TopicNotFound(_)));
        let err = add_note(TEXT, &AddNoteRequest::new(3, 0, "x")).unwrap_err();
        assert!(matches!(err, MutationError::TopicNotFound(_)));
    }
}
