use tracker_core::{
    add_question, add_question_with_policy, parse, AddQuestionRequest, CounterPolicy, Difficulty,
    IntentValidationError, MutationError,
};

const DOC: &str = "# DSA Practice Tracker

## Progress
- **Total Questions Solved:** 1

---

### 1. Arrays & Strings
- **Status:** 🔴 Not Started
- **Questions Solved:** 0

#### Questions:

---

### 4. Trees
- **Status:** 🟡 In Progress
- **Questions Solved:** 1

#### Questions:
- [x] Question 1: Binary Search
  - **Difficulty:** Easy

---
";

fn two_sum() -> AddQuestionRequest {
    AddQuestionRequest {
        difficulty: Some(Difficulty::Medium),
        ..AddQuestionRequest::new(1, "Two Sum")
    }
}

#[test]
fn first_question_flips_status_and_counters() {
    let inserted = add_question(DOC, &two_sum()).unwrap();

    assert_eq!(inserted.question_number, 1);
    assert_eq!(
        inserted.solution.path,
        "01-Arrays-Strings/Two-Sum/solution.md"
    );
    let expected = "# DSA Practice Tracker

## Progress
- **Total Questions Solved:** 2

---

### 1. Arrays & Strings
- **Status:** 🟡 In Progress
- **Questions Solved:** 1

#### Questions:

- [ ] Question 1: Two Sum
  - **Difficulty:** Medium
  - **Solution:** [01-Arrays-Strings/Two-Sum/solution.md](01-Arrays-Strings/Two-Sum/solution.md)

---

### 4. Trees
- **Status:** 🟡 In Progress
- **Questions Solved:** 1

#### Questions:
- [x] Question 1: Binary Search
  - **Difficulty:** Easy

---
";
    assert_eq!(inserted.text, expected);
}

#[test]
fn inserted_question_parses_back() {
    let request = AddQuestionRequest {
        key_points: Some("hash map of complements\nsingle pass".to_string()),
        edge_cases: Some("duplicates".to_string()),
        ..two_sum()
    };
    let inserted = add_question(DOC, &request).unwrap();
    let parsed = parse(&inserted.text);

    let arrays = parsed.questions_for_topic(1);
    assert_eq!(arrays.len(), 1);
    let question = arrays[0];
    assert_eq!(question.title, "Two Sum");
    assert!(!question.completed);
    assert_eq!(question.difficulty, Difficulty::Medium);
    assert_eq!(
        question.solution_path.as_deref(),
        Some("01-Arrays-Strings/Two-Sum/solution.md")
    );
    assert_eq!(
        question.key_points,
        vec!["hash map of complements", "single pass"]
    );
    assert_eq!(question.edge_cases, vec!["duplicates"]);

    // Other topics are untouched.
    assert_eq!(parsed.questions_for_topic(4).len(), 1);
}

#[test]
fn items_mentioning_labels_round_trip() {
    let request = AddQuestionRequest {
        key_points: Some("hash map\nsee **Notes:** section\nsingle pass".to_string()),
        edge_cases: Some("same as **Difficulty:** Hard variant".to_string()),
        ..two_sum()
    };
    let inserted = add_question(DOC, &request).unwrap();
    let parsed = parse(&inserted.text);
    let question = parsed.questions_for_topic(1)[0];

    assert_eq!(
        question.key_points,
        vec!["hash map", "see **Notes:** section", "single pass"]
    );
    assert_eq!(question.edge_cases, vec!["same as **Difficulty:** Hard variant"]);
    assert!(question.notes.is_empty());
    assert_eq!(question.difficulty, Difficulty::Medium);
}

#[test]
fn placeholder_list_items_are_rejected() {
    let request = AddQuestionRequest {
        key_points: Some("hash map\nproof to be updated".to_string()),
        ..two_sum()
    };
    let err = add_question(DOC, &request).unwrap_err();
    assert!(matches!(
        err,
        MutationError::InvalidIntent(IntentValidationError::PlaceholderText(_))
    ));
}

#[test]
fn numbering_follows_existing_entries() {
    let first = add_question(DOC, &two_sum()).unwrap();
    let second = add_question(&first.text, &AddQuestionRequest::new(1, "3Sum")).unwrap();
    assert_eq!(second.question_number, 2);
    assert!(second.text.contains("- [ ] Question 2: 3Sum\n"));
    assert!(second.text.contains("- **Questions Solved:** 2\n"));
    assert!(second.text.contains("- **Total Questions Solved:** 3\n"));

    let trees = add_question(DOC, &AddQuestionRequest::new(4, "Level Order")).unwrap();
    assert_eq!(trees.question_number, 2);
    assert_eq!(
        trees.solution.path,
        "04-Trees/Level-Order/solution.md"
    );
}

#[test]
fn titles_with_pattern_characters_are_literal() {
    let titles = ["Pow(x, n)", "[Easy] 1. Foo", "a+b*c?", "Sum $ of ^ paths"];
    let mut text = DOC.to_string();
    for title in titles {
        text = add_question(&text, &AddQuestionRequest::new(4, title))
            .unwrap()
            .text;
    }

    let parsed = parse(&text);
    let parsed_titles: Vec<&str> = parsed
        .questions_for_topic(4)
        .iter()
        .map(|q| q.title.as_str())
        .collect();
    assert_eq!(
        parsed_titles,
        vec!["Binary Search", "Pow(x, n)", "[Easy] 1. Foo", "a+b*c?", "Sum $ of ^ paths"]
    );
    assert!(text.contains("- [ ] Question 2: Pow(x, n)\n"));
    assert!(text.contains("- [ ] Question 5: Sum $ of ^ paths\n"));
}

#[test]
fn unknown_topic_and_missing_heading_leave_no_result() {
    let err = add_question(DOC, &AddQuestionRequest::new(99, "X")).unwrap_err();
    assert!(matches!(err, MutationError::TopicNotFound(_)));

    let err = add_question(DOC, &AddQuestionRequest::new(5, "Dijkstra")).unwrap_err();
    assert!(matches!(err, MutationError::TopicNotFound(_)));
}

#[test]
fn blank_title_is_rejected() {
    let err = add_question(DOC, &AddQuestionRequest::new(1, "   ")).unwrap_err();
    assert!(matches!(err, MutationError::InvalidIntent(_)));
}

#[test]
fn recount_heals_drifted_counters() {
    let drifted = DOC.replace(
        "- **Questions Solved:** 1\n\n#### Questions:\n- [x]",
        "- **Questions Solved:** 7\n\n#### Questions:\n- [x]",
    );
    let increment = add_question(&drifted, &AddQuestionRequest::new(4, "Level Order")).unwrap();
    assert!(increment.text.contains("- **Questions Solved:** 8\n"));

    let recount = add_question_with_policy(
        &drifted,
        &AddQuestionRequest::new(4, "Level Order"),
        CounterPolicy::Recount,
    )
    .unwrap();
    assert!(recount.text.contains("- **Questions Solved:** 2\n"));
    assert!(recount.text.contains("- **Total Questions Solved:** 2\n"));
    // The empty Arrays section keeps its own counter.
    assert!(recount.text.contains("- **Questions Solved:** 0\n"));
}
