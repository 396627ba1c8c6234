//! Fixed topic catalog.
//!
//! # Responsibility
//! - Own the ordered list of 14 topics questions are grouped under.
//! - Map catalog entries to document headings and companion folders.
//!
//! # Invariants
//! - Topic ids are 1-based and match catalog position + 1.
//! - Names and folders never change at runtime.

use serde::{Deserialize, Serialize};

/// 1-based stable topic identifier.
pub type TopicId = u32;

/// Static catalog entry backing one [`Topic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicEntry {
    pub id: TopicId,
    /// Display name used in `### <id>. <name>` headings.
    pub name: &'static str,
    /// Companion-file folder, `<2-digit id>-<slug>`.
    pub folder: &'static str,
}

impl TopicEntry {
    /// Returns the canonical heading line for this topic.
    pub fn heading(&self) -> String {
        format!("### {}. {}", self.id, self.name)
    }

    /// Returns the 0-based catalog position.
    pub fn index(&self) -> usize {
        (self.id - 1) as usize
    }

    pub fn to_topic(&self) -> Topic {
        Topic {
            id: self.id,
            name: self.name.to_string(),
        }
    }
}

const TOPIC_CATALOG: [TopicEntry; 14] = [
    TopicEntry {
        id: 1,
        name: "Arrays & Strings",
        folder: "01-Arrays-Strings",
    },
    TopicEntry {
        id: 2,
        name: "Linked Lists",
        folder: "02-Linked-Lists",
    },
    TopicEntry {
        id: 3,
        name: "Stacks & Queues",
        folder: "03-Stacks-Queues",
    },
    TopicEntry {
        id: 4,
        name: "Trees",
        folder: "04-Trees",
    },
    TopicEntry {
        id: 5,
        name: "Graphs",
        folder: "05-Graphs",
    },
    TopicEntry {
        id: 6,
        name: "Dynamic Programming",
        folder: "06-Dynamic-Programming",
    },
    TopicEntry {
        id: 7,
        name: "Backtracking",
        folder: "07-Backtracking",
    },
    TopicEntry {
        id: 8,
        name: "Greedy Algorithms",
        folder: "08-Greedy-Algorithms",
    },
    TopicEntry {
        id: 9,
        name: "Binary Search",
        folder: "09-Binary-Search",
    },
    TopicEntry {
        id: 10,
        name: "Hash Tables",
        folder: "10-Hash-Tables",
    },
    TopicEntry {
        id: 11,
        name: "Heaps",
        folder: "11-Heaps",
    },
    TopicEntry {
        id: 12,
        name: "Sliding Window",
        folder: "12-Sliding-Window",
    },
    TopicEntry {
        id: 13,
        name: "Two Pointers",
        folder: "13-Two-Pointers",
    },
    TopicEntry {
        id: 14,
        name: "Bit Manipulation",
        folder: "14-Bit-Manipulation",
    },
];

/// Owned topic projection returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
}

/// Returns every catalog entry in id order.
pub fn catalog_entries() -> &'static [TopicEntry] {
    &TOPIC_CATALOG
}

/// Returns the full catalog as owned topics.
pub fn topic_catalog() -> Vec<Topic> {
    TOPIC_CATALOG.iter().map(TopicEntry::to_topic).collect()
}

/// Looks up a catalog entry by 1-based id.
pub fn topic_by_id(id: TopicId) -> Option<&'static TopicEntry> {
    TOPIC_CATALOG.iter().find(|entry| entry.id == id)
}

/// Looks up a catalog entry by 0-based position.
pub fn topic_by_index(index: usize) -> Option<&'static TopicEntry> {
    TOPIC_CATALOG.get(index)
}

/// Looks up a catalog entry by exact heading name (surrounding whitespace ignored).
pub fn topic_by_name(name: &str) -> Option<&'static TopicEntry> {
    let name = name.trim();
    TOPIC_CATALOG.iter().find(|entry| entry.name == name)
}

#[cfg(test)]
mod tests {
    use super::{catalog_entries, topic_by_id, topic_by_index, topic_by_name};

    #[test]
    fn catalog_ids_match_positions() {
        for (position, entry) in catalog_entries().iter().enumerate() {
            assert_eq!(entry.index(), position);
            assert!(entry.folder.starts_with(&format!("{:02}-", entry.id)));
        }
    }

    #[test]
    fn lookups_agree() {
        let trees = topic_by_name(" Trees ").expect("Trees is in the catalog");
        assert_eq!(trees.id, 4);
        assert_eq!(topic_by_id(4), Some(trees));
        assert_eq!(topic_by_index(3), Some(trees));
        assert_eq!(trees.heading(), "### 4. Trees");
        assert!(topic_by_id(0).is_none());
        assert!(topic_by_id(15).is_none());
        assert!(topic_by_name("Tries").is_none());
    }
}
