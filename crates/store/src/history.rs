//! Linear, commit-addressed history of the files in one wiki.
//!
//! Every commit records the paths it wrote or deleted. A page's revision
//! list is the subset of commits touching its file, newest first.

use std::collections::BTreeMap;

use forgewiki_core::types::Timestamp;
use sha1::{Digest, Sha1};

use crate::error::StoreError;

/// Who authored or committed a change, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub when: Timestamp,
}

/// A single file operation inside a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Write { path: String, content: Vec<u8> },
    Delete { path: String },
}

impl Change {
    pub fn path(&self) -> &str {
        match self {
            Change::Write { path, .. } | Change::Delete { path } => path,
        }
    }
}

/// Everything needed to create a commit except its id and parent.
#[derive(Debug, Clone)]
pub struct CommitDraft {
    pub author: Signature,
    pub committer: Signature,
    pub message: String,
    pub changes: Vec<Change>,
}

/// A commit as stored in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// 40-character lowercase hex id.
    pub id: String,
    pub parent: Option<String>,
    pub author: Signature,
    pub committer: Signature,
    pub message: String,
    /// Sorted, de-duplicated paths this commit wrote or deleted.
    pub paths: Vec<String>,
}

impl CommitRecord {
    pub fn touches(&self, path: &str) -> bool {
        self.paths.binary_search_by(|p| p.as_str().cmp(path)).is_ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct WikiHistory {
    commits: Vec<CommitRecord>,
    tree: BTreeMap<String, Vec<u8>>,
}

impl WikiHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<&CommitRecord> {
        self.commits.last()
    }

    /// Number of commits in the whole wiki.
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Content of a file at the head commit.
    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.tree.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.tree.contains_key(path)
    }

    /// Paths present at the head commit, in byte order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.tree.keys().map(String::as_str)
    }

    /// Record a new commit on top of the head, deriving its id from its
    /// parent, changes, signatures and message.
    pub fn commit(&mut self, draft: CommitDraft) -> CommitRecord {
        let parent = self.head().map(|c| c.id.clone());
        let id = commit_id(parent.as_deref(), &draft);
        self.apply(id, parent, draft)
    }

    /// Replay a commit with a known id, as when loading existing history.
    pub fn import(&mut self, id: &str, draft: CommitDraft) -> Result<CommitRecord, StoreError> {
        if self.commits.iter().any(|c| c.id == id) {
            return Err(StoreError::CommitExists(id.to_string()));
        }
        let parent = self.head().map(|c| c.id.clone());
        Ok(self.apply(id.to_string(), parent, draft))
    }

    fn apply(&mut self, id: String, parent: Option<String>, draft: CommitDraft) -> CommitRecord {
        let mut paths = Vec::with_capacity(draft.changes.len());
        for change in draft.changes {
            match change {
                Change::Write { path, content } => {
                    self.tree.insert(path.clone(), content);
                    paths.push(path);
                }
                Change::Delete { path } => {
                    self.tree.remove(&path);
                    paths.push(path);
                }
            }
        }
        paths.sort();
        paths.dedup();

        let record = CommitRecord {
            id,
            parent,
            author: draft.author,
            committer: draft.committer,
            message: draft.message,
            paths,
        };
        self.commits.push(record.clone());
        record
    }

    /// Commits touching `path`, newest first.
    pub fn revisions(&self, path: &str) -> Vec<&CommitRecord> {
        self.commits.iter().rev().filter(|c| c.touches(path)).collect()
    }

    pub fn last_commit(&self, path: &str) -> Option<&CommitRecord> {
        self.commits.iter().rev().find(|c| c.touches(path))
    }

    pub fn commit_count(&self, path: &str) -> usize {
        self.commits.iter().filter(|c| c.touches(path)).count()
    }
}

/// Git-style blob digest of file content.
fn blob_id(content: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

fn signature_line(kind: &str, sig: &Signature) -> String {
    format!("{kind} {} <{}> {} +0000\n", sig.name, sig.email, sig.when.timestamp())
}

fn commit_id(parent: Option<&str>, draft: &CommitDraft) -> String {
    let mut changes: Vec<(&str, String)> = draft
        .changes
        .iter()
        .map(|change| match change {
            Change::Write { path, content } => (path.as_str(), blob_id(content)),
            Change::Delete { path } => (path.as_str(), "deleted".to_string()),
        })
        .collect();
    changes.sort();

    let mut hasher = Sha1::new();
    for (path, digest) in &changes {
        hasher.update(format!("change {path} {digest}\n").as_bytes());
    }
    if let Some(parent) = parent {
        hasher.update(format!("parent {parent}\n").as_bytes());
    }
    hasher.update(signature_line("author", &draft.author).as_bytes());
    hasher.update(signature_line("committer", &draft.committer).as_bytes());
    hasher.update(b"\n");
    hasher.update(draft.message.as_bytes());
    format!("{:x}", hasher.finalize())
}
