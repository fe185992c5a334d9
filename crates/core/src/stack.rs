// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-stack resolution
//!
//! A command stack mixes literal console commands, script files and
//! directories of scripts. Resolution builds an ordered tree (directories own
//! their scripts) and flattens it in pre-order, keying every entry with a
//! [`PriorityKey`] such as `2.1` (second top-level entry, first script in it).

use crate::redact::Credentials;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of console script files inside a directory entry
pub const SCRIPT_EXTENSION: &str = "cmd";

/// Directive that makes the console execute a script file
pub const READ_DIRECTIVE: &str = "read";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("script at {0} was never staged")]
    Unstaged(PriorityKey),
}

/// One declared entry of the command stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEntry {
    Literal(String),
    ScriptFile(PathBuf),
    ScriptDirectory(PathBuf),
}

impl CommandEntry {
    /// Classify a raw entry by what exists on the local filesystem
    pub fn classify(raw: &str) -> Self {
        let path = Path::new(raw);
        if path.is_dir() {
            CommandEntry::ScriptDirectory(path.to_path_buf())
        } else if path.is_file() {
            CommandEntry::ScriptFile(path.to_path_buf())
        } else {
            CommandEntry::Literal(raw.to_string())
        }
    }
}

/// Execution-order key: one rank per nesting level, compared level by level
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriorityKey(Vec<u32>);

impl PriorityKey {
    /// Key of a top-level entry
    pub fn top(rank: u32) -> Self {
        Self(vec![rank])
    }

    /// Key of the `rank`-th entry nested under this one
    pub fn child(&self, rank: u32) -> Self {
        let mut ranks = self.0.clone();
        ranks.push(rank);
        Self(ranks)
    }

    pub fn ranks(&self) -> &[u32] {
        &self.0
    }

    /// Nesting depth, 1 for top-level entries
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for PriorityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for rank in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", rank)?;
            first = false;
        }
        Ok(())
    }
}

impl std::str::FromStr for PriorityKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()
            .map(Self)
    }
}

impl Serialize for PriorityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A slot of the command plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanEntry {
    Command(String),
    /// A script waiting to be staged on the console host
    Pending,
}

/// Node of the resolved tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackNode {
    /// Position among its siblings, starting at 1
    pub rank: u32,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Command(String),
    Script(PathBuf),
    Directory {
        path: PathBuf,
        children: Vec<StackNode>,
    },
}

/// A script left out of the stack because it could not be checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptSkip {
    pub path: PathBuf,
    pub reason: String,
}

/// Flattened command stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStack {
    /// Scripts to stage, by key
    pub files: BTreeMap<PriorityKey, PathBuf>,
    /// Every entry, by key; scripts are [`PlanEntry::Pending`] until staged
    pub plan: BTreeMap<PriorityKey, PlanEntry>,
    pub skipped: Vec<ScriptSkip>,
}

impl ResolvedStack {
    /// Flatten a resolved tree by pre-order walk
    pub fn from_tree(nodes: &[StackNode], skipped: Vec<ScriptSkip>) -> Self {
        let mut stack = Self {
            skipped,
            ..Self::default()
        };
        stack.flatten(nodes, None);
        stack
    }

    fn flatten(&mut self, nodes: &[StackNode], parent: Option<&PriorityKey>) {
        for node in nodes {
            let key = match parent {
                Some(p) => p.child(node.rank),
                None => PriorityKey::top(node.rank),
            };
            match &node.kind {
                NodeKind::Command(text) => {
                    self.plan.insert(key, PlanEntry::Command(text.clone()));
                }
                NodeKind::Script(path) => {
                    self.files.insert(key.clone(), path.clone());
                    self.plan.insert(key, PlanEntry::Pending);
                }
                NodeKind::Directory { children, .. } => self.flatten(children, Some(&key)),
            }
        }
    }

    /// Replace the placeholder at `key` with a `read <remote_path>` directive
    ///
    /// Returns false if `key` is not a script slot.
    pub fn stage(&mut self, key: &PriorityKey, remote_path: &str) -> bool {
        if !self.files.contains_key(key) {
            return false;
        }
        self.plan.insert(
            key.clone(),
            PlanEntry::Command(format!("{} {}", READ_DIRECTIVE, remote_path)),
        );
        true
    }

    /// Keys whose scripts are not staged yet
    pub fn pending(&self) -> impl Iterator<Item = &PriorityKey> {
        self.plan
            .iter()
            .filter(|(_, entry)| **entry == PlanEntry::Pending)
            .map(|(key, _)| key)
    }

    /// Runnable commands in execution order
    pub fn commands(&self) -> Result<Vec<(PriorityKey, String)>, StackError> {
        self.plan
            .iter()
            .map(|(key, entry)| match entry {
                PlanEntry::Command(text) => Ok((key.clone(), text.clone())),
                PlanEntry::Pending => Err(StackError::Unstaged(key.clone())),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }
}

/// Builds the ordered tree for a command stack
pub struct Resolver<'a> {
    creds: &'a Credentials,
    filter: Option<&'a Regex>,
    skipped: Vec<ScriptSkip>,
}

impl<'a> Resolver<'a> {
    /// `creds` only redact log lines; `filter` restricts which scripts are kept
    pub fn new(creds: &'a Credentials, filter: Option<&'a Regex>) -> Self {
        Self {
            creds,
            filter,
            skipped: Vec::new(),
        }
    }

    /// Resolve raw stack entries into a flattened stack
    pub fn resolve(mut self, entries: &[String]) -> ResolvedStack {
        let classified: Vec<CommandEntry> =
            entries.iter().map(|e| CommandEntry::classify(e)).collect();
        let tree = self.build(&classified, 1);
        ResolvedStack::from_tree(&tree, self.skipped)
    }

    /// Build one level of the tree; ranks count included entries only
    pub fn build(&mut self, entries: &[CommandEntry], depth: usize) -> Vec<StackNode> {
        let mut nodes = Vec::with_capacity(entries.len());
        let mut next_rank = 1u32;

        for entry in entries {
            let kind = match entry {
                CommandEntry::Literal(text) => {
                    tracing::debug!(depth, command = %self.creds.redact_str(text), "found command");
                    Some(NodeKind::Command(text.clone()))
                }
                CommandEntry::ScriptFile(path) => {
                    tracing::debug!(depth, path = %path.display(), "found script");
                    self.include_script(path, depth).map(NodeKind::Script)
                }
                CommandEntry::ScriptDirectory(path) => {
                    tracing::debug!(depth, path = %path.display(), "found directory");
                    let scripts = self.list_scripts(path);
                    let children = self.build(&scripts, depth + 1);
                    Some(NodeKind::Directory {
                        path: path.clone(),
                        children,
                    })
                }
            };

            if let Some(kind) = kind {
                nodes.push(StackNode {
                    rank: next_rank,
                    kind,
                });
                next_rank += 1;
            }
        }

        nodes
    }

    fn include_script(&mut self, path: &Path, depth: usize) -> Option<PathBuf> {
        if let Some(filter) = self.filter {
            let body = match std::fs::read(path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "fail on checking script by filter");
                    self.skipped.push(ScriptSkip {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                    return None;
                }
            };
            let matched = filter.is_match(&body);
            tracing::debug!(depth, path = %path.display(), filter = %filter, matched, "checked script by filter");
            if !matched {
                return None;
            }
        }
        Some(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()))
    }

    /// `*.cmd` entries of a directory, sorted by name
    fn list_scripts(&mut self, dir: &Path) -> Vec<CommandEntry> {
        let read = match std::fs::read_dir(dir) {
            Ok(read) => read,
            Err(e) => {
                tracing::error!(path = %dir.display(), error = %e, "cannot list script directory");
                self.skipped.push(ScriptSkip {
                    path: dir.to_path_buf(),
                    reason: e.to_string(),
                });
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = read
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_script_name(path))
            .collect();
        paths.sort();

        paths
            .into_iter()
            .map(|path| {
                if path.is_dir() {
                    CommandEntry::ScriptDirectory(path)
                } else {
                    CommandEntry::ScriptFile(path)
                }
            })
            .collect()
    }
}

// Hidden files are skipped the way a shell glob would
fn is_script_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !name.starts_with('.') && path.extension().is_some_and(|e| e == SCRIPT_EXTENSION)
}

/// Resolve a command stack
pub fn resolve(entries: &[String], creds: &Credentials, filter: Option<&Regex>) -> ResolvedStack {
    Resolver::new(creds, filter).resolve(entries)
}

#[cfg(test)]
#[path = "stack_tests.rs"]
mod tests;
