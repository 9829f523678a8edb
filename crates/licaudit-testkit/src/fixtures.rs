//! Test fixtures and helpers.
//!
//! Builders for declaration text, commit messages, linear in-memory
//! histories, and licence directories.

use std::collections::BTreeMap;
use std::fs;
use std::io;

use licaudit_core::{LicenceHash, Signature};
use licaudit_history::{CommitId, MemoryHistory};
use tempfile::TempDir;

/// Text of a short licence, stored as `COPYING.MIT` by [`licence_dir`].
pub const MIT_TEXT: &str = "Permission is hereby granted, free of charge, to any person obtaining a copy\n\
of this software and associated documentation files (the \"Software\"), to deal\n\
in the Software without restriction.\n";

/// Hash of [`MIT_TEXT`].
pub fn mit_hash() -> LicenceHash {
    LicenceHash::digest(MIT_TEXT.as_bytes())
}

/// Create a temporary licence directory holding `COPYING.<NAME>` for each
/// `(name, text)` pair.
pub fn licence_dir(licences: &[(&str, &str)]) -> io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for (name, text) in licences {
        fs::write(
            dir.path().join(format!("COPYING.{}", name.to_uppercase())),
            text,
        )?;
    }
    Ok(dir)
}

/// A licence directory holding only the MIT licence.
pub fn mit_licence_dir() -> io::Result<TempDir> {
    licence_dir(&[("mit", MIT_TEXT)])
}

// ─────────────────────────────────────────────────────────────────────────────
// Declaration text
// ─────────────────────────────────────────────────────────────────────────────

/// `I hereby licence these changes ...`
pub fn current_grant(hash: &LicenceHash) -> String {
    format!("I hereby licence these changes under the licence with SHA256 hash {hash}.")
}

/// `We, <person>, hereby license these changes ...`
pub fn current_grant_by(person: &str, hash: &LicenceHash) -> String {
    format!(
        "We, {person}, hereby license these changes under the license with SHA256 hash {hash}."
    )
}

/// Retroactive grant on behalf of `person`.
pub fn retroactive_grant(person: &str, hash: &LicenceHash) -> String {
    format!(
        "To the extent that I, {person}, have a copyright interest in the changes in this \
         commit, and the changes in all commits upon which this commit depends, including \
         changes occluded by subsequent changes, I hereby licence those changes under the \
         copyright licence with SHA256 hash {hash}."
    )
}

/// The deprecated retroactive grant, which speaks for the commit author.
pub fn deprecated_grant(hash: &LicenceHash) -> String {
    format!(
        "To the extent that I have a copyright interest in the files in this repository, and \
         the sequence of changes leading to those files, and all intermediate states resulting \
         from a partial application of those changes, including changes occluded by subsequent \
         changes, I hereby licence those files and changes present and past under the copyright \
         licence with SHA256 hash {hash}."
    )
}

/// Completeness declaration by `person` naming `persons`.
pub fn completeness(person: &str, persons: &[&str]) -> String {
    format!(
        "As regards this commit, and all commits upon which this commit depends, {person} \
         hereby declares that no entity other than {} has a copyright interest in any such \
         commit (and the changes therein) authored by their person.",
        join_persons(persons)
    )
}

/// Join names as English prose: `A`, `A and B`, `A, B, and C`.
pub fn join_persons(persons: &[&str]) -> String {
    match persons {
        [] => String::new(),
        [one] => one.to_string(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// A commit message: subject, then each stanza on its own marked line.
///
/// Stanzas are separated by blank lines; adjacent marked lines would fold
/// into a single stanza.
pub fn message(subject: &str, stanzas: &[String]) -> String {
    let mut out = format!("{subject}\n");
    for stanza in stanzas {
        out.push_str(&format!("\n\u{a9}: {stanza}\n"));
    }
    out
}

/// Hard-wrap a stanza onto marked lines no longer than `width` characters of
/// text each. Continuation lines use the `©!` marker.
pub fn wrap_stanza(stanza: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in stanza.split(' ') {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let marker = if i == 0 { ':' } else { '!' };
            format!("\u{a9}{marker} {line}\n")
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Histories
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a linear history, oldest commit first.
///
/// Each commit appends fresh, distinct lines to a single file, so the number
/// of added lines is exactly what the caller asks for.
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    history: MemoryHistory,
    files: BTreeMap<String, String>,
    head: Option<CommitId>,
    lines_written: usize,
}

impl HistoryBuilder {
    /// Path of the file each commit appends to.
    pub const CHANGES_FILE: &'static str = "CHANGES";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit on top of the current head that adds `added_lines`
    /// lines.
    pub fn commit(&mut self, author: &Signature, message: &str, added_lines: usize) -> CommitId {
        let changes = self.files.entry(Self::CHANGES_FILE.to_string()).or_default();
        for _ in 0..added_lines {
            self.lines_written += 1;
            changes.push_str(&format!("change {}\n", self.lines_written));
        }
        self.snapshot(author, message)
    }

    /// Add a commit that overwrites the given files.
    pub fn commit_files(
        &mut self,
        author: &Signature,
        message: &str,
        files: &[(&str, &str)],
    ) -> CommitId {
        for (path, contents) in files {
            self.files.insert(path.to_string(), contents.to_string());
        }
        self.snapshot(author, message)
    }

    fn snapshot(&mut self, author: &Signature, message: &str) -> CommitId {
        let tree = self
            .history
            .insert_tree(self.files.iter().map(|(p, c)| (p.clone(), c.as_str())));
        let parents = self.head.iter().cloned().collect();
        let id = self
            .history
            .insert_commit(tree, parents, author.clone(), message);
        self.history.set_ref("HEAD", id.clone());
        self.head = Some(id.clone());
        id
    }

    /// The newest commit so far.
    pub fn head(&self) -> Option<&CommitId> {
        self.head.as_ref()
    }

    /// The history built so far.
    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    /// Finish, with `HEAD` pointing at the newest commit.
    pub fn build(self) -> MemoryHistory {
        self.history
    }
}
