// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{BTreeMap, BTreeSet};

use super::manifest::{Manifest, ManifestEntry};
use super::path::RelativePath;
use super::source::SourceFile;

/// Difference between the current sources and the last deployed state.
///
/// The three sets are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub to_copy: BTreeSet<RelativePath>,
    pub to_delete: BTreeSet<RelativePath>,
    pub unchanged: BTreeSet<RelativePath>,
}

impl SyncPlan {
    /// Compares enumerated files against the manifest.
    ///
    /// A file is copied when its fingerprint is new or different, or when
    /// `is_intact` reports that the deployed copy no longer matches its entry.
    pub fn compute<F>(
        files: &BTreeMap<RelativePath, SourceFile>,
        manifest: &Manifest,
        is_intact: F,
    ) -> Self
    where
        F: Fn(&ManifestEntry) -> bool,
    {
        let mut plan = Self::default();

        for (path, file) in files {
            match manifest.get(path) {
                Some(entry) if entry.fingerprint == file.fingerprint && is_intact(entry) => {
                    plan.unchanged.insert(path.clone());
                }
                _ => {
                    plan.to_copy.insert(path.clone());
                }
            }
        }

        plan.to_delete = manifest
            .paths()
            .filter(|path| !files.contains_key(*path))
            .cloned()
            .collect();

        plan
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_copy.is_empty() && self.to_delete.is_empty()
    }
}
