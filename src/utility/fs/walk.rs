// modbuild-rs: Space Engineers Mod Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Options for scanning build output.
    ///
    /// Build output is usually gitignored, so ignore files are not honoured.
    /// Dotfiles are artifacts like any other and are included. Symlinked
    /// directories are followed.
    #[must_use]
    pub fn for_artifacts() -> Self {
        Self::builder()
            .with_respect_gitignore(false)
            .with_include_hidden(true)
            .with_follow_links(true)
            .build()
    }
}

/// Items produced by [`parallel_map_files`] plus the walk errors seen on the way.
#[derive(Debug)]
pub struct WalkOutput<T> {
    items: Vec<T>,
    errors: Vec<String>,
}

impl<T> WalkOutput<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Walk errors (unreadable directories, broken links, ...).
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    builder
}

/// Walks `root` in parallel and maps every regular file through `map`.
///
/// `map` runs on the walker's worker threads, so expensive per-file work
/// (hashing, metadata reads) is spread across cores. Results come back in
/// no particular order.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
///
/// # Example
/// ```no_run
/// use modbuild_rs::utility::fs::walk::{parallel_map_files, WalkOptions};
///
/// let sizes = parallel_map_files("/path/to/Models", &WalkOptions::for_artifacts(), |path| {
///     path.metadata().ok().map(|m| m.len())
/// })?;
/// println!("{} bytes", sizes.items().iter().sum::<u64>());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_map_files<P, T, F>(
    root: P,
    options: &WalkOptions,
    map: F,
) -> Result<WalkOutput<T>>
where
    P: AsRef<Path>,
    T: Send,
    F: Fn(&Path) -> Option<T> + Send + Sync,
{
    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    // The walk finishes before anything is drained, so the channels must not block.
    let (item_tx, item_rx) = flume::unbounded::<T>();
    let (error_tx, error_rx) = flume::unbounded::<String>();
    let map = Arc::new(map);

    build_walker(root, options).build_parallel().run(|| {
        let item_tx = item_tx.clone();
        let error_tx = error_tx.clone();
        let map = Arc::clone(&map);

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file())
                        && let Some(item) = map(entry.path())
                    {
                        let _ = item_tx.send(item);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "walk error");
                    let _ = error_tx.send(e.to_string());
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(item_tx);
    drop(error_tx);

    Ok(WalkOutput {
        items: item_rx.iter().collect(),
        errors: error_rx.iter().collect(),
    })
}

/// Finds files under `root` whose root-relative path matches a glob pattern.
///
/// # Errors
///
/// Returns an error if the root directory does not exist or the pattern is invalid.
///
/// # Example
/// ```no_run
/// use modbuild_rs::utility::fs::walk::find_files;
///
/// let models = find_files("/path/to/Models", "**/*.mwm")?;
/// println!("{} models", models.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(root: P, pattern: &str) -> Result<Vec<PathBuf>> {
    use wax::{Glob, Program};

    let root = root.as_ref();
    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let output = parallel_map_files(root, &WalkOptions::for_artifacts(), |path| {
        path.strip_prefix(root)
            .ok()
            .filter(|rel| glob.is_match(*rel))
            .map(|_| path.to_path_buf())
    })?;

    let mut files = output.into_items();
    files.sort();
    Ok(files)
}
