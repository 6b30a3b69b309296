//! Layer-boundary lint for the bookshelf backend.
//!
//! The backend keeps three layers under `backend/src`:
//!
//! - `domain` may not reach adapters or web/database frameworks;
//! - `inbound` may not reach `outbound` or the database stack;
//! - `outbound` may not reach `inbound` or the web stack.
//!
//! Test-only code is exempt: files named `tests.rs` or `*_tests.rs`, and
//! items gated behind `#[cfg(test)]`. Tests routinely wire an inbound adapter
//! to an in-memory outbound one.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};

const CRATE_NAME: &str = "bookshelf";
const LAYER_DIRS: [&str; 3] = ["domain", "inbound", "outbound"];
const WEB_CRATES: &[&str] = &["actix_web", "actix_session", "actix_http", "actix_rt"];
const DATABASE_CRATES: &[&str] = &["diesel", "diesel_async", "diesel_migrations"];

/// One forbidden dependency found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    /// What was crossed.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes of a lint run.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// The source tree could not be read.
    #[error("failed to read backend sources: {0}")]
    Io(#[from] io::Error),
    /// A file is not valid Rust.
    #[error("{}: cannot be linted: {message}", file.display())]
    Unparseable {
        /// File that failed to parse.
        file: PathBuf,
        /// Parser message.
        message: String,
    },
    /// One or more boundaries were crossed.
    #[error("layer boundary violations:\n{}", render(.0))]
    Violations(Vec<Violation>),
}

impl LintError {
    /// Violations carried by the error, if any.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Violations(found) => found,
            Self::Io(_) | Self::Unparseable { .. } => &[],
        }
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("  - {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Rust file to lint, addressed relative to `backend/src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to `backend/src`.
    pub path: PathBuf,
    /// Rust source text.
    pub contents: String,
}

impl SourceFile {
    /// Pair a relative path with its contents.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    fn is_test_only(&self) -> bool {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem == "tests" || stem.ends_with("_tests"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    fn of(path: &Path) -> Option<Self> {
        let first = path.components().next()?.as_os_str().to_str()?;
        Self::named(first)
    }

    fn named(name: &str) -> Option<Self> {
        match name {
            "domain" => Some(Self::Domain),
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    fn may_use_layer(self, other: Self) -> bool {
        !matches!(
            (self, other),
            (Self::Domain, Self::Inbound | Self::Outbound)
                | (Self::Inbound, Self::Outbound)
                | (Self::Outbound, Self::Inbound)
        )
    }

    fn may_use_crate(self, name: &str) -> bool {
        let forbidden: &[&[&str]] = match self {
            Self::Domain => &[WEB_CRATES, DATABASE_CRATES],
            Self::Inbound => &[DATABASE_CRATES],
            Self::Outbound => &[WEB_CRATES],
        };
        !forbidden.iter().any(|group| group.contains(&name))
    }
}

/// Lint every layer directory below `src_dir`.
///
/// # Errors
///
/// Returns [`LintError::Violations`] when any boundary is crossed, or an
/// I/O or parse error when the tree cannot be read.
pub fn lint_tree(src_dir: &Path) -> Result<(), LintError> {
    let mut files = Vec::new();
    for layer in LAYER_DIRS {
        let dir = src_dir.join(layer);
        if dir.is_dir() {
            read_sources(src_dir, &dir, &mut files)?;
        }
    }
    lint_files(&files)
}

/// Lint in-memory sources.
///
/// Files outside the three layer directories are ignored.
///
/// # Errors
///
/// See [`lint_tree`].
pub fn lint_files(files: &[SourceFile]) -> Result<(), LintError> {
    let mut violations = Vec::new();
    for file in files {
        let Some(layer) = Layer::of(&file.path) else {
            continue;
        };
        if file.is_test_only() {
            continue;
        }
        let syntax =
            syn::parse_file(&file.contents).map_err(|err| LintError::Unparseable {
                file: file.path.clone(),
                message: err.to_string(),
            })?;
        violations.extend(check(layer, &file.path, &syntax));
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations))
    }
}

fn check(layer: Layer, path: &Path, syntax: &syn::File) -> Vec<Violation> {
    let mut visitor = PathVisitor::default();
    visitor.visit_file(syntax);

    let mut messages: Vec<String> = visitor
        .paths
        .iter()
        .filter_map(|segments| offence(layer, segments))
        .collect();
    messages.sort();
    messages.dedup();
    messages
        .into_iter()
        .map(|message| Violation {
            file: path.to_path_buf(),
            message,
        })
        .collect()
}

fn offence(layer: Layer, segments: &[String]) -> Option<String> {
    let (first, rest) = segments.split_first()?;
    let target = match first.as_str() {
        "crate" => rest.first().and_then(|name| Layer::named(name)),
        CRATE_NAME => rest.first().and_then(|name| Layer::named(name)),
        "self" | "super" => None,
        other => Layer::named(other),
    };
    if let Some(target) = target {
        return (!layer.may_use_layer(target)).then(|| {
            format!(
                "{} must not depend on the {} layer",
                layer.name(),
                target.name()
            )
        });
    }
    (!layer.may_use_crate(first)).then(|| format!("{} must not use `{first}`", layer.name()))
}

fn is_test_gated(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Ident>()
                .is_ok_and(|ident| ident == "test")
    })
}

#[derive(Default)]
struct PathVisitor {
    paths: Vec<Vec<String>>,
}

impl PathVisitor {
    fn collect_use(&mut self, tree: &syn::UseTree, prefix: &[String]) {
        let extend = |name: &syn::Ident| {
            let mut segments = prefix.to_vec();
            segments.push(name.to_string());
            segments
        };
        match tree {
            syn::UseTree::Path(path) => self.collect_use(&path.tree, &extend(&path.ident)),
            syn::UseTree::Name(name) => self.paths.push(extend(&name.ident)),
            syn::UseTree::Rename(rename) => self.paths.push(extend(&rename.ident)),
            syn::UseTree::Glob(_) => self.paths.push(prefix.to_vec()),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.collect_use(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathVisitor {
    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        if !is_test_gated(&node.attrs) {
            self.collect_use(&node.tree, &[]);
        }
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        if !is_test_gated(&node.attrs) {
            visit::visit_item_mod(self, node);
        }
    }

    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        if !is_test_gated(&node.attrs) {
            visit::visit_item_fn(self, node);
        }
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        if node.segments.len() > 1 {
            self.paths.push(
                node.segments
                    .iter()
                    .map(|segment| segment.ident.to_string())
                    .collect(),
            );
        }
        visit::visit_path(self, node);
    }
}

fn read_sources(root: &Path, dir: &Path, out: &mut Vec<SourceFile>) -> Result<(), LintError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            read_sources(root, &path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let relative = path
                .strip_prefix(root)
                .map_err(|err| LintError::Unparseable {
                    file: path.clone(),
                    message: err.to_string(),
                })?
                .to_path_buf();
            out.push(SourceFile::new(relative, fs::read_to_string(&path)?));
        }
    }
    Ok(())
}
