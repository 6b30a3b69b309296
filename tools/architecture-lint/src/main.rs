//! Runs the layer-boundary lint over `backend/src`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(src_dir) = backend_src() else {
        report("unable to locate backend/src above the current directory");
        return ExitCode::FAILURE;
    };
    match architecture_lint::lint_tree(&src_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn report(message: &str) {
    let _ = writeln!(io::stderr().lock(), "{message}");
}

/// Search upwards from the working directory, then from this crate.
fn backend_src() -> Option<PathBuf> {
    let starts = [
        std::env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ];
    starts
        .into_iter()
        .flatten()
        .find_map(|start| find_upwards(&start))
}

fn find_upwards(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("backend").join("src"))
        .find(|candidate| candidate.join("lib.rs").is_file())
}
