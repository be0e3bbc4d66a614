use camino::{Utf8Path, Utf8PathBuf};
use lazy_static::lazy_static;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::fs;
use thiserror::Error;

use crate::search_path::SearchPaths;

/// Source file extension appended when translating a module path into a
/// relative file path.
pub const CAIRO_EXT: &str = "cairo";

#[derive(Debug, Error)]
pub enum Error {
    #[error("[E010] Could not find '{path}' in any of the import search paths:\n{searched}\nSuggestions:\n  • Check that the file exists under one of the listed directories\n  • Add the missing directory with --cairo-path or the CAIRO_PATH variable\n  • Verify the import statement spells the module name correctly")]
    FileNotFound {
        path: Utf8PathBuf,
        searched: SearchPaths,
    },

    #[error("[E011] I/O error reading file '{path}': {error}\n\nSuggestions:\n  • Check the file is readable\n  • Verify file permissions")]
    Io {
        path: Utf8PathBuf,
        error: std::io::Error,
    },

    #[error("[E012] Internal import pattern compilation error")]
    Regex,
}

impl Error {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "E010",
            Self::Io { .. } => "E011",
            Self::Regex => "E012",
        }
    }
}

/// Complete dependency closure of an entry file, keyed for the remote
/// compiler.
///
/// The entry file is stored under its bare filename; every transitively
/// imported file is stored under the relative path it was located with.
/// The verification service reconstructs the module layout from these
/// keys, so the asymmetry is load-bearing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileBundle(HashMap<String, String>);

impl FileBundle {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consume the bundle into the raw mapping sent to the service.
    #[must_use]
    pub fn into_files(self) -> HashMap<String, String> {
        self.0
    }
}

/// Traversal state shared across a single [`collect_files`] call.
///
/// A fresh context is created per top-level invocation so no state leaks
/// between resolutions. The visited set is consulted before any file
/// access, which is what keeps cyclic and diamond-shaped import graphs
/// from recursing forever or duplicating work.
#[derive(Debug, Default)]
struct BundleContext {
    files: HashMap<String, String>,
    visited: HashSet<String>,
}

/// How the current file was reached, which decides its bundle key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Origin {
    Entry,
    Import,
}

/// Collect the entry file and every file it transitively imports.
///
/// Search paths are scanned in priority order for each file and the first
/// match wins; later roots are never consulted for that file. Files are
/// deduplicated by bundle key, first-resolved content wins.
///
/// # Errors
///
/// Will return `Err` if the entry file or any transitive import can't be
/// located under any search root, or if a located file can't be read.
pub fn collect_files(entry: &Utf8Path, search_paths: &SearchPaths) -> Result<FileBundle, Error> {
    let mut context = BundleContext::default();
    collect_into(entry, search_paths, Origin::Entry, &mut context)?;
    Ok(FileBundle(context.files))
}

fn collect_into(
    path: &Utf8Path,
    search_paths: &SearchPaths,
    origin: Origin,
    context: &mut BundleContext,
) -> Result<(), Error> {
    let key = bundle_key(path, origin);
    if !context.visited.insert(key.clone()) {
        // Already resolved at a shallower point of the traversal.
        debug!("already processed {key}");
        return Ok(());
    }

    for root in search_paths.iter() {
        let candidate = root.join(path);
        if candidate.is_file() {
            debug!("reading {key} from {candidate}");
            let text = fs::read_to_string(&candidate).map_err(|error| Error::Io {
                path: candidate.clone(),
                error,
            })?;

            let imports = extract_imports(&text)?;
            context.files.insert(key, text);

            for module in &imports {
                let import_path = module_to_path(module);
                collect_into(&import_path, search_paths, Origin::Import, context)?;
            }

            return Ok(());
        }
    }

    Err(Error::FileNotFound {
        path: path.to_path_buf(),
        searched: search_paths.clone(),
    })
}

/// The entry file is keyed by bare filename even when the caller passed
/// directory components; imported files keep their full relative path.
fn bundle_key(path: &Utf8Path, origin: Origin) -> String {
    match origin {
        Origin::Entry => path.file_name().unwrap_or(path.as_str()).to_string(),
        Origin::Import => path.as_str().to_string(),
    }
}

fn import_regex() -> Result<&'static regex::Regex, Error> {
    lazy_static! {
        static ref IMPORT_REGEX: Result<regex::Regex, regex::Error> =
            regex::Regex::new(r"(?m)^from\s(.*?)\simport");
    }

    IMPORT_REGEX.as_ref().map_err(|_| Error::Regex)
}

/// Extract the target of every `from <module> import ...` line.
///
/// Only this single-line form is recognized. Other import styles are
/// silently ignored, so files referenced that way never reach the bundle.
fn extract_imports(text: &str) -> Result<Vec<String>, Error> {
    let regex = import_regex()?;
    Ok(regex
        .captures_iter(text)
        .filter_map(|capture| capture.get(1))
        .map(|module| module.as_str().to_string())
        .collect())
}

/// Translate a dotted module path into the relative file path used to
/// locate it, e.g. `contracts.token` becomes `contracts/token.cairo`.
#[must_use]
pub fn module_to_path(module: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{}.{CAIRO_EXT}", module.replace('.', "/")))
}

/// Contract name as reported to the verification service: the file stem
/// of the entry file.
#[must_use]
pub fn contract_name(entry: &Utf8Path) -> String {
    entry.file_stem().unwrap_or(entry.as_str()).to_string()
}

/// Account contracts get a dedicated flag in the submission payload.
/// Detection is by naming convention.
#[must_use]
pub fn is_account_contract(entry: &Utf8Path) -> bool {
    contract_name(entry).ends_with("Account")
}
