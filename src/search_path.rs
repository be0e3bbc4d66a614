use camino::{Utf8Path, Utf8PathBuf};
use std::{env, fmt};
use thiserror::Error;

/// Environment variable holding additional import search directories as a
/// colon-separated list.
pub const CAIRO_PATH_ENV: &str = "CAIRO_PATH";

#[derive(Debug, Error)]
pub enum Error {
    #[error("[E001] {CAIRO_PATH_ENV} environment variable is not set\n\nSuggestions:\n  • Export {CAIRO_PATH_ENV} as a colon-separated list of directories\n  • Set {CAIRO_PATH_ENV}=\"\" if no extra directories are needed\n  • Use --cairo-path to add directories for a single invocation")]
    MissingCairoPath,

    #[error("[E002] Couldn't determine the current working directory\n\nSuggestions:\n  • Check that the current directory still exists\n  • Verify you have permission to access it")]
    CurrentDir(#[from] std::io::Error),

    #[error("[E003] Path contains invalid UTF-8 characters\n\nSuggestions:\n  • Use only ASCII characters in file paths\n  • Avoid special characters in directory names")]
    Utf8(#[from] camino::FromPathBufError),
}

impl Error {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCairoPath => "E001",
            Self::CurrentDir(_) => "E002",
            Self::Utf8(_) => "E003",
        }
    }
}

/// Ordered list of import search roots, highest priority first.
///
/// Constructed once per invocation and read-only afterwards. Lookups scan
/// the roots in order and the first match wins. Entries are absolute but
/// never checked for existence, a missing directory simply never matches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchPaths(Vec<Utf8PathBuf>);

impl SearchPaths {
    pub fn iter(&self) -> impl Iterator<Item = &Utf8Path> {
        self.0.iter().map(Utf8PathBuf::as_path)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Utf8PathBuf] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SearchPaths {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for root in &self.0 {
            writeln!(formatter, "  {root}")?;
        }
        Ok(())
    }
}

/// Assemble the import search paths for this invocation.
///
/// Roots are gathered in the order the Cairo compiler documents:
/// 1. the `--cairo-path` override, split on `:`
/// 2. the `CAIRO_PATH` environment variable, split on `:`
/// 3. the current working directory
/// 4. the toolchain standard library directory, when configured
///
/// # Errors
///
/// Will return `Err` if `CAIRO_PATH` is unset (an empty value is fine) or
/// if the current working directory can't be resolved.
pub fn import_search_paths(
    cairo_path: Option<&str>,
    toolchain_path: Option<&Utf8Path>,
) -> Result<SearchPaths, Error> {
    let env_value = match env::var(CAIRO_PATH_ENV) {
        Ok(value) => Some(value),
        Err(env::VarError::NotPresent | env::VarError::NotUnicode(_)) => None,
    };
    let cwd = Utf8PathBuf::try_from(env::current_dir()?)?;

    assemble(cairo_path, env_value.as_deref(), &cwd, toolchain_path)
}

/// Pure assembly step behind [`import_search_paths`], separated so the
/// ordering rules can be exercised without touching the process
/// environment.
///
/// # Errors
///
/// Will return `Err` if `env_value` is absent.
pub fn assemble(
    cairo_path: Option<&str>,
    env_value: Option<&str>,
    cwd: &Utf8Path,
    toolchain_path: Option<&Utf8Path>,
) -> Result<SearchPaths, Error> {
    let env_value = env_value.ok_or(Error::MissingCairoPath)?;

    let mut roots: Vec<Utf8PathBuf> = Vec::new();

    if let Some(list) = cairo_path {
        roots.extend(list.split(':').map(|path| absolutize(cwd, path)));
    }

    roots.extend(env_value.split(':').map(|path| absolutize(cwd, path)));
    roots.push(cwd.to_path_buf());

    if let Some(stdlib) = toolchain_path {
        roots.push(absolutize(cwd, stdlib.as_str()));
    }

    Ok(SearchPaths(roots))
}

fn absolutize(cwd: &Utf8Path, path: &str) -> Utf8PathBuf {
    let path = Utf8Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> Utf8PathBuf {
        Utf8PathBuf::from("/work/project")
    }

    #[test]
    fn test_missing_env_var_is_fatal() {
        let result = assemble(None, None, &cwd(), None);
        assert!(matches!(result, Err(Error::MissingCairoPath)));
    }

    #[test]
    fn test_empty_env_var_is_accepted() {
        let paths = assemble(None, Some(""), &cwd(), None).unwrap();
        // An empty value still contributes a (cwd-relative) entry, same as
        // splitting an empty string on ':'.
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_assembly_order() {
        let paths = assemble(
            Some("/override/a:/override/b"),
            Some("/env/c"),
            &cwd(),
            Some(Utf8Path::new("/toolchain/stdlib")),
        )
        .unwrap();

        assert_eq!(
            paths.as_slice(),
            &[
                Utf8PathBuf::from("/override/a"),
                Utf8PathBuf::from("/override/b"),
                Utf8PathBuf::from("/env/c"),
                Utf8PathBuf::from("/work/project"),
                Utf8PathBuf::from("/toolchain/stdlib"),
            ]
        );
    }

    #[test]
    fn test_relative_entries_become_absolute() {
        let paths = assemble(Some("contracts"), Some("lib/vendored"), &cwd(), None).unwrap();

        assert_eq!(
            paths.as_slice(),
            &[
                Utf8PathBuf::from("/work/project/contracts"),
                Utf8PathBuf::from("/work/project/lib/vendored"),
                Utf8PathBuf::from("/work/project"),
            ]
        );
    }

    #[test]
    fn test_nonexistent_directories_pass_through() {
        // Existence is not checked at assembly time.
        let paths = assemble(Some("/definitely/not/a/real/dir"), Some(""), &cwd(), None).unwrap();
        assert_eq!(
            paths.as_slice()[0],
            Utf8PathBuf::from("/definitely/not/a/real/dir")
        );
    }

    #[test]
    fn test_display_lists_one_root_per_line() {
        let paths = assemble(None, Some("/env/a:/env/b"), &cwd(), None).unwrap();
        let rendered = format!("{paths}");
        assert_eq!(rendered, "  /env/a\n  /env/b\n  /work/project\n");
    }

    #[test]
    fn test_error_display() {
        let error = Error::MissingCairoPath;
        let message = format!("{error}");
        assert!(message.contains("[E001]"));
        assert!(message.contains("CAIRO_PATH"));
        assert!(message.contains("Suggestions"));
    }
}
