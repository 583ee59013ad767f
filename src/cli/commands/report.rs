//! Report command implementation.
//!
//! Opens the repository, builds the implementation registry, reads the
//! optional pkgcheck output and writes one line per slotted Python package.

use std::io::Write;

use crate::cli::args::ReportArgs;
use crate::compat::read_compat_updates;
use crate::error::Result;
use crate::implementations::ImplementationRegistry;
use crate::report::{report, ReportTheme};
use crate::repository::Repository;

use super::Command;

/// The report command implementation.
pub struct ReportCommand {
    args: ReportArgs,
}

impl ReportCommand {
    /// Create a new report command.
    pub fn new(args: ReportArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ReportArgs {
        &self.args
    }
}

impl Command for ReportCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let repo = Repository::open(&self.args.repo, &self.args.repo_name)?;
        let registry = ImplementationRegistry::load(repo.location())?;
        let compat = read_compat_updates(self.args.pkgcheck_output.as_deref())?;
        let theme = ReportTheme::for_color(self.args.color);

        report(&repo, &registry, &compat, &theme, out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImplsError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn setup_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "profiles/repo_name", "gentoo\n");
        write(
            temp.path(),
            "metadata/md5-cache/dev-python/foo-1.0",
            "EAPI=8\nSLOT=0\nKEYWORDS=amd64\nIUSE=python_targets_python3_12\n_eclasses_=distutils-r1\tx\tpypi\ty\n",
        );
        write(
            temp.path(),
            "dev-python/foo/foo-1.0.ebuild",
            "DISTUTILS_USE_PEP517=setuptools\ninherit distutils-r1 pypi\ndistutils_enable_tests pytest\n",
        );
        temp
    }

    fn args(repo: &Path) -> ReportArgs {
        ReportArgs {
            repo: repo.to_path_buf(),
            ..ReportArgs::default()
        }
    }

    #[test]
    fn report_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = ReportCommand::new(args(temp.path()));
        assert_eq!(cmd.args().repo, temp.path());
    }

    #[test]
    fn report_writes_line() {
        let temp = setup_repo();
        let cmd = ReportCommand::new(args(temp.path()));
        let mut out = Vec::new();

        cmd.execute(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("dev-python/foo:0 "));
        assert!(text.contains("EAPI: 8 (PEP517) -T  STABLE: 3.12"));
    }

    #[test]
    fn report_applies_pkgcheck_output() {
        let temp = setup_repo();
        let log = temp.path().join("pkgcheck.json");
        fs::write(
            &log,
            r#"{"__class__":"PythonCompatUpdate","category":"dev-python","package":"foo","version":"1.0","updates":["python3_13"]}"#,
        )
        .unwrap();
        let cmd = ReportCommand::new(ReportArgs {
            pkgcheck_output: Some(log),
            ..args(temp.path())
        });
        let mut out = Vec::new();

        cmd.execute(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.trim_end().ends_with("  UP: 3.13"));
    }

    #[test]
    fn report_without_repository_fails() {
        let temp = TempDir::new().unwrap();
        let cmd = ReportCommand::new(args(temp.path()));
        let mut out = Vec::new();

        let err = cmd.execute(&mut out).unwrap_err();
        assert!(matches!(err, ImplsError::RepositoryNotFound { .. }));
    }
}
