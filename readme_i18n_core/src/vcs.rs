use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use crate::I18nError;
use crate::I18nResult;

/// The parts of version control a run depends on.
pub trait VersionControl {
	/// Repository-relative names of the files in the pending change.
	fn staged_files(&self) -> I18nResult<Vec<String>>;

	/// Add `paths` to the pending change.
	fn stage(&self, paths: &[PathBuf]) -> I18nResult<()>;
}

/// [`VersionControl`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct Git {
	root: PathBuf,
}

impl Git {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Find the repository containing `start`. Outside a repository (or
	/// without git installed) `start` itself is used as the root.
	pub fn discover(start: &Path) -> Self {
		let root = run_git(start, &["rev-parse", "--show-toplevel"])
			.ok()
			.map(|stdout| stdout.trim().to_string())
			.filter(|root| !root.is_empty())
			.map_or_else(|| start.to_path_buf(), PathBuf::from);

		Self::new(root)
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl VersionControl for Git {
	fn staged_files(&self) -> I18nResult<Vec<String>> {
		let stdout = run_git(&self.root, &["diff", "--cached", "--name-only"])?;
		Ok(stdout
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty())
			.map(ToString::to_string)
			.collect())
	}

	fn stage(&self, paths: &[PathBuf]) -> I18nResult<()> {
		if paths.is_empty() {
			return Ok(());
		}

		let mut args = vec!["add".to_string(), "--".to_string()];
		args.extend(paths.iter().map(|path| path.to_string_lossy().to_string()));
		let args: Vec<&str> = args.iter().map(String::as_str).collect();
		run_git(&self.root, &args).map(|_| ())
	}
}

fn run_git(dir: &Path, args: &[&str]) -> I18nResult<String> {
	let output = Command::new("git")
		.args(args)
		.current_dir(dir)
		.output()
		.map_err(|e| I18nError::Vcs(format!("failed to run `git {}`: {e}", args.join(" "))))?;

	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
		let reason = if stderr.is_empty() {
			format!(
				"`git {}` exited with status {}",
				args.join(" "),
				output
					.status
					.code()
					.map_or_else(|| "unknown".to_string(), |code| code.to_string())
			)
		} else {
			stderr
		};

		return Err(I18nError::Vcs(reason));
	}

	Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
