use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Runs git in `dir`, failing unless it exits successfully.
pub async fn git(dir: &Path, args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await?;
    anyhow::ensure!(status.success(), "git {} failed", args.join(" "));

    Ok(())
}

/// Runs git in `dir` and returns its trimmed stdout.
pub async fn git_output(dir: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stderr(Stdio::null())
        .output()
        .await?;
    anyhow::ensure!(output.status.success(), "git {} failed", args.join(" "));

    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Creates a bare repository to act as the remote.
pub async fn create_bare_remote(dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    git(dir, &["init", "--bare"]).await
}

/// Clones `remote` into `dir` and sets the identity used for commits.
///
/// The parent of `dir` should already exist.
pub async fn clone_repo(remote: &Path, dir: &Path, user_name: &str) -> anyhow::Result<()> {
    let parent = dir.parent().expect("clone target has a parent");
    let remote = remote.to_str().expect("utf-8 path");
    let target = dir.to_str().expect("utf-8 path");
    git(parent, &["clone", remote, target]).await?;

    git(dir, &["config", "user.name", user_name]).await?;
    git(dir, &["config", "user.email", "test@example.com"]).await?;
    git(dir, &["config", "commit.gpgsign", "false"]).await?;
    // Keep refs/remotes/origin/HEAD out of branch listings
    git(dir, &["config", "remote.origin.followRemoteHEAD", "never"]).await?;

    Ok(())
}

/// Writes a file and commits it on the current branch.
pub async fn commit_file(
    dir: &Path,
    message: &str,
    filename: &str,
    contents: &str,
) -> anyhow::Result<()> {
    tokio::fs::write(dir.join(filename), contents).await?;
    git(dir, &["add", filename]).await?;
    git(dir, &["commit", "-m", message]).await
}

pub async fn current_branch(dir: &Path) -> anyhow::Result<String> {
    git_output(dir, &["rev-parse", "--abbrev-ref", "HEAD"]).await
}

pub enum TestDir {
    Temp(tempfile::TempDir),
    Kept(std::path::PathBuf),
}

impl TestDir {
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;

        if std::env::var("DEBUG_TESTS").is_ok() {
            let path = temp_dir.keep();
            eprintln!("Test directory kept at: {}", path.display());
            Ok(TestDir::Kept(path))
        } else {
            Ok(TestDir::Temp(temp_dir))
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            TestDir::Temp(t) => t.path(),
            TestDir::Kept(p) => p.as_path(),
        }
    }
}
