//! Test harness for driving the nofp binary against throwaway projects
//!
//! `deno` and `npm` are replaced by shell scripts that record how they were
//! called into a log directory outside the project, so the project root only
//! ever contains what nofp itself wrote.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn nofp_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.join("nofp")
}

pub struct StubProject {
    project: TempDir,
    tools: TempDir,
}

#[allow(dead_code)]
impl StubProject {
    /// Empty project whose lint stub exits with `lint_exit`
    pub fn new(lint_exit: i32) -> Self {
        let stub = Self {
            project: TempDir::new().unwrap(),
            tools: TempDir::new().unwrap(),
        };
        stub.write_deno(&format!("exit {}", lint_exit));
        stub.write_npm(0);
        stub
    }

    pub fn root(&self) -> &Path {
        self.project.path()
    }

    pub fn log(&self, name: &str) -> PathBuf {
        self.tools.path().join(name)
    }

    pub fn deno_path(&self) -> PathBuf {
        self.tools.path().join("deno")
    }

    pub fn npm_path(&self) -> PathBuf {
        self.tools.path().join("npm")
    }

    /// Replace the lint stub; `tail` runs after the invocation is recorded
    pub fn write_deno(&self, tail: &str) {
        let log = self.tools.path().display().to_string();
        let script = format!(
            "#!/bin/sh\n\
             echo \"$@\" > \"{log}/deno.args\"\n\
             [ -f eslint.config.mjs ] && cat eslint.config.mjs > \"{log}/eslint.seen\"\n\
             [ -f tsconfig.json ] && cat tsconfig.json > \"{log}/tsconfig.seen\"\n\
             [ -d node_modules/@types/node ] && touch \"{log}/types.seen\"\n\
             {tail}\n",
            log = log,
            tail = tail
        );
        write_executable(&self.deno_path(), &script);
    }

    /// Replace the install stub; it creates `node_modules` before exiting with `exit`
    pub fn write_npm(&self, exit: i32) {
        self.write_npm_with(&format!("exit {}", exit));
    }

    /// Replace the install stub; `tail` runs after `node_modules` is populated
    pub fn write_npm_with(&self, tail: &str) {
        let log = self.tools.path().display().to_string();
        let script = format!(
            "#!/bin/sh\n\
             mkdir -p node_modules/@types/node\n\
             echo 'export {{}};' > node_modules/@types/node/index.d.ts\n\
             echo \"$@\" > \"{log}/npm.args\"\n\
             {tail}\n",
            log = log,
            tail = tail
        );
        write_executable(&self.npm_path(), &script);
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(nofp_bin());
        cmd.current_dir(self.root())
            .env("NOFP_DENO", self.deno_path())
            .env("NOFP_NPM", self.npm_path())
            .env_remove("NOFP_BOOTSTRAP")
            .env_remove("NOFP_TEMPLATE_DIR")
            .env_remove("NOFP_LOG_LEVEL")
            .env_remove("NOFP_LOG_JSON")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute nofp")
    }

    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command()
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn nofp")
    }

    pub fn overlay_absent(&self) -> bool {
        !self.root().join("eslint.config.mjs").exists()
            && !self.root().join("tsconfig.json").exists()
    }

    /// Names of the entries left in the project root
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Block until `path` exists, failing the test after ten seconds
#[allow(dead_code)]
pub fn wait_for_file(path: &Path) {
    let started = Instant::now();
    while !path.exists() {
        assert!(
            started.elapsed() < Duration::from_secs(10),
            "{} never appeared",
            path.display()
        );
        thread::sleep(Duration::from_millis(20));
    }
}

/// Send `signal` (e.g. "INT") to `child` and wait for it to exit
#[allow(dead_code)]
pub fn signal_and_wait(child: &mut Child, signal: &str) -> ExitStatus {
    let status = Command::new("kill")
        .arg(format!("-{}", signal))
        .arg(child.id().to_string())
        .status()
        .unwrap();
    assert!(status.success());

    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        if started.elapsed() > Duration::from_secs(10) {
            let _ = child.kill();
            panic!("nofp did not exit after SIG{}", signal);
        }
        thread::sleep(Duration::from_millis(20));
    }
}

fn write_executable(path: &Path, script: &str) {
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
