//! Recording stand-ins for git-crypt, gpg and collaborator tasks.

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::rc::Rc;

use crate::core::git_crypt::{AddGpgUser, Environment, GitCrypt};
use crate::core::gpg::{Gpg, Import, ImportResult};
use crate::core::name::{Scope, TaskName};
use crate::core::registry::{Context, Registry, Task};
use crate::core::tasks::Tools;
use crate::error::{GitCryptError, Result};

pub const FINGERPRINT: &str = "E0637AE8F9059A371245DB3844528004E095862C";

/// Shared, ordered record of everything that ran.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init(Option<String>),
    Lock {
        key_name: Option<String>,
        force: bool,
        all: bool,
    },
    Unlock(Option<Vec<PathBuf>>),
    AddGpgUser(AddGpgUser, Environment),
}

/// How the fake `lock` behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    Succeed,
    AlreadyLocked,
    NotInstalled,
}

pub struct FakeGitCrypt {
    journal: Journal,
    calls: RefCell<Vec<Call>>,
    lock_outcome: LockOutcome,
}

impl FakeGitCrypt {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            calls: RefCell::new(Vec::new()),
            lock_outcome: LockOutcome::Succeed,
        }
    }

    pub fn with_lock_outcome(mut self, outcome: LockOutcome) -> Self {
        self.lock_outcome = outcome;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn added_users(&self) -> Vec<(AddGpgUser, Environment)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddGpgUser(user, env) => Some((user, env)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, label: &str, call: Call) {
        self.journal.push(format!("git-crypt {label}"));
        self.calls.borrow_mut().push(call);
    }
}

fn failed_status() -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(256)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(1)
    }
}

impl GitCrypt for FakeGitCrypt {
    fn init(&self, key_name: Option<&str>) -> Result<()> {
        self.record("init", Call::Init(key_name.map(str::to_string)));
        Ok(())
    }

    fn lock(&self, key_name: Option<&str>, force: bool, all: bool) -> Result<()> {
        self.record(
            "lock",
            Call::Lock {
                key_name: key_name.map(str::to_string),
                force,
                all,
            },
        );
        match self.lock_outcome {
            LockOutcome::Succeed => Ok(()),
            LockOutcome::AlreadyLocked => Err(GitCryptError::CommandFailed {
                command: "git-crypt lock".to_string(),
                status: failed_status(),
                stderr: "Error: this repository is already locked.".to_string(),
            }
            .into()),
            LockOutcome::NotInstalled => Err(GitCryptError::NotFound("git-crypt".to_string()).into()),
        }
    }

    fn unlock(&self, key_files: Option<&[PathBuf]>) -> Result<()> {
        self.record("unlock", Call::Unlock(key_files.map(<[PathBuf]>::to_vec)));
        Ok(())
    }

    fn add_gpg_user(&self, user: &AddGpgUser, env: &Environment) -> Result<()> {
        self.record(
            &format!("add-gpg-user {}", user.gpg_user_id),
            Call::AddGpgUser(user.clone(), env.clone()),
        );
        Ok(())
    }
}

pub struct FakeGpg {
    fingerprint: Option<String>,
    imports: RefCell<Vec<Import>>,
}

impl FakeGpg {
    pub fn new() -> Self {
        Self {
            fingerprint: Some(FINGERPRINT.to_string()),
            imports: RefCell::new(Vec::new()),
        }
    }

    pub fn without_import_ok() -> Self {
        Self {
            fingerprint: None,
            imports: RefCell::new(Vec::new()),
        }
    }

    pub fn imports(&self) -> Vec<Import> {
        self.imports.borrow().clone()
    }
}

impl Gpg for FakeGpg {
    fn import(&self, import: &Import) -> Result<ImportResult> {
        if let Some(home) = &import.home_directory {
            assert!(home.is_dir(), "key store must exist during import");
        }
        self.imports.borrow_mut().push(import.clone());
        let output = match &self.fingerprint {
            Some(fpr) => format!("[GNUPG:] IMPORT_OK 1 {fpr}\n[GNUPG:] IMPORT_RES 1\n"),
            None => "[GNUPG:] IMPORT_RES 0\n".to_string(),
        };
        Ok(ImportResult::from_status_output(&output))
    }
}

/// Fakes wired together around one journal.
pub struct Harness {
    pub journal: Journal,
    pub git_crypt: Rc<FakeGitCrypt>,
    pub gpg: Rc<FakeGpg>,
    pub registry: Registry,
}

impl Harness {
    pub fn new() -> Self {
        let journal = Journal::default();
        let git_crypt = Rc::new(FakeGitCrypt::new(&journal));
        Self::with(journal, git_crypt, Rc::new(FakeGpg::new()))
    }

    pub fn with(journal: Journal, git_crypt: Rc<FakeGitCrypt>, gpg: Rc<FakeGpg>) -> Self {
        Self {
            journal,
            git_crypt,
            gpg,
            registry: Registry::new(),
        }
    }

    pub fn tools(&self, repository: impl Into<PathBuf>) -> Tools {
        Tools {
            git_crypt: self.git_crypt.clone(),
            gpg: self.gpg.clone(),
            repository: repository.into(),
        }
    }

    /// Define a task that records its invocations as `name [args]`.
    pub fn stub(&mut self, scope: &str, name: &str) {
        let journal = self.journal.clone();
        let task_name = TaskName::parse(name).unwrap();
        let scope = Scope::parse(scope).unwrap();
        let label = task_name.qualified_in(&scope);
        self.registry
            .define(
                &scope,
                &task_name,
                "stub",
                move |_: &Context<'_>, args: &[String]| {
                    journal.push(format!("{label} {args:?}"));
                    Ok(())
                },
            )
            .unwrap();
    }

    pub fn define(&mut self, scope: &str, name: &str, task: impl Task + 'static) {
        self.registry
            .define(
                &Scope::parse(scope).unwrap(),
                &TaskName::parse(name).unwrap(),
                "under test",
                task,
            )
            .unwrap();
    }

    pub fn invoke(&self, name: &str, args: &[&str]) -> Result<()> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.registry
            .invoke(&TaskName::parse(name).unwrap(), &Scope::root(), &args)
    }
}

pub fn name(raw: &str) -> TaskName {
    TaskName::parse(raw).unwrap()
}
