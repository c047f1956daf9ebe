//! Local SSH key discovery
//!
//! Looks for a private/public key pair in `~/.ssh` so its public half can be
//! attached to the deployment. Keys are never loaded beyond reading the
//! public key text.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Key file names tried by default, in order.
///
/// `id_ed25519` is left out because the SSH server in the runtime images
/// does not accept ed25519 keys yet; it can be enabled through
/// `ssh_key_candidates` in the config file.
pub const DEFAULT_KEY_CANDIDATES: &[&str] = &["id_rsa"];

/// Paths of a key pair where both files exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshKeyPair {
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
}

/// Scans a key directory for the first complete candidate pair.
#[derive(Debug, Clone)]
pub struct SshKeyLocator {
    ssh_dir: PathBuf,
    candidates: Vec<String>,
}

impl SshKeyLocator {
    /// Locator over `<home>/.ssh` of the current user with the default candidates.
    pub fn for_current_user() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::UserInfo)?;
        Ok(Self::for_home(&home))
    }

    /// Locator over `<home>/.ssh` with the default candidates.
    pub fn for_home(home: &Path) -> Self {
        Self::new(home.join(".ssh"))
    }

    /// Locator over an explicit key directory.
    pub fn new(ssh_dir: PathBuf) -> Self {
        Self {
            ssh_dir,
            candidates: DEFAULT_KEY_CANDIDATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replace the candidate key names. An empty list keeps the defaults.
    pub fn with_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
        if !candidates.is_empty() {
            self.candidates = candidates;
        }
        self
    }

    pub fn ssh_dir(&self) -> &Path {
        &self.ssh_dir
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Find the first candidate whose private and public files both exist.
    pub fn find_ssh_key(&self) -> Result<SshKeyPair> {
        for name in &self.candidates {
            let private_key_path = self.ssh_dir.join(name);
            let public_key_path = self.ssh_dir.join(format!("{}.pub", name));

            if exists(&private_key_path) && exists(&public_key_path) {
                debug!(key = %private_key_path.display(), "found ssh key pair");
                return Ok(SshKeyPair {
                    private_key_path,
                    public_key_path,
                });
            }
            debug!(candidate = %name, "ssh key pair incomplete, skipping");
        }

        Err(Error::NoSshKey {
            dir: self.ssh_dir.clone(),
        })
    }

    /// Full text of the public key of the pair found by [`Self::find_ssh_key`].
    pub fn read_local_ssh_public_key(&self) -> Result<String> {
        let pair = self.find_ssh_key()?;
        std::fs::read_to_string(&pair.public_key_path)
            .map_err(|e| Error::io(&pair.public_key_path, e))
    }
}

/// Only a definite "not found" counts as missing; unreadable files still count.
fn exists(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

/// Key pair of the current user with the default candidates.
pub fn find_ssh_key() -> Result<SshKeyPair> {
    SshKeyLocator::for_current_user()?.find_ssh_key()
}

/// Public key text of the current user with the default candidates.
pub fn read_local_ssh_public_key() -> Result<String> {
    SshKeyLocator::for_current_user()?.read_local_ssh_public_key()
}
