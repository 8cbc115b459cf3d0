//! # Credential Lookup
//!
//! Resolves a username/password pair for a remote host. A matching entry in
//! the user's `.netrc` wins; otherwise the caller's username is used and the
//! operator is asked for a password.
//!
//! The password prompt sits behind the [`SecretPrompt`] trait so it can be
//! replaced in tests. [`TerminalPrompt`] is the production implementation and
//! reads from the controlling terminal with echo disabled.
//!
//! Any failure to read or parse the credential store is treated the same as
//! the host being absent from it. Only a failing prompt is reported.

use crate::error::Result;
use crate::netrc::Netrc;
use std::path::PathBuf;

pub const DEFAULT_PASSWORD_PROMPT: &str = "Password: ";

/// A resolved username and password. `Debug` never shows the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl From<Credentials> for (String, String) {
    fn from(credentials: Credentials) -> Self {
        (credentials.username, credentials.password)
    }
}

/// Source of secret input, such as a password typed without echo.
pub trait SecretPrompt {
    fn prompt_secret(&mut self, prompt: &str) -> std::io::Result<String>;
}

/// Prompts on the controlling terminal without echoing input.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn prompt_secret(&mut self, prompt: &str) -> std::io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

pub struct CredentialResolver<P: SecretPrompt = TerminalPrompt> {
    prompt: P,
    prompt_text: String,
    netrc_path: Option<PathBuf>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(TerminalPrompt)
    }
}

impl<P: SecretPrompt> CredentialResolver<P> {
    pub fn new(prompt: P) -> Self {
        Self {
            prompt,
            prompt_text: DEFAULT_PASSWORD_PROMPT.to_string(),
            netrc_path: None,
        }
    }

    /// Reads credentials from `path` instead of `~/.netrc`.
    pub fn with_netrc_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.netrc_path = Some(path.into());
        self
    }

    pub fn with_prompt_text(mut self, text: impl Into<String>) -> Self {
        self.prompt_text = text.into();
        self
    }

    pub fn netrc_path(&self) -> Option<PathBuf> {
        self.netrc_path.clone().or_else(Netrc::default_path)
    }

    /// Stored credentials for `host`, or `user` with a prompted password.
    ///
    /// A stored entry replaces `user` entirely. An empty answer to the prompt
    /// is returned as an empty password.
    pub fn get_credentials(&mut self, user: &str, host: &str) -> Result<Credentials> {
        if let Some(stored) = self.lookup(host) {
            return Ok(stored);
        }

        let password = self.prompt.prompt_secret(&self.prompt_text)?;
        Ok(Credentials::new(user, password))
    }

    fn lookup(&self, host: &str) -> Option<Credentials> {
        let netrc = match &self.netrc_path {
            Some(path) => Netrc::from_path(path),
            None => Netrc::from_default_location(),
        }
        .ok()?;

        netrc
            .authenticators(host)
            .map(|entry| Credentials::new(entry.login.clone(), entry.password.clone()))
    }
}

/// Resolves credentials from `~/.netrc`, prompting on the terminal otherwise.
pub fn get_credentials(user: &str, host: &str) -> Result<Credentials> {
    CredentialResolver::default().get_credentials(user, host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimewolfError;
    use std::fs;
    use std::io;

    /// Answers every prompt with a fixed string and records the prompts.
    struct FakePrompt {
        answer: String,
        prompts: Vec<String>,
    }

    impl FakePrompt {
        fn answering(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                prompts: Vec::new(),
            }
        }
    }

    impl SecretPrompt for FakePrompt {
        fn prompt_secret(&mut self, prompt: &str) -> io::Result<String> {
            self.prompts.push(prompt.to_string());
            Ok(self.answer.clone())
        }
    }

    struct BrokenPrompt;

    impl SecretPrompt for BrokenPrompt {
        fn prompt_secret(&mut self, _prompt: &str) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no terminal"))
        }
    }

    fn store(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("netrc");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_stored_entry_ignores_user() {
        let (_dir, path) = store("machine example.com login stored password s3cret\n");
        let mut resolver =
            CredentialResolver::new(FakePrompt::answering("typed")).with_netrc_path(&path);

        let creds = resolver.get_credentials("bob", "example.com").unwrap();
        assert_eq!(creds, Credentials::new("stored", "s3cret"));
        assert!(resolver.prompt.prompts.is_empty());
    }

    #[test]
    fn test_comment_inside_entry_keeps_stored_entry() {
        let (_dir, path) =
            store("machine example.com login stored # lab account\n  password s3cret\n");
        let mut resolver =
            CredentialResolver::new(FakePrompt::answering("typed")).with_netrc_path(&path);

        let creds = resolver.get_credentials("bob", "example.com").unwrap();
        assert_eq!(creds, Credentials::new("stored", "s3cret"));
        assert!(resolver.prompt.prompts.is_empty());
    }

    #[test]
    fn test_missing_entry_prompts() {
        let (_dir, path) = store("machine other.org login stored password s3cret\n");
        let mut resolver =
            CredentialResolver::new(FakePrompt::answering("typed")).with_netrc_path(&path);

        let creds = resolver.get_credentials("bob", "example.com").unwrap();
        assert_eq!(creds, Credentials::new("bob", "typed"));
        assert_eq!(resolver.prompt.prompts, vec![DEFAULT_PASSWORD_PROMPT]);
    }

    #[test]
    fn test_default_entry_is_used() {
        let (_dir, path) = store("default login anonymous password guest@\n");
        let mut resolver =
            CredentialResolver::new(FakePrompt::answering("typed")).with_netrc_path(&path);

        let creds = resolver.get_credentials("bob", "example.com").unwrap();
        assert_eq!(creds, Credentials::new("anonymous", "guest@"));
    }

    #[test]
    fn test_unreadable_store_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = CredentialResolver::new(FakePrompt::answering("typed"))
            .with_netrc_path(dir.path().join("missing"));

        let (user, password): (String, String) = resolver.get_credentials("bob", "example.com").unwrap().into();
        assert_eq!(user, "bob");
        assert_eq!(password, "typed");
    }

    #[test]
    fn test_malformed_store_prompts() {
        let (_dir, path) = store("machine example.com login a password b\nnonsense here\n");
        let mut resolver =
            CredentialResolver::new(FakePrompt::answering("typed")).with_netrc_path(&path);

        let creds = resolver.get_credentials("bob", "example.com").unwrap();
        assert_eq!(creds, Credentials::new("bob", "typed"));
    }

    #[test]
    fn test_blank_password_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = CredentialResolver::new(FakePrompt::answering(""))
            .with_netrc_path(dir.path().join("missing"));

        let creds = resolver.get_credentials("bob", "example.com").unwrap();
        assert_eq!(creds, Credentials::new("bob", ""));
        assert_eq!(resolver.prompt.prompts.len(), 1);
    }

    #[test]
    fn test_custom_prompt_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = CredentialResolver::new(FakePrompt::answering("x"))
            .with_netrc_path(dir.path().join("missing"))
            .with_prompt_text("Password for example.com: ");

        resolver.get_credentials("bob", "example.com").unwrap();
        assert_eq!(resolver.prompt.prompts, vec!["Password for example.com: "]);
    }

    #[test]
    fn test_prompt_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver =
            CredentialResolver::new(BrokenPrompt).with_netrc_path(dir.path().join("missing"));

        let err = resolver.get_credentials("bob", "example.com").unwrap_err();
        assert!(matches!(err, TimewolfError::Io(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("bob", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("bob"));
        assert!(!debug.contains("hunter2"));
    }
}
