//! Lookup of emails that already belong to a registered employee

use std::collections::HashSet;
use std::sync::Arc;

/// Emails treated as already registered when nothing else is configured
pub const DEFAULT_REJECTED_EMAILS: [&str; 2] = ["test@example.com", "user@domain.com"];

/// Answers whether an email is already taken.
///
/// Comparison is exact: no trimming, no case folding.
pub trait EmailDirectory: Send + Sync {
    fn email_exists(&self, email: &str) -> bool;
}

impl<T: EmailDirectory + ?Sized> EmailDirectory for Arc<T> {
    fn email_exists(&self, email: &str) -> bool {
        (**self).email_exists(email)
    }
}

/// Fixed rejection set
#[derive(Debug, Clone)]
pub struct StaticEmailDirectory {
    emails: HashSet<String>,
}

impl StaticEmailDirectory {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emails: emails.into_iter().map(Into::into).collect(),
        }
    }

    /// Directory that knows no emails
    pub fn empty() -> Self {
        Self {
            emails: HashSet::new(),
        }
    }
}

impl Default for StaticEmailDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_REJECTED_EMAILS)
    }
}

impl EmailDirectory for StaticEmailDirectory {
    fn email_exists(&self, email: &str) -> bool {
        self.emails.contains(email)
    }
}

/// Several directories consulted in order; an email exists if any member knows it
#[derive(Clone, Default)]
pub struct DirectoryChain {
    members: Vec<Arc<dyn EmailDirectory>>,
}

impl DirectoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, member: Arc<dyn EmailDirectory>) -> Self {
        self.members.push(member);
        self
    }

    pub fn push(&mut self, member: Arc<dyn EmailDirectory>) {
        self.members.push(member);
    }
}

impl EmailDirectory for DirectoryChain {
    fn email_exists(&self, email: &str) -> bool {
        self.members.iter().any(|member| member.email_exists(email))
    }
}
