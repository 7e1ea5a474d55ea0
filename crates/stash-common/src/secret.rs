use std::fmt::{Debug, Display};

use zeroize::Zeroize;

const LIMIT: usize = 7;
const SHOW: usize = 3;

#[derive(Clone, Eq, PartialEq)]
/// Credential handle that hides its value from debug and display output and wipes
/// its bytes when dropped.
///
/// Shows the first 3 characters and then replaces the rest with * if the secret is longer
/// than 7 characters.
pub struct SecretString {
    inner: String,
}

impl SecretString {
    pub fn new(s: String) -> Self {
        Self { inner: s }
    }

    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn wipe(&mut self) {
        self.inner.zeroize();
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value.to_owned())
    }
}

fn format_secret(secret: &str) -> String {
    let mut s: String = secret.chars().take(SHOW).collect();
    for _ in SHOW..secret.chars().count() {
        s.push('*');
    }
    s
}

impl Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.inner.chars().count() > LIMIT {
            f.write_str(&format_secret(&self.inner))
        } else {
            f.write_str("[redacted]")
        }
    }
}

impl Display for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)?;
        Ok(())
    }
}
