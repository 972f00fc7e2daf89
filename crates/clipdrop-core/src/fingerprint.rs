use sha2::{Digest, Sha256};
use std::fmt::Display;

/// A fixed-width cache key derived from a source URL.
///
/// The fingerprint is the hex-encoded SHA-256 digest of the normalized URL,
/// so every key is exactly [`Fingerprint::LEN`] lowercase hex characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Length of every fingerprint in characters.
    pub const LEN: usize = 64;

    pub fn of(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(normalize(url).as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a submitted URL before it is fingerprinted.
pub fn normalize(url: &str) -> &str {
    url.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_url_same_key() {
        let url = "https://www.tiktok.com/@someone/video/7300000000000000000";
        assert_eq!(Fingerprint::of(url), Fingerprint::of(url));
    }

    #[test]
    fn different_urls_different_keys() {
        let a = Fingerprint::of("https://www.tiktok.com/@a/video/1");
        let b = Fingerprint::of("https://www.tiktok.com/@a/video/2");
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_width_hex() {
        for url in ["", "x", &"https://vm.tiktok.com/".repeat(50)] {
            let fp = Fingerprint::of(url);
            assert_eq!(fp.as_str().len(), Fingerprint::LEN);
            assert!(fp
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            Fingerprint::of("  https://www.tiktok.com/@a/video/1\n"),
            Fingerprint::of("https://www.tiktok.com/@a/video/1")
        );
    }
}
