//! Image locators.
//!
//! A locator is either a remote URL or a path relative to the local image
//! directory. URL parsing is attempted first; anything that is not an
//! absolute `http`/`https` URL falls back to a local path.

use std::fmt;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use url::Url;

/// Hex digits of the locator digest appended to every cache key.
const CACHE_KEY_HASH_LEN: usize = 16;

/// Longest readable prefix kept in a cache key, so keys stay under the
/// 255-byte filename limit.
const CACHE_KEY_READABLE_LEN: usize = 200;

/// A resolved image locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Fetched over the network and cached on disk.
    Remote(Url),
    /// Read from the filesystem, never cached.
    Local(PathBuf),
}

impl Locator {
    /// Classify a raw locator string.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Locator::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Locator::Local(path),
                Err(()) => Locator::Local(PathBuf::from(raw)),
            },
            _ => Locator::Local(PathBuf::from(raw)),
        }
    }

    /// Resolve a local locator against the image root.
    ///
    /// Absolute paths are kept as they are.
    pub fn local_path(path: &Path, image_root: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            image_root.join(path)
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Remote(url) => write!(f, "{}", url),
            Locator::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Derive the on-disk cache filename for a remote locator.
///
/// The readable part strips the scheme and replaces every character outside
/// `[A-Za-z0-9_-]` with `_`. That substitution alone is lossy
/// (`a/b.png` and `a_b/png` collide), so a digest of the full locator is
/// appended to keep distinct locators in distinct files. The readable part
/// is truncated for long locators; the digest still covers the whole string.
pub fn cache_key(locator: &str) -> String {
    let stripped = locator
        .strip_prefix("https://")
        .or_else(|| locator.strip_prefix("http://"))
        .unwrap_or(locator);

    let readable: String = stripped
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(CACHE_KEY_READABLE_LEN)
        .collect();

    let digest = hex::encode(Sha256::digest(locator.as_bytes()));
    format!("{}-{}", readable, &digest[..CACHE_KEY_HASH_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote() {
        let locator = Locator::parse("https://example.com/sprites/1.png");
        assert!(matches!(locator, Locator::Remote(ref u) if u.host_str() == Some("example.com")));
    }

    #[test]
    fn test_parse_relative_path_is_local() {
        assert_eq!(
            Locator::parse("gen1/bulbasaur.png"),
            Locator::Local(PathBuf::from("gen1/bulbasaur.png"))
        );
        assert_eq!(Locator::parse("a.png"), Locator::Local(PathBuf::from("a.png")));
    }

    #[test]
    fn test_parse_other_schemes_are_local() {
        // Drive letters and custom schemes parse as URLs but are not fetchable.
        assert!(matches!(Locator::parse("c:/sprites/a.png"), Locator::Local(_)));
        assert!(matches!(Locator::parse("data:image/png,abc"), Locator::Local(_)));
    }

    #[test]
    fn test_parse_file_url() {
        assert_eq!(
            Locator::parse("file:///tmp/sprite.png"),
            Locator::Local(PathBuf::from("/tmp/sprite.png"))
        );
    }

    #[test]
    fn test_local_path_resolution() {
        let root = Path::new("data/images");
        assert_eq!(
            Locator::local_path(Path::new("a.png"), root),
            PathBuf::from("data/images/a.png")
        );
        assert_eq!(
            Locator::local_path(Path::new("/abs/a.png"), root),
            PathBuf::from("/abs/a.png")
        );
    }

    #[test]
    fn test_cache_key_is_filesystem_safe() {
        let key = cache_key("https://raw.githubusercontent.com/PokeAPI/sprites/master/1.png");
        assert!(key.starts_with("raw_githubusercontent_com_PokeAPI_sprites_master_1_png-"));
        assert!(key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_cache_key_is_stable() {
        let a = cache_key("https://example.com/a.png");
        let b = cache_key("https://example.com/a.png");
        assert_eq!(a, b);
    }

    #[test]
    fn test_cache_key_distinguishes_lossy_collisions() {
        let a = cache_key("https://example.com/a/b.png");
        let b = cache_key("https://example.com/a_b/png");
        let c = cache_key("http://example.com/a/b.png");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cache_key_fits_filename_limit() {
        let long = format!("https://cdn.example.com/sprites/{}/1.png", "a".repeat(240));
        let other = format!("https://cdn.example.com/sprites/{}/2.png", "a".repeat(240));

        let key = cache_key(&long);
        assert!(key.len() <= 255, "key is {} bytes", key.len());
        assert_eq!(key.len(), CACHE_KEY_READABLE_LEN + 1 + CACHE_KEY_HASH_LEN);
        assert_ne!(key, cache_key(&other));
    }
}
