//! Image loading with a persistent download cache.
//!
//! Remote locators are downloaded once and kept under the cache root, keyed
//! by [`cache_key`]. Cache entries are only ever created, never refreshed or
//! removed; deleting the directory is the only way to evict them. Local
//! locators are read straight from the image root.

mod fetch;

use std::cell::Cell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{DexError, Result};
use crate::types::{cache_key, Locator};

pub use fetch::{Fetcher, HttpFetcher};

/// Resolves locators to decoded images.
pub struct ImageLoader {
    image_root: PathBuf,
    cache_root: PathBuf,
    fetcher: Box<dyn Fetcher>,
    fetches: Cell<usize>,
}

impl ImageLoader {
    /// Create a loader that downloads over HTTP.
    pub fn new(image_root: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self::with_fetcher(image_root, cache_root, HttpFetcher)
    }

    /// Create a loader with a custom fetcher.
    pub fn with_fetcher(
        image_root: impl Into<PathBuf>,
        cache_root: impl Into<PathBuf>,
        fetcher: impl Fetcher + 'static,
    ) -> Self {
        Self {
            image_root: image_root.into(),
            cache_root: cache_root.into(),
            fetcher: Box::new(fetcher),
            fetches: Cell::new(0),
        }
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Where a remote locator is (or would be) cached.
    pub fn cache_path(&self, locator: &str) -> PathBuf {
        self.cache_root.join(cache_key(locator))
    }

    /// Number of network downloads performed by this loader.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    /// Load and decode the image behind a locator.
    pub fn load(&self, locator: &str) -> Result<DynamicImage> {
        match Locator::parse(locator) {
            Locator::Remote(url) => {
                let cache_path = self.cache_path(locator);
                if cache_path.is_file() {
                    debug!(locator, path = %cache_path.display(), "image cache hit");
                    let bytes = fs::read(&cache_path)
                        .map_err(|e| DexError::io(&cache_path, "Failed to read cached image", e))?;
                    return decode(locator, &bytes);
                }

                info!(locator, "fetching image");
                let bytes = self.fetcher.fetch(&url)?;
                self.fetches.set(self.fetches.get() + 1);

                // Persist before decoding so a later failure still leaves a usable entry.
                write_cache_entry(&cache_path, &bytes)?;
                decode(locator, &bytes)
            }
            Locator::Local(path) => {
                let path = Locator::local_path(&path, &self.image_root);
                if !path.is_file() {
                    return Err(DexError::MissingImage {
                        locator: locator.to_string(),
                        path,
                    });
                }
                let bytes =
                    fs::read(&path).map_err(|e| DexError::io(&path, "Failed to read image", e))?;
                decode(locator, &bytes)
            }
        }
    }
}

fn decode(locator: &str, bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| DexError::Decode {
        locator: locator.to_string(),
        message: e.to_string(),
    })
}

/// Write a cache entry atomically: readers see either nothing or the full file.
fn write_cache_entry(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| DexError::io(dir, "Failed to create cache directory", e))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| DexError::io(dir, "Failed to create cache file", e))?;
    tmp.write_all(bytes)
        .map_err(|e| DexError::io(path, "Failed to write cache file", e))?;
    tmp.persist(path)
        .map_err(|e| DexError::io(path, "Failed to persist cache file", e.error))?;

    debug!(path = %path.display(), size = bytes.len(), "image cached");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;
    use std::rc::Rc;

    use image::{ImageFormat, Rgba, RgbaImage};
    use tempfile::tempdir;
    use url::Url;

    /// Encode a solid-colour PNG in memory.
    pub(crate) fn png_bytes(w: u32, h: u32, colour: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba(colour));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Serves the same bytes for every URL and counts calls.
    pub(crate) struct CountingFetcher {
        pub(crate) bytes: Vec<u8>,
        pub(crate) calls: Rc<Cell<usize>>,
    }

    impl CountingFetcher {
        pub(crate) fn new(bytes: Vec<u8>) -> (Self, Rc<Cell<usize>>) {
            let calls = Rc::new(Cell::new(0));
            (
                Self {
                    bytes,
                    calls: Rc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl Fetcher for CountingFetcher {
        fn fetch(&self, _url: &Url) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.bytes.clone())
        }
    }

    struct FailingFetcher;

    impl Fetcher for FailingFetcher {
        fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
            Err(DexError::Fetch {
                locator: url.to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    const REMOTE: &str = "https://example.com/sprites/1.png";

    #[test]
    fn test_remote_fetched_once_then_cached() {
        let dir = tempdir().unwrap();
        let (fetcher, calls) = CountingFetcher::new(png_bytes(2, 2, [255, 0, 0, 255]));
        let loader = ImageLoader::with_fetcher(dir.path().join("images"), dir.path().join("cache"), fetcher);

        let first = loader.load(REMOTE).unwrap();
        let second = loader.load(REMOTE).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(loader.fetch_count(), 1);
        assert_eq!(first.to_rgba8(), second.to_rgba8());
        assert!(loader.cache_path(REMOTE).is_file());
    }

    #[test]
    fn test_long_remote_locator_is_cached() {
        let dir = tempdir().unwrap();
        let long = format!("https://cdn.example.com/sprites/{}/1.png", "a".repeat(240));
        assert!(long.len() > 255);
        let (fetcher, calls) = CountingFetcher::new(png_bytes(2, 2, [0, 0, 255, 255]));
        let loader = ImageLoader::with_fetcher(dir.path(), dir.path().join("cache"), fetcher);

        loader.load(&long).unwrap();
        loader.load(&long).unwrap();

        assert_eq!(calls.get(), 1);
        let cached = loader.cache_path(&long);
        assert!(cached.is_file());
        assert_eq!(cached.parent(), Some(loader.cache_root()));
    }

    #[test]
    fn test_existing_cache_entry_skips_network() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join(cache_key(REMOTE)), png_bytes(1, 1, [0, 255, 0, 255])).unwrap();

        let loader = ImageLoader::with_fetcher(dir.path(), &cache, FailingFetcher);
        let img = loader.load(REMOTE).unwrap().to_rgba8();

        assert_eq!(img.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(loader.fetch_count(), 0);
    }

    #[test]
    fn test_cache_survives_new_loader() {
        let dir = tempdir().unwrap();
        let cache = dir.path().join("cache");

        let (fetcher, calls) = CountingFetcher::new(png_bytes(1, 1, [1, 2, 3, 255]));
        ImageLoader::with_fetcher(dir.path(), &cache, fetcher)
            .load(REMOTE)
            .unwrap();
        assert_eq!(calls.get(), 1);

        let loader = ImageLoader::with_fetcher(dir.path(), &cache, FailingFetcher);
        assert!(loader.load(REMOTE).is_ok());
    }

    #[test]
    fn test_local_image_is_not_cached() {
        let dir = tempdir().unwrap();
        let images = dir.path().join("images");
        let cache = dir.path().join("cache");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("a.png"), png_bytes(3, 2, [9, 9, 9, 255])).unwrap();

        let loader = ImageLoader::with_fetcher(&images, &cache, FailingFetcher);
        let img = loader.load("a.png").unwrap();

        assert_eq!((img.width(), img.height()), (3, 2));
        assert!(!cache.exists());
    }

    #[test]
    fn test_missing_local_image() {
        let dir = tempdir().unwrap();
        let loader = ImageLoader::with_fetcher(dir.path(), dir.path().join("cache"), FailingFetcher);

        match loader.load("nope.png") {
            Err(DexError::MissingImage { locator, path }) => {
                assert_eq!(locator, "nope.png");
                assert_eq!(path, dir.path().join("nope.png"));
            }
            other => panic!("expected missing image, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_fetch_error_leaves_no_cache_entry() {
        let dir = tempdir().unwrap();
        let loader = ImageLoader::with_fetcher(dir.path(), dir.path().join("cache"), FailingFetcher);

        assert!(matches!(loader.load(REMOTE), Err(DexError::Fetch { .. })));
        assert!(!loader.cache_path(REMOTE).exists());
    }

    #[test]
    fn test_undecodable_download_is_still_cached() {
        let dir = tempdir().unwrap();
        let (fetcher, _calls) = CountingFetcher::new(b"definitely not an image".to_vec());
        let loader = ImageLoader::with_fetcher(dir.path(), dir.path().join("cache"), fetcher);

        assert!(matches!(loader.load(REMOTE), Err(DexError::Decode { .. })));
        assert_eq!(
            fs::read(loader.cache_path(REMOTE)).unwrap(),
            b"definitely not an image"
        );
    }
}
