//! Pending image uploads with scoped preview handles.
//!
//! Each selected image gets a preview URL from a [`PreviewRegistry`]. The
//! URL stays registered for exactly as long as its [`PreviewHandle`] lives,
//! so removing an image from the pending list releases its preview.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::catalog::ImageFile;
use crate::error::StorefrontError;

/// Maximum number of images attached to one product.
pub const MAX_PENDING_IMAGES: usize = 5;

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: AtomicU64,
    live: Mutex<HashSet<u64>>,
}

impl RegistryInner {
    fn live_set(&self) -> std::sync::MutexGuard<'_, HashSet<u64>> {
        // A poisoned set is still a valid set of ids.
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Issues preview URLs and tracks which are still live.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<RegistryInner>,
}

impl PreviewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a preview for a file.
    pub fn acquire(&self, file: &ImageFile) -> PreviewHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.live_set().insert(id);
        PreviewHandle {
            id,
            url: format!("blob:preview/{}/{}", id, file.file_name),
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of previews not yet released.
    pub fn live_count(&self) -> usize {
        self.inner.live_set().len()
    }

    /// Check if a preview URL is still registered.
    pub fn is_live(&self, handle_id: u64) -> bool {
        self.inner.live_set().contains(&handle_id)
    }
}

/// A registered preview URL. Dropping the handle revokes the URL.
#[derive(Debug)]
pub struct PreviewHandle {
    id: u64,
    url: String,
    registry: Arc<RegistryInner>,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.live_set().remove(&self.id);
    }
}

/// An image waiting to be uploaded.
#[derive(Debug)]
pub struct PendingImage {
    pub file: ImageFile,
    pub preview: PreviewHandle,
}

/// Images selected for a product, in selection order.
#[derive(Debug)]
pub struct PendingImages {
    registry: PreviewRegistry,
    items: Vec<PendingImage>,
    max: usize,
}

impl Default for PendingImages {
    fn default() -> Self {
        Self::new(PreviewRegistry::new())
    }
}

impl PendingImages {
    /// Create an empty list backed by a registry.
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            items: Vec::new(),
            max: MAX_PENDING_IMAGES,
        }
    }

    /// Override the image limit.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Add a batch of selected files.
    ///
    /// Non-image files are dropped. A batch that would push the list past
    /// the limit is rejected as a whole. Returns the number of images added.
    pub fn add_files(
        &mut self,
        files: impl IntoIterator<Item = ImageFile>,
    ) -> Result<usize, StorefrontError> {
        let images: Vec<ImageFile> = files.into_iter().filter(ImageFile::is_image).collect();
        if images.is_empty() {
            return Ok(0);
        }

        if self.items.len() + images.len() > self.max {
            return Err(StorefrontError::TooManyImages { max: self.max });
        }

        let added = images.len();
        for file in images {
            let preview = self.registry.acquire(&file);
            debug!(file = %file.file_name, preview = %preview.url(), "image added");
            self.items.push(PendingImage { file, preview });
        }
        Ok(added)
    }

    /// Remove the image at `index`, releasing its preview.
    pub fn remove(&mut self, index: usize) -> Result<ImageFile, StorefrontError> {
        if index >= self.items.len() {
            return Err(StorefrontError::ImageIndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let PendingImage { file, preview } = self.items.remove(index);
        drop(preview);
        Ok(file)
    }

    /// Remove every image, releasing all previews.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingImage> {
        self.items.iter()
    }

    /// Copies of the files for a multipart upload, in order.
    pub fn files(&self) -> Vec<ImageFile> {
        self.items.iter().map(|item| item.file.clone()).collect()
    }

    pub fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_add_filters_non_images() {
        let mut images = PendingImages::default();
        let added = images
            .add_files(vec![png("a.png"), ImageFile::new("notes.txt", "text/plain", vec![1])])
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(images.len(), 1);
        assert_eq!(images.files()[0].file_name, "a.png");
    }

    #[test]
    fn test_add_without_images_is_noop() {
        let mut images = PendingImages::default();
        let added = images
            .add_files(vec![ImageFile::new("a.pdf", "application/pdf", vec![1])])
            .unwrap();
        assert_eq!(added, 0);
        assert!(images.is_empty());
    }

    #[test]
    fn test_limit_rejects_whole_batch() {
        let mut images = PendingImages::default();
        images
            .add_files((0..4).map(|i| png(&format!("{i}.png"))))
            .unwrap();

        let err = images.add_files(vec![png("x.png"), png("y.png")]).unwrap_err();
        assert!(matches!(err, StorefrontError::TooManyImages { max: 5 }));
        assert_eq!(images.len(), 4);
        assert_eq!(images.registry().live_count(), 4);

        images.add_files(vec![png("x.png")]).unwrap();
        assert_eq!(images.len(), 5);
    }

    #[test]
    fn test_remove_releases_preview() {
        let registry = PreviewRegistry::new();
        let mut images = PendingImages::new(registry.clone());
        images.add_files(vec![png("a.png"), png("b.png")]).unwrap();
        let first_id = images.iter().next().unwrap().preview.id();
        assert_eq!(registry.live_count(), 2);

        let removed = images.remove(0).unwrap();
        assert_eq!(removed.file_name, "a.png");
        assert!(!registry.is_live(first_id));
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut images = PendingImages::default();
        let err = images.remove(0).unwrap_err();
        assert!(matches!(err, StorefrontError::ImageIndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_clear_and_drop_release_everything() {
        let registry = PreviewRegistry::new();
        let mut images = PendingImages::new(registry.clone());
        images.add_files(vec![png("a.png"), png("b.png")]).unwrap();
        images.clear();
        assert_eq!(registry.live_count(), 0);

        images.add_files(vec![png("c.png")]).unwrap();
        drop(images);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_preview_urls_are_unique() {
        let registry = PreviewRegistry::new();
        let a = registry.acquire(&png("same.png"));
        let b = registry.acquire(&png("same.png"));
        assert_ne!(a.url(), b.url());
    }
}
