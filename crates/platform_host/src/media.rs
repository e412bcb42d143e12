//! File payload and preview contracts for upload widgets.

use std::{future::Future, pin::Pin};

/// Object-safe boxed future used by [`PreviewGenerator`].
pub type PreviewFuture = Pin<Box<dyn Future<Output = Option<String>>>>;

/// A host file handle that upload state can hold without knowing its concrete type.
///
/// The browser implements this for `web_sys::File`; tests use plain structs.
pub trait FilePayload: Clone + PartialEq + std::fmt::Debug + 'static {
    /// Display file name, including extension.
    fn file_name(&self) -> String;
    /// MIME type reported by the host. May be empty when the host does not know it.
    fn mime_type(&self) -> String;
    /// Payload length in bytes.
    fn size_bytes(&self) -> u64;

    /// Whether the payload is image-typed and therefore eligible for a preview.
    fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type())
    }
}

/// Returns `true` for `image/*` MIME types, ignoring case.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .get(..6)
        .map(|prefix| prefix.eq_ignore_ascii_case("image/"))
        .unwrap_or(false)
}

/// Host service producing inline preview URLs for selected files.
///
/// Generation is best-effort: a failed or unsupported read resolves to `None`.
pub trait PreviewGenerator<F> {
    /// Starts reading `file` and resolves to a `data:` URL when one could be produced.
    fn generate_preview(&self, file: &F) -> PreviewFuture;
}

#[derive(Debug, Clone, Copy, Default)]
/// Preview generator that never produces a preview.
pub struct NoopPreviewGenerator;

impl<F> PreviewGenerator<F> for NoopPreviewGenerator {
    fn generate_preview(&self, _file: &F) -> PreviewFuture {
        Box::pin(async { None })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Named(&'static str, &'static str);

    impl FilePayload for Named {
        fn file_name(&self) -> String {
            self.0.to_string()
        }

        fn mime_type(&self) -> String {
            self.1.to_string()
        }

        fn size_bytes(&self) -> u64 {
            0
        }
    }

    #[test]
    fn image_detection_ignores_case_and_short_types() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("IMAGE/JPEG"));
        assert!(!is_image_mime("video/mp4"));
        assert!(!is_image_mime("image"));
        assert!(!is_image_mime(""));
        assert!(Named("a.png", "image/png").is_image());
        assert!(!Named("a.pdf", "application/pdf").is_image());
    }

    #[test]
    fn noop_generator_resolves_to_none() {
        let preview = block_on(NoopPreviewGenerator.generate_preview(&Named("a.png", "image/png")));
        assert_eq!(preview, None);
    }
}
