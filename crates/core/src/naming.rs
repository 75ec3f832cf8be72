//! Upload naming convention for product images.
//!
//! Stored images are named `prod_<unix-ms><ext>` and served from
//! `/uploads/<filename>`. The millisecond component comes from an
//! [`UploadClock`], which never hands out the same value twice.

use std::sync::atomic::{AtomicI64, Ordering};

/// Filename prefix for every stored product image.
pub const UPLOAD_PREFIX: &str = "prod_";

/// Public URL prefix under which the image directory is served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Extension of the final path component of a client-supplied file name,
/// including the leading dot.
///
/// Dotfiles (`.env`) and names without a dot have no extension. Extensions
/// containing anything other than ASCII alphanumerics are dropped so a
/// crafted name cannot smuggle separators into the stored filename.
///
/// ```
/// use showroom_core::naming::extension_of;
///
/// assert_eq!(extension_of("sofa.JPG"), ".JPG");
/// assert_eq!(extension_of("C:\\photos\\lamp.png"), ".png");
/// assert_eq!(extension_of("README"), "");
/// ```
pub fn extension_of(original_name: &str) -> &str {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    match base.rfind('.') {
        Some(0) | None => "",
        Some(idx) => {
            let ext = &base[idx..];
            if ext[1..].chars().all(|c| c.is_ascii_alphanumeric()) {
                ext
            } else {
                ""
            }
        }
    }
}

/// Stored filename for an upload received at `timestamp_ms`.
pub fn upload_filename(timestamp_ms: i64, original_name: &str) -> String {
    format!(
        "{UPLOAD_PREFIX}{timestamp_ms}{}",
        extension_of(original_name)
    )
}

/// Public URL path for a stored filename.
pub fn upload_url(filename: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}/{filename}")
}

/// Monotonic millisecond source for upload names.
///
/// Returns the wall clock in unix milliseconds, bumped past the previously
/// issued value when two uploads land in the same millisecond (or the clock
/// steps backwards).
#[derive(Debug, Default)]
pub struct UploadClock {
    last: AtomicI64,
}

impl UploadClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> i64 {
        self.next_from(chrono::Utc::now().timestamp_millis())
    }

    fn next_from(&self, now_ms: i64) -> i64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}
