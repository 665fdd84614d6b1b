//! Screenshot lookup for a theme directory

use crate::crawler::fetcher::Fetcher;
use crate::Result;

/// Screenshot extensions, in the order they are probed
pub const SCREENSHOT_EXTENSIONS: [&str; 3] = ["jpeg", "png", "jpg"];

/// Returns the first `screenshot.<ext>` under the theme directory that answers 2xx
///
/// `theme_url` must end with `/`. Requests are issued one at a time and the
/// search stops at the first hit.
pub async fn get_screenshot(fetcher: &Fetcher, theme_url: &str) -> Result<Option<String>> {
    for extension in SCREENSHOT_EXTENSIONS {
        let screenshot_url = format!("{}screenshot.{}", theme_url, extension);
        let status = fetcher.head(&screenshot_url).await?;

        if (200..300).contains(&status) {
            tracing::debug!("Found theme screenshot at {}", screenshot_url);
            return Ok(Some(screenshot_url));
        }
        tracing::trace!("No screenshot at {} (status {})", screenshot_url, status);
    }

    Ok(None)
}
