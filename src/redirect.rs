//! Redirect page generation.
//!
//! Produces the `index.html` stub that forwards visitors from a directory
//! URL to the real article. The page is a plain meta-refresh document with
//! a short delay and a "Redirecting…" placeholder styled to match the blog
//! theme, so the flash before the browser follows the refresh isn't a
//! white screen.
//!
//! Rendered with [maud](https://maud.lambda.xyz/) — malformed markup is a
//! compile error and the target URL is escaped on interpolation.

use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedirectError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Delay in seconds before the browser follows the refresh.
const REFRESH_DELAY: &str = "0.2";

/// Render the redirect document pointing at `target`.
pub fn render_redirect(target: &str) -> Markup {
    let refresh = format!("{REFRESH_DELAY}; url = {target}");
    html! {
        (DOCTYPE)
        html {
            head {
                title { "Redirecting" }
                link rel="shortcut icon" href="./resources/theme/favicon.ico";
                meta http-equiv="refresh" content=(refresh);
            }
            body style="background-color: rgb(24, 24, 24);" {
                div.article-container style="margin: 33%; display: flex; justify-content: center; align-items: center;" {
                    div style="margin: auto; color: rgba(245, 245, 245, 0.925);" {
                        p { "Redirecting..." }
                        p {
                            a href="https://www.flaticon.com/free-icons/book" title="book icons" {
                                "Book icons created by Freepik - Flaticon"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Render the redirect document for `target` and write it to `output`.
///
/// Parent directories are created as needed. Write failures propagate
/// unchanged — there is no fallback location for an index stub.
pub fn write_redirect(target: &str, output: &Path) -> Result<(), RedirectError> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, render_redirect(target).into_string())?;
    Ok(())
}
