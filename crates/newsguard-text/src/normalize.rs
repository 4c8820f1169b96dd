//! Text cleaning applied before vectorization.
//!
//! Training and serving both call [`normalize`]; any drift between the two
//! would silently change the features the model sees.

use regex::Regex;
use std::sync::LazyLock;

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>+").unwrap());
static NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Lowercase, then strip `[...]`, URLs, `<...>` tags and anything that is not
/// `a-z` or whitespace, then collapse whitespace and trim.
///
/// ```
/// use newsguard_text::normalize;
///
/// assert_eq!(normalize("Hello, <i>World</i>! [1]"), "hello world");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = BRACKETED.replace_all(&text, "");
    let text = URL.replace_all(&text, "");
    let text = HTML_TAG.replace_all(&text, "");
    let text = NON_ALPHA.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
