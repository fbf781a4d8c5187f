use crate::config::TrailingSlash;

use std::borrow::Cow;

/// Returns the canonical form of a URL path, eliminating `.` and `..`
/// elements and repeated slashes.
///
/// The following rules are applied:
///  1. Replace multiple slashes with a single slash.
///  2. Eliminate each `.` path name element (the current directory).
///  3. Eliminate each inner `..` path name element (the parent directory)
///     along with the non-`..` element that precedes it.
///  4. Eliminate `..` elements that begin a rooted path, that is, replace
///     `/..` by `/` at the beginning of a path.
///
/// A trailing slash or a trailing `.` element is kept as a trailing slash. If
/// the result is empty, `/` is returned.
pub fn clean_path(p: &str) -> Cow<'_, str> {
    if is_clean(p) {
        return Cow::Borrowed(p);
    }

    let mut segments: Vec<&str> = Vec::new();
    let mut trailing = false;

    for segment in p.split('/') {
        trailing = false;
        match segment {
            "" | "." => trailing = true,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    let mut out = String::with_capacity(p.len() + 1);
    for segment in &segments {
        out.push('/');
        out.push_str(segment);
    }

    if out.is_empty() || trailing {
        out.push('/');
    }

    Cow::Owned(out)
}

// A path is clean if it is rooted and has no empty, `.` or `..` elements
// other than a single trailing slash.
fn is_clean(p: &str) -> bool {
    let Some(rest) = p.strip_prefix('/') else {
        return false;
    };

    if rest.is_empty() {
        return true;
    }

    let rest = rest.strip_suffix('/').unwrap_or(rest);
    !rest.is_empty() && rest.split('/').all(|s| !matches!(s, "" | "." | ".."))
}

impl TrailingSlash {
    /// Applies the policy to a path. The root path `/` is never trimmed.
    pub fn apply<'p>(&self, path: &'p str) -> &'p str {
        match self {
            TrailingSlash::Strict => path,
            TrailingSlash::Trim => {
                let trimmed = path.trim_end_matches('/');
                if trimmed.is_empty() {
                    &path[..path.len().min(1)]
                } else {
                    trimmed
                }
            }
        }
    }
}
