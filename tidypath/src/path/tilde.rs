//! Home directory expansion for a leading `~` or `~name`.
//!
//! Expansion never fails: when a home directory cannot be determined the
//! input is returned unchanged.

use std::borrow::Cow;
use std::path::PathBuf;

/// Expand a leading `~` (current user) or `~name` (named user).
///
/// Only the text up to the first `/` is considered. Paths that do not start
/// with `~`, and users whose home cannot be resolved, are left as-is.
///
/// # Examples
///
/// ```
/// use tidypath::path::tilde::expand_tilde;
///
/// // Expands ~/path to home/path
/// let expanded = expand_tilde("~/project");
/// assert!(expanded.ends_with("/project"));
///
/// // Leaves other paths unchanged
/// assert_eq!(expand_tilde("/absolute"), "/absolute");
///
/// // Unknown users are not an error
/// assert_eq!(
///     expand_tilde("~no-such-user-here/x"),
///     "~no-such-user-here/x"
/// );
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if !path.starts_with('~') {
        return Cow::Borrowed(path);
    }

    let (head, rest) = match path.find('/') {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    };
    let user = &head[1..];

    let home = if user.is_empty() {
        home::home_dir()
    } else {
        user_home(user)
    };

    match home.as_deref().and_then(|h| h.to_str()) {
        Some(home) if !home.is_empty() => {
            let home = if cfg!(windows) {
                home.replace('\\', "/")
            } else {
                home.to_string()
            };
            Cow::Owned(format!("{home}{rest}"))
        }
        _ => {
            log::trace!("leaving {head} unexpanded: no home directory found");
            Cow::Borrowed(path)
        }
    }
}

/// Look up a named user's home directory in the local `/etc/passwd`.
///
/// Only that file is read. Users known solely through other name services
/// (NSS modules such as LDAP) are not found, so their `~name` stays
/// unexpanded.
#[cfg(unix)]
fn user_home(user: &str) -> Option<PathBuf> {
    let passwd = std::fs::read_to_string("/etc/passwd").ok()?;
    passwd_home(&passwd, user)
}

#[cfg(not(unix))]
fn user_home(_user: &str) -> Option<PathBuf> {
    None
}

/// Find `user`'s home field in passwd-formatted text.
#[cfg_attr(not(unix), allow(dead_code))]
fn passwd_home(passwd: &str, user: &str) -> Option<PathBuf> {
    passwd
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.split(':').collect::<Vec<_>>())
        .find(|fields| fields.len() >= 7 && fields[0] == user)
        .map(|fields| PathBuf::from(fields[5]))
        .filter(|home| !home.as_os_str().is_empty())
}
