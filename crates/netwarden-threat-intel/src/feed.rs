//! Line-oriented blacklist feed importers.
//!
//! Two local-file formats are supported:
//!
//! - Domain feeds in urlhaus hostfile style: one URL or hostname per line,
//!   `#` comment lines, optional `http://`/`https://` prefix and URL path.
//! - IP feeds in FireHOL netset style: one address per line, `#` comments.
//!
//! Importers strip each line down to the bare indicator, validate its
//! syntax, skip what they cannot parse (with a debug log), and report how
//! many entries they added.
//! A file-access failure surfaces as [`FeedError`] and leaves whatever was
//! already loaded untouched.

use std::path::Path;

use tracing::{debug, info};

use crate::blacklist::{DomainBlacklist, IpBlacklist};
use crate::error::Result;
use crate::ioc::IocValue;

/// Import a urlhaus-style domain feed into the blacklist.
///
/// Returns the number of entries added (replacements count too, matching
/// the store's insert-or-replace semantics).
pub fn import_domain_feed(path: &Path, blacklist: &mut DomainBlacklist) -> Result<usize> {
    let contents = std::fs::read_to_string(path)?;

    let mut added = 0;
    for line in contents.lines() {
        match domain_from_feed_line(line) {
            Some(domain) => {
                blacklist.add(domain, IocValue::unattributed());
                added += 1;
            }
            None => {
                if !line.trim().is_empty() && !is_comment(line) {
                    debug!(line, "skipped malformed domain feed line");
                }
            }
        }
    }

    info!(path = %path.display(), added, "imported domain blacklist feed");
    Ok(added)
}

/// Import a one-address-per-line IP feed into the blacklist.
pub fn import_ip_feed(path: &Path, blacklist: &mut IpBlacklist) -> Result<usize> {
    let contents = std::fs::read_to_string(path)?;

    let mut added = 0;
    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }
        match trimmed.parse() {
            Ok(addr) => {
                blacklist.add(addr, IocValue::unattributed());
                added += 1;
            }
            Err(_) => debug!(line = trimmed, "skipped unparseable IP feed line"),
        }
    }

    info!(path = %path.display(), added, "imported IP blacklist feed");
    Ok(added)
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Reduce one feed line to a bare hostname: drop comments and blanks,
/// strip a scheme prefix, truncate the URL path, and reject anything that
/// is not a syntactically valid domain.
fn domain_from_feed_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_comment(trimmed) {
        return None;
    }

    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    let host = match host.find('/') {
        Some(pos) => &host[..pos],
        None => host,
    };

    if !is_valid_domain(host) {
        return None;
    }
    Some(host)
}

/// Check a hostname against RFC 1035 syntax rules: dot-delimited labels of
/// 1-63 letters, digits, and interior hyphens, at most 253 characters in
/// total. Feed entries that fail are skipped rather than blacklisted
/// verbatim.
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn feed_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    // -----------------------------------------------------------------------
    // Line parsing
    // -----------------------------------------------------------------------

    #[test]
    fn strips_scheme_and_path() {
        assert_eq!(
            domain_from_feed_line("http://evil.com/payload.exe"),
            Some("evil.com")
        );
        assert_eq!(
            domain_from_feed_line("https://bad.example/a/b/c"),
            Some("bad.example")
        );
        assert_eq!(domain_from_feed_line("plain.example"), Some("plain.example"));
    }

    #[test]
    fn skips_comments_and_blanks() {
        assert_eq!(domain_from_feed_line("# urlhaus feed header"), None);
        assert_eq!(domain_from_feed_line("   "), None);
        assert_eq!(domain_from_feed_line(""), None);
        assert_eq!(domain_from_feed_line("http:///"), None);
    }

    // -----------------------------------------------------------------------
    // Domain syntax validation
    // -----------------------------------------------------------------------

    #[test]
    fn empty_domain_is_invalid() {
        assert!(!is_valid_domain(""));
    }

    #[test]
    fn label_longer_than_63_is_invalid() {
        let domain = format!("{}.com", "a".repeat(64));
        assert!(!is_valid_domain(&domain));
    }

    #[test]
    fn label_of_exactly_63_is_valid() {
        let domain = format!("{}.com", "a".repeat(63));
        assert!(is_valid_domain(&domain));
    }

    #[test]
    fn domain_longer_than_253_is_invalid() {
        // 63 + 1 + 63 + 1 + 63 + 1 + 62 = 254 characters.
        let domain = format!(
            "{}.{}.{}.{}",
            "a".repeat(63),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(62)
        );
        assert_eq!(domain.len(), 254);
        assert!(!is_valid_domain(&domain));
    }

    #[test]
    fn domain_of_maximum_length_is_valid() {
        let domain = format!(
            "{}.{}.{}.{}",
            "a".repeat(63),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(61)
        );
        assert_eq!(domain.len(), 253);
        assert!(is_valid_domain(&domain));
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert!(!is_valid_domain("using_an_invalid.char"));
        assert!(!is_valid_domain("white space.com"));
        assert!(is_valid_domain("hyphen-ated.example"));
        assert!(!is_valid_domain("-leading.hyphen"));
        assert!(!is_valid_domain("trailing-.hyphen"));
    }

    #[test]
    fn empty_labels_are_rejected() {
        assert!(!is_valid_domain("a..b"));
        assert!(!is_valid_domain(".evil.com"));
        assert!(!is_valid_domain("evil.com."));
    }

    #[test]
    fn malformed_domains_never_reach_the_blacklist() {
        assert_eq!(domain_from_feed_line("using_an_invalid.char"), None);
        assert_eq!(
            domain_from_feed_line(&format!("http://{}.com/x", "a".repeat(64))),
            None
        );
    }

    // -----------------------------------------------------------------------
    // File import
    // -----------------------------------------------------------------------

    #[test]
    fn imports_domain_feed_file() {
        let file = feed_file(
            "# feed generated 2026-08-01\n\
             http://evil.com/drop.php\n\
             bare.example\n\
             \n\
             using_an_invalid.char\n\
             https://c2.bad.example/gate\n",
        );

        let mut bl = DomainBlacklist::new();
        let added = import_domain_feed(file.path(), &mut bl).unwrap();

        assert_eq!(added, 3);
        assert!(bl.lookup("evil.com").is_some());
        assert!(bl.lookup("bare.example").is_some());
        assert!(bl.lookup("c2.bad.example").is_some());
        assert!(bl.lookup("using_an_invalid.char").is_none());
    }

    #[test]
    fn imports_ip_feed_file() {
        let file = feed_file(
            "# firehol level1\n\
             203.0.113.9\n\
             not-an-address\n\
             2001:db8::1\n",
        );

        let mut bl = IpBlacklist::new();
        let added = import_ip_feed(file.path(), &mut bl).unwrap();

        assert_eq!(added, 2);
        assert!(bl.lookup("203.0.113.9".parse().unwrap()).is_some());
        assert!(bl.lookup("2001:db8::1".parse().unwrap()).is_some());
    }

    #[test]
    fn missing_file_is_an_error_and_leaves_store_untouched() {
        let mut bl = DomainBlacklist::new();
        bl.add("evil.com", IocValue::unattributed());

        let result = import_domain_feed(Path::new("/nonexistent/feed.txt"), &mut bl);
        assert!(result.is_err());
        assert_eq!(bl.len(), 1);
        assert!(bl.lookup("evil.com").is_some());
    }

    #[test]
    fn duplicate_feed_entries_replace_not_duplicate() {
        let file = feed_file("http://evil.com/a\nhttp://evil.com/b\n");

        let mut bl = DomainBlacklist::new();
        let added = import_domain_feed(file.path(), &mut bl).unwrap();

        assert_eq!(added, 2);
        assert_eq!(bl.len(), 1);
    }
}
