//! Lexical URL splitting into scheme / authority / path.
//!
//! This is a plain generic-URI component split with no normalization, no
//! percent-decoding and no validation: component lengths always refer to the
//! text exactly as given. Anything that does not read as an absolute URL
//! comes back with an empty authority and the remaining text as the path, so
//! the split is total over arbitrary strings. (The `url` crate is not usable
//! here: it rejects relative references and normalizes components — e.g.
//! `https://host` gains a `/` path — which would shift every derived length.)

/// The components of a URL string, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Scheme without the trailing `:`, if the input has a valid one.
    pub scheme: Option<&'a str>,
    /// Authority (userinfo, host and port as written); empty if absent.
    pub authority: &'a str,
    /// Path up to the query separator; empty if absent.
    pub path: &'a str,
}

impl<'a> UrlParts<'a> {
    /// Split a raw URL string. Total: never fails, never allocates.
    pub fn split(url: &'a str) -> Self {
        // Fragment is not a component we use; cut it before anything else.
        let mut rest = match url.find('#') {
            Some(idx) => &url[..idx],
            None => url,
        };

        let mut scheme = None;
        if let Some(idx) = rest.find(':') {
            let candidate = &rest[..idx];
            if is_scheme(candidate) {
                scheme = Some(candidate);
                rest = &rest[idx + 1..];
            }
        }

        let authority = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find(['/', '?']).unwrap_or(after.len());
                let authority = &after[..end];
                rest = &after[end..];
                authority
            }
            None => "",
        };

        let path = match rest.find('?') {
            Some(idx) => &rest[..idx],
            None => rest,
        };

        UrlParts {
            scheme,
            authority,
            path,
        }
    }

    /// The host portion of the authority: userinfo and port stripped,
    /// IPv6 brackets kept as written. `None` when there is no authority.
    pub fn host(&self) -> Option<&'a str> {
        if self.authority.is_empty() {
            return None;
        }
        let after_user = self.authority.rsplit('@').next().unwrap_or(self.authority);
        let host = if after_user.starts_with('[') {
            match after_user.find(']') {
                Some(end) => &after_user[..=end],
                None => after_user,
            }
        } else {
            after_user.split(':').next().unwrap_or(after_user)
        };
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_url_splits_into_components() {
        let parts = UrlParts::split("https://www.google.com/search?q=rust");
        assert_eq!(parts.scheme, Some("https"));
        assert_eq!(parts.authority, "www.google.com");
        assert_eq!(parts.path, "/search");
    }

    #[test]
    fn no_authority_means_everything_is_path() {
        let parts = UrlParts::split("www.google.com/search");
        assert_eq!(parts.scheme, None);
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "www.google.com/search");
    }

    #[test]
    fn digit_led_prefix_is_not_a_scheme() {
        // "192.168.1.1:80" must not parse "192.168.1.1" as a scheme.
        let parts = UrlParts::split("192.168.1.1:80/admin");
        assert_eq!(parts.scheme, None);
        assert_eq!(parts.path, "192.168.1.1:80/admin");
    }

    #[test]
    fn scheme_without_slashes_keeps_rest_as_path() {
        let parts = UrlParts::split("mailto:someone@example.com");
        assert_eq!(parts.scheme, Some("mailto"));
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "someone@example.com");
    }

    #[test]
    fn network_relative_reference_has_authority() {
        let parts = UrlParts::split("//cdn.example.com/a.js");
        assert_eq!(parts.scheme, None);
        assert_eq!(parts.authority, "cdn.example.com");
        assert_eq!(parts.path, "/a.js");
    }

    #[test]
    fn fragment_is_cut_before_splitting() {
        let parts = UrlParts::split("http://a.com/x#frag/with/slashes?and=query");
        assert_eq!(parts.authority, "a.com");
        assert_eq!(parts.path, "/x");
    }

    #[test]
    fn empty_and_garbage_inputs_do_not_panic() {
        let parts = UrlParts::split("");
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "");

        let parts = UrlParts::split("not a url at all");
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "not a url at all");
    }

    #[test]
    fn host_strips_userinfo_and_port() {
        let parts = UrlParts::split("http://user:pw@www.example.com:8080/x");
        assert_eq!(parts.authority, "user:pw@www.example.com:8080");
        assert_eq!(parts.host(), Some("www.example.com"));
    }

    #[test]
    fn host_keeps_ipv6_brackets() {
        let parts = UrlParts::split("http://[2001:db8::1]:443/x");
        assert_eq!(parts.host(), Some("[2001:db8::1]"));
    }

    #[test]
    fn host_is_none_without_authority() {
        assert_eq!(UrlParts::split("www.example.com").host(), None);
        assert_eq!(UrlParts::split("").host(), None);
    }
}
