//! URL feature extraction - mirrors the model's training-time pipeline exactly.
//!
//! Each URL string → fixed record of 17 integer features, built by three
//! stages applied in order:
//! - Length: size signals from the parsed URL (plus `url_length`, an
//!   intermediate the final record drops)
//! - Count: character/substring/segment counts over the raw URL string
//! - Binary: {-1, 1} pattern flags (IP-literal host, shortener domain; the
//!   shortener flag is also an intermediate dropped at assembly)
//!
//! Column order is the contract with the trained classifier: a same-length
//! vector with reordered columns predicts garbage without any error, so the
//! order lives in one compile-time constant shared with the model-config
//! validation in `inference`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::suffix;
use crate::urlparts::UrlParts;

/// Number of columns the classifier consumes.
pub const NUM_FEATURES: usize = 17;

/// Output schema, in the exact order `UrlFeatures::to_vec` emits values.
pub const FEATURE_COLUMNS: [&str; NUM_FEATURES] = [
    "hostname_length",
    "path_length",
    "fd_length",
    "tld_length",
    "numberOf-",
    "numberOf@",
    "numberOf?",
    "numberOf%",
    "numberOf.",
    "numberOf=",
    "numberOfhttp",
    "numberOfhttps",
    "numberOfwww",
    "numberOfdigits",
    "numberOfletters",
    "numberOfdir",
    "use_of_ip",
];

/// Dotted-decimal IPv4 followed by `/`, hex-octet IPv4 followed by `/`, or
/// 8 colon-separated IPv6 groups. Matched against the whole URL text, not
/// the isolated host — the training pipeline did the same, so host-scoping
/// this would shift the feature distribution the model was fit on.
static IP_ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(([01]?\d\d?|2[0-4]\d|25[0-5])\.([01]?\d\d?|2[0-4]\d|25[0-5])\.",
        r"([01]?\d\d?|2[0-4]\d|25[0-5])\.([01]?\d\d?|2[0-4]\d|25[0-5])/)|",
        r"((0x[0-9a-fA-F]{1,2})\.(0x[0-9a-fA-F]{1,2})\.",
        r"(0x[0-9a-fA-F]{1,2})\.(0x[0-9a-fA-F]{1,2})/)|",
        r"((?:[a-fA-F0-9]{1,4}:){7}[a-fA-F0-9]{1,4})",
    ))
    .unwrap()
});

/// Known URL-shortener domains, ported verbatim from the training pipeline
/// (case-sensitive, substring match against the whole URL text).
static SHORTENER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"bit\.ly|goo\.gl|shorte\.st|go2l\.ink|x\.co|ow\.ly|t\.co|tinyurl|tr\.im|is\.gd|cli\.gs|",
        r"yfrog\.com|migre\.me|ff\.im|tiny\.cc|url4\.eu|twit\.ac|su\.pr|twurl\.nl|snipurl\.com|",
        r"short\.to|BudURL\.com|ping\.fm|post\.ly|Just\.as|bkite\.com|snipr\.com|fic\.kr|loopt\.us|",
        r"doiop\.com|short\.ie|kl\.am|wp\.me|rubyurl\.com|om\.ly|to\.ly|bit\.do|t\.co|lnkd\.in|",
        r"db\.tt|qr\.ae|adf\.ly|goo\.gl|bitly\.com|cur\.lv|tinyurl\.com|ow\.ly|bit\.ly|ity\.im|",
        r"q\.gs|is\.gd|po\.st|bc\.vc|twitthis\.com|u\.to|j\.mp|buzurl\.com|cutt\.us|u\.bb|yourls\.org|",
        r"x\.co|prettylinkpro\.com|scrnch\.me|filoops\.info|vzturl\.com|qr\.net|1url\.com|tweez\.me|v\.gd|",
        r"tr\.im|link\.zip\.net",
    ))
    .unwrap()
});

/// The final feature record handed to the classifier.
///
/// Field order is the column order; `serde` renames reproduce the exact
/// training-time column names. `url_length` and `short_url` are computed by
/// the stages below but never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrlFeatures {
    pub hostname_length: i64,
    pub path_length: i64,
    pub fd_length: i64,
    pub tld_length: i64,
    #[serde(rename = "numberOf-")]
    pub number_of_hyphen: i64,
    #[serde(rename = "numberOf@")]
    pub number_of_at: i64,
    #[serde(rename = "numberOf?")]
    pub number_of_question: i64,
    #[serde(rename = "numberOf%")]
    pub number_of_percent: i64,
    #[serde(rename = "numberOf.")]
    pub number_of_dot: i64,
    #[serde(rename = "numberOf=")]
    pub number_of_equals: i64,
    #[serde(rename = "numberOfhttp")]
    pub number_of_http: i64,
    #[serde(rename = "numberOfhttps")]
    pub number_of_https: i64,
    #[serde(rename = "numberOfwww")]
    pub number_of_www: i64,
    #[serde(rename = "numberOfdigits")]
    pub number_of_digits: i64,
    #[serde(rename = "numberOfletters")]
    pub number_of_letters: i64,
    #[serde(rename = "numberOfdir")]
    pub number_of_dir: i64,
    pub use_of_ip: i64,
}

impl UrlFeatures {
    /// Flatten into the classifier's input row, in `FEATURE_COLUMNS` order.
    pub fn to_vec(&self) -> Vec<f32> {
        vec![
            self.hostname_length as f32,
            self.path_length as f32,
            self.fd_length as f32,
            self.tld_length as f32,
            self.number_of_hyphen as f32,
            self.number_of_at as f32,
            self.number_of_question as f32,
            self.number_of_percent as f32,
            self.number_of_dot as f32,
            self.number_of_equals as f32,
            self.number_of_http as f32,
            self.number_of_https as f32,
            self.number_of_www as f32,
            self.number_of_digits as f32,
            self.number_of_letters as f32,
            self.number_of_dir as f32,
            self.use_of_ip as f32,
        ]
    }
}

/// Length-stage output. `url_length` is an intermediate: assembly drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFeatures {
    pub url_length: i64,
    pub hostname_length: i64,
    pub path_length: i64,
    pub fd_length: i64,
    pub tld_length: i64,
}

/// Count-stage output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountFeatures {
    pub number_of_hyphen: i64,
    pub number_of_at: i64,
    pub number_of_question: i64,
    pub number_of_percent: i64,
    pub number_of_dot: i64,
    pub number_of_equals: i64,
    pub number_of_http: i64,
    pub number_of_https: i64,
    pub number_of_www: i64,
    pub number_of_digits: i64,
    pub number_of_letters: i64,
    pub number_of_dir: i64,
}

/// Binary-stage output. `short_url` is an intermediate: assembly drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryFeatures {
    pub use_of_ip: i64,
    pub short_url: i64,
}

fn chars(s: &str) -> i64 {
    s.chars().count() as i64
}

/// Size signals from the parsed URL.
pub fn length_features(url: &str) -> LengthFeatures {
    let parts = UrlParts::split(url);

    // Index 1 of the '/'-split exactly, empty segments included: the
    // training pipeline took `path.split('/')[1]` and collapsed the
    // out-of-range error to 0.
    let fd_length = parts.path.split('/').nth(1).map_or(0, chars);

    let tld_length = suffix::url_suffix(url).as_deref().map_or(-1, chars);

    LengthFeatures {
        url_length: chars(url),
        hostname_length: chars(parts.authority),
        path_length: chars(parts.path),
        fd_length,
        tld_length,
    }
}

/// Occurrence counts over the raw URL string (path-scoped for
/// `number_of_dir` only). Substring counts are non-overlapping, so `http`
/// also matches inside every `https` — the double-count is part of the
/// trained schema.
pub fn count_features(url: &str) -> CountFeatures {
    let path = UrlParts::split(url).path;

    CountFeatures {
        number_of_hyphen: url.matches('-').count() as i64,
        number_of_at: url.matches('@').count() as i64,
        number_of_question: url.matches('?').count() as i64,
        number_of_percent: url.matches('%').count() as i64,
        number_of_dot: url.matches('.').count() as i64,
        number_of_equals: url.matches('=').count() as i64,
        number_of_http: url.matches("http").count() as i64,
        number_of_https: url.matches("https").count() as i64,
        number_of_www: url.matches("www").count() as i64,
        number_of_digits: url.chars().filter(|c| c.is_numeric()).count() as i64,
        number_of_letters: url.chars().filter(|c| c.is_alphabetic()).count() as i64,
        number_of_dir: path.matches('/').count() as i64,
    }
}

/// Pattern flags over the raw URL text: -1 on match, 1 otherwise.
pub fn binary_features(url: &str) -> BinaryFeatures {
    let flag = |matched: bool| if matched { -1 } else { 1 };

    BinaryFeatures {
        use_of_ip: flag(IP_ADDRESS_RE.is_match(url)),
        short_url: flag(SHORTENER_RE.is_match(url)),
    }
}

/// Run the three stages in order and assemble the final record, dropping
/// the `url_length` and `short_url` intermediates. Pure and total: any
/// string yields a vector, malformed components collapse to the 0 / -1
/// sentinels.
pub fn extract(url: &str) -> UrlFeatures {
    let length = length_features(url);
    let count = count_features(url);
    let binary = binary_features(url);

    UrlFeatures {
        hostname_length: length.hostname_length,
        path_length: length.path_length,
        fd_length: length.fd_length,
        tld_length: length.tld_length,
        number_of_hyphen: count.number_of_hyphen,
        number_of_at: count.number_of_at,
        number_of_question: count.number_of_question,
        number_of_percent: count.number_of_percent,
        number_of_dot: count.number_of_dot,
        number_of_equals: count.number_of_equals,
        number_of_http: count.number_of_http,
        number_of_https: count.number_of_https,
        number_of_www: count.number_of_www,
        number_of_digits: count.number_of_digits,
        number_of_letters: count.number_of_letters,
        number_of_dir: count.number_of_dir,
        use_of_ip: binary.use_of_ip,
    }
}
