//! Output formatting for scan results.

use serde::Serialize;

use crate::features::UrlFeatures;

#[derive(Debug, Clone, Serialize)]
pub struct UrlScanResult {
    pub url: String,
    pub is_malicious: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<UrlFeatures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {s}. Use 'text' or 'json'.")),
        }
    }
}

pub fn print_results(results: &[UrlScanResult], format: OutputFormat) {
    match format {
        OutputFormat::Text => print_text(results),
        OutputFormat::Json => print_json(results),
    }
}

fn print_text(results: &[UrlScanResult]) {
    let malicious: Vec<_> = results.iter().filter(|r| r.is_malicious).collect();
    let errors: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let benign = results.len() - malicious.len() - errors.len();

    println!("\n{}", "=".repeat(70));
    println!("SCAN RESULTS");
    println!("{}", "=".repeat(70));

    if !malicious.is_empty() {
        println!("\nMALICIOUS URLS ({}):", malicious.len());
        for r in &malicious {
            println!("  [MAL ] {}", r.url);
        }
    }

    if !errors.is_empty() {
        println!("\nERRORS ({}):", errors.len());
        for r in &errors {
            let err = r.error.as_deref().unwrap_or("unknown");
            println!("  [ERR ] {} -- {}", r.url, err);
        }
    }

    println!("\nSUMMARY:");
    println!("  Total URLs scanned: {}", results.len());
    println!("  Malicious:          {}", malicious.len());
    println!("  Benign:             {}", benign);
    println!("  Errors:             {}", errors.len());
    println!("{}", "=".repeat(70));
}

fn print_json(results: &[UrlScanResult]) {
    let output = serde_json::json!({
        "results": results,
        "summary": {
            "total": results.len(),
            "malicious": results.iter().filter(|r| r.is_malicious).count(),
            "benign": results.iter().filter(|r| !r.is_malicious && r.error.is_none()).count(),
            "errors": results.iter().filter(|r| r.error.is_some()).count(),
        }
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract;

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn result_serializes_with_feature_columns() {
        let result = UrlScanResult {
            url: "http://192.168.1.1/admin".into(),
            is_malicious: true,
            features: Some(extract("http://192.168.1.1/admin")),
            error: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["url"], "http://192.168.1.1/admin");
        assert_eq!(json["is_malicious"], true);
        assert_eq!(json["features"]["use_of_ip"], -1);
        // Absent optional fields must not appear at all.
        assert!(json.as_object().unwrap().get("error").is_none());
    }

    #[test]
    fn error_result_serializes_without_verdict_detail() {
        let result = UrlScanResult {
            url: "https://example.com".into(),
            is_malicious: false,
            features: Some(extract("https://example.com")),
            error: Some("inference error: boom".into()),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "inference error: boom");
        assert_eq!(json["is_malicious"], false);
    }
}
