//! Company domain and logo derivation from a free-form website string

use url::Url;

use crate::model::CompanyIdentity;

const LOGO_BASE_URL: &str = "https://logo.clearbit.com";

/// Derive the bare domain and logo URL for a website
///
/// Missing or unparseable websites yield an empty identity.
pub fn derive_identity(website: Option<&str>) -> CompanyIdentity {
    let Some(website) = website.map(str::trim).filter(|w| !w.is_empty()) else {
        return CompanyIdentity::default();
    };

    match extract_domain(website) {
        Some(domain) => CompanyIdentity {
            logo: format!("{}/{}", LOGO_BASE_URL, domain),
            domain,
        },
        None => {
            tracing::debug!(website = %website, "Failed to extract domain from website");
            CompanyIdentity::default()
        }
    }
}

/// Host of the website with a leading `www.` removed
///
/// Hosts come back lower-cased from the URL parser.
fn extract_domain(website: &str) -> Option<String> {
    let absolute = if website.starts_with("http") {
        website.to_string()
    } else {
        format!("https://{}", website)
    };

    let url = Url::parse(&absolute).ok()?;
    let host = url.host_str()?;
    let domain = host.strip_prefix("www.").unwrap_or(host);

    if domain.is_empty() {
        return None;
    }

    Some(domain.to_string())
}
