//! 域名名称处理
//!
//! AliDNS addresses records by zone plus a relative "RR" label (`www`, `_acme-challenge`,
//! `@` for the apex), while automation tools hand us names that may be fully qualified,
//! carry a trailing dot, or already be relative.

/// RR value AliDNS uses for the zone apex.
pub const APEX_RR: &str = "@";

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Computes the zone-relative name of `name`.
///
/// Trailing dots are ignored on both sides. A name equal to the zone yields the empty
/// string (the apex); a name ending in `.{zone}` loses that suffix; anything else is
/// taken to be relative already.
///
/// Unlike plain string suffix stripping, the zone is only removed on a label
/// boundary: `myexample.com` in zone `example.com` is kept whole rather than
/// becoming `my`.
///
/// ```
/// use alidns_provider::names::relative_name;
///
/// assert_eq!(relative_name("www.example.com.", "example.com"), "www");
/// assert_eq!(relative_name("example.com", "example.com"), "");
/// assert_eq!(relative_name("foo", "example.com"), "foo");
/// ```
pub fn relative_name(name: &str, zone: &str) -> String {
    let name = normalize_domain_name(name);
    let zone = normalize_domain_name(zone);

    if zone.is_empty() {
        return name.to_string();
    }
    if name == zone {
        return String::new();
    }
    name.strip_suffix(zone)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .unwrap_or(name)
        .trim_end_matches('.')
        .to_string()
}

/// Maps a relative name to the RR value sent to AliDNS.
pub fn to_vendor_rr(relative: &str) -> &str {
    if relative.is_empty() { APEX_RR } else { relative }
}

/// Rebuilds the full name of a listed record from its RR and the vendor's domain name.
///
/// 如: "www" + "example.com" -> "www.example.com"
/// 如: "@" + "example.com" -> "example.com"
///
/// The apex RR is not joined verbatim: `@` (or an empty RR) yields the bare
/// domain instead of `@.example.com`.
pub fn absolute_name(rr: &str, domain_name: &str) -> String {
    if rr == APEX_RR || rr.is_empty() {
        domain_name.to_string()
    } else {
        format!("{rr}.{domain_name}")
    }
}
