//! The shared certificate interface and the identity-only certificate.

use const_oid::db::rfc4519::CN;
use der::asn1::{Ia5StringRef, PrintableStringRef, TeletexStringRef, Utf8StringRef};
use der::{Any, Tag, Tagged};
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::SubjectAltName;
use x509_cert::Certificate;

/// Common interface of every certificate the handshake deals with.
pub trait Cert: Send + Sync {
    /// The identity this certificate asserts.
    ///
    /// For X.509 certificates this is the subject common name, or an empty
    /// string if the subject has none.
    fn identity(&self) -> String;

    /// The underlying X.509 certificate, if there is one.
    fn x509(&self) -> Option<&Certificate>;
}

/// A certificate that carries only an identity string.
///
/// Used where the peer has been authenticated by other means (for example a
/// resumed session) and only the identity remains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityCert {
    identity: String,
}

impl IdentityCert {
    /// Create an identity certificate.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

impl Cert for IdentityCert {
    fn identity(&self) -> String {
        self.identity.clone()
    }

    fn x509(&self) -> Option<&Certificate> {
        None
    }
}

/// First subject common name of `cert`, or an empty string.
pub(crate) fn common_name(cert: &Certificate) -> String {
    cert.tbs_certificate
        .subject
        .0
        .iter()
        .flat_map(|rdn| rdn.0.iter())
        .filter(|atv| atv.oid == CN)
        .find_map(|atv| directory_string(&atv.value))
        .unwrap_or_default()
}

/// DNS subjectAltNames of `cert`, in certificate order.
///
/// A missing or undecodable extension yields no names.
pub(crate) fn alt_names(cert: &Certificate) -> Vec<String> {
    match cert.tbs_certificate.get::<SubjectAltName>() {
        Ok(Some((_, san))) => san
            .0
            .iter()
            .filter_map(|name| match name {
                GeneralName::DnsName(dns) => Some(dns.to_string()),
                _ => None,
            })
            .collect(),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::debug!("Ignoring undecodable subjectAltName extension: {}", e);
            Vec::new()
        },
    }
}

fn directory_string(value: &Any) -> Option<String> {
    match value.tag() {
        Tag::Utf8String => Utf8StringRef::try_from(value).ok().map(|s| s.to_string()),
        Tag::PrintableString => PrintableStringRef::try_from(value).ok().map(|s| s.to_string()),
        Tag::Ia5String => Ia5StringRef::try_from(value).ok().map(|s| s.to_string()),
        Tag::TeletexString => TeletexStringRef::try_from(value).ok().map(|s| s.to_string()),
        _ => None,
    }
}
