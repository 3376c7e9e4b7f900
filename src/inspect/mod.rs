//! Domain inspection: MX, SPF and DMARC.
//!
//! Only the MX answer decides the outcome. SPF and DMARC are looked up for
//! display; their lookup failures are handed to the [`Reporter`] as
//! [`LookupWarning`]s and the inspection carries on.

mod error;
mod types;

pub use error::DomainError;
pub use types::{DomainRecordSet, LookupWarning, RecordKind};

use crate::address::Domain;
use crate::dns::DnsResolver;
use crate::pipeline::Reporter;

const SPF_PREFIX: &str = "v=spf1";
const DMARC_PREFIX: &str = "v=DMARC1";

/// Inspect `domain`, report the record set, and require at least one MX.
///
/// A resolver error on the MX lookup fails before anything is reported. An
/// empty MX answer still reports the full record set, then fails with
/// [`DomainError::NoMxRecords`].
pub fn inspect<R>(
    resolver: &R,
    domain: &Domain,
    reporter: &mut dyn Reporter,
) -> Result<DomainRecordSet, DomainError>
where
    R: DnsResolver + ?Sized,
{
    let records = collect_records(resolver, domain, reporter)?;
    reporter.domain_inspected(&records);

    if !records.has_mx() {
        return Err(DomainError::NoMxRecords);
    }
    Ok(records)
}

/// Run the three lookups without applying the MX decision rule.
pub fn collect_records<R>(
    resolver: &R,
    domain: &Domain,
    reporter: &mut dyn Reporter,
) -> Result<DomainRecordSet, DomainError>
where
    R: DnsResolver + ?Sized,
{
    let mx = resolver
        .lookup_mx(domain.as_str())
        .map_err(DomainError::mx_lookup)?;

    let spf = first_txt_with_prefix(
        resolver,
        RecordKind::Spf,
        domain,
        domain.as_str(),
        SPF_PREFIX,
        reporter,
    );
    let dmarc = first_txt_with_prefix(
        resolver,
        RecordKind::Dmarc,
        domain,
        &domain.dmarc_name(),
        DMARC_PREFIX,
        reporter,
    );

    tracing::debug!(
        %domain,
        mx = mx.len(),
        spf = spf.is_some(),
        dmarc = dmarc.is_some(),
        "domain records collected"
    );
    Ok(DomainRecordSet::new(domain.clone(), mx, spf, dmarc))
}

fn first_txt_with_prefix<R>(
    resolver: &R,
    kind: RecordKind,
    domain: &Domain,
    name: &str,
    prefix: &str,
    reporter: &mut dyn Reporter,
) -> Option<String>
where
    R: DnsResolver + ?Sized,
{
    match resolver.lookup_txt(name) {
        Ok(records) => first_with_prefix(&records, prefix),
        Err(err) => {
            reporter.lookup_warning(&LookupWarning {
                kind,
                domain: domain.clone(),
                message: err.to_string(),
            });
            None
        }
    }
}

/// First record, in resolver order, that starts with `prefix` (case-sensitive).
pub(crate) fn first_with_prefix(records: &[String], prefix: &str) -> Option<String> {
    records
        .iter()
        .find(|record| record.starts_with(prefix))
        .cloned()
}
