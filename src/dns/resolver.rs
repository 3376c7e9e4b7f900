use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    lookup::TxtLookup,
};

use super::{LookupError, LookupMx, LookupTxt, MxRecord};

/// Build a resolver from the host's resolver configuration.
pub fn system_resolver() -> Result<Resolver, LookupError> {
    Resolver::from_system_conf().map_err(LookupError::resolver_init)
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, LookupError> {
        let lookup = match Resolver::mx_lookup(self, domain) {
            Ok(lookup) => lookup,
            Err(err) if should_treat_as_empty(&err) => return Ok(Vec::new()),
            Err(err) => return Err(LookupError::resolve(domain, err)),
        };
        let records = lookup
            .iter()
            .map(|mx| {
                let exchange = normalize_exchange(&mx.exchange().to_utf8());
                MxRecord::new(mx.preference(), exchange)
            })
            .collect::<Vec<_>>();
        tracing::debug!(domain, count = records.len(), "MX lookup answered");
        Ok(records)
    }
}

impl LookupTxt for Resolver {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = match Resolver::txt_lookup(self, name) {
            Ok(lookup) => lookup,
            Err(err) if should_treat_as_empty(&err) => return Ok(Vec::new()),
            Err(err) => return Err(LookupError::resolve(name, err)),
        };
        let records = collect_txt_records(name, &lookup)?;
        tracing::debug!(name, count = records.len(), "TXT lookup answered");
        Ok(records)
    }
}

fn collect_txt_records(name: &str, lookup: &TxtLookup) -> Result<Vec<String>, LookupError> {
    let mut records = Vec::new();
    for txt in lookup.iter() {
        let mut record = String::new();
        for piece in txt.txt_data().iter() {
            let segment = std::str::from_utf8(piece.as_ref())
                .map_err(|err| LookupError::txt_data_utf8(name, err))?;
            record.push_str(segment);
        }
        records.push(record);
    }
    Ok(records)
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}
