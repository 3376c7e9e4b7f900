use crate::inspect::{DomainRecordSet, LookupWarning};

/// Sink for what the pipeline learns along the way.
///
/// The domain report is delivered as soon as inspection finishes, so it is
/// visible even when a later stage fails.
pub trait Reporter {
    fn domain_inspected(&mut self, records: &DomainRecordSet);
    fn lookup_warning(&mut self, warning: &LookupWarning);
}

/// Sends everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn domain_inspected(&mut self, records: &DomainRecordSet) {
        tracing::info!(
            domain = %records.domain(),
            has_mx = records.has_mx(),
            has_spf = records.has_spf(),
            spf_record = records.spf_record(),
            has_dmarc = records.has_dmarc(),
            dmarc_record = records.dmarc_record(),
            "domain inspected"
        );
    }

    fn lookup_warning(&mut self, warning: &LookupWarning) {
        tracing::warn!("{warning}");
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    pub records: Vec<DomainRecordSet>,
    pub warnings: Vec<LookupWarning>,
}

impl Reporter for CollectingReporter {
    fn domain_inspected(&mut self, records: &DomainRecordSet) {
        self.records.push(records.clone());
    }

    fn lookup_warning(&mut self, warning: &LookupWarning) {
        self.warnings.push(warning.clone());
    }
}
