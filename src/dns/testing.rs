use std::cell::RefCell;
use std::collections::HashMap;

use trust_dns_resolver::error::ResolveError;

use super::{LookupError, LookupMx, LookupTxt, MxRecord};

type Answer<T> = Result<Vec<T>, String>;

/// Canned DNS answers keyed by name. Unknown names answer with no records.
#[derive(Default)]
pub(crate) struct StubResolver {
    mx: HashMap<String, Answer<MxRecord>>,
    txt: HashMap<String, Answer<String>>,
    queries: RefCell<Vec<String>>,
}

impl StubResolver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_mx<I, S>(mut self, domain: &str, records: I) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<String>,
    {
        let values = records
            .into_iter()
            .map(|(preference, exchange)| MxRecord::new(preference, exchange))
            .collect();
        self.mx.insert(domain.to_string(), Ok(values));
        self
    }

    pub(crate) fn with_mx_error(mut self, domain: &str, message: &str) -> Self {
        self.mx.insert(domain.to_string(), Err(message.to_string()));
        self
    }

    pub(crate) fn with_txt<I, S>(mut self, name: &str, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = records.into_iter().map(Into::into).collect();
        self.txt.insert(name.to_string(), Ok(values));
        self
    }

    pub(crate) fn with_txt_error(mut self, name: &str, message: &str) -> Self {
        self.txt.insert(name.to_string(), Err(message.to_string()));
        self
    }

    /// Every query seen so far, as `MX name` / `TXT name`.
    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    fn answer<T: Clone>(
        &self,
        kind: &str,
        table: &HashMap<String, Answer<T>>,
        name: &str,
    ) -> Result<Vec<T>, LookupError> {
        self.queries.borrow_mut().push(format!("{kind} {name}"));
        match table.get(name) {
            Some(Ok(records)) => Ok(records.clone()),
            Some(Err(message)) => Err(LookupError::resolve(
                name,
                ResolveError::from(message.clone()),
            )),
            None => Ok(Vec::new()),
        }
    }
}

impl LookupMx for StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, LookupError> {
        self.answer("MX", &self.mx, domain)
    }
}

impl LookupTxt for StubResolver {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        self.answer("TXT", &self.txt, name)
    }
}
