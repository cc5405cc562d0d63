use fnv::FnvHashMap;

use crate::engine::variables::DomainId;

/// Names attached to variables for logging and solution display; variables without a name are
/// simply absent.
#[derive(Clone, Debug, Default)]
pub(crate) struct VariableNames {
    names: FnvHashMap<DomainId, String>,
}

impl VariableNames {
    pub(crate) fn get(&self, domain_id: DomainId) -> Option<&str> {
        self.names.get(&domain_id).map(String::as_str)
    }

    pub(crate) fn add(&mut self, domain_id: DomainId, name: String) {
        let _ = self.names.insert(domain_id, name);
    }
}
