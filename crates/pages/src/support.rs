//! Shared lookup helpers for the page objects.

use action_resilient::{ActionError, CandidateSet, ProbeResolver};
use floracart_core_types::Presence;
use floracart_driver::Target;

/// Candidate set from a configured alternative list.
pub(crate) fn set_from(what: &str, selectors: &[String]) -> CandidateSet {
    let alternatives: Vec<&str> = selectors.iter().map(String::as_str).collect();
    CandidateSet::from_selectors(what, &alternatives)
}

/// Candidate set of child selectors scoped inside one parent target.
pub(crate) fn children_set(what: &str, parent: &Target, children: &[String]) -> CandidateSet {
    let alternatives: Vec<&str> = children.iter().map(String::as_str).collect();
    CandidateSet::children_of(what, parent, &alternatives)
}

/// Read the text of a candidate set under an explicit presence policy.
///
/// `Required` lookups surface exhaustion; `Optional` lookups degrade to the
/// default reading. Every call site states which one it wants.
pub(crate) async fn read_text_with(
    resolver: &ProbeResolver,
    set: &CandidateSet,
    presence: Presence,
    default: &str,
) -> Result<String, ActionError> {
    if presence.is_optional() {
        resolver.read_text_or(set, default).await
    } else {
        resolver.read_text(set).await
    }
}
