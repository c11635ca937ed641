/// Structural decomposition of a normalized address.
///
/// `full` always equals `local + "@" + domain`, lowercased and trimmed.
/// The `+` sub-address tag is flagged, never stripped: `user+tag@...`
/// stays distinct from `user@...`.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub full: String,
    pub local: String,
    pub domain: String,
    /// Last dot-separated label of the domain; the whole domain when it
    /// contains no dot.
    pub tld: String,
    pub has_subaddress_tag: bool,
}
