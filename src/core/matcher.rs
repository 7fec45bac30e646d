/// A regional feed row that can participate in matching
pub trait FeedRecord {
    fn record_name(&self) -> &str;
    fn record_address(&self) -> &str;
}

/// The facility we are trying to locate in a feed
#[derive(Debug, Clone, Copy)]
pub struct MatchTarget<'a> {
    pub name: &'a str,
    pub address: &'a str,
}

impl<'a> MatchTarget<'a> {
    pub fn new(name: &'a str, address: &'a str) -> Self {
        Self { name, address }
    }
}

/// Find the first feed row matching the target.
///
/// A row matches when the target name and row name contain one another in
/// either direction, or the same holds for the addresses. Either half alone
/// suffices; the place-search and open-data providers disagree on exact
/// naming, so this trades precision for recall. An empty target name or
/// address never satisfies its half. `None` is an expected outcome meaning
/// "no realtime data for this facility", not an error.
pub fn find_match<'a, R: FeedRecord>(target: MatchTarget<'_>, rows: &'a [R]) -> Option<&'a R> {
    rows.iter().find(|row| {
        let name_match = !target.name.is_empty()
            && (row.record_name().contains(target.name)
                || target.name.contains(row.record_name()));
        let addr_match = !target.address.is_empty()
            && (row.record_address().contains(target.address)
                || target.address.contains(row.record_address()));
        name_match || addr_match
    })
}
