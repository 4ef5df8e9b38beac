/// An element that can be moved between the two sides of a [`DualList`](super::DualList)
pub trait TransferItem {
    /// Unique identifier within one universe
    fn id(&self) -> &str;

    /// Display label, also the sort key of both sides
    fn name(&self) -> &str;
}

/// Sorts items by display name, ties broken by id
pub fn sort_by_name<T: TransferItem>(items: &mut [T]) {
    items.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
}

/// Case-insensitive substring match on name or id. A blank query matches everything.
pub fn matches_query<T: TransferItem>(item: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    item.name().to_lowercase().contains(&query) || item.id().to_lowercase().contains(&query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Door;

    #[test]
    fn sorts_by_name_then_id() {
        let mut doors = vec![
            Door::new("d3", "Server Room"),
            Door::new("d2", "Lobby"),
            Door::new("d1", "Lobby"),
        ];
        sort_by_name(&mut doors);
        let ids: Vec<&str> = doors.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["d1", "d2", "d3"]);
    }

    #[test]
    fn query_matches_name_or_id_ignoring_case() {
        let door = Door::new("d-server", "Server Room");
        assert!(matches_query(&door, "server"));
        assert!(matches_query(&door, "ROOM"));
        assert!(matches_query(&door, "d-ser"));
        assert!(matches_query(&door, "   "));
        assert!(!matches_query(&door, "lobby"));
    }
}
