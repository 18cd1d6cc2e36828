/// Trait for the root of an aggregate stored in the shop database.
///
/// Records are keyed by a positive integer id assigned by the store.
pub trait AggregateRoot {
    /// Record id
    fn id(&self) -> i64;

    // ============================================================================
    // Aggregate class metadata
    // ============================================================================

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name inside the JSON document (e.g. "products")
    fn collection_name() -> &'static str;

    /// Singular name for the UI
    fn element_name() -> &'static str;

    /// Plural name for the UI
    fn list_name() -> &'static str;
}

/// Next free id for a collection: one past the largest existing id.
///
/// Ids below 1 are ignored, so an empty collection starts at 1.
pub fn next_id<T: AggregateRoot>(items: &[T]) -> i64 {
    items.iter().map(|item| item.id()).fold(0, i64::max) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(i64);

    impl AggregateRoot for Row {
        fn id(&self) -> i64 {
            self.0
        }
        fn aggregate_index() -> &'static str {
            "t000"
        }
        fn collection_name() -> &'static str {
            "rows"
        }
        fn element_name() -> &'static str {
            "Row"
        }
        fn list_name() -> &'static str {
            "Rows"
        }
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id::<Row>(&[]), 1);
        assert_eq!(next_id(&[Row(3), Row(7), Row(5)]), 8);
        assert_eq!(next_id(&[Row(-4)]), 1);
    }
}
