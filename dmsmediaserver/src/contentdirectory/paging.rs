use dmslibrary::QueryResult;

/// Découpe en mémoire d'une liste déjà complète
pub struct ResultPaginator;

impl ResultPaginator {
    /// Le total est calculé avant découpage. `limit = None` : jusqu'à la fin.
    pub fn apply<T>(items: Vec<T>, start_index: usize, limit: Option<usize>) -> QueryResult<T> {
        let total = items.len();
        let page = items
            .into_iter()
            .skip(start_index)
            .take(limit.unwrap_or(usize::MAX))
            .collect();
        QueryResult::new(page, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        let items: Vec<u32> = (0..10).collect();

        let page = ResultPaginator::apply(items.clone(), 2, Some(3));
        assert_eq!(page.items, vec![2, 3, 4]);
        assert_eq!(page.total_record_count, 10);

        let tail = ResultPaginator::apply(items.clone(), 8, None);
        assert_eq!(tail.items, vec![8, 9]);

        let count_only = ResultPaginator::apply(items.clone(), 0, Some(0));
        assert!(count_only.items.is_empty());
        assert_eq!(count_only.total_record_count, 10);

        let past_end = ResultPaginator::apply(items, 42, Some(5));
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_record_count, 10);
    }
}
