pub const QUESTIONS_PER_PAGE: usize = 10;

/// Items on 1-indexed `page`, i.e. `[(page - 1) * 10, page * 10)`.
/// Pages below 1 and pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: i64) -> Vec<T> {
    if page < 1 {
        return vec![];
    }

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE))
        .unwrap_or(usize::MAX);
    if start >= items.len() {
        return vec![];
    }

    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    items[start..end].to_vec()
}
