/// Default page size when the client does not pass `pageSize`.
pub const DEFAULT_PAGE_SIZE: i32 = 20;

/// Cursor pagination over an in-memory list.
///
/// Returns the `page_size` items following the item whose cursor equals
/// `after`. An absent or unknown `after` starts from the beginning; `after`
/// pointing at the last item yields an empty page.
pub fn paginate<T, F>(results: &[T], after: Option<&str>, page_size: i32, cursor_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<&str>,
{
    if page_size < 1 {
        return Vec::new();
    }
    let page_size = page_size as usize;

    let after = match after {
        Some(cursor) if !cursor.is_empty() => cursor,
        _ => return first_page(results, page_size),
    };

    let position = results
        .iter()
        .position(|item| cursor_of(item).is_some_and(|c| !c.is_empty() && c == after));

    match position {
        Some(index) if index + 1 == results.len() => Vec::new(),
        Some(index) => {
            let end = results.len().min(index + 1 + page_size);
            results[index + 1..end].to_vec()
        }
        None => first_page(results, page_size),
    }
}

fn first_page<T: Clone>(results: &[T], page_size: usize) -> Vec<T> {
    results[..results.len().min(page_size)].to_vec()
}
