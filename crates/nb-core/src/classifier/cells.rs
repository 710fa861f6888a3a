//! Per-word sparse class lists.
//!
//! Each word owns a `Vec<Cell>` sorted strictly ascending by class with no
//! zero counts. Scoring merges these lists against the dense class range, so
//! the ordering is load-bearing.

/// Occurrence count of one word within one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub class: usize,
    pub count: u64,
}

/// Increment the cell for `class`, inserting `(class, 1)` in order if absent.
pub(crate) fn incr(cells: &mut Vec<Cell>, class: usize) {
    match cells.binary_search_by_key(&class, |cell| cell.class) {
        Ok(i) => cells[i].count += 1,
        Err(i) => cells.insert(i, Cell { class, count: 1 }),
    }
}

/// Inverse of [`incr`]. A cell that drops to zero is removed.
///
/// Returns false when there was no cell for `class`.
pub(crate) fn decr(cells: &mut Vec<Cell>, class: usize) -> bool {
    match cells.binary_search_by_key(&class, |cell| cell.class) {
        Ok(i) if cells[i].count > 1 => {
            cells[i].count -= 1;
            true
        }
        Ok(i) => {
            cells.remove(i);
            true
        }
        Err(_) => false,
    }
}

/// Count for `class`, or 0 when the word was never seen in it.
pub(crate) fn count(cells: &[Cell], class: usize) -> u64 {
    cells
        .binary_search_by_key(&class, |cell| cell.class)
        .map(|i| cells[i].count)
        .unwrap_or(0)
}

/// Describe the first ordering or zero-count violation, if any.
pub(crate) fn violation(cells: &[Cell]) -> Option<String> {
    if cells.is_empty() {
        return Some("empty cell list".to_string());
    }
    if let Some(cell) = cells.iter().find(|cell| cell.count == 0) {
        return Some(format!("zero count for class {}", cell.class));
    }
    cells.windows(2).find_map(|pair| {
        (pair[0].class >= pair[1].class).then(|| {
            format!(
                "class {} not strictly before class {}",
                pair[0].class, pair[1].class
            )
        })
    })
}
