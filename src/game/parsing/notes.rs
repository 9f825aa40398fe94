/// Character marking an idle rail in a chart row.
pub const IDLE_RAIL: char = '0';

/// Returns the first active rail of `row`, scanning rails `0..rail_count` in order.
///
/// Rows shorter than `rail_count` are malformed and yield `None`. Only one rail
/// is ever reported per row; later active rails on the same row are ignored.
pub fn first_active_rail(row: &str, rail_count: usize) -> Option<usize> {
    if row.chars().count() < rail_count {
        return None;
    }
    row.chars().take(rail_count).position(|ch| ch != IDLE_RAIL)
}
