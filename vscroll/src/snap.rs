/// Computes the page offset to settle on after a paging gesture.
///
/// The current page is `floor(current_y / interval)`. The page advances by one when the
/// linearly predicted position `current_y + velocity_y` passes the middle of the current page.
/// A non-positive interval (e.g. a viewport that has not been laid out yet) leaves the offset
/// unchanged.
pub fn compute_snap_target(current_y: i32, velocity_y: i32, interval: i32) -> i32 {
    if interval <= 0 {
        return current_y;
    }
    let mut page = current_y.div_euclid(interval);
    let predicted = current_y.saturating_add(velocity_y);
    let page_start = page.saturating_mul(interval);
    if predicted > page_start.saturating_add(interval / 2) {
        page += 1;
    }
    page.saturating_mul(interval)
}

/// Resolves the page size: an explicit interval wins, otherwise one page per viewport height.
pub fn resolve_snap_interval(snap_interval: u32, viewport_height: i32) -> i32 {
    if snap_interval != 0 {
        i32::try_from(snap_interval).unwrap_or(i32::MAX)
    } else {
        viewport_height
    }
}
