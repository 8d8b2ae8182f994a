/// Offsets that center a `container`-sized window inside the source frame.
///
/// `offset = max(0, round((source - container) / 2))` per axis. Unknown or
/// zero source dimensions give `(0, 0)`, as does a container larger than the
/// source along an axis.
pub fn compute_offsets(
    source_width: Option<u32>,
    source_height: Option<u32>,
    container_width: u32,
    container_height: u32,
) -> (u32, u32) {
    match (source_width, source_height) {
        (Some(sw), Some(sh)) if sw > 0 && sh > 0 => (
            centered_offset(sw, container_width),
            centered_offset(sh, container_height),
        ),
        _ => (0, 0),
    }
}

fn centered_offset(source: u32, container: u32) -> u32 {
    let diff = source as i64 - container as i64;
    if diff <= 0 {
        return 0;
    }
    (diff as f64 / 2.0).round() as u32
}

/// Container size for a measured container width and the solved ratio.
///
/// Height is `round(width / aspect_ratio)`; a non-positive ratio leaves the
/// height at zero.
pub fn container_for_width(width: u32, aspect_ratio: f64) -> (u32, u32) {
    if aspect_ratio <= 0.0 || !aspect_ratio.is_finite() {
        return (width, 0);
    }
    (width, (width as f64 / aspect_ratio).round() as u32)
}
