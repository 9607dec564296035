//! Scaled render dimensions.

/// Scale both edges and floor the result.
///
/// Flooring (never rounding) keeps repeated scaling deterministic and
/// monotonically non-increasing.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (scale_edge(width, scale), scale_edge(height, scale))
}

fn scale_edge(edge: u32, scale: f64) -> u32 {
    (edge as f64 * scale).floor() as u32
}
