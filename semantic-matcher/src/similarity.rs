use std::cmp::Ordering;

/// Cosine of the angle between `a` and `b`; `0.0` when either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

/// Indices of `scores` ordered by descending score.
///
/// The sort is stable: equal scores keep their original index order.
/// Non-finite scores rank last.
pub fn rank_indices(scores: &[f32]) -> Vec<usize> {
    let key = |s: f32| if s.is_finite() { s } else { f32::NEG_INFINITY };
    let mut idx: Vec<usize> = (0..scores.len()).collect();
    idx.sort_by(|&a, &b| {
        key(scores[b])
            .partial_cmp(&key(scores[a]))
            .unwrap_or(Ordering::Equal)
    });
    idx
}
