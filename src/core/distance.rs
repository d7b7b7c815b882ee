use crate::models::Respondent;

/// Maximum value `attribute_distance` can return
pub const MAX_DISTANCE: u8 = 2;

/// Count of differing answers between two respondents on q1 and q2
///
/// # Returns
/// 0 (identical) to 2 (opposite on both)
#[inline]
pub fn attribute_distance(a: &Respondent, b: &Respondent) -> u8 {
    u8::from(a.q1 != b.q1) + u8::from(a.q2 != b.q2)
}

/// Pick the candidate closest to `anchor`; the first one wins on a tie
///
/// # Arguments
/// * `anchor` - Respondent being matched
/// * `candidates` - Index/respondent pairs, scanned in order
///
/// # Returns
/// Index of the chosen candidate, or `None` if there are no candidates
pub fn nearest<'a, I>(anchor: &Respondent, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, &'a Respondent)>,
{
    let mut best: Option<(usize, u8)> = None;
    for (idx, candidate) in candidates {
        let d = attribute_distance(anchor, candidate);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((idx, d));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Pick the candidate farthest from `anchor`; the first one wins on a tie
pub fn farthest<'a, I>(anchor: &Respondent, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, &'a Respondent)>,
{
    let mut best: Option<(usize, u8)> = None;
    for (idx, candidate) in candidates {
        let d = attribute_distance(anchor, candidate);
        if best.map_or(true, |(_, best_d)| d > best_d) {
            best = Some((idx, d));
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respondent(id: &str, q1: bool, q2: bool) -> Respondent {
        Respondent {
            id: id.to_string(),
            name: format!("R{}", id),
            q1,
            q2,
            q3: false,
            q4: false,
            q5: String::new(),
            q5_short: None,
        }
    }

    #[test]
    fn test_attribute_distance() {
        let a = respondent("a", true, true);
        assert_eq!(attribute_distance(&a, &respondent("b", true, true)), 0);
        assert_eq!(attribute_distance(&a, &respondent("c", false, true)), 1);
        assert_eq!(attribute_distance(&a, &respondent("d", true, false)), 1);
        assert_eq!(attribute_distance(&a, &respondent("e", false, false)), MAX_DISTANCE);
    }

    #[test]
    fn test_nearest_first_wins_on_tie() {
        let a = respondent("a", true, true);
        let pool = vec![
            respondent("b", false, false),
            respondent("c", false, true),
            respondent("d", true, false),
        ];

        // c and d are both at distance 1
        let picked = nearest(&a, pool.iter().enumerate());
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn test_farthest_first_wins_on_tie() {
        let a = respondent("a", true, true);
        let pool = vec![
            respondent("b", true, true),
            respondent("c", false, false),
            respondent("d", false, false),
        ];

        let picked = farthest(&a, pool.iter().enumerate());
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn test_no_candidates() {
        let a = respondent("a", true, true);
        let pool: Vec<Respondent> = vec![];
        assert_eq!(nearest(&a, pool.iter().enumerate()), None);
        assert_eq!(farthest(&a, pool.iter().enumerate()), None);
    }
}
