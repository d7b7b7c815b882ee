use crate::models::{Block, Respondent};
use crate::core::{
    distance::{farthest, nearest},
    ordering::order_left_right,
};

/// Partition respondents into seating blocks
///
/// # Pipeline Stages
/// 1. Split off respondents with `q3 == false` (prefer someone like themselves)
/// 2. Similarity pass: pair each of them with the closest remaining one
/// 3. Difference pass: pair everyone left with the farthest remaining one
/// 4. Attach a single leftover to the first block produced, making it a triad
///
/// Ties are broken by input order, so the result is deterministic for a
/// fixed input order. A single respondent yields no blocks.
pub fn match_respondents(respondents: &[Respondent]) -> Vec<Block<'_>> {
    let mut used = vec![false; respondents.len()];
    let mut groups: Vec<Vec<&Respondent>> = Vec::with_capacity(respondents.len() / 2);

    let (cautious, mut remaining): (Vec<usize>, Vec<usize>) =
        (0..respondents.len()).partition(|&i| !respondents[i].q3);

    // Stage 2: similarity pass
    for &a in &cautious {
        if used[a] {
            continue;
        }

        let partner = nearest(
            &respondents[a],
            cautious
                .iter()
                .copied()
                .filter(|&j| j != a && !used[j])
                .map(|j| (j, &respondents[j])),
        );

        match partner {
            Some(b) => {
                used[a] = true;
                used[b] = true;
                groups.push(order_left_right(&respondents[a], &respondents[b]).to_vec());
            }
            None => remaining.push(a),
        }
    }

    // Stage 3: difference pass
    while remaining.len() >= 2 {
        let a = remaining.remove(0);
        let Some(pos) = farthest(
            &respondents[a],
            remaining.iter().enumerate().map(|(pos, &j)| (pos, &respondents[j])),
        ) else {
            break;
        };
        let b = remaining.remove(pos);
        groups.push(order_left_right(&respondents[a], &respondents[b]).to_vec());
    }

    // Stage 4: odd remainder joins the first block
    if let &[leftover] = remaining.as_slice() {
        if let Some(first) = groups.first_mut() {
            first.push(&respondents[leftover]);
        }
    }

    groups.into_iter().map(Block::from_members).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distance::attribute_distance;
    use crate::models::BlockType;

    fn create_respondent(id: &str, q1: bool, q2: bool, q3: bool, q4: bool) -> Respondent {
        Respondent {
            id: id.to_string(),
            name: format!("Guest {}", id),
            q1,
            q2,
            q3,
            q4,
            q5: format!("Answer from {}", id),
            q5_short: None,
        }
    }

    fn ids(block: &Block<'_>) -> Vec<String> {
        block.ids().map(str::to_string).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(match_respondents(&[]).is_empty());
    }

    #[test]
    fn test_single_respondent_yields_no_blocks() {
        let single = vec![create_respondent("1", true, true, false, false)];
        assert!(match_respondents(&single).is_empty());

        let single = vec![create_respondent("1", true, true, true, false)];
        assert!(match_respondents(&single).is_empty());
    }

    #[test]
    fn test_similarity_pass_pairs_alike() {
        let respondents = vec![
            create_respondent("1", true, true, false, false),
            create_respondent("2", false, false, false, false),
            create_respondent("3", true, true, false, false),
            create_respondent("4", false, false, false, false),
        ];

        let blocks = match_respondents(&respondents);

        assert_eq!(blocks.len(), 2);
        assert_eq!(ids(&blocks[0]), vec!["1", "3"]);
        assert_eq!(ids(&blocks[1]), vec!["2", "4"]);
        assert!(blocks.iter().all(|b| b.block_type == BlockType::Pair));
    }

    #[test]
    fn test_difference_pass_pairs_opposites() {
        let respondents = vec![
            create_respondent("1", true, true, true, false),
            create_respondent("2", true, true, true, false),
            create_respondent("3", false, false, true, false),
            create_respondent("4", false, false, true, false),
        ];

        let blocks = match_respondents(&respondents);

        assert_eq!(blocks.len(), 2);
        assert_eq!(ids(&blocks[0]), vec!["1", "3"]);
        assert_eq!(ids(&blocks[1]), vec!["2", "4"]);
    }

    #[test]
    fn test_pairs_are_ordered_talker_left() {
        let respondents = vec![
            create_respondent("listener", true, true, false, true),
            create_respondent("talker", true, true, false, false),
        ];

        let blocks = match_respondents(&respondents);

        assert_eq!(ids(&blocks[0]), vec!["talker", "listener"]);
    }

    #[test]
    fn test_cautious_leftover_joins_first_block() {
        let respondents = vec![
            create_respondent("1", true, true, false, false),
            create_respondent("2", true, true, false, false),
            create_respondent("3", false, true, false, false),
            create_respondent("4", true, true, true, false),
            create_respondent("5", false, false, true, false),
        ];

        let blocks = match_respondents(&respondents);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_type, BlockType::Triad);
        assert_eq!(ids(&blocks[0]), vec!["1", "2", "3"]);
        assert_eq!(blocks[1].block_type, BlockType::Pair);
        assert_eq!(ids(&blocks[1]), vec!["4", "5"]);
    }

    #[test]
    fn test_cautious_leftover_enters_difference_pass_last() {
        // "3" has no cautious partner; it is queued behind the q3=true
        // respondents, so "4" takes it as the farthest match
        let respondents = vec![
            create_respondent("1", true, true, false, false),
            create_respondent("2", true, true, false, false),
            create_respondent("3", false, false, false, false),
            create_respondent("4", true, true, true, false),
            create_respondent("5", true, false, true, false),
            create_respondent("6", true, false, true, false),
        ];

        let blocks = match_respondents(&respondents);

        assert_eq!(blocks.len(), 3);
        assert_eq!(ids(&blocks[0]), vec!["1", "2"]);
        assert_eq!(ids(&blocks[1]), vec!["4", "3"]);
        assert_eq!(ids(&blocks[2]), vec!["5", "6"]);
    }

    #[test]
    fn test_three_adventurous_make_a_triad() {
        let respondents = vec![
            create_respondent("1", true, true, true, true),
            create_respondent("2", false, false, true, false),
            create_respondent("3", true, false, true, false),
        ];

        let blocks = match_respondents(&respondents);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_type, BlockType::Triad);
        // 1 pairs with its opposite 2, talker first; 3 is appended last
        assert_eq!(ids(&blocks[0]), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_similarity_blocks_minimize_distance() {
        let respondents: Vec<Respondent> = (0..12)
            .map(|i| {
                create_respondent(
                    &i.to_string(),
                    i % 2 == 0,
                    i % 3 == 0,
                    false,
                    i % 5 == 0,
                )
            })
            .collect();

        let blocks = match_respondents(&respondents);
        let mut taken: Vec<&str> = Vec::new();

        for block in &blocks {
            let [a, b] = [block.members[0], block.members[1]];
            // the anchor is whichever of the two came first in the input
            let (anchor, partner) = if respondents.iter().position(|r| r.id == a.id)
                < respondents.iter().position(|r| r.id == b.id)
            {
                (a, b)
            } else {
                (b, a)
            };
            taken.push(&anchor.id);
            let best = respondents
                .iter()
                .filter(|r| r.id != anchor.id && !taken.contains(&r.id.as_str()))
                .map(|r| attribute_distance(anchor, r))
                .min()
                .unwrap();
            assert_eq!(attribute_distance(anchor, partner), best);
            taken.push(&partner.id);
        }
    }

    #[test]
    fn test_deterministic() {
        let respondents: Vec<Respondent> = (0..9)
            .map(|i| create_respondent(&i.to_string(), i % 2 == 0, i % 4 < 2, i % 3 == 0, i % 2 == 1))
            .collect();

        assert_eq!(match_respondents(&respondents), match_respondents(&respondents));
    }
}
