use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Shuffled train/test split of `n` row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a seeded RNG and hold out `ceil(test_size * n)` rows.
/// At least one row always stays in the training partition.
pub fn train_test_split(n: usize, test_size: f64, seed: u64) -> Split {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n_test = ((test_size * n as f64).ceil() as usize).min(n.saturating_sub(1));
    let train = indices.split_off(n_test);
    Split { train, test: indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn eighty_twenty_with_ceiling() {
        let split = train_test_split(11, 0.2, 42);
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
        let all: HashSet<usize> = split.train.iter().chain(&split.test).copied().collect();
        assert_eq!(all.len(), 11);
    }

    #[test]
    fn seed_controls_the_permutation() {
        assert_eq!(train_test_split(50, 0.2, 42), train_test_split(50, 0.2, 42));
        assert_ne!(train_test_split(50, 0.2, 42), train_test_split(50, 0.2, 7));
    }

    #[test]
    fn tiny_inputs_keep_a_training_row() {
        let split = train_test_split(1, 0.2, 42);
        assert_eq!(split.train.len(), 1);
        assert!(split.test.is_empty());
        assert!(train_test_split(0, 0.2, 42).train.is_empty());
    }
}
