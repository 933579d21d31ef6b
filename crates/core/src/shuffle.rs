use rand::Rng;
use rand::seq::SliceRandom;

/// Options in display order, with the position of the correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffledOptions<T> {
    items: Vec<T>,
    correct_index: usize,
}

impl<T> ShuffledOptions<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct(&self) -> &T {
        &self.items[self.correct_index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Uniformly permute `options` and report where the correct one landed.
///
/// The permutation is applied to source positions, so the correct option is
/// tracked by identity and duplicate values cannot confuse the result.
///
/// # Panics
///
/// Panics if `correct_index` is not a valid index into `options`.
pub fn shuffle_with_correct_index<T, R>(
    options: &[T],
    correct_index: usize,
    rng: &mut R,
) -> ShuffledOptions<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    assert!(
        correct_index < options.len(),
        "correct index {correct_index} out of range for {} options",
        options.len()
    );

    let mut order: Vec<usize> = (0..options.len()).collect();
    order.as_mut_slice().shuffle(rng);

    let mut new_correct = 0;
    let items = order
        .iter()
        .enumerate()
        .map(|(display, &source)| {
            if source == correct_index {
                new_correct = display;
            }
            options[source].clone()
        })
        .collect();

    ShuffledOptions {
        items,
        correct_index: new_correct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted(mut v: Vec<String>) -> Vec<String> {
        v.sort();
        v
    }

    #[test]
    fn result_is_permutation_with_tracked_answer() {
        let options: Vec<String> = ["Normal", "Innocent murmur", "Mitral stenosis", "Aortic stenosis"]
            .iter()
            .map(ToString::to_string)
            .collect();

        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            for correct in 0..options.len() {
                let shuffled = shuffle_with_correct_index(&options, correct, &mut rng);
                assert_eq!(sorted(shuffled.items().to_vec()), sorted(options.clone()));
                assert_eq!(shuffled.correct(), &options[correct]);
            }
        }
    }

    #[test]
    fn duplicates_track_identity_not_value() {
        // Tag each copy so the test can see which source position moved where.
        let options = vec![("VSD", 0), ("VSD", 1), ("PDA", 2)];
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let shuffled = shuffle_with_correct_index(&options, 1, &mut rng);
            assert_eq!(shuffled.correct(), &("VSD", 1));
        }
    }

    #[test]
    fn every_position_is_reachable() {
        let options = vec!['a', 'b', 'c', 'd'];
        let mut seen = [false; 4];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let shuffled = shuffle_with_correct_index(&options, 0, &mut rng);
            seen[shuffled.correct_index()] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn same_seed_same_order() {
        let options = vec![1, 2, 3, 4, 5];
        let a = shuffle_with_correct_index(&options, 2, &mut StdRng::seed_from_u64(11));
        let b = shuffle_with_correct_index(&options, 2, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn invalid_correct_index_panics() {
        let mut rng = StdRng::seed_from_u64(0);
        let _ = shuffle_with_correct_index(&["a", "b"], 2, &mut rng);
    }
}
