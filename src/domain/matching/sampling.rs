//! Random sample questions

use rand::Rng;

use crate::domain::qa::Entry;

/// Picks up to `count` distinct entries at random and returns their questions.
///
/// Never returns more items than `entries` holds and never repeats an index.
pub fn random_questions<R: Rng + ?Sized>(
    entries: &[Entry],
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let amount = count.min(entries.len());

    rand::seq::index::sample(rng, entries.len(), amount)
        .into_iter()
        .map(|idx| entries[idx].question().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::domain::qa::{EntryId, NewEntry};

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| {
                NewEntry::new(None, format!("Question {}", i), "A")
                    .unwrap()
                    .into_entry(EntryId::new(i.to_string()))
            })
            .collect()
    }

    #[test]
    fn test_samples_are_distinct() {
        let entries = entries(50);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let samples = random_questions(&entries, 10, &mut rng);
            let unique: HashSet<_> = samples.iter().collect();
            assert_eq!(samples.len(), 10);
            assert_eq!(unique.len(), 10);
        }
    }

    #[test]
    fn test_samples_capped_at_available_entries() {
        let entries = entries(3);
        let samples = random_questions(&entries, 10, &mut rand::thread_rng());

        assert_eq!(samples.len(), 3);
        let unique: HashSet<_> = samples.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_samples_from_empty_entries() {
        let samples = random_questions(&[], 5, &mut rand::thread_rng());
        assert!(samples.is_empty());
    }

    #[test]
    fn test_zero_count() {
        let samples = random_questions(&entries(5), 0, &mut rand::thread_rng());
        assert!(samples.is_empty());
    }
}
