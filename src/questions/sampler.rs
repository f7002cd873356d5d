//! Category-balanced random question sampling
//!
//! Two building blocks:
//! - `sample_uniform` draws a uniform random subset of up to `n` questions
//! - `balanced_sample` pools a random contiguous run from each requested
//!   category before the final uniform draw, so every requested category
//!   gets a comparable share of the candidate pool

use crate::store::Question;
use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform random sample of at most `n` questions.
///
/// Pools smaller than `n` come back whole (shuffled), never an error.
pub fn sample_uniform<R: Rng + ?Sized>(
    rng: &mut R,
    mut pool: Vec<Question>,
    n: usize,
) -> Vec<Question> {
    pool.shuffle(rng);
    pool.truncate(n);
    pool
}

/// Category-balanced sample: a random contiguous run of roughly
/// `n / categories` questions from each category list, concatenated into a
/// pool, then a final uniform draw of `n` from that pool.
pub fn balanced_sample<R: Rng + ?Sized>(
    rng: &mut R,
    per_category: Vec<Vec<Question>>,
    n: usize,
) -> Vec<Question> {
    let categories = per_category.len().max(1);
    let run_len = n.div_ceil(categories);

    let mut pool = Vec::new();
    for list in per_category {
        pool.extend(random_run(rng, list, run_len));
    }

    sample_uniform(rng, pool, n)
}

/// A random contiguous run of at most `len` questions, with the start
/// offset bounded so the run never passes the end of the list.
fn random_run<R: Rng + ?Sized>(rng: &mut R, mut list: Vec<Question>, len: usize) -> Vec<Question> {
    if list.is_empty() {
        return list;
    }

    let run = len.min(list.len());
    let start = rng.gen_range(0..=list.len() - run);

    list.drain(..start);
    list.truncate(run);
    list
}
