use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use std::cell::RefCell;
use std::sync::atomic::{AtomicU32, Ordering};

thread_local! {
    static WORKER_RNG: RefCell<SmallRng> = RefCell::new(SmallRng::seed_from_u64(0));
}

/// Ranges at or below this length run inline; waking the pool costs more
/// than the work.
const SERIAL_CUTOFF: u32 = 64;

/// Reseeds the calling worker's generator. `parallel_for` does this for
/// every pool worker with its worker index before any index is claimed.
pub fn seed_worker_rng(seed: u64) {
    WORKER_RNG.with(|rng| *rng.borrow_mut() = SmallRng::seed_from_u64(seed));
}

/// A value in `[0, 1)` from the per-worker generator.
pub fn random_float() -> f32 {
    WORKER_RNG.with(|rng| rng.borrow_mut().gen::<f32>())
}

/// Runs `action` for every index in `[begin, end)`.
///
/// Workers on the global rayon pool claim indices from a shared atomic
/// counter until the range is drained; the call returns once every index has
/// executed. `action` may only touch state owned by its index — the counter
/// is the sole synchronization.
pub fn parallel_for<F>(begin: u32, end: u32, action: F)
where
    F: Fn(u32) + Sync,
{
    if end <= begin {
        return;
    }

    if end - begin <= SERIAL_CUTOFF || rayon::current_num_threads() == 1 {
        for index in begin..end {
            action(index);
        }
        return;
    }

    let counter = AtomicU32::new(begin);
    rayon::broadcast(|context| {
        seed_worker_rng(context.index() as u64);
        loop {
            let index = counter.fetch_add(1, Ordering::Relaxed);
            if index >= end {
                break;
            }
            action(index);
        }
    });
}
