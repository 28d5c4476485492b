use skeletal_timeline_core::{binary_search, linear_search};

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, n: u32) -> u32 {
        self.next_u32() % n
    }

    /// Quarter steps in [-2, 8] so exact and duplicate hits are common.
    fn time(&mut self) -> f32 {
        self.below(41) as f32 * 0.25 - 2.0
    }
}

fn sorted_times(rng: &mut Lcg, n: usize) -> Vec<f32> {
    let mut times: Vec<f32> = (0..n).map(|_| rng.time()).collect();
    times.sort_by(f32::total_cmp);
    times
}

#[test]
fn binary_matches_linear_for_unit_stride() {
    let mut rng = Lcg(0x5eed);
    for _ in 0..500 {
        let n = 1 + rng.below(40) as usize;
        let times = sorted_times(&mut rng, n);
        let mut queries: Vec<f32> = times.clone();
        queries.extend((0..20).map(|_| rng.time()));
        queries.extend([f32::NEG_INFINITY, f32::INFINITY, -100.0, 100.0]);
        for q in queries {
            assert_eq!(
                binary_search(&times, q, 1),
                linear_search(&times, q, 1),
                "times {times:?} query {q}"
            );
        }
    }
}

#[test]
fn binary_matches_linear_for_strided_entries() {
    let mut rng = Lcg(42);
    for _ in 0..300 {
        let step = 1 + rng.below(5) as usize;
        let n = 1 + rng.below(25) as usize;
        let times = sorted_times(&mut rng, n);
        let mut packed = Vec::with_capacity(n * step);
        for t in &times {
            packed.push(*t);
            for _ in 1..step {
                // Payload slots hold arbitrary values that must be ignored.
                packed.push(rng.time() * 100.0);
            }
        }
        for _ in 0..20 {
            let q = rng.time();
            let b = binary_search(&packed, q, step);
            assert_eq!(b, linear_search(&packed, q, step));
            assert_eq!(b % step, 0);
        }
    }
}

#[test]
fn result_is_first_strictly_greater() {
    let mut rng = Lcg(7);
    for _ in 0..200 {
        let n = 1 + rng.below(30) as usize;
        let times = sorted_times(&mut rng, n);
        let q = rng.time();
        let i = binary_search(&times, q, 1);
        assert!(times[..i].iter().all(|&t| t <= q));
        assert!(times[i..].iter().all(|&t| t > q));
    }
}
