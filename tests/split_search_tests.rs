//! Exhaustive vs. ternary split search

use convsplit_core::{PerfProfile, ProblemSpec, SearchStrategy, SplitConfig};
use convsplit_model::estimate_exec_time;
use convsplit_planner::exhaustive::best_split_exhaustive;
use convsplit_planner::ternary::best_split_fast;
use convsplit_planner::{
    best_split_fast_with_threshold, cost_curve, is_unimodal, recommend, verify,
};

fn spec(m: u64, n: u64, k: u64) -> ProblemSpec {
    ProblemSpec::new(m, n, k).expect("valid shape")
}

fn perf(cpu: u64, gpu: u64, bw: u64) -> PerfProfile {
    PerfProfile::new(cpu, gpu, bw).expect("valid profile")
}

#[test]
fn test_exhaustive_matrix_smaller_than_kernel() {
    assert_eq!(best_split_exhaustive(&spec(2, 10, 3), &perf(100, 200, 50)), 0);
}

#[test]
fn test_exhaustive_matrix_equal_to_kernel() {
    let result = best_split_exhaustive(&spec(3, 10, 3), &perf(100, 200, 50));
    assert!(result <= 3);
}

#[test]
fn test_gpu_much_faster_than_cpu() {
    let m = 20;
    let result = best_split_exhaustive(&spec(m, 20, 3), &perf(100, 10_000, 10_000));
    assert!(result >= m / 2, "only {result} rows offloaded");
}

#[test]
fn test_cpu_much_faster_than_gpu() {
    let m = 20;
    let result = best_split_exhaustive(&spec(m, 20, 3), &perf(10_000, 100, 100));
    assert!(result <= m / 2, "{result} rows offloaded");
}

#[test]
fn test_very_low_bandwidth_keeps_work_on_cpu() {
    let m = 20;
    let result = best_split_exhaustive(&spec(m, 20, 3), &perf(100, 1_000, 1));
    assert!(result <= m / 4, "{result} rows offloaded");
}

#[test]
fn test_exhaustive_breaks_ties_toward_fewer_rows() {
    // Nothing to compute when N < K; the smallest transfer wins and
    // rows 0..K-1 all tie on it.
    assert_eq!(best_split_exhaustive(&spec(10, 2, 3), &perf(100, 200, 50)), 0);

    let s = spec(30, 30, 3);
    let p = perf(100, 400, 200);
    let best = best_split_exhaustive(&s, &p);
    let best_time = estimate_exec_time(&s, &p, best as i64);
    for rows in 0..best {
        assert!(estimate_exec_time(&s, &p, rows as i64) > best_time);
    }
}

#[test]
fn test_fast_matrix_smaller_than_kernel() {
    assert_eq!(best_split_fast(&spec(2, 10, 3), &perf(100, 200, 50)), 0);
    assert_eq!(best_split_fast(&spec(150, 10, 151), &perf(100, 200, 50)), 0);
}

#[test]
fn test_fast_matches_full_search_for_small_matrices() {
    let cases = [
        (10, 10, 3, 100, 200, 50),
        (20, 20, 3, 100, 10_000, 10_000),
        (20, 20, 3, 10_000, 100, 100),
        (20, 20, 3, 100, 1_000, 1),
        (99, 64, 5, 300, 9_000, 700),
        (50, 7, 7, 40, 40, 40),
        (3, 10, 3, 100, 200, 50),
    ];
    for (m, n, k, cpu, gpu, bw) in cases {
        let (s, p) = (spec(m, n, k), perf(cpu, gpu, bw));
        assert_eq!(
            best_split_fast(&s, &p),
            best_split_exhaustive(&s, &p),
            "mismatch for {s} with ({cpu}, {gpu}, {bw})"
        );
    }
}

#[test]
fn test_fast_matches_full_search_for_large_unimodal_curves() {
    let cases = [
        (1_000, 1_000, 5, 500, 2_000, 100),
        (500, 64, 3, 1_000, 4_000, 800),
        (2_000, 512, 7, 1_000_000, 10_000_000, 1_000_000),
        (300, 300, 3, 100, 100, 100_000),
        (150, 80, 5, 50, 5_000, 2_000),
        (1_200, 1_200, 3, 400, 8_000, 4_000),
        (150, 200, 110, 1_000, 1_000_000_000, 1_000_000_000),
    ];
    for (m, n, k, cpu, gpu, bw) in cases {
        let (s, p) = (spec(m, n, k), perf(cpu, gpu, bw));
        let times: Vec<u64> = cost_curve(&s, &p, 1).iter().map(|c| c.time).collect();
        assert!(is_unimodal(&times), "curve for {s} is not unimodal");
        assert_eq!(
            best_split_fast(&s, &p),
            best_split_exhaustive(&s, &p),
            "mismatch for {s} with ({cpu}, {gpu}, {bw})"
        );
    }
}

#[test]
fn test_fast_matches_full_search_when_kernel_covers_most_rows() {
    // K > 2M/3: rows 0..K-1 all cost the same and span both first probes.
    let cases = [
        (100, 100, 70, 1_000, 1_000_000_000, 1_000_000_000, 100),
        (120, 300, 100, 500, 100_000_000, 100_000_000, 120),
        (150, 256, 110, 10_000, 10_000, 1_000, 129),
        (200, 200, 150, 1_000, 1_000_000_000, 1_000_000_000, 200),
        (240, 1_024, 180, 10_000, 10_000, 1_000, 209),
        (300, 64, 250, 100, 1_000_000, 10_000_000, 0),
        (500, 500, 400, 10_000, 10_000_000_000, 10_000_000_000, 500),
        (600, 600, 401, 1_000, 10_000_000, 1_000_000, 600),
        (800, 1_024, 565, 100, 10_000, 1_000, 798),
    ];
    for (m, n, k, cpu, gpu, bw, expected) in cases {
        assert!(3 * k > 2 * m && m >= 100);
        let (s, p) = (spec(m, n, k), perf(cpu, gpu, bw));
        let times: Vec<u64> = cost_curve(&s, &p, 1).iter().map(|c| c.time).collect();
        assert!(is_unimodal(&times), "curve for {s} is not unimodal");
        assert_eq!(best_split_exhaustive(&s, &p), expected, "full scan for {s}");
        assert_eq!(best_split_fast(&s, &p), expected, "ternary for {s}");
    }
}

#[test]
fn test_optimized_algorithm_for_large_matrix() {
    let (m, s, p) = (1_000, spec(1_000, 1_000, 5), perf(500, 2_000, 100));
    let result = best_split_fast(&s, &p);
    assert!(result <= m);

    let time_at_result = estimate_exec_time(&s, &p, result as i64);
    for point in verify::neighbor_candidates(&s, result) {
        let time_at_point = estimate_exec_time(&s, &p, point as i64);
        assert!(
            time_at_point >= time_at_result,
            "better time at {point} rows than at {result}"
        );
    }
    verify::assert_local_optimum(&s, &p, result);
}

#[test]
fn test_results_always_in_range() {
    for (m, n, k) in [(0, 5, 1), (1, 1, 1), (5, 5, 5), (37, 12, 3), (101, 101, 9), (640, 48, 3)] {
        for (cpu, gpu, bw) in [(1, 1, 1), (100, 10_000, 10_000), (10_000, 100, 100), (7, 3_000, 2)] {
            let (s, p) = (spec(m, n, k), perf(cpu, gpu, bw));
            verify::assert_in_range(&s, best_split_exhaustive(&s, &p));
            verify::assert_in_range(&s, best_split_fast(&s, &p));
            verify::assert_in_range(&s, best_split_fast_with_threshold(&s, &p, 0));
        }
    }
}

#[test]
fn test_threshold_controls_delegation() {
    let s = spec(150, 80, 5);
    let p = perf(50, 5_000, 2_000);
    // Above the threshold both paths agree on this unimodal curve.
    assert_eq!(
        best_split_fast_with_threshold(&s, &p, 1_000),
        best_split_fast_with_threshold(&s, &p, 0)
    );

    let exhaustive = recommend(
        &s,
        &p,
        &SplitConfig {
            fast_search_threshold: 1_000,
            ..SplitConfig::default()
        },
    );
    let ternary = recommend(&s, &p, &SplitConfig::default());
    assert_eq!(exhaustive.strategy, SearchStrategy::Exhaustive);
    assert_eq!(ternary.strategy, SearchStrategy::Ternary);
    assert_eq!(exhaustive.evaluations, 151);
    assert!(ternary.evaluations < exhaustive.evaluations);
    assert_eq!(exhaustive.rows, ternary.rows);
}

#[test]
fn test_calls_from_many_threads_agree() {
    let s = spec(1_000, 1_000, 5);
    let p = perf(500, 2_000, 100);
    let expected = best_split_fast(&s, &p);

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || best_split_fast(&s, &p)))
        .collect();
    for h in handles {
        assert_eq!(h.join().expect("worker panicked"), expected);
    }
}
