use dealership_marketing_toolbox::marketing::scenario;

#[test]
fn break_even_benchmark_rows() {
    let rows = scenario::break_even_rows();
    assert_eq!(rows.len(), 3);
    // 최상: $30 CPL / 30% / $2,000 -> net $1,900 -> 8대
    // 낙관-중간: $30 / 22.5% / $1,500 -> net $1,366.67 -> 11대
    // 보수: $65 / 22.5% / $1,500 -> net $1,211.11 -> 13대
    let expected = [
        ("scenario.best_case", 8),
        ("scenario.optimistic_mid", 11),
        ("scenario.conservative", 13),
    ];
    for ((s, result), (key, cars)) in rows.iter().zip(expected) {
        assert_eq!(s.name_key, key);
        assert!(result.viable, "{key}");
        assert_eq!(result.cars_needed, Some(cars), "{key}");
    }
}

#[test]
fn ad_spend_budget_rows_use_baseline_metrics() {
    let rows = scenario::ad_spend_rows();
    assert_eq!(rows.len(), 4);
    let expected = [
        ("scenario.conservative", 10_000.0, 222, 49, 63_700.0),
        ("scenario.moderate", 15_000.0, 333, 74, 96_200.0),
        ("scenario.aggressive", 20_000.0, 444, 99, 128_700.0),
        ("scenario.maximum", 30_000.0, 666, 149, 193_700.0),
    ];
    for ((s, result), (key, budget, drives, cars, profit)) in rows.iter().zip(expected) {
        assert_eq!(s.name_key, key);
        assert_eq!(s.ad_spend, budget);
        assert!(result.viable, "{key}");
        assert_eq!(result.test_drives, drives, "{key}");
        assert_eq!(result.cars_sold, cars, "{key}");
        assert!(
            (result.total_profit - profit).abs() < 1e-6,
            "{key}: profit={}",
            result.total_profit
        );
        // 기준 지표에서는 $10k 예산도 수수료를 상회한다
        assert!(result.breaks_even, "{key}");
    }
}
