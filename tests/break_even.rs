use dealership_marketing_toolbox::marketing::{
    compute_break_even, BreakEvenInput, DEFAULT_MARKETING_FEE,
};

#[test]
fn typical_dealership_numbers() {
    // $1,500 이익, $45 CPL, 22.5% 성약률, $15,000 수수료
    let res = compute_break_even(BreakEvenInput::with_default_fee(1_500.0, 45.0, 0.225));
    assert!(res.viable);
    assert!(
        (res.net_profit_per_sale - 1_300.0).abs() < 1e-9,
        "net={}",
        res.net_profit_per_sale
    );
    assert_eq!(res.cars_needed, Some(12));
    assert_eq!(res.test_drives_needed, Some(54));
    assert!((res.projected_ad_spend.expect("ad spend") - 2_430.0).abs() < 1e-9);
}

#[test]
fn default_fee_is_fifteen_thousand() {
    let input = BreakEvenInput::with_default_fee(1_500.0, 45.0, 0.225);
    assert_eq!(input.marketing_fee, DEFAULT_MARKETING_FEE);
    assert_eq!(DEFAULT_MARKETING_FEE, 15_000.0);
}

#[test]
fn negative_margin_keeps_net_for_display() {
    // CPL/성약률 = $450 > 대당 이익 $100
    let res = compute_break_even(BreakEvenInput::with_default_fee(100.0, 45.0, 0.1));
    assert!(!res.viable);
    assert!((res.net_profit_per_sale - (-350.0)).abs() < 1e-9);
    assert_eq!(res.cars_needed, None);
    assert_eq!(res.test_drives_needed, None);
    assert_eq!(res.projected_ad_spend, None);
}

#[test]
fn invalid_inputs_degrade_to_zero_result() {
    let cases = [
        (0.0, 45.0, 0.225),
        (-1.0, 45.0, 0.225),
        (1_500.0, 0.0, 0.225),
        (1_500.0, -45.0, 0.225),
        (1_500.0, 45.0, 0.0),
        (1_500.0, 45.0, 1.5),
        (f64::NAN, 45.0, 0.225),
        (1_500.0, 45.0, f64::NAN),
    ];
    for (profit, cpl, rate) in cases {
        let res = compute_break_even(BreakEvenInput::with_default_fee(profit, cpl, rate));
        assert!(!res.viable, "profit={profit} cpl={cpl} rate={rate}");
        assert_eq!(res.net_profit_per_sale, 0.0);
        assert_eq!(res.cars_needed, None);
    }
}

#[test]
fn close_rate_of_one_is_accepted() {
    let res = compute_break_even(BreakEvenInput::with_default_fee(1_500.0, 45.0, 1.0));
    assert!(res.viable);
    // 성약률 100%이면 시승 1건당 판매 1대
    assert!((res.net_profit_per_sale - 1_455.0).abs() < 1e-9);
    assert_eq!(res.cars_needed, res.test_drives_needed);
}

#[test]
fn cars_needed_matches_ceiling_and_drives_cover_cars() {
    let cases = [
        (1_500.0, 45.0, 0.225, 15_000.0),
        (2_000.0, 30.0, 0.3, 15_000.0),
        (900.0, 20.0, 0.5, 7_500.0),
        (1_250.0, 60.0, 0.4, 21_000.0),
    ];
    for (profit, cpl, rate, fee) in cases {
        let res = compute_break_even(BreakEvenInput {
            avg_profit_per_sale: profit,
            cost_per_test_drive: cpl,
            close_rate: rate,
            marketing_fee: fee,
        });
        assert!(res.viable, "profit={profit} cpl={cpl} rate={rate}");
        let net = profit - cpl / rate;
        let cars = res.cars_needed.expect("cars") as f64;
        assert_eq!(cars, (fee / net).ceil());
        // 성약률 <= 1 이므로 시승 건수가 판매 대수보다 적을 수 없다
        assert!(res.test_drives_needed.expect("drives") >= res.cars_needed.expect("cars"));
    }
}

#[test]
fn higher_close_rate_never_needs_more_cars() {
    let low = compute_break_even(BreakEvenInput::with_default_fee(1_500.0, 45.0, 0.2));
    let high = compute_break_even(BreakEvenInput::with_default_fee(1_500.0, 45.0, 0.3));
    assert!(low.viable && high.viable);
    assert!(high.cars_needed.expect("cars") <= low.cars_needed.expect("cars"));
    assert!(high.test_drives_needed.expect("drives") <= low.test_drives_needed.expect("drives"));
}

#[test]
fn repeated_calls_are_bit_identical() {
    let a = compute_break_even(BreakEvenInput::with_default_fee(1_500.0, 45.0, 0.225));
    let b = compute_break_even(BreakEvenInput::with_default_fee(1_500.0, 45.0, 0.225));
    assert_eq!(a.viable, b.viable);
    assert_eq!(
        a.net_profit_per_sale.to_bits(),
        b.net_profit_per_sale.to_bits()
    );
    assert_eq!(a.cars_needed, b.cars_needed);
    assert_eq!(a.test_drives_needed, b.test_drives_needed);
    assert_eq!(
        a.projected_ad_spend.map(f64::to_bits),
        b.projected_ad_spend.map(f64::to_bits)
    );
}
