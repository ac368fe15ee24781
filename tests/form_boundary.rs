use dealership_marketing_toolbox::form::{DealershipForm, FormError};
use dealership_marketing_toolbox::marketing::{compute_break_even, compute_from_ad_spend};

fn standard_form() -> DealershipForm {
    DealershipForm {
        avg_profit_per_sale: 1_500.0,
        cost_per_test_drive: 45.0,
        close_rate_percent: 22.5,
        ad_spend_budget: 15_000.0,
    }
}

#[test]
fn percent_is_converted_to_decimal_at_the_boundary() {
    // UI는 0~100 %를 다루고 코어는 0~1 소수만 받는다
    let inputs = standard_form().validate().expect("valid form");
    assert!((inputs.close_rate - 0.225).abs() < 1e-12);
}

#[test]
fn validated_form_feeds_both_calculators() {
    let inputs = standard_form().validate().expect("valid form");
    let be = compute_break_even(inputs.break_even_input(15_000.0));
    assert_eq!(be.cars_needed, Some(12));
    let ads = compute_from_ad_spend(inputs.ad_spend_input(15_000.0));
    assert_eq!(ads.test_drives, 333);
    assert_eq!(ads.cars_sold, 74);
}

#[test]
fn fee_passes_through_unchanged() {
    let inputs = standard_form().validate().expect("valid form");
    assert_eq!(inputs.break_even_input(12_000.0).marketing_fee, 12_000.0);
    assert_eq!(inputs.ad_spend_input(0.0).marketing_fee, 0.0);
    assert_eq!(inputs.ad_spend_input(15_000.0).ad_spend, 15_000.0);
}

#[test]
fn boundary_values_are_accepted() {
    let mut form = standard_form();
    form.avg_profit_per_sale = 1.0;
    form.cost_per_test_drive = 1.0;
    form.close_rate_percent = 0.1;
    form.ad_spend_budget = 1_000.0;
    assert!(form.validate().is_ok());

    let mut form = standard_form();
    form.close_rate_percent = 100.0;
    let inputs = form.validate().expect("100% close rate is allowed");
    assert!((inputs.close_rate - 1.0).abs() < 1e-12);
}

#[test]
fn each_field_violation_is_reported() {
    let mut form = standard_form();
    form.avg_profit_per_sale = 0.5;
    assert_eq!(form.validate().unwrap_err(), vec![FormError::ProfitTooLow]);

    let mut form = standard_form();
    form.cost_per_test_drive = 0.0;
    assert_eq!(form.validate().unwrap_err(), vec![FormError::CostTooLow]);

    let mut form = standard_form();
    form.close_rate_percent = 0.05;
    assert_eq!(
        form.validate().unwrap_err(),
        vec![FormError::CloseRateOutOfRange]
    );

    let mut form = standard_form();
    form.close_rate_percent = 100.5;
    assert_eq!(
        form.validate().unwrap_err(),
        vec![FormError::CloseRateOutOfRange]
    );

    let mut form = standard_form();
    form.ad_spend_budget = 999.0;
    assert_eq!(form.validate().unwrap_err(), vec![FormError::AdSpendTooLow]);
}

#[test]
fn all_violations_are_collected_together() {
    let form = DealershipForm {
        avg_profit_per_sale: 0.0,
        cost_per_test_drive: 0.0,
        close_rate_percent: 150.0,
        ad_spend_budget: 0.0,
    };
    let errors = form.validate().unwrap_err();
    assert_eq!(
        errors,
        vec![
            FormError::ProfitTooLow,
            FormError::CostTooLow,
            FormError::CloseRateOutOfRange,
            FormError::AdSpendTooLow,
        ]
    );
}

#[test]
fn non_finite_inputs_are_rejected() {
    let mut form = standard_form();
    form.avg_profit_per_sale = f64::NAN;
    assert_eq!(form.validate().unwrap_err(), vec![FormError::ProfitTooLow]);

    let mut form = standard_form();
    form.ad_spend_budget = f64::INFINITY;
    assert_eq!(form.validate().unwrap_err(), vec![FormError::AdSpendTooLow]);
}
