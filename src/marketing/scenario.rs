use crate::marketing::{
    compute_break_even, compute_from_ad_spend, AdSpendInput, AdSpendResult, BreakEvenInput,
    BreakEvenResult,
};

/// 손익분기 벤치마크 시나리오. 수치는 UI 표시 단위(성약률은 %)로 둔다.
#[derive(Debug, Clone)]
pub struct BreakEvenScenario {
    /// i18n 키 (scenario.* 네임스페이스)
    pub name_key: &'static str,
    /// CPL [USD]
    pub cost_per_test_drive: f64,
    /// 성약률 [%]
    pub close_rate_percent: f64,
    /// 대당 이익 [USD]
    pub avg_profit_per_sale: f64,
}

/// 광고 예산 시나리오.
#[derive(Debug, Clone)]
pub struct AdSpendScenario {
    /// i18n 키 (scenario.* 네임스페이스)
    pub name_key: &'static str,
    /// 광고 예산 [USD]
    pub ad_spend: f64,
}

/// 예산 시나리오에 공통 적용하는 기준 지표: $45 CPL, 22.5%, 대당 $1,500.
pub const BASELINE_COST_PER_TEST_DRIVE: f64 = 45.0;
pub const BASELINE_CLOSE_RATE_PERCENT: f64 = 22.5;
pub const BASELINE_PROFIT_PER_SALE: f64 = 1_500.0;

const BREAK_EVEN_SCENARIOS: &[BreakEvenScenario] = &[
    BreakEvenScenario {
        name_key: "scenario.best_case",
        cost_per_test_drive: 30.0,
        close_rate_percent: 30.0,
        avg_profit_per_sale: 2_000.0,
    },
    BreakEvenScenario {
        name_key: "scenario.optimistic_mid",
        cost_per_test_drive: 30.0,
        close_rate_percent: 22.5,
        avg_profit_per_sale: 1_500.0,
    },
    BreakEvenScenario {
        name_key: "scenario.conservative",
        cost_per_test_drive: 65.0,
        close_rate_percent: 22.5,
        avg_profit_per_sale: 1_500.0,
    },
];

const AD_SPEND_SCENARIOS: &[AdSpendScenario] = &[
    AdSpendScenario {
        name_key: "scenario.conservative",
        ad_spend: 10_000.0,
    },
    AdSpendScenario {
        name_key: "scenario.moderate",
        ad_spend: 15_000.0,
    },
    AdSpendScenario {
        name_key: "scenario.aggressive",
        ad_spend: 20_000.0,
    },
    AdSpendScenario {
        name_key: "scenario.maximum",
        ad_spend: 30_000.0,
    },
];

/// 손익분기 벤치마크 표의 각 행을 기본 수수료 기준으로 계산한다.
pub fn break_even_rows() -> Vec<(&'static BreakEvenScenario, BreakEvenResult)> {
    BREAK_EVEN_SCENARIOS
        .iter()
        .map(|s| {
            let result = compute_break_even(BreakEvenInput::with_default_fee(
                s.avg_profit_per_sale,
                s.cost_per_test_drive,
                s.close_rate_percent / 100.0,
            ));
            (s, result)
        })
        .collect()
}

/// 광고 예산 시나리오 표의 각 행을 기준 지표로 계산한다.
pub fn ad_spend_rows() -> Vec<(&'static AdSpendScenario, AdSpendResult)> {
    AD_SPEND_SCENARIOS
        .iter()
        .map(|s| {
            let result = compute_from_ad_spend(AdSpendInput::with_default_fee(
                BASELINE_PROFIT_PER_SALE,
                BASELINE_COST_PER_TEST_DRIVE,
                BASELINE_CLOSE_RATE_PERCENT / 100.0,
                s.ad_spend,
            ));
            (s, result)
        })
        .collect()
}
