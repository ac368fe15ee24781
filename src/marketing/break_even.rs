use crate::marketing::{inputs_valid, net_profit_per_sale};

/// 4개월 마케팅 프로그램 고정 수수료 기본값 [USD].
pub const DEFAULT_MARKETING_FEE: f64 = 15_000.0;

/// 손익분기 계산 입력.
#[derive(Debug, Clone)]
pub struct BreakEvenInput {
    /// 대당 평균 이익 [USD]
    pub avg_profit_per_sale: f64,
    /// 예약 시승 1건당 비용(CPL) [USD]
    pub cost_per_test_drive: f64,
    /// 성약률 (0~1 소수)
    pub close_rate: f64,
    /// 회수해야 하는 고정 프로그램 수수료 [USD]
    pub marketing_fee: f64,
}

impl BreakEvenInput {
    /// 기본 수수료(15,000 USD)를 적용한 입력을 생성한다.
    pub fn with_default_fee(
        avg_profit_per_sale: f64,
        cost_per_test_drive: f64,
        close_rate: f64,
    ) -> Self {
        Self {
            avg_profit_per_sale,
            cost_per_test_drive,
            close_rate,
            marketing_fee: DEFAULT_MARKETING_FEE,
        }
    }
}

/// 손익분기 계산 결과.
///
/// 입력이 무효하거나 대당 순이익이 0 이하이면 `viable=false`이고
/// 나머지 필드는 None이다. `net_profit_per_sale`은 진단 표시용으로
/// 음수 값 그대로 유지한다.
#[derive(Debug, Clone)]
pub struct BreakEvenResult {
    pub viable: bool,
    /// 대당 순이익 = 대당 이익 - CPL/성약률 [USD]
    pub net_profit_per_sale: f64,
    /// 손익분기까지 필요한 판매 대수
    pub cars_needed: Option<u32>,
    /// 필요한 예약 시승 건수
    pub test_drives_needed: Option<u32>,
    /// 해당 시승을 사는 데 필요한 광고비 [USD]
    pub projected_ad_spend: Option<f64>,
}

impl BreakEvenResult {
    fn not_viable(net_profit_per_sale: f64) -> Self {
        Self {
            viable: false,
            net_profit_per_sale,
            cars_needed: None,
            test_drives_needed: None,
            projected_ad_spend: None,
        }
    }
}

/// 고정 수수료를 회수하기 위한 판매/시승 물량과 광고비를 계산한다.
/// 올림 정책: 필요 물량과 광고비를 과소평가하지 않는다.
pub fn compute_break_even(input: BreakEvenInput) -> BreakEvenResult {
    if !inputs_valid(
        input.avg_profit_per_sale,
        input.cost_per_test_drive,
        input.close_rate,
    ) {
        return BreakEvenResult::not_viable(0.0);
    }

    let net = net_profit_per_sale(
        input.avg_profit_per_sale,
        input.cost_per_test_drive,
        input.close_rate,
    );
    if net <= 0.0 {
        return BreakEvenResult::not_viable(net);
    }

    let cars_needed = (input.marketing_fee / net).ceil() as u32;
    let test_drives_needed = (cars_needed as f64 / input.close_rate).ceil() as u32;
    let projected_ad_spend = test_drives_needed as f64 * input.cost_per_test_drive;

    BreakEvenResult {
        viable: true,
        net_profit_per_sale: net,
        cars_needed: Some(cars_needed),
        test_drives_needed: Some(test_drives_needed),
        projected_ad_spend: Some(projected_ad_spend),
    }
}
