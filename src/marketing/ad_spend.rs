use crate::marketing::{inputs_valid, net_profit_per_sale, DEFAULT_MARKETING_FEE};

/// 광고 예산 투사 입력.
#[derive(Debug, Clone)]
pub struct AdSpendInput {
    /// 대당 평균 이익 [USD]
    pub avg_profit_per_sale: f64,
    /// 예약 시승 1건당 비용(CPL) [USD]
    pub cost_per_test_drive: f64,
    /// 성약률 (0~1 소수)
    pub close_rate: f64,
    /// 투입할 광고 예산 [USD]
    pub ad_spend: f64,
    /// 비교 기준 고정 프로그램 수수료 [USD]
    pub marketing_fee: f64,
}

impl AdSpendInput {
    /// 기본 수수료(15,000 USD)를 적용한 입력을 생성한다.
    pub fn with_default_fee(
        avg_profit_per_sale: f64,
        cost_per_test_drive: f64,
        close_rate: f64,
        ad_spend: f64,
    ) -> Self {
        Self {
            avg_profit_per_sale,
            cost_per_test_drive,
            close_rate,
            ad_spend,
            marketing_fee: DEFAULT_MARKETING_FEE,
        }
    }
}

/// 광고 예산 투사 결과. 무효/역마진 입력이면 모든 수치가 0이다.
#[derive(Debug, Clone)]
pub struct AdSpendResult {
    pub viable: bool,
    /// 대당 순이익 = 대당 이익 - CPL/성약률 [USD]
    pub net_profit_per_sale: f64,
    /// 예산으로 살 수 있는 예약 시승 건수 (내림)
    pub test_drives: u32,
    /// 예상 판매 대수 (내림)
    pub cars_sold: u32,
    /// 총 순이익 = 판매 대수 * 대당 순이익 [USD]
    pub total_profit: f64,
    /// 총 매출 표기값 = 판매 대수 * 대당 이익 [USD].
    /// 대당 이익 기반이므로 엄밀한 매출이 아니라 광고비 차감 전 총이익이다.
    pub total_revenue: f64,
    /// 광고비 대비 ROI [%]
    pub roi_on_ad_spend: f64,
    /// 고정 수수료 대비 ROI [%]. 수수료가 0이면 유한하지 않은 값이 되므로
    /// 표시 계층에서 반드시 is_finite() 검사 후 "해당 없음"으로 렌더링한다.
    pub roi_vs_fee: f64,
    /// 총 순이익이 고정 수수료 이상인지 여부
    pub breaks_even: bool,
}

impl AdSpendResult {
    fn not_viable(net_profit_per_sale: f64) -> Self {
        Self {
            viable: false,
            net_profit_per_sale,
            test_drives: 0,
            cars_sold: 0,
            total_profit: 0.0,
            total_revenue: 0.0,
            roi_on_ad_spend: 0.0,
            roi_vs_fee: 0.0,
            breaks_even: false,
        }
    }
}

/// 주어진 광고 예산이 만들어내는 시승/판매/이익/ROI를 계산한다.
/// 내림 정책: 예산은 고정이고 물량이 미지수이므로 과대평가하지 않는다.
pub fn compute_from_ad_spend(input: AdSpendInput) -> AdSpendResult {
    if !inputs_valid(
        input.avg_profit_per_sale,
        input.cost_per_test_drive,
        input.close_rate,
    ) || !(input.ad_spend.is_finite() && input.ad_spend > 0.0)
    {
        return AdSpendResult::not_viable(0.0);
    }

    let net = net_profit_per_sale(
        input.avg_profit_per_sale,
        input.cost_per_test_drive,
        input.close_rate,
    );
    // 대당 순이익이 0 이하이면 시승은 살 수 있어도 판매가 손해이므로
    // 물량을 투사하지 않고 0으로 보고한다.
    if net <= 0.0 {
        return AdSpendResult::not_viable(net);
    }

    let test_drives = (input.ad_spend / input.cost_per_test_drive).floor() as u32;
    let cars_sold = (test_drives as f64 * input.close_rate).floor() as u32;
    let total_revenue = cars_sold as f64 * input.avg_profit_per_sale;
    let total_profit = cars_sold as f64 * net;
    let roi_on_ad_spend = (total_profit - input.ad_spend) / input.ad_spend * 100.0;
    let roi_vs_fee = (total_profit - input.marketing_fee) / input.marketing_fee * 100.0;
    let breaks_even = total_profit >= input.marketing_fee;

    AdSpendResult {
        viable: true,
        net_profit_per_sale: net,
        test_drives,
        cars_sold,
        total_profit,
        total_revenue,
        roi_on_ad_spend,
        roi_vs_fee,
        breaks_even,
    }
}
