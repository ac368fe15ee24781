use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const YES: &str = "general.yes";
    pub const NO: &str = "general.no";
    pub const NOT_APPLICABLE: &str = "general.not_applicable";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_BREAK_EVEN: &str = "main_menu.break_even";
    pub const MAIN_MENU_AD_SPEND: &str = "main_menu.ad_spend";
    pub const MAIN_MENU_SCENARIOS: &str = "main_menu.scenarios";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PROMPT_PROFIT: &str = "prompt.avg_profit_per_sale";
    pub const PROMPT_COST: &str = "prompt.cost_per_test_drive";
    pub const PROMPT_CLOSE_RATE: &str = "prompt.close_rate_percent";
    pub const PROMPT_AD_SPEND: &str = "prompt.ad_spend_budget";
    pub const PROMPT_FEE: &str = "prompt.marketing_fee";

    pub const BREAK_EVEN_HEADING: &str = "break_even.heading";
    pub const AD_SPEND_HEADING: &str = "ad_spend.heading";
    pub const SCENARIOS_HEADING: &str = "scenarios.heading";

    pub const RESULT_NET_PER_SALE: &str = "result.net_profit_per_sale";
    pub const RESULT_CARS_NEEDED: &str = "result.cars_needed";
    pub const RESULT_TEST_DRIVES_NEEDED: &str = "result.test_drives_needed";
    pub const RESULT_PROJECTED_AD_SPEND: &str = "result.projected_ad_spend";
    pub const RESULT_TEST_DRIVES: &str = "result.test_drives";
    pub const RESULT_CARS_SOLD: &str = "result.cars_sold";
    pub const RESULT_TOTAL_PROFIT: &str = "result.total_profit";
    pub const RESULT_TOTAL_REVENUE: &str = "result.total_revenue";
    pub const RESULT_ROI_AD_SPEND: &str = "result.roi_on_ad_spend";
    pub const RESULT_ROI_VS_FEE: &str = "result.roi_vs_fee";
    pub const RESULT_BREAKS_EVEN: &str = "result.breaks_even";

    pub const NOT_VIABLE_HEADING: &str = "not_viable.heading";
    pub const NOT_VIABLE_BODY: &str = "not_viable.body";
    pub const NOT_VIABLE_NET_LOSS: &str = "not_viable.net_loss_per_sale";
    pub const ADVICE_INTRO: &str = "advice.intro";
    pub const ADVICE_REDUCE_CPL: &str = "advice.reduce_cpl";
    pub const ADVICE_IMPROVE_CLOSE_RATE: &str = "advice.improve_close_rate";
    pub const ADVICE_INCREASE_MARGIN: &str = "advice.increase_margin";

    pub const FORM_ERROR_PROFIT: &str = "form_error.profit_too_low";
    pub const FORM_ERROR_COST: &str = "form_error.cost_too_low";
    pub const FORM_ERROR_CLOSE_RATE: &str = "form_error.close_rate_out_of_range";
    pub const FORM_ERROR_AD_SPEND: &str = "form_error.ad_spend_too_low";

    pub const SCENARIO_BEST_CASE: &str = "scenario.best_case";
    pub const SCENARIO_OPTIMISTIC_MID: &str = "scenario.optimistic_mid";
    pub const SCENARIO_CONSERVATIVE: &str = "scenario.conservative";
    pub const SCENARIO_MODERATE: &str = "scenario.moderate";
    pub const SCENARIO_AGGRESSIVE: &str = "scenario.aggressive";
    pub const SCENARIO_MAXIMUM: &str = "scenario.maximum";

    pub const SCENARIO_BREAK_EVEN_TITLE: &str = "scenarios.break_even_title";
    pub const SCENARIO_AD_SPEND_TITLE: &str = "scenarios.ad_spend_title";
    pub const SCENARIO_BASELINE_NOTE: &str = "scenarios.baseline_note";
    pub const SCENARIO_COL_NAME: &str = "scenarios.col.name";
    pub const SCENARIO_COL_CPL: &str = "scenarios.col.cpl";
    pub const SCENARIO_COL_CLOSE_RATE: &str = "scenarios.col.close_rate";
    pub const SCENARIO_COL_PROFIT: &str = "scenarios.col.profit";
    pub const SCENARIO_COL_CARS_NEEDED: &str = "scenarios.col.cars_needed";
    pub const SCENARIO_COL_BUDGET: &str = "scenarios.col.budget";
    pub const SCENARIO_COL_AD_SPEND: &str = "scenarios.col.ad_spend";
    pub const SCENARIO_COL_TEST_DRIVES: &str = "scenarios.col.test_drives";
    pub const SCENARIO_COL_CARS_SOLD: &str = "scenarios.col.cars_sold";
    pub const SCENARIO_COL_TOTAL_PROFIT: &str = "scenarios.col.total_profit";
    pub const SCENARIO_COL_BREAKS_EVEN: &str = "scenarios.col.breaks_even";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_DEFAULTS: &str = "settings.current_defaults";
    pub const SETTINGS_PROMPT_KEEP_HINT: &str = "settings.prompt_keep_hint";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const HELP_BREAK_EVEN: &str = "help.break_even";
    pub const HELP_AD_SPEND: &str = "help.ad_spend";
    pub const HELP_SCENARIOS: &str = "help.scenarios";
    pub const HELP_SETTINGS: &str = "help.settings";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 한국어 번역이 없으면 영어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        YES => "예",
        NO => "아니오",
        NOT_APPLICABLE => "해당 없음",
        MAIN_MENU_TITLE => "\n=== Dealership Marketing Toolbox ===",
        MAIN_MENU_BREAK_EVEN => "1) 손익분기 계산기",
        MAIN_MENU_AD_SPEND => "2) 광고 예산 투사",
        MAIN_MENU_SCENARIOS => "3) 벤치마크 시나리오",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PROMPT_PROFIT => "대당 평균 이익 [$]: ",
        PROMPT_COST => "예약 시승 1건당 비용 [$]: ",
        PROMPT_CLOSE_RATE => "성약률 [%] (예: 22.5): ",
        PROMPT_AD_SPEND => "광고 예산 [$]: ",
        PROMPT_FEE => "고정 프로그램 수수료 [$] (엔터 시 기본값): ",
        BREAK_EVEN_HEADING => "\n-- 손익분기 분석 --",
        AD_SPEND_HEADING => "\n-- 광고 예산 투사 --",
        SCENARIOS_HEADING => "\n-- 벤치마크 시나리오 --",
        RESULT_NET_PER_SALE => "대당 순이익:",
        RESULT_CARS_NEEDED => "손익분기 판매 대수:",
        RESULT_TEST_DRIVES_NEEDED => "필요 예약 시승:",
        RESULT_PROJECTED_AD_SPEND => "필요 광고비:",
        RESULT_TEST_DRIVES => "구매 가능 시승:",
        RESULT_CARS_SOLD => "예상 판매 대수:",
        RESULT_TOTAL_PROFIT => "총 순이익:",
        RESULT_TOTAL_REVENUE => "총 매출(광고비 차감 전):",
        RESULT_ROI_AD_SPEND => "광고비 대비 ROI:",
        RESULT_ROI_VS_FEE => "수수료 대비 ROI:",
        RESULT_BREAKS_EVEN => "손익분기 달성:",
        NOT_VIABLE_HEADING => "경고: 프로그램이 성립하지 않습니다.",
        NOT_VIABLE_BODY => {
            "판매 1대당 광고비가 이익을 초과합니다. CPL을 낮추거나 성약률을 올리지 않으면 성립하지 않습니다."
        }
        NOT_VIABLE_NET_LOSS => "대당 순손실:",
        ADVICE_INTRO => "이 수치로는 판매할수록 손해입니다. 다음을 검토하세요:",
        ADVICE_REDUCE_CPL => "- 예약 시승 1건당 비용 절감",
        ADVICE_IMPROVE_CLOSE_RATE => "- 영업 프로세스 개선으로 성약률 상승",
        ADVICE_INCREASE_MARGIN => "- 대당 이익 마진 확대",
        FORM_ERROR_PROFIT => "대당 이익은 $1 이상이어야 합니다.",
        FORM_ERROR_COST => "시승 1건당 비용은 $1 이상이어야 합니다.",
        FORM_ERROR_CLOSE_RATE => "성약률은 0.1%에서 100% 사이여야 합니다.",
        FORM_ERROR_AD_SPEND => "광고 예산은 $1,000 이상이어야 합니다.",
        SCENARIO_BEST_CASE => "최상",
        SCENARIO_OPTIMISTIC_MID => "낙관-중간",
        SCENARIO_CONSERVATIVE => "보수",
        SCENARIO_MODERATE => "중간",
        SCENARIO_AGGRESSIVE => "공격",
        SCENARIO_MAXIMUM => "최대",
        SCENARIO_BREAK_EVEN_TITLE => "손익분기 벤치마크",
        SCENARIO_AD_SPEND_TITLE => "광고 예산 시나리오",
        SCENARIO_BASELINE_NOTE => "기준 지표: CPL $45, 성약률 22.5%, 대당 이익 $1,500",
        SCENARIO_COL_NAME => "시나리오",
        SCENARIO_COL_CPL => "CPL",
        SCENARIO_COL_CLOSE_RATE => "성약률",
        SCENARIO_COL_PROFIT => "대당 이익",
        SCENARIO_COL_CARS_NEEDED => "필요 대수",
        SCENARIO_COL_BUDGET => "예산",
        SCENARIO_COL_AD_SPEND => "광고비",
        SCENARIO_COL_TEST_DRIVES => "시승",
        SCENARIO_COL_CARS_SOLD => "판매",
        SCENARIO_COL_TOTAL_PROFIT => "총 순이익",
        SCENARIO_COL_BREAKS_EVEN => "손익분기",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_DEFAULTS => "현재 폼 초기값:",
        SETTINGS_PROMPT_KEEP_HINT => "(엔터 입력 시 현재 값 유지)",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        HELP_BREAK_EVEN => "도움말: 대당 이익, CPL, 성약률(%)을 입력하면 수수료 회수에 필요한 판매/시승/광고비를 계산합니다.",
        HELP_AD_SPEND => "도움말: 같은 지표에 광고 예산을 더해 시승/판매/이익/ROI를 투사합니다.",
        HELP_SCENARIOS => "도움말: 대표 시나리오 표를 기본 수수료와 기준 지표로 계산해 보여줍니다.",
        HELP_SETTINGS => "도움말: 폼 초기값과 언어를 config.toml에 저장합니다.",
        _ => return None,
    })
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        YES => "Yes",
        NO => "No",
        NOT_APPLICABLE => "N/A",
        MAIN_MENU_TITLE => "\n=== Dealership Marketing Toolbox ===",
        MAIN_MENU_BREAK_EVEN => "1) Break-Even Calculator",
        MAIN_MENU_AD_SPEND => "2) Ad-Spend Projection",
        MAIN_MENU_SCENARIOS => "3) Benchmark Scenarios",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PROMPT_PROFIT => "Average profit per sale [$]: ",
        PROMPT_COST => "Cost per booked test drive [$]: ",
        PROMPT_CLOSE_RATE => "Close rate [%] (e.g., 22.5): ",
        PROMPT_AD_SPEND => "Ad spend budget [$]: ",
        PROMPT_FEE => "Fixed program fee [$] (enter for default): ",
        BREAK_EVEN_HEADING => "\n-- Break-Even Analysis --",
        AD_SPEND_HEADING => "\n-- Ad-Spend Projection --",
        SCENARIOS_HEADING => "\n-- Benchmark Scenarios --",
        RESULT_NET_PER_SALE => "Net profit per sale:",
        RESULT_CARS_NEEDED => "Cars to break even:",
        RESULT_TEST_DRIVES_NEEDED => "Test drives needed:",
        RESULT_PROJECTED_AD_SPEND => "Projected ad spend:",
        RESULT_TEST_DRIVES => "Test drives your budget buys:",
        RESULT_CARS_SOLD => "Cars you'll sell:",
        RESULT_TOTAL_PROFIT => "Total profit:",
        RESULT_TOTAL_REVENUE => "Total revenue (pre-ad-cost):",
        RESULT_ROI_AD_SPEND => "ROI on ad spend:",
        RESULT_ROI_VS_FEE => "ROI vs program fee:",
        RESULT_BREAKS_EVEN => "Breaks even:",
        NOT_VIABLE_HEADING => "Warning: program not viable.",
        NOT_VIABLE_BODY => {
            "Your ad cost per sold unit exceeds profit. Not viable unless CPL drops or close rate improves."
        }
        NOT_VIABLE_NET_LOSS => "Net loss per sale:",
        ADVICE_INTRO => "You would lose money on each sale with these numbers. Consider:",
        ADVICE_REDUCE_CPL => "- Reducing your cost per booked test drive",
        ADVICE_IMPROVE_CLOSE_RATE => "- Improving your close rate through better sales processes",
        ADVICE_INCREASE_MARGIN => "- Increasing your profit margin per vehicle",
        FORM_ERROR_PROFIT => "Profit per sale must be at least $1.",
        FORM_ERROR_COST => "Test drive cost must be at least $1.",
        FORM_ERROR_CLOSE_RATE => "Close rate must be between 0.1% and 100%.",
        FORM_ERROR_AD_SPEND => "Ad spend budget must be at least $1,000.",
        SCENARIO_BEST_CASE => "Best-Case",
        SCENARIO_OPTIMISTIC_MID => "Optimistic-Mid",
        SCENARIO_CONSERVATIVE => "Conservative",
        SCENARIO_MODERATE => "Moderate",
        SCENARIO_AGGRESSIVE => "Aggressive",
        SCENARIO_MAXIMUM => "Maximum",
        SCENARIO_BREAK_EVEN_TITLE => "Break-Even Reference Benchmarks",
        SCENARIO_AD_SPEND_TITLE => "Ad Spend Budget Scenarios",
        SCENARIO_BASELINE_NOTE => "Baseline metrics: $45 CPL, 22.5% close rate, $1,500 profit per sale",
        SCENARIO_COL_NAME => "Scenario",
        SCENARIO_COL_CPL => "CPL",
        SCENARIO_COL_CLOSE_RATE => "Close Rate",
        SCENARIO_COL_PROFIT => "Profit",
        SCENARIO_COL_CARS_NEEDED => "Cars Needed",
        SCENARIO_COL_BUDGET => "Budget",
        SCENARIO_COL_AD_SPEND => "Ad Spend",
        SCENARIO_COL_TEST_DRIVES => "Test Drives",
        SCENARIO_COL_CARS_SOLD => "Cars Sold",
        SCENARIO_COL_TOTAL_PROFIT => "Total Profit",
        SCENARIO_COL_BREAKS_EVEN => "Breaks Even?",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_DEFAULTS => "Current form defaults:",
        SETTINGS_PROMPT_KEEP_HINT => "(press enter to keep current value)",
        SETTINGS_INVALID => "Invalid input; value unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        HELP_BREAK_EVEN => "Help: enter profit per sale, CPL, and close rate (%) to compute the sales, test drives, and ad spend needed to recover the fee.",
        HELP_AD_SPEND => "Help: same metrics plus an ad budget project test drives, sales, profit, and ROI.",
        HELP_SCENARIOS => "Help: reference scenario tables computed at the default fee and baseline metrics.",
        HELP_SETTINGS => "Help: form defaults and language are stored in config.toml.",
        _ => "[missing translation]",
    }
}
