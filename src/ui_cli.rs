use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::form::{self, DealershipForm, FormError};
use crate::format::{format_count, format_currency, format_percent};
use crate::i18n::{keys, Translator};
use crate::marketing::{self, scenario};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    BreakEven,
    AdSpendProjection,
    Scenarios,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_BREAK_EVEN));
    println!("{}", tr.t(keys::MAIN_MENU_AD_SPEND));
    println!("{}", tr.t(keys::MAIN_MENU_SCENARIOS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::BreakEven),
            "2" => return Ok(MenuChoice::AdSpendProjection),
            "3" => return Ok(MenuChoice::Scenarios),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 손익분기 메뉴를 처리한다.
pub fn handle_break_even(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::BREAK_EVEN_HEADING));
    println!("{}", tr.t(keys::HELP_BREAK_EVEN));
    let profit = read_f64(tr, tr.t(keys::PROMPT_PROFIT))?;
    let cost = read_f64(tr, tr.t(keys::PROMPT_COST))?;
    let close_rate_percent = read_f64(tr, tr.t(keys::PROMPT_CLOSE_RATE))?;
    let fee = read_f64_or(tr, tr.t(keys::PROMPT_FEE), cfg.defaults.marketing_fee)?;

    let form = DealershipForm {
        avg_profit_per_sale: profit,
        cost_per_test_drive: cost,
        close_rate_percent,
        // 손익분기 흐름은 예산을 쓰지 않으므로 검증 통과용 최소값을 채운다
        ad_spend_budget: form::MIN_AD_SPEND_BUDGET,
    };
    let inputs = match form.validate() {
        Ok(v) => v,
        Err(errors) => {
            print_form_errors(tr, &errors);
            return Ok(());
        }
    };

    let result = marketing::compute_break_even(inputs.break_even_input(fee));
    if !result.viable {
        print_not_viable(tr, result.net_profit_per_sale);
        return Ok(());
    }
    println!(
        "{} {}",
        tr.t(keys::RESULT_NET_PER_SALE),
        format_currency(result.net_profit_per_sale)
    );
    if let (Some(cars), Some(drives), Some(spend)) = (
        result.cars_needed,
        result.test_drives_needed,
        result.projected_ad_spend,
    ) {
        println!("{} {}", tr.t(keys::RESULT_CARS_NEEDED), format_count(cars));
        println!(
            "{} {}",
            tr.t(keys::RESULT_TEST_DRIVES_NEEDED),
            format_count(drives)
        );
        println!(
            "{} {}",
            tr.t(keys::RESULT_PROJECTED_AD_SPEND),
            format_currency(spend)
        );
    }
    Ok(())
}

/// 광고 예산 투사 메뉴를 처리한다.
pub fn handle_ad_spend(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::AD_SPEND_HEADING));
    println!("{}", tr.t(keys::HELP_AD_SPEND));
    let profit = read_f64(tr, tr.t(keys::PROMPT_PROFIT))?;
    let cost = read_f64(tr, tr.t(keys::PROMPT_COST))?;
    let close_rate_percent = read_f64(tr, tr.t(keys::PROMPT_CLOSE_RATE))?;
    let budget = read_f64(tr, tr.t(keys::PROMPT_AD_SPEND))?;
    let fee = read_f64_or(tr, tr.t(keys::PROMPT_FEE), cfg.defaults.marketing_fee)?;

    let form = DealershipForm {
        avg_profit_per_sale: profit,
        cost_per_test_drive: cost,
        close_rate_percent,
        ad_spend_budget: budget,
    };
    let inputs = match form.validate() {
        Ok(v) => v,
        Err(errors) => {
            print_form_errors(tr, &errors);
            return Ok(());
        }
    };

    let result = marketing::compute_from_ad_spend(inputs.ad_spend_input(fee));
    if !result.viable {
        print_not_viable(tr, result.net_profit_per_sale);
        return Ok(());
    }
    println!(
        "{} {}",
        tr.t(keys::RESULT_NET_PER_SALE),
        format_currency(result.net_profit_per_sale)
    );
    println!(
        "{} {}",
        tr.t(keys::RESULT_TEST_DRIVES),
        format_count(result.test_drives)
    );
    println!(
        "{} {}",
        tr.t(keys::RESULT_CARS_SOLD),
        format_count(result.cars_sold)
    );
    println!(
        "{} {}",
        tr.t(keys::RESULT_TOTAL_PROFIT),
        format_currency(result.total_profit)
    );
    println!(
        "{} {}",
        tr.t(keys::RESULT_TOTAL_REVENUE),
        format_currency(result.total_revenue)
    );
    println!(
        "{} {}",
        tr.t(keys::RESULT_ROI_AD_SPEND),
        format_percent(result.roi_on_ad_spend / 100.0)
    );
    // 수수료 0이면 ROI가 유한하지 않으므로 "해당 없음"으로 표시한다
    let roi_vs_fee = if result.roi_vs_fee.is_finite() {
        format_percent(result.roi_vs_fee / 100.0)
    } else {
        tr.t(keys::NOT_APPLICABLE).to_string()
    };
    println!("{} {}", tr.t(keys::RESULT_ROI_VS_FEE), roi_vs_fee);
    println!(
        "{} {}",
        tr.t(keys::RESULT_BREAKS_EVEN),
        if result.breaks_even {
            tr.t(keys::YES)
        } else {
            tr.t(keys::NO)
        }
    );
    Ok(())
}

/// 벤치마크 시나리오 메뉴를 처리한다.
pub fn handle_scenarios(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SCENARIOS_HEADING));

    println!("\n{}", tr.t(keys::SCENARIO_BREAK_EVEN_TITLE));
    println!(
        "{:<16} {:>8} {:>10} {:>10} {:>10}",
        tr.t(keys::SCENARIO_COL_NAME),
        tr.t(keys::SCENARIO_COL_CPL),
        tr.t(keys::SCENARIO_COL_CLOSE_RATE),
        tr.t(keys::SCENARIO_COL_PROFIT),
        tr.t(keys::SCENARIO_COL_CARS_NEEDED),
    );
    for (s, result) in scenario::break_even_rows() {
        let cars = match result.cars_needed {
            Some(n) => format_count(n),
            None => tr.t(keys::NOT_APPLICABLE).to_string(),
        };
        println!(
            "{:<16} {:>8} {:>10} {:>10} {:>10}",
            tr.t(s.name_key),
            format_currency(s.cost_per_test_drive),
            format_percent(s.close_rate_percent / 100.0),
            format_currency(s.avg_profit_per_sale),
            cars,
        );
    }

    println!("\n{}", tr.t(keys::SCENARIO_AD_SPEND_TITLE));
    println!("{}", tr.t(keys::SCENARIO_BASELINE_NOTE));
    println!(
        "{:<16} {:>10} {:>8} {:>8} {:>12} {:>10}",
        tr.t(keys::SCENARIO_COL_BUDGET),
        tr.t(keys::SCENARIO_COL_AD_SPEND),
        tr.t(keys::SCENARIO_COL_TEST_DRIVES),
        tr.t(keys::SCENARIO_COL_CARS_SOLD),
        tr.t(keys::SCENARIO_COL_TOTAL_PROFIT),
        tr.t(keys::SCENARIO_COL_BREAKS_EVEN),
    );
    for (s, result) in scenario::ad_spend_rows() {
        println!(
            "{:<16} {:>10} {:>8} {:>8} {:>12} {:>10}",
            tr.t(s.name_key),
            format_currency(s.ad_spend),
            format_count(result.test_drives),
            format_count(result.cars_sold),
            format_currency(result.total_profit),
            if result.breaks_even {
                tr.t(keys::YES)
            } else {
                tr.t(keys::NO)
            },
        );
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}", tr.t(keys::SETTINGS_CURRENT_DEFAULTS));
    println!("{}", tr.t(keys::SETTINGS_PROMPT_KEEP_HINT));

    let d = &mut cfg.defaults;
    d.avg_profit_per_sale = prompt_keep(tr, tr.t(keys::PROMPT_PROFIT), d.avg_profit_per_sale)?;
    d.cost_per_test_drive = prompt_keep(tr, tr.t(keys::PROMPT_COST), d.cost_per_test_drive)?;
    d.close_rate_percent = prompt_keep(tr, tr.t(keys::PROMPT_CLOSE_RATE), d.close_rate_percent)?;
    d.ad_spend_budget = prompt_keep(tr, tr.t(keys::PROMPT_AD_SPEND), d.ad_spend_budget)?;
    d.marketing_fee = prompt_keep(tr, tr.t(keys::PROMPT_FEE), d.marketing_fee)?;
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn print_not_viable(tr: &Translator, net_profit_per_sale: f64) {
    println!("{}", tr.t(keys::NOT_VIABLE_HEADING));
    println!("{}", tr.t(keys::NOT_VIABLE_BODY));
    if net_profit_per_sale < 0.0 {
        println!(
            "{} {}",
            tr.t(keys::NOT_VIABLE_NET_LOSS),
            format_currency(net_profit_per_sale.abs())
        );
        println!("{}", tr.t(keys::ADVICE_INTRO));
        println!("{}", tr.t(keys::ADVICE_REDUCE_CPL));
        println!("{}", tr.t(keys::ADVICE_IMPROVE_CLOSE_RATE));
        println!("{}", tr.t(keys::ADVICE_INCREASE_MARGIN));
    }
}

fn print_form_errors(tr: &Translator, errors: &[FormError]) {
    for err in errors {
        let key = match err {
            FormError::ProfitTooLow => keys::FORM_ERROR_PROFIT,
            FormError::CostTooLow => keys::FORM_ERROR_COST,
            FormError::CloseRateOutOfRange => keys::FORM_ERROR_CLOSE_RATE,
            FormError::AdSpendTooLow => keys::FORM_ERROR_AD_SPEND,
        };
        println!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.t(key));
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 기본값을 사용한다.
fn read_f64_or(tr: &Translator, prompt: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn prompt_keep(tr: &Translator, prompt: &str, current: f64) -> Result<f64, AppError> {
    let s = read_line(&format!("{prompt}[{current}] "))?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(current);
    }
    match trimmed.parse::<f64>() {
        Ok(v) => Ok(v),
        Err(_) => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            Ok(current)
        }
    }
}
