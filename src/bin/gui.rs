#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

use dealership_marketing_toolbox::{
    config,
    form::{DealershipForm, FormError},
    format::{format_count, format_currency, format_percent},
    i18n,
    marketing::{self, scenario, AdSpendResult, BreakEvenResult},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data.clone() {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Dealership Marketing Toolbox",
        cfg,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 한글을 표시하기 위해 시스템 폰트를 우선 적용한다.
/// 1) assets/fonts/ 아래의 ttf
/// 2) Windows 시스템 폰트(맑은 고딕/굴림/바탕 등)
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    // 1) 프로젝트 내 폰트
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    // 2) 시스템 폰트 탐색 (Windows 기준)
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = [
            "malgun.ttf",
            "malgunsl.ttf",
            "malgunbd.ttf",
            "gulim.ttc",
            "batang.ttc",
        ];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    // 3) 실패: 기본 폰트 유지, 사용자 지정 안내
    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

fn legend_toggle(ui: &mut egui::Ui, title: &str, body: &str, state: &mut bool) {
    ui.horizontal(|ui| {
        ui.checkbox(state, title);
    });
    if *state {
        ui.add(egui::Label::new(egui::RichText::new(body).small()).wrap(true));
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_pack_dir_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    window_alpha: f32,
    ui_scale: f32,
    always_on_top: bool,
    show_formula_modal: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    apply_initial_view_size: bool,
    // 해설 토글
    show_legend_break_even: bool,
    show_legend_ad_spend: bool,
    // 폼 입력 (성약률은 % 단위)
    profit_per_sale: f64,
    cost_per_test_drive: f64,
    close_rate_percent: f64,
    ad_spend_budget: f64,
    marketing_fee: f64,
    // 계산 결과
    form_errors: Vec<FormError>,
    break_even_result: Option<BreakEvenResult>,
    ad_spend_result: Option<AdSpendResult>,
    // 사용자 지정 폰트
    custom_font_path: String,
    font_load_error: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    BreakEven,
    AdSpend,
    Scenarios,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let has_overrides = tr.lookup("gui.nav.app_title").is_some();
        eprintln!("GUI language resolved: {lang_code}, overrides_loaded={has_overrides}");
        let lang_input = config.language.clone();
        let lang_pack_dir_input = config.language_pack_dir.clone().unwrap_or_default();
        let d = config.defaults.clone();
        Self {
            config: config.clone(),
            tr,
            lang_input,
            lang_pack_dir_input,
            lang_save_status: None,
            tab: Tab::BreakEven,
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            ui_scale: 1.0,
            always_on_top: false,
            show_formula_modal: false,
            show_settings_modal: false,
            show_help_modal: false,
            apply_initial_view_size: true,
            show_legend_break_even: false,
            show_legend_ad_spend: false,
            profit_per_sale: d.avg_profit_per_sale,
            cost_per_test_drive: d.cost_per_test_drive,
            close_rate_percent: d.close_rate_percent,
            ad_spend_budget: d.ad_spend_budget,
            marketing_fee: d.marketing_fee,
            form_errors: Vec::new(),
            break_even_result: None,
            ad_spend_result: None,
            custom_font_path: String::new(),
            font_load_error: None,
        }
    }

    /// 현재 폼 값으로 두 계산을 모두 갱신한다. 검증 실패 시 결과를 비운다.
    fn recompute(&mut self) {
        let form = DealershipForm {
            avg_profit_per_sale: self.profit_per_sale,
            cost_per_test_drive: self.cost_per_test_drive,
            close_rate_percent: self.close_rate_percent,
            ad_spend_budget: self.ad_spend_budget,
        };
        match form.validate() {
            Ok(inputs) => {
                self.form_errors.clear();
                self.break_even_result = Some(marketing::compute_break_even(
                    inputs.break_even_input(self.marketing_fee),
                ));
                self.ad_spend_result = Some(marketing::compute_from_ad_spend(
                    inputs.ad_spend_input(self.marketing_fee),
                ));
            }
            Err(errors) => {
                self.form_errors = errors;
                self.break_even_result = None;
                self.ad_spend_result = None;
            }
        }
    }

    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::BreakEven, txt("gui.tab.break_even", "Break-Even")),
            (Tab::AdSpend, txt("gui.tab.ad_spend", "Ad-Spend Projection")),
            (Tab::Scenarios, txt("gui.tab.scenarios", "Scenarios")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let resp = ui
                .add(button)
                .on_hover_text(txt("gui.nav.switch_tip", "Switch menu"));
            if resp.clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    /// 공통 입력 폼. ad_spend 탭에서만 예산 행을 노출한다.
    fn ui_form(&mut self, ui: &mut egui::Ui, with_budget: bool) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.vertical(|ui| {
                egui::Grid::new(if with_budget {
                    "form_grid_budget"
                } else {
                    "form_grid"
                })
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.form.profit", "Average profit per sale [$]"),
                        &txt(
                            "gui.form.profit_tip",
                            "Front-end gross per vehicle (exclude F&I if unsure)",
                        ),
                    );
                    ui.add(egui::DragValue::new(&mut self.profit_per_sale).speed(10.0));
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.form.cost", "Cost per booked test drive [$]"),
                        &txt("gui.form.cost_tip", "Average cost per BOOKED test drive"),
                    );
                    ui.add(egui::DragValue::new(&mut self.cost_per_test_drive).speed(1.0));
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.form.close_rate", "Close rate [%]"),
                        &txt("gui.form.close_rate_tip", "% of test drives that close"),
                    );
                    ui.add(egui::DragValue::new(&mut self.close_rate_percent).speed(0.1));
                    ui.end_row();

                    if with_budget {
                        label_with_tip(
                            ui,
                            &txt("gui.form.budget", "Total ad spend budget [$]"),
                            &txt(
                                "gui.form.budget_tip",
                                "How much you want to spend on ads over the program",
                            ),
                        );
                        ui.add(egui::DragValue::new(&mut self.ad_spend_budget).speed(100.0));
                        ui.end_row();
                    }

                    label_with_tip(
                        ui,
                        &txt("gui.form.fee", "Fixed program fee [$]"),
                        &txt("gui.form.fee_tip", "Fixed marketing program fee (for ROI comparison)"),
                    );
                    ui.add(egui::DragValue::new(&mut self.marketing_fee).speed(100.0));
                    ui.end_row();
                });
                ui.add_space(8.0);
                if ui.button(txt("gui.form.calculate", "Calculate")).clicked() {
                    self.recompute();
                }
                for err in &self.form_errors {
                    let key = match err {
                        FormError::ProfitTooLow => "form_error.profit_too_low",
                        FormError::CostTooLow => "form_error.cost_too_low",
                        FormError::CloseRateOutOfRange => "form_error.close_rate_out_of_range",
                        FormError::AdSpendTooLow => "form_error.ad_spend_too_low",
                    };
                    ui.colored_label(ui.visuals().error_fg_color, self.tr.t(key));
                }
            });
        });
    }

    fn ui_not_viable(&self, ui: &mut egui::Ui, net_profit_per_sale: f64) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.colored_label(
            ui.visuals().error_fg_color,
            txt("gui.not_viable.title", "Program not viable"),
        );
        ui.label(txt(
            "gui.not_viable.body",
            "Your ad cost per sold unit exceeds profit. Not viable unless CPL drops or close rate improves.",
        ));
        if net_profit_per_sale < 0.0 {
            ui.label(format!(
                "{} {}",
                txt("gui.not_viable.net_loss", "Net loss per sale:"),
                format_currency(net_profit_per_sale.abs())
            ));
        }
    }

    fn ui_break_even(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.breakeven.heading", "Break-Even Analysis"),
            &txt(
                "gui.breakeven.tip",
                "Sales and test drives needed to recover the fixed program fee.",
            ),
        );
        ui.add_space(8.0);
        self.ui_form(ui, false);
        ui.add_space(10.0);

        if let Some(result) = self.break_even_result.clone() {
            if !result.viable {
                self.ui_not_viable(ui, result.net_profit_per_sale);
            } else if let (Some(cars), Some(drives), Some(spend)) = (
                result.cars_needed,
                result.test_drives_needed,
                result.projected_ad_spend,
            ) {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    egui::Grid::new("breakeven_results")
                        .num_columns(2)
                        .spacing([16.0, 6.0])
                        .show(ui, |ui| {
                            ui.label(txt("gui.breakeven.net_per_sale", "Net profit per sale"));
                            ui.strong(format_currency(result.net_profit_per_sale));
                            ui.end_row();
                            ui.label(txt("gui.breakeven.cars_needed", "Cars to break even"));
                            ui.strong(format_count(cars));
                            ui.end_row();
                            ui.label(txt("gui.breakeven.test_drives", "Test drives needed"));
                            ui.strong(format_count(drives));
                            ui.end_row();
                            ui.label(txt("gui.breakeven.ad_spend", "Projected ad spend"));
                            ui.strong(format_currency(spend));
                            ui.end_row();
                        });
                    ui.add_space(6.0);
                    ui.label(fill_template(
                        &txt(
                            "gui.breakeven.summary",
                            "To break even on the {fee} program fee, you need to sell {cars} cars. That takes {drives} booked test drives and about {spend} in ad spend. Each sale nets {net} after ad costs.",
                        ),
                        &[
                            ("fee", format_currency(self.marketing_fee)),
                            ("cars", format_count(cars)),
                            ("drives", format_count(drives)),
                            ("spend", format_currency(spend)),
                            ("net", format_currency(result.net_profit_per_sale)),
                        ],
                    ));
                });
            }
        }
        ui.add_space(10.0);
        legend_toggle(
            ui,
            &txt("gui.legend.break_even.title", "Legend / notes"),
            &txt(
                "gui.legend.break_even.body",
                "net = profit - CPL/close rate; cars = ceil(fee/net); drives = ceil(cars/close rate); spend = drives * CPL. Rounded up so the required volume is never understated.",
            ),
            &mut self.show_legend_break_even,
        );
    }

    fn ui_ad_spend(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.adspend.heading", "Ad-Spend Projection"),
            &txt(
                "gui.adspend.tip",
                "What a given ad budget buys: test drives, sales, profit, ROI.",
            ),
        );
        ui.add_space(8.0);
        self.ui_form(ui, true);
        ui.add_space(10.0);

        if let Some(result) = self.ad_spend_result.clone() {
            if !result.viable {
                self.ui_not_viable(ui, result.net_profit_per_sale);
            } else {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    egui::Grid::new("adspend_results")
                        .num_columns(2)
                        .spacing([16.0, 6.0])
                        .show(ui, |ui| {
                            ui.label(txt("gui.adspend.test_drives", "Test drives your budget buys"));
                            ui.strong(format_count(result.test_drives));
                            ui.end_row();
                            ui.label(txt("gui.adspend.cars_sold", "Cars you'll sell"));
                            ui.strong(format_count(result.cars_sold));
                            ui.end_row();
                            ui.label(txt("gui.adspend.total_profit", "Total profit"));
                            ui.strong(format_currency(result.total_profit));
                            ui.end_row();
                            ui.label(txt("gui.adspend.total_revenue", "Total revenue (pre-ad-cost)"));
                            ui.strong(format_currency(result.total_revenue));
                            ui.end_row();
                            ui.label(txt("gui.adspend.roi_ad_spend", "ROI on ad spend"));
                            ui.strong(format_percent(result.roi_on_ad_spend / 100.0));
                            ui.end_row();
                            ui.label(txt("gui.adspend.roi_vs_fee", "ROI vs program fee"));
                            // 수수료 0이면 유한하지 않으므로 수치 대신 N/A
                            if result.roi_vs_fee.is_finite() {
                                ui.strong(format_percent(result.roi_vs_fee / 100.0));
                            } else {
                                ui.strong(txt("gui.adspend.not_applicable", "N/A"));
                            }
                            ui.end_row();
                            ui.label(txt("gui.adspend.breaks_even", "Breaks even vs fee"));
                            if result.breaks_even {
                                ui.strong(txt("gui.adspend.yes", "Yes"));
                            } else {
                                ui.colored_label(
                                    ui.visuals().error_fg_color,
                                    txt("gui.adspend.no", "No"),
                                );
                            }
                            ui.end_row();
                        });
                    ui.add_space(6.0);
                    let summary = if result.breaks_even {
                        fill_template(
                            &txt(
                                "gui.adspend.summary_even",
                                "A {budget} ad budget buys {drives} test drives, about {cars} sales and {profit} total profit. This covers the {fee} program fee with {surplus} to spare.",
                            ),
                            &[
                                ("budget", format_currency(self.ad_spend_budget)),
                                ("drives", format_count(result.test_drives)),
                                ("cars", format_count(result.cars_sold)),
                                ("profit", format_currency(result.total_profit)),
                                ("fee", format_currency(self.marketing_fee)),
                                (
                                    "surplus",
                                    format_currency(result.total_profit - self.marketing_fee),
                                ),
                            ],
                        )
                    } else {
                        fill_template(
                            &txt(
                                "gui.adspend.summary_short",
                                "A {budget} ad budget buys {drives} test drives, about {cars} sales and {profit} total profit. This falls short of the {fee} program fee by {shortfall}.",
                            ),
                            &[
                                ("budget", format_currency(self.ad_spend_budget)),
                                ("drives", format_count(result.test_drives)),
                                ("cars", format_count(result.cars_sold)),
                                ("profit", format_currency(result.total_profit)),
                                ("fee", format_currency(self.marketing_fee)),
                                (
                                    "shortfall",
                                    format_currency(self.marketing_fee - result.total_profit),
                                ),
                            ],
                        )
                    };
                    ui.label(summary);
                });
            }
        }
        ui.add_space(10.0);
        legend_toggle(
            ui,
            &txt("gui.legend.ad_spend.title", "Legend / notes"),
            &txt(
                "gui.legend.ad_spend.body",
                "drives = floor(budget/CPL); sold = floor(drives * close rate). Rounded down because the budget is fixed and volume is the unknown. Revenue is sold * profit per sale, gross of ad costs.",
            ),
            &mut self.show_legend_ad_spend,
        );
    }

    fn ui_scenarios(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.scenarios.heading", "Benchmark Scenarios"),
            &txt(
                "gui.scenarios.tip",
                "Reference tables computed at the default fee and baseline metrics.",
            ),
        );
        ui.add_space(8.0);

        ui.strong(txt(
            "gui.scenarios.break_even_title",
            "Break-Even Reference Benchmarks",
        ));
        egui::Grid::new("scenario_break_even")
            .num_columns(5)
            .spacing([14.0, 4.0])
            .show(ui, |ui| {
                ui.strong(txt("gui.scenarios.col.name", "Scenario"));
                ui.strong(txt("gui.scenarios.col.cpl", "CPL"));
                ui.strong(txt("gui.scenarios.col.close_rate", "Close Rate"));
                ui.strong(txt("gui.scenarios.col.profit", "Profit"));
                ui.strong(txt("gui.scenarios.col.cars_needed", "Cars Needed"));
                ui.end_row();
                for (s, result) in scenario::break_even_rows() {
                    ui.label(self.tr.t(s.name_key));
                    ui.label(format_currency(s.cost_per_test_drive));
                    ui.label(format_percent(s.close_rate_percent / 100.0));
                    ui.label(format_currency(s.avg_profit_per_sale));
                    match result.cars_needed {
                        Some(n) => ui.label(format_count(n)),
                        None => ui.label(txt("gui.adspend.not_applicable", "N/A")),
                    };
                    ui.end_row();
                }
            });

        ui.add_space(12.0);
        ui.strong(txt("gui.scenarios.ad_spend_title", "Ad Spend Budget Scenarios"));
        ui.small(txt(
            "gui.scenarios.baseline_note",
            "Baseline metrics: $45 CPL, 22.5% close rate, $1,500 profit per sale",
        ));
        egui::Grid::new("scenario_ad_spend")
            .num_columns(6)
            .spacing([14.0, 4.0])
            .show(ui, |ui| {
                ui.strong(txt("gui.scenarios.col.budget", "Budget"));
                ui.strong(txt("gui.scenarios.col.ad_spend", "Ad Spend"));
                ui.strong(txt("gui.scenarios.col.test_drives", "Test Drives"));
                ui.strong(txt("gui.scenarios.col.cars_sold", "Cars Sold"));
                ui.strong(txt("gui.scenarios.col.total_profit", "Total Profit"));
                ui.strong(txt("gui.scenarios.col.breaks_even", "Breaks Even?"));
                ui.end_row();
                for (s, result) in scenario::ad_spend_rows() {
                    ui.label(self.tr.t(s.name_key));
                    ui.label(format_currency(s.ad_spend));
                    ui.label(format_count(result.test_drives));
                    ui.label(format_count(result.cars_sold));
                    ui.label(format_currency(result.total_profit));
                    if result.breaks_even {
                        ui.label(txt("gui.adspend.yes", "Yes"));
                    } else {
                        ui.colored_label(
                            ui.visuals().error_fg_color,
                            txt("gui.adspend.no", "No"),
                        );
                    }
                    ui.end_row();
                }
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target = egui::vec2((screen.x * 0.55).max(860.0), (screen.y * 0.60).max(640.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| {
            tr.lookup(key).unwrap_or_else(|| default.to_string())
        };

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Dealership Marketing Toolbox"));
                ui.label(" | Desktop GUI");
                ui.separator();
                if ui
                    .button(txt("gui.formula.button", "Formula reference"))
                    .clicked()
                {
                    self.show_formula_modal = true;
                }
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            egui::Window::new(txt("gui.settings.title", "Program Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.settings.general", "General"));
                    ui.separator();
                    ui.label(txt("gui.settings.ui_scale", "UI scale"));
                    let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                    if ui.add(scale_slider).changed() {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.separator();
                    ui.checkbox(
                        &mut self.always_on_top,
                        txt("gui.settings.always_on_top", "Always on top"),
                    );
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));

                    ui.separator();
                    ui.label(txt("gui.settings.font", "Custom font (.ttf/.ttc)"));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.custom_font_path);
                        if ui.button(txt("gui.settings.font_pick", "Browse")).clicked() {
                            if let Some(path) = FileDialog::new()
                                .add_filter("Font", &["ttf", "ttc", "otf"])
                                .pick_file()
                            {
                                self.custom_font_path = path.display().to_string();
                            }
                        }
                        if ui.button(txt("gui.settings.font_apply", "Apply")).clicked() {
                            self.font_load_error =
                                load_custom_font(ctx, &self.custom_font_path).err();
                        }
                    });
                    if let Some(err) = &self.font_load_error {
                        ui.colored_label(ui.visuals().error_fg_color, err);
                    }

                    ui.separator();
                    ui.label(txt("gui.settings.language", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                txt("gui.settings.lang.auto", "System"),
                            );
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        self.config.language = self.lang_input.clone();
                        self.config.window_alpha = self.window_alpha;
                        self.config.defaults.avg_profit_per_sale = self.profit_per_sale;
                        self.config.defaults.cost_per_test_drive = self.cost_per_test_drive;
                        self.config.defaults.close_rate_percent = self.close_rate_percent;
                        self.config.defaults.ad_spend_budget = self.ad_spend_budget;
                        self.config.defaults.marketing_fee = self.marketing_fee;
                        // 즉시 번역기 반영
                        let resolved = i18n::resolve_language(
                            &self.config.language,
                            self.config.language_pack_dir.as_deref(),
                        );
                        self.tr = i18n::Translator::new_with_pack(
                            &resolved,
                            self.config.language_pack_dir.as_deref(),
                        );
                        if let Err(e) = self.config.save() {
                            self.lang_save_status = Some(format!("Save error: {e}"));
                        } else {
                            self.lang_save_status = Some(txt("gui.settings.saved", "Saved."));
                        }
                    }
                    if let Some(msg) = &self.lang_save_status {
                        ui.label(msg);
                    }
                });
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt(
                        "gui.about.app",
                        "Offline calculator for dealership marketing economics",
                    ));
                    ui.label(txt("gui.about.version", "Version: 1.0"));
                    ui.separator();
                    ui.label(txt("gui.about.usage.title", "Usage guide"));
                    ui.label(txt(
                        "gui.about.usage.inputs",
                        "- Close rate is entered in percent (22.5 means 22.5%); all money values are USD.",
                    ));
                    ui.label(txt(
                        "gui.about.usage.viable",
                        "- A red warning means each sale would lose money at the given CPL and close rate.",
                    ));
                    ui.label(txt(
                        "gui.about.usage.defaults",
                        "- Saving settings stores the current form values as defaults in config.toml.",
                    ));
                });
        }

        if self.show_formula_modal {
            egui::Window::new(txt("gui.formula.title", "Formula reference"))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.style_mut().wrap = Some(true);
                    ui.heading(txt(
                        "gui.formula.net",
                        "Net profit per sale: net = profit - CPL / close rate.",
                    ));
                    ui.separator();
                    ui.heading(txt(
                        "gui.formula.break_even",
                        "Break-even: cars = ceil(fee/net); drives = ceil(cars/close rate); spend = drives * CPL (rounded up).",
                    ));
                    ui.label(txt(
                        "gui.formula.ad_spend",
                        "Projection: drives = floor(budget/CPL); sold = floor(drives * close rate) (rounded down).",
                    ));
                    ui.separator();
                    ui.heading(txt(
                        "gui.formula.roi",
                        "ROI on ad spend = (total profit - budget)/budget; ROI vs fee = (total profit - fee)/fee.",
                    ));
                    ui.label(txt(
                        "gui.formula.breaks_even",
                        "Breaks even when total profit >= fee. ROI vs fee is N/A when the fee is zero.",
                    ));
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::BreakEven => self.ui_break_even(ui),
                    Tab::AdSpend => self.ui_ad_spend(ui),
                    Tab::Scenarios => self.ui_scenarios(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_config() -> config::Config {
        let mut cfg = config::Config::default();
        cfg.defaults.avg_profit_per_sale = 2_000.0;
        cfg.defaults.cost_per_test_drive = 30.0;
        cfg.defaults.close_rate_percent = 30.0;
        cfg.defaults.ad_spend_budget = 20_000.0;
        cfg.defaults.marketing_fee = 12_000.0;
        cfg
    }

    #[test]
    fn form_defaults_follow_config() {
        let app = GuiApp::new(custom_config());
        assert_eq!(app.profit_per_sale, 2_000.0);
        assert_eq!(app.cost_per_test_drive, 30.0);
        assert_eq!(app.close_rate_percent, 30.0);
        assert_eq!(app.ad_spend_budget, 20_000.0);
        assert_eq!(app.marketing_fee, 12_000.0);
    }

    #[test]
    fn recompute_fills_both_results() {
        let mut app = GuiApp::new(config::Config::default());
        app.recompute();
        assert!(app.form_errors.is_empty());
        let be = app.break_even_result.as_ref().expect("break-even result");
        assert!(be.viable);
        assert_eq!(be.cars_needed, Some(12));
        let ads = app.ad_spend_result.as_ref().expect("ad-spend result");
        assert!(ads.viable);
        assert_eq!(ads.test_drives, 333);
    }

    #[test]
    fn recompute_collects_form_errors() {
        let mut app = GuiApp::new(config::Config::default());
        app.close_rate_percent = 0.0;
        app.recompute();
        assert_eq!(app.form_errors, vec![FormError::CloseRateOutOfRange]);
        assert!(app.break_even_result.is_none());
        assert!(app.ad_spend_result.is_none());
    }

    #[test]
    fn fill_template_replaces_vars() {
        let out = fill_template(
            "need {cars} cars and {drives} drives",
            &[("cars", "12".to_string()), ("drives", "54".to_string())],
        );
        assert_eq!(out, "need 12 cars and 54 drives");
    }
}
