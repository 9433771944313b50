use crate::catalog;
use crate::config::AppConfig;
use crate::deal::{analyze_if_ready, DealAssumptions};
use crate::model::{AnalysisResult, DealQuality, PropertyInput, RepairItem, SelectedRepairs};
use eframe::egui;
use egui::{Color32, Context, FontFamily, FontId, Margin, RichText, Stroke, Vec2, Visuals};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};

const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);      // blue-600
const HEADING: Color32 = Color32::from_rgb(17, 24, 39);      // gray-900
const MUTED: Color32 = Color32::from_rgb(75, 85, 99);        // gray-600
const COST_RED: Color32 = Color32::from_rgb(220, 38, 38);
const CARD_FILL: Color32 = Color32::WHITE;

pub fn set_custom_style(ctx: &Context) {
    // Light blue/indigo calculator theme
    let mut visuals = Visuals::light();

    visuals.panel_fill = Color32::from_rgb(239, 246, 255);       // blue-50
    visuals.window_fill = CARD_FILL;
    visuals.extreme_bg_color = Color32::WHITE;                   // text inputs
    visuals.faint_bg_color = Color32::from_rgb(243, 244, 246);   // table stripes

    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, Color32::from_rgb(209, 213, 219));
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.5, Color32::from_rgb(147, 197, 253));
    visuals.widgets.active.bg_stroke = Stroke::new(2.0, ACCENT);

    visuals.selection.bg_fill = Color32::from_rgb(191, 219, 254);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = Margin::same(12);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.spacing.indent = 16.0;

    style.text_styles.insert(
        egui::TextStyle::Body,
        FontId::new(15.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        FontId::new(22.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        FontId::new(15.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        FontId::new(12.0, FontFamily::Proportional),
    );

    ctx.set_style(style);
}

pub struct DealAnalyzerApp {
    assumptions: DealAssumptions,
    property: PropertyInput,
    selected: SelectedRepairs,
    analysis: Option<AnalysisResult>,
}

impl DealAnalyzerApp {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            assumptions: config.assumptions,
            property: PropertyInput::default(),
            selected: SelectedRepairs::new(),
            analysis: None,
        }
    }

    /// Replaces the current result, or drops back to the placeholder when
    /// ARV or square footage is still blank.
    fn recompute(&mut self) {
        self.analysis = analyze_if_ready(&self.assumptions, &self.property, &self.selected);
    }

    fn toggle_repair(&mut self, id: &str) {
        let now_selected = self.selected.toggle(id);
        tracing::debug!(id, now_selected, "repair toggled");
        self.recompute();
    }

    fn reset(&mut self) {
        self.property = PropertyInput::default();
        self.selected.clear();
        self.recompute();
    }

    fn property_details(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;

        card(ui, |ui| {
            ui.label(RichText::new("🏠 Property Details").heading().strong().color(HEADING));
            ui.add_space(8.0);

            field_label(ui, "Property Address");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut self.property.address)
                        .hint_text("123 Main St, City, State")
                        .desired_width(f32::INFINITY),
                )
                .changed();

            ui.add_space(6.0);
            egui::Grid::new("property_numbers")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    field_label(ui, "Square Footage");
                    field_label(ui, "Estimated ARV ($)");
                    ui.end_row();

                    changed |= ui
                        .add(
                            egui::TextEdit::singleline(&mut self.property.square_footage)
                                .hint_text("2000")
                                .desired_width(170.0),
                        )
                        .changed();
                    changed |= ui
                        .add(
                            egui::TextEdit::singleline(&mut self.property.estimated_arv)
                                .hint_text("400000")
                                .desired_width(170.0),
                        )
                        .changed();
                    ui.end_row();
                });

            ui.add_space(6.0);
            field_label(ui, "Target % of ARV");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut self.property.target_percent)
                        .desired_width(f32::INFINITY),
                )
                .changed();
        });

        if changed {
            self.recompute();
        }
    }

    fn repair_estimator(&mut self, ui: &mut egui::Ui) {
        let mut toggled: Option<&'static str> = None;
        let total = catalog::total_repair_costs(&self.selected);

        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("🔧 Repair Estimator").heading().strong().color(HEADING));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    badge(
                        ui,
                        &format_usd(total),
                        Color32::from_rgb(220, 252, 231),
                        Color32::from_rgb(22, 101, 52),
                    );
                });
            });

            let count = if self.selected.is_empty() {
                "No repairs selected".to_string()
            } else {
                format!("{} selected", self.selected.len())
            };
            ui.label(RichText::new(count).color(MUTED).small());
            ui.add_space(6.0);

            egui::ScrollArea::vertical()
                .max_height(384.0)
                .show(ui, |ui| {
                    egui::Grid::new("repair_options")
                        .num_columns(2)
                        .spacing([10.0, 10.0])
                        .show(ui, |ui| {
                            for (i, repair) in catalog::all().iter().enumerate() {
                                let mut checked = self.selected.contains(repair.id);
                                let (fill, border) = if checked {
                                    (Color32::from_rgb(239, 246, 255), Color32::from_rgb(59, 130, 246))
                                } else {
                                    (CARD_FILL, Color32::from_rgb(229, 231, 235))
                                };

                                egui::Frame::new()
                                    .fill(fill)
                                    .stroke(Stroke::new(2.0, border))
                                    .inner_margin(Margin::same(10))
                                    .show(ui, |ui| {
                                        ui.set_width(200.0);
                                        if ui
                                            .checkbox(
                                                &mut checked,
                                                RichText::new(repair.name).strong().color(HEADING),
                                            )
                                            .changed()
                                        {
                                            toggled = Some(repair.id);
                                        }
                                        ui.label(RichText::new(repair.description).small().color(MUTED));
                                        ui.label(
                                            RichText::new(cost_range(repair))
                                                .small()
                                                .strong()
                                                .color(ACCENT),
                                        );
                                    });

                                if i % 2 == 1 {
                                    ui.end_row();
                                }
                            }
                        });
                });
        });

        if let Some(id) = toggled {
            self.toggle_repair(id);
        }
    }
}

impl eframe::App for DealAnalyzerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("📈").size(36.0).color(ACCENT));
                ui.label(
                    RichText::new("Analyze Your Next Deal")
                        .size(30.0)
                        .strong()
                        .color(HEADING),
                );
                ui.label(
                    RichText::new(
                        "Get instant repair cost estimates and deal analysis for your investment properties",
                    )
                    .color(MUTED),
                );
            });
            ui.add_space(6.0);
        });

        egui::SidePanel::left("inputs")
            .resizable(true)
            .min_width(480.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(8.0);
                    self.property_details(ui);
                    ui.add_space(12.0);
                    self.repair_estimator(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(analysis) = self.analysis.clone() else {
                placeholder(ui);
                return;
            };

            let mut reset = false;
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(8.0);
                deal_analysis_card(ui, &analysis);
                ui.add_space(12.0);
                cost_breakdown_card(ui, &analysis, &self.assumptions);
                ui.add_space(12.0);
                reset = quick_actions_card(ui, &self.property, &analysis);
            });

            if reset {
                self.reset();
            }
        });
    }
}

fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(CARD_FILL)
        .stroke(Stroke::new(1.0, Color32::from_rgb(219, 234, 254)))
        .inner_margin(Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).small().strong().color(Color32::from_rgb(55, 65, 81)));
}

fn badge(ui: &mut egui::Ui, text: &str, fill: Color32, color: Color32) {
    egui::Frame::new()
        .fill(fill)
        .inner_margin(Margin::symmetric(12, 4))
        .show(ui, |ui| {
            ui.label(RichText::new(text).strong().color(color));
        });
}

/// (background, text) colours of the quality badge.
fn quality_colors(quality: DealQuality) -> (Color32, Color32) {
    match quality {
        DealQuality::Excellent => (Color32::from_rgb(220, 252, 231), Color32::from_rgb(22, 101, 52)),
        DealQuality::Good => (Color32::from_rgb(219, 234, 254), Color32::from_rgb(30, 64, 175)),
        DealQuality::Fair => (Color32::from_rgb(254, 249, 195), Color32::from_rgb(133, 77, 14)),
        DealQuality::Poor => (Color32::from_rgb(254, 226, 226), Color32::from_rgb(153, 27, 27)),
    }
}

fn placeholder(ui: &mut egui::Ui) {
    ui.add_space(40.0);
    card(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("🧮").size(48.0).color(Color32::GRAY));
            ui.add_space(8.0);
            ui.label(
                RichText::new("Enter Property Details")
                    .size(20.0)
                    .strong()
                    .color(HEADING),
            );
            ui.label(
                RichText::new("Fill out the property information to see your deal analysis")
                    .color(MUTED),
            );
        });
    });
}

fn deal_analysis_card(ui: &mut egui::Ui, a: &AnalysisResult) {
    card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("🧮 Deal Analysis").heading().strong().color(HEADING));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (fill, color) = quality_colors(a.deal_quality);
                badge(ui, a.deal_quality.label(), fill, color);
            });
        });
        ui.add_space(10.0);

        egui::Grid::new("key_metrics")
            .num_columns(2)
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                metric(
                    ui,
                    "Max Allowable Offer",
                    format_usd(a.max_allowable_offer),
                    Color32::from_rgb(239, 246, 255),
                    ACCENT,
                );
                metric(
                    ui,
                    "Projected Profit",
                    format_usd(a.projected_profit),
                    Color32::from_rgb(240, 253, 244),
                    Color32::from_rgb(22, 163, 74),
                );
                ui.end_row();

                metric(
                    ui,
                    "Profit Margin",
                    format_percent(a.profit_margin),
                    Color32::from_rgb(250, 245, 255),
                    Color32::from_rgb(147, 51, 234),
                );
                metric(
                    ui,
                    "Total Investment",
                    format_usd(a.total_investment),
                    Color32::from_rgb(249, 250, 251),
                    HEADING,
                );
                ui.end_row();
            });
    });
}

fn metric(ui: &mut egui::Ui, label: &str, value: String, fill: Color32, color: Color32) {
    egui::Frame::new()
        .fill(fill)
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_min_width(220.0);
            ui.label(RichText::new(label).small().color(MUTED));
            ui.label(RichText::new(value).size(24.0).strong().color(color));
        });
}

fn cost_breakdown_card(ui: &mut egui::Ui, a: &AnalysisResult, assumptions: &DealAssumptions) {
    let rows: Vec<(String, String, Color32)> = vec![
        ("Estimated ARV".into(), format_usd(a.arv), HEADING),
        (
            "Target % of ARV".into(),
            format!("{}%", format_number(a.target_percent)),
            HEADING,
        ),
        (
            "Property Square Footage".into(),
            format!("{} sqft", format_number(a.sqft)),
            HEADING,
        ),
        ("Repair Costs".into(), format_usd(a.total_repair_costs), COST_RED),
        (
            format!("Closing Costs ({})", format_rate(assumptions.closing_cost_rate)),
            format_usd(a.closing_costs),
            COST_RED,
        ),
        (
            format!("Hard Money Interest ({})", format_rate(assumptions.hard_money_rate)),
            format_usd(a.hard_money_interest),
            COST_RED,
        ),
    ];

    card(ui, |ui| {
        ui.label(RichText::new("Cost Breakdown").size(19.0).strong().color(HEADING));
        ui.add_space(6.0);

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder().at_least(220.0))
            .column(Column::auto().at_least(140.0))
            .body(|body| {
                body.rows(30.0, rows.len(), |mut row| {
                    let (label, value, color) = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(RichText::new(label).color(Color32::from_rgb(55, 65, 81)));
                    });
                    row.col(|ui| {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new(value).strong().color(*color));
                        });
                    });
                });
            });

        ui.add_space(10.0);
        cost_chart(ui, a);
    });
}

fn cost_chart(ui: &mut egui::Ui, a: &AnalysisResult) {
    let bars = vec![
        Bar::new(0.0, a.max_allowable_offer).name("Max Offer").fill(ACCENT),
        Bar::new(1.0, a.total_repair_costs).name("Repairs").fill(COST_RED),
        Bar::new(2.0, a.closing_costs).name("Closing").fill(Color32::from_rgb(249, 115, 22)),
        Bar::new(3.0, a.hard_money_interest)
            .name("Hard Money")
            .fill(Color32::from_rgb(234, 179, 8)),
        Bar::new(4.0, a.projected_profit)
            .name("Profit")
            .fill(Color32::from_rgb(22, 163, 74)),
    ];

    Plot::new("cost_chart")
        .height(180.0)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_x(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Deal costs", bars).width(0.6));
        });
}

/// Returns true when the reset button was clicked.
fn quick_actions_card(ui: &mut egui::Ui, property: &PropertyInput, a: &AnalysisResult) -> bool {
    let mut reset = false;

    card(ui, |ui| {
        ui.label(RichText::new("Quick Actions").size(19.0).strong().color(HEADING));
        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            let copy_summary = egui::Button::new(
                RichText::new("📋 Copy Summary").color(Color32::WHITE).strong(),
            )
            .fill(ACCENT);
            if ui.add_sized(Vec2::new(160.0, 36.0), copy_summary).clicked() {
                ui.ctx().copy_text(summary_text(property, a));
            }

            if ui
                .add_sized(Vec2::new(160.0, 36.0), egui::Button::new("{ } Copy as JSON"))
                .clicked()
            {
                match serde_json::to_string_pretty(a) {
                    Ok(json) => ui.ctx().copy_text(json),
                    Err(e) => tracing::warn!(error = %e, "failed to serialize analysis"),
                }
            }

            if ui
                .add_sized(
                    Vec2::new(120.0, 36.0),
                    egui::Button::new(RichText::new("🔄 Reset").color(COST_RED)),
                )
                .clicked()
            {
                reset = true;
            }
        });
    });

    reset
}

pub fn summary_text(property: &PropertyInput, a: &AnalysisResult) -> String {
    let address = if property.address.trim().is_empty() {
        "Untitled property"
    } else {
        property.address.trim()
    };

    format!(
        "{}:\nDeal: {}\nMax allowable offer: {}\nProjected profit: {}\nProfit margin: {}\nTotal investment: {}\nARV: {} at {}% target\nSquare footage: {} sqft\nRepairs: {}\nClosing costs: {}\nHard money interest: {}",
        address,
        a.deal_quality.label(),
        format_usd(a.max_allowable_offer),
        format_usd(a.projected_profit),
        format_percent(a.profit_margin),
        format_usd(a.total_investment),
        format_usd(a.arv),
        format_number(a.target_percent),
        format_number(a.sqft),
        format_usd(a.total_repair_costs),
        format_usd(a.closing_costs),
        format_usd(a.hard_money_interest),
    )
}

/// Grouped thousands with up to three fraction digits, e.g. `1,234.5`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let formatted = format!("{:.3}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Values that round to zero lose their sign
    let sign = if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        "-"
    } else {
        ""
    };

    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

pub fn format_usd(value: f64) -> String {
    let number = format_number(value);
    match number.strip_prefix('-') {
        Some(magnitude) => format!("-${magnitude}"),
        None => format!("${number}"),
    }
}

fn cost_range(repair: &RepairItem) -> String {
    format!("{} - {}", format_usd(repair.min_cost), format_usd(repair.max_cost))
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn format_rate(rate: f64) -> String {
    format!("{}%", format_number(rate * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app() -> DealAnalyzerApp {
        DealAnalyzerApp::new(&AppConfig::default())
    }

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_000.0), "1,000");
        assert_eq!(format_number(244_000.0), "244,000");
        assert_eq!(format_number(1_234_567.891), "1,234,567.891");
        assert_eq!(format_number(1_234.5), "1,234.5");
        assert_eq!(format_number(0.12345), "0.123");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn currency_and_percent() {
        assert_eq!(format_usd(244_000.0), "$244,000");
        assert_eq!(format_usd(12_000.5), "$12,000.5");
        assert_eq!(format_usd(-5_000.0), "-$5,000");
        assert_eq!(format_percent(30.0), "30.0%");
        assert_eq!(format_percent(17.777), "17.8%");
        assert_eq!(format_rate(0.03), "3%");
        assert_eq!(format_rate(0.06), "6%");
    }

    #[test]
    fn repair_cost_range() {
        let gfci = catalog::find("gfci").unwrap();
        assert_eq!(cost_range(gfci), "$1,000 - $3,000");
        let foundation = catalog::find("foundation").unwrap();
        assert_eq!(cost_range(foundation), "$10,000 - $30,000");
    }

    #[test]
    fn placeholder_until_arv_and_sqft() {
        let mut app = app();
        app.recompute();
        assert!(app.analysis.is_none());

        app.property.estimated_arv = "400000".into();
        app.recompute();
        assert!(app.analysis.is_none());

        app.property.square_footage = "2000".into();
        app.recompute();
        let analysis = app.analysis.as_ref().unwrap();
        assert_eq!(analysis.max_allowable_offer, 244_000.0);
        assert_eq!(analysis.deal_quality, DealQuality::Excellent);

        app.property.square_footage.clear();
        app.recompute();
        assert!(app.analysis.is_none());
    }

    #[test]
    fn toggling_repairs_recomputes() {
        let mut app = app();
        app.property.estimated_arv = "400000".into();
        app.property.square_footage = "2000".into();

        app.toggle_repair("roof-replacement");
        app.toggle_repair("foundation");
        let analysis = app.analysis.clone().unwrap();
        assert_eq!(analysis.total_repair_costs, 28_000.0);
        assert_eq!(analysis.max_allowable_offer, 216_000.0);
        assert_eq!(analysis.total_investment, 280_000.0);

        app.toggle_repair("foundation");
        app.toggle_repair("roof-replacement");
        assert_eq!(app.analysis.as_ref().unwrap().total_repair_costs, 0.0);
        assert!(app.selected.is_empty());
    }

    #[test]
    fn reset_clears_form_and_result() {
        let mut app = app();
        app.property.estimated_arv = "400000".into();
        app.property.square_footage = "2000".into();
        app.toggle_repair("gfci");
        assert!(app.analysis.is_some());

        app.reset();
        assert_eq!(app.property, PropertyInput::default());
        assert!(app.selected.is_empty());
        assert!(app.analysis.is_none());
    }

    #[test]
    fn summary_lists_key_figures() {
        let mut app = app();
        app.property.address = "  42 Elm St ".into();
        app.property.estimated_arv = "400000".into();
        app.property.square_footage = "2000".into();
        app.recompute();

        let summary = summary_text(&app.property, app.analysis.as_ref().unwrap());
        assert!(summary.starts_with("42 Elm St:\nDeal: EXCELLENT DEAL\n"));
        assert!(summary.contains("Max allowable offer: $244,000"));
        assert!(summary.contains("Profit margin: 30.0%"));
        assert!(summary.contains("ARV: $400,000 at 70% target"));
        assert!(summary.contains("Square footage: 2,000 sqft"));
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let mut app = app();
        app.property.estimated_arv = "400000".into();
        app.property.square_footage = "2000".into();
        app.recompute();

        let json = serde_json::to_value(app.analysis.as_ref().unwrap()).unwrap();
        assert_eq!(json["maxAllowableOffer"], 244_000.0);
        assert_eq!(json["dealQuality"], "EXCELLENT");
        assert_eq!(json["hardMoneyInterest"], 24_000.0);
    }
}
