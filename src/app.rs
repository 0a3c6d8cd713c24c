//! egui form and result presentation

use crate::artifacts::{self, ArtifactStore};
use crate::config::AppConfig;
use crate::submission::{self, Prediction, SubmissionError};
use crate::types::transaction::{Gender, TransactionInput};
use crate::types::verdict::Verdict;
use eframe::egui::{self, Color32, RichText, Ui};

const COLOR_LEGIT: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);
const COLOR_FRAUD: Color32 = Color32::from_rgb(0xe5, 0x39, 0x35);
const COLOR_ERROR: Color32 = Color32::from_rgb(0xff, 0x8a, 0x65);

/// Renders the transaction form and the outcome of the last submission.
///
/// Two states: idle (form editable, no outcome) and submitted (outcome
/// rendered, form locked until reset). One synchronous prediction per submit.
pub struct DetectorApp {
    config: AppConfig,
    input: TransactionInput,
    /// Artifact cache handle; populated lazily on the first submission.
    store: Option<&'static ArtifactStore>,
    /// `None` while idle; exactly one outcome per submit action.
    outcome: Option<Result<Prediction, SubmissionError>>,
}

impl DetectorApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            input: TransactionInput::default(),
            store: None,
            outcome: None,
        }
    }

    fn submit(&mut self) {
        let store = *self
            .store
            .get_or_insert_with(|| artifacts::shared(&self.config.artifacts));
        self.outcome = Some(submission::handle(&self.input, store));
    }

    fn reset(&mut self) {
        self.input = TransactionInput::default();
        self.outcome = None;
    }

    fn render_form(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Transaction details").strong());
        ui.add_space(4.0);
        ui.columns(3, |columns| {
            columns[0].label("Merchant name");
            columns[0].text_edit_singleline(&mut self.input.merchant);
            columns[1].label("Transaction category");
            columns[1].text_edit_singleline(&mut self.input.category);
            columns[2].label("Transaction amount");
            columns[2].add(
                egui::DragValue::new(&mut self.input.amt)
                    .speed(0.5)
                    .range(0.0..=f64::MAX)
                    .fixed_decimals(2)
                    .prefix("$ "),
            );
        });

        ui.add_space(10.0);
        ui.label(RichText::new("Location details").strong());
        ui.add_space(4.0);
        ui.columns(2, |columns| {
            columns[0].label("Your location");
            coordinate_input(&mut columns[0], "Latitude", &mut self.input.lat);
            coordinate_input(&mut columns[0], "Longitude", &mut self.input.long);
            columns[1].label("Merchant location");
            coordinate_input(&mut columns[1], "Latitude", &mut self.input.merch_lat);
            coordinate_input(&mut columns[1], "Longitude", &mut self.input.merch_long);
        });

        ui.add_space(10.0);
        ui.label(RichText::new("Time & customer details").strong());
        ui.add_space(4.0);
        ui.columns(3, |columns| {
            columns[0].add(egui::Slider::new(&mut self.input.hour, 0..=23).text("Transaction hour"));
            columns[0].add(egui::Slider::new(&mut self.input.day, 1..=31).text("Transaction day"));
            columns[1]
                .add(egui::Slider::new(&mut self.input.month, 1..=12).text("Transaction month"));
            columns[1].horizontal(|ui| {
                egui::ComboBox::from_id_salt("gender_combo")
                    .selected_text(self.input.gender.as_str())
                    .show_ui(ui, |ui| {
                        for gender in Gender::ALL {
                            ui.selectable_value(&mut self.input.gender, gender, gender.as_str());
                        }
                    });
                ui.label("Gender");
            });
            columns[2].label("Credit card number");
            columns[2]
                .text_edit_singleline(&mut self.input.cc_num)
                .on_hover_text("Hashed locally before prediction");
        });
    }

    fn render_actions(&mut self, ui: &mut Ui) {
        let submitted = self.outcome.is_some();
        ui.horizontal(|ui| {
            let check = ui.add_enabled(
                !submitted,
                egui::Button::new(RichText::new("Check for fraud").strong())
                    .min_size(egui::vec2(180.0, 30.0)),
            );
            if check.clicked() {
                self.submit();
            }

            let reset = ui.add_enabled(
                submitted,
                egui::Button::new("Reset form").min_size(egui::vec2(120.0, 30.0)),
            );
            if reset.clicked() {
                self.reset();
            }
        });
    }

    fn render_outcome(&mut self, ui: &mut Ui) {
        let Some(outcome) = &self.outcome else { return };
        ui.add_space(10.0);

        match outcome {
            Ok(prediction) => {
                let (text, color) = match prediction.verdict {
                    Verdict::Fraudulent => ("Prediction: fraudulent transaction", COLOR_FRAUD),
                    Verdict::Legitimate => ("Prediction: legitimate transaction", COLOR_LEGIT),
                };
                ui.label(RichText::new(text).color(color).strong().size(16.0));
                ui.add_space(6.0);
                egui::CollapsingHeader::new("Processed data sent to the model")
                    .default_open(false)
                    .show(ui, |ui| {
                        egui::Grid::new("feature_row_grid")
                            .striped(true)
                            .min_col_width(90.0)
                            .show(ui, |ui| {
                                for (name, value) in prediction.features.display_values() {
                                    ui.label(name);
                                    ui.label(value);
                                    ui.end_row();
                                }
                            });
                    });
            }
            Err(error) => {
                ui.label(RichText::new(error.to_string()).color(COLOR_ERROR));
            }
        }
    }
}

impl eframe::App for DetectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("FinSafe Fraud Detection System");
                ui.label("Enter the transaction details below to check for potential fraud.");

                if let Some(error) = self.store.and_then(|store| store.error()) {
                    ui.add_space(8.0);
                    ui.label(RichText::new(error).color(COLOR_ERROR));
                }

                ui.add_space(12.0);
                let submitted = self.outcome.is_some();
                ui.add_enabled_ui(!submitted, |ui| self.render_form(ui));

                ui.add_space(8.0);
                ui.separator();
                self.render_actions(ui);
                self.render_outcome(ui);
            });
        });
    }
}

fn coordinate_input(ui: &mut Ui, label: &str, value: &mut f64) {
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(value).speed(0.01).fixed_decimals(6));
        ui.label(label);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let app = DetectorApp::new(AppConfig::default());
        assert!(app.outcome.is_none());
        assert!(app.store.is_none());
    }

    #[test]
    fn test_submit_with_empty_form_is_rejected() {
        let mut app = DetectorApp::new(AppConfig::default());
        app.submit();

        match &app.outcome {
            Some(Err(SubmissionError::MissingFields(_))) => {}
            other => panic!("expected MissingFields outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut app = DetectorApp::new(AppConfig::default());
        app.input.merchant = "Acme".to_string();
        app.outcome = Some(Err(SubmissionError::MissingFields(vec!["category"])));

        app.reset();
        assert!(app.outcome.is_none());
        assert!(app.input.merchant.is_empty());
    }
}
