//! Single-page prediction form.
//!
//! The sidebar edits a [`CarFeatureRecord`]; the central panel shows the
//! record and, after "Predict Price", the result of the last request. A
//! result is dropped as soon as the form no longer matches the record it
//! was computed for.

use crate::application::ml::{InferenceAdapter, ModelArtifact};
use crate::domain::car::{
    BodyStyle, CarFeatureRecord, Doors, ENGINE_SIZE_STEP, FuelType, MAX_ENGINE_SIZE,
    MAX_MILEAGE, MAX_YEAR, MIN_ENGINE_SIZE, MIN_YEAR, Make, Transmission, snap_engine_size,
};
use crate::domain::pricing::{ADVISORY_NOTE, FOOTER_NOTE, PredictionResult, RETRY_HINT};
use crate::domain::validation::{InputGate, VALIDATION_MESSAGE};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use std::fmt::Display;
use tracing::{error, info};

pub const APP_TITLE: &str = "Car Price Predictor";

enum FormOutcome {
    Price(PredictionResult),
    Failed(String),
}

pub struct PriceFormApp {
    adapter: InferenceAdapter<ModelArtifact>,
    form: CarFeatureRecord,
    last: Option<(CarFeatureRecord, FormOutcome)>,
}

impl PriceFormApp {
    pub fn new(adapter: InferenceAdapter<ModelArtifact>) -> Self {
        Self {
            adapter,
            form: CarFeatureRecord::default(),
            last: None,
        }
    }

    fn run_prediction(&mut self) {
        let record = self.form.clone();
        let outcome = match self.adapter.predict(&record) {
            Ok(result) => {
                info!("Predicted {} for {} {}", result, record.make, record.year);
                FormOutcome::Price(result)
            }
            Err(e) => {
                error!("Prediction failed: {}", e);
                FormOutcome::Failed(e.to_string())
            }
        };
        self.last = Some((record, outcome));
    }

    fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Car Details");
        ui.separator();
        ui.add_space(DesignSystem::SPACING_SMALL);

        let form = &mut self.form;
        ui.add(egui::Slider::new(&mut form.year, MIN_YEAR..=MAX_YEAR).text("Year"));

        ui.horizontal(|ui| {
            ui.label("Mileage (miles)");
            ui.add(
                egui::DragValue::new(&mut form.mileage)
                    .range(0..=MAX_MILEAGE)
                    .speed(100.0),
            );
        });

        choice(ui, "Make", &mut form.make, Make::ALL);
        choice(ui, "Fuel Type", &mut form.fuel_type, FuelType::ALL);
        choice(ui, "Transmission", &mut form.transmission, Transmission::ALL);

        ui.add(
            egui::Slider::new(&mut form.engine_size, MIN_ENGINE_SIZE..=MAX_ENGINE_SIZE)
                .step_by(ENGINE_SIZE_STEP)
                .fixed_decimals(1)
                .text("Engine Size (L)"),
        );
        form.engine_size = snap_engine_size(form.engine_size);

        choice(ui, "Body Style", &mut form.body_style, BodyStyle::ALL);
        choice(ui, "Number of Doors", &mut form.doors, Doors::ALL);
    }

    fn render_inputs(&self, ui: &mut egui::Ui) {
        ui.heading("Input Features");
        DesignSystem::card_frame().show(ui, |ui| {
            egui::Grid::new("input_features_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for (label, value) in self.form.display_rows() {
                        ui.label(egui::RichText::new(label).color(DesignSystem::TEXT_SECONDARY));
                        ui.label(egui::RichText::new(value).strong());
                        ui.end_row();
                    }
                });
        });
    }

    fn render_results(&self, ui: &mut egui::Ui) {
        let Some((_, outcome)) = &self.last else {
            return;
        };

        ui.heading("Prediction Results");
        match outcome {
            FormOutcome::Price(result) => {
                DesignSystem::status_box(
                    ui,
                    DesignSystem::SUCCESS,
                    format!("Predicted Car Price: {}", result),
                );
                ui.add_space(DesignSystem::SPACING_SMALL);
                DesignSystem::status_box(ui, DesignSystem::INFO, ADVISORY_NOTE);
            }
            FormOutcome::Failed(message) => {
                DesignSystem::status_box(
                    ui,
                    DesignSystem::DANGER,
                    format!("An error occurred during prediction: {}", message),
                );
                ui.label(RETRY_HINT);
            }
        }
    }
}

/// Drop-down over a closed set of values.
fn choice<T: Copy + PartialEq + Display>(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut T,
    options: &[T],
) {
    egui::ComboBox::from_label(label)
        .selected_text(value.to_string())
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, *option, option.to_string());
            }
        });
}

impl eframe::App for PriceFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self
            .last
            .as_ref()
            .is_some_and(|(record, _)| *record != self.form)
        {
            self.last = None;
        }

        egui::TopBottomPanel::top("title_panel").show(ctx, |ui| {
            ui.heading("🚗 Car Price Prediction App");
            ui.label(
                "This application predicts car prices based on various features. \
                 Please input the car details in the sidebar.",
            );
        });

        egui::TopBottomPanel::bottom("footer_panel").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(FOOTER_NOTE)
                        .small()
                        .color(DesignSystem::TEXT_MUTED),
                );
            });
        });

        egui::SidePanel::left("car_details_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| self.render_sidebar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.render_inputs(&mut columns[0]);
                self.render_results(&mut columns[1]);
            });

            ui.add_space(DesignSystem::SPACING_MEDIUM);

            if InputGate::is_valid(&self.form) {
                let button = egui::Button::new(
                    egui::RichText::new("Predict Price")
                        .strong()
                        .color(DesignSystem::TEXT_PRIMARY),
                )
                .fill(DesignSystem::ACCENT_PRIMARY);
                if ui.add(button).clicked() {
                    self.run_prediction();
                }
            } else {
                DesignSystem::status_box(ui, DesignSystem::WARNING, VALIDATION_MESSAGE);
            }
        });
    }
}

/// Blocking screen shown when the model could not be loaded. No form is
/// reachable from here.
pub struct LoadFailureApp {
    message: String,
    detail: String,
}

impl LoadFailureApp {
    pub fn new(message: String, detail: String) -> Self {
        Self { message, detail }
    }
}

impl eframe::App for LoadFailureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🚗 Car Price Prediction App");
            ui.add_space(DesignSystem::SPACING_MEDIUM);
            DesignSystem::status_box(ui, DesignSystem::DANGER, self.message.as_str());
            ui.add_space(DesignSystem::SPACING_SMALL);
            ui.label(
                egui::RichText::new(self.detail.as_str())
                    .small()
                    .color(DesignSystem::TEXT_MUTED),
            );
        });
    }
}
