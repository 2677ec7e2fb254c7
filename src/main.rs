use carprice::application::ml::{InferenceAdapter, ModelLoader};
use carprice::config::Config;
use carprice::infrastructure::observability::{LogStyle, init_tracing};
use carprice::interfaces::design_system::DesignSystem;
use carprice::interfaces::{APP_TITLE, LoadFailureApp, PriceFormApp};
use std::sync::Arc;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Stdout)
    init_tracing(LogStyle::Pretty);

    // 2. Load Config (.env + environment)
    let config = Config::from_env()?;
    info!("Initializing {} {}...", APP_TITLE, env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    // 3. Load the model exactly once; a failure leaves only the error screen
    match ModelLoader::load(&config.model_path) {
        Ok(artifact) => {
            let adapter = InferenceAdapter::new(Arc::new(artifact));
            info!("Model ready. Launching UI.");

            eframe::run_native(
                APP_TITLE,
                native_options,
                Box::new(move |cc| {
                    cc.egui_ctx.set_visuals(DesignSystem::theme());
                    Ok(Box::new(PriceFormApp::new(adapter)))
                }),
            )
            .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;
            Ok(())
        }
        Err(load_error) => {
            error!("Startup halted: {}", load_error);
            let message = load_error.user_message();
            let detail = load_error.to_string();

            eframe::run_native(
                APP_TITLE,
                native_options,
                Box::new(move |cc| {
                    cc.egui_ctx.set_visuals(DesignSystem::theme());
                    Ok(Box::new(LoadFailureApp::new(message, detail)))
                }),
            )
            .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

            Err(anyhow::Error::new(load_error).context("Price model unavailable"))
        }
    }
}
