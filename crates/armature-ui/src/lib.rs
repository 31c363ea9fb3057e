use armature_core::{ArmatureConfig, ProjectCatalog};
use armature_platform::Result;
use tracing::info;

mod app;
pub mod canvas;
pub mod host;
pub mod page;

pub use app::ArmatureApp;

pub struct LaunchOptions {
    pub config: ArmatureConfig,
    /// Deep-link fragment, with or without the leading `#`.
    pub fragment: Option<String>,
}

/// Opens the portfolio window and blocks until it closes.
pub fn run_app(options: LaunchOptions) -> Result<()> {
    let catalog = ProjectCatalog::builtin()?;
    info!(projects = catalog.len(), "project catalog loaded");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 900.0])
            .with_title("Armature"),
        ..Default::default()
    };
    let LaunchOptions { config, fragment } = options;
    eframe::run_native(
        "Armature",
        native_options,
        Box::new(move |_creation_context| {
            Ok(Box::new(ArmatureApp::new(config, catalog, fragment.as_deref())))
        }),
    )
    .map_err(|err| format!("eframe failed to start: {err}"))?;
    Ok(())
}
