use eframe::egui;
use zukan::{
    gui::ZukanApp,
    persistence::load_json_or_default,
    settings::{
        SettingsData,
        SETTINGS_FILE,
    },
    telemetry::init_telemetry,
};

fn main() -> eframe::Result {
    init_telemetry();

    let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE);
    if let Err(e) = settings.creature.id_range() {
        tracing::warn!(error = %e, "creature id range is invalid, random picks will fail");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Zukan")
            .with_inner_size([560.0, 860.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Zukan",
        options,
        Box::new(|cc| Ok(Box::new(ZukanApp::new(cc, settings)?))),
    )
}
