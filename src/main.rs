use timelane::ui::TimelaneApp;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting timelane");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Timelane"),
        ..Default::default()
    };

    eframe::run_native(
        "Timelane",
        options,
        Box::new(|cc| Ok(Box::new(TimelaneApp::new(cc)))),
    )
}
