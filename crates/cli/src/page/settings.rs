use liftrank_app::Settings;

pub fn view(settings: &Settings) -> String {
    [
        format!("Unit: {}", settings.unit),
        format!("Theme: {}", settings.theme),
        format!("Chart width: {}", settings.chart_width),
    ]
    .join("\n")
}
