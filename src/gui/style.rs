use eframe::egui::Color32;

pub struct Style;

impl Style {
    pub const FRAME_MARGIN: f32 = 20.;
    pub const CONTROL_PANEL_WIDTH: f32 = 300.;
    pub const TEXT_SIZE: f32 = 16.;
    pub const TEXT_COLOR: Color32 = Color32::BLACK;
    pub const ERROR_COLOR: Color32 = Color32::DARK_RED;
    pub const BUTTON_STROKE_WIDTH: f32 = 3.;
    pub const BUTTON_STROKE_COLOR: Color32 = Color32::DARK_GRAY;
    pub const BUTTON_FILL_COLOR: Color32 = Color32::LIGHT_GRAY;
    pub const START_FILL_COLOR: Color32 = Color32::from_rgb(0x9c, 0xd6, 0x9c);
    pub const STOP_FILL_COLOR: Color32 = Color32::from_rgb(0xe8, 0x9a, 0x9a);

    pub const MAX_GRID_SIDE: usize = 2000;
}
