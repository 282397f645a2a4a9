pub const WINDOW_TITLE: &str = "Wall Display";
pub const WINDOWED_WIDTH: i32 = 1024;          // Window size when not fullscreen
pub const WINDOWED_HEIGHT: i32 = 768;

pub const MENU_FILE_NAME: &str = "menu.data";
pub const DEFAULT_MENU_DIR: &str = "menu-data";
pub const DEFAULT_CONFIG_FILE: &str = "wall-display.toml";

pub const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

pub const MENU_FONT_SIZE: i32 = 20;
pub const MENU_LEFT_MARGIN: i32 = 10;
pub const MENU_ROW_HEIGHT: f32 = 60.0;         // Font height plus vertical padding
pub const MENU_SCROLL_RATE: f32 = 8.0;         // Fraction of the scroll gap closed per second
pub const PAUSED_LABEL: &str = "Paused";       // Drawn at the bottom of the sidebar

pub const SPINNER_RADIUS: f32 = 28.0;
pub const SPINNER_THICKNESS: f32 = 6.0;
pub const SPINNER_ARC: f32 = 270.0;            // Degrees
pub const SPINNER_SPEED: f32 = 360.0;          // Degrees per second
pub const LABEL_FONT_SIZE: i32 = 24;
