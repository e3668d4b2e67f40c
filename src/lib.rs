pub mod board;
pub mod camera;
pub mod life;
pub mod pattern;
pub mod state;

pub mod prelude {
    use bevy::{color::Color, math::Vec2};

    pub const BG_COLOR: Color = Color::srgb(0.0, 0.05, 0.1);

    pub const BOARD_SIZE: u32 = 80;
    pub const BOARD_POS: Vec2 = Vec2::ZERO;
    pub const BORDER_WIDTH_PX: f32 = 4.0;
    pub const BORDER_COLOR: Color = Color::srgb(0.4, 0.4, 0.4);

    pub const CELL_SIZE_PX: Vec2 = Vec2::splat(10.0);
    pub const CELL_ALIVE_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);
    pub const PREVIEW_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

    /// Generation rate bounds in steps per second.
    pub const RATE_MIN: u32 = 1;
    pub const RATE_MAX: u32 = 60;
    pub const RATE_DEFAULT: u32 = 5;
}
