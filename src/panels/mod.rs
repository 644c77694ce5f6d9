mod palette;

pub use palette::palette_window;
