/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// An RGB colour with components in `0.0..=1.0`, as used by PDF colour operators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const GRAY: Rgb = Rgb::new(0.45, 0.45, 0.45);
    pub const GREEN: Rgb = Rgb::new(0.0, 0.6, 0.0);
    pub const ORANGE: Rgb = Rgb::new(1.0, 0.55, 0.0);
    pub const RED: Rgb = Rgb::new(0.8, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}
