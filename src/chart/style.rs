//! Palette and font sizes shared by both renderers.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GREY10: Rgb = Rgb(0x1a, 0x1a, 0x1a);
pub const GREY30: Rgb = Rgb(0x4d, 0x4d, 0x4d);
pub const GRAY: Rgb = Rgb(0x80, 0x80, 0x80);
pub const SEASHELL: Rgb = Rgb(0xff, 0xf5, 0xee);

pub const GIRLS: Rgb = Rgb(0x98, 0x4e, 0xa3);
pub const BOYS: Rgb = Rgb(0x37, 0x7e, 0xb8);
pub const ALL: Rgb = Rgb(0x2b, 0x2b, 0x2b);
pub const ALERT_RED: Rgb = Rgb(0xe4, 0x1a, 0x1c);

pub const TITLE_PT: f32 = 15.0;
pub const SUBTITLE_PT: f32 = 9.0;
pub const ANNOTATION_PT: f32 = 9.0;
pub const END_LABEL_PT: f32 = 10.0;
pub const AXIS_LABEL_PT: f32 = 10.0;
pub const TICK_PT: f32 = 10.0;

/// Colour of a plotted series. The `" %"` suffix of share columns is ignored.
pub fn series_color(name: &str) -> Rgb {
    match name.replace(" %", "").as_str() {
        "Girls" | "FEMALE TOTAL" => GIRLS,
        "Boys" | "MALE TOTAL" => BOYS,
        "All" | "ALL TOTAL" => ALL,
        _ => GREY30,
    }
}
