//! One variant per export command: parameter validation, sampling, and naming.

use crate::{
    shapes::{sample_circle, sample_parabola, sample_sphere, Orientation},
    text::{rasterize_text, GlyphError, GlyphProvider},
    VoxelGrid,
};

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

pub const RADIUS_RANGE: RangeInclusive<i32> = 1..=128;
pub const PARABOLA_RANGE: RangeInclusive<i32> = 1..=256;
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 4..=64;

/// Longest text fragment embedded into a filename.
const MAX_FILENAME_TEXT: usize = 32;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("orientation must be \"horizontal\" or \"vertical\", got {0:?}")]
    Orientation(String),
    #[error("text must not be empty")]
    EmptyText,
}

/// A requested structure and its parameters.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Generator {
    Circle {
        radius: i32,
        orientation: Orientation,
    },
    Sphere {
        radius: i32,
    },
    Parabola {
        width: i32,
        height: i32,
    },
    Text {
        font_size: u32,
        text: String,
    },
}

fn check_range<T>(
    name: &'static str,
    value: T,
    range: &RangeInclusive<T>,
) -> Result<(), ValidationError>
where
    T: Copy + Into<i64> + PartialOrd,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            name,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        })
    }
}

impl Generator {
    /// Boundary checks. Everything downstream assumes these passed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Generator::Circle { radius, .. } | Generator::Sphere { radius } => {
                check_range("radius", *radius, &RADIUS_RANGE)
            }
            Generator::Parabola { width, height } => {
                check_range("width", *width, &PARABOLA_RANGE)?;
                check_range("height", *height, &PARABOLA_RANGE)
            }
            Generator::Text { font_size, text } => {
                check_range("fontsize", *font_size, &FONT_SIZE_RANGE)?;
                if text.trim().is_empty() {
                    return Err(ValidationError::EmptyText);
                }

                Ok(())
            }
        }
    }

    /// Samples the shape. Only text can fail, when a glyph can't be produced.
    pub fn generate<P>(&self, glyphs: &P) -> Result<VoxelGrid, GlyphError>
    where
        P: GlyphProvider + ?Sized,
    {
        let grid = match self {
            Generator::Circle {
                radius,
                orientation,
            } => sample_circle(*radius, *orientation),
            Generator::Sphere { radius } => sample_sphere(*radius),
            Generator::Parabola { width, height } => sample_parabola(*width, *height),
            Generator::Text { font_size, text } => rasterize_text(text, *font_size, glyphs)?,
        };

        Ok(grid)
    }

    /// True if `generate` consults the glyph provider.
    pub fn needs_glyphs(&self) -> bool {
        matches!(self, Generator::Text { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Generator::Circle { .. } => "Circle",
            Generator::Sphere { .. } => "Sphere",
            Generator::Parabola { .. } => "Parabola",
            Generator::Text { .. } => "Text",
        }
    }

    pub fn filename(&self) -> String {
        match self {
            Generator::Circle {
                radius,
                orientation,
            } => format!("circle_r{}_{}.nbt", radius, orientation),
            Generator::Sphere { radius } => format!("sphere_r{}.nbt", radius),
            Generator::Parabola { width, height } => {
                format!("parabola_w{}_h{}.nbt", width, height)
            }
            Generator::Text { font_size, text } => {
                format!("text_{}_s{}.nbt", sanitize(text), font_size)
            }
        }
    }

    pub fn success_message(&self, path: &Path) -> String {
        format!("{} saved: {}", self.kind(), path.display())
    }
}

/// Keeps ASCII alphanumerics, maps everything else to `_`, and truncates.
fn sanitize(text: &str) -> String {
    text.trim()
        .chars()
        .take(MAX_FILENAME_TEXT)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::BitmapGlyphs;
    use crate::Point;

    #[test]
    fn test_radius_bounds() {
        assert!(Generator::Sphere { radius: 1 }.validate().is_ok());
        assert!(Generator::Sphere { radius: 128 }.validate().is_ok());
        assert_eq!(
            Generator::Sphere { radius: 129 }.validate(),
            Err(ValidationError::OutOfRange {
                name: "radius",
                value: 129,
                min: 1,
                max: 128,
            })
        );
        assert!(Generator::Circle {
            radius: 0,
            orientation: Orientation::Vertical,
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_parabola_bounds() {
        assert!(Generator::Parabola {
            width: 256,
            height: 1,
        }
        .validate()
        .is_ok());
        assert!(Generator::Parabola {
            width: 10,
            height: 257,
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_text_bounds() {
        let request = |font_size, text: &str| Generator::Text {
            font_size,
            text: text.to_string(),
        };

        assert!(request(4, "hi").validate().is_ok());
        assert!(request(64, "hi").validate().is_ok());
        assert!(request(3, "hi").validate().is_err());
        assert!(request(65, "hi").validate().is_err());
        assert_eq!(
            request(8, "  ").validate(),
            Err(ValidationError::EmptyText)
        );
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            Generator::Circle {
                radius: 5,
                orientation: Orientation::Horizontal,
            }
            .filename(),
            "circle_r5_horizontal.nbt"
        );
        assert_eq!(Generator::Sphere { radius: 9 }.filename(), "sphere_r9.nbt");
        assert_eq!(
            Generator::Parabola {
                width: 30,
                height: 12,
            }
            .filename(),
            "parabola_w30_h12.nbt"
        );
        assert_eq!(
            Generator::Text {
                font_size: 16,
                text: "Hi there/../x".into(),
            }
            .filename(),
            "text_Hi_there____x_s16.nbt"
        );
    }

    #[test]
    fn test_success_message_names_shape_and_path() {
        let msg =
            Generator::Sphere { radius: 2 }.success_message(Path::new("/tmp/sphere_r2.nbt"));

        assert_eq!(msg, "Sphere saved: /tmp/sphere_r2.nbt");
    }

    #[test]
    fn test_unit_horizontal_circle_scenario() {
        let grid = Generator::Circle {
            radius: 1,
            orientation: Orientation::Horizontal,
        }
        .generate(&BitmapGlyphs::default())
        .unwrap();

        assert_eq!(grid.len(), 5);
        assert_eq!(grid.size(), Point::new(3, 1, 3));
        assert!(grid.iter().all(|v| v.y == 0));
    }

    #[test]
    fn test_text_glyph_failure_propagates() {
        let result = Generator::Text {
            font_size: 8,
            text: "a".into(),
        }
        .generate(&BitmapGlyphs::default());

        assert!(matches!(
            result,
            Err(GlyphError::Unsupported { character: 'a' })
        ));
    }

    #[test]
    fn test_kind_and_glyph_need() {
        let gen = Generator::Parabola {
            width: 3,
            height: 4,
        };

        assert_eq!(gen.kind(), "Parabola");
        assert!(!gen.needs_glyphs());
    }

    #[test]
    fn test_requests_deserialize_from_tagged_json() {
        let gen: Generator =
            serde_json::from_str(r#"{"shape": "circle", "radius": 3, "orientation": "vertical"}"#)
                .unwrap();
        assert_eq!(
            gen,
            Generator::Circle {
                radius: 3,
                orientation: Orientation::Vertical
            }
        );

        let gen: Generator =
            serde_json::from_str(r#"{"shape": "text", "font_size": 12, "text": "Hi"}"#).unwrap();
        assert_eq!(
            gen,
            Generator::Text {
                font_size: 12,
                text: "Hi".to_string()
            }
        );

        assert!(serde_json::from_str::<Generator>(r#"{"shape": "cube", "radius": 3}"#).is_err());
        assert!(serde_json::from_str::<Generator>(r#"{"shape": "sphere"}"#).is_err());
    }
}
