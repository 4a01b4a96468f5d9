//! Scene configuration.
//!
//! A scene file describes one display buffer and an ordered list of shapes to
//! draw into it:
//!
//! ```toml
//! background = "#000000"
//!
//! [display]
//! width = 128
//! height = 64
//! format = "mvlsb"
//!
//! [[shape]]
//! kind = "rectangle"
//! x = 0
//! y = 0
//! width = 128
//! height = 64
//! color = "#FFFFFF"
//! ```

use anyhow::{Context, Result};
use pixel_raster::{draw, Buffer, Color, Format, Image, Point, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Color the buffer is cleared to before any shape is drawn
    #[serde(default = "default_background")]
    pub background: String,

    /// Buffer geometry and encoding
    #[serde(default)]
    pub display: DisplayConfig,

    /// Shapes, drawn in order
    #[serde(default, rename = "shape")]
    pub shapes: Vec<Shape>,
}

/// Display buffer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Width in pixels
    #[serde(default = "default_width")]
    pub width: u16,

    /// Height in pixels
    #[serde(default = "default_height")]
    pub height: u16,

    /// Pixel format selector (e.g. "mvlsb", "mono-hmsb", "rgb565")
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            format: default_format(),
        }
    }
}

impl DisplayConfig {
    /// Parses the format selector.
    pub fn format(&self) -> Result<Format> {
        self.format
            .parse()
            .with_context(|| format!("Invalid display format '{}'", self.format))
    }
}

/// A drawing operation, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Shape {
    Fill {
        color: String,
    },
    Rectangle {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: String,
    },
    FillRectangle {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: String,
    },
    Hline {
        x: i32,
        y: i32,
        width: i32,
        color: String,
    },
    Vline {
        x: i32,
        y: i32,
        height: i32,
        color: String,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: String,
    },
    Circle {
        x: i32,
        y: i32,
        radius: i32,
        color: String,
    },
}

impl Shape {
    fn color(&self) -> &str {
        match self {
            Shape::Fill { color }
            | Shape::Rectangle { color, .. }
            | Shape::FillRectangle { color, .. }
            | Shape::Hline { color, .. }
            | Shape::Vline { color, .. }
            | Shape::Line { color, .. }
            | Shape::Circle { color, .. } => color,
        }
    }

    /// Draws the shape into an image.
    pub fn draw<I: Image + ?Sized>(&self, img: &mut I) -> Result<()> {
        let c: Color = self
            .color()
            .parse()
            .with_context(|| format!("Invalid shape color '{}'", self.color()))?;
        match *self {
            Shape::Fill { .. } => draw::fill(img, c),
            Shape::Rectangle {
                x,
                y,
                width,
                height,
                ..
            } => draw::rectangle(img, Rect::with_size(x, y, width, height), c),
            Shape::FillRectangle {
                x,
                y,
                width,
                height,
                ..
            } => draw::fill_rectangle(img, Rect::with_size(x, y, width, height), c),
            Shape::Hline { x, y, width, .. } => draw::hline(img, Point::new(x, y), width, c),
            Shape::Vline { x, y, height, .. } => draw::vline(img, Point::new(x, y), height, c),
            Shape::Line { x0, y0, x1, y1, .. } => {
                draw::line(img, Point::new(x0, y0), Point::new(x1, y1), c)
            }
            Shape::Circle { x, y, radius, .. } => {
                draw::circle(img, Point::new(x, y), radius, c)
            }
        }
        Ok(())
    }
}

// Default value functions
fn default_background() -> String {
    "#000000".to_string()
}

fn default_width() -> u16 {
    128
}

fn default_height() -> u16 {
    64
}

fn default_format() -> String {
    "mvlsb".to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        content.parse()
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
        Ok(())
    }

    /// Allocates the display buffer, clears it and draws every shape.
    pub fn render(&self) -> Result<Buffer> {
        let format = self.display.format()?;
        let mut buffer = Buffer::new(self.display.width, self.display.height, format);

        let background: Color = self
            .background
            .parse()
            .with_context(|| format!("Invalid background color '{}'", self.background))?;
        draw::fill(&mut buffer, background);

        for (i, shape) in self.shapes.iter().enumerate() {
            debug!("Drawing shape {}: {:?}", i, shape);
            shape
                .draw(&mut buffer)
                .with_context(|| format!("Failed to draw shape {}", i))?;
        }
        Ok(buffer)
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Failed to parse configuration")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background: default_background(),
            display: DisplayConfig::default(),
            shapes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r##"
background = "#000000"

[display]
width = 16
height = 8
format = "rgb565"

[[shape]]
kind = "fill-rectangle"
x = 2
y = 1
width = 3
height = 2
color = "#FF0000"

[[shape]]
kind = "line"
x0 = 0
y0 = 7
x1 = 4
y1 = 7
color = "#FFFFFF"

[[shape]]
kind = "circle"
x = 10
y = 4
radius = 0
color = "#00FF00"
"##;

    #[test]
    fn test_parse_scene() {
        let config: Config = SCENE.parse().unwrap();
        assert_eq!(config.display.width, 16);
        assert_eq!(config.display.format().unwrap(), Format::Rgb565);
        assert_eq!(config.shapes.len(), 3);
        assert_eq!(
            config.shapes[0],
            Shape::FillRectangle {
                x: 2,
                y: 1,
                width: 3,
                height: 2,
                color: "#FF0000".to_string(),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.display.format().unwrap(), Format::Mvlsb);
        assert!(config.shapes.is_empty());

        let config: Config = "[display]\nwidth = 32\n".parse().unwrap();
        assert_eq!(config.display.width, 32);
        assert_eq!(config.display.height, 64);
    }

    #[test]
    fn test_unknown_shape_kind() {
        let err = "[[shape]]\nkind = \"spiral\"\ncolor = \"#FFFFFF\"\n"
            .parse::<Config>()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("spiral"));
    }

    #[test]
    fn test_unknown_format() {
        let config: Config = "[display]\nformat = \"yuv420\"\n".parse().unwrap();
        let err = config.render().unwrap_err();
        assert!(err
            .chain()
            .any(|e| e.downcast_ref::<pixel_raster::Error>()
                == Some(&pixel_raster::Error::InvalidFormat("yuv420".to_string()))));
    }

    #[test]
    fn test_invalid_color() {
        let config: Config = "[[shape]]\nkind = \"fill\"\ncolor = \"red\"\n"
            .parse()
            .unwrap();
        let err = config.render().unwrap_err();
        assert!(format!("{:#}", err).contains("shape 0"));
    }

    #[test]
    fn test_render_scene() {
        let config: Config = SCENE.parse().unwrap();
        let buffer = config.render().unwrap();
        assert_eq!(buffer.format(), Format::Rgb565);
        assert_eq!(buffer.raw().pix.len(), 16 * 8 * 2);

        let red = Color::rgb(0xFF, 0, 0);
        for y in 1..3 {
            for x in 2..5 {
                assert_eq!(buffer.at(x, y), red);
            }
        }
        assert_eq!(buffer.at(5, 1), Color::BLACK);
        assert_eq!(buffer.at(4, 7), Color::WHITE);
        assert_eq!(buffer.at(5, 7), Color::BLACK);
        assert_eq!(buffer.at(10, 4), Color::rgb(0, 0xFF, 0));
    }

    #[test]
    fn test_render_monochrome() {
        let config: Config = r##"
background = "#FFFFFF"

[display]
width = 8
height = 8
format = "bitmap"

[[shape]]
kind = "hline"
x = 0
y = 3
width = 8
color = "#000000"
"##
        .parse()
        .unwrap();
        let buffer = config.render().unwrap();
        assert_eq!(buffer.raw().pix, &[0xF7; 8]);
    }

    #[test]
    fn test_save_and_load() {
        let config: Config = SCENE.parse().unwrap();
        let path =
            std::env::temp_dir().join(format!("pixelctl-config-{}.toml", std::process::id()));
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
