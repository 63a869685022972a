//! Typed style transformations and their token grammar.
//!
//! A [`Transformation`] describes *what* to do to an image. It knows how to
//! validate its arguments, how it changes declared [`Dimensions`], and how it
//! renders as a style token. The [`StyleEncoder`](super::StyleEncoder) folds a
//! sequence of them left to right.
//!
//! ## Token grammar
//!
//! | Transformation | Token |
//! |---|---|
//! | Crop | `_CR{x},{y},{w},{h}` |
//! | Auto-crop | `_AC` |
//! | Blur | `_BL{percent}` |
//! | Scale to rectangle | `_SR{w},{h}` |
//! | Scale to square | `_SS{side}` |
//! | Scale to width / height / longest | `_SX{w}` / `_SY{h}` / `_SL{side}` |
//! | Upscale to height / width / longest | `_UY{h}` / `_UX{w}` / `_UL{side}` |
//! | Custom | verbatim |
//!
//! Tokens are concatenated with no separator: `_AC_SL500_BL10`.

use super::calculations::{self, Dimensions};
use super::error::StyleError;
use std::fmt;
use std::str::FromStr;

/// One style step. Arguments are kept exactly as the caller passed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
    Crop {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    AutoCrop,
    Blur(i32),
    ScaleToRectangle {
        width: i32,
        height: i32,
    },
    ScaleToSquare(i32),
    ScaleToWidth(i32),
    ScaleToHeight(i32),
    ScaleToLongest(i32),
    UpscaleToHeight(i32),
    UpscaleToWidth(i32),
    UpscaleToLongest(i32),
    /// Raw token appended as-is. Not validated and does not touch dimensions.
    Custom(String),
}

/// Groups of transformations where only the last call shapes the rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Crop,
    AutoCrop,
    Blur,
    Scale,
    Custom,
}

fn positive(parameter: &'static str, value: i32) -> Result<(), StyleError> {
    if value <= 0 {
        return Err(StyleError::invalid(
            parameter,
            format!("cannot scale image to 0 pixels or less, got: {value}"),
        ));
    }
    Ok(())
}

impl Transformation {
    /// Two-letter token prefix, `None` for custom tokens.
    pub fn prefix(&self) -> Option<&'static str> {
        Some(match self {
            Self::Crop { .. } => "CR",
            Self::AutoCrop => "AC",
            Self::Blur(_) => "BL",
            Self::ScaleToRectangle { .. } => "SR",
            Self::ScaleToSquare(_) => "SS",
            Self::ScaleToWidth(_) => "SX",
            Self::ScaleToHeight(_) => "SY",
            Self::ScaleToLongest(_) => "SL",
            Self::UpscaleToHeight(_) => "UY",
            Self::UpscaleToWidth(_) => "UX",
            Self::UpscaleToLongest(_) => "UL",
            Self::Custom(_) => return None,
        })
    }

    /// Operation name, as used by the encoder method that produces it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Crop { .. } => "crop",
            Self::AutoCrop => "auto_crop",
            Self::Blur(_) => "blur",
            Self::ScaleToRectangle { .. } => "scale_to_rectangle",
            Self::ScaleToSquare(_) => "scale_to_square",
            Self::ScaleToWidth(_) => "scale_to_width",
            Self::ScaleToHeight(_) => "scale_to_height",
            Self::ScaleToLongest(_) => "scale_to_longest",
            Self::UpscaleToHeight(_) => "upscale_to_height",
            Self::UpscaleToWidth(_) => "upscale_to_width",
            Self::UpscaleToLongest(_) => "upscale_to_longest",
            Self::Custom(_) => "custom_style",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Crop { .. } => Category::Crop,
            Self::AutoCrop => Category::AutoCrop,
            Self::Blur(_) => Category::Blur,
            Self::Custom(_) => Category::Custom,
            _ => Category::Scale,
        }
    }

    /// Check arguments. Errors name the offending parameter.
    pub fn validate(&self) -> Result<(), StyleError> {
        match *self {
            Self::Crop {
                x,
                y,
                width,
                height,
            } => {
                if x < 0 || y < 0 {
                    let parameter = if x < 0 { "x" } else { "y" };
                    return Err(StyleError::invalid(
                        parameter,
                        "x,y coordinate of the top left corner must be >= 0",
                    ));
                }
                if width <= 0 || height <= 0 {
                    let parameter = if width <= 0 { "width" } else { "height" };
                    return Err(StyleError::invalid(
                        parameter,
                        "width and height of cropped area must be > 0",
                    ));
                }
                Ok(())
            }
            Self::Blur(percent) => {
                if !(1..=99).contains(&percent) {
                    return Err(StyleError::invalid(
                        "percent",
                        format!("blur percent must be in the range [1-99], got: {percent}"),
                    ));
                }
                Ok(())
            }
            Self::ScaleToRectangle { width, height } => {
                positive("width", width)?;
                positive("height", height)
            }
            Self::ScaleToSquare(side)
            | Self::ScaleToLongest(side)
            | Self::UpscaleToLongest(side) => positive("side", side),
            Self::ScaleToWidth(width) | Self::UpscaleToWidth(width) => positive("width", width),
            Self::ScaleToHeight(height) | Self::UpscaleToHeight(height) => {
                positive("height", height)
            }
            Self::AutoCrop | Self::Custom(_) => Ok(()),
        }
    }

    /// Declared dimensions after this step. Assumes [`validate`](Self::validate) passed.
    pub fn resize(&self, dims: Dimensions) -> Dimensions {
        match *self {
            Self::Crop {
                x,
                y,
                width,
                height,
            } => calculations::crop(dims, x, y, width, height),
            Self::ScaleToRectangle { width, height } => Dimensions::new(width, height),
            Self::ScaleToSquare(side) => Dimensions::new(side, side),
            Self::ScaleToWidth(width) => calculations::scale_to_width(dims, width),
            Self::ScaleToHeight(height) => calculations::scale_to_height(dims, height),
            Self::ScaleToLongest(side) => calculations::scale_to_longest(dims, side),
            Self::UpscaleToHeight(height) => calculations::upscale_to_height(dims, height),
            Self::UpscaleToWidth(width) => calculations::upscale_to_width(dims, width),
            Self::UpscaleToLongest(side) => calculations::upscale_to_longest(dims, side),
            Self::AutoCrop | Self::Blur(_) | Self::Custom(_) => dims,
        }
    }

    /// Parse one underscore-less segment such as `SL500`.
    ///
    /// The typed token is the prefix plus the longest run of argument
    /// characters after it; whatever follows is returned as trailing text so
    /// a custom token written without an underscore survives. `None` if the
    /// segment does not start with a typed token.
    fn parse_segment(segment: &str) -> Option<(Self, &str)> {
        let prefix = segment.get(..2)?;
        let rest = &segment[2..];
        let end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '-'))
            .unwrap_or(rest.len());
        let (args, trailing) = rest.split_at(end);
        let numbers = || -> Option<Vec<i32>> { args.split(',').map(canonical_int).collect() };
        let single = || match numbers()?.as_slice() {
            [n] => Some(*n),
            _ => None,
        };
        let transformation = match prefix {
            "AC" if args.is_empty() => Self::AutoCrop,
            "CR" => match numbers()?.as_slice() {
                [x, y, width, height] => Self::Crop {
                    x: *x,
                    y: *y,
                    width: *width,
                    height: *height,
                },
                _ => return None,
            },
            "SR" => match numbers()?.as_slice() {
                [width, height] => Self::ScaleToRectangle {
                    width: *width,
                    height: *height,
                },
                _ => return None,
            },
            "BL" => Self::Blur(single()?),
            "SS" => Self::ScaleToSquare(single()?),
            "SX" => Self::ScaleToWidth(single()?),
            "SY" => Self::ScaleToHeight(single()?),
            "SL" => Self::ScaleToLongest(single()?),
            "UY" => Self::UpscaleToHeight(single()?),
            "UX" => Self::UpscaleToWidth(single()?),
            "UL" => Self::UpscaleToLongest(single()?),
            _ => return None,
        };
        Some((transformation, trailing))
    }
}

/// An integer argument exactly as `Display` would write it: optional `-`,
/// ASCII digits, no leading zeros. Anything else would not render back
/// byte for byte.
fn canonical_int(text: &str) -> Option<i32> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: i32 = text.parse().ok()?;
    (n.to_string() == text).then_some(n)
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Custom(raw) = self {
            return f.write_str(raw);
        }
        write!(f, "_{}", self.prefix().unwrap_or_default())?;
        match self {
            Self::Crop {
                x,
                y,
                width,
                height,
            } => write!(f, "{x},{y},{width},{height}"),
            Self::ScaleToRectangle { width, height } => write!(f, "{width},{height}"),
            Self::Blur(n)
            | Self::ScaleToSquare(n)
            | Self::ScaleToWidth(n)
            | Self::ScaleToHeight(n)
            | Self::ScaleToLongest(n)
            | Self::UpscaleToHeight(n)
            | Self::UpscaleToWidth(n)
            | Self::UpscaleToLongest(n) => write!(f, "{n}"),
            Self::AutoCrop | Self::Custom(_) => Ok(()),
        }
    }
}

/// Ordered, append-only log of transformations applied to one media object.
///
/// `Display` renders the URL style segment; `FromStr` reads one back.
/// Segments that are not typed tokens come back as [`Transformation::Custom`],
/// so `parse(render(r))` always renders to the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendering(Vec<Transformation>);

impl Rendering {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, transformation: Transformation) {
        self.0.push(transformation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transformation> {
        self.0.iter()
    }

    /// Operation names in call order.
    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(Transformation::name).collect()
    }

    /// The last transformation of each category, in call order.
    ///
    /// `scale_to_rectangle(50, 50)` followed by `scale_to_height(100)` only
    /// keeps the height scale. Custom tokens are all kept.
    pub fn effective(&self) -> Vec<&Transformation> {
        self.0
            .iter()
            .enumerate()
            .filter(|(i, t)| {
                t.category() == Category::Custom
                    || !self.0[i + 1..]
                        .iter()
                        .any(|later| later.category() == t.category())
            })
            .map(|(_, t)| t)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Rendering {
    type Item = &'a Transformation;
    type IntoIter = std::slice::Iter<'a, Transformation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|t| write!(f, "{t}"))
    }
}

impl FromStr for Rendering {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.split('_');
        let mut rendering = Rendering::new();
        // Text before the first underscore can only be a custom token.
        match segments.next() {
            Some(head) if !head.is_empty() => {
                rendering.push(Transformation::Custom(head.to_string()));
            }
            _ => {}
        }
        for segment in segments {
            match Transformation::parse_segment(segment) {
                Some((transformation, trailing)) => {
                    rendering.push(transformation);
                    if !trailing.is_empty() {
                        rendering.push(Transformation::Custom(trailing.to_string()));
                    }
                }
                None => rendering.push(Transformation::Custom(format!("_{segment}"))),
            }
        }
        Ok(rendering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Rendering {
        s.parse().unwrap()
    }

    // =========================================================================
    // Token rendering
    // =========================================================================

    #[test]
    fn renders_every_prefix() {
        let cases = [
            (
                Transformation::Crop {
                    x: 0,
                    y: 5,
                    width: 100,
                    height: 50,
                },
                "_CR0,5,100,50",
            ),
            (Transformation::AutoCrop, "_AC"),
            (Transformation::Blur(10), "_BL10"),
            (
                Transformation::ScaleToRectangle {
                    width: 300,
                    height: 200,
                },
                "_SR300,200",
            ),
            (Transformation::ScaleToSquare(75), "_SS75"),
            (Transformation::ScaleToWidth(500), "_SX500"),
            (Transformation::ScaleToHeight(400), "_SY400"),
            (Transformation::ScaleToLongest(120), "_SL120"),
            (Transformation::UpscaleToHeight(900), "_UY900"),
            (Transformation::UpscaleToWidth(800), "_UX800"),
            (Transformation::UpscaleToLongest(1500), "_UL1500"),
            (Transformation::Custom("_QL70".into()), "_QL70"),
        ];
        for (transformation, expected) in cases {
            assert_eq!(transformation.to_string(), expected);
        }
    }

    #[test]
    fn empty_rendering_is_empty_string() {
        assert_eq!(Rendering::new().to_string(), "");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn crop_rejects_negative_anchor() {
        let err = Transformation::Crop {
            x: 0,
            y: -1,
            width: 10,
            height: 10,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.parameter(), "y");
    }

    #[test]
    fn crop_rejects_empty_area() {
        let err = Transformation::Crop {
            x: 0,
            y: 0,
            width: 0,
            height: 10,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.parameter(), "width");
    }

    #[test]
    fn blur_accepts_only_1_to_99() {
        assert!(Transformation::Blur(1).validate().is_ok());
        assert!(Transformation::Blur(99).validate().is_ok());
        assert!(Transformation::Blur(0).validate().is_err());
        assert!(Transformation::Blur(100).validate().is_err());
    }

    #[test]
    fn custom_is_never_validated() {
        assert!(Transformation::Custom(String::new()).validate().is_ok());
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn parse_recovers_call_order() {
        let rendering = parse("_AC_CR1,2,3,4_SL500_BL10_UX9");
        assert_eq!(
            rendering.names(),
            vec!["auto_crop", "crop", "scale_to_longest", "blur", "upscale_to_width"]
        );
    }

    #[test]
    fn parse_keeps_unknown_segments_as_custom() {
        let rendering = parse("_QL70_SL5");
        assert_eq!(
            rendering.iter().collect::<Vec<_>>(),
            vec![
                &Transformation::Custom("_QL70".into()),
                &Transformation::ScaleToLongest(5)
            ]
        );
    }

    #[test]
    fn parse_keeps_leading_text_as_custom() {
        let rendering = parse("raw_SX10");
        assert_eq!(rendering.names(), vec!["custom_style", "scale_to_width"]);
        assert_eq!(rendering.to_string(), "raw_SX10");
    }

    #[test]
    fn parse_splits_custom_text_glued_to_a_token() {
        let rendering = parse("_SL100QL70_BL5");
        assert_eq!(
            rendering.iter().collect::<Vec<_>>(),
            vec![
                &Transformation::ScaleToLongest(100),
                &Transformation::Custom("QL70".into()),
                &Transformation::Blur(5),
            ]
        );
        assert_eq!(rendering.to_string(), "_SL100QL70_BL5");
    }

    #[test]
    fn parse_rejects_non_canonical_numbers() {
        for s in ["_SL0500", "_BL+5", "_SX-0", "_SL99999999999", "_SR10,", "_CR1,,2,3"] {
            let rendering = parse(s);
            assert_eq!(rendering.names(), vec!["custom_style"], "{s}");
            assert_eq!(rendering.to_string(), s);
        }
    }

    #[test]
    fn parse_then_render_is_identity() {
        for s in [
            "",
            "_AC",
            "_SR10,20_SS5",
            "_CR1,2,3_SL4",
            "x_y__z",
            "_BLx",
            "_SL0500_BL+5",
            "_ACQL70_SX-3",
        ] {
            assert_eq!(parse(s).to_string(), s);
        }
    }

    // =========================================================================
    // Effective rendering
    // =========================================================================

    #[test]
    fn effective_keeps_last_of_each_category() {
        let rendering = parse("_SR50,50_CR1,1,1,1_SX1000_CR5,5,5,5_SY100");
        let effective: Vec<String> = rendering
            .effective()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(effective, vec!["_CR5,5,5,5", "_SY100"]);
    }

    #[test]
    fn effective_keeps_every_custom_token() {
        let rendering = parse("_QL70_QL80");
        assert_eq!(rendering.effective().len(), 2);
    }
}
