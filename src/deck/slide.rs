//! Picture slide and its placement in EMU

use super::parts::{xml_escape, EMPTY_TREE_HEADER, NS_A, NS_P, NS_R};
use crate::matrix::{MatrixError, Result};

/// English Metric Units per inch
pub const EMU_PER_INCH: f64 = 914_400.0;

pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Where the picture goes on the slide, in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlidePlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub slide_width: f64,
    pub slide_height: f64,
}

impl Default for SlidePlacement {
    fn default() -> Self {
        Self {
            left: 4.0,
            top: 1.0,
            width: 6.0,
            height: 5.0,
            slide_width: 10.0,
            slide_height: 7.5,
        }
    }
}

impl SlidePlacement {
    /// Sizes must be positive and offsets non-negative. A picture running past
    /// the slide edge is allowed (the default placement does exactly that).
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("left", self.left),
            ("top", self.top),
            ("width", self.width),
            ("height", self.height),
            ("slide width", self.slide_width),
            ("slide height", self.slide_height),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(MatrixError::Config(format!("deck {} is not finite", name)));
            }
        }
        if self.left < 0.0 || self.top < 0.0 {
            return Err(MatrixError::Config(format!(
                "deck image offset ({}, {}) must be non-negative",
                self.left, self.top
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(MatrixError::Config(format!(
                "deck image size {}x{} must be positive",
                self.width, self.height
            )));
        }
        if self.slide_width <= 0.0 || self.slide_height <= 0.0 {
            return Err(MatrixError::Config(format!(
                "slide size {}x{} must be positive",
                self.slide_width, self.slide_height
            )));
        }
        Ok(())
    }

    pub fn slide_size_emu(&self) -> (i64, i64) {
        (inches_to_emu(self.slide_width), inches_to_emu(self.slide_height))
    }

    /// (x, y, cx, cy) of the picture
    pub fn picture_emu(&self) -> (i64, i64, i64, i64) {
        (
            inches_to_emu(self.left),
            inches_to_emu(self.top),
            inches_to_emu(self.width),
            inches_to_emu(self.height),
        )
    }
}

/// Slide holding a single stretched picture that references `rId2`
pub fn picture_slide(placement: &SlidePlacement, description: &str) -> String {
    let (x, y, cx, cy) = placement.picture_emu();
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<p:sld xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            "<p:cSld><p:spTree>{tree}",
            "<p:pic>",
            r#"<p:nvPicPr><p:cNvPr id="2" name="Picture 1" descr="{descr}"/>"#,
            r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
            r#"<p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
            "</p:pic>",
            "</p:spTree></p:cSld>",
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sld>"
        ),
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_TREE_HEADER,
        descr = xml_escape(description),
        x = x,
        y = y,
        cx = cx,
        cy = cy,
    )
}

pub fn picture_slide_rels() -> String {
    use super::parts::{relationships, Rel};
    relationships(&[
        Rel {
            id: "rId1",
            kind: "slideLayout",
            target: "../slideLayouts/slideLayout1.xml",
        },
        Rel {
            id: "rId2",
            kind: "image",
            target: "../media/image1.png",
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_placement_in_emu() {
        let p = SlidePlacement::default();
        assert_eq!(p.picture_emu(), (3_657_600, 914_400, 5_486_400, 4_572_000));
        assert_eq!(p.slide_size_emu(), (9_144_000, 6_858_000));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let p = SlidePlacement {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(MatrixError::Config(_))));

        let p = SlidePlacement {
            left: -1.0,
            ..Default::default()
        };
        assert!(p.validate().is_err());

        let p = SlidePlacement {
            slide_height: f64::NAN,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_picture_slide_contents() {
        let xml = picture_slide(&SlidePlacement::default(), "risk & matrix.png");
        assert!(xml.contains(r#"<a:off x="3657600" y="914400"/>"#));
        assert!(xml.contains(r#"<a:ext cx="5486400" cy="4572000"/>"#));
        assert!(xml.contains(r#"descr="risk &amp; matrix.png""#));
        assert!(xml.contains(r#"r:embed="rId2""#));
    }

    #[test]
    fn test_slide_rels_point_at_media() {
        let xml = picture_slide_rels();
        assert!(xml.contains(r#"Target="../media/image1.png""#));
        assert!(xml.contains("relationships/slideLayout"));
    }
}
