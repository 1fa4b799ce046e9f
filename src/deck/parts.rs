//! Fixed OOXML parts of a one-slide presentation
//!
//! Everything here is static except the presentation part (slide size). The
//! slide itself is generated in `slide.rs`.

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const ROOT_RELS_PATH: &str = "_rels/.rels";
pub const PRESENTATION_PATH: &str = "ppt/presentation.xml";
pub const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";
pub const MASTER_PATH: &str = "ppt/slideMasters/slideMaster1.xml";
pub const MASTER_RELS_PATH: &str = "ppt/slideMasters/_rels/slideMaster1.xml.rels";
pub const LAYOUT_PATH: &str = "ppt/slideLayouts/slideLayout1.xml";
pub const LAYOUT_RELS_PATH: &str = "ppt/slideLayouts/_rels/slideLayout1.xml.rels";
pub const SLIDE_PATH: &str = "ppt/slides/slide1.xml";
pub const SLIDE_RELS_PATH: &str = "ppt/slides/_rels/slide1.xml.rels";
pub const THEME_PATH: &str = "ppt/theme/theme1.xml";
pub const IMAGE_PATH: &str = "ppt/media/image1.png";
pub const CORE_PROPS_PATH: &str = "docProps/core.xml";
pub const APP_PROPS_PATH: &str = "docProps/app.xml";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// A single relationship entry
pub struct Rel<'a> {
    pub id: &'a str,
    /// Relationship type suffix under the officeDocument namespace
    pub kind: &'a str,
    pub target: &'a str,
}

/// Build a relationships part
pub fn relationships(rels: &[Rel<'_>]) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for rel in rels {
        let kind = if rel.kind.starts_with("http") {
            rel.kind.to_string()
        } else {
            format!("{}/{}", REL_BASE, rel.kind)
        };
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            rel.id, kind, rel.target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

pub fn content_types() -> String {
    let overrides = [
        (PRESENTATION_PATH, "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"),
        (MASTER_PATH, "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"),
        (LAYOUT_PATH, "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"),
        (SLIDE_PATH, "application/vnd.openxmlformats-officedocument.presentationml.slide+xml"),
        (THEME_PATH, "application/vnd.openxmlformats-officedocument.theme+xml"),
        (CORE_PROPS_PATH, "application/vnd.openxmlformats-package.core-properties+xml"),
        (APP_PROPS_PATH, "application/vnd.openxmlformats-officedocument.extended-properties+xml"),
    ];
    let mut xml = String::from(XML_DECL);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Default Extension="png" ContentType="image/png"/>"#);
    for (part, content_type) in overrides {
        xml.push_str(&format!(
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            part, content_type
        ));
    }
    xml.push_str("</Types>");
    xml
}

pub fn root_rels() -> String {
    relationships(&[
        Rel {
            id: "rId1",
            kind: "officeDocument",
            target: PRESENTATION_PATH,
        },
        Rel {
            id: "rId2",
            kind: "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            target: CORE_PROPS_PATH,
        },
        Rel {
            id: "rId3",
            kind: "extended-properties",
            target: APP_PROPS_PATH,
        },
    ])
}

/// Presentation part; slide size in EMU
pub fn presentation(slide_cx: i64, slide_cy: i64) -> String {
    format!(
        concat!(
            "{decl}",
            r#"<p:presentation xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" saveSubsetFonts="1">"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
            r#"<p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst>"#,
            r#"<p:sldSz cx="{cx}" cy="{cy}"/>"#,
            r#"<p:notesSz cx="6858000" cy="9144000"/>"#,
            "</p:presentation>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        cx = slide_cx,
        cy = slide_cy,
    )
}

pub fn presentation_rels() -> String {
    relationships(&[
        Rel {
            id: "rId1",
            kind: "slideMaster",
            target: "slideMasters/slideMaster1.xml",
        },
        Rel {
            id: "rId2",
            kind: "slide",
            target: "slides/slide1.xml",
        },
        Rel {
            id: "rId3",
            kind: "theme",
            target: "theme/theme1.xml",
        },
    ])
}

/// Empty group shape tree shared by master, layout and slide
pub const EMPTY_TREE_HEADER: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
);

pub fn slide_master() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#,
            "<p:spTree>{tree}</p:spTree></p:cSld>",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
            r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" "#,
            r#"hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "</p:sldMaster>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_TREE_HEADER,
    )
}

pub fn slide_master_rels() -> String {
    relationships(&[
        Rel {
            id: "rId1",
            kind: "slideLayout",
            target: "../slideLayouts/slideLayout1.xml",
        },
        Rel {
            id: "rId2",
            kind: "theme",
            target: "../theme/theme1.xml",
        },
    ])
}

/// Blank layout
pub fn slide_layout() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="blank" preserve="1">"#,
            r#"<p:cSld name="Blank"><p:spTree>{tree}</p:spTree></p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sldLayout>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_TREE_HEADER,
    )
}

pub fn slide_layout_rels() -> String {
    relationships(&[Rel {
        id: "rId1",
        kind: "slideMaster",
        target: "../slideMasters/slideMaster1.xml",
    }])
}

pub fn theme() -> String {
    let colors = [
        ("dk1", r#"<a:sysClr val="windowText" lastClr="000000"/>"#),
        ("lt1", r#"<a:sysClr val="window" lastClr="FFFFFF"/>"#),
        ("dk2", r#"<a:srgbClr val="44546A"/>"#),
        ("lt2", r#"<a:srgbClr val="E7E6E6"/>"#),
        ("accent1", r#"<a:srgbClr val="4472C4"/>"#),
        ("accent2", r#"<a:srgbClr val="ED7D31"/>"#),
        ("accent3", r#"<a:srgbClr val="A5A5A5"/>"#),
        ("accent4", r#"<a:srgbClr val="FFC000"/>"#),
        ("accent5", r#"<a:srgbClr val="5B9BD5"/>"#),
        ("accent6", r#"<a:srgbClr val="70AD47"/>"#),
        ("hlink", r#"<a:srgbClr val="0563C1"/>"#),
        ("folHlink", r#"<a:srgbClr val="954F72"/>"#),
    ];
    let scheme: String = colors
        .iter()
        .map(|(name, color)| format!("<a:{name}>{color}</a:{name}>"))
        .collect();

    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = |w: u32| {
        format!(
            r#"<a:ln w="{w}" cap="flat" cmpd="sng" algn="ctr">{solid}<a:prstDash val="solid"/></a:ln>"#
        )
    };
    let fmt_scheme = format!(
        concat!(
            r#"<a:fmtScheme name="Office">"#,
            "<a:fillStyleLst>{s}{s}{s}</a:fillStyleLst>",
            "<a:lnStyleLst>{l1}{l2}{l3}</a:lnStyleLst>",
            "<a:effectStyleLst>",
            "<a:effectStyle><a:effectLst/></a:effectStyle>",
            "<a:effectStyle><a:effectLst/></a:effectStyle>",
            "<a:effectStyle><a:effectLst/></a:effectStyle>",
            "</a:effectStyleLst>",
            "<a:bgFillStyleLst>{s}{s}{s}</a:bgFillStyleLst>",
            "</a:fmtScheme>"
        ),
        s = solid,
        l1 = line(6350),
        l2 = line(12700),
        l3 = line(19050),
    );

    format!(
        concat!(
            "{decl}",
            r#"<a:theme xmlns:a="{a}" name="Office Theme"><a:themeElements>"#,
            r#"<a:clrScheme name="Office">{scheme}</a:clrScheme>"#,
            r#"<a:fontScheme name="Office">"#,
            r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            "{fmt}",
            "</a:themeElements></a:theme>"
        ),
        decl = XML_DECL,
        a = NS_A,
        scheme = scheme,
        fmt = fmt_scheme,
    )
}

pub fn core_props(title: &str) -> String {
    format!(
        concat!(
            "{decl}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
            "<dc:title>{title}</dc:title>",
            "</cp:coreProperties>"
        ),
        decl = XML_DECL,
        title = xml_escape(title),
    )
}

pub fn app_props() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            "<Application>risk_matrix</Application><Slides>1</Slides>",
            "</Properties>"
        ),
        decl = XML_DECL,
    )
}

/// Escape text for use in XML content and attribute values
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
