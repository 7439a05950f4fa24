//! PPTX generation from resolved slides.
//!
//! Slides are rendered to XML as they are placed, so problems such as a
//! missing image surface at the slide that caused them. [`PptxWriter::generate`]
//! then packages everything into a single PPTX archive.

use crate::constants::*;
use crate::error::{PptxError, Result};
use crate::to_emu;
use quick_xml::escape::escape;
use slidefit_ast::{FittedBody, FittedContent, LayoutRegion, PixelRect, PixelSize, Rect, RegionRole};
use slidefit_layout::{DocumentSink, LayoutCatalog, ResolvedSlide};
use std::io::{Cursor, Seek, Write};
use std::sync::Arc;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// PPTX document writer
pub struct PptxWriter {
    /// Geometry source for every region
    catalog: Arc<LayoutCatalog>,

    /// Language tag written on text runs
    locale: String,

    /// Glyph drawn in front of body bullets
    bullet_glyph: String,

    /// Slides rendered so far, in placement order
    slides: Vec<RenderedSlide>,

    /// Embedded images, looked up by id
    media: Vec<MediaItem>,

    /// Presentation title
    title: Option<String>,

    /// Presentation author
    author: Option<String>,
}

/// Image bytes to embed under `ppt/media/`
struct MediaItem {
    /// Image id as used in fitted content
    id: String,

    /// Embedded name (e.g., "image1.png")
    embedded_name: String,

    /// Raw bytes
    data: Vec<u8>,
}

/// One slide's XML plus the media it references
struct RenderedSlide {
    index: u32,
    xml: String,
    /// Positions in `media`; relationship ids start at `rId2`
    images: Vec<usize>,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new(LayoutCatalog::shared())
    }
}

impl PptxWriter {
    /// Create a writer that places regions using `catalog`
    pub fn new(catalog: impl Into<Arc<LayoutCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            locale: "en-US".to_string(),
            bullet_glyph: "•".to_string(),
            slides: Vec::new(),
            media: Vec::new(),
            title: None,
            author: None,
        }
    }

    /// Set the presentation title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the language tag for text runs
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the bullet glyph for body text
    pub fn with_bullet_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.bullet_glyph = glyph.into();
        self
    }

    /// Number of slides placed so far
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Register image bytes under the id used by fitted content.
    ///
    /// Adding the same id twice replaces the bytes.
    /// Whether images of `content_type` can be embedded
    pub fn supports_media(content_type: &str) -> bool {
        extension_for(content_type).is_some()
    }

    pub fn add_media(
        &mut self,
        id: impl Into<String>,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let id = id.into();
        let Some(ext) = extension_for(content_type) else {
            return Err(PptxError::unsupported_media(id, content_type));
        };

        if let Some(existing) = self.media.iter_mut().find(|m| m.id == id) {
            existing.embedded_name = format!("{}.{}", stem(&existing.embedded_name), ext);
            existing.data = data;
            return Ok(());
        }

        let embedded_name = format!("image{}.{}", self.media.len() + 1, ext);
        self.media.push(MediaItem {
            id,
            embedded_name,
            data,
        });
        Ok(())
    }

    /// Generate the PPTX as bytes
    pub fn generate(&self) -> Result<Vec<u8>> {
        let buffer = Vec::new();
        let cursor = Cursor::new(buffer);
        let mut zip = ZipWriter::new(cursor);

        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        self.write_content_types(&mut zip, options)?;
        self.write_root_rels(&mut zip, options)?;
        self.write_doc_props(&mut zip, options)?;
        self.write_presentation(&mut zip, options)?;
        self.write_theme(&mut zip, options)?;
        self.write_master_and_layout(&mut zip, options)?;

        for (i, slide) in self.slides.iter().enumerate() {
            self.write_slide(&mut zip, options, i + 1, slide)?;
        }

        for media in &self.media {
            zip.start_file(format!("ppt/media/{}", media.embedded_name), options)?;
            zip.write_all(&media.data)?;
        }

        let cursor = zip.finish()?;
        let bytes = cursor.into_inner();

        debug!(
            slides = self.slides.len(),
            media = self.media.len(),
            bytes = bytes.len(),
            "pptx package written"
        );
        Ok(bytes)
    }

    /// Render one slide to XML
    fn render(&self, slide: &ResolvedSlide) -> Result<RenderedSlide> {
        let template = self.catalog.get(slide.layout_name);

        let mut placed: Vec<(&LayoutRegion, &FittedContent)> = Vec::with_capacity(slide.fitted.len());
        for content in &slide.fitted {
            let region = template.region(&content.region_name).ok_or_else(|| {
                PptxError::unknown_region(&content.region_name, slide.layout_name.as_str())
            })?;
            placed.push((region, content));
        }
        // Later shapes draw on top
        placed.sort_by_key(|(region, _)| region.z_index);

        let mut shapes = String::new();
        let mut images = Vec::new();
        let mut shape_id = 2;

        for (region, content) in placed {
            match &content.body {
                FittedBody::Text {
                    lines,
                    font_size_pt,
                    ..
                } => {
                    if lines.is_empty() {
                        continue;
                    }
                    shapes.push_str(&self.text_shape(shape_id, region, lines, *font_size_pt));
                }
                FittedBody::Image {
                    image_id,
                    source,
                    crop_rect,
                    dest_rect,
                    ..
                } => {
                    let position = self
                        .media
                        .iter()
                        .position(|m| &m.id == image_id)
                        .ok_or_else(|| PptxError::missing_media(image_id, slide.index()))?;
                    images.push(position);
                    let rel_id = format!("rId{}", images.len() + 1);
                    shapes.push_str(&picture_shape(
                        shape_id,
                        &region.name,
                        &rel_id,
                        *source,
                        *crop_rect,
                        *dest_rect,
                    ));
                }
            }
            shape_id += 1;
        }

        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld name="{}">
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            escape(slide.record.label.as_str()),
            shapes
        );

        Ok(RenderedSlide {
            index: slide.index(),
            xml,
            images,
        })
    }

    /// A text box at the region's rectangle
    fn text_shape(&self, id: u32, region: &LayoutRegion, lines: &[String], font_size_pt: u32) -> String {
        let algn = region.alignment.as_drawingml();
        let sz = font_size_pt * CENTIPOINTS_PER_POINT;
        let bold = if region.role == RegionRole::Title { " b=\"1\"" } else { "" };
        let anchor = match region.role {
            RegionRole::Title | RegionRole::Caption => "ctr",
            _ => "t",
        };

        let mut paragraphs = String::new();
        for line in lines {
            let ppr = if region.role == RegionRole::Body {
                format!(
                    "<a:pPr algn=\"{}\" marL=\"285750\" indent=\"-285750\"><a:buChar char=\"{}\"/></a:pPr>",
                    algn,
                    escape(self.bullet_glyph.as_str())
                )
            } else {
                format!("<a:pPr algn=\"{}\"><a:buNone/></a:pPr>", algn)
            };
            paragraphs.push_str(&format!(
                "          <a:p>{}<a:r><a:rPr lang=\"{}\" sz=\"{}\"{} dirty=\"0\"/><a:t>{}</a:t></a:r></a:p>\n",
                ppr,
                escape(self.locale.as_str()),
                sz,
                bold,
                escape(line.as_str())
            ));
        }

        format!(
            r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvSpPr txBox="1"/>
          <p:nvPr/>
        </p:nvSpPr>
        <p:spPr>
{}          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
        </p:spPr>
        <p:txBody>
          <a:bodyPr wrap="square" rtlCol="0" anchor="{}"/>
          <a:lstStyle/>
{}        </p:txBody>
      </p:sp>
"#,
            id,
            escape(region.name.as_str()),
            xfrm(region.rect),
            anchor,
            paragraphs
        )
    }

    /// Write [Content_Types].xml
    fn write_content_types<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Default Extension="jpeg" ContentType="image/jpeg"/>
  <Default Extension="gif" ContentType="image/gif"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
        );

        for i in 1..=self.slides.len() {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>\n",
                i
            ));
        }

        content.push_str("</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write _rels/.rels
    fn write_root_rels<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("_rels/.rels", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write docProps/app.xml and docProps/core.xml
    fn write_doc_props<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("docProps/app.xml", options)?;

        let app = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>slidefit</Application>
  <PresentationFormat>Custom</PresentationFormat>
  <Slides>{}</Slides>
  <AppVersion>{}</AppVersion>
</Properties>"#,
            self.slides.len(),
            env!("CARGO_PKG_VERSION")
        );
        zip.write_all(app.as_bytes())?;

        zip.start_file("docProps/core.xml", options)?;

        let title = self.title.as_deref().unwrap_or("Presentation");
        let author = self.author.as_deref().unwrap_or("slidefit");

        let core = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
  <dc:language>{}</dc:language>
</cp:coreProperties>"#,
            escape(title),
            escape(author),
            escape(self.locale.as_str())
        );
        zip.write_all(core.as_bytes())?;

        Ok(())
    }

    /// Write ppt/presentation.xml, its rels and presProps
    fn write_presentation<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/presentation.xml", options)?;

        let canvas = self.catalog.canvas();
        let (cx, cy) = (to_emu(canvas.width), to_emu(canvas.height));

        let mut slide_refs = String::new();
        for i in 1..=self.slides.len() {
            slide_refs.push_str(&format!(
                "    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n",
                255 + i,
                i + 3 // rId1=slideMaster, rId2=presProps, rId3=theme, rId4+=slides
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{}  </p:sldIdLst>
  <p:sldSz cx="{}" cy="{}"/>
  <p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, slide_refs, cx, cy, cy, cx
        );
        zip.write_all(content.as_bytes())?;

        zip.start_file("ppt/_rels/presentation.xml.rels", options)?;

        let mut rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>
  <Relationship Id="rId3" Type="{}" Target="theme/theme1.xml"/>
"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER, REL_TYPE_THEME
        );
        for i in 1..=self.slides.len() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>\n",
                i + 3,
                REL_TYPE_SLIDE,
                i
            ));
        }
        rels.push_str("</Relationships>");
        zip.write_all(rels.as_bytes())?;

        zip.start_file("ppt/presProps.xml", options)?;
        let props = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"/>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );
        zip.write_all(props.as_bytes())?;

        Ok(())
    }

    /// Write ppt/theme/theme1.xml
    fn write_theme<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        zip.start_file("ppt/theme/theme1.xml", options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{}" name="slidefit">
  <a:themeElements>
    <a:clrScheme name="slidefit">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="1F2937"/></a:dk2>
      <a:lt2><a:srgbClr val="F3F4F6"/></a:lt2>
      <a:accent1><a:srgbClr val="2563EB"/></a:accent1>
      <a:accent2><a:srgbClr val="F59E0B"/></a:accent2>
      <a:accent3><a:srgbClr val="10B981"/></a:accent3>
      <a:accent4><a:srgbClr val="8B5CF6"/></a:accent4>
      <a:accent5><a:srgbClr val="EF4444"/></a:accent5>
      <a:accent6><a:srgbClr val="6B7280"/></a:accent6>
      <a:hlink><a:srgbClr val="2563EB"/></a:hlink>
      <a:folHlink><a:srgbClr val="7C3AED"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="slidefit">
      <a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="slidefit">
      <a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst>
      <a:lnStyleLst>{line}{line}{line}</a:lnStyleLst>
      <a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst>
      <a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            NS_DRAWING,
            fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
            line = r#"<a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
            effect = r#"<a:effectStyle><a:effectLst/></a:effectStyle>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write the slide master and its single blank layout
    fn write_master_and_layout<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> Result<()> {
        let empty_tree = r#"<p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>"#;

        zip.start_file("ppt/slideMasters/slideMaster1.xml", options)?;
        let master = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
    {}
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, empty_tree
        );
        zip.write_all(master.as_bytes())?;

        zip.start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", options)?;
        let master_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="{}" Target="../theme/theme1.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT, REL_TYPE_THEME
        );
        zip.write_all(master_rels.as_bytes())?;

        zip.start_file("ppt/slideLayouts/slideLayout1.xml", options)?;
        let layout = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1">
  <p:cSld name="Blank">
    {}
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, empty_tree
        );
        zip.write_all(layout.as_bytes())?;

        zip.start_file("ppt/slideLayouts/_rels/slideLayout1.xml.rels", options)?;
        let layout_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER
        );
        zip.write_all(layout_rels.as_bytes())?;

        Ok(())
    }

    /// Write a single slide and its rels
    fn write_slide<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
        slide_num: usize,
        slide: &RenderedSlide,
    ) -> Result<()> {
        zip.start_file(format!("ppt/slides/slide{}.xml", slide_num), options)?;
        zip.write_all(slide.xml.as_bytes())?;

        zip.start_file(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            options,
        )?;

        let mut rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/>
"#,
            NS_PACKAGE_RELATIONSHIPS, REL_TYPE_SLIDE_LAYOUT
        );

        for (i, &position) in slide.images.iter().enumerate() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"../media/{}\"/>\n",
                i + 2,
                REL_TYPE_IMAGE,
                self.media[position].embedded_name
            ));
        }

        rels.push_str("</Relationships>");

        zip.write_all(rels.as_bytes())?;
        debug!(slide = slide.index, part = slide_num, "slide written");
        Ok(())
    }
}

impl DocumentSink for PptxWriter {
    type Error = PptxError;

    fn place(&mut self, slide: &ResolvedSlide) -> Result<()> {
        let rendered = self.render(slide)?;
        self.slides.push(rendered);
        Ok(())
    }
}

/// File extension for an embeddable image content type
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpeg"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

fn stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// `a:xfrm` for a rectangle in slide units
fn xfrm(rect: Rect) -> String {
    format!(
        "          <a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>\n",
        to_emu(rect.x),
        to_emu(rect.y),
        to_emu(rect.width),
        to_emu(rect.height)
    )
}

/// `a:srcRect` insets, in thousandths of a percent of the source
fn src_rect(source: PixelSize, crop: PixelRect) -> (u64, u64, u64, u64) {
    let part = |px: u32, total: u32| u64::from(px) * SRC_RECT_FULL / u64::from(total.max(1));

    let right = source.width.saturating_sub(crop.x + crop.width);
    let bottom = source.height.saturating_sub(crop.y + crop.height);

    (
        part(crop.x, source.width),
        part(crop.y, source.height),
        part(right, source.width),
        part(bottom, source.height),
    )
}

/// A picture cropped to `crop` and stretched over `dest`
fn picture_shape(
    id: u32,
    name: &str,
    rel_id: &str,
    source: PixelSize,
    crop: PixelRect,
    dest: Rect,
) -> String {
    let (l, t, r, b) = src_rect(source, crop);

    format!(
        r#"      <p:pic>
        <p:nvPicPr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
          <p:nvPr/>
        </p:nvPicPr>
        <p:blipFill>
          <a:blip r:embed="{}"/>
          <a:srcRect l="{}" t="{}" r="{}" b="{}"/>
          <a:stretch><a:fillRect/></a:stretch>
        </p:blipFill>
        <p:spPr>
{}          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
        </p:spPr>
      </p:pic>
"#,
        id,
        escape(name),
        rel_id,
        l,
        t,
        r,
        b,
        xfrm(dest)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidefit_ast::{ImageHandle, SlideKind, SlideRecord};
    use slidefit_layout::SlideAssembler;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: Vec<u8>, name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut xml = String::new();
        part.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_default_writer_shares_the_global_catalog() {
        let writer = PptxWriter::default();
        assert!(std::ptr::eq(&*writer.catalog, LayoutCatalog::global()));

        let assembler = SlideAssembler::new();
        let writer = PptxWriter::new(assembler.shared_catalog());
        assert!(std::ptr::eq(&*writer.catalog, assembler.catalog()));
    }

    #[test]
    fn test_supports_media() {
        assert!(PptxWriter::supports_media("image/png"));
        assert!(PptxWriter::supports_media("image/jpeg"));
        assert!(!PptxWriter::supports_media("image/bmp"));
        assert!(!PptxWriter::supports_media("image/webp"));
    }

    #[test]
    fn test_create_writer() {
        let writer = PptxWriter::default();
        assert_eq!(writer.slide_count(), 0);
        assert!(writer.media.is_empty());
    }

    #[test]
    fn test_generate_empty_pptx() {
        let writer = PptxWriter::default()
            .with_title("Test Presentation")
            .with_author("Test Author");

        let bytes = writer.generate().unwrap();
        assert!(!bytes.is_empty());

        let archive = ZipArchive::new(Cursor::new(bytes));
        assert!(archive.is_ok());
    }

    #[test]
    fn test_slide_size_follows_canvas() {
        let bytes = PptxWriter::default().generate().unwrap();
        let xml = read_part(bytes, "ppt/presentation.xml");

        assert!(xml.contains(&format!("cx=\"{}\"", to_emu(13.33))));
        assert!(xml.contains("cy=\"6858000\""));
    }

    #[test]
    fn test_text_is_placed_with_fitted_size() {
        let record = SlideRecord::new(1, "Fish & Chips").with_bullets(["Crispy <always>"]);
        let slide = SlideAssembler::new().resolve(record, None);

        let mut writer = PptxWriter::default();
        writer.place(&slide).unwrap();
        let xml = &writer.slides[0].xml;

        assert!(xml.contains("Fish &amp; Chips"));
        assert!(xml.contains("Crispy &lt;always&gt;"));
        assert!(xml.contains("sz=\"3200\""));
        assert!(xml.contains("<a:buChar char=\"•\"/>"));
        assert!(xml.contains(&format!("<a:off x=\"{}\" y=\"{}\"/>", to_emu(0.5), to_emu(1.7))));
    }

    #[test]
    fn test_empty_regions_are_skipped() {
        let record = SlideRecord::new(1, "Only a title").with_kind(SlideKind::TitleSlide);
        let slide = SlideAssembler::new().resolve(record, None);

        let mut writer = PptxWriter::default();
        writer.place(&slide).unwrap();

        assert_eq!(writer.slides[0].xml.matches("<p:sp>").count(), 1);
    }

    #[test]
    fn test_picture_uses_src_rect() {
        let record = SlideRecord::new(2, "Look").with_bullets(["a picture"]);
        let image = ImageHandle::new("hero", 1024, 1024);
        let slide = SlideAssembler::new().resolve(record, Some(&image));

        let mut writer = PptxWriter::default();
        writer.add_media("hero", vec![0x89, b'P', b'N', b'G'], "image/png").unwrap();
        writer.place(&slide).unwrap();

        let rendered = &writer.slides[0];
        assert_eq!(rendered.images, vec![0]);
        assert!(rendered.xml.contains("r:embed=\"rId2\""));
        assert!(rendered.xml.contains("<a:srcRect l=\"0\" t=\""));
        assert!(rendered.xml.contains("r=\"0\""));
    }

    #[test]
    fn test_missing_media_is_an_error() {
        let record = SlideRecord::new(7, "Look");
        let image = ImageHandle::new("nowhere", 640, 480);
        let slide = SlideAssembler::new().resolve(record, Some(&image));

        let err = PptxWriter::default().place(&slide).unwrap_err();
        assert_eq!(err.code(), "PPTX001");
        assert!(err.to_string().contains("slide 7"));
    }

    #[test]
    fn test_add_media() {
        let mut writer = PptxWriter::default();

        writer.add_media("a", vec![1], "image/png").unwrap();
        writer.add_media("b", vec![2], "image/jpeg").unwrap();
        writer.add_media("a", vec![3], "image/gif").unwrap();

        assert_eq!(writer.media.len(), 2);
        assert_eq!(writer.media[0].embedded_name, "image1.gif");
        assert_eq!(writer.media[0].data, vec![3]);
        assert_eq!(writer.media[1].embedded_name, "image2.jpeg");

        let err = writer.add_media("c", vec![], "image/webp").unwrap_err();
        assert_eq!(err.code(), "PPTX002");
    }

    #[test]
    fn test_src_rect() {
        let source = PixelSize::new(1024, 768);

        assert_eq!(src_rect(source, PixelRect::new(0, 0, 1024, 768)), (0, 0, 0, 0));

        let (l, t, r, b) = src_rect(source, PixelRect::new(0, 42, 1024, 683));
        assert_eq!((l, r), (0, 0));
        assert_eq!(t, 42 * 100_000 / 768);
        assert_eq!(b, 43 * 100_000 / 768);
    }
}
