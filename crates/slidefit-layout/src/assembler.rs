//! Slide assembly
//!
//! The assembler runs the whole pipeline: parse the raw text, choose a
//! layout per record, fill every region of that layout and hand the
//! result on. Problems with a single region never stop the run; they
//! degrade that region to an empty placeholder and are reported as
//! diagnostics on the slide.
//!
//! # Diagnostic codes
//!
//! | code   | severity | meaning                                        |
//! |--------|----------|------------------------------------------------|
//! | FIT001 | warning  | image could not be fitted, placeholder used    |
//! | FIT002 | info     | text was shortened to the region budget        |
//! | FIT003 | info     | bullets were dropped by prioritization         |
//! | FIT004 | info     | image supplied for a title slide was not used  |

use std::sync::Arc;

use slidefit_ast::{FittedContent, ImageHandle, LayoutRegion, RegionRole, SlideRecord};
use slidefit_core::{parse_with_diagnostics, Diagnostic, Diagnostics};
use tracing::{debug, warn};

use crate::catalog::{LayoutCatalog, LayoutName};
use crate::contract::FitContract;
use crate::cover::fit_image;
use crate::error::Result;
use crate::lookup::ImageLookup;
use crate::resolved::ResolvedSlide;
use crate::scoring::{BulletScorer, KeywordLengthScorer};
use crate::selector::select;
use crate::sink::DocumentSink;
use crate::text_fit::TextFitter;

/// Slides and parse diagnostics from one assembly run
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Assembly {
    pub slides: Vec<ResolvedSlide>,
    /// Diagnostics from parsing (per-slide ones live on each slide)
    pub diagnostics: Diagnostics,
}

impl Assembly {
    /// Parse diagnostics followed by every slide's diagnostics
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .chain(self.slides.iter().flat_map(|s| s.diagnostics.iter()))
    }

    /// Number of slides with a degraded region
    pub fn degraded_count(&self) -> usize {
        self.slides.iter().filter(|s| s.degraded).count()
    }
}

/// Runs records through layout selection and fitting
#[derive(Debug, Clone)]
pub struct SlideAssembler<S = KeywordLengthScorer> {
    catalog: Arc<LayoutCatalog>,
    contract: FitContract,
    fitter: TextFitter<S>,
}

impl Default for SlideAssembler {
    fn default() -> Self {
        Self {
            catalog: LayoutCatalog::shared(),
            contract: FitContract::default(),
            fitter: TextFitter::new(),
        }
    }
}

impl SlideAssembler {
    /// Assembler with the built-in catalog and default tunables
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembler configured from a contract.
    ///
    /// Builds a catalog for the contract's canvas, which fails if the
    /// canvas cannot hold the built-in layouts.
    pub fn from_contract(contract: FitContract) -> Result<Self> {
        contract.validate()?;
        let catalog = Arc::new(LayoutCatalog::new(contract.canvas())?);
        let fitter = TextFitter::from_config(&contract.text);

        Ok(Self {
            catalog,
            contract,
            fitter,
        })
    }
}

impl<S: BulletScorer> SlideAssembler<S> {
    /// Swap the bullet scorer used for prioritization
    pub fn with_scorer<T: BulletScorer>(self, scorer: T) -> SlideAssembler<T> {
        SlideAssembler {
            catalog: self.catalog,
            contract: self.contract,
            fitter: self.fitter.with_scorer(scorer),
        }
    }

    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Handle on the catalog for a sink that needs the same geometry
    pub fn shared_catalog(&self) -> Arc<LayoutCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn contract(&self) -> &FitContract {
        &self.contract
    }

    /// Parse `raw` and resolve every record, in index order
    pub fn assemble<L>(&self, raw: &str, lookup: &L) -> Vec<ResolvedSlide>
    where
        L: ImageLookup + ?Sized,
    {
        self.assemble_document(raw, lookup).slides
    }

    /// Like [`assemble`](Self::assemble), keeping the parse diagnostics
    pub fn assemble_document<L>(&self, raw: &str, lookup: &L) -> Assembly
    where
        L: ImageLookup + ?Sized,
    {
        let parsed = parse_with_diagnostics(raw);

        let slides: Vec<ResolvedSlide> = parsed
            .records
            .into_iter()
            .map(|record| {
                let image = lookup.image_for(record.index);
                self.resolve(record, image.as_ref())
            })
            .collect();

        debug!(
            slides = slides.len(),
            degraded = slides.iter().filter(|s| s.degraded).count(),
            "assembly finished"
        );

        Assembly {
            slides,
            diagnostics: parsed.diagnostics,
        }
    }

    /// Assemble and hand every slide to `sink`.
    ///
    /// Returns all diagnostics of the run. Stops at the first sink error.
    pub fn assemble_into<L, D>(
        &self,
        raw: &str,
        lookup: &L,
        sink: &mut D,
    ) -> std::result::Result<Diagnostics, D::Error>
    where
        L: ImageLookup + ?Sized,
        D: DocumentSink + ?Sized,
    {
        let assembly = self.assemble_document(raw, lookup);
        for slide in &assembly.slides {
            sink.place(slide)?;
        }

        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(assembly.all_diagnostics().cloned());
        Ok(diagnostics)
    }

    /// Resolve one record against an optional image
    pub fn resolve(&self, record: SlideRecord, image: Option<&ImageHandle>) -> ResolvedSlide {
        let is_diagram = self.contract.is_diagram_kind(record.kind);
        let has_diagram = image.is_some() && is_diagram;
        let has_image = image.is_some() && !is_diagram;

        let layout_name = select(&record, has_image, has_diagram);
        debug!(slide = record.index, layout = %layout_name, "layout selected");

        let mut slide = ResolvedSlide {
            layout_name,
            fitted: Vec::new(),
            diagnostics: Vec::new(),
            degraded: false,
            record,
        };

        if let (LayoutName::TitleSlide, Some(image)) = (layout_name, image) {
            slide.diagnostics.push(
                Diagnostic::info(format!("Image '{}' is not shown on a title slide", image.id))
                    .with_code("FIT004")
                    .with_slide(slide.record.index),
            );
        }

        let template = self.catalog.get(layout_name);
        let body_count = template.regions_with_role(RegionRole::Body).count();
        let mut body_seen = 0;

        for region in &template.regions {
            let content = match region.role {
                RegionRole::Title => {
                    let title = &slide.record.title;
                    let lines = if title.is_empty() {
                        Vec::new()
                    } else {
                        vec![title.clone()]
                    };
                    self.fit_text_region(&mut slide, &lines, region)
                }
                RegionRole::Subtitle => {
                    let first: Vec<String> = slide.record.bullets.iter().take(1).cloned().collect();
                    self.fit_text_region(&mut slide, &first, region)
                }
                RegionRole::Body => {
                    let share = split_share(&slide.record.bullets, body_seen, body_count).to_vec();
                    body_seen += 1;
                    self.fit_text_region(&mut slide, &share, region)
                }
                RegionRole::Caption => {
                    let bullets = slide.record.bullets.clone();
                    self.fit_text_region(&mut slide, &bullets, region)
                }
                RegionRole::Media => self.fit_media_region(&mut slide, image, region),
            };
            slide.fitted.push(content);
        }

        slide
    }

    fn fit_text_region(
        &self,
        slide: &mut ResolvedSlide,
        lines: &[String],
        region: &LayoutRegion,
    ) -> FittedContent {
        let report = self.fitter.fit_text_with_report(lines, region);
        let index = slide.record.index;

        if report.dropped > 0 {
            slide.diagnostics.push(
                Diagnostic::info(format!(
                    "{} of {} bullets kept",
                    lines.len() - report.dropped,
                    lines.len()
                ))
                .with_code("FIT003")
                .with_slide(index)
                .with_region(&region.name),
            );
        }
        if report.shortened {
            slide.diagnostics.push(
                Diagnostic::info("Text shortened to fit the region")
                    .with_code("FIT002")
                    .with_slide(index)
                    .with_region(&region.name),
            );
        }

        report.content
    }

    fn fit_media_region(
        &self,
        slide: &mut ResolvedSlide,
        image: Option<&ImageHandle>,
        region: &LayoutRegion,
    ) -> FittedContent {
        let placeholder = || FittedContent::empty_text(&region.name, region.font_range.max_pt);

        let Some(image) = image else {
            return placeholder();
        };

        match fit_image(image, region) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    slide = slide.record.index,
                    region = %region.name,
                    image = %image.id,
                    "image degraded to placeholder: {}",
                    e
                );
                slide.degraded = true;
                slide.diagnostics.push(
                    Diagnostic::warning(format!("Image '{}' could not be placed: {}", image.id, e))
                        .with_code("FIT001")
                        .with_slide(slide.record.index)
                        .with_region(&region.name)
                        .with_note(format!("error code {}", e.code())),
                );
                placeholder()
            }
        }
    }
}

/// The `part`-th of `parts` consecutive shares of `bullets`.
///
/// With two parts the first gets `len / 2` (rounded down) and the second
/// the rest.
fn split_share(bullets: &[String], part: usize, parts: usize) -> &[String] {
    if parts <= 1 {
        return bullets;
    }
    let len = bullets.len();
    let start = len * part / parts;
    let end = len * (part + 1) / parts;
    &bullets[start.min(len)..end.min(len)]
}
