//! End-to-end assembly: parse, select, fit

use std::collections::HashMap;
use std::sync::Arc;

use proptest::prelude::*;
use slidefit_ast::{
    FittedBody, FontRange, ImageHandle, LayoutRegion, PixelSize, Rect, RegionRole, SlideKind,
    SlideRecord,
};
use slidefit_layout::{
    fit_cover, CollectingSink, FitContract, LayoutCatalog, LayoutError, LayoutName, NoImages,
    SlideAssembler, TextFitter,
};

const DECK: &str = "\
SLIDE 1 - OVERVIEW:
TITLE: Project Aurora
SLIDE_TYPE: title_slide
MAIN_POINTS:
- A faster way to ship reports

SLIDE 2 - ARCHITECTURE:
TITLE: How it fits together
SLIDE_TYPE: architecture_slide
MAIN_POINTS:
- Ingest layer pulls from the warehouse
- Render workers produce documents

SLIDE 3 - FEATURES:
TITLE: What you get
SLIDE_TYPE: features_slide
MAIN_POINTS:
- Templates
- Scheduling
- Sharing
- Audit trail
- Key exports to every format

SLIDE 4 - EXAMPLE:
TITLE: A generated report
MAIN_POINTS:
- Rendered in under a second

SLIDE 5 - CLOSING:
TITLE: Questions
";

fn images() -> HashMap<u32, ImageHandle> {
    let mut images = HashMap::new();
    images.insert(2, ImageHandle::new("architecture", 1600, 900));
    images.insert(4, ImageHandle::new("report", 1024, 768));
    images
}

fn body_region(budget: usize) -> LayoutRegion {
    LayoutRegion::new(
        "content",
        RegionRole::Body,
        Rect::new(0.5, 1.7, 12.33, 5.3),
        5,
        FontRange::new(14, 18),
    )
    .with_budget(budget)
}

#[test]
fn test_scenario_title_only_record() {
    let raw = "SLIDE 1 - OVERVIEW:\nTITLE: Demo\nSLIDE_TYPE: title_slide\n";
    let slides = SlideAssembler::new().assemble(raw, &NoImages);

    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].layout_name, LayoutName::TitleSlide);
    assert_eq!(slides[0].get("title").unwrap().lines().unwrap(), &["Demo"]);
    assert!(slides[0].get("subtitle").unwrap().is_empty_text());
}

#[test]
fn test_scenario_long_bullet_is_truncated() {
    let bullet = "a very long point ".repeat(20);
    let fitted = TextFitter::new().fit_text(&[bullet], &body_region(50));

    match fitted.body {
        FittedBody::Text {
            lines, truncated, ..
        } => {
            assert_eq!(lines.len(), 1);
            assert!(lines[0].chars().count() <= 53);
            assert!(truncated);
        }
        FittedBody::Image { .. } => panic!("expected text"),
    }
}

#[test]
fn test_scenario_equal_scores_keep_source_order() {
    let bullets: Vec<String> = (1..=7).map(|i| format!("point {i}")).collect();
    let fitted = TextFitter::new().fit_text(&bullets, &body_region(500));

    assert_eq!(
        fitted.lines().unwrap(),
        &["point 1", "point 2", "point 3", "point 4"]
    );
    assert!(fitted.is_truncated());
}

#[test]
fn test_scenario_taller_image_crops_height() {
    let fit = fit_cover(PixelSize::new(1024, 768), Rect::new(0.0, 0.0, 300.0, 200.0)).unwrap();

    assert!(fit.crop_rect.height < 768);
    assert_eq!(fit.crop_rect.width, 1024);
}

#[test]
fn test_scenario_zero_width_image_is_an_error() {
    let err = fit_cover(PixelSize::new(0, 768), Rect::new(0.0, 0.0, 300.0, 200.0)).unwrap_err();

    assert!(matches!(err, LayoutError::InvalidDimensions { .. }));
}

#[test]
fn test_deck_layouts() {
    let slides = SlideAssembler::new().assemble(DECK, &images());
    let layouts: Vec<_> = slides.iter().map(|s| s.layout_name).collect();

    assert_eq!(
        layouts,
        vec![
            LayoutName::TitleSlide,
            LayoutName::DiagramFocus,
            LayoutName::TwoColumn,
            LayoutName::ImageText,
            LayoutName::TitleContent,
        ]
    );
}

#[test]
fn test_every_region_is_filled_in_declaration_order() {
    let assembler = SlideAssembler::new();
    let slides = assembler.assemble(DECK, &images());

    for slide in &slides {
        let template = assembler.catalog().get(slide.layout_name);
        let fitted: Vec<_> = slide.region_names().collect();
        let declared: Vec<_> = template.region_names().collect();

        assert_eq!(fitted, declared, "slide {}", slide.index());
    }
}

#[test]
fn test_slides_come_back_in_index_order() {
    let slides = SlideAssembler::new().assemble(DECK, &NoImages);
    let indices: Vec<_> = slides.iter().map(|s| s.index()).collect();

    assert_eq!(indices, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_bad_image_degrades_only_its_slide() {
    let mut images = images();
    images.insert(4, ImageHandle::new("broken", 0, 0));

    let assembly = SlideAssembler::new().assemble_document(DECK, &images);

    assert_eq!(assembly.slides.len(), 5);
    assert_eq!(assembly.degraded_count(), 1);
    assert!(assembly.slides[3].degraded);
    assert!(assembly.slides[3].get("image").unwrap().is_empty_text());
    assert!(!assembly.slides[1].degraded);
    assert_eq!(assembly.all_diagnostics().filter(|d| d.has_code("FIT001")).count(), 1);
}

#[test]
fn test_diagram_kind_without_image_falls_back() {
    let slides = SlideAssembler::new().assemble(DECK, &NoImages);

    assert_eq!(slides[1].layout_name, LayoutName::TitleContent);
    assert_eq!(slides[3].layout_name, LayoutName::TitleContent);
}

#[test]
fn test_non_diagram_image_on_architecture_slide_with_custom_contract() {
    let contract = FitContract::from_toml_str(
        r#"
[images]
diagram_kinds = ["roadmap_slide"]
"#,
    )
    .unwrap();
    let assembler = SlideAssembler::from_contract(contract).unwrap();

    let slides = assembler.assemble(DECK, &images());
    assert_eq!(slides[1].layout_name, LayoutName::ImageText);
}

#[test]
fn test_contract_canvas_changes_geometry() {
    let contract = FitContract::from_toml_str(
        r#"
[canvas]
width = 10.0
height = 7.5
"#,
    )
    .unwrap();
    let assembler = SlideAssembler::from_contract(contract).unwrap();
    let region = assembler
        .catalog()
        .get(LayoutName::TitleContent)
        .region("content")
        .unwrap();

    assert!((region.rect.width - 9.0).abs() < 1e-9);
}

#[test]
fn test_contract_with_unusable_canvas_is_rejected() {
    let contract = FitContract {
        canvas: slidefit_layout::contract::CanvasConfig {
            width: 3.0,
            height: 2.0,
        },
        ..FitContract::default()
    };

    assert!(SlideAssembler::from_contract(contract).is_err());
}

#[test]
fn test_custom_scorer_changes_what_is_kept() {
    let raw = "\
SLIDE 1 - CONTENT:
TITLE: Many points
MAIN_POINTS:
- x
- two
- three
- four
- the longest bullet of them all
";
    // Prefer long bullets
    let scorer = |b: &str| b.len() as i64;
    let slides = SlideAssembler::new().with_scorer(scorer).assemble(raw, &NoImages);
    let content = slides[0].get("content").unwrap();

    assert_eq!(
        content.lines().unwrap(),
        &["the longest bullet of them all", "three", "four", "two"]
    );
    assert!(content.is_truncated());
    assert!(slides[0].diagnostics.iter().any(|d| d.has_code("FIT003")));
    assert!(!slides[0].diagnostics.iter().any(|d| d.has_code("FIT002")));
}

#[test]
fn test_assemble_into_sink_sees_every_slide() {
    let mut sink = CollectingSink::new();
    let diagnostics = SlideAssembler::new()
        .assemble_into(DECK, &images(), &mut sink)
        .unwrap();

    let indices: Vec<_> = sink.slides().iter().map(|s| s.index()).collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_catalog_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| LayoutCatalog::global().iter().count()))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), LayoutName::ALL.len());
    }
}

#[test]
fn test_default_assembler_uses_the_global_catalog() {
    let assembler = SlideAssembler::new();

    assert!(std::ptr::eq(assembler.catalog(), LayoutCatalog::global()));
    assert!(Arc::ptr_eq(&assembler.shared_catalog(), &LayoutCatalog::shared()));

    let custom = SlideAssembler::from_contract(FitContract::default()).unwrap();
    assert!(!std::ptr::eq(custom.catalog(), LayoutCatalog::global()));
}

#[test]
fn test_resolved_slide_serializes() {
    let record = SlideRecord::new(1, "Hello").with_kind(SlideKind::Content);
    let slide = SlideAssembler::new().resolve(record, None);
    let json = serde_json::to_value(&slide).unwrap();

    assert_eq!(json["layout_name"], "title_content");
    assert_eq!(json["fitted"][0]["region_name"], "title");
    assert_eq!(json["fitted"][0]["body"]["type"], "text");
    assert!(json.get("diagnostics").is_none());
}

proptest! {
    #[test]
    fn prop_font_stays_in_range(
        bullets in prop::collection::vec(".{0,400}", 0..10),
        min in 6u32..30,
        extra in 0u32..20,
    ) {
        let region = LayoutRegion::new(
            "content",
            RegionRole::Body,
            Rect::new(0.5, 1.7, 12.33, 5.3),
            5,
            FontRange::new(min, min + extra),
        )
        .with_budget(200);

        let fitted = TextFitter::new().fit_text(&bullets, &region);
        let size = fitted.font_size_pt().unwrap();

        prop_assert!(size >= min && size <= min + extra);
        prop_assert!(fitted.lines().unwrap().len() <= 4);
    }

    #[test]
    fn prop_crop_stays_inside_source(
        w in 1u32..5000,
        h in 1u32..5000,
        dw in 0.1f64..50.0,
        dh in 0.1f64..50.0,
    ) {
        let source = PixelSize::new(w, h);
        let fit = fit_cover(source, Rect::new(0.0, 0.0, dw, dh)).unwrap();

        prop_assert!(fit.crop_rect.fits_within(source));
        prop_assert!(fit.crop_rect.width >= 1 && fit.crop_rect.height >= 1);
        prop_assert!(fit.crop_rect.width == w || fit.crop_rect.height == h);
    }

    #[test]
    fn prop_assembly_never_panics(raw in ".{0,600}") {
        let slides = SlideAssembler::new().assemble(&raw, &NoImages);

        for slide in &slides {
            prop_assert!(!slide.fitted.is_empty());
        }
    }
}
