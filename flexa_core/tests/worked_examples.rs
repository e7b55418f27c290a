use std::path::PathBuf;

use flexa_core::calculations::{BeamGeometry, CalculationItem, FlexureInput};
use flexa_core::file_io::{load_project, save_project};
use flexa_core::materials::{
    ExposureClass, ExposureSelection, FabricationMode, MaterialState, SpecimenType, SteelGrade,
};
use flexa_core::project::Project;

fn close(actual: f64, expected: f64, tol: f64) -> bool {
    (actual - expected).abs() <= tol
}

fn cast_in_place(classes: &[ExposureClass]) -> ExposureSelection {
    ExposureSelection::new(
        classes.iter().copied(),
        FabricationMode::CastInPlace,
        SpecimenType::Cylindrical,
    )
}

fn beam(label: &str, med: f64, classes: &[ExposureClass], grade: SteelGrade) -> FlexureInput {
    FlexureInput {
        label: label.to_string(),
        geometry: BeamGeometry::new(0.30, 0.50, med),
        exposure: cast_in_place(classes),
        steel_grade: grade,
        fck_override: None,
    }
}

fn temp_project_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flexa_worked_{}_{}.flx", name, std::process::id()))
}

#[test]
fn office_beam_is_singly_reinforced() {
    // XC2 cast in place on cylinders gives C25
    let input = beam("B-1", 100.0, &[ExposureClass::X0, ExposureClass::XC2], SteelGrade::S500);
    let materials = input.materials();
    assert!(materials.diagnostic.is_none());
    assert_eq!(materials.state.structural_class.label(), "XC2");
    assert!(close(materials.state.concrete.fcd, 16.6667, 1e-4));

    let design = input.design().unwrap();
    let r = &design.result;
    assert!(r.is_scas);
    assert!(close(r.mu, 0.098765, 1e-6));
    assert!(close(r.as_theoretical.0, 4.99261e-4, 1e-8));
    assert!(close(r.as_theoretical_cm2().0, 4.99, 0.01));
    assert!(r.as_compressed_cm2().is_none());

    let text = design.render_text();
    assert!(text.starts_with(" 1. "));
    assert!(text.contains("μ = 0.0988"));
}

#[test]
fn heavily_loaded_beam_needs_compression_steel() {
    let input = beam("B-2", 450.0, &[ExposureClass::XC2], SteelGrade::S500);
    let design = input.design().unwrap();
    let r = &design.result;

    assert!(!r.is_scas);
    assert!(close(r.mu_limit, 0.372, 1e-12));
    assert!(close(r.as_compressed.unwrap().0, 4.1418e-4, 1e-7));
    assert!(close(r.as_theoretical.0, 2.97796e-3, 1e-7));
    assert!(r.as_theoretical > r.as_min);
    assert!(design.steps.len() > 10);
}

#[test]
fn mild_steel_needs_more_area_than_high_strength() {
    let s400 = beam("B-3", 100.0, &[ExposureClass::XC2], SteelGrade::S400).design().unwrap();
    let s500 = beam("B-3", 100.0, &[ExposureClass::XC2], SteelGrade::S500).design().unwrap();
    assert!(close(s400.result.as_theoretical.0, 6.74002e-4, 1e-8));
    assert!(s400.result.as_theoretical > s500.result.as_theoretical);
}

#[test]
fn most_demanding_class_governs() {
    let class = cast_in_place(&[ExposureClass::X0, ExposureClass::XC1]).resolve();
    assert_eq!(class.fck, 20.0);
    assert_eq!(class.label(), "XC1");

    let precast = ExposureSelection::new(
        [ExposureClass::XC1, ExposureClass::XD2],
        FabricationMode::Precast,
        SpecimenType::Cubic,
    )
    .resolve();
    assert_eq!(precast.fck, 50.0);
    assert_eq!(precast.label(), "XD2");
}

#[test]
fn empty_selection_is_refused() {
    let input = beam("B-4", 100.0, &[], SteelGrade::S500);
    assert!(!input.materials().state.is_determined());

    let err = input.design().unwrap_err();
    assert_eq!(err.error_code(), "UNDETERMINED_MATERIAL");
}

#[test]
fn negative_override_reports_diagnostic() {
    let mut input = beam("B-5", 100.0, &[ExposureClass::XC2], SteelGrade::S500);
    input.fck_override = Some(-10.0);

    let resolution = input.materials();
    assert!(resolution.diagnostic.is_some());
    assert_eq!(resolution.state, MaterialState {
        steel: SteelGrade::S500.properties(),
        ..MaterialState::default()
    });
    assert!(input.design().is_err());
}

#[test]
fn design_is_idempotent() {
    let input = beam("B-6", 240.0, &[ExposureClass::XS1], SteelGrade::S500);
    let first = input.design().unwrap();
    let second = input.design().unwrap();
    assert_eq!(first, second);
}

#[test]
fn saved_project_designs_the_same() {
    let path = temp_project_path("roundtrip");

    let mut project = Project::new("Jane Engineer", "26-101", "Harbour Works");
    project.add_item(CalculationItem::Flexure(beam("B-1", 100.0, &[ExposureClass::XC2], SteelGrade::S500)));
    project.add_item(CalculationItem::Flexure(beam("B-2", 450.0, &[ExposureClass::XC2], SteelGrade::S400)));
    project.add_item(CalculationItem::Flexure(beam("B-3", 100.0, &[], SteelGrade::S500)));

    save_project(&project, &path).unwrap();
    let loaded = load_project(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let before = project.design_all();
    let after = loaded.design_all();
    assert_eq!(before.len(), 3);
    for ((_, label_a, design_a), (_, label_b, design_b)) in before.iter().zip(after.iter()) {
        assert_eq!(label_a, label_b);
        assert_eq!(design_a, design_b);
    }
    assert!(after[0].2.is_ok());
    assert!(after[1].2.is_ok());
    assert!(after[2].2.is_err());
}
