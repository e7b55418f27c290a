//! # Flexa CLI
//!
//! Designs the reinforcement of a rectangular reinforced-concrete beam from
//! the terminal and prints the derivation.
//!
//! ```bash
//! flexa --width 0.30 --height 0.50 --moment 100 --exposure XC1,XD2 --steel s500
//! flexa -b 0.30 -H 0.50 -m 450 --fck 25 --json
//! flexa -b 0.30 -H 0.50 -m 100 -e XC2 --label B-3 --save beams.flx --job 26-101
//! flexa --open beams.flx
//! ```
//!
//! Steel grade, depth ratio, fabrication mode and specimen type fall back to
//! the defaults stored in the `--save` project when their flags are omitted.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use flexa_core::calculations::flexure::{calculate, BeamGeometry, EffectiveDepthRatio, FlexureInput};
use flexa_core::calculations::{CalculationItem, FlexureDesign};
use flexa_core::errors::{CalcError, CalcResult};
use flexa_core::file_io::{load_project, load_project_with_lock_check, save_project, with_project_extension, FileLock};
use flexa_core::materials::{
    ExposureSelection, FabricationMode, MaterialState, SpecimenType, SteelGrade,
};
use flexa_core::project::{GlobalSettings, Project};

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum ArgSteelGrade {
    S400,
    S500,
}

impl From<ArgSteelGrade> for SteelGrade {
    fn from(arg: ArgSteelGrade) -> Self {
        match arg {
            ArgSteelGrade::S400 => SteelGrade::S400,
            ArgSteelGrade::S500 => SteelGrade::S500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum ArgDepthRatio {
    /// d = 0.9·h
    #[value(name = "0.9")]
    Standard,
    /// d = 0.85·h
    #[value(name = "0.85")]
    Reduced,
}

impl From<ArgDepthRatio> for EffectiveDepthRatio {
    fn from(arg: ArgDepthRatio) -> Self {
        match arg {
            ArgDepthRatio::Standard => EffectiveDepthRatio::Standard,
            ArgDepthRatio::Reduced => EffectiveDepthRatio::Reduced,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Reinforced-concrete beam bending design (EN 1992-1-1)", long_about = None)]
struct Inputs {
    /// Section width b (m)
    #[clap(short = 'b', long)]
    width: Option<f64>,

    /// Total height h (m)
    #[clap(short = 'H', long)]
    height: Option<f64>,

    /// Effective depth ratio d/h
    #[clap(long, value_enum)]
    ratio: Option<ArgDepthRatio>,

    /// Ultimate bending moment Med (kN·m)
    #[clap(short, long)]
    moment: Option<f64>,

    /// Comma-separated exposure classes (e.g. XC1,XD2)
    #[clap(short, long, default_value = "")]
    exposure: String,

    /// Precast member
    #[clap(long, conflicts_with = "cast_in_place")]
    precast: bool,

    /// Member cast in place
    #[clap(long)]
    cast_in_place: bool,

    /// Strength measured on cubes
    #[clap(long, conflicts_with = "cylindrical")]
    cubic: bool,

    /// Strength measured on cylinders
    #[clap(long)]
    cylindrical: bool,

    /// Reinforcing steel grade
    #[clap(short, long, value_enum)]
    steel: Option<ArgSteelGrade>,

    /// Characteristic strength fck (MPa), overrides the exposure classes
    #[clap(long)]
    fck: Option<f64>,

    /// Label of the beam
    #[clap(short, long, default_value = "B-1")]
    label: String,

    /// Print the design as JSON
    #[clap(long)]
    json: bool,

    /// Print the derivation as Markdown
    #[clap(long)]
    markdown: bool,

    /// Add the design to a project file (created if missing)
    #[clap(long)]
    save: Option<String>,

    /// Design every beam of a project file
    #[clap(long)]
    open: Option<String>,

    /// User name written into the project lock
    #[clap(long, default_value = "flexa")]
    user: String,

    /// Engineer of a new project (defaults to --user)
    #[clap(long)]
    engineer: Option<String>,

    /// Job number of a new project
    #[clap(long, default_value = "")]
    job: String,

    /// Client of a new project
    #[clap(long, default_value = "")]
    client: String,
}

impl Inputs {
    fn fabrication_mode(&self) -> Option<FabricationMode> {
        match (self.precast, self.cast_in_place) {
            (true, _) => Some(FabricationMode::Precast),
            (_, true) => Some(FabricationMode::CastInPlace),
            _ => None,
        }
    }

    fn specimen_type(&self) -> Option<SpecimenType> {
        match (self.cubic, self.cylindrical) {
            (true, _) => Some(SpecimenType::Cubic),
            (_, true) => Some(SpecimenType::Cylindrical),
            _ => None,
        }
    }

    fn new_project(&self) -> Project {
        let engineer = self.engineer.as_deref().unwrap_or(&self.user);
        Project::new(engineer, self.job.as_str(), self.client.as_str())
    }
}

fn main() {
    let inputs = Inputs::parse();
    if let Err(e) = run(&inputs) {
        report_error(&e);
        std::process::exit(1);
    }
}

fn run(inputs: &Inputs) -> CalcResult<()> {
    if let Some(path) = &inputs.open {
        return design_project(Path::new(path), inputs);
    }

    let target: Option<PathBuf> = inputs.save.as_ref().map(|p| with_project_extension(Path::new(p)));
    let _lock = match &target {
        Some(path) => Some(FileLock::acquire(path, inputs.user.as_str())?),
        None => None,
    };
    let mut project = match &target {
        Some(path) if path.exists() => Some(load_project(path)?),
        Some(_) => Some(inputs.new_project()),
        None => None,
    };

    let settings = project.as_ref().map(|p| p.settings.clone()).unwrap_or_default();
    let input = flexure_input(inputs, &settings)?;
    let resolution = input.materials();
    if let Some(diagnostic) = &resolution.diagnostic {
        eprintln!("Warning: material properties reset to zero: {}", diagnostic);
    }

    let design = calculate(&input.geometry, &resolution.state)?;
    print_design(&input.label, &resolution.state, &design, inputs)?;

    if let (Some(path), Some(project)) = (&target, project.as_mut()) {
        let id = project.add_item(CalculationItem::Flexure(input));
        save_project(project, path)?;
        println!("Saved item {} to {}", id, path.display());
    }
    Ok(())
}

/// Build the input from flags, falling back to `settings.defaults` for omitted options
fn flexure_input(inputs: &Inputs, settings: &GlobalSettings) -> CalcResult<FlexureInput> {
    let width = inputs.width.ok_or_else(|| CalcError::missing_field("width"))?;
    let height = inputs.height.ok_or_else(|| CalcError::missing_field("height"))?;
    let moment = inputs.moment.ok_or_else(|| CalcError::missing_field("moment"))?;

    let mut input = settings.new_flexure_input(
        inputs.label.as_str(),
        BeamGeometry::new(width, height, moment),
        ExposureSelection::parse_classes(&inputs.exposure)?,
    );
    if let Some(ratio) = inputs.ratio {
        input.geometry = input.geometry.with_depth_ratio(ratio.into());
    }
    if let Some(steel) = inputs.steel {
        input.steel_grade = steel.into();
    }
    if let Some(mode) = inputs.fabrication_mode() {
        input.exposure.fabrication_mode = mode;
    }
    if let Some(specimen) = inputs.specimen_type() {
        input.exposure.specimen_type = specimen;
    }
    input.fck_override = inputs.fck;
    Ok(input)
}

fn print_design(
    label: &str,
    materials: &MaterialState,
    design: &FlexureDesign,
    inputs: &Inputs,
) -> CalcResult<()> {
    if inputs.json {
        let json = serde_json::to_string_pretty(design).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
        return Ok(());
    }

    let concrete = &materials.concrete;
    let steel = &materials.steel;
    let class = materials.structural_class.label();
    let r = &design.result;

    println!("═══════════════════════════════════════");
    println!("  {}", label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Materials:");
    if class.is_empty() {
        println!("  Concrete: fck = {:.0} MPa", concrete.fck);
    } else {
        println!("  Concrete: fck = {:.0} MPa (governed by {})", concrete.fck, class);
    }
    println!("            fcd = {:.2} MPa, fctm = {:.2} MPa, Ecm = {:.0} MPa", concrete.fcd, concrete.fctm, concrete.ecm);
    println!("  Steel:    {} (fyd = {:.2} MPa, μlim = {:.3})", steel.grade, steel.fyd, steel.mu_limit);
    println!();
    println!("Derivation:");
    if inputs.markdown {
        println!("{}", design.render_markdown());
    } else {
        print!("{}", design.render_text());
    }
    println!();
    println!("═══════════════════════════════════════");
    println!("  {}", r.branch().display_name());
    println!("  As,th  = {:.2} cm²{}", r.as_theoretical_cm2().0, if r.minimum_governs() { " (minimum governs)" } else { "" });
    if let Some(compressed) = r.as_compressed_cm2() {
        println!("  A's,th = {:.2} cm²", compressed.0);
    }
    println!("═══════════════════════════════════════");
    Ok(())
}

fn design_project(path: &Path, inputs: &Inputs) -> CalcResult<()> {
    let (project, lock) = load_project_with_lock_check(path)?;
    if let Some(holder) = lock {
        eprintln!(
            "Note: {} is open by {} on {} since {}",
            path.display(),
            holder.user_id,
            holder.machine,
            holder.locked_at.to_rfc3339()
        );
    }

    println!(
        "Project {} ({}, {}) - {} beam(s)",
        project.meta.job_id,
        project.meta.client,
        project.meta.engineer,
        project.item_count()
    );

    let mut failures = 0;
    let designs = project.design_all();
    for (id, label, outcome) in &designs {
        match outcome {
            Ok(design) => {
                let materials = match project.get_item(id) {
                    Some(CalculationItem::Flexure(input)) => input.materials().state,
                    None => MaterialState::default(),
                };
                println!();
                print_design(label, &materials, design, inputs)?;
            }
            Err(e) => {
                failures += 1;
                eprintln!();
                eprintln!("{}: design failed", label);
                report_error(e);
            }
        }
    }

    if failures > 0 {
        return Err(CalcError::calculation_failed(
            "project",
            format!("{} of {} designs failed", failures, designs.len()),
        ));
    }
    Ok(())
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if e.is_recoverable() {
        eprintln!("The file is in use; try again once it is closed.");
    }
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexa_core::materials::ExposureClass;

    fn parse(extra: &[&str]) -> Inputs {
        let mut args = vec!["flexa", "-b", "0.30", "-H", "0.50", "-m", "100", "-e", "XC1"];
        args.extend_from_slice(extra);
        Inputs::parse_from(args)
    }

    fn precast_s400_settings() -> GlobalSettings {
        let mut settings = GlobalSettings::default();
        settings.defaults.steel_grade = SteelGrade::S400;
        settings.defaults.fabrication_mode = FabricationMode::Precast;
        settings.defaults.specimen_type = SpecimenType::Cubic;
        settings.defaults.depth_ratio = EffectiveDepthRatio::Reduced;
        settings
    }

    #[test]
    fn test_omitted_flags_use_project_defaults() {
        let input = flexure_input(&parse(&[]), &precast_s400_settings()).unwrap();
        assert_eq!(input.steel_grade, SteelGrade::S400);
        assert_eq!(input.exposure.fabrication_mode, FabricationMode::Precast);
        assert_eq!(input.exposure.specimen_type, SpecimenType::Cubic);
        assert_eq!(input.geometry.depth_ratio, EffectiveDepthRatio::Reduced);
        assert_eq!(input.exposure.classes(), &[ExposureClass::XC1]);
    }

    #[test]
    fn test_flags_override_project_defaults() {
        let inputs = parse(&["--steel", "s500", "--cast-in-place", "--cylindrical", "--ratio", "0.9"]);
        let input = flexure_input(&inputs, &precast_s400_settings()).unwrap();
        assert_eq!(input.steel_grade, SteelGrade::S500);
        assert_eq!(input.exposure.fabrication_mode, FabricationMode::CastInPlace);
        assert_eq!(input.exposure.specimen_type, SpecimenType::Cylindrical);
        assert_eq!(input.geometry.depth_ratio, EffectiveDepthRatio::Standard);
    }

    #[test]
    fn test_ratio_accepts_only_listed_values() {
        assert_eq!(parse(&["--ratio", "0.85"]).ratio, Some(ArgDepthRatio::Reduced));
        let args = ["flexa", "-b", "0.3", "-H", "0.5", "-m", "100", "--ratio", "0.8"];
        assert!(Inputs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_conflicting_fabrication_flags_rejected() {
        let args = ["flexa", "--precast", "--cast-in-place"];
        assert!(Inputs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_new_project_records_engineer_and_job() {
        let inputs = parse(&["--user", "jdoe", "--job", "26-101", "--client", "Harbour Works"]);
        let project = inputs.new_project();
        assert_eq!(project.meta.engineer, "jdoe");
        assert_eq!(project.meta.job_id, "26-101");
        assert_eq!(project.meta.client, "Harbour Works");

        let named = parse(&["--user", "jdoe", "--engineer", "Jane Engineer"]).new_project();
        assert_eq!(named.meta.engineer, "Jane Engineer");
    }

    #[test]
    fn test_missing_moment_is_reported() {
        let inputs = Inputs::parse_from(["flexa", "-b", "0.3", "-H", "0.5"]);
        let err = flexure_input(&inputs, &GlobalSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }
}
