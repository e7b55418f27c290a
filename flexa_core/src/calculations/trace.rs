//! # Derivation Trace
//!
//! Ordered, human-readable record of a design: each step carries a title,
//! the formula with the numbers substituted (LaTeX math), and the formatted
//! result. Steps are written once and never reread by the calculation.
//!
//! ```rust
//! use flexa_core::calculations::trace::{fmt_ratio, CalculationStep, DesignTrace};
//! use flexa_core::equations::Equation;
//!
//! let mut trace = DesignTrace::new();
//! trace.push(
//!     CalculationStep::new("Reduced moment", r"\mu = 0.0988", format!("μ = {}", fmt_ratio(0.098765)))
//!         .with_equation(Equation::ReducedMoment),
//! );
//! assert_eq!(trace.len(), 1);
//! assert_eq!(trace.steps()[0].result, "μ = 0.0988");
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::Equation;
use crate::units::{SquareCentimeters, SquareMeters};

/// One line of the derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStep {
    pub title: String,
    /// Formula with substituted values, LaTeX math mode
    pub formula: String,
    pub result: String,
    /// Registry entry behind this step, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<Equation>,
}

impl CalculationStep {
    pub fn new(title: impl Into<String>, formula: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            formula: formula.into(),
            result: result.into(),
            equation: None,
        }
    }

    pub fn with_equation(mut self, equation: Equation) -> Self {
        self.equation = Some(equation);
        self
    }

    /// Code reference of the linked equation, e.g. "EN 1992-1-1 §6.1"
    pub fn citation(&self) -> Option<String> {
        self.equation.map(|eq| eq.metadata().reference.citation())
    }
}

/// Append-only list of steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignTrace {
    steps: Vec<CalculationStep>,
}

impl DesignTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: CalculationStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[CalculationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<CalculationStep> {
        self.steps
    }
}

// ============================================================================
// Number formatting
// ============================================================================

/// Dimensionless ratios (μ, ξ): 4 decimals
pub fn fmt_ratio(value: f64) -> String {
    format!("{:.4}", value)
}

/// Lengths in m: 4 decimals
pub fn fmt_length(value: f64) -> String {
    format!("{:.4}", value)
}

/// Strains: 6 decimals
pub fn fmt_strain(value: f64) -> String {
    format!("{:.6}", value)
}

/// Stresses in MPa: 2 decimals
pub fn fmt_stress(value: f64) -> String {
    format!("{:.2}", value)
}

/// Moments in kN·m: 2 decimals
pub fn fmt_moment(value: f64) -> String {
    format!("{:.2}", value)
}

/// Area in m² with 6 decimals
pub fn fmt_area_m2(value: f64) -> String {
    format!("{:.6}", value)
}

/// Area converted to cm² with 2 decimals
pub fn fmt_area_cm2(value: f64) -> String {
    format!("{:.2}", SquareCentimeters::from(SquareMeters(value)).0)
}

/// "0.000499 m² = 4.99 cm²"
pub fn fmt_area(value: f64) -> String {
    format!("{} m² = {} cm²", fmt_area_m2(value), fmt_area_cm2(value))
}

// ============================================================================
// Rendering
// ============================================================================

/// Plain-text rendering for terminals
pub fn render_text(steps: &[CalculationStep]) -> String {
    let mut output = String::new();
    for (index, step) in steps.iter().enumerate() {
        output.push_str(&format!("{:>2}. {}\n", index + 1, step.title));
        output.push_str(&format!("    {}\n", step.formula));
        output.push_str(&format!("    => {}\n", step.result));
    }
    output
}

/// Markdown rendering with display-math blocks
pub fn render_markdown(steps: &[CalculationStep]) -> String {
    let mut output = String::new();
    for (index, step) in steps.iter().enumerate() {
        output.push_str(&format!("### {}. {}\n\n", index + 1, step.title));
        output.push_str(&format!("$$\n{}\n$$\n\n", step.formula));
        output.push_str(&format!("**{}**", step.result));
        if let Some(citation) = step.citation() {
            output.push_str(&format!(" ({})", citation));
        }
        output.push_str("\n\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CalculationStep> {
        vec![
            CalculationStep::new("Reduced moment", r"\mu = \frac{100}{0.30 \cdot 0.45^2 \cdot 16.67}", "μ = 0.0988")
                .with_equation(Equation::ReducedMoment),
            CalculationStep::new("Lever arm", r"z = 0.45 - 0.4 \cdot 0.0586", "z = 0.4266 m"),
        ]
    }

    #[test]
    fn test_precision() {
        assert_eq!(fmt_ratio(0.0987654), "0.0988");
        assert_eq!(fmt_length(0.0586089), "0.0586");
        assert_eq!(fmt_strain(0.0233731), "0.023373");
        assert_eq!(fmt_stress(469.5652), "469.57");
        assert_eq!(fmt_area(4.99261e-4), "0.000499 m² = 4.99 cm²");
    }

    #[test]
    fn test_trace_keeps_order() {
        let mut trace = DesignTrace::new();
        for step in sample() {
            trace.push(step);
        }
        let titles: Vec<_> = trace.steps().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Reduced moment", "Lever arm"]);
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample());
        assert!(text.starts_with(" 1. Reduced moment\n"));
        assert!(text.contains("    => z = 0.4266 m\n"));
    }

    #[test]
    fn test_render_markdown_cites_equation() {
        let markdown = render_markdown(&sample());
        assert!(markdown.contains("### 2. Lever arm"));
        assert!(markdown.contains("**μ = 0.0988** (EN 1992-1-1 §6.1)"));
    }

    #[test]
    fn test_step_serialization_skips_missing_equation() {
        let step = CalculationStep::new("t", "f", "r");
        let json = serde_json::to_string(&step).unwrap();
        assert!(!json.contains("equation"));
    }
}
