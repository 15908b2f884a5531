//! Implementation of `rutkit bmi --weight KG --height CM [--pregnant]`.
//!
//! Prints the BMI, its WHO class and risk level, and with `--pregnant` the
//! recommended weight gain. A BMI outside the plausible range is still
//! printed; a warning goes to stderr unless `--quiet`.
//!
//! Exit codes: 0 = computed, 2 = weight or height not a positive number.
use std::io::Write;

use rutkit_core::bmi::{
    BmiClass, PregnancyGuidance, check_range, classify, compute_bmi, pregnancy_guidance,
};

use crate::OutputFormat;
use crate::error::CliError;

/// Everything the command reports.
#[derive(Debug, Clone, PartialEq)]
pub struct BmiReport {
    /// The rounded BMI.
    pub bmi: f64,
    /// WHO class.
    pub class: BmiClass,
    /// Range warning, if the value is implausible.
    pub range_warning: Option<String>,
    /// Weight-gain guidance, when requested.
    pub pregnancy: Option<PregnancyGuidance>,
}

impl BmiReport {
    /// Computes the report.
    ///
    /// # Errors
    ///
    /// [`CliError::InvalidMeasurement`] when weight or height is unusable.
    pub fn compute(weight_kg: f64, height_cm: f64, pregnant: bool) -> Result<Self, CliError> {
        let bmi = compute_bmi(weight_kg, height_cm).map_err(|e| CliError::InvalidMeasurement {
            detail: e.to_string(),
        })?;
        Ok(Self {
            bmi,
            class: classify(bmi),
            range_warning: check_range(bmi).err().map(|e| e.to_string()),
            pregnancy: pregnant.then(|| pregnancy_guidance(bmi)),
        })
    }
}

/// Runs the `bmi` command.
///
/// # Errors
///
/// - [`CliError::InvalidMeasurement`] when weight or height is unusable.
/// - [`CliError::IoError`] if stdout or stderr cannot be written.
pub fn run(
    weight_kg: f64,
    height_cm: f64,
    pregnant: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let report = BmiReport::compute(weight_kg, height_cm, pregnant)?;

    if let Some(warning) = report.range_warning.as_deref().filter(|_| !quiet) {
        let stderr = std::io::stderr();
        let mut err_out = stderr.lock();
        writeln!(err_out, "[W] {warning}").map_err(|e| CliError::write_failed("stderr", &e))?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, format).map_err(|e| CliError::write_failed("stdout", &e))
}

fn write_report<W: Write>(w: &mut W, report: &BmiReport, format: OutputFormat) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(w, "bmi:    {:.2}", report.bmi)?;
            writeln!(w, "class:  {}", report.class)?;
            writeln!(w, "risk:   {}", report.class.risk())?;
            if let Some(guidance) = &report.pregnancy {
                writeln!(w, "gain:   {guidance}")?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "bmi": report.bmi,
                "class": report.class,
                "label": report.class.label(),
                "risk": report.class.risk(),
                "in_range": report.range_warning.is_none(),
                "pregnancy": report.pregnancy,
            });
            writeln!(w, "{obj}")
        }
    }
}
