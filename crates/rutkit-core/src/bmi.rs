//! Body-mass index: computation, plausibility range, WHO classification and
//! gestational weight-gain guidance.
use std::fmt;

use serde::Serialize;

/// Smallest BMI accepted as a plausible measurement.
pub const MIN_PLAUSIBLE_BMI: f64 = 10.0;

/// Largest BMI accepted as a plausible measurement.
pub const MAX_PLAUSIBLE_BMI: f64 = 60.0;

/// Why a BMI could not be computed or was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BmiError {
    /// Weight was zero, negative, or not a finite number.
    #[error("weight must be greater than 0 kg, got {weight_kg}")]
    InvalidWeight {
        /// The rejected weight.
        weight_kg: f64,
    },
    /// Height was zero, negative, or not a finite number.
    #[error("height must be greater than 0 cm, got {height_cm}")]
    InvalidHeight {
        /// The rejected height.
        height_cm: f64,
    },
    /// BMI below [`MIN_PLAUSIBLE_BMI`].
    #[error("BMI {bmi} is too low; it must be at least 10")]
    TooLow {
        /// The rejected BMI.
        bmi: f64,
    },
    /// BMI above [`MAX_PLAUSIBLE_BMI`].
    #[error("BMI {bmi} is too high; it must be at most 60")]
    TooHigh {
        /// The rejected BMI.
        bmi: f64,
    },
}

/// Computes `weight / height²` with height given in centimetres, rounded to
/// two decimals.
///
/// ```
/// use rutkit_core::bmi::compute_bmi;
///
/// assert_eq!(compute_bmi(70.0, 175.0), Ok(22.86));
/// ```
///
/// # Errors
///
/// [`BmiError::InvalidWeight`] or [`BmiError::InvalidHeight`] when an input
/// is not a finite positive number.
/// A height so small that the result overflows is also `InvalidHeight`.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<f64, BmiError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(BmiError::InvalidWeight { weight_kg });
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(BmiError::InvalidHeight { height_cm });
    }
    let height_m = height_cm / 100.0;
    let bmi = (weight_kg / (height_m * height_m) * 100.0).round() / 100.0;
    // A tiny height overflows the division to infinity.
    if !bmi.is_finite() {
        return Err(BmiError::InvalidHeight { height_cm });
    }
    Ok(bmi)
}

/// Rejects values outside `MIN_PLAUSIBLE_BMI..=MAX_PLAUSIBLE_BMI`.
///
/// # Errors
///
/// [`BmiError::TooLow`] or [`BmiError::TooHigh`].
pub fn check_range(bmi: f64) -> Result<(), BmiError> {
    if bmi < MIN_PLAUSIBLE_BMI {
        Err(BmiError::TooLow { bmi })
    } else if bmi > MAX_PLAUSIBLE_BMI {
        Err(BmiError::TooHigh { bmi })
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Health risk associated with a [`BmiClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Normal,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very high",
            Self::Extreme => "extreme",
        };
        f.write_str(s)
    }
}

/// WHO adult BMI categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiClass {
    /// Below 18.5.
    Underweight,
    /// 18.5 up to 25.
    Normal,
    /// 25 up to 30.
    Overweight,
    /// 30 up to 35.
    #[serde(rename = "obesity_1")]
    ObesityI,
    /// 35 up to 40.
    #[serde(rename = "obesity_2")]
    ObesityII,
    /// 40 and above.
    #[serde(rename = "obesity_3")]
    ObesityIII,
}

impl BmiClass {
    /// Human-readable category name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "underweight",
            Self::Normal => "normal weight",
            Self::Overweight => "overweight",
            Self::ObesityI => "obesity class I",
            Self::ObesityII => "obesity class II",
            Self::ObesityIII => "obesity class III (morbid)",
        }
    }

    /// Associated risk level.
    pub fn risk(self) -> RiskLevel {
        match self {
            Self::Underweight => RiskLevel::Low,
            Self::Normal => RiskLevel::Normal,
            Self::Overweight => RiskLevel::Moderate,
            Self::ObesityI => RiskLevel::High,
            Self::ObesityII => RiskLevel::VeryHigh,
            Self::ObesityIII => RiskLevel::Extreme,
        }
    }
}

impl fmt::Display for BmiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies `bmi`. Lower bounds are inclusive.
pub fn classify(bmi: f64) -> BmiClass {
    if bmi < 18.5 {
        BmiClass::Underweight
    } else if bmi < 25.0 {
        BmiClass::Normal
    } else if bmi < 30.0 {
        BmiClass::Overweight
    } else if bmi < 35.0 {
        BmiClass::ObesityI
    } else if bmi < 40.0 {
        BmiClass::ObesityII
    } else {
        BmiClass::ObesityIII
    }
}

// ---------------------------------------------------------------------------
// Pregnancy
// ---------------------------------------------------------------------------

/// Pre-pregnancy BMI category used for weight-gain guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrePregnancyClass {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl PrePregnancyClass {
    /// Human-readable category name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "pre-pregnancy underweight",
            Self::Normal => "pre-pregnancy normal weight",
            Self::Overweight => "pre-pregnancy overweight",
            Self::Obese => "pre-pregnancy obesity",
        }
    }
}

/// Recommended total weight gain over a pregnancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PregnancyGuidance {
    /// Category of the pre-pregnancy BMI.
    pub class: PrePregnancyClass,
    /// Lower end of the recommended gain, in kilograms.
    pub min_gain_kg: f64,
    /// Upper end of the recommended gain, in kilograms.
    pub max_gain_kg: f64,
}

impl fmt::Display for PregnancyGuidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: recommended weight gain {}-{} kg",
            self.class.label(),
            self.min_gain_kg,
            self.max_gain_kg
        )
    }
}

/// Weight-gain guidance for a pre-pregnancy `bmi`.
pub fn pregnancy_guidance(bmi: f64) -> PregnancyGuidance {
    let (class, min_gain_kg, max_gain_kg) = if bmi < 18.5 {
        (PrePregnancyClass::Underweight, 12.5, 18.0)
    } else if bmi < 25.0 {
        (PrePregnancyClass::Normal, 11.5, 16.0)
    } else if bmi < 30.0 {
        (PrePregnancyClass::Overweight, 7.0, 11.5)
    } else {
        (PrePregnancyClass::Obese, 5.0, 9.0)
    };
    PregnancyGuidance {
        class,
        min_gain_kg,
        max_gain_kg,
    }
}
