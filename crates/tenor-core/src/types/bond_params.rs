//! Bond parameter record.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, TenorError, TenorResult};

/// Largest number of coupon periods a single bond may have.
///
/// A 100-year bond paying monthly needs 1,200 periods.
pub const MAX_PERIODS: u32 = 10_000;

/// How far `years_to_maturity × frequency` may sit from a whole number.
pub const PERIOD_ALIGNMENT_TOLERANCE: f64 = 1e-9;

/// Immutable description of a plain-vanilla fixed-coupon bond at a flat yield.
///
/// Every field is validated on construction, including deserialization, so
/// holding a `BondParams` is proof that the inputs are usable:
///
/// - `face_value` is positive and finite
/// - `coupon_rate` is finite and non-negative
/// - `years_to_maturity` is positive and finite
/// - `ytm` is finite (negative yields are allowed)
/// - `frequency` is at least one payment per year
/// - `years_to_maturity × frequency` is a whole number of periods
///
/// # Example
///
/// ```rust
/// use tenor_core::BondParams;
///
/// let bond = BondParams::new(1000.0, 0.05, 10.0, 0.05, 2).unwrap();
/// assert_eq!(bond.total_periods(), 20);
///
/// // 10.25 years cannot be split into semi-annual periods
/// assert!(BondParams::new(1000.0, 0.05, 10.25, 0.05, 2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBondParams")]
pub struct BondParams {
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    ytm: f64,
    frequency: u32,
    #[serde(skip)]
    total_periods: u32,
}

impl BondParams {
    /// Creates a validated bond description.
    ///
    /// # Arguments
    ///
    /// * `face_value` - Redemption amount paid at maturity
    /// * `coupon_rate` - Annual coupon rate as a decimal (0.05 for 5%)
    /// * `years_to_maturity` - Remaining life in years
    /// * `ytm` - Annual yield to maturity as a decimal
    /// * `frequency` - Coupon payments per year
    ///
    /// # Errors
    ///
    /// Returns [`TenorError::InvalidParameter`] when any field violates the
    /// invariants listed on the type.
    pub fn new(
        face_value: f64,
        coupon_rate: f64,
        years_to_maturity: f64,
        ytm: f64,
        frequency: u32,
    ) -> TenorResult<Self> {
        ensure_finite("face_value", face_value)?;
        ensure_finite("coupon_rate", coupon_rate)?;
        ensure_finite("years_to_maturity", years_to_maturity)?;
        ensure_finite("ytm", ytm)?;

        if face_value <= 0.0 {
            return Err(TenorError::invalid_parameter(
                "face_value",
                format!("must be positive, got {face_value}"),
            ));
        }
        if coupon_rate < 0.0 {
            return Err(TenorError::invalid_parameter(
                "coupon_rate",
                format!("must not be negative, got {coupon_rate}"),
            ));
        }
        if years_to_maturity <= 0.0 {
            return Err(TenorError::invalid_parameter(
                "years_to_maturity",
                format!("must be positive, got {years_to_maturity}"),
            ));
        }
        if frequency == 0 {
            return Err(TenorError::invalid_parameter(
                "frequency",
                "must be at least one payment per year",
            ));
        }

        let total_periods = resolve_periods(years_to_maturity, frequency)?;

        Ok(Self {
            face_value,
            coupon_rate,
            years_to_maturity,
            ytm,
            frequency,
            total_periods,
        })
    }

    /// Returns a copy of these parameters evaluated at a different yield.
    ///
    /// # Errors
    ///
    /// Returns [`TenorError::InvalidParameter`] if `ytm` is not finite.
    pub fn with_ytm(&self, ytm: f64) -> TenorResult<Self> {
        ensure_finite("ytm", ytm)?;
        Ok(Self { ytm, ..*self })
    }

    /// Redemption amount paid with the final coupon.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annual coupon rate as a decimal.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Remaining life in years.
    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    /// Annual yield to maturity as a decimal.
    pub fn ytm(&self) -> f64 {
        self.ytm
    }

    /// Coupon payments per year.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Number of coupon periods until maturity.
    pub fn total_periods(&self) -> u32 {
        self.total_periods
    }

    /// Coupon paid each period: `face × coupon_rate / frequency`.
    pub fn periodic_coupon(&self) -> f64 {
        self.face_value * self.coupon_rate / f64::from(self.frequency)
    }

    /// Yield per period: `ytm / frequency`.
    pub fn periodic_ytm(&self) -> f64 {
        self.ytm / f64::from(self.frequency)
    }

    /// One-period growth factor `1 + ytm / frequency`.
    pub fn discount_base(&self) -> f64 {
        1.0 + self.periodic_ytm()
    }

    /// Returns true if the bond pays no coupon.
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_rate == 0.0
    }
}

impl fmt::Display for BondParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} face, {:.3}% coupon, {}y, {:.3}% ytm, {}x/yr",
            self.face_value,
            self.coupon_rate * 100.0,
            self.years_to_maturity,
            self.ytm * 100.0,
            self.frequency
        )
    }
}

/// Wire shape accepted by deserialization; accepts camelCase aliases.
#[derive(Debug, Deserialize)]
struct RawBondParams {
    #[serde(alias = "faceValue")]
    face_value: f64,
    #[serde(alias = "couponRate")]
    coupon_rate: f64,
    #[serde(alias = "yearsToMaturity")]
    years_to_maturity: f64,
    ytm: f64,
    frequency: u32,
}

impl TryFrom<RawBondParams> for BondParams {
    type Error = TenorError;

    fn try_from(raw: RawBondParams) -> Result<Self, Self::Error> {
        Self::new(
            raw.face_value,
            raw.coupon_rate,
            raw.years_to_maturity,
            raw.ytm,
            raw.frequency,
        )
    }
}

/// Converts a maturity into a whole number of coupon periods.
fn resolve_periods(years_to_maturity: f64, frequency: u32) -> TenorResult<u32> {
    let raw = years_to_maturity * f64::from(frequency);
    let rounded = raw.round();

    if (raw - rounded).abs() > PERIOD_ALIGNMENT_TOLERANCE || rounded < 1.0 {
        log::debug!(
            "rejecting misaligned maturity: {years_to_maturity}y at {frequency}x/yr = {raw} periods"
        );
        return Err(TenorError::invalid_parameter(
            "years_to_maturity",
            format!(
                "{years_to_maturity} years at {frequency} payments per year is {raw} periods, \
                 not a whole number of at least one"
            ),
        ));
    }

    if rounded > f64::from(MAX_PERIODS) {
        return Err(TenorError::invalid_parameter(
            "years_to_maturity",
            format!("{rounded} periods exceeds the limit of {MAX_PERIODS}"),
        ));
    }

    Ok(rounded as u32)
}
