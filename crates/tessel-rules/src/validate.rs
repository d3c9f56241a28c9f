//! Shared parameter checks for rule configs.

use tessel_core::RuleError;

pub(crate) fn finite(rule: &str, name: &str, value: f64) -> Result<(), RuleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RuleError::invalid_parameter(
            rule,
            name,
            format!("must be finite, got {value}"),
        ))
    }
}

pub(crate) fn non_negative(rule: &str, name: &str, value: f64) -> Result<(), RuleError> {
    finite(rule, name, value)?;
    if value < 0.0 {
        return Err(RuleError::invalid_parameter(
            rule,
            name,
            format!("must be >= 0, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn positive(rule: &str, name: &str, value: f64) -> Result<(), RuleError> {
    finite(rule, name, value)?;
    if value <= 0.0 {
        return Err(RuleError::invalid_parameter(
            rule,
            name,
            format!("must be > 0, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn probability(rule: &str, name: &str, value: f64) -> Result<(), RuleError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(RuleError::invalid_parameter(
            rule,
            name,
            format!("must be in [0, 1], got {value}"),
        ));
    }
    Ok(())
}
